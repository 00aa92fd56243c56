//! High-level service facade combining guard, providers, and resolver.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::guard::{self, DeviceAddress, GuardRejection, PermissionRequest};
use crate::intent::Intent;
use crate::model::{CouncilId, Location, Query, ResolutionFailure, ResolvedAnswer};
use crate::parser;
use crate::plugin::PluginRegistry;
use crate::resolver::{self, ResolverOptions};
use crate::response;

#[derive(Debug, Clone, PartialEq, Eq)]
/// What the caller speaks back, plus an optional platform directive.
pub struct Reply {
    /// Speech text. Never empty.
    pub text: String,
    /// Permission prompt to attach to the response.
    pub permission_request: Option<PermissionRequest>,
}

impl Reply {
    fn say<T: Into<String>>(text: T) -> Self {
        Self {
            text: text.into(),
            permission_request: None,
        }
    }
}

impl From<GuardRejection> for Reply {
    fn from(rejection: GuardRejection) -> Self {
        Self {
            text: rejection.message(),
            permission_request: rejection.permission_request().cloned(),
        }
    }
}

/// Public entry point for answering collection questions.
pub struct BindayService {
    registry: Arc<PluginRegistry>,
    options: ResolverOptions,
}

impl BindayService {
    /// Create a new service bound to the provided registry.
    #[must_use]
    pub fn new(registry: Arc<PluginRegistry>, options: ResolverOptions) -> Self {
        Self { registry, options }
    }

    /// List all available councils and their display names.
    #[must_use]
    pub fn councils(&self) -> Vec<(CouncilId, String)> {
        self.registry
            .councils()
            .into_iter()
            .map(|meta| (meta.id, meta.name))
            .collect()
    }

    /// Run the address guard with the council's served postcodes.
    ///
    /// # Errors
    ///
    /// Returns a [`GuardRejection`] when consent or the address is missing or
    /// unusable, or [`GuardRejection::UnknownCouncil`] when no plugin is
    /// registered for `council`.
    pub fn locate(
        &self,
        council: &CouncilId,
        consent: bool,
        address: Option<&DeviceAddress>,
    ) -> Result<Location, GuardRejection> {
        match self.registry.plugin(council) {
            Ok(plugin) => guard::check_address(consent, address, &plugin.allowed_postcodes),
            Err(err) => {
                warn!(%council, error = %err, "No plugin for council");
                Err(GuardRejection::UnknownCouncil(council.to_string()))
            }
        }
    }

    /// Fetch, parse, and resolve a query for a validated location.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolutionFailure`]; upstream kinds when the source could
    /// not be fetched or decoded, domain kinds when nothing matched.
    pub async fn answer(
        &self,
        council: &CouncilId,
        location: &Location,
        query: &Query,
    ) -> Result<ResolvedAnswer, ResolutionFailure> {
        let plugin = self.registry.plugin(council)?;

        let raw = plugin.schedule_port.fetch(location).await.map_err(|err| {
            warn!(%council, error = %err, "Schedule fetch failed");
            ResolutionFailure::from(err)
        })?;

        let schedule = parser::parse(&raw).inspect_err(|failure| {
            warn!(%council, %failure, "Schedule payload rejected");
        })?;
        debug!(%council, events = schedule.len(), "Schedule loaded");

        let result = resolver::resolve(&schedule, query, self.options);
        match &result {
            Ok(answer) => info!(mode = ?query.mode, answer = %answer, "Answered query"),
            Err(failure) => info!(mode = ?query.mode, %failure, "Query not answered"),
        }
        result
    }

    /// Full turn: guard, intent, fetch, and wording.
    pub async fn respond(
        &self,
        council: &CouncilId,
        consent: bool,
        address: Option<&DeviceAddress>,
        intent: Intent,
        reference_date: NaiveDate,
    ) -> Reply {
        let location = match self.locate(council, consent, address) {
            Ok(location) => location,
            Err(rejection) => return Reply::from(rejection),
        };

        let query = match intent.into_query(reference_date) {
            Ok(query) => query,
            Err(err) => {
                debug!(error = %err, "Intent rejected");
                return Reply::say(err.message());
            }
        };

        Reply::say(response::render(
            &self.answer(council, &location, &query).await,
        ))
    }
}
