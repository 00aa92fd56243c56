//! Provider implementation for East Ayrshire using the council's recycling API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use tracing::debug;

use binday_core::{
    config::{SourceKind, SourceSettings},
    model::{CouncilId, CouncilMeta, Councils, Location, RawSchedule},
    plugin::CouncilPlugin,
    ports::{PortError, SchedulePort},
};

/// Schedule lookup through `/api/Recycling/Postcode/{postcode}`.
///
/// The endpoint answers with a JSON object mapping collection dates to
/// descriptions such as `"food bin and red box"`.
pub struct JsonSchedulePort {
    client: Client,
    meta: CouncilMeta,
    base_url: String,
}

impl JsonSchedulePort {
    /// Create a new schedule port bound to the given HTTP client.
    #[must_use]
    pub fn new<U: Into<String>>(client: Client, base_url: U) -> Self {
        Self {
            client,
            meta: council_meta(),
            base_url: base_url.into(),
        }
    }

    /// Request URL for a location.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::InvalidLocation`] when the postcode is empty.
    pub fn url(&self, location: &Location) -> Result<String, PortError> {
        let postcode = location
            .postcode
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        if postcode.is_empty() {
            return Err(PortError::InvalidLocation("empty postcode".to_owned()));
        }
        Ok(format!(
            "{}/api/Recycling/Postcode/{postcode}",
            self.base_url.trim_end_matches('/')
        ))
    }
}

#[async_trait]
impl SchedulePort for JsonSchedulePort {
    fn council(&self) -> &CouncilMeta {
        &self.meta
    }

    async fn fetch(&self, location: &Location) -> Result<RawSchedule, PortError> {
        let url = self.url(location)?;
        debug!(%url, "Fetching JSON schedule");

        let req = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json");

        fetch_text(req).await.map(RawSchedule::Json)
    }
}

/// Schedule lookup through a published iCalendar feed.
///
/// The feed is tied to one property, so the location is not part of the request.
pub struct IcalSchedulePort {
    client: Client,
    meta: CouncilMeta,
    feed_url: String,
}

impl IcalSchedulePort {
    /// Create a new schedule port reading the given feed.
    #[must_use]
    pub fn new<U: Into<String>>(client: Client, feed_url: U) -> Self {
        Self {
            client,
            meta: council_meta(),
            feed_url: feed_url.into(),
        }
    }

    /// Feed URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.feed_url
    }
}

#[async_trait]
impl SchedulePort for IcalSchedulePort {
    fn council(&self) -> &CouncilMeta {
        &self.meta
    }

    async fn fetch(&self, _location: &Location) -> Result<RawSchedule, PortError> {
        debug!(url = %self.feed_url, "Fetching iCalendar feed");
        fetch_text(self.client.get(&self.feed_url))
            .await
            .map(RawSchedule::Ical)
    }
}

/// Build the plugin bundle for East Ayrshire from the source settings.
#[must_use]
pub fn plugin(
    client: Client,
    source: &SourceSettings,
    allowed_postcodes: Vec<String>,
) -> CouncilPlugin {
    let base_url = source.base_url.trim_end_matches('/');
    let schedule_port: Arc<dyn SchedulePort> = match source.kind {
        SourceKind::Json => Arc::new(JsonSchedulePort::new(client, base_url)),
        SourceKind::Ical => Arc::new(IcalSchedulePort::new(
            client,
            format!("{base_url}/{}", source.ical_feed.trim_start_matches('/')),
        )),
    };

    CouncilPlugin {
        meta: council_meta(),
        schedule_port,
        allowed_postcodes,
    }
}

fn council_meta() -> CouncilMeta {
    CouncilMeta {
        id: CouncilId::from(Councils::EastAyrshire),
        name: String::from("East Ayrshire"),
    }
}

// Small helper to fetch a body as text with status handling.
async fn fetch_text(req: RequestBuilder) -> Result<String, PortError> {
    req.send()
        .await
        .map_err(PortError::from)?
        .error_for_status()
        .map_err(PortError::from)?
        .text()
        .await
        .map_err(PortError::from)
}
