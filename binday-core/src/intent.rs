//! Voice intents translated into [`Query`]s.

use chrono::NaiveDate;
use thiserror::Error;

use crate::bin_type;
use crate::model::{Query, QueryMode};

/// Intent asking which bin goes out tomorrow.
pub const WHICH_BIN_TOMORROW: &str = "WhichBinTomorrow";
/// Intent asking for the next collection.
pub const NEXT_BIN: &str = "NextBin";
/// Intent asking when a given bin is collected; carries a `binType` slot.
pub const WHEN_IS_BIN: &str = "WhenIsBin";
/// Session start without a question; answered like [`NEXT_BIN`].
pub const LAUNCH_REQUEST: &str = "LaunchRequest";

/// Intents that cannot be turned into a query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntentError {
    /// The intent name is not one binday handles.
    #[error("Unhandled intent {0:?}")]
    Unhandled(String),
    /// `WhenIsBin` arrived without a bin type.
    #[error("Missing binType slot")]
    MissingBinType,
}

impl IntentError {
    /// Text to speak back to the user.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Unhandled(_) => "Something went wrong, try again",
            Self::MissingBinType => "Which bin would you like to know about?",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// An intent as delivered by the voice platform.
pub struct Intent {
    /// Intent name, e.g. `WhenIsBin`.
    pub name: String,
    /// Raw value of the `binType` slot.
    pub bin_type: Option<String>,
}

impl Intent {
    /// Construct an intent.
    #[must_use]
    pub fn new<N: Into<String>>(name: N, bin_type: Option<String>) -> Self {
        Self {
            name: name.into(),
            bin_type,
        }
    }

    /// Query mode the intent maps to.
    ///
    /// # Errors
    ///
    /// Returns [`IntentError::Unhandled`] for unknown names.
    pub fn mode(&self) -> Result<QueryMode, IntentError> {
        match self.name.as_str() {
            WHICH_BIN_TOMORROW => Ok(QueryMode::Tomorrow),
            NEXT_BIN | LAUNCH_REQUEST => Ok(QueryMode::NextAny),
            WHEN_IS_BIN => Ok(QueryMode::NextOfType),
            other => Err(IntentError::Unhandled(other.to_owned())),
        }
    }

    /// Build the query for `reference_date`.
    ///
    /// The slot value is lower-cased and trimmed; other modes ignore it.
    ///
    /// # Errors
    ///
    /// Returns an [`IntentError`] for unknown names or a missing bin type.
    pub fn into_query(self, reference_date: NaiveDate) -> Result<Query, IntentError> {
        match self.mode()? {
            QueryMode::Tomorrow => Ok(Query::tomorrow(reference_date)),
            QueryMode::NextAny => Ok(Query::next_any(reference_date)),
            QueryMode::NextOfType => {
                let bin_type = self
                    .bin_type
                    .as_deref()
                    .map(bin_type::clean_spoken)
                    .filter(|raw| !raw.is_empty())
                    .ok_or(IntentError::MissingBinType)?;
                Ok(Query::next_of_type(reference_date, bin_type))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2017, 12, 3).unwrap()
    }

    #[test]
    fn known_intents() {
        assert_eq!(
            Intent::new(WHICH_BIN_TOMORROW, None).into_query(today()),
            Ok(Query::tomorrow(today()))
        );
        assert_eq!(
            Intent::new(NEXT_BIN, Some("ignored".to_owned())).into_query(today()),
            Ok(Query::next_any(today()))
        );
        assert_eq!(
            Intent::new(LAUNCH_REQUEST, None).into_query(today()),
            Ok(Query::next_any(today()))
        );
    }

    #[test]
    fn bin_type_slot_is_cleaned() {
        assert_eq!(
            Intent::new(WHEN_IS_BIN, Some(" Blue  Bin ".to_owned())).into_query(today()),
            Ok(Query::next_of_type(today(), "blue bin"))
        );
        assert_eq!(
            Intent::new(WHEN_IS_BIN, Some("Garden\tWASTE".to_owned())).into_query(today()),
            Ok(Query::next_of_type(today(), "garden waste"))
        );
    }

    #[test]
    fn missing_bin_type() {
        for slot in [None, Some("   ".to_owned())] {
            assert_eq!(
                Intent::new(WHEN_IS_BIN, slot).into_query(today()),
                Err(IntentError::MissingBinType)
            );
        }
    }

    #[test]
    fn unhandled_intent() {
        let err = Intent::new("AMAZON.HelpIntent", None)
            .into_query(today())
            .unwrap_err();
        assert_eq!(err, IntentError::Unhandled("AMAZON.HelpIntent".to_owned()));
        assert_eq!(err.message(), "Something went wrong, try again");
    }
}
