//! Spoken wording for resolutions and failures.

use crate::model::{FailureKind, ResolutionFailure, ResolvedAnswer};
use crate::resolver::Resolution;
use crate::speech::spoken_day;

const NO_BINS_TOMORROW: &str = "There are no bins tomorrow";
const NO_COLLECTIONS: &str = "There are no bin collections scheduled for your address.";
const RETRY: &str = "I didn't understand that query, please try again.";
const NO_NEXT_COLLECTION: &str = "I couldn't find the next bin collection, please try again later.";
const UNKNOWN_BIN: &str = "I didn't catch which bin you meant, please try again.";

/// Put a resolution into words.
#[must_use]
pub fn answer(resolution: Resolution<'_>) -> ResolvedAnswer {
    let text = match resolution {
        Resolution::Tomorrow(event) => format!("Tomorrow's collection is {}", event.description),
        Resolution::NothingTomorrow => NO_BINS_TOMORROW.to_owned(),
        Resolution::Next(event) => format!(
            "Next collection is: {} on {}",
            event.description,
            spoken_day(event.date)
        ),
        Resolution::NextOfType {
            requested, event, ..
        } => format!(
            "Next collection of the {requested} is: {} on {}",
            event.description,
            spoken_day(event.date)
        ),
    };
    ResolvedAnswer::new(text)
}

impl ResolutionFailure {
    /// Text to speak back to the user. Never empty.
    #[must_use]
    pub fn message(&self) -> String {
        match (self.kind(), self.bin_type()) {
            (FailureKind::NoEventsAtAll, _) => NO_COLLECTIONS.to_owned(),
            (FailureKind::NoEventTomorrow, _) => NO_BINS_TOMORROW.to_owned(),
            (FailureKind::NoMatchingFutureEvent, Some(bin_type)) => format!(
                "I couldn't find the next collection of the {bin_type}, please try again later."
            ),
            (FailureKind::NoMatchingFutureEvent, None) => NO_NEXT_COLLECTION.to_owned(),
            (FailureKind::UnrecognizedBinType, Some(bin_type)) if !bin_type.trim().is_empty() => {
                format!("I don't know the {bin_type} bin, please try again with a different name.")
            }
            (FailureKind::UnrecognizedBinType, _) => UNKNOWN_BIN.to_owned(),
            (FailureKind::UpstreamUnavailable | FailureKind::UpstreamMalformed, _) => {
                RETRY.to_owned()
            }
        }
    }
}

/// Final text for either outcome.
#[must_use]
pub fn render(result: &Result<ResolvedAnswer, ResolutionFailure>) -> String {
    match result {
        Ok(answer) => answer.text.clone(),
        Err(failure) => failure.message(),
    }
}
