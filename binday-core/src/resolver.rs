//! Matching of queries against a collection schedule.
//!
//! Schedules arrive in source order, which is not guaranteed to be
//! chronological, so every search scans all events and keeps a running
//! earliest candidate.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::bin_type::{self, BinCategory};
use crate::model::{
    CollectionEvent, FailureKind, Query, QueryMode, ResolutionFailure, ResolvedAnswer, Schedule,
};
use crate::response;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Which event wins when several share the earliest qualifying date.
pub enum TieBreak {
    /// The one seen last in source order.
    #[default]
    LastSeen,
    /// The one seen first in source order.
    FirstSeen,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// How a `Tomorrow` query with no collection is reported.
pub enum TomorrowAbsence {
    /// As a normal answer, “There are no bins tomorrow”.
    #[default]
    Answer,
    /// As a [`FailureKind::NoEventTomorrow`] failure.
    Failure,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Policy knobs for [`find`] and [`resolve`].
pub struct ResolverOptions {
    /// Tie-break between events on the same date.
    pub tie_break: TieBreak,
    /// Reporting of an empty tomorrow.
    pub tomorrow_absence: TomorrowAbsence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Event chosen for a query, before it is put into words.
pub enum Resolution<'a> {
    /// Collection on the day after the reference date.
    Tomorrow(&'a CollectionEvent),
    /// Nothing is collected tomorrow.
    NothingTomorrow,
    /// Earliest collection after the reference date.
    Next(&'a CollectionEvent),
    /// Earliest collection after the reference date containing a category.
    NextOfType {
        /// Bin name as the caller said it.
        requested: &'a str,
        /// Category the name normalized to.
        category: BinCategory,
        /// Matching event.
        event: &'a CollectionEvent,
    },
}

/// Select the event answering `query`.
///
/// # Errors
///
/// Returns a [`ResolutionFailure`] when the bin type is unknown, the schedule
/// is empty, or no event qualifies.
pub fn find<'a>(
    schedule: &'a Schedule,
    query: &'a Query,
    options: ResolverOptions,
) -> Result<Resolution<'a>, ResolutionFailure> {
    let reference = query.reference_date;

    match query.mode {
        QueryMode::Tomorrow => {
            let found = reference.checked_add_days(Days::new(1)).and_then(|target| {
                earliest(
                    schedule.iter().filter(|event| event.date == target),
                    options.tie_break,
                )
            });
            match (found, options.tomorrow_absence) {
                (Some(event), _) => Ok(Resolution::Tomorrow(event)),
                (None, TomorrowAbsence::Answer) => Ok(Resolution::NothingTomorrow),
                (None, TomorrowAbsence::Failure) => Err(ResolutionFailure::no_event_tomorrow()),
            }
        }
        QueryMode::NextAny => {
            if schedule.is_empty() {
                return Err(ResolutionFailure::no_events_at_all());
            }
            next_after(schedule, reference, None, options.tie_break)
                .map(Resolution::Next)
                .ok_or_else(|| ResolutionFailure::no_matching_future_event(None))
        }
        QueryMode::NextOfType => {
            let Some(requested) = query.bin_type.as_deref() else {
                return Err(ResolutionFailure::new(FailureKind::UnrecognizedBinType));
            };
            let category = bin_type::normalize(requested)
                .ok_or_else(|| ResolutionFailure::unrecognized_bin_type(requested))?;
            if schedule.is_empty() {
                return Err(ResolutionFailure::no_events_at_all());
            }
            next_after(schedule, reference, Some(category), options.tie_break)
                .map(|event| Resolution::NextOfType {
                    requested,
                    category,
                    event,
                })
                .ok_or_else(|| {
                    ResolutionFailure::no_matching_future_event(Some(requested.to_owned()))
                })
        }
    }
}

/// Select the event answering `query` and put it into words.
///
/// # Errors
///
/// See [`find`].
pub fn resolve(
    schedule: &Schedule,
    query: &Query,
    options: ResolverOptions,
) -> Result<ResolvedAnswer, ResolutionFailure> {
    find(schedule, query, options).map(response::answer)
}

fn next_after(
    schedule: &Schedule,
    reference: NaiveDate,
    category: Option<BinCategory>,
    tie_break: TieBreak,
) -> Option<&CollectionEvent> {
    earliest(
        schedule.iter().filter(|event| {
            event.date > reference
                && category.is_none_or(|category| event.description.contains(category.as_str()))
        }),
        tie_break,
    )
}

fn earliest<'a>(
    candidates: impl Iterator<Item = &'a CollectionEvent>,
    tie_break: TieBreak,
) -> Option<&'a CollectionEvent> {
    candidates.fold(None, |best, event| match best {
        None => Some(event),
        Some(current) if event.date < current.date => Some(event),
        Some(current) if event.date == current.date && tie_break == TieBreak::LastSeen => {
            Some(event)
        }
        kept => kept,
    })
}
