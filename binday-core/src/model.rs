//! Domain data structures for councils, collection schedules, and queries.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Built-in councils supported by the application.
pub enum Councils {
    /// East Ayrshire, Scotland.
    EastAyrshire,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier for a council known to binday.
pub struct CouncilId(pub String);

impl fmt::Display for Councils {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slug = match self {
            Councils::EastAyrshire => "east-ayrshire",
        };
        write!(formatter, "{slug}")
    }
}

impl From<Councils> for CouncilId {
    fn from(council: Councils) -> Self {
        CouncilId(council.to_string())
    }
}

impl fmt::Display for CouncilId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Metadata describing a council and its human-friendly name.
pub struct CouncilMeta {
    /// Unique identifier.
    pub id: CouncilId,
    /// Display name.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Validated household location a schedule is fetched for.
pub struct Location {
    /// Postcode, upper-case without spaces (e.g. `KA31SF`).
    pub postcode: String,
    /// House number including a letter suffix such as “A”.
    pub house_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One scheduled collection on one day.
pub struct CollectionEvent {
    /// Collection day.
    pub date: NaiveDate,
    /// Free text naming what is collected, e.g. “food bin and red box”.
    pub description: String,
}

impl CollectionEvent {
    /// Construct a new event.
    #[must_use]
    pub fn new<D: Into<String>>(date: NaiveDate, description: D) -> Self {
        Self {
            date,
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Collection events in source order. Never assumed to be sorted.
pub struct Schedule {
    events: Vec<CollectionEvent>,
}

impl Schedule {
    /// Wrap events as delivered by the source.
    #[must_use]
    pub fn new(events: Vec<CollectionEvent>) -> Self {
        Self { events }
    }

    /// Events in source order.
    #[must_use]
    pub fn events(&self) -> &[CollectionEvent] {
        &self.events
    }

    /// Iterator over events in source order.
    pub fn iter(&self) -> impl Iterator<Item = &CollectionEvent> {
        self.events.iter()
    }

    /// Number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the source returned no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl From<Vec<CollectionEvent>> for Schedule {
    fn from(events: Vec<CollectionEvent>) -> Self {
        Self::new(events)
    }
}

impl FromIterator<CollectionEvent> for Schedule {
    fn from_iter<I: IntoIterator<Item = CollectionEvent>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Undecoded schedule payload as returned by a provider.
pub enum RawSchedule {
    /// JSON object mapping ISO-8601 dates to descriptions.
    Json(String),
    /// iCalendar text with one VEVENT per collection.
    Ical(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Matching policy requested by the caller.
pub enum QueryMode {
    /// Collection on the day after the reference date.
    Tomorrow,
    /// Earliest collection after the reference date.
    NextAny,
    /// Earliest collection after the reference date that includes a given bin.
    NextOfType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single question about the schedule.
pub struct Query {
    /// Matching policy.
    pub mode: QueryMode,
    /// Date treated as “today”.
    pub reference_date: NaiveDate,
    /// Raw spoken bin name; required for [`QueryMode::NextOfType`].
    pub bin_type: Option<String>,
}

impl Query {
    /// Ask which bin is collected the day after `reference_date`.
    #[must_use]
    pub fn tomorrow(reference_date: NaiveDate) -> Self {
        Self {
            mode: QueryMode::Tomorrow,
            reference_date,
            bin_type: None,
        }
    }

    /// Ask for the next collection of any kind.
    #[must_use]
    pub fn next_any(reference_date: NaiveDate) -> Self {
        Self {
            mode: QueryMode::NextAny,
            reference_date,
            bin_type: None,
        }
    }

    /// Ask for the next collection of the given (raw, spoken) bin type.
    #[must_use]
    pub fn next_of_type<B: Into<String>>(reference_date: NaiveDate, bin_type: B) -> Self {
        Self {
            mode: QueryMode::NextOfType,
            reference_date,
            bin_type: Some(bin_type.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Successful answer, ready to be spoken.
pub struct ResolvedAnswer {
    /// Speech text, possibly containing `say-as` markup.
    pub text: String,
}

impl ResolvedAnswer {
    /// Wrap answer text.
    #[must_use]
    pub fn new<T: Into<String>>(text: T) -> Self {
        Self { text: text.into() }
    }
}

impl fmt::Display for ResolvedAnswer {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Classification of a query that produced no answer.
pub enum FailureKind {
    /// The source returned an empty schedule.
    NoEventsAtAll,
    /// Nothing is collected tomorrow (only when configured as a failure).
    NoEventTomorrow,
    /// No event after the reference date matched the query.
    NoMatchingFutureEvent,
    /// The spoken bin name is not in the normalization table.
    UnrecognizedBinType,
    /// The schedule could not be fetched.
    UpstreamUnavailable,
    /// The schedule payload could not be decoded.
    UpstreamMalformed,
}

impl FailureKind {
    /// Returns a stable snake-case name for this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoEventsAtAll => "no_events_at_all",
            Self::NoEventTomorrow => "no_event_tomorrow",
            Self::NoMatchingFutureEvent => "no_matching_future_event",
            Self::UnrecognizedBinType => "unrecognized_bin_type",
            Self::UpstreamUnavailable => "upstream_unavailable",
            Self::UpstreamMalformed => "upstream_malformed",
        }
    }

    /// True when the query was understood and the answer is simply “nothing”.
    #[must_use]
    pub fn is_informational(self) -> bool {
        matches!(self, Self::NoEventsAtAll | Self::NoEventTomorrow)
    }

    /// True when the schedule source itself failed.
    #[must_use]
    pub fn is_upstream(self) -> bool {
        matches!(self, Self::UpstreamUnavailable | Self::UpstreamMalformed)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// A query that could not be answered with a collection.
///
/// Spoken text for each kind comes from [`ResolutionFailure::message`];
/// `Display` gives the technical form used in logs.
pub struct ResolutionFailure {
    kind: FailureKind,
    bin_type: Option<String>,
    detail: Option<String>,
}

impl ResolutionFailure {
    /// Creates a failure of the given kind.
    #[must_use]
    pub fn new(kind: FailureKind) -> Self {
        Self {
            kind,
            bin_type: None,
            detail: None,
        }
    }

    /// The source returned an empty schedule.
    #[must_use]
    pub fn no_events_at_all() -> Self {
        Self::new(FailureKind::NoEventsAtAll)
    }

    /// Nothing is collected tomorrow.
    #[must_use]
    pub fn no_event_tomorrow() -> Self {
        Self::new(FailureKind::NoEventTomorrow)
    }

    /// No future event matched, optionally for a requested bin type.
    #[must_use]
    pub fn no_matching_future_event(bin_type: Option<String>) -> Self {
        Self {
            bin_type,
            ..Self::new(FailureKind::NoMatchingFutureEvent)
        }
    }

    /// The spoken bin name is unknown.
    #[must_use]
    pub fn unrecognized_bin_type<T: Into<String>>(term: T) -> Self {
        Self {
            bin_type: Some(term.into()),
            ..Self::new(FailureKind::UnrecognizedBinType)
        }
    }

    /// The schedule could not be fetched.
    #[must_use]
    pub fn upstream_unavailable<D: Into<String>>(detail: D) -> Self {
        Self::new(FailureKind::UpstreamUnavailable).with_detail(detail)
    }

    /// The schedule payload could not be decoded.
    #[must_use]
    pub fn upstream_malformed<D: Into<String>>(detail: D) -> Self {
        Self::new(FailureKind::UpstreamMalformed).with_detail(detail)
    }

    /// Attach a technical detail for logs.
    #[must_use]
    pub fn with_detail<D: Into<String>>(mut self, detail: D) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Failure classification.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Bin type the caller asked about, if any.
    #[must_use]
    pub fn bin_type(&self) -> Option<&str> {
        self.bin_type.as_deref()
    }

    /// Technical detail, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.kind)?;
        if let Some(bin_type) = &self.bin_type {
            write!(formatter, " ({bin_type})")?;
        }
        if let Some(detail) = &self.detail {
            write!(formatter, ": {detail}")?;
        }
        Ok(())
    }
}
