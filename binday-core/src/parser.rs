//! Decoding of upstream schedule payloads into [`Schedule`]s.
//!
//! Both decoders keep the source order and neither filters, sorts, nor
//! deduplicates. Every event is dated at its calendar day, time dropped.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use icalendar::{
    Calendar, CalendarComponent, CalendarDateTime, Component, DatePerhapsTime, Event, EventLike,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::model::{CollectionEvent, RawSchedule, ResolutionFailure, Schedule};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Decode either payload kind.
///
/// # Errors
///
/// Returns an [`UpstreamMalformed`](crate::model::FailureKind::UpstreamMalformed)
/// failure when the payload does not have the expected structure.
pub fn parse(raw: &RawSchedule) -> Result<Schedule, ResolutionFailure> {
    match raw {
        RawSchedule::Json(body) => parse_json(body),
        RawSchedule::Ical(body) => parse_ics(body),
    }
}

/// Decode a JSON object whose keys are ISO-8601 dates and whose values are descriptions.
///
/// A key repeated in the body keeps its first position and its last value.
///
/// # Errors
///
/// Fails as malformed when the body is not JSON, is not an object, has a key
/// that is not a date, or has a non-string value.
pub fn parse_json(body: &str) -> Result<Schedule, ResolutionFailure> {
    let value: Value = serde_json::from_str(body)
        .map_err(|err| ResolutionFailure::upstream_malformed(format!("invalid JSON: {err}")))?;

    let Value::Object(entries) = value else {
        return Err(ResolutionFailure::upstream_malformed(
            "expected a JSON object keyed by date",
        ));
    };

    let mut events = Vec::with_capacity(entries.len());
    for (key, item) in entries {
        let date = parse_date_key(&key).ok_or_else(|| {
            ResolutionFailure::upstream_malformed(format!("invalid date key {key:?}"))
        })?;
        let Value::String(description) = item else {
            return Err(ResolutionFailure::upstream_malformed(format!(
                "description for {key} is not a string"
            )));
        };
        events.push(CollectionEvent::new(date, description));
    }

    debug!(events = events.len(), "Parsed JSON schedule");
    Ok(Schedule::new(events))
}

/// Decode an iCalendar stream, one event per VEVENT.
///
/// The description comes from `DESCRIPTION`, falling back to `SUMMARY`.
/// VEVENTs without a start date or any text are skipped.
///
/// # Errors
///
/// Fails as malformed when the text is not a VCALENDAR or cannot be parsed.
pub fn parse_ics(body: &str) -> Result<Schedule, ResolutionFailure> {
    if !body.trim_start().starts_with("BEGIN:VCALENDAR") {
        return Err(ResolutionFailure::upstream_malformed(
            "expected an iCalendar stream",
        ));
    }

    let calendar = body.parse::<Calendar>().map_err(|err| {
        ResolutionFailure::upstream_malformed(format!("invalid iCalendar: {err}"))
    })?;

    let events = calendar
        .iter()
        .filter_map(|component| match component {
            CalendarComponent::Event(event) => collection_from_vevent(event),
            _ => None,
        })
        .collect::<Vec<_>>();

    debug!(events = events.len(), "Parsed iCalendar schedule");
    Ok(Schedule::new(events))
}

fn collection_from_vevent(event: &Event) -> Option<CollectionEvent> {
    let Some(start) = event.get_start() else {
        warn!(uid = ?event.get_uid(), "Skipping VEVENT without DTSTART");
        return None;
    };

    let text = event
        .get_description()
        .or_else(|| event.get_summary())
        .map(str::trim)
        .filter(|text| !text.is_empty());
    let Some(description) = text else {
        warn!(uid = ?event.get_uid(), "Skipping VEVENT without description or summary");
        return None;
    };

    Some(CollectionEvent::new(calendar_day(start), description))
}

fn calendar_day(start: DatePerhapsTime) -> NaiveDate {
    match start {
        DatePerhapsTime::Date(date) => date,
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(date_time)) => date_time.date_naive(),
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => naive.date(),
        // The day as written in the feed's own zone.
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, .. }) => {
            date_time.date()
        }
    }
}

/// Accepts `2017-12-15`, `2017-12-15T00:00:00[.fff]`, or RFC 3339 with an offset.
fn parse_date_key(key: &str) -> Option<NaiveDate> {
    let key = key.trim();
    NaiveDate::parse_from_str(key, DATE_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(key, DATE_TIME_FORMAT)
                .ok()
                .map(|date_time| date_time.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(key)
                .ok()
                .map(|date_time| date_time.date_naive())
        })
}
