//! End-to-end resolution over decoded payloads.

use binday_core::model::{CollectionEvent, FailureKind, Query, RawSchedule, Schedule};
use binday_core::resolver::{Resolution, ResolverOptions, TieBreak, find, resolve};
use binday_core::{parser, response};
use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use thiserror as _;

const DECEMBER: &str =
    r#"{ "2017-12-15T00:00:00": "food bin and red box", "2017-12-18T00:00:00": "black box" }"#;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn answer(query: &Query) -> String {
    let schedule = parser::parse(&RawSchedule::Json(DECEMBER.to_owned())).unwrap();
    response::render(&resolve(&schedule, query, ResolverOptions::default()))
}

#[test]
fn finds_an_event_for_tomorrow() {
    assert_eq!(
        answer(&Query::tomorrow(date(2017, 12, 14))),
        "Tomorrow's collection is food bin and red box"
    );
}

#[test]
fn no_events_tomorrow_is_graceful() {
    assert_eq!(
        answer(&Query::tomorrow(date(2017, 12, 3))),
        "There are no bins tomorrow"
    );
}

#[test]
fn finds_the_next_event() {
    assert_eq!(
        answer(&Query::next_any(date(2017, 12, 3))),
        r#"Next collection is: food bin and red box on Friday<say-as interpret-as="date">????1215</say-as>"#
    );
}

#[test]
fn finds_the_next_event_even_the_second_one() {
    assert_eq!(
        answer(&Query::next_any(date(2017, 12, 15))),
        r#"Next collection is: black box on Monday<say-as interpret-as="date">????1218</say-as>"#
    );
}

#[test]
fn finds_the_next_collection_of_type() {
    assert_eq!(
        answer(&Query::next_of_type(date(2017, 12, 3), "food bin")),
        r#"Next collection of the food bin is: food bin and red box on Friday<say-as interpret-as="date">????1215</say-as>"#
    );
    assert_eq!(
        answer(&Query::next_of_type(date(2017, 12, 3), "black box")),
        r#"Next collection of the black box is: black box on Monday<say-as interpret-as="date">????1218</say-as>"#
    );
}

#[test]
fn no_next_bin_after_the_last_collection() {
    let schedule = parser::parse_json(DECEMBER).unwrap();
    let err = resolve(
        &schedule,
        &Query::next_any(date(2017, 12, 18)),
        ResolverOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), FailureKind::NoMatchingFutureEvent);
    assert_eq!(
        err.message(),
        "I couldn't find the next bin collection, please try again later."
    );
}

#[test]
fn malformed_payload_is_told_apart_from_no_match() {
    let err = parser::parse(&RawSchedule::Json("Bad Gateway".to_owned())).unwrap_err();
    assert_eq!(err.kind(), FailureKind::UpstreamMalformed);
    assert!(err.kind().is_upstream());
    assert_eq!(
        err.message(),
        "I didn't understand that query, please try again."
    );
}

#[test]
fn ical_and_json_sources_agree() {
    let ics = "BEGIN:VCALENDAR\r\n\
               VERSION:2.0\r\n\
               BEGIN:VEVENT\r\n\
               UID:a@example.com\r\n\
               DTSTART;VALUE=DATE:20171218\r\n\
               DESCRIPTION:black box\r\n\
               END:VEVENT\r\n\
               BEGIN:VEVENT\r\n\
               UID:b@example.com\r\n\
               DTSTART;VALUE=DATE:20171215\r\n\
               DESCRIPTION:food bin and red box\r\n\
               END:VEVENT\r\n\
               END:VCALENDAR\r\n";
    let from_ics = parser::parse(&RawSchedule::Ical(ics.to_owned())).unwrap();
    let from_json = parser::parse_json(DECEMBER).unwrap();

    for query in [
        Query::tomorrow(date(2017, 12, 14)),
        Query::next_any(date(2017, 12, 3)),
        Query::next_of_type(date(2017, 12, 3), "glass"),
    ] {
        assert_eq!(
            resolve(&from_ics, &query, ResolverOptions::default()),
            resolve(&from_json, &query, ResolverOptions::default()),
        );
    }
}

fn schedule_with_distinct_dates() -> impl Strategy<Value = Vec<CollectionEvent>> {
    prop::collection::btree_set(0u64..400, 1..30).prop_flat_map(|offsets| {
        let events = offsets
            .into_iter()
            .enumerate()
            .map(|(idx, offset)| {
                CollectionEvent::new(
                    date(2017, 1, 1).checked_add_days(Days::new(offset)).unwrap(),
                    format!("collection {idx}"),
                )
            })
            .collect::<Vec<_>>();
        Just(events).prop_shuffle()
    })
}

proptest! {
    #[test]
    fn next_any_ignores_source_order(
        events in schedule_with_distinct_dates(),
        reference_offset in 0u64..400,
    ) {
        let reference = date(2017, 1, 1).checked_add_days(Days::new(reference_offset)).unwrap();
        let query = Query::next_any(reference);

        let mut sorted = events.clone();
        sorted.sort_by_key(|event| event.date);
        let expected = sorted.iter().find(|event| event.date > reference);

        let shuffled = Schedule::new(events);
        match (find(&shuffled, &query, ResolverOptions::default()), expected) {
            (Ok(Resolution::Next(event)), Some(expected)) => prop_assert_eq!(event, expected),
            (Err(failure), None) => {
                prop_assert_eq!(failure.kind(), FailureKind::NoMatchingFutureEvent);
            }
            (other, expected) => {
                prop_assert!(false, "got {:?}, expected {:?}", other, expected);
            }
        }
    }

    #[test]
    fn unknown_bin_type_ignores_schedule(
        events in schedule_with_distinct_dates(),
        term in "[a-z]{3,12}",
    ) {
        prop_assume!(binday_core::bin_type::normalize(&term).is_none());
        let query = Query::next_of_type(date(2017, 6, 1), term);
        let err = resolve(&Schedule::new(events), &query, ResolverOptions::default()).unwrap_err();
        prop_assert_eq!(err.kind(), FailureKind::UnrecognizedBinType);
    }

    #[test]
    fn tomorrow_is_never_a_failure_by_default(
        events in schedule_with_distinct_dates(),
        reference_offset in 0u64..400,
    ) {
        let reference = date(2017, 1, 1).checked_add_days(Days::new(reference_offset)).unwrap();
        let result = resolve(&Schedule::new(events), &Query::tomorrow(reference), ResolverOptions::default());
        prop_assert!(result.is_ok());
    }
}

#[test]
fn tie_break_on_shared_earliest_date() {
    let schedule = parser::parse_json(
        r#"{ "2017-12-15": "food bin", "2017-12-15T00:00:00": "red box", "2017-12-20": "blue bin" }"#,
    )
    .unwrap();
    let query = Query::next_any(date(2017, 12, 3));

    let last_seen = resolve(&schedule, &query, ResolverOptions::default()).unwrap();
    assert!(last_seen.text.starts_with("Next collection is: red box on Friday"));

    let first_seen = resolve(
        &schedule,
        &query,
        ResolverOptions {
            tie_break: TieBreak::FirstSeen,
            ..ResolverOptions::default()
        },
    )
    .unwrap();
    assert!(first_seen.text.starts_with("Next collection is: food bin on Friday"));
}
