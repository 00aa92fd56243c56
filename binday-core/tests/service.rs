//! Service facade with an in-memory schedule source.

use std::sync::Arc;

use async_trait::async_trait;
use binday_core::guard::{ADDRESS_PERMISSION_SCOPE, DeviceAddress, GuardRejection};
use binday_core::intent::{Intent, NEXT_BIN, WHEN_IS_BIN, WHICH_BIN_TOMORROW};
use binday_core::{
    BindayService, CouncilId, CouncilMeta, CouncilPlugin, FailureKind, Location, PluginRegistry,
    PortError, Query, RawSchedule, ResolverOptions, SchedulePort,
};
use chrono::NaiveDate;
use thiserror as _;

struct FixedPort {
    meta: CouncilMeta,
    payload: Option<RawSchedule>,
}

#[async_trait]
impl SchedulePort for FixedPort {
    fn council(&self) -> &CouncilMeta {
        &self.meta
    }

    async fn fetch(&self, _location: &Location) -> Result<RawSchedule, PortError> {
        self.payload
            .clone()
            .ok_or_else(|| PortError::Internal("connection refused".to_owned()))
    }
}

fn council() -> CouncilId {
    CouncilId("test-council".to_owned())
}

fn service(payload: Option<RawSchedule>) -> BindayService {
    let meta = CouncilMeta {
        id: council(),
        name: "Test Council".to_owned(),
    };
    let plugin = CouncilPlugin {
        meta: meta.clone(),
        schedule_port: Arc::new(FixedPort { meta, payload }),
        allowed_postcodes: vec!["KA3 1SF".to_owned()],
    };
    BindayService::new(
        Arc::new(PluginRegistry::new(vec![plugin])),
        ResolverOptions::default(),
    )
}

fn december() -> Option<RawSchedule> {
    Some(RawSchedule::Json(
        r#"{ "2017-12-15T00:00:00": "food bin and red box", "2017-12-18T00:00:00": "black box" }"#
            .to_owned(),
    ))
}

fn home() -> DeviceAddress {
    DeviceAddress {
        address_line1: Some("12 Main Street".to_owned()),
        postal_code: Some("ka3 1sf".to_owned()),
    }
}

fn location() -> Location {
    Location {
        postcode: "KA31SF".to_owned(),
        house_number: "12".to_owned(),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn answers_next_bin() {
    let reply = service(december())
        .respond(
            &council(),
            true,
            Some(&home()),
            Intent::new(NEXT_BIN, None),
            date(2017, 12, 3),
        )
        .await;

    assert_eq!(
        reply.text,
        r#"Next collection is: food bin and red box on Friday<say-as interpret-as="date">????1215</say-as>"#
    );
    assert!(reply.permission_request.is_none());
}

#[tokio::test]
async fn answers_when_is_bin_with_spoken_slot() {
    let reply = service(december())
        .respond(
            &council(),
            true,
            Some(&home()),
            Intent::new(WHEN_IS_BIN, Some("Glass".to_owned())),
            date(2017, 12, 3),
        )
        .await;

    assert_eq!(
        reply.text,
        r#"Next collection of the glass is: black box on Monday<say-as interpret-as="date">????1218</say-as>"#
    );
}

#[tokio::test]
async fn requests_permission_before_fetching() {
    let reply = service(None)
        .respond(
            &council(),
            false,
            Some(&home()),
            Intent::new(WHICH_BIN_TOMORROW, None),
            date(2017, 12, 14),
        )
        .await;

    let request = reply.permission_request.unwrap();
    assert_eq!(request.scope, ADDRESS_PERMISSION_SCOPE);
    assert!(!reply.text.is_empty());
}

#[tokio::test]
async fn fetch_failure_is_upstream_unavailable() {
    let err = service(None)
        .answer(&council(), &location(), &Query::tomorrow(date(2017, 12, 14)))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::UpstreamUnavailable);
    assert_eq!(err.message(), "I didn't understand that query, please try again.");
}

#[tokio::test]
async fn malformed_payload_is_upstream_malformed() {
    let err = service(Some(RawSchedule::Json("<html></html>".to_owned())))
        .answer(&council(), &location(), &Query::next_any(date(2017, 12, 3)))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::UpstreamMalformed);
}

#[tokio::test]
async fn unknown_council() {
    let err = service(december())
        .answer(
            &CouncilId("atlantis".to_owned()),
            &location(),
            &Query::next_any(date(2017, 12, 3)),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::UpstreamUnavailable);

    let rejection = service(december())
        .locate(&CouncilId("atlantis".to_owned()), true, Some(&home()))
        .unwrap_err();
    assert_eq!(rejection, GuardRejection::UnknownCouncil("atlantis".to_owned()));
    assert!(!rejection.message().contains("KA31SF"));
    assert!(rejection.permission_request().is_none());

    let reply = service(december())
        .respond(
            &CouncilId("atlantis".to_owned()),
            true,
            Some(&home()),
            Intent::new(NEXT_BIN, None),
            date(2017, 12, 3),
        )
        .await;
    assert_eq!(
        reply.text,
        "Sorry, bin collections aren't set up for your council yet."
    );
}

#[tokio::test]
async fn unhandled_intent() {
    let reply = service(december())
        .respond(
            &council(),
            true,
            Some(&home()),
            Intent::new("AMAZON.StopIntent", None),
            date(2017, 12, 3),
        )
        .await;

    assert_eq!(reply.text, "Something went wrong, try again");
}

#[test]
fn lists_councils() {
    assert_eq!(
        service(None).councils(),
        vec![(council(), "Test Council".to_owned())]
    );
}
