//! Integration tests for the REST-backed shift store

mod common;

use chrono::Weekday;
use common::{at, day, interval};
use httpmock::prelude::*;
use serde_json::json;
use shift_editor::components::shift_editor::{EditingSession, ShiftDefaults, SubjectDay};
use shift_editor::components::shift_store::{HttpShiftStore, ShiftStore};
use shift_editor::error::Error;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

fn store(server: &MockServer, token: Option<&str>) -> HttpShiftStore {
    HttpShiftStore::new(
        Url::parse(&server.base_url()).unwrap(),
        token.map(str::to_string),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_load_one_off_shift() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/employees/emp-7/shifts/daily/2024-05-06")
                .header("authorization", "Bearer secret");
            then.status(200).json_body(json!({
                "intervals": [
                    {"start": "2024-05-06T14:00:00", "end": "2024-05-06T18:00:00"},
                    {"start": "2024-05-06T09:00:00", "end": "2024-05-06T13:00:00"}
                ]
            }));
        })
        .await;

    let store = store(&server, Some("secret"));
    let intervals = store
        .load_intervals(&SubjectDay::one_off("emp-7", day()))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(
        intervals,
        vec![interval((14, 0), (18, 0)), interval((9, 0), (13, 0))]
    );
}

#[tokio::test]
async fn test_missing_shift_loads_as_empty_day() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/employees/emp-7/shifts/regular/tuesday");
            then.status(404);
        })
        .await;

    let store = store(&server, None);
    let intervals = store
        .load_intervals(&SubjectDay::regular("emp-7", Weekday::Tue))
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(intervals.is_empty());
}

#[tokio::test]
async fn test_save_regular_shift_returns_canonical_list() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/employees/emp-7/shifts/regular/monday")
                .json_body(json!({
                    "intervals": [
                        {"start": "2024-05-06T09:00:00", "end": "2024-05-06T17:00:00"}
                    ]
                }));
            then.status(200).json_body(json!({
                "intervals": [
                    {"start": "2024-05-06T09:00:00", "end": "2024-05-06T16:45:00"}
                ]
            }));
        })
        .await;

    let store = store(&server, None);
    let saved = store
        .save_intervals(
            &SubjectDay::regular("emp-7", Weekday::Mon),
            &[interval((9, 0), (17, 0))],
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(saved, vec![interval((9, 0), (16, 45))]);
}

#[tokio::test]
async fn test_delete_day_sends_empty_list() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/employees/emp-7/shifts/daily/2024-05-06")
                .json_body(json!({"intervals": []}));
            then.status(200).json_body(json!({"intervals": []}));
        })
        .await;

    let store = store(&server, None);
    let saved = store
        .save_intervals(&SubjectDay::one_off("emp-7", day()), &[])
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(saved.is_empty());
}

#[tokio::test]
async fn test_server_error_surfaces_as_persistence_error() {
    let server = MockServer::start_async().await;
    let _mock = server
        .mock_async(|when, then| {
            when.method(PUT).path("/employees/emp-7/shifts/daily/2024-05-06");
            then.status(500).body("database unavailable");
        })
        .await;

    let store = store(&server, None);
    let err = store
        .save_intervals(
            &SubjectDay::one_off("emp-7", day()),
            &[interval((9, 0), (17, 0))],
        )
        .await
        .unwrap_err();

    match err {
        Error::Persistence(message) => {
            assert!(message.contains("500"));
            assert!(message.contains("database unavailable"));
        }
        other => panic!("expected persistence error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_editing_session_over_http() {
    let server = MockServer::start_async().await;
    let load = server
        .mock_async(|when, then| {
            when.method(GET).path("/employees/emp-7/shifts/daily/2024-05-06");
            then.status(200).json_body(json!({"intervals": []}));
        })
        .await;
    let save = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/employees/emp-7/shifts/daily/2024-05-06")
                .json_body(json!({
                    "intervals": [
                        {"start": "2024-05-06T09:00:00", "end": "2024-05-06T13:00:00"},
                        {"start": "2024-05-06T14:00:00", "end": "2024-05-06T15:00:00"}
                    ]
                }));
            then.status(200).json_body(json!({
                "intervals": [
                    {"start": "2024-05-06T09:00:00", "end": "2024-05-06T13:00:00"},
                    {"start": "2024-05-06T14:00:00", "end": "2024-05-06T15:00:00"}
                ]
            }));
        })
        .await;

    let store: Arc<dyn ShiftStore> = Arc::new(store(&server, None));
    let mut session = EditingSession::open(
        store,
        SubjectDay::one_off("emp-7", day()),
        ShiftDefaults::default(),
        day(),
    )
    .await
    .unwrap();

    session.set_interval_end(0, at(13, 0)).unwrap();
    session.add_interval();
    session.save().await.unwrap();

    load.assert_async().await;
    save.assert_async().await;
    assert_eq!(session.total_minutes(), 300);
    assert!(!session.is_dirty());
}
