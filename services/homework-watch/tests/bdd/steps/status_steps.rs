//! BDD step definitions for status extraction feature

use cucumber::{given, then, when};
use homework_watch::response::parse_status;
use homework_watch::WatchError;

use crate::world::WatchWorld;

#[given(expr = "the homework record {string}")]
fn homework_record(world: &mut WatchWorld, record: String) {
    let value = serde_json::from_str(&record).expect("scenario JSON must be valid");
    world.record = Some(value);
}

#[when("the status is parsed")]
fn parse(world: &mut WatchWorld) {
    let record = world.record.as_ref().expect("record not set");
    world.parse_result = Some(parse_status(record));
}

#[then(expr = "the message should be {string}")]
fn message_is(world: &mut WatchWorld, expected: String) {
    let result = world.parse_result.as_ref().expect("no result");
    assert_eq!(result.as_ref().unwrap(), &expected);
}

#[then(expr = "parsing should fail with an unrecognized status {string}")]
fn unrecognized_status(world: &mut WatchWorld, expected: String) {
    match world.parse_result.as_ref().expect("no result") {
        Err(WatchError::UnrecognizedStatus(status)) => assert_eq!(status, &expected),
        other => panic!("expected unrecognized status, got {:?}", other),
    }
}

#[then(expr = "parsing should fail with a missing key {string}")]
fn parse_missing_key(world: &mut WatchWorld, expected: String) {
    match world.parse_result.as_ref().expect("no result") {
        Err(WatchError::MissingKey(key)) => assert_eq!(key, &expected),
        other => panic!("expected missing key error, got {:?}", other),
    }
}
