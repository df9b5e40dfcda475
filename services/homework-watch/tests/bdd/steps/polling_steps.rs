//! BDD step definitions for polling feature

use std::sync::Arc;

use cucumber::{given, then, when};
use homework_watch::config::{PRACTICUM_TOKEN, TELEGRAM_CHAT_ID, TELEGRAM_TOKEN};
use homework_watch::{Config, Credentials, WatcherBuilder};

use crate::world::{ScriptedReply, WatchWorld};

#[given("a watcher polling a fake homework API")]
fn watcher_with_fake_api(world: &mut WatchWorld) {
    let credentials = Credentials::from_lookup(|name| match name {
        PRACTICUM_TOKEN => Some("practicum-token".to_string()),
        TELEGRAM_TOKEN => Some("123:abc".to_string()),
        TELEGRAM_CHAT_ID => Some("42".to_string()),
        _ => None,
    });
    let watcher = WatcherBuilder::new(Config::default(), credentials)
        .with_http_client(Arc::clone(&world.http) as _)
        .with_scheduler(Arc::clone(&world.scheduler) as _)
        .with_initial_cursor(0)
        .build()
        .expect("watcher should build");
    world.http.cancel_when_drained(watcher.cancellation_token());
    world.engine = Some(watcher.into_engine());
}

#[given(expr = "the API replies {string}")]
fn api_replies(world: &mut WatchWorld, body: String) {
    world.http.push_reply(ScriptedReply::Http { status: 200, body });
}

#[given(expr = "the API replies with status {int}")]
fn api_replies_status(world: &mut WatchWorld, status: u16) {
    world.http.push_reply(ScriptedReply::Http {
        status,
        body: "Service Unavailable".to_string(),
    });
}

#[given("the API is unreachable")]
fn api_unreachable(world: &mut WatchWorld) {
    world.http.push_reply(ScriptedReply::Refused);
}

#[given("Telegram is unreachable")]
fn telegram_unreachable(world: &mut WatchWorld) {
    world.http.set_telegram_down(true);
}

#[when(expr = "the watcher polls {int} time(s)")]
async fn watcher_polls(world: &mut WatchWorld, times: usize) {
    let engine = world.engine.as_mut().expect("watcher not set");
    for _ in 0..times {
        let outcome = engine.poll_once().await;
        world.outcomes.push(outcome);
    }
}

#[when("the watcher runs until the API script is exhausted")]
async fn watcher_runs(world: &mut WatchWorld) {
    let engine = world.engine.take().expect("watcher not set");
    engine.run().await;
}

#[then(expr = "{int} message(s) should have been sent")]
fn messages_sent(world: &mut WatchWorld, count: usize) {
    let delivered = world.http.delivered();
    assert_eq!(delivered.len(), count, "{:?}", delivered);
}

#[then(expr = "message {int} should be {string}")]
fn message_is(world: &mut WatchWorld, index: usize, expected: String) {
    let delivered = world.http.delivered();
    let (chat_id, text) = delivered
        .get(index - 1)
        .unwrap_or_else(|| panic!("no message {} in {:?}", index, delivered));
    assert_eq!(chat_id, "42");
    assert_eq!(text, &expected);
}

#[then(expr = "message {int} should start with {string}")]
fn message_starts_with(world: &mut WatchWorld, index: usize, prefix: String) {
    let delivered = world.http.delivered();
    let (_, text) = delivered
        .get(index - 1)
        .unwrap_or_else(|| panic!("no message {} in {:?}", index, delivered));
    assert!(text.starts_with(&prefix), "{:?} does not start with {:?}", text, prefix);
}

#[then(expr = "the API should have been called {int} time(s)")]
fn api_called(world: &mut WatchWorld, times: usize) {
    assert_eq!(world.http.from_dates().len(), times);
}

#[then(expr = "request {int} should use from_date {string}")]
fn request_from_date(world: &mut WatchWorld, index: usize, expected: String) {
    let from_dates = world.http.from_dates();
    assert_eq!(from_dates[index - 1], expected, "{:?}", from_dates);
}

#[then(expr = "the watcher should have paused {int} time(s)")]
fn watcher_paused(world: &mut WatchWorld, times: u32) {
    assert_eq!(world.scheduler.ticks(), times);
}
