//! BDD step definitions for notification feature

use std::sync::Arc;

use cucumber::{given, then, when};
use homework_watch::notifier::send_message;
use homework_watch::telegram::TelegramNotifier;

use crate::world::WatchWorld;

#[given(expr = "a Telegram notifier for chat {string}")]
fn telegram_notifier(world: &mut WatchWorld, chat_id: String) {
    let notifier = TelegramNotifier::new(
        "http://telegram.test",
        "123:abc",
        &chat_id,
        Arc::clone(&world.http) as _,
    );
    world.notifier = Some(Arc::new(notifier));
}

#[when(expr = "the message {string} is delivered")]
async fn deliver(world: &mut WatchWorld, message: String) {
    let notifier = world.notifier.as_ref().expect("notifier not set");
    world.delivery_succeeded = Some(send_message(notifier.as_ref(), &message).await);
}

#[then("delivery should succeed")]
fn delivery_succeeds(world: &mut WatchWorld) {
    assert_eq!(world.delivery_succeeded, Some(true));
}

#[then("delivery should fail without raising an error")]
fn delivery_fails_quietly(world: &mut WatchWorld) {
    assert_eq!(world.delivery_succeeded, Some(false));
}

#[then(expr = "chat {string} should have received {string}")]
fn chat_received(world: &mut WatchWorld, chat_id: String, text: String) {
    assert!(
        world.http.delivered().contains(&(chat_id.clone(), text.clone())),
        "{:?} not delivered to {}",
        text,
        chat_id
    );
}
