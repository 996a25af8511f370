//! End-to-end chat flows driven through `MessengerState`.

use std::time::Duration;

use natter_state::{
    ConversationSummary, CreateOutcome, FixedClock, MessengerState, ReplyDelivery, ReplyRouting,
    Screen, ScriptBook, SequencePicker, SessionConfig, StateError,
};
use pretty_assertions::assert_eq;

fn state() -> MessengerState {
    MessengerState::default()
        .with_clock(FixedClock::new("03:07 PM"))
        .with_picker(SequencePicker::new([1, 0, 2]))
}

fn triples(state: &MessengerState) -> Vec<(String, String, String)> {
    state
        .messages()
        .iter()
        .map(|message| {
            let (sender, body, time) = message.as_triple();
            (sender.to_string(), body.to_string(), time.to_string())
        })
        .collect()
}

fn triple(sender: &str, body: &str, time: &str) -> (String, String, String) {
    (sender.to_string(), body.to_string(), time.to_string())
}

#[test]
fn whitespace_name_leaves_list_and_dialog_untouched() {
    let mut state = state();
    let before = state.chat_list().conversations().to_vec();
    state.open_create_dialog();

    assert_eq!(state.create_conversation("  "), CreateOutcome::IgnoredBlank);
    assert_eq!(state.chat_list().conversations(), before.as_slice());
    assert!(state.chat_list().is_create_dialog_open());
}

#[test]
fn new_conversation_is_prepended() {
    let mut state = state();
    state.open_create_dialog();

    assert!(state.create_conversation("Ravi").is_created());
    assert_eq!(
        state.chat_list().conversations()[0],
        ConversationSummary::new("Ravi", "Say hello!", "Now", 0)
    );
    assert!(!state.chat_list().is_create_dialog_open());
}

#[test]
fn opening_amit_seeds_two_messages_and_shows_chat_window() {
    let mut state = state();
    state.open("Amit").unwrap();

    assert_eq!(state.current_screen(), Some(Screen::ChatWindow));
    assert_eq!(state.active_conversation(), Some("Amit"));
    assert_eq!(
        triples(&state),
        vec![
            triple("Amit", "Bro, kal milte hain?", "Yesterday"),
            triple("You", "Haan, coaching ke baad", "Yesterday"),
        ]
    );
}

#[test]
fn opening_unknown_name_starts_with_system_message() {
    let mut state = state();
    state.open("Unknown Person").unwrap();

    assert_eq!(
        triples(&state),
        vec![triple("System", "Started chat with Unknown Person", "Now")]
    );
}

#[test]
fn sending_to_amit_gets_one_reply_from_amit_pool() {
    let mut state = state();
    state.open("Amit").unwrap();

    let pending = state.send("hello").unwrap();
    assert_eq!(pending.delay, Duration::from_secs(2));
    assert_eq!(
        triples(&state).last().cloned(),
        Some(triple("You", "hello", "03:07 PM"))
    );

    let delivery = state.deliver_auto_reply(pending.ticket);

    assert!(matches!(delivery, ReplyDelivery::Delivered(_)));
    assert_eq!(state.messages().len(), 4);
    let reply = state.messages().last().unwrap();
    assert_eq!(reply.sender.label(), "Amit");
    assert!(state.scripts().reply_pool("Amit").contains(&reply.body.as_str()));
    assert_eq!(reply.body, "Milte hain");
}

#[test]
fn other_chats_reply_as_friend_from_default_pool() {
    let mut state = state();
    state.open("Neha").unwrap();
    let pending = state.send("notes?").unwrap();
    state.deliver_auto_reply(pending.ticket);

    let reply = state.messages().last().unwrap();
    assert_eq!(reply.sender.label(), "Friend");
    assert_eq!(reply.body, "Samjha");
}

#[test]
fn blank_send_keeps_message_count() {
    let mut state = state();
    state.open("Amit").unwrap();

    assert!(state.send("").is_none());
    assert!(state.send(" \t ").is_none());
    assert_eq!(state.messages().len(), 2);
}

#[test]
fn reopening_reseeds_from_script() {
    let mut state = state();
    state.open("Amit").unwrap();
    state.send("kal pakka").unwrap();
    assert_eq!(state.messages().len(), 3);

    state.go_back().unwrap();
    assert_eq!(state.current_screen(), Some(Screen::Chats));
    assert_eq!(state.active_conversation(), None);

    state.open("Amit").unwrap();
    assert_eq!(
        triples(&state),
        vec![
            triple("Amit", "Bro, kal milte hain?", "Yesterday"),
            triple("You", "Haan, coaching ke baad", "Yesterday"),
        ]
    );
}

#[test]
fn reply_follows_user_into_next_conversation_by_default() {
    let mut state = state();
    state.open("Amit").unwrap();
    let pending = state.send("hello").unwrap();
    state.go_back().unwrap();
    state.open("Maths Group").unwrap();

    state.deliver_auto_reply(pending.ticket);

    let reply = state.messages().last().unwrap();
    assert_eq!(reply.sender.label(), "Friend");
    assert_eq!(reply.body, "Mera bhi ho gaya");
}

#[test]
fn originating_routing_drops_replies_after_switch() {
    let mut state = MessengerState::new(SessionConfig {
        routing: ReplyRouting::OriginatingConversation,
        reply_delay: Duration::from_millis(500),
    })
    .with_clock(FixedClock::new("03:07 PM"))
    .with_picker(SequencePicker::default());

    state.open("Amit").unwrap();
    let pending = state.send("hello").unwrap();
    let cancelled = state.open("Neha").unwrap();

    assert_eq!(cancelled, vec![pending.ticket]);
    assert_eq!(
        state.deliver_auto_reply(pending.ticket),
        ReplyDelivery::UnknownTicket
    );
    assert_eq!(state.messages().len(), 1);
}

#[test]
fn custom_scripts_replace_defaults() {
    let mut state = state().with_scripts(ScriptBook::empty());
    state.open("Amit").unwrap();

    assert_eq!(
        triples(&state),
        vec![triple("System", "Started chat with Amit", "Now")]
    );
}

#[test]
fn tabs_switch_between_placeholders() {
    let mut state = state();
    state.show(Screen::Status).unwrap();
    assert_eq!(state.current_screen(), Some(Screen::Status));
    state.show(Screen::Calls).unwrap();
    assert_eq!(state.current_screen(), Some(Screen::Calls));
}

#[test]
fn unknown_screen_name_is_not_found() {
    let mut navigation = state().navigation().clone();
    let error = navigation.show_named("nope").unwrap_err();

    assert!(matches!(error, StateError::ScreenNotFound { ref name, .. } if name == "nope"));
    assert_eq!(navigation.current(), Some(Screen::Chats));
}
