use super::AppState;
use crate::domain::models::ChatMessage;

fn message(content: &str) -> ChatMessage {
    return ChatMessage {
        member: "alice".to_string(),
        content: content.to_string(),
        ..ChatMessage::default()
    };
}

#[test]
fn it_applies_loads_in_sequence() {
    let mut state = AppState::new(None);

    state.handle_messages_loaded(1, vec![message("first")]);
    state.handle_messages_loaded(2, vec![message("first"), message("second")]);

    assert_eq!(state.messages.len(), 2);
    assert_eq!(state.last_seq, 2);
}

#[test]
fn it_drops_stale_loads_from_overlapping_fetches() {
    let mut state = AppState::new(None);

    state.handle_messages_loaded(2, vec![message("first"), message("second")]);
    // A slow response from an earlier tick lands after a newer one.
    state.handle_messages_loaded(1, vec![message("first")]);

    assert_eq!(state.messages.len(), 2);
    assert_eq!(state.last_seq, 2);
}

#[test]
fn it_clears_the_error_on_a_successful_load() {
    let mut state = AppState::new(None);

    state.handle_chat_error("Could not load messages.".to_string());
    assert_eq!(state.error, Some("Could not load messages.".to_string()));

    state.handle_messages_loaded(1, vec![message("first")]);
    assert_eq!(state.error, None);
}

#[test]
fn it_keeps_the_input_on_failure_and_clears_it_on_success() {
    let mut state = AppState::new(None);
    state.input = "hello".to_string();
    state.sending = true;

    state.handle_chat_error("Could not send the message.".to_string());
    assert_eq!(state.input, "hello");
    assert!(!state.sending);

    state.sending = true;
    state.handle_message_sent();
    assert!(state.input.is_empty());
    assert!(!state.sending);
    assert_eq!(state.error, None);
}

#[test]
fn it_blocks_blank_or_in_flight_submissions() {
    let mut state = AppState::new(None);

    state.input = "   ".to_string();
    assert!(!state.submit_ready());

    state.input = "hello".to_string();
    assert!(state.submit_ready());

    state.sending = true;
    assert!(!state.submit_ready());
}

#[test]
fn it_clamps_scrolling_at_the_bottom() {
    let mut state = AppState::new(None);

    state.scroll_down(3);
    assert_eq!(state.scroll_offset, 0);

    state.scroll_up(5);
    state.scroll_down(2);
    assert_eq!(state.scroll_offset, 3);
}
