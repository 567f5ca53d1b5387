#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use crate::domain::models::ChatMessage;
use crate::domain::models::Member;

/// Everything the chat view renders. Mutated only from the UI loop.
pub struct AppState {
    pub member: Option<Member>,
    pub messages: Vec<ChatMessage>,
    pub last_seq: u64,
    pub error: Option<String>,
    pub input: String,
    pub sending: bool,
    pub scroll_offset: u16,
}

impl AppState {
    pub fn new(member: Option<Member>) -> AppState {
        return AppState {
            member,
            messages: vec![],
            last_seq: 0,
            error: None,
            input: "".to_string(),
            sending: false,
            scroll_offset: 0,
        };
    }

    /// Applies a poll result. Results from overlapping fetches can arrive
    /// out of order; anything not newer than the last applied sequence is
    /// dropped here.
    pub fn handle_messages_loaded(&mut self, seq: u64, messages: Vec<ChatMessage>) {
        if seq <= self.last_seq {
            return;
        }

        self.last_seq = seq;
        self.messages = messages;
        self.error = None;
    }

    pub fn handle_chat_error(&mut self, message: String) {
        self.error = Some(message);
        self.sending = false;
    }

    pub fn handle_message_sent(&mut self) {
        self.input.clear();
        self.error = None;
        self.sending = false;
    }

    pub fn submit_ready(&self) -> bool {
        return !self.sending && !self.input.trim().is_empty();
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }
}
