use super::ChatMessage;

pub enum Event {
    ChatError(String),
    KeyboardBackspace(),
    KeyboardCharInput(char),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardPaste(String),
    MessageSent(),
    /// A completed poll fetch. The sequence number orders overlapping
    /// fetches; consumers drop results older than the newest applied one.
    MessagesLoaded(u64, Vec<ChatMessage>),
    UIResize(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
