use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;

use crate::domain::models::Event;

pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            crossterm_events: EventStream::new(),
            events,
        };
    }

    fn handle_crossterm(&self, event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Paste(text) => {
                return Some(Event::KeyboardPaste(text));
            }
            CrosstermEvent::Resize(_, _) => {
                return Some(Event::UIResize());
            }
            CrosstermEvent::Mouse(mouseevent) => {
                match mouseevent.kind {
                    MouseEventKind::ScrollUp => {
                        return Some(Event::UIScrollUp());
                    }
                    MouseEventKind::ScrollDown => {
                        return Some(Event::UIScrollDown());
                    }
                    _ => {
                        return None;
                    }
                }
            }
            CrosstermEvent::Key(keyevent) => {
                if keyevent.modifiers.contains(KeyModifiers::CONTROL) {
                    match keyevent.code {
                        KeyCode::Char('c') => {
                            return Some(Event::KeyboardCTRLC());
                        }
                        KeyCode::Char('u') => {
                            return Some(Event::UIScrollPageUp());
                        }
                        KeyCode::Char('d') => {
                            return Some(Event::UIScrollPageDown());
                        }
                        _ => {
                            return None;
                        }
                    }
                }

                match keyevent.code {
                    KeyCode::Up => {
                        return Some(Event::UIScrollUp());
                    }
                    KeyCode::Down => {
                        return Some(Event::UIScrollDown());
                    }
                    KeyCode::PageUp => {
                        return Some(Event::UIScrollPageUp());
                    }
                    KeyCode::PageDown => {
                        return Some(Event::UIScrollPageDown());
                    }
                    KeyCode::Enter => {
                        return Some(Event::KeyboardEnter());
                    }
                    KeyCode::Backspace => {
                        return Some(Event::KeyboardBackspace());
                    }
                    KeyCode::Char(input) => {
                        return Some(Event::KeyboardCharInput(input));
                    }
                    _ => {
                        return None;
                    }
                }
            }
            _ => return None,
        }
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                event = self.events.recv() => event,
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => self.handle_crossterm(input),
                    Some(Err(_)) => None,
                    None => None
                },
                _ = time::sleep(time::Duration::from_millis(500)) => Some(Event::UITick())
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}
