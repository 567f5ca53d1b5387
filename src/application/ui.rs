use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Session;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;

fn message_lines(app_state: &AppState) -> Vec<Line<'_>> {
    let mut lines: Vec<Line> = vec![];

    if app_state.messages.is_empty() {
        lines.push(Line::from(Span::styled(
            "No messages yet. Write the first one.",
            Style::default().add_modifier(Modifier::DIM),
        )));
        return lines;
    }

    for message in &app_state.messages {
        let mut meta = vec![Span::styled(
            message.author().to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];

        let timestamp = message.timestamp_display();
        if !timestamp.is_empty() {
            meta.push(Span::styled(
                format!("  {timestamp}"),
                Style::default().add_modifier(Modifier::DIM),
            ));
        }

        lines.push(Line::from(meta));
        for content_line in message.content.split('\n') {
            lines.push(Line::from(content_line.to_string()));
        }
        lines.push(Line::from(""));
    }

    return lines;
}

fn input_block(app_state: &AppState) -> Block<'_> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    if let Some(error) = &app_state.error {
        return block
            .title(error.to_string())
            .border_style(Style::default().fg(Color::Red));
    }

    if app_state.sending {
        return block.title("Sending...");
    }

    let username = app_state
        .member
        .as_ref()
        .map(|e| return e.username.to_string())
        .unwrap_or_default();

    return block.title(format!("{username} (Enter sends, CTRL+C quits)"));
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Min(1), Constraint::Max(3)])
                .split(frame.size());

            let lines = message_lines(app_state);
            let inner_height = layout[0].height.saturating_sub(2);
            let total = lines.len() as u16;
            let max_offset = total.saturating_sub(inner_height);
            let scroll_y = max_offset.saturating_sub(app_state.scroll_offset.min(max_offset));

            frame.render_widget(
                Paragraph::new(lines)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_type(BorderType::Rounded)
                            .title("Group chat"),
                    )
                    .wrap(Wrap { trim: false })
                    .scroll((scroll_y, 0)),
                layout[0],
            );

            frame.render_widget(
                Paragraph::new(app_state.input.to_string()).block(input_block(app_state)),
                layout[1],
            );
        })?;

        match events.next().await? {
            Event::MessagesLoaded(seq, messages) => {
                app_state.handle_messages_loaded(seq, messages);
            }
            Event::ChatError(error) => {
                app_state.handle_chat_error(error);
            }
            Event::MessageSent() => {
                app_state.handle_message_sent();
            }
            Event::KeyboardCharInput(input) => {
                if !app_state.sending {
                    app_state.input.push(input);
                }
            }
            Event::KeyboardPaste(text) => {
                if !app_state.sending {
                    app_state.input.push_str(&text);
                }
            }
            Event::KeyboardBackspace() => {
                app_state.input.pop();
            }
            Event::KeyboardEnter() => {
                if app_state.submit_ready() {
                    app_state.sending = true;
                    tx.send(Action::SubmitMessage(app_state.input.to_string()))?;
                }
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::UIScrollUp() => {
                app_state.scroll_up(1);
            }
            Event::UIScrollDown() => {
                app_state.scroll_down(1);
            }
            Event::UIScrollPageUp() => {
                app_state.scroll_up(10);
            }
            Event::UIScrollPageDown() => {
                app_state.scroll_down(10);
            }
            Event::UIResize() | Event::UITick() => {}
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    disable_raw_mode().unwrap();
    crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture).unwrap();
    crossterm::execute!(io::stdout(), cursor::Show).unwrap();
}

pub async fn start(
    session: Session,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    enable_raw_mode()?;
    crossterm::execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(term_backend)?;

    let mut app_state = AppState::new(session.member);
    let mut events = EventsService::new(rx);

    let res = start_loop(&mut terminal, &mut app_state, tx, &mut events).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    return res;
}
