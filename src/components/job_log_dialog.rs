//! Job log overlay
//!
//! Lists submitted jobs with the request payload of the selected entry.

use super::layout::{inset, key_hints};
use crate::action::Action;
use crate::component::Component;
use crate::model::job::JobLogEntry;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState,
    },
    Frame,
};

#[derive(Default)]
pub struct JobLogDialog {
    pub selected_index: usize,
    pub detail_scroll: usize,
}

impl Component for JobLogDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Up => Some(Action::ModalUp),
            KeyCode::Down => Some(Action::ModalDown),
            KeyCode::Char('j') => Some(Action::ScrollDown),
            KeyCode::Char('k') => Some(Action::ScrollUp),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::Esc | KeyCode::Char('l') => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ModalUp => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                    self.detail_scroll = 0;
                }
            }
            Action::ModalDown => {
                self.selected_index += 1;
                self.detail_scroll = 0;
            }
            Action::ScrollUp => self.detail_scroll = self.detail_scroll.saturating_sub(1),
            Action::ScrollDown => self.detail_scroll = self.detail_scroll.saturating_add(1),
            Action::PageUp => self.detail_scroll = self.detail_scroll.saturating_sub(10),
            Action::PageDown => self.detail_scroll = self.detail_scroll.saturating_add(10),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the log itself, see draw_with_log
        Ok(())
    }
}

impl JobLogDialog {
    pub fn draw_with_log(&self, frame: &mut Frame, area: Rect, log: &[JobLogEntry]) -> Result<()> {
        frame.render_widget(Clear, area);
        let overlay_area = inset(area, 2);

        let title_style = Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD);

        if log.is_empty() {
            let paragraph = Paragraph::new("No jobs submitted yet. Launch one from the Jobs page.")
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Job Log ")
                        .title_style(title_style)
                        .title_bottom(key_hints(&[(" Esc/l ", "Close")])),
                );
            frame.render_widget(paragraph, overlay_area);
            return Ok(());
        }

        let selected_idx = self.selected_index.min(log.len() - 1);

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(overlay_area);

        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(main_chunks[0]);

        let items: Vec<ListItem> = log
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if i == selected_idx {
                    Style::default().bg(Color::Blue).fg(Color::White)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{} ", entry.formatted_time()),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(entry.summary.clone(), style),
                ]))
                .style(style)
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Job Log ")
                .title_style(title_style),
        );
        frame.render_widget(list, content_chunks[0]);

        let detail_lines = render_entry_detail(&log[selected_idx]);
        let total = detail_lines.len();
        let visible_height = content_chunks[1].height.saturating_sub(2) as usize;
        let scroll = self.detail_scroll.min(total.saturating_sub(visible_height));

        let detail = Paragraph::new(detail_lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Request ")
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .scroll((scroll as u16, 0));
        frame.render_widget(detail, content_chunks[1]);

        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(scroll);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                content_chunks[1].inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        let help = Paragraph::new(key_hints(&[
            (" Esc/l ", "Close"),
            (" ↑/↓ ", "Select"),
            (" j/k ", "Scroll"),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, main_chunks[1]);

        Ok(())
    }
}

fn render_entry_detail(entry: &JobLogEntry) -> Vec<Line<'static>> {
    let label = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Time: ", label),
            Span::raw(entry.formatted_time()),
        ]),
        Line::from(vec![
            Span::styled("Job: ", label),
            Span::raw(entry.summary.clone()),
        ]),
        Line::from(""),
        Line::from(Span::styled("Payload:", label)),
    ];

    let payload = serde_json::to_string_pretty(&entry.payload)
        .unwrap_or_else(|_| entry.payload.to_string());
    lines.extend(payload.lines().map(|l| Line::from(l.to_string())));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::render_to_text;
    use crate::model::job::JobRequest;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_empty_log() {
        let dialog = JobLogDialog::default();
        let text = render_to_text(80, 12, |frame| {
            let area = frame.area();
            dialog.draw_with_log(frame, area, &[]).unwrap();
        });
        assert!(text.contains("No jobs submitted yet"));
    }

    #[test]
    fn test_selected_entry_shows_payload() {
        let log = vec![
            JobLogEntry::for_job(&JobRequest::TestJob {
                fail: true,
                sleep_ms: 250,
            }),
            JobLogEntry::for_job(&JobRequest::UploadGrades),
        ];
        let mut dialog = JobLogDialog::default();

        let text = render_to_text(120, 20, |frame| {
            let area = frame.area();
            dialog.draw_with_log(frame, area, &log).unwrap();
        });
        assert!(text.contains("Test job (fail=true, sleepMs=250)"));
        assert!(text.contains("\"sleepMs\": 250"));

        dialog.update(Action::ModalDown).unwrap();
        let text = render_to_text(120, 20, |frame| {
            let area = frame.area();
            dialog.draw_with_log(frame, area, &log).unwrap();
        });
        assert!(text.contains("\"job\": \"uploadGrades\""));
    }

    #[test]
    fn test_keys() {
        let mut dialog = JobLogDialog::default();
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(dialog.handle_key_event(esc).unwrap(), Some(Action::CloseModal));

        dialog.update(Action::ModalUp).unwrap();
        assert_eq!(dialog.selected_index, 0);
    }
}
