//! Test job form
//!
//! Launches a job that sleeps and optionally fails, for exercising the job
//! pipeline end to end.

use super::layout::button_line;
use crate::action::Action;
use crate::component::Component;
use crate::model::form::{FieldError, NumericInput, NumericRule};
use crate::model::job::JobRequest;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const DEFAULT_SLEEP_MS: i64 = 1000;

pub const SLEEP_MS_RULE: NumericRule = NumericRule {
    field: "sleepMs",
    required: true,
    min: 0,
    max: 60000,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Fail,
    SleepMs,
    Submit,
}

impl Field {
    const ALL: [Field; 3] = [Field::Fail, Field::SleepMs, Field::Submit];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

pub struct TestJobForm {
    fail: bool,
    sleep_ms: NumericInput,
    focus: Field,
    error: Option<FieldError>,
}

impl Default for TestJobForm {
    fn default() -> Self {
        Self::new()
    }
}

impl TestJobForm {
    pub fn new() -> Self {
        Self {
            fail: false,
            sleep_ms: NumericInput::with_value(DEFAULT_SLEEP_MS),
            focus: Field::Fail,
            error: None,
        }
    }

    pub fn validate(&self) -> Result<JobRequest, FieldError> {
        let sleep_ms = SLEEP_MS_RULE
            .validate(self.sleep_ms.value())?
            .unwrap_or(DEFAULT_SLEEP_MS);
        Ok(JobRequest::TestJob {
            fail: self.fail,
            sleep_ms,
        })
    }

    /// Validate and, if valid, produce the submission
    pub fn submit(&mut self) -> Option<Action> {
        match self.validate() {
            Ok(request) => {
                self.error = None;
                Some(Action::SubmitJob(request))
            }
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}

impl Component for TestJobForm {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                None
            }
            KeyCode::Esc if self.focus == Field::SleepMs => {
                self.focus = Field::Submit;
                None
            }
            KeyCode::Char(' ') if self.focus == Field::Fail => {
                self.fail = !self.fail;
                None
            }
            KeyCode::Char(c) if self.focus == Field::SleepMs => {
                self.sleep_ms.push(c);
                None
            }
            KeyCode::Backspace if self.focus == Field::SleepMs => {
                self.sleep_ms.pop();
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn captures_input(&self) -> bool {
        self.focus == Field::SleepMs
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let checkbox_style = if self.focus == Field::Fail {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let mark = if self.fail { "[x]" } else { "[ ]" };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(format!("{} Fail?", mark), checkbox_style))),
            chunks[0],
        );

        let input_color = if self.focus == Field::SleepMs {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let cursor = if self.focus == Field::SleepMs { "_" } else { "" };
        frame.render_widget(
            Paragraph::new(format!("{}{}", self.sleep_ms.text(), cursor)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(input_color))
                    .title(" Sleep time (milliseconds, 0 to 60000) ")
                    .title_style(Style::default().fg(input_color)),
            ),
            chunks[2],
        );

        if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    error.to_string(),
                    Style::default().fg(Color::Red),
                )),
                chunks[3],
            );
        }

        frame.render_widget(
            Paragraph::new(button_line("Submit", self.focus == Field::Submit)),
            chunks[4],
        );

        Ok(())
    }
}
