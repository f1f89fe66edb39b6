//! Add-to-schedule dialog
//!
//! Picks one of the user's personal schedules for the quarter and reports
//! the chosen section and schedule. When the quarter has no schedules the
//! dialog points at the schedule creation page instead.

use super::dropdown::Dropdown;
use super::layout::{button_line, centered_popup, key_hints};
use crate::action::Action;
use crate::component::Component;
use crate::model::preferences::{SharedPreferences, PERSONAL_SCHEDULE_KEY};
use crate::model::quarter::yyyyq_to_qyy;
use crate::model::schedule::{
    filter_for_quarter, no_schedules_message, ScheduleSummary, CREATE_SCHEDULE_ROUTE,
};
use crate::model::selection::{DefaultPolicy, DropdownOption};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Picker,
    Save,
    Close,
}

pub struct AddToScheduleDialog {
    prefs: SharedPreferences,
    state: WorkflowState,
    quarter: String,
    section: Option<String>,
    has_schedules: bool,
    schedule_id: Option<String>,
    picker: Option<Dropdown>,
    focus: Focus,
}

impl AddToScheduleDialog {
    pub fn new(prefs: SharedPreferences) -> Self {
        Self {
            prefs,
            state: WorkflowState::Closed,
            quarter: String::new(),
            section: None,
            has_schedules: false,
            schedule_id: None,
            picker: None,
            focus: Focus::Save,
        }
    }

    /// Open for `section` in `quarter`, choosing among `schedules`
    pub fn open(&mut self, quarter: &str, section: Option<&str>, schedules: &[ScheduleSummary]) {
        let in_quarter = filter_for_quarter(schedules, quarter);
        let options: Vec<DropdownOption> = in_quarter
            .iter()
            .map(|s| DropdownOption::new(s.id.clone(), s.name.clone()))
            .collect();

        let picker = Dropdown::new(
            PERSONAL_SCHEDULE_KEY,
            "Personal Schedule",
            options,
            None,
            DefaultPolicy::First,
            self.prefs.clone(),
        );

        self.quarter = quarter.to_string();
        self.section = section.map(String::from);
        self.has_schedules = !in_quarter.is_empty();
        self.schedule_id = picker.value().map(String::from);
        self.picker = Some(picker);
        self.focus = if self.has_schedules {
            Focus::Picker
        } else {
            Focus::Save
        };
        self.state = WorkflowState::Open;
        self.sync_focus();
    }

    pub fn close(&mut self) {
        self.state = WorkflowState::Closed;
        self.picker = None;
    }

    pub fn is_open(&self) -> bool {
        self.state == WorkflowState::Open
    }

    #[cfg(test)]
    pub fn has_schedules(&self) -> bool {
        self.has_schedules
    }

    /// Report the section and chosen schedule, then close
    ///
    /// A missing section or schedule is reported as an empty string.
    pub fn save(&mut self) -> Action {
        let action = Action::AddToSchedule {
            section: self.section.clone().unwrap_or_default(),
            schedule_id: self.schedule_id.clone().unwrap_or_default(),
        };
        self.close();
        action
    }

    fn focus_order(&self) -> &'static [Focus] {
        if self.has_schedules {
            &[Focus::Picker, Focus::Save, Focus::Close]
        } else {
            &[Focus::Save, Focus::Close]
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % order.len()
        } else {
            (current + order.len() - 1) % order.len()
        };
        self.focus = order[next];
        self.sync_focus();
    }

    fn sync_focus(&mut self) {
        let focused = self.focus == Focus::Picker;
        if let Some(picker) = self.picker.as_mut() {
            picker.focused = focused;
        }
    }
}

impl Component for AddToScheduleDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if !self.is_open() {
            return Ok(None);
        }

        if self.focus == Focus::Picker {
            if let Some(picker) = self.picker.as_mut() {
                if picker.captures_input() || matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
                {
                    return picker.handle_key_event(key);
                }
            }
        }

        let action = match key.code {
            KeyCode::Tab | KeyCode::Right | KeyCode::Down => {
                self.move_focus(true);
                None
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Up => {
                self.move_focus(false);
                None
            }
            KeyCode::Enter if self.focus == Focus::Save => Some(self.save()),
            KeyCode::Char('s') => Some(self.save()),
            KeyCode::Enter | KeyCode::Esc => {
                self.close();
                Some(Action::CloseModal)
            }
            _ => None,
        };
        Ok(action)
    }

    fn captures_input(&self) -> bool {
        self.picker.as_ref().is_some_and(Dropdown::captures_input)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if let Action::SelectionChanged(change) = action {
            if change.control_id == PERSONAL_SCHEDULE_KEY {
                self.schedule_id = Some(change.value);
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        if !self.is_open() {
            return Ok(());
        }

        let popup_area = centered_popup(area, 64, 13);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Add to Schedule ")
            .title_style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
            .title_bottom(key_hints(&[(" Tab ", "Move"), (" Esc ", "Close")]));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let quarter = yyyyq_to_qyy(&self.quarter).unwrap_or_else(|| self.quarter.clone());
        let info = vec![
            Line::from(vec![
                Span::styled("Section: ", label),
                Span::raw(self.section.clone().unwrap_or_else(|| "(none)".to_string())),
            ]),
            Line::from(vec![Span::styled("Quarter: ", label), Span::raw(quarter)]),
        ];
        frame.render_widget(Paragraph::new(info), chunks[0]);

        if self.has_schedules {
            if let Some(picker) = self.picker.as_mut() {
                picker.draw(frame, chunks[1])?;
            }
        } else {
            let message = vec![
                Line::from(Span::styled(
                    no_schedules_message(&self.quarter),
                    Style::default().fg(Color::Yellow),
                )),
                Line::from(vec![
                    Span::styled(
                        "Create a Schedule",
                        Style::default()
                            .fg(Color::Blue)
                            .add_modifier(Modifier::UNDERLINED),
                    ),
                    Span::styled(
                        format!(" ({})", CREATE_SCHEDULE_ROUTE),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
            ];
            frame.render_widget(Paragraph::new(message), chunks[1]);
        }

        let mut buttons = button_line("Save Changes", self.focus == Focus::Save);
        buttons.spans.push(Span::raw("  "));
        buttons
            .spans
            .extend(button_line("Close", self.focus == Focus::Close).spans);
        frame.render_widget(Paragraph::new(buttons), chunks[3]);

        if let Some(picker) = self.picker.as_mut() {
            picker.draw_popup(frame);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::render_to_text;
    use crate::model::preferences::{MemoryPreferenceStore, PreferenceStore};
    use crossterm::event::KeyModifiers;
    use std::rc::Rc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn schedule(id: &str, quarter: &str, name: &str) -> ScheduleSummary {
        ScheduleSummary {
            id: id.to_string(),
            quarter: quarter.to_string(),
            name: name.to_string(),
            description: None,
        }
    }

    fn dialog() -> AddToScheduleDialog {
        AddToScheduleDialog::new(Rc::new(MemoryPreferenceStore::new()))
    }

    #[test]
    fn test_open_and_close() {
        let mut dialog = dialog();
        assert_eq!(dialog.state, WorkflowState::Closed);

        dialog.open("20242", Some("06619"), &[]);
        assert!(dialog.is_open());

        dialog.handle_key_event(key(KeyCode::Tab)).unwrap();
        let action = dialog.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(action, Some(Action::CloseModal));
        assert_eq!(dialog.state, WorkflowState::Closed);
    }

    #[test]
    fn test_no_schedules_message_and_link() {
        let mut dialog = dialog();
        dialog.open(
            "20242",
            None,
            &[schedule("schedule1", "20241", "Winter plan")],
        );
        assert!(!dialog.has_schedules());

        let text = render_to_text(80, 20, |frame| {
            let area = frame.area();
            dialog.draw(frame, area).unwrap();
        });
        assert!(text.contains("Add to Schedule"));
        assert!(text.contains("There are no personal schedules found for S24"));
        assert!(text.contains("Create a Schedule"));
        assert!(text.contains("/personalschedules/create"));
        assert!(text.contains("Save Changes"));
    }

    #[test]
    fn test_save_without_schedule_reports_empty_id() {
        let mut dialog = dialog();
        dialog.open("20242", Some("Stryker was here!"), &[]);

        let action = dialog.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(
            action,
            Some(Action::AddToSchedule {
                section: "Stryker was here!".to_string(),
                schedule_id: String::new(),
            })
        );
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_save_without_section() {
        let mut dialog = dialog();
        dialog.open("20242", None, &[]);
        assert_eq!(
            dialog.save(),
            Action::AddToSchedule {
                section: String::new(),
                schedule_id: String::new(),
            }
        );
    }

    #[test]
    fn test_picks_first_schedule_in_quarter() {
        let mut dialog = dialog();
        dialog.open(
            "20242",
            Some("06619"),
            &[
                schedule("1", "20241", "Winter"),
                schedule("schedule1", "20242", "Schedule 1"),
                schedule("schedule2", "20242", "Schedule 2"),
            ],
        );
        assert!(dialog.has_schedules());

        let text = render_to_text(80, 20, |frame| {
            let area = frame.area();
            dialog.draw(frame, area).unwrap();
        });
        assert!(text.contains("Schedule 1"));
        assert!(!text.contains("There are no personal schedules"));

        assert_eq!(
            dialog.save(),
            Action::AddToSchedule {
                section: "06619".to_string(),
                schedule_id: "schedule1".to_string(),
            }
        );
    }

    #[test]
    fn test_choosing_a_schedule_is_remembered() {
        let prefs = Rc::new(MemoryPreferenceStore::new());
        let schedules = [
            schedule("schedule1", "20242", "Schedule 1"),
            schedule("schedule2", "20242", "Schedule 2"),
        ];

        let mut dialog = AddToScheduleDialog::new(prefs.clone());
        dialog.open("20242", Some("06619"), &schedules);
        dialog.handle_key_event(key(KeyCode::Enter)).unwrap();
        dialog.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        let change = dialog.handle_key_event(key(KeyCode::Enter)).unwrap().unwrap();
        dialog.update(change).unwrap();

        assert_eq!(prefs.get(PERSONAL_SCHEDULE_KEY).as_deref(), Some("schedule2"));
        assert_eq!(
            dialog.save(),
            Action::AddToSchedule {
                section: "06619".to_string(),
                schedule_id: "schedule2".to_string(),
            }
        );

        let mut reopened = AddToScheduleDialog::new(prefs);
        reopened.open("20242", Some("06619"), &schedules);
        assert_eq!(
            reopened.save(),
            Action::AddToSchedule {
                section: "06619".to_string(),
                schedule_id: "schedule2".to_string(),
            }
        );
    }
}
