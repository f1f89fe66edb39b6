//! Form for the "update courses by quarter range, single subject" job

use super::dropdown::Dropdown;
use super::layout::button_line;
use crate::action::Action;
use crate::component::Component;
use crate::model::job::JobRequest;
use crate::model::preferences::{
    SharedPreferences, END_QUARTER_KEY, START_QUARTER_KEY, SUBJECT_KEY,
};
use crate::model::quarter::{enumerate, TermCalendar};
use crate::model::selection::{DefaultPolicy, DropdownOption};
use crate::model::system_info::{quarter_bounds, SystemInfo};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

/// Subject used until the user picks one
pub const DEFAULT_SUBJECT: &str = "ANTH";

const SUBMIT_FOCUS: usize = 3;

pub struct UpdateCoursesForm {
    subject: Option<String>,
    start_quarter: Option<String>,
    end_quarter: Option<String>,
    /// Subject, start quarter, end quarter
    dropdowns: [Dropdown; 3],
    focus: usize,
}

impl UpdateCoursesForm {
    pub fn new(
        prefs: SharedPreferences,
        system_info: Option<&SystemInfo>,
        subjects: Vec<DropdownOption>,
        calendar: &TermCalendar,
    ) -> Self {
        let (start, end) = quarter_bounds(system_info);
        let quarters: Vec<DropdownOption> = enumerate(&start, &end, calendar)
            .iter()
            .map(DropdownOption::from)
            .collect();

        let initial_subject = prefs
            .get(SUBJECT_KEY)
            .unwrap_or_else(|| DEFAULT_SUBJECT.to_string());

        let subject = Dropdown::new(
            SUBJECT_KEY,
            "Subject",
            subjects,
            Some(&initial_subject),
            DefaultPolicy::MatchValue(DEFAULT_SUBJECT.to_string()),
            prefs.clone(),
        );
        let start_quarter = Dropdown::new(
            START_QUARTER_KEY,
            "Start Quarter",
            quarters.clone(),
            None,
            DefaultPolicy::Last,
            prefs.clone(),
        );
        let end_quarter = Dropdown::new(
            END_QUARTER_KEY,
            "End Quarter",
            quarters,
            None,
            DefaultPolicy::Last,
            prefs,
        );

        let mut form = Self {
            subject: subject.value().map(String::from),
            start_quarter: start_quarter.value().map(String::from),
            end_quarter: end_quarter.value().map(String::from),
            dropdowns: [subject, start_quarter, end_quarter],
            focus: 0,
        };
        form.sync_focus();
        form
    }

    /// Subjects arrived after the form was built
    ///
    /// The pending subject survives if the list has it; otherwise `ANTH`,
    /// then the first subject.
    pub fn set_subjects(&mut self, subjects: Vec<DropdownOption>) {
        self.dropdowns[0].set_options(subjects);
        self.subject = self.dropdowns[0].value().map(String::from);
    }

    pub fn request(&self) -> JobRequest {
        JobRequest::UpdateCoursesByQuarterRangeSingleSubject {
            subject: self.subject.clone().unwrap_or_default(),
            start_quarter: self.start_quarter.clone().unwrap_or_default(),
            end_quarter: self.end_quarter.clone().unwrap_or_default(),
        }
    }

    pub fn submit(&self) -> Option<Action> {
        Some(Action::SubmitJob(self.request()))
    }

    fn focused_dropdown(&mut self) -> Option<&mut Dropdown> {
        self.dropdowns.get_mut(self.focus)
    }

    fn sync_focus(&mut self) {
        for (i, dropdown) in self.dropdowns.iter_mut().enumerate() {
            dropdown.focused = i == self.focus;
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let count = SUBMIT_FOCUS + 1;
        self.focus = if forward {
            (self.focus + 1) % count
        } else {
            (self.focus + count - 1) % count
        };
        self.sync_focus();
    }
}

impl Component for UpdateCoursesForm {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(dropdown) = self.focused_dropdown() {
            if dropdown.captures_input() || matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
            {
                return dropdown.handle_key_event(key);
            }
        }

        let action = match key.code {
            KeyCode::Enter if self.focus == SUBMIT_FOCUS => self.submit(),
            KeyCode::Tab | KeyCode::Down => {
                self.move_focus(true);
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_focus(false);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn captures_input(&self) -> bool {
        self.dropdowns.iter().any(Dropdown::captures_input)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if let Action::SelectionChanged(change) = action {
            let value = Some(change.value);
            match change.control_id.as_str() {
                SUBJECT_KEY => self.subject = value,
                START_QUARTER_KEY => self.start_quarter = value,
                END_QUARTER_KEY => self.end_quarter = value,
                _ => {}
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(40),
                Constraint::Length(20),
                Constraint::Length(20),
                Constraint::Min(0),
            ])
            .split(rows[0]);

        for (dropdown, column) in self.dropdowns.iter_mut().zip(columns.iter()) {
            dropdown.draw(frame, *column)?;
        }

        frame.render_widget(
            Paragraph::new(button_line("Update Courses", self.focus == SUBMIT_FOCUS)),
            rows[2],
        );

        for dropdown in self.dropdowns.iter_mut() {
            dropdown.draw_popup(frame);
        }
        Ok(())
    }
}
