//! Course details page
//!
//! Look up a section by quarter and enroll code and show its course with
//! every class section. The quarter selection is remembered; changing it
//! marks the displayed course as stale until the next lookup.

use super::dropdown::Dropdown;
use super::layout::key_hints;
use super::section_table::SectionTable;
use crate::action::Action;
use crate::component::Component;
use crate::model::course::{format_course_id, Course};
use crate::model::fetch::{FetchSnapshot, FetchStatus};
use crate::model::preferences::{SharedPreferences, COURSE_DETAILS_QUARTER_KEY};
use crate::model::quarter::{enumerate, insert_quarter, QuarterCode, TermCalendar};
use crate::model::selection::{DefaultPolicy, DropdownOption};
use crate::model::system_info::{quarter_bounds, SystemInfo};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::cell::Cell;
use std::rc::Rc;

/// Enroll codes are five digits
const ENROLL_CODE_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Quarter,
    EnrollCode,
    Sections,
}

pub struct CourseDetailsPage {
    quarter: Option<String>,
    quarter_dropdown: Dropdown,
    enroll_code: String,
    focus: Focus,
    course: FetchSnapshot<Option<Course>>,
    /// Set by the quarter dropdown when the user picks a different quarter
    stale: Rc<Cell<bool>>,
    table: SectionTable,
}

impl CourseDetailsPage {
    pub fn new(
        prefs: SharedPreferences,
        system_info: Option<&SystemInfo>,
        calendar: &TermCalendar,
        initial_quarter: Option<&str>,
        initial_enroll_code: Option<&str>,
    ) -> Self {
        let (start, end) = quarter_bounds(system_info);
        let mut quarters = enumerate(&start, &end, calendar);
        // A launch quarter is looked up as given, even outside the offered range
        if let Some(code) = initial_quarter.and_then(|q| QuarterCode::parse(q, calendar).ok()) {
            insert_quarter(&mut quarters, code, calendar);
        }
        let quarters: Vec<DropdownOption> = quarters.iter().map(DropdownOption::from).collect();

        let stale = Rc::new(Cell::new(false));
        let observer_flag = stale.clone();
        let quarter_dropdown = Dropdown::new(
            COURSE_DETAILS_QUARTER_KEY,
            "Quarter",
            quarters,
            initial_quarter,
            DefaultPolicy::Last,
            prefs,
        )
        .with_observer(move |_| observer_flag.set(true));

        let enroll_code: String = initial_enroll_code
            .unwrap_or("")
            .chars()
            .filter(char::is_ascii_digit)
            .take(ENROLL_CODE_LEN)
            .collect();

        let mut page = Self {
            quarter: quarter_dropdown.value().map(String::from),
            quarter_dropdown,
            enroll_code,
            focus: Focus::EnrollCode,
            course: FetchSnapshot::default(),
            stale,
            table: SectionTable::default(),
        };
        page.sync_focus();
        page
    }

    pub fn course(&self) -> Option<&Course> {
        self.course.data.as_ref()
    }

    /// The lookup to run for the current inputs, if they are complete
    pub fn search_action(&self) -> Option<Action> {
        let quarter = self.quarter.clone()?;
        if self.enroll_code.is_empty() {
            return None;
        }
        Some(Action::SearchSection {
            quarter,
            enroll_code: self.enroll_code.clone(),
        })
    }

    pub fn set_course(&mut self, snapshot: FetchSnapshot<Option<Course>>) {
        self.course = snapshot;
        self.stale.set(false);
        self.table.reset();
        if self.course.data.is_some() {
            self.focus = Focus::Sections;
            self.sync_focus();
        }
    }

    /// Enroll code of the highlighted section
    pub fn selected_section(&self) -> Option<String> {
        let course = self.course.data.as_ref()?;
        self.table.selected_enroll_code(course).map(String::from)
    }

    fn sync_focus(&mut self) {
        self.quarter_dropdown.focused = self.focus == Focus::Quarter;
    }

    fn move_focus(&mut self, forward: bool) {
        self.focus = match (self.focus, forward) {
            (Focus::Quarter, true) => Focus::EnrollCode,
            (Focus::EnrollCode, true) => Focus::Sections,
            (Focus::Sections, true) => Focus::Quarter,
            (Focus::Quarter, false) => Focus::Sections,
            (Focus::EnrollCode, false) => Focus::Quarter,
            (Focus::Sections, false) => Focus::EnrollCode,
        };
        self.sync_focus();
    }

    fn handle_enroll_code_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.enroll_code.len() < ENROLL_CODE_LEN {
                    self.enroll_code.push(c);
                }
                None
            }
            KeyCode::Backspace => {
                self.enroll_code.pop();
                None
            }
            KeyCode::Enter => self.search_action(),
            KeyCode::Esc => {
                self.focus = Focus::Sections;
                None
            }
            _ => None,
        }
    }

    fn header_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        match (&self.course.data, self.course.status) {
            (Some(course), _) => {
                lines.push(Line::from(Span::styled(
                    course.page_title(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )));
                if let Some(description) = &course.description {
                    lines.push(Line::from(Span::styled(
                        description.clone(),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
                if self.stale.get() {
                    lines.push(Line::from(Span::styled(
                        "Quarter changed; press Enter in the enroll code field to reload",
                        Style::default().fg(Color::Yellow),
                    )));
                }
            }
            (None, FetchStatus::Error) => {
                lines.push(Line::from(Span::styled(
                    format!("No course found for enroll code {}", self.enroll_code),
                    Style::default().fg(Color::Red),
                )));
            }
            (None, _) => {
                lines.push(Line::from(Span::styled(
                    "Enter an enroll code and press Enter",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }

        lines
    }
}

impl Component for CourseDetailsPage {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.focus == Focus::Quarter
            && (self.quarter_dropdown.captures_input()
                || matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')))
        {
            return self.quarter_dropdown.handle_key_event(key);
        }

        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            self.move_focus(key.code == KeyCode::Tab);
            return Ok(None);
        }

        if self.focus == Focus::EnrollCode {
            return Ok(self.handle_enroll_code_key(key));
        }

        let row_count = self
            .course
            .data
            .as_ref()
            .map(|c| c.class_sections.len())
            .unwrap_or(0);

        let action = match key.code {
            KeyCode::Down | KeyCode::Char('j') if self.focus == Focus::Sections => {
                self.table.next(row_count);
                None
            }
            KeyCode::Up | KeyCode::Char('k') if self.focus == Focus::Sections => {
                self.table.previous();
                None
            }
            KeyCode::Char('a') if self.course.data.is_some() => Some(Action::OpenAddToSchedule),
            _ => None,
        };
        Ok(action)
    }

    fn captures_input(&self) -> bool {
        self.focus == Focus::EnrollCode || self.quarter_dropdown.captures_input()
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if let Action::SelectionChanged(change) = action {
            if change.control_id == COURSE_DETAILS_QUARTER_KEY {
                self.quarter = Some(change.value);
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let title = match self.course.data.as_ref() {
            Some(course) => format!(" Course Details: {} ", format_course_id(&course.course_id)),
            None => " Course Details ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .title_style(
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let header = self.header_lines();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(header.len() as u16 + 1),
                Constraint::Min(0),
            ])
            .split(inner);

        let inputs = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(16),
                Constraint::Length(20),
                Constraint::Min(0),
            ])
            .split(chunks[0]);

        self.quarter_dropdown.draw(frame, inputs[0])?;

        let input_color = if self.focus == Focus::EnrollCode {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let cursor = if self.focus == Focus::EnrollCode { "_" } else { "" };
        frame.render_widget(
            Paragraph::new(format!("{}{}", self.enroll_code, cursor)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(input_color))
                    .title(" Enroll Code ")
                    .title_style(Style::default().fg(input_color)),
            ),
            inputs[1],
        );

        frame.render_widget(
            Paragraph::new(header).wrap(Wrap { trim: false }),
            chunks[1],
        );

        if let Some(course) = self.course.data.as_ref() {
            let table_color = if self.focus == Focus::Sections {
                Color::Cyan
            } else {
                Color::DarkGray
            };
            let table = Paragraph::new(self.table.render_lines(course)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(table_color))
                    .title(" Sections ")
                    .title_bottom(key_hints(&[(" a ", "Add to schedule")])),
            );
            let visible = chunks[2].height.saturating_sub(4) as usize;
            let scroll = self.table.selected.saturating_sub(visible.saturating_sub(1));
            frame.render_widget(table.scroll((scroll as u16, 0)), chunks[2]);
        }

        self.quarter_dropdown.draw_popup(frame);
        Ok(())
    }
}
