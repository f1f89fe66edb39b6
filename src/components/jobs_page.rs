//! Jobs page: one tab per job the administrator can launch

use super::test_job_form::TestJobForm;
use super::update_courses_form::UpdateCoursesForm;
use super::upload_grades_form::UploadGradesForm;
use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Tabs},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobTab {
    #[default]
    UpdateCourses,
    UploadGrades,
    TestJob,
}

impl JobTab {
    pub fn all() -> [JobTab; 3] {
        [JobTab::UpdateCourses, JobTab::UploadGrades, JobTab::TestJob]
    }

    pub fn name(&self) -> &'static str {
        match self {
            JobTab::UpdateCourses => "Update Courses",
            JobTab::UploadGrades => "Upload Grades",
            JobTab::TestJob => "Test Job",
        }
    }

    fn index(&self) -> usize {
        Self::all().iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> JobTab {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> JobTab {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

pub struct JobsPage {
    pub active_tab: JobTab,
    pub update_courses: UpdateCoursesForm,
    pub upload_grades: UploadGradesForm,
    pub test_job: TestJobForm,
}

impl JobsPage {
    pub fn new(update_courses: UpdateCoursesForm) -> Self {
        Self {
            active_tab: JobTab::default(),
            update_courses,
            upload_grades: UploadGradesForm,
            test_job: TestJobForm::new(),
        }
    }

    fn active_form(&mut self) -> &mut dyn Component {
        match self.active_tab {
            JobTab::UpdateCourses => &mut self.update_courses,
            JobTab::UploadGrades => &mut self.upload_grades,
            JobTab::TestJob => &mut self.test_job,
        }
    }

    fn active_form_ref(&self) -> &dyn Component {
        match self.active_tab {
            JobTab::UpdateCourses => &self.update_courses,
            JobTab::UploadGrades => &self.upload_grades,
            JobTab::TestJob => &self.test_job,
        }
    }
}

impl Component for JobsPage {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if !self.captures_input() {
            match key.code {
                KeyCode::Char(']') => return Ok(Some(Action::NextTab)),
                KeyCode::Char('[') => return Ok(Some(Action::PrevTab)),
                _ => {}
            }
        }
        self.active_form().handle_key_event(key)
    }

    fn captures_input(&self) -> bool {
        self.active_form_ref().captures_input()
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextTab => self.active_tab = self.active_tab.next(),
            Action::PrevTab => self.active_tab = self.active_tab.previous(),
            Action::SelectionChanged(_) => return self.update_courses.update(action),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Launch Jobs ")
            .title_style(
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);

        let titles: Vec<&str> = JobTab::all().iter().map(|t| t.name()).collect();
        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::BOTTOM))
            .select(self.active_tab.index())
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, chunks[0]);

        self.active_form().draw(frame, chunks[1])
    }
}
