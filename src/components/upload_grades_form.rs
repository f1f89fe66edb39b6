//! Upload grades job form
//!
//! Grade files are picked on the server side; the form only starts the job.

use super::layout::button_line;
use crate::action::Action;
use crate::component::Component;
use crate::model::job::JobRequest;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

#[derive(Default)]
pub struct UploadGradesForm;

impl Component for UploadGradesForm {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Enter => Some(Action::SubmitJob(JobRequest::UploadGrades)),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        frame.render_widget(
            Paragraph::new("Upload the latest grade history files.")
                .style(Style::default().fg(Color::DarkGray)),
            chunks[0],
        );
        frame.render_widget(Paragraph::new(button_line("Update Grades", true)), chunks[2]);
        Ok(())
    }
}
