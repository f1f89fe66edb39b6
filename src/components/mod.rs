//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod add_to_schedule_dialog;
pub mod course_details;
pub mod dropdown;
pub mod help_dialog;
pub mod job_log_dialog;
pub mod jobs_page;
pub mod layout;
pub mod quit_dialog;
pub mod section_table;
pub mod test_job_form;
pub mod update_courses_form;
pub mod upload_grades_form;

pub use add_to_schedule_dialog::AddToScheduleDialog;
pub use course_details::CourseDetailsPage;
pub use help_dialog::HelpDialog;
pub use job_log_dialog::JobLogDialog;
pub use jobs_page::JobsPage;
pub use layout::calculate_main_layout;
pub use quit_dialog::QuitDialog;
pub use update_courses_form::UpdateCoursesForm;

/// Render into an off-screen terminal and return the buffer as text, one line per row
#[cfg(test)]
pub(crate) fn render_to_text(
    width: u16,
    height: u16,
    draw: impl FnOnce(&mut ratatui::Frame),
) -> String {
    use ratatui::{backend::TestBackend, Terminal};

    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(draw).unwrap();

    let buffer = terminal.backend().buffer();
    let columns = buffer.area.width as usize;
    buffer
        .content
        .chunks(columns)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
