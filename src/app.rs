//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! App coordinates pages, dialogs and the data source; form and selection
//! logic lives in the components themselves.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::key_hints;
use crate::components::{
    calculate_main_layout, AddToScheduleDialog, CourseDetailsPage, HelpDialog, JobLogDialog,
    JobsPage, QuitDialog, UpdateCoursesForm,
};
use crate::model::job::{JobLog, JobLogEntry, JobRequest};
use crate::model::preferences::SharedPreferences;
use crate::model::quarter::{QuarterCode, TermCalendar};
use crate::model::{Modal, ModalStack, Page};
use crate::services::reference;
use crate::services::Backend;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{info, warn};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use serde_json::json;
use std::path::PathBuf;

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    /// Quarter for the course details page, `YYYYQ`
    pub qtr: Option<String>,
    /// Enroll code to look up on start
    pub enroll_code: Option<String>,
}

pub struct App {
    /// Page shown under any modal
    pub page: Page,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    /// Submitted jobs and schedule additions, newest first
    pub job_log: Vec<JobLogEntry>,

    backend: Box<dyn Backend>,
    config_dir: PathBuf,
    /// Run the lookup from the command line during init
    search_on_start: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub jobs: JobsPage,
    pub course_details: CourseDetailsPage,
    pub add_to_schedule: AddToScheduleDialog,
    pub job_log_dialog: JobLogDialog,
    pub help_dialog: HelpDialog,
    pub quit_dialog: QuitDialog,
}

impl App {
    pub fn new(
        backend: Box<dyn Backend>,
        prefs: SharedPreferences,
        config_dir: PathBuf,
        launch: LaunchOptions,
    ) -> App {
        let calendar = TermCalendar::ucsb();
        let system_info = reference::load_system_info(backend.as_ref());
        let error = system_info.error.clone();

        // Subjects follow in init
        let update_courses = UpdateCoursesForm::new(
            prefs.clone(),
            system_info.data.as_ref(),
            Vec::new(),
            &calendar,
        );
        let course_details = CourseDetailsPage::new(
            prefs.clone(),
            system_info.data.as_ref(),
            &calendar,
            launch.qtr.as_deref(),
            launch.enroll_code.as_deref(),
        );

        let status_message = launch
            .qtr
            .as_deref()
            .and_then(|q| QuarterCode::parse(q, &calendar).err())
            .map(|e| {
                warn!("Ignoring launch quarter: {}", e);
                format!("Ignoring --qtr: {}", e)
            });

        let search_on_start = launch.enroll_code.is_some();
        let job_log = JobLog::load(&config_dir);

        App {
            page: if search_on_start {
                Page::CourseDetails
            } else {
                Page::Jobs
            },
            modals: ModalStack::new(),
            should_quit: false,
            error,
            status_message,
            job_log,
            backend,
            config_dir,
            search_on_start,
            jobs: JobsPage::new(update_courses),
            course_details,
            add_to_schedule: AddToScheduleDialog::new(prefs),
            job_log_dialog: JobLogDialog::default(),
            help_dialog: HelpDialog::default(),
            quit_dialog: QuitDialog,
        }
    }

    fn active_page(&self) -> &dyn Component {
        match self.page {
            Page::Jobs => &self.jobs,
            Page::CourseDetails => &self.course_details,
        }
    }

    fn active_page_mut(&mut self) -> &mut dyn Component {
        match self.page {
            Page::Jobs => &mut self.jobs,
            Page::CourseDetails => &mut self.course_details,
        }
    }

    /// Fill the subject dropdown once the list arrives
    fn load_subjects(&mut self) {
        let subjects = reference::load_subjects(self.backend.as_ref());
        if let Some(e) = subjects.error {
            if self.error.is_none() {
                self.error = Some(e);
            }
        }
        info!("Loaded {} subjects", subjects.data.len());
        self.jobs.update_courses.set_subjects(subjects.data);
    }

    /// Append to the job log and persist it
    ///
    /// A successful write clears any earlier error so the new status shows.
    fn record(&mut self, entry: JobLogEntry) {
        JobLog::record(&mut self.job_log, entry);
        match JobLog::save(&self.config_dir, &self.job_log) {
            Ok(()) => self.error = None,
            Err(e) => {
                warn!("{}", e);
                self.error = Some(e);
            }
        }
    }

    fn submit_job(&mut self, request: JobRequest) {
        info!("Submitting job: {}", request.summary());
        let entry = JobLogEntry::for_job(&request);
        self.record(entry);
        self.status_message = Some(format!("Submitted: {}", request.summary()));
    }

    fn search_section(&mut self, quarter: &str, enroll_code: &str) {
        info!("Looking up enroll code {} in {}", enroll_code, quarter);
        let snapshot = reference::search_section(self.backend.as_ref(), quarter, enroll_code);
        self.error = snapshot.error.clone();
        self.status_message = snapshot
            .data
            .as_ref()
            .map(|course| format!("Loaded {} sections", course.class_sections.len()));
        self.course_details.set_course(snapshot);
    }

    fn open_add_to_schedule(&mut self) {
        let Some(quarter) = self.course_details.course().map(|c| c.quarter.clone()) else {
            return;
        };
        let section = self.course_details.selected_section();

        let schedules = reference::load_schedules(self.backend.as_ref());
        if let Some(e) = schedules.error {
            self.error = Some(e);
        }

        self.add_to_schedule
            .open(&quarter, section.as_deref(), &schedules.data);
        self.modals.push(Modal::AddToSchedule);
    }

    fn record_schedule_addition(&mut self, section: String, schedule_id: String) {
        if self.modals.top() == Some(&Modal::AddToSchedule) {
            self.modals.pop();
        }

        info!("Adding section {:?} to schedule {:?}", section, schedule_id);
        let summary = if schedule_id.is_empty() {
            format!("Add section {} (no schedule chosen)", section)
        } else {
            format!("Add section {} to schedule {}", section, schedule_id)
        };
        self.status_message = Some(summary.clone());
        self.record(JobLogEntry::new(
            summary,
            json!({ "section": section, "scheduleId": schedule_id }),
        ));
    }

    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
            Modal::AddToSchedule => self.add_to_schedule.handle_key_event(key),
            Modal::JobLog { .. } => self.job_log_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::Help => self.help_dialog.draw(frame, area)?,
            Modal::AddToSchedule => self.add_to_schedule.draw(frame, area)?,
            Modal::JobLog { .. } => {
                self.job_log_dialog
                    .draw_with_log(frame, area, &self.job_log)?;
            }
        }
        Ok(())
    }

    fn render_pages(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<String> = Page::all()
            .iter()
            .enumerate()
            .map(|(i, page)| format!("{} {}", i + 1, page.name()))
            .collect();
        let tabs = Tabs::new(titles)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .title(" UCSB Courses ")
                    .title_style(
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .select(self.page.index())
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(error) = &self.error {
            Line::from(Span::styled(
                format!(" {} ", error),
                Style::default().fg(Color::Red),
            ))
        } else {
            Line::from(Span::styled(
                format!(" {} ", self.status_message.as_deref().unwrap_or_default()),
                Style::default().fg(Color::Yellow),
            ))
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help_bar(&self, frame: &mut Frame, area: Rect) {
        let hints: &[(&str, &str)] = match self.page {
            Page::Jobs => &[
                (" 1/2 ", "Page"),
                (" ]/[ ", "Job tab"),
                (" Tab ", "Field"),
                (" Enter ", "Open/Submit"),
                (" l ", "Job log"),
                (" ? ", "Help"),
                (" q ", "Quit"),
            ],
            Page::CourseDetails => &[
                (" 1/2 ", "Page"),
                (" Tab ", "Field"),
                (" Enter ", "Look up"),
                (" Esc ", "Leave field"),
                (" a ", "Add to schedule"),
                (" ? ", "Help"),
                (" q ", "Quit"),
            ],
        };
        let help = Paragraph::new(key_hints(hints)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.load_subjects();
        if self.search_on_start {
            if let Some(Action::SearchSection {
                quarter,
                enroll_code,
            }) = self.course_details.search_action()
            {
                self.search_section(&quarter, &enroll_code);
            }
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::ForceQuit));
        }

        if let Some(modal) = self.modals.top().cloned() {
            return self.handle_modal_key_event(&modal, key);
        }

        if !self.active_page().captures_input() {
            let global = match key.code {
                KeyCode::Char('q') => Some(Action::OpenQuitDialog),
                KeyCode::Char('?') => Some(Action::OpenHelp),
                KeyCode::Char('l') => Some(Action::OpenJobLog),
                KeyCode::Char('1') => Some(Action::ShowJobs),
                KeyCode::Char('2') => Some(Action::ShowCourseDetails),
                _ => None,
            };
            if global.is_some() {
                return Ok(global);
            }
        }

        self.active_page_mut().handle_key_event(key)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick | Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::ShowJobs => self.page = Page::Jobs,
            Action::ShowCourseDetails => self.page = Page::CourseDetails,
            Action::NextTab | Action::PrevTab => {
                self.jobs.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                if self.modals.top() != Some(&Modal::Help) {
                    self.help_dialog.scroll_offset = 0;
                    self.modals.push(Modal::Help);
                }
            }
            Action::OpenJobLog => {
                self.job_log_dialog.selected_index = 0;
                self.job_log_dialog.detail_scroll = 0;
                if matches!(self.modals.top(), Some(Modal::JobLog { .. })) {
                    self.modals.pop();
                } else {
                    self.modals.push(Modal::JobLog { selected_index: 0 });
                }
            }
            Action::OpenAddToSchedule => self.open_add_to_schedule(),
            Action::CloseModal => {
                if self.modals.top() == Some(&Modal::AddToSchedule) {
                    self.add_to_schedule.close();
                }
                self.modals.pop();
            }
            Action::ModalUp => {
                self.job_log_dialog.update(Action::ModalUp)?;
                if let Some(Modal::JobLog { selected_index }) = self.modals.top_mut() {
                    *selected_index = self.job_log_dialog.selected_index;
                }
            }
            Action::ModalDown => {
                // Clamp before incrementing
                let max = self.job_log.len().saturating_sub(1);
                if self.job_log_dialog.selected_index < max {
                    self.job_log_dialog.update(Action::ModalDown)?;
                }
                if let Some(Modal::JobLog { selected_index }) = self.modals.top_mut() {
                    *selected_index = self.job_log_dialog.selected_index;
                }
            }
            Action::ScrollUp | Action::ScrollDown | Action::PageUp | Action::PageDown => {
                self.job_log_dialog.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Forms
            // ─────────────────────────────────────────────────────────────────
            Action::SelectionChanged(_) => {
                if self.modals.top() == Some(&Modal::AddToSchedule) {
                    return self.add_to_schedule.update(action);
                }
                return self.active_page_mut().update(action);
            }
            Action::SubmitJob(request) => self.submit_job(request),

            // ─────────────────────────────────────────────────────────────────
            // Course details
            // ─────────────────────────────────────────────────────────────────
            Action::SearchSection {
                quarter,
                enroll_code,
            } => self.search_section(&quarter, &enroll_code),
            Action::AddToSchedule {
                section,
                schedule_id,
            } => self.record_schedule_addition(section, schedule_id),
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let has_status = self.error.is_some() || self.status_message.is_some();
        let layout = calculate_main_layout(area, has_status);

        self.render_pages(frame, layout.pages);
        self.active_page_mut().draw(frame, layout.content)?;
        if let Some(status_area) = layout.status {
            self.render_status(frame, status_area);
        }
        self.render_help_bar(frame, layout.help);

        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::render_to_text;
    use crate::model::preferences::{MemoryPreferenceStore, PreferenceStore, SUBJECT_KEY};
    use crate::services::backend::MemoryBackend;
    use crate::services::reference::{
        SCHEDULES_URL, SECTION_SEARCH_URL, SUBJECTS_URL, SYSTEM_INFO_URL,
    };
    use serde_json::Value;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn chem_184() -> Value {
        json!({
            "quarter": "20221",
            "courseId": "CHEM    184  ",
            "title": "CHEM LITERATURE",
            "description": "Lectures and exercises on the literature of chemistry.",
            "unitsFixed": 2,
            "instructionType": "LEC",
            "classSections": [
                {
                    "enrollCode": "06619",
                    "section": "0100",
                    "enrolledTotal": 19,
                    "maxEnroll": 24,
                    "timeLocations": [
                        { "room": "1312", "building": "LIB", "days": " T R   ", "beginTime": "14:00", "endTime": "15:15" }
                    ],
                    "instructors": [
                        { "instructor": "HUBER C F", "functionCode": "Teaching and in charge" }
                    ]
                }
            ]
        })
    }

    fn backend() -> MemoryBackend {
        MemoryBackend::new()
            .with(
                SYSTEM_INFO_URL,
                &[],
                json!({ "startQtrYYYYQ": "20211", "endQtrYYYYQ": "20224" }),
            )
            .with(
                SUBJECTS_URL,
                &[],
                json!([
                    { "subjectCode": "ANTH", "subjectTranslation": "Anthropology" },
                    { "subjectCode": "CHEM", "subjectTranslation": "Chemistry" }
                ]),
            )
            .with(
                SCHEDULES_URL,
                &[],
                json!([
                    { "id": 1, "quarter": "20214", "name": "Fall plan" },
                    { "id": 7, "quarter": "20221", "name": "Winter plan", "description": "light load" }
                ]),
            )
            .with(
                SECTION_SEARCH_URL,
                &[("qtr", "20221"), ("enrollCode", "06619")],
                chem_184(),
            )
    }

    fn app_with(backend: MemoryBackend, dir: &TempDir, launch: LaunchOptions) -> App {
        let prefs = Rc::new(MemoryPreferenceStore::new());
        let mut app = App::new(Box::new(backend), prefs, dir.path().to_path_buf(), launch);
        app.init().unwrap();
        app
    }

    fn dispatch(app: &mut App, action: Option<Action>) {
        let mut current = action;
        while let Some(a) = current {
            current = app.update(a).unwrap();
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        let action = app
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
        dispatch(app, action);
    }

    #[test]
    fn test_submit_update_courses_job_is_logged() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(backend(), &dir, LaunchOptions::default());
        assert_eq!(app.page, Page::Jobs);
        assert!(app.error.is_none());

        for _ in 0..3 {
            press(&mut app, KeyCode::Tab);
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.job_log.len(), 1);
        assert_eq!(
            app.job_log[0].payload,
            json!({
                "job": "updateCoursesByQuarterRangeSingleSubject",
                "subject": "ANTH",
                "startQuarter": "20224",
                "endQuarter": "20224"
            })
        );
        assert_eq!(JobLog::load(dir.path()).len(), 1);
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|s| s.starts_with("Submitted")));
    }

    #[test]
    fn test_subject_choice_reaches_form_and_store() {
        let dir = TempDir::new().unwrap();
        let prefs = Rc::new(MemoryPreferenceStore::new());
        let mut app = App::new(
            Box::new(backend()),
            prefs.clone(),
            dir.path().to_path_buf(),
            LaunchOptions::default(),
        );
        app.init().unwrap();

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(prefs.get(SUBJECT_KEY).as_deref(), Some("CHEM"));
        assert!(matches!(
            app.jobs.update_courses.request(),
            JobRequest::UpdateCoursesByQuarterRangeSingleSubject { ref subject, .. } if subject == "CHEM"
        ));
    }

    #[test]
    fn test_subjects_arrive_after_startup() {
        let dir = TempDir::new().unwrap();
        let prefs = Rc::new(MemoryPreferenceStore::new());
        prefs.set(SUBJECT_KEY, "CHEM");
        let mut app = App::new(
            Box::new(backend()),
            prefs,
            dir.path().to_path_buf(),
            LaunchOptions::default(),
        );

        let subject = |app: &App| match app.jobs.update_courses.request() {
            JobRequest::UpdateCoursesByQuarterRangeSingleSubject { subject, .. } => subject,
            other => panic!("unexpected request {:?}", other),
        };
        assert_eq!(subject(&app), "CHEM");

        app.init().unwrap();
        assert_eq!(subject(&app), "CHEM");

        // Without a stored choice, ANTH wins only if the server lists it
        let only_math = MemoryBackend::new().with(
            SUBJECTS_URL,
            &[],
            json!([{ "subjectCode": "MATH", "subjectTranslation": "Mathematics" }]),
        );
        let app = app_with(only_math, &dir, LaunchOptions::default());
        assert_eq!(subject(&app), "MATH");
    }

    #[test]
    fn test_successful_submit_replaces_startup_error() {
        let dir = TempDir::new().unwrap();
        let no_subjects = MemoryBackend::new().with(
            SYSTEM_INFO_URL,
            &[],
            json!({ "startQtrYYYYQ": "20211", "endQtrYYYYQ": "20224" }),
        );
        let mut app = app_with(no_subjects, &dir, LaunchOptions::default());
        assert!(app.error.is_some());

        press(&mut app, KeyCode::Char(']'));
        press(&mut app, KeyCode::Enter);

        assert!(app.error.is_none());
        assert_eq!(app.status_message.as_deref(), Some("Submitted: Upload grades"));
        let text = render_to_text(120, 30, |frame| {
            let area = frame.area();
            app.draw(frame, area).unwrap();
        });
        assert!(text.contains("Submitted: Upload grades"));
    }

    #[test]
    fn test_unparseable_launch_quarter_is_reported() {
        let dir = TempDir::new().unwrap();
        let app = app_with(
            backend(),
            &dir,
            LaunchOptions {
                qtr: Some("W22".to_string()),
                enroll_code: None,
            },
        );
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|s| s.starts_with("Ignoring --qtr")));
    }

    #[test]
    fn test_launch_quarter_outside_range_is_searched() {
        let dir = TempDir::new().unwrap();
        let narrow = backend().with(
            SYSTEM_INFO_URL,
            &[],
            json!({ "startQtrYYYYQ": "20211", "endQtrYYYYQ": "20214" }),
        );
        let app = app_with(
            narrow,
            &dir,
            LaunchOptions {
                qtr: Some("20221".to_string()),
                enroll_code: Some("06619".to_string()),
            },
        );
        assert!(app.error.is_none());
        assert_eq!(
            app.course_details.course().map(|c| c.quarter.clone()),
            Some("20221".to_string())
        );
    }

    #[test]
    fn test_global_keys_open_and_close_dialogs() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(backend(), &dir, LaunchOptions::default());

        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.modals.top(), Some(&Modal::Help));
        press(&mut app, KeyCode::Esc);
        assert!(app.modals.is_empty());

        press(&mut app, KeyCode::Char('l'));
        assert!(matches!(app.modals.top(), Some(Modal::JobLog { .. })));
        press(&mut app, KeyCode::Esc);

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.page, Page::CourseDetails);

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_lookup_on_start_and_add_to_schedule() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(
            backend(),
            &dir,
            LaunchOptions {
                qtr: Some("20221".to_string()),
                enroll_code: Some("06619".to_string()),
            },
        );
        assert_eq!(app.page, Page::CourseDetails);
        assert_eq!(
            app.course_details.course().map(|c| c.page_title()),
            Some("Course Details for CHEM 184 W22!".to_string())
        );

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.modals.top(), Some(&Modal::AddToSchedule));
        assert!(app.add_to_schedule.has_schedules());

        press(&mut app, KeyCode::Char('s'));
        assert!(app.modals.is_empty());
        assert_eq!(
            app.job_log[0].payload,
            json!({ "section": "06619", "scheduleId": "7" })
        );
    }

    #[test]
    fn test_missing_course_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(
            backend(),
            &dir,
            LaunchOptions {
                qtr: Some("20221".to_string()),
                enroll_code: Some("99999".to_string()),
            },
        );
        assert!(app.course_details.course().is_none());
        assert!(app.error.is_some());

        // Nothing to add without a course
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('a'));
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_unavailable_backend_falls_back() {
        let dir = TempDir::new().unwrap();
        let app = app_with(MemoryBackend::new(), &dir, LaunchOptions::default());

        assert!(app.error.is_some());
        assert!(matches!(
            app.jobs.update_courses.request(),
            JobRequest::UpdateCoursesByQuarterRangeSingleSubject { ref end_quarter, .. } if end_quarter == "20214"
        ));
    }

    #[test]
    fn test_draws_pages_and_help_bar() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(backend(), &dir, LaunchOptions::default());

        let text = render_to_text(120, 30, |frame| {
            let area = frame.area();
            app.draw(frame, area).unwrap();
        });
        assert!(text.contains("1 Jobs"));
        assert!(text.contains("2 Course Details"));
        assert!(text.contains("Launch Jobs"));
        assert!(text.contains("Job log"));
    }
}
