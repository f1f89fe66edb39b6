//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::job::JobRequest;
use crate::model::selection::SelectionChange;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Switch to the jobs page
    ShowJobs,
    /// Switch to the course details page
    ShowCourseDetails,
    /// Move to next tab
    NextTab,
    /// Move to previous tab
    PrevTab,

    // ─────────────────────────────────────────────────────────────────────────
    // Scrolling
    // ─────────────────────────────────────────────────────────────────────────
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Open the job log overlay
    OpenJobLog,
    /// Open the add-to-schedule dialog for the selected section
    OpenAddToSchedule,
    /// Close the current modal
    CloseModal,
    /// Navigate up in modal
    ModalUp,
    /// Navigate down in modal
    ModalDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Forms
    // ─────────────────────────────────────────────────────────────────────────
    /// A selection control committed a new value
    SelectionChanged(SelectionChange),
    /// A job form passed validation
    SubmitJob(JobRequest),

    // ─────────────────────────────────────────────────────────────────────────
    // Course Details
    // ─────────────────────────────────────────────────────────────────────────
    /// Look up a section by quarter and enroll code
    SearchSection { quarter: String, enroll_code: String },
    /// Add a section to a personal schedule
    AddToSchedule { section: String, schedule_id: String },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::ShowJobs => write!(f, "ShowJobs"),
            Action::ShowCourseDetails => write!(f, "ShowCourseDetails"),
            Action::NextTab => write!(f, "NextTab"),
            Action::PrevTab => write!(f, "PrevTab"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenJobLog => write!(f, "OpenJobLog"),
            Action::OpenAddToSchedule => write!(f, "OpenAddToSchedule"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
            Action::SelectionChanged(change) => write!(
                f,
                "SelectionChanged({}, {}, {})",
                change.control_id, change.index, change.value
            ),
            Action::SubmitJob(request) => write!(f, "SubmitJob({})", request.summary()),
            Action::SearchSection {
                quarter,
                enroll_code,
            } => write!(f, "SearchSection({}, {})", quarter, enroll_code),
            Action::AddToSchedule {
                section,
                schedule_id,
            } => write!(f, "AddToSchedule({}, {})", section, schedule_id),
        }
    }
}
