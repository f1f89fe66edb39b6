//! Model layer
//!
//! Plain data and pure logic shared by the components:
//! - quarter codes and range enumeration
//! - remembered selections (`PreferenceStore`)
//! - dropdown selection state and form validation
//! - job requests, schedules, course records
//! - `ModalStack` - Modal overlay management

pub mod course;
pub mod fetch;
pub mod form;
pub mod job;
pub mod modal;
pub mod preferences;
pub mod quarter;
pub mod schedule;
pub mod selection;
pub mod system_info;
pub mod ui;

pub use modal::{Modal, ModalStack};
pub use ui::Page;
