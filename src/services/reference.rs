//! Typed loaders for reference and detail data
//!
//! Each loader returns a [`FetchSnapshot`] whose `data` is a usable default
//! when the backend has nothing, so callers never branch on errors to render.

use super::backend::Backend;
use crate::model::course::Course;
use crate::model::fetch::FetchSnapshot;
use crate::model::schedule::ScheduleSummary;
use crate::model::selection::DropdownOption;
use crate::model::system_info::SystemInfo;
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const SYSTEM_INFO_URL: &str = "/api/systemInfo";
pub const SUBJECTS_URL: &str = "/api/UCSBSubjects/all";
pub const SCHEDULES_URL: &str = "/api/personalschedules/all";
pub const SECTION_SEARCH_URL: &str = "/api/sections/sectionsearch";

/// A subject area as listed by the subjects endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub subject_code: String,
    pub subject_translation: String,
    #[serde(default)]
    pub dept_code: Option<String>,
    #[serde(default)]
    pub inactive: bool,
}

impl From<&Subject> for DropdownOption {
    fn from(subject: &Subject) -> Self {
        DropdownOption::new(
            subject.subject_code.clone(),
            format!("{} - {}", subject.subject_code, subject.subject_translation),
        )
    }
}

/// Fetch `url` and decode it, falling back to `default` on any failure
pub fn fetch<T: DeserializeOwned>(
    backend: &dyn Backend,
    url: &str,
    params: &[(&str, &str)],
    default: T,
) -> FetchSnapshot<T> {
    let value = match backend.get(url, params) {
        Ok(v) => v,
        Err(e) => {
            warn!("GET {} failed: {}", url, e);
            return FetchSnapshot::failed(default, e.to_string());
        }
    };

    match serde_json::from_value(value) {
        Ok(data) => FetchSnapshot::success(data),
        Err(e) => {
            warn!("Unexpected response from {}: {}", url, e);
            FetchSnapshot::failed(default, format!("Unexpected response from {}: {}", url, e))
        }
    }
}

pub fn load_system_info(backend: &dyn Backend) -> FetchSnapshot<Option<SystemInfo>> {
    fetch(backend, SYSTEM_INFO_URL, &[], None)
}

/// Subjects as dropdown options, sorted by code
pub fn load_subjects(backend: &dyn Backend) -> FetchSnapshot<Vec<DropdownOption>> {
    let snapshot: FetchSnapshot<Vec<Subject>> = fetch(backend, SUBJECTS_URL, &[], Vec::new());

    let mut subjects = snapshot.data;
    subjects.sort_by(|a, b| a.subject_code.cmp(&b.subject_code));
    let options = subjects.iter().map(DropdownOption::from).collect();

    FetchSnapshot {
        data: options,
        error: snapshot.error,
        status: snapshot.status,
    }
}

pub fn load_schedules(backend: &dyn Backend) -> FetchSnapshot<Vec<ScheduleSummary>> {
    fetch(backend, SCHEDULES_URL, &[], Vec::new())
}

pub fn search_section(
    backend: &dyn Backend,
    quarter: &str,
    enroll_code: &str,
) -> FetchSnapshot<Option<Course>> {
    fetch(
        backend,
        SECTION_SEARCH_URL,
        &[("qtr", quarter), ("enrollCode", enroll_code)],
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fetch::FetchStatus;
    use crate::services::backend::{FixtureBackend, MemoryBackend};
    use serde_json::json;

    #[test]
    fn test_subjects_sorted_with_labels() {
        let backend = MemoryBackend::new().with(
            SUBJECTS_URL,
            &[],
            json!([
                {"subjectCode": "CMPSC", "subjectTranslation": "Computer Science", "deptCode": "CMPSC", "inactive": false},
                {"subjectCode": "ANTH", "subjectTranslation": "Anthropology", "deptCode": "ANTH", "inactive": false}
            ]),
        );

        let snapshot = load_subjects(&backend);
        assert_eq!(snapshot.status, FetchStatus::Success);
        assert_eq!(
            snapshot.data,
            vec![
                DropdownOption::new("ANTH", "ANTH - Anthropology"),
                DropdownOption::new("CMPSC", "CMPSC - Computer Science"),
            ]
        );
    }

    #[test]
    fn test_missing_data_uses_defaults() {
        let backend = MemoryBackend::new();

        let info = load_system_info(&backend);
        assert_eq!(info.status, FetchStatus::Error);
        assert_eq!(info.data, None);
        assert!(info.error.is_some());

        let schedules = load_schedules(&backend);
        assert_eq!(schedules.status, FetchStatus::Error);
        assert!(schedules.data.is_empty());
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let backend = MemoryBackend::new().with(SCHEDULES_URL, &[], json!({"oops": true}));
        let schedules = load_schedules(&backend);
        assert_eq!(schedules.status, FetchStatus::Error);
        assert!(schedules.data.is_empty());
    }

    #[test]
    fn test_search_section_passes_query() {
        let backend = MemoryBackend::new().with(
            SECTION_SEARCH_URL,
            &[("qtr", "20221"), ("enrollCode", "06619")],
            json!({
                "quarter": "20221",
                "courseId": "CHEM    184  ",
                "title": "CHEM LITERATURE",
                "classSections": []
            }),
        );

        let found = search_section(&backend, "20221", "06619");
        assert_eq!(found.status, FetchStatus::Success);
        assert_eq!(found.data.map(|c| c.title), Some("CHEM LITERATURE".to_string()));

        let missing = search_section(&backend, "20222", "06619");
        assert_eq!(missing.status, FetchStatus::Error);
        assert_eq!(missing.data, None);
    }

    #[test]
    fn test_demo_data_set_loads() {
        let backend = FixtureBackend::new(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/data"));

        let info = load_system_info(&backend);
        assert_eq!(info.status, FetchStatus::Success);
        assert_eq!(
            info.data.and_then(|i| i.end_qtr_yyyyq),
            Some("20244".to_string())
        );

        let subjects = load_subjects(&backend);
        assert_eq!(subjects.data.first().map(|o| o.value.as_str()), Some("ANTH"));

        let schedules = load_schedules(&backend);
        assert_eq!(schedules.data.len(), 3);

        let course = search_section(&backend, "20221", "06619");
        assert_eq!(
            course.data.map(|c| c.page_title()),
            Some("Course Details for CHEM 184 W22!".to_string())
        );
    }
}
