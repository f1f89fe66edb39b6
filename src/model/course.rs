//! Course and section records returned by the section search
//!
//! Only the fields the details page shows are modelled; everything else in
//! the payload is ignored on deserialization.

use super::quarter::yyyyq_to_qyy;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Column headers of the section table, in display order
pub const SECTION_HEADERS: [&str; 8] = [
    "Enroll Code",
    "Section",
    "Title",
    "Enrolled",
    "Location",
    "Days",
    "Time",
    "Instructor",
];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub quarter: String,
    pub course_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub units_fixed: Option<f64>,
    #[serde(default)]
    pub instruction_type: Option<String>,
    #[serde(default)]
    pub class_sections: Vec<ClassSection>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSection {
    pub enroll_code: String,
    pub section: String,
    #[serde(default)]
    pub enrolled_total: Option<u32>,
    #[serde(default)]
    pub max_enroll: Option<u32>,
    #[serde(default)]
    pub time_locations: Vec<TimeLocation>,
    #[serde(default)]
    pub instructors: Vec<Instructor>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeLocation {
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub building: Option<String>,
    #[serde(default)]
    pub days: Option<String>,
    #[serde(default)]
    pub begin_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    pub instructor: String,
    #[serde(default)]
    pub function_code: Option<String>,
}

/// `"CHEM    184  "` becomes `"CHEM 184"`
pub fn format_course_id(course_id: &str) -> String {
    course_id.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `"14:00"` becomes `"2:00 PM"`; unparseable input is returned trimmed
pub fn format_time(time: &str) -> String {
    match NaiveTime::parse_from_str(time.trim(), "%H:%M") {
        Ok(t) => t.format("%-I:%M %p").to_string(),
        Err(_) => time.trim().to_string(),
    }
}

impl Course {
    pub fn page_title(&self) -> String {
        let quarter = yyyyq_to_qyy(&self.quarter).unwrap_or_else(|| self.quarter.clone());
        format!(
            "Course Details for {} {}!",
            format_course_id(&self.course_id),
            quarter
        )
    }
}

impl ClassSection {
    pub fn enrolled(&self) -> String {
        match (self.enrolled_total, self.max_enroll) {
            (Some(total), Some(max)) => format!("{}/{}", total, max),
            (Some(total), None) => total.to_string(),
            _ => "N/A".to_string(),
        }
    }

    pub fn location(&self) -> String {
        self.time_locations
            .iter()
            .map(TimeLocation::location)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn days(&self) -> String {
        self.time_locations
            .iter()
            .map(TimeLocation::days)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn time(&self) -> String {
        self.time_locations
            .iter()
            .map(TimeLocation::time_range)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn instructor_names(&self) -> String {
        self.instructors
            .iter()
            .map(|i| i.instructor.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Cells of one section-table row, aligned with [`SECTION_HEADERS`]
    pub fn row(&self, course: &Course) -> [String; 8] {
        [
            self.enroll_code.clone(),
            self.section.clone(),
            course.title.clone(),
            self.enrolled(),
            self.location(),
            self.days(),
            self.time(),
            self.instructor_names(),
        ]
    }
}

impl TimeLocation {
    pub fn location(&self) -> String {
        let building = self.building.as_deref().unwrap_or("").trim();
        let room = self.room.as_deref().unwrap_or("").trim();
        format!("{} {}", building, room).trim().to_string()
    }

    pub fn days(&self) -> String {
        self.days.as_deref().unwrap_or("").trim().to_string()
    }

    pub fn time_range(&self) -> String {
        match (self.begin_time.as_deref(), self.end_time.as_deref()) {
            (Some(begin), Some(end)) => format!("{} - {}", format_time(begin), format_time(end)),
            _ => "TBA".to_string(),
        }
    }
}
