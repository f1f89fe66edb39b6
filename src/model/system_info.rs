//! Server-provided system configuration

use serde::{Deserialize, Serialize};

/// First quarter offered when the server does not say otherwise
pub const DEFAULT_START_QTR: &str = "20211";
/// Last quarter offered when the server does not say otherwise
pub const DEFAULT_END_QTR: &str = "20214";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SystemInfo {
    #[serde(rename = "startQtrYYYYQ", default)]
    pub start_qtr_yyyyq: Option<String>,
    #[serde(rename = "endQtrYYYYQ", default)]
    pub end_qtr_yyyyq: Option<String>,
    #[serde(rename = "sourceRepo", default)]
    pub source_repo: Option<String>,
}

/// Quarter range to offer in selection controls
///
/// Missing or empty values fall back to [`DEFAULT_START_QTR`] and
/// [`DEFAULT_END_QTR`] independently.
pub fn quarter_bounds(info: Option<&SystemInfo>) -> (String, String) {
    let pick = |value: Option<&String>, fallback: &str| {
        value
            .filter(|v| !v.is_empty())
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    };

    (
        pick(info.and_then(|i| i.start_qtr_yyyyq.as_ref()), DEFAULT_START_QTR),
        pick(info.and_then(|i| i.end_qtr_yyyyq.as_ref()), DEFAULT_END_QTR),
    )
}
