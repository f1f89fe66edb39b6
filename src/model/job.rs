//! Job requests and the local job log

use chrono::{DateTime, Local};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Entries kept in the job log
pub const JOB_LOG_LIMIT: usize = 100;

/// A request built by a job form on submit
///
/// Field names match the form inputs, which is what the job launcher expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "job", rename_all = "camelCase")]
pub enum JobRequest {
    #[serde(rename_all = "camelCase")]
    UpdateCoursesByQuarterRangeSingleSubject {
        subject: String,
        start_quarter: String,
        end_quarter: String,
    },
    #[serde(rename_all = "camelCase")]
    TestJob { fail: bool, sleep_ms: i64 },
    UploadGrades,
}

impl JobRequest {
    pub fn summary(&self) -> String {
        match self {
            JobRequest::UpdateCoursesByQuarterRangeSingleSubject {
                subject,
                start_quarter,
                end_quarter,
            } => format!(
                "Update courses for {} from {} to {}",
                subject, start_quarter, end_quarter
            ),
            JobRequest::TestJob { fail, sleep_ms } => {
                format!("Test job (fail={}, sleepMs={})", fail, sleep_ms)
            }
            JobRequest::UploadGrades => "Upload grades".to_string(),
        }
    }
}

/// One line of the job log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobLogEntry {
    pub timestamp: DateTime<Local>,
    pub summary: String,
    /// The request exactly as it was handed off
    pub payload: serde_json::Value,
}

impl JobLogEntry {
    pub fn new(summary: String, payload: serde_json::Value) -> Self {
        Self {
            timestamp: Local::now(),
            summary,
            payload,
        }
    }

    pub fn for_job(request: &JobRequest) -> Self {
        let payload = serde_json::to_value(request).unwrap_or(serde_json::Value::Null);
        Self::new(request.summary(), payload)
    }

    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct JobLogFile {
    entries: Vec<JobLogEntry>,
}

/// Persistence for the job log, newest entry first
pub struct JobLog;

impl JobLog {
    pub fn path(config_dir: &Path) -> PathBuf {
        config_dir.join("jobs.json")
    }

    pub fn load(config_dir: &Path) -> Vec<JobLogEntry> {
        let path = Self::path(config_dir);
        if !path.exists() {
            return Vec::new();
        }

        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                warn!("Could not read job log {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<JobLogFile>(&contents) {
            Ok(log) => log.entries,
            Err(e) => {
                warn!("Ignoring malformed job log {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    pub fn save(config_dir: &Path, entries: &[JobLogEntry]) -> Result<(), String> {
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let log = JobLogFile {
            entries: entries.to_vec(),
        };

        let json = serde_json::to_string_pretty(&log)
            .map_err(|e| format!("Failed to serialize job log: {}", e))?;

        fs::write(Self::path(config_dir), json)
            .map_err(|e| format!("Failed to write job log: {}", e))?;

        Ok(())
    }

    /// Insert at the front and drop anything past [`JOB_LOG_LIMIT`]
    pub fn record(entries: &mut Vec<JobLogEntry>, entry: JobLogEntry) {
        entries.insert(0, entry);
        entries.truncate(JOB_LOG_LIMIT);
    }
}
