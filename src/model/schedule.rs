//! Personal schedules as seen by the add-to-schedule workflow

use super::quarter::yyyyq_to_qyy;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Where a user goes to create a schedule
pub const CREATE_SCHEDULE_ROUTE: &str = "/personalschedules/create";

/// A server-owned personal schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub quarter: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Schedule ids arrive as numbers from the server and as strings from fixtures
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "invalid schedule id: {}",
            other
        ))),
    }
}

/// Schedules belonging to `quarter`, in server order
pub fn filter_for_quarter(schedules: &[ScheduleSummary], quarter: &str) -> Vec<ScheduleSummary> {
    schedules
        .iter()
        .filter(|s| s.quarter == quarter)
        .cloned()
        .collect()
}

/// Message shown when a quarter has no schedules
pub fn no_schedules_message(quarter: &str) -> String {
    let label = yyyyq_to_qyy(quarter).unwrap_or_else(|| quarter.to_string());
    format!("There are no personal schedules found for {}", label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(id: &str, quarter: &str) -> ScheduleSummary {
        ScheduleSummary {
            id: id.to_string(),
            quarter: quarter.to_string(),
            name: format!("Schedule {}", id),
            description: None,
        }
    }

    #[test]
    fn test_filter_for_quarter() {
        let all = vec![
            schedule("1", "20242"),
            schedule("2", "20241"),
            schedule("3", "20242"),
        ];
        let ids: Vec<String> = filter_for_quarter(&all, "20242")
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert!(filter_for_quarter(&all, "20244").is_empty());
    }

    #[test]
    fn test_no_schedules_message() {
        assert_eq!(
            no_schedules_message("20242"),
            "There are no personal schedules found for S24"
        );
        assert_eq!(
            no_schedules_message("bogus"),
            "There are no personal schedules found for bogus"
        );
    }

    #[test]
    fn test_ids_accept_numbers_and_strings() {
        let parsed: Vec<ScheduleSummary> = serde_json::from_str(
            r#"[
                {"id": 13, "quarter": "20221", "name": "Name 1", "description": "Description 1"},
                {"id": "schedule1", "quarter": "20242", "name": "Schedule 1"}
            ]"#,
        )
        .unwrap();
        assert_eq!(parsed[0].id, "13");
        assert_eq!(parsed[0].description.as_deref(), Some("Description 1"));
        assert_eq!(parsed[1].id, "schedule1");
        assert_eq!(parsed[1].description, None);
    }
}
