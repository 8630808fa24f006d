//! Course catalogue statistics from `GET /courses`.

use serde::{Deserialize, Serialize};

/// Catalogue summary shown in the sidebar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseStats {
    /// Number of indexed courses.
    pub total_courses: u64,
    /// Course titles, in backend order.
    #[serde(default)]
    pub course_titles: Vec<String>,
}

/// Load state of the course statistics panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CourseStatsState {
    /// Request not finished yet.
    #[default]
    Loading,
    /// Statistics arrived.
    Loaded(CourseStats),
    /// Request failed; the panel shows zero and an error line.
    Failed,
}

impl CourseStatsState {
    /// Course count to display (zero while loading or after failure).
    pub fn total(&self) -> u64 {
        match self {
            CourseStatsState::Loaded(stats) => stats.total_courses,
            CourseStatsState::Loading | CourseStatsState::Failed => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_payload() {
        let stats: CourseStats =
            serde_json::from_str(r#"{"total_courses":2,"course_titles":["A","B"]}"#).unwrap();
        assert_eq!(stats.total_courses, 2);
        assert_eq!(stats.course_titles, vec!["A", "B"]);
    }

    #[test]
    fn missing_titles_default_to_empty() {
        let stats: CourseStats = serde_json::from_str(r#"{"total_courses":0}"#).unwrap();
        assert!(stats.course_titles.is_empty());
    }

    #[test]
    fn failed_state_reports_zero() {
        assert_eq!(CourseStatsState::Failed.total(), 0);
        assert_eq!(CourseStatsState::Loading.total(), 0);
    }
}
