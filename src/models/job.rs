//! Job board records.
//!
//! These are the shapes the job source hands back: jobs, the companies that
//! post them, and the on-disk catalog both are loaded from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::formatting::format_age_days;

fn default_open() -> bool {
    true
}

/// A job posting
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Job {
    pub id: String,

    pub title: String,

    pub company_id: String,

    pub location: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub requirements: String,

    #[serde(default = "default_open", rename = "isOpen", alias = "is_open")]
    pub is_open: bool,

    /// Whether the signed-in user has saved this job
    #[serde(default)]
    pub saved: bool,

    #[serde(default, alias = "created_at")]
    pub posted_at: Option<DateTime<Utc>>,
}

impl Job {
    /// First line of the description, used as a card summary
    #[must_use]
    pub fn summary(&self) -> &str {
        self.description.lines().next().unwrap_or_default().trim()
    }

    /// "posted 3 days ago" style label, or "-" when the post date is unknown
    #[must_use]
    pub fn posted_display(&self, now: DateTime<Utc>) -> String {
        match self.posted_at {
            Some(at) => format_age_days(now.signed_duration_since(at).num_days()),
            None => "-".to_string(),
        }
    }
}

/// A hiring company
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Company {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Catalog file: every company and job the board knows about
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Catalog {
    pub companies: Vec<Company>,
    pub jobs: Vec<Job>,
}

impl Catalog {
    /// Look up a company name by id
    #[must_use]
    pub fn company_name<'a>(companies: &'a [Company], id: &str) -> Option<&'a str> {
        companies
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_job_deserialize_defaults() {
        let json = r#"{"id":"7","title":"Rust Engineer","company_id":"c1","location":"Goa"}"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert!(job.is_open);
        assert!(!job.saved);
        assert!(job.posted_at.is_none());
        assert_eq!(job.summary(), "");
    }

    #[test]
    fn test_job_deserialize_camel_case_fields() {
        let json = r#"{
            "id": "7",
            "title": "Rust Engineer",
            "company_id": "c1",
            "location": "Goa",
            "isOpen": false,
            "created_at": "2024-05-01T10:00:00Z"
        }"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert!(!job.is_open);
        assert!(job.posted_at.is_some());
    }

    #[test]
    fn test_summary_takes_first_line() {
        let job = Job {
            id: "1".to_string(),
            title: "t".to_string(),
            company_id: "c".to_string(),
            location: "l".to_string(),
            description: "  Build things.  \nSecond line".to_string(),
            requirements: String::new(),
            is_open: true,
            saved: false,
            posted_at: None,
        };
        assert_eq!(job.summary(), "Build things.");
    }

    #[test]
    fn test_posted_display() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let mut job: Job = serde_json::from_str(
            r#"{"id":"1","title":"t","company_id":"c","location":"l"}"#,
        )
        .unwrap();
        assert_eq!(job.posted_display(now), "-");

        job.posted_at = Some(Utc.with_ymd_and_hms(2024, 5, 7, 12, 0, 0).unwrap());
        assert_eq!(job.posted_display(now), "posted 3 days ago");
    }

    #[test]
    fn test_company_name_lookup() {
        let companies = vec![
            Company { id: "a".to_string(), name: "Acme".to_string(), logo_url: None },
            Company { id: "b".to_string(), name: "Globex".to_string(), logo_url: None },
        ];
        assert_eq!(Catalog::company_name(&companies, "b"), Some("Globex"));
        assert_eq!(Catalog::company_name(&companies, "z"), None);
    }
}
