use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned identifier for an application record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub i64);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an application currently stands. Any status may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    Interview,
    Rejected,
    Offer,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Interview,
        ApplicationStatus::Rejected,
        ApplicationStatus::Offer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Offer => "Offer",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when a status label is not one of the four tracked statuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    /// Labels match exactly; `applied` is not `Applied`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.label() == value)
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

/// Pseudo-status offered by the listing filter to show every record.
pub const STATUS_FILTER_ALL: &str = "All";

/// Options for the listing page's status dropdown.
pub fn status_filter_options() -> Vec<&'static str> {
    std::iter::once(STATUS_FILTER_ALL)
        .chain(ApplicationStatus::ALL.into_iter().map(ApplicationStatus::label))
        .collect()
}

/// Form fields exactly as submitted by the browser.
///
/// Absent fields deserialize to empty strings so validation can report them by name
/// instead of the extractor rejecting the request outright.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationForm {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub application_date: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub notes: String,
}

/// A validated form, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub company_name: String,
    pub role: String,
    pub application_date: NaiveDate,
    pub status: ApplicationStatus,
    pub notes: String,
}

/// A persisted application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub company_name: String,
    pub role: String,
    pub application_date: NaiveDate,
    pub status: ApplicationStatus,
    pub notes: String,
}

impl ApplicationRecord {
    pub fn from_draft(id: ApplicationId, draft: ApplicationDraft) -> Self {
        let ApplicationDraft {
            company_name,
            role,
            application_date,
            status,
            notes,
        } = draft;

        Self {
            id,
            company_name,
            role,
            application_date,
            status,
            notes,
        }
    }

    /// Prefill values for the edit form.
    pub fn to_form(&self) -> ApplicationForm {
        ApplicationForm {
            company_name: self.company_name.clone(),
            role: self.role.clone(),
            application_date: self.application_date.format("%Y-%m-%d").to_string(),
            status: self.status.label().to_string(),
            notes: self.notes.clone(),
        }
    }
}

/// Per-status record counts. The total is always derived from the four buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub applied: u64,
    pub interview: u64,
    pub rejected: u64,
    pub offer: u64,
}

impl StatusCounts {
    pub fn total(&self) -> u64 {
        self.applied + self.interview + self.rejected + self.offer
    }

    pub fn get(&self, status: ApplicationStatus) -> u64 {
        match status {
            ApplicationStatus::Applied => self.applied,
            ApplicationStatus::Interview => self.interview,
            ApplicationStatus::Rejected => self.rejected,
            ApplicationStatus::Offer => self.offer,
        }
    }

    pub fn add(&mut self, status: ApplicationStatus, count: u64) {
        let bucket = match status {
            ApplicationStatus::Applied => &mut self.applied,
            ApplicationStatus::Interview => &mut self.interview,
            ApplicationStatus::Rejected => &mut self.rejected,
            ApplicationStatus::Offer => &mut self.offer,
        };
        *bucket += count;
    }
}

impl<'a> FromIterator<&'a ApplicationRecord> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = &'a ApplicationRecord>>(records: I) -> Self {
        let mut counts = StatusCounts::default();
        for record in records {
            counts.add(record.status, 1);
        }
        counts
    }
}
