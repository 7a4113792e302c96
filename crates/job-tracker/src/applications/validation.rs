use chrono::{Datelike, NaiveDate};

use super::domain::{ApplicationDraft, ApplicationForm, ApplicationStatus};

pub const COMPANY_NAME_MAX_CHARS: usize = 120;
pub const ROLE_MAX_CHARS: usize = 120;

/// Reasons a submitted form cannot be persisted. The messages are shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill all fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Invalid date format. Please use the date picker (YYYY-MM-DD).")]
    InvalidDate,
    #[error("Invalid status selected.")]
    InvalidStatus,
    #[error("{field} must be at most {max} characters.")]
    TooLong { field: &'static str, max: usize },
}

/// Parse a `YYYY-MM-DD` calendar date.
///
/// The year must be exactly four digits and at least 0001: stored dates are compared as
/// text, so signed or expanded years would sort out of order.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let mut parts = raw.split('-');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some()
        || !is_digits(year, 4..=4)
        || !is_digits(month, 1..=2)
        || !is_digits(day, 1..=2)
    {
        return None;
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .filter(|date| date.year() >= 1)
}

fn is_digits(part: &str, width: std::ops::RangeInclusive<usize>) -> bool {
    width.contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
}

impl ApplicationForm {
    /// Trim every field and check it against the record invariants.
    ///
    /// Missing fields are reported together, in form order, before the date, status, and
    /// length checks run.
    pub fn validate(&self) -> Result<ApplicationDraft, ValidationError> {
        let company_name = self.company_name.trim();
        let role = self.role.trim();
        let application_date = self.application_date.trim();
        let status = self.status.trim();
        let notes = self.notes.trim();

        let missing: Vec<&'static str> = [
            ("Company Name", company_name),
            ("Role", role),
            ("Application Date", application_date),
            ("Status", status),
            ("Notes", notes),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(label, _)| label)
        .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let application_date = parse_date(application_date).ok_or(ValidationError::InvalidDate)?;
        let status = status
            .parse::<ApplicationStatus>()
            .map_err(|_| ValidationError::InvalidStatus)?;

        check_length("Company Name", company_name, COMPANY_NAME_MAX_CHARS)?;
        check_length("Role", role, ROLE_MAX_CHARS)?;

        Ok(ApplicationDraft {
            company_name: company_name.to_string(),
            role: role.to_string(),
            application_date,
            status,
            notes: notes.to_string(),
        })
    }
}

fn check_length(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}
