use crate::utils::error::{LendingError, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

pub const PHONE_DIGITS: usize = 10;
pub const DATE_FORMAT: &str = "%d/%m/%Y";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern is valid")
});

static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("date pattern is valid"));

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Exactly ten ASCII digits, no formatting characters.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == PHONE_DIGITS && phone.chars().all(|c| c.is_ascii_digit())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// `DD/MM/YYYY` with zero-padded day and month. Calendar checks (month 13,
/// Feb 30) are whatever chrono enforces.
pub fn is_valid_date(date: &str) -> bool {
    parse_date(date).is_some()
}

pub fn parse_date(date: &str) -> Option<NaiveDate> {
    if !DATE_SHAPE.is_match(date) {
        return None;
    }
    NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
}

pub fn validate_phone(field_name: &str, phone: &str) -> Result<()> {
    if !is_valid_phone(phone) {
        return Err(LendingError::validation(
            field_name,
            phone,
            format!("must contain only digits and exactly {} of them", PHONE_DIGITS),
        ));
    }
    Ok(())
}

pub fn validate_email(field_name: &str, email: &str) -> Result<()> {
    if !is_valid_email(email) {
        return Err(LendingError::validation(
            field_name,
            email,
            "expected an address like name@domain.com",
        ));
    }
    Ok(())
}

pub fn validate_date(field_name: &str, date: &str) -> Result<()> {
    if !is_valid_date(date) {
        return Err(LendingError::validation(
            field_name,
            date,
            "expected a calendar date formatted DD/MM/YYYY",
        ));
    }
    Ok(())
}

pub fn validate_non_empty(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LendingError::validation(
            field_name,
            value,
            "value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

/// Record files are line based, so no stored value may span lines.
pub fn validate_single_line(field_name: &str, value: &str) -> Result<()> {
    if value.contains(['\n', '\r']) {
        return Err(LendingError::validation(
            field_name,
            value,
            "value cannot contain line breaks",
        ));
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(LendingError::validation(
            field_name,
            value.to_string(),
            "value must be a finite number greater than or equal to 0",
        ));
    }
    Ok(())
}

pub fn validate_positive_period(field_name: &str, months: u32) -> Result<()> {
    if months == 0 {
        return Err(LendingError::validation(
            field_name,
            months.to_string(),
            "period must be at least 1 month",
        ));
    }
    Ok(())
}

/// Loan numbers only live inside a record, so any single-line text works.
pub fn validate_loan_number(field_name: &str, loan_id: &str) -> Result<()> {
    validate_non_empty(field_name, loan_id)?;
    validate_single_line(field_name, loan_id)?;
    validate_untrimmed(field_name, loan_id)
}

/// Identifiers double as file names inside the records directory.
pub fn validate_identifier(field_name: &str, id: &str) -> Result<()> {
    validate_non_empty(field_name, id)?;
    validate_single_line(field_name, id)?;

    if id.contains(['/', '\\', '\0']) || id == "." || id == ".." {
        return Err(LendingError::validation(
            field_name,
            id,
            "identifier cannot contain path separators or NUL bytes",
        ));
    }
    validate_untrimmed(field_name, id)
}

fn validate_untrimmed(field_name: &str, value: &str) -> Result<()> {
    if value.trim() != value {
        return Err(LendingError::validation(
            field_name,
            value,
            "value cannot start or end with whitespace",
        ));
    }
    Ok(())
}
