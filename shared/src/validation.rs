use crate::models::CalendarDate;

pub const MIN_MONTH: u8 = 1;
pub const MAX_MONTH: u8 = 12;
pub const MIN_DAY: u8 = 1;
pub const MAX_DAY: u8 = 31;
pub const MAX_FEBRUARY_DAY: u8 = 29;
pub const MAX_SHORT_MONTH_DAY: u8 = 30;
pub const MAX_DAY_NAME_LENGTH: usize = 100;

/// Months capped at 30 days. February is handled separately.
pub const SHORT_MONTHS: [u8; 4] = [4, 6, 9, 11];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Not a number: {0}")]
    NotANumber(String),
    #[error("Invalid month: {0} (must be {MIN_MONTH}-{MAX_MONTH})")]
    InvalidMonth(i64),
    #[error("Invalid day: {month}/{day}")]
    InvalidDay { month: u8, day: i64 },
    #[error("Empty day name")]
    EmptyDayName,
    #[error("Day name exceeds maximum length of {MAX_DAY_NAME_LENGTH}")]
    DayNameTooLong,
}

pub fn validate_date(month: i64, day: i64) -> Result<CalendarDate, ValidationError> {
    if month < MIN_MONTH as i64 || month > MAX_MONTH as i64 {
        return Err(ValidationError::InvalidMonth(month));
    }
    let month = month as u8;

    let max_day = match month {
        2 => MAX_FEBRUARY_DAY,
        m if SHORT_MONTHS.contains(&m) => MAX_SHORT_MONTH_DAY,
        _ => MAX_DAY,
    };
    if day < MIN_DAY as i64 || day > max_day as i64 {
        return Err(ValidationError::InvalidDay { month, day });
    }

    Ok(CalendarDate { month, day: day as u8 })
}

/// Parses raw form values. Absent and empty fields are both missing.
pub fn parse_date(month: Option<&str>, day: Option<&str>) -> Result<CalendarDate, ValidationError> {
    let month = parse_number(month, "month")?;
    let day = parse_number(day, "day")?;
    validate_date(month, day)
}

fn parse_number(raw: Option<&str>, field: &'static str) -> Result<i64, ValidationError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())
        .ok_or(ValidationError::MissingField(field))?;
    raw.parse().map_err(|_| ValidationError::NotANumber(raw.to_string()))
}

pub fn validate_day_name(raw: Option<&str>) -> Result<String, ValidationError> {
    let name = raw.map(str::trim).unwrap_or_default();
    if name.is_empty() { return Err(ValidationError::EmptyDayName); }
    if name.chars().count() > MAX_DAY_NAME_LENGTH { return Err(ValidationError::DayNameTooLong); }
    Ok(name.to_string())
}
