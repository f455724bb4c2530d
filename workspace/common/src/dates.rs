//! Date field parsing and day-delta arithmetic.
//!
//! A date field is considered filled as soon as it holds any text. Text that
//! does not parse still counts as filled and turns into an invalid value, and
//! any delta involving an invalid value is `NaN`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Milliseconds in one day.
pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parsed value of a single date input.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    /// The field holds the empty string.
    Empty,
    /// The field holds a date (and optionally a time), taken as UTC.
    Valid(NaiveDateTime),
    /// The field holds text that is not a date.
    Invalid(String),
}

impl DateInput {
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::Empty;
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Self::Valid(date.and_time(NaiveTime::MIN));
        }

        for format in DATETIME_FORMATS {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
                return Self::Valid(datetime);
            }
        }

        if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
            return Self::Valid(datetime.naive_utc());
        }

        tracing::debug!("Date input {:?} did not parse", raw);
        Self::Invalid(raw.to_string())
    }

    /// True unless the field was left empty. Invalid text counts as present.
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Empty)
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Valid(datetime) => Some(*datetime),
            _ => None,
        }
    }
}

/// Fractional days from `earlier` to `later`. Negative when `later` comes
/// first, `NaN` when either side is not a valid date.
pub fn day_delta(earlier: &DateInput, later: &DateInput) -> f64 {
    match (earlier.as_datetime(), later.as_datetime()) {
        (Some(start), Some(end)) => {
            let millis = end.signed_duration_since(start).num_milliseconds();
            millis as f64 / MILLIS_PER_DAY
        }
        _ => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_input_value() {
        let parsed = DateInput::parse("2024-01-01");
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parsed, DateInput::Valid(expected));
        assert!(parsed.is_present());
    }

    #[test]
    fn test_parse_empty_and_invalid() {
        assert_eq!(DateInput::parse(""), DateInput::Empty);
        assert!(!DateInput::parse("").is_present());

        let invalid = DateInput::parse("31/12/2024");
        assert_eq!(invalid, DateInput::Invalid("31/12/2024".to_string()));
        assert!(invalid.is_present());

        // Whitespace is text, not an empty field.
        assert!(DateInput::parse(" ").is_present());
    }

    #[test]
    fn test_parse_datetime_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        assert_eq!(DateInput::parse("2024-03-10T12:30"), DateInput::Valid(expected));
        assert_eq!(DateInput::parse("2024-03-10T12:30:00"), DateInput::Valid(expected));
        assert_eq!(
            DateInput::parse("2024-03-10T15:30:00+03:00"),
            DateInput::Valid(expected)
        );
    }

    #[test]
    fn test_day_delta_whole_days() {
        let symptom = DateInput::parse("2024-01-01");
        let notification = DateInput::parse("2024-01-05");
        assert_eq!(day_delta(&symptom, &notification), 4.0);
        assert_eq!(day_delta(&notification, &symptom), -4.0);
    }

    #[test]
    fn test_day_delta_across_leap_day() {
        let start = DateInput::parse("2024-02-28");
        let end = DateInput::parse("2024-03-01");
        assert_eq!(day_delta(&start, &end), 2.0);
    }

    #[test]
    fn test_day_delta_keeps_fractions() {
        let start = DateInput::parse("2024-01-01T00:00");
        let end = DateInput::parse("2024-01-02T12:00");
        assert_eq!(day_delta(&start, &end), 1.5);
    }

    #[test]
    fn test_day_delta_nan_for_unusable_input() {
        let valid = DateInput::parse("2024-01-01");
        assert!(day_delta(&DateInput::parse("garbage"), &valid).is_nan());
        assert!(day_delta(&valid, &DateInput::Empty).is_nan());
    }
}
