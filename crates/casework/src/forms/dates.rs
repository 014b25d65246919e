use chrono::NaiveDate;
use serde_json::{Map, Value};

use super::domain::PageInput;

/// Day/month/year inputs captured verbatim from the form.
///
/// Construction never rejects bad input; the raw strings survive so the
/// page can be redisplayed with errors alongside the user's typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParts {
    pub day: String,
    pub month: String,
    pub year: String,
}

impl DateParts {
    /// Reads `{field}-day`, `{field}-month`, and `{field}-year` from the
    /// body. Returns `None` only when all three are absent or blank.
    pub fn from_input(input: &PageInput, field: &str) -> Option<Self> {
        let part = |suffix: &str| {
            input
                .text(&format!("{field}-{suffix}"))
                .unwrap_or_default()
        };
        let parts = Self {
            day: part("day"),
            month: part("month"),
            year: part("year"),
        };
        if parts.day.is_empty() && parts.month.is_empty() && parts.year.is_empty() {
            None
        } else {
            Some(parts)
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.day.is_empty() && !self.month.is_empty() && !self.year.is_empty()
    }

    /// The calendar date the parts describe, if they describe one.
    pub fn to_date(&self) -> Option<NaiveDate> {
        let year: i32 = self.year.parse().ok()?;
        let month: u32 = self.month.parse().ok()?;
        let day: u32 = self.day.parse().ok()?;
        if year < 1000 {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day)
    }

    pub fn iso(&self) -> Option<String> {
        self.to_date().map(|date| date.format("%Y-%m-%d").to_string())
    }

    /// Writes the raw parts plus the combined ISO value (when valid) into
    /// a page answer under the given field name.
    pub fn write_answer(&self, field: &str, out: &mut Map<String, Value>) {
        out.insert(format!("{field}-day"), Value::String(self.day.clone()));
        out.insert(format!("{field}-month"), Value::String(self.month.clone()));
        out.insert(format!("{field}-year"), Value::String(self.year.clone()));
        if let Some(iso) = self.iso() {
            out.insert(field.to_string(), Value::String(iso));
        }
    }
}

/// Validation message for a required date field, or `None` when the
/// parts form a real calendar date.
pub fn date_field_error(parts: Option<&DateParts>, label: &str) -> Option<String> {
    match parts {
        None => Some(format!("You must specify the {label}")),
        Some(parts) if parts.to_date().is_none() => {
            Some(format!("The {label} is an invalid date"))
        }
        Some(_) => None,
    }
}

/// Display form used on summary rows, e.g. `4 March 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::domain::PageInput;
    use serde_json::json;

    fn input_with(day: &str, month: &str, year: &str) -> PageInput {
        PageInput::from_value(&json!({
            "hearingDate-day": day,
            "hearingDate-month": month,
            "hearingDate-year": year,
        }))
    }

    #[test]
    fn assembles_iso_date_from_parts() {
        let input = input_with("4", "3", "2024");
        let parts = DateParts::from_input(&input, "hearingDate").expect("parts present");
        assert_eq!(parts.iso().as_deref(), Some("2024-03-04"));
        assert_eq!(date_field_error(Some(&parts), "hearing date"), None);
    }

    #[test]
    fn blank_parts_collapse_to_none() {
        let input = input_with("", " ", "");
        assert!(DateParts::from_input(&input, "hearingDate").is_none());
        assert_eq!(
            date_field_error(None, "hearing date"),
            Some("You must specify the hearing date".to_string())
        );
    }

    #[test]
    fn out_of_range_parts_are_invalid() {
        let input = input_with("99", "99", "99");
        let parts = DateParts::from_input(&input, "hearingDate").expect("parts present");
        assert!(parts.to_date().is_none());
        assert_eq!(
            date_field_error(Some(&parts), "hearing date"),
            Some("The hearing date is an invalid date".to_string())
        );
    }

    #[test]
    fn partial_parts_are_invalid_not_missing() {
        let input = input_with("12", "", "2024");
        let parts = DateParts::from_input(&input, "hearingDate").expect("parts present");
        assert!(!parts.is_complete());
        assert_eq!(
            date_field_error(Some(&parts), "hearing date"),
            Some("The hearing date is an invalid date".to_string())
        );
    }

    #[test]
    fn display_format_drops_zero_padding() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date");
        assert_eq!(format_date(date), "4 March 2024");
    }

    #[test]
    fn answer_includes_parts_and_combined_value() {
        let input = input_with("4", "3", "2024");
        let parts = DateParts::from_input(&input, "hearingDate").expect("parts present");
        let mut out = serde_json::Map::new();
        parts.write_answer("hearingDate", &mut out);
        assert_eq!(out.get("hearingDate"), Some(&json!("2024-03-04")));
        assert_eq!(out.get("hearingDate-day"), Some(&json!("4")));
    }
}
