//! Date-aware axes.
//!
//! Dates are plotted as days since 1970-01-01 (fractional for times of day).
//! A [`DateForm`] uses the compact terminal-plotting notation, e.g.
//! `"Y-m-d"` or `"d/m/Y H:M"`, where the letters `d m Y y H M S` stand for
//! the usual date fields and every other character is literal.

use crate::error::{Error, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};

const SECONDS_PER_DAY: f64 = 86_400.0;

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("1970-01-01 is a valid date")
}

/// Date format used to parse date strings and label date ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateForm {
    form: String,
    chrono_fmt: String,
}

impl Default for DateForm {
    fn default() -> Self {
        Self::new("d/m/Y")
    }
}

impl DateForm {
    /// Build a date form from compact notation.
    #[must_use]
    pub fn new(form: &str) -> Self {
        let mut chrono_fmt = String::with_capacity(form.len() * 2);
        for ch in form.chars() {
            match ch {
                'd' | 'm' | 'Y' | 'y' | 'H' | 'M' | 'S' => {
                    chrono_fmt.push('%');
                    chrono_fmt.push(ch);
                }
                '%' => chrono_fmt.push_str("%%"),
                other => chrono_fmt.push(other),
            }
        }
        Self { form: form.to_string(), chrono_fmt }
    }

    /// Compact notation this form was built from.
    #[must_use]
    pub fn form(&self) -> &str {
        &self.form
    }

    /// Equivalent chrono format string.
    #[must_use]
    pub fn chrono_format(&self) -> &str {
        &self.chrono_fmt
    }

    /// Parse a date string into days since the epoch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DateParse`] if the string does not match the form.
    pub fn parse(&self, input: &str) -> Result<f32> {
        let datetime = match NaiveDateTime::parse_from_str(input, &self.chrono_fmt) {
            Ok(dt) => dt,
            Err(_) => NaiveDate::parse_from_str(input, &self.chrono_fmt)
                .map_err(|e| Error::DateParse { input: input.to_string(), message: e.to_string() })?
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| Error::DateParse {
                    input: input.to_string(),
                    message: "midnight out of range".to_string(),
                })?,
        };

        let seconds = datetime.signed_duration_since(epoch()).num_seconds();
        Ok((seconds as f64 / SECONDS_PER_DAY) as f32)
    }

    /// Parse several date strings.
    ///
    /// # Errors
    ///
    /// Fails on the first string that does not match.
    pub fn parse_all<S: AsRef<str>>(&self, inputs: &[S]) -> Result<Vec<f32>> {
        inputs.iter().map(|s| self.parse(s.as_ref())).collect()
    }

    /// Format days since the epoch with this form.
    #[must_use]
    pub fn format(&self, days: f32) -> String {
        let seconds = (f64::from(days) * SECONDS_PER_DAY).round() as i64;
        epoch()
            .checked_add_signed(Duration::seconds(seconds))
            .map(|dt| dt.format(&self.chrono_fmt).to_string())
            .unwrap_or_else(|| format!("{days:.0}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_to_chrono() {
        assert_eq!(DateForm::new("Y-m-d").chrono_format(), "%Y-%m-%d");
        assert_eq!(DateForm::new("d/m/Y H:M").chrono_format(), "%d/%m/%Y %H:%M");
    }

    #[test]
    fn test_parse_epoch_and_known_day() {
        let form = DateForm::new("Y-m-d");
        assert_eq!(form.parse("1970-01-01").unwrap(), 0.0);
        assert_eq!(form.parse("2024-01-01").unwrap(), 19_723.0);
    }

    #[test]
    fn test_parse_with_time() {
        let form = DateForm::new("Y-m-d H:M");
        let days = form.parse("1970-01-02 12:00").unwrap();
        assert!((days - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_parse_mismatch() {
        let form = DateForm::new("Y-m-d");
        let err = form.parse("01/02/2024").unwrap_err();
        assert!(matches!(err, Error::DateParse { input, .. } if input == "01/02/2024"));
    }

    #[test]
    fn test_format_round_trip_label() {
        let form = DateForm::new("Y-m-d");
        let days = form.parse("2024-03-31").unwrap();
        assert_eq!(form.format(days), "2024-03-31");
    }

    #[test]
    fn test_parse_all() {
        let form = DateForm::default();
        let days = form.parse_all(&["01/01/1970", "03/01/1970"]).unwrap();
        assert_eq!(days, vec![0.0, 2.0]);
    }
}
