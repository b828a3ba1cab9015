//! Calendar labels for projection periods.
//!
//! Labels take the compact `Mon'YY` form (`Jan'26`, `Feb'26`, ...). The anchor
//! is held as a `jiff::civil::Date` on the first of the start month; period
//! labels are computed with direct month arithmetic so arbitrarily long
//! horizons never leave jiff's supported date range.

use std::fmt;

use jiff::civil::Date;

use crate::error::ValidationError;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Maps a zero-based period index to a month label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodLabeler {
    anchor: Date,
}

impl PeriodLabeler {
    /// Anchor labels at the month containing `date`
    #[must_use]
    pub fn from_date(date: Date) -> Self {
        Self {
            anchor: date.first_of_month(),
        }
    }

    /// Parse an anchor such as `Jan'26`, `jan '26` or `Jan 2026`.
    ///
    /// Two-digit years are read as `20YY`.
    pub fn parse(label: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidStartLabel(label.to_string());

        let trimmed = label.trim();
        let month_end = trimmed
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(trimmed.len());
        let (month_name, rest) = trimmed.split_at(month_end);
        let month = month_number(month_name).ok_or_else(invalid)?;

        let rest = rest.trim_start();
        let year = match rest.strip_prefix('\'') {
            Some(short) if short.len() == 2 => 2000 + parse_digits(short).ok_or_else(invalid)?,
            Some(_) => return Err(invalid()),
            None if rest.len() == 4 => parse_digits(rest).ok_or_else(invalid)?,
            None => return Err(invalid()),
        };

        let anchor = Date::new(year, month, 1).map_err(|_| invalid())?;
        Ok(Self { anchor })
    }

    /// First day of the anchor month
    pub fn anchor(&self) -> Date {
        self.anchor
    }

    /// Label for the period `index` months after the anchor
    pub fn label(&self, index: u32) -> String {
        let months_since_year_zero =
            i64::from(self.anchor.year()) * 12 + i64::from(self.anchor.month() - 1) + i64::from(index);
        let year = months_since_year_zero.div_euclid(12);
        let month = months_since_year_zero.rem_euclid(12) as usize;
        format!("{}'{:02}", MONTHS[month], year.rem_euclid(100))
    }
}

impl fmt::Display for PeriodLabeler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label(0))
    }
}

fn month_number(name: &str) -> Option<i8> {
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .map(|i| i as i8 + 1)
}

fn parse_digits(digits: &str) -> Option<i16> {
    if digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    }
}
