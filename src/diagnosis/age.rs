//! Chronological age at evaluation.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Age in completed years and months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Age {
    /// Completed years
    pub years: u32,
    /// Completed months past the last birthday (0-11)
    pub months: u32,
}

impl Age {
    /// Completed years and months from `birth` to `evaluation`.
    ///
    /// A month counts once its day of the month has been reached. An
    /// evaluation date before the birth date gives zero.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use teprosif::diagnosis::Age;
    ///
    /// let birth = NaiveDate::from_ymd_opt(2020, 5, 20).unwrap();
    /// let eval = NaiveDate::from_ymd_opt(2024, 7, 10).unwrap();
    /// assert_eq!(Age::between(birth, eval), Age { years: 4, months: 1 });
    /// ```
    pub fn between(birth: NaiveDate, evaluation: NaiveDate) -> Age {
        let mut months = (evaluation.year() - birth.year()) * 12
            + evaluation.month() as i32
            - birth.month() as i32;
        if evaluation.day() < birth.day() {
            months -= 1;
        }
        let months = u32::try_from(months).unwrap_or(0);
        Age {
            years: months / 12,
            months: months % 12,
        }
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} años, {} meses", self.years, self.months)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_whole_years() {
        assert_eq!(
            Age::between(date(2019, 3, 1), date(2024, 3, 1)),
            Age { years: 5, months: 0 }
        );
    }

    #[test]
    fn test_day_not_reached() {
        assert_eq!(
            Age::between(date(2019, 3, 15), date(2024, 3, 14)),
            Age { years: 4, months: 11 }
        );
        assert_eq!(
            Age::between(date(2019, 3, 15), date(2024, 6, 14)),
            Age { years: 5, months: 2 }
        );
    }

    #[test]
    fn test_month_wraps() {
        assert_eq!(
            Age::between(date(2019, 11, 1), date(2024, 2, 1)),
            Age { years: 4, months: 3 }
        );
    }

    #[test]
    fn test_future_birth_is_zero() {
        assert_eq!(
            Age::between(date(2025, 1, 1), date(2024, 1, 1)),
            Age { years: 0, months: 0 }
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Age { years: 4, months: 7 }.to_string(), "4 años, 7 meses");
    }
}
