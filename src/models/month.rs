use chrono::Datelike;
use std::str::FromStr;

const MONTH_LABELS: [&str; 12] = [
    "JAN", "FEV", "MAR", "ABR", "MAI", "JUN", "JUL", "AGO", "SET", "OUT", "NOV", "DEZ",
];

/// Canonical identifier of a calendar month.
///
/// Field order makes the derived `Ord` calendar order, which also matches the
/// lexicographic order of the `"YYYY-MM"` form for four-digit years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month0: u32,
}

impl MonthKey {
    /// Build a key from a year and a zero-based month index. Indices outside
    /// `0..12` roll into the neighbouring years.
    pub const fn new(year: i32, month0: i32) -> Self {
        Self {
            year: year + month0.div_euclid(12),
            month0: month0.rem_euclid(12) as u32,
        }
    }

    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self::new(today.year(), today.month0() as i32)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month index (January is 0).
    pub fn month0(&self) -> u32 {
        self.month0
    }

    pub fn previous(&self) -> Self {
        if self.month0 == 0 {
            Self {
                year: self.year - 1,
                month0: 11,
            }
        } else {
            Self {
                year: self.year,
                month0: self.month0 - 1,
            }
        }
    }

    pub fn next(&self) -> Self {
        if self.month0 == 11 {
            Self {
                year: self.year + 1,
                month0: 0,
            }
        } else {
            Self {
                year: self.year,
                month0: self.month0 + 1,
            }
        }
    }

    /// Short human label, e.g. `MAR/2025`.
    pub fn label(&self) -> String {
        format!("{}/{}", MONTH_LABELS[self.month0() as usize], self.year)
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month0() + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid month '{0}'. Use YYYY-MM (e.g. 2024-01)")]
pub struct ParseMonthError(String);

impl FromStr for MonthKey {
    type Err = ParseMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || ParseMonthError(trimmed.to_string());
        let (year, month) = trimmed.split_once('-').ok_or_else(err)?;
        let year: i32 = year.parse().map_err(|_| err())?;
        let month: u32 = month.parse().map_err(|_| err())?;
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return Err(err());
        }
        Ok(Self {
            year,
            month0: month - 1,
        })
    }
}
