use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar quarter a record falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// Quarter for a zero-based month index
    pub fn from_month_index(month: usize) -> Self {
        if month < 3 {
            Quarter::Q1
        } else if month < 6 {
            Quarter::Q2
        } else if month < 9 {
            Quarter::Q3
        } else {
            Quarter::Q4
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Quarter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "Q1" => Ok(Quarter::Q1),
            "Q2" => Ok(Quarter::Q2),
            "Q3" => Ok(Quarter::Q3),
            "Q4" => Ok(Quarter::Q4),
            other => Err(format!("unknown quarter '{other}' (expected Q1..Q4)")),
        }
    }
}

/// Spanish three-letter month abbreviations, January first
const MONTHS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// Month assumed when the date has no second slash-separated token (October)
const DEFAULT_MONTH: usize = 9;

/// Zero-based month of a `dd/mmm/yyyy` date, `None` for an unknown abbreviation
fn month_index(date_text: &str) -> Option<usize> {
    let lower = date_text.to_lowercase();
    match lower.split('/').nth(1) {
        Some(abbrev) => MONTHS.iter().position(|m| *m == abbrev),
        None => Some(DEFAULT_MONTH),
    }
}

/// Classify a date such as `15/jun/2024` into its quarter.
///
/// Missing dates, dates without a month token and unknown month
/// abbreviations all land in Q4.
pub fn classify_quarter(date_text: &str) -> Quarter {
    if date_text.is_empty() {
        return Quarter::Q4;
    }

    match month_index(date_text) {
        Some(month) => Quarter::from_month_index(month),
        None => Quarter::Q4,
    }
}
