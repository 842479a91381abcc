use serde::{Serialize, Serializer};
use std::fmt;

use super::delimited::RawRow;
use super::duration::{parse_duration, FALLBACK_HOURS};
use super::quarter::{classify_quarter, Quarter};

pub const UNKNOWN: &str = "Unknown";
pub const DEFAULT_DURATION_TEXT: &str = "0h";

/// Workflow status of a record. Matching is exact and case-sensitive;
/// anything else is kept verbatim and left out of the status counts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    Done,
    Wip,
    #[default]
    Todo,
    Other(String),
}

impl Status {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "Done" => Status::Done,
            "WIP" => Status::Wip,
            "Todo" => Status::Todo,
            other => Status::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Status::Done => "Done",
            Status::Wip => "WIP",
            Status::Todo => "Todo",
            Status::Other(s) => s,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Kind of work: a new project or an improvement to an existing one.
/// Every non-`Nuevo` value is counted with the improvements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorkType {
    Nuevo,
    #[default]
    Mejora,
    Other(String),
}

impl WorkType {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "Nuevo" => WorkType::Nuevo,
            "Mejora" => WorkType::Mejora,
            other => WorkType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            WorkType::Nuevo => "Nuevo",
            WorkType::Mejora => "Mejora",
            WorkType::Other(s) => s,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, WorkType::Nuevo)
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for WorkType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Normalized project record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: usize,
    pub name: String,
    pub team: String,
    pub status: Status,
    #[serde(rename = "type")]
    pub work_type: WorkType,
    pub duration_text: String,
    pub date_text: String,
    pub hours: u32,
    pub quarter: Quarter,
}

/// Field lookup that treats empty values as missing
fn field<'a>(row: &'a RawRow, key: &str) -> Option<&'a str> {
    row.get(key)
        .or_else(|| row.get(&key.to_uppercase()))
        .filter(|v| !v.is_empty())
}

fn project_row(id: usize, row: &RawRow) -> Record {
    let duration = field(row, "duration");
    let date = field(row, "date");

    // A record never carries zero effort, even without a duration column
    let hours = match duration {
        Some(text) => parse_duration(text),
        None => FALLBACK_HOURS,
    };

    Record {
        id,
        name: field(row, "name").unwrap_or(UNKNOWN).to_string(),
        team: field(row, "team").unwrap_or(UNKNOWN).to_string(),
        status: field(row, "status").map(Status::from_raw).unwrap_or_default(),
        work_type: field(row, "type").map(WorkType::from_raw).unwrap_or_default(),
        duration_text: duration.unwrap_or(DEFAULT_DURATION_TEXT).to_string(),
        date_text: date.unwrap_or_default().to_string(),
        hours,
        quarter: classify_quarter(date.unwrap_or_default()),
    }
}

/// Project raw rows into records. Every row yields exactly one record and
/// `id` is the position in the output.
pub fn project_records(rows: &[RawRow]) -> Vec<Record> {
    rows.iter()
        .enumerate()
        .map(|(id, row)| project_row(id, row))
        .collect()
}
