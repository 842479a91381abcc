use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::dataset::Quarter;

/// Fixed category list, in navigation and chart order
pub const TEAMS: [&str; 7] = [
    "Martechs & Ads",
    "Onboarding",
    "Fulfillment",
    "Quick Commerce",
    "Plus & Pricing",
    "Payments",
    "Food",
];

pub const OVERVIEW_NAME: &str = "Vista General";
pub const DATABASE_NAME: &str = "Base de Datos";

/// Compact label used on chart axes
pub fn short_name(team: &str) -> &str {
    match team {
        "Martechs & Ads" => "Martech",
        "Quick Commerce" => "QC",
        "Plus & Pricing" => "Plus",
        other => other,
    }
}

/// Active page: the all-categories overview, one category, or the record table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Overview,
    Team(&'static str),
    Database,
}

impl Selection {
    /// Navigation order: overview, the seven categories, then the table
    pub fn nav_items() -> Vec<Selection> {
        let mut items = Vec::with_capacity(TEAMS.len() + 2);
        items.push(Selection::Overview);
        items.extend(TEAMS.iter().copied().map(Selection::Team));
        items.push(Selection::Database);
        items
    }

    /// Resolve a page by name. Category names are matched case-insensitively
    /// but always resolve to the canonical spelling used for filtering.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim().to_lowercase();
        match wanted.as_str() {
            "vista general" | "overview" | "all" => return Some(Selection::Overview),
            "base de datos" | "database" | "db" => return Some(Selection::Database),
            _ => {}
        }
        TEAMS
            .iter()
            .copied()
            .find(|t| t.to_lowercase() == wanted)
            .map(Selection::Team)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Selection::Overview => OVERVIEW_NAME,
            Selection::Team(team) => *team,
            Selection::Database => DATABASE_NAME,
        }
    }

    /// Team filter implied by this page, if any
    pub fn team(&self) -> Option<&'static str> {
        match self {
            Selection::Team(team) => Some(*team),
            _ => None,
        }
    }

    pub fn is_overview(&self) -> bool {
        matches!(self, Selection::Overview)
    }

    pub fn is_database(&self) -> bool {
        matches!(self, Selection::Database)
    }

    pub fn nav_index(&self) -> usize {
        Self::nav_items()
            .iter()
            .position(|s| s == self)
            .unwrap_or(0)
    }
}

impl FromStr for Selection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selection::from_name(s).ok_or_else(|| {
            format!(
                "unknown category '{s}' (expected '{OVERVIEW_NAME}', '{DATABASE_NAME}' or one of: {})",
                TEAMS.join(", ")
            )
        })
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Time filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bucket {
    #[default]
    All,
    Quarter(Quarter),
}

impl Bucket {
    /// Selector order
    pub const OPTIONS: [Bucket; 5] = [
        Bucket::All,
        Bucket::Quarter(Quarter::Q1),
        Bucket::Quarter(Quarter::Q2),
        Bucket::Quarter(Quarter::Q3),
        Bucket::Quarter(Quarter::Q4),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Bucket::All => "All",
            Bucket::Quarter(q) => q.label(),
        }
    }

    pub fn matches(&self, quarter: Quarter) -> bool {
        match self {
            Bucket::All => true,
            Bucket::Quarter(q) => *q == quarter,
        }
    }

    fn position(&self) -> usize {
        Self::OPTIONS.iter().position(|b| b == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::OPTIONS[(self.position() + 1) % Self::OPTIONS.len()]
    }

    pub fn prev(&self) -> Self {
        let len = Self::OPTIONS.len();
        Self::OPTIONS[(self.position() + len - 1) % len]
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Bucket::All);
        }
        s.parse::<Quarter>().map(Bucket::Quarter)
    }
}

impl Serialize for Bucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Current user selection. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ViewState {
    pub selection: Selection,
    pub bucket: Bucket,
}

impl ViewState {
    pub fn new(selection: Selection, bucket: Bucket) -> Self {
        Self { selection, bucket }
    }

    pub fn select_category(&mut self, selection: Selection) {
        self.selection = selection;
    }

    pub fn select_bucket(&mut self, bucket: Bucket) {
        self.bucket = bucket;
    }
}
