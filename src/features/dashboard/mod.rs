//! Dashboard module - filtering and aggregation over the loaded record set
//!
//! This module provides:
//! - The current page and time bucket selection
//! - KPI, per-category status and composition aggregates
//! - A cached snapshot that is recomputed on every selection change

pub mod aggregator;
pub mod view_state;

// Re-export commonly used types
pub use aggregator::{aggregate, DashboardSnapshot};
pub use view_state::{Bucket, Selection, ViewState};

use crate::dataset::Record;

/// Record set plus the selection applied to it
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    records: Vec<Record>,
    view: ViewState,
    snapshot: DashboardSnapshot,
}

impl DashboardState {
    pub fn new(records: Vec<Record>, view: ViewState) -> Self {
        let snapshot = aggregate(&records, &view);
        Self {
            records,
            view,
            snapshot,
        }
    }

    /// State before any data has arrived
    pub fn empty(view: ViewState) -> Self {
        Self::new(Vec::new(), view)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    /// Switch page. The time bucket is left untouched.
    pub fn select_category(&mut self, selection: Selection) -> &DashboardSnapshot {
        self.view.select_category(selection);
        self.refresh()
    }

    /// Switch time bucket. The page is left untouched.
    pub fn select_bucket(&mut self, bucket: Bucket) -> &DashboardSnapshot {
        self.view.select_bucket(bucket);
        self.refresh()
    }

    /// Swap in a freshly loaded record set, keeping the selection
    pub fn replace_records(&mut self, records: Vec<Record>) -> &DashboardSnapshot {
        self.records = records;
        self.refresh()
    }

    fn refresh(&mut self) -> &DashboardSnapshot {
        self.snapshot = aggregate(&self.records, &self.view);
        tracing::debug!(
            selection = self.view.selection.name(),
            bucket = self.view.bucket.label(),
            matched = self.snapshot.kpis.total,
            "recomputed dashboard"
        );
        &self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::view_state::TEAMS;
    use super::*;
    use crate::dataset::Dataset;
    use crate::dataset::Quarter;

    const CSV: &str = "\
NAME,TEAM,STATUS,TYPE,DURATION,DATE
Checkout,Payments,Done,Nuevo,1 week,10/feb/2024
Wallet,Payments,WIP,Mejora,3 days,05/may/2024
Menu,Food,Todo,Nuevo,,
Rider,Fulfillment,Done,Mejora,2 hours,12/jul/2024
";

    fn state() -> DashboardState {
        DashboardState::new(Dataset::from_text(CSV).records, ViewState::default())
    }

    #[test]
    fn test_initial_snapshot_is_overview_all() {
        let state = state();
        let snapshot = state.snapshot();

        assert_eq!(snapshot.view, ViewState::default());
        assert_eq!(snapshot.kpis.total, 4);
        assert_eq!(snapshot.kpis.hours, 40 + 24 + 4 + 2);
        assert!(snapshot.radar.is_some());
    }

    #[test]
    fn test_selection_changes_keep_other_axis() {
        let mut state = state();

        state.select_bucket(Bucket::Quarter(Quarter::Q1));
        let snapshot = state.select_category(Selection::Team("Payments"));
        assert_eq!(snapshot.view.bucket, Bucket::Quarter(Quarter::Q1));
        assert_eq!(snapshot.kpis.total, 1);
        assert_eq!(snapshot.filtered[0].name, "Checkout");

        let snapshot = state.select_bucket(Bucket::All);
        assert_eq!(snapshot.view.selection, Selection::Team("Payments"));
        assert_eq!(snapshot.kpis.total, 2);
    }

    #[test]
    fn test_empty_state() {
        let state = DashboardState::empty(ViewState::default());
        assert!(state.records().is_empty());
        assert_eq!(state.snapshot().kpis.total, 0);
        assert_eq!(state.snapshot().grouped.len(), TEAMS.len());
    }

    #[test]
    fn test_replace_records_keeps_selection() {
        let mut state = DashboardState::empty(ViewState::new(Selection::Team("Food"), Bucket::All));
        let snapshot = state.replace_records(Dataset::from_text(CSV).records);

        assert_eq!(snapshot.kpis.total, 1);
        assert_eq!(snapshot.kpis.hours, 4);
        assert_eq!(state.view().selection, Selection::Team("Food"));
    }
}
