use serde::Serialize;

use super::view_state::{short_name, Selection, ViewState, TEAMS};
use crate::dataset::{Record, Status};

/// Label of the single group outside the overview.
///
/// Fixed in Spanish so the JSON snapshot is stable across languages; the TUI
/// shows the localized `chart.current_status` text in its place.
pub const CURRENT_STATUS_LABEL: &str = "Estado Actual";

/// Headline counters for the filtered set
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Kpis {
    pub total: usize,
    pub hours: u64,
    /// Hours per record rounded to one decimal, `None` when nothing matched
    pub avg_hours: Option<f64>,
    pub done: usize,
    pub wip: usize,
    pub todo: usize,
}

/// Status counts and effort for one chart group
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusBreakdown {
    pub label: String,
    pub done: usize,
    pub wip: usize,
    pub todo: usize,
    pub count: usize,
    pub hours: u64,
}

/// New projects versus everything else
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeComposition {
    pub nuevos: usize,
    pub mejoras: usize,
}

impl TypeComposition {
    pub fn total(&self) -> usize {
        self.nuevos + self.mejoras
    }
}

/// One category on the volume/effort radar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarPoint {
    pub label: String,
    pub count: usize,
    pub hours: u64,
    /// `count` scaled against the busiest category, 0..=100
    pub volume: f64,
    /// `hours` scaled against the most loaded category, 0..=100
    pub effort: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RadarSeries {
    pub points: Vec<RadarPoint>,
}

/// Everything the presentation layer needs for one view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub view: ViewState,
    pub filtered: Vec<Record>,
    pub kpis: Kpis,
    pub grouped: Vec<StatusBreakdown>,
    pub composition: TypeComposition,
    /// Only computed on the overview page
    pub radar: Option<RadarSeries>,
}

/// Apply the category and bucket filters. The overview and the table page
/// keep every category; a category page keeps exact (case-sensitive) matches.
pub fn filter_records<'a>(records: &'a [Record], view: &ViewState) -> Vec<&'a Record> {
    let team = view.selection.team();
    records
        .iter()
        .filter(|r| team.map_or(true, |t| r.team == t))
        .filter(|r| view.bucket.matches(r.quarter))
        .collect()
}

pub fn compute_kpis(records: &[&Record]) -> Kpis {
    let total = records.len();
    let hours: u64 = records.iter().map(|r| u64::from(r.hours)).sum();
    let avg_hours = if total > 0 {
        Some((hours as f64 / total as f64 * 10.0).round() / 10.0)
    } else {
        None
    };

    Kpis {
        total,
        hours,
        avg_hours,
        done: count_status(records, &Status::Done),
        wip: count_status(records, &Status::Wip),
        todo: count_status(records, &Status::Todo),
    }
}

fn count_status(records: &[&Record], status: &Status) -> usize {
    records.iter().filter(|r| &r.status == status).count()
}

fn breakdown<'a>(label: &str, records: impl IntoIterator<Item = &'a Record>) -> StatusBreakdown {
    let mut group = StatusBreakdown {
        label: label.to_string(),
        ..Default::default()
    };

    for record in records {
        group.count += 1;
        group.hours += u64::from(record.hours);
        match record.status {
            Status::Done => group.done += 1,
            Status::Wip => group.wip += 1,
            Status::Todo => group.todo += 1,
            Status::Other(_) => {}
        }
    }

    group
}

fn team_breakdowns(records: &[&Record]) -> Vec<StatusBreakdown> {
    TEAMS
        .iter()
        .map(|team| {
            breakdown(
                short_name(team),
                records.iter().copied().filter(|r| r.team == *team),
            )
        })
        .collect()
}

pub fn type_composition(records: &[&Record]) -> TypeComposition {
    let nuevos = records.iter().filter(|r| r.work_type.is_new()).count();
    TypeComposition {
        nuevos,
        mejoras: records.len() - nuevos,
    }
}

/// Scale per-category counts and hours to 0..=100. Each series is divided by
/// its own maximum, floored at 1 so an empty dataset stays at zero.
pub fn radar_series(groups: &[StatusBreakdown]) -> RadarSeries {
    let max_count = groups.iter().map(|g| g.count).max().unwrap_or(0).max(1);
    let max_hours = groups.iter().map(|g| g.hours).max().unwrap_or(0).max(1);

    let points = groups
        .iter()
        .map(|g| RadarPoint {
            label: g.label.clone(),
            count: g.count,
            hours: g.hours,
            volume: g.count as f64 / max_count as f64 * 100.0,
            effort: g.hours as f64 / max_hours as f64 * 100.0,
        })
        .collect();

    RadarSeries { points }
}

/// Filter `records` for `view` and derive every aggregate shown on the page
pub fn aggregate(records: &[Record], view: &ViewState) -> DashboardSnapshot {
    let filtered = filter_records(records, view);
    let kpis = compute_kpis(&filtered);
    let composition = type_composition(&filtered);

    let (grouped, radar) = match view.selection {
        Selection::Overview => {
            let groups = team_breakdowns(&filtered);
            let radar = radar_series(&groups);
            (groups, Some(radar))
        }
        Selection::Team(_) | Selection::Database => (
            vec![breakdown(CURRENT_STATUS_LABEL, filtered.iter().copied())],
            None,
        ),
    };

    DashboardSnapshot {
        view: *view,
        filtered: filtered.into_iter().cloned().collect(),
        kpis,
        grouped,
        composition,
        radar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::delimited::RawRow;
    use crate::dataset::projector::project_records;
    use crate::dataset::projector::WorkType;
    use crate::dataset::Quarter;
    use crate::features::dashboard::view_state::Bucket;
    use proptest::prelude::*;

    fn record(id: usize, team: &str, status: &str, quarter: Quarter, hours: u32) -> Record {
        Record {
            id,
            name: format!("Project {id}"),
            team: team.to_string(),
            status: Status::from_raw(status),
            work_type: WorkType::Mejora,
            duration_text: format!("{hours} hours"),
            date_text: String::new(),
            hours,
            quarter,
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record(0, "Food", "Done", Quarter::Q1, 16),
            record(1, "Food", "WIP", Quarter::Q2, 8),
            record(2, "Payments", "Todo", Quarter::Q1, 40),
            record(3, "Payments", "Blocked", Quarter::Q3, 4),
            record(4, "food", "Done", Quarter::Q1, 4),
            record(5, "Unknown", "Todo", Quarter::Q4, 4),
        ]
    }

    fn end_to_end_records() -> Vec<Record> {
        let a: RawRow = [
            ("name", "A"),
            ("team", "Food"),
            ("status", "Done"),
            ("type", "Nuevo"),
            ("duration", "2 days"),
            ("date", "01/ene/2024"),
        ]
        .into_iter()
        .collect();
        let b: RawRow = [
            ("name", "B"),
            ("team", "Food"),
            ("status", "Todo"),
            ("type", "Mejora"),
            ("duration", ""),
            ("date", ""),
        ]
        .into_iter()
        .collect();
        project_records(&[a, b])
    }

    #[test]
    fn test_end_to_end_no_filters() {
        let records = end_to_end_records();
        let snapshot = aggregate(&records, &ViewState::default());

        assert_eq!(snapshot.kpis.total, 2);
        assert_eq!(snapshot.kpis.hours, 20);
        assert_eq!(snapshot.kpis.done, 1);
        assert_eq!(snapshot.kpis.todo, 1);
        assert_eq!(snapshot.kpis.avg_hours, Some(10.0));
        assert_eq!(snapshot.composition, TypeComposition { nuevos: 1, mejoras: 1 });
    }

    #[test]
    fn test_end_to_end_category_filter_matches_all() {
        let records = end_to_end_records();
        let all = aggregate(&records, &ViewState::default());
        let food = aggregate(
            &records,
            &ViewState::new(Selection::Team("Food"), Bucket::All),
        );

        assert_eq!(food.filtered, all.filtered);
        assert_eq!(food.kpis, all.kpis);
    }

    #[test]
    fn test_team_filter_is_case_sensitive() {
        let records = sample();
        let view = ViewState::new(Selection::Team("Food"), Bucket::All);
        let snapshot = aggregate(&records, &view);

        // "food" (lowercase) is not matched
        let ids: Vec<usize> = snapshot.filtered.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_filters_intersect() {
        let records = sample();
        let view = ViewState::new(Selection::Team("Payments"), Bucket::Quarter(Quarter::Q1));
        let snapshot = aggregate(&records, &view);

        assert_eq!(snapshot.kpis.total, 1);
        assert_eq!(snapshot.filtered[0].id, 2);
    }

    #[test]
    fn test_database_page_only_applies_bucket() {
        let records = sample();
        let view = ViewState::new(Selection::Database, Bucket::Quarter(Quarter::Q1));
        let snapshot = aggregate(&records, &view);

        assert_eq!(snapshot.kpis.total, 3);
        assert_eq!(snapshot.grouped.len(), 1);
        assert_eq!(snapshot.grouped[0].label, CURRENT_STATUS_LABEL);
        assert!(snapshot.radar.is_none());
    }

    #[test]
    fn test_unknown_status_is_not_counted() {
        let records = sample();
        let snapshot = aggregate(&records, &ViewState::default());

        assert_eq!(snapshot.kpis.total, 6);
        assert_eq!(snapshot.kpis.done + snapshot.kpis.wip + snapshot.kpis.todo, 5);
    }

    #[test]
    fn test_overview_groups_follow_team_order() {
        let records = sample();
        let snapshot = aggregate(&records, &ViewState::default());

        let labels: Vec<&str> = snapshot.grouped.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Martech", "Onboarding", "Fulfillment", "QC", "Plus", "Payments", "Food"]
        );

        let food = &snapshot.grouped[6];
        assert_eq!((food.done, food.wip, food.todo, food.count, food.hours), (1, 1, 0, 2, 24));
        let payments = &snapshot.grouped[5];
        assert_eq!((payments.todo, payments.count, payments.hours), (1, 2, 44));
    }

    #[test]
    fn test_radar_normalization() {
        let records = sample();
        let radar = aggregate(&records, &ViewState::default()).radar.unwrap();

        let payments = &radar.points[5];
        let food = &radar.points[6];
        assert_eq!(payments.volume, 100.0);
        assert_eq!(food.volume, 100.0);
        assert_eq!(payments.effort, 100.0);
        assert!((food.effort - 24.0 / 44.0 * 100.0).abs() < 1e-9);
        assert_eq!(radar.points[0].volume, 0.0);
    }

    #[test]
    fn test_empty_record_set() {
        let snapshot = aggregate(&[], &ViewState::default());

        assert_eq!(snapshot.kpis, Kpis::default());
        assert_eq!(snapshot.kpis.avg_hours, None);
        assert_eq!(snapshot.grouped.len(), TEAMS.len());
        assert!(snapshot.grouped.iter().all(|g| g.count == 0));
        let radar = snapshot.radar.unwrap();
        assert!(radar.points.iter().all(|p| p.volume == 0.0 && p.effort == 0.0));
    }

    #[test]
    fn test_avg_hours_rounding() {
        let records = vec![
            record(0, "Food", "Done", Quarter::Q1, 1),
            record(1, "Food", "Done", Quarter::Q1, 1),
            record(2, "Food", "Done", Quarter::Q1, 2),
        ];
        let snapshot = aggregate(&records, &ViewState::default());
        assert_eq!(snapshot.kpis.avg_hours, Some(1.3));
    }

    #[test]
    fn test_other_types_count_as_mejoras() {
        let mut records = sample();
        records[0].work_type = WorkType::Nuevo;
        records[1].work_type = WorkType::Other("Bug".to_string());
        let snapshot = aggregate(&records, &ViewState::default());

        assert_eq!(snapshot.composition.nuevos, 1);
        assert_eq!(snapshot.composition.mejoras, 5);
        assert_eq!(snapshot.composition.total(), snapshot.kpis.total);
    }

    fn arb_record() -> impl Strategy<Value = Record> {
        let team = prop_oneof![
            Just("Martechs & Ads"),
            Just("Onboarding"),
            Just("Payments"),
            Just("Food"),
            Just("food "),
            Just("Unknown"),
        ];
        let status = prop_oneof![Just("Done"), Just("WIP"), Just("Todo"), Just("Blocked")];
        let quarter = prop_oneof![
            Just(Quarter::Q1),
            Just(Quarter::Q2),
            Just(Quarter::Q3),
            Just(Quarter::Q4),
        ];
        (team, status, quarter, 0u32..500)
            .prop_map(|(team, status, quarter, hours)| record(0, team, status, quarter, hours))
    }

    fn arb_view() -> impl Strategy<Value = ViewState> {
        let selection = prop::sample::select(Selection::nav_items());
        let bucket = prop::sample::select(Bucket::OPTIONS.to_vec());
        (selection, bucket).prop_map(|(selection, bucket)| ViewState::new(selection, bucket))
    }

    proptest! {
        #[test]
        fn prop_kpis_are_consistent(records in prop::collection::vec(arb_record(), 0..40), view in arb_view()) {
            let snapshot = aggregate(&records, &view);

            prop_assert!(snapshot.filtered.len() <= records.len());
            prop_assert_eq!(snapshot.kpis.total, snapshot.filtered.len());
            prop_assert!(snapshot.kpis.done + snapshot.kpis.wip + snapshot.kpis.todo <= snapshot.kpis.total);
            prop_assert_eq!(snapshot.composition.total(), snapshot.kpis.total);
        }

        #[test]
        fn prop_bucket_all_equals_category_filter_alone(records in prop::collection::vec(arb_record(), 0..40), view in arb_view()) {
            let mut narrowed = view;
            narrowed.select_bucket(Bucket::Quarter(Quarter::Q2));
            narrowed.select_bucket(Bucket::All);

            let category_only = ViewState::new(view.selection, Bucket::All);
            prop_assert_eq!(
                aggregate(&records, &narrowed).filtered,
                aggregate(&records, &category_only).filtered
            );
        }

        #[test]
        fn prop_radar_values_in_range(records in prop::collection::vec(arb_record(), 0..40), bucket in prop::sample::select(Bucket::OPTIONS.to_vec())) {
            let snapshot = aggregate(&records, &ViewState::new(Selection::Overview, bucket));
            let radar = snapshot.radar.unwrap();

            for point in &radar.points {
                prop_assert!((0.0..=100.0).contains(&point.volume));
                prop_assert!((0.0..=100.0).contains(&point.effort));
            }
        }
    }
}
