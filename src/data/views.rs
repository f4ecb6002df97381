use super::filter::{filter_indices, FilterCriteria};
use super::model::PopulationDataset;

// ---------------------------------------------------------------------------
// Trend view
// ---------------------------------------------------------------------------

/// Rows of `filtered` in the total bracket, ascending by year.
///
/// The sort is stable, so rows sharing a year (one per prefecture) keep
/// dataset order.
pub fn trend_indices(dataset: &PopulationDataset, filtered: &[usize], total_label: &str) -> Vec<usize> {
    let mut trend: Vec<usize> = filtered
        .iter()
        .copied()
        .filter(|&i| dataset.records[i].age_bracket == total_label)
        .collect();
    trend.sort_by_key(|&i| dataset.records[i].year);
    trend
}

// ---------------------------------------------------------------------------
// Snapshot view
// ---------------------------------------------------------------------------

/// Age-bracket composition at the latest year of the filtered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub year: i32,
    /// Rows at `year`, total bracket excluded.
    pub indices: Vec<usize>,
}

/// `None` when `filtered` is empty and there is no latest year.
pub fn snapshot(dataset: &PopulationDataset, filtered: &[usize], total_label: &str) -> Option<Snapshot> {
    let year = filtered.iter().map(|&i| dataset.records[i].year).max()?;
    let indices = filtered
        .iter()
        .copied()
        .filter(|&i| {
            let r = &dataset.records[i];
            r.year == year && r.age_bracket != total_label
        })
        .collect();
    Some(Snapshot { year, indices })
}

// ---------------------------------------------------------------------------
// Analysis – one full recomputation
// ---------------------------------------------------------------------------

/// Why the trend chart has nothing to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendNotice {
    NoData,
    TotalNotSelected,
}

/// Why the snapshot chart has nothing to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotNotice {
    NoData,
    NoAgeBracket,
}

/// Every derived view for one `FilterCriteria`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub filtered: Vec<usize>,
    pub trend: Vec<usize>,
    pub snapshot: Option<Snapshot>,
}

/// Filter, then derive the trend and snapshot views.
pub fn analyze(dataset: &PopulationDataset, criteria: &FilterCriteria, total_label: &str) -> Analysis {
    let filtered = filter_indices(dataset, criteria);
    let trend = trend_indices(dataset, &filtered, total_label);
    let snapshot = snapshot(dataset, &filtered, total_label);
    log::debug!(
        "analysis: {} filtered, {} trend, {} snapshot rows",
        filtered.len(),
        trend.len(),
        snapshot.as_ref().map_or(0, |s| s.indices.len())
    );
    Analysis {
        filtered,
        trend,
        snapshot,
    }
}

impl Analysis {
    pub fn trend_notice(&self, criteria: &FilterCriteria, total_label: &str) -> Option<TrendNotice> {
        if !self.trend.is_empty() {
            None
        } else if !criteria.age_brackets.contains(total_label) {
            Some(TrendNotice::TotalNotSelected)
        } else {
            Some(TrendNotice::NoData)
        }
    }

    pub fn snapshot_notice(&self, criteria: &FilterCriteria, total_label: &str) -> Option<SnapshotNotice> {
        if self.snapshot.as_ref().is_some_and(|s| !s.indices.is_empty()) {
            None
        } else if criteria.age_brackets.iter().all(|b| b == total_label) {
            Some(SnapshotNotice::NoAgeBracket)
        } else {
            Some(SnapshotNotice::NoData)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;
    use crate::data::filter::YearRange;
    use crate::data::fixtures::{self, TOTAL};

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn criteria(prefs: &[&str], brackets: &[&str], from: i32, to: i32) -> FilterCriteria {
        FilterCriteria {
            prefectures: set(prefs),
            eras: set(&["Taisho", "Showa"]),
            age_brackets: set(brackets),
            years: YearRange::new(from, to),
        }
    }

    #[test]
    fn example_scenario_trend_and_snapshot() {
        let ds = fixtures::tokyo();
        let mut c = criteria(&["Tokyo"], &[TOTAL, "0-4"], 1950, 1960);
        c.eras = set(&["Showa"]);
        let a = analyze(&ds, &c, TOTAL);

        let trend_years: Vec<i32> = a.trend.iter().map(|&i| ds.records[i].year).collect();
        assert_eq!(trend_years, vec![1950, 1955, 1960]);
        assert!(a.trend.iter().all(|&i| ds.records[i].age_bracket == TOTAL));

        let snap = a.snapshot.as_ref().unwrap();
        assert_eq!(snap.year, 1960);
        assert_eq!(snap.indices.len(), 1);
        assert_eq!(ds.records[snap.indices[0]].age_bracket, "0-4");
        assert_eq!(a.trend_notice(&c, TOTAL), None);
        assert_eq!(a.snapshot_notice(&c, TOTAL), None);
    }

    #[test]
    fn trend_orders_multiple_prefectures_by_year() {
        let ds = fixtures::build(&["Tokyo", "Osaka"]);
        let a = analyze(&ds, &criteria(&["Tokyo", "Osaka"], &[TOTAL], 1920, 1930), TOTAL);
        let rows: Vec<(i32, &str)> = a
            .trend
            .iter()
            .map(|&i| (ds.records[i].year, ds.records[i].prefecture.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (1920, "Tokyo"),
                (1920, "Osaka"),
                (1925, "Tokyo"),
                (1925, "Osaka"),
                (1930, "Tokyo"),
                (1930, "Osaka"),
            ]
        );
    }

    #[test]
    fn missing_total_is_distinguished_from_no_data() {
        let ds = fixtures::tokyo();
        let c = criteria(&["Tokyo"], &["0-4"], 1920, 2015);
        let a = analyze(&ds, &c, TOTAL);
        assert!(a.trend.is_empty());
        assert_eq!(a.trend_notice(&c, TOTAL), Some(TrendNotice::TotalNotSelected));

        let c = criteria(&["Tokyo"], &[TOTAL], 1800, 1850);
        let a = analyze(&ds, &c, TOTAL);
        assert_eq!(a.trend_notice(&c, TOTAL), Some(TrendNotice::NoData));
        assert_eq!(a.snapshot, None);
    }

    #[test]
    fn snapshot_with_only_total_selected_asks_for_a_bracket() {
        let ds = fixtures::tokyo();
        let c = criteria(&["Tokyo"], &[TOTAL], 1920, 2015);
        let a = analyze(&ds, &c, TOTAL);
        let snap = a.snapshot.as_ref().unwrap();
        assert_eq!(snap.year, 2015);
        assert!(snap.indices.is_empty());
        assert_eq!(a.snapshot_notice(&c, TOTAL), Some(SnapshotNotice::NoAgeBracket));
    }

    #[test]
    fn snapshot_without_rows_for_selected_brackets_reports_no_data() {
        let ds = fixtures::tokyo();

        // Nothing in range at all.
        let c = criteria(&["Tokyo"], &["0-4", TOTAL], 1800, 1850);
        let a = analyze(&ds, &c, TOTAL);
        assert_eq!(a.snapshot, None);
        assert_eq!(a.snapshot_notice(&c, TOTAL), Some(SnapshotNotice::NoData));

        // Latest year holds only total rows: the 0-4 row for 2015 is absent.
        let trimmed = PopulationDataset::from_table(crate::data::model::RawTable {
            headers: ds.headers.clone(),
            rows: ds
                .records
                .iter()
                .filter(|r| !(r.year == 2015 && r.age_bracket == "0-4"))
                .map(|r| r.cells.clone())
                .collect(),
        })
        .unwrap();
        let c = criteria(&["Tokyo"], &["0-4", TOTAL], 2010, 2015);
        let a = analyze(&trimmed, &c, TOTAL);
        let snap = a.snapshot.as_ref().unwrap();
        assert_eq!(snap.year, 2015);
        assert!(snap.indices.is_empty());
        assert_eq!(a.snapshot_notice(&c, TOTAL), Some(SnapshotNotice::NoData));
    }

    #[test]
    fn empty_bracket_selection_asks_for_a_bracket() {
        let ds = fixtures::tokyo();
        let c = criteria(&["Tokyo"], &[], 1920, 2015);
        let a = analyze(&ds, &c, TOTAL);
        assert!(a.filtered.is_empty());
        assert_eq!(a.snapshot_notice(&c, TOTAL), Some(SnapshotNotice::NoAgeBracket));
        assert_eq!(a.trend_notice(&c, TOTAL), Some(TrendNotice::TotalNotSelected));
    }

    #[test]
    fn snapshot_of_empty_view_is_none() {
        let ds = fixtures::tokyo();
        assert_eq!(snapshot(&ds, &[], TOTAL), None);
    }

    proptest! {
        #[test]
        fn derived_views_respect_their_contracts(
            from in 1900i32..2030,
            to in 1900i32..2030,
            with_total in any::<bool>(),
            with_young in any::<bool>(),
        ) {
            let ds = fixtures::build(&["Tokyo", "Osaka"]);
            let mut brackets = vec!["5-9"];
            if with_total { brackets.push(TOTAL); }
            if with_young { brackets.push("0-4"); }
            let a = analyze(&ds, &criteria(&["Tokyo", "Osaka"], &brackets, from, to), TOTAL);

            prop_assert!(a.trend.iter().all(|&i| ds.records[i].age_bracket == TOTAL));
            prop_assert!(a.trend.windows(2).all(|w| ds.records[w[0]].year <= ds.records[w[1]].year));

            let max_year = a.filtered.iter().map(|&i| ds.records[i].year).max();
            prop_assert_eq!(a.snapshot.as_ref().map(|s| s.year), max_year);
            if let Some(snap) = &a.snapshot {
                for &i in &snap.indices {
                    prop_assert_eq!(ds.records[i].year, snap.year);
                    prop_assert_ne!(ds.records[i].age_bracket.as_str(), TOTAL);
                }
            }
        }
    }
}
