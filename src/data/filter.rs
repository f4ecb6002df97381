use std::collections::BTreeSet;
use std::fmt;

use super::model::{Dimension, PopulationDataset, Record, YEAR_MAX, YEAR_MIN};

// ---------------------------------------------------------------------------
// YearRange
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` range of Gregorian years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    min: i32,
    max: i32,
}

impl YearRange {
    /// Build a range; reversed bounds are swapped.
    pub fn new(a: i32, b: i32) -> Self {
        YearRange {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

impl Default for YearRange {
    fn default() -> Self {
        YearRange::new(YEAR_MIN, YEAR_MAX)
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria
// ---------------------------------------------------------------------------

/// The user's current selection. An empty set selects nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub prefectures: BTreeSet<String>,
    pub eras: BTreeSet<String>,
    pub age_brackets: BTreeSet<String>,
    pub years: YearRange,
}

impl FilterCriteria {
    pub fn selection(&self, dim: Dimension) -> &BTreeSet<String> {
        match dim {
            Dimension::Prefecture => &self.prefectures,
            Dimension::Era => &self.eras,
            Dimension::AgeBracket => &self.age_brackets,
        }
    }

    pub fn selection_mut(&mut self, dim: Dimension) -> &mut BTreeSet<String> {
        match dim {
            Dimension::Prefecture => &mut self.prefectures,
            Dimension::Era => &mut self.eras,
            Dimension::AgeBracket => &mut self.age_brackets,
        }
    }

    /// Whether `record` satisfies all four predicates.
    pub fn matches(&self, record: &Record) -> bool {
        self.prefectures.contains(&record.prefecture)
            && self.eras.contains(&record.era)
            && self.age_brackets.contains(&record.age_bracket)
            && self.years.contains(record.year)
    }

    /// Human-readable description of the active filter.
    pub fn summary(&self) -> FilterSummary<'_> {
        FilterSummary(self)
    }
}

/// Return indices of records that pass every predicate, in dataset order.
pub fn filter_indices(dataset: &PopulationDataset, criteria: &FilterCriteria) -> Vec<usize> {
    // An empty selection in any category can match nothing.
    if Dimension::ALL
        .iter()
        .any(|&dim| criteria.selection(dim).is_empty())
    {
        return Vec::new();
    }

    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| criteria.matches(r))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

pub const NONE_SELECTED: &str = "(none selected)";

/// One line per category plus the year range.
pub struct FilterSummary<'a>(&'a FilterCriteria);

impl fmt::Display for FilterSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dim in Dimension::ALL {
            let selected = self.0.selection(dim);
            if selected.is_empty() {
                writeln!(f, "{dim}: {NONE_SELECTED}")?;
            } else {
                let joined: Vec<&str> = selected.iter().map(String::as_str).collect();
                writeln!(f, "{dim}: {}", joined.join(", "))?;
            }
        }
        write!(f, "Years: {}–{}", self.0.years.min(), self.0.years.max())
    }
}
