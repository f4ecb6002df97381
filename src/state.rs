use std::path::Path;

use anyhow::{Context, Result};

use crate::color::ColorMap;
use crate::config::ViewerConfig;
use crate::data::export::export_file;
use crate::data::filter::{FilterCriteria, YearRange};
use crate::data::model::{Dimension, PopulationDataset};
use crate::data::views::{analyze, Analysis};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<PopulationDataset>,

    /// Current selections; the only input to `analysis`.
    pub criteria: FilterCriteria,

    /// Views derived from `dataset` and `criteria` (cached until the next change).
    pub analysis: Analysis,

    /// Per-prefecture series colours.
    pub color_map: ColorMap,

    /// Age-bracket value that holds the all-ages sum.
    pub total_label: String,

    /// Show All / None buttons in the filter panel.
    pub select_all_shortcuts: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Informational notice, e.g. which prefectures were just extracted.
    pub notice: Option<String>,
}

impl AppState {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            dataset: None,
            criteria: FilterCriteria::default(),
            analysis: Analysis::default(),
            color_map: ColorMap::default(),
            total_label: config.total_label.clone(),
            select_all_shortcuts: config.select_all_shortcuts,
            status_message: None,
            notice: None,
        }
    }

    /// Ingest a newly loaded dataset. Selections start empty.
    pub fn set_dataset(&mut self, dataset: PopulationDataset) {
        self.color_map = ColorMap::new(dataset.distinct(Dimension::Prefecture));
        self.criteria = FilterCriteria::default();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.notice = None;
        self.refilter();
    }

    /// Load a file and make it the current dataset; failures land in
    /// `status_message`.
    pub fn load_path(&mut self, path: &Path) {
        match crate::data::loader::load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows with columns {:?} from {}",
                    dataset.len(),
                    dataset.headers,
                    path.display()
                );
                if dataset.is_empty() {
                    log::warn!("{} contains no data rows", path.display());
                }
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Recompute every derived view from scratch.
    pub fn refilter(&mut self) {
        self.analysis = match &self.dataset {
            Some(ds) => analyze(ds, &self.criteria, &self.total_label),
            None => Analysis::default(),
        };
    }

    /// Toggle a single value in a category's selection.
    pub fn toggle(&mut self, dim: Dimension, value: &str) {
        let had_prefectures = !self.criteria.prefectures.is_empty();
        let selected = self.criteria.selection_mut(dim);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
        self.update_notice(had_prefectures);
    }

    /// Select every value of a category.
    pub fn select_all(&mut self, dim: Dimension) {
        let had_prefectures = !self.criteria.prefectures.is_empty();
        if let Some(ds) = &self.dataset {
            *self.criteria.selection_mut(dim) = ds.distinct(dim).iter().cloned().collect();
            self.refilter();
            self.update_notice(had_prefectures);
        }
    }

    /// Deselect every value of a category.
    pub fn select_none(&mut self, dim: Dimension) {
        let had_prefectures = !self.criteria.prefectures.is_empty();
        self.criteria.selection_mut(dim).clear();
        self.refilter();
        self.update_notice(had_prefectures);
    }

    /// Announce the extraction when the prefecture selection goes from empty
    /// to non-empty; drop the notice once it is empty again.
    fn update_notice(&mut self, had_prefectures: bool) {
        let prefectures = &self.criteria.prefectures;
        if prefectures.is_empty() {
            self.notice = None;
        } else if !had_prefectures {
            let names: Vec<&str> = prefectures.iter().map(String::as_str).collect();
            let msg = format!("Extracted data for {}", names.join(", "));
            log::info!("{msg}");
            self.notice = Some(msg);
        }
    }

    pub fn set_years(&mut self, years: YearRange) {
        if self.criteria.years != years {
            self.criteria.years = years;
            self.refilter();
        }
    }

    /// Write the filtered view to `path`.
    pub fn export_to(&self, path: &Path) -> Result<()> {
        let ds = self.dataset.as_ref().context("no dataset loaded")?;
        export_file(ds, &self.analysis.filtered, path)?;
        log::info!(
            "Exported {} rows to {}",
            self.analysis.filtered.len(),
            path.display()
        );
        Ok(())
    }
}
