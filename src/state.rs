use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::data::cache::DatasetCache;
use crate::data::error::DataError;
use crate::data::filter::CountrySelection;
use crate::data::model::ProductDataset;
use crate::view::{DashboardView, ViewSettings};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Datasets loaded so far, one per source path.
    cache: DatasetCache,

    /// Active dataset (None until a file is loaded).
    pub dataset: Option<Arc<ProductDataset>>,

    /// Path the active dataset came from.
    pub source: Option<PathBuf>,

    /// Countries ticked in the filter panel.
    pub selection: CountrySelection,

    /// Projections for the current selection (recomputed on every change).
    pub view: Option<DashboardView>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            cache: DatasetCache::new(),
            dataset: None,
            source: None,
            selection: CountrySelection::new(),
            view: None,
            status_message: None,
        }
    }

    /// Load `path` through the cache and make it the active dataset.
    pub fn open(&mut self, path: &Path) -> Result<(), DataError> {
        if !self.cache.contains(path) {
            log::info!("Reading {} from disk", path.display());
        }
        let dataset = self.cache.get_or_load(path)?;
        self.set_dataset(path, dataset);
        Ok(())
    }

    /// Ingest a dataset and reset the filter.
    pub fn set_dataset(&mut self, path: &Path, dataset: Arc<ProductDataset>) {
        self.selection.clear();
        self.source = Some(path.to_path_buf());
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    pub fn view_settings(&self) -> ViewSettings {
        self.config.view_settings()
    }

    /// Recompute the projections after a filter change.
    pub fn refilter(&mut self) {
        let settings = self.view_settings();
        if let Some(ds) = &self.dataset {
            self.view = Some(DashboardView::compute(ds, &self.selection, &settings));
        }
    }

    /// Toggle a single country in the filter.
    pub fn toggle_country(&mut self, country: &str) {
        if !self.selection.remove(country) {
            self.selection.insert(country.to_string());
        }
        log::info!("Country filter: {:?}", self.selection);
        self.refilter();
    }

    /// Drop every selected country, i.e. show all rows.
    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        log::info!("Country filter cleared");
        self.refilter();
    }
}
