/// View pipeline: the projections rendered by the dashboard.
///
/// ```text
///   ProductDataset + CountrySelection
///        │
///        ▼
///   FilteredView ──┬─► overview        (first N rows)
///                  ├─► price histogram (50 bins)
///                  ├─► rating histogram (20 bins)
///                  ├─► top-N by number of ratings
///                  └─► correlation matrix
/// ```
///
/// The projections are independent of one another.

pub mod correlation;
pub mod histogram;
pub mod ranking;

use crate::data::filter::{CountrySelection, FilteredView};
use crate::data::model::{NumericField, Product, ProductDataset};

use correlation::{correlation_matrix, CorrelationMatrix};
use histogram::Histogram;
use ranking::{top_by_num_ratings, RankedProduct};

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Sizes of the projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSettings {
    pub overview_rows: usize,
    pub price_bins: usize,
    pub rating_bins: usize,
    pub top_n: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            overview_rows: 5,
            price_bins: 50,
            rating_bins: 20,
            top_n: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// DashboardView – everything one filter state renders
// ---------------------------------------------------------------------------

/// Owned results of every projection for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Rows passing the filter.
    pub visible_rows: usize,
    /// Rows in the unfiltered dataset.
    pub total_rows: usize,
    pub overview: Vec<Product>,
    pub price_histogram: Histogram,
    pub rating_histogram: Histogram,
    pub top_products: Vec<RankedProduct>,
    pub correlation: CorrelationMatrix,
}

impl DashboardView {
    /// Filter `dataset` by `selection` and run every projection.
    pub fn compute(
        dataset: &ProductDataset,
        selection: &CountrySelection,
        settings: &ViewSettings,
    ) -> Self {
        let view = FilteredView::new(dataset, selection);
        log::debug!(
            "Recomputing dashboard for {} of {} rows (selection: {:?})",
            view.len(),
            dataset.len(),
            selection
        );
        if view.is_empty() && !dataset.is_empty() {
            log::info!("No listings match the selected countries");
        }

        DashboardView {
            visible_rows: view.len(),
            total_rows: dataset.len(),
            overview: overview(&view, settings.overview_rows),
            price_histogram: Histogram::from_values(
                view.values(NumericField::Price),
                settings.price_bins,
            ),
            rating_histogram: Histogram::from_values(
                view.values(NumericField::StarRating),
                settings.rating_bins,
            ),
            top_products: top_by_num_ratings(&view, settings.top_n),
            correlation: correlation_matrix(&view),
        }
    }
}

/// The first `n` rows of the view, unchanged.
pub fn overview(view: &FilteredView<'_>, n: usize) -> Vec<Product> {
    view.rows().iter().take(n).map(|&p| p.clone()).collect()
}
