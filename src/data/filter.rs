use std::collections::BTreeSet;

use super::model::{NumericField, Product, ProductDataset};

// ---------------------------------------------------------------------------
// Filter predicate: which countries are selected
// ---------------------------------------------------------------------------

/// Countries chosen in the multi-select.
/// An empty set means "no filter" (show all).
pub type CountrySelection = BTreeSet<String>;

/// Return indices of listings whose country is selected, in source order.
pub fn filtered_indices(dataset: &ProductDataset, selection: &CountrySelection) -> Vec<usize> {
    dataset
        .products
        .iter()
        .enumerate()
        .filter(|(_, p)| selection.is_empty() || selection.contains(&p.country))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – borrowed rows that pass the filter
// ---------------------------------------------------------------------------

/// The working subset of a dataset for the current selection.
///
/// Rows are borrowed from the dataset; nothing is copied.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    rows: Vec<&'a Product>,
}

impl<'a> FilteredView<'a> {
    pub fn new(dataset: &'a ProductDataset, selection: &CountrySelection) -> Self {
        let rows = if selection.is_empty() {
            dataset.products.iter().collect()
        } else {
            filtered_indices(dataset, selection)
                .into_iter()
                .map(|i| &dataset.products[i])
                .collect()
        };
        FilteredView { rows }
    }

    pub fn rows(&self) -> &[&'a Product] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Present values of `field`, skipping absent cells.
    pub fn values(&self, field: NumericField) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().filter_map(move |p| p.value(field))
    }
}
