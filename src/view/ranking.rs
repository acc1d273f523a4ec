use std::cmp::Ordering;

use crate::data::filter::FilteredView;

/// A row of the "most rated" table.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedProduct {
    pub title: String,
    pub num_ratings: Option<f64>,
}

/// The `n` listings with the most ratings.
///
/// Sorted descending; absent counts go last and ties keep source order.
pub fn top_by_num_ratings(view: &FilteredView<'_>, n: usize) -> Vec<RankedProduct> {
    let mut rows = view.rows().to_vec();
    // `sort_by` is stable, which gives the tie-break.
    rows.sort_by(|a, b| descending_absent_last(a.num_ratings, b.num_ratings));

    rows.into_iter()
        .take(n)
        .map(|p| RankedProduct {
            title: p.title.clone(),
            num_ratings: p.num_ratings,
        })
        .collect()
}

fn descending_absent_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
