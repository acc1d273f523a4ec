// ---------------------------------------------------------------------------
// Equal-width histogram
// ---------------------------------------------------------------------------

/// Counts of values in equal-width bins spanning the observed range.
///
/// `edges` has one more entry than `counts`. Every bin is half-open except the
/// last, which also holds the maximum.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` buckets over `[min, max]`.
    ///
    /// With no values (or zero bins) the histogram is empty. When every value
    /// is equal the range is widened by 0.5 on each side.
    pub fn from_values(values: impl IntoIterator<Item = f64>, bins: usize) -> Self {
        let values: Vec<f64> = values.into_iter().collect();
        if values.is_empty() || bins == 0 {
            return Histogram::default();
        }

        let (mut lo, mut hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let mut edges: Vec<f64> = (0..bins).map(|i| lo + width * i as f64).collect();
        edges.push(hi);

        let mut hist = Histogram {
            edges,
            counts: vec![0usize; bins],
        };
        for v in values {
            if let Some(idx) = hist.bin_index(v) {
                hist.counts[idx] += 1;
            }
        }
        hist
    }

    /// Bin that holds `v`, or `None` outside `[first edge, last edge]`.
    ///
    /// The arithmetic estimate is corrected against `edges`, so a value equal
    /// to an interior edge always starts the bin above it.
    pub fn bin_index(&self, v: f64) -> Option<usize> {
        let bins = self.counts.len();
        if bins == 0 || v.is_nan() {
            return None;
        }
        let (lo, hi) = (self.edges[0], self.edges[bins]);
        if v < lo || v > hi {
            return None;
        }

        let width = (hi - lo) / bins as f64;
        let mut idx = (((v - lo) / width) as usize).min(bins - 1);
        while idx > 0 && v < self.edges[idx] {
            idx -= 1;
        }
        while idx + 1 < bins && v >= self.edges[idx + 1] {
            idx += 1;
        }
        Some(idx)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of binned values.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(start, end, count)` per bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, &count)| (edge[0], edge[1], count))
    }
}
