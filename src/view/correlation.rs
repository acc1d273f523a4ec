use crate::data::filter::FilteredView;
use crate::data::model::NumericField;

/// Pairwise Pearson correlation between the numeric fields.
///
/// `values[i][j]` correlates `fields[i]` with `fields[j]`. Undefined
/// coefficients are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub fields: [NumericField; 3],
    pub values: [[f64; 3]; 3],
}

impl CorrelationMatrix {
    pub fn get(&self, a: NumericField, b: NumericField) -> f64 {
        let index = |f: NumericField| self.fields.iter().position(|&x| x == f);
        match (index(a), index(b)) {
            (Some(i), Some(j)) => self.values[i][j],
            _ => f64::NAN,
        }
    }
}

/// Correlate price, star rating and number of ratings over the view.
///
/// Each pair uses only rows where both fields are present. A field's
/// diagonal entry is 1 when it has at least one value and `NaN` otherwise.
pub fn correlation_matrix(view: &FilteredView<'_>) -> CorrelationMatrix {
    let fields = NumericField::ALL;
    let mut values = [[f64::NAN; 3]; 3];

    for (i, &a) in fields.iter().enumerate() {
        if view.values(a).next().is_some() {
            values[i][i] = 1.0;
        }
        for (j, &b) in fields.iter().enumerate().skip(i + 1) {
            let pairs: Vec<(f64, f64)> = view
                .rows()
                .iter()
                .filter_map(|p| Some((p.value(a)?, p.value(b)?)))
                .collect();
            let r = pearson(&pairs);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix { fields, values }
}

/// Pearson's r, or `NaN` for fewer than two pairs or a constant side.
pub fn pearson(pairs: &[(f64, f64)]) -> f64 {
    let Some(&(x0, y0)) = pairs.first() else {
        return f64::NAN;
    };
    if pairs.len() < 2 || pairs.iter().all(|&(x, _)| x == x0) || pairs.iter().all(|&(_, y)| y == y0)
    {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::CountrySelection;
    use crate::data::model::tests::product;
    use crate::data::model::ProductDataset;

    fn matrix(ds: &ProductDataset) -> CorrelationMatrix {
        correlation_matrix(&FilteredView::new(ds, &CountrySelection::new()))
    }

    fn assert_symmetric(m: &CorrelationMatrix) {
        for i in 0..3 {
            for j in 0..3 {
                let (a, b) = (m.values[i][j], m.values[j][i]);
                assert!(a == b || (a.is_nan() && b.is_nan()), "[{i}][{j}]");
            }
        }
    }

    #[test]
    fn perfect_linear_relationships() {
        let ds = ProductDataset::from_products(
            (1..=5)
                .map(|i| {
                    let x = i as f64;
                    product("p", "US", Some(x), Some(10.0 - 2.0 * x), Some(3.0 * x + 1.0))
                })
                .collect(),
        );
        let m = matrix(&ds);
        for i in 0..3 {
            assert_eq!(m.values[i][i], 1.0);
        }
        let price_rating = m.get(NumericField::Price, NumericField::StarRating);
        let price_count = m.get(NumericField::Price, NumericField::NumRatings);
        assert!((price_rating + 1.0).abs() < 1e-12);
        assert!((price_count - 1.0).abs() < 1e-12);
        assert_symmetric(&m);
    }

    #[test]
    fn uses_pairwise_complete_rows() {
        let ds = ProductDataset::from_products(vec![
            product("a", "US", Some(1.0), Some(1.0), None),
            product("b", "US", Some(2.0), Some(2.0), Some(9.0)),
            product("c", "US", Some(3.0), Some(3.0), Some(1.0)),
            // Would break the price/rating line if it were counted.
            product("d", "US", Some(100.0), None, Some(5.0)),
        ]);
        let m = matrix(&ds);
        let r = m.get(NumericField::Price, NumericField::StarRating);
        assert!((r - 1.0).abs() < 1e-12);
        assert_symmetric(&m);
    }

    #[test]
    fn insufficient_or_constant_data_is_nan() {
        let ds = ProductDataset::from_products(vec![
            product("a", "US", Some(1.0), Some(4.0), Some(7.0)),
            product("b", "US", Some(2.0), Some(4.0), None),
        ]);
        let m = matrix(&ds);
        // star rating is constant
        assert!(m.get(NumericField::Price, NumericField::StarRating).is_nan());
        // only one row has both price and count
        assert!(m.get(NumericField::Price, NumericField::NumRatings).is_nan());
        assert_eq!(m.values[1][1], 1.0);
        assert_symmetric(&m);
    }

    #[test]
    fn entirely_absent_field_has_nan_diagonal() {
        let ds = ProductDataset::from_products(vec![
            product("a", "US", Some(1.0), None, Some(7.0)),
            product("b", "US", Some(2.0), None, Some(8.0)),
        ]);
        let m = matrix(&ds);
        assert_eq!(m.values[0][0], 1.0);
        assert!(m.values[1][1].is_nan());
        assert_eq!(m.values[2][2], 1.0);
        assert!(m.get(NumericField::StarRating, NumericField::Price).is_nan());
    }

    #[test]
    fn pearson_edge_cases() {
        assert!(pearson(&[]).is_nan());
        assert!(pearson(&[(1.0, 2.0)]).is_nan());
        assert!(pearson(&[(1.0, 2.0), (1.0, 3.0)]).is_nan());
        let r = pearson(&[(1.0, 2.0), (2.0, 1.0), (3.0, 4.0)]);
        assert!(r > 0.0 && r < 1.0);
    }

    #[test]
    fn extreme_magnitudes_stay_finite() {
        // Each sum of squares fits in f64; their product does not.
        let small = [(1.0, 1.0), (2.0, 2.0), (3.0, 4.0)];
        let expected = pearson(&small);
        for scale in [1e150, 1e-150] {
            let scaled: Vec<(f64, f64)> =
                small.iter().map(|&(x, y)| (x * scale, y * scale)).collect();
            let r = pearson(&scaled);
            assert!(r.is_finite(), "scale {scale}");
            assert!((r - expected).abs() < 1e-12, "scale {scale}: {r}");
        }
    }
}
