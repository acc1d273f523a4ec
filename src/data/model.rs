use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Source column names
// ---------------------------------------------------------------------------

pub const TITLE_COLUMN: &str = "product_title";
pub const COUNTRY_COLUMN: &str = "country";
pub const PRICE_COLUMN: &str = "product_price";
pub const STAR_RATING_COLUMN: &str = "product_star_rating";
pub const NUM_RATINGS_COLUMN: &str = "product_num_ratings";

/// Every source must carry these columns; anything else is ignored.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    TITLE_COLUMN,
    COUNTRY_COLUMN,
    PRICE_COLUMN,
    STAR_RATING_COLUMN,
    NUM_RATINGS_COLUMN,
];

// ---------------------------------------------------------------------------
// NumericField – the three coerced columns
// ---------------------------------------------------------------------------

/// One of the numeric columns of a [`Product`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Price,
    StarRating,
    NumRatings,
}

impl NumericField {
    /// Fields in correlation-matrix order.
    pub const ALL: [NumericField; 3] = [
        NumericField::Price,
        NumericField::StarRating,
        NumericField::NumRatings,
    ];

    /// Short human label for axes and tables.
    pub fn label(self) -> &'static str {
        match self {
            NumericField::Price => "Price",
            NumericField::StarRating => "Star rating",
            NumericField::NumRatings => "Num ratings",
        }
    }
}

// ---------------------------------------------------------------------------
// Product – one row of the dataset
// ---------------------------------------------------------------------------

/// A single product listing.
///
/// Numeric fields are `None` when the source cell was empty or unparseable.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub title: String,
    pub country: String,
    pub price: Option<f64>,
    pub star_rating: Option<f64>,
    pub num_ratings: Option<f64>,
}

impl Product {
    pub fn value(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::Price => self.price,
            NumericField::StarRating => self.star_rating,
            NumericField::NumRatings => self.num_ratings,
        }
    }
}

// ---------------------------------------------------------------------------
// ProductDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with its country index.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDataset {
    /// All listings, in source order.
    pub products: Vec<Product>,
    /// Distinct countries in order of first appearance.
    pub countries: Vec<String>,
}

impl ProductDataset {
    /// Build the country index from the loaded products.
    pub fn from_products(products: Vec<Product>) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut countries = Vec::new();
        for product in &products {
            if seen.insert(product.country.as_str()) {
                countries.push(product.country.clone());
            }
        }
        ProductDataset {
            products,
            countries,
        }
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Shorthand used by tests across the crate.
    pub(crate) fn product(
        title: &str,
        country: &str,
        price: Option<f64>,
        star_rating: Option<f64>,
        num_ratings: Option<f64>,
    ) -> Product {
        Product {
            title: title.to_string(),
            country: country.to_string(),
            price,
            star_rating,
            num_ratings,
        }
    }

    #[test]
    fn countries_keep_first_appearance_order() {
        let ds = ProductDataset::from_products(vec![
            product("a", "US", None, None, None),
            product("b", "DE", None, None, None),
            product("c", "US", None, None, None),
            product("d", "IN", None, None, None),
        ]);
        assert_eq!(ds.countries, vec!["US", "DE", "IN"]);
        assert_eq!(ds.len(), 4);
        assert!(!ds.is_empty());
    }

    #[test]
    fn value_selects_field() {
        let p = product("a", "US", Some(1.0), Some(4.5), None);
        assert_eq!(p.value(NumericField::Price), Some(1.0));
        assert_eq!(p.value(NumericField::StarRating), Some(4.5));
        assert_eq!(p.value(NumericField::NumRatings), None);
    }
}
