use std::fs::File;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::error::ArrowError;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::coerce::{parse_count, parse_numeric};
use super::error::DataError;
use super::model::{
    Product, ProductDataset, COUNTRY_COLUMN, NUM_RATINGS_COLUMN, PRICE_COLUMN, REQUIRED_COLUMNS,
    STAR_RATING_COLUMN, TITLE_COLUMN,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a product listing dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one listing per line (the usual export)
/// * `.json`    – `[{ "product_title": ..., "country": ..., ... }, ...]`
/// * `.parquet` – flat columns with the same names
///
/// Numeric cells that cannot be parsed become absent; the row is kept.
pub fn load_file(path: &Path) -> Result<ProductDataset, DataError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataError::UnsupportedExtension(other.to_string())),
    };

    if dataset.is_empty() {
        log::warn!("{} contains no listings", path.display());
    }
    log::info!(
        "Loaded {} listings from {} ({} countries)",
        dataset.len(),
        path.display(),
        dataset.countries.len()
    );
    Ok(dataset)
}

/// Positions of the required columns within a source's header.
struct ColumnIndex {
    title: usize,
    country: usize,
    price: usize,
    star_rating: usize,
    num_ratings: usize,
}

impl ColumnIndex {
    fn locate(path: &Path, headers: &[String]) -> Result<Self, DataError> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| DataError::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                })
        };
        Ok(ColumnIndex {
            title: find(TITLE_COLUMN)?,
            country: find(COUNTRY_COLUMN)?,
            price: find(PRICE_COLUMN)?,
            star_rating: find(STAR_RATING_COLUMN)?,
            num_ratings: find(NUM_RATINGS_COLUMN)?,
        })
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> DataError + '_ {
    move |source| DataError::Io {
        path: path.to_path_buf(),
        source,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Rows shorter than the header are accepted; the missing cells are absent.
/// Invalid UTF-8 is replaced rather than rejected.
fn load_csv(path: &Path) -> Result<ProductDataset, DataError> {
    let csv_error = |source| DataError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error(path))?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();
    let columns = ColumnIndex::locate(path, &headers)?;

    let mut products = Vec::new();
    for result in reader.byte_records() {
        let record = result.map_err(csv_error)?;
        let cell = |idx: usize| String::from_utf8_lossy(record.get(idx).unwrap_or_default());

        products.push(Product {
            title: cell(columns.title).into_owned(),
            country: cell(columns.country).into_owned(),
            price: parse_numeric(&cell(columns.price)),
            star_rating: parse_numeric(&cell(columns.star_rating)),
            num_ratings: parse_count(&cell(columns.num_ratings)),
        });
    }

    Ok(ProductDataset::from_products(products))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "product_title": "USB-C cable",
///     "country": "US",
///     "product_price": 9.99,
///     "product_star_rating": "4.6",
///     "product_num_ratings": "12,345"
///   },
///   ...
/// ]
/// ```
///
/// Numbers may be JSON numbers or strings; strings are coerced like CSV text.
fn load_json(path: &Path) -> Result<ProductDataset, DataError> {
    let text = std::fs::read_to_string(path).map_err(io_error(path))?;
    let root: JsonValue = serde_json::from_str(&text).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let records = root.as_array().ok_or_else(|| DataError::NotRecords {
        path: path.to_path_buf(),
    })?;

    // `[]` has no columns to check; it loads empty like a header-only CSV.
    for column in REQUIRED_COLUMNS {
        if !records.is_empty() && !records.iter().any(|rec| rec.get(column).is_some()) {
            return Err(DataError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let products = records
        .iter()
        .map(|rec| Product {
            title: json_text(rec.get(TITLE_COLUMN)),
            country: json_text(rec.get(COUNTRY_COLUMN)),
            price: json_number(rec.get(PRICE_COLUMN), parse_numeric),
            star_rating: json_number(rec.get(STAR_RATING_COLUMN), parse_numeric),
            num_ratings: json_number(rec.get(NUM_RATINGS_COLUMN), parse_count),
        })
        .collect();

    Ok(ProductDataset::from_products(products))
}

fn json_text(val: Option<&JsonValue>) -> String {
    match val {
        Some(JsonValue::String(s)) => s.clone(),
        None | Some(JsonValue::Null) => String::new(),
        Some(other) => other.to_string(),
    }
}

fn json_number(val: Option<&JsonValue>, coerce: fn(&str) -> Option<f64>) -> Option<f64> {
    match val {
        Some(JsonValue::Number(n)) => n.as_f64().filter(|v| v.is_finite()),
        Some(JsonValue::String(s)) => coerce(s),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of product listings.
///
/// Text columns may be any Arrow type (they are rendered with Arrow's display
/// formatter). Numeric columns may be floats, integers or strings; strings are
/// coerced like CSV text.
fn load_parquet(path: &Path) -> Result<ProductDataset, DataError> {
    let parquet_error = |source| DataError::Parquet {
        path: path.to_path_buf(),
        source,
    };
    let arrow_error = |source| DataError::Arrow {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error(path))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(parquet_error)?;

    let names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let columns = ColumnIndex::locate(path, &names)?;

    let reader = builder.build().map_err(parquet_error)?;

    let mut products = Vec::new();
    for batch_result in reader {
        let batch = batch_result.map_err(arrow_error)?;

        let mut titles = text_cells(batch.column(columns.title)).map_err(arrow_error)?;
        let mut countries = text_cells(batch.column(columns.country)).map_err(arrow_error)?;
        let prices =
            numeric_cells(batch.column(columns.price), parse_numeric).map_err(arrow_error)?;
        let ratings =
            numeric_cells(batch.column(columns.star_rating), parse_numeric).map_err(arrow_error)?;
        let counts =
            numeric_cells(batch.column(columns.num_ratings), parse_count).map_err(arrow_error)?;

        for row in 0..batch.num_rows() {
            products.push(Product {
                title: titles[row].take().unwrap_or_default(),
                country: countries[row].take().unwrap_or_default(),
                price: prices[row],
                star_rating: ratings[row],
                num_ratings: counts[row],
            });
        }
    }

    Ok(ProductDataset::from_products(products))
}

// -- Parquet / Arrow helpers --

/// Render every cell of a column as text, keeping nulls as `None`.
fn text_cells(col: &ArrayRef) -> Result<Vec<Option<String>>, ArrowError> {
    (0..col.len())
        .map(|row| {
            if col.is_null(row) {
                Ok(None)
            } else {
                array_value_to_string(col.as_ref(), row).map(Some)
            }
        })
        .collect()
}

/// Read a numeric column; string columns go through `coerce`.
fn numeric_cells(
    col: &ArrayRef,
    coerce: fn(&str) -> Option<f64>,
) -> Result<Vec<Option<f64>>, ArrowError> {
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => Ok(text_cells(col)?
            .into_iter()
            .map(|cell| cell.as_deref().and_then(coerce))
            .collect()),
        _ => {
            let floats = cast(col.as_ref(), &DataType::Float64)?;
            Ok(floats
                .as_primitive::<Float64Type>()
                .iter()
                .map(|v| v.filter(|x| x.is_finite()))
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    use super::*;

    const HEADER: &str =
        "product_title,country,product_price,product_star_rating,product_num_ratings\n";

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_coerces_numeric_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "items.csv",
            &format!(
                "{HEADER}\
                 Cable,US,9.99,4.6,\"1,000\"\n\
                 Lamp,DE,N/A,4.1,250\n\
                 Mug,US,,not rated,\n"
            ),
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.countries, vec!["US", "DE"]);

        let cable = &ds.products[0];
        assert_eq!(cable.title, "Cable");
        assert_eq!(cable.price, Some(9.99));
        assert_eq!(cable.star_rating, Some(4.6));
        assert_eq!(cable.num_ratings, Some(1000.0));

        assert_eq!(ds.products[1].price, None);
        assert_eq!(ds.products[1].num_ratings, Some(250.0));

        let mug = &ds.products[2];
        assert_eq!(mug.price, None);
        assert_eq!(mug.star_rating, None);
        assert_eq!(mug.num_ratings, None);
    }

    #[test]
    fn csv_numeric_fields_are_finite_or_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "items.csv",
            &format!(
                "{HEADER}\
                 a,US,inf,NaN,\"1,2,3\"\n\
                 b,US,$5,5 stars,-\n\
                 c,US, 7.5 ,3,\" 42 \"\n"
            ),
        );

        let ds = load_file(&path).unwrap();
        for p in &ds.products {
            for v in [p.price, p.star_rating, p.num_ratings].into_iter().flatten() {
                assert!(v.is_finite());
            }
        }
        assert_eq!(ds.products[0].price, None);
        assert_eq!(ds.products[0].num_ratings, Some(123.0));
        assert_eq!(ds.products[1].price, None);
        assert_eq!(ds.products[2].price, Some(7.5));
        assert_eq!(ds.products[2].num_ratings, Some(42.0));
    }

    #[test]
    fn csv_extra_columns_and_order_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "items.csv",
            "asin,product_num_ratings,country,product_title,product_star_rating,product_price\n\
             B01,\"2,500\",JP,Kettle,4.9,30\n",
        );

        let ds = load_file(&path).unwrap();
        let kettle = &ds.products[0];
        assert_eq!(kettle.title, "Kettle");
        assert_eq!(kettle.country, "JP");
        assert_eq!(kettle.price, Some(30.0));
        assert_eq!(kettle.star_rating, Some(4.9));
        assert_eq!(kettle.num_ratings, Some(2500.0));
    }

    #[test]
    fn csv_short_rows_become_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "items.csv", &format!("{HEADER}Cable,US,9.99\n"));

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.products[0].price, Some(9.99));
        assert_eq!(ds.products[0].star_rating, None);
        assert_eq!(ds.products[0].num_ratings, None);
    }

    #[test]
    fn csv_missing_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "items.csv",
            "product_title,country,product_price,product_star_rating\nCable,US,1,2\n",
        );

        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            err,
            DataError::MissingColumn {
                column: "product_num_ratings",
                ..
            }
        ));
        assert!(err.to_string().contains("product_num_ratings"));
    }

    #[test]
    fn missing_file_is_fatal_and_named() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");

        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("listings.xlsx")).unwrap_err();
        assert!(matches!(err, DataError::UnsupportedExtension(ext) if ext == "xlsx"));
    }

    #[test]
    fn loading_twice_is_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "items.csv",
            &format!("{HEADER}Cable,US,9.99,4.6,\"1,000\"\nLamp,DE,x,4.1,\n"),
        );

        assert_eq!(load_file(&path).unwrap(), load_file(&path).unwrap());
    }

    #[test]
    fn json_accepts_numbers_and_strings() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "items.json",
            r#"[
                {"product_title": "Cable", "country": "US", "product_price": 9.99,
                 "product_star_rating": "4.6", "product_num_ratings": "12,345"},
                {"product_title": "Lamp", "country": "DE", "product_price": null,
                 "product_star_rating": 4, "product_num_ratings": 7}
            ]"#,
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.products[0].price, Some(9.99));
        assert_eq!(ds.products[0].star_rating, Some(4.6));
        assert_eq!(ds.products[0].num_ratings, Some(12345.0));
        assert_eq!(ds.products[1].price, None);
        assert_eq!(ds.products[1].star_rating, Some(4.0));
        assert_eq!(ds.products[1].num_ratings, Some(7.0));
    }

    #[test]
    fn json_must_be_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "items.json", r#"{"product_title": "Cable"}"#);
        assert!(matches!(
            load_file(&path).unwrap_err(),
            DataError::NotRecords { .. }
        ));

        let path = write_file(&dir, "short.json", r#"[{"product_title": "Cable"}]"#);
        assert!(matches!(
            load_file(&path).unwrap_err(),
            DataError::MissingColumn {
                column: "country",
                ..
            }
        ));
    }

    #[test]
    fn empty_sources_load_as_empty_datasets() {
        let dir = tempfile::tempdir().unwrap();

        let json = write_file(&dir, "items.json", "[]");
        let ds = load_file(&json).unwrap();
        assert!(ds.is_empty());
        assert!(ds.countries.is_empty());

        let csv = write_file(&dir, "items.csv", &format!("{HEADER}\n"));
        assert_eq!(load_file(&csv).unwrap(), ds);
    }

    #[test]
    fn parquet_reads_mixed_column_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("product_title", DataType::Utf8, false),
            Field::new("country", DataType::Utf8, false),
            Field::new("product_price", DataType::Float64, true),
            Field::new("product_star_rating", DataType::Utf8, true),
            Field::new("product_num_ratings", DataType::Int64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Cable", "Lamp"])),
                Arc::new(StringArray::from(vec!["US", "DE"])),
                Arc::new(Float64Array::from(vec![Some(9.99), None])),
                Arc::new(StringArray::from(vec![Some("4.6"), Some("unrated")])),
                Arc::new(Int64Array::from(vec![Some(1000), None])),
            ],
        )
        .unwrap();

        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.products[0].title, "Cable");
        assert_eq!(ds.products[0].price, Some(9.99));
        assert_eq!(ds.products[0].star_rating, Some(4.6));
        assert_eq!(ds.products[0].num_ratings, Some(1000.0));
        assert_eq!(ds.products[1].country, "DE");
        assert_eq!(ds.products[1].price, None);
        assert_eq!(ds.products[1].star_rating, None);
        assert_eq!(ds.products[1].num_ratings, None);
    }
}
