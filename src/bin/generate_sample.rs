use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const ROWS: usize = 1000;
const COLUMNS: [&str; 5] = [
    "product_title",
    "country",
    "product_price",
    "product_star_rating",
    "product_num_ratings",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// `1234567` → `"1,234,567"`
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// One listing as raw text cells, including the malformed values real
/// exports contain.
fn generate_row(i: usize, rng: &mut SimpleRng) -> [String; 5] {
    let countries = ["US", "UK", "DE", "IN", "JP", "CA"];
    let adjectives = ["Wireless", "Compact", "Stainless", "Organic", "Smart", "Portable"];
    let nouns = ["Headphones", "Kettle", "Notebook", "Charger", "Backpack", "Desk Lamp"];

    let title = format!("{} {} #{i}", rng.pick(&adjectives), rng.pick(&nouns));
    let country = rng.pick(&countries).to_string();

    // Log-normal-ish prices; about 5% unparseable.
    let price = match rng.next_f64() {
        r if r < 0.03 => String::new(),
        r if r < 0.05 => "N/A".to_string(),
        _ => format!("{:.2}", rng.gauss(3.0, 0.8).exp()),
    };

    let rating = if rng.next_f64() < 0.04 {
        String::new()
    } else {
        format!("{:.1}", rng.gauss(4.3, 0.35).clamp(1.0, 5.0))
    };

    let num_ratings = if rng.next_f64() < 0.03 {
        String::new()
    } else {
        group_thousands(rng.gauss(7.0, 2.0).exp().round() as u64)
    };

    [title, country, price, rating, num_ratings]
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows: Vec<[String; 5]> = (0..ROWS).map(|i| generate_row(i, &mut rng)).collect();

    // Write CSV
    let csv_path = "sample_products.csv";
    let mut writer = csv::Writer::from_path(csv_path).context("creating CSV output")?;
    writer.write_record(COLUMNS).context("writing CSV header")?;
    for row in &rows {
        writer.write_record(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV output")?;

    // Write Parquet (all columns as strings, like an untyped export)
    let schema = Arc::new(Schema::new(
        COLUMNS
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, false))
            .collect::<Vec<_>>(),
    ));
    let columns: Vec<ArrayRef> = (0..COLUMNS.len())
        .map(|c| {
            let values: Vec<&str> = rows.iter().map(|row| row[c].as_str()).collect();
            Arc::new(StringArray::from(values)) as ArrayRef
        })
        .collect();
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let parquet_path = "sample_products.parquet";
    let file = File::create(parquet_path).context("creating Parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating Parquet writer")?;
    writer.write(&batch).context("writing Parquet batch")?;
    writer.close().context("closing Parquet writer")?;

    println!("Wrote {ROWS} listings to {csv_path} and {parquet_path}");
    Ok(())
}
