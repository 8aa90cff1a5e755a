use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

const PRODUCTS: [&str; 5] = ["Laptop", "Phone", "Tablet", "Headphones", "Mouse"];
const REGIONS: [&str; 4] = ["North", "South", "East", "West"];
const CATEGORIES: [&str; 2] = ["Electronics", "Accessories"];

pub const HEADERS: [&str; 7] = [
    "Date",
    "Product",
    "Category",
    "Price",
    "Quantity",
    "Region",
    "Total_Sales",
];

pub const DEFAULT_RECORDS: usize = 1000;
pub const DEFAULT_OUTPUT: &str = "sample_data.csv";

/// Where and how much sample data to write.
#[derive(Debug, Clone)]
pub struct SampleOptions {
    pub records: usize,
    pub output: PathBuf,
    /// Fixed seed for reproducible output; OS entropy when `None`.
    pub seed: Option<u64>,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Write `records` rows of synthetic sales data, dated within the year before
/// `today`.
pub fn generate_sales<W: io::Write, R: Rng + ?Sized>(
    writer: &mut csv::Writer<W>,
    records: usize,
    today: NaiveDate,
    rng: &mut R,
) -> Result<()> {
    writer.write_record(HEADERS).context("writing CSV header")?;

    for i in 0..records {
        let date = today - Duration::days(rng.random_range(0..=365));
        let product = PRODUCTS.choose(rng).copied().unwrap_or(PRODUCTS[0]);
        let category = CATEGORIES.choose(rng).copied().unwrap_or(CATEGORIES[0]);
        let price = round2(rng.random_range(50.0..1000.0));
        let quantity: u32 = rng.random_range(1..=5);
        let region = REGIONS.choose(rng).copied().unwrap_or(REGIONS[0]);
        let total_sales = round2(price * f64::from(quantity));

        writer
            .write_record([
                date.format("%Y-%m-%d").to_string(),
                product.to_string(),
                category.to_string(),
                price.to_string(),
                quantity.to_string(),
                region.to_string(),
                total_sales.to_string(),
            ])
            .with_context(|| format!("writing sample row {i}"))?;
    }

    writer.flush().context("flushing CSV writer")?;
    Ok(())
}

/// Generate a sample file per `options` and return its path.
pub fn write_sample_file(options: &SampleOptions) -> Result<&Path> {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut writer = csv::Writer::from_path(&options.output)
        .with_context(|| format!("creating {}", options.output.display()))?;
    generate_sales(&mut writer, options.records, Local::now().date_naive(), &mut rng)?;
    Ok(options.output.as_path())
}
