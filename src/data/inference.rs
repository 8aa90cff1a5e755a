use log::debug;

use super::model::ColumnClassification;

/// Number of leading rows inspected per column.
pub const SAMPLE_ROWS: usize = 100;

/// A column is numerical when strictly more than this share of its sample parses.
pub const NUMERIC_THRESHOLD: f64 = 0.8;

/// Parse a cell as a number: trim, drop every `,` (thousands separators), then
/// parse as `f64`. `NaN` and `inf` spellings parse too.
pub fn parse_number(cell: &str) -> Option<f64> {
    let cleaned = cell.trim().replace(',', "");
    cleaned.trim().parse::<f64>().ok()
}

/// Classify every column from the first [`SAMPLE_ROWS`] rows.
///
/// Empty and missing cells are not sampled. A column without a single sampled
/// value is left out of both lists.
pub fn classify_columns(headers: &[String], rows: &[Vec<String>]) -> ColumnClassification {
    let prefix = &rows[..rows.len().min(SAMPLE_ROWS)];
    let mut classification = ColumnClassification::default();

    for (idx, header) in headers.iter().enumerate() {
        let mut sampled = 0usize;
        let mut numeric = 0usize;
        for cell in prefix.iter().filter_map(|row| row.get(idx)) {
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            sampled += 1;
            if parse_number(cell).is_some() {
                numeric += 1;
            }
        }

        if sampled == 0 {
            debug!("column '{header}' has no sampled values; left unclassified");
            continue;
        }

        let ratio = numeric as f64 / sampled as f64;
        if ratio > NUMERIC_THRESHOLD {
            debug!("column '{header}': {numeric}/{sampled} numeric → numerical");
            classification.numerical.push(header.clone());
        } else {
            debug!("column '{header}': {numeric}/{sampled} numeric → categorical");
            classification.categorical.push(header.clone());
        }
    }

    classification
}
