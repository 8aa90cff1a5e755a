//! Human-readable overview and analysis report, plus a JSON form of the report.

use std::fmt::Write;

use chrono::Local;
use log::warn;
use serde::Serialize;

use crate::analysis::categorical::{analyze_categorical, CategoricalSummary};
use crate::analysis::numeric::{analyze_numerical, NumericSummary};
use crate::data::model::Dataset;

const RULE_WIDE: usize = 60;
const RULE_NARROW: usize = 40;

/// Rows shown in the overview sample.
const SAMPLE_PREVIEW_ROWS: usize = 3;

/// How much of the dataset the report covers.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// Leading columns of each kind to analyze.
    pub columns: usize,
    /// Ranked values shown per categorical column.
    pub top: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { columns: 3, top: 5 }
    }
}

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// Insert `,` every three digits of the integer part.
fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{sign}{out}")
}

/// `1234567.891` → `1,234,567.89`
pub fn format_decimal(value: f64) -> String {
    let fixed = format!("{value:.2}");
    match fixed.split_once('.') {
        Some((int, frac)) => format!("{}.{frac}", group_thousands(int)),
        None => group_thousands(&fixed),
    }
}

/// `12345` → `12,345`
pub fn format_count(value: usize) -> String {
    group_thousands(&value.to_string())
}

// ---------------------------------------------------------------------------
// Text sections
// ---------------------------------------------------------------------------

/// Dataset overview: size, column kinds and the first few rows.
pub fn render_overview(dataset: &Dataset) -> String {
    let mut out = String::new();
    let classification = dataset.classification();

    let _ = writeln!(out, "\n{}", "=".repeat(RULE_WIDE));
    let _ = writeln!(out, "DATASET OVERVIEW");
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDE));
    let _ = writeln!(out, "File: {}", dataset.source().display());
    let _ = writeln!(
        out,
        "Size: {} rows × {} columns",
        format_count(dataset.len()),
        dataset.column_count()
    );

    let _ = writeln!(out, "\nColumns:");
    for (i, header) in dataset.headers().iter().enumerate() {
        let kind = classification
            .kind_of(header)
            .map_or_else(|| "Unclassified".to_string(), |k| k.to_string());
        let _ = writeln!(out, "  {:2}. {header:20} ({kind})", i + 1);
    }

    let _ = writeln!(out, "\nSample data:");
    for (i, row) in dataset.rows().iter().take(SAMPLE_PREVIEW_ROWS).enumerate() {
        let _ = writeln!(out, "  Row {}: {row:?}", i + 1);
    }
    out
}

pub fn render_numeric(summary: &NumericSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{} - ANALYSIS", summary.column.to_uppercase());
    let _ = writeln!(out, "{}", "-".repeat(RULE_NARROW));
    let _ = writeln!(out, "Count:      {}", format_count(summary.count));
    let _ = writeln!(out, "Mean:       {}", format_decimal(summary.mean));
    let _ = writeln!(out, "Median:     {}", format_decimal(summary.median));
    let _ = writeln!(out, "Min:        {}", format_decimal(summary.min));
    let _ = writeln!(out, "Max:        {}", format_decimal(summary.max));
    let _ = writeln!(out, "Range:      {}", format_decimal(summary.range));
    if let Some(sd) = summary.std_dev {
        let _ = writeln!(out, "Std Dev:    {}", format_decimal(sd));
    }
    out
}

pub fn render_categorical(summary: &CategoricalSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{} - ANALYSIS", summary.column.to_uppercase());
    let _ = writeln!(out, "{}", "-".repeat(RULE_NARROW));
    let _ = writeln!(out, "Unique values: {}", summary.unique_values);
    let _ = writeln!(out, "Total records: {}", summary.total_records);
    let _ = writeln!(out, "\nTop {} values:", summary.top.len());
    for ranked in &summary.top {
        let _ = writeln!(
            out,
            "  {:15} {:>6} ({:5.1}%)",
            ranked.value,
            format_count(ranked.count),
            ranked.percentage
        );
    }
    out
}

// ---------------------------------------------------------------------------
// Full report
// ---------------------------------------------------------------------------

/// A column the report could not analyze.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedColumn {
    pub column: String,
    pub reason: String,
}

/// Everything the report shows, in serializable form.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetReport {
    pub dataset: String,
    pub generated: String,
    pub total_rows: usize,
    pub total_columns: usize,
    pub numerical_columns: usize,
    pub categorical_columns: usize,
    pub numerical: Vec<NumericSummary>,
    pub categorical: Vec<CategoricalSummary>,
    pub skipped: Vec<SkippedColumn>,
}

/// Analyze the leading columns of each kind. A column that fails is recorded
/// as skipped and the rest of the report continues.
pub fn build_report(dataset: &Dataset, options: &ReportOptions) -> DatasetReport {
    let classification = dataset.classification();
    let mut skipped = Vec::new();

    let mut numerical = Vec::new();
    for column in classification.numerical.iter().take(options.columns) {
        match analyze_numerical(dataset, column) {
            Ok(summary) => numerical.push(summary),
            Err(e) => {
                warn!("skipping numerical column '{column}': {e}");
                skipped.push(SkippedColumn {
                    column: column.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let mut categorical = Vec::new();
    for column in classification.categorical.iter().take(options.columns) {
        match analyze_categorical(dataset, column, options.top) {
            Ok(summary) => categorical.push(summary),
            Err(e) => {
                warn!("skipping categorical column '{column}': {e}");
                skipped.push(SkippedColumn {
                    column: column.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    DatasetReport {
        dataset: dataset.source().display().to_string(),
        generated: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        total_rows: dataset.len(),
        total_columns: dataset.column_count(),
        numerical_columns: classification.numerical.len(),
        categorical_columns: classification.categorical.len(),
        numerical,
        categorical,
        skipped,
    }
}

pub fn render_report(report: &DatasetReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", "=".repeat(RULE_WIDE));
    let _ = writeln!(out, "DATA ANALYSIS REPORT");
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDE));
    let _ = writeln!(out, "Dataset: {}", report.dataset);
    let _ = writeln!(out, "Generated: {}", report.generated);

    let _ = writeln!(out, "\nQuick Statistics:");
    let _ = writeln!(out, "  Total rows: {}", format_count(report.total_rows));
    let _ = writeln!(out, "  Total columns: {}", report.total_columns);
    let _ = writeln!(out, "  Numerical columns: {}", report.numerical_columns);
    let _ = writeln!(out, "  Categorical columns: {}", report.categorical_columns);

    if !report.numerical.is_empty() {
        let _ = writeln!(out, "\nNumerical Analysis:");
        for summary in &report.numerical {
            out.push_str(&render_numeric(summary));
        }
    }
    if !report.categorical.is_empty() {
        let _ = writeln!(out, "\nCategorical Analysis:");
        for summary in &report.categorical {
            out.push_str(&render_categorical(summary));
        }
    }
    for skipped in &report.skipped {
        let _ = writeln!(out, "\nSkipped {}: {}", skipped.column, skipped.reason);
    }
    out
}
