use serde::Serialize;

use crate::data::inference::parse_number;
use crate::data::model::{ColumnKind, Dataset};
use crate::error::{AnalyzerError, Result};

/// Descriptive statistics of a numerical column, at full precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    /// Sample standard deviation; `None` for a single value.
    pub std_dev: Option<f64>,
}

/// Summarise a column classified as numerical.
///
/// Every row is scanned. Empty, missing and unparseable cells are dropped
/// without error, and so are `NaN`/`inf` values: they count toward
/// classification but never enter the statistics.
pub fn analyze_numerical(dataset: &Dataset, column: &str) -> Result<NumericSummary> {
    if !dataset.classification().is(column, ColumnKind::Numerical) {
        return Err(AnalyzerError::ClassificationMismatch {
            column: column.to_string(),
            expected: ColumnKind::Numerical,
        });
    }
    let idx = dataset
        .column_index(column)
        .ok_or_else(|| AnalyzerError::ClassificationMismatch {
            column: column.to_string(),
            expected: ColumnKind::Numerical,
        })?;

    let values: Vec<f64> = dataset
        .present_values(idx)
        .filter_map(parse_number)
        .filter(|v| v.is_finite())
        .collect();
    summarize(column, values).ok_or_else(|| AnalyzerError::NoValidData {
        column: column.to_string(),
    })
}

/// Statistics over `values`, or `None` if there are none.
pub fn summarize(column: &str, mut values: Vec<f64>) -> Option<NumericSummary> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let count = values.len();
    let n = count as f64;
    let mean = values.iter().sum::<f64>() / n;
    let median = if count % 2 == 0 {
        (values[count / 2 - 1] + values[count / 2]) / 2.0
    } else {
        values[count / 2]
    };
    let min = values[0];
    let max = values[count - 1];

    let std_dev = (count > 1).then(|| {
        let sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (sq / (n - 1.0)).sqrt()
    });

    Some(NumericSummary {
        column: column.to_string(),
        count,
        mean,
        median,
        min,
        max,
        range: max - min,
        std_dev,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(headers: &[&str], rows: &[&[&str]]) -> Dataset {
        Dataset::new(
            "t.csv",
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn mean_and_sample_std_dev() {
        let s = summarize("v", vec![10.0, 20.0, 30.0]).unwrap();
        assert_eq!(s.count, 3);
        assert_close(s.mean, 20.0);
        assert_close(s.median, 20.0);
        assert_close(s.std_dev.unwrap(), 10.0);
        assert_close(s.range, 20.0);
    }

    #[test]
    fn median_of_even_count_averages_middle_pair() {
        let s = summarize("v", vec![4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_close(s.median, 2.5);
        assert_close(s.min, 1.0);
        assert_close(s.max, 4.0);
    }

    #[test]
    fn single_value_has_no_std_dev() {
        let s = summarize("v", vec![42.0]).unwrap();
        assert_eq!(s.std_dev, None);
        assert_close(s.range, 0.0);
        assert!(summarize("v", Vec::new()).is_none());
    }

    #[test]
    fn scans_all_rows_and_skips_bad_cells() {
        // 11 of 12 sampled cells parse, so the column stays numerical.
        let mut rows: Vec<Vec<String>> = (0..10).map(|i| vec![i.to_string()]).collect();
        rows.push(vec!["junk".into()]);
        rows.push(Vec::new());
        rows.push(vec!["  ".into()]);
        rows.push(vec!["1,000".into()]);
        let ds = Dataset::new("t.csv", vec!["n".into()], rows);
        let s = analyze_numerical(&ds, "n").unwrap();
        assert_eq!(s.count, 11);
        assert_close(s.max, 1000.0);
        assert_close(s.min, 0.0);
    }

    #[test]
    fn categorical_column_is_a_mismatch() {
        let ds = dataset(&["Region"], &[&["North"], &["South"]]);
        let err = analyze_numerical(&ds, "Region").unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::ClassificationMismatch {
                expected: ColumnKind::Numerical,
                ..
            }
        ));
    }

    #[test]
    fn unknown_column_is_a_mismatch() {
        let ds = dataset(&["a"], &[&["1"]]);
        assert!(matches!(
            analyze_numerical(&ds, "b"),
            Err(AnalyzerError::ClassificationMismatch { .. })
        ));
    }

    #[test]
    fn non_finite_values_are_left_out_of_statistics() {
        let ds = dataset(&["v"], &[&["10"], &["NaN"], &["20"], &["inf"], &["30"]]);
        let s = analyze_numerical(&ds, "v").unwrap();
        assert_eq!(s.count, 3);
        assert_close(s.mean, 20.0);
        assert_close(s.std_dev.unwrap(), 10.0);
    }

    #[test]
    fn all_nan_column_has_no_valid_data() {
        let ds = dataset(&["v"], &[&["NaN"], &["nan"], &[""]]);
        assert_eq!(ds.classification().kind_of("v"), Some(ColumnKind::Numerical));
        assert!(matches!(
            analyze_numerical(&ds, "v"),
            Err(AnalyzerError::NoValidData { .. })
        ));
    }
}
