use std::collections::HashMap;

use serde::Serialize;

use crate::data::model::{ColumnKind, Dataset};
use crate::error::{AnalyzerError, Result};

/// Default number of ranked values returned.
pub const DEFAULT_TOP: usize = 10;

// ---------------------------------------------------------------------------
// FrequencyTable – value → count, in encounter order
// ---------------------------------------------------------------------------

/// Occurrence counts per distinct value.
///
/// Entries stay in first-seen order so that ranking ties resolve the same way
/// on every run.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn add(&mut self, value: &str) {
        match self.index.get(value) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(value.to_string(), self.entries.len());
                self.entries.push((value.to_string(), 1));
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, value: &str) -> Option<usize> {
        self.index.get(value).map(|&pos| self.entries[pos].1)
    }

    /// Number of distinct values.
    pub fn unique(&self) -> usize {
        self.entries.len()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries by count descending; equal counts keep first-seen order.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> =
            self.entries.iter().map(|(v, n)| (v.as_str(), *n)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

impl<'a> FromIterator<&'a str> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut table = FrequencyTable::default();
        for value in iter {
            table.add(value);
        }
        table
    }
}

// ---------------------------------------------------------------------------
// CategoricalSummary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedValue {
    pub value: String,
    pub count: usize,
    /// Share of non-empty records, 0–100.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    pub column: String,
    pub unique_values: usize,
    pub total_records: usize,
    pub top: Vec<RankedValue>,
}

/// Frequency analysis of a column classified as categorical, keeping the
/// `top` most frequent values.
pub fn analyze_categorical(dataset: &Dataset, column: &str, top: usize) -> Result<CategoricalSummary> {
    let mismatch = || AnalyzerError::ClassificationMismatch {
        column: column.to_string(),
        expected: ColumnKind::Categorical,
    };
    if !dataset.classification().is(column, ColumnKind::Categorical) {
        return Err(mismatch());
    }
    let idx = dataset.column_index(column).ok_or_else(mismatch)?;

    let table: FrequencyTable = dataset.present_values(idx).collect();
    // Classification needs one sampled value, so this only guards direct misuse.
    if table.is_empty() {
        return Err(AnalyzerError::NoValidData {
            column: column.to_string(),
        });
    }

    let total = table.total();
    let top = table
        .ranked()
        .into_iter()
        .take(top)
        .map(|(value, count)| RankedValue {
            value: value.to_string(),
            count,
            percentage: count as f64 / total as f64 * 100.0,
        })
        .collect();

    Ok(CategoricalSummary {
        column: column.to_string(),
        unique_values: table.unique(),
        total_records: total,
        top,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_column(values: &[&str]) -> Dataset {
        Dataset::new(
            "t.csv",
            vec!["c".to_string()],
            values.iter().map(|v| vec![v.to_string()]).collect(),
        )
    }

    #[test]
    fn counts_and_ranks_with_first_seen_ties() {
        let table: FrequencyTable = ["A", "B", "A", "C", "A"].into_iter().collect();
        assert_eq!(table.get("A"), Some(3));
        assert_eq!(table.get("B"), Some(1));
        assert_eq!(table.get("C"), Some(1));
        assert_eq!(table.get("D"), None);
        assert_eq!(table.ranked(), vec![("A", 3), ("B", 1), ("C", 1)]);
    }

    #[test]
    fn top_two_with_percentages() {
        let ds = single_column(&["A", "B", "A", "C", "A"]);
        let s = analyze_categorical(&ds, "c", 2).unwrap();
        assert_eq!(s.unique_values, 3);
        assert_eq!(s.total_records, 5);
        assert_eq!(s.top.len(), 2);
        assert_eq!((s.top[0].value.as_str(), s.top[0].count), ("A", 3));
        assert!((s.top[0].percentage - 60.0).abs() < 1e-9);
        assert_eq!((s.top[1].value.as_str(), s.top[1].count), ("B", 1));
        assert!((s.top[1].percentage - 20.0).abs() < 1e-9);
    }

    #[test]
    fn values_are_trimmed_and_blanks_skipped() {
        let ds = Dataset::new(
            "t.csv",
            vec!["id".to_string(), "c".to_string()],
            vec![
                vec!["1".into(), " North ".into()],
                vec!["2".into(), "North".into()],
                vec!["3".into(), "".into()],
                vec!["4".into()],
                vec!["5".into(), "South".into()],
            ],
        );
        let s = analyze_categorical(&ds, "c", DEFAULT_TOP).unwrap();
        assert_eq!(s.total_records, 3);
        assert_eq!(s.top[0].value, "North");
        assert_eq!(s.top[0].count, 2);
    }

    #[test]
    fn top_larger_than_unique_returns_all() {
        let ds = single_column(&["x", "y"]);
        let s = analyze_categorical(&ds, "c", 50).unwrap();
        assert_eq!(s.top.len(), 2);
    }

    #[test]
    fn numerical_column_is_a_mismatch() {
        let ds = single_column(&["1", "2", "3"]);
        let err = analyze_categorical(&ds, "c", DEFAULT_TOP).unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::ClassificationMismatch {
                expected: ColumnKind::Categorical,
                ..
            }
        ));
    }

    #[test]
    fn unclassified_column_is_a_mismatch() {
        let ds = single_column(&["", " "]);
        assert!(matches!(
            analyze_categorical(&ds, "c", DEFAULT_TOP),
            Err(AnalyzerError::ClassificationMismatch { .. })
        ));
    }
}
