use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::inference::classify_columns;

// ---------------------------------------------------------------------------
// ColumnKind – semantic type of a column
// ---------------------------------------------------------------------------

/// Semantic type assigned to a column by type inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numerical,
    Categorical,
}

impl ColumnKind {
    /// Lower-case name used in messages.
    pub fn label(self) -> &'static str {
        match self {
            ColumnKind::Numerical => "numerical",
            ColumnKind::Categorical => "categorical",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numerical => write!(f, "Numerical"),
            ColumnKind::Categorical => write!(f, "Categorical"),
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnClassification – the two disjoint name lists
// ---------------------------------------------------------------------------

/// Column names split by kind, in header order.
///
/// Columns with no non-empty value in the inference sample appear in neither
/// list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnClassification {
    pub numerical: Vec<String>,
    pub categorical: Vec<String>,
}

impl ColumnClassification {
    /// Kind of `column`, or `None` if it was left unclassified (or does not exist).
    pub fn kind_of(&self, column: &str) -> Option<ColumnKind> {
        if self.numerical.iter().any(|c| c == column) {
            Some(ColumnKind::Numerical)
        } else if self.categorical.iter().any(|c| c == column) {
            Some(ColumnKind::Categorical)
        } else {
            None
        }
    }

    pub fn is(&self, column: &str, kind: ColumnKind) -> bool {
        let names = match kind {
            ColumnKind::Numerical => &self.numerical,
            ColumnKind::Categorical => &self.categorical,
        };
        names.iter().any(|c| c == column)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// A loaded table: header names, raw text rows and the classification derived
/// from them. Immutable once built; reload to reclassify.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: PathBuf,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    classification: ColumnClassification,
}

impl Dataset {
    /// Build a dataset and classify its columns.
    pub fn new(source: impl Into<PathBuf>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let classification = classify_columns(&headers, &rows);
        Dataset {
            source: source.into(),
            headers,
            rows,
            classification,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn classification(&self) -> &ColumnClassification {
        &self.classification
    }

    /// Position of the first header called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Iterate the trimmed, non-empty cells of column `idx`.
    /// Cells missing from ragged rows are skipped.
    pub fn present_values(&self, idx: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .filter_map(move |row| row.get(idx))
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}
