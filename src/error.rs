use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::ColumnKind;

/// Failures reported by loading, analysis and export.
///
/// None of these are fatal: callers skip the requested step and carry on
/// with the next column or command.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Error loading {}: {message}", .path.display())]
    Load { path: PathBuf, message: String },

    #[error("'{column}' is not a {} column", .expected.label())]
    ClassificationMismatch { column: String, expected: ColumnKind },

    #[error("No valid data in {column}")]
    NoValidData { column: String },

    #[error("No data to export")]
    EmptyDataset,

    #[error("Database export failed: {0}")]
    Export(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_message_names_expected_kind() {
        let err = AnalyzerError::ClassificationMismatch {
            column: "Region".into(),
            expected: ColumnKind::Numerical,
        };
        assert_eq!(err.to_string(), "'Region' is not a numerical column");
    }

    #[test]
    fn not_found_message_includes_path() {
        let err = AnalyzerError::NotFound {
            path: PathBuf::from("missing.csv"),
        };
        assert_eq!(err.to_string(), "File not found: missing.csv");
    }
}
