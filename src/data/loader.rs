use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use log::info;

use super::model::Dataset;
use crate::error::{AnalyzerError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a comma-delimited file. The first record is the header.
///
/// Rows may be ragged; short rows simply lack their trailing cells.
pub fn load_csv(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AnalyzerError::NotFound {
            path: path.to_path_buf(),
        },
        _ => AnalyzerError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        },
    })?;

    let dataset = read_csv(path, file)?;
    info!(
        "Loaded {}: {} rows, {} columns",
        path.display(),
        dataset.len(),
        dataset.column_count()
    );
    Ok(dataset)
}

/// Parse CSV text from any reader. `source` is recorded on the dataset and
/// used in error messages.
pub fn read_csv<R: Read>(source: &Path, input: R) -> Result<Dataset> {
    let load_err = |message: String| AnalyzerError::Load {
        path: source.to_path_buf(),
        message,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| load_err(format!("reading CSV headers: {e}")))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        return Err(load_err("missing header row".into()));
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| load_err(format!("CSV row {}: {e}", row_no + 1)))?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok(Dataset::new(source, headers, rows))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::ColumnKind;

    fn write_temp(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_header_rows_and_classification() {
        let file = write_temp(b"Product,Price\nLaptop,\"1,200.50\"\nPhone,600\n");
        let ds = load_csv(file.path()).unwrap();
        assert_eq!(ds.headers(), ["Product", "Price"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows()[0][1], "1,200.50");
        assert_eq!(ds.classification().kind_of("Price"), Some(ColumnKind::Numerical));
        assert_eq!(ds.classification().kind_of("Product"), Some(ColumnKind::Categorical));
        assert_eq!(ds.source(), file.path());
    }

    #[test]
    fn ragged_rows_are_kept() {
        let file = write_temp(b"a,b,c\n1,2,3\n4\n5,6\n");
        let ds = load_csv(file.path()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.rows()[1], vec!["4".to_string()]);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, AnalyzerError::NotFound { .. }));
    }

    #[test]
    fn invalid_utf8_is_load_error() {
        let file = write_temp(b"a,b\n1,\xff\xfe\n");
        let err = load_csv(file.path()).unwrap_err();
        assert!(matches!(err, AnalyzerError::Load { .. }));
    }

    #[test]
    fn empty_file_is_load_error() {
        let file = write_temp(b"");
        let err = load_csv(file.path()).unwrap_err();
        assert!(matches!(err, AnalyzerError::Load { .. }));
    }

    #[test]
    fn directory_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_csv(dir.path()).unwrap_err();
        assert!(!matches!(err, AnalyzerError::NotFound { .. }));
    }
}
