//! SQLite export of a loaded dataset.

use std::path::Path;

use log::info;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

use crate::data::inference::parse_number;
use crate::data::model::{ColumnKind, Dataset};
use crate::error::{AnalyzerError, Result};

/// Name of the table written by [`export_to_sqlite`].
pub const TABLE_NAME: &str = "csv_data";

/// Default database file.
pub const DEFAULT_DB: &str = "data_analysis.db";

/// Column name as stored in SQLite: spaces and hyphens become `_`, lower-cased.
pub fn sanitize_column_name(header: &str) -> String {
    header.replace([' ', '-'], "_").to_lowercase()
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Write `dataset` to the database at `db_path`, replacing any existing
/// `csv_data` table. Returns the number of rows written.
pub fn export_to_sqlite(dataset: &Dataset, db_path: &Path) -> Result<usize> {
    let mut conn = Connection::open(db_path)?;
    let written = export_to_connection(&mut conn, dataset)?;
    info!("Exported {written} rows to {}", db_path.display());
    Ok(written)
}

/// Export into an open connection inside a single transaction: drop, create,
/// insert, commit. Nothing is committed if any step fails.
pub fn export_to_connection(conn: &mut Connection, dataset: &Dataset) -> Result<usize> {
    if dataset.is_empty() {
        return Err(AnalyzerError::EmptyDataset);
    }

    let classification = dataset.classification();
    let columns: Vec<String> = dataset
        .headers()
        .iter()
        .map(|h| quote_ident(&sanitize_column_name(h)))
        .collect();
    let kinds: Vec<Option<ColumnKind>> = dataset
        .headers()
        .iter()
        .map(|h| classification.kind_of(h))
        .collect();

    let definitions: Vec<String> = columns
        .iter()
        .zip(&kinds)
        .map(|(col, kind)| match kind {
            Some(ColumnKind::Numerical) => format!("{col} REAL"),
            _ => format!("{col} TEXT"),
        })
        .collect();

    let placeholders = vec!["?"; columns.len()].join(", ");
    let table = quote_ident(TABLE_NAME);

    let tx = conn.transaction()?;
    tx.execute(&format!("DROP TABLE IF EXISTS {table}"), [])?;
    tx.execute(
        &format!(
            "CREATE TABLE {table} (id INTEGER PRIMARY KEY, {})",
            definitions.join(", ")
        ),
        [],
    )?;
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {table} ({}) VALUES ({placeholders})",
            columns.join(", ")
        ))?;
        for row in dataset.rows() {
            let values = kinds
                .iter()
                .enumerate()
                .map(|(idx, kind)| cell_value(row.get(idx).map(String::as_str), *kind));
            stmt.execute(params_from_iter(values))?;
        }
    }
    tx.commit()?;

    Ok(dataset.len())
}

/// SQLite value for one cell. Numerical cells that parse to a finite number are
/// stored as REAL; anything else non-empty keeps its trimmed text. Blank or
/// missing is NULL.
fn cell_value(cell: Option<&str>, kind: Option<ColumnKind>) -> Value {
    let Some(text) = cell.map(str::trim).filter(|t| !t.is_empty()) else {
        return Value::Null;
    };
    if kind == Some(ColumnKind::Numerical) {
        if let Some(v) = parse_number(text).filter(|v| v.is_finite()) {
            return Value::Real(v);
        }
    }
    Value::Text(text.to_string())
}
