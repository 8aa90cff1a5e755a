use std::path::Path;

use log::warn;

use crate::data::loader::load_csv;
use crate::data::model::Dataset;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// The currently loaded dataset and the outcome of the last load.
#[derive(Debug, Default)]
pub struct Session {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Dataset>,

    /// Message describing the last load.
    pub status_message: Option<String>,
}

impl Session {
    /// Load `path` and make it the current dataset.
    ///
    /// On failure the previous dataset stays in place and the error is kept
    /// in `status_message`.
    pub fn load(&mut self, path: &Path) -> Result<&Dataset> {
        match load_csv(path) {
            Ok(dataset) => {
                self.status_message = Some(format!(
                    "✓ Loaded {}: {} rows, {} columns",
                    path.display(),
                    dataset.len(),
                    dataset.column_count()
                ));
                Ok(self.dataset.insert(dataset))
            }
            Err(e) => {
                warn!("Failed to load file: {e}");
                self.status_message = Some(format!("✗ {e}"));
                Err(e)
            }
        }
    }

    /// The loaded dataset, if any.
    pub fn current(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }
}
