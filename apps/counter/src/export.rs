//! # Inventory Export
//!
//! Writes the filtered inventory as a table, one object per product with
//! the French column headers of the inventory screen.
//!
//! ```text
//! filter_inventory ──► export_rows ──► InventoryExporter::export
//!                                            │
//!                                            ▼
//!                              <dir>/inventaire_2025-06-01.json
//! ```
//!
//! The file is staged next to its target and renamed into place, so a
//! failed export leaves no partial file behind.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use officine_core::inventory::ExportRow;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize export rows: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File name of the export for `today`.
///
/// ```rust
/// use chrono::NaiveDate;
/// use officine_counter::export::export_file_name;
///
/// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// assert_eq!(export_file_name(today), "inventaire_2025-06-01.json");
/// ```
pub fn export_file_name(today: NaiveDate) -> String {
    format!("inventaire_{}.json", today.format("%Y-%m-%d"))
}

/// Destination for inventory exports.
pub trait InventoryExporter {
    /// Writes `rows` under `file_name` and returns the written path.
    fn export(&self, file_name: &str, rows: &[ExportRow]) -> Result<PathBuf, ExportError>;
}

/// Writes a pretty-printed JSON array into a directory.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    dir: PathBuf,
}

impl JsonExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonExporter { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl InventoryExporter for JsonExporter {
    fn export(&self, file_name: &str, rows: &[ExportRow]) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        debug!(path = %path.display(), rows = rows.len(), "Writing inventory export");

        let mut staged = NamedTempFile::new_in(&self.dir)?;
        {
            let mut writer = BufWriter::new(staged.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, rows)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        staged.persist(&path).map_err(|e| e.error)?;

        Ok(path)
    }
}
