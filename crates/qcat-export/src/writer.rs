use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use qcat_core::{CanonicalProduct, OutputFormat};

use crate::error::ExportError;

/// Paths written by [`export_category`]; `None` for formats not selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportedFiles {
    pub json: Option<PathBuf>,
    pub csv: Option<PathBuf>,
}

impl ExportedFiles {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.json.is_none() && self.csv.is_none()
    }
}

/// `{prefix}_{category}_{YYYYMMDD_HHMMSS}` with path-unsafe characters in the
/// category replaced by `_`.
#[must_use]
pub fn file_stem(prefix: &str, category: &str, timestamp: NaiveDateTime) -> String {
    let category: String = category
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{prefix}_{category}_{}", timestamp.format("%Y%m%d_%H%M%S"))
}

/// Writes one category's products in the selected formats under `dir`.
///
/// An empty product list writes nothing and returns an empty
/// [`ExportedFiles`]. The directory is created when missing.
///
/// # Errors
///
/// Returns [`ExportError`] if the directory or a file cannot be written.
pub fn export_category(
    dir: &Path,
    prefix: &str,
    category: &str,
    products: &[CanonicalProduct],
    format: OutputFormat,
    timestamp: NaiveDateTime,
) -> Result<ExportedFiles, ExportError> {
    let mut written = ExportedFiles::default();
    if products.is_empty() {
        return Ok(written);
    }

    std::fs::create_dir_all(dir).map_err(|e| ExportError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;

    let stem = file_stem(prefix, category, timestamp);

    if format.writes_json() {
        let path = dir.join(format!("{stem}.json"));
        write_json(&path, products)?;
        tracing::info!(path = %path.display(), count = products.len(), "saved JSON");
        written.json = Some(path);
    }

    if format.writes_csv() {
        let path = dir.join(format!("{stem}.csv"));
        write_csv(&path, products)?;
        tracing::info!(path = %path.display(), count = products.len(), "saved CSV");
        written.csv = Some(path);
    }

    Ok(written)
}

/// Writes `products` as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`ExportError::Io`] or [`ExportError::Json`] on failure.
pub fn write_json(path: &Path, products: &[CanonicalProduct]) -> Result<(), ExportError> {
    let file = create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, products).map_err(|e| ExportError::Json {
        path: path.display().to_string(),
        source: e,
    })?;
    writer.flush().map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

/// Writes `products` as CSV; the header row comes from the record field
/// names and is written with the first record.
///
/// # Errors
///
/// Returns [`ExportError::Io`] or [`ExportError::Csv`] on failure.
pub fn write_csv(path: &Path, products: &[CanonicalProduct]) -> Result<(), ExportError> {
    let file = create(path)?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    let csv_err = |e: csv::Error| ExportError::Csv {
        path: path.display().to_string(),
        source: e,
    };

    for product in products {
        writer.serialize(product).map_err(csv_err)?;
    }
    writer.flush().map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

fn create(path: &Path) -> Result<File, ExportError> {
    File::create(path).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        source: e,
    })
}
