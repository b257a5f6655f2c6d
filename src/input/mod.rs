use std::path::{Component, Path, PathBuf};

pub mod reader;
pub mod table;

use reader::open_maybe_gz;
pub use table::{SsmTable, is_missing, parse_ssm};

pub const GENE_COLUMN: &str = "gene_affected";
pub const READ_COUNT_COLUMN: &str = "total_read_count";

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("invalid file name: {0}")]
    InvalidFileName(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("missing column: {0}")]
    MissingColumn(String),
}

/// Joins `filename` onto the data directory. Only plain relative names are
/// accepted so that every resolved path stays inside `data_dir`.
pub fn resolve_path(data_dir: &Path, filename: &str) -> Result<PathBuf, InputError> {
    let trimmed = filename.trim();
    if trimmed.is_empty() {
        return Err(InputError::InvalidFileName("file name is empty".to_string()));
    }
    let candidate = Path::new(trimmed);
    for component in candidate.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => {
                return Err(InputError::InvalidFileName(format!(
                    "'{}' must be relative to the data directory",
                    trimmed
                )));
            }
        }
    }
    Ok(data_dir.join(candidate))
}

pub fn load_ssm(data_dir: &Path, filename: &str) -> Result<SsmTable, InputError> {
    let path = resolve_path(data_dir, filename)?;
    if !path.is_file() {
        return Err(InputError::FileNotFound(path));
    }
    let reader = open_maybe_gz(&path)?;
    let table = parse_ssm(reader, filename)?;
    tracing::info!(
        "loaded SSM file {}: rows={}, columns={}",
        path.display(),
        table.n_rows(),
        table.n_columns()
    );
    Ok(table)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
