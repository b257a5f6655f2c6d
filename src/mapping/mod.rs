//! Ensembl → HUGO symbol mapping.
//!
//! The mapper is an opaque collaborator: it receives the `gene_affected`
//! values of a table and answers with one [`SymbolMapping`] per distinct
//! identifier. [`join::append_hugo_symbols`] left-joins that answer back
//! onto the table.

use std::path::PathBuf;

pub mod hgnc;
pub mod join;

pub use hgnc::HgncTable;
pub use join::{JoinedTable, append_hugo_symbols};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolMapping {
    pub ensembl_id: String,
    pub hgnc_symbol: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("gene symbol mapping unavailable: {0}")]
    Unavailable(String),
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse mapping table: {0}")]
    Parse(String),
    #[error("malformed mapping response: {0}")]
    Malformed(String),
}

pub trait GeneSymbolMapper {
    fn ensembl_to_hugo(&self, ids: &[String]) -> Result<Vec<SymbolMapping>, MappingError>;
}

/// Stands in when no mapping table is configured; every lookup fails.
#[derive(Debug, Clone, Default)]
pub struct UnavailableMapper;

impl GeneSymbolMapper for UnavailableMapper {
    fn ensembl_to_hugo(&self, _ids: &[String]) -> Result<Vec<SymbolMapping>, MappingError> {
        Err(MappingError::Unavailable(
            "no HGNC table configured (use --hgnc)".to_string(),
        ))
    }
}

/// Upper-cases and drops a trailing `.N` version, so `ensg0001.12` and
/// `ENSG0001` compare equal.
pub fn normalize_ensembl_id(raw: &str) -> String {
    let upper = raw.trim().to_ascii_uppercase();
    if let Some((left, right)) = upper.rsplit_once('.') {
        if left.starts_with("ENS") && !right.is_empty() && right.chars().all(|c| c.is_ascii_digit())
        {
            return left.to_string();
        }
    }
    upper
}

#[cfg(test)]
#[path = "../../tests/src_inline/mapping/tests.rs"]
mod tests;
