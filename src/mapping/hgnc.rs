use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::mapping::{GeneSymbolMapper, MappingError, SymbolMapping, normalize_ensembl_id};

/// One row of an HGNC complete-set style TSV. Unknown columns are ignored.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct HgncRecord {
    pub hgnc_id: String,
    #[serde(alias = "gene_symbol")]
    pub symbol: String,
    #[serde(default)]
    pub ensembl_gene_id: Option<String>,
}

/// Mapping collaborator backed by an HGNC table held in memory.
#[derive(Debug, Clone, Default)]
pub struct HgncTable {
    symbol_by_ensembl: HashMap<String, String>,
}

impl HgncTable {
    pub fn load(path: &Path) -> Result<Self, MappingError> {
        let file = File::open(path).map_err(|source| MappingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(BufReader::new(file))?;
        tracing::info!(
            "loaded HGNC table {}: {} Ensembl ids",
            path.display(),
            table.len()
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, MappingError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let mut records = Vec::new();
        for record in csv_reader.deserialize::<HgncRecord>() {
            records.push(record.map_err(|e| MappingError::Parse(e.to_string()))?);
        }
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: impl IntoIterator<Item = HgncRecord>) -> Self {
        let mut symbol_by_ensembl = HashMap::new();
        for record in records {
            let Some(ensembl) = record.ensembl_gene_id.as_deref() else {
                continue;
            };
            let ensembl = normalize_ensembl_id(ensembl);
            let symbol = record.symbol.trim();
            if ensembl.is_empty() || symbol.is_empty() {
                continue;
            }
            if let Some(existing) = symbol_by_ensembl.get(&ensembl) {
                tracing::warn!(
                    "Ensembl id {} maps to several symbols; keeping {} over {} ({})",
                    ensembl,
                    existing,
                    symbol,
                    record.hgnc_id
                );
                continue;
            }
            symbol_by_ensembl.insert(ensembl, symbol.to_string());
        }
        Self { symbol_by_ensembl }
    }

    pub fn len(&self) -> usize {
        self.symbol_by_ensembl.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbol_by_ensembl.is_empty()
    }

    pub fn symbol(&self, ensembl_id: &str) -> Option<&str> {
        self.symbol_by_ensembl
            .get(&normalize_ensembl_id(ensembl_id))
            .map(String::as_str)
    }
}

impl GeneSymbolMapper for HgncTable {
    fn ensembl_to_hugo(&self, ids: &[String]) -> Result<Vec<SymbolMapping>, MappingError> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for id in ids {
            if id.trim().is_empty() || !seen.insert(id.as_str()) {
                continue;
            }
            out.push(SymbolMapping {
                ensembl_id: id.clone(),
                hgnc_symbol: self.symbol(id).map(str::to_string),
            });
        }
        Ok(out)
    }
}
