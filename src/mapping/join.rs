use std::collections::HashMap;

use crate::input::{GENE_COLUMN, SsmTable, is_missing};
use crate::mapping::{GeneSymbolMapper, MappingError};
use crate::report::ReportError;

/// An SSM table with a HUGO symbol appended to every row.
#[derive(Debug, Clone)]
pub struct JoinedTable {
    pub table: SsmTable,
    pub hugo: Vec<Option<String>>,
}

/// Left join of `table.gene_affected` against the mapper's answer. Every
/// input row appears exactly once; unmapped rows and rows without a gene
/// carry `None`. Missing gene cells are never sent to the mapper.
pub fn append_hugo_symbols(
    table: SsmTable,
    mapper: &dyn GeneSymbolMapper,
) -> Result<JoinedTable, ReportError> {
    let genes: Vec<String> = table
        .column(GENE_COLUMN)?
        .into_iter()
        .map(str::to_string)
        .collect();
    let query: Vec<String> = genes.iter().filter(|g| !is_missing(g)).cloned().collect();
    let mappings = mapper.ensembl_to_hugo(&query)?;

    let mut by_ensembl: HashMap<&str, Option<&str>> = HashMap::with_capacity(mappings.len());
    for m in &mappings {
        if m.ensembl_id.is_empty() {
            return Err(MappingError::Malformed("row without Ensembl id".to_string()).into());
        }
        if by_ensembl.contains_key(m.ensembl_id.as_str()) {
            tracing::warn!(
                "mapper returned several rows for {}; keeping first",
                m.ensembl_id
            );
            continue;
        }
        by_ensembl.insert(m.ensembl_id.as_str(), m.hgnc_symbol.as_deref());
    }

    let hugo: Vec<Option<String>> = genes
        .iter()
        .map(|g| {
            if is_missing(g) {
                return None;
            }
            by_ensembl
                .get(g.as_str())
                .copied()
                .flatten()
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .collect();

    let unmapped = hugo.iter().filter(|h| h.is_none()).count();
    if unmapped > 0 {
        tracing::debug!("{} of {} rows have no HUGO symbol", unmapped, hugo.len());
    }

    Ok(JoinedTable { table, hugo })
}
