use std::path::{Path, PathBuf};

use crate::input::{GENE_COLUMN, READ_COUNT_COLUMN, SsmTable, is_missing, load_ssm};
use crate::mapping::{
    GeneSymbolMapper, HgncTable, JoinedTable, MappingError, UnavailableMapper,
    append_hugo_symbols,
};
use crate::report::text::{
    render_average_read_count, render_column_names, render_recurrent, render_summary,
    render_unique_genes,
};
use crate::report::{
    ReportError, TOP_RECURRENT, mean_of_column, round2, top_recurrent, unique_in_order,
};

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub data_dir: PathBuf,
    pub hgnc_path: Option<PathBuf>,
}

/// Answers SSM questions for files under one data directory. Holds no
/// per-file state: every call reads (and, where needed, joins) from scratch.
pub struct SsmService {
    data_dir: PathBuf,
    mapper: Box<dyn GeneSymbolMapper>,
}

impl SsmService {
    pub fn new(data_dir: impl Into<PathBuf>, mapper: Box<dyn GeneSymbolMapper>) -> Self {
        Self {
            data_dir: data_dir.into(),
            mapper,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, MappingError> {
        let mapper: Box<dyn GeneSymbolMapper> = match &config.hgnc_path {
            Some(path) => {
                let table = HgncTable::load(path)?;
                if table.is_empty() {
                    tracing::warn!(
                        "HGNC table {} has no Ensembl ids; every gene will be unmapped",
                        path.display()
                    );
                }
                Box::new(table)
            }
            None => {
                tracing::warn!("no HGNC table configured; HUGO tools will fail");
                Box::new(UnavailableMapper)
            }
        };
        Ok(Self::new(config.data_dir.clone(), mapper))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn load(&self, filename: &str) -> Result<SsmTable, ReportError> {
        Ok(load_ssm(&self.data_dir, filename)?)
    }

    fn load_joined(&self, filename: &str) -> Result<JoinedTable, ReportError> {
        let table = self.load(filename)?;
        let joined = append_hugo_symbols(table, self.mapper.as_ref())?;
        tracing::debug!(
            "joined HUGO symbols onto {} rows of {}",
            joined.table.n_rows(),
            filename
        );
        Ok(joined)
    }

    pub fn summarize(&self, filename: &str) -> Result<String, ReportError> {
        let table = self.load(filename)?;
        Ok(render_summary(
            filename.trim(),
            table.n_rows(),
            table.n_columns(),
        ))
    }

    pub fn column_names(&self, filename: &str) -> Result<String, ReportError> {
        let table = self.load(filename)?;
        Ok(render_column_names(&table.columns))
    }

    pub fn unique_ensembl_genes(&self, filename: &str) -> Result<String, ReportError> {
        let table = self.load(filename)?;
        let genes = present_genes(&table)?;
        Ok(render_unique_genes("Ensembl", &unique_in_order(genes)))
    }

    pub fn unique_hugo_genes(&self, filename: &str) -> Result<String, ReportError> {
        let joined = self.load_joined(filename)?;
        let symbols = joined.hugo.iter().filter_map(|s| s.as_deref());
        Ok(render_unique_genes("HUGO", &unique_in_order(symbols)))
    }

    pub fn recurrent_ensembl_genes(&self, filename: &str) -> Result<String, ReportError> {
        let table = self.load(filename)?;
        let genes = present_genes(&table)?;
        Ok(render_recurrent(&top_recurrent(genes, TOP_RECURRENT)))
    }

    pub fn recurrent_hugo_genes(&self, filename: &str) -> Result<String, ReportError> {
        let joined = self.load_joined(filename)?;
        let symbols = joined.hugo.iter().filter_map(|s| s.as_deref());
        Ok(render_recurrent(&top_recurrent(symbols, TOP_RECURRENT)))
    }

    pub fn average_total_read_count(&self, filename: &str) -> Result<String, ReportError> {
        let table = self.load(filename)?;
        let values = table.column(READ_COUNT_COLUMN)?;
        let mean = mean_of_column(READ_COUNT_COLUMN, &values)?;
        Ok(render_average_read_count(round2(mean)))
    }
}

/// `gene_affected` values with missing cells (intergenic mutations) dropped.
fn present_genes(table: &SsmTable) -> Result<Vec<&str>, ReportError> {
    Ok(table
        .column(GENE_COLUMN)?
        .into_iter()
        .filter(|g| !is_missing(g))
        .collect())
}

#[cfg(test)]
#[path = "../tests/src_inline/service.rs"]
mod tests;
