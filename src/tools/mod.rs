//! Named tools exposed to agents. Each takes a single `filename` argument
//! and answers with text.

use serde_json::{Value, json};

use crate::report::ReportError;
use crate::service::SsmService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SsmTool {
    Summarize,
    ColumnNames,
    UniqueEnsemblGenes,
    UniqueHugoGenes,
    RecurrentEnsemblGenes,
    RecurrentHugoGenes,
    AverageTotalReadCount,
}

const ALL_TOOLS: &[SsmTool] = &[
    SsmTool::Summarize,
    SsmTool::ColumnNames,
    SsmTool::UniqueEnsemblGenes,
    SsmTool::UniqueHugoGenes,
    SsmTool::RecurrentEnsemblGenes,
    SsmTool::RecurrentHugoGenes,
    SsmTool::AverageTotalReadCount,
];

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Report(#[from] ReportError),
}

impl SsmTool {
    pub fn all() -> &'static [SsmTool] {
        ALL_TOOLS
    }

    pub fn name(self) -> &'static str {
        match self {
            SsmTool::Summarize => "summarize_ssm_file",
            SsmTool::ColumnNames => "get_ssm_column_names",
            SsmTool::UniqueEnsemblGenes => "get_unique_genes_in_ssm",
            SsmTool::UniqueHugoGenes => "get_unique_hugo_genes_in_ssm",
            SsmTool::RecurrentEnsemblGenes => "get_recurrent_mutated_ensembl_genes",
            SsmTool::RecurrentHugoGenes => "get_recurrent_mutated_hugo_genes",
            SsmTool::AverageTotalReadCount => "get_average_total_read_count",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SsmTool::Summarize => {
                "Summarize a SSM file by reporting its number of rows and columns."
            }
            SsmTool::ColumnNames => "Return the names of the column headers in the SSM file.",
            SsmTool::UniqueEnsemblGenes => "Return all the unique gene Ensembl IDs from a SSM file.",
            SsmTool::UniqueHugoGenes => {
                "Return all the unique HUGO gene symbols from a SSM file, mapped from its Ensembl IDs."
            }
            SsmTool::RecurrentEnsemblGenes => {
                "Return the top 5 recurrently mutated genes of a SSM file by Ensembl ID."
            }
            SsmTool::RecurrentHugoGenes => {
                "Return the top 5 recurrently mutated genes of a SSM file by HUGO symbol."
            }
            SsmTool::AverageTotalReadCount => {
                "Return the average total read count of the mutations in a SSM file."
            }
        }
    }

    pub fn from_name(name: &str) -> Option<SsmTool> {
        ALL_TOOLS.iter().copied().find(|t| t.name() == name)
    }

    pub fn input_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "filename": {
                    "type": "string",
                    "description": "Name of the SSM file in the data directory (e.g. 'ssm.tsv')"
                }
            },
            "required": ["filename"]
        })
    }

    pub fn descriptor(self) -> Value {
        json!({
            "name": self.name(),
            "description": self.description(),
            "inputSchema": Self::input_schema(),
        })
    }

    pub fn run(self, service: &SsmService, filename: &str) -> Result<String, ReportError> {
        match self {
            SsmTool::Summarize => service.summarize(filename),
            SsmTool::ColumnNames => service.column_names(filename),
            SsmTool::UniqueEnsemblGenes => service.unique_ensembl_genes(filename),
            SsmTool::UniqueHugoGenes => service.unique_hugo_genes(filename),
            SsmTool::RecurrentEnsemblGenes => service.recurrent_ensembl_genes(filename),
            SsmTool::RecurrentHugoGenes => service.recurrent_hugo_genes(filename),
            SsmTool::AverageTotalReadCount => service.average_total_read_count(filename),
        }
    }
}

/// Looks up `name` and runs it with the `filename` found in `arguments`.
pub fn call_tool(service: &SsmService, name: &str, arguments: &Value) -> Result<String, ToolError> {
    let tool = SsmTool::from_name(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
    let filename = arguments
        .get("filename")
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::InvalidArguments("'filename' must be a string".to_string()))?;
    tracing::info!("tool call: {} filename={}", tool.name(), filename);
    Ok(tool.run(service, filename)?)
}

#[cfg(test)]
#[path = "../../tests/src_inline/tools/tests.rs"]
mod tests;
