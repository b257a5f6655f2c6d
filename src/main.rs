mod input;
mod logging;
mod mapping;
mod report;
mod server;
mod service;
mod tools;

use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::json;

use crate::service::{ServiceConfig, SsmService};
use crate::tools::call_tool;

/// Summaries of somatic mutation (SSM) TSV files.
#[derive(Debug, Parser)]
#[command(name = "kira-ssmqc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the SSM tools over MCP (JSON-RPC on stdin/stdout).
    Serve(ServiceArgs),
    /// Run a single tool and print its answer.
    Run(RunArgs),
}

#[derive(Debug, Clone, Args)]
struct ServiceArgs {
    /// Directory that SSM file names are resolved against.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
    /// HGNC TSV with `hgnc_id`, `symbol` and `ensembl_gene_id` columns.
    #[arg(long)]
    hgnc: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    #[command(flatten)]
    service: ServiceArgs,
    /// Tool name, e.g. `summarize_ssm_file`.
    #[arg(long)]
    tool: String,
    /// SSM file name inside the data directory.
    #[arg(long)]
    file: String,
}

impl ServiceArgs {
    fn to_config(&self) -> ServiceConfig {
        ServiceConfig {
            data_dir: self.data_dir.clone(),
            hgnc_path: self.hgnc.clone(),
        }
    }
}

fn main() {
    logging::init();
    if let Err(err) = run(Cli::parse()) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Serve(args) => {
            let service = SsmService::from_config(&args.to_config()).map_err(|e| e.to_string())?;
            let stdin = io::stdin();
            let stdout = io::stdout();
            server::serve(&service, stdin.lock(), BufWriter::new(stdout.lock()))
                .map_err(|e| e.to_string())
        }
        Command::Run(args) => {
            let service =
                SsmService::from_config(&args.service.to_config()).map_err(|e| e.to_string())?;
            let text = call_tool(&service, &args.tool, &json!({ "filename": args.file }))
                .map_err(|e| e.to_string())?;
            println!("{text}");
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
