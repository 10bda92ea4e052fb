use anyhow::Result;
use clap::Parser;

use super::report;
use crate::cli::SubCommandExtend;
use crate::client::HttpBackend;
use crate::config::{Opts, OutputFormat};

#[derive(Parser, Debug, Clone)]
pub struct HealthCommand {
    /// 输出格式
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t)]
    pub output_format: OutputFormat,
}

impl SubCommandExtend for HealthCommand {
    async fn run(&self, opts: &Opts) -> Result<()> {
        let backend = HttpBackend::new(opts.server.clone())?;
        let status = backend.health().await.map_err(|e| report(e, opts))?;
        match self.output_format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
            OutputFormat::Table => println!("{}\t{}", status.status, status.indexed_images),
        }
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ReindexCommand {
    /// 输出格式
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t)]
    pub output_format: OutputFormat,
}

impl SubCommandExtend for ReindexCommand {
    async fn run(&self, opts: &Opts) -> Result<()> {
        let backend = HttpBackend::new(opts.server.clone())?;
        let status = backend.reindex().await.map_err(|e| report(e, opts))?;
        match self.output_format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
            OutputFormat::Table => {
                println!("{}\t{}", status.status, status.indexed_images);
                if let Some(message) = &status.message {
                    println!("{message}");
                }
            }
        }
        Ok(())
    }
}
