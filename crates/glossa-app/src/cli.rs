use std::path::PathBuf;

use clap::Parser;
use glossa_config::{Config, ExecutionKind, GroupingKind, OrderingKind};

/// Look up a word in every registered dictionary engine
#[derive(Debug, Parser)]
#[command(name = "glossa", version)]
pub struct Args {
    /// Word or phrase to look up
    pub query: String,

    /// Comma separated dictionaries, `en-de` or `en<>de`
    #[arg(short, long, default_value = "")]
    pub dictionaries: String,

    /// Comma separated languages for monolingual lookups, `en` or `no_ny`
    #[arg(short, long, default_value = "")]
    pub languages: String,

    /// JSON config file; `GLOSSA_*` environment variables are used otherwise
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub grouping: Option<GroupingKind>,

    #[arg(long)]
    pub ordering: Option<OrderingKind>,

    #[arg(long)]
    pub execution: Option<ExecutionKind>,

    /// Log as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl Args {
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::new(),
        };

        if let Some(grouping) = self.grouping {
            config.aggregation.grouping = grouping;
        }
        if let Some(ordering) = self.ordering {
            config.aggregation.ordering = ordering;
        }
        if let Some(execution) = self.execution {
            config.executor.execution = execution;
        }
        config.log.json |= self.json_logs;

        Ok(config)
    }
}
