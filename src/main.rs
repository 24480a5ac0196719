use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use flowgen::canvas::Canvas;
use flowgen::generate::{self, GenerateError};
use flowgen::layout::LayeredEngine;
use flowgen::llm::{LlmClient, LlmError};
use flowgen::pipeline::{self, PipelineError, PipelineOptions};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "flowgen", about = "Flow DSL to diagram-graph generator")]
struct Cli {
    /// DSL file to render; reads stdin when omitted.
    file: Option<PathBuf>,

    /// Generate the DSL from a natural-language prompt via the configured LLM.
    #[arg(long, conflicts_with = "file")]
    prompt: Option<String>,

    /// Bound on one layout computation before the grid fallback takes over.
    #[arg(long, env = "FLOWGEN_LAYOUT_TIMEOUT_SECS", default_value_t = 2)]
    layout_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let canvas = Canvas::new();
    let engine = LayeredEngine;
    let options = PipelineOptions {
        layout_timeout: Duration::from_secs(cli.layout_timeout_secs),
        ..PipelineOptions::default()
    };

    let report = match cli.prompt {
        Some(prompt) => {
            let llm = LlmClient::from_env()?;
            tracing::info!(model = llm.model(), "LLM client initialized");
            let mut history = Vec::new();
            generate::generate_and_apply(&canvas, &engine, &llm, &mut history, &prompt, None, &options).await?
        }
        None => {
            let text = read_input(cli.file.as_deref())?;
            pipeline::run(&canvas, &engine, &text, &options).await?
        }
    };

    eprintln!("{}", report.summary());
    for dropped in &report.dropped {
        eprintln!("warning: {dropped}");
    }

    let snapshot = canvas.read_snapshot().await;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn read_input(path: Option<&std::path::Path>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => std::io::read_to_string(std::io::stdin()),
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
