//! CLI entry point for the judge-scored evaluation run.
//!
//! Progress and summary go to stdout; logs go to stderr.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use graphqa_core::config::{load_section, DEFAULT_CONFIG_PREFIX};
use graphqa_eval::report::{progress_header, progress_line, render_summary};
use graphqa_eval::{load_questions, EvalConfig, Evaluator};
use graphqa_graph::GraphConfig;
use graphqa_llm::{GeminiClient, LlmConfig};

#[derive(Parser)]
#[command(name = "graphqa-eval")]
#[command(about = "Score pipeline answers against a reference dataset")]
struct Cli {
    /// Write per-question records as JSON to this file.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Reference dataset CSV (overrides eval.dataset_path).
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Config file prefix (default: graphqa).
    #[arg(short, long, default_value = DEFAULT_CONFIG_PREFIX)]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let graph_config: GraphConfig = load_section(&cli.config, "neo4j")?;
    let llm_config: LlmConfig = load_section(&cli.config, "llm")?;
    let eval_config: EvalConfig = load_section(&cli.config, "eval")?;

    let dataset = cli
        .dataset
        .unwrap_or_else(|| PathBuf::from(&eval_config.dataset_path));
    let questions = load_questions(&dataset)
        .with_context(|| format!("loading dataset {}", dataset.display()))?;

    let pipeline = graphqa_rag::connect(&graph_config, &llm_config).await?;
    let judge = GeminiClient::new(&llm_config)?;
    let evaluator = Evaluator::new(pipeline, judge);

    println!("{}", progress_header(questions.len()));
    let run = evaluator
        .run(&questions, |record| println!("{}", progress_line(record)))
        .await;
    println!("\n{}", render_summary(&run.summary));

    let output = cli.output.or_else(|| eval_config.output_path.map(PathBuf::from));
    if let Some(path) = output {
        run.write_json(&path)?;
        println!("\nResults saved to {}", path.display());
    }

    Ok(())
}
