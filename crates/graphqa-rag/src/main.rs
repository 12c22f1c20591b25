//! CLI entry point for ad-hoc questions against the graph.
//!
//! Prints one JSON outcome per question on stdout; logs go to stderr.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use graphqa_core::config::{load_section, DEFAULT_CONFIG_PREFIX};
use graphqa_graph::GraphConfig;
use graphqa_llm::LlmConfig;

#[derive(Parser)]
#[command(name = "graphqa-ask")]
#[command(about = "Answer questions from the knowledge graph")]
struct Cli {
    /// Questions to answer, in order.
    #[arg(required = true)]
    questions: Vec<String>,

    /// Config file prefix (default: graphqa).
    #[arg(short, long, default_value = DEFAULT_CONFIG_PREFIX)]
    config: String,

    /// Also print the schema grounding text before answering.
    #[arg(long)]
    show_schema: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let graph_config: GraphConfig = load_section(&cli.config, "neo4j")?;
    let llm_config: LlmConfig = load_section(&cli.config, "llm")?;

    let pipeline = graphqa_rag::connect(&graph_config, &llm_config).await?;
    if cli.show_schema {
        eprintln!("{}\n", pipeline.grounding());
    }

    for question in &cli.questions {
        let outcome = pipeline.run(question).await?;
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    Ok(())
}
