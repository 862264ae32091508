use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ragline_core::{Config, Settings};
use ragline_gateway::{
    OpenAiCompatibleClient, PipelineAnswer, PipelineError, RagPipeline, RetryPolicy,
};
use ragline_knowledge::{KnowledgeEngine, Router, load_documents};

/// Queries answered by `ragline pipeline` when none are given.
const DEMO_QUERIES: [&str; 2] = ["Eino 的编排能力是什么？", "今天天气怎么样？"];

#[derive(Parser)]
#[command(
    name = "ragline",
    version,
    about = "Keyword-routed lexical RAG over a small document corpus"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer a query from retrieved knowledge
    Ask {
        query: String,
        /// Number of knowledge entries to retrieve
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
        /// Newline-delimited corpus file replacing the configured documents
        #[arg(long)]
        docs: Option<PathBuf>,
    },
    /// Route each query, then answer with or without retrieval
    Pipeline {
        queries: Vec<String>,
        #[arg(long)]
        docs: Option<PathBuf>,
    },
    /// Show ranked knowledge entries for a query without calling the model
    Search {
        query: String,
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
        #[arg(long)]
        docs: Option<PathBuf>,
    },
    /// Print the branch a query would take
    Route { query: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let created_config = pending_default_config();
    let config = Config::load()?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.settings.logging.level.clone().into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Settings::load logs the creation before any subscriber exists
    if let Some(path) = created_config {
        info!("Created default configuration at {}", path.display());
    }
    info!(
        "Configuration loaded (model: {} at {})",
        config.model_id(),
        config.base_url()
    );

    match cli.command {
        Command::Ask { query, top_k, docs } => {
            let engine = build_engine(&config, top_k, docs).await?;
            let pipeline = build_pipeline(&config, engine)?;
            let answer = pipeline.answer_with_knowledge(&query).await?;
            print_answer(&answer);
        }
        Command::Pipeline { queries, docs } => {
            let engine = build_engine(&config, None, docs).await?;
            let pipeline = build_pipeline(&config, engine)?;
            let queries = if queries.is_empty() {
                DEMO_QUERIES.iter().map(|q| q.to_string()).collect()
            } else {
                queries
            };

            for answer in pipeline.answer_all(&queries).await {
                print_answer(&answer);
            }
        }
        Command::Search { query, top_k, docs } => {
            let engine = build_engine(&config, top_k, docs).await?;
            let hits = engine.search(&query, None);
            if hits.is_empty() {
                println!("{}", engine.settings().no_context_placeholder);
            }
            for hit in hits {
                println!("{:.4}\t#{}\t{}", hit.score, hit.position, hit.text);
            }
        }
        Command::Route { query } => {
            let router = Router::from_settings(&config.knowledge_settings());
            println!("{}", router.route(&query));
        }
    }

    Ok(())
}

/// Config file path when `Config::load` is about to create it.
fn pending_default_config() -> Option<PathBuf> {
    Settings::config_path().ok().filter(|path| !path.exists())
}

async fn build_engine(
    config: &Config,
    top_k: Option<usize>,
    docs: Option<PathBuf>,
) -> Result<Arc<KnowledgeEngine>, PipelineError> {
    let mut settings = config.knowledge_settings();
    if let Some(top_k) = top_k {
        settings.top_k = top_k;
    }

    let documents = match docs {
        Some(path) => load_documents(&path).await?,
        None => settings.documents.clone(),
    };

    Ok(Arc::new(KnowledgeEngine::with_documents(settings, documents)))
}

fn build_pipeline(
    config: &Config,
    engine: Arc<KnowledgeEngine>,
) -> Result<RagPipeline, PipelineError> {
    config.require_generation()?;
    let client = OpenAiCompatibleClient::from_config(config)?;
    info!("OpenAI-compatible client created for model: {}", config.model_id());

    Ok(
        RagPipeline::new(engine, Box::new(client), config.settings.prompts.clone())
            .with_retry(RetryPolicy::from_settings(&config.settings.model)),
    )
}

fn print_answer(answer: &PipelineAnswer) {
    println!("[{}] {}", answer.route, answer.query);
    if let Some(context) = &answer.context {
        print!("{}", context);
        if !context.ends_with('\n') {
            println!();
        }
    }
    println!("{}\n", answer.content);
}
