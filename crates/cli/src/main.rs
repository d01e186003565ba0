use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::Dataset;
use orchestrator::{OrchestratorConfig, PipelineResult, ReviewOrchestrator};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use worker_client::WorkerConfig;

/// review-score - Restaurant review scoring pipeline
#[derive(Parser)]
#[command(name = "review-score")]
#[command(about = "Score a restaurant from its customer reviews", long_about = None)]
struct Cli {
    /// Path to the review dataset (defaults to searching for restaurantes.txt)
    #[arg(short, long, global = true)]
    dataset: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline for a free-text query
    Score {
        /// Question naming a restaurant, e.g. "Qual é a avaliação do Le Gourmet?"
        query: String,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        worker: WorkerArgs,
    },

    /// Show which restaurant name a query resolves to
    Resolve {
        query: String,
    },

    /// List the dataset reviews for a restaurant
    Reviews {
        /// Restaurant name (matched after normalization)
        name: String,
    },

    /// List every restaurant in the dataset
    Restaurants,
}

#[derive(clap::Args)]
struct WorkerArgs {
    /// Address of the language worker service
    #[arg(long, env = "WORKER_ADDR", default_value = WorkerConfig::DEFAULT_ENDPOINT)]
    worker_addr: String,

    /// Model the worker should use
    #[arg(long, env = "WORKER_MODEL", default_value = WorkerConfig::DEFAULT_MODEL)]
    model: String,

    /// Credential forwarded to the worker
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Maximum reply/tool rounds per stage
    #[arg(long, default_value_t = WorkerConfig::DEFAULT_MAX_TURNS)]
    max_turns: usize,

    /// Give up on a stage after this many seconds
    #[arg(long)]
    stage_timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A local .env may supply OPENAI_API_KEY, RUST_LOG and friends
    let dotenv_path = dotenvy::dotenv().ok();

    // Logs go to stderr so `score --json` output stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Some(path) = dotenv_path {
        debug!("Loaded environment from {}", path.display());
    }

    match cli.command {
        Commands::Score { query, json, worker } => {
            handle_score(cli.dataset, &query, json, worker).await?
        }
        Commands::Resolve { query } => handle_resolve(cli.dataset, &query)?,
        Commands::Reviews { name } => handle_reviews(cli.dataset, &name)?,
        Commands::Restaurants => handle_restaurants(cli.dataset)?,
    }

    Ok(())
}

fn load_dataset(path: Option<PathBuf>) -> Result<Dataset> {
    Dataset::locate(path.as_deref()).context("Failed to locate the review dataset")
}

/// Handle the 'score' command
async fn handle_score(dataset: Option<PathBuf>, query: &str, json: bool, args: WorkerArgs) -> Result<()> {
    let worker_config = WorkerConfig::new(args.api_key.unwrap_or_default())
        .with_endpoint(args.worker_addr)
        .with_model(args.model)
        .with_max_turns(args.max_turns);
    let config = OrchestratorConfig {
        dataset_path: dataset,
        stage_timeout: args.stage_timeout_secs.map(Duration::from_secs),
    };

    info!(
        "Connecting to worker at {} (model {})",
        worker_config.endpoint, worker_config.model
    );
    let orchestrator = ReviewOrchestrator::connect(config, worker_config)
        .await
        .context("Failed to start the review pipeline")?;

    info!("Scoring query {:?} with dataset {}", query, orchestrator.dataset().path().display());
    let start = Instant::now();
    let result = orchestrator.run(query).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
        println!("{} Finished in {:.2?}", "✓".green(), start.elapsed());
    }
    Ok(())
}

/// Handle the 'resolve' command
fn handle_resolve(dataset: Option<PathBuf>, query: &str) -> Result<()> {
    let dataset = load_dataset(dataset)?;
    let resolution = resolver::resolve(query, &dataset)?
        .ok_or_else(|| anyhow!("Could not identify a restaurant name in '{}'", query))?;

    println!(
        "{} {} {}",
        "Resolved:".bold().blue(),
        resolution.name,
        format!("(via {})", resolution.source).dimmed()
    );
    Ok(())
}

/// Handle the 'reviews' command
fn handle_reviews(dataset: Option<PathBuf>, name: &str) -> Result<()> {
    let dataset = load_dataset(dataset)?;
    let found = dataset.fetch_restaurant_data(name)?;

    if found.is_empty() {
        println!("{} No reviews found for '{}'", "!".yellow(), found.restaurant_name);
        return Ok(());
    }

    println!("{}", format!("Reviews for {}:", found.restaurant_name).bold().blue());
    for (i, review) in found.reviews.iter().enumerate() {
        println!("{}. {}", (i + 1).to_string().green(), review);
    }
    Ok(())
}

/// Handle the 'restaurants' command
fn handle_restaurants(dataset: Option<PathBuf>) -> Result<()> {
    let dataset = load_dataset(dataset)?;
    let names = dataset.restaurant_names()?;

    println!("{}", format!("{} restaurants:", names.len()).bold().blue());
    for name in names {
        println!("{}{}", "• ".green(), name);
    }
    Ok(())
}

fn print_result(result: &PipelineResult) {
    println!("{}", result.restaurant_name.bold().blue());
    for (review, pair) in result.reviews.iter().zip(&result.scores) {
        println!(
            "  {} food {} / service {}  {}",
            "•".green(),
            pair.food,
            pair.service,
            review.dimmed()
        );
    }
    println!(
        "{} {}",
        "Score:".bold(),
        format!("{:.3}", result.aggregate.value).green().bold()
    );
    println!("{}", result.summary());
}
