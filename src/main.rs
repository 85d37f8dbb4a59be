use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

use bancos_merge::apis::{base::decode_payload, create_feeds, create_parser};
use bancos_merge::app::ports::PayloadPort;
use bancos_merge::app::{MergeUseCase, RunOutcome};
use bancos_merge::common::constants::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, NO_CHANGES_EXIT_CODE};
use bancos_merge::config::Config;
use bancos_merge::domain::Source;
use bancos_merge::infra::{FileOutputWriter, JsonCanonicalStore, LocationPayloadStore, ReqwestHttp};
use bancos_merge::logging;

#[derive(Parser)]
#[command(name = "bancos-merge")]
#[command(about = "Merges Brazilian payment-system participant lists into the bank registry")]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration
    #[arg(long, env = CONFIG_PATH_ENV, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every feed, merge and publish the result (default)
    Run,
    /// Parse one feed payload and print the candidates as JSON
    Parse {
        /// Feed key or label: str, spi, slc, siloc, sitraf, ctc, pcps, cql, detecta_flow, pcr
        #[arg(long)]
        source: String,
        /// URL or file path; defaults to the configured location
        #[arg(long)]
        input: Option<String>,
    },
    /// Show every feed with its effective location
    ListSources,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    let payloads: Arc<dyn PayloadPort> = Arc::new(LocationPayloadStore::new(Arc::new(ReqwestHttp::new())));

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(&config, payloads).await,
        Commands::Parse { source, input } => {
            let source: Source = source.parse().map_err(anyhow::Error::msg)?;
            let parser = create_parser(source)
                .ok_or_else(|| anyhow::anyhow!("{} has no feed parser", source))?;
            let location = match input {
                Some(input) => input,
                None => config
                    .feed(source)
                    .map(|f| f.location)
                    .ok_or_else(|| anyhow::anyhow!("{} has no configured location", source))?,
            };
            let text = decode_payload(&payloads.load(&location).await?)?;
            let candidates = parser.parse(&text)?;
            println!("{}", serde_json::to_string_pretty(&candidates)?);
            info!("{}: {} candidates from {}", source, candidates.len(), location);
            Ok(ExitCode::SUCCESS)
        }
        Commands::ListSources => {
            for feed in config.feeds() {
                let state = if feed.enabled { "enabled" } else { "disabled" };
                println!("{:<12} {:<9} {}", feed.source.key(), state, feed.location);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run(config: &Config, payloads: Arc<dyn PayloadPort>) -> anyhow::Result<ExitCode> {
    println!("🚀 Running merge...");
    let use_case = MergeUseCase::new(
        Arc::new(JsonCanonicalStore::new(config.canonical.location.clone(), payloads.clone())),
        create_feeds(config, payloads.clone()),
        Arc::new(FileOutputWriter::new(
            config.output.directory.clone(),
            config.output.changelog.clone(),
            payloads,
        )),
    );

    match use_case.run(Utc::now()).await {
        Ok(RunOutcome::Changed { added, updated, total }) => {
            println!("\n📊 Merge results:");
            println!("   Participants: {}", total);
            println!("   Added: {}", added);
            println!("   Updated: {}", updated);
            println!("   Output: {}", config.output.directory.display());
            Ok(ExitCode::SUCCESS)
        }
        Ok(RunOutcome::NoChanges) => {
            println!("No new data or updated information");
            Ok(ExitCode::from(NO_CHANGES_EXIT_CODE))
        }
        Err(e) => {
            error!("Merge failed: {}", e);
            println!("❌ Merge failed: {}", e);
            Err(e.into())
        }
    }
}
