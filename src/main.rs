use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rift_compare::config::AppConfig;
use rift_compare::fetch::{FetcherConfig, HttpTransport, RateBudget};
use rift_compare::models::{PlayerQuery, PlayerSlot, Region, RiotId};
use rift_compare::pipeline::{ComparisonPipeline, PipelineError};
use rift_compare::prompt::{prompt_player, prompt_region, prompt_riot_id};
use rift_compare::report::{render_history, render_json, render_text, ReportFormat};
use rift_compare::riot::RiotClient;

#[derive(Parser)]
#[command(name = "rift-compare")]
#[command(about = "Compare two League of Legends players side by side")]
#[command(version)]
struct Cli {
    /// Path to configuration file (optional)
    #[arg(long, default_value = "./rift-compare.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two players' ranks and recent matches
    Compare {
        /// Player 1 as NAME#TAG (prompted if omitted)
        #[arg(long)]
        player1: Option<RiotId>,

        /// Player 1 region: americas, asia, europe, sea
        #[arg(long)]
        region1: Option<Region>,

        /// Player 2 as NAME#TAG (prompted if omitted)
        #[arg(long)]
        player2: Option<RiotId>,

        /// Player 2 region: americas, asia, europe, sea
        #[arg(long)]
        region2: Option<Region>,

        /// Recent matches per player (default from config, at most 100)
        #[arg(long)]
        count: Option<usize>,

        /// Report format: text or json
        #[arg(long, default_value = "text")]
        format: ReportFormat,
    },

    /// List one player's rank and recent matches
    History {
        /// Player as NAME#TAG
        #[arg(long)]
        player: RiotId,

        /// Region: americas, asia, europe, sea
        #[arg(long)]
        region: Region,

        /// Recent matches to list (default from config, at most 100)
        #[arg(long)]
        count: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    // Initialize tracing
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }

    tracing::info!("Starting rift-compare v{}", env!("CARGO_PKG_VERSION"));

    tokio::select! {
        result = run(cli.command, config) => result,
        _ = tokio::signal::ctrl_c() => {
            println!("\nExiting...");
            // A prompt may still be blocked on stdin, so don't wait for it.
            std::process::exit(0);
        }
    }
}

async fn run(command: Commands, config: AppConfig) -> Result<()> {
    let pipeline = build_pipeline(&config)?;

    match command {
        Commands::Compare {
            player1,
            region1,
            player2,
            region2,
            count,
            format,
        } => {
            let count = count.unwrap_or(config.riot.match_count);

            if player1.is_none() || region1.is_none() || player2.is_none() || region2.is_none() {
                println!("Riot API Player Comparison Tool");
                println!(
                    "This tool compares the last {} matches and ranks of two players",
                    count
                );
            }

            let query_a = player_query(PlayerSlot::One, player1, region1).await?;
            let query_b = player_query(PlayerSlot::Two, player2, region2).await?;

            match pipeline.compare(&query_a, &query_b, count).await {
                Ok(report) => match format {
                    ReportFormat::Text => print!("{}", render_text(&report)),
                    ReportFormat::Json => println!("{}", render_json(&report)?),
                },
                Err(e @ PipelineError::UnresolvedPlayers(_)) => println!("{}", e),
            }
        }
        Commands::History {
            player,
            region,
            count,
        } => {
            let count = count.unwrap_or(config.riot.match_count);
            let query = PlayerQuery::new(player, region);

            match pipeline.player_history(&query, count).await {
                Ok(data) => print!("{}", render_history(&data, count)),
                Err(e @ PipelineError::UnresolvedPlayers(_)) => println!("{}", e),
            }
        }
    }

    Ok(())
}

/// Wire transport, budget, and client from configuration.
fn build_pipeline(config: &AppConfig) -> Result<ComparisonPipeline> {
    let api_key = config.api_key()?;

    let transport = HttpTransport::new(FetcherConfig {
        api_key,
        timeout: config.riot.timeout(),
        ..Default::default()
    })?;
    let budget = RateBudget::new(&config.rate_limit.windows())?;

    let client = RiotClient::new(Arc::new(transport), Arc::new(budget))
        .with_host_template(config.riot.api_host_template.clone())
        .with_retry_policy(config.riot.retry_policy());

    Ok(ComparisonPipeline::new(client))
}

/// Complete a player query from CLI arguments, prompting for whatever is missing.
async fn player_query(
    slot: PlayerSlot,
    riot_id: Option<RiotId>,
    region: Option<Region>,
) -> Result<PlayerQuery> {
    if let (Some(riot_id), Some(region)) = (&riot_id, region) {
        return Ok(PlayerQuery::new(riot_id.clone(), region));
    }

    let query = tokio::task::spawn_blocking(move || {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();

        match (riot_id, region) {
            (Some(riot_id), None) => prompt_region(&mut input, &mut output, slot)
                .map(|region| PlayerQuery::new(riot_id, region)),
            (None, Some(region)) => prompt_riot_id(&mut input, &mut output, slot)
                .map(|riot_id| PlayerQuery::new(riot_id, region)),
            _ => prompt_player(&mut input, &mut output, slot),
        }
    })
    .await?
    .context("Failed to read player details")?;

    Ok(query)
}
