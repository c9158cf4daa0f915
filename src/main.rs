//! Main entry point for the Scrim Hall matchmaking service
//!
//! Runs a scripted matchmaking scenario against the in-memory player store:
//! recruit, join, start, declare a winner, then print the leaderboard. The
//! production embedding drives the same action interface from its own
//! transport; this binary exists to exercise the full flow end to end.

use anyhow::Result;
use clap::Parser;
use scrim_hall::config::AppConfig;
use scrim_hall::rating::storage::{InMemoryPlayerStore, PlayerStore};
use scrim_hall::session::MatchmakingService;
use scrim_hall::types::{PlayerUpdate, TeamSide};
use scrim_hall::utils::format_delta;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Scrim Hall Matchmaking Service - rate-balanced team scrimmages
#[derive(Parser)]
#[command(
    name = "scrim-hall",
    version,
    about = "A matchmaking service for rate-balanced team scrimmages",
    long_about = "Scrim Hall manages recruiting queues, partitions rosters into two teams \
                 minimizing rating imbalance, and applies tiered rating adjustments \
                 (Iron through Master) when a winner is declared."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Number of simulated participants
    #[arg(
        short,
        long,
        default_value = "6",
        help = "Number of participants in the simulated match"
    )]
    participants: usize,

    /// Winning side for the simulated match (a or b)
    #[arg(short, long, default_value = "a", help = "Winning side (a or b)")]
    winner: String,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(
        long,
        help = "Validate configuration and exit without running the scenario"
    )]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    Ok(config)
}

fn parse_winner(value: &str) -> Result<TeamSide> {
    match value.to_lowercase().as_str() {
        "a" => Ok(TeamSide::A),
        "b" => Ok(TeamSide::B),
        _ => Err(anyhow::anyhow!("Invalid winner: {} (use 'a' or 'b')", value)),
    }
}

/// Seed the store with participants at staggered rates so every tier shows up
async fn seed_players(store: &InMemoryPlayerStore, count: usize) -> Result<Vec<(String, String)>> {
    let mut players = Vec::with_capacity(count);
    for i in 0..count {
        let id = format!("player-{}", i + 1);
        let name = format!("Player {}", i + 1);
        store.fetch_or_create(&id, &name).await?;
        store
            .persist(
                &id,
                PlayerUpdate {
                    rate: Some((i as u32) * 230),
                    ..Default::default()
                },
            )
            .await?;
        players.push((id, name));
    }
    Ok(players)
}

async fn run_scenario(config: AppConfig, participants: usize, winner: TeamSide) -> Result<()> {
    let store = Arc::new(InMemoryPlayerStore::new());
    let players = seed_players(&store, participants).await?;
    let service = MatchmakingService::with_settings(store, config.matchmaking.clone());

    // Recruit and fill the queue
    let view = service.recruit().await?;
    let queue_id = view.queue_id;
    for (id, name) in &players {
        service.join(queue_id, id, name).await?;
    }

    let view = service.queue_view(queue_id).await?;
    info!("Queue filled with {} participants:", view.player_count());
    for entry in &view.entries {
        info!("  {} {} (R:{})", entry.tier_icon, entry.name, entry.rate);
    }

    // Start the match
    let start = service.start(queue_id).await?;
    info!(
        "Teams formed: A sum {} (avg {:.1}) vs B sum {} (avg {:.1})",
        start.sum_a, start.average_a, start.sum_b, start.average_b
    );
    for member in start.team_a.members() {
        info!("  [A] {} ({})", member.name, member.rate);
    }
    for member in start.team_b.members() {
        info!("  [B] {} ({})", member.name, member.rate);
    }

    // Declare the winner and show the rating movements
    let resolution = service.declare_winner(start.session_id, winner).await?;
    info!("Team {} wins!", resolution.winner);
    debug!(
        "Resolution record: {}",
        serde_json::to_string(&resolution)?
    );
    for result in &resolution.results {
        info!(
            "  [{}] {}: {} -> {} ({})",
            result.side,
            result.name,
            result.adjustment.old_rate,
            result.adjustment.new_rate,
            format_delta(result.adjustment.delta)
        );
    }

    let leaderboard = service.leaderboard().await?;
    info!("Leaderboard:");
    for entry in &leaderboard.entries {
        info!(
            "  {}. {} {} : {} ({})",
            entry.position, entry.tier_icon, entry.name, entry.rate, entry.tier_name
        );
    }

    let stats = service.get_stats().await?;
    info!(
        "Done: {} queue(s) opened, {} match(es) started, {} resolved",
        stats.queues_opened, stats.matches_started, stats.matches_resolved
    );

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let winner = parse_winner(&args.winner)?;

    if args.participants < 2 {
        return Err(anyhow::anyhow!(
            "Need at least 2 participants, got {}",
            args.participants
        ));
    }

    info!("Scrim Hall Matchmaking Service v{}", scrim_hall::VERSION);
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!(
        "   Partition strategy: {} (exact limit {})",
        config.matchmaking.partition_strategy, config.matchmaking.exact_partition_limit
    );

    if args.dry_run {
        info!("Configuration validation successful");
        info!("Dry run completed - exiting without running the scenario");
        return Ok(());
    }

    run_scenario(config, args.participants, winner).await
}
