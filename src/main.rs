use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use courtside::config::AppConfig;
use courtside::models::{AthleteSessionRecord, TrainingSession};
use courtside::storage::{self, StorageConfig};
use courtside::{calculate, chart};

#[derive(Parser)]
#[command(name = "courtside")]
#[command(about = "Team performance analytics for basketball training data")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides config file)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print analytics reports to the console
    Report {
        #[command(subcommand)]
        report: ReportKind,
    },

    /// Import sessions and records from JSON array exports
    Import {
        /// Path to a JSON array of sessions
        #[arg(long)]
        sessions: Option<String>,

        /// Path to a JSON array of athlete records
        #[arg(long)]
        records: Option<String>,

        /// Parse and report counts without writing
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
enum ReportKind {
    /// Team averages per session plus a summary
    Team,

    /// Player rankings by average points
    Players {
        /// Show only one player, looked up by name
        #[arg(long)]
        player: Option<String>,
    },

    /// Full metric breakdown for one athlete
    Athlete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting courtside v{}", env!("CARGO_PKG_VERSION"));

    let config_path = PathBuf::from(&cli.config);
    let config = if config_path.exists() {
        AppConfig::from_file(&config_path)?
    } else {
        AppConfig::default()
    };
    let data_dir = cli
        .data_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| config.data_dir.clone());
    let storage_config = StorageConfig::new(data_dir);

    match cli.command {
        Commands::Serve { host, port } => {
            let state = courtside::api::state::AppState {
                storage: Arc::new(storage_config),
            };
            let app = courtside::api::build_router(state);
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Report { report } => {
            let sessions = storage::load_sessions(&storage_config)?;
            let records = storage::load_records(&storage_config)?;

            match report {
                ReportKind::Team => print_team_report(&sessions, &records),
                ReportKind::Players { player } => {
                    print_players_report(&sessions, &records, player.as_deref())?
                }
                ReportKind::Athlete { id } => print_athlete_report(&id, &sessions, &records)?,
            }
        }
        Commands::Import {
            sessions,
            records,
            dry_run,
        } => {
            if sessions.is_none() && records.is_none() {
                eprintln!("Specify --sessions and/or --records");
                return Ok(());
            }

            if let Some(path) = sessions {
                let imported = import_sessions(&storage_config, &PathBuf::from(path), dry_run)?;
                println!("Sessions imported: {}", imported);
            }
            if let Some(path) = records {
                let imported = import_records(&storage_config, &PathBuf::from(path), dry_run)?;
                println!("Records imported:  {}", imported);
            }
            if dry_run {
                println!("\n(dry run - no data written to disk)");
            }
        }
    }

    Ok(())
}

fn print_team_report(sessions: &[TrainingSession], records: &[AthleteSessionRecord]) {
    let report = calculate::team_trends(sessions, records);

    println!("\n=== Team Trend Results ===");
    for stat in &report.session_stats {
        let date = stat
            .session_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "(no date)".to_string());
        println!(
            "{}  {:<24} players: {:>2}  avg: {:>6.2}",
            date, stat.session_name, stat.participating_athletes, stat.avg_points_per_player
        );
    }

    match report.summary {
        Some(summary) => {
            println!("\nSessions:          {}", summary.total_sessions);
            println!("Overall average:   {:.2}", summary.overall_average);
            println!("Highest average:   {:.2}", summary.highest_average);
            println!("Lowest average:    {:.2}", summary.lowest_average);
            println!("Total points:      {:.2}", summary.total_points_scored);
            println!("Consistency score: {:.1}", summary.consistency_score);
        }
        None => println!("No participating sessions found."),
    }
}

fn print_players_report(
    sessions: &[TrainingSession],
    records: &[AthleteSessionRecord],
    player: Option<&str>,
) -> Result<()> {
    let report = calculate::player_rankings(sessions, records);

    if let Some(name) = player {
        let Some(stat) = report.get_player(name) else {
            anyhow::bail!("No player named: {}", name);
        };
        println!("\n=== Player Results: {} ===", stat.player_name);
        println!("Sessions:       {}", stat.sessions_participated);
        println!("Total points:   {:.2}", stat.total_points);
        println!("Average points: {:.2}", stat.average_points);
        for entry in &stat.sessions {
            let date = entry
                .session_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "(no date)".to_string());
            println!("  {}  {:<24} {:>6.2}", date, entry.session_name, entry.points);
        }
        return Ok(());
    }

    println!("\n=== Player Ranking Results ===");
    for (rank, stat) in report.player_stats.iter().enumerate() {
        println!(
            "{:>3}. {:<20} avg: {:>6.2}  sessions: {:>2}",
            rank + 1,
            stat.player_name,
            stat.average_points,
            stat.sessions_participated
        );
    }

    if let Some(summary) = report.summary {
        println!("\nPlayers:            {}", summary.total_players);
        println!("Top performer:      {}", summary.top_performer.player_name);
        println!("Overall average:    {:.2}", summary.overall_average);
        println!("Performance spread: {:.2}", summary.performance_spread);
    }

    Ok(())
}

fn print_athlete_report(
    athlete_id: &str,
    sessions: &[TrainingSession],
    records: &[AthleteSessionRecord],
) -> Result<()> {
    if !records.iter().any(|r| r.athlete_id.as_str() == athlete_id) {
        anyhow::bail!("No records for athlete: {}", athlete_id);
    }

    let report = calculate::athlete_metrics(athlete_id, sessions, records);

    println!("\n=== Athlete Metric Results ===");
    for m in &report.session_metrics {
        let date = m
            .session_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "(no date)".to_string());
        println!(
            "{}  {:<24} pts: {:>5.1}  reb: {:>4.1}  ast: {:>4.1}  rpe: {:>4.1}",
            date, m.session_name, m.points, m.rebounds, m.assists, m.rpe
        );
    }

    match report.summary {
        Some(ref summary) => {
            println!("\nSessions played:     {}", summary.sessions_played);
            println!(
                "Points:              {:.2} total, {:.2} avg",
                summary.points.total, summary.points.average
            );
            println!(
                "Rebounds:            {:.2} total, {:.2} avg",
                summary.rebounds.total, summary.rebounds.average
            );
            println!(
                "Assists:             {:.2} total, {:.2} avg",
                summary.assists.total, summary.assists.average
            );
            println!(
                "Best performance:    {} ({:.1} pts)",
                summary.best_performance.session_name, summary.best_performance.points
            );
            println!(
                "Worst performance:   {} ({:.1} pts)",
                summary.worst_performance.session_name, summary.worst_performance.points
            );
            println!("Points consistency:  {:.1}", summary.points_consistency);

            // Trend over the points series, only worth printing with enough data
            let series = report.metric_series(courtside::models::Metric::Points);
            if series.len() >= chart::TREND_MIN_POINTS {
                let trend = chart::linear_trend(&series);
                let direction = if trend[trend.len() - 1] > trend[0] {
                    "improving"
                } else if trend[trend.len() - 1] < trend[0] {
                    "declining"
                } else {
                    "flat"
                };
                println!("Points trend:        {}", direction);
            }
        }
        None => println!("No participating sessions for this athlete."),
    }

    Ok(())
}

fn import_sessions(config: &StorageConfig, path: &PathBuf, dry_run: bool) -> Result<usize> {
    let contents = std::fs::read_to_string(path)?;
    let mut incoming: Vec<TrainingSession> = serde_json::from_str(&contents)?;
    for session in &mut incoming {
        session.ensure_id();
    }

    let mut existing = storage::load_sessions(config)?;
    let before = existing.len();
    for session in incoming {
        if !existing.iter().any(|s| s.id == session.id) {
            existing.push(session);
        }
    }
    let added = existing.len() - before;

    if !dry_run {
        storage::write_sessions(config, &mut existing)?;
    }
    Ok(added)
}

fn import_records(config: &StorageConfig, path: &PathBuf, dry_run: bool) -> Result<usize> {
    let contents = std::fs::read_to_string(path)?;
    let incoming: Vec<AthleteSessionRecord> = serde_json::from_str(&contents)?;

    let mut existing = storage::load_records(config)?;
    let before = existing.len();
    // One record per athlete per session; later imports of the same pair are dropped.
    for record in incoming {
        if !existing
            .iter()
            .any(|r| r.dedup_key() == record.dedup_key())
        {
            existing.push(record);
        }
    }
    let added = existing.len() - before;

    if !dry_run {
        storage::write_records(config, &existing)?;
    }
    Ok(added)
}
