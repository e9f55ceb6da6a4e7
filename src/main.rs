// Drives a headless, time-stepped traffic simulation through its HTTP API to
// measure how one signal-timing edit changes trip times and per-direction
// delay and throughput. Start the simulation server before running this,
// e.g.:
//
// > cargo run --release --bin headless -- --port=1234

use signalab::metrics::logger::ReportLogger;
use signalab::metrics::{report, ComparisonReport};
use signalab::prelude::*;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};

use tracing_subscriber;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full before/after signal experiment
    Run {
        #[arg(long, default_value = "http://localhost:1234")]
        api: String,
        #[arg(short, long, default_value_t = 67)]
        signal: u64,
        #[arg(short = 't', long, default_value = "12:00:00")]
        sim_until: SimTime,
        #[arg(long, default_value_t = 1)]
        stage: usize,
        #[arg(long, default_value_t = 2.0)]
        factor: f64,
        #[arg(long)]
        csv: Option<String>,
        #[arg(long)]
        json: bool,
    },

    /// Print the current simulated time
    Time {
        #[arg(long, default_value = "http://localhost:1234")]
        api: String,
    },

    /// Print the average position of all active pedestrians
    Positions {
        #[arg(long, default_value = "http://localhost:1234")]
        api: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Run {
            api,
            signal,
            sim_until,
            stage,
            factor,
            csv,
            json,
        } => {
            run_experiment(api, signal, sim_until, stage, factor, csv, json).await?;
        }

        Commands::Time { api } => {
            let client = ApiClient::new(api);
            println!("Simulation time is currently {}", client.get_time().await?);
        }

        Commands::Positions { api } => {
            pedestrian_centroid(api).await?;
        }
    }

    Ok(())
}

async fn run_experiment(
    api: String,
    signal: u64,
    sim_until: SimTime,
    stage: usize,
    factor: f64,
    csv: Option<String>,
    json: bool,
) -> Result<()> {
    let client = ApiClient::new(api);

    // Worth flagging before two resets wipe whatever was in progress.
    println!(
        "Did you just start the simulation? Time is currently {}",
        client.get_time().await?
    );

    let config = ExperimentConfig {
        name: format!("signal{}", signal),
        signal_id: signal,
        sim_until,
        stage_index: stage,
        scale_factor: factor,
    };

    let runner = ExperimentRunner::new(client, config.clone());
    let (baseline_raw, treatment_raw) = runner
        .run(move |ts| ts.scale_fixed_stage(stage, factor))
        .await?;

    let baseline = PhaseSummary::from_raw(&baseline_raw);
    let treatment = PhaseSummary::from_raw(&treatment_raw);

    print!("{}", report::render(&baseline, &treatment));

    if let Some(path) = csv {
        let rows = report::comparison_rows(&baseline, &treatment);
        ReportLogger::new(&path)?.log_batch(&rows)?;
        info!("Comparison rows saved to: {}", path);
    }

    if json {
        save_report(&config, baseline, treatment)?;
    }

    Ok(())
}

fn save_report(
    config: &ExperimentConfig,
    baseline: PhaseSummary,
    treatment: PhaseSummary,
) -> Result<()> {
    let comparison = ComparisonReport::new(
        config.signal_id,
        config.sim_until.to_string(),
        baseline,
        treatment,
    );

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    std::fs::create_dir_all("results")?;
    let path = format!("results/{}_{}.json", config.name, timestamp);
    std::fs::write(&path, serde_json::to_string_pretty(&comparison)?)?;
    info!("Comparison saved to: {}", path);

    Ok(())
}

async fn pedestrian_centroid(api: String) -> Result<()> {
    let client = ApiClient::new(api);
    let agents = client.get_agent_positions().await?;

    let pedestrians: Vec<_> = agents
        .iter()
        .filter(|agent| agent.vehicle_type.is_none())
        .collect();
    if pedestrians.is_empty() {
        println!("No pedestrians are active right now");
        return Ok(());
    }

    let n = pedestrians.len() as f64;
    let avg_lon = pedestrians.iter().map(|agent| agent.pos.longitude).sum::<f64>() / n;
    let avg_lat = pedestrians.iter().map(|agent| agent.pos.latitude).sum::<f64>() / n;
    println!(
        "Average position of all {} active pedestrians: {}, {}",
        pedestrians.len(),
        avg_lon,
        avg_lat
    );

    Ok(())
}
