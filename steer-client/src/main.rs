use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use steer_client::{NeighborGroup, Scenario};

#[derive(Parser, Debug)]
#[command(author, version, about = "Separation steering for a focal entity and its neighbors", long_about = None)]
struct Args {
    /// Scenario JSON file with settings, focal position and neighbors
    #[arg(short, long)]
    scenario: PathBuf,

    /// Override the comfort distance from the scenario
    #[arg(short, long)]
    comfort_distance: Option<f32>,

    /// Override the multiplier applied inside the comfort distance
    #[arg(short, long)]
    multiplier: Option<f32>,

    /// Print the evaluation as JSON
    #[arg(short, long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("Loading scenario from {}", args.scenario.display());
    let scenario = Scenario::load(&args.scenario)?;

    let mut group =
        NeighborGroup::new(&scenario.settings).context("Invalid separation settings")?;
    if let Some(comfort_distance) = args.comfort_distance {
        group.set_comfort_distance(comfort_distance)?;
    }
    if let Some(multiplier) = args.multiplier {
        group.set_multiplier(multiplier)?;
    }

    log::info!(
        "Evaluating {} neighbors (comfort distance {}, multiplier {})",
        scenario.neighbors.len(),
        group.config().comfort_distance(),
        group.config().multiplier_inside_comfort_distance()
    );

    let evaluation = group.evaluate(scenario.focal, &scenario.neighbors);
    if !evaluation.skipped.is_empty() {
        log::warn!(
            "{} coincident neighbor(s) skipped",
            evaluation.skipped.len()
        );
    }

    if args.json {
        let output =
            serde_json::to_string_pretty(&evaluation).context("Failed to encode evaluation")?;
        println!("{}", output);
    } else {
        for report in &evaluation.reports {
            println!(
                "neighbor {:>3}: ({:.4}, {:.4}, {:.4})",
                report.index, report.contribution.x, report.contribution.y, report.contribution.z
            );
        }
        println!(
            "total       : ({:.4}, {:.4}, {:.4})",
            evaluation.total.x, evaluation.total.y, evaluation.total.z
        );
    }

    Ok(())
}
