//! chitra-localize-node driver
//!
//! Loads a color map and a scripted scenario, then threads a histogram
//! filter through the scenario's move/sense steps.
//!
//! # Usage
//!
//! ```bash
//! # With the bundled demo scenario
//! cargo run --bin chitra-localize-node
//!
//! # With a custom map and scenario
//! cargo run --bin chitra-localize-node -- --map maps/m2.txt --scenario scenarios/demo.toml
//!
//! # With per-step debug logging
//! RUST_LOG=debug cargo run --bin chitra-localize-node
//! ```

use chitra_localize::{
    read_map, render_beliefs, Displacement, Error, FilterConfig, HistogramFilter, SensorModel,
};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::process;

/// Scripted localization driver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Color map file (space-separated single-character tokens)
    #[arg(short, long, default_value = "maps/m1.txt")]
    map: String,

    /// Scenario file with filter settings and steps
    #[arg(short, long, default_value = "scenarios/demo.toml")]
    scenario: String,

    /// Only report the final estimate
    #[arg(short, long)]
    quiet: bool,
}

/// Scenario file structure
#[derive(Debug, Deserialize, Default)]
struct Scenario {
    #[serde(default)]
    filter: FilterSection,
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct FilterSection {
    blurring: f32,
    p_hit: f32,
    p_miss: f32,
}

impl Default for FilterSection {
    fn default() -> Self {
        let config = FilterConfig::default();
        Self {
            blurring: config.blurring,
            p_hit: config.sensor.p_hit(),
            p_miss: config.sensor.p_miss(),
        }
    }
}

/// One scripted step: exactly one of `move` or `sense`.
#[derive(Debug, Deserialize)]
struct Step {
    /// Displacement as [dy, dx]
    #[serde(rename = "move", default)]
    displacement: Option<[i32; 2]>,

    /// Observed color
    #[serde(default)]
    sense: Option<char>,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(err) = run(&args) {
        log::error!("{}", err);
        process::exit(1);
    }
}

fn run(args: &Args) -> chitra_localize::Result<()> {
    let map = read_map(&args.map)?;
    let scenario: Scenario = toml::from_str(&fs::read_to_string(&args.scenario)?)?;

    let config = FilterConfig {
        blurring: scenario.filter.blurring,
        sensor: SensorModel::new(scenario.filter.p_hit, scenario.filter.p_miss)?,
    };

    let (height, width) = map.dimensions();
    log::info!(
        "{}x{} map, {} steps, blurring={} p_hit={} p_miss={}",
        height,
        width,
        scenario.steps.len(),
        config.blurring,
        config.sensor.p_hit(),
        config.sensor.p_miss()
    );

    let mut filter = HistogramFilter::new(map, config)?;
    if !args.quiet {
        println!("map:\n{}", filter.map());
        println!("initial beliefs:\n{}", render_beliefs(filter.beliefs()));
    }

    for (index, step) in scenario.steps.iter().enumerate() {
        match (step.displacement, step.sense) {
            (Some([dy, dx]), None) => filter.predict(Displacement::new(dy, dx))?,
            (None, Some(color)) => filter.measure(color)?,
            _ => {
                return Err(Error::Scenario(format!(
                    "step {}: expected exactly one of `move` or `sense`",
                    index + 1
                )))
            }
        }

        if !args.quiet {
            println!("after step {}:\n{}", index + 1, render_beliefs(filter.beliefs()));
        }
    }

    let (row, col, probability) = filter.best_estimate();
    log::info!("best estimate: ({}, {}) with p={:.3}", row, col, probability);
    Ok(())
}
