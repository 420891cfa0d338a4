//! Run a fertility x migration sensitivity grid from one baseline
//!
//! Usage: cargo run --bin compare_scenarios -- --country KOR --years 50

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use population_projection::{
    export,
    population::{loader, AgeBandTotals, PopulationState, DEFAULT_SYNTHETIC_POPULATION},
    ProjectionConfig, ScenarioRunner,
};

#[derive(Debug, Parser)]
#[command(name = "compare_scenarios", about = "Population projection sensitivity grid")]
struct Args {
    /// ISO 3-letter country code; synthetic baseline if omitted
    #[arg(short, long)]
    country: Option<String>,

    #[arg(long, default_value = loader::DEFAULT_DATA_PATH)]
    data_dir: PathBuf,

    /// Total fertility rates to test
    #[arg(long, value_delimiter = ',', default_values_t = vec![1.0, 1.5, 2.1, 3.0])]
    tfr: Vec<f64>,

    /// Annual net migration levels to test
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_values_t = vec![-50_000, 0, 50_000, 200_000])]
    migration: Vec<i64>,

    #[arg(short = 'n', long, default_value_t = 50)]
    years: u32,

    #[arg(short, long, default_value = "scenario_summary.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let (runner, base_config) = match &args.country {
        Some(code) => {
            let catalog = loader::load_countries(&args.data_dir)?;
            let profile = catalog.get(code)?;
            let runner = ScenarioRunner::from_country(&args.data_dir, &catalog, code)?;
            (runner, profile.projection_config(args.years))
        }
        None => {
            let baseline = PopulationState::synthetic(DEFAULT_SYNTHETIC_POPULATION);
            let config = ProjectionConfig {
                num_years: args.years,
                ..Default::default()
            };
            (ScenarioRunner::new(baseline)?, config)
        }
    };

    let configs: Vec<ProjectionConfig> = args
        .tfr
        .iter()
        .flat_map(|&tfr| {
            args.migration.iter().map(move |&net_migration| ProjectionConfig {
                tfr,
                net_migration,
                ..base_config
            })
        })
        .collect();

    println!("Running {} scenarios over {} years...", configs.len(), args.years);
    let results = runner.run_scenarios_parallel(&configs)?;
    println!("Projections complete in {:?}", start.elapsed());

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    export::write_scenario_summary_csv(file, &configs, &results)?;

    println!(
        "\n{:>6} {:>12} {:>14} {:>9} {:>10}",
        "TFR", "Migration", "End Pop", "Change", "DepRatio"
    );
    for (config, result) in configs.iter().zip(&results) {
        let summary = result.summary();
        let bands = result
            .final_year()
            .map(|y| AgeBandTotals::from_state(&y.population))
            .unwrap_or_default();

        println!(
            "{:>6.2} {:>12} {:>14} {:>8.1}% {:>10.3}",
            config.tfr,
            config.net_migration,
            summary.end_population,
            summary.pct_change,
            bands.dependency_ratio(),
        );
    }

    println!("\nOutput written to {}", args.output.display());
    println!("Total time: {:?}", start.elapsed());
    Ok(())
}
