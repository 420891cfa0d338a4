//! Population Projection CLI
//!
//! Runs one projection for a country (or a synthetic baseline) and writes the
//! yearly results to CSV or JSON.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use population_projection::{
    export,
    population::{
        loader, AgeBandTotals, CountryCatalog, PopulationState, DEFAULT_SYNTHETIC_POPULATION,
    },
    ProjectionConfig, ProjectionEngine,
};

#[derive(Debug, Parser)]
#[command(name = "population_projection", version, about = "Cohort-component population projection")]
struct Args {
    /// ISO 3-letter country code whose defaults and baseline to use
    #[arg(short, long)]
    country: Option<String>,

    /// Directory holding countries.json and age_distributions/
    #[arg(long, default_value = loader::DEFAULT_DATA_PATH)]
    data_dir: PathBuf,

    /// JSON file with projection parameters (missing fields keep their defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    tfr: Option<f64>,

    #[arg(long)]
    le_male: Option<f64>,

    #[arg(long)]
    le_female: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    net_migration: Option<i64>,

    #[arg(long)]
    sex_ratio: Option<f64>,

    #[arg(long)]
    mortality_multiplier: Option<f64>,

    /// Concentrate migrants in ages 25-34
    #[arg(long, conflicts_with = "spread")]
    concentrated: bool,

    /// Spread migrants over ages 20-39 (overrides a config file)
    #[arg(long)]
    spread: bool,

    #[arg(long)]
    start_year: Option<i32>,

    /// Number of years to project
    #[arg(short = 'n', long)]
    years: Option<u32>,

    /// Number of historical years to include in the export
    #[arg(long, default_value_t = 0)]
    history: u32,

    /// Output path (defaults to simulation_{CODE}_{first}_{last}.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the full result as JSON instead of CSV
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Apply command-line overrides on top of a base config
    fn apply_overrides(&self, mut config: ProjectionConfig) -> ProjectionConfig {
        if let Some(tfr) = self.tfr {
            config.tfr = tfr;
        }
        if let Some(le) = self.le_male {
            config.life_expectancy_male = le;
        }
        if let Some(le) = self.le_female {
            config.life_expectancy_female = le;
        }
        if let Some(net) = self.net_migration {
            config.net_migration = net;
        }
        if let Some(ratio) = self.sex_ratio {
            config.sex_ratio_at_birth = ratio;
        }
        if let Some(mult) = self.mortality_multiplier {
            config.mortality_multiplier = mult;
        }
        if self.concentrated {
            config.concentrated_migration = true;
        } else if self.spread {
            config.concentrated_migration = false;
        }
        if let Some(year) = self.start_year {
            config.start_year = year;
        }
        if let Some(years) = self.years {
            config.num_years = years;
        }
        config
    }
}

fn load_config_file(path: &Path) -> Result<ProjectionConfig> {
    let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    serde_json::from_reader(file).with_context(|| format!("parsing config {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Population Projection v{}", env!("CARGO_PKG_VERSION"));
    println!("=========================\n");

    // Country defaults, then config file, then flags
    let catalog = match &args.country {
        Some(_) => loader::load_countries(&args.data_dir)
            .with_context(|| format!("loading countries from {}", args.data_dir.display()))?,
        None => CountryCatalog::default(),
    };

    let (code, mut config, baseline) = match &args.country {
        Some(code) => {
            let profile = catalog.get(code)?;
            println!("Country: {} ({})", profile.name, profile.code);
            if let Some(notes) = &profile.notes {
                println!("  {}", notes);
            }
            let baseline = loader::load_baseline(
                &args.data_dir,
                Some(&catalog),
                &profile.code,
                profile.baseline_year,
            )?;
            let config = profile.projection_config(ProjectionConfig::default().num_years);
            (profile.code.clone(), config, baseline)
        }
        None => {
            println!("Country: synthetic baseline");
            let baseline = PopulationState::synthetic(DEFAULT_SYNTHETIC_POPULATION);
            ("SYN".to_string(), ProjectionConfig::default(), baseline)
        }
    };

    if let Some(path) = &args.config {
        config = load_config_file(path)?;
    }
    let config = args.apply_overrides(config);
    config.validate()?;

    println!("  TFR: {:.2}", config.tfr);
    println!(
        "  Life expectancy: {:.1} (M) / {:.1} (F)",
        config.life_expectancy_male, config.life_expectancy_female
    );
    println!("  Net migration: {:+}", config.net_migration);
    println!("  Mortality multiplier: {:.2}", config.mortality_multiplier);
    println!("  Years: {} -> {}", config.start_year, config.end_year());
    println!();

    let engine = ProjectionEngine::new(config);
    let result = engine.project(&baseline);

    println!(
        "{:>6} {:>14} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Year", "Population", "Births", "Deaths", "Migration", "Children", "Working", "Elderly"
    );
    println!("{}", "-".repeat(100));
    for year in &result.years {
        let bands = AgeBandTotals::from_state(&year.population);
        println!(
            "{:>6} {:>14} {:>12} {:>12} {:>12} {:>12.0} {:>12.0} {:>12.0}",
            year.year,
            year.total_population,
            year.births,
            year.deaths,
            year.net_migration,
            bands.children,
            bands.working,
            bands.elderly,
        );
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Start Population: {}", summary.start_population);
    println!("  End Population: {}", summary.end_population);
    println!("  Change: {:+} ({:+.1}%)", summary.change, summary.pct_change);
    println!("  Total Births: {}", summary.total_births);
    println!("  Total Deaths: {}", summary.total_deaths);

    let historical = if args.history > 0 {
        let first_year = config.start_year - args.history as i32;
        loader::load_history(&args.data_dir, &code, first_year, config.start_year)?
    } else {
        Vec::new()
    };

    if args.json {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("simulation_{}.json", code)));
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, &result)?;
        println!("\nFull results written to: {}", path.display());
    } else {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(export::export_file_name(&code, &historical, &config)));
        export::write_projection_csv_to_path(&path, &result, &historical)?;
        println!("\nFull results written to: {}", path.display());
    }

    Ok(())
}
