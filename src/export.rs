//! CSV export of projection results
//!
//! One row per year. Historical rows (if any) come first with empty flow columns,
//! followed by every simulated year including the baseline. Population counts are
//! rounded to whole persons and broken down by age band and by pyramid bin.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::error::Result;
use crate::population::{
    pyramid_bins, pyramid_labels, AgeBandTotals, HistoricalSnapshot, PopulationState,
};
use crate::projection::{ProjectionConfig, ProjectionResult};

const FIXED_COLUMNS: [&str; 9] = [
    "Year",
    "Source",
    "Total Population",
    "Children (0-17)",
    "Working Age (18-64)",
    "Elderly (65+)",
    "Births",
    "Deaths",
    "Net Migration",
];

/// Column names in output order
pub fn export_header() -> Vec<String> {
    let labels = pyramid_labels();
    FIXED_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(labels.iter().map(|l| format!("Male {}", l)))
        .chain(labels.iter().map(|l| format!("Female {}", l)))
        .collect()
}

/// Suggested file name: `simulation_{CODE}_{first_year}_{end_year}.csv`
pub fn export_file_name(
    country_code: &str,
    historical: &[HistoricalSnapshot],
    config: &ProjectionConfig,
) -> String {
    let first_year = historical
        .first()
        .map(|h| h.year)
        .unwrap_or(config.start_year);
    format!("simulation_{}_{}_{}.csv", country_code, first_year, config.end_year())
}

fn whole(value: f64) -> String {
    format!("{:.0}", value)
}

/// Population columns shared by historical and simulated rows
fn population_columns(population: &PopulationState, total: String) -> Vec<String> {
    let bands = AgeBandTotals::from_state(population);
    let bins = pyramid_bins(population);
    let mut columns = vec![
        total,
        whole(bands.children),
        whole(bands.working),
        whole(bands.elderly),
    ];
    columns.extend(bins.iter().map(|b| whole(b.male)));
    columns.extend(bins.iter().map(|b| whole(b.female)));
    columns
}

/// Write historical and simulated rows to any writer
pub fn write_projection_csv<W: Write>(
    writer: W,
    result: &ProjectionResult,
    historical: &[HistoricalSnapshot],
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(export_header())?;

    for snapshot in historical {
        let population = &snapshot.population;
        let mut record = vec![snapshot.year.to_string(), "Historical".to_string()];
        let mut columns = population_columns(population, whole(population.total()));
        let bins = columns.split_off(4);
        record.extend(columns);
        record.extend([String::new(), String::new(), String::new()]);
        record.extend(bins);
        csv_writer.write_record(&record)?;
    }

    for year in &result.years {
        let mut record = vec![year.year.to_string(), "Simulated".to_string()];
        let mut columns = population_columns(&year.population, year.total_population.to_string());
        let bins = columns.split_off(4);
        record.extend(columns);
        record.extend([
            year.births.to_string(),
            year.deaths.to_string(),
            year.net_migration.to_string(),
        ]);
        record.extend(bins);
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the export to a file
pub fn write_projection_csv_to_path<P: AsRef<Path>>(
    path: P,
    result: &ProjectionResult,
    historical: &[HistoricalSnapshot],
) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_projection_csv(file, result, historical)?;
    info!(
        "Wrote {} rows to {}",
        historical.len() + result.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// One line of the scenario comparison summary
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ScenarioSummaryRow {
    #[serde(rename = "TFR")]
    tfr: f64,
    net_migration: i64,
    start_population: u64,
    end_population: u64,
    pct_change: f64,
    total_births: u64,
    total_deaths: u64,
    end_children: u64,
    end_working: u64,
    end_elderly: u64,
    dependency_ratio: f64,
}

/// Write one summary row per scenario, pairing configs and results in order
pub fn write_scenario_summary_csv<W: Write>(
    writer: W,
    configs: &[ProjectionConfig],
    results: &[ProjectionResult],
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for (config, result) in configs.iter().zip(results) {
        let summary = result.summary();
        let bands = result
            .final_year()
            .map(|y| AgeBandTotals::from_state(&y.population))
            .unwrap_or_default();

        csv_writer.serialize(ScenarioSummaryRow {
            tfr: config.tfr,
            net_migration: config.net_migration,
            start_population: summary.start_population,
            end_population: summary.end_population,
            pct_change: summary.pct_change,
            total_births: summary.total_births,
            total_deaths: summary.total_deaths,
            end_children: bands.children.round().max(0.0) as u64,
            end_working: bands.working.round().max(0.0) as u64,
            end_elderly: bands.elderly.round().max(0.0) as u64,
            dependency_ratio: bands.dependency_ratio(),
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProjectionEngine;

    fn projection() -> ProjectionResult {
        let config = ProjectionConfig {
            num_years: 2,
            net_migration: 1_500,
            ..Default::default()
        };
        ProjectionEngine::new(config).project(&PopulationState::synthetic(2_020_000.0))
    }

    fn export(result: &ProjectionResult, historical: &[HistoricalSnapshot]) -> Vec<csv::StringRecord> {
        let mut buffer = Vec::new();
        write_projection_csv(&mut buffer, result, historical).unwrap();
        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), 9 + 2 * 21);
        reader.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn test_header_layout() {
        let header = export_header();
        assert_eq!(header[0], "Year");
        assert_eq!(header[8], "Net Migration");
        assert_eq!(header[9], "Male 0-4");
        assert_eq!(header[29], "Male 100+");
        assert_eq!(header[30], "Female 0-4");
        assert_eq!(header.last().unwrap(), "Female 100+");
    }

    #[test]
    fn test_simulated_rows() {
        let result = projection();
        let rows = export(&result, &[]);

        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "2025");
        assert_eq!(&rows[0][1], "Simulated");
        assert_eq!(&rows[0][2], "2020000");
        assert_eq!(&rows[0][6], "0");
        assert_eq!(&rows[1][8], "1500");
        assert_eq!(rows[1][6].parse::<u64>().unwrap(), result.years[1].births);
        assert_eq!(rows[2][7].parse::<u64>().unwrap(), result.years[2].deaths);
    }

    #[test]
    fn test_historical_rows_come_first_with_empty_flows() {
        let historical = vec![HistoricalSnapshot {
            year: 2020,
            population: PopulationState::synthetic(1_010_000.0),
        }];
        let rows = export(&projection(), &historical);

        assert_eq!(rows.len(), 4);
        assert_eq!(&rows[0][0], "2020");
        assert_eq!(&rows[0][1], "Historical");
        assert_eq!(&rows[0][2], "1010000");
        assert_eq!(&rows[0][6], "");
        assert_eq!(&rows[0][8], "");
        // 5 ages x 5,000 per age for the first male bin
        assert_eq!(&rows[0][9], "25000");
        assert_eq!(&rows[1][1], "Simulated");
    }

    #[test]
    fn test_scenario_summary_csv() {
        let configs = [
            ProjectionConfig { tfr: 1.0, num_years: 2, ..Default::default() },
            ProjectionConfig { tfr: 3.0, net_migration: -500, num_years: 2, ..Default::default() },
        ];
        let baseline = PopulationState::synthetic(2_020_000.0);
        let results: Vec<ProjectionResult> = configs
            .iter()
            .map(|&config| ProjectionEngine::new(config).project(&baseline))
            .collect();

        let mut buffer = Vec::new();
        write_scenario_summary_csv(&mut buffer, &configs, &results).unwrap();

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "TFR");
        assert_eq!(&headers[1], "NetMigration");
        assert_eq!(&headers[10], "DependencyRatio");

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "3.0");
        assert_eq!(&rows[1][1], "-500");
        assert_eq!(&rows[0][2], "2020000");
        assert_eq!(
            rows[1][3].parse::<u64>().unwrap(),
            results[1].summary().end_population
        );
    }

    #[test]
    fn test_export_file_name() {
        let config = ProjectionConfig {
            start_year: 2025,
            num_years: 50,
            ..Default::default()
        };
        assert_eq!(export_file_name("KOR", &[], &config), "simulation_KOR_2025_2075.csv");

        let historical = vec![HistoricalSnapshot {
            year: 2000,
            population: PopulationState::default(),
        }];
        assert_eq!(
            export_file_name("KOR", &historical, &config),
            "simulation_KOR_2000_2075.csv"
        );
    }
}
