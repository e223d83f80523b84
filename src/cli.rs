//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvObservationAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::validate_simulation_config;
use crate::domain::error::ValuesimError;
use crate::domain::metrics::Summary;
use crate::domain::simulation::{run_simulation, SimulationConfig};
use crate::ports::config_port::ConfigPort;
use crate::ports::observation_port::ObservationPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "valuesim", about = "Valuation-aware investment strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay the strategy over a history file
    Simulate {
        #[arg(short, long)]
        config: PathBuf,
        /// History CSV; overrides [data] history from the config
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Write the operations ledger to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a simulation configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the date range of a history file
    Info {
        #[arg(short, long)]
        data: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Simulate {
            config,
            data,
            output,
        } => run_simulate(&config, data.as_ref(), output.as_ref()),
        Command::Validate { config } => run_validate(&config),
        Command::Info { data } => run_info(&data),
    }
}

fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = ValuesimError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Assemble a [`SimulationConfig`] from the `[simulation]` section,
/// falling back to the documented defaults for absent keys. The reserve
/// defaults to six base units when not set explicitly.
pub fn build_simulation_config(config: &dyn ConfigPort) -> SimulationConfig {
    let base_unit = config.get_double("simulation", "base_unit", 3000.0);
    SimulationConfig {
        initial_capital: config.get_double("simulation", "initial_capital", 100_000.0),
        base_unit,
        reserve: config.get_double("simulation", "reserve", 6.0 * base_unit),
        low_band: config.get_double("simulation", "low_band", 30.0),
        high_band: config.get_double("simulation", "high_band", 60.0),
        streak_threshold: config.get_int("simulation", "streak_threshold", 3) as u32,
        lookback: config.get_int("simulation", "lookback", 120) as usize,
        clip_low: config.get_double("simulation", "clip_low", 8.0),
        clip_high: config.get_double("simulation", "clip_high", 20.0),
        deviation_threshold: config.get_double("simulation", "deviation_threshold", 0.2),
        deviation_step: config.get_double("simulation", "deviation_step", 0.05),
        extreme_percentile: config.get_double("simulation", "extreme_percentile", 90.0),
        extreme_fraction: config.get_double("simulation", "extreme_fraction", 0.5),
        trend_fraction: config.get_double("simulation", "trend_fraction", 0.3),
        decision_day: config.get_int("simulation", "decision_day", 20) as u32,
    }
}

/// Resolve the history CSV path: CLI flag first, then `[data] history`.
pub fn resolve_history_path(
    config: &dyn ConfigPort,
    data_override: Option<&PathBuf>,
) -> Result<PathBuf, ValuesimError> {
    if let Some(path) = data_override {
        return Ok(path.clone());
    }
    match config.get_string("data", "history") {
        Some(s) if !s.trim().is_empty() => Ok(PathBuf::from(s)),
        _ => Err(ValuesimError::ConfigMissing {
            section: "data".to_string(),
            key: "history".to_string(),
        }),
    }
}

/// Optional `[data] start_date`/`end_date` bounds; absent keys leave the
/// range unbounded on that side.
pub fn resolve_date_range(
    config: &dyn ConfigPort,
) -> Result<(NaiveDate, NaiveDate), ValuesimError> {
    let parse = |key: &str, fallback: NaiveDate| -> Result<NaiveDate, ValuesimError> {
        match config.get_string("data", key) {
            None => Ok(fallback),
            Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
                ValuesimError::ConfigInvalid {
                    section: "data".to_string(),
                    key: key.to_string(),
                    reason: format!("invalid {} format, expected YYYY-MM-DD", key),
                }
            }),
        }
    };

    let start = parse("start_date", NaiveDate::MIN)?;
    let end = parse("end_date", NaiveDate::MAX)?;
    if start >= end {
        return Err(ValuesimError::ConfigInvalid {
            section: "data".to_string(),
            key: "start_date".to_string(),
            reason: "start_date must be before end_date".to_string(),
        });
    }
    Ok((start, end))
}

fn run_simulate(
    config_path: &PathBuf,
    data_override: Option<&PathBuf>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let sim_config = build_simulation_config(&adapter);
    if let Err(e) = validate_simulation_config(&sim_config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let result = resolve_history_path(&adapter, data_override)
        .and_then(|history| {
            eprintln!("Loading observations from {}", history.display());
            let (start, end) = resolve_date_range(&adapter)?;
            CsvObservationAdapter::new(history).fetch_observations(start, end)
        })
        .and_then(|observations| {
            eprintln!("Replaying {} observations", observations.len());
            run_simulation(&observations, &sim_config)
        });

    let result = match result {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let summary = Summary::compute(&result, sim_config.initial_capital);
    println!("Final net asset value: {:.2}", summary.final_value);
    println!("Total return: {:.2}%", summary.total_return * 100.0);
    println!(
        "Operations: {} contributions, {} rebalances, {} liquidations",
        summary.contributions, summary.rebalances, summary.liquidations
    );
    println!("Remaining reserve: {:.2}", result.state.reserve);

    if let Some(path) = output_path {
        let reporter = CsvReportAdapter::new();
        if let Err(e) = reporter.write(&result, &path.display().to_string()) {
            eprintln!("error: {e}");
            return (&e).into();
        }
        eprintln!("Ledger written to {}", path.display());
    }

    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let sim_config = build_simulation_config(&adapter);
    if let Err(e) = validate_simulation_config(&sim_config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    println!("Configuration OK");
    ExitCode::SUCCESS
}

fn run_info(data_path: &PathBuf) -> ExitCode {
    let adapter = CsvObservationAdapter::new(data_path.clone());
    match adapter.observation_range() {
        Ok(Some((first, last, count))) => {
            println!("{}: {} observations from {} to {}", data_path.display(), count, first, last);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("{}: no observations", data_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
