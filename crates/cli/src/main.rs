#![warn(clippy::pedantic)]

mod logger;
mod output;
mod settings;

use std::{io, path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use liftlog_domain::{self as domain, AnalysisService};
use liftlog_storage::CsvFile;
use log::debug;

use settings::Repository;

/// Analyze the training progress recorded in a workout log
#[derive(Parser, Debug)]
#[command(name = "liftlog", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Settings file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Similarity required to merge two exercise names (0 to 1)
    #[arg(long, global = true)]
    threshold: Option<f64>,

    /// Field delimiter of the CSV file
    #[arg(long, global = true)]
    delimiter: Option<char>,

    /// Log more details, can be repeated
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Log errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all exercises with session and training day totals
    Exercises {
        /// Workout log (CSV)
        file: PathBuf,
    },

    /// Show the progress of an exercise, one value per session
    Progress {
        /// Workout log (CSV)
        file: PathBuf,

        /// Exercise name, matched like names in the log
        #[arg(short, long)]
        exercise: String,

        /// Value representing a session: best-set, 1rm or volume
        #[arg(short, long, default_value_t)]
        mode: domain::Mode,
    },

    /// Show the personal records of an exercise
    Records {
        /// Workout log (CSV)
        file: PathBuf,

        /// Exercise name, matched like names in the log
        #[arg(short, long)]
        exercise: String,
    },

    /// Show the number of training days per week
    Weekly {
        /// Workout log (CSV)
        file: PathBuf,
    },

    /// Print the effective settings
    Settings,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            exit_code(&err)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = load_settings(&cli)?;

    init_logger(logger::level(settings.log_level, cli.verbose, cli.quiet))?;

    debug!("{settings:?}");

    let service = |file: PathBuf| {
        domain::Service::with_threshold(
            CsvFile::new(file, settings.csv.clone()),
            settings.similarity_threshold,
        )
    };
    let stdout = io::stdout().lock();

    match cli.command {
        Command::Exercises { file } => {
            let overview = service(file).get_overview()?;
            output::write(stdout, &output::Overview::from(overview))?;
        }
        Command::Progress {
            file,
            exercise,
            mode,
        } => {
            let series = service(file).get_progress(&exercise, mode)?;
            output::write(stdout, &output::Progress::from(series))?;
        }
        Command::Records { file, exercise } => {
            let records = service(file).get_personal_records(&exercise)?;
            output::write(stdout, &output::Records::from(records))?;
        }
        Command::Weekly { file } => {
            let weeks = service(file).get_weekly_summary()?;
            output::write(
                stdout,
                &weeks.iter().map(output::Week::from).collect::<Vec<_>>(),
            )?;
        }
        Command::Settings => {
            output::write(stdout, &settings)?;
        }
    }

    Ok(())
}

/// Settings from the settings file, overridden by command line options.
fn load_settings(cli: &Cli) -> anyhow::Result<settings::Settings> {
    let mut settings = match &cli.config {
        Some(path) => settings::JsonFile::new(path)
            .read_settings()
            .with_context(|| format!("failed to read settings from {}", path.display()))?,
        None => settings::Settings::default(),
    };

    if let Some(threshold) = cli.threshold {
        settings.similarity_threshold = threshold;
    }

    if let Some(delimiter) = cli.delimiter {
        settings.csv.delimiter = delimiter;
    }

    Ok(settings.validate()?)
}

fn init_logger(level: log::LevelFilter) -> anyhow::Result<()> {
    logger::init(level).map_err(|err| anyhow::anyhow!("failed to initialize logger: {err}"))
}

/// 1 for problems with the content of the log, 2 for everything else.
fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<domain::ServiceError>() {
        Some(domain::ServiceError::Analysis(_)) => ExitCode::from(1),
        _ => ExitCode::from(2),
    }
}
