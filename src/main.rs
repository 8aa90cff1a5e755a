mod analysis;
mod data;
mod error;
mod export;
mod report;
mod sample;
mod session;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use analysis::categorical::{analyze_categorical, DEFAULT_TOP};
use analysis::numeric::analyze_numerical;
use data::model::Dataset;
use error::AnalyzerError;
use report::ReportOptions;
use sample::SampleOptions;
use session::Session;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate sample data, then overview, report and export it
    Demo {
        #[arg(long, default_value_t = 500)]
        records: usize,
        #[arg(long, default_value = "sales_data.csv")]
        output: PathBuf,
        #[arg(long, default_value = export::DEFAULT_DB)]
        db: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Write a synthetic sales CSV
    Generate {
        #[arg(long, default_value_t = sample::DEFAULT_RECORDS)]
        records: usize,
        #[arg(long, default_value = sample::DEFAULT_OUTPUT)]
        output: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show size, column kinds and the first rows
    Overview { file: PathBuf },
    /// Analyze the leading numerical and categorical columns
    Report {
        file: PathBuf,
        /// Columns of each kind to analyze
        #[arg(long, default_value_t = 3)]
        columns: usize,
        /// Ranked values per categorical column
        #[arg(long, default_value_t = 5)]
        top: usize,
        #[arg(long)]
        json: bool,
    },
    /// Descriptive statistics of one numerical column
    Numeric {
        file: PathBuf,
        column: String,
        #[arg(long)]
        json: bool,
    },
    /// Frequency table of one categorical column
    Categorical {
        file: PathBuf,
        column: String,
        #[arg(long, default_value_t = DEFAULT_TOP)]
        top: usize,
        #[arg(long)]
        json: bool,
    },
    /// Write the rows to the `csv_data` table of a SQLite database
    Export {
        file: PathBuf,
        #[arg(long, default_value = export::DEFAULT_DB)]
        db: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<AnalyzerError>() {
                Some(core) => eprintln!("✗ {core}"),
                None => eprintln!("✗ {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    let mut session = Session::default();

    match command {
        Command::Demo {
            records,
            output,
            db,
            seed,
        } => {
            println!("CSV DATA ANALYZER");
            println!("{}", "=".repeat(50));
            let options = SampleOptions {
                records,
                output,
                seed,
            };
            println!("Generating {records} sample records...");
            let path = sample::write_sample_file(&options)?;
            println!("✓ Created {} with {records} records", path.display());

            let dataset = load(&mut session, path)?;
            print!("{}", report::render_overview(dataset));
            let built = report::build_report(dataset, &ReportOptions::default());
            print!("{}", report::render_report(&built));
            export_dataset(dataset, &db)?;
        }
        Command::Generate {
            records,
            output,
            seed,
        } => {
            let options = SampleOptions {
                records,
                output,
                seed,
            };
            println!("Generating {records} sample records...");
            let path = sample::write_sample_file(&options)?;
            println!("✓ Created {} with {records} records", path.display());
        }
        Command::Overview { file } => {
            let dataset = load(&mut session, &file)?;
            print!("{}", report::render_overview(dataset));
        }
        Command::Report {
            file,
            columns,
            top,
            json,
        } => {
            let dataset = load(&mut session, &file)?;
            let built = report::build_report(dataset, &ReportOptions { columns, top });
            if json {
                print_json(&built)?;
            } else {
                print!("{}", report::render_report(&built));
            }
        }
        Command::Numeric { file, column, json } => {
            let dataset = load(&mut session, &file)?;
            let summary = analyze_numerical(dataset, &column)?;
            if json {
                print_json(&summary)?;
            } else {
                print!("{}", report::render_numeric(&summary));
            }
        }
        Command::Categorical {
            file,
            column,
            top,
            json,
        } => {
            let dataset = load(&mut session, &file)?;
            let summary = analyze_categorical(dataset, &column, top)?;
            if json {
                print_json(&summary)?;
            } else {
                print!("{}", report::render_categorical(&summary));
            }
        }
        Command::Export { file, db } => {
            let dataset = load(&mut session, &file)?;
            export_dataset(dataset, &db)?;
        }
    }
    Ok(())
}

fn load<'a>(session: &'a mut Session, path: &Path) -> Result<&'a Dataset> {
    session.load(path)?;
    if let Some(msg) = &session.status_message {
        println!("{msg}");
    }
    session.current().context("no dataset loaded")
}

fn export_dataset(dataset: &Dataset, db: &Path) -> Result<()> {
    let written = export::export_to_sqlite(dataset, db)?;
    println!("✓ Exported {written} rows to {}", db.display());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
