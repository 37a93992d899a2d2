use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};

use election_analytics::analysis::{
    count_flips, coverage, rank_flips, resolve_winners, turnout_by_year, winners_for_year,
};
use election_analytics::dataset::{Dataset, DatasetKind};
use election_analytics::xlsx;

#[derive(Parser)]
#[command(name = "election-analytics")]
#[command(about = "Analyze US election result CSVs (president, senate)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    President,
    Senate,
}

impl From<Kind> for DatasetKind {
    fn from(kind: Kind) -> DatasetKind {
        match kind {
            Kind::President => DatasetKind::President,
            Kind::Senate => DatasetKind::Senate,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Display information about a dataset
    Info {
        /// Input CSV file
        input: PathBuf,

        /// Which dataset the file holds
        #[arg(long, value_enum, default_value = "president")]
        kind: Kind,
    },

    /// Validate a dataset: resolve the schema and report skipped rows
    Validate {
        /// Input CSV file
        input: PathBuf,

        /// Which dataset the file holds
        #[arg(long, value_enum, default_value = "president")]
        kind: Kind,
    },

    /// Resolve per-state winners for one year or all years
    Winners {
        /// Input CSV file
        input: PathBuf,

        /// Restrict output to a single election year
        #[arg(long)]
        year: Option<u16>,

        /// Write the winner table to a CSV file instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Which dataset the file holds
        #[arg(long, value_enum, default_value = "president")]
        kind: Kind,
    },

    /// Count party flips per state across a year range
    Flips {
        /// Input CSV file
        input: PathBuf,

        /// Start of the year range (inclusive); defaults to the earliest year
        #[arg(long)]
        start: Option<u16>,

        /// End of the year range (inclusive); defaults to the latest year
        #[arg(long)]
        end: Option<u16>,

        /// Number of states to list
        #[arg(long, default_value = "15")]
        top: usize,

        /// Which dataset the file holds
        #[arg(long, value_enum, default_value = "president")]
        kind: Kind,
    },

    /// Write an Excel report (winners, flips, turnout)
    Report {
        /// Input CSV file
        input: PathBuf,

        /// Output Excel file
        #[arg(short, long)]
        output: PathBuf,

        /// Start of the flip year range (inclusive)
        #[arg(long)]
        start: Option<u16>,

        /// End of the flip year range (inclusive)
        #[arg(long)]
        end: Option<u16>,

        /// Which dataset the file holds
        #[arg(long, value_enum, default_value = "president")]
        kind: Kind,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { input, kind } => {
            info(&input, kind)?;
        }
        Commands::Validate { input, kind } => {
            validate(&input, kind)?;
        }
        Commands::Winners {
            input,
            year,
            output,
            kind,
        } => {
            winners(&input, year, output.as_deref(), kind)?;
        }
        Commands::Flips {
            input,
            start,
            end,
            top,
            kind,
        } => {
            flips(&input, start, end, top, kind)?;
        }
        Commands::Report {
            input,
            output,
            start,
            end,
            kind,
        } => {
            report(&input, &output, start, end, kind)?;
        }
    }

    Ok(())
}

fn load(input: &Path, kind: Kind) -> Result<Dataset> {
    println!("Reading {} dataset: {}", DatasetKind::from(kind).label(), input.display());
    Dataset::load(input, kind.into())
        .with_context(|| format!("Failed to load {}", input.display()))
}

fn info(input: &Path, kind: Kind) -> Result<()> {
    let dataset = load(input, kind)?;
    let years = dataset.years();

    println!("Rows: {}", dataset.rows.len());
    if let (Some(first), Some(last)) = (years.first(), years.last()) {
        println!("Years: {} ({}-{})", years.len(), first, last);
    } else {
        println!("Years: none");
        return Ok(());
    }
    println!("State column: {}", dataset.state_key.column_name());

    if let Some(&latest) = years.last() {
        let c = coverage(&dataset, latest);
        println!(
            "Coverage in {}: {} states with a race, {} without",
            latest, c.states_with_race, c.no_race
        );
    }

    Ok(())
}

fn validate(input: &Path, kind: Kind) -> Result<()> {
    let dataset = load(input, kind)?;

    println!("Dataset is valid");
    println!("  {} rows", dataset.rows.len());
    println!("  state column: {}", dataset.state_key.column_name());

    if dataset.skipped_rows() > 0 {
        println!("  {} rows skipped during loading", dataset.skipped_rows());
    } else {
        println!("  no rows skipped");
    }

    Ok(())
}

/// One line of the winners CSV export
#[derive(Serialize)]
struct WinnerRow {
    year: u16,
    state: String,
    party: String,
    candidate: String,
    votes: u64,
}

fn winners(input: &Path, year: Option<u16>, output: Option<&Path>, kind: Kind) -> Result<()> {
    let dataset = load(input, kind)?;
    let table = resolve_winners(&dataset.rows);

    let rows: Vec<WinnerRow> = match year {
        Some(y) => winners_for_year(&table, y)
            .into_iter()
            .map(|(state, record)| WinnerRow {
                year: y,
                state: state.to_string(),
                party: record.party.label().to_string(),
                candidate: record.candidate.clone().unwrap_or_default(),
                votes: record.votes,
            })
            .collect(),
        None => table
            .iter()
            .map(|((state, y), record)| WinnerRow {
                year: *y,
                state: state.clone(),
                party: record.party.label().to_string(),
                candidate: record.candidate.clone().unwrap_or_default(),
                votes: record.votes,
            })
            .collect(),
    };

    if rows.is_empty() {
        println!("No winners found");
        return Ok(());
    }

    match output {
        Some(path) => {
            let mut writer =
                csv::Writer::from_path(path).context("Failed to create output CSV")?;
            for row in &rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
            println!("Wrote {} winners to {}", rows.len(), path.display());
        }
        None => {
            for row in &rows {
                println!(
                    "{} {}: {} ({}) - {} votes",
                    row.year, row.state, row.party, row.candidate, row.votes
                );
            }
        }
    }

    Ok(())
}

fn flips(input: &Path, start: Option<u16>, end: Option<u16>, top: usize, kind: Kind) -> Result<()> {
    // Only ~1/3 of senate seats are contested each cycle (6-year terms), so
    // comparing consecutive cycles is not meaningful for that dataset.
    if matches!(kind, Kind::Senate) {
        println!("Flip analysis is not applicable to the Senate dataset (staggered 6-year terms)");
        return Ok(());
    }

    let dataset = load(input, kind)?;
    let years = dataset.years();
    let (Some(&first), Some(&last)) = (years.first(), years.last()) else {
        println!("No data");
        return Ok(());
    };

    let start = start.unwrap_or(first);
    let end = end.unwrap_or(last);

    let table = resolve_winners(&dataset.rows);
    let counts = count_flips(&table, &dataset.display_states(), start, end);
    let ranked = rank_flips(&counts, top);

    println!("Party flips per state, {}-{}:", start.min(end), start.max(end));
    for (state, count) in &ranked {
        println!("  {} {}", state, count);
    }

    Ok(())
}

fn report(
    input: &Path,
    output: &Path,
    start: Option<u16>,
    end: Option<u16>,
    kind: Kind,
) -> Result<()> {
    let dataset = load(input, kind)?;
    let years = dataset.years();

    let table = resolve_winners(&dataset.rows);
    println!("Found {} winner records", table.len());

    let ranked = match (kind, years.first(), years.last()) {
        (Kind::Senate, _, _) => {
            println!("Skipping flip sheet for the Senate dataset (staggered 6-year terms)");
            None
        }
        (_, Some(&first), Some(&last)) => {
            let counts = count_flips(
                &table,
                &dataset.display_states(),
                start.unwrap_or(first),
                end.unwrap_or(last),
            );
            Some(rank_flips(&counts, counts.len()))
        }
        _ => None,
    };

    let turnout = turnout_by_year(&dataset);

    println!("Writing Excel report: {}", output.display());
    xlsx::write_report_to_xlsx(&table, ranked.as_deref(), &turnout, output)
        .context("Failed to write Excel report")?;

    println!("Done!");
    Ok(())
}
