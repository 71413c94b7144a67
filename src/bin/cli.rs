//! RosterKV CLI
//!
//! Command-line front end for the student record store.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rosterkv::config::{Config, SyncStrategy};
use rosterkv::store::{LoadStatus, RecordStore};
use rosterkv::{Record, Result, RosterError};
use tracing_subscriber::{fmt, EnvFilter};

/// RosterKV CLI
#[derive(Parser, Debug)]
#[command(name = "roster-cli")]
#[command(about = "Manage student records in a flat file")]
#[command(version)]
struct Args {
    /// Backing store file
    #[arg(short, long, default_value = "students.dat")]
    file: PathBuf,

    /// Skip fsync after rewriting the file
    #[arg(long)]
    no_sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every record in stored order
    List,

    /// Add a new student
    Add {
        /// Student ID (integer)
        id: String,

        /// Student name
        name: String,

        /// Student GPA (decimal)
        gpa: String,
    },

    /// Find a student by ID
    Search {
        /// Student ID to look up
        id: String,
    },

    /// Delete every student with the given ID
    #[command(alias = "delete")]
    Del {
        /// Student ID to delete
        id: String,
    },

    /// Check the store file and report what it holds
    Verify,
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,rosterkv=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(RosterError::InvalidInput { field, value }) => {
            eprintln!("Invalid input. Please enter valid data. ({}: {:?})", field, value);
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Execute one command against the configured store, writing results to `out`
fn run(args: Args, out: &mut impl Write) -> Result<()> {
    let sync_strategy = if args.no_sync {
        SyncStrategy::Never
    } else {
        SyncStrategy::EveryRewrite
    };

    let config = Config::builder()
        .data_file(&args.file)
        .sync_strategy(sync_strategy)
        .build();

    let store = RecordStore::open(config)?;

    match args.command {
        Commands::List => {
            let records = store.load_all();
            print_table(out, &records)?;
        }
        Commands::Add { id, name, gpa } => {
            let record = Record::parse(&id, &name, &gpa)?;
            store.try_append(record)?;
            writeln!(out, "Student added successfully!")?;
        }
        Commands::Search { id } => {
            let id = Record::parse_id(&id)?;

            // Duplicates are allowed; show the first one like a row selection would
            match store.find_by_id(id).first() {
                Some(record) => print_table(out, std::slice::from_ref(record))?,
                None => writeln!(out, "Student with ID {} not found.", id)?,
            }
        }
        Commands::Del { id } => {
            let id = Record::parse_id(&id)?;

            match store.try_delete_by_id(id)? {
                0 => writeln!(out, "Student with ID {} not found.", id)?,
                removed => writeln!(out, "Deleted {} record(s) with ID {}.", removed, id)?,
            }
        }
        Commands::Verify => {
            let outcome = store.try_load_all()?;
            let path = store.path().display();
            match &outcome.status {
                LoadStatus::Absent => writeln!(out, "{}: no store file (empty)", path)?,
                LoadStatus::Complete => {
                    writeln!(out, "{}: {} record(s), clean", path, outcome.records.len())?
                }
                LoadStatus::Partial { reason } => writeln!(
                    out,
                    "{}: {} readable record(s), then: {}",
                    path,
                    outcome.records.len(),
                    reason
                )?,
            }
        }
    }

    Ok(())
}

/// Print records as an ID / Name / GPA table
fn print_table(out: &mut impl Write, records: &[Record]) -> io::Result<()> {
    writeln!(out, "{:>8}  {:<24}  {}", "ID", "Name", "GPA")?;
    for record in records {
        writeln!(out, "{}", record)?;
    }
    Ok(())
}
