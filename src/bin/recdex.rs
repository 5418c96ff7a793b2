//! recdex Console
//!
//! Opens a record store, builds its hash index, then answers one query per
//! whitespace-separated token on stdin until EOF.

use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use recdex::{Config, Database, Query, QueryKind};
use tracing_subscriber::{fmt, EnvFilter};

/// recdex console
#[derive(Parser, Debug)]
#[command(name = "recdex")]
#[command(about = "Prefix and date lookups over a fixed-record binary store")]
#[command(version)]
struct Args {
    /// Record store file
    store: PathBuf,

    /// Lookup path used for every query
    #[arg(short, long, value_enum, default_value = "prefix")]
    mode: Mode,

    /// Directory for the hash bucket file
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Column carrying the 6-digit index key
    #[arg(short, long, default_value = "39")]
    index_field: usize,

    /// Presorted date column
    #[arg(short, long, default_value = "4")]
    sort_field: usize,

    /// Columns printed per result row
    #[arg(short, long, value_delimiter = ',', default_value = "0,4,14,39")]
    fields: Vec<usize>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    /// Hash index, query by key prefix
    Prefix,
    /// Sorted scan, query by MM/DD/YYYY date
    Date,
}

impl From<Mode> for QueryKind {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Prefix => QueryKind::Prefix,
            Mode::Date => QueryKind::Date,
        }
    }
}

fn main() {
    // Initialize tracing/logging on stderr; stdout carries results only
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,recdex=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("recdex v{}", recdex::VERSION);
    tracing::info!("Store: {}", args.store.display());

    let config = Config::builder()
        .store_path(&args.store)
        .data_dir(&args.data_dir)
        .index_field(args.index_field)
        .sort_field(args.sort_field)
        .print_fields(args.fields)
        .build();

    let db = match Database::open(config) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&db, args.mode.into()) {
        tracing::error!("Query session aborted: {}", e);
        std::process::exit(1);
    }
}

/// Answer queries from stdin until EOF
fn run(db: &Database, kind: QueryKind) -> recdex::Result<()> {
    let stdin = io::stdin();
    let mut out = BufWriter::new(io::stdout().lock());

    for line in stdin.lock().lines() {
        let line = line?;
        for token in line.split_whitespace() {
            match answer(db, kind, token, &mut out) {
                Ok(()) => {}
                Err(e) if e.is_recoverable() => eprintln!("{}", e),
                Err(e) => return Err(e),
            }
        }
        out.flush()?;
    }

    Ok(())
}

/// Print matching rows followed by their count
fn answer(db: &Database, kind: QueryKind, token: &str, out: &mut impl Write) -> recdex::Result<()> {
    let query = Query::parse(kind, token, db.date_key())?;
    let rows = db.execute(&query)?;

    for row in &rows {
        writeln!(out, "{}", row.project(&db.config().print_fields))?;
    }
    writeln!(out, "{}", rows.len())?;
    Ok(())
}
