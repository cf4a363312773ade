//! Seeding and maintenance utility for the CIU stats database. Clears the
//! table or appends synthetic rows so the interactive app can be exercised
//! against known data.
use anyhow::Result;
use clap::Parser;

use ciu_stats::db::{clear_records, seed_records};
use ciu_stats::ensure_schema;

#[derive(Parser, Debug)]
#[command(name = "ciu-seed")]
#[command(about = "Seeding and maintenance utility for the CIU stats database")]
#[command(version)]
struct Cli {
    /// Delete every row from the stats table
    #[arg(long)]
    clear: bool,

    /// Append N synthetic test rows, continuing CRN numbering from the
    /// current maximum
    #[arg(long, value_name = "N", num_args = 0..=1, default_missing_value = "5")]
    add: Option<u32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let conn = ensure_schema()?;

    if cli.clear {
        let removed = clear_records(&conn)?;
        println!("Cleared {removed} rows.");
    }

    if let Some(rows) = cli.add {
        let added = seed_records(&conn, rows)?;
        match (added.first(), added.last()) {
            (Some(first), Some(last)) => {
                println!("Added {} rows (CRN {first} through {last}).", added.len());
            }
            _ => println!("Added 0 rows."),
        }
    }

    if !cli.clear && cli.add.is_none() {
        println!("Nothing to do. Pass --clear and/or --add [N].");
    }

    Ok(())
}
