//! Donation Analytics CLI
//!
//! Finds contributions from repeat donors in an FEC individual-contributions
//! file and writes running per-recipient statistics.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- input/percentile.txt input/itcont.txt output/repeat_donors.txt
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `info` to control logging verbosity

use donation_analytics::{DonationAnalytics, EngineError, Percentile, Result};
use log::info;
use std::env;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        return Err(EngineError::MissingArgument);
    }
    let (percentile_path, input_path, output_path) = (&args[1], &args[2], &args[3]);

    let percentile = Percentile::load(percentile_path)?;
    info!("Computing percentile {}", percentile);

    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let mut engine = DonationAnalytics::new(percentile);
    engine.process_reader(reader)?;
    info!("{}", engine.stats());

    // Created only once the whole input has been processed
    let output = File::create(output_path)?;
    engine.write_output(BufWriter::new(output))?;

    Ok(())
}
