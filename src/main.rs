//! Trolley
//!
//! Runs a file of cart commands against a single cart and writes one JSON outcome per line.
//!
//! Use `--limits` to load cart limits from a YAML file
//! Use `--print-cart` to print the final cart as a table

use std::{io, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::info;

use trolley::{
    batch,
    cart::Cart,
    config::CartLimits,
    logging::{self, LogFormat},
};

/// Run a batch of cart commands
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON file holding an array of command records
    input: PathBuf,

    /// File the outcomes are written to
    output: PathBuf,

    /// YAML file overriding the default cart limits
    #[arg(long)]
    limits: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Print the final cart as a table
    #[arg(long)]
    print_cart: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init(&args.log_level, args.log_format)?;

    let limits = match args.limits.as_deref() {
        Some(path) => CartLimits::load(path)?,
        None => CartLimits::default(),
    };

    let mut cart = Cart::with_limits(limits);
    let records = batch::run(&mut cart, &args.input, &args.output)?;

    info!(records, input = %args.input.display(), "batch complete");

    if args.print_cart {
        let stdout = io::stdout();
        let mut handle = stdout.lock();

        cart.preview().write_to(&mut handle)?;
    }

    Ok(())
}
