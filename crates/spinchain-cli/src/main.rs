//! Spinchain Command-Line Interface
//!
//! Builds brick-wall Trotter circuits for the XYZ Heisenberg chain and writes
//! them as a text drawing, JSON or `OpenQASM` 3.
//!
//! ```text
//! spinchain build -n 4 --coupling 1,1,1 --time 2 --steps 8 --format qasm
//! spinchain build --config chain.yaml --output chain.json --format json
//! spinchain schedule -n 5 --steps 2
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::{OutputFormat, SpecArgs};
use commands::{build, schedule, version};

/// Spinchain - Trotter circuits for XYZ Heisenberg spin chains
#[derive(Parser)]
#[command(name = "spinchain")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an evolution circuit
    Build {
        #[command(flatten)]
        spec: SpecArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Lower uxz/uxyz blocks to RXX/RYY/RZZ rotations
        #[arg(long)]
        decompose: bool,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the brick-wall layer plan
    Schedule {
        #[command(flatten)]
        spec: SpecArgs,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Build {
            spec,
            format,
            decompose,
            output,
        } => build::execute(&spec, format, decompose, output.as_deref()),

        Commands::Schedule { spec, json } => schedule::execute(&spec, json),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
