//! Hospice CLI - ant colony optimization for hospital beds.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hospice")]
#[command(author, version, about = "Hospice Colony - pheromone-driven bed layout and admission", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new Hospice project
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Optimize the layout of the beds in a JSON file
    Optimize {
        /// Bed file (JSON array)
        input: String,

        /// Where to write the optimized beds (default: <input>.optimized.json)
        #[arg(short, long)]
        output: Option<String>,

        /// Iterations (overrides hospice.toml)
        #[arg(short, long)]
        iterations: Option<usize>,

        /// Ants per iteration (overrides hospice.toml)
        #[arg(short, long)]
        ants: Option<usize>,

        /// RNG seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Pick an available bed without occupying it
    Select {
        #[arg(long)]
        hospital: String,

        #[arg(long)]
        ward: String,

        /// Patient priority
        #[arg(short, long, default_value = "5")]
        priority: u8,

        /// Bed file (JSON array)
        #[arg(short, long)]
        beds: String,
    },

    /// Select a bed, mark it occupied and reinforce the choice
    Admit {
        #[arg(long)]
        hospital: String,

        #[arg(long)]
        ward: String,

        /// Patient priority
        #[arg(short, long, default_value = "5")]
        priority: u8,

        /// Bed file (JSON array); updated in place
        #[arg(short, long)]
        beds: String,
    },

    /// Reward or penalise one bed's admission pheromone
    Reinforce {
        #[arg(long)]
        hospital: String,

        #[arg(long)]
        bed: String,

        /// Record a failed assignment instead of a success
        #[arg(long)]
        failure: bool,
    },

    /// Show pheromone store contents
    Pheromones {
        /// List admission levels for this hospital
        #[arg(long)]
        hospital: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "hospice=debug" } else { "hospice=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Optimize { input, output, iterations, ants, seed } => commands::optimize::run(
            commands::optimize::OptimizeArgs { input, output, iterations, ants, seed },
            cli.verbose,
        ),
        Commands::Select { hospital, ward, priority, beds } => {
            commands::select::run(&hospital, &ward, priority, &beds)
        }
        Commands::Admit { hospital, ward, priority, beds } => {
            commands::admit::run(&hospital, &ward, priority, &beds)
        }
        Commands::Reinforce { hospital, bed, failure } => {
            commands::reinforce::run(&hospital, &bed, failure)
        }
        Commands::Pheromones { hospital } => commands::pheromones::run(hospital),
    }
}
