//! Assembly planner developer tasks.
//!
//! # Commands
//!
//! - `cargo xtask check` - Run formatting, clippy, tests, docs and the
//!   unwrap scan
//! - `cargo xtask ci` - Run every check, list all failures at the end and
//!   exit non-zero if any failed
//! - `cargo xtask demo` - Plan the six-part car door and print the steps
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=assembly_plan=debug`) to see search logs
//! from `demo`.

mod check;
mod demo;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Assembly planner developer tasks
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Checks and demos for the assembly planner", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all quality checks across the workspace
    Check {
        /// Exit non-zero if any check fails
        #[arg(long)]
        ci: bool,
    },

    /// Run the full CI suite
    Ci,

    /// Plan the car door assembly and print every step
    Demo {
        /// Stop at the first plan mating these categories (e.g. `A,B`)
        #[arg(long, value_delimiter = ',')]
        goal: Vec<String>,

        /// Use the greedy planner instead of breadth-first search
        #[arg(long)]
        greedy: bool,

        /// Expand every level on the calling thread
        #[arg(long)]
        sequential: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { ci } => check::run(ci),
        Commands::Ci => check::run_ci(),
        Commands::Demo {
            goal,
            greedy,
            sequential,
        } => demo::run(&goal, greedy, sequential),
    }
}
