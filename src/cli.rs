use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the ant world tools
#[derive(Parser, Debug)]
#[command(name = "antworld", about = "🐜 Ant colony battle simulator")]
pub struct Args {
    /// Show debug logs
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game between two brains
    Run {
        /// Brain file for the red colony
        #[arg(long)]
        red: PathBuf,

        /// Brain file for the black colony
        #[arg(long)]
        black: PathBuf,

        /// World file
        #[arg(short, long)]
        world: PathBuf,

        /// Number of rounds to play
        #[arg(short, long, default_value_t = 100_000)]
        rounds: u32,

        /// Random seed for `flip`
        #[arg(long)]
        seed: Option<u64>,

        /// Enforce contest rules on the world
        #[arg(long, default_value_t = false)]
        contest: bool,

        /// Only print the final score line
        #[arg(short, long, default_value_t = false)]
        quiet: bool,
    },

    /// Generate a contest world
    Generate {
        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Compile a brain and report its size
    CheckBrain {
        /// Brain file
        file: PathBuf,
    },

    /// Parse and validate a world
    CheckWorld {
        /// World file
        file: PathBuf,

        /// Enforce contest rules
        #[arg(long, default_value_t = false)]
        contest: bool,
    },
}
