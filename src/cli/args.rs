//! CLI argument definitions

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use crate::inventory::TestMode;

/// Parsed command line
#[derive(Parser)]
#[command(name = "teprosif")]
#[command(about = "Phonological process analysis for Spanish word-imitation tests")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Norm table JSON file replacing the built-in norms
    #[arg(short = 'n', long, global = true)]
    pub norms: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the phonemic form of words
    Normalize {
        /// Words in ordinary spelling
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Split words into syllables
    Syllabify {
        /// Words in ordinary spelling or phonemic form
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Analyse a production of an inventory item
    Analyze {
        /// Item number (1-37)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=37))]
        item: u8,

        /// The child's production
        produced: String,
    },

    /// Analyse an arbitrary target/production pair
    Compare {
        /// Target word
        target: String,

        /// The child's production
        produced: String,
    },

    /// Diagnose session totals against the norms
    Diagnose {
        /// Age in years
        #[arg(short, long, required_unless_present = "birth")]
        age: Option<u32>,

        /// Birth date (YYYY-MM-DD), instead of --age
        #[arg(long, requires = "evaluated", conflicts_with = "age")]
        birth: Option<NaiveDate>,

        /// Evaluation date (YYYY-MM-DD)
        #[arg(long)]
        evaluated: Option<NaiveDate>,

        /// Test mode
        #[arg(short, long, default_value = "full")]
        mode: ModeArg,

        /// Structure (E) total
        #[arg(short = 'e', long, default_value = "0")]
        structure: u32,

        /// Assimilation (A) total
        #[arg(short = 'A', long, default_value = "0")]
        assimilation: u32,

        /// Substitution (S) total
        #[arg(short = 's', long, default_value = "0")]
        substitution: u32,
    },

    /// List the inventory items
    Items {
        /// Only the items of this mode
        #[arg(short, long)]
        mode: Option<ModeArg>,
    },

    /// Print the active norm table
    Norms,
}

/// Test mode as a CLI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// 15-item screening ("Barrido")
    #[value(alias = "barrido")]
    Short,
    /// Complete 37-item test ("Completo")
    #[value(alias = "completo")]
    Full,
}

impl From<ModeArg> for TestMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Short => TestMode::Short,
            ModeArg::Full => TestMode::Full,
        }
    }
}

impl std::fmt::Display for ModeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        TestMode::from(*self).fmt(f)
    }
}
