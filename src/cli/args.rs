//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Build and verify organization charts from flat person/manager records
#[derive(Parser, Debug)]
#[command(name = "orgtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(long, global = true, value_hint = ValueHint::FilePath, env = "ORGTREE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify the builder on an org, in declared order and shuffled
    Check {
        /// Shuffled runs after the ordered one (default from config)
        #[arg(short, long)]
        rounds: Option<u32>,
        /// Seed for reproducible shuffles
        #[arg(short, long)]
        seed: Option<u64>,
        /// Roster file (default: configured roster, else the sample org)
        #[arg(long, value_hint = ValueHint::FilePath)]
        roster: Option<PathBuf>,
        /// Expected canonical form (default: the declared-order build of the roster)
        #[arg(short, long)]
        expected: Option<String>,
    },

    /// Show the org chart as a tree
    Show {
        /// Roster file (default: configured roster, else the sample org)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        roster: Option<PathBuf>,
    },

    /// Print the canonical one-line form of the org chart
    Stringify {
        /// Roster file (default: configured roster, else the sample org)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        roster: Option<PathBuf>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Print config template
    Init,
}
