//! Command-line arguments of the `vrprog` binary.
use std::{path::PathBuf, str::FromStr};

use clap::{Parser as ClapParser, Subcommand};
use vrprog::render::LinearizeMode;

#[derive(Debug, ClapParser)]
#[command(version, about = "Convert and linearize CLEVR question programs")]
pub struct Arguments {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print one program string per question
    Linearize {
        /// Linearization: chain, prefix or postfix
        #[arg(long, value_parser = LinearizeMode::from_str, default_value = "prefix")]
        mode: LinearizeMode,
        /// Question JSON files
        #[arg(short, long = "input", required = true)]
        inputs: Vec<PathBuf>,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Build the arity table of every function used by the programs
    Arity {
        /// Question JSON files
        #[arg(short, long = "input", required = true)]
        inputs: Vec<PathBuf>,
        /// TOML arity policy (CLEVR defaults if omitted)
        #[arg(long)]
        policy: Option<PathBuf>,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decode a prefix or postfix program string into list form
    Decode {
        /// Linearization of the program string: prefix or postfix
        #[arg(long, value_parser = LinearizeMode::from_str, default_value = "prefix")]
        mode: LinearizeMode,
        /// Arity table written by the `arity` command
        #[arg(long)]
        arity: PathBuf,
        /// Space-separated program string
        program: String,
    },
}
