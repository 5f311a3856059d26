//! Command-line interface definition.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::output::OutputMode;

/// Browse and filter game-jam results.
#[derive(Debug, Parser)]
#[command(name = "jamdex", version, about)]
pub struct Cli {
    /// Config file (default: ./jamdex.yaml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputMode>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the filterable properties for a dataset
    Schema(DataArgs),
    /// Filter a dataset and print one page of results
    List(ListArgs),
    /// Print the shareable query string for a filter state
    Link(StateArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct DataArgs {
    /// Dataset file (JSON array of games)
    #[arg(long, env = "JAMDEX_DATA", value_name = "PATH")]
    pub data: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct StateArgs {
    /// Filter token (JSON array of selections)
    #[arg(long, value_name = "TOKEN")]
    pub filters: Option<String>,

    /// Query string to start from, e.g. "filters=...&page=2"
    #[arg(long, value_name = "QUERY")]
    pub location: Option<String>,

    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<usize>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub state: StateArgs,

    /// Results per page
    #[arg(long, value_name = "N")]
    pub per_page: Option<NonZeroUsize>,
}
