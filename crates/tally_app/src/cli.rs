//! Command-line surface of the `tally` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tally_core::Order;
use tally_engine::ReportFormat;

use crate::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "tally", version, about = "Count labels and rank them by frequency")]
pub struct Cli {
    /// Config file; defaults to `.tally.ron` in the working directory when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Where log output goes.
    #[arg(long, value_enum, global = true)]
    pub log: Option<LogArg>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Count labels (one per line) and print or write the ranking.
    Count(CountArgs),
    /// Print the count and membership of specific labels.
    Lookup(LookupArgs),
    /// Check a labels file against an expected counts file.
    Verify(VerifyArgs),
}

#[derive(Debug, Args)]
pub struct CountArgs {
    /// Labels file, or `-` for stdin.
    pub input: PathBuf,

    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,

    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Write the report into this directory instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report file name inside `--output`.
    #[arg(long, requires = "output")]
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Labels file, or `-` for stdin.
    pub input: PathBuf,

    #[arg(required = true)]
    pub labels: Vec<String>,
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Labels file, or `-` for stdin.
    pub input: PathBuf,

    /// Counts file of `<count> <label>` lines in most-common order.
    pub expected: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Desc,
    Asc,
}

impl From<OrderArg> for Order {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Desc => Order::Descending,
            OrderArg::Asc => Order::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Plain,
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Plain => ReportFormat::Plain,
            FormatArg::Json => ReportFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogArg {
    Terminal,
    File,
    Both,
}

impl From<LogArg> for LogDestination {
    fn from(arg: LogArg) -> Self {
        match arg {
            LogArg::Terminal => LogDestination::Terminal,
            LogArg::File => LogDestination::File,
            LogArg::Both => LogDestination::Both,
        }
    }
}
