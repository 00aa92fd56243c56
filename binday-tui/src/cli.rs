//! Command-line interface definition.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

/// binday - which bin goes out next
#[derive(Debug, Parser)]
#[command(name = "binday")]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "BINDAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Answer a single intent on stdout instead of opening the UI
    /// (`WhichBinTomorrow`, `NextBin`, `WhenIsBin`, `LaunchRequest`)
    #[arg(long)]
    pub intent: Option<String>,

    /// Bin type for `WhenIsBin`, e.g. "glass"
    #[arg(long, requires = "intent")]
    pub bin_type: Option<String>,

    /// Reference date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,
}
