//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser};

use myplant::DEFAULT_BASE_URL;

use crate::commands::Commands;

/// Command-line client for the MyPlant API.
#[derive(Parser, Debug)]
#[command(name = "myplant")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to connect and where to keep the session.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// API base URL
    #[arg(long, env = "MYPLANT_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Credential file used when the OS keyring is unavailable or disabled
    #[arg(long, env = "MYPLANT_CREDENTIAL_FILE", global = true)]
    pub credential_file: Option<PathBuf>,

    /// Never store the session in the OS keyring
    #[arg(long, env = "MYPLANT_NO_KEYRING", global = true)]
    pub no_keyring: bool,

    /// Request timeout in seconds
    #[arg(long, env = "MYPLANT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}
