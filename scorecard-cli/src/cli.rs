//! Command line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Sign up, log in, submit your marks once and view them as charts.
#[derive(Debug, Parser)]
#[command(name = "scorecard", version, about)]
pub struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "SCORECARD_DB")]
    pub db: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a new account
    Signup(Credentials),
    /// Log in and show your marks if already submitted
    Login(Credentials),
    /// Log in and submit your marks (only once)
    Submit(SubmitArgs),
    /// Log in and show charts of your submitted marks
    Charts(ChartsArgs),
    /// Import users.json / marks.csv written by the old form application
    ImportLegacy(ImportArgs),
}

#[derive(Debug, Args)]
pub struct Credentials {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Password (prompted without echo when omitted)
    #[arg(long, env = "SCORECARD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub credentials: Credentials,

    /// Display name stored with the marks (defaults to the email)
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub aai: u8,

    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub foml: u8,

    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub imad: u8,

    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub vcc: u8,
}

#[derive(Debug, Args)]
pub struct ChartsArgs {
    #[command(flatten)]
    pub credentials: Credentials,

    /// Print chart data as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to users.json
    #[arg(long)]
    pub users: PathBuf,

    /// Path to marks.csv
    #[arg(long)]
    pub marks: Option<PathBuf>,
}
