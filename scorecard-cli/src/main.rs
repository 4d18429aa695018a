//! Scorecard command line entry point
//!
//! The presentation layer over `scorecard-app`: collects input, calls the
//! auth and submission services, and prints the submitted marks as charts.

mod cli;
mod commands;
mod config;
mod render;

use std::process::ExitCode;

use clap::Parser;
use scorecard_core::error::CoreError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Cli;

/// User-facing failure: bad input, wrong password, duplicate signup or submission.
const EXIT_USER_ERROR: u8 = 1;
/// Storage, configuration or I/O failure.
const EXIT_SYSTEM_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match commands::dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<CoreError>() {
            Some(core) if core.is_expected() => {
                tracing::warn!("{core}");
                eprintln!("{}", user_message(core));
                ExitCode::from(EXIT_USER_ERROR)
            }
            _ => {
                tracing::error!("{e:#}");
                eprintln!("error: {e:#}");
                ExitCode::from(EXIT_SYSTEM_ERROR)
            }
        },
    }
}

/// Logs go to stderr so command output stays clean.
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(verbose),
        )
        .with(EnvFilter::from_default_env().add_directive(default_level.into()))
        .init();
}

fn user_message(err: &CoreError) -> String {
    match err {
        CoreError::AlreadyRegistered(_) => "This email is already registered. Please log in.".into(),
        CoreError::AlreadySubmitted(_) => "You have already submitted your marks.".into(),
        CoreError::InvalidCredentials(_) => "Invalid email or password".into(),
        CoreError::NotFound(_) => "No marks found for this user.".into(),
        other => other.to_string(),
    }
}
