//! Command handlers
//!
//! Each invocation is one request: it opens the store, performs the action
//! and exits. Commands that act for a user log in first and pass the
//! resulting `Session` along.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use dialoguer::Password;
use scorecard_app::adapters::SqliteStore;
use scorecard_app::{AppState, AppStateBuilder};
use scorecard_core::error::CoreError;
use scorecard_core::types::{ChartSet, Scores, Session};

use crate::cli::{ChartsArgs, Cli, Command, Credentials, ImportArgs, SubmitArgs};
use crate::config;
use crate::render;

/// Open the configured store and run the command.
pub async fn dispatch(cli: Cli) -> Result<()> {
    let db_path = config::resolve_db_path(cli.db)?;
    let state = open_state(&db_path).await?;

    match cli.command {
        Command::Signup(creds) => signup(&state, creds).await,
        Command::Login(creds) => login(&state, creds).await,
        Command::Submit(args) => submit(&state, args).await,
        Command::Charts(args) => charts(&state, args).await,
        Command::ImportLegacy(args) => import_legacy(&state, &args).await,
    }
}

async fn open_state(db_path: &Path) -> Result<AppState> {
    tracing::debug!("Opening database at {}", db_path.display());
    let store = SqliteStore::new(db_path)
        .await
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    let state = AppStateBuilder::new()
        .sqlite_store(Arc::new(store))
        .build()?;
    state.log_summary().await;
    Ok(state)
}

async fn signup(state: &AppState, creds: Credentials) -> Result<()> {
    if state.auth_service.is_registered(&creds.email).await? {
        return Err(CoreError::AlreadyRegistered(creds.email).into());
    }
    let password = match creds.password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .context("Failed to read password")?,
    };

    state.auth_service.register(&creds.email, &password).await?;
    println!("Successfully signed up! Please log in.");
    Ok(())
}

async fn login(state: &AppState, creds: Credentials) -> Result<()> {
    let session = open_session(state, creds).await?;
    println!("Welcome, {}!", session.display_name());

    if state.submission_service.has_submitted(session.email()).await? {
        println!("You have already submitted your marks.\n");
        print_charts(state, &session, false).await?;
    } else {
        println!("You have not submitted your marks yet. Use `scorecard submit`.");
    }
    state.auth_service.logout(session);
    Ok(())
}

async fn submit(state: &AppState, args: SubmitArgs) -> Result<()> {
    let session = open_session(state, args.credentials).await?;

    if state.submission_service.has_submitted(session.email()).await? {
        print_charts(state, &session, false).await?;
        let email = session.email().to_string();
        state.auth_service.logout(session);
        return Err(CoreError::AlreadySubmitted(email).into());
    }

    let scores = Scores::new(args.aai, args.foml, args.imad, args.vcc)?;
    state
        .submission_service
        .submit(&session, args.name, scores)
        .await?;
    println!("Marks submitted successfully!\n");

    print_charts(state, &session, false).await?;
    state.auth_service.logout(session);
    Ok(())
}

async fn charts(state: &AppState, args: ChartsArgs) -> Result<()> {
    let session = open_session(state, args.credentials).await?;
    print_charts(state, &session, args.json).await?;
    state.auth_service.logout(session);
    Ok(())
}

async fn import_legacy(state: &AppState, args: &ImportArgs) -> Result<()> {
    let users = std::fs::read_to_string(&args.users)
        .with_context(|| format!("Failed to read {}", args.users.display()))?;
    let marks = args
        .marks
        .as_ref()
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))
        })
        .transpose()?;

    let report = state.import_service.import(&users, marks.as_deref()).await?;

    println!(
        "Users: {} imported, {} already registered",
        report.users_imported, report.users_skipped
    );
    println!(
        "Marks: {} imported, {} already submitted",
        report.submissions_imported, report.submissions_skipped
    );
    for failure in &report.failures {
        println!("  skipped {:?} {}: {}", failure.source, failure.key, failure.reason);
    }
    Ok(())
}

async fn open_session(state: &AppState, creds: Credentials) -> Result<Session> {
    let password = match creds.password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .context("Failed to read password")?,
    };
    Ok(state.auth_service.login(&creds.email, &password).await?)
}

async fn print_charts(state: &AppState, session: &Session, json: bool) -> Result<()> {
    let Some(record) = state.submission_service.latest_for(session.email()).await? else {
        println!("No marks found for this user.");
        return Ok(());
    };
    let charts = ChartSet::from_record(&record);

    if json {
        println!("{}", serde_json::to_string_pretty(&charts)?);
    } else {
        println!("{}", render::render_charts(&charts));
    }
    Ok(())
}
