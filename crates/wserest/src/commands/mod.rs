//! Command dispatch and the per-invocation API session.

pub mod apps;
pub mod config_cmd;
pub mod dvr;

use std::sync::Arc;

use wserest_api::{Settings, WseClient};

use crate::cli::{Command, GlobalOpts};
use crate::error::{CliError, ErrorContext};

/// Everything an API-backed command needs: the shared client plus enough
/// context to explain failures.
pub struct Session {
    pub client: Arc<WseClient>,
    pub profile: String,
    host: String,
}

impl Session {
    pub fn new(settings: Settings, profile: String) -> Result<Self, CliError> {
        let host = settings.host().to_owned();
        let client = Arc::new(WseClient::new(settings)?);
        Ok(Self {
            client,
            profile,
            host,
        })
    }

    pub fn error_context(&self) -> ErrorContext<'_> {
        ErrorContext {
            host: &self.host,
            profile: &self.profile,
            resource: None,
        }
    }
}

/// Route an API-backed command to its handler.
pub async fn dispatch(
    cmd: Command,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Apps(args) => apps::handle(session, args, global).await,
        Command::Dvr(args) => dvr::handle(session, args, global).await,
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file<T: serde::de::DeserializeOwned>(
    path: &std::path::Path,
) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Print a server acknowledgement (`message` field) unless quiet.
pub fn report_ack(resp: &wserest_api::JsonMap, fallback: &str, quiet: bool) {
    if quiet {
        return;
    }
    let message = resp
        .get("message")
        .and_then(serde_json::Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(fallback);
    eprintln!("{message}");
}
