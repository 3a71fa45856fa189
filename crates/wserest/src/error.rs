//! CLI error types with miette diagnostics.
//!
//! Maps `wserest_api::Error` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use wserest_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to Streaming Engine at {host}")]
    #[diagnostic(
        code(wserest::connection_failed),
        help(
            "Check that the REST API is enabled and reachable (default port 8087).\n\
             Host: {host}"
        )
    )]
    ConnectionFailed {
        host: String,
        #[source]
        source: wserest_api::Error,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(wserest::auth_failed),
        help(
            "The REST API must use basic or no authentication.\n\
             Check the username, or run: wserest config set-password --name {profile}"
        )
    )]
    AuthFailed { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(wserest::not_found),
        help("List what exists with: wserest {list_command}")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(wserest::api_error))]
    Api(#[from] wserest_api::Error),

    // ── Input / config ───────────────────────────────────────────────
    #[error("invalid {field}: {reason}")]
    #[diagnostic(code(wserest::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(
        code(wserest::config),
        help("Create a profile with: wserest config init --host http://localhost:8087/v2")
    )]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(code(wserest::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Classify an API error for the resource being touched.
    pub fn from_api(err: wserest_api::Error, ctx: &ErrorContext<'_>) -> Self {
        if err.is_auth_failure() {
            return Self::AuthFailed {
                profile: ctx.profile.to_owned(),
            };
        }
        if err.is_connection() {
            return Self::ConnectionFailed {
                host: ctx.host.to_owned(),
                source: err,
            };
        }
        if err.is_not_found() {
            if let Some((resource_type, identifier, list_command)) = ctx.resource {
                return Self::NotFound {
                    resource_type: resource_type.into(),
                    identifier: identifier.into(),
                    list_command: list_command.into(),
                };
            }
        }
        Self::Api(err)
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            Self::Api(_) | Self::Config(_) | Self::Io(_) => exit_code::GENERAL,
        }
    }
}

/// What a command was doing when an API call failed.
#[derive(Debug, Clone, Copy)]
pub struct ErrorContext<'a> {
    pub host: &'a str,
    pub profile: &'a str,
    /// `(resource type, identifier, list command)` for not-found hints.
    pub resource: Option<(&'a str, &'a str, &'a str)>,
}

impl<'a> ErrorContext<'a> {
    pub fn resource(
        self,
        resource_type: &'a str,
        identifier: &'a str,
        list_command: &'a str,
    ) -> Self {
        Self {
            resource: Some((resource_type, identifier, list_command)),
            ..self
        }
    }
}
