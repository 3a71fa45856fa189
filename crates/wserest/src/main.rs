mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use wserest_api::{AuthMethod, Settings};
use wserest_config::Profile;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::commands::Session;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a server connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "wserest", &mut std::io::stdout());
            Ok(())
        }

        // All other commands talk to the REST API
        cmd => {
            let (settings, profile) = build_settings(&cli.global)?;
            let session = Session::new(settings, profile)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &session, &cli.global).await
        }
    }
}

/// Build API `Settings` from the config file, active profile, and CLI overrides.
fn build_settings(global: &GlobalOpts) -> Result<(Settings, String), CliError> {
    let cfg = wserest_config::load_config()?;
    let profile_name = cfg.active_profile_name(global.profile.as_deref());

    // Start from the stored profile (or defaults) and layer flags on top.
    let mut profile = cfg
        .profiles
        .get(&profile_name)
        .cloned()
        .unwrap_or_else(Profile::default);

    if let Some(ref host) = global.host {
        profile.host.clone_from(host);
    }
    if let Some(ref server) = global.server {
        profile.server_instance.clone_from(server);
    }
    if let Some(ref vhost) = global.vhost {
        profile.vhost_instance.clone_from(vhost);
    }
    if global.username.is_some() {
        profile.username.clone_from(&global.username);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }

    // An explicit --password wins over env/keyring/plaintext lookup.
    let settings = match (&profile.username, &global.password) {
        (Some(username), Some(password)) => {
            let auth = AuthMethod::Basic {
                username: username.clone(),
                password: SecretString::from(password.clone()),
            };
            let no_lookup = Profile {
                username: None,
                ..profile.clone()
            };
            wserest_config::profile_to_settings(&no_lookup, &profile_name, &cfg.defaults)?
                .with_auth(auth)
        }
        (None, Some(_)) => {
            return Err(CliError::Validation {
                field: "password".into(),
                reason: "a password was given without a username (set --username)".into(),
            });
        }
        (_, None) => wserest_config::profile_to_settings(&profile, &profile_name, &cfg.defaults)?,
    };

    Ok((settings, profile_name))
}
