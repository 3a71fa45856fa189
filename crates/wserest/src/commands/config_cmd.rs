//! Config command handlers (no server connection needed).

use wserest_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(
                &wserest_config::config_path().display().to_string(),
                global.quiet,
            );
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = wserest_config::load_config()?;
            let redacted = redact(cfg);
            let out = output::render_single(
                &global.output,
                &redacted,
                |c| toml::to_string_pretty(c).unwrap_or_default(),
                |c| c.active_profile_name(None),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Init {
            name,
            host,
            server,
            vhost,
            username,
            set_default,
        } => {
            let mut cfg = wserest_config::load_config()?;
            let profile = Profile {
                host,
                server_instance: server.unwrap_or_else(|| Profile::default().server_instance),
                vhost_instance: vhost.unwrap_or_else(|| Profile::default().vhost_instance),
                username,
                ..Profile::default()
            };
            cfg.profiles.insert(name.clone(), profile);
            if set_default || cfg.profiles.len() == 1 {
                cfg.default_profile = Some(name.clone());
            }
            wserest_config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!(
                    "Profile '{name}' saved to {}",
                    wserest_config::config_path().display()
                );
            }
            Ok(())
        }

        ConfigCommand::SetPassword { name } => {
            let password = dialoguer::Password::new()
                .with_prompt(format!("Password for profile '{name}'"))
                .interact()
                .map_err(prompt_err)?;
            wserest_config::store_password(&name, &password)?;
            if !global.quiet {
                eprintln!("Password stored in system keyring");
            }
            Ok(())
        }
    }
}

/// Mask plaintext passwords before printing.
fn redact(mut cfg: Config) -> Config {
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some("********".into());
        }
    }
    cfg
}
