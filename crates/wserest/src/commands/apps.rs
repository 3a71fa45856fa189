//! Application command handlers.

use serde::Deserialize;
use tabled::Tabled;
use wserest_api::{
    AdvancedSettingItem, AdvancedSettings, AppConfig, Application, DvrConfig, ModuleItem, Modules,
    SecurityConfig, StreamConfig, TranscoderConfig, WseApp,
};

use crate::cli::{AppSpec, AppsArgs, AppsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{Session, confirm, read_json_file, report_ack};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AppRow {
    #[tabled(rename = "Name")]
    id: String,
    #[tabled(rename = "Type")]
    app_type: String,
    #[tabled(rename = "DVR")]
    dvr: &'static str,
    #[tabled(rename = "Transcoder")]
    transcoder: &'static str,
    #[tabled(rename = "DRM")]
    drm: &'static str,
    #[tabled(rename = "Targets")]
    targets: &'static str,
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "-" }
}

impl From<&WseApp> for AppRow {
    fn from(a: &WseApp) -> Self {
        Self {
            id: a.id.clone(),
            app_type: a.app_type.clone(),
            dvr: yes_no(a.dvr_enabled),
            transcoder: yes_no(a.transcoder_enabled),
            drm: yes_no(a.drm_enabled),
            targets: yes_no(a.stream_targets_enabled),
        }
    }
}

/// Shape of a `--from-file` document for `apps set-advanced`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdvancedFile {
    #[serde(default)]
    advanced_settings: Vec<AdvancedSettingItem>,
    #[serde(default)]
    modules: Vec<ModuleItem>,
}

// ── Flags → request pieces ───────────────────────────────────────────

fn application(session: &Session, spec: &AppSpec) -> Application {
    Application::new(
        session.client.clone(),
        &spec.name,
        &spec.app_type,
        &spec.read_access,
        &spec.write_access,
        &spec.description,
    )
}

fn app_config(spec: &AppSpec) -> AppConfig {
    let mut config = AppConfig::new();
    if let Some(ref stream_type) = spec.stream_type {
        config = config.stream(StreamConfig {
            stream_type: Some(stream_type.clone()),
            ..StreamConfig::default()
        });
    }
    if spec.publish_password {
        config = config.security(SecurityConfig {
            publish_require_password: Some(true),
            ..SecurityConfig::default()
        });
    }
    if let Some(window) = spec.dvr_window {
        config = config.dvr(DvrConfig {
            window_duration: Some(window),
            ..DvrConfig::default()
        });
    }
    if let Some(ref templates) = spec.transcoder_templates {
        config = config.transcoder(TranscoderConfig {
            live_stream_transcoder: Some("transcoder".into()),
            templates: Some(templates.clone()),
            ..TranscoderConfig::default()
        });
    }
    config
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session,
    args: AppsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let ctx = session.error_context();

    match args.command {
        AppsCommand::List => {
            let apps = Application::named(session.client.clone(), "")
                .get_all()
                .await
                .map_err(|e| CliError::from_api(e, &ctx))?;
            let out = output::render_list(
                &global.output,
                &apps.applications,
                |a| AppRow::from(a),
                |a| a.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AppsCommand::Get { name, advanced } => {
            let app = Application::named(session.client.clone(), &name);
            let result = if advanced {
                app.get_advanced().await
            } else {
                app.get().await
            };
            let resp = result.map_err(|e| {
                CliError::from_api(e, &ctx.resource("application", &name, "apps list"))
            })?;
            let out = output::render_single(
                &global.output,
                &resp,
                |r| output::render_json_pretty(r),
                |_| app.name().to_owned(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AppsCommand::Create(spec) => {
            let app = application(session, &spec);
            let resp = app
                .create(&app_config(&spec))
                .await
                .map_err(|e| CliError::from_api(e, &ctx))?;
            report_ack(&resp, "Application created", global.quiet);
            Ok(())
        }

        AppsCommand::Update(spec) => {
            let app = application(session, &spec);
            let resp = app
                .update(&app_config(&spec))
                .await
                .map_err(|e| {
                    CliError::from_api(e, &ctx.resource("application", app.name(), "apps list"))
                })?;
            report_ack(&resp, "Application updated", global.quiet);
            Ok(())
        }

        AppsCommand::SetAdvanced { name, from_file } => {
            let doc: AdvancedFile = read_json_file(&from_file)?;
            let app = Application::named(session.client.clone(), &name);
            let resp = app
                .update_advanced(
                    &AdvancedSettings::new(doc.advanced_settings),
                    &Modules::new(doc.modules),
                )
                .await
                .map_err(|e| {
                    CliError::from_api(e, &ctx.resource("application", &name, "apps list"))
                })?;
            report_ack(&resp, "Advanced configuration saved", global.quiet);
            Ok(())
        }

        AppsCommand::Remove { name } => {
            if !confirm(
                &format!("Delete application '{name}'? This is destructive."),
                global.yes,
            )? {
                return Ok(());
            }
            let resp = Application::named(session.client.clone(), &name)
                .remove()
                .await
                .map_err(|e| {
                    CliError::from_api(e, &ctx.resource("application", &name, "apps list"))
                })?;
            report_ack(&resp, "Application deleted", global.quiet);
            Ok(())
        }
    }
}
