//! DVR store and clip extraction command handlers.

use std::fmt::Write as _;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tabled::Tabled;
use wserest_api::{ConvertOptions, DvrClipExtraction, WseDvrConverter, WseDvrStore};

use crate::cli::{ConvertArgs, DvrArgs, DvrCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{Session, confirm, report_ack};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct StoreRow {
    #[tabled(rename = "Store")]
    name: String,
    #[tabled(rename = "Location")]
    location: String,
}

impl From<&WseDvrStore> for StoreRow {
    fn from(s: &WseDvrStore) -> Self {
        Self {
            name: s.id.clone(),
            location: s.location.clone(),
        }
    }
}

fn converter_detail(c: &WseDvrConverter) -> String {
    let store = &c.store;
    let status = &store.conversion_status;
    let mut out = String::new();
    let _ = writeln!(out, "Store:       {}", c.id);
    let _ = writeln!(out, "Live:        {}", store.is_live);
    let _ = writeln!(
        out,
        "Media:       audio={} video={}",
        store.audio_available, store.video_available
    );
    let _ = writeln!(out, "Duration:    {} ms", store.duration);
    let _ = writeln!(out, "Output:      {}", store.output_filename);
    let _ = writeln!(out, "Conversion:  {}", status.state());
    let _ = write!(
        out,
        "Progress:    chunk {}/{}",
        status.current_chunk, status.chunk_count
    );
    out
}

// ── Argument parsing ────────────────────────────────────────────────

fn parse_time(field: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>, CliError> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| CliError::Validation {
                    field: field.into(),
                    reason: format!("expected RFC 3339 timestamp: {e}"),
                })
        })
        .transpose()
}

fn convert_options(args: &ConvertArgs) -> Result<ConvertOptions, CliError> {
    Ok(ConvertOptions {
        start: parse_time("start", args.start.as_deref())?,
        end: parse_time("end", args.end.as_deref())?,
        duration: args.duration.map(Duration::from_secs),
        output_filename: args.output_file.clone(),
        debug: args.debug,
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session,
    args: DvrArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let ctx = session.error_context();
    let dvr = DvrClipExtraction::new(session.client.clone(), &args.app, &args.instance);

    match args.command {
        DvrCommand::List => {
            let stores = dvr
                .get_all()
                .await
                .map_err(|e| CliError::from_api(e, &ctx))?;
            let out = output::render_list(
                &global.output,
                &stores.stores,
                |s| StoreRow::from(s),
                |s| s.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DvrCommand::Get { store } => {
            let converter = dvr.get_item(&store).await.map_err(|e| {
                CliError::from_api(e, &ctx.resource("DVR store", &store, "dvr list"))
            })?;
            let out = output::render_single(
                &global.output,
                &converter,
                converter_detail,
                |c| c.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DvrCommand::Create => {
            let resp = dvr
                .create()
                .await
                .map_err(|e| CliError::from_api(e, &ctx))?;
            report_ack(&resp, "DVR store created", global.quiet);
            Ok(())
        }

        DvrCommand::Convert(convert) => {
            let options = convert_options(&convert)?;
            let resp = dvr.convert(&convert.store, &options).await.map_err(|e| {
                CliError::from_api(e, &ctx.resource("DVR store", &convert.store, "dvr list"))
            })?;
            report_ack(&resp, "Conversion started", global.quiet);
            Ok(())
        }

        DvrCommand::Debug { store } => {
            let resp = dvr.debug_conversions(&store).await.map_err(|e| {
                CliError::from_api(e, &ctx.resource("DVR store", &store, "dvr list"))
            })?;
            report_ack(&resp, "Debug conversion started", global.quiet);
            Ok(())
        }

        DvrCommand::ConvertGroup { stores } => {
            let resp = dvr
                .convert_group(stores.as_slice())
                .await
                .map_err(|e| CliError::from_api(e, &ctx))?;
            report_ack(&resp, "Group conversion started", global.quiet);
            Ok(())
        }

        DvrCommand::Expire => {
            let resp = dvr
                .clear_cache()
                .await
                .map_err(|e| CliError::from_api(e, &ctx))?;
            report_ack(&resp, "Conversion cache expired", global.quiet);
            Ok(())
        }

        DvrCommand::Remove { store } => {
            if !confirm(&format!("Delete DVR store '{store}'?"), global.yes)? {
                return Ok(());
            }
            let resp = dvr.remove(&store).await.map_err(|e| {
                CliError::from_api(e, &ctx.resource("DVR store", &store, "dvr list"))
            })?;
            report_ack(&resp, "DVR store deleted", global.quiet);
            Ok(())
        }
    }
}
