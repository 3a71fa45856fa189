// DVR clip extraction endpoints
//
// `{vhost}/applications/{app}/instances/{instance}/dvrstores`: list stores,
// inspect one, and trigger conversions of a store (or a time window of it)
// into a file.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::client::{JsonMap, Request, Verb, WseClient};
use crate::entity::{EntityContext, PropertyBag};
use crate::error::Error;
use crate::models::{WseDvrConverter, WseDvrStores};
use crate::query::{QueryString, encode, encode_segment};

const START_TIME: &str = "dvrConverterStartTime";
const END_TIME: &str = "dvrConverterEndTime";
const DURATION: &str = "dvrConverterDuration";
const OUTPUT_FILENAME: &str = "dvrConverterOutputFilename";
const DEBUG_CONVERSIONS: &str = "dvrConverterDebugConversions";
const STORE_LIST: &str = "dvrConverterStoreList";

/// Parameters for a single-store conversion.
///
/// Every field is optional; unset (or zero/empty) fields are left out of the
/// query so the server falls back to converting the whole store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub duration: Option<Duration>,
    pub output_filename: Option<String>,
    pub debug: bool,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert between two wall-clock instants.
    pub fn range(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    /// Convert `duration` worth of media starting at `start`.
    pub fn from_start(start: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            start: Some(start),
            duration: Some(duration),
            ..Self::default()
        }
    }

    /// Convert the `duration` of media that ends at `end`.
    pub fn until_end(end: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            end: Some(end),
            duration: Some(duration),
            ..Self::default()
        }
    }

    pub fn output_filename(mut self, name: impl Into<String>) -> Self {
        self.output_filename = Some(name.into());
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Render the query: start, end, duration (ms), filename, debug flag last.
    pub fn to_query(&self) -> QueryString {
        let mut query = QueryString::new();
        query
            .push_timestamp(START_TIME, self.start)
            .push_timestamp(END_TIME, self.end)
            .push_millis(DURATION, self.duration)
            .push_str(OUTPUT_FILENAME, self.output_filename.as_deref())
            .push_flag(DEBUG_CONVERSIONS, self.debug);
        query
    }
}

/// DVR stores of one application instance.
#[derive(Debug, Clone)]
pub struct DvrClipExtraction {
    ctx: EntityContext,
}

impl DvrClipExtraction {
    /// Blank `app_name` means `live`; blank `app_instance` means `_definst_`.
    pub fn new(client: Arc<WseClient>, app_name: &str, app_instance: &str) -> Self {
        let app_name = non_blank(app_name, "live");
        let app_instance = non_blank(app_instance, "_definst_");
        let base_uri = format!(
            "{}/applications/{app_name}/instances/{app_instance}/dvrstores",
            client.settings().vhost_uri()
        );
        Self {
            ctx: EntityContext::new(client, base_uri, PropertyBag::new()),
        }
    }

    pub fn base_uri(&self) -> &str {
        self.ctx.base_uri()
    }

    fn store_uri(&self, name: &str) -> String {
        self.ctx.uri(&format!("/{}", encode_segment(name)))
    }

    // ── Request builders ─────────────────────────────────────────────

    pub fn create_request(&self) -> Result<Request, Error> {
        self.ctx.request(Verb::Post, self.ctx.uri(""), &[], &[])
    }

    pub fn get_all_request(&self) -> Result<Request, Error> {
        self.ctx.request(Verb::Get, self.ctx.uri(""), &[], &[])
    }

    pub fn get_item_request(&self, name: &str) -> Result<Request, Error> {
        self.ctx.request(Verb::Get, self.store_uri(name), &[], &[])
    }

    pub fn convert_request(&self, name: &str, options: &ConvertOptions) -> Result<Request, Error> {
        let uri = format!("{}/actions/convert{}", self.store_uri(name), options.to_query());
        self.ctx.request(Verb::Put, uri, &[], &[])
    }

    pub fn convert_group_request<S: AsRef<str>>(&self, names: &[S]) -> Result<Request, Error> {
        let list = names
            .iter()
            .map(|n| encode(n.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        let mut query = QueryString::new();
        if !list.is_empty() {
            query.push_raw(STORE_LIST, list);
        }
        let uri = self.ctx.uri(&format!("/actions/convert{query}"));
        self.ctx.request(Verb::Put, uri, &[], &[])
    }

    pub fn clear_cache_request(&self) -> Result<Request, Error> {
        self.ctx.request(Verb::Put, self.ctx.uri("/actions/expire"), &[], &[])
    }

    pub fn remove_request(&self, name: &str) -> Result<Request, Error> {
        self.ctx.request(Verb::Delete, self.store_uri(name), &[], &[])
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Create a DVR store on this instance.
    ///
    /// `POST {base}`
    pub async fn create(&self) -> Result<JsonMap, Error> {
        debug!(uri = self.base_uri(), "creating DVR store");
        self.ctx.send_raw(self.create_request()?).await
    }

    /// List DVR stores, loosely typed.
    ///
    /// `GET {base}`
    pub async fn get_all_raw(&self) -> Result<JsonMap, Error> {
        debug!("listing DVR stores");
        self.ctx.send_raw(self.get_all_request()?).await
    }

    /// List DVR stores.
    ///
    /// `GET {base}`
    pub async fn get_all(&self) -> Result<WseDvrStores, Error> {
        debug!("listing DVR stores");
        self.ctx.send(self.get_all_request()?).await
    }

    /// Store/converter details, loosely typed.
    ///
    /// `GET {base}/{name}`
    pub async fn get_item_raw(&self, name: &str) -> Result<JsonMap, Error> {
        debug!(store = name, "fetching DVR store");
        self.ctx.send_raw(self.get_item_request(name)?).await
    }

    /// Store/converter details including conversion progress.
    ///
    /// `GET {base}/{name}`
    pub async fn get_item(&self, name: &str) -> Result<WseDvrConverter, Error> {
        debug!(store = name, "fetching DVR store");
        self.ctx.send(self.get_item_request(name)?).await
    }

    /// Convert a store (or a window of it) to a file.
    ///
    /// `PUT {base}/{name}/actions/convert?dvrConverterStartTime=..&...`
    pub async fn convert(&self, name: &str, options: &ConvertOptions) -> Result<JsonMap, Error> {
        debug!(store = name, ?options, "converting DVR store");
        self.ctx.send_raw(self.convert_request(name, options)?).await
    }

    /// Convert several whole stores in one call.
    ///
    /// `PUT {base}/actions/convert?dvrConverterStoreList=a,b,c`
    pub async fn convert_group<S: AsRef<str> + Sync>(&self, names: &[S]) -> Result<JsonMap, Error> {
        debug!(count = names.len(), "converting DVR store group");
        self.ctx.send_raw(self.convert_group_request(names)?).await
    }

    /// Convert a whole store with debug logging enabled on the server.
    ///
    /// `PUT {base}/{name}/actions/convert?dvrConverterDebugConversions=true`
    pub async fn debug_conversions(&self, name: &str) -> Result<JsonMap, Error> {
        self.convert(name, &ConvertOptions::new().debug(true)).await
    }

    /// Expire cached conversion results.
    ///
    /// `PUT {base}/actions/expire`
    pub async fn clear_cache(&self) -> Result<JsonMap, Error> {
        debug!("expiring DVR converter cache");
        self.ctx.send_raw(self.clear_cache_request()?).await
    }

    /// Delete a DVR store.
    ///
    /// `DELETE {base}/{name}`
    pub async fn remove(&self, name: &str) -> Result<JsonMap, Error> {
        debug!(store = name, "removing DVR store");
        self.ctx.send_raw(self.remove_request(name)?).await
    }
}

fn non_blank<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    const STORES: &str = "http://wse:8087/v2/servers/_defaultServer_/vhosts/_defaultVHost_/applications/live/instances/_definst_/dvrstores";

    fn dvr() -> DvrClipExtraction {
        let client = Arc::new(WseClient::with_client(
            reqwest::Client::new(),
            Settings::new("http://wse:8087/v2"),
        ));
        DvrClipExtraction::new(client, "live", "")
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn blank_instance_defaults_to_definst() {
        assert_eq!(dvr().base_uri(), STORES);
    }

    #[test]
    fn convert_without_options_has_no_query() {
        let req = dvr().convert_request("myStream.0", &ConvertOptions::new()).unwrap();
        assert_eq!(req.verb, Verb::Put);
        assert_eq!(req.uri, format!("{STORES}/myStream.0/actions/convert"));
    }

    #[test]
    fn convert_range_with_filename() {
        let options =
            ConvertOptions::range(at(1_700_000_000), at(1_700_000_060)).output_filename("clip.mp4");
        let req = dvr().convert_request("myStream.0", &options).unwrap();
        assert_eq!(
            req.uri,
            format!(
                "{STORES}/myStream.0/actions/convert?dvrConverterStartTime=1700000000&dvrConverterEndTime=1700000060&dvrConverterOutputFilename=clip.mp4"
            )
        );
    }

    #[test]
    fn duration_variants_use_milliseconds() {
        let from_start = ConvertOptions::from_start(at(1_700_000_000), Duration::from_secs(30));
        assert_eq!(
            from_start.to_query().to_string(),
            "?dvrConverterStartTime=1700000000&dvrConverterDuration=30000"
        );

        let until_end = ConvertOptions::until_end(at(1_700_000_060), Duration::from_millis(1500))
            .output_filename("tail.mp4");
        assert_eq!(
            until_end.to_query().to_string(),
            "?dvrConverterEndTime=1700000060&dvrConverterDuration=1500&dvrConverterOutputFilename=tail.mp4"
        );
    }

    #[test]
    fn debug_flag_is_always_last() {
        let options = ConvertOptions::range(at(10), at(20))
            .debug(true)
            .output_filename("x.mp4");
        let query = options.to_query().to_string();
        assert!(query.ends_with("&dvrConverterDebugConversions=true"), "{query}");

        let only_debug = ConvertOptions::new().debug(true).to_query().to_string();
        assert_eq!(only_debug, "?dvrConverterDebugConversions=true");
    }

    #[test]
    fn zero_values_are_omitted() {
        let options = ConvertOptions {
            start: Some(DateTime::UNIX_EPOCH),
            end: None,
            duration: Some(Duration::ZERO),
            output_filename: Some(String::new()),
            debug: false,
        };
        assert!(options.to_query().is_empty());
    }

    #[test]
    fn convert_group_joins_store_names() {
        let req = dvr().convert_group_request(&["a.0", "b.0", "c 1"]).unwrap();
        assert_eq!(
            req.uri,
            format!("{STORES}/actions/convert?dvrConverterStoreList=a.0,b.0,c+1")
        );
    }

    #[test]
    fn empty_group_has_no_store_list() {
        let req = dvr().convert_group_request::<&str>(&[]).unwrap();
        assert_eq!(req.uri, format!("{STORES}/actions/convert"));
    }

    #[test]
    fn store_names_are_path_encoded() {
        let d = dvr();
        let get = d.get_item_request("my clip.0").unwrap();
        assert_eq!(get.uri, format!("{STORES}/my%20clip.0"));

        let convert = d.convert_request("my clip.0", &ConvertOptions::new().debug(true)).unwrap();
        assert_eq!(
            convert.uri,
            format!("{STORES}/my%20clip.0/actions/convert?dvrConverterDebugConversions=true")
        );
    }

    #[test]
    fn item_and_remove_share_store_uri() {
        let d = dvr();
        let get = d.get_item_request("myStream.0").unwrap();
        let remove = d.remove_request("myStream.0").unwrap();
        assert_eq!(get.uri, remove.uri);
        assert_eq!(get.verb, Verb::Get);
        assert_eq!(remove.verb, Verb::Delete);
    }

    #[test]
    fn clear_cache_targets_expire_action() {
        let req = dvr().clear_cache_request().unwrap();
        assert_eq!(req.uri, format!("{STORES}/actions/expire"));
        assert_eq!(req.verb, Verb::Put);
    }
}
