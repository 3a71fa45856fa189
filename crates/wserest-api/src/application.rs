// Application endpoints
//
// `{vhost}/applications/{name}` plus the `/adv` advanced view and the
// collection-level listing.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::debug;

use crate::client::{Body, JsonMap, Request, Verb, WseClient};
use crate::entity::application::{AdvancedSettings, AppConfig, Modules};
use crate::entity::{EntityContext, PropertyBag, REST_URI};
use crate::error::Error;
use crate::models::WseApps;

const NAME: &str = "name";
const APP_TYPE: &str = "appType";
const READ_ACCESS: &str = "clientStreamReadAccess";
const WRITE_ACCESS: &str = "clientStreamWriteAccess";
const DESCRIPTION: &str = "description";

/// Path-only identity fields: excluded from read request bodies.
const IDENTITY_PROPS: &[&str] = &[NAME, READ_ACCESS, APP_TYPE, WRITE_ACCESS, DESCRIPTION];

/// A single application on a virtual host.
///
/// Construction fixes the base URI; every operation derives its URI from it.
#[derive(Debug, Clone)]
pub struct Application {
    ctx: EntityContext,
}

impl Application {
    /// Wrap the application `name`. Blank arguments take the server defaults:
    /// name `live`, type `Live`, read/write access and description `*`.
    pub fn new(
        client: Arc<WseClient>,
        name: &str,
        app_type: &str,
        read_access: &str,
        write_access: &str,
        description: &str,
    ) -> Self {
        let name = or_default(name, "live");

        let mut props = PropertyBag::new();
        props.insert(NAME, name);
        props.insert(APP_TYPE, or_default(app_type, "Live"));
        props.insert(READ_ACCESS, or_default(read_access, "*"));
        props.insert(WRITE_ACCESS, or_default(write_access, "*"));
        props.insert(DESCRIPTION, or_default(description, "*"));

        let base_uri = format!("{}/applications/{name}", client.settings().vhost_uri());
        Self {
            ctx: EntityContext::new(client, base_uri, props),
        }
    }

    /// Wrap an existing application by name, defaults for everything else.
    pub fn named(client: Arc<WseClient>, name: &str) -> Self {
        Self::new(client, name, "", "", "", "")
    }

    pub fn name(&self) -> &str {
        self.ctx.props().get_str(NAME).unwrap_or_default()
    }

    pub fn app_type(&self) -> &str {
        self.ctx.props().get_str(APP_TYPE).unwrap_or_default()
    }

    pub fn base_uri(&self) -> &str {
        self.ctx.base_uri()
    }

    fn collection_uri(&self) -> String {
        format!("{}/applications", self.ctx.client().settings().vhost_uri())
    }

    // ── Request builders ─────────────────────────────────────────────

    pub fn get_request(&self) -> Result<Request, Error> {
        self.ctx.request(Verb::Get, self.ctx.uri(""), IDENTITY_PROPS, &[])
    }

    pub fn get_advanced_request(&self) -> Result<Request, Error> {
        self.ctx.request(Verb::Get, self.ctx.uri("/adv"), IDENTITY_PROPS, &[])
    }

    pub fn get_all_request(&self) -> Result<Request, Error> {
        self.ctx.request(Verb::Get, self.collection_uri(), IDENTITY_PROPS, &[])
    }

    pub fn create_request(&self, config: &AppConfig) -> Result<Request, Error> {
        self.ctx.request(Verb::Post, self.ctx.uri(""), &[], &config.fragments())
    }

    pub fn update_request(&self, config: &AppConfig) -> Result<Request, Error> {
        self.ctx.request(Verb::Put, self.ctx.uri(""), &[], &config.fragments())
    }

    /// The `/adv` body carries only the two lists and `restURI`.
    pub fn update_advanced_request(
        &self,
        advanced: &AdvancedSettings,
        modules: &Modules,
    ) -> Result<Request, Error> {
        let uri = self.ctx.uri("/adv");
        let mut body = JsonMap::new();
        body.insert(
            "advancedSettings".into(),
            serde_json::to_value(&advanced.advanced_settings)?,
        );
        body.insert("modules".into(), serde_json::to_value(&modules.module_list)?);
        body.insert(REST_URI.into(), json!(uri));
        Ok(Request::new(Verb::Put, uri).with_body(Body::Json(Value::Object(body))))
    }

    pub fn remove_request(&self) -> Result<Request, Error> {
        self.ctx.request(Verb::Delete, self.ctx.uri(""), &[], &[])
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Retrieve this application's configuration.
    ///
    /// `GET {base}`
    pub async fn get(&self) -> Result<JsonMap, Error> {
        debug!(app = self.name(), "fetching application");
        self.ctx.send_raw(self.get_request()?).await
    }

    /// Retrieve the advanced configuration (properties + module chain).
    ///
    /// `GET {base}/adv`
    pub async fn get_advanced(&self) -> Result<JsonMap, Error> {
        debug!(app = self.name(), "fetching advanced application config");
        self.ctx.send_raw(self.get_advanced_request()?).await
    }

    /// List every application on the virtual host, loosely typed.
    ///
    /// `GET {vhost}/applications`
    pub async fn get_all_raw(&self) -> Result<JsonMap, Error> {
        debug!("listing applications");
        self.ctx.send_raw(self.get_all_request()?).await
    }

    /// List every application on the virtual host.
    ///
    /// `GET {vhost}/applications`
    pub async fn get_all(&self) -> Result<WseApps, Error> {
        debug!("listing applications");
        self.ctx.send(self.get_all_request()?).await
    }

    /// Create the application with whichever fragments `config` carries.
    ///
    /// `POST {base}`
    pub async fn create(&self, config: &AppConfig) -> Result<JsonMap, Error> {
        debug!(app = self.name(), "creating application");
        self.ctx.send_raw(self.create_request(config)?).await
    }

    /// Update the application with whichever fragments `config` carries.
    ///
    /// `PUT {base}`
    pub async fn update(&self, config: &AppConfig) -> Result<JsonMap, Error> {
        debug!(app = self.name(), "updating application");
        self.ctx.send_raw(self.update_request(config)?).await
    }

    /// Replace advanced properties and the module chain.
    ///
    /// `PUT {base}/adv`
    pub async fn update_advanced(
        &self,
        advanced: &AdvancedSettings,
        modules: &Modules,
    ) -> Result<JsonMap, Error> {
        debug!(
            app = self.name(),
            properties = advanced.advanced_settings.len(),
            modules = modules.module_list.len(),
            "updating advanced application config"
        );
        self.ctx.send_raw(self.update_advanced_request(advanced, modules)?).await
    }

    /// Delete the application.
    ///
    /// `DELETE {base}`
    pub async fn remove(&self) -> Result<JsonMap, Error> {
        debug!(app = self.name(), "removing application");
        self.ctx.send_raw(self.remove_request()?).await
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
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
    use crate::client::Body;
    use crate::entity::application::{AdvancedSettingItem, DvrConfig, ModuleItem, StreamConfig};
    use crate::settings::Settings;
    use pretty_assertions::assert_eq;

    const VHOST: &str = "http://wse:8087/v2/servers/_defaultServer_/vhosts/_defaultVHost_";

    fn client() -> Arc<WseClient> {
        Arc::new(WseClient::with_client(
            reqwest::Client::new(),
            Settings::new("http://wse:8087/v2"),
        ))
    }

    fn body(req: &Request) -> &JsonMap {
        match &req.body {
            Body::Json(Value::Object(map)) => map,
            other => panic!("expected object body, got {other:?}"),
        }
    }

    #[test]
    fn blank_fields_take_defaults() {
        let app = Application::new(client(), "", " ", "", "", "");
        assert_eq!(app.name(), "live");
        assert_eq!(app.app_type(), "Live");
        assert_eq!(app.base_uri(), format!("{VHOST}/applications/live"));

        let req = app.create_request(&AppConfig::new()).unwrap();
        let b = body(&req);
        assert_eq!(b[READ_ACCESS], json!("*"));
        assert_eq!(b[WRITE_ACCESS], json!("*"));
        assert_eq!(b[DESCRIPTION], json!("*"));
    }

    #[test]
    fn uris_are_deterministic_and_base_is_untouched() {
        let app = Application::named(client(), "vod");
        let first = app.get_advanced_request().unwrap();
        let second = app.get_advanced_request().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.uri, format!("{VHOST}/applications/vod/adv"));
        assert_eq!(app.base_uri(), format!("{VHOST}/applications/vod"));
        assert_eq!(
            app.get_all_request().unwrap().uri,
            format!("{VHOST}/applications")
        );
    }

    #[test]
    fn read_bodies_never_carry_identity_props() {
        let app = Application::new(client(), "live", "Live", "a", "b", "c");
        for req in [
            app.get_request().unwrap(),
            app.get_advanced_request().unwrap(),
            app.get_all_request().unwrap(),
        ] {
            let b = body(&req);
            for prop in IDENTITY_PROPS {
                assert!(!b.contains_key(*prop), "{prop} leaked into {}", req.uri);
            }
            assert_eq!(b[REST_URI], json!(req.uri));
        }
    }

    #[test]
    fn create_body_carries_props_and_fragments() {
        let app = Application::new(client(), "rec", "Live", "", "", "Recorder");
        let config = AppConfig::new()
            .stream(StreamConfig::live())
            .dvr(DvrConfig {
                window_duration: Some(0),
                ..DvrConfig::default()
            });

        let req = app.create_request(&config).unwrap();
        assert_eq!(req.verb, Verb::Post);

        let b = body(&req);
        let keys: Vec<_> = b.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                NAME,
                APP_TYPE,
                READ_ACCESS,
                WRITE_ACCESS,
                DESCRIPTION,
                REST_URI,
                "streamConfig",
                "dvrConfig"
            ]
        );
        assert_eq!(
            b["streamConfig"],
            json!({
                "streamType": "live",
                "restURI": format!("{VHOST}/applications/rec/streamconfiguration"),
            })
        );
        assert_eq!(
            b["dvrConfig"][REST_URI],
            json!(format!("{VHOST}/applications/rec/dvr"))
        );
    }

    #[test]
    fn update_uses_put_on_base() {
        let app = Application::named(client(), "live");
        let req = app.update_request(&AppConfig::new()).unwrap();
        assert_eq!(req.verb, Verb::Put);
        assert_eq!(req.uri, app.base_uri());
    }

    #[test]
    fn advanced_update_body_is_literal() {
        let app = Application::named(client(), "live");
        let advanced = AdvancedSettings::new(vec![AdvancedSettingItem::new(
            "/Root/Application",
            "pushPublishMapPath",
            "String",
            "${com.wowza.wms.context.VHostConfigHome}/conf/live/PushPublishMap.txt",
        )]);
        let modules = Modules::new(vec![ModuleItem::new(
            0,
            "base",
            "Base",
            "com.wowza.wms.module.ModuleCore",
        )]);

        let req = app.update_advanced_request(&advanced, &modules).unwrap();
        let b = body(&req);
        assert_eq!(req.verb, Verb::Put);
        assert_eq!(req.uri, format!("{VHOST}/applications/live/adv"));
        assert_eq!(b.len(), 3);
        assert_eq!(b["advancedSettings"][0]["name"], json!("pushPublishMapPath"));
        assert_eq!(b["modules"][0]["class"], json!("com.wowza.wms.module.ModuleCore"));
        assert_eq!(b[REST_URI], json!(req.uri));
    }

    #[test]
    fn remove_is_delete_without_wire_body() {
        let app = Application::named(client(), "live");
        let req = app.remove_request().unwrap();
        assert_eq!(req.verb, Verb::Delete);
        assert!(req.wire_body().is_none());
    }
}
