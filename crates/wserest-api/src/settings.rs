// ── Connection settings ──
//
// Where the management API lives and how to authenticate against it.
// Immutable once handed to a `WseClient`.

use secrecy::SecretString;

use crate::transport::TransportConfig;

/// Default REST endpoint of a local Streaming Engine install.
pub const DEFAULT_HOST: &str = "http://localhost:8087/v2";
/// Server instance used when none is configured.
pub const DEFAULT_SERVER_INSTANCE: &str = "_defaultServer_";
/// Virtual host instance used when none is configured.
pub const DEFAULT_VHOST_INSTANCE: &str = "_defaultVHost_";

/// How requests authenticate against the management API.
#[derive(Debug, Clone, Default)]
pub enum AuthMethod {
    /// No credentials (`authenticationMethod` = `none` on the server).
    #[default]
    None,
    /// HTTP Basic credentials (`authenticationMethod` = `basic`).
    Basic {
        username: String,
        password: SecretString,
    },
}

/// Connection configuration for one Streaming Engine.
#[derive(Debug, Clone)]
pub struct Settings {
    host: String,
    server_instance: String,
    vhost_instance: String,
    auth: AuthMethod,
    transport: TransportConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}

impl Settings {
    /// Settings for the given REST base (e.g. `http://wse:8087/v2`).
    ///
    /// A blank host falls back to [`DEFAULT_HOST`]; a trailing `/` is dropped.
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        let host = host.trim().trim_end_matches('/');
        Self {
            host: non_blank_or(host, DEFAULT_HOST),
            server_instance: DEFAULT_SERVER_INSTANCE.into(),
            vhost_instance: DEFAULT_VHOST_INSTANCE.into(),
            auth: AuthMethod::None,
            transport: TransportConfig::default(),
        }
    }

    pub fn with_server_instance(mut self, server: impl AsRef<str>) -> Self {
        self.server_instance = non_blank_or(server.as_ref(), DEFAULT_SERVER_INSTANCE);
        self
    }

    pub fn with_vhost_instance(mut self, vhost: impl AsRef<str>) -> Self {
        self.vhost_instance = non_blank_or(vhost.as_ref(), DEFAULT_VHOST_INSTANCE);
        self
    }

    pub fn with_basic_auth(mut self, username: impl Into<String>, password: SecretString) -> Self {
        self.auth = AuthMethod::Basic {
            username: username.into(),
            password,
        };
        self
    }

    pub fn with_auth(mut self, auth: AuthMethod) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn server_instance(&self) -> &str {
        &self.server_instance
    }

    pub fn vhost_instance(&self) -> &str {
        &self.vhost_instance
    }

    pub fn auth(&self) -> &AuthMethod {
        &self.auth
    }

    pub fn transport(&self) -> &TransportConfig {
        &self.transport
    }

    /// `{host}/servers/{server}/vhosts/{vhost}`: the prefix every entity URI
    /// starts with.
    pub fn vhost_uri(&self) -> String {
        format!(
            "{}/servers/{}/vhosts/{}",
            self.host, self.server_instance, self.vhost_instance
        )
    }
}

fn non_blank_or(value: &str, default: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default.to_owned()
    } else {
        value.to_owned()
    }
}
