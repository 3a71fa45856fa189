// Management API HTTP client
//
// Wraps `reqwest::Client` with the settings it was built from. Entity
// wrappers hand it a fully-formed `Request`; it issues exactly one call and
// decodes the response either generically or into a caller-chosen type.

use std::fmt;

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::error::Error;
use crate::settings::{AuthMethod, Settings};
use crate::transport::JSON_UTF8;

/// Generic decoded response object.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

// ── Error response shape from the management API ─────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

// ── Request ──────────────────────────────────────────────────────────

/// HTTP verb of a management call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    /// Whether requests with this verb carry a JSON body.
    pub fn sends_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }

    fn method(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method().as_str())
    }
}

/// Request payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    #[default]
    Empty,
    Json(serde_json::Value),
}

/// One outbound management call.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub verb: Verb,
    pub uri: String,
    pub body: Body,
}

impl Request {
    pub fn new(verb: Verb, uri: impl Into<String>) -> Self {
        Self {
            verb,
            uri: uri.into(),
            body: Body::Empty,
        }
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// The JSON that will actually go over the wire (bodies ride on POST/PUT only).
    pub fn wire_body(&self) -> Option<&serde_json::Value> {
        match &self.body {
            Body::Json(value) if self.verb.sends_body() => Some(value),
            _ => None,
        }
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Wowza Streaming Engine REST API.
///
/// Cheap to share behind an `Arc`; every entity wrapper holds one.
pub struct WseClient {
    http: reqwest::Client,
    settings: Settings,
}

impl fmt::Debug for WseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WseClient")
            .field("host", &self.settings.host())
            .field("server_instance", &self.settings.server_instance())
            .field("vhost_instance", &self.settings.vhost_instance())
            .finish_non_exhaustive()
    }
}

impl WseClient {
    /// Build a client, constructing the HTTP stack from the settings' transport.
    pub fn new(settings: Settings) -> Result<Self, Error> {
        let http = settings.transport().build_client()?;
        Ok(Self { http, settings })
    }

    /// Wrap an existing `reqwest::Client` (caller manages TLS and timeouts).
    pub fn with_client(http: reqwest::Client, settings: Settings) -> Self {
        Self { http, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Issue the request and decode the response as a generic JSON object.
    ///
    /// An empty body decodes to an empty map.
    pub async fn send_raw(&self, request: Request) -> Result<JsonMap, Error> {
        let body = self.execute(request).await?;
        if body.trim().is_empty() {
            return Ok(JsonMap::new());
        }
        decode(body)
    }

    /// Issue the request and decode the response into `T`.
    pub async fn send<T: DeserializeOwned>(&self, request: Request) -> Result<T, Error> {
        let body = self.execute(request).await?;
        decode(body)
    }

    async fn execute(&self, request: Request) -> Result<String, Error> {
        debug!(verb = %request.verb, uri = %request.uri, "sending request");

        let mut builder = self.http.request(request.verb.method(), &request.uri);

        if let AuthMethod::Basic { username, password } = self.settings.auth() {
            builder = builder.basic_auth(username, Some(password.expose_secret()));
        }

        if let Some(json) = request.wire_body() {
            let payload = serde_json::to_vec(json)?;
            trace!(body = %String::from_utf8_lossy(&payload), "request body");
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))
                .body(payload);
        }

        let resp = builder.send().await?;
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "server rejected credentials (HTTP 401)".into(),
            });
        }

        let body = resp.text().await?;
        trace!(%status, len = body.len(), "response received");

        if status.is_success() {
            Ok(body)
        } else {
            Err(parse_error(status, body))
        }
    }
}

fn decode<T: DeserializeOwned>(body: String) -> Result<T, Error> {
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}

fn parse_error(status: reqwest::StatusCode, raw: String) -> Error {
    if let Ok(err) = serde_json::from_str::<ErrorResponse>(&raw) {
        let code = err.code.map(|c| match c {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });
        Error::Api {
            status: status.as_u16(),
            message: err.message.unwrap_or_else(|| status.to_string()),
            code,
        }
    } else {
        Error::Api {
            status: status.as_u16(),
            message: if raw.is_empty() {
                status.to_string()
            } else {
                raw
            },
            code: None,
        }
    }
}
