// Shared entity plumbing
//
// Every wrapper (Application, DvrClipExtraction, ...) holds an
// `EntityContext`: the client, a base URI fixed at construction, and a
// property bag. Request bodies are the bag filtered through a per-operation
// skip list, plus `restURI`, plus any attached sub-entity fragments.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

use crate::client::{Body, JsonMap, Request, Verb, WseClient};
use crate::error::Error;

/// Key every WSE request/response object carries for its own resource URI.
pub const REST_URI: &str = "restURI";

// ── Sub-entities ─────────────────────────────────────────────────────

/// A configuration fragment nested inside a parent entity's request body.
///
/// Fragments land in the body under [`entity_name`](Self::entity_name), with
/// their own `restURI` set to the parent base URI plus
/// [`uri_suffix`](Self::uri_suffix) (or empty when there is no suffix).
pub trait SubEntity: Send + Sync {
    fn entity_name(&self) -> &'static str;

    fn uri_suffix(&self) -> Option<&'static str>;

    fn to_json(&self) -> Result<Value, serde_json::Error>;

    /// Serialize the fragment with its `restURI` resolved against `base_uri`.
    fn to_fragment(&self, base_uri: &str) -> Result<Value, serde_json::Error> {
        let rest_uri = self
            .uri_suffix()
            .map_or_else(String::new, |suffix| format!("{base_uri}{suffix}"));
        let mut value = self.to_json()?;
        if let Value::Object(ref mut map) = value {
            map.insert(REST_URI.into(), Value::String(rest_uri));
        }
        Ok(value)
    }
}

/// Implements [`SubEntity`] for a `Serialize` fragment type.
macro_rules! sub_entity {
    ($ty:ty, $name:literal, $suffix:expr) => {
        impl $crate::entity::SubEntity for $ty {
            fn entity_name(&self) -> &'static str {
                $name
            }

            fn uri_suffix(&self) -> Option<&'static str> {
                $suffix
            }

            fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
                serde_json::to_value(self)
            }
        }
    };
}
pub(crate) use sub_entity;

pub mod application;

// ── Property bag ─────────────────────────────────────────────────────

/// Insertion-ordered property map for an entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag {
    props: IndexMap<String, Value>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.props.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.props.get(name).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// All properties not named in `skip`, followed by `restURI`.
    pub fn prepare(&self, skip: &[&str], rest_uri: &str) -> JsonMap {
        let mut out: JsonMap = self
            .props
            .iter()
            .filter(|(name, _)| !skip.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        out.insert(REST_URI.into(), Value::String(rest_uri.to_owned()));
        out
    }
}

// ── Entity context ───────────────────────────────────────────────────

/// State shared by every entity wrapper: client handle, base URI, properties.
///
/// The base URI never changes after construction; per-call URIs are derived
/// from it.
#[derive(Debug, Clone)]
pub(crate) struct EntityContext {
    client: Arc<WseClient>,
    base_uri: String,
    props: PropertyBag,
}

impl EntityContext {
    pub(crate) fn new(client: Arc<WseClient>, base_uri: String, props: PropertyBag) -> Self {
        Self {
            client,
            base_uri,
            props,
        }
    }

    pub(crate) fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub(crate) fn props(&self) -> &PropertyBag {
        &self.props
    }

    pub(crate) fn client(&self) -> &WseClient {
        &self.client
    }

    /// `{base}{suffix}` without touching the stored base.
    pub(crate) fn uri(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.base_uri)
    }

    /// Assemble a request body: filtered properties, `restURI`, then each
    /// fragment under its entity name.
    pub(crate) fn prepare(
        &self,
        skip: &[&str],
        rest_uri: &str,
        fragments: &[&dyn SubEntity],
    ) -> Result<JsonMap, Error> {
        let mut body = self.props.prepare(skip, rest_uri);
        for fragment in fragments {
            trace!(entity = fragment.entity_name(), "attaching sub-entity");
            body.insert(
                fragment.entity_name().into(),
                fragment.to_fragment(&self.base_uri)?,
            );
        }
        Ok(body)
    }

    /// Build a request whose body is the prepared property set.
    pub(crate) fn request(
        &self,
        verb: Verb,
        uri: String,
        skip: &[&str],
        fragments: &[&dyn SubEntity],
    ) -> Result<Request, Error> {
        let body = self.prepare(skip, &uri, fragments)?;
        Ok(Request::new(verb, uri).with_body(Body::Json(Value::Object(body))))
    }

    pub(crate) async fn send_raw(&self, request: Request) -> Result<JsonMap, Error> {
        self.client.send_raw(request).await
    }

    pub(crate) async fn send<T: DeserializeOwned>(&self, request: Request) -> Result<T, Error> {
        self.client.send(request).await
    }
}
