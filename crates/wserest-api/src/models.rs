// Management API response types
//
// Typed mirrors of the JSON documents returned by the application and DVR
// store endpoints. Fields use `#[serde(default)]` throughout because the
// server omits empty values depending on version and state.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Generic acknowledgement ──────────────────────────────────────────

/// `{ "success": true, "message": "...", "data": null }` returned by
/// create/update/action calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

// ── Applications ─────────────────────────────────────────────────────

/// `GET .../applications`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WseApps {
    #[serde(default)]
    pub server_name: String,
    #[serde(default)]
    pub applications: Vec<WseApp>,
}

/// One application summary inside [`WseApps`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WseApp {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub app_type: String,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub drm_enabled: bool,
    #[serde(default)]
    pub dvr_enabled: bool,
    #[serde(default)]
    pub stream_targets_enabled: bool,
    #[serde(default)]
    pub transcoder_enabled: bool,
}

// ── DVR stores ───────────────────────────────────────────────────────

/// `GET .../instances/{instance}/dvrstores`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WseDvrStores {
    #[serde(default, rename = "serverName")]
    pub server_name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, rename = "dvrconverterstoresummary")]
    pub stores: Vec<WseDvrStore>,
}

/// One store in [`WseDvrStores`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WseDvrStore {
    #[serde(default, rename = "name")]
    pub id: String,
    #[serde(default)]
    pub location: String,
}

/// `GET .../dvrstores/{name}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WseDvrConverter {
    #[serde(default, rename = "dvrStoreName")]
    pub id: String,
    #[serde(default, rename = "serverName")]
    pub server_name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, rename = "DvrConverterStore")]
    pub store: WseDvrConverterStore,
}

/// Store details inside [`WseDvrConverter`].
///
/// `dvr_start_time` / `dvr_end_time` are offsets into the store in
/// milliseconds; `utc_start` / `utc_end` are wall-clock epoch milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WseDvrConverterStore {
    #[serde(default)]
    pub dvr_store_name: String,
    #[serde(default)]
    pub audio_available: bool,
    #[serde(default)]
    pub video_available: bool,
    #[serde(default)]
    pub dvr_start_time: i64,
    #[serde(default)]
    pub dvr_end_time: i64,
    #[serde(default)]
    pub output_filename: String,
    #[serde(default)]
    pub is_live: bool,
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub utc_start: i64,
    #[serde(default)]
    pub utc_end: i64,
    #[serde(default)]
    pub conversion_status: WseDvrConversionStatus,
}

/// Progress of the most recent conversion on a store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WseDvrConversionStatus {
    #[serde(default)]
    pub store_name: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub status_code: String,
    #[serde(default)]
    pub start_time: i64,
    #[serde(default)]
    pub end_time: i64,
    #[serde(default)]
    pub file_duration: i64,
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub current_chunk: i64,
    #[serde(default)]
    pub chunk_count: i64,
}

impl WseDvrConversionStatus {
    /// The raw `state` string as a [`ConversionState`].
    pub fn state(&self) -> ConversionState {
        ConversionState::from(self.state.as_str())
    }
}

/// Parsed form of the `state` string in [`WseDvrConversionStatus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionState {
    Running,
    Success,
    Error,
    /// Anything else the server reports (including an empty state).
    Unknown(String),
}

impl ConversionState {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

impl From<&str> for ConversionState {
    fn from(state: &str) -> Self {
        match state.to_ascii_uppercase().as_str() {
            "RUNNING" => Self::Running,
            "SUCCESS" => Self::Success,
            "ERROR" => Self::Error,
            _ => Self::Unknown(state.to_owned()),
        }
    }
}

impl fmt::Display for ConversionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => f.write_str("RUNNING"),
            Self::Success => f.write_str("SUCCESS"),
            Self::Error => f.write_str("ERROR"),
            Self::Unknown(s) => f.write_str(s),
        }
    }
}
