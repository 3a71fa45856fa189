use serde::{Deserialize, Serialize};

use crate::entity::sub_entity;

/// `streamConfig`: stream type, packetizers and storage layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_storage_dir: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir_exists: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_stream_packetizer: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_streamers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_randomize_media_name: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_optimize_file_reads: Option<bool>,
    /// Any other `streamConfig` field the server accepts.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StreamConfig {
    /// A plain `live` stream type with nothing else set.
    pub fn live() -> Self {
        Self {
            stream_type: Some("live".into()),
            ..Self::default()
        }
    }
}

sub_entity!(StreamConfig, "streamConfig", Some("/streamconfiguration"));
