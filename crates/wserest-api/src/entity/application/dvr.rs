use serde::{Deserialize, Serialize};

use crate::entity::sub_entity;

/// `dvrConfig`: nDVR recording for the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DvrConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dvr_only_streaming: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_recording_on_startup: Option<bool>,
    /// Seconds of playable window; 0 keeps everything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dvr_encryption_shared_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dvr_media_cache_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_randomize_media_name: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

sub_entity!(DvrConfig, "dvrConfig", Some("/dvr"));
