use serde::{Deserialize, Serialize};

use crate::entity::sub_entity;

/// `transcoderConfig`: live stream transcoder templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscoderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_stream_transcoder: Option<String>,
    /// Comma-separated template names, e.g. `${SourceStreamName}.xml,transrate.xml`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_template_dir: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

sub_entity!(TranscoderConfig, "transcoderConfig", Some("/transcoder"));
