use serde::{Deserialize, Serialize};

use crate::entity::sub_entity;

/// `drmConfig`: DRM provider credentials and per-protocol toggles.
///
/// Provider field sets vary widely, so only the common toggles are typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrmConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "cupertinoEncryptionAPIBased")]
    pub cupertino_encryption_api_based: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "mpegDashEncryptionAPIBased")]
    pub mpeg_dash_encryption_api_based: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "buyDRMUserKey")]
    pub buy_drm_user_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "ezDRMUsername")]
    pub ez_drm_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "ezDRMPassword")]
    pub ez_drm_password: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

sub_entity!(DrmConfig, "drmConfig", Some("/drm"));
