use serde::{Deserialize, Serialize};

use crate::entity::sub_entity;

/// `securityConfig`: publish/play authentication, allow/deny lists and
/// SecureToken settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_require_password: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_password_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "publishRTMPSecureURL")]
    pub publish_rtmp_secure_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "publishIPBlackList")]
    pub publish_ip_black_list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "publishIPWhiteList")]
    pub publish_ip_white_list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_block_duplicate_stream_names: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_valid_encoders: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_authentication_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_maximum_connections: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_require_secure_connection: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure_token_version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "secureTokenIncludeClientIPInHash")]
    pub secure_token_include_client_ip_in_hash: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure_token_hash_algorithm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure_token_query_parameters_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure_token_origin_shared_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "playIPBlackList")]
    pub play_ip_black_list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "playIPWhiteList")]
    pub play_ip_white_list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_authentication_method: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

sub_entity!(SecurityConfig, "securityConfig", Some("/security"));

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn acronym_fields_keep_server_casing() {
        let config = SecurityConfig {
            publish_ip_white_list: Some("127.0.0.1".into()),
            play_maximum_connections: Some(100),
            ..SecurityConfig::default()
        };
        assert_eq!(
            serde_json::to_value(&config).unwrap_or_default(),
            json!({ "publishIPWhiteList": "127.0.0.1", "playMaximumConnections": 100 })
        );
    }
}
