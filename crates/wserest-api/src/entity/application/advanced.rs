use serde::{Deserialize, Serialize};

use crate::entity::sub_entity;

/// One advanced property (`Application.xml` `<Property>` entry).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedSettingItem {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub can_remove: bool,
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub default_value: Option<String>,
    /// Property type: `String`, `Boolean`, `Integer`, ...
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub section_name: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub documented: bool,
}

impl AdvancedSettingItem {
    /// An enabled, removable property in the given section.
    pub fn new(
        section: impl Into<String>,
        name: impl Into<String>,
        kind: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            enabled: true,
            can_remove: true,
            name: name.into(),
            value: value.into(),
            kind: kind.into(),
            section: section.into(),
            ..Self::default()
        }
    }
}

/// `advancedSettings`: list of advanced properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedSettings {
    #[serde(default)]
    pub advanced_settings: Vec<AdvancedSettingItem>,
}

impl AdvancedSettings {
    pub fn new(advanced_settings: Vec<AdvancedSettingItem>) -> Self {
        Self { advanced_settings }
    }
}

// Advanced settings travel inline in the `/adv` body, so their restURI is blank.
sub_entity!(AdvancedSettings, "advancedSettings", None);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_serializes_type_field() {
        let item = AdvancedSettingItem::new(
            "/Root/Application",
            "securityPublishRequirePassword",
            "Boolean",
            "true",
        );
        let value = serde_json::to_value(&item).unwrap_or_default();
        assert_eq!(value["type"], json!("Boolean"));
        assert_eq!(value["canRemove"], json!(true));
        assert_eq!(value["sectionName"], json!(""));
    }
}
