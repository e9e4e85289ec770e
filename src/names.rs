use serde::{Deserialize, Serialize};

use crate::i18ndictionary::I18NDictionary;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Names {
    #[serde(default, skip_serializing_if = "I18NDictionary::is_empty")]
    pub copyright: I18NDictionary,
    #[serde(default, skip_serializing_if = "I18NDictionary::is_empty")]
    pub family_name: I18NDictionary,
    #[serde(default, skip_serializing_if = "I18NDictionary::is_empty")]
    pub trademark: I18NDictionary,
    #[serde(default, skip_serializing_if = "I18NDictionary::is_empty")]
    pub manufacturer: I18NDictionary,
    #[serde(default, skip_serializing_if = "I18NDictionary::is_empty")]
    pub designer: I18NDictionary,
    #[serde(default, skip_serializing_if = "I18NDictionary::is_empty")]
    pub description: I18NDictionary,
    #[serde(default, skip_serializing_if = "I18NDictionary::is_empty")]
    pub license: I18NDictionary,
    #[serde(default, skip_serializing_if = "I18NDictionary::is_empty")]
    pub license_url: I18NDictionary,
}

impl Names {
    pub fn new() -> Self {
        Self::default()
    }
}
