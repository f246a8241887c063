use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainLanguage {
    #[default]
    Indonesian,
    English,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainTheme {
    #[default]
    Light,
    Dark,
}

/// Display preferences shared by every screen, persisted under `appSettings`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DomainSettings {
    #[serde(default)]
    pub language: DomainLanguage,
    #[serde(default)]
    pub theme: DomainTheme,
}
