//! Language of generated descriptions.

use serde::{Deserialize, Serialize};

/// Language the input descriptions and subtasks are written in.
///
/// Steps are always written in English; Vietnamese runs keep Vietnamese
/// labels and values inside the step fields.
///
/// # Examples
///
/// ```
/// use stepforge_core::Language;
/// use std::str::FromStr;
///
/// assert_eq!(Language::from_str("vi").unwrap(), Language::Vietnamese);
/// assert_eq!(Language::English.to_string(), "en");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum Language {
    /// English descriptions
    #[default]
    #[serde(rename = "en")]
    #[strum(serialize = "en")]
    English,
    /// Vietnamese descriptions
    #[serde(rename = "vi")]
    #[strum(serialize = "vi")]
    Vietnamese,
}

impl Language {
    /// English name of the language, for prompts.
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Vietnamese => "Vietnamese",
        }
    }
}
