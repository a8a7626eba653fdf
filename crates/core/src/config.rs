//! Markup names and storage keys shared by the page behaviors.
//!
//! Every field defaults to the markup contract the quiz templates emit, so a
//! `PageConfig::default()` works against pages built by `page::PageBuilder`.

use serde::{Deserialize, Serialize};

pub const PROGRESS_CONTAINER_ID: &str = "progress-wrap";
pub const PROGRESS_TOTAL_ATTR: &str = "data-total";
pub const PROGRESS_FILL_CLASS: &str = "progress-fill";
pub const PROGRESS_TEXT_CLASS: &str = "progress-text";
pub const QUESTION_ATTR: &str = "data-question";

pub const THEME_SELECTOR_CLASS: &str = "theme-dot";
pub const THEME_ATTR: &str = "data-theme";
pub const THEME_STORAGE_KEY: &str = "app_theme";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    pub container_id: String,
    pub total_attr: String,
    pub fill_class: String,
    pub text_class: String,
    pub question_attr: String,
    /// Cap the rendered percentage at 100 when more sections are answered
    /// than the configured total. Off by default.
    pub clamp_percent: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            container_id: PROGRESS_CONTAINER_ID.to_string(),
            total_attr: PROGRESS_TOTAL_ATTR.to_string(),
            fill_class: PROGRESS_FILL_CLASS.to_string(),
            text_class: PROGRESS_TEXT_CLASS.to_string(),
            question_attr: QUESTION_ATTR.to_string(),
            clamp_percent: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Class marking a clickable theme control.
    pub selector_class: String,
    /// Attribute on the control naming its theme.
    pub name_attr: String,
    /// Attribute set on the document root.
    pub root_attr: String,
    pub storage_key: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            selector_class: THEME_SELECTOR_CLASS.to_string(),
            name_attr: THEME_ATTR.to_string(),
            root_attr: THEME_ATTR.to_string(),
            storage_key: THEME_STORAGE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub progress: ProgressConfig,
    pub theme: ThemeConfig,
}
