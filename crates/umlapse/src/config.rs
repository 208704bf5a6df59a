//! Configuration types for Umlapse.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources. Every section and field is optional and falls back to
//! its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the frame style and
//!   history settings.
//! - [`HistoryConfig`] - Default diagram scope and frame boundary mode.
//! - [`FrameStyle`] - Colours and fonts of the emitted frames.
//!
//! # Example
//!
//! ```
//! # use umlapse::config::AppConfig;
//! # use umlapse::timeline::DiagramScope;
//! let config = AppConfig::default();
//! assert_eq!(config.history().scope(), DiagramScope::All);
//! assert!(!config.history().clean_frames());
//! ```

use serde::Deserialize;

pub use umlapse_core::style::FrameStyle;

use crate::timeline::DiagramScope;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Frame style section.
    #[serde(default)]
    style: FrameStyle,

    /// History section.
    #[serde(default)]
    history: HistoryConfig,
}

impl AppConfig {
    pub fn new(style: FrameStyle, history: HistoryConfig) -> Self {
        Self { style, history }
    }

    /// Returns the frame style.
    pub fn style(&self) -> &FrameStyle {
        &self.style
    }

    /// Returns the history settings.
    pub fn history(&self) -> &HistoryConfig {
        &self.history
    }
}

/// Settings controlling how revisions are turned into timeslices and frames.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryConfig {
    /// Diagram identifier to restrict the history to; unset means all
    /// diagrams.
    #[serde(default)]
    scope: Option<String>,

    /// Request a clean slate at every frame boundary.
    #[serde(default)]
    clean_frames: bool,
}

impl HistoryConfig {
    pub fn new(scope: Option<String>, clean_frames: bool) -> Self {
        Self { scope, clean_frames }
    }

    /// Returns the configured diagram scope, [`DiagramScope::All`] when unset.
    pub fn scope(&self) -> DiagramScope {
        self.scope
            .as_deref()
            .map(DiagramScope::from_id)
            .unwrap_or_default()
    }

    pub fn clean_frames(&self) -> bool {
        self.clean_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").expect("empty config");
        assert_eq!(config.style(), &FrameStyle::default());
        assert_eq!(config.history().scope(), DiagramScope::All);
        assert!(!config.history().clean_frames());
    }

    #[test]
    fn test_partial_sections() {
        let config: AppConfig = toml::from_str(
            r##"
            [style]
            background_color = "#411F48"
            font_name = "DejaVuSans"

            [history]
            scope = "/AAAAAAFF+qBWK6M3Z8Y="
            clean_frames = true
            "##,
        )
        .expect("valid config");

        assert_eq!(config.style().background_color(), "#411F48");
        assert_eq!(config.style().font_name(), Some("DejaVuSans"));
        assert_eq!(config.style().node_fill_color(), "purple");
        assert_eq!(
            config.history().scope(),
            DiagramScope::Diagram("AAAAAAFF+qBWK6M3Z8Y=".to_string())
        );
        assert!(config.history().clean_frames());
    }

    #[test]
    fn test_actor_image() {
        let config: AppConfig = toml::from_str("[style]\nnode_color = \"black\"").expect("valid");
        assert_eq!(config.style().actor_image(), Some("resources/umlactor.png"));

        let config: AppConfig =
            toml::from_str("[style]\nactor_image = \"icons/actor.png\"").expect("valid");
        assert_eq!(config.style().actor_image(), Some("icons/actor.png"));

        let config: AppConfig = toml::from_str("[style]\nactor_image = \"\"").expect("valid");
        assert_eq!(config.style().actor_image(), None);
    }

    #[test]
    fn test_scope_all_keyword() {
        let config: AppConfig = toml::from_str("[history]\nscope = \"all\"").expect("valid config");
        assert_eq!(config.history().scope(), DiagramScope::All);
    }
}
