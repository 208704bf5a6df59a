//! Visual styling of animation frames.
//!
//! [`FrameStyle`] collects every colour and font setting the frame
//! serializer and the drawables need. Colours are graph-description colour
//! values (`"red"`, `"#FFFFFF"`, `"magenta3"`) and are emitted quoted, so any
//! value the renderer understands is accepted.
//!
//! # Example
//!
//! ```
//! # use umlapse_core::style::FrameStyle;
//! let style = FrameStyle::default();
//! assert_eq!(style.node_highlight_color(), "red");
//! ```

use serde::{Deserialize, Deserializer};

/// Colours and fonts used to serialize frames.
///
/// Every field falls back to the default palette when missing from a
/// configuration source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrameStyle {
    node_color: String,
    node_fill_color: String,
    node_highlight_color: String,
    node_font_color: String,
    edge_color: String,
    edge_highlight_color: String,
    edge_font_color: String,
    cluster_color: String,
    cluster_highlight_color: String,
    cluster_default_color: String,
    background_color: String,
    font_path: Option<String>,
    font_name: Option<String>,
    /// An empty string disables the image.
    #[serde(deserialize_with = "empty_as_none")]
    actor_image: Option<String>,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            node_color: "#FFFFFF".to_string(),
            node_fill_color: "purple".to_string(),
            node_highlight_color: "red".to_string(),
            node_font_color: "white".to_string(),
            edge_color: "magenta3".to_string(),
            edge_highlight_color: "red".to_string(),
            edge_font_color: "white".to_string(),
            cluster_color: "black".to_string(),
            cluster_highlight_color: "red".to_string(),
            cluster_default_color: "white".to_string(),
            background_color: "transparent".to_string(),
            font_path: None,
            font_name: None,
            actor_image: Some("resources/umlactor.png".to_string()),
        }
    }
}

impl FrameStyle {
    /// Border colour of a present, unchanged node.
    pub fn node_color(&self) -> &str {
        &self.node_color
    }

    pub fn node_fill_color(&self) -> &str {
        &self.node_fill_color
    }

    pub fn node_highlight_color(&self) -> &str {
        &self.node_highlight_color
    }

    pub fn node_font_color(&self) -> &str {
        &self.node_font_color
    }

    pub fn edge_color(&self) -> &str {
        &self.edge_color
    }

    pub fn edge_highlight_color(&self) -> &str {
        &self.edge_highlight_color
    }

    pub fn edge_font_color(&self) -> &str {
        &self.edge_font_color
    }

    /// Border colour of a visible, unchanged cluster.
    pub fn cluster_color(&self) -> &str {
        &self.cluster_color
    }

    pub fn cluster_highlight_color(&self) -> &str {
        &self.cluster_highlight_color
    }

    /// Border colour of a cluster that is not marked visible in a frame.
    pub fn cluster_default_color(&self) -> &str {
        &self.cluster_default_color
    }

    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    pub fn font_path(&self) -> Option<&str> {
        self.font_path.as_deref()
    }

    pub fn font_name(&self) -> Option<&str> {
        self.font_name.as_deref()
    }

    /// Image drawn for actor nodes, `None` to draw a bare label.
    ///
    /// The path is handed to the graph renderer as is and resolved from its
    /// working directory.
    pub fn actor_image(&self) -> Option<&str> {
        self.actor_image.as_deref()
    }

    pub fn with_font(mut self, font_path: impl Into<String>, font_name: impl Into<String>) -> Self {
        self.font_path = Some(font_path.into());
        self.font_name = Some(font_name.into());
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    pub fn with_actor_image(mut self, image: Option<String>) -> Self {
        self.actor_image = image;
        self
    }

    /// Font attributes shared by the graph, node and edge defaults, e.g.
    /// `fontpath="/fonts",fontname="DejaVuSans"`. Empty when no font is set.
    pub(crate) fn font_attributes(&self) -> Vec<String> {
        let mut attrs = Vec::new();
        if let Some(path) = &self.font_path {
            attrs.push(format!("fontpath=\"{path}\""));
        }
        if let Some(name) = &self.font_name {
            attrs.push(format!("fontname=\"{name}\""));
        }
        attrs
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|image| !image.is_empty()))
}
