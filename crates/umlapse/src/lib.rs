//! Umlapse - Animated revision history for UML diagrams.
//!
//! Revisions of a model document are diffed into timeslices, replayed as an
//! animation of graph-description frames, and summarized in a newest-first
//! changelog. Rendering the frames to images is left to an external graph
//! renderer.

pub mod config;
pub mod timeline;

mod animator;
mod changelog;
mod error;

pub use umlapse_core::{animation, drawable, identifier, style, tree};

pub use animator::animate;
pub use changelog::generate_log;
pub use error::{StructuralError, UmlapseError};

use log::{debug, info, trace};

use config::AppConfig;
use timeline::{DiagramScope, Timeslice};
use tree::TreeNode;

/// Builder for turning model revisions into frames and a changelog.
///
/// # Examples
///
/// ```rust
/// use umlapse::{HistoryBuilder, config::AppConfig, timeline::DiagramScope};
///
/// let source = r#"{ "_id": "project", "_type": "Project", "name": "Empty" }"#;
///
/// let builder = HistoryBuilder::new(AppConfig::default());
/// let revision = builder.parse_revision(1, source).expect("Failed to parse");
///
/// let timeslices = builder
///     .timeslices(&[revision], &DiagramScope::All)
///     .expect("Failed to diff");
/// let frames = builder.render_frames(&timeslices);
/// let log = builder.changelog(&timeslices, None, None);
///
/// assert_eq!(frames.len(), 1);
/// assert!(log.starts_with("NEWEST CHANGES"));
/// ```
#[derive(Debug, Default)]
pub struct HistoryBuilder {
    config: AppConfig,
}

impl HistoryBuilder {
    /// Create a new history builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse one model document into a revision tree.
    ///
    /// # Arguments
    ///
    /// * `revision` - 1-based revision number, used in error reports
    /// * `source` - The model document as JSON text
    ///
    /// # Errors
    ///
    /// Returns [`UmlapseError::Parse`] when the document is not a valid
    /// model document.
    pub fn parse_revision(&self, revision: usize, source: &str) -> Result<TreeNode, UmlapseError> {
        info!(revision; "Parsing revision");

        let tree = umlapse_mdj::parse(source)
            .map_err(|err| UmlapseError::new_parse_error(revision, err))?;

        debug!(revision; "Revision parsed successfully");
        trace!(tree:?; "Parsed revision");
        Ok(tree)
    }

    /// Diff the revisions, in order, into one timeslice each.
    ///
    /// # Errors
    ///
    /// Returns [`UmlapseError::Structural`] when any revision is malformed;
    /// no timeslice is returned in that case.
    pub fn timeslices(
        &self,
        revisions: &[TreeNode],
        scope: &DiagramScope,
    ) -> Result<Vec<Timeslice>, UmlapseError> {
        timeline::build_timeslices(revisions, scope)
    }

    /// Render the timeslices as animation frames, one per timeslice.
    pub fn render_frames(&self, timeslices: &[Timeslice]) -> Vec<String> {
        let frames = animate(
            timeslices,
            self.config.style(),
            self.config.history().clean_frames(),
        );
        info!(frames = frames.len(); "Frames rendered successfully");
        frames
    }

    /// Generate the newest-first changelog of revisions `from..=to`.
    pub fn changelog(
        &self,
        timeslices: &[Timeslice],
        from: Option<usize>,
        to: Option<usize>,
    ) -> String {
        generate_log(timeslices, from, to)
    }

    /// List `(name, id)` of every diagram found in the revisions.
    pub fn diagrams(&self, revisions: &[TreeNode]) -> Vec<(String, String)> {
        timeline::list_diagrams(revisions)
    }
}
