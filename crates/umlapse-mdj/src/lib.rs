//! StarUML model document loader.
//!
//! Turns the JSON of a `.mdj` model document into the [`TreeNode`] revision
//! tree consumed by the Umlapse diff engine. The loader is purely
//! in-memory: callers read the file and pass its contents.
//!
//! # Example
//!
//! ```
//! let source = r#"{
//!     "_id": "project",
//!     "_type": "Project",
//!     "name": "Shop",
//!     "ownedElements": [
//!         { "_id": "model", "_type": "UMLModel", "name": "Model" }
//!     ]
//! }"#;
//!
//! let tree = umlapse_mdj::parse(source).unwrap();
//! assert_eq!(tree.name(), "Shop");
//! assert_eq!(tree.owned_elements().len(), 1);
//! ```

mod document;
mod error;

use log::debug;
use umlapse_core::tree::TreeNode;

pub use error::ParseError;

use document::RawNode;

/// Parses one model document into its revision tree.
///
/// # Errors
///
/// Returns [`ParseError::Json`] when the source is not a JSON object tree of
/// the expected shape, and [`ParseError::InvalidAggregation`] when an
/// association end carries an unknown aggregation kind.
pub fn parse(source: &str) -> Result<TreeNode, ParseError> {
    let raw: RawNode = serde_json::from_str(source)?;
    let tree = raw.into_tree()?;
    debug!(id = tree.id(), kind = tree.kind(); "Model document parsed");
    Ok(tree)
}
