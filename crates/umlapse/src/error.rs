//! Error types for Umlapse operations.
//!
//! [`UmlapseError`] is the facade error returned by [`HistoryBuilder`]
//! methods. [`StructuralError`] describes a revision tree that does not have
//! the shape the timeslice builder expects.
//!
//! [`HistoryBuilder`]: crate::HistoryBuilder

use std::io;

use thiserror::Error;

use umlapse_core::drawable::ElementKind;
use umlapse_mdj::ParseError;

/// A revision tree that cannot be turned into drawables.
///
/// Any structural error aborts timeslice building for the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("element `{id}` references `{target}`, which does not exist")]
    UnresolvedReference { id: String, target: String },

    #[error("element `{id}` has no `{field}` reference")]
    MissingReference { id: String, field: &'static str },

    #[error("view `{id}` has no `{kind}` subview")]
    MissingSubview { id: String, kind: &'static str },

    #[error("element `{id}` was a {previous} and is now a {current}")]
    KindMismatch {
        id: String,
        previous: ElementKind,
        current: ElementKind,
    },
}

/// The main error type for Umlapse operations.
#[derive(Debug, Error)]
pub enum UmlapseError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A revision document could not be parsed. `revision` is 1-based.
    #[error("revision {revision}: {err}")]
    Parse { revision: usize, err: ParseError },

    /// A revision tree is malformed. `revision` is 1-based.
    #[error("revision {revision}: {source}")]
    Structural {
        revision: usize,
        #[source]
        source: StructuralError,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl UmlapseError {
    /// Create a new `Parse` error for the given 1-based revision number.
    pub fn new_parse_error(revision: usize, err: ParseError) -> Self {
        Self::Parse { revision, err }
    }

    /// Create a new `Structural` error for the given 1-based revision number.
    pub fn new_structural_error(revision: usize, source: StructuralError) -> Self {
        Self::Structural { revision, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_error_display() {
        let err = UmlapseError::new_structural_error(
            2,
            StructuralError::MissingSubview {
                id: "view1".to_string(),
                kind: "UMLOperationCompartmentView",
            },
        );
        assert_eq!(
            err.to_string(),
            "revision 2: view `view1` has no `UMLOperationCompartmentView` subview"
        );
    }

    #[test]
    fn test_kind_mismatch_display() {
        let err = StructuralError::KindMismatch {
            id: "x".to_string(),
            previous: ElementKind::Class,
            current: ElementKind::UseCase,
        };
        assert_eq!(err.to_string(), "element `x` was a class and is now a use-case");
    }
}
