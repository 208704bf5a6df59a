//! Error adapter for converting UmlapseError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use umlapse::{StructuralError, UmlapseError};

/// Adapter rendering an [`UmlapseError`] as a miette diagnostic.
///
/// Model documents are JSON and carry no source spans worth labelling, so
/// every variant is reported with a stable code and an optional help line.
pub struct ErrorAdapter<'a>(pub &'a UmlapseError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            UmlapseError::Io(_) => "umlapse::io",
            UmlapseError::Parse { .. } => "umlapse::parse",
            UmlapseError::Structural { .. } => "umlapse::structural",
            UmlapseError::Config(_) => "umlapse::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            UmlapseError::Parse { .. } => {
                "every revision must be a StarUML model document (.mdj)"
            }
            UmlapseError::Structural {
                source: StructuralError::KindMismatch { .. },
                ..
            } => "an identifier may not change its element kind between revisions",
            UmlapseError::Structural { .. } => {
                "no frames were written; fix the revision and run again"
            }
            UmlapseError::Io(_) | UmlapseError::Config(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert an [`UmlapseError`] into a reportable diagnostic.
pub fn to_reportable(err: &UmlapseError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}
