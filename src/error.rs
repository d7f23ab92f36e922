//! Error types for the pedigree pipeline

use thiserror::Error;

use crate::layout::LayoutError;
use crate::registry::{IndividualId, LookupError};

/// Errors that abort a pedigree build
///
/// Anything wrong above the subject is reported as an unknown slot or a
/// [`BuildDiagnostic`](crate::pedigree::BuildDiagnostic) instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PedigreeError {
    /// The subject could not be fetched
    #[error("root individual {id} could not be resolved: {reason}")]
    InvalidRoot { id: IndividualId, reason: LookupError },

    /// Requested generation depth outside 1..=5
    #[error("generation depth {requested} is outside 1..=5")]
    InvalidDepth { requested: u8 },

    /// Geometry configuration or content box rejected
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

impl PedigreeError {
    /// Whether the error comes from the subject rather than configuration
    pub fn is_invalid_root(&self) -> bool {
        matches!(self, Self::InvalidRoot { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_root_display() {
        let err = PedigreeError::InvalidRoot {
            id: IndividualId(7),
            reason: LookupError::NotFound(IndividualId(7)),
        };
        assert!(err.is_invalid_root());
        assert!(err.to_string().starts_with("root individual #7 could not be resolved"));
    }

    #[test]
    fn test_layout_conversion() {
        let err: PedigreeError = LayoutError::InvalidGenerationCount { count: 9 }.into();
        assert!(matches!(err, PedigreeError::Layout(_)));
        assert!(!err.is_invalid_root());
    }
}
