//! Error types for the slot geometry

use thiserror::Error;

/// Errors that can occur during geometry computation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Generation count outside the supported range
    #[error("generation count {count} is outside 1..=5")]
    InvalidGenerationCount { count: u8 },

    /// No ratio table entry for this generation count
    #[error("no column ratios configured for {count} generations")]
    MissingRatios { count: u8 },

    /// Ratio table entry with the wrong number of columns
    #[error("column ratios for {count} generations list {found} columns")]
    RatioCount { count: u8, found: usize },

    /// Zero, negative or non-finite column weight
    #[error("invalid column ratio {value} for {count} generations")]
    InvalidRatio { count: u8, value: f64 },

    /// Gutter or connector offset out of range
    #[error("invalid spacing: {reason}")]
    InvalidSpacing { reason: String },

    /// Content box that cannot hold the columns
    #[error("invalid content box: {reason}")]
    InvalidContentBox { reason: String },
}

impl LayoutError {
    /// Create an invalid spacing error
    pub fn invalid_spacing(reason: impl Into<String>) -> Self {
        Self::InvalidSpacing {
            reason: reason.into(),
        }
    }

    /// Create an invalid content box error
    pub fn invalid_content(reason: impl Into<String>) -> Self {
        Self::InvalidContentBox {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_count_display() {
        let err = LayoutError::RatioCount { count: 4, found: 3 };
        assert_eq!(err.to_string(), "column ratios for 4 generations list 3 columns");
    }

    #[test]
    fn test_content_box_display() {
        let err = LayoutError::invalid_content("zero height");
        assert!(err.to_string().contains("zero height"));
    }
}
