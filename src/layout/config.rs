//! Configuration for the slot geometry

use std::collections::BTreeMap;

use super::error::LayoutError;

/// Configuration options for slot geometry
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryConfig {
    /// Column weights keyed by generation count, one weight per column
    pub column_ratios: BTreeMap<u8, Vec<f64>>,

    /// Horizontal space between adjacent columns
    pub column_gutter: f64,

    /// How far a connector runs right of the child before turning
    pub connector_offset: f64,

    /// Round column and band boundaries to whole units
    pub snap_to_grid: bool,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        let mut column_ratios = BTreeMap::new();
        column_ratios.insert(1, vec![1.0]);
        column_ratios.insert(2, vec![1.0, 1.0]);
        column_ratios.insert(3, vec![1.0, 1.0, 1.0]);
        column_ratios.insert(4, vec![28.0, 24.0, 24.0, 24.0]);
        column_ratios.insert(5, vec![1.0, 1.0, 1.0, 1.0, 1.0]);
        Self {
            column_ratios,
            column_gutter: 20.0,
            connector_offset: 10.0,
            snap_to_grid: false,
        }
    }
}

impl GeometryConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column weights used for a generation count
    pub fn with_ratios(mut self, generation_count: u8, ratios: Vec<f64>) -> Self {
        self.column_ratios.insert(generation_count, ratios);
        self
    }

    /// Set the gutter between columns
    pub fn with_column_gutter(mut self, gutter: f64) -> Self {
        self.column_gutter = gutter;
        self
    }

    /// Set the connector elbow offset
    pub fn with_connector_offset(mut self, offset: f64) -> Self {
        self.connector_offset = offset;
        self
    }

    /// Enable or disable snapping boundaries to whole units
    pub fn with_snap_to_grid(mut self, snap: bool) -> Self {
        self.snap_to_grid = snap;
        self
    }

    /// Validated column weights for a generation count
    pub fn ratios_for(&self, generation_count: u8) -> Result<&[f64], LayoutError> {
        let ratios = self
            .column_ratios
            .get(&generation_count)
            .ok_or(LayoutError::MissingRatios {
                count: generation_count,
            })?;
        if ratios.len() != usize::from(generation_count) {
            return Err(LayoutError::RatioCount {
                count: generation_count,
                found: ratios.len(),
            });
        }
        if let Some(&bad) = ratios.iter().find(|r| !r.is_finite() || **r <= 0.0) {
            return Err(LayoutError::InvalidRatio {
                count: generation_count,
                value: bad,
            });
        }
        Ok(ratios)
    }

    /// Check gutter and connector offset
    ///
    /// The connector turns inside the gutter, so the offset may not exceed it.
    pub fn validate_spacing(&self) -> Result<(), LayoutError> {
        if !self.column_gutter.is_finite() || self.column_gutter < 0.0 {
            return Err(LayoutError::invalid_spacing(format!(
                "column gutter must be a non-negative number, got {}",
                self.column_gutter
            )));
        }
        if !self.connector_offset.is_finite()
            || self.connector_offset < 0.0
            || self.connector_offset > self.column_gutter
        {
            return Err(LayoutError::invalid_spacing(format!(
                "connector offset {} must lie within the column gutter {}",
                self.connector_offset, self.column_gutter
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeometryConfig::default();
        assert_eq!(config.column_ratios.len(), 5);
        assert_eq!(config.ratios_for(4).unwrap(), &[28.0, 24.0, 24.0, 24.0]);
        assert_eq!(config.column_gutter, 20.0);
        assert_eq!(config.connector_offset, 10.0);
        assert!(!config.snap_to_grid);
        assert!(config.validate_spacing().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GeometryConfig::new()
            .with_ratios(3, vec![2.0, 1.0, 1.0])
            .with_column_gutter(8.0)
            .with_connector_offset(4.0)
            .with_snap_to_grid(true);

        assert_eq!(config.ratios_for(3).unwrap(), &[2.0, 1.0, 1.0]);
        assert_eq!(config.column_gutter, 8.0);
        assert_eq!(config.connector_offset, 4.0);
        assert!(config.snap_to_grid);
    }

    #[test]
    fn test_missing_ratios() {
        let mut config = GeometryConfig::default();
        config.column_ratios.remove(&5);
        assert!(matches!(
            config.ratios_for(5),
            Err(LayoutError::MissingRatios { count: 5 })
        ));
    }

    #[test]
    fn test_wrong_ratio_count() {
        let config = GeometryConfig::default().with_ratios(3, vec![1.0, 1.0]);
        assert!(matches!(
            config.ratios_for(3),
            Err(LayoutError::RatioCount { count: 3, found: 2 })
        ));
    }

    #[test]
    fn test_non_positive_ratio() {
        let config = GeometryConfig::default().with_ratios(2, vec![1.0, 0.0]);
        assert!(matches!(config.ratios_for(2), Err(LayoutError::InvalidRatio { .. })));
        let config = GeometryConfig::default().with_ratios(2, vec![f64::NAN, 1.0]);
        assert!(matches!(config.ratios_for(2), Err(LayoutError::InvalidRatio { .. })));
    }

    #[test]
    fn test_offset_outside_gutter() {
        let config = GeometryConfig::default()
            .with_column_gutter(5.0)
            .with_connector_offset(6.0);
        assert!(config.validate_spacing().is_err());
        let config = GeometryConfig::default().with_column_gutter(-1.0);
        assert!(config.validate_spacing().is_err());
    }
}
