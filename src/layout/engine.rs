//! Slot geometry engine
//!
//! Divides a content box into one column per generation and each column into
//! equal-height bands, one per slot. Column widths follow the configured
//! weights after the gutters are taken out; with snapping on, boundaries are
//! rounded and the last column and the last band absorb the remainder so the
//! partition always covers the box exactly.

use crate::log::debug;
use crate::pedigree::{is_supported_depth, slot_count};

use super::config::GeometryConfig;
use super::error::LayoutError;
use super::routing::route_connectors;
use super::types::*;

/// Slack allowed when comparing summed extents against the content box
pub const GEOMETRY_TOLERANCE: f64 = 1e-6;

/// Compute columns, slot rectangles and every connector for a content box
///
/// Pure in its inputs: no lookups, and the result depends only on the box,
/// the generation count and the configuration.
pub fn compute_geometry(
    content: &BoundingBox,
    generation_count: u8,
    config: &GeometryConfig,
) -> Result<SlotGeometry, LayoutError> {
    if !is_supported_depth(generation_count) {
        return Err(LayoutError::InvalidGenerationCount {
            count: generation_count,
        });
    }
    validate_content(content)?;
    let ratios = config.ratios_for(generation_count)?;
    config.validate_spacing()?;

    let columns = layout_columns(content, ratios, config.column_gutter, config.snap_to_grid)?;
    let slots = columns
        .iter()
        .map(|column| {
            let bands = partition_bands(
                content.y,
                content.height,
                slot_count(column.generation),
                config.snap_to_grid,
            )?;
            Ok(bands
                .into_iter()
                .map(|(y, height)| BoundingBox::new(column.x, y, column.width, height))
                .collect())
        })
        .collect::<Result<Vec<Vec<BoundingBox>>, LayoutError>>()?;
    let connectors = route_connectors(&slots, config.connector_offset);

    debug!(
        generations = generation_count,
        width = content.width,
        height = content.height,
        connectors = connectors.len(),
        "slot geometry computed"
    );

    Ok(SlotGeometry {
        content: *content,
        columns,
        slots,
        connectors,
    })
}

fn validate_content(content: &BoundingBox) -> Result<(), LayoutError> {
    let values = [content.x, content.y, content.width, content.height];
    if values.iter().any(|v| !v.is_finite()) {
        return Err(LayoutError::invalid_content("coordinates must be finite"));
    }
    if content.width <= 0.0 || content.height <= 0.0 {
        return Err(LayoutError::invalid_content(format!(
            "{} x {} has no area",
            content.width, content.height
        )));
    }
    Ok(())
}

/// Split the content width into weighted columns separated by `gutter`
fn layout_columns(
    content: &BoundingBox,
    ratios: &[f64],
    gutter: f64,
    snap: bool,
) -> Result<Vec<Column>, LayoutError> {
    let count = ratios.len();
    let available = content.width - gutter * (count - 1) as f64;
    if available <= 0.0 {
        return Err(LayoutError::invalid_content(format!(
            "width {} leaves no room for {} columns with gutter {}",
            content.width, count, gutter
        )));
    }

    let total: f64 = ratios.iter().sum();
    let edges = cumulative_edges(ratios.iter().copied(), total, available, snap);

    let mut columns = Vec::with_capacity(count);
    for (i, pair) in edges.windows(2).enumerate() {
        let width = pair[1] - pair[0];
        if width <= 0.0 {
            return Err(LayoutError::invalid_content(format!(
                "column {} would be {} wide",
                i + 1,
                width
            )));
        }
        columns.push(Column {
            generation: (i + 1) as u8,
            x: content.x + pair[0] + gutter * i as f64,
            width,
        });
    }
    Ok(columns)
}

/// Split `height` starting at `top` into `count` equal bands as `(y, height)`
fn partition_bands(
    top: f64,
    height: f64,
    count: usize,
    snap: bool,
) -> Result<Vec<(f64, f64)>, LayoutError> {
    let edges = cumulative_edges(std::iter::repeat(1.0).take(count), count as f64, height, snap);
    edges
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let band = pair[1] - pair[0];
            if band <= 0.0 {
                return Err(LayoutError::invalid_content(format!(
                    "height {} leaves band {} of {} empty",
                    height,
                    i + 1,
                    count
                )));
            }
            Ok((top + pair[0], band))
        })
        .collect()
}

/// Offsets of `n + 1` boundaries dividing `extent` by `weights`
///
/// The final boundary is pinned to `extent` so rounding never loses or gains
/// space. Snapped boundaries never move backwards or past `extent`.
fn cumulative_edges(
    weights: impl Iterator<Item = f64>,
    total: f64,
    extent: f64,
    snap: bool,
) -> Vec<f64> {
    let mut edges = vec![0.0];
    let mut running = 0.0;
    for weight in weights {
        running += weight;
        let edge = extent * running / total;
        let edge = if snap {
            let previous = edges.last().copied().unwrap_or(0.0);
            edge.round().clamp(previous, extent)
        } else {
            edge
        };
        edges.push(edge);
    }
    if let Some(last) = edges.last_mut() {
        *last = extent;
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pedigree::SlotCoord;

    fn content() -> BoundingBox {
        BoundingBox::new(0.0, 0.0, 1000.0, 800.0)
    }

    #[test]
    fn test_single_generation_fills_box() {
        let geometry = compute_geometry(&content(), 1, &GeometryConfig::default()).unwrap();
        assert_eq!(geometry.columns.len(), 1);
        assert_eq!(geometry.slots[0], vec![content()]);
        assert!(geometry.connectors.is_empty());
    }

    #[test]
    fn test_four_generation_widths() {
        let config = GeometryConfig::default().with_column_gutter(0.0).with_connector_offset(0.0);
        let geometry = compute_geometry(&content(), 4, &config).unwrap();
        let widths: Vec<f64> = geometry.columns.iter().map(|c| c.width).collect();
        assert!((widths[0] - 280.0).abs() < GEOMETRY_TOLERANCE);
        assert!((widths[1] - 240.0).abs() < GEOMETRY_TOLERANCE);
        assert!((widths[3] - 240.0).abs() < GEOMETRY_TOLERANCE);
    }

    #[test]
    fn test_columns_and_gutters_cover_width() {
        for generations in 1..=5 {
            let geometry =
                compute_geometry(&content(), generations, &GeometryConfig::default()).unwrap();
            let total: f64 = geometry.columns.iter().map(|c| c.width).sum::<f64>()
                + 20.0 * (generations - 1) as f64;
            assert!((total - 1000.0).abs() < GEOMETRY_TOLERANCE);

            let last = geometry.columns.last().unwrap();
            assert!((last.right() - 1000.0).abs() < GEOMETRY_TOLERANCE);
        }
    }

    #[test]
    fn test_bands_cover_height() {
        let geometry = compute_geometry(&content(), 5, &GeometryConfig::default()).unwrap();
        for (g, slots) in geometry.slots.iter().enumerate() {
            assert_eq!(slots.len(), 1 << g);
            let total: f64 = slots.iter().map(|s| s.height).sum();
            assert!((total - 800.0).abs() < GEOMETRY_TOLERANCE);
            for pair in slots.windows(2) {
                assert!((pair[0].bottom() - pair[1].y).abs() < GEOMETRY_TOLERANCE);
            }
        }
    }

    #[test]
    fn test_snapped_partition_is_whole_and_exact() {
        let config = GeometryConfig::default()
            .with_column_gutter(1.0)
            .with_connector_offset(1.0)
            .with_snap_to_grid(true);
        let content = BoundingBox::new(0.0, 0.0, 517.0, 301.0);
        let geometry = compute_geometry(&content, 4, &config).unwrap();

        for column in &geometry.columns {
            assert_eq!(column.x.fract(), 0.0);
            assert_eq!(column.width.fract(), 0.0);
        }
        assert_eq!(geometry.columns.last().unwrap().right(), 517.0);

        let bands = &geometry.slots[3];
        assert_eq!(bands.iter().map(|b| b.height).sum::<f64>(), 301.0);
        assert!(bands.iter().all(|b| b.y.fract() == 0.0));
    }

    #[test]
    fn test_connectors_run_through_gutter() {
        let config = GeometryConfig::default();
        let geometry = compute_geometry(&content(), 3, &config).unwrap();
        assert_eq!(geometry.connectors.len(), 6);

        for connector in &geometry.connectors {
            let child = geometry.slot_rect(connector.child).unwrap();
            let parent = geometry.slot_rect(connector.parent).unwrap();
            let path = &connector.path;
            assert_eq!(path.len(), 4);
            assert_eq!(path[0].x, child.right());
            assert_eq!(path[1].x, child.right() + config.connector_offset);
            assert!((path[3].y - parent.center().y).abs() < GEOMETRY_TOLERANCE);
            assert_eq!(path[3].x, parent.x);
        }
        assert_eq!(geometry.connectors_from(SlotCoord::ROOT).count(), 2);
    }

    #[test]
    fn test_offset_content_box() {
        let content = BoundingBox::new(50.0, 40.0, 500.0, 400.0);
        let geometry = compute_geometry(&content, 2, &GeometryConfig::default()).unwrap();
        assert_eq!(geometry.columns[0].x, 50.0);
        assert_eq!(geometry.slots[1][0].y, 40.0);
        assert!((geometry.slots[1][1].bottom() - 440.0).abs() < GEOMETRY_TOLERANCE);
    }

    #[test]
    fn test_invalid_inputs() {
        let config = GeometryConfig::default();
        assert!(matches!(
            compute_geometry(&content(), 0, &config),
            Err(LayoutError::InvalidGenerationCount { count: 0 })
        ));
        assert!(matches!(
            compute_geometry(&content(), 6, &config),
            Err(LayoutError::InvalidGenerationCount { count: 6 })
        ));
        assert!(matches!(
            compute_geometry(&BoundingBox::new(0.0, 0.0, 0.0, 100.0), 3, &config),
            Err(LayoutError::InvalidContentBox { .. })
        ));
        assert!(matches!(
            compute_geometry(&BoundingBox::new(0.0, 0.0, 60.0, 100.0), 4, &config),
            Err(LayoutError::InvalidContentBox { .. })
        ));
    }

    #[test]
    fn test_deterministic() {
        let config = GeometryConfig::default();
        assert_eq!(
            compute_geometry(&content(), 5, &config),
            compute_geometry(&content(), 5, &config)
        );
    }
}
