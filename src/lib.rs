//! Pedigree Chart - ancestry resolution and layout for breeding records
//!
//! This library turns a subject's id into a fixed-depth ancestor grid, finds
//! ancestors that occur more than once, assigns each of them a highlight
//! token, and computes the slot rectangles and connectors a renderer needs.
//!
//! # Example
//!
//! ```rust
//! use pedigree_chart::{
//!     build_pedigree, BoundingBox, Individual, IndividualId, MemoryRepository, PedigreeConfig,
//! };
//!
//! let repo = MemoryRepository::from_individuals([
//!     Individual::new(1, "Subject").with_sire(2).with_dam(3),
//!     Individual::new(2, "Sire").with_sire(4),
//!     Individual::new(3, "Dam").with_sire(4),
//!     Individual::new(4, "Grandsire"),
//! ])
//! .unwrap();
//!
//! let content = BoundingBox::new(0.0, 0.0, 800.0, 600.0);
//! let config = PedigreeConfig::new().with_max_generations(3);
//! let result = build_pedigree(&repo, IndividualId(1), &content, &config).unwrap();
//!
//! assert_eq!(result.groups().len(), 1);
//! assert_eq!(result.groups()[0].id, IndividualId(4));
//! ```

pub mod error;
pub mod layout;
mod log;
pub mod pedigree;
pub mod registry;
pub mod report;
pub mod stylesheet;

pub use error::PedigreeError;
pub use layout::{compute_geometry, BoundingBox, GeometryConfig, LayoutError, SlotGeometry};
pub use pedigree::{
    AncestorGrid, AncestorTreeBuilder, BuildConfig, BuildDiagnostic, DuplicateGroup,
    HighlightMap, HighlightToken, Palette, Slot, SlotCoord,
};
pub use registry::{
    Individual, IndividualId, LookupError, MemoryRepository, ParentRole, Repository, Sex,
};
pub use stylesheet::Stylesheet;

use pedigree::{assign_highlights, detect_common_ancestors, is_supported_depth};

/// Configuration for the complete pedigree pipeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PedigreeConfig {
    /// Depth and lookup ceiling of the ancestor build
    pub build: BuildConfig,
    /// Highlight tokens for duplicate ancestors
    pub palette: Palette,
    /// Column ratios, gutter and connector offset
    pub geometry: GeometryConfig,
}

impl PedigreeConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the build configuration
    pub fn with_build(mut self, build: BuildConfig) -> Self {
        self.build = build;
        self
    }

    /// Set the number of generations, the subject included
    pub fn with_max_generations(mut self, generations: u8) -> Self {
        self.build.max_generations = generations;
        self
    }

    /// Set the lookup ceiling
    pub fn with_max_lookups(mut self, lookups: usize) -> Self {
        self.build.max_lookups = Some(lookups);
        self
    }

    /// Set the highlight palette
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set the geometry configuration
    pub fn with_geometry(mut self, geometry: GeometryConfig) -> Self {
        self.geometry = geometry;
        self
    }
}

/// Everything a renderer needs to draw one pedigree
#[derive(Debug, Clone, PartialEq)]
pub struct PedigreeResult {
    grid: AncestorGrid,
    groups: Vec<DuplicateGroup>,
    highlights: HighlightMap,
    geometry: SlotGeometry,
}

impl PedigreeResult {
    pub fn grid(&self) -> &AncestorGrid {
        &self.grid
    }

    /// Duplicate ancestors ordered by first occurrence
    pub fn groups(&self) -> &[DuplicateGroup] {
        &self.groups
    }

    pub fn highlights(&self) -> &HighlightMap {
        &self.highlights
    }

    /// Slot rectangles plus the connectors between known slots
    pub fn geometry(&self) -> &SlotGeometry {
        &self.geometry
    }

    /// Highlight token of the individual in a slot, if it is a duplicate
    pub fn highlight_at(&self, coord: SlotCoord) -> Option<&HighlightToken> {
        self.grid
            .slot(coord)
            .and_then(Slot::id)
            .and_then(|id| self.highlights.get(id))
    }

    pub fn diagnostics(&self) -> &[BuildDiagnostic] {
        self.grid.diagnostics()
    }
}

/// Build, analyse and lay out the pedigree of `root`
///
/// Configuration is validated before the repository is touched. Only an
/// unsupported depth, a rejected geometry or an unresolvable subject fail;
/// gaps above the subject come back as unknown slots.
pub fn build_pedigree<R: Repository + ?Sized>(
    repo: &R,
    root: IndividualId,
    content: &BoundingBox,
    config: &PedigreeConfig,
) -> Result<PedigreeResult, PedigreeError> {
    let generations = config.build.max_generations;
    if !is_supported_depth(generations) {
        return Err(PedigreeError::InvalidDepth {
            requested: generations,
        });
    }
    let mut geometry = compute_geometry(content, generations, &config.geometry)?;

    let grid = AncestorTreeBuilder::new(repo)
        .with_config(config.build)
        .build(root)?;
    let groups = detect_common_ancestors(&grid);
    let highlights = assign_highlights(&groups, &config.palette);
    geometry.retain_known(&grid);

    Ok(PedigreeResult {
        grid,
        groups,
        highlights,
        geometry,
    })
}
