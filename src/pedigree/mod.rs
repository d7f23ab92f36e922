//! Ancestry resolution
//!
//! This module turns a subject id into a fixed-shape ancestor grid, finds the
//! ancestors that occur more than once, and gives each of them a highlight
//! token. Geometry lives in [`crate::layout`].

pub mod builder;
pub mod common;
pub mod grid;
pub mod highlight;

pub use builder::{AncestorTreeBuilder, BuildConfig, BuildDiagnostic};
pub use common::{detect_common_ancestors, DuplicateGroup};
pub use grid::{
    is_supported_depth, slot_count, AncestorGrid, Slot, SlotCoord, MAX_GENERATIONS,
    MIN_GENERATIONS,
};
pub use highlight::{
    assign_highlights, HighlightMap, HighlightToken, Palette, PaletteError, DEFAULT_PALETTE,
};
