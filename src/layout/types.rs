//! Core types for the slot geometry

use crate::pedigree::{AncestorGrid, SlotCoord};
use crate::registry::ParentRole;

/// A 2D point in the coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Compute the union of two bounding boxes (smallest box containing both)
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }
}

/// Horizontal extent of one generation column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub generation: u8,
    pub x: f64,
    pub width: f64,
}

impl Column {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Polyline from a slot to one of its parents' slots
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub child: SlotCoord,
    pub parent: SlotCoord,
    pub role: ParentRole,
    /// Child's right edge, elbow out, bridge, into the parent's left edge
    pub path: Vec<Point>,
}

/// Columns, slot rectangles and connectors for one content box
#[derive(Debug, Clone, PartialEq)]
pub struct SlotGeometry {
    pub content: BoundingBox,
    pub columns: Vec<Column>,
    /// Slot rectangles per generation, generation 1 first
    pub slots: Vec<Vec<BoundingBox>>,
    pub connectors: Vec<Connector>,
}

impl SlotGeometry {
    pub fn generation_count(&self) -> u8 {
        self.columns.len() as u8
    }

    /// Column of a generation (1-based)
    pub fn column(&self, generation: u8) -> Option<&Column> {
        usize::from(generation)
            .checked_sub(1)
            .and_then(|g| self.columns.get(g))
    }

    /// Rectangle of a slot
    pub fn slot_rect(&self, coord: SlotCoord) -> Option<&BoundingBox> {
        usize::from(coord.generation)
            .checked_sub(1)
            .and_then(|g| self.slots.get(g))
            .and_then(|slots| slots.get(coord.index))
    }

    /// Connectors leaving a slot toward its parents
    pub fn connectors_from(&self, child: SlotCoord) -> impl Iterator<Item = &Connector> {
        self.connectors.iter().filter(move |c| c.child == child)
    }

    /// Drop connectors whose child or parent slot is unknown in `grid`
    ///
    /// Slot rectangles stay in place, so missing ancestors never reflow the
    /// chart.
    pub fn retain_known(&mut self, grid: &AncestorGrid) {
        self.connectors
            .retain(|c| grid.is_known(c.child) && grid.is_known(c.parent));
    }

    /// Smallest box containing every slot and connector
    pub fn bounds(&self) -> BoundingBox {
        let mut bounds: Option<BoundingBox> = None;
        let rects = self.slots.iter().flatten().copied();
        let points = self
            .connectors
            .iter()
            .flat_map(|c| c.path.iter())
            .map(|p| BoundingBox::new(p.x, p.y, 0.0, 0.0));
        for rect in rects.chain(points) {
            bounds = Some(match bounds {
                Some(b) => b.union(&rect),
                None => rect,
            });
        }
        bounds.unwrap_or(self.content)
    }
}
