//! Connector routing between generations

use crate::pedigree::{slot_count, SlotCoord};
use crate::registry::ParentRole;

use super::types::*;

/// Edge of a bounding box for connector attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
}

/// Get the attachment point on a bounding box edge
pub fn attachment_point(bounds: &BoundingBox, edge: Edge) -> Point {
    match edge {
        Edge::Left => Point::new(bounds.x, bounds.y + bounds.height / 2.0),
        Edge::Right => Point::new(bounds.right(), bounds.y + bounds.height / 2.0),
    }
}

/// Route an elbow from a child slot to a parent slot
///
/// Three segments: out of the child's right edge by `offset`, vertically to
/// the parent's centre line, then across into the parent's left edge.
pub fn route_elbow(child: &BoundingBox, parent: &BoundingBox, offset: f64) -> Vec<Point> {
    let start = attachment_point(child, Edge::Right);
    let end = attachment_point(parent, Edge::Left);
    let elbow_x = start.x + offset;

    vec![
        start,
        Point::new(elbow_x, start.y),
        Point::new(elbow_x, end.y),
        end,
    ]
}

/// Route every child-to-parent connector between adjacent generations
///
/// `slots[g - 1]` holds the rectangles of generation `g`. Connectors come out
/// ordered by child slot, sire before dam.
pub fn route_connectors(slots: &[Vec<BoundingBox>], offset: f64) -> Vec<Connector> {
    let mut connectors = Vec::new();

    for (g, pair) in slots.windows(2).enumerate() {
        let generation = (g + 1) as u8;
        let (children, parents) = (&pair[0], &pair[1]);
        debug_assert_eq!(children.len(), slot_count(generation));

        for (index, child_rect) in children.iter().enumerate() {
            let child = SlotCoord::new(generation, index);
            for role in [ParentRole::Sire, ParentRole::Dam] {
                let parent = child.parent(role);
                let Some(parent_rect) = parents.get(parent.index) else {
                    continue;
                };
                connectors.push(Connector {
                    child,
                    parent,
                    role,
                    path: route_elbow(child_rect, parent_rect, offset),
                });
            }
        }
    }

    connectors
}
