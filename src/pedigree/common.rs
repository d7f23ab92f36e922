//! Detection of ancestors that occur at more than one slot

use std::collections::HashMap;

use crate::registry::{IndividualId, ParentRole};

use super::grid::{AncestorGrid, SlotCoord};

/// One individual and every slot it occupies (at least two)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    pub id: IndividualId,
    /// Occurrences in `(generation, index)` order
    pub occurrences: Vec<SlotCoord>,
}

impl DuplicateGroup {
    pub fn first_occurrence(&self) -> Option<SlotCoord> {
        self.occurrences.first().copied()
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    /// Whether the ancestor is reached through both the sire and the dam
    pub fn spans_both_lines(&self) -> bool {
        let mut sire = false;
        let mut dam = false;
        for coord in &self.occurrences {
            match coord.lineage() {
                Some(ParentRole::Sire) => sire = true,
                Some(ParentRole::Dam) => dam = true,
                None => {}
            }
        }
        sire && dam
    }
}

/// Find individuals occurring at two or more ancestor slots.
///
/// The subject's own slot is never counted. Groups are ordered by their first
/// occurrence.
pub fn detect_common_ancestors(grid: &AncestorGrid) -> Vec<DuplicateGroup> {
    let mut order: Vec<IndividualId> = Vec::new();
    let mut occurrences: HashMap<IndividualId, Vec<SlotCoord>> = HashMap::new();

    for (coord, slot) in grid.iter() {
        if coord == SlotCoord::ROOT {
            continue;
        }
        let Some(id) = slot.id() else {
            continue;
        };
        occurrences
            .entry(id)
            .or_insert_with(|| {
                order.push(id);
                Vec::new()
            })
            .push(coord);
    }

    order
        .into_iter()
        .filter_map(|id| {
            let coords = occurrences.remove(&id)?;
            (coords.len() >= 2).then_some(DuplicateGroup {
                id,
                occurrences: coords,
            })
        })
        .collect()
}
