//! Generation/slot addressing and the materialized ancestor grid

use std::fmt;
use std::sync::Arc;

use crate::registry::{Individual, IndividualId, ParentRole};

use super::builder::BuildDiagnostic;

/// Smallest supported generation count (the subject alone)
pub const MIN_GENERATIONS: u8 = 1;

/// Largest supported generation count
pub const MAX_GENERATIONS: u8 = 5;

/// Number of slots in a generation: `2^(generation - 1)`
pub fn slot_count(generation: u8) -> usize {
    debug_assert!(generation >= 1);
    1usize << (generation.saturating_sub(1))
}

/// Whether a generation count is inside the supported range
pub fn is_supported_depth(generations: u8) -> bool {
    (MIN_GENERATIONS..=MAX_GENERATIONS).contains(&generations)
}

/// An addressable position in the ancestor tree
///
/// Ordering is `(generation, index)` ascending. Generation 1 has the single
/// slot of the subject; the sire of `(g, s)` lives at `(g + 1, 2s)` and the dam
/// at `(g + 1, 2s + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotCoord {
    pub generation: u8,
    pub index: usize,
}

impl SlotCoord {
    /// The subject's slot
    pub const ROOT: SlotCoord = SlotCoord {
        generation: 1,
        index: 0,
    };

    pub fn new(generation: u8, index: usize) -> Self {
        Self { generation, index }
    }

    /// Slot of this slot's parent in the given role
    pub fn parent(self, role: ParentRole) -> SlotCoord {
        let offset = match role {
            ParentRole::Sire => 0,
            ParentRole::Dam => 1,
        };
        SlotCoord::new(self.generation + 1, self.index * 2 + offset)
    }

    /// `(sire, dam)` slots of this slot
    pub fn parents(self) -> (SlotCoord, SlotCoord) {
        (self.parent(ParentRole::Sire), self.parent(ParentRole::Dam))
    }

    /// The slot this one is a parent of, `None` for the root
    pub fn child(self) -> Option<SlotCoord> {
        if self.generation <= 1 {
            None
        } else {
            Some(SlotCoord::new(self.generation - 1, self.index / 2))
        }
    }

    /// Role this slot plays for its child, `None` for the root
    pub fn role(self) -> Option<ParentRole> {
        if self.generation <= 1 {
            None
        } else if self.index % 2 == 0 {
            Some(ParentRole::Sire)
        } else {
            Some(ParentRole::Dam)
        }
    }

    /// Which of the root's parents this slot descends through
    ///
    /// The upper half of every generation is the sire's line, the lower half
    /// the dam's. `None` for the root.
    pub fn lineage(self) -> Option<ParentRole> {
        if self.generation <= 1 {
            None
        } else if self.index < slot_count(self.generation) / 2 {
            Some(ParentRole::Sire)
        } else {
            Some(ParentRole::Dam)
        }
    }

    /// Whether this slot lies in the subtree rooted at `ancestor`
    pub fn descends_from(self, ancestor: SlotCoord) -> bool {
        if self.generation < ancestor.generation {
            return false;
        }
        let shift = u32::from(self.generation - ancestor.generation);
        self.index >> shift == ancestor.index
    }
}

impl fmt::Display for SlotCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.generation, self.index)
    }
}

/// Content of one slot
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Known(Arc<Individual>),
    /// Missing parent link, failed lookup, or truncated branch
    Unknown,
}

impl Slot {
    pub fn individual(&self) -> Option<&Individual> {
        match self {
            Slot::Known(individual) => Some(individual),
            Slot::Unknown => None,
        }
    }

    pub fn id(&self) -> Option<IndividualId> {
        self.individual().map(|i| i.id)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Slot::Known(_))
    }
}

/// The fixed-shape ancestor tree produced by one build
#[derive(Debug, Clone, PartialEq)]
pub struct AncestorGrid {
    root: Arc<Individual>,
    generations: Vec<Vec<Slot>>,
    pub(crate) diagnostics: Vec<BuildDiagnostic>,
    pub(crate) lookups: usize,
}

impl AncestorGrid {
    /// A grid of the given depth holding only the subject
    pub(crate) fn new(root: Arc<Individual>, max_generations: u8) -> Self {
        let mut generations: Vec<Vec<Slot>> = (1..=max_generations.max(MIN_GENERATIONS))
            .map(|g| vec![Slot::Unknown; slot_count(g)])
            .collect();
        generations[0][0] = Slot::Known(root.clone());
        Self {
            root,
            generations,
            diagnostics: Vec::new(),
            lookups: 0,
        }
    }

    pub(crate) fn set(&mut self, coord: SlotCoord, slot: Slot) {
        if coord == SlotCoord::ROOT {
            return;
        }
        if let Some(target) = self
            .generations
            .get_mut(usize::from(coord.generation).wrapping_sub(1))
            .and_then(|g| g.get_mut(coord.index))
        {
            *target = slot;
        }
    }

    /// Number of generations, the subject included
    pub fn max_generations(&self) -> u8 {
        self.generations.len() as u8
    }

    /// Slots of one generation (1-based), empty when out of range
    pub fn generation(&self, generation: u8) -> &[Slot] {
        usize::from(generation)
            .checked_sub(1)
            .and_then(|g| self.generations.get(g))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Slot at a coordinate, `None` when out of range
    pub fn slot(&self, coord: SlotCoord) -> Option<&Slot> {
        self.generation(coord.generation).get(coord.index)
    }

    /// The subject of the pedigree
    pub fn root(&self) -> &Individual {
        &self.root
    }

    /// Whether a coordinate holds a known individual
    pub fn is_known(&self, coord: SlotCoord) -> bool {
        self.slot(coord).is_some_and(Slot::is_known)
    }

    /// All slots in `(generation, index)` order
    pub fn iter(&self) -> impl Iterator<Item = (SlotCoord, &Slot)> {
        self.generations.iter().enumerate().flat_map(|(g, slots)| {
            slots
                .iter()
                .enumerate()
                .map(move |(i, slot)| (SlotCoord::new(g as u8 + 1, i), slot))
        })
    }

    /// Number of known slots, the root included
    pub fn known_count(&self) -> usize {
        self.iter().filter(|(_, slot)| slot.is_known()).count()
    }

    /// Non-fatal events recorded while building
    pub fn diagnostics(&self) -> &[BuildDiagnostic] {
        &self.diagnostics
    }

    /// Distinct repository lookups issued by the build
    pub fn lookups(&self) -> usize {
        self.lookups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_count() {
        assert_eq!(slot_count(1), 1);
        assert_eq!(slot_count(2), 2);
        assert_eq!(slot_count(5), 16);
    }

    #[test]
    fn test_parent_addressing() {
        let (sire, dam) = SlotCoord::ROOT.parents();
        assert_eq!(sire, SlotCoord::new(2, 0));
        assert_eq!(dam, SlotCoord::new(2, 1));

        let (sire, dam) = SlotCoord::new(3, 2).parents();
        assert_eq!(sire, SlotCoord::new(4, 4));
        assert_eq!(dam, SlotCoord::new(4, 5));
    }

    #[test]
    fn test_child_inverts_parent() {
        let coord = SlotCoord::new(3, 3);
        for role in [ParentRole::Sire, ParentRole::Dam] {
            let parent = coord.parent(role);
            assert_eq!(parent.child(), Some(coord));
            assert_eq!(parent.role(), Some(role));
        }
        assert_eq!(SlotCoord::ROOT.child(), None);
        assert_eq!(SlotCoord::ROOT.role(), None);
    }

    #[test]
    fn test_lineage() {
        assert_eq!(SlotCoord::new(2, 0).lineage(), Some(ParentRole::Sire));
        assert_eq!(SlotCoord::new(2, 1).lineage(), Some(ParentRole::Dam));
        assert_eq!(SlotCoord::new(4, 3).lineage(), Some(ParentRole::Sire));
        assert_eq!(SlotCoord::new(4, 4).lineage(), Some(ParentRole::Dam));
        assert_eq!(SlotCoord::ROOT.lineage(), None);
    }

    #[test]
    fn test_descends_from() {
        let dam = SlotCoord::new(2, 1);
        assert!(SlotCoord::new(5, 8).descends_from(dam));
        assert!(SlotCoord::new(5, 15).descends_from(dam));
        assert!(!SlotCoord::new(5, 7).descends_from(dam));
        assert!(!SlotCoord::ROOT.descends_from(dam));
        assert!(dam.descends_from(dam));
    }

    #[test]
    fn test_coord_ordering() {
        let mut coords = vec![
            SlotCoord::new(4, 0),
            SlotCoord::new(3, 3),
            SlotCoord::new(3, 0),
        ];
        coords.sort();
        assert_eq!(
            coords,
            vec![SlotCoord::new(3, 0), SlotCoord::new(3, 3), SlotCoord::new(4, 0)]
        );
    }

    fn subject() -> Arc<Individual> {
        Arc::new(Individual::new(1, "subject"))
    }

    #[test]
    fn test_new_grid_shape() {
        let grid = AncestorGrid::new(subject(), 5);
        assert_eq!(grid.max_generations(), 5);
        for g in 1..=5 {
            assert_eq!(grid.generation(g).len(), slot_count(g));
        }
        assert!(grid.generation(0).is_empty());
        assert!(grid.generation(6).is_empty());
        assert_eq!(grid.iter().count(), 31);
        assert_eq!(grid.known_count(), 1);
        assert_eq!(grid.root().name, "subject");
        assert_eq!(grid.slot(SlotCoord::ROOT).and_then(Slot::id), Some(IndividualId(1)));
    }

    #[test]
    fn test_set_ignores_out_of_range() {
        let mut grid = AncestorGrid::new(subject(), 2);
        grid.set(SlotCoord::new(3, 0), Slot::Known(Arc::new(Individual::new(2, "x"))));
        grid.set(SlotCoord::new(2, 5), Slot::Known(Arc::new(Individual::new(2, "x"))));
        grid.set(SlotCoord::ROOT, Slot::Unknown);
        assert_eq!(grid.known_count(), 1);
        assert!(grid.is_known(SlotCoord::ROOT));
    }
}
