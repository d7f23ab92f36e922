//! Ancestor tree materialization
//!
//! Walks sire/dam links from a subject through a [`Repository`] and fills an
//! [`AncestorGrid`] of fixed shape. Each build owns its own lookup cache and
//! path set, so concurrent builds against one repository never interact.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::PedigreeError;
use crate::log::{debug, warn};
use crate::registry::{Individual, IndividualId, LookupError, ParentRole, Repository};

use super::grid::{is_supported_depth, AncestorGrid, Slot, SlotCoord, MAX_GENERATIONS};

/// Configuration for one ancestor build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildConfig {
    /// Generations to materialize, the subject included (1 to 5)
    pub max_generations: u8,

    /// Ceiling on distinct ancestor lookups; the subject's lookup is exempt
    pub max_lookups: Option<usize>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_generations: MAX_GENERATIONS,
            max_lookups: None,
        }
    }
}

impl BuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of generations
    pub fn with_max_generations(mut self, generations: u8) -> Self {
        self.max_generations = generations;
        self
    }

    /// Set the lookup ceiling
    pub fn with_max_lookups(mut self, lookups: usize) -> Self {
        self.max_lookups = Some(lookups);
        self
    }
}

/// Something the builder worked around instead of failing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildDiagnostic {
    /// The ancestor at `at` already appears on the path to the subject
    CycleTruncated { at: SlotCoord, id: IndividualId },

    /// A recorded parent could not be fetched
    MissingParent {
        at: SlotCoord,
        id: IndividualId,
        reason: LookupError,
    },

    /// The lookup ceiling was reached before `id` could be fetched
    LookupBudgetExhausted { at: SlotCoord, id: IndividualId },
}

impl BuildDiagnostic {
    /// Slot the diagnostic refers to
    pub fn at(&self) -> SlotCoord {
        match self {
            Self::CycleTruncated { at, .. }
            | Self::MissingParent { at, .. }
            | Self::LookupBudgetExhausted { at, .. } => *at,
        }
    }
}

impl fmt::Display for BuildDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CycleTruncated { at, id } => {
                write!(f, "{at}: {id} is its own descendant, branch truncated")
            }
            Self::MissingParent { at, reason, .. } => write!(f, "{at}: {reason}"),
            Self::LookupBudgetExhausted { at, id } => {
                write!(f, "{at}: lookup limit reached before {id}")
            }
        }
    }
}

/// Builds fixed-depth ancestor grids from a repository
pub struct AncestorTreeBuilder<'r, R: Repository + ?Sized> {
    repo: &'r R,
    config: BuildConfig,
}

impl<'r, R: Repository + ?Sized> AncestorTreeBuilder<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        Self {
            repo,
            config: BuildConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Materialize the ancestry of `root`
    ///
    /// Fails only when the depth is unsupported or the subject itself cannot
    /// be fetched. Every other gap becomes an unknown slot.
    pub fn build(&self, root: IndividualId) -> Result<AncestorGrid, PedigreeError> {
        let max_generations = self.config.max_generations;
        if !is_supported_depth(max_generations) {
            return Err(PedigreeError::InvalidDepth {
                requested: max_generations,
            });
        }

        let subject = self
            .repo
            .lookup(root)
            .map_err(|reason| PedigreeError::InvalidRoot { id: root, reason })?;
        let subject = Arc::new(subject);

        debug!(root = root.get(), max_generations, "building ancestor grid");

        let mut ctx = BuildContext {
            repo: self.repo,
            max_generations,
            max_lookups: self.config.max_lookups,
            cache: HashMap::new(),
            path: Vec::with_capacity(usize::from(max_generations)),
            grid: AncestorGrid::new(subject.clone(), max_generations),
            lookups: 0,
        };
        ctx.cache.insert(root, Ok(subject.clone()));
        ctx.expand(SlotCoord::ROOT, &subject);

        let mut grid = ctx.grid;
        grid.lookups = ctx.lookups + 1;
        debug!(
            root = root.get(),
            known = grid.known_count(),
            lookups = grid.lookups,
            "ancestor grid built"
        );
        Ok(grid)
    }
}

/// Per-build traversal state
struct BuildContext<'r, R: Repository + ?Sized> {
    repo: &'r R,
    max_generations: u8,
    max_lookups: Option<usize>,
    /// Results by id, failures included, so no id is fetched twice
    cache: HashMap<IndividualId, Result<Arc<Individual>, LookupError>>,
    /// Ids from the subject down to the slot being expanded
    path: Vec<IndividualId>,
    grid: AncestorGrid,
    /// Ancestor lookups issued (the subject excluded)
    lookups: usize,
}

impl<R: Repository + ?Sized> BuildContext<'_, R> {
    fn expand(&mut self, coord: SlotCoord, individual: &Individual) {
        if coord.generation >= self.max_generations {
            return;
        }

        self.path.push(individual.id);
        for role in [ParentRole::Sire, ParentRole::Dam] {
            let at = coord.parent(role);
            let Some(parent_id) = individual.parent(role) else {
                continue;
            };

            if self.path.contains(&parent_id) {
                warn!(slot = %at, id = parent_id.get(), "parentage cycle truncated");
                self.grid
                    .diagnostics
                    .push(BuildDiagnostic::CycleTruncated { at, id: parent_id });
                continue;
            }

            if let Some(parent) = self.resolve(parent_id, at) {
                self.grid.set(at, Slot::Known(parent.clone()));
                self.expand(at, &parent);
            }
        }
        self.path.pop();
    }

    fn resolve(&mut self, id: IndividualId, at: SlotCoord) -> Option<Arc<Individual>> {
        if !self.cache.contains_key(&id) {
            if self.max_lookups.is_some_and(|max| self.lookups >= max) {
                self.grid
                    .diagnostics
                    .push(BuildDiagnostic::LookupBudgetExhausted { at, id });
                return None;
            }
            self.lookups += 1;
            let result = self.repo.lookup(id).map(Arc::new);
            self.cache.insert(id, result);
        }

        match self.cache.get(&id)? {
            Ok(individual) => Some(individual.clone()),
            Err(reason) => {
                debug!(slot = %at, id = id.get(), "parent lookup failed");
                self.grid.diagnostics.push(BuildDiagnostic::MissingParent {
                    at,
                    id,
                    reason: reason.clone(),
                });
                None
            }
        }
    }
}
