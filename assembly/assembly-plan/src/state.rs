//! Immutable planning states.
//!
//! A [`State`] pairs the set of mated features with the history of actions
//! that produced it. States are values: [`State::apply`] derives a child and
//! leaves the parent untouched, so any number of branches can grow from the
//! same state. Histories share their common prefix through reference-counted
//! nodes, making a child cost one node plus a copy of the mated bit-vector.
//!
//! # Example
//!
//! ```
//! use assembly_plan::state::State;
//! use assembly_types::{Action, Catalog, Category};
//!
//! let mut catalog = Catalog::new();
//! let door = catalog.add_part("front-door", [("A", "m")]).unwrap();
//! let latch = catalog.add_part("door-latch", [("A", "f")]).unwrap();
//! let ids = [door, latch].map(|p| catalog.feature_at(p, 0).unwrap().id());
//!
//! let root = State::initial(&catalog);
//! let child = root.apply(&Action::new(Category::new("A"), ids)).unwrap();
//!
//! assert!(root.mated().is_empty());
//! assert_eq!(child.mated().len(), 2);
//! assert_eq!(child.depth(), 1);
//! ```

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use assembly_types::{
    Action, AssemblyError, AssemblyResult, Catalog, Feature, FeatureId, MatedSet, Plan,
};

#[derive(Debug)]
struct HistoryNode {
    action: Action,
    prev: Option<Arc<HistoryNode>>,
}

/// Persistent list of actions, newest last.
///
/// Cloning and extending are O(1); siblings share their common prefix.
#[derive(Debug, Clone, Default)]
pub struct History {
    head: Option<Arc<HistoryNode>>,
    len: usize,
}

impl History {
    /// Create an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Return a new history with `action` appended.
    #[must_use]
    pub fn push(&self, action: Action) -> Self {
        Self {
            head: Some(Arc::new(HistoryNode {
                action,
                prev: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Get the number of actions.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if the history is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the most recent action.
    #[must_use]
    pub fn last(&self) -> Option<&Action> {
        self.head.as_deref().map(|node| &node.action)
    }

    /// Copy the actions out in execution order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Action> {
        let mut actions = Vec::with_capacity(self.len);
        let mut node = self.head.as_deref();
        while let Some(current) = node {
            actions.push(current.action.clone());
            node = current.prev.as_deref();
        }
        actions.reverse();
        actions
    }
}

/// A snapshot of assembly progress.
///
/// Equality and hashing consider only the mated set; the history is
/// provenance, not identity.
#[derive(Debug, Clone)]
pub struct State {
    mated: MatedSet,
    history: History,
}

impl State {
    /// The fully disassembled state of `catalog`.
    #[must_use]
    pub fn initial(catalog: &Catalog) -> Self {
        Self::with_capacity(catalog.feature_count())
    }

    /// A fully disassembled state over `feature_count` features.
    #[must_use]
    pub fn with_capacity(feature_count: usize) -> Self {
        Self {
            mated: MatedSet::new(feature_count),
            history: History::new(),
        }
    }

    /// Get the mated features.
    #[must_use]
    pub const fn mated(&self) -> &MatedSet {
        &self.mated
    }

    /// Get the actions that produced this state.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Get the number of actions applied since the initial state.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.history.len()
    }

    /// Check whether a feature is mated.
    #[must_use]
    pub fn is_mated(&self, id: FeatureId) -> bool {
        self.mated.contains(id)
    }

    /// Iterate over the catalog features not yet mated, in id order.
    pub fn unmated<'a>(&'a self, catalog: &'a Catalog) -> impl Iterator<Item = &'a Feature> + 'a {
        catalog.features().filter(|f| !self.mated.contains(f.id()))
    }

    /// Derive the state reached by applying `action`.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::UnknownFeature`] if the action names a feature
    /// outside this state, and [`AssemblyError::FeatureAlreadyMated`] if it
    /// reuses a mated feature.
    pub fn apply(&self, action: &Action) -> AssemblyResult<Self> {
        for id in action.feature_ids() {
            if id.index() >= self.mated.capacity() {
                return Err(AssemblyError::UnknownFeature(*id));
            }
            if self.mated.contains(*id) {
                return Err(AssemblyError::FeatureAlreadyMated(*id));
            }
        }

        Ok(Self {
            mated: self.mated.with(action.feature_ids().iter().copied()),
            history: self.history.push(action.clone()),
        })
    }

    /// The plan that led to this state.
    #[must_use]
    pub fn to_plan(&self) -> Plan {
        Plan::new(self.history.to_vec())
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.mated == other.mated
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mated.hash(state);
    }
}
