//! Candidate action generation.
//!
//! The [`Matcher`] finds every valid mating group that can be formed from the
//! unmated features of a state. For each category it draws one unmated feature
//! per required role, so features on the same part are eligible together and
//! no feature appears twice in a group. Enumerating per category yields the
//! same set as enumerating around each unmated anchor feature, with no
//! duplicates to filter.
//!
//! Candidates come back in canonical order: sorted by their sorted feature
//! ids, then by category.
//!
//! # Example
//!
//! ```
//! use assembly_plan::matcher::Matcher;
//! use assembly_types::{Catalog, MatedSet, Registry};
//!
//! let mut registry = Registry::new();
//! registry.add_rule("A", ["m", "f"]).unwrap();
//!
//! let mut catalog = Catalog::new();
//! catalog.add_part("front-door", [("A", "m")]).unwrap();
//! catalog.add_part("door-latch", [("A", "f")]).unwrap();
//! catalog.add_part("spare-latch", [("A", "f")]).unwrap();
//!
//! let matcher = Matcher::new(&catalog, &registry);
//! let candidates = matcher.candidates(&MatedSet::new(catalog.feature_count())).unwrap();
//! assert_eq!(candidates.len(), 2);  // door with either latch
//! ```

use assembly_types::{
    Action, AssemblyResult, Catalog, CompatibilityRule, Feature, MatedSet, Registry,
};
use tracing::debug;

use crate::state::State;

/// Features able to fill each role slot of one rule.
struct RuleSlots<'a> {
    rule: &'a CompatibilityRule,
    /// One pool per required role, in rule order; each pool in id order.
    pools: Vec<Vec<&'a Feature>>,
}

impl<'a> RuleSlots<'a> {
    fn build(catalog: &'a Catalog, rule: &'a CompatibilityRule) -> Option<Self> {
        let pools: Vec<Vec<&Feature>> = rule
            .required_roles()
            .iter()
            .map(|role| {
                catalog
                    .features_of_category(rule.category())
                    .filter(|f| f.role() == role)
                    .collect()
            })
            .collect();

        // A role nobody provides makes the whole rule unusable.
        if pools.iter().any(Vec::is_empty) {
            return None;
        }
        Some(Self { rule, pools })
    }

    fn unmated_pools(&self, mated: &MatedSet) -> Option<Vec<Vec<&'a Feature>>> {
        let pools: Vec<Vec<&Feature>> = self
            .pools
            .iter()
            .map(|pool| {
                pool.iter()
                    .copied()
                    .filter(|f| !mated.contains(f.id()))
                    .collect()
            })
            .collect();
        if pools.iter().any(Vec::is_empty) {
            None
        } else {
            Some(pools)
        }
    }

    fn is_open(&self, mated: &MatedSet) -> bool {
        self.pools
            .iter()
            .all(|pool| pool.iter().any(|f| !mated.contains(f.id())))
    }
}

/// Generator of candidate actions over a fixed catalog and registry.
///
/// Role pools are indexed once at construction; each call to
/// [`candidates`](Self::candidates) only filters them by the mated set.
pub struct Matcher<'a> {
    registry: &'a Registry,
    slots: Vec<RuleSlots<'a>>,
}

impl<'a> Matcher<'a> {
    /// Index `catalog` against the rules in `registry`.
    #[must_use]
    pub fn new(catalog: &'a Catalog, registry: &'a Registry) -> Self {
        let slots: Vec<RuleSlots<'a>> = registry
            .rules()
            .filter_map(|rule| RuleSlots::build(catalog, rule))
            .collect();

        debug!(
            rules = registry.len(),
            usable = slots.len(),
            features = catalog.feature_count(),
            "Indexed compatibility rules"
        );

        Self { registry, slots }
    }

    /// Returns the number of rules that can ever produce a group.
    #[must_use]
    pub fn usable_rule_count(&self) -> usize {
        self.slots.len()
    }

    /// Enumerate every valid group of unmated features, in canonical order.
    ///
    /// # Errors
    ///
    /// Returns an error if an enumerated group fails the registry check. This
    /// indicates an internal inconsistency and aborts the search.
    pub fn candidates(&self, mated: &MatedSet) -> AssemblyResult<Vec<Action>> {
        let mut actions = Vec::new();

        for slots in &self.slots {
            let Some(pools) = slots.unmated_pools(mated) else {
                continue;
            };
            for_each_group(&pools, |group| {
                self.registry.check_group(group)?;
                actions.push(Action::new(
                    slots.rule.category().clone(),
                    group.iter().map(|f| f.id()),
                ));
                Ok(())
            })?;
        }

        actions.sort();
        actions.dedup();
        Ok(actions)
    }

    /// Check whether any group can still be formed.
    ///
    /// Cheaper than [`candidates`](Self::candidates) when only terminality
    /// matters.
    #[must_use]
    pub fn has_candidates(&self, mated: &MatedSet) -> bool {
        self.slots.iter().any(|slots| slots.is_open(mated))
    }

    /// Apply every candidate of `state`, returning the children in candidate
    /// order.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`candidates`](Self::candidates) and
    /// [`State::apply`].
    pub fn successors(&self, state: &State) -> AssemblyResult<Vec<State>> {
        self.candidates(state.mated())?
            .iter()
            .map(|action| state.apply(action))
            .collect()
    }
}

/// Visit the cartesian product of `pools`, last slot varying fastest.
fn for_each_group<'f>(
    pools: &[Vec<&'f Feature>],
    mut visit: impl FnMut(&[&'f Feature]) -> AssemblyResult<()>,
) -> AssemblyResult<()> {
    if pools.is_empty() || pools.iter().any(Vec::is_empty) {
        return Ok(());
    }

    let mut cursor = vec![0usize; pools.len()];
    let mut group: Vec<&Feature> = Vec::with_capacity(pools.len());

    loop {
        group.clear();
        group.extend(cursor.iter().zip(pools).map(|(&i, pool)| pool[i]));
        visit(&group)?;

        let mut slot = pools.len();
        loop {
            if slot == 0 {
                return Ok(());
            }
            slot -= 1;
            cursor[slot] += 1;
            if cursor[slot] < pools[slot].len() {
                break;
            }
            cursor[slot] = 0;
        }
    }
}
