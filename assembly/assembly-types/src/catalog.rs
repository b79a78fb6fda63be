//! The part and feature catalog of a planning problem.
//!
//! The [`Catalog`] owns every [`Part`] and assigns dense ids. Part ids follow
//! insertion order; feature ids are global and allocated part by part, so the
//! natural order of [`FeatureId`] is the canonical `(part, feature index)`
//! order used for deterministic tie-breaking during search.

use hashbrown::HashMap;

use crate::error::{AssemblyError, AssemblyResult};
use crate::feature::{Category, Feature, Role};
use crate::ids::{FeatureId, PartId};
use crate::part::Part;

/// Read-only collection of parts and their features.
///
/// # Example
///
/// ```
/// use assembly_types::Catalog;
///
/// let mut catalog = Catalog::new();
/// let checker = catalog.add_part("door-checker", [("C", "m"), ("D", "i")]).unwrap();
/// let body = catalog.add_part("body", [("D", "f")]).unwrap();
///
/// assert_eq!(catalog.part_count(), 2);
/// assert_eq!(catalog.feature_count(), 3);
/// assert_eq!(catalog.part_by_name("body").map(|p| p.id()), Some(body));
///
/// // Feature ids are allocated part by part.
/// let d_f = catalog.feature_at(body, 0).unwrap();
/// assert!(catalog.feature_at(checker, 1).unwrap().id() < d_f.id());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    parts: Vec<Part>,
    /// Location of each feature, indexed by feature id.
    locations: Vec<(PartId, usize)>,
    names: HashMap<String, PartId>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a part with the given `(category, role)` features.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A part with the same name already exists
    /// - The catalog has run out of ids
    ///
    /// # Example
    ///
    /// ```
    /// use assembly_types::{AssemblyError, Catalog};
    ///
    /// let mut catalog = Catalog::new();
    /// catalog.add_part("bolt1", [("B", "m")]).unwrap();
    ///
    /// let result = catalog.add_part("bolt1", [("B", "m")]);
    /// assert!(matches!(result, Err(AssemblyError::DuplicatePart { .. })));
    /// ```
    pub fn add_part<I, C, R>(&mut self, name: impl Into<String>, features: I) -> AssemblyResult<PartId>
    where
        I: IntoIterator<Item = (C, R)>,
        C: Into<Category>,
        R: Into<Role>,
    {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(AssemblyError::DuplicatePart { name });
        }

        let part_id = PartId::new(
            u32::try_from(self.parts.len()).map_err(|_| AssemblyError::CapacityExceeded)?,
        );

        let mut owned = Vec::new();
        for (index, (category, role)) in features.into_iter().enumerate() {
            let raw = u32::try_from(self.locations.len() + owned.len())
                .map_err(|_| AssemblyError::CapacityExceeded)?;
            owned.push(Feature::new(
                FeatureId::new(raw),
                category.into(),
                role.into(),
                part_id,
                index,
            ));
        }

        self.locations
            .extend(owned.iter().map(|f| (part_id, f.index_in_part())));
        self.names.insert(name.clone(), part_id);
        self.parts.push(Part::new(part_id, name, owned));
        Ok(part_id)
    }

    /// Get a part by id.
    #[must_use]
    pub fn part(&self, id: PartId) -> Option<&Part> {
        self.parts.get(id.index())
    }

    /// Get a part by id, failing with [`AssemblyError::UnknownPart`].
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not belong to this catalog.
    pub fn try_part(&self, id: PartId) -> AssemblyResult<&Part> {
        self.part(id).ok_or(AssemblyError::UnknownPart(id))
    }

    /// Get a part by name.
    #[must_use]
    pub fn part_by_name(&self, name: &str) -> Option<&Part> {
        self.names.get(name).and_then(|id| self.part(*id))
    }

    /// Get a feature by id.
    #[must_use]
    pub fn feature(&self, id: FeatureId) -> Option<&Feature> {
        let (part, index) = *self.locations.get(id.index())?;
        self.part(part)?.feature(index)
    }

    /// Get a feature by id, failing with [`AssemblyError::UnknownFeature`].
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not belong to this catalog.
    pub fn try_feature(&self, id: FeatureId) -> AssemblyResult<&Feature> {
        self.feature(id).ok_or(AssemblyError::UnknownFeature(id))
    }

    /// Get the feature at `index` within `part`.
    #[must_use]
    pub fn feature_at(&self, part: PartId, index: usize) -> Option<&Feature> {
        self.part(part)?.feature(index)
    }

    /// Get the part owning a feature.
    #[must_use]
    pub fn owner_of(&self, id: FeatureId) -> Option<&Part> {
        let (part, _) = *self.locations.get(id.index())?;
        self.part(part)
    }

    /// Iterate over all parts in id order.
    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }

    /// Iterate over all features in id order.
    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.parts.iter().flat_map(Part::features)
    }

    /// Iterate over the features of one category in id order.
    pub fn features_of_category<'a>(
        &'a self,
        category: &'a Category,
    ) -> impl Iterator<Item = &'a Feature> + 'a {
        self.features().filter(move |f| f.category() == category)
    }

    /// Get the number of parts.
    #[must_use]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Get the total number of features.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.locations.len()
    }

    /// Check if the catalog has no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn door_parts() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .add_part("door-checker", [("C", "m"), ("D", "i")])
            .unwrap();
        catalog
            .add_part("door-latch", [("A", "f"), ("B", "f"), ("E", "m"), ("F", "m")])
            .unwrap();
        catalog
            .add_part("front-door", [("A", "m"), ("B", "i"), ("C", "f")])
            .unwrap();
        catalog
    }

    #[test]
    fn test_ids_are_dense_and_ordered() {
        let catalog = door_parts();
        assert_eq!(catalog.part_count(), 3);
        assert_eq!(catalog.feature_count(), 9);

        let ids: Vec<_> = catalog.features().map(Feature::id).collect();
        let expected: Vec<_> = (0..9).map(FeatureId::new).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_feature_lookup() {
        let catalog = door_parts();
        let latch = catalog.part_by_name("door-latch").unwrap();

        let e_m = catalog.feature_at(latch.id(), 2).unwrap();
        assert_eq!(e_m.category().as_str(), "E");
        assert_eq!(catalog.feature(e_m.id()), Some(e_m));
        assert_eq!(catalog.owner_of(e_m.id()).unwrap().name(), "door-latch");
    }

    #[test]
    fn test_unknown_ids() {
        let catalog = door_parts();
        assert!(catalog.feature(FeatureId::new(99)).is_none());
        assert!(catalog.part(PartId::new(7)).is_none());
        assert!(matches!(
            catalog.try_feature(FeatureId::new(99)),
            Err(AssemblyError::UnknownFeature(_))
        ));
        assert!(matches!(
            catalog.try_part(PartId::new(7)),
            Err(AssemblyError::UnknownPart(_))
        ));
    }

    #[test]
    fn test_features_of_category() {
        let catalog = door_parts();
        let category = Category::new("C");
        let roles: Vec<_> = catalog
            .features_of_category(&category)
            .map(|f| f.role().as_str())
            .collect();
        assert_eq!(roles, vec!["m", "f"]);
    }

    #[test]
    fn test_part_without_features() {
        let mut catalog = Catalog::new();
        let id = catalog
            .add_part("spacer", Vec::<(&str, &str)>::new())
            .unwrap();
        assert_eq!(catalog.part(id).unwrap().feature_count(), 0);
        assert_eq!(catalog.feature_count(), 0);
        assert!(!catalog.is_empty());
    }
}
