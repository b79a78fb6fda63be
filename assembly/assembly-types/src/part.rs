//! Parts and the features they own.

use crate::feature::Feature;
use crate::ids::{FeatureId, PartId};

/// A single component of the product.
///
/// A part owns an ordered sequence of [`Feature`]s. The order only matters for
/// deterministic iteration; it carries no mating semantics.
///
/// # Example
///
/// ```
/// use assembly_types::Catalog;
///
/// let mut catalog = Catalog::new();
/// let id = catalog.add_part("front-door", [("A", "m"), ("B", "i"), ("C", "f")]).unwrap();
///
/// let part = catalog.part(id).unwrap();
/// assert_eq!(part.name(), "front-door");
/// assert_eq!(part.feature_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Part {
    id: PartId,
    name: String,
    features: Vec<Feature>,
}

impl Part {
    pub(crate) const fn new(id: PartId, name: String, features: Vec<Feature>) -> Self {
        Self { id, name, features }
    }

    /// Get the part id.
    #[must_use]
    pub const fn id(&self) -> PartId {
        self.id
    }

    /// Get the part name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the features in declaration order.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Get the feature at `index` within this part.
    #[must_use]
    pub fn feature(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }

    /// Get the number of features on this part.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Iterate over the ids of this part's features.
    pub fn feature_ids(&self) -> impl Iterator<Item = FeatureId> + '_ {
        self.features.iter().map(Feature::id)
    }
}
