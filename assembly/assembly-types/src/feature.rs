//! Typed mating interfaces owned by parts.
//!
//! A [`Feature`] is identified by its [`Category`] (the kind of connection,
//! e.g. a bolt joint) and its [`Role`] within that connection (e.g. male,
//! female, insert). Features are immutable; whether a feature has been mated
//! is tracked by the planner's state, never on the feature itself.

use std::fmt;

use crate::ids::{FeatureId, PartId};

/// The kind of connection a feature participates in.
///
/// # Example
///
/// ```
/// use assembly_types::Category;
///
/// let category = Category::new("A");
/// assert_eq!(category.as_str(), "A");
/// assert_eq!(Category::from("A"), category);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Category(String);

impl Category {
    /// Creates a category token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Category {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// The position a feature fills within its category's mating group.
///
/// # Example
///
/// ```
/// use assembly_types::Role;
///
/// let male = Role::new("m");
/// assert_eq!(male.to_string(), "m");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Role(String);

impl Role {
    /// Creates a role token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Role {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Role {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// A mating interface on a part.
///
/// Features are created by the [`Catalog`](crate::Catalog), which assigns the
/// id, the owning part and the index within that part.
///
/// # Example
///
/// ```
/// use assembly_types::Catalog;
///
/// let mut catalog = Catalog::new();
/// let latch = catalog.add_part("door-latch", [("A", "f"), ("B", "f")]).unwrap();
///
/// let feature = catalog.feature_at(latch, 1).unwrap();
/// assert_eq!(feature.category().as_str(), "B");
/// assert_eq!(feature.role().as_str(), "f");
/// assert_eq!(feature.part(), latch);
/// assert_eq!(feature.index_in_part(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Feature {
    id: FeatureId,
    category: Category,
    role: Role,
    part: PartId,
    index_in_part: usize,
}

impl Feature {
    pub(crate) const fn new(
        id: FeatureId,
        category: Category,
        role: Role,
        part: PartId,
        index_in_part: usize,
    ) -> Self {
        Self {
            id,
            category,
            role,
            part,
            index_in_part,
        }
    }

    /// Returns the feature id.
    #[must_use]
    pub const fn id(&self) -> FeatureId {
        self.id
    }

    /// Returns the connection category.
    #[must_use]
    pub const fn category(&self) -> &Category {
        &self.category
    }

    /// Returns the role within the category.
    #[must_use]
    pub const fn role(&self) -> &Role {
        &self.role
    }

    /// Returns the owning part.
    #[must_use]
    pub const fn part(&self) -> PartId {
        self.part
    }

    /// Returns the position of this feature within its part.
    #[must_use]
    pub const fn index_in_part(&self) -> usize {
        self.index_in_part
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.category, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_compare_by_text() {
        assert_eq!(Category::from("B"), Category::new(String::from("B")));
        assert!(Role::new("f") < Role::new("m"));
    }

    #[test]
    fn test_feature_display() {
        let feature = Feature::new(
            FeatureId::new(0),
            Category::new("D"),
            Role::new("i"),
            PartId::new(0),
            1,
        );
        assert_eq!(feature.to_string(), "D-i");
    }
}
