//! Dense integer identifiers for parts and features.
//!
//! Identifiers are assigned by the [`Catalog`](crate::Catalog) in insertion
//! order. Feature ids are global and allocated part by part, so comparing two
//! [`FeatureId`]s is the same as comparing `(part id, feature index)`.

use std::fmt;

/// Index of a part within a catalog.
///
/// # Example
///
/// ```
/// use assembly_types::PartId;
///
/// let id = PartId::new(3);
/// assert_eq!(id.index(), 3);
/// assert_eq!(id.to_string(), "P3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartId(u32);

impl PartId {
    /// Creates a part id from a raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index as `usize`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Global index of a feature within a catalog.
///
/// # Example
///
/// ```
/// use assembly_types::FeatureId;
///
/// let a = FeatureId::new(1);
/// let b = FeatureId::new(7);
/// assert!(a < b);
/// assert_eq!(b.index(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureId(u32);

impl FeatureId {
    /// Creates a feature id from a raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index as `usize`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}
