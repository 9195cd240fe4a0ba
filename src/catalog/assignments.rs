//! Product Section Assignments
//!
//! An explicit assignment pins a product to specific sections and bypasses category
//! matching entirely. Products without one fall back to matching on their category.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    catalog::{SectionId, ShopSection},
    products::{Product, ProductId},
};

/// A sorted, duplicate-free set of section ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<SectionId>", into = "Vec<SectionId>")]
pub struct SectionIdSet {
    ids: SmallVec<[SectionId; 4]>,
}

impl SectionIdSet {
    /// Build a set from any iterator of ids.
    pub fn from_ids(ids: impl IntoIterator<Item = SectionId>) -> Self {
        let mut ids: SmallVec<[SectionId; 4]> = ids.into_iter().collect();

        ids.sort();
        ids.dedup();

        Self { ids }
    }

    /// Whether the set contains `id`.
    pub fn contains(&self, id: &SectionId) -> bool {
        self.ids.binary_search(id).is_ok()
    }

    /// Insert an id, returning whether it was newly added.
    pub fn insert(&mut self, id: SectionId) -> bool {
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(pos) => {
                self.ids.insert(pos, id);
                true
            }
        }
    }

    /// Remove an id, returning whether it was present.
    pub fn remove(&mut self, id: &SectionId) -> bool {
        if let Ok(pos) = self.ids.binary_search(id) {
            self.ids.remove(pos);
            true
        } else {
            false
        }
    }

    /// Iterate over the ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &SectionId> {
        self.ids.iter()
    }

    /// Number of ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<Vec<SectionId>> for SectionIdSet {
    fn from(ids: Vec<SectionId>) -> Self {
        Self::from_ids(ids)
    }
}

impl From<SectionIdSet> for Vec<SectionId> {
    fn from(set: SectionIdSet) -> Self {
        set.ids.into_vec()
    }
}

/// How a product relates to the shop sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SectionAssignment {
    /// No explicit assignment: match sections by category.
    #[default]
    Unassigned,

    /// Shown in exactly these sections, regardless of category.
    AssignedTo(SectionIdSet),
}

impl SectionAssignment {
    /// Build an assignment from a set of ids; an empty set means [`Self::Unassigned`].
    pub fn from_ids(ids: impl IntoIterator<Item = SectionId>) -> Self {
        let set = SectionIdSet::from_ids(ids);

        if set.is_empty() {
            Self::Unassigned
        } else {
            Self::AssignedTo(set)
        }
    }

    /// Whether `product`, carrying this assignment, belongs in `section`.
    pub fn places_in(&self, section: &ShopSection, product: &Product) -> bool {
        match self {
            Self::Unassigned => section.matches_category(&product.category),
            Self::AssignedTo(ids) => ids.contains(&section.id),
        }
    }

    /// Whether this is an explicit assignment.
    pub fn is_assigned(&self) -> bool {
        matches!(self, Self::AssignedTo(_))
    }
}

/// Explicit product to section assignments.
///
/// Only non-empty sets are stored; a missing record means [`SectionAssignment::Unassigned`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignments {
    by_product: FxHashMap<ProductId, SectionIdSet>,
}

impl Assignments {
    /// The assignment for `product`.
    pub fn get(&self, product: &ProductId) -> SectionAssignment {
        self.by_product
            .get(product)
            .map_or(SectionAssignment::Unassigned, |ids| {
                SectionAssignment::AssignedTo(ids.clone())
            })
    }

    /// Replace the assignment for `product`. Unassigning removes the record.
    pub fn set(&mut self, product: ProductId, assignment: SectionAssignment) {
        match assignment {
            SectionAssignment::Unassigned => {
                self.by_product.remove(&product);
            }
            SectionAssignment::AssignedTo(ids) if ids.is_empty() => {
                self.by_product.remove(&product);
            }
            SectionAssignment::AssignedTo(ids) => {
                self.by_product.insert(product, ids);
            }
        }
    }

    /// Remove `section` from every assignment, pruning records left empty.
    ///
    /// Returns the number of products whose assignment changed.
    pub fn remove_section(&mut self, section: &SectionId) -> usize {
        let mut changed = 0;

        self.by_product.retain(|_, ids| {
            if ids.remove(section) {
                changed += 1;
            }

            !ids.is_empty()
        });

        changed
    }

    /// Number of explicitly assigned products.
    pub fn len(&self) -> usize {
        self.by_product.len()
    }

    /// Whether no product is explicitly assigned.
    pub fn is_empty(&self) -> bool {
        self.by_product.is_empty()
    }

    /// Iterate over explicitly assigned products.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, &SectionIdSet)> {
        self.by_product.iter()
    }
}
