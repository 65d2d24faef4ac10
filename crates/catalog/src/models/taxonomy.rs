use super::{FranchiseId, TypeId};

/// Top-level category, one folder per type in every collection root.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Type {
    pub id: TypeId,
    pub name: String,
}

/// Named sub-category owned by exactly one [`Type`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Franchise {
    pub id: FranchiseId,
    pub name: String,
    pub type_id: TypeId,
}
