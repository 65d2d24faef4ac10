use derive_more::Display;

/// Identity of a [`Type`](crate::Type) within one [`Catalog`](crate::Catalog).
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[display("type:{_0}")]
pub struct TypeId(pub(crate) u64);

/// Identity of a [`Franchise`](crate::Franchise) within one
/// [`Catalog`](crate::Catalog).
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[display("franchise:{_0}")]
pub struct FranchiseId(pub(crate) u64);
