//! Compensating actions for taxonomy nodes created by a build that didn't
//! finish.

use crate::models::{FranchiseId, TypeId};
use derive_more::Display;

/// One undo step against a [`Catalog`](crate::Catalog).
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Compensation {
    #[display("remove {_0}")]
    RemoveType(TypeId),
    #[display("remove {_0}")]
    RemoveFranchise(FranchiseId),
}

/// Ordered list of compensations, recorded as nodes get created.
///
/// [`Catalog::apply`](crate::Catalog::apply) undoes them newest first, so a
/// franchise always disappears before the type it was filed under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rollback {
    actions: Vec<Compensation>,
}
impl Rollback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Compensation) {
        self.actions.push(action);
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn actions(&self) -> &[Compensation] {
        &self.actions
    }
}
impl std::fmt::Display for Rollback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.actions.is_empty() {
            return f.write_str("nothing to roll back");
        }
        let actions: Vec<String> = self.actions.iter().map(ToString::to_string).collect();
        f.write_str(&actions.join(", "))
    }
}
