//! The [`Catalog`] aggregate.

use crate::error::{ErrorKind, Result};
use crate::models::{Franchise, FranchiseId, Type, TypeId, Wallpaper};
use crate::rollback::{Compensation, Rollback};
use exn::OptionExt;
use std::collections::{BTreeMap, HashMap};

fn require_name(kind: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        exn::bail!(ErrorKind::InvalidArgument(format!("{kind} name must not be blank")));
    }
    Ok(())
}

/// Owns every [`Type`], [`Franchise`] and [`Wallpaper`] of a collection.
///
/// Types and franchises are unique by exact, case-sensitive name and are
/// found through by-name indexes. Wallpapers are kept in a plain list; only
/// [`sort_wallpapers`](Self::sort_wallpapers) gives that list a meaning.
#[derive(Debug, Default)]
pub struct Catalog {
    next_id: u64,
    types: BTreeMap<TypeId, Type>,
    type_names: HashMap<String, TypeId>,
    franchises: BTreeMap<FranchiseId, Franchise>,
    franchise_names: HashMap<String, FranchiseId>,
    wallpapers: Vec<Wallpaper>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// Look a type up by name. Never creates.
    pub fn try_get_type(&self, name: &str) -> Result<Option<TypeId>> {
        require_name("type", name)?;
        Ok(self.type_names.get(name).copied())
    }

    /// Look a type up by name, creating it if it doesn't exist yet.
    pub fn get_or_create_type(&mut self, name: &str) -> Result<TypeId> {
        if let Some(id) = self.try_get_type(name)? {
            return Ok(id);
        }
        let id = TypeId(self.allocate());
        tracing::debug!(%id, name, "creating type");
        self.types.insert(id, Type { id, name: name.to_string() });
        self.type_names.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn get_type(&self, id: TypeId) -> Option<&Type> {
        self.types.get(&id)
    }

    /// All types, in creation order.
    pub fn types(&self) -> impl Iterator<Item = &Type> {
        self.types.values()
    }

    /// Remove a type. Franchises filed under it are left alone; roll those
    /// back first.
    pub fn remove_type(&mut self, id: TypeId) -> bool {
        let Some(removed) = self.types.remove(&id) else {
            return false;
        };
        tracing::debug!(%id, name = %removed.name, "removing type");
        self.type_names.remove(&removed.name);
        true
    }

    // =========================================================================
    // Franchises
    // =========================================================================

    /// Look a franchise up by name, across all types. Never creates.
    pub fn try_get_franchise(&self, name: &str) -> Result<Option<FranchiseId>> {
        require_name("franchise", name)?;
        Ok(self.franchise_names.get(name).copied())
    }

    /// Look a franchise up by name, creating it under `type_id` if it doesn't
    /// exist yet.
    ///
    /// Franchise names are unique across the whole catalog, so asking for an
    /// existing franchise under a different type is a
    /// [`TaxonomyConflict`](ErrorKind::TaxonomyConflict).
    pub fn get_or_create_franchise(&mut self, name: &str, type_id: TypeId) -> Result<FranchiseId> {
        let Some(requested) = self.types.get(&type_id).map(|t| t.name.clone()) else {
            exn::bail!(ErrorKind::InvalidArgument(format!("unknown {type_id}")));
        };
        if let Some(franchise) = self.try_get_franchise(name)?.and_then(|id| self.franchises.get(&id)) {
            if franchise.type_id != type_id {
                let existing = self.types.get(&franchise.type_id).map(|t| t.name.clone()).unwrap_or_default();
                exn::bail!(ErrorKind::TaxonomyConflict {
                    franchise: name.to_string(),
                    existing,
                    requested,
                });
            }
            return Ok(franchise.id);
        }
        let id = FranchiseId(self.allocate());
        tracing::debug!(%id, name, type_name = %requested, "creating franchise");
        self.franchises.insert(id, Franchise { id, name: name.to_string(), type_id });
        self.franchise_names.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn get_franchise(&self, id: FranchiseId) -> Option<&Franchise> {
        self.franchises.get(&id)
    }

    /// All franchises, in creation order.
    pub fn franchises(&self) -> impl Iterator<Item = &Franchise> {
        self.franchises.values()
    }

    /// The type a franchise is filed under.
    pub fn type_of(&self, franchise: FranchiseId) -> Option<&Type> {
        self.get_franchise(franchise).and_then(|f| self.get_type(f.type_id))
    }

    pub fn remove_franchise(&mut self, id: FranchiseId) -> bool {
        let Some(removed) = self.franchises.remove(&id) else {
            return false;
        };
        tracing::debug!(%id, name = %removed.name, "removing franchise");
        self.franchise_names.remove(&removed.name);
        true
    }

    /// Next free index of a franchise: highest index in use plus one, `1` for
    /// a franchise without wallpapers.
    ///
    /// # Errors
    /// [`IndexExhausted`](ErrorKind::IndexExhausted) once a wallpaper of the
    /// franchise already carries `u32::MAX`.
    pub fn next_index(&self, franchise: FranchiseId) -> Result<u32> {
        let highest = self.wallpapers_of(franchise).map(|w| w.index).max().unwrap_or(0);
        highest.checked_add(1).ok_or_raise(|| {
            ErrorKind::IndexExhausted(self.get_franchise(franchise).map(|f| f.name.clone()).unwrap_or_default())
        })
    }

    // =========================================================================
    // Wallpapers
    // =========================================================================

    /// Register a wallpaper, returning its position in the list.
    pub fn add_wallpaper(&mut self, wallpaper: Wallpaper) -> Result<usize> {
        if !self.franchises.contains_key(&wallpaper.franchise) {
            exn::bail!(ErrorKind::InvalidArgument(format!("unknown {}", wallpaper.franchise)));
        }
        tracing::debug!(wallpaper = %self.label(&wallpaper), file = %wallpaper.file, "adding wallpaper");
        self.wallpapers.push(wallpaper);
        Ok(self.wallpapers.len() - 1)
    }

    pub fn wallpapers(&self) -> &[Wallpaper] {
        &self.wallpapers
    }

    pub fn wallpaper_mut(&mut self, position: usize) -> Option<&mut Wallpaper> {
        self.wallpapers.get_mut(position)
    }

    /// Unregister a wallpaper. Positions after it shift down by one.
    pub fn remove_wallpaper(&mut self, position: usize) -> Option<Wallpaper> {
        (position < self.wallpapers.len()).then(|| self.wallpapers.remove(position))
    }

    /// Wallpapers of one franchise, in list order.
    pub fn wallpapers_of(&self, franchise: FranchiseId) -> impl Iterator<Item = &Wallpaper> {
        self.wallpapers.iter().filter(move |w| w.franchise == franchise)
    }

    /// Sort by type name, franchise name, index and finally file name.
    pub fn sort_wallpapers(&mut self) {
        let (types, franchises) = (&self.types, &self.franchises);
        let key = |w: &Wallpaper| {
            let franchise = franchises.get(&w.franchise);
            let type_name = franchise.and_then(|f| types.get(&f.type_id)).map(|t| t.name.clone());
            (type_name, franchise.map(|f| f.name.clone()), w.index, w.file.path.clone())
        };
        self.wallpapers.sort_by_cached_key(key);
    }

    /// Type and franchise name of a franchise, which is also the folder and
    /// file name prefix of its wallpapers.
    pub fn names(&self, franchise: FranchiseId) -> Option<(&str, &str)> {
        let franchise = self.get_franchise(franchise)?;
        let type_name = self.get_type(franchise.type_id)?;
        Some((type_name.name.as_str(), franchise.name.as_str()))
    }

    /// `Type/Franchise#Index`, the way wallpapers are presented to the user.
    pub fn label(&self, wallpaper: &Wallpaper) -> String {
        let (type_name, franchise) = self.names(wallpaper.franchise).unwrap_or(("?", "?"));
        format!("{type_name}/{franchise}#{}", wallpaper.index)
    }

    // =========================================================================
    // Bulk
    // =========================================================================

    /// Undo a failed build, newest compensation first. Compensations whose
    /// target is already gone are skipped.
    pub fn apply(&mut self, rollback: &Rollback) {
        for action in rollback.actions().iter().rev() {
            match *action {
                Compensation::RemoveType(id) => self.remove_type(id),
                Compensation::RemoveFranchise(id) => self.remove_franchise(id),
            };
        }
    }

    /// Forget everything, ahead of a full rescan.
    pub fn clear(&mut self) {
        self.types.clear();
        self.type_names.clear();
        self.franchises.clear();
        self.franchise_names.clear();
        self.wallpapers.clear();
    }
}
