use super::error::{ErrorKind, Result};
use exn::OptionExt;
use std::collections::HashMap;
use wallman_catalog::{Catalog, FranchiseId, StoredFile};
use wallman_codec::{edited_file_name, original_file_name};

/// Suffix of the temporary names used between the two rename phases.
pub const STAGED_SUFFIX: &str = ".reconcile";

/// One file rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub from: StoredFile,
    pub to: StoredFile,
}
impl Move {
    /// Where the file waits between the two phases: next to its source,
    /// `Zelda#3.png.reconcile`.
    pub fn staged(&self) -> StoredFile {
        let name = self.from.file_name().unwrap_or_default();
        self.from.with_file_name(format!("{name}{STAGED_SUFFIX}"))
    }
}

/// A wallpaper whose index changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renumber {
    /// Position in the (sorted) catalog.
    pub position: usize,
    /// Label before the change.
    pub label: String,
    pub index: u32,
    pub file: Move,
    /// `None` without an original, or when the original is shared with
    /// another wallpaper and has to stay where it is.
    pub original: Option<Move>,
}
impl Renumber {
    pub fn moves(&self) -> impl Iterator<Item = &Move> {
        std::iter::once(&self.file).chain(self.original.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Plan {
    pub renumbers: Vec<Renumber>,
    pub unchanged: usize,
}
impl Plan {
    pub fn moves(&self) -> impl Iterator<Item = &Move> {
        self.renumbers.iter().flat_map(Renumber::moves)
    }
}

/// Work out the renames that give every franchise the indexes `1..=n`, in
/// catalog order. The catalog has to be sorted already.
pub fn plan(catalog: &Catalog) -> Result<Plan> {
    let mut shared: HashMap<&StoredFile, usize> = HashMap::new();
    for original in catalog.wallpapers().iter().filter_map(|w| w.original.as_ref()) {
        *shared.entry(original).or_default() += 1;
    }

    let mut plan = Plan::default();
    let mut run: Option<(FranchiseId, u32)> = None;
    for (position, wallpaper) in catalog.wallpapers().iter().enumerate() {
        let index = match run {
            Some((franchise, last)) if franchise == wallpaper.franchise => last + 1,
            _ => 1,
        };
        run = Some((wallpaper.franchise, index));
        if wallpaper.index == index {
            plan.unchanged += 1;
            continue;
        }

        let (_, franchise) = catalog
            .names(wallpaper.franchise)
            .ok_or_raise(|| ErrorKind::Inconsistent(format!("unknown {}", wallpaper.franchise)))?;
        let file = wallpaper.file.with_file_name(edited_file_name(
            franchise,
            index,
            wallpaper.file.extension().unwrap_or_default(),
        ));
        let original = match &wallpaper.original {
            Some(original) if shared.get(original).is_some_and(|n| *n > 1) => {
                tracing::warn!(original = %original, "original is shared by several wallpapers, leaving it in place");
                None
            },
            Some(original) => Some(Move {
                from: original.clone(),
                to: original.with_file_name(original_file_name(
                    franchise,
                    index,
                    original.extension().unwrap_or_default(),
                )),
            }),
            None => None,
        };
        plan.renumbers.push(Renumber {
            position,
            label: catalog.label(wallpaper),
            index,
            file: Move { from: wallpaper.file.clone(), to: file },
            original,
        });
    }
    Ok(plan)
}
