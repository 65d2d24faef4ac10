//! Turning a file into a cataloged [`Wallpaper`].
//!
//! [`build`] runs one algorithm for every [`Mode`]; the mode only picks a
//! [`Policy`]:
//!
//! | Mode               | File name              | New type/franchise | Index          | Original looked up in |
//! |--------------------|------------------------|--------------------|----------------|-----------------------|
//! | [`Mode::Scan`]     | strict `F#N`           | created silently   | from the name  | `originals/<Type>/`   |
//! | [`Mode::New`]      | loose, at most one `#` | asks first         | next free      | the file's folder     |
//! | [`Mode::NewInSubFolder`] | `_cut`/`_new` suffix | asks first     | next free      | the file's folder     |
//!
//! A build that fails after creating a type or franchise removes them again
//! before returning, so a failed attempt never leaves taxonomy behind.

pub mod error;
mod policy;

pub use self::policy::{Lookup, Mode, Naming, Policy};
use crate::context::Context;
use crate::files;
use crate::prompt::Confirm;
use crate::resolve::resolve_original;
use self::error::{ErrorKind, Result};
use exn::ResultExt;
use std::path::{Path, PathBuf};
use wallman_catalog::{Catalog, Compensation, FranchiseId, Rollback, Root, StoredFile, TypeId, Wallpaper};
use wallman_codec::{EditedName, GroupedName, LooseName, is_original};
use wallman_storage::ancestor_name;

/// What a file name and its location say about the wallpaper.
#[derive(Debug)]
struct Identity {
    type_name: String,
    franchise: String,
    /// Only strict names carry the final index.
    index: Option<u32>,
    /// Root and directory to look for the original in.
    lookup_root: Root,
    lookup_dir: PathBuf,
    candidates: Vec<String>,
}

fn folder_name(path: &Path, levels: usize, what: &str) -> Result<String> {
    let name = ancestor_name(path, levels)
        .or_raise(|| ErrorKind::InvalidArgument(format!("{} is not inside a {what} folder", path.display())))?;
    Ok(name.to_string())
}

fn identity(stored: &StoredFile, file_name: &str, policy: &Policy) -> Result<Identity> {
    let file = stored.path.as_path();
    let own_dir = file.parent().map(Path::to_path_buf).unwrap_or_default();
    let (type_name, franchise, index, candidates) = match policy.naming {
        Naming::Strict => {
            if is_original(file_name) {
                exn::bail!(ErrorKind::InvalidArgument(format!("{file_name} is an original file")));
            }
            let name = EditedName::parse(file_name).map_err(ErrorKind::codec)?;
            let candidates = name.original_candidates();
            (folder_name(file, 1, "type")?, name.franchise, Some(name.index), candidates)
        },
        Naming::Loose => {
            let name = LooseName::parse(file_name).map_err(ErrorKind::codec)?;
            let candidates = name.original_candidates();
            (folder_name(file, 1, "type")?, name.franchise, None, candidates)
        },
        Naming::Grouped => {
            let Some(name) = GroupedName::parse(file_name) else {
                exn::bail!(ErrorKind::Format(format!("'{file_name}' carries no _cut/_new edit suffix")));
            };
            (folder_name(file, 2, "type")?, folder_name(file, 1, "franchise")?, None, name.original_candidates())
        },
    };
    let (lookup_root, lookup_dir) = match policy.lookup {
        Lookup::OriginalsByType => (Root::Originals, PathBuf::from(&type_name)),
        Lookup::OwnDirectory => (stored.root, own_dir),
    };
    Ok(Identity { type_name, franchise, index, lookup_root, lookup_dir, candidates })
}

/// Build a wallpaper from `file` and register it in the catalog.
///
/// Returns the wallpaper's position in [`Catalog::wallpapers`].
///
/// `file` is checked for existence and image-ness first; a `.jpeg` extension
/// gets normalized on disk along the way. With [`Lookup::OwnDirectory`] the
/// original is searched next to the file, in the file's own root.
///
/// # Errors
/// Any failure after a type or franchise was created removes them from the
/// catalog again. When the user declines a confirmation the error is
/// [`ErrorKind::UserAborted`], carrying the compensations that were applied.
pub fn build(
    ctx: &Context,
    catalog: &mut Catalog,
    confirm: &mut dyn Confirm,
    file: &StoredFile,
    policy: &Policy,
) -> Result<usize> {
    build_with_rollback(ctx, catalog, confirm, file, policy).map(|(position, _)| position)
}

/// [`build`], also returning the compensations that remove the taxonomy this
/// build created. Callers that can still back out after the wallpaper is
/// registered apply them together with removing the wallpaper.
#[tracing::instrument(level = "debug", skip_all, fields(file = %file))]
pub fn build_with_rollback(
    ctx: &Context,
    catalog: &mut Catalog,
    confirm: &mut dyn Confirm,
    file: &StoredFile,
    policy: &Policy,
) -> Result<(usize, Rollback)> {
    let backend = ctx.backend(file.root).or_raise(|| ErrorKind::Io)?;
    if !backend.exists(&file.path).or_raise(|| ErrorKind::Io)? {
        exn::bail!(ErrorKind::FileNotFound(file.path.clone()));
    }
    let Some(image) = files::classify(backend.as_ref(), &file.path).or_raise(|| ErrorKind::Io)? else {
        exn::bail!(ErrorKind::NotAnImage(file.path.clone()));
    };
    let file = StoredFile::new(file.root, image.path);
    let file_name = file.file_name().ok_or_else(|| ErrorKind::InvalidArgument(file.to_string()))?.to_string();
    let identity = identity(&file, &file_name, policy)?;

    let mut rollback = Rollback::new();
    match register(ctx, catalog, confirm, &file, &file_name, identity, policy, &mut rollback) {
        Ok(position) => Ok((position, rollback)),
        Err(err) => {
            if !rollback.is_empty() {
                tracing::debug!(%rollback, "rolling back taxonomy created by failed build");
                catalog.apply(&rollback);
            }
            Err(err)
        },
    }
}

/// Steps that may create taxonomy; every creation is recorded in `rollback`.
#[allow(clippy::too_many_arguments)]
fn register(
    ctx: &Context,
    catalog: &mut Catalog,
    confirm: &mut dyn Confirm,
    file: &StoredFile,
    file_name: &str,
    identity: Identity,
    policy: &Policy,
    rollback: &mut Rollback,
) -> Result<usize> {
    let type_id = resolve_type(catalog, confirm, &identity.type_name, policy, rollback)?;
    let franchise = resolve_franchise(catalog, confirm, &identity.franchise, type_id, policy, rollback)?;
    let index = match identity.index {
        Some(index) => index,
        None => catalog.next_index(franchise).map_err(ErrorKind::catalog)?,
    };

    let lookup = ctx.backend(identity.lookup_root).or_raise(|| ErrorKind::Io)?;
    let lookup_exists = lookup.is_dir(&identity.lookup_dir).or_raise(|| ErrorKind::Io)?;
    if !lookup_exists && policy.lookup == Lookup::OwnDirectory {
        exn::bail!(ErrorKind::DirectoryNotFound(identity.lookup_dir));
    }
    let original = match lookup_exists {
        true => resolve_original(lookup.as_ref(), &identity.lookup_dir, &identity.candidates)
            .or_raise(|| ErrorKind::Io)?
            .map(|path| StoredFile::new(identity.lookup_root, path)),
        false => None,
    };
    if original.is_none() {
        if !policy.ignore_missing
            && !confirm.confirm(&format!("Original file for {file_name} not found. Is this intentional?"))
        {
            exn::bail!(ErrorKind::UserAborted {
                reason: format!("original file for {file_name} not found"),
                rollback: rollback.clone(),
            });
        }
        tracing::info!(file = %file, "accepting wallpaper without an original");
    }

    let wallpaper = Wallpaper::new(file.clone(), original, franchise, index);
    catalog.add_wallpaper(wallpaper).map_err(ErrorKind::catalog)
}

fn resolve_type(
    catalog: &mut Catalog,
    confirm: &mut dyn Confirm,
    name: &str,
    policy: &Policy,
    rollback: &mut Rollback,
) -> Result<TypeId> {
    if let Some(id) = catalog.try_get_type(name).map_err(ErrorKind::catalog)? {
        return Ok(id);
    }
    if policy.confirm_creation
        && !confirm.confirm(&format!("The wallpaper type '{name}' does not exist. Do you want to create it?"))
    {
        exn::bail!(ErrorKind::UserAborted {
            reason: format!("type '{name}' not created"),
            rollback: rollback.clone(),
        });
    }
    let id = catalog.get_or_create_type(name).map_err(ErrorKind::catalog)?;
    rollback.push(Compensation::RemoveType(id));
    Ok(id)
}

fn resolve_franchise(
    catalog: &mut Catalog,
    confirm: &mut dyn Confirm,
    name: &str,
    type_id: TypeId,
    policy: &Policy,
    rollback: &mut Rollback,
) -> Result<FranchiseId> {
    if catalog.try_get_franchise(name).map_err(ErrorKind::catalog)?.is_some() {
        // Existing franchise, only its type has to match.
        return catalog.get_or_create_franchise(name, type_id).map_err(ErrorKind::catalog);
    }
    if policy.confirm_creation
        && !confirm.confirm(&format!("The wallpaper franchise '{name}' does not exist. Do you want to create it?"))
    {
        exn::bail!(ErrorKind::UserAborted {
            reason: format!("franchise '{name}' not created"),
            rollback: rollback.clone(),
        });
    }
    let id = catalog.get_or_create_franchise(name, type_id).map_err(ErrorKind::catalog)?;
    rollback.push(Compensation::RemoveFranchise(id));
    Ok(id)
}
