mod file;
mod ids;
mod taxonomy;
mod wallpaper;

pub use self::file::{Root, StoredFile};
pub use self::ids::{FranchiseId, TypeId};
pub use self::taxonomy::{Franchise, Type};
pub use self::wallpaper::Wallpaper;
