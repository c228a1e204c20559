use derive_more::{AsRef, Deref, Display, From, Into};
use freedesktop_icons::lookup;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const ICON_LOOKUP_SIZE: u16 = 256;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct IconName(String);

crate::impl_string_newtype!(IconName);

static RESOLVED: OnceLock<RwLock<HashMap<IconName, Option<PathBuf>>>> = OnceLock::new();

/// Resolves an icon theme name (or an absolute path) to a file on disk.
/// Lookups are cached, misses included.
pub fn find_icon_path(icon_name: &IconName) -> Option<PathBuf> {
    if icon_name.is_empty() {
        return None;
    }

    let cache = RESOLVED.get_or_init(|| RwLock::new(HashMap::new()));
    if let Some(hit) = cache.read().get(icon_name) {
        return hit.clone();
    }

    let resolved = resolve(icon_name);
    cache.write().insert(icon_name.clone(), resolved.clone());
    resolved
}

fn resolve(icon_name: &IconName) -> Option<PathBuf> {
    let path = Path::new(icon_name.as_str());
    if path.is_absolute() {
        return path.exists().then(|| path.to_path_buf());
    }

    let found = lookup(icon_name.as_str())
        .with_size(ICON_LOOKUP_SIZE)
        .with_scale(1)
        .find();
    if found.is_none() {
        log::debug!("icon '{}' not found in the current theme", icon_name);
    }
    found
}
