//! Hash path to offset path conversion.
use navmenu_core::{Entry, OffsetPath, SectionId, UNRESOLVED_OFFSET};

use crate::cache::SectionCache;

/// Resolves hash paths such as `"File:engine/menu/builder.rs"` against the loaded
/// sections.
///
/// Resolution is only as deep as the cache allows. When a dynamic folder on the way is
/// not loaded the result ends in [`UNRESOLVED_OFFSET`], which keeps the partial path
/// from rendering anything as selected. Resolve again once the section arrives.
pub struct HashPathResolver<'c> {
    cache: &'c mut SectionCache,
}

impl<'c> HashPathResolver<'c> {
    pub fn new(cache: &'c mut SectionCache) -> Self {
        Self { cache }
    }

    /// Returns the offsets of the entry named by `hash_path`.
    ///
    /// Names that don't exist end the walk; the offsets matched so far are returned.
    pub fn resolve(&mut self, hash_path: &str) -> OffsetPath {
        let mut offsets = OffsetPath::root();
        if hash_path.is_empty() {
            return offsets;
        }

        let Some(mut folder) = self.cache.get(SectionId::ROOT) else {
            offsets.push(UNRESOLVED_OFFSET);
            return offsets;
        };

        if let Some(root_hash) = folder.hash_path() {
            if hash_path == root_hash || !hash_path.starts_with(root_hash) {
                return offsets;
            }
        }
        let mut matched_len = folder.hash_path().map_or(0, str::len);

        loop {
            let folder_hash = folder.hash_path().unwrap_or_default();
            let Some(members) = folder.inline_members() else {
                break;
            };

            let mut descend = None;
            for (i, member) in members.iter().enumerate() {
                let offset = match i32::try_from(i) {
                    Ok(offset) => offset,
                    Err(_) => break,
                };
                match &**member {
                    Entry::ExplicitFile { name } | Entry::ImplicitFile { name } => {
                        if hash_path.len() == folder_hash.len() + name.len()
                            && hash_path.starts_with(folder_hash)
                            && hash_path.ends_with(name.as_str())
                        {
                            offsets.push(offset);
                            return offsets;
                        }
                    }
                    _ => {
                        let member_hash = member.hash_path().unwrap_or_default();
                        if hash_path == member_hash {
                            offsets.push(offset);
                            return offsets;
                        }
                        // Each descent must consume more of the target, or a malformed
                        // tree could keep us here forever.
                        if member_hash.len() > matched_len && hash_path.starts_with(member_hash) {
                            offsets.push(offset);
                            matched_len = member_hash.len();
                            descend = Some(member.clone());
                            break;
                        }
                    }
                }
            }

            let Some(next) = descend else {
                break;
            };
            folder = match next.member_section() {
                Some(section) => match self.cache.get(section) {
                    Some(root) => root,
                    None => {
                        tracing::trace!(%section, resolved = %offsets, "hash path needs section");
                        offsets.push(UNRESOLVED_OFFSET);
                        return offsets;
                    }
                },
                None => next,
            };
        }

        tracing::trace!(hash_path, resolved = %offsets, "hash path resolved partially");
        offsets
    }
}
