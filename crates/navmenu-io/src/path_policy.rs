use super::*;

// Section files must stay inside the menu directory.

fn canonicalize_best_effort(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

pub(crate) fn path_within_root(path: &Path, root: &Path) -> bool {
    canonicalize_best_effort(path).starts_with(canonicalize_best_effort(root))
}

/// Absolute location of `id`'s file under `menu_dir`, with symlinks resolved.
///
/// Fails when the menu directory is relative or the file resolves outside of it.
pub fn section_path(menu_dir: &Path, id: SectionId) -> Result<PathBuf, LoaderError> {
    if !menu_dir.is_absolute() {
        return Err(LoaderError::PathPolicy {
            path: menu_dir.to_path_buf(),
            reason: "menu directory must be absolute",
        });
    }
    let candidate = menu_dir.join(section_file_name(id));
    let canon = canonicalize_best_effort(&candidate);
    if path_within_root(&canon, menu_dir) {
        Ok(canon)
    } else {
        Err(LoaderError::PathPolicy {
            path: canon,
            reason: "section file outside the menu directory",
        })
    }
}
