//! Where section data comes from.
use super::*;

/// File name holding section `id`: `files.json` for the root section,
/// `files<id>.json` for every other one.
pub fn section_file_name(id: SectionId) -> String {
    if id.is_root() {
        "files.json".to_string()
    } else {
        format!("files{id}.json")
    }
}

#[derive(Debug, Clone)]
pub enum SectionStore {
    /// One JSON file per section, each holding the section's root entry.
    Directory(PathBuf),
    Memory(Arc<BTreeMap<SectionId, Arc<Entry>>>),
}

impl SectionStore {
    pub fn memory(sections: BTreeMap<SectionId, Arc<Entry>>) -> Self {
        SectionStore::Memory(Arc::new(sections))
    }

    /// Fetches section `id`. Runs on the loader's runtime.
    pub async fn fetch(&self, id: SectionId) -> Result<Arc<Entry>, LoaderError> {
        match self {
            SectionStore::Directory(menu_dir) => {
                let path = path_policy::section_path(menu_dir, id)?;
                let bytes = tokio::fs::read(&path)
                    .await
                    .map_err(|e| LoaderError::file_operation("read", &path, e))?;
                let root: Entry = serde_json::from_slice(&bytes).map_err(|e| LoaderError::Json {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
                if root.inline_members().is_none() {
                    return Err(LoaderError::Json {
                        path,
                        message: format!("section root is a {}, which has no members", root.kind()),
                    });
                }
                Ok(Arc::new(root))
            }
            SectionStore::Memory(sections) => sections
                .get(&id)
                .cloned()
                .ok_or(LoaderError::MissingSection { section: id }),
        }
    }
}
