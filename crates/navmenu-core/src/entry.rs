use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{FolderNames, SectionId};

/// Inline children of a folder. Shared so that cursors can hold on to any entry
/// without borrowing the cache that owns the section.
pub type Members = Vec<Arc<Entry>>;

/// A node of the file menu tree.
///
/// Folders carry a `hash_path`, the external address prefix shared by everything
/// below them (e.g. `"File2:src/engine/"`). Files only carry a name; their address is
/// the parent folder's hash path followed by the name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Entry {
    RootFolder {
        #[serde(default)]
        hash_path: String,
        members: Members,
    },
    LocalFolder {
        names: FolderNames,
        hash_path: String,
        members: Members,
    },
    /// Children live in another section which may not be loaded yet.
    DynamicFolder {
        names: FolderNames,
        hash_path: String,
        section: SectionId,
    },
    ExplicitFile {
        name: String,
    },
    ImplicitFile {
        name: String,
    },
}

impl Entry {
    pub fn root(hash_path: impl Into<String>, members: Members) -> Arc<Self> {
        Arc::new(Entry::RootFolder {
            hash_path: hash_path.into(),
            members,
        })
    }

    pub fn local(
        names: impl Into<FolderNames>,
        hash_path: impl Into<String>,
        members: Members,
    ) -> Arc<Self> {
        Arc::new(Entry::LocalFolder {
            names: names.into(),
            hash_path: hash_path.into(),
            members,
        })
    }

    pub fn dynamic(
        names: impl Into<FolderNames>,
        hash_path: impl Into<String>,
        section: SectionId,
    ) -> Arc<Self> {
        Arc::new(Entry::DynamicFolder {
            names: names.into(),
            hash_path: hash_path.into(),
            section,
        })
    }

    pub fn explicit_file(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Entry::ExplicitFile { name: name.into() })
    }

    pub fn implicit_file(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Entry::ImplicitFile { name: name.into() })
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Entry::ExplicitFile { .. } | Entry::ImplicitFile { .. })
    }

    pub fn is_folder(&self) -> bool {
        !self.is_file()
    }

    /// Children stored directly in this entry. `None` for files and dynamic folders.
    pub fn inline_members(&self) -> Option<&[Arc<Entry>]> {
        match self {
            Entry::RootFolder { members, .. } | Entry::LocalFolder { members, .. } => {
                Some(members)
            }
            Entry::DynamicFolder { .. } | Entry::ExplicitFile { .. } | Entry::ImplicitFile { .. } => {
                None
            }
        }
    }

    /// Section holding the children of a dynamic folder.
    pub fn member_section(&self) -> Option<SectionId> {
        match self {
            Entry::DynamicFolder { section, .. } => Some(*section),
            _ => None,
        }
    }

    pub fn hash_path(&self) -> Option<&str> {
        match self {
            Entry::RootFolder { hash_path, .. }
            | Entry::LocalFolder { hash_path, .. }
            | Entry::DynamicFolder { hash_path, .. } => Some(hash_path),
            Entry::ExplicitFile { .. } | Entry::ImplicitFile { .. } => None,
        }
    }

    /// Folder names; the root folder has none, its label belongs to the presenter.
    pub fn folder_names(&self) -> Option<&FolderNames> {
        match self {
            Entry::LocalFolder { names, .. } | Entry::DynamicFolder { names, .. } => Some(names),
            _ => None,
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        match self {
            Entry::ExplicitFile { name } | Entry::ImplicitFile { name } => Some(name),
            _ => None,
        }
    }

    /// Short human readable kind, used in logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Entry::RootFolder { .. } => "RootFolder",
            Entry::LocalFolder { .. } => "LocalFolder",
            Entry::DynamicFolder { .. } => "DynamicFolder",
            Entry::ExplicitFile { .. } => "ExplicitFile",
            Entry::ImplicitFile { .. } => "ImplicitFile",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Arc<Entry> {
        Entry::root(
            "File:",
            vec![
                Entry::dynamic("engine", "File:engine/", SectionId::new(2).unwrap()),
                Entry::local(
                    FolderNames::new(["docs", "guide"]),
                    "File:docs/guide/",
                    vec![Entry::implicit_file("intro.md")],
                ),
                Entry::explicit_file("README.md"),
            ],
        )
    }

    #[test]
    fn accessors_follow_kind() {
        let root = sample();
        let members = root.inline_members().unwrap();
        assert_eq!(members.len(), 3);
        assert_eq!(members[0].member_section(), SectionId::new(2));
        assert!(members[0].inline_members().is_none());
        assert_eq!(members[1].folder_names().unwrap().last(), "guide");
        assert!(members[2].is_file());
        assert_eq!(members[2].hash_path(), None);
        assert_eq!(members[2].file_name(), Some("README.md"));
        assert!(root.folder_names().is_none());
    }

    #[test]
    fn json_shape() {
        let json = r#"{
            "type": "LocalFolder",
            "names": ["a", "b"],
            "hash_path": "File3:a/b/",
            "members": [
                { "type": "ExplicitFile", "name": "x.rs" },
                { "type": "DynamicFolder", "names": "c", "hash_path": "File3:a/b/c/", "section": 4 }
            ]
        }"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        let members = entry.inline_members().unwrap();
        assert_eq!(members[0].kind(), "ExplicitFile");
        assert_eq!(members[1].member_section(), SectionId::new(4));

        let back: Entry = serde_json::from_str(&serde_json::to_string(&entry).unwrap()).unwrap();
        assert_eq!(back, entry);
    }
}
