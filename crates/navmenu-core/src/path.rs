use std::fmt;

use serde::{Deserialize, Serialize};

/// Trailing offset appended by hash path resolution when the rest of the path lives in
/// a section that is not loaded yet.
pub const UNRESOLVED_OFFSET: i32 = -1;

/// A path through the menu as member offsets, starting below the root folder.
///
/// An empty path selects the root folder. Each offset indexes the members of the entry
/// reached by the previous one. If the last offset lands on a folder that folder is
/// selected; if it lands on a file the file is selected inside its parent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OffsetPath(Vec<i32>);

impl OffsetPath {
    pub fn new(offsets: Vec<i32>) -> Self {
        Self(offsets)
    }

    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<i32> {
        self.0.get(index).copied()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    pub fn push(&mut self, offset: i32) {
        self.0.push(offset);
    }

    /// This path extended by one offset.
    pub fn child(&self, offset: i32) -> Self {
        let mut offsets = Vec::with_capacity(self.0.len() + 1);
        offsets.extend_from_slice(&self.0);
        offsets.push(offset);
        Self(offsets)
    }

    pub fn starts_with(&self, prefix: &OffsetPath) -> bool {
        self.0.starts_with(&prefix.0)
    }

    pub fn ends_unresolved(&self) -> bool {
        self.0.last() == Some(&UNRESOLVED_OFFSET)
    }
}

impl From<Vec<i32>> for OffsetPath {
    fn from(offsets: Vec<i32>) -> Self {
        Self(offsets)
    }
}

impl<const N: usize> From<[i32; N]> for OffsetPath {
    fn from(offsets: [i32; N]) -> Self {
        Self(offsets.to_vec())
    }
}

impl fmt::Display for OffsetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, offset) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{offset}")?;
        }
        f.write_str("]")
    }
}

/// Address of a file inside a folder: the folder's hash path followed by the file name.
pub fn file_hash_path(folder_hash_path: &str, file_name: &str) -> String {
    let mut out = String::with_capacity(folder_hash_path.len() + file_name.len());
    out.push_str(folder_hash_path);
    out.push_str(file_name);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_and_display() {
        let path = OffsetPath::from([0, 3]);
        let child = path.child(2);
        assert_eq!(child.as_slice(), &[0, 3, 2]);
        assert!(child.starts_with(&path));
        assert_eq!(child.to_string(), "[0,3,2]");
        assert_eq!(OffsetPath::root().to_string(), "[]");
    }

    #[test]
    fn unresolved_tail() {
        assert!(OffsetPath::from([1, UNRESOLVED_OFFSET]).ends_unresolved());
        assert!(!OffsetPath::from([1]).ends_unresolved());
        assert_eq!(file_hash_path("File2:src/", "lib.rs"), "File2:src/lib.rs");
    }
}
