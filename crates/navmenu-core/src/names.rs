use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Display names of a folder entry.
///
/// A chain of folders that each contain a single folder is collapsed into one entry
/// carrying every name, outermost first. Serialized as a plain string when there is a
/// single name and as an array otherwise.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FolderNames(Vec<String>);

impl FolderNames {
    /// Empty input yields a single empty name so every folder has something to show.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            names.push(String::new());
        }
        Self(names)
    }

    pub fn single(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Name used when the folder is listed as a child.
    pub fn first(&self) -> &str {
        &self.0[0]
    }

    /// Name used when the folder is shown on the parent chain.
    pub fn last(&self) -> &str {
        &self.0[self.0.len() - 1]
    }

    /// Every name but the last; rendered as empty parent labels.
    pub fn collapsed(&self) -> &[String] {
        &self.0[..self.0.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    // never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Debug for FolderNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl From<&str> for FolderNames {
    fn from(name: &str) -> Self {
        Self::single(name)
    }
}

impl From<String> for FolderNames {
    fn from(name: String) -> Self {
        Self::single(name)
    }
}

impl From<Vec<String>> for FolderNames {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl Serialize for FolderNames {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.0.len() == 1 {
            serializer.serialize_str(&self.0[0])
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for FolderNames {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NamesVisitor;

        impl<'de> Visitor<'de> for NamesVisitor {
            type Value = FolderNames;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a folder name or a non-empty array of folder names")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(FolderNames::single(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(FolderNames::single(v))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut names = Vec::with_capacity(seq.size_hint().unwrap_or(1));
                while let Some(name) = seq.next_element::<String>()? {
                    names.push(name);
                }
                if names.is_empty() {
                    return Err(de::Error::invalid_length(0, &self));
                }
                Ok(FolderNames(names))
            }
        }

        deserializer.deserialize_any(NamesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapsed_chain() {
        let names = FolderNames::new(["src", "engine", "cache"]);
        assert_eq!(names.first(), "src");
        assert_eq!(names.last(), "cache");
        assert_eq!(names.collapsed(), ["src", "engine"]);

        let single = FolderNames::single("docs");
        assert!(single.collapsed().is_empty());
        assert_eq!(single.first(), single.last());
    }

    #[test]
    fn string_or_array() {
        let one: FolderNames = serde_json::from_str(r#""docs""#).unwrap();
        assert_eq!(one, FolderNames::single("docs"));
        let many: FolderNames = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(many.len(), 2);
        assert!(serde_json::from_str::<FolderNames>("[]").is_err());

        assert_eq!(serde_json::to_string(&one).unwrap(), r#""docs""#);
        assert_eq!(serde_json::to_string(&many).unwrap(), r#"["a","b"]"#);
    }
}
