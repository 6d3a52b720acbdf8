use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::Entry;

/// Identifier of a lazily loaded menu section. Always >= 1; section 1 is the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SectionId(u32);

impl SectionId {
    pub const ROOT: SectionId = SectionId(1);

    /// Returns `None` for 0, which is never a valid section.
    pub const fn new(raw: u32) -> Option<Self> {
        if raw == 0 { None } else { Some(Self(raw)) }
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn is_root(self) -> bool {
        self.0 == 1
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for SectionId {
    type Error = String;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        SectionId::new(raw).ok_or_else(|| "section ids start at 1".to_string())
    }
}

impl From<SectionId> for u32 {
    fn from(id: SectionId) -> Self {
        id.0
    }
}

/// Completion of an asynchronous section fetch, delivered back to the cooperative
/// loop that owns the menu engine.
#[derive(Debug, Clone)]
pub enum SectionEvent {
    Loaded { id: SectionId, root: Arc<Entry> },
    Failed { id: SectionId, message: String },
}

impl SectionEvent {
    pub fn id(&self) -> SectionId {
        match self {
            SectionEvent::Loaded { id, .. } | SectionEvent::Failed { id, .. } => *id,
        }
    }
}
