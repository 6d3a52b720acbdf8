//! Shared data model for the navigation menu.
//!
//! The menu is a tree of folders and files split into *sections*. Section 1 holds the
//! root folder; a `DynamicFolder` anywhere in the tree points at another section whose
//! contents are fetched lazily. Everything in this crate is plain data: the cache,
//! iterator and builder live in `navmenu-engine`.
pub mod entry;
pub mod names;
pub mod path;
pub mod section;

pub use entry::{Entry, Members};
pub use names::FolderNames;
pub use path::{file_hash_path, OffsetPath, UNRESOLVED_OFFSET};
pub use section::{SectionEvent, SectionId};
