//! navmenu-io: async section loader for the menu engine
//!
//! The menu engine is synchronous and never waits. Section fetches are handed to an
//! actor running on its own thread with a current-thread Tokio runtime; every fetch is
//! a spawned task, and its outcome comes back as a [`SectionEvent`] on a channel the
//! engine's loop drains with [`pump_events`].
//!
//! - Sections come from a [`SectionStore`]: JSON files in a menu directory
//!   (`files.json` for the root section, `files<N>.json` for the others) or an
//!   in-memory map.
//! - Loads of a section already in flight, or already delivered and not released,
//!   are dropped.
//! - Section files must resolve inside the menu directory; symlinks pointing
//!   elsewhere are refused.
//!
//! Quick start
//! ```rust,ignore
//! use navmenu_engine::MenuEngineBuilder;
//! use navmenu_error::TracingPolicy;
//! use navmenu_io::{pump_events, SectionLoaderBuilder};
//!
//! let (loader, mut events) = SectionLoaderBuilder::default()
//!     .with_menu_dir("site/menu")
//!     .build()?;
//! let mut engine = MenuEngineBuilder::default().build(loader, presenter);
//! engine.go_to_hash_path("File:src/lib.rs")?;
//!
//! // in the UI loop
//! pump_events(&mut engine, &mut events, &TracingPolicy);
//! ```
//!
//! Error model
//! - Channel and shutdown errors surface as `LoaderError::Recv` and map to
//!   `navmenu_error::Error::Internal`.
//! - Missing files, unreadable JSON and path policy violations are reported per
//!   section as `SectionEvent::Failed`, and map to `navmenu_error::Error::Domain`.
mod actor;
mod builder;
pub mod errors;
pub mod handle;
pub mod path_policy;
mod pump;
pub mod store;

pub use actor::{LoaderMessage, SectionLoaderActor};
pub use builder::{LoaderConfig, SectionLoaderBuilder, EVENT_CAPACITY_ENV, MENU_DIR_ENV};
pub use errors::{LoaderError, RecvError};
pub use handle::{SectionEvents, SectionLoaderHandle};
pub use pump::pump_events;
pub use store::{section_file_name, SectionStore};

use navmenu_core::{Entry, SectionEvent, SectionId};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use thiserror::Error;
use tokio::sync::mpsc;
