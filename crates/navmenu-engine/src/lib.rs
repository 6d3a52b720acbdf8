//! Lazily loaded navigation menu.
//!
//! [`MenuEngine`] turns a navigation request into an ordered list of
//! [`RenderInstruction`]s, fetching the sections of the menu tree it needs through a
//! [`SectionLoader`] and keeping at most a configured number of them in a
//! [`SectionCache`]. Builds never wait: what is not loaded yet ends the build early and
//! the menu is rebuilt when the section arrives.
pub mod builder;
pub mod cache;
pub mod config;
pub mod engine;
pub mod iterator;
pub mod menu;
pub mod resolver;

pub use builder::MenuEngineBuilder;
pub use cache::SectionCache;
pub use config::{EngineConfig, DEFAULT_MAX_SECTIONS, MAX_SECTIONS_ENV};
pub use engine::{MenuEngine, Presenter, Refresh, SectionLoader, TargetPath};
pub use iterator::{Navigation, PathIterator};
pub use menu::{MenuBuild, MenuBuilder, RenderInstruction};
pub use resolver::HashPathResolver;
