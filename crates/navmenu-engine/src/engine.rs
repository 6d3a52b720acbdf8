//! The menu context: owns the cache and the navigation state, and drives builds.
use std::sync::Arc;

use navmenu_core::{Entry, OffsetPath, SectionEvent, SectionId};
use navmenu_error::{Result, WarningError};
use tracing::{span, Level};

use crate::cache::SectionCache;
use crate::menu::{MenuBuild, MenuBuilder};
use crate::resolver::HashPathResolver;

/// Starts section fetches. Completions come back through
/// [`MenuEngine::section_loaded`] / [`MenuEngine::section_failed`], never from inside
/// `request`.
pub trait SectionLoader {
    /// Starts fetching `id`. An error means no completion will ever arrive for it.
    fn request(&mut self, id: SectionId) -> Result<()>;

    /// The section was evicted; anything held for it may be dropped so a later
    /// request fetches it again.
    fn release(&mut self, _id: SectionId) {}
}

/// Whether a finished load should trigger a rebuild right away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Now,
    /// The presenter batches loads and calls [`MenuEngine::update`] itself.
    Later,
}

pub trait Presenter {
    /// Draws a finished build, complete or not.
    fn present(&mut self, build: &MenuBuild);

    fn section_loaded(&mut self, _id: SectionId) -> Refresh {
        Refresh::Now
    }
}

/// The navigation request being honored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetPath {
    Offsets(OffsetPath),
    /// Kept as text and resolved again on every build, since each load can take the
    /// resolution further.
    Hash(String),
}

/// Build one with [`MenuEngineBuilder`](crate::MenuEngineBuilder).
pub struct MenuEngine<L, P> {
    cache: SectionCache,
    max_sections: usize,
    current_path: OffsetPath,
    target: Option<TargetPath>,
    first_update: bool,
    loader: L,
    presenter: P,
}

impl<L, P> MenuEngine<L, P>
where
    L: SectionLoader,
    P: Presenter,
{
    pub(crate) fn new(loader: L, presenter: P, max_sections: usize) -> Self {
        Self {
            cache: SectionCache::new(),
            max_sections,
            current_path: OffsetPath::root(),
            target: None,
            first_update: true,
            loader,
            presenter,
        }
    }

    pub fn go_to_offsets(&mut self, offsets: impl Into<OffsetPath>) -> Result<Option<MenuBuild>> {
        self.target = Some(TargetPath::Offsets(offsets.into()));
        self.update()
    }

    /// Navigates to a hash path such as `"File:engine/menu/builder.rs"`.
    pub fn go_to_hash_path(&mut self, hash_path: impl Into<String>) -> Result<Option<MenuBuild>> {
        self.target = Some(TargetPath::Hash(hash_path.into()));
        self.update()
    }

    /// Rebuilds the menu and hands it to the presenter.
    ///
    /// Does nothing (`Ok(None)`) once the menu has been drawn completely and no new
    /// target is pending. An incomplete build requests the section it is missing; the
    /// rebuild happens when that section arrives.
    pub fn update(&mut self) -> Result<Option<MenuBuild>> {
        if !self.first_update && self.target.is_none() {
            return Ok(None);
        }
        let update_span = span!(Level::TRACE, "menu_update", target = ?self.target);
        let _enter = update_span.enter();

        // Every get() during this build marks its section as used again.
        self.cache.reset_usage();

        let path = match &self.target {
            Some(TargetPath::Offsets(offsets)) => offsets.clone(),
            Some(TargetPath::Hash(hash_path)) => HashPathResolver::new(&mut self.cache).resolve(hash_path),
            None => self.current_path.clone(),
        };

        let build = match MenuBuilder::new(&mut self.cache).build(&path) {
            Ok(build) => build,
            Err(e) => {
                // Rebuilding would fail the same way; drop the target.
                tracing::debug!(path = %path, error = %e, "build failed, discarding target");
                self.target = None;
                self.first_update = false;
                return Err(e);
            }
        };
        self.presenter.present(&build);
        self.current_path = build.rendered_path.clone();

        if build.completed {
            self.target = None;
            self.first_update = false;
            for id in self.cache.evict_excess(self.max_sections) {
                self.loader.release(id);
            }
        } else if let Some(id) = build.need_to_load {
            self.request_section(id)?;
        } else {
            tracing::debug!(path = %path, rendered = %build.rendered_path, "target cannot be reached, discarding");
            self.target = None;
            self.first_update = false;
        }

        Ok(Some(build))
    }

    /// Stores a fetched section and lets the presenter decide whether to rebuild.
    pub fn section_loaded(&mut self, id: SectionId, root: Arc<Entry>) -> Result<Option<MenuBuild>> {
        self.cache.on_loaded(id, root)?;
        match self.presenter.section_loaded(id) {
            Refresh::Now => self.update(),
            Refresh::Later => Ok(None),
        }
    }

    /// Drops the placeholder of a failed fetch so a later navigation can retry it.
    ///
    /// No rebuild is attempted, it would only request the same section again. Always
    /// returns the failure as a warning for the caller to report.
    pub fn section_failed(&mut self, id: SectionId, message: impl Into<String>) -> Result<()> {
        let message = message.into();
        if !self.cache.forget_pending(id) {
            tracing::debug!(section = %id, "failure for a section with no pending record");
        }
        Err(WarningError::SectionLoadFailed {
            section: id.get(),
            message,
        }
        .into())
    }

    pub fn apply_event(&mut self, event: SectionEvent) -> Result<Option<MenuBuild>> {
        match event {
            SectionEvent::Loaded { id, root } => self.section_loaded(id, root),
            SectionEvent::Failed { id, message } => self.section_failed(id, message).map(|()| None),
        }
    }

    /// Asks the loader for `id` unless it is cached or already on its way.
    ///
    /// If the loader refuses, the placeholder is dropped again so the section does not
    /// stay pending forever; the next update asks once more.
    pub fn request_section(&mut self, id: SectionId) -> Result<()> {
        if !self.cache.ensure_loading(id) {
            return Ok(());
        }
        tracing::debug!(section = %id, "requesting section");
        if let Err(e) = self.loader.request(id) {
            self.cache.forget_pending(id);
            return Err(e);
        }
        Ok(())
    }

    pub fn cache(&self) -> &SectionCache {
        &self.cache
    }

    pub fn max_sections(&self) -> usize {
        self.max_sections
    }

    /// The part of the last requested path that is on screen, down to the selected
    /// folder.
    pub fn current_path(&self) -> &OffsetPath {
        &self.current_path
    }

    pub fn target(&self) -> Option<&TargetPath> {
        self.target.as_ref()
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }
}
