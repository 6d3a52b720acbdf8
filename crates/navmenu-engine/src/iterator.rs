//! Forward-only cursor over an [`OffsetPath`].
//!
//! The cursor resolves each offset against whatever is in the [`SectionCache`] at the
//! time of the step. It never goes back and never notices sections loaded after it
//! stepped past them: create a new cursor after every load.
use std::sync::Arc;

use navmenu_core::{Entry, OffsetPath, SectionId, UNRESOLVED_OFFSET};

use crate::cache::SectionCache;

/// How the cursor's position should be drawn. Computed from the cursor state, never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The top-level root folder, above the selection.
    RootFolder,
    /// The top-level root folder, which is selected.
    SelectedRootFolder,
    /// A folder above the selected one.
    ParentFolder,
    /// The folder that is selected, possibly with one of its files.
    SelectedParentFolder,
    SelectedFile,
    /// Data at this position is not loaded; see [`PathIterator::need_to_load`].
    NeedToLoad,
    OutOfBounds,
}

#[derive(Debug, Clone)]
pub struct PathIterator<'p> {
    path: &'p OffsetPath,
    /// Index of the *next* offset to apply. Zero means the cursor is on the root
    /// folder, even though offset zero addresses the root's first member.
    next_index: usize,
    current: Option<Arc<Entry>>,
    offset_from_parent: i32,
    need_to_load: Option<SectionId>,
}

impl<'p> PathIterator<'p> {
    /// Positions a new cursor on the root folder (section 1).
    pub fn new(path: &'p OffsetPath, cache: &mut SectionCache) -> Self {
        let current = cache.get(SectionId::ROOT);
        let need_to_load = current.is_none().then_some(SectionId::ROOT);
        Self {
            path,
            next_index: 0,
            current,
            offset_from_parent: UNRESOLVED_OFFSET,
            need_to_load,
        }
    }

    pub fn path(&self) -> &'p OffsetPath {
        self.path
    }

    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn current_entry(&self) -> Option<&Arc<Entry>> {
        self.current.as_ref()
    }

    /// Position of the current entry in its parent's members, `-1` when there is none.
    pub fn offset_from_parent(&self) -> i32 {
        self.offset_from_parent
    }

    /// Section to load before the walk can continue. Only meaningful while
    /// [`classify`](Self::classify) reports [`Navigation::NeedToLoad`]; `None` there
    /// means the path itself is invalid at this point.
    pub fn need_to_load(&self) -> Option<SectionId> {
        self.need_to_load
    }

    pub fn at_end_of_path(&self) -> bool {
        self.next_index == self.path.len()
    }

    /// Independent snapshot at the same position. Entries are shared, not copied.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Moves one step along the path. Returns whether the cursor is still in bounds.
    pub fn advance(&mut self, cache: &mut SectionCache) -> bool {
        let len = self.path.len();

        if self.next_index > len {
            self.next_index += 1;
            self.current = None;
            self.offset_from_parent = UNRESOLVED_OFFSET;
            return false;
        }

        let offset = self.path.get(self.next_index);

        match self.current.take() {
            // In the path but past what is loaded: keep counting.
            None => {
                self.offset_from_parent = offset.unwrap_or(UNRESOLVED_OFFSET);
                self.next_index += 1;
            }
            Some(entry) => match &*entry {
                Entry::RootFolder { members, .. } | Entry::LocalFolder { members, .. } => {
                    self.offset_from_parent = offset.unwrap_or(UNRESOLVED_OFFSET);
                    self.step_into(members, offset);
                    self.next_index += 1;
                }
                Entry::DynamicFolder { section, .. } => {
                    self.offset_from_parent = offset.unwrap_or(UNRESOLVED_OFFSET);
                    match cache.get(*section) {
                        Some(root) => match root.inline_members() {
                            Some(members) => self.step_into(members, offset),
                            None => self.need_to_load = None,
                        },
                        None => self.need_to_load = Some(*section),
                    }
                    self.next_index += 1;
                }
                // Nothing extends past a file; trailing offsets are ignored.
                Entry::ExplicitFile { .. } | Entry::ImplicitFile { .. } => {
                    self.next_index = len + 1;
                    self.offset_from_parent = UNRESOLVED_OFFSET;
                }
            },
        }

        self.next_index <= len
    }

    /// Classifies the current position for rendering.
    ///
    /// A folder followed by exactly one more offset is ambiguous: it is the selected
    /// folder if that offset is a file, and a parent if it is a folder. A duplicate
    /// cursor looks one step ahead to decide; if the look-ahead hits unloaded data its
    /// pending section is copied here and `NeedToLoad` is returned.
    pub fn classify(&mut self, cache: &mut SectionCache) -> Navigation {
        let len = self.path.len();

        if self.next_index > len {
            return Navigation::OutOfBounds;
        }
        let Some(entry) = &self.current else {
            return Navigation::NeedToLoad;
        };
        if entry.is_file() {
            return Navigation::SelectedFile;
        }

        let (selected, parent) = if self.next_index == 0 {
            (Navigation::SelectedRootFolder, Navigation::RootFolder)
        } else {
            (Navigation::SelectedParentFolder, Navigation::ParentFolder)
        };

        if self.next_index == len {
            return selected;
        }
        if self.next_index + 2 <= len {
            return parent;
        }

        let mut lookahead = self.duplicate();
        lookahead.advance(cache);
        match lookahead.current_entry() {
            None => {
                self.need_to_load = lookahead.need_to_load;
                Navigation::NeedToLoad
            }
            Some(next) if next.is_file() => selected,
            Some(_) => parent,
        }
    }

    fn step_into(&mut self, members: &[Arc<Entry>], offset: Option<i32>) {
        self.current = offset
            .and_then(|o| usize::try_from(o).ok())
            .and_then(|i| members.get(i))
            .cloned();
        if self.current.is_none() {
            // Invalid offset, or the path ended: nothing to load will fix it.
            self.need_to_load = None;
        }
    }
}
