//! Turns a path walk into the ordered list of entries the presenter draws.
use std::sync::Arc;

use navmenu_core::{file_hash_path, Entry, OffsetPath, SectionId};
use navmenu_error::{FatalError, InternalError, Result};
use tracing::{span, Level};

use crate::cache::SectionCache;
use crate::iterator::{Navigation, PathIterator};

/// One line of the rendered menu, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderInstruction {
    /// Link back to the root folder (the empty path).
    RootLink,
    SelectedRoot,
    /// Label for an outer name of a collapsed folder chain. Not clickable.
    CollapsedParentLabel { name: String },
    ParentLink { name: String, target: OffsetPath },
    SelectedParent { name: String },
    SelectedFile { name: String },
    FileLink { name: String, hash_path: String },
    ChildFolderLink { name: String, target: OffsetPath },
}

/// Outcome of a single build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuBuild {
    /// Whether the whole requested path was rendered.
    pub completed: bool,
    /// Section to fetch before the build can get further.
    pub need_to_load: Option<SectionId>,
    /// Offsets of the folders shown on the parent chain; a prefix of the request.
    pub rendered_path: OffsetPath,
    pub instructions: Vec<RenderInstruction>,
    /// Index of the selected file among the selected folder's members.
    pub selected_file: Option<usize>,
}

impl MenuBuild {
    fn incomplete(mut self, need_to_load: Option<SectionId>) -> Self {
        self.completed = false;
        self.need_to_load = need_to_load;
        self
    }
}

pub struct MenuBuilder<'c> {
    cache: &'c mut SectionCache,
}

impl<'c> MenuBuilder<'c> {
    pub fn new(cache: &'c mut SectionCache) -> Self {
        Self { cache }
    }

    /// Walks `path` and produces the menu for it, or as much of it as is loaded.
    ///
    /// Missing data is not an error: the result is marked incomplete and names the
    /// section to load. Only a classification the walk cannot place (a file in the
    /// middle of the parent chain) fails the build.
    pub fn build(&mut self, path: &OffsetPath) -> Result<MenuBuild> {
        let build_span = span!(Level::TRACE, "build_menu", path = %path);
        let _enter = build_span.enter();

        let mut result = MenuBuild::default();
        let mut cursor = PathIterator::new(path, self.cache);

        // Folders down to and including the selected one.
        loop {
            let navigation = cursor.classify(self.cache);
            match navigation {
                Navigation::RootFolder => {
                    result.instructions.push(RenderInstruction::RootLink);
                    cursor.advance(self.cache);
                }
                Navigation::SelectedRootFolder => {
                    result.instructions.push(RenderInstruction::SelectedRoot);
                    break;
                }
                Navigation::ParentFolder | Navigation::SelectedParentFolder => {
                    result.rendered_path.push(cursor.offset_from_parent());

                    let entry = current_folder(&cursor)?;
                    let (collapsed, name) = match entry.folder_names() {
                        Some(names) => (names.collapsed().to_vec(), names.last().to_string()),
                        None => (Vec::new(), String::new()),
                    };
                    for label in collapsed {
                        result
                            .instructions
                            .push(RenderInstruction::CollapsedParentLabel { name: label });
                    }

                    if navigation == Navigation::SelectedParentFolder {
                        result
                            .instructions
                            .push(RenderInstruction::SelectedParent { name });
                        break;
                    }
                    result.instructions.push(RenderInstruction::ParentLink {
                        name,
                        target: result.rendered_path.clone(),
                    });
                    cursor.advance(self.cache);
                }
                Navigation::NeedToLoad => {
                    tracing::debug!(need_to_load = ?cursor.need_to_load(), rendered = %result.rendered_path, "build stopped on parent chain");
                    return Ok(result.incomplete(cursor.need_to_load()));
                }
                Navigation::SelectedFile | Navigation::OutOfBounds => {
                    return Err(FatalError::UnexpectedNavigation {
                        navigation: format!("{navigation:?}"),
                        next_index: cursor.next_index(),
                    }
                    .into());
                }
            }
        }

        // Members of the selected folder.
        let selected = current_folder(&cursor)?;
        let folder = match selected.member_section() {
            Some(section) => match self.cache.get(section) {
                Some(root) => root,
                None => {
                    tracing::debug!(%section, "selected folder members not loaded");
                    return Ok(result.incomplete(Some(section)));
                }
            },
            None => selected,
        };
        let members = folder
            .inline_members()
            .ok_or_else(|| FatalError::SelectionNotFolder(folder.kind().to_string()))?;
        let folder_hash = folder.hash_path().unwrap_or_default();

        if cursor.advance(self.cache) {
            result.selected_file = usize::try_from(cursor.offset_from_parent()).ok();
        }

        for (i, member) in members.iter().enumerate() {
            let instruction = match &**member {
                Entry::ExplicitFile { name } | Entry::ImplicitFile { name } => {
                    if result.selected_file == Some(i) {
                        RenderInstruction::SelectedFile { name: name.clone() }
                    } else {
                        RenderInstruction::FileLink {
                            name: name.clone(),
                            hash_path: file_hash_path(folder_hash, name),
                        }
                    }
                }
                Entry::LocalFolder { names, .. } | Entry::DynamicFolder { names, .. } => {
                    RenderInstruction::ChildFolderLink {
                        name: names.first().to_string(),
                        target: result.rendered_path.child(child_offset(i)?),
                    }
                }
                // never nested in a member list
                Entry::RootFolder { .. } => RenderInstruction::ChildFolderLink {
                    name: String::new(),
                    target: result.rendered_path.child(child_offset(i)?),
                },
            };
            result.instructions.push(instruction);
        }

        result.completed = true;
        Ok(result)
    }
}

fn current_folder(cursor: &PathIterator<'_>) -> Result<Arc<Entry>> {
    cursor.current_entry().cloned().ok_or_else(|| {
        InternalError::InvalidState(format!(
            "folder classification without an entry at path index {}",
            cursor.next_index()
        ))
        .into()
    })
}

fn child_offset(index: usize) -> Result<i32> {
    i32::try_from(index)
        .map_err(|_| InternalError::InvalidState(format!("member index {index} overflows an offset")).into())
}
