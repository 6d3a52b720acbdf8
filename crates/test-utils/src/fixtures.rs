use std::collections::BTreeMap;
use std::sync::Arc;

use navmenu_core::{Entry, FolderNames, SectionId};

/// Shorthand for a section id in tests. Panics on 0.
pub fn sid(raw: u32) -> SectionId {
    SectionId::new(raw).expect("section ids start at 1")
}

/// A four section tree used across the engine and loader tests.
///
/// ```text
/// section 1  File:
///   [0] engine/            dynamic -> section 2
///   [1] docs/guide/        local, collapsed names ["docs", "guide"]
///         [0] intro.md     implicit
///         [1] setup.md
///         [2] advanced/    local
///               [0] tuning.md
///   [2] README.md
/// section 2  File:engine/
///   [0] cache.rs
///   [1] menu/              dynamic -> section 3
///   [2] lib.rs
/// section 3  File:engine/menu/
///   [0] builder.rs
///   [1] deep/              dynamic -> section 4
/// section 4  File:engine/menu/deep/
///   [0] leaf.rs
/// ```
pub fn sample_sections() -> BTreeMap<SectionId, Arc<Entry>> {
    let mut sections = BTreeMap::new();

    sections.insert(
        sid(1),
        Entry::root(
            "File:",
            vec![
                Entry::dynamic("engine", "File:engine/", sid(2)),
                Entry::local(
                    FolderNames::new(["docs", "guide"]),
                    "File:docs/guide/",
                    vec![
                        Entry::implicit_file("intro.md"),
                        Entry::explicit_file("setup.md"),
                        Entry::local(
                            "advanced",
                            "File:docs/guide/advanced/",
                            vec![Entry::explicit_file("tuning.md")],
                        ),
                    ],
                ),
                Entry::explicit_file("README.md"),
            ],
        ),
    );

    sections.insert(
        sid(2),
        Entry::local(
            "engine",
            "File:engine/",
            vec![
                Entry::explicit_file("cache.rs"),
                Entry::dynamic("menu", "File:engine/menu/", sid(3)),
                Entry::explicit_file("lib.rs"),
            ],
        ),
    );

    sections.insert(
        sid(3),
        Entry::local(
            "menu",
            "File:engine/menu/",
            vec![
                Entry::explicit_file("builder.rs"),
                Entry::dynamic("deep", "File:engine/menu/deep/", sid(4)),
            ],
        ),
    );

    sections.insert(
        sid(4),
        Entry::local(
            "deep",
            "File:engine/menu/deep/",
            vec![Entry::explicit_file("leaf.rs")],
        ),
    );

    sections
}

/// Root `[FolderA (dynamic, section 2), FileB]` plus the data for section 2.
pub fn folder_a_file_b() -> (Arc<Entry>, Arc<Entry>) {
    let root = Entry::root(
        "File:",
        vec![
            Entry::dynamic("FolderA", "File:FolderA/", sid(2)),
            Entry::explicit_file("FileB"),
        ],
    );
    let folder_a = Entry::local(
        "FolderA",
        "File:FolderA/",
        vec![Entry::explicit_file("first.rs"), Entry::explicit_file("second.rs")],
    );
    (root, folder_a)
}

/// A root whose first member is a dynamic folder backed by section `id`, for tests
/// that need an arbitrary section number on the path.
pub fn root_with_dynamic(id: SectionId) -> (Arc<Entry>, Arc<Entry>) {
    let root = Entry::root(
        "File:",
        vec![
            Entry::local(
                "outer",
                "File:outer/",
                vec![Entry::dynamic("lazy", "File:outer/lazy/", id)],
            ),
            Entry::explicit_file("top.rs"),
        ],
    );
    let lazy = Entry::local(
        "lazy",
        "File:outer/lazy/",
        vec![Entry::explicit_file("a.rs"), Entry::implicit_file("b.rs")],
    );
    (root, lazy)
}
