//! Bounded store of loaded menu sections.
//!
//! Sections live in one ordered list split by `first_unused` into a *used* segment
//! (touched by the build in progress) and an *unused* segment (eviction candidates).
//! Paths are walked root to leaf, so a hit is appended to the end of the used segment
//! rather than moved to the front. Walking `A > B > C > D` leaves the cache as
//! `[A, B, C, D]`; navigating to `A > B > C2 > D2` afterwards gives
//! `[A, B, C2, D2 | C, D]`, and `D` is evicted before `C`. Entries higher in the
//! hierarchy are favored over deeper ones, which are of little use without their parents.
use std::sync::Arc;

use navmenu_core::{Entry, SectionId};
use navmenu_error::WarningError;

#[derive(Debug, Clone)]
struct SectionRecord {
    id: SectionId,
    /// `None` while the fetch is in flight. Set once, never cleared.
    root: Option<Arc<Entry>>,
}

impl SectionRecord {
    fn is_ready(&self) -> bool {
        self.root.is_some()
    }
}

#[derive(Debug, Default)]
pub struct SectionCache {
    sections: Vec<SectionRecord>,
    first_unused: usize,
}

impl SectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn contains(&self, id: SectionId) -> bool {
        self.position(id).is_some()
    }

    pub fn is_ready(&self, id: SectionId) -> bool {
        self.position(id)
            .is_some_and(|i| self.sections[i].is_ready())
    }

    /// Index of the first section not touched since the last [`reset_usage`](Self::reset_usage).
    pub fn first_unused(&self) -> usize {
        self.first_unused
    }

    /// Every cached id, used segment first.
    pub fn ids(&self) -> Vec<SectionId> {
        self.sections.iter().map(|s| s.id).collect()
    }

    pub fn used_ids(&self) -> Vec<SectionId> {
        self.sections[..self.first_unused]
            .iter()
            .map(|s| s.id)
            .collect()
    }

    /// Marks everything unused. Called before each build; the build's `get` calls
    /// rebuild the used segment.
    pub fn reset_usage(&mut self) {
        self.first_unused = 0;
    }

    /// Returns the root entry of a ready section and records the access.
    ///
    /// The access is recorded whether or not the section is ready, so a pending load
    /// that the current build depends on stays in the used segment.
    pub fn get(&mut self, id: SectionId) -> Option<Arc<Entry>> {
        let index = self.position(id)?;

        let new_index = if index < self.first_unused {
            let record = self.sections.remove(index);
            let tail = self.first_unused - 1;
            self.sections.insert(tail, record);
            tail
        } else {
            if index > self.first_unused {
                let record = self.sections.remove(index);
                self.sections.insert(self.first_unused, record);
            }
            self.first_unused += 1;
            self.first_unused - 1
        };

        tracing::trace!(section = %id, position = new_index, first_unused = self.first_unused, "section accessed");
        self.sections[new_index].root.clone()
    }

    /// Inserts a pending placeholder for `id` unless a record already exists.
    ///
    /// Returns `true` when the caller must start a fetch; at most one fetch per id is
    /// ever outstanding.
    pub fn ensure_loading(&mut self, id: SectionId) -> bool {
        if self.contains(id) {
            return false;
        }
        tracing::debug!(section = %id, "section placeholder inserted");
        self.sections.push(SectionRecord { id, root: None });
        true
    }

    /// Stores the data of a pending section and marks it ready.
    ///
    /// A root without inline members is refused and its placeholder dropped, the same
    /// as a failed fetch.
    pub fn on_loaded(&mut self, id: SectionId, root: Arc<Entry>) -> Result<(), WarningError> {
        let index = self
            .position(id)
            .ok_or(WarningError::UnknownSection { section: id.get() })?;

        if self.sections[index].is_ready() {
            return Err(WarningError::DuplicateDelivery { section: id.get() });
        }
        if root.inline_members().is_none() {
            self.forget_pending(id);
            return Err(WarningError::InvalidSectionRoot {
                section: id.get(),
                kind: root.kind(),
            });
        }
        self.sections[index].root = Some(root);
        tracing::debug!(section = %id, "section ready");
        Ok(())
    }

    /// Drops a placeholder whose fetch failed so a later build can request it again.
    /// Ready sections are left alone.
    pub fn forget_pending(&mut self, id: SectionId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        if self.sections[index].is_ready() {
            return false;
        }
        self.sections.remove(index);
        if index < self.first_unused {
            self.first_unused -= 1;
        }
        true
    }

    /// Removes least recently used sections from the end of the unused segment until
    /// at most `capacity` remain.
    ///
    /// Stops at the first section still loading: its completion handler expects the
    /// record to exist. The cache may therefore stay above `capacity`. Returns the
    /// evicted ids so the loader can release whatever it holds for them.
    pub fn evict_excess(&mut self, capacity: usize) -> Vec<SectionId> {
        let mut evicted = Vec::new();

        while self.sections.len() > capacity && self.sections.len() > self.first_unused {
            let Some(last) = self.sections.last() else {
                break;
            };
            if !last.is_ready() {
                tracing::debug!(section = %last.id, "eviction stopped at pending section");
                break;
            }
            evicted.push(last.id);
            self.sections.pop();
        }

        if !evicted.is_empty() {
            tracing::debug!(?evicted, remaining = self.sections.len(), capacity, "sections evicted");
        }
        evicted
    }

    fn position(&self, id: SectionId) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navmenu_test_utils::sid;

    fn leaf(name: &str) -> Arc<Entry> {
        Entry::local(name, format!("File:{name}/"), Vec::new())
    }

    fn primed(ids: &[u32]) -> SectionCache {
        let mut cache = SectionCache::new();
        for &raw in ids {
            assert!(cache.ensure_loading(sid(raw)));
            cache.on_loaded(sid(raw), leaf(&raw.to_string())).unwrap();
        }
        cache
    }

    fn raw(ids: Vec<SectionId>) -> Vec<u32> {
        ids.into_iter().map(SectionId::get).collect()
    }

    #[test]
    fn unused_hits_are_pulled_to_the_boundary_in_request_order() {
        let mut cache = primed(&[1, 2, 3, 4, 5]);
        cache.reset_usage();

        cache.get(sid(4));
        cache.get(sid(2));
        cache.get(sid(5));

        assert_eq!(raw(cache.used_ids()), vec![4, 2, 5]);
        assert_eq!(raw(cache.ids()), vec![4, 2, 5, 1, 3]);
    }

    #[test]
    fn used_hits_move_to_the_tail_of_the_used_segment() {
        let mut cache = primed(&[1, 2, 3, 4]);
        cache.reset_usage();

        for id in [1, 2, 3, 1, 2] {
            cache.get(sid(id));
        }

        assert_eq!(cache.first_unused(), 3);
        assert_eq!(raw(cache.used_ids()), vec![3, 1, 2]);
        assert_eq!(raw(cache.ids()), vec![3, 1, 2, 4]);
    }

    #[test]
    fn used_segment_holds_exactly_the_distinct_ids() {
        let mut cache = primed(&[1, 2, 3, 4, 5, 6]);
        cache.reset_usage();
        let requests = [6, 3, 6, 1, 3, 3, 6];

        // reference model of the reinsertion rule
        let mut expected: Vec<u32> = Vec::new();
        for id in requests {
            expected.retain(|&x| x != id);
            expected.push(id);
            cache.get(sid(id));
        }

        assert_eq!(raw(cache.used_ids()), expected);
        assert_eq!(expected, vec![1, 3, 6]);
    }

    #[test]
    fn hierarchy_order_survives_renavigation() {
        // A=1 > B=2 > C=3 > D=4, then A > B > C2=5 > D2=6
        let mut cache = primed(&[1, 2, 3, 4]);
        cache.reset_usage();
        for id in [1, 2, 3, 4] {
            cache.get(sid(id));
        }
        assert_eq!(raw(cache.ids()), vec![1, 2, 3, 4]);

        for id in [5, 6] {
            cache.ensure_loading(sid(id));
            cache.on_loaded(sid(id), leaf(&id.to_string())).unwrap();
        }
        cache.reset_usage();
        for id in [1, 2, 5, 6] {
            cache.get(sid(id));
        }
        assert_eq!(raw(cache.ids()), vec![1, 2, 5, 6, 3, 4]);

        // D goes first, then C
        assert_eq!(raw(cache.evict_excess(5)), vec![4]);
        assert_eq!(raw(cache.evict_excess(4)), vec![3]);
    }

    #[test]
    fn missing_get_leaves_cache_untouched() {
        let mut cache = primed(&[1, 2]);
        cache.reset_usage();
        assert!(cache.get(sid(9)).is_none());
        assert_eq!(cache.first_unused(), 0);
        assert_eq!(raw(cache.ids()), vec![1, 2]);
    }

    #[test]
    fn pending_sections_are_tracked_but_not_returned() {
        let mut cache = SectionCache::new();
        assert!(cache.ensure_loading(sid(3)));
        assert!(!cache.ensure_loading(sid(3)));
        assert_eq!(cache.len(), 1);

        assert!(cache.get(sid(3)).is_none());
        assert_eq!(cache.first_unused(), 1);

        cache.on_loaded(sid(3), leaf("three")).unwrap();
        assert!(cache.is_ready(sid(3)));
        assert!(cache.get(sid(3)).is_some());
        // ready sections are not reloaded
        assert!(!cache.ensure_loading(sid(3)));
    }

    #[test]
    fn eviction_never_removes_pending_sections() {
        let mut cache = primed(&[1, 2]);
        cache.ensure_loading(sid(3));
        cache.ensure_loading(sid(4));
        cache.reset_usage();

        let evicted = cache.evict_excess(1);
        assert!(evicted.is_empty());
        assert_eq!(cache.len(), 4);
        assert!(cache.contains(sid(3)) && cache.contains(sid(4)));
    }

    #[test]
    fn eviction_stops_at_pending_even_when_over_capacity() {
        let mut cache = primed(&[1, 2]);
        cache.ensure_loading(sid(3));
        for id in [4, 5] {
            cache.ensure_loading(sid(id));
            cache.on_loaded(sid(id), leaf("x")).unwrap();
        }
        cache.reset_usage();

        // [1, 2, 3(pending), 4, 5]
        assert_eq!(raw(cache.evict_excess(1)), vec![5, 4]);
        assert_eq!(raw(cache.ids()), vec![1, 2, 3]);
    }

    #[test]
    fn eviction_spares_the_used_segment() {
        let mut cache = primed(&[1, 2, 3, 4]);
        cache.reset_usage();
        cache.get(sid(3));
        cache.get(sid(4));

        assert_eq!(raw(cache.evict_excess(0)), vec![2, 1]);
        assert_eq!(raw(cache.ids()), vec![3, 4]);
    }

    #[test]
    fn readiness_is_set_once() {
        let mut cache = SectionCache::new();
        assert!(matches!(
            cache.on_loaded(sid(2), leaf("two")),
            Err(WarningError::UnknownSection { section: 2 })
        ));

        cache.ensure_loading(sid(2));
        cache.on_loaded(sid(2), leaf("two")).unwrap();
        assert!(matches!(
            cache.on_loaded(sid(2), leaf("again")),
            Err(WarningError::DuplicateDelivery { section: 2 })
        ));
        let root = cache.get(sid(2)).unwrap();
        assert_eq!(root.hash_path(), Some("File:two/"));
    }

    #[test]
    fn root_without_members_is_refused() {
        let mut cache = primed(&[1]);
        cache.ensure_loading(sid(2));
        assert!(matches!(
            cache.on_loaded(sid(2), Entry::explicit_file("lib.rs")),
            Err(WarningError::InvalidSectionRoot { section: 2, kind: "ExplicitFile" })
        ));
        // dropped like a failed fetch, so it can be requested again
        assert!(!cache.contains(sid(2)));
        assert!(cache.ensure_loading(sid(2)));

        assert!(matches!(
            cache.on_loaded(sid(2), Entry::dynamic("x", "File:x/", sid(3))),
            Err(WarningError::InvalidSectionRoot { kind: "DynamicFolder", .. })
        ));
    }

    #[test]
    fn forget_pending_only_drops_unready() {
        let mut cache = primed(&[1]);
        cache.ensure_loading(sid(2));
        cache.reset_usage();
        cache.get(sid(2));
        assert_eq!(cache.first_unused(), 1);

        assert!(!cache.forget_pending(sid(1)));
        assert!(cache.forget_pending(sid(2)));
        assert_eq!(cache.first_unused(), 0);
        assert!(!cache.contains(sid(2)));
        assert!(cache.ensure_loading(sid(2)));
    }
}
