//! Session-lifetime client state: one in-memory list cache per entity kind.
//!
//! The caches hold the most recently fetched collection and nothing else —
//! there is no durable persistence and no cross-instance invalidation. Two
//! `ClientState`s holding the same backend entity diverge silently until one
//! of them refetches; a full reload is the only universal resynchronization.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::types::{
    BrownBagRequest, CatalogCourse, EmployeeProfile, ProgressRecord, TrainingRequest,
};

/// An entity with a backend-assigned integer identity.
pub trait Keyed {
    fn key(&self) -> i64;
}

/// Holder of zero or one current collection for a single entity kind.
///
/// Lookups are linear scans; collection sizes are bounded by one
/// organization's catalog and roster, so no index is kept.
pub struct ListStore<T> {
    rows: Mutex<Vec<T>>,
}

impl<T> Default for ListStore<T> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Keyed + Clone> ListStore<T> {
    /// Unconditionally overwrite the cached collection.
    ///
    /// Duplicate identities in the input collapse last-write-wins, so the
    /// store never holds two elements with the same key.
    pub fn replace(&self, collection: Vec<T>) {
        let mut deduped: Vec<T> = Vec::with_capacity(collection.len());
        for row in collection {
            match deduped.iter_mut().find(|r| r.key() == row.key()) {
                Some(existing) => *existing = row,
                None => deduped.push(row),
            }
        }
        *self.rows.lock() = deduped;
    }

    /// Patch the single element whose key matches. No-op when absent.
    ///
    /// Returns whether a row was changed.
    pub fn update_one(&self, key: i64, patch: impl FnOnce(&mut T)) -> bool {
        let mut rows = self.rows.lock();
        match rows.iter_mut().find(|r| r.key() == key) {
            Some(row) => {
                patch(row);
                true
            }
            None => false,
        }
    }

    /// Replace a whole row by its key. No-op when absent.
    pub fn put(&self, row: T) -> bool {
        let key = row.key();
        self.update_one(key, |r| *r = row)
    }

    pub fn get(&self, key: i64) -> Option<T> {
        self.rows.lock().iter().find(|r| r.key() == key).cloned()
    }

    /// Clone of the current collection, safe to project on every render.
    pub fn snapshot(&self) -> Vec<T> {
        self.rows.lock().clone()
    }

    pub fn clear(&self) {
        self.rows.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().is_empty()
    }
}

/// Which decision endpoint an in-flight admin action is calling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
    Approve,
    Reject,
}

/// Marker for the one decision action allowed in flight across a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAction {
    pub request_id: i64,
    pub kind: DecisionKind,
}

/// The shared state object every view holds.
pub struct ClientState {
    pub catalog: ListStore<CatalogCourse>,
    pub progress: ListStore<ProgressRecord>,
    pub training_requests: ListStore<TrainingRequest>,
    pub brown_bags: ListStore<BrownBagRequest>,
    pub roster: ListStore<EmployeeProfile>,
    pending_action: Mutex<Option<PendingAction>>,
    epoch: AtomicU64,
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientState {
    pub fn new() -> Self {
        Self {
            catalog: ListStore::default(),
            progress: ListStore::default(),
            training_requests: ListStore::default(),
            brown_bags: ListStore::default(),
            roster: ListStore::default(),
            pending_action: Mutex::new(None),
            epoch: AtomicU64::new(0),
        }
    }

    /// Claim the decision slot. Fails while another decision is outstanding;
    /// the trigger that issued it stays disabled until the guard drops.
    pub fn begin_decision(
        &self,
        request_id: i64,
        kind: DecisionKind,
    ) -> Option<DecisionGuard<'_>> {
        let mut slot = self.pending_action.lock();
        if slot.is_some() {
            return None;
        }
        *slot = Some(PendingAction { request_id, kind });
        Some(DecisionGuard { state: self })
    }

    pub fn pending_action(&self) -> Option<PendingAction> {
        *self.pending_action.lock()
    }

    /// Mint a scope token tied to the current cache generation. Loaders check
    /// it before writing fetched data back, so a response that lands after
    /// its view went away is discarded instead of clobbering shared state.
    pub fn current_scope(&self) -> ViewScope {
        ViewScope {
            epoch: self.epoch.load(Ordering::Acquire),
        }
    }

    /// Invalidate every outstanding scope token (view unmount, navigation,
    /// or a newer refresh superseding older in-flight fetches).
    pub fn invalidate_scopes(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
    }

    pub fn scope_is_current(&self, scope: ViewScope) -> bool {
        self.epoch.load(Ordering::Acquire) == scope.epoch
    }

    /// Drop every cached collection. Used at logout.
    pub fn clear_all(&self) {
        self.catalog.clear();
        self.progress.clear();
        self.training_requests.clear();
        self.brown_bags.clear();
        self.roster.clear();
        self.invalidate_scopes();
    }
}

/// Releases the decision slot when the action settles.
pub struct DecisionGuard<'a> {
    state: &'a ClientState,
}

impl Drop for DecisionGuard<'_> {
    fn drop(&mut self) {
        *self.state.pending_action.lock() = None;
    }
}

/// Token pinning a fetch to the cache generation it started under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewScope {
    epoch: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        label: String,
    }

    impl Keyed for Row {
        fn key(&self) -> i64 {
            self.id
        }
    }

    fn row(id: i64, label: &str) -> Row {
        Row {
            id,
            label: label.to_string(),
        }
    }

    #[test]
    fn replace_collapses_duplicate_identities() {
        let store = ListStore::default();
        store.replace(vec![row(1, "a"), row(2, "b"), row(1, "c")]);

        let rows = store.snapshot();
        assert_eq!(rows.len(), 2);
        // Last write wins for the duplicated key.
        assert_eq!(rows[0], row(1, "c"));
        assert_eq!(rows[1], row(2, "b"));

        // Repeated replaces keep the invariant.
        store.replace(vec![row(2, "x"), row(2, "y")]);
        assert_eq!(store.snapshot(), vec![row(2, "y")]);
    }

    #[test]
    fn update_one_missing_key_is_noop() {
        let store = ListStore::default();
        store.replace(vec![row(1, "a"), row(2, "b")]);

        let changed = store.update_one(99, |r| r.label = "zap".to_string());
        assert!(!changed);
        assert_eq!(store.snapshot(), vec![row(1, "a"), row(2, "b")]);
    }

    #[test]
    fn update_one_patches_only_the_match() {
        let store = ListStore::default();
        store.replace(vec![row(1, "a"), row(2, "b"), row(3, "c")]);

        assert!(store.update_one(2, |r| r.label = "patched".to_string()));
        assert_eq!(
            store.snapshot(),
            vec![row(1, "a"), row(2, "patched"), row(3, "c")]
        );
    }

    #[test]
    fn put_replaces_whole_row_and_ignores_missing() {
        let store = ListStore::default();
        store.replace(vec![row(1, "a")]);

        assert!(store.put(row(1, "swapped")));
        assert_eq!(store.get(1), Some(row(1, "swapped")));

        assert!(!store.put(row(7, "ghost")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn decision_slot_admits_one_action() {
        let state = ClientState::new();
        let guard = state
            .begin_decision(5, DecisionKind::Approve)
            .expect("slot free");
        assert_eq!(
            state.pending_action(),
            Some(PendingAction {
                request_id: 5,
                kind: DecisionKind::Approve
            })
        );

        // A second action anywhere in the list is refused while one is out.
        assert!(state.begin_decision(6, DecisionKind::Reject).is_none());

        drop(guard);
        assert!(state.pending_action().is_none());
        assert!(state.begin_decision(6, DecisionKind::Reject).is_some());
    }

    #[test]
    fn scope_tokens_invalidate_together() {
        let state = ClientState::new();
        let scope = state.current_scope();
        assert!(state.scope_is_current(scope));

        state.invalidate_scopes();
        assert!(!state.scope_is_current(scope));
        assert!(state.scope_is_current(state.current_scope()));
    }
}
