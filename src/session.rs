// src/session.rs

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Session-scoped mirror of each student's stored score total.
///
/// The store remains the single source of truth: this cache is only ever
/// overwritten from a value just read back from the store, never written
/// from application arithmetic, and never consulted when awarding points.
/// It exists so the (out-of-scope) UI layers can display a score without a
/// round trip, and it is passed into the reconciler explicitly rather than
/// living behind a hidden global.
#[derive(Clone, Default)]
pub struct ScoreCache {
    inner: Arc<RwLock<HashMap<i64, i64>>>,
}

impl ScoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached total for a student, if one has been loaded.
    pub fn get(&self, student_id: i64) -> Option<i64> {
        self.inner.read().ok()?.get(&student_id).copied()
    }

    /// Overwrites the cached total with a value read from the store.
    pub fn put(&self, student_id: i64, total: i64) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(student_id, total);
        }
    }

    /// Drops a student's entry, forcing the next read to hit the store.
    pub fn invalidate(&self, student_id: i64) {
        if let Ok(mut map) = self.inner.write() {
            map.remove(&student_id);
        }
    }
}
