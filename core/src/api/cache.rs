//! Cache of compiled expressions, keyed by tree fingerprint.

use super::Expression;
use alloc::sync::Arc;
use core::sync::atomic::{AtomicUsize, Ordering};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

/// Bounded map from tree fingerprint (see `Node::fingerprint`) to compiled
/// expression.
///
/// Entries are never evicted. Once `capacity` entries are held, further
/// expressions are still compiled by the caller but not retained.
#[derive(Debug)]
pub struct ExpressionCache {
    entries: DashMap<u64, Arc<Expression>>,
    /// Slots taken by held entries plus inserts in flight. Never exceeds
    /// `capacity`.
    reserved: AtomicUsize,
    capacity: usize,
}

impl ExpressionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            reserved: AtomicUsize::new(0),
            capacity,
        }
    }

    pub fn get(&self, key: u64) -> Option<Arc<Expression>> {
        self.entries.get(&key).map(|entry| Arc::clone(entry.value()))
    }

    /// Return the cached expression for `key`, or compile and maybe keep a
    /// new one. When two threads race on the same key, both compile and the
    /// first insert wins.
    pub fn get_or_try_insert_with<E>(
        &self,
        key: u64,
        compile: impl FnOnce() -> Result<Expression, E>,
    ) -> Result<Arc<Expression>, E> {
        if let Some(expression) = self.get(key) {
            return Ok(expression);
        }
        let expression = Arc::new(compile()?);
        if !self.reserve() {
            debug!(
                source = expression.source(),
                capacity = self.capacity,
                "Expression cache full, not caching"
            );
            return Ok(expression);
        }
        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                self.reserved.fetch_sub(1, Ordering::AcqRel);
                Ok(Arc::clone(entry.get()))
            }
            Entry::Vacant(entry) => Ok(Arc::clone(entry.insert(expression).value())),
        }
    }

    fn reserve(&self) -> bool {
        self.reserved
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |taken| {
                (taken < self.capacity).then_some(taken + 1)
            })
            .is_ok()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry. Inserts running concurrently keep their slots.
    pub fn clear(&self) {
        self.entries.retain(|_, _| {
            self.reserved.fetch_sub(1, Ordering::AcqRel);
            false
        });
    }
}
