//! Process-wide, per-type caches keyed by `TypeId`.
//!
//! Values are built outside the lock and inserted with first-write-wins, so
//! racing first users may both compute but every caller observes the same
//! `Arc` and never a partially built value.

use std::{
    any::TypeId,
    collections::BTreeMap,
    sync::{Arc, PoisonError, RwLock},
};

///
/// TypeCache
///

pub(crate) struct TypeCache<T> {
    entries: RwLock<BTreeMap<TypeId, Arc<T>>>,
}

impl<T> TypeCache<T> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Return the cached value for `K`, building it with `init` on first use.
    pub(crate) fn get_or_init<K: 'static>(&self, init: impl FnOnce() -> T) -> Arc<T> {
        let key = TypeId::of::<K>();

        if let Some(found) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Arc::clone(found);
        }

        // `init` may itself consult this cache for nested types, so it runs
        // without holding the lock.
        let built = Arc::new(init());

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(entries.entry(key).or_insert(built))
    }
}
