//! Recycle Pool
//!
//! Queue of inactive entity handles for one category of pooled object.
//! Objects themselves live in a slot map owned by the caller, so several
//! pools can share a single store while keeping their own free queues.
//!
//! Invariant: a key is either queued here (and its object inactive) or its
//! object is active in the world. Never both.

use std::collections::VecDeque;

use slotmap::{Key, SlotMap};

use crate::foundation::math::Vec2;

/// Behavior every pooled object provides to its pool
pub trait Poolable {
    /// Whether the object is currently in the world
    fn is_active(&self) -> bool;

    /// Move the object to a spawn position
    fn place(&mut self, position: Vec2);

    /// Clear transient state before reuse. Must not touch the position.
    fn reset_state(&mut self);

    /// Show or hide the object
    fn set_active(&mut self, active: bool);
}

/// Where an acquired object came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireSource {
    /// Reused from the free queue
    Pooled,
    /// Instantiated because the queue was empty
    Created,
}

/// Result of a successful acquire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acquired<K> {
    /// Handle of the now-active object
    pub key: K,
    /// Whether the object was reused or freshly created
    pub source: AcquireSource,
}

/// Result of a release request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Object was deactivated and queued for reuse
    Requeued,
    /// Object was already inactive; nothing happened
    AlreadyInactive,
    /// Key does not refer to a live object
    Unknown,
}

/// Free queue for one category of pooled objects
#[derive(Debug)]
pub struct RecyclePool<K: Key> {
    label: String,
    inactive: VecDeque<K>,
    created: usize,
}

impl<K: Key> RecyclePool<K> {
    /// Create an empty pool; the label only appears in log output
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            inactive: VecDeque::new(),
            created: 0,
        }
    }

    /// Pre-instantiate up to `count` inactive objects.
    ///
    /// `create` may return `None` when nothing can be built; warm-up then
    /// stops early. Returns the number of objects actually queued.
    pub fn warm_up<T: Poolable>(
        &mut self,
        store: &mut SlotMap<K, T>,
        count: usize,
        mut create: impl FnMut() -> Option<T>,
    ) -> usize {
        let mut queued = 0;
        for _ in 0..count {
            let Some(mut object) = create() else {
                log::warn!("[{}] warm-up stopped after {} objects: nothing to instantiate", self.label, queued);
                break;
            };
            object.set_active(false);
            let key = store.insert(object);
            self.inactive.push_back(key);
            self.created += 1;
            queued += 1;
        }
        log::debug!("[{}] warmed up with {} objects", self.label, queued);
        queued
    }

    /// Take an object out of the pool, creating one if the queue is empty.
    ///
    /// Reused objects are placed, reset, then activated. Growth is unbounded.
    pub fn acquire<T: Poolable>(
        &mut self,
        store: &mut SlotMap<K, T>,
        position: Vec2,
        create: impl FnOnce() -> Option<T>,
    ) -> Option<Acquired<K>> {
        self.acquire_avoiding(store, position, |_| false, 0, create)
    }

    /// Like [`acquire`](Self::acquire) but skips queued objects for which
    /// `is_repeat` holds, retrying at most `retries` times.
    ///
    /// Skipped objects go to the back of the queue. If every retry still
    /// yields a repeat, the last candidate is used anyway.
    pub fn acquire_avoiding<T: Poolable>(
        &mut self,
        store: &mut SlotMap<K, T>,
        position: Vec2,
        is_repeat: impl Fn(&T) -> bool,
        retries: usize,
        create: impl FnOnce() -> Option<T>,
    ) -> Option<Acquired<K>> {
        let Some(mut candidate) = self.pop_live(store) else {
            let object = create()?;
            let key = store.insert(object);
            self.created += 1;
            Self::activate(store, key, position);
            log::debug!("[{}] pool empty, instantiated new object ({} total)", self.label, self.created);
            return Some(Acquired { key, source: AcquireSource::Created });
        };

        if retries > 0 && !self.inactive.is_empty() && is_repeat(&store[candidate]) {
            self.inactive.push_back(candidate);
            for attempt in 0..retries {
                let Some(next) = self.pop_live(store) else { break };
                candidate = next;
                if !is_repeat(&store[candidate]) {
                    break;
                }
                if attempt + 1 < retries {
                    self.inactive.push_back(candidate);
                }
            }
        }

        Self::activate(store, candidate, position);
        Some(Acquired { key: candidate, source: AcquireSource::Pooled })
    }

    /// Deactivate an object and queue it for reuse.
    ///
    /// Only active objects are accepted, which makes double release a no-op.
    pub fn release<T: Poolable>(&mut self, store: &mut SlotMap<K, T>, key: K) -> ReleaseOutcome {
        let Some(object) = store.get_mut(key) else {
            log::warn!("[{}] release of unknown object ignored", self.label);
            return ReleaseOutcome::Unknown;
        };
        if !object.is_active() {
            return ReleaseOutcome::AlreadyInactive;
        }
        object.set_active(false);
        self.inactive.push_back(key);
        ReleaseOutcome::Requeued
    }

    /// Number of objects waiting in the queue
    pub fn len(&self) -> usize {
        self.inactive.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.inactive.is_empty()
    }

    /// Whether `key` is currently queued
    pub fn contains(&self, key: K) -> bool {
        self.inactive.contains(&key)
    }

    /// Total objects this pool has instantiated, warm-up included
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// Log label of this pool
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Pop the front key that still refers to a live, inactive object.
    /// Stale keys (objects destroyed elsewhere) are dropped.
    fn pop_live<T: Poolable>(&mut self, store: &SlotMap<K, T>) -> Option<K> {
        while let Some(key) = self.inactive.pop_front() {
            match store.get(key) {
                Some(object) if !object.is_active() => return Some(key),
                Some(_) => log::error!("[{}] active object found in free queue, dropping entry", self.label),
                None => log::debug!("[{}] dropping stale pool entry", self.label),
            }
        }
        None
    }

    fn activate<T: Poolable>(store: &mut SlotMap<K, T>, key: K, position: Vec2) {
        let object = &mut store[key];
        object.place(position);
        object.reset_state();
        object.set_active(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::EntityId;

    #[derive(Debug)]
    struct Crate {
        tag: u8,
        active: bool,
        position: Vec2,
        resets: u32,
    }

    impl Crate {
        fn new(tag: u8) -> Self {
            Self { tag, active: true, position: Vec2::zeros(), resets: 0 }
        }
    }

    impl Poolable for Crate {
        fn is_active(&self) -> bool {
            self.active
        }

        fn place(&mut self, position: Vec2) {
            self.position = position;
        }

        fn reset_state(&mut self) {
            self.resets += 1;
        }

        fn set_active(&mut self, active: bool) {
            self.active = active;
        }
    }

    fn warmed(tags: &[u8]) -> (RecyclePool<EntityId>, SlotMap<EntityId, Crate>) {
        let mut pool = RecyclePool::new("test");
        let mut store = SlotMap::with_key();
        let mut tags = tags.iter().copied();
        pool.warm_up(&mut store, 16, || tags.next().map(Crate::new));
        (pool, store)
    }

    fn assert_exclusive(pool: &RecyclePool<EntityId>, store: &SlotMap<EntityId, Crate>) {
        for (key, object) in store {
            assert!(!(object.active && pool.contains(key)), "object both active and queued");
        }
    }

    #[test]
    fn test_warm_up_queues_inactive() {
        let (pool, store) = warmed(&[1, 2, 3]);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.created_count(), 3);
        assert!(store.values().all(|c| !c.active));
    }

    #[test]
    fn test_acquire_places_resets_and_activates() {
        let (mut pool, mut store) = warmed(&[1]);
        let acquired = pool
            .acquire(&mut store, Vec2::new(11.0, 0.5), || None)
            .expect("pooled object");

        assert_eq!(acquired.source, AcquireSource::Pooled);
        let object = &store[acquired.key];
        assert!(object.active);
        assert_eq!(object.position, Vec2::new(11.0, 0.5));
        assert_eq!(object.resets, 1);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_empty_pool_grows() {
        let (mut pool, mut store) = warmed(&[]);
        let acquired = pool
            .acquire(&mut store, Vec2::zeros(), || Some(Crate::new(9)))
            .expect("created object");
        assert_eq!(acquired.source, AcquireSource::Created);
        assert_eq!(pool.created_count(), 1);
        assert!(store[acquired.key].active);
    }

    #[test]
    fn test_nothing_to_create_returns_none() {
        let (mut pool, mut store) = warmed(&[]);
        assert!(pool.acquire(&mut store, Vec2::zeros(), || None).is_none());
    }

    #[test]
    fn test_release_is_idempotent() {
        let (mut pool, mut store) = warmed(&[1]);
        let key = pool.acquire(&mut store, Vec2::zeros(), || None).unwrap().key;

        assert_eq!(pool.release(&mut store, key), ReleaseOutcome::Requeued);
        assert_eq!(pool.release(&mut store, key), ReleaseOutcome::AlreadyInactive);
        assert_eq!(pool.len(), 1);
        assert_exclusive(&pool, &store);
    }

    #[test]
    fn test_release_unknown_key() {
        let (mut pool, mut store) = warmed(&[1]);
        let key = pool.acquire(&mut store, Vec2::zeros(), || None).unwrap().key;
        store.remove(key);
        assert_eq!(pool.release(&mut store, key), ReleaseOutcome::Unknown);
    }

    #[test]
    fn test_stale_entries_are_skipped() {
        let (mut pool, mut store) = warmed(&[1, 2]);
        let first = *pool.inactive.front().unwrap();
        store.remove(first);

        let acquired = pool.acquire(&mut store, Vec2::zeros(), || None).unwrap();
        assert_eq!(store[acquired.key].tag, 2);
    }

    #[test]
    fn test_avoiding_skips_repeat() {
        let (mut pool, mut store) = warmed(&[1, 1, 2]);
        let acquired = pool
            .acquire_avoiding(&mut store, Vec2::zeros(), |c| c.tag == 1, 3, || None)
            .unwrap();
        assert_eq!(store[acquired.key].tag, 2);
        assert_eq!(pool.len(), 2);
        assert_exclusive(&pool, &store);
    }

    #[test]
    fn test_avoiding_accepts_repeat_when_exhausted() {
        let (mut pool, mut store) = warmed(&[1, 1, 1, 1, 1, 2]);
        let acquired = pool
            .acquire_avoiding(&mut store, Vec2::zeros(), |c| c.tag == 1, 3, || None)
            .unwrap();
        // Front candidate plus three retries all matched; the 2 is never reached
        assert_eq!(store[acquired.key].tag, 1);
        assert_eq!(pool.len(), 5);
        assert_exclusive(&pool, &store);
    }

    #[test]
    fn test_avoiding_with_single_entry_takes_it() {
        let (mut pool, mut store) = warmed(&[1]);
        let acquired = pool
            .acquire_avoiding(&mut store, Vec2::zeros(), |c| c.tag == 1, 3, || None)
            .unwrap();
        assert_eq!(store[acquired.key].tag, 1);
        assert!(pool.is_empty());
    }
}
