//! Owned profile state with recompute-and-notify on every write.
//!
//! The store is the single writer path for the profile. After each accepted
//! update it recomputes [`DerivedMetrics`] once and hands the same snapshot to
//! every registered observer, in registration order.

use serde::Serialize;

use crate::derived::{compute_derived, DerivedMetrics};
use crate::error::ProfileError;
use crate::logging::{log_invalid_key, log_profile_update, log_recompute};
use crate::profile::{MetricKey, Profile};

/// Outcome of one accepted update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileChange {
    pub key: MetricKey,
    pub requested: i64,
    pub previous: u8,
    pub stored: u8,
}

impl ProfileChange {
    /// True when the requested value was outside [0, 100].
    pub fn clamped(&self) -> bool {
        self.requested != self.stored as i64
    }
}

/// What observers receive after each write.
#[derive(Debug)]
pub struct Notification<'a> {
    pub update_seq: u64,
    /// `None` for a reset.
    pub change: Option<ProfileChange>,
    pub profile: &'a Profile,
    pub derived: &'a DerivedMetrics,
}

pub type Observer = Box<dyn FnMut(&Notification<'_>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(usize);

pub struct ProfileStore {
    profile: Profile,
    defaults: Profile,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: usize,
    update_seq: u64,
    log_updates: bool,
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new(Profile::default())
    }
}

impl ProfileStore {
    pub fn new(initial: Profile) -> Self {
        Self {
            profile: initial,
            defaults: initial,
            observers: Vec::new(),
            next_observer: 0,
            update_seq: 0,
            log_updates: true,
        }
    }

    pub fn with_update_logging(mut self, enabled: bool) -> Self {
        self.log_updates = enabled;
        self
    }

    /// Current snapshot.
    pub fn get(&self) -> &Profile {
        &self.profile
    }

    pub fn value(&self, key: MetricKey) -> u8 {
        self.profile.get(key)
    }

    /// Number of accepted writes (updates and resets) so far.
    pub fn update_seq(&self) -> u64 {
        self.update_seq
    }

    /// Derived metrics for the current snapshot.
    pub fn derived(&self) -> DerivedMetrics {
        compute_derived(&self.profile)
    }

    /// Store `value` for `key`, clamped to [0, 100], then notify.
    pub fn set(&mut self, key: MetricKey, value: i64) -> ProfileChange {
        let previous = self.profile.get(key);
        let stored = self.profile.set(key, value);
        self.update_seq += 1;
        let change = ProfileChange {
            key,
            requested: value,
            previous,
            stored,
        };
        if self.log_updates {
            log_profile_update(self.update_seq, key, value, previous, stored);
        }
        self.notify(Some(change));
        change
    }

    /// String-keyed entry point for callers holding a raw metric name.
    ///
    /// Unknown names fail with [`ProfileError::InvalidKey`] and leave the
    /// profile, the sequence number and the observers untouched.
    pub fn set_by_name(&mut self, key: &str, value: i64) -> Result<ProfileChange, ProfileError> {
        let key = key.parse::<MetricKey>().map_err(|err| {
            log_invalid_key(key);
            err
        })?;
        Ok(self.set(key, value))
    }

    /// Restore the profile the store was created with.
    pub fn reset(&mut self) {
        self.profile = self.defaults;
        self.update_seq += 1;
        self.notify(None);
    }

    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&Notification<'_>) + 'static,
    {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify(&mut self, change: Option<ProfileChange>) {
        let derived = compute_derived(&self.profile);
        log_recompute(self.update_seq, self.observers.len(), derived.overall_score);
        let note = Notification {
            update_seq: self.update_seq,
            change,
            profile: &self.profile,
            derived: &derived,
        };
        for (_, observer) in self.observers.iter_mut() {
            observer(&note);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_set_clamps_and_reports() {
        let mut store = ProfileStore::default().with_update_logging(false);
        let change = store.set(MetricKey::Energy, 140);
        assert_eq!(change.previous, 50);
        assert_eq!(change.stored, 100);
        assert!(change.clamped());
        assert_eq!(store.value(MetricKey::Energy), 100);
        assert_eq!(store.update_seq(), 1);
    }

    #[test]
    fn test_invalid_key_leaves_profile_unchanged() {
        let mut store = ProfileStore::default().with_update_logging(false);
        let before = *store.get();
        let err = store.set_by_name("happiness", 10).unwrap_err();
        assert_eq!(err, ProfileError::InvalidKey("happiness".to_string()));
        assert_eq!(*store.get(), before);
        assert_eq!(store.update_seq(), 0);
    }

    #[test]
    fn test_observers_notified_in_order_with_fresh_metrics() {
        let mut store = ProfileStore::default().with_update_logging(false);
        let seen: Rc<RefCell<Vec<(&'static str, u64, u32)>>> = Rc::new(RefCell::new(Vec::new()));

        let a = Rc::clone(&seen);
        store.subscribe(move |n| a.borrow_mut().push(("a", n.update_seq, n.derived.planet_health)));
        let b = Rc::clone(&seen);
        store.subscribe(move |n| b.borrow_mut().push(("b", n.update_seq, n.derived.planet_health)));

        store.set(MetricKey::Energy, 100);

        // (75 + 100) / 2 = 87.5 -> 88
        assert_eq!(*seen.borrow(), vec![("a", 1, 88), ("b", 1, 88)]);
    }

    #[test]
    fn test_invalid_key_does_not_notify() {
        let mut store = ProfileStore::default().with_update_logging(false);
        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        store.subscribe(move |_| *c.borrow_mut() += 1);

        assert!(store.set_by_name("Energy", 10).is_err());
        assert_eq!(*count.borrow(), 0);
        store.set_by_name("energy", 10).unwrap();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = ProfileStore::default().with_update_logging(false);
        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        let id = store.subscribe(move |_| *c.borrow_mut() += 1);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set(MetricKey::Diet, 1);
        assert_eq!(*count.borrow(), 0);
        assert_eq!(store.observer_count(), 0);
    }

    #[test]
    fn test_reset_restores_initial_and_notifies() {
        let initial = Profile::default().with(MetricKey::Social, 10);
        let mut store = ProfileStore::new(initial).with_update_logging(false);
        let resets = Rc::new(RefCell::new(0));
        let r = Rc::clone(&resets);
        store.subscribe(move |n| {
            if n.change.is_none() {
                *r.borrow_mut() += 1;
            }
        });
        store.set(MetricKey::Social, 90);
        store.reset();
        assert_eq!(*store.get(), initial);
        assert_eq!(*resets.borrow(), 1);
        assert_eq!(store.update_seq(), 2);
    }
}
