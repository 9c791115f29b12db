//! # Listener registry - per-event ordered subscriptions.
//!
//! Plain data structure owned by [`Emitter`](crate::Emitter) behind a mutex.
//! Nothing here schedules work or calls user code; the emitter takes what it
//! needs under the lock and acts on it after releasing the lock.
//!
//! ## Layout
//! ```text
//! buckets: HashMap<String, Bucket>
//!   "tick"        ─► [#1 Persistent(a), #2 Once(b), #3 Persistent(c)]  warned=false
//!   "newListener" ─► [#4 Persistent(spy)]                              warned=false
//! ```
//!
//! ## Rules
//! - Entries keep insertion order; that order is delivery order.
//! - Every entry gets a unique id; a publish pass works on the ids it
//!   snapshotted, so removals never shift its cursor.
//! - A bucket is dropped as soon as it is empty, which also resets `warned`.

use std::collections::HashMap;

use crate::diagnostics::LeakWarning;
use crate::listeners::Listener;

/// A registered listener and its delivery mode.
#[derive(Clone, Debug)]
pub(crate) enum Subscription {
    /// Delivered on every publish until removed.
    Persistent(Listener),
    /// Removed by the first publish pass that schedules it.
    Once(Listener),
}

impl Subscription {
    pub(crate) fn listener(&self) -> &Listener {
        match self {
            Subscription::Persistent(l) | Subscription::Once(l) => l,
        }
    }

    fn is_once(&self) -> bool {
        matches!(self, Subscription::Once(_))
    }
}

#[derive(Debug)]
struct Entry {
    id: u64,
    sub: Subscription,
}

#[derive(Debug, Default)]
struct Bucket {
    entries: Vec<Entry>,
    warned: bool,
}

/// Ordered subscriptions for every event name of one emitter.
#[derive(Debug)]
pub(crate) struct Registry {
    buckets: HashMap<String, Bucket>,
    max_listeners: usize,
    next_id: u64,
}

impl Registry {
    /// Creates an empty registry with the given leak threshold (`0` = unlimited).
    pub(crate) fn new(max_listeners: usize) -> Self {
        Self {
            buckets: HashMap::new(),
            max_listeners,
            next_id: 0,
        }
    }

    pub(crate) fn max_listeners(&self) -> usize {
        self.max_listeners
    }

    pub(crate) fn set_max_listeners(&mut self, n: usize) {
        self.max_listeners = n;
    }

    /// Appends a subscription and evaluates the leak heuristic.
    ///
    /// Returns the warning to report if this append crossed the limit for the
    /// first time since the bucket was created.
    pub(crate) fn add(&mut self, event: String, sub: Subscription) -> Option<LeakWarning> {
        self.next_id += 1;
        let id = self.next_id;
        let max = self.max_listeners;

        let bucket = self.buckets.entry(event.clone()).or_default();
        bucket.entries.push(Entry { id, sub });

        if max != 0 && bucket.entries.len() > max && !bucket.warned {
            bucket.warned = true;
            return Some(LeakWarning {
                event,
                count: bucket.entries.len(),
                max,
            });
        }
        None
    }

    /// Runs the bookkeeping half of a publish pass.
    ///
    /// Snapshots the bucket in FIFO order and removes every `Once` entry of the
    /// snapshot from the live bucket. Returns the listeners to invoke, or an
    /// empty vector if the name has no bucket.
    pub(crate) fn take_for_publish(&mut self, event: &str) -> Vec<Listener> {
        let Some(bucket) = self.buckets.get_mut(event) else {
            return Vec::new();
        };

        let snapshot: Vec<(u64, Subscription)> = bucket
            .entries
            .iter()
            .map(|e| (e.id, e.sub.clone()))
            .collect();

        let consumed: Vec<u64> = snapshot
            .iter()
            .filter(|(_, sub)| sub.is_once())
            .map(|(id, _)| *id)
            .collect();
        if !consumed.is_empty() {
            bucket.entries.retain(|e| !consumed.contains(&e.id));
            self.drop_if_empty(event);
        }

        snapshot
            .into_iter()
            .map(|(_, sub)| match sub {
                Subscription::Persistent(l) | Subscription::Once(l) => l,
            })
            .collect()
    }

    /// Id of the first entry whose listener is identity-equal to `listener`.
    pub(crate) fn find(&self, event: &str, listener: &Listener) -> Option<u64> {
        self.buckets
            .get(event)?
            .entries
            .iter()
            .find(|e| e.sub.listener().ptr_eq(listener))
            .map(|e| e.id)
    }

    /// Removes the entry with the given id. Returns whether it was still present.
    pub(crate) fn remove_id(&mut self, event: &str, id: u64) -> bool {
        let Some(bucket) = self.buckets.get_mut(event) else {
            return false;
        };
        let before = bucket.entries.len();
        bucket.entries.retain(|e| e.id != id);
        let removed = bucket.entries.len() != before;
        self.drop_if_empty(event);
        removed
    }

    /// Drops one bucket (`Some`) or all of them (`None`).
    pub(crate) fn clear(&mut self, event: Option<&str>) {
        match event {
            Some(name) => {
                self.buckets.remove(name);
            }
            None => self.buckets.clear(),
        }
    }

    pub(crate) fn contains(&self, event: &str) -> bool {
        self.buckets.contains_key(event)
    }

    pub(crate) fn listeners(&self, event: &str) -> Vec<Listener> {
        self.buckets
            .get(event)
            .map(|b| b.entries.iter().map(|e| e.sub.listener().clone()).collect())
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, event: &str) -> usize {
        self.buckets.get(event).map_or(0, |b| b.entries.len())
    }

    pub(crate) fn is_warned(&self, event: &str) -> bool {
        self.buckets.get(event).is_some_and(|b| b.warned)
    }

    /// Returns sorted list of event names that have at least one subscription.
    pub(crate) fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.buckets.keys().cloned().collect();
        names.sort();
        names
    }

    fn drop_if_empty(&mut self, event: &str) {
        if self.buckets.get(event).is_some_and(|b| b.entries.is_empty()) {
            self.buckets.remove(event);
        }
    }
}
