//! Staggered reveal-on-scroll for freshly mounted cards.
//!
//! Cards are registered when mounted. When registered cards scroll into view
//! they are scheduled one `stagger` apart, in the order they were seen, and
//! marked revealed once their deadline passes. A revealed card is never
//! scheduled again.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Delay between consecutive reveals in one batch.
pub const DEFAULT_STAGGER: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub struct RevealTracker<K> {
    stagger: Duration,
    /// Mounted but not yet seen in the viewport.
    observed: HashSet<K>,
    /// Seen, waiting for their deadline.
    scheduled: HashMap<K, Instant>,
    revealed: HashSet<K>,
}

impl<K: Copy + Eq + Hash> RevealTracker<K> {
    pub fn new(stagger: Duration) -> Self {
        Self {
            stagger,
            observed: HashSet::new(),
            scheduled: HashMap::new(),
            revealed: HashSet::new(),
        }
    }

    /// Start observing `key`. No-op for keys already observed, scheduled or revealed.
    pub fn register(&mut self, key: K) {
        if self.revealed.contains(&key) || self.scheduled.contains_key(&key) {
            return;
        }
        self.observed.insert(key);
    }

    /// Schedule every observed key among `visible`, in iteration order.
    ///
    /// Returns how many keys were newly scheduled.
    pub fn intersect<I>(&mut self, visible: I, now: Instant) -> usize
    where
        I: IntoIterator<Item = K>,
    {
        let mut index: u32 = 0;
        for key in visible {
            if self.observed.remove(&key) {
                self.scheduled.insert(key, now + self.stagger * index);
                index = index.saturating_add(1);
            }
        }
        index as usize
    }

    /// Reveal every scheduled key whose deadline has passed.
    ///
    /// Returns the number of keys revealed by this call.
    pub fn advance(&mut self, now: Instant) -> usize {
        let due: Vec<K> = self
            .scheduled
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, _)| *key)
            .collect();
        for key in &due {
            self.scheduled.remove(key);
            self.revealed.insert(*key);
        }
        due.len()
    }

    pub fn is_revealed(&self, key: &K) -> bool {
        self.revealed.contains(key)
    }

    /// Anything still waiting to be seen or revealed.
    pub fn has_pending(&self) -> bool {
        !self.observed.is_empty() || !self.scheduled.is_empty()
    }

    /// Forget keys whose nodes were unmounted.
    pub fn clear(&mut self) {
        self.observed.clear();
        self.scheduled.clear();
        self.revealed.clear();
    }
}

impl<K: Copy + Eq + Hash> Default for RevealTracker<K> {
    fn default() -> Self {
        Self::new(DEFAULT_STAGGER)
    }
}
