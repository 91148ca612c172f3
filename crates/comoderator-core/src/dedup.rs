//! Chat entry deduplication.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use sha2::{Digest, Sha256};

use comoderator_protocols::ChatEntry;

/// Default ceiling of a [`SeenSet`].
pub const DEFAULT_SEEN_CAPACITY: usize = 1000;

/// Deterministic fingerprint of a chat entry's `(sender, text, observed_at)`.
///
/// This is a dedup key, not a message ID: two entries with equal fields are
/// the same identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageIdentity(String);

impl MessageIdentity {
    pub fn of(entry: &ChatEntry) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(entry.sender.as_bytes());
        hasher.update([0u8]);
        hasher.update(entry.text.as_bytes());
        hasher.update([0u8]);
        hasher.update(entry.observed_at.as_bytes());
        Self(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bounded, insertion-ordered set of already seen identities.
///
/// When an insert pushes the size past the ceiling, only the most recently
/// inserted `ceiling / 2` identities are kept. An entry identical to one that
/// was pruned will be seen as new again.
#[derive(Debug)]
pub struct SeenSet {
    order: VecDeque<MessageIdentity>,
    members: HashSet<MessageIdentity>,
    ceiling: usize,
}

impl SeenSet {
    /// Create a set; ceilings below 2 are raised to 2.
    pub fn new(ceiling: usize) -> Self {
        let ceiling = ceiling.max(2);
        Self {
            order: VecDeque::with_capacity(ceiling + 1),
            members: HashSet::with_capacity(ceiling + 1),
            ceiling,
        }
    }

    /// Insert `id`. Returns `false` if it was already present.
    pub fn insert(&mut self, id: MessageIdentity) -> bool {
        if !self.members.insert(id.clone()) {
            return false;
        }
        self.order.push_back(id);

        if self.order.len() > self.ceiling {
            self.prune();
        }
        true
    }

    pub fn contains(&self, id: &MessageIdentity) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    fn prune(&mut self) {
        let keep = self.ceiling / 2;
        while self.order.len() > keep {
            if let Some(oldest) = self.order.pop_front() {
                self.members.remove(&oldest);
            }
        }
    }
}

impl Default for SeenSet {
    fn default() -> Self {
        Self::new(DEFAULT_SEEN_CAPACITY)
    }
}

#[cfg(test)]
#[path = "dedup_tests.rs"]
mod tests;
