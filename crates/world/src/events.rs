//! Block change notifications.
//!
//! Observers are invoked synchronously, in registration order, from inside
//! the mutating call. The registry lock is released before any callback
//! runs, so a callback may drop its own subscription.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde::Serialize;
use voxkernel_core::{BlockPos, BlockType, ChunkPos};

/// A successful edit, as seen by observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockChange {
    /// Edited position.
    pub pos: BlockPos,
    /// Chunk owning `pos`.
    pub chunk: ChunkPos,
    /// Block now at `pos`.
    pub block: BlockType,
}

type Callback = Arc<dyn Fn(&BlockChange) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    observers: BTreeMap<u64, Callback>,
}

/// Subscriber list with synchronous fan-out.
#[derive(Default, Clone)]
pub struct BlockObservers {
    registry: Arc<Mutex<Registry>>,
}

impl BlockObservers {
    /// Create an empty observer list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback; drop it again through the returned handle.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&BlockChange) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.observers.insert(id, Arc::new(callback));
        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Invoke every observer with `change`.
    pub fn notify(&self, change: &BlockChange) {
        let callbacks: Vec<Callback> = self.registry.lock().observers.values().cloned().collect();
        for callback in callbacks {
            callback(change);
        }
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.registry.lock().observers.len()
    }

    /// Returns true when nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for BlockObservers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockObservers")
            .field("subscribers", &self.len())
            .finish()
    }
}

/// Handle returned by [`BlockObservers::subscribe`].
///
/// Dropping the handle keeps the observer registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug)]
#[must_use = "the subscription handle is the only way to unsubscribe"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Remove the observer. Returns false if it was already gone.
    pub fn unsubscribe(self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.lock().observers.remove(&self.id).is_some(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(x: i32) -> BlockChange {
        let pos = BlockPos::new(x, 1, 0);
        BlockChange {
            pos,
            chunk: pos.chunk(),
            block: BlockType::Stone,
        }
    }

    #[test]
    fn notifies_in_registration_order() {
        let observers = BlockObservers::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let first = {
            let log = Arc::clone(&log);
            observers.subscribe(move |c| log.lock().push(("first", c.pos.x)))
        };
        let _second = {
            let log = Arc::clone(&log);
            observers.subscribe(move |c| log.lock().push(("second", c.pos.x)))
        };

        observers.notify(&change(7));
        assert_eq!(*log.lock(), vec![("first", 7), ("second", 7)]);

        assert!(first.unsubscribe());
        observers.notify(&change(8));
        assert_eq!(log.lock().last(), Some(&("second", 8)));
        assert_eq!(log.lock().len(), 3);
        assert_eq!(observers.len(), 1);
    }

    #[test]
    fn callback_may_unsubscribe_itself() {
        let observers = BlockObservers::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let calls = Arc::new(Mutex::new(0));

        let sub = {
            let slot = Arc::clone(&slot);
            let calls = Arc::clone(&calls);
            observers.subscribe(move |_| {
                *calls.lock() += 1;
                if let Some(sub) = slot.lock().take() {
                    sub.unsubscribe();
                }
            })
        };
        *slot.lock() = Some(sub);

        observers.notify(&change(1));
        observers.notify(&change(2));
        assert_eq!(*calls.lock(), 1);
        assert!(observers.is_empty());
    }

    #[test]
    fn unsubscribe_after_registry_dropped() {
        let observers = BlockObservers::new();
        let sub = observers.subscribe(|_| {});
        drop(observers);
        assert!(!sub.unsubscribe());
    }
}
