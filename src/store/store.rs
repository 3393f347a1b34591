use parking_lot::RwLock;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Weak};

type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Subscribers<T> {
    next_id: usize,
    entries: Vec<(usize, Subscriber<T>)>,
}

impl<T> Subscribers<T> {
    fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

#[derive(Default)]
struct OpenBatch {
    depth: usize,
    pending: bool,
}

// Batches open on this thread, keyed by store identity. Writes from other
// threads are never held back by them.
thread_local! {
    static OPEN_BATCHES: RefCell<HashMap<usize, OpenBatch>> = RefCell::new(HashMap::new());
}

/// A thread-safe reactive state container.
///
/// Every write notifies subscribers with the new state. Writes made inside
/// [`Store::batch`] on the same thread are coalesced into a single
/// notification once the outermost batch closes.
pub struct Store<T> {
    state: Arc<RwLock<T>>,
    subscribers: Arc<RwLock<Subscribers<T>>>,
}

impl<T: Clone + Send + Sync + 'static> Store<T> {
    /// Create a new store with the given initial state.
    pub fn new(initial: T) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
            subscribers: Arc::new(RwLock::new(Subscribers::new())),
        }
    }

    /// Get a clone of the current state.
    pub fn get(&self) -> T {
        self.state.read().clone()
    }

    /// Update the state in place.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        f(&mut *self.state.write());
        self.notify();
    }

    /// Derive a new state from the current one and swap it in.
    ///
    /// The previous value is never mutated, so clones handed out earlier
    /// keep observing the state they were taken from.
    pub fn replace_with<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        {
            let mut state = self.state.write();
            let next = f(&*state);
            *state = next;
        }
        self.notify();
    }

    /// Like [`replace_with`](Self::replace_with), but `f` may decline by
    /// returning `None`. The decision and the swap happen under one lock.
    ///
    /// Returns whether the state was replaced; subscribers are only notified
    /// when it was.
    pub fn replace_if<F>(&self, f: F) -> bool
    where
        F: FnOnce(&T) -> Option<T>,
    {
        let replaced = {
            let mut state = self.state.write();
            match f(&*state) {
                Some(next) => {
                    *state = next;
                    true
                }
                None => false,
            }
        };
        if replaced {
            self.notify();
        }
        replaced
    }

    /// Set a new state value.
    pub fn set(&self, new_state: T) {
        *self.state.write() = new_state;
        self.notify();
    }

    /// Subscribe to state changes.
    ///
    /// The callback runs after every write (or once per batch). Dropping the
    /// returned guard unsubscribes.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = {
            let mut subscribers = self.subscribers.write();
            let id = subscribers.next_id;
            subscribers.next_id += 1;
            subscribers.entries.push((id, Arc::new(callback)));
            id
        };

        let subscribers: Weak<RwLock<Subscribers<T>>> = Arc::downgrade(&self.subscribers);
        Subscription::new(move || {
            if let Some(subscribers) = subscribers.upgrade() {
                subscribers.write().entries.retain(|(entry, _)| *entry != id);
            }
        })
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().entries.len()
    }

    /// Run `f`, holding back this thread's notifications until it returns.
    ///
    /// Batches nest; only the outermost one flushes, and only if something
    /// was written. The flush also happens if `f` panics, so subscribers
    /// never miss a write that already landed.
    pub fn batch<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = BatchGuard::open(self);
        f()
    }

    fn batch_key(&self) -> usize {
        Arc::as_ptr(&self.state) as *const () as usize
    }

    /// Notify all subscribers of a state change.
    fn notify(&self) {
        let key = self.batch_key();
        let deferred = OPEN_BATCHES.with(|open| match open.borrow_mut().get_mut(&key) {
            Some(batch) => {
                batch.pending = true;
                true
            }
            None => false,
        });
        if deferred {
            return;
        }

        // Snapshot both so callbacks may read the store or unsubscribe.
        let state = self.get();
        let subscribers: Vec<Subscriber<T>> = self
            .subscribers
            .read()
            .entries
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();
        for subscriber in subscribers {
            subscriber(&state);
        }
    }

    /// Read state without cloning it.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&*self.state.read())
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

struct BatchGuard<'a, T: Clone + Send + Sync + 'static> {
    store: &'a Store<T>,
}

impl<'a, T: Clone + Send + Sync + 'static> BatchGuard<'a, T> {
    fn open(store: &'a Store<T>) -> Self {
        let key = store.batch_key();
        OPEN_BATCHES.with(|open| open.borrow_mut().entry(key).or_default().depth += 1);
        Self { store }
    }
}

impl<T: Clone + Send + Sync + 'static> Drop for BatchGuard<'_, T> {
    fn drop(&mut self) {
        let key = self.store.batch_key();
        let flush = OPEN_BATCHES.with(|open| {
            let mut open = open.borrow_mut();
            let Some(batch) = open.get_mut(&key) else {
                return false;
            };
            batch.depth -= 1;
            if batch.depth > 0 {
                return false;
            }
            open.remove(&key).is_some_and(|batch| batch.pending)
        });
        // The borrow is released first: subscribers may open batches too.
        if flush {
            self.store.notify();
        }
    }
}

/// RAII guard for store subscriptions.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn new<F>(unsubscribe: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}
