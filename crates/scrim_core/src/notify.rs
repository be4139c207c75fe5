//! Change notification for render consumers
//!
//! Two flavours, matching the two ways a host may redraw:
//!
//! - [`Subscribers`]: push-style callbacks for reactive hosts
//! - [`DirtyFlag`]: a flag a redraw loop polls and clears
//!
//! Subscribers are handed out as a snapshot so the owner can release its own
//! lock before calling them; callbacks are then free to call back into it.

use smallvec::SmallVec;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Callback invoked with the new state after a change
pub type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle returned by [`Subscribers::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Get the raw ID
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Ordered list of subscribers
pub struct Subscribers<T> {
    entries: SmallVec<[(SubscriptionId, Subscriber<T>); 4]>,
    next_id: u64,
}

impl<T> Subscribers<T> {
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
            next_id: 1,
        }
    }

    /// Register a callback
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Arc::new(callback)));
        id
    }

    /// Remove a callback, returning whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Clone the current callbacks, in subscription order
    pub fn snapshot(&self) -> SmallVec<[Subscriber<T>; 4]> {
        self.entries.iter().map(|(_, cb)| Arc::clone(cb)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Invoke every callback in `subscribers` with `value`
pub fn notify_all<T>(subscribers: &[Subscriber<T>], value: &T) {
    for callback in subscribers {
        callback(value);
    }
}

/// Shared "needs redraw" flag
#[derive(Clone, Debug, Default)]
pub struct DirtyFlag(Arc<AtomicBool>);

impl DirtyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a redraw
    pub fn mark(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Check and clear
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }

    /// Check without clearing
    pub fn is_dirty(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_subscribers_called_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut subs: Subscribers<u32> = Subscribers::new();

        let l = Arc::clone(&log);
        subs.subscribe(move |v| l.lock().unwrap().push(("a", *v)));
        let l = Arc::clone(&log);
        subs.subscribe(move |v| l.lock().unwrap().push(("b", *v)));

        notify_all(&subs.snapshot(), &3);
        assert_eq!(*log.lock().unwrap(), vec![("a", 3), ("b", 3)]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut subs: Subscribers<u32> = Subscribers::new();
        let a = subs.subscribe(|_| {});
        let b = subs.subscribe(|_| {});
        assert_ne!(a, b);

        assert!(subs.unsubscribe(a));
        assert!(!subs.unsubscribe(a));
        assert_eq!(subs.len(), 1);
    }

    #[test]
    fn test_dirty_flag_take_clears() {
        let flag = DirtyFlag::new();
        let shared = flag.clone();
        assert!(!flag.is_dirty());

        shared.mark();
        assert!(flag.is_dirty());
        assert!(flag.take());
        assert!(!flag.take());
    }
}
