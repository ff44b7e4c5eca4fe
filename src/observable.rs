use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};

use parking_lot::RwLock;

/// Values queued per subscriber before newer ones are dropped.
pub const SUBSCRIBER_QUEUE: usize = 64;

/// A value that is replaced as a whole and published to subscribers.
///
/// Readers always see a complete record. Subscribers get the current value
/// when they subscribe and every distinct value after that, up to
/// [`SUBSCRIBER_QUEUE`] undrained values; a subscriber that falls behind
/// misses updates and should re-read with [`Observable::get`]. Dropped
/// receivers are pruned on the next publish.
#[derive(Debug)]
pub struct Observable<T> {
    inner: RwLock<Inner<T>>,
}

#[derive(Debug)]
struct Inner<T> {
    value: T,
    subscribers: Vec<SyncSender<T>>,
}

impl<T: Clone + PartialEq> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: RwLock::new(Inner {
                value,
                subscribers: Vec::new(),
            }),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.inner.read().value.clone()
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.read().value)
    }

    pub fn set(&self, value: T) {
        self.update(|_| value);
    }

    /// Compute a new value from the current one and swap it in.
    ///
    /// The write lock is held across `f`, so concurrent updates are applied
    /// one at a time. Returns the value now stored.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> T {
        let mut inner = self.inner.write();
        let next = f(&inner.value);
        if next != inner.value {
            inner.value = next.clone();
            inner
                .subscribers
                .retain(|subscriber| match subscriber.try_send(next.clone()) {
                    Ok(()) => true,
                    Err(TrySendError::Full(_)) => {
                        log::trace!("subscriber queue full, dropping update");
                        true
                    }
                    Err(TrySendError::Disconnected(_)) => false,
                });
        }
        next
    }

    pub fn subscribe(&self) -> Receiver<T> {
        let (tx, rx) = mpsc::sync_channel(SUBSCRIBER_QUEUE);
        let mut inner = self.inner.write();
        if tx.try_send(inner.value.clone()).is_ok() {
            inner.subscribers.push(tx);
        }
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.read().subscribers.len()
    }
}

impl<T: Clone + PartialEq + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscriber_sees_current_then_changes() {
        let value = Observable::new(1);
        let rx = value.subscribe();
        value.set(2);
        value.set(2);
        value.update(|v| v + 1);

        let seen: Vec<i32> = rx.try_iter().collect();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let value = Observable::new(String::from("a"));
        let rx = value.subscribe();
        assert_eq!(value.subscriber_count(), 1);
        drop(rx);
        value.set("b".into());
        assert_eq!(value.subscriber_count(), 0);
        assert_eq!(value.get(), "b");
    }

    #[test]
    fn idle_subscriber_queue_is_bounded() {
        let value = Observable::new(0usize);
        let rx = value.subscribe();
        for i in 1..=500 {
            value.set(i);
        }
        assert_eq!(value.subscriber_count(), 1);
        assert_eq!(value.get(), 500);

        let seen: Vec<usize> = rx.try_iter().collect();
        assert_eq!(seen.len(), SUBSCRIBER_QUEUE);
        assert_eq!(seen[0], 0);

        // Draining makes room again.
        value.set(501);
        assert_eq!(rx.try_recv(), Ok(501));
    }
}
