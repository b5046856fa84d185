//! Single-flight guard for identical concurrent requests.
//!
//! Callers that ask for the same key while a request is outstanding await
//! the same future instead of issuing their own. The slot is cleared when
//! the request finishes, so the next call after completion starts fresh;
//! nothing is cached.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

use futures_util::future::{BoxFuture, FutureExt, Shared};

type Slot<V> = Shared<BoxFuture<'static, V>>;

/// Map of in-flight futures keyed by request identity.
pub struct InFlight<K, V>
where
    V: Clone,
{
    slots: Arc<Mutex<HashMap<K, Slot<V>>>>,
}

impl<K, V: Clone> Clone for InFlight<K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
        }
    }
}

impl<K, V> Default for InFlight<K, V>
where
    V: Clone,
{
    fn default() -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

/// Whether a call started a request or joined one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flight {
    Leader,
    Joined,
}

impl<K, V> InFlight<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `start()` unless a request for `key` is already outstanding, in
    /// which case wait for that one.
    pub async fn run<F>(&self, key: K, start: F) -> (V, Flight)
    where
        F: FnOnce() -> BoxFuture<'static, V>,
    {
        let (slot, flight) = {
            let mut slots = self.lock();
            match slots.get(&key) {
                Some(existing) => (existing.clone(), Flight::Joined),
                None => {
                    let slot = start().shared();
                    slots.insert(key.clone(), slot.clone());
                    (slot, Flight::Leader)
                }
            }
        };

        let output = slot.clone().await;

        // Whoever observes completion first clears the slot; a newer request
        // under the same key is left alone.
        let mut slots = self.lock();
        if slots.get(&key).is_some_and(|current| current.ptr_eq(&slot)) {
            slots.remove(&key);
        }

        (output, flight)
    }

    /// Detach every outstanding request. Callers already waiting still get
    /// their result; the next call for any key starts a new request.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of keys with a request outstanding.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, Slot<V>>> {
        // Critical sections never panic midway, so a poisoned map is intact.
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_concurrent_calls_share_one_request() {
        let guard: InFlight<&'static str, u32> = InFlight::new();
        let started = Arc::new(AtomicUsize::new(0));
        let (release, gate) = oneshot::channel::<()>();

        let first = {
            let started = Arc::clone(&started);
            guard.run("who-am-i", move || {
                started.fetch_add(1, Ordering::SeqCst);
                async move {
                    let _ = gate.await;
                    7
                }
                .boxed()
            })
        };
        let second = {
            let started = Arc::clone(&started);
            guard.run("who-am-i", move || {
                started.fetch_add(1, Ordering::SeqCst);
                async { 99 }.boxed()
            })
        };
        let releaser = async move {
            tokio::task::yield_now().await;
            release.send(()).unwrap();
        };

        let ((a, fa), (b, fb), ()) = tokio::join!(first, second, releaser);

        assert_eq!((a, b), (7, 7));
        assert_eq!(fa, Flight::Leader);
        assert_eq!(fb, Flight::Joined);
        assert_eq!(started.load(Ordering::SeqCst), 1);
        assert!(guard.is_empty());
    }

    #[tokio::test]
    async fn test_sequential_calls_start_fresh_requests() {
        let guard: InFlight<&'static str, u32> = InFlight::new();
        let started = Arc::new(AtomicUsize::new(0));

        for expected in 1..=2u32 {
            let counter = Arc::clone(&started);
            let (value, flight) = guard
                .run("jobs", move || {
                    let n = counter.fetch_add(1, Ordering::SeqCst) as u32 + 1;
                    async move { n }.boxed()
                })
                .await;
            assert_eq!(value, expected);
            assert_eq!(flight, Flight::Leader);
        }

        assert_eq!(started.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cleared_slot_is_not_joined() {
        let guard: InFlight<&'static str, u32> = InFlight::new();
        let (release, gate) = oneshot::channel::<()>();

        let stale = guard.run("who-am-i", move || {
            async move {
                let _ = gate.await;
                401
            }
            .boxed()
        });
        let fresh = async {
            tokio::task::yield_now().await;
            guard.clear();
            let result = guard.run("who-am-i", || async { 200 }.boxed()).await;
            release.send(()).unwrap();
            result
        };

        let ((a, fa), (b, fb)) = tokio::join!(stale, fresh);

        assert_eq!((a, fa), (401, Flight::Leader));
        assert_eq!((b, fb), (200, Flight::Leader));
        assert!(guard.is_empty());
    }

    #[tokio::test]
    async fn test_distinct_keys_do_not_share() {
        let guard: InFlight<&'static str, &'static str> = InFlight::new();
        let (a, _) = guard.run("a", || async { "alpha" }.boxed()).await;
        let (b, _) = guard.run("b", || async { "beta" }.boxed()).await;
        assert_eq!((a, b), ("alpha", "beta"));
    }
}
