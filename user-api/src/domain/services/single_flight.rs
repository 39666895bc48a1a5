use std::{
    collections::HashMap,
    future::Future,
    hash::Hash,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex, MutexGuard, PoisonError,
    },
};

use futures::future::{BoxFuture, FutureExt, Shared};

type InFlight<V> = Shared<BoxFuture<'static, V>>;

struct Flight<V: Clone> {
    id: u64,
    shared: InFlight<V>,
    waiters: usize,
}

/// Collapses concurrent work on the same key into one execution.
///
/// While a computation for a key is pending, later callers for that key await
/// the pending result instead of starting their own. The entry is dropped once
/// its last waiter is gone, whether it saw the result or was cancelled; a
/// computation nobody waits for any more is dropped with it.
pub struct SingleFlight<K, V>
where
    V: Clone,
{
    in_flight: Mutex<HashMap<K, Flight<V>>>,
    next_id: AtomicU64,
}

impl<K, V> Default for SingleFlight<K, V>
where
    V: Clone,
{
    fn default() -> Self {
        Self {
            in_flight: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }
}

impl<K, V> SingleFlight<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn run<F>(&self, key: K, work: F) -> V
    where
        F: Future<Output = V> + Send + 'static,
    {
        let (id, shared) = {
            let mut in_flight = self.lock();
            match in_flight.get_mut(&key) {
                Some(flight) => {
                    tracing::debug!("joining in-flight computation");
                    flight.waiters += 1;
                    (flight.id, flight.shared.clone())
                }
                None => {
                    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                    let shared = work.boxed().shared();
                    in_flight.insert(
                        key.clone(),
                        Flight {
                            id,
                            shared: shared.clone(),
                            waiters: 1,
                        },
                    );
                    (id, shared)
                }
            }
        };

        let _waiter = Waiter {
            flights: self,
            key,
            id,
        };
        shared.await
    }

    /// Number of keys with a computation still pending.
    pub fn pending(&self) -> usize {
        self.lock().len()
    }
}

impl<K, V> SingleFlight<K, V>
where
    V: Clone,
{
    fn lock(&self) -> MutexGuard<'_, HashMap<K, Flight<V>>> {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Registration of one caller on a flight; released on completion or cancellation.
struct Waiter<'a, K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    flights: &'a SingleFlight<K, V>,
    key: K,
    id: u64,
}

impl<K, V> Drop for Waiter<'_, K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn drop(&mut self) {
        let mut in_flight = self.flights.lock();
        let Some(flight) = in_flight.get_mut(&self.key) else {
            return;
        };
        if flight.id != self.id {
            return;
        }

        flight.waiters -= 1;
        if flight.waiters == 0 {
            // Dropping the last handle outside the lock cancels unfinished work.
            let abandoned = in_flight.remove(&self.key);
            drop(in_flight);
            drop(abandoned);
        }
    }
}
