//! Periodic background refresh with lifecycle-scoped cancellation.
//!
//! A `Poller` owns one worker thread that runs its task immediately and then on
//! every tick. Crossbeam `select!` multiplexes the ticker with a stop channel, so
//! dropping the poller cancels the schedule and joins the worker. There is no
//! backoff and no overlap: a slow task simply delays the next tick.
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Sender, bounded, select, tick};
use log::{debug, error};
use tracker_common::Result;

/// Handle to a running periodic task.
pub struct Poller {
    name: String,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    /// Spawn a worker named `name` that calls `task` now and then every `interval`.
    pub fn spawn<F>(name: &str, interval: Duration, mut task: F) -> Result<Poller>
    where
        F: FnMut() + Send + 'static,
    {
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let ticker = tick(interval);
        let thread_name = name.to_string();

        let handle = thread::Builder::new().name(name.to_string()).spawn(move || {
            task();
            loop {
                select! {
                    recv(stop_rx) -> _ => break,
                    recv(ticker) -> _ => task(),
                }
            }
            debug!("Poller {} stopped", thread_name);
        })?;

        debug!("Poller {} started, every {:?}", name, interval);
        Ok(Poller {
            name: name.to_string(),
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Stop the schedule and wait for an in-flight task to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.try_send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Poller {} panicked", self.name);
            }
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// A fetched value with the moment it arrived.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    value: T,
    fetched_at: Instant,
}

impl<T> Snapshot<T> {
    /// Stamp `value` with the current time.
    pub fn new(value: T) -> Self {
        Snapshot {
            value,
            fetched_at: Instant::now(),
        }
    }

    /// The fetched value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Time since the value was fetched.
    pub fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }

    /// True once the value is older than `max_age`.
    pub fn is_stale(&self, max_age: Duration) -> bool {
        self.age() > max_age
    }
}
