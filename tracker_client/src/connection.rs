//! Backend connectivity indicator.
//!
//! The indicator starts `Unknown`, probes the health endpoint immediately, and
//! then re-probes on a fixed period. A single successful probe flips it to
//! `Online`, a single failed or timed-out probe flips it to `Offline`; there is
//! no hysteresis and no backoff. Dropping the monitor stops probing.
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam_channel::{Receiver, unbounded};
use log::{error, info};
use strum_macros::Display;
use tracker_common::Result;

use crate::api::ApiClient;
use crate::poller::Poller;

/// Reachability of the backend as last observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ConnectionState {
    /// No probe has completed yet.
    #[strum(serialize = "checking…")]
    Unknown,
    /// Last probe succeeded.
    #[strum(serialize = "online")]
    Online,
    /// Last probe failed or timed out.
    #[strum(serialize = "offline")]
    Offline,
}

impl ConnectionState {
    /// State after a probe with the given outcome.
    pub fn from_probe(ok: bool) -> Self {
        if ok {
            ConnectionState::Online
        } else {
            ConnectionState::Offline
        }
    }

    /// Status dot shown next to the label.
    pub fn dot(&self) -> char {
        match self {
            ConnectionState::Unknown => '○',
            ConnectionState::Online | ConnectionState::Offline => '●',
        }
    }
}

/// Something that can tell whether the backend is reachable.
pub trait HealthProbe: Send + 'static {
    /// Issue one probe; `true` when the backend answered successfully in time.
    fn probe(&self) -> bool;
}

impl HealthProbe for ApiClient {
    fn probe(&self) -> bool {
        ApiClient::probe(self)
    }
}

/// Periodic health checker publishing state transitions.
pub struct ConnectionMonitor {
    state: Arc<Mutex<ConnectionState>>,
    updates: Receiver<ConnectionState>,
    _poller: Poller,
}

impl ConnectionMonitor {
    /// Start probing with `probe` every `interval`.
    pub fn start<P: HealthProbe>(probe: P, interval: Duration) -> Result<Self> {
        let state = Arc::new(Mutex::new(ConnectionState::Unknown));
        let (update_tx, update_rx) = unbounded::<ConnectionState>();
        let shared = Arc::clone(&state);

        let poller = Poller::spawn("connection-monitor", interval, move || {
            let next = ConnectionState::from_probe(probe.probe());
            let previous = match shared.lock() {
                Ok(mut current) => std::mem::replace(&mut *current, next),
                Err(e) => {
                    error!("Connection state lock poisoned: {}", e);
                    return;
                }
            };
            if previous != next {
                info!("Backend is {}", next);
                let _ = update_tx.send(next);
            }
        })?;

        Ok(ConnectionMonitor {
            state,
            updates: update_rx,
            _poller: poller,
        })
    }

    /// Most recently observed state.
    pub fn state(&self) -> Result<ConnectionState> {
        Ok(*self.state.lock()?)
    }

    /// Receives every state transition, in order.
    pub fn updates(&self) -> &Receiver<ConnectionState> {
        &self.updates
    }
}
