//! Shutdown signalling.
//!
//! [`Shutdown`] is a cloneable one-way flag.  The control loop waits on it
//! between cycles instead of sleeping, so a trigger from the signal thread
//! ends the wait immediately rather than after the full polling interval.
//!
//! ```text
//! ┌───────────────┐  trigger()  ┌──────────┐  wait_timeout()  ┌──────────────┐
//! │ signal thread │────────────▶│ Shutdown │◀─────────────────│ control loop │
//! └───────────────┘             └──────────┘                  └──────────────┘
//! ```

use std::io;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use log::{info, warn};
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
use signal_hook::iterator::Signals;

#[derive(Default)]
struct Inner {
    requested: Mutex<bool>,
    wake: Condvar,
}

#[derive(Clone, Default)]
pub struct Shutdown {
    inner: Arc<Inner>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown and wake every waiter.  Idempotent.
    pub fn trigger(&self) {
        *self.lock() = true;
        self.inner.wake.notify_all();
    }

    pub fn is_triggered(&self) -> bool {
        *self.lock()
    }

    /// Block for up to `timeout`, returning early if shutdown is requested.
    /// Returns `true` if shutdown has been requested.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let guard = self.lock();
        let (guard, _) = self
            .inner
            .wake
            .wait_timeout_while(guard, timeout, |requested| !*requested)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }

    // A poisoned flag is still a valid bool.
    fn lock(&self) -> MutexGuard<'_, bool> {
        self.inner
            .requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Route SIGINT, SIGTERM and SIGHUP to `shutdown` from a dedicated thread.
pub fn install_signal_handlers(shutdown: &Shutdown) -> io::Result<thread::JoinHandle<()>> {
    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP])?;
    let shutdown = shutdown.clone();

    thread::Builder::new()
        .name("fanctl-signals".into())
        .spawn(move || {
            for signal in signals.forever() {
                if shutdown.is_triggered() {
                    warn!("signal {signal} received while already shutting down");
                } else {
                    info!("signal {signal} received, shutting down");
                }
                shutdown.trigger();
            }
        })
}
