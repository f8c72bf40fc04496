use std::{
    sync::{Condvar, Mutex, PoisonError},
    time::Duration,
};

/// Stops the polling loop, even while it is sleeping between polls.
#[derive(Debug, Default)]
pub struct CancellationToken {
    // Flips to true once cancelled, and never back.
    cancelled: Mutex<bool>,
    cvar: Condvar,
}

impl CancellationToken {
    /// Marks the token as cancelled and wakes up anything sleeping on it.
    /// Cancelling twice does nothing.
    pub fn cancel(&self) {
        let mut cancelled = self.cancelled.lock().unwrap_or_else(PoisonError::into_inner);

        if !*cancelled {
            *cancelled = true;
            self.cvar.notify_all();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sleeps for up to `duration`, returning early if cancelled.
    ///
    /// Returns whether the token is cancelled.
    pub fn sleep_with_cancellation(&self, duration: Duration) -> bool {
        let cancelled = self.cancelled.lock().unwrap_or_else(PoisonError::into_inner);
        let (cancelled, _) = self
            .cvar
            .wait_timeout_while(cancelled, duration, |cancelled| !*cancelled)
            .unwrap_or_else(PoisonError::into_inner);

        *cancelled
    }
}
