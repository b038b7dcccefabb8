//! Snapshot link between hosts on different threads
//!
//! Hosts are single-threaded. To drive a host owned by a worker thread from
//! elsewhere, the controlling side publishes plain name-to-value snapshots
//! over a channel and the worker applies them at points of its choosing.

use crate::error::{ParamTreeError, Result};
use crate::parameters::{Parametrized, ValueMap};
use std::time::Duration;

/// Create a connected sender/receiver pair
pub fn channel() -> (SnapshotSender, SnapshotReceiver) {
    let (tx, rx) = flume::unbounded();
    (SnapshotSender { tx }, SnapshotReceiver { rx })
}

/// Publishing side of a snapshot link
#[derive(Debug, Clone)]
pub struct SnapshotSender {
    tx: flume::Sender<ValueMap>,
}

impl SnapshotSender {
    /// Send the current value of every parameter of `host`
    pub fn publish(&self, host: &Parametrized) -> Result<()> {
        self.send(host.params().values())
    }

    /// Send the values changed since the last acknowledgment, if any
    ///
    /// # Returns
    ///
    /// `Ok(true)` if a snapshot was sent
    pub fn publish_changes(&self, host: &Parametrized) -> Result<bool> {
        let changed = host.params().changed_values();
        if changed.is_empty() {
            return Ok(false);
        }
        self.send(changed)?;
        Ok(true)
    }

    /// Send an arbitrary snapshot
    pub fn send(&self, values: ValueMap) -> Result<()> {
        tracing::trace!(params = values.len(), "Publishing parameter snapshot");
        self.tx.send(values).map_err(|_| ParamTreeError::Disconnected)
    }
}

/// Applying side of a snapshot link
#[derive(Debug)]
pub struct SnapshotReceiver {
    rx: flume::Receiver<ValueMap>,
}

impl SnapshotReceiver {
    /// Apply every snapshot queued so far, oldest first
    ///
    /// Each snapshot goes through [`Parametrized::set_values`], so a snapshot
    /// naming an unknown parameter fails as a whole; snapshots behind it stay
    /// queued.
    ///
    /// # Returns
    ///
    /// The number of snapshots applied, or `Disconnected` if nothing was
    /// queued and every sender is gone
    pub fn apply_pending(&self, host: &mut Parametrized) -> Result<usize> {
        let mut applied = 0;
        loop {
            match self.rx.try_recv() {
                Ok(values) => {
                    host.set_values(values)?;
                    applied += 1;
                }
                Err(flume::TryRecvError::Empty) => break,
                Err(flume::TryRecvError::Disconnected) => {
                    if applied == 0 {
                        return Err(ParamTreeError::Disconnected);
                    }
                    break;
                }
            }
        }

        if applied > 0 {
            tracing::trace!(host = %host.name(), applied, "Applied parameter snapshots");
        }
        Ok(applied)
    }

    /// Wait up to `timeout` for one snapshot and apply it
    ///
    /// # Returns
    ///
    /// `Ok(true)` if a snapshot was applied, `Ok(false)` on timeout
    pub fn apply_next(&self, host: &mut Parametrized, timeout: Duration) -> Result<bool> {
        match self.rx.recv_timeout(timeout) {
            Ok(values) => {
                host.set_values(values)?;
                Ok(true)
            }
            Err(flume::RecvTimeoutError::Timeout) => Ok(false),
            Err(flume::RecvTimeoutError::Disconnected) => Err(ParamTreeError::Disconnected),
        }
    }
}
