//! In-memory status registry with change notification
//!
//! The registry is an ordinary value: construct one, share it behind an
//! `Arc` if several owners need it, and drop it when done.
//!
//! Writes are serialized together with their notifications, so listeners
//! see changes in the order they were written. A listener may read the
//! registry but must not write to it: the write would wait on the
//! notification that is calling it.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::{AbmixError, Result};
use crate::schemas::ProposalStatus;

use super::transitions::validate_transition;

/// Outcome of a single listener call
pub type ListenerResult = std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Status change listener, called with the proposal id and its new status.
///
/// Listeners are identified by pointer: unsubscribe with a clone of the
/// same `Arc` that was subscribed.
pub type Listener = Arc<dyn Fn(&str, ProposalStatus) -> ListenerResult + Send + Sync>;

/// One recorded status write
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub proposal_id: String,
    pub from: ProposalStatus,
    pub to: ProposalStatus,
    /// Written without checking the transition table
    pub forced: bool,
    pub changed_at: DateTime<Utc>,
}

/// A listener that returned an error or panicked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFailure {
    /// Position of the listener in subscription order
    pub index: usize,
    pub message: String,
}

/// Report of a status write and the notifications it triggered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub change: StatusChange,
    /// Listeners that returned `Ok`
    pub delivered: usize,
    pub failures: Vec<ListenerFailure>,
}

impl Notification {
    /// True when every listener succeeded
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    statuses: HashMap<String, ProposalStatus>,
    history: HashMap<String, Vec<StatusChange>>,
}

impl RegistryState {
    fn current(&self, proposal_id: &str) -> ProposalStatus {
        self.statuses.get(proposal_id).copied().unwrap_or_default()
    }

    fn record(&mut self, proposal_id: &str, to: ProposalStatus, forced: bool) -> StatusChange {
        let change = StatusChange {
            proposal_id: proposal_id.to_string(),
            from: self.current(proposal_id),
            to,
            forced,
            changed_at: Utc::now(),
        };
        self.statuses.insert(proposal_id.to_string(), to);
        self.history
            .entry(proposal_id.to_string())
            .or_default()
            .push(change.clone());
        change
    }
}

/// Maps proposal ids to their current status and notifies listeners of
/// every write.
#[derive(Default)]
pub struct StatusRegistry {
    state: RwLock<RegistryState>,
    listeners: RwLock<Vec<Listener>>,
    /// Held from a write until its listeners have run
    write_order: Mutex<()>,
}

impl std::fmt::Debug for StatusRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusRegistry")
            .field("proposals", &read(&self.state).statuses.len())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl StatusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status of a proposal; `observacao` if it was never written.
    pub fn get_status(&self, proposal_id: &str) -> ProposalStatus {
        read(&self.state).current(proposal_id)
    }

    /// Overwrite a proposal's status without consulting the transition table.
    ///
    /// Administrative override. Workflow code should use [`try_set_status`]
    /// or [`transition`] instead.
    ///
    /// [`try_set_status`]: StatusRegistry::try_set_status
    /// [`transition`]: StatusRegistry::transition
    pub fn set_status(&self, proposal_id: &str, status: ProposalStatus) -> Notification {
        let _order = lock(&self.write_order);
        let change = write(&self.state).record(proposal_id, status, true);
        tracing::warn!(
            proposal_id,
            from = %change.from,
            to = %change.to,
            "forced status write"
        );
        self.notify(change)
    }

    /// Move a proposal from `expected` to `to`.
    ///
    /// The current status check and the write happen under one lock, so a
    /// concurrent writer cannot slip in between.
    ///
    /// # Errors
    /// * `StaleStatus` - the proposal is no longer in `expected`
    /// * `InvalidTransition` - the table has no edge from `expected` to `to`
    pub fn try_set_status(
        &self,
        proposal_id: &str,
        expected: ProposalStatus,
        to: ProposalStatus,
    ) -> Result<Notification> {
        let _order = lock(&self.write_order);
        let change = {
            let mut state = write(&self.state);
            let actual = state.current(proposal_id);
            if actual != expected {
                tracing::warn!(proposal_id, %expected, %actual, "stale status transition");
                return Err(AbmixError::StaleStatus {
                    proposal_id: proposal_id.to_string(),
                    expected,
                    actual,
                });
            }
            if let Err(e) = validate_transition(actual, to) {
                tracing::warn!(proposal_id, from = %actual, %to, "rejected status transition");
                return Err(e);
            }
            state.record(proposal_id, to, false)
        };

        tracing::info!(proposal_id, from = %change.from, to = %change.to, "status transition");
        Ok(self.notify(change))
    }

    /// Move a proposal from whatever status it is in now to `to`.
    ///
    /// # Errors
    /// * `InvalidTransition` - the table has no edge from the current status
    pub fn transition(&self, proposal_id: &str, to: ProposalStatus) -> Result<Notification> {
        loop {
            let current = self.get_status(proposal_id);
            match self.try_set_status(proposal_id, current, to) {
                Err(AbmixError::StaleStatus { .. }) => continue,
                other => return other,
            }
        }
    }

    /// Mark a proposal as expired.
    ///
    /// System-triggered: no workflow edge leads to `expirado`, so this
    /// bypasses the table like [`set_status`](StatusRegistry::set_status).
    pub fn expire(&self, proposal_id: &str) -> Notification {
        self.set_status(proposal_id, ProposalStatus::Expirado)
    }

    /// Every write recorded for a proposal, oldest first.
    ///
    /// History is kept until [`forget`](StatusRegistry::forget) is called
    /// for the proposal.
    pub fn history(&self, proposal_id: &str) -> Vec<StatusChange> {
        read(&self.state)
            .history
            .get(proposal_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Drop a proposal's status and history, returning the status it had.
    ///
    /// Call this once a proposal is archived or deleted. Listeners are not
    /// notified.
    pub fn forget(&self, proposal_id: &str) -> Option<ProposalStatus> {
        let _order = lock(&self.write_order);
        let mut state = write(&self.state);
        state.history.remove(proposal_id);
        state.statuses.remove(proposal_id)
    }

    /// Register a listener. The same listener may be registered more than once.
    pub fn subscribe(&self, listener: Listener) {
        write(&self.listeners).push(listener);
    }

    /// Remove every registration of `listener`, returning how many were removed.
    pub fn unsubscribe(&self, listener: &Listener) -> usize {
        let mut listeners = write(&self.listeners);
        let before = listeners.len();
        listeners.retain(|registered| !Arc::ptr_eq(registered, listener));
        before - listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        read(&self.listeners).len()
    }

    // Runs with `write_order` held but the state lock released, so
    // listeners may read the registry.
    fn notify(&self, change: StatusChange) -> Notification {
        let listeners: Vec<Listener> = read(&self.listeners).clone();
        let mut delivered = 0;
        let mut failures = Vec::new();

        for (index, listener) in listeners.iter().enumerate() {
            let outcome =
                panic::catch_unwind(AssertUnwindSafe(|| listener(&change.proposal_id, change.to)));
            let message = match outcome {
                Ok(Ok(())) => {
                    delivered += 1;
                    continue;
                }
                Ok(Err(e)) => e.to_string(),
                Err(payload) => panic_message(payload.as_ref()),
            };
            tracing::warn!(
                proposal_id = %change.proposal_id,
                listener = index,
                error = %message,
                "status listener failed"
            );
            failures.push(ListenerFailure { index, message });
        }

        Notification {
            change,
            delivered,
            failures,
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("listener panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("listener panicked: {}", s)
    } else {
        "listener panicked".to_string()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
