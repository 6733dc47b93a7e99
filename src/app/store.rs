//! Immutable-snapshot state store.
//!
//! The live [`Snapshot`] is published through a `watch` channel as an
//! `Arc`. A mutation builds a new snapshot and swaps it in whole, so a
//! reader holding an older `Arc` (e.g. across an `.await`) never sees it
//! change. After every mutation the `account` field alone is written to
//! durable storage under [`STORAGE_KEY`].

use std::sync::Arc;

use bankapi::Account;
use tokio::sync::watch;
use tracing::{info, warn};

use super::storage::Storage;

/// Durable storage key for the persisted account.
pub const STORAGE_KEY: &str = "savedAccount";

/// One immutable value of the client state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// `None` means unauthenticated.
    pub account: Option<Arc<Account>>,
}

/// A single property replacement.
#[derive(Debug, Clone)]
pub enum StateChange {
    Account(Option<Account>),
}

pub struct Store {
    tx: watch::Sender<Arc<Snapshot>>,
    storage: Box<dyn Storage>,
}

impl Store {
    /// Create a store holding the empty snapshot.
    pub fn new(storage: Box<dyn Storage>) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(Snapshot::default()));
        Self { tx, storage }
    }

    /// The live snapshot at call time.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.tx.borrow())
    }

    pub fn account(&self) -> Option<Arc<Account>> {
        self.snapshot().account.clone()
    }

    /// Watch snapshot replacements.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.tx.subscribe()
    }

    /// Install a new snapshot with one property replaced, then persist.
    pub fn replace(&mut self, change: StateChange) {
        let mut next = Snapshot::clone(&self.snapshot());
        match change {
            StateChange::Account(account) => next.account = account.map(Arc::new),
        }
        self.tx.send_replace(Arc::new(next));
        self.persist();
    }

    /// Install the persisted account, if any. Unreadable data leaves the
    /// store unauthenticated.
    pub fn restore(&mut self) {
        let Some(raw) = self.storage.get(STORAGE_KEY) else {
            return;
        };
        match serde_json::from_str::<Option<Account>>(&raw) {
            Ok(account) => {
                if let Some(a) = &account {
                    info!(user = %a.user, "restored saved session");
                }
                self.replace(StateChange::Account(account));
            }
            Err(e) => warn!(error = %e, "ignoring unreadable saved account"),
        }
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Give up the store, keeping its durable storage (a "reload").
    pub fn into_storage(self) -> Box<dyn Storage> {
        self.storage
    }

    fn persist(&mut self) {
        let snapshot = self.snapshot();
        let serialized = match serde_json::to_string(&snapshot.account.as_deref()) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "failed to serialize account");
                return;
            }
        };
        if let Err(e) = self.storage.set(STORAGE_KEY, &serialized) {
            warn!(error = %e, "failed to persist account");
        }
    }
}
