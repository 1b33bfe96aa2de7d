//! The remote persistence seam.
//!
//! The real store is an external service that authenticates the account and
//! keeps its records. This trait is the shape inkseal expects of it; the
//! in-memory implementation backs tests and demos.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::error::InksealError;
use crate::record::{AccountRecord, SealedEntry};

/// Persistence for account records and sealed entries.
///
/// Only non-secret data crosses this boundary.
pub trait RecordStore {
    /// Persist the account record written at setup. Write-once: the salt
    /// must never be replaced for an existing account.
    fn put_account(&mut self, account_id: &str, record: AccountRecord) -> Result<(), InksealError>;

    /// Fetch the account record for login.
    fn account(&self, account_id: &str) -> Result<AccountRecord, InksealError>;

    /// Insert or wholesale-replace an entry.
    fn put_entry(
        &mut self,
        account_id: &str,
        entry_id: &str,
        entry: SealedEntry,
    ) -> Result<(), InksealError>;

    fn entry(&self, account_id: &str, entry_id: &str) -> Result<SealedEntry, InksealError>;

    fn remove_entry(&mut self, account_id: &str, entry_id: &str) -> Result<(), InksealError>;

    /// Entry ids for an account, in ascending order.
    fn entry_ids(&self, account_id: &str) -> Result<Vec<String>, InksealError>;
}

struct AccountSlot {
    record: AccountRecord,
    entries: BTreeMap<String, SealedEntry>,
}

/// A `RecordStore` held entirely in process memory.
#[derive(Default)]
pub struct MemoryStore {
    accounts: HashMap<String, AccountSlot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, account_id: &str) -> Result<&AccountSlot, InksealError> {
        self.accounts
            .get(account_id)
            .ok_or_else(|| InksealError::NotFound(account_id.to_string()))
    }

    fn slot_mut(&mut self, account_id: &str) -> Result<&mut AccountSlot, InksealError> {
        self.accounts
            .get_mut(account_id)
            .ok_or_else(|| InksealError::NotFound(account_id.to_string()))
    }
}

impl RecordStore for MemoryStore {
    fn put_account(&mut self, account_id: &str, record: AccountRecord) -> Result<(), InksealError> {
        if self.accounts.contains_key(account_id) {
            return Err(InksealError::AccountExists(account_id.to_string()));
        }
        debug!(account_id, salt = %record.salt, "account stored");
        self.accounts.insert(
            account_id.to_string(),
            AccountSlot {
                record,
                entries: BTreeMap::new(),
            },
        );
        Ok(())
    }

    fn account(&self, account_id: &str) -> Result<AccountRecord, InksealError> {
        Ok(self.slot(account_id)?.record.clone())
    }

    fn put_entry(
        &mut self,
        account_id: &str,
        entry_id: &str,
        entry: SealedEntry,
    ) -> Result<(), InksealError> {
        let slot = self.slot_mut(account_id)?;
        debug!(account_id, entry_id, "entry stored");
        slot.entries.insert(entry_id.to_string(), entry);
        Ok(())
    }

    fn entry(&self, account_id: &str, entry_id: &str) -> Result<SealedEntry, InksealError> {
        self.slot(account_id)?
            .entries
            .get(entry_id)
            .cloned()
            .ok_or_else(|| InksealError::NotFound(entry_id.to_string()))
    }

    fn remove_entry(&mut self, account_id: &str, entry_id: &str) -> Result<(), InksealError> {
        self.slot_mut(account_id)?
            .entries
            .remove(entry_id)
            .map(|_| ())
            .ok_or_else(|| InksealError::NotFound(entry_id.to_string()))
    }

    fn entry_ids(&self, account_id: &str) -> Result<Vec<String>, InksealError> {
        Ok(self.slot(account_id)?.entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::initialize_encryption;

    #[test]
    fn account_is_write_once() {
        let mut store = MemoryStore::new();
        let first = initialize_encryption("pw").unwrap().account_record();
        let second = initialize_encryption("pw").unwrap().account_record();

        store.put_account("alice", first.clone()).unwrap();
        assert_eq!(
            store.put_account("alice", second),
            Err(InksealError::AccountExists("alice".into()))
        );
        assert_eq!(store.account("alice").unwrap(), first);
    }

    #[test]
    fn entries_replace_and_remove() {
        let setup = initialize_encryption("pw").unwrap();
        let mut store = MemoryStore::new();
        store.put_account("bob", setup.account_record()).unwrap();
        let session = setup.into_session();

        store.put_entry("bob", "e1", session.seal_entry("v1").unwrap()).unwrap();
        store.put_entry("bob", "e1", session.seal_entry("v2").unwrap()).unwrap();
        store.put_entry("bob", "e0", session.seal_entry("other").unwrap()).unwrap();

        assert_eq!(store.entry_ids("bob").unwrap(), vec!["e0", "e1"]);
        assert_eq!(session.open_entry(&store.entry("bob", "e1").unwrap()).unwrap(), "v2");

        store.remove_entry("bob", "e1").unwrap();
        assert!(matches!(store.entry("bob", "e1"), Err(InksealError::NotFound(_))));
        assert!(matches!(store.remove_entry("bob", "e1"), Err(InksealError::NotFound(_))));
    }

    #[test]
    fn unknown_account_is_not_found() {
        let store = MemoryStore::new();
        assert_eq!(
            store.account("nobody"),
            Err(InksealError::NotFound("nobody".into()))
        );
    }
}
