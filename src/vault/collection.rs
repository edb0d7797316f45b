//! The in-memory vault: an ordered list of entries plus a format version.
//!
//! Insertion order is the only ordering.  Lookups by title act on the
//! first match.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entry::{non_empty, Entry, EntryUpdate, NewEntry};
use super::format::null_as_empty;
use crate::errors::{PmError, Result};

/// Version tag written into new vaults.
pub const CURRENT_VAULT_VERSION: &str = "1.0";

/// The decrypted contents of `vault.dat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    #[serde(default, deserialize_with = "null_as_empty")]
    entries: Vec<Entry>,
    version: String,
}

impl Default for Vault {
    fn default() -> Self {
        Self::new()
    }
}

impl Vault {
    /// An empty vault at the current version.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            version: CURRENT_VAULT_VERSION.to_string(),
        }
    }

    /// Append a new entry, stamping its id and timestamps.
    pub fn add(&mut self, new: NewEntry) -> Result<&Entry> {
        if new.title.trim().is_empty() {
            return Err(PmError::EmptyTitle);
        }

        let now = Utc::now();
        let entry = Entry {
            id: self.next_id(now),
            title: new.title,
            username: new.username,
            secret: new.secret,
            url: non_empty(new.url),
            notes: non_empty(new.notes),
            created_at: now,
            updated_at: now,
        };

        self.entries.push(entry);
        let index = self.entries.len() - 1;
        Ok(&self.entries[index])
    }

    /// The first entry with this exact title.
    pub fn find(&self, title: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.title == title)
    }

    /// Index of the first entry with this exact title.
    pub fn position(&self, title: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.title == title)
    }

    /// Update the first entry with this title.
    pub fn update(&mut self, title: &str, update: EntryUpdate) -> Result<&Entry> {
        let index = self
            .position(title)
            .ok_or_else(|| PmError::EntryNotFound(title.to_string()))?;

        let entry = &mut self.entries[index];
        update.apply(entry, Utc::now());
        Ok(&self.entries[index])
    }

    /// Remove the first entry with this title, keeping the others in order.
    pub fn remove(&mut self, title: &str) -> Result<Entry> {
        let index = self
            .position(title)
            .ok_or_else(|| PmError::EntryNotFound(title.to_string()))?;
        Ok(self.entries.remove(index))
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// A time-based id, bumped past any id already taken in this vault.
    fn next_id(&self, now: DateTime<Utc>) -> String {
        let mut candidate = now
            .timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp());
        loop {
            let id = candidate.to_string();
            if !self.entries.iter().any(|e| e.id == id) {
                return id;
            }
            candidate += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vault_with(titles: &[&str]) -> Vault {
        let mut vault = Vault::new();
        for t in titles {
            vault.add(NewEntry::new(*t, "user", "pw")).unwrap();
        }
        vault
    }

    #[test]
    fn new_vault_is_empty_v1() {
        let vault = Vault::new();
        assert!(vault.is_empty());
        assert_eq!(vault.version(), "1.0");
    }

    #[test]
    fn add_preserves_insertion_order() {
        let vault = vault_with(&["zeta", "alpha", "mid"]);
        let titles: Vec<&str> = vault.entries().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn ids_are_unique_even_when_added_fast() {
        let vault = vault_with(&["a", "b", "c", "d", "e", "f"]);
        let mut ids: Vec<&str> = vault.entries().iter().map(|e| e.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn add_rejects_blank_title() {
        let mut vault = Vault::new();
        assert!(matches!(
            vault.add(NewEntry::new("  ", "u", "p")),
            Err(PmError::EmptyTitle)
        ));
    }

    #[test]
    fn duplicate_titles_act_on_first_match() {
        let mut vault = Vault::new();
        vault.add(NewEntry::new("mail", "first", "1")).unwrap();
        vault.add(NewEntry::new("mail", "second", "2")).unwrap();

        assert_eq!(vault.find("mail").unwrap().username, "first");

        let removed = vault.remove("mail").unwrap();
        assert_eq!(removed.username, "first");
        assert_eq!(vault.find("mail").unwrap().username, "second");
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut vault = vault_with(&["a", "b", "c", "d"]);
        vault.remove("b").unwrap();
        let titles: Vec<&str> = vault.entries().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["a", "c", "d"]);
    }

    #[test]
    fn update_keeps_identity_fields() {
        let mut vault = vault_with(&["bank"]);
        let before = vault.find("bank").unwrap().clone();

        let after = vault
            .update(
                "bank",
                EntryUpdate {
                    username: Some("new-user".into()),
                    url: Some("https://bank.example".into()),
                    ..EntryUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(after.id, before.id);
        assert_eq!(after.title, before.title);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.secret, before.secret);
        assert_eq!(after.username, "new-user");
        assert_eq!(after.url.as_deref(), Some("https://bank.example"));
        assert!(after.updated_at >= before.updated_at);
    }

    #[test]
    fn missing_title_is_not_found() {
        let mut vault = vault_with(&["a"]);
        assert!(matches!(
            vault.remove("nope"),
            Err(PmError::EntryNotFound(t)) if t == "nope"
        ));
        assert!(vault.update("nope", EntryUpdate::default()).is_err());
        assert!(vault.find("nope").is_none());
    }

    #[test]
    fn null_entries_deserialize_as_empty() {
        let vault: Vault = serde_json::from_str(r#"{"entries":null,"version":"1.0"}"#).unwrap();
        assert!(vault.is_empty());
    }
}
