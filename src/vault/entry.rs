//! Credential records stored inside the vault.
//!
//! Field names on disk are `id`, `title`, `username`, `password`, `url`,
//! `notes`, `created_at`, `updated_at`.  An absent URL or note is written
//! as an empty string, which is how existing vault files represent it.
//!
//! Timestamps are RFC 3339.  Any offset is accepted on read; they are
//! always written back in UTC, so a re-saved `+01:00` value keeps its
//! instant but becomes a `Z` value.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::format::empty_as_none;

/// A single credential record.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Opaque identifier, unique within a vault.  Never changes.
    pub id: String,

    /// Human-facing lookup key.  Duplicates are allowed.
    pub title: String,

    pub username: String,

    /// The plaintext password or credential value.
    #[serde(rename = "password")]
    pub secret: String,

    #[serde(default, with = "empty_as_none")]
    pub url: Option<String>,

    #[serde(default, with = "empty_as_none")]
    pub notes: Option<String>,

    /// When this entry was first created.  Never changes.
    pub created_at: DateTime<Utc>,

    /// When this entry was last updated.
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .field("url", &self.url)
            .field("notes", &self.notes)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Caller-supplied fields for a new entry.
///
/// The vault assigns the id and both timestamps in `Vault::add`.
#[derive(Clone, Default)]
pub struct NewEntry {
    pub title: String,
    pub username: String,
    pub secret: String,
    pub url: Option<String>,
    pub notes: Option<String>,
}

impl NewEntry {
    pub fn new(
        title: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            username: username.into(),
            secret: secret.into(),
            url: None,
            notes: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = non_empty(Some(url.into()));
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = non_empty(Some(notes.into()));
        self
    }
}

/// A partial update.  `None` keeps the current value.
#[derive(Clone, Default)]
pub struct EntryUpdate {
    pub username: Option<String>,
    pub secret: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
}

impl EntryUpdate {
    /// Returns `true` if no field would change.
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.secret.is_none()
            && self.url.is_none()
            && self.notes.is_none()
    }

    /// Apply the update to `entry` and refresh its `updated_at`.
    pub(crate) fn apply(self, entry: &mut Entry, now: DateTime<Utc>) {
        if let Some(username) = self.username {
            entry.username = username;
        }
        if let Some(secret) = self.secret {
            entry.secret = secret;
        }
        if let Some(url) = self.url {
            entry.url = non_empty(Some(url));
        }
        if let Some(notes) = self.notes {
            entry.notes = non_empty(Some(notes));
        }
        entry.updated_at = now;
    }
}

/// Collapse `Some("")` to `None`.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
