//! Vault module — credential records and their encrypted storage.
//!
//! This module provides:
//! - `Entry`, `NewEntry` and `EntryUpdate` record types (`entry`)
//! - The ordered `Vault` collection (`collection`)
//! - The `User` authentication record (`user`)
//! - On-disk layout, serialization and atomic writes (`format`)
//! - The storage directory lock (`lock`)
//! - High-level `Storage` for loading and saving (`store`)

pub mod collection;
pub mod entry;
pub mod format;
pub mod lock;
pub mod store;
pub mod user;

// Re-export the most commonly used items.
pub use collection::{Vault, CURRENT_VAULT_VERSION};
pub use entry::{Entry, EntryUpdate, NewEntry};
pub use lock::StorageLock;
pub use store::Storage;
pub use user::User;
