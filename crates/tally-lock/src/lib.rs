//! Versioned lock-file store for tally
//!
//! The lock file is the durable record of desired state: which
//! packages each manager should have installed. This crate owns
//! reading, atomic writing, and the one-shot migration of older
//! schema generations.

pub mod document;
pub mod error;
mod legacy;
pub mod store;

pub use document::{LOCK_VERSION, Lock};
pub use error::{Error, Result};
pub use store::{LOCK_FILE_NAME, LockStore};
