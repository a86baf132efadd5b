//! Core types for the phonebook: contacts and the JSON-backed contact store.
//!
//! This crate never prints or logs. Every failure is returned to the caller as
//! an [`Error`]; presentation belongs to the interaction layer.

pub mod contact;
pub mod error;
pub mod store;

pub use contact::{Contact, ContactUpdate};
pub use error::{Error, Result};
pub use store::ContactStore;
