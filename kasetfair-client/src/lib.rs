//! Kaset Fair store registration client.
//!
//! [`wizard::WizardController`] drives the multi-step registration against
//! any [`api::StoreApi`]; [`api::KasetFairClient`] is the HTTP implementation.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

pub mod api;
pub mod dashboard;
pub mod delay;
pub mod errors;
pub mod goods;
pub mod invitations;
pub mod profile;
pub mod questions;
pub mod storage;
pub mod wizard;


#[cfg(test)]
pub(crate) mod test_support;

pub use api::{Attachment, KasetFairClient, StoreApi};
pub use errors::{ApiError, ApiResult, StorageError, WizardError, extract_error_message};
pub use storage::{DraftCache, KeyValueStore, MemoryStore};
