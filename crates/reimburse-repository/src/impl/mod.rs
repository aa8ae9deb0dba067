//! Repository layer implementations.
//!
//! Trait definitions live in the parent module (`traits.rs`).
//! This module contains concrete structs that implement those traits.

pub mod receipt_repository_impl;
pub mod user_repository_impl;

pub use receipt_repository_impl::ReceiptRepositoryImpl;
pub use user_repository_impl::{identity_retry_policy, UserRepositoryImpl};
