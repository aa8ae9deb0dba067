//! # Reimburse Resilience
//!
//! Retry policy with bounded attempts, exponential backoff, and jitter.
//! Used by the user repository to re-roll colliding identities.

pub mod retry;

pub use retry::*;
