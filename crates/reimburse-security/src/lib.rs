//! # Reimburse Security
//!
//! Encryption at rest for sensitive columns. Bank account numbers are
//! stored encrypted and decrypted while shaping receipt rows.

pub mod cipher;

pub use cipher::*;
