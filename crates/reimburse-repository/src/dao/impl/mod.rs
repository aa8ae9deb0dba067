//! DAO implementations.
//!
//! Trait definitions live in the parent `dao/` module.
//! Implementations are organized by technology.

pub mod mysql;

pub use mysql::{MySqlReceiptDaoImpl, MySqlUserDaoImpl};
