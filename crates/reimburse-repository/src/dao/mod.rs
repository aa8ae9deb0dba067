//! DAO (Data Access Object) layer.
//!
//! DAOs run single statements against one data source and return flat
//! rows. Shaping, validation and retries belong to the repositories above.
//!
//! Hierarchy:
//! ```text
//! Caller → Repository (interface + impl) → DAO (interface + impl) → MySQL
//! ```

pub mod r#impl;
pub mod receipt_dao;
pub mod user_dao;

pub use r#impl::{MySqlReceiptDaoImpl, MySqlUserDaoImpl};
pub use receipt_dao::ReceiptDao;
pub use user_dao::UserDao;
