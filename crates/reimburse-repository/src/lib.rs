//! # Reimburse Repository
//!
//! Four-layer data access hierarchy:
//!
//! ```text
//! Caller
//!   ↓  Arc<dyn ReceiptRepository> / Arc<dyn UserRepository>   (domain interface)
//! ReceiptRepositoryImpl / UserRepositoryImpl                 (validation, shaping, id retry)
//!   ↓  Arc<dyn ReceiptDao> / Arc<dyn UserDao>                 (DAO interface)
//! MySqlReceiptDaoImpl / MySqlUserDaoImpl                     (DAO impl, MySQL via SQLx)
//!   ↓
//! MySQL
//! ```
//!
//! ## Structure
//!
//! ```text
//! src/
//!   traits.rs                    ← ReceiptRepository, UserRepository
//!   query/                       ← QuerySpec, filters, sort allow-lists
//!   shape.rs                     ← flat rows → nested views
//!   id_generator.rs              ← six-digit user ids
//!   module.rs                    ← RepositoryModule wiring
//!   impl/
//!     receipt_repository_impl.rs
//!     user_repository_impl.rs
//!   dao/
//!     receipt_dao.rs, user_dao.rs
//!     impl/mysql/
//!       receipt_dao_impl.rs, user_dao_impl.rs
//! ```

pub mod dao;
pub mod id_generator;
pub mod r#impl;
pub mod module;
pub mod pool;
pub mod query;
pub mod shape;
pub mod traits;

pub use dao::{MySqlReceiptDaoImpl, MySqlUserDaoImpl, ReceiptDao, UserDao};
pub use id_generator::{RandomUserIdGenerator, UserIdGenerator};
pub use module::RepositoryModule;
pub use pool::*;
pub use query::{
    BindValue, BuiltQuery, FilterParams, ReceiptFilter, SortDirection, UserFilter, RECEIPT_QUERY,
    USER_QUERY,
};
pub use r#impl::{ReceiptRepositoryImpl, UserRepositoryImpl};
pub use shape::{ReceiptRow, UserRow};
pub use traits::*;
