//! MySQL DAO implementations.

mod receipt_dao_impl;
mod user_dao_impl;

pub use receipt_dao_impl::MySqlReceiptDaoImpl;
pub use user_dao_impl::MySqlUserDaoImpl;
