//! Domain entities.

mod receipt;
mod user;

pub use receipt::*;
pub use user::*;
