//! Domain model for receipts and users: entities, inputs, response shapes,
//! and the enumerated value objects stored as text columns.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
