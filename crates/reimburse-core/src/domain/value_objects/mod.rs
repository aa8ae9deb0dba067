//! Value objects.

mod role;
mod status;

pub use role::*;
pub use status::*;
