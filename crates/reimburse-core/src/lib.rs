//! # Reimburse Core
//!
//! Core types, domain model, and error definitions for the reimbursement
//! data layer. Every other crate in the workspace builds on the types here.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod telemetry;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use validation::*;
