//! Configuration module
//!
//! Loading and validation of workout plan files: the exercises of a
//! session and the tempo each one is coached at.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{LoadResult, LoadWarning, LoaderOptions, PlanLimits, PlanLoader};
pub use schema::*;
pub use validation::{ValidationResult, Validator};
