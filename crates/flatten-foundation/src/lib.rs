//! Foundation Layer - Core types, errors and edit planning
//!
//! This crate provides the building blocks shared by the rest of the
//! workspace:
//! - The error type used by every library crate
//! - The parsed import model and the `ImportSyntax` plugin seam
//! - Edit plans and the run report

pub mod error;
pub mod model;
pub mod planning;

// Re-export commonly used types for convenience
pub use error::*;
pub use model::*;
