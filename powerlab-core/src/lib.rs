//! Shared primitives for the powerlab power-analysis crates.
//!
//! `powerlab-core` provides the foundation the other powerlab crates build on:
//!
//! - **Error types**: [`PowerError`] and [`Result`] for structured error handling
//! - **Traits**: [`Scored`] and [`Summarizable`] for result types

pub mod error;
pub mod traits;

pub use error::{PowerError, Result};
pub use traits::*;
