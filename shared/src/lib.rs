//! Shared types and models for the Climate Risk Analytics platform
//!
//! This crate contains the plain records exchanged between the analytics
//! engine and whatever presentation layer consumes its output.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
