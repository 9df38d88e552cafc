//! # Domain Layer
//!
//! Entities, value objects and validation rules, free of any I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
