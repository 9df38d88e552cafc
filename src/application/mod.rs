//! # Application Layer
//!
//! Use cases over the domain and the persistence ports.
//!
//! - [`error`]: application and infrastructure error types
//! - [`services`]: registration and catalog services

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult, InfrastructureError};
