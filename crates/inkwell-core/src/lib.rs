//! # Inkwell Core
//!
//! The domain layer of the Inkwell blog platform.
//! This crate contains entities, validation rules, the ports that storage and
//! realtime delivery must implement, and the services that combine them.
//! It has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
