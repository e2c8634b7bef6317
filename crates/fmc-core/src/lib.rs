//! # fmc-core
//!
//! Core types and utilities for working with a firewall management center (FMC).
//!
//! This crate provides the error taxonomy, environment configuration, session
//! handling, and HTTP client settings shared by the FMC API crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status mapping
//! - [`ids`] - Strongly-typed identifier wrappers for FMC objects
//! - [`config`] - Environment-driven configuration and credentials
//! - [`session`] - Authenticated session values
//! - [`client`] - HTTP client settings and construction

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod ids;
pub mod session;

// Re-export commonly used types
pub use config::{Credentials, FmcConfig};
pub use error::{Error, Result};
pub use ids::{DomainUuid, ObjectId};
pub use session::Session;
