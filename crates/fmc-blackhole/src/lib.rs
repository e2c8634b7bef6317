//! Black-hole policy workflow for Cisco FMC.
//!
//! Authenticates, creates an access policy whose default action blocks all
//! traffic, optionally adds an ALLOW exception rule, and assigns the policy
//! to one or more devices.

#![deny(missing_docs)]

pub mod cli;
pub mod pipeline;

pub use cli::Cli;
pub use pipeline::{run, BlackholePlan, BlackholeReport, ControllerApi};
