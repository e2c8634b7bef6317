//! FMC configuration API client and data models.
//!
//! Provides typed payloads and an asynchronous client for authenticating
//! against a firewall management center and managing access control policies,
//! rules and device assignments.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{FmcClient, FmcClientBuilder, ACCESS_POLICIES_PATH, POLICY_ASSIGNMENTS_PATH};
pub use models::{
    AccessPolicy, AccessPolicyBuilder, AccessRule, AccessRuleBuilder, AssignmentTarget,
    ConfigObject, DefaultAction, NetworkObjectRef, NetworkSelection, ObjectKind,
    PolicyAssignment, PolicyDefaultAction, PolicyRef, RuleAction,
};

/// Convenient result alias that reuses the shared FMC error type.
pub type Result<T> = fmc_core::Result<T>;
