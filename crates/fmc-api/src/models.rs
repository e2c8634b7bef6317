//! Request and response models for the FMC configuration API.
//!
//! Payloads are built through constructors and builders that validate their
//! fields up front, so a request with an empty name or id never leaves the
//! process.

use crate::Result;
use fmc_core::{Error, ObjectId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationError};

/// Object `type` discriminator used throughout the configuration API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Access control policy.
    AccessPolicy,
    /// Rule inside an access control policy.
    AccessRule,
    /// Network (CIDR) object.
    Network,
    /// Single host object.
    Host,
    /// Address range object.
    Range,
    /// Group of network objects.
    NetworkGroup,
    /// Managed device.
    Device,
    /// Group of managed devices.
    DeviceGroup,
    /// High-availability device pair.
    #[serde(rename = "DeviceHAPair")]
    DeviceHaPair,
    /// Policy-to-device assignment.
    PolicyAssignment,
}

impl ObjectKind {
    const fn is_network(self) -> bool {
        matches!(
            self,
            Self::Network | Self::Host | Self::Range | Self::NetworkGroup
        )
    }

    const fn is_assignable(self) -> bool {
        matches!(self, Self::Device | Self::DeviceGroup | Self::DeviceHaPair)
    }
}

/// Action applied by a policy when no rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DefaultAction {
    /// Drop everything not explicitly allowed.
    Block,
    /// Pass without inspection.
    Trust,
    /// Pass with intrusion inspection.
    Permit,
    /// Pass with network discovery only.
    NetworkDiscovery,
}

/// Action applied by a matching access rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleAction {
    /// Allow with inspection.
    Allow,
    /// Allow without inspection.
    Trust,
    /// Drop silently.
    Block,
    /// Log only.
    Monitor,
    /// Drop and reset the connection.
    BlockReset,
}

fn not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Wrapper object for a policy's default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDefaultAction {
    /// The action.
    pub action: DefaultAction,
}

/// Access control policy payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccessPolicy {
    /// Always [`ObjectKind::AccessPolicy`].
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    /// Policy name.
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Default action.
    pub default_action: PolicyDefaultAction,
}

impl AccessPolicy {
    /// Start building a policy with the given name.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> AccessPolicyBuilder {
        AccessPolicyBuilder {
            name: name.into(),
            description: None,
            default_action: DefaultAction::Block,
        }
    }
}

/// Builder for [`AccessPolicy`]; the default action is [`DefaultAction::Block`].
#[derive(Debug, Clone)]
pub struct AccessPolicyBuilder {
    name: String,
    description: Option<String>,
    default_action: DefaultAction,
}

impl AccessPolicyBuilder {
    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the default action.
    #[must_use]
    pub const fn default_action(mut self, action: DefaultAction) -> Self {
        self.default_action = action;
        self
    }

    /// Validate and build the policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if the name is blank.
    pub fn build(self) -> Result<AccessPolicy> {
        let policy = AccessPolicy {
            kind: ObjectKind::AccessPolicy,
            name: self.name,
            description: self.description,
            default_action: PolicyDefaultAction {
                action: self.default_action,
            },
        };
        policy.validate()?;
        Ok(policy)
    }
}

/// Reference to an existing network object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NetworkObjectRef {
    /// Network object kind.
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    /// Whether the object may be overridden per device.
    pub overridable: bool,
    /// Object id.
    pub id: ObjectId,
    /// Object name.
    #[validate(custom(function = "not_blank"))]
    pub name: String,
}

impl NetworkObjectRef {
    /// Reference an existing network object by id and name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if `kind` is not a network kind or
    /// the id or name is blank.
    pub fn new(kind: ObjectKind, id: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        if !kind.is_network() {
            return Err(Error::ValidationError(format!(
                "{kind:?} is not a network object type"
            )));
        }

        let reference = Self {
            kind,
            overridable: false,
            id: ObjectId::new(id)?,
            name: name.into(),
        };
        reference.validate()?;
        Ok(reference)
    }

    /// Reference a `Network` object.
    ///
    /// # Errors
    ///
    /// See [`NetworkObjectRef::new`].
    pub fn network(id: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        Self::new(ObjectKind::Network, id, name)
    }

    /// Mark the object as overridable.
    #[must_use]
    pub const fn overridable(mut self, overridable: bool) -> Self {
        self.overridable = overridable;
        self
    }
}

/// Network object list used for rule source and destination.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetworkSelection {
    /// Referenced objects.
    pub objects: Vec<NetworkObjectRef>,
}

/// Access rule payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccessRule {
    /// Rule action.
    pub action: RuleAction,
    /// Enabled flag.
    pub enabled: bool,
    /// Always [`ObjectKind::AccessRule`].
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    /// Rule name.
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    /// Source networks; absent means any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_networks: Option<NetworkSelection>,
    /// Destination networks; absent means any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_networks: Option<NetworkSelection>,
    /// Send connection events to the management center.
    #[serde(rename = "sendEventsToFMC")]
    pub send_events_to_fmc: bool,
    /// Log file events.
    pub log_files: bool,
    /// Log at connection start.
    pub log_begin: bool,
    /// Log at connection end.
    pub log_end: bool,
}

impl AccessRule {
    /// Start building an enabled rule with logging off.
    #[must_use]
    pub fn builder(name: impl Into<String>, action: RuleAction) -> AccessRuleBuilder {
        AccessRuleBuilder {
            rule: Self {
                action,
                enabled: true,
                kind: ObjectKind::AccessRule,
                name: name.into(),
                source_networks: None,
                destination_networks: None,
                send_events_to_fmc: false,
                log_files: false,
                log_begin: false,
                log_end: false,
            },
        }
    }
}

/// Builder for [`AccessRule`].
#[derive(Debug, Clone)]
pub struct AccessRuleBuilder {
    rule: AccessRule,
}

impl AccessRuleBuilder {
    /// Enable or disable the rule.
    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.rule.enabled = enabled;
        self
    }

    /// Add a source network object.
    #[must_use]
    pub fn source_network(mut self, object: NetworkObjectRef) -> Self {
        self.rule
            .source_networks
            .get_or_insert_with(NetworkSelection::default)
            .objects
            .push(object);
        self
    }

    /// Add a destination network object.
    #[must_use]
    pub fn destination_network(mut self, object: NetworkObjectRef) -> Self {
        self.rule
            .destination_networks
            .get_or_insert_with(NetworkSelection::default)
            .objects
            .push(object);
        self
    }

    /// Send events to the management center.
    #[must_use]
    pub const fn send_events_to_fmc(mut self, enabled: bool) -> Self {
        self.rule.send_events_to_fmc = enabled;
        self
    }

    /// Log file events.
    #[must_use]
    pub const fn log_files(mut self, enabled: bool) -> Self {
        self.rule.log_files = enabled;
        self
    }

    /// Log at connection start.
    #[must_use]
    pub const fn log_begin(mut self, enabled: bool) -> Self {
        self.rule.log_begin = enabled;
        self
    }

    /// Log at connection end.
    #[must_use]
    pub const fn log_end(mut self, enabled: bool) -> Self {
        self.rule.log_end = enabled;
        self
    }

    /// Validate and build the rule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if the name is blank.
    pub fn build(self) -> Result<AccessRule> {
        self.rule.validate()?;
        Ok(self.rule)
    }
}

/// Reference to the policy being assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRef {
    /// Policy kind.
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    /// Policy id.
    pub id: ObjectId,
    /// Optional policy name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PolicyRef {
    /// Reference an access policy by id.
    #[must_use]
    pub const fn access_policy(id: ObjectId) -> Self {
        Self {
            kind: ObjectKind::AccessPolicy,
            id,
            name: None,
        }
    }
}

/// Device or device group receiving a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentTarget {
    /// Target kind.
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    /// Target id.
    pub id: ObjectId,
    /// Optional target name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AssignmentTarget {
    /// Create a target.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if `kind` cannot receive a policy
    /// or the id is blank.
    pub fn new(kind: ObjectKind, id: impl Into<String>) -> Result<Self> {
        if !kind.is_assignable() {
            return Err(Error::ValidationError(format!(
                "{kind:?} cannot be a policy assignment target"
            )));
        }

        Ok(Self {
            kind,
            id: ObjectId::new(id)?,
            name: None,
        })
    }

    /// Target a single managed device.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if the id is blank.
    pub fn device(id: impl Into<String>) -> Result<Self> {
        Self::new(ObjectKind::Device, id)
    }

    /// Attach a display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Policy assignment payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PolicyAssignment {
    /// Always [`ObjectKind::PolicyAssignment`].
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    /// Policy being assigned.
    pub policy: PolicyRef,
    /// Devices receiving the policy.
    #[validate(length(min = 1))]
    pub targets: Vec<AssignmentTarget>,
}

impl PolicyAssignment {
    /// Assign `policy` to `targets`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if `targets` is empty.
    pub fn new(policy: PolicyRef, targets: Vec<AssignmentTarget>) -> Result<Self> {
        let assignment = Self {
            kind: ObjectKind::PolicyAssignment,
            policy,
            targets,
        };
        assignment.validate()?;
        Ok(assignment)
    }
}

/// Object returned by the configuration API after create, read or delete.
///
/// Fields the client does not model are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigObject {
    /// Server-assigned id.
    pub id: ObjectId,
    /// Object type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Object name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Object description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// HATEOAS links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
