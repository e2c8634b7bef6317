//! The black-hole run: authenticate, create the default-deny policy and its
//! optional exception rule, then assign the policy to devices.
//!
//! Steps run strictly in order and the first failure aborts the run. Objects
//! created before the failure are left in place; re-running creates new
//! objects with the same names.

use async_trait::async_trait;
use fmc_api::{
    AccessPolicy, AccessRule, AssignmentTarget, ConfigObject, FmcClient, PolicyAssignment,
    PolicyRef,
};
use fmc_core::{Credentials, Error, ObjectId, Result, Session};
use serde_json::Value;
use std::fmt;
use tracing::info;

/// Controller operations the run depends on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ControllerApi: Send + Sync {
    /// Obtain a session.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session>;

    /// Create an access policy.
    async fn create_access_policy(
        &self,
        session: &Session,
        policy: &AccessPolicy,
    ) -> Result<ConfigObject>;

    /// Add a rule to a policy.
    async fn create_access_rule(
        &self,
        session: &Session,
        policy_id: &ObjectId,
        rule: &AccessRule,
    ) -> Result<ConfigObject>;

    /// Assign a policy to devices.
    async fn assign_policy(
        &self,
        session: &Session,
        assignment: &PolicyAssignment,
    ) -> Result<Value>;
}

#[async_trait]
impl ControllerApi for FmcClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        FmcClient::authenticate(self, credentials).await
    }

    async fn create_access_policy(
        &self,
        session: &Session,
        policy: &AccessPolicy,
    ) -> Result<ConfigObject> {
        FmcClient::create_access_policy(self, session, policy).await
    }

    async fn create_access_rule(
        &self,
        session: &Session,
        policy_id: &ObjectId,
        rule: &AccessRule,
    ) -> Result<ConfigObject> {
        FmcClient::create_access_rule(self, session, policy_id, rule).await
    }

    async fn assign_policy(
        &self,
        session: &Session,
        assignment: &PolicyAssignment,
    ) -> Result<Value> {
        FmcClient::assign_policy(self, session, assignment).await
    }
}

/// What to create and where to assign it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlackholePlan {
    /// Default-deny policy.
    pub policy: AccessPolicy,
    /// Optional ALLOW exception carved out of the policy.
    pub exception: Option<AccessRule>,
    /// Devices receiving the policy.
    pub targets: Vec<AssignmentTarget>,
}

impl BlackholePlan {
    /// Create a plan without an exception rule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if `targets` is empty.
    pub fn new(policy: AccessPolicy, targets: Vec<AssignmentTarget>) -> Result<Self> {
        if targets.is_empty() {
            return Err(Error::ValidationError(
                "at least one assignment target is required".to_string(),
            ));
        }

        Ok(Self {
            policy,
            exception: None,
            targets,
        })
    }

    /// Add an exception rule.
    #[must_use]
    pub fn with_exception(mut self, rule: AccessRule) -> Self {
        self.exception = Some(rule);
        self
    }
}

/// Ids of the objects created by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlackholeReport {
    /// Created policy.
    pub policy_id: ObjectId,
    /// Created exception rule, if any.
    pub rule_id: Option<ObjectId>,
    /// Id returned by the assignment call, when the response carries one.
    pub assignment_id: Option<ObjectId>,
}

impl fmt::Display for BlackholeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "access policy: {}", self.policy_id)?;
        match &self.rule_id {
            Some(rule_id) => writeln!(f, "exception rule: {rule_id}")?,
            None => writeln!(f, "exception rule: none")?,
        }
        match &self.assignment_id {
            Some(assignment_id) => write!(f, "assignment: {assignment_id}"),
            None => write!(f, "assignment: done"),
        }
    }
}

/// Execute the plan against the controller.
///
/// # Errors
///
/// Returns the first error raised by any step; later steps are not attempted.
pub async fn run<A>(api: &A, credentials: &Credentials, plan: &BlackholePlan) -> Result<BlackholeReport>
where
    A: ControllerApi + ?Sized,
{
    let session = api.authenticate(credentials).await?;

    info!(policy = %plan.policy.name, "Creating default-deny access policy");
    let policy = api.create_access_policy(&session, &plan.policy).await?;

    let rule_id = match &plan.exception {
        Some(rule) => {
            info!(policy_id = %policy.id, rule = %rule.name, "Adding exception rule");
            let created = api.create_access_rule(&session, &policy.id, rule).await?;
            Some(created.id)
        }
        None => None,
    };

    let assignment = PolicyAssignment::new(
        PolicyRef {
            name: Some(plan.policy.name.clone()),
            ..PolicyRef::access_policy(policy.id.clone())
        },
        plan.targets.clone(),
    )?;
    info!(policy_id = %policy.id, targets = plan.targets.len(), "Assigning policy");
    let assigned = api.assign_policy(&session, &assignment).await?;
    let assignment_id = assigned
        .get("id")
        .and_then(Value::as_str)
        .and_then(|id| ObjectId::new(id).ok());

    Ok(BlackholeReport {
        policy_id: policy.id,
        rule_id,
        assignment_id,
    })
}
