//! Command-line options for the `fmc-blackhole` binary.

use crate::pipeline::BlackholePlan;
use clap::{Parser, ValueEnum};
use fmc_api::{AccessPolicy, AccessRule, AssignmentTarget, NetworkObjectRef, ObjectKind, RuleAction};
use fmc_core::{FmcConfig, Result};

/// Kind of device receiving the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetKind {
    /// A single managed device
    Device,
    /// A device group
    DeviceGroup,
    /// A high-availability pair
    HaPair,
}

impl From<TargetKind> for ObjectKind {
    fn from(kind: TargetKind) -> Self {
        match kind {
            TargetKind::Device => Self::Device,
            TargetKind::DeviceGroup => Self::DeviceGroup,
            TargetKind::HaPair => Self::DeviceHaPair,
        }
    }
}

/// Kind of network object allowed through the black hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NetworkKind {
    /// CIDR network
    Network,
    /// Single host
    Host,
    /// Address range
    Range,
    /// Network group
    NetworkGroup,
}

impl From<NetworkKind> for ObjectKind {
    fn from(kind: NetworkKind) -> Self {
        match kind {
            NetworkKind::Network => Self::Network,
            NetworkKind::Host => Self::Host,
            NetworkKind::Range => Self::Range,
            NetworkKind::NetworkGroup => Self::NetworkGroup,
        }
    }
}

/// Create a default-deny access policy on an FMC and assign it to devices.
///
/// Connection settings come from FMCHOST, FMCPORT, FMCADMIN and FMCPASS.
#[derive(Debug, Parser)]
#[command(name = "fmc-blackhole", version, about, long_about = None)]
pub struct Cli {
    /// Name of the access policy to create
    #[arg(long, default_value = "Example Security Access Control Policy")]
    pub policy_name: String,

    /// Description of the access policy
    #[arg(long, default_value = "Basic AC Policy")]
    pub policy_description: String,

    /// Device id to assign the policy to (repeatable)
    #[arg(long = "device", value_name = "ID", required = true)]
    pub devices: Vec<String>,

    /// Kind of the assignment targets
    #[arg(long, value_enum, default_value_t = TargetKind::Device)]
    pub target_kind: TargetKind,

    /// Id of a network object exempted from the black hole
    #[arg(long, value_name = "ID", requires = "allow_network_name")]
    pub allow_network_id: Option<String>,

    /// Name of the exempted network object
    #[arg(long, value_name = "NAME", requires = "allow_network_id")]
    pub allow_network_name: Option<String>,

    /// Kind of the exempted network object
    #[arg(long, value_enum, default_value_t = NetworkKind::Network)]
    pub allow_network_kind: NetworkKind,

    /// Name of the exception rule
    #[arg(long, default_value = "Rule1")]
    pub rule_name: String,

    /// Disable TLS certificate verification
    #[arg(long)]
    pub insecure: bool,

    /// Request timeout in seconds, overriding FMC_TIMEOUT
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

impl Cli {
    /// Build the run plan from the options.
    ///
    /// # Errors
    ///
    /// Returns [`fmc_core::Error::ValidationError`] for blank names or ids.
    pub fn plan(&self) -> Result<BlackholePlan> {
        let policy = AccessPolicy::builder(&self.policy_name)
            .description(&self.policy_description)
            .build()?;

        let targets = self
            .devices
            .iter()
            .map(|id| AssignmentTarget::new(self.target_kind.into(), id))
            .collect::<Result<Vec<_>>>()?;

        let mut plan = BlackholePlan::new(policy, targets)?;

        if let (Some(id), Some(name)) = (&self.allow_network_id, &self.allow_network_name) {
            let source = NetworkObjectRef::new(self.allow_network_kind.into(), id, name)?;
            let rule = AccessRule::builder(&self.rule_name, RuleAction::Allow)
                .source_network(source)
                .build()?;
            plan = plan.with_exception(rule);
        }

        Ok(plan)
    }

    /// Apply command-line overrides to the environment configuration.
    ///
    /// # Errors
    ///
    /// Returns [`fmc_core::Error::ConfigError`] if the result is invalid.
    pub fn apply(&self, mut config: FmcConfig) -> Result<FmcConfig> {
        if self.insecure {
            config = config.with_tls_verify(false);
        }
        if let Some(seconds) = self.timeout {
            config = config.with_timeout(seconds);
        }
        config.check()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmc_core::{Credentials, Error};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fmc-blackhole").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["--device", "dev-1"]);
        let plan = cli.plan().unwrap();

        assert_eq!(plan.policy.name, "Example Security Access Control Policy");
        assert_eq!(plan.policy.description.as_deref(), Some("Basic AC Policy"));
        assert!(plan.exception.is_none());
        assert_eq!(plan.targets.len(), 1);
        assert_eq!(plan.targets[0].kind, ObjectKind::Device);
    }

    #[test]
    fn test_exception_rule() {
        let cli = parse(&[
            "--device",
            "dev-1",
            "--device",
            "dev-2",
            "--target-kind",
            "device-group",
            "--allow-network-id",
            "net-1",
            "--allow-network-name",
            "mgmt-net",
            "--allow-network-kind",
            "host",
        ]);
        let plan = cli.plan().unwrap();

        assert_eq!(plan.targets.len(), 2);
        assert!(plan.targets.iter().all(|t| t.kind == ObjectKind::DeviceGroup));

        let rule = plan.exception.unwrap();
        assert_eq!(rule.name, "Rule1");
        assert_eq!(rule.action, RuleAction::Allow);
        let sources = rule.source_networks.unwrap();
        assert_eq!(sources.objects[0].kind, ObjectKind::Host);
        assert_eq!(sources.objects[0].id.as_str(), "net-1");
    }

    #[test]
    fn test_device_required() {
        assert!(Cli::try_parse_from(["fmc-blackhole"]).is_err());
    }

    #[test]
    fn test_network_id_requires_name() {
        let result = Cli::try_parse_from([
            "fmc-blackhole",
            "--device",
            "dev-1",
            "--allow-network-id",
            "net-1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_device_rejected() {
        let cli = parse(&["--device", ""]);
        assert!(matches!(cli.plan(), Err(Error::ValidationError(_))));
    }

    #[test]
    fn test_overrides() {
        let config = FmcConfig::new("fmc.example.com", 443, Credentials::new("apiadmin", "s3cret").unwrap())
            .unwrap();

        let cli = parse(&["--device", "dev-1", "--insecure", "--timeout", "5"]);
        let config = cli.apply(config).unwrap();
        assert!(!config.tls_verify);
        assert_eq!(config.request_timeout_secs, 5);

        let cli = parse(&["--device", "dev-1", "--timeout", "0"]);
        let config = FmcConfig::new("fmc.example.com", 443, Credentials::new("apiadmin", "s3cret").unwrap())
            .unwrap();
        assert!(matches!(cli.apply(config), Err(Error::ConfigError(_))));
    }
}
