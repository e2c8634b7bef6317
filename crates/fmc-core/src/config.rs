//! Configuration structures for FMC clients.
//!
//! Configuration comes from the process environment (`FMCHOST`, `FMCPORT`,
//! `FMCADMIN`, `FMCPASS` plus a few optional knobs) and is validated before
//! any network call is made.

use crate::client::{ClientConfig, FMC_DEFAULT_TIMEOUT};
use crate::Error;
use secrecy::{ExposeSecret, SecretString};
use std::net::Ipv6Addr;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;
use validator::{Validate, ValidationError};

/// Environment variable holding the FMC host name or address.
pub const ENV_HOST: &str = "FMCHOST";
/// Environment variable holding the FMC HTTPS port.
pub const ENV_PORT: &str = "FMCPORT";
/// Environment variable holding the admin account name.
pub const ENV_USERNAME: &str = "FMCADMIN";
/// Environment variable holding the admin password.
pub const ENV_PASSWORD: &str = "FMCPASS";
/// Optional URL scheme override (`https` when unset).
pub const ENV_SCHEME: &str = "FMCSCHEME";
/// Optional TLS verification switch (`true` when unset).
pub const ENV_TLS_VERIFY: &str = "FMC_TLS_VERIFY";
/// Optional path to a PEM CA bundle.
pub const ENV_CA_CERT: &str = "FMC_CA_CERT";
/// Optional request timeout in seconds.
pub const ENV_TIMEOUT: &str = "FMC_TIMEOUT";

/// Base path of the platform (authentication) API.
pub const DEFAULT_PLATFORM_PATH: &str = "/api/fmc_platform/v1";
/// Base path of the configuration API.
pub const DEFAULT_CONFIG_PATH: &str = "/api/fmc_config/v1";

const REQUIRED_VARS: [&str; 4] = [ENV_HOST, ENV_PORT, ENV_USERNAME, ENV_PASSWORD];

/// Admin credentials used against the token endpoint.
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    /// Create credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the username is empty.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self, Error> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(Error::ConfigError("username must not be empty".to_string()));
        }

        Ok(Self {
            username,
            password: SecretString::from(password.into()),
        })
    }

    /// Returns the account name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Configuration for an FMC client instance.
#[derive(Debug, Validate)]
pub struct FmcConfig {
    /// URL scheme, `https` or `http`
    #[validate(custom(function = "validate_scheme"))]
    pub scheme: String,

    /// Host name or address of the management center
    #[validate(length(min = 1), custom(function = "validate_host"))]
    pub host: String,

    /// Port of the REST API
    #[validate(range(min = 1))]
    pub port: u16,

    /// Admin credentials
    pub credentials: Credentials,

    /// Base path of the platform API
    #[validate(length(min = 1))]
    pub platform_path: String,

    /// Base path of the configuration API
    #[validate(length(min = 1))]
    pub config_path: String,

    /// Whether to verify TLS certificates
    pub tls_verify: bool,

    /// Optional path to custom CA certificate
    pub tls_ca_cert: Option<PathBuf>,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_secs: u64,
}

fn validate_scheme(scheme: &str) -> Result<(), ValidationError> {
    match scheme {
        "https" | "http" => Ok(()),
        _ => Err(ValidationError::new("unsupported_scheme")),
    }
}

/// Bare host name, IPv4 address or IPv6 address (optionally bracketed).
/// Schemes, ports, paths and userinfo belong in their own settings.
fn validate_host(host: &str) -> Result<(), ValidationError> {
    if host
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '@' | '\\'))
    {
        return Err(ValidationError::new("invalid_host")
            .with_message("host must not contain a scheme, path or credentials".into()));
    }

    if host.contains(':') && ipv6_literal(host).is_none() {
        return Err(ValidationError::new("invalid_host")
            .with_message("host must not contain a port; set FMCPORT instead".into()));
    }

    Ok(())
}

fn ipv6_literal(host: &str) -> Option<Ipv6Addr> {
    host.strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(host)
        .parse()
        .ok()
}

impl FmcConfig {
    /// Create a configuration for `https://{host}:{port}`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if validation fails.
    pub fn new(host: impl Into<String>, port: u16, credentials: Credentials) -> Result<Self, Error> {
        let config = Self {
            scheme: "https".to_string(),
            host: host.into(),
            port,
            credentials,
            platform_path: DEFAULT_PLATFORM_PATH.to_string(),
            config_path: DEFAULT_CONFIG_PATH.to_string(),
            tls_verify: true,
            tls_ca_cert: None,
            request_timeout_secs: FMC_DEFAULT_TIMEOUT,
        };

        config.check()?;
        Ok(config)
    }

    /// Build the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] naming every missing required variable,
    /// or describing the first malformed value.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as missing.
    ///
    /// # Errors
    ///
    /// See [`FmcConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let missing: Vec<&str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|key| get(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(Error::ConfigError(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let host = get(ENV_HOST).unwrap_or_default();
        let port_raw = get(ENV_PORT).unwrap_or_default();
        let port = port_raw.trim().parse::<u16>().map_err(|_| {
            Error::ConfigError(format!("{ENV_PORT} must be a port number, got `{port_raw}`"))
        })?;
        let credentials = Credentials::new(
            get(ENV_USERNAME).unwrap_or_default(),
            get(ENV_PASSWORD).unwrap_or_default(),
        )?;

        let mut config = Self::new(host.trim(), port, credentials)?;

        if let Some(scheme) = get(ENV_SCHEME) {
            config = config.with_scheme(scheme.trim().to_ascii_lowercase());
        }
        if let Some(raw) = get(ENV_TLS_VERIFY) {
            config = config.with_tls_verify(parse_bool(ENV_TLS_VERIFY, &raw)?);
        }
        if let Some(path) = get(ENV_CA_CERT) {
            config = config.with_ca_cert(PathBuf::from(path));
        }
        if let Some(raw) = get(ENV_TIMEOUT) {
            let seconds = raw.trim().parse::<u64>().map_err(|_| {
                Error::ConfigError(format!("{ENV_TIMEOUT} must be a number of seconds, got `{raw}`"))
            })?;
            config = config.with_timeout(seconds);
        }

        config.check()?;
        Ok(config)
    }

    /// Set the URL scheme.
    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set custom CA certificate path.
    #[must_use]
    pub fn with_ca_cert(mut self, path: PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Override the platform and configuration API base paths.
    #[must_use]
    pub fn with_api_paths(
        mut self,
        platform_path: impl Into<String>,
        config_path: impl Into<String>,
    ) -> Self {
        self.platform_path = platform_path.into();
        self.config_path = config_path.into();
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Re-run validation, e.g. after applying `with_*` overrides.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the invalid fields.
    pub fn check(&self) -> Result<(), Error> {
        self.validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;
        self.base_url().map(|_| ())
    }

    /// Root URL of the management center, e.g. `https://fmc.example.com:443`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the host cannot form a URL on the
    /// configured port.
    pub fn base_url(&self) -> Result<Url, Error> {
        let host = match ipv6_literal(&self.host) {
            Some(addr) => format!("[{addr}]"),
            None => self.host.clone(),
        };

        let url = Url::parse(&format!("{}://{}:{}", self.scheme, host, self.port))
            .map_err(|e| Error::ConfigError(format!("Invalid FMC address: {e}")))?;

        if url.path() != "/" || url.port_or_known_default() != Some(self.port) {
            return Err(Error::ConfigError(format!(
                "Invalid FMC address: `{}` does not resolve to port {}",
                self.host, self.port
            )));
        }

        Ok(url)
    }

    /// HTTP client settings derived from this configuration.
    #[must_use]
    pub fn http_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new()
            .with_timeout(self.timeout())
            .with_tls_verify(self.tls_verify);
        if let Some(path) = &self.tls_ca_cert {
            config = config.with_ca_cert(path.clone());
        }
        config
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, Error> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::ConfigError(format!(
            "{key} must be a boolean, got `{raw}`"
        ))),
    }
}
