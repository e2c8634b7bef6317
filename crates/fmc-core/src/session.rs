//! Authenticated FMC session.

use crate::error::{Error, Result};
use crate::ids::DomainUuid;
use secrecy::{ExposeSecret, SecretString};

/// Response header carrying the access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-auth-access-token";

/// Response/request header carrying the domain UUID.
pub const DOMAIN_UUID_HEADER: &str = "DOMAIN_UUID";

/// Access token and domain scope returned by the token endpoint.
///
/// A session is an immutable value: the client never stores it, every
/// configuration call takes it explicitly. The token is not refreshed and
/// there is no logout.
#[derive(Debug)]
pub struct Session {
    access_token: SecretString,
    domain_uuid: DomainUuid,
}

impl Session {
    /// Creates a session from a token and domain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if the token is empty.
    pub fn new(access_token: impl Into<String>, domain_uuid: DomainUuid) -> Result<Self> {
        let access_token = access_token.into();
        if access_token.is_empty() {
            return Err(Error::ValidationError(
                "access token must not be empty".to_string(),
            ));
        }

        Ok(Self {
            access_token: SecretString::from(access_token),
            domain_uuid,
        })
    }

    /// Returns the access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }

    /// Returns the domain this session is scoped to.
    #[must_use]
    pub const fn domain_uuid(&self) -> &DomainUuid {
        &self.domain_uuid
    }

    /// Header pairs that must accompany every configuration API request.
    #[must_use]
    pub fn headers(&self) -> [(&'static str, &str); 2] {
        [
            (ACCESS_TOKEN_HEADER, self.access_token()),
            (DOMAIN_UUID_HEADER, self.domain_uuid.as_str()),
        ]
    }
}
