//! Inventory run configuration

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use cumulus_api::ServerState;
use cumulus_client::Credentials;
use cumulus_client::credentials::{PASSWORD_ENV, TOKEN_ENV, USERNAME_ENV};

use crate::error::InventoryError;

/// How the connection address for each server is chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectWith {
    /// First public IPv4 address
    #[default]
    PublicIpv4,
    /// First public IPv6 address
    PublicIpv6,
    /// The server's hostname, no address lookup
    Hostname,
    /// First address on the interface attached to the configured network
    PrivateIpv4,
    /// First address on a utility interface
    UtilityIpv4,
}

impl std::fmt::Display for ConnectWith {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectWith::PublicIpv4 => write!(f, "public_ipv4"),
            ConnectWith::PublicIpv6 => write!(f, "public_ipv6"),
            ConnectWith::Hostname => write!(f, "hostname"),
            ConnectWith::PrivateIpv4 => write!(f, "private_ipv4"),
            ConnectWith::UtilityIpv4 => write!(f, "utility_ipv4"),
        }
    }
}

/// Credential settings with environment fallbacks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
    /// Environment variable consulted when `username` is unset
    pub username_env: String,
    /// Environment variable consulted when `password` is unset
    pub password_env: String,
    /// Environment variable consulted when `token` is unset
    pub token_env: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            token: None,
            username_env: USERNAME_ENV.to_string(),
            password_env: PASSWORD_ENV.to_string(),
            token_env: TOKEN_ENV.to_string(),
        }
    }
}

impl AuthConfig {
    /// Resolve credential material: explicit values first, then the
    /// configured environment variables.
    #[must_use]
    pub fn resolve(&self) -> Credentials {
        Credentials::new(
            self.username.clone(),
            self.password.clone(),
            self.token.clone(),
        )
        .or_env(&self.username_env, &self.password_env, &self.token_env)
    }
}

/// Server selection criteria
///
/// Empty criteria select everything; each non-empty criterion narrows the
/// candidate set further.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Keep servers in any of these zones
    pub zones: Vec<String>,
    /// Keep servers in any of these lifecycle states
    pub states: Vec<ServerState>,
    /// Keep servers carrying every one of these tags
    pub tags: Vec<String>,
    /// Keep servers where any token matches any label, either a bare
    /// key-or-value fragment ("foo") or a whole pair ("foo=bar")
    pub labels: Vec<String>,
    /// Keep servers attached to this network (name or UUID)
    pub network: Option<String>,
    /// Keep servers owned by this server group (UUID or title,
    /// case-insensitive)
    pub server_group: Option<String>,
}

impl FilterCriteria {
    /// True when no criterion is set and filtering would be a no-op.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
            && self.states.is_empty()
            && self.tags.is_empty()
            && self.labels.is_empty()
            && self.network.is_none()
            && self.server_group.is_none()
    }
}

fn default_separator() -> String {
    "_".to_string()
}

/// Keyed-group rule: one group per distinct value of an expression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyedGroup {
    /// Expression evaluated against the host's variables
    pub key: String,
    /// Group name prefix
    #[serde(default)]
    pub prefix: String,
    /// Separator between prefix and value
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Value used when `key` evaluates to nothing
    #[serde(default)]
    pub default_value: Option<String>,
}

/// Top-level configuration of one inventory run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub auth: AuthConfig,
    pub connect_with: ConnectWith,
    #[serde(flatten)]
    pub filters: FilterCriteria,
    /// Escalate expression-evaluation failures to fatal errors
    pub strict: bool,
    /// Composed variables: variable name -> expression
    pub compose: BTreeMap<String, String>,
    /// Conditional groups: group name -> boolean expression
    pub groups: BTreeMap<String, String>,
    /// Keyed groups derived from variable values
    pub keyed_groups: Vec<KeyedGroup>,
}

impl InventoryConfig {
    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    /// Returns a configuration error when `connect_with = private_ipv4` is
    /// requested without a network selector.
    pub fn validate(&self) -> Result<(), InventoryError> {
        if self.connect_with == ConnectWith::PrivateIpv4 && self.filters.network.is_none() {
            return Err(InventoryError::Configuration(
                "connecting with private IPv4 requires a network".to_string(),
            ));
        }
        Ok(())
    }
}
