//! Server records as returned by the listing and detail endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::network::Interface;

/// Lifecycle state of a server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerState {
    Started,
    Stopped,
    Maintenance,
    Error,
}

impl std::fmt::Display for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerState::Started => write!(f, "started"),
            ServerState::Stopped => write!(f, "stopped"),
            ServerState::Maintenance => write!(f, "maintenance"),
            ServerState::Error => write!(f, "error"),
        }
    }
}

/// Firewall setting of a server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirewallState {
    On,
    Off,
}

impl std::fmt::Display for FirewallState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FirewallState::On => write!(f, "on"),
            FirewallState::Off => write!(f, "off"),
        }
    }
}

/// Key/value label attached to a server
///
/// Keys are unique within one server's label set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub key: String,
    pub value: String,
}

/// Server summary as returned by the listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    /// Unique server identifier
    pub uuid: String,
    /// Hostname, unique within one inventory run
    pub hostname: String,
    /// Human-readable title
    #[serde(default)]
    pub title: String,
    /// Plan/size descriptor (e.g. `2xCPU-4GB`)
    #[serde(default)]
    pub plan: String,
    pub state: ServerState,
    /// Zone identifier (e.g. `nl-ams1`)
    pub zone: String,
    /// Creation time, epoch seconds on the wire
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub labels: Vec<Label>,
    /// UUID of the owning server group, if any
    #[serde(default)]
    pub server_group: Option<String>,
}

/// Full server record from the detail endpoint
///
/// Superset of [`Server`]: adds firewall state, the opaque metadata blob,
/// and the attached network interfaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerDetails {
    pub uuid: String,
    pub hostname: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub plan: String,
    pub state: ServerState,
    pub zone: String,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub server_group: Option<String>,
    pub firewall: FirewallState,
    /// Provider metadata service flag / blob, passed through untouched
    #[serde(default)]
    pub metadata: Value,
    #[serde(default)]
    pub interfaces: Vec<Interface>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_roundtrips_lowercase() {
        let state: ServerState = serde_json::from_str("\"started\"").unwrap();
        assert_eq!(state, ServerState::Started);
        assert_eq!(serde_json::to_string(&state).unwrap(), "\"started\"");
        assert_eq!(state.to_string(), "started");
    }

    #[test]
    fn unknown_state_is_rejected() {
        let result: Result<ServerState, _> = serde_json::from_str("\"rebooting\"");
        assert!(result.is_err());
    }

    #[test]
    fn server_defaults_optional_fields() {
        let server: Server = serde_json::from_value(serde_json::json!({
            "uuid": "0044",
            "hostname": "web1",
            "state": "started",
            "zone": "de-fra1"
        }))
        .unwrap();
        assert!(server.tags.is_empty());
        assert!(server.labels.is_empty());
        assert!(server.server_group.is_none());
        assert!(server.created.is_none());
    }
}
