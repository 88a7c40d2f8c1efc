//! Network and interface records

use serde::{Deserialize, Serialize};

/// Classification of a network interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceType {
    Public,
    Private,
    Utility,
}

/// IP address family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressFamily {
    #[serde(rename = "IPv4")]
    V4,
    #[serde(rename = "IPv6")]
    V6,
}

/// Single address assigned to an interface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpAddress {
    pub address: String,
    pub family: AddressFamily,
    /// Floating (secondary) addresses can move between servers
    #[serde(default, with = "yes_no")]
    pub floating: bool,
}

/// The API encodes booleans as `"yes"`/`"no"` strings.
mod yes_no {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(if *value { "yes" } else { "no" })
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        match String::deserialize(deserializer)?.as_str() {
            "yes" => Ok(true),
            "no" => Ok(false),
            other => Err(serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(other),
                &"\"yes\" or \"no\"",
            )),
        }
    }
}

/// Network interface attached to a server
///
/// Interfaces are delivered in a stable order by the API; address selection
/// relies on that order being preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interface {
    #[serde(default)]
    pub index: u32,
    #[serde(rename = "type")]
    pub iface_type: InterfaceType,
    /// UUID of the network this interface attaches to
    pub network: String,
    #[serde(default)]
    pub ip_addresses: Vec<IpAddress>,
    #[serde(default)]
    pub mac: Option<String>,
}

/// Network resource, with the membership list used for network filtering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub uuid: String,
    pub name: String,
    pub zone: String,
    /// Servers attached to this network
    #[serde(default)]
    pub servers: Vec<NetworkServerRef>,
}

/// Reference to a server attached to a network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkServerRef {
    pub uuid: String,
    #[serde(default)]
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_uses_wire_names() {
        let v4: AddressFamily = serde_json::from_str("\"IPv4\"").unwrap();
        assert_eq!(v4, AddressFamily::V4);
        let v6: AddressFamily = serde_json::from_str("\"IPv6\"").unwrap();
        assert_eq!(v6, AddressFamily::V6);
    }

    #[test]
    fn interface_type_field_is_renamed() {
        let iface: Interface = serde_json::from_value(serde_json::json!({
            "index": 1,
            "type": "public",
            "network": "031437b4",
            "ip_addresses": [
                { "address": "1.1.1.10", "family": "IPv4" }
            ]
        }))
        .unwrap();
        assert_eq!(iface.iface_type, InterfaceType::Public);
        assert!(!iface.ip_addresses[0].floating);
    }

    #[test]
    fn floating_parses_from_yes_no_strings() {
        let addr: IpAddress = serde_json::from_value(serde_json::json!({
            "address": "1.1.1.11",
            "family": "IPv4",
            "floating": "yes"
        }))
        .unwrap();
        assert!(addr.floating);
        assert_eq!(
            serde_json::to_value(&addr).unwrap()["floating"],
            serde_json::json!("yes")
        );

        let bad: Result<IpAddress, _> = serde_json::from_value(serde_json::json!({
            "address": "1.1.1.11",
            "family": "IPv4",
            "floating": "maybe"
        }));
        assert!(bad.is_err());
    }
}
