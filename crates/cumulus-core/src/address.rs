//! Connection address resolution
//!
//! Partitions a server's addresses by interface type and family, then picks
//! the one address the chosen policy asks for. "First" is always the first
//! address in interface enumeration order; selection never depends on hash
//! iteration order, so repeated runs pick the same address.

use cumulus_api::{AddressFamily, Interface, InterfaceType, Network, ServerDetails};

use crate::config::ConnectWith;
use crate::error::ResolveError;

/// A server's addresses partitioned by reachability class
///
/// Each bucket preserves interface-then-address enumeration order.
#[derive(Debug, Default)]
pub struct AddressBook {
    public_v4: Vec<String>,
    public_v6: Vec<String>,
    utility: Vec<String>,
}

impl AddressBook {
    /// Partition all addresses across `interfaces`.
    #[must_use]
    pub fn from_interfaces(interfaces: &[Interface]) -> Self {
        let mut book = Self::default();
        for iface in interfaces {
            for addr in &iface.ip_addresses {
                match (iface.iface_type, addr.family) {
                    (InterfaceType::Public, AddressFamily::V4) => {
                        book.public_v4.push(addr.address.clone());
                    }
                    (InterfaceType::Public, AddressFamily::V6) => {
                        book.public_v6.push(addr.address.clone());
                    }
                    (InterfaceType::Utility, _) => {
                        book.utility.push(addr.address.clone());
                    }
                    (InterfaceType::Private, _) => {}
                }
            }
        }
        book
    }

    #[must_use]
    pub fn first_public_v4(&self) -> Option<&str> {
        self.public_v4.first().map(String::as_str)
    }

    #[must_use]
    pub fn first_public_v6(&self) -> Option<&str> {
        self.public_v6.first().map(String::as_str)
    }

    #[must_use]
    pub fn first_utility(&self) -> Option<&str> {
        self.utility.first().map(String::as_str)
    }

    /// Informational public address: IPv4 when available, IPv6 otherwise.
    #[must_use]
    pub fn public_ip(&self) -> Option<&str> {
        self.first_public_v4().or_else(|| self.first_public_v6())
    }
}

/// Pick the connection address for one server under `policy`.
///
/// `network` is the network resolved by the filter chain; only the
/// `private_ipv4` policy consults it.
///
/// # Errors
/// [`ResolveError::NoAddress`] when the policy's address class is absent
/// (the caller skips the server), [`ResolveError::NetworkRequired`] when
/// `private_ipv4` is asked for without a resolved network.
pub fn resolve_address(
    details: &ServerDetails,
    policy: ConnectWith,
    network: Option<&Network>,
) -> Result<String, ResolveError> {
    let no_address = |kind: &'static str| ResolveError::NoAddress {
        kind,
        uuid: details.uuid.clone(),
        hostname: details.hostname.clone(),
    };

    match policy {
        ConnectWith::Hostname => Ok(details.hostname.clone()),
        ConnectWith::PublicIpv4 => AddressBook::from_interfaces(&details.interfaces)
            .first_public_v4()
            .map(str::to_string)
            .ok_or_else(|| no_address("public IPv4")),
        ConnectWith::PublicIpv6 => AddressBook::from_interfaces(&details.interfaces)
            .first_public_v6()
            .map(str::to_string)
            .ok_or_else(|| no_address("public IPv6")),
        ConnectWith::UtilityIpv4 => AddressBook::from_interfaces(&details.interfaces)
            .first_utility()
            .map(str::to_string)
            .ok_or_else(|| no_address("utility")),
        ConnectWith::PrivateIpv4 => {
            let network = network.ok_or(ResolveError::NetworkRequired)?;
            details
                .interfaces
                .iter()
                .filter(|iface| iface.network == network.uuid)
                .find_map(|iface| iface.ip_addresses.first())
                .map(|addr| addr.address.clone())
                .ok_or_else(|| no_address("private IPv4"))
        }
    }
}
