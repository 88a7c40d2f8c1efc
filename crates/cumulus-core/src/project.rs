//! Per-server variable projection

use serde_json::{Map, Value, json};
use tracing::{debug, instrument, warn};

use cumulus_api::{Network, Server};
use cumulus_client::CloudApi;

use crate::address::{AddressBook, resolve_address};
use crate::config::ConnectWith;
use crate::error::{InventoryError, ResolveError};
use crate::labels::format_labels;

/// Variables projected for one emitted host
#[derive(Debug, Clone)]
pub struct HostRecord {
    pub hostname: String,
    pub vars: Map<String, Value>,
}

/// Projects surviving servers into host records
///
/// Holds the connection policy and the network resolved by the filter chain
/// so every server is projected against the same run-scoped context.
pub struct InstanceProjector<'a> {
    client: &'a dyn CloudApi,
    policy: ConnectWith,
    network: Option<&'a Network>,
}

impl<'a> InstanceProjector<'a> {
    #[must_use]
    pub fn new(client: &'a dyn CloudApi, policy: ConnectWith, network: Option<&'a Network>) -> Self {
        Self {
            client,
            policy,
            network,
        }
    }

    /// Project one server into a host record.
    ///
    /// Returns `Ok(None)` when the server is skipped: its detail fetch
    /// failed, or it has no address satisfying the connection policy. Both
    /// are per-server soft failures; one bad server never breaks the whole
    /// inventory.
    ///
    /// # Errors
    /// Only configuration-level problems abort the run from here.
    #[instrument(skip_all, fields(uuid = %server.uuid, hostname = %server.hostname))]
    pub async fn project(&self, server: &Server) -> Result<Option<HostRecord>, InventoryError> {
        let details = match self.client.get_server(&server.uuid).await {
            Ok(details) => details,
            Err(error) => {
                warn!(%error, "skipping server, detail fetch failed");
                return Ok(None);
            }
        };

        let mut vars = Map::new();
        vars.insert("id".to_string(), json!(details.uuid));
        vars.insert("hostname".to_string(), json!(details.hostname));
        vars.insert("state".to_string(), json!(details.state.to_string()));
        vars.insert("zone".to_string(), json!(details.zone));
        vars.insert("firewall".to_string(), json!(details.firewall.to_string()));
        vars.insert("plan".to_string(), json!(details.plan));
        vars.insert("tags".to_string(), json!(details.tags));
        vars.insert("metadata".to_string(), details.metadata.clone());
        vars.insert("labels".to_string(), json!(format_labels(&details.labels)));
        vars.insert("server_group".to_string(), json!(details.server_group));

        let book = AddressBook::from_interfaces(&details.interfaces);
        if let Some(public_ip) = book.public_ip() {
            vars.insert("public_ip".to_string(), json!(public_ip));
        }
        if let Some(utility_ip) = book.first_utility() {
            vars.insert("utility_ip".to_string(), json!(utility_ip));
        }

        match resolve_address(&details, self.policy, self.network) {
            Ok(address) => {
                vars.insert("ansible_host".to_string(), json!(address));
            }
            Err(ResolveError::NetworkRequired) => {
                // Caught at config load in a normal run; reachable only for
                // direct library callers.
                return Err(InventoryError::Configuration(
                    ResolveError::NetworkRequired.to_string(),
                ));
            }
            Err(error @ ResolveError::NoAddress { .. }) => {
                debug!(%error, "address resolution failed");
                warn!(
                    policy = %self.policy,
                    "skipping server, requested connection type not available"
                );
                return Ok(None);
            }
        }

        Ok(Some(HostRecord {
            hostname: details.hostname.clone(),
            vars,
        }))
    }
}
