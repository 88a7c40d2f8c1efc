//! Multi-stage server filter chain
//!
//! Stages run in a fixed order and each only removes candidates:
//! zones, states, tags (all required), labels (any token), network
//! membership, server-group ownership. A stage is skipped entirely when its
//! criterion is empty. The two lookup-backed stages resolve their resource
//! exactly once per run.

use std::collections::HashSet;

use tracing::{debug, instrument};

use cumulus_api::{Network, Server};
use cumulus_client::CloudApi;

use crate::config::FilterCriteria;
use crate::error::InventoryError;
use crate::labels;

/// What the filter chain produced
#[derive(Debug)]
pub struct FilterOutcome {
    /// Servers that survived every stage
    pub servers: Vec<Server>,
    /// The resolved network, when a network selector was configured.
    /// Reused by the address resolver so the lookup happens only once.
    pub network: Option<Network>,
}

/// Applies [`FilterCriteria`] to a server listing
pub struct FilterChain<'a> {
    client: &'a dyn CloudApi,
    criteria: &'a FilterCriteria,
}

impl<'a> FilterChain<'a> {
    #[must_use]
    pub fn new(client: &'a dyn CloudApi, criteria: &'a FilterCriteria) -> Self {
        Self { client, criteria }
    }

    /// Run every configured stage over `servers`.
    ///
    /// # Errors
    /// Fails the run when the network lookup errors, or when the configured
    /// server group does not exist.
    #[instrument(skip_all, fields(candidates = servers.len()))]
    pub async fn run(&self, mut servers: Vec<Server>) -> Result<FilterOutcome, InventoryError> {
        if !self.criteria.zones.is_empty() {
            debug!("choosing servers by zone");
            servers.retain(|server| self.criteria.zones.contains(&server.zone));
        }

        if !self.criteria.states.is_empty() {
            debug!("choosing servers by state");
            servers.retain(|server| self.criteria.states.contains(&server.state));
        }

        if !self.criteria.tags.is_empty() {
            debug!("choosing servers by tags");
            servers.retain(|server| {
                self.criteria
                    .tags
                    .iter()
                    .all(|tag| server.tags.contains(tag))
            });
        }

        if !self.criteria.labels.is_empty() {
            debug!("choosing servers by labels");
            servers.retain(|server| labels::matches_any(&self.criteria.labels, &server.labels));
        }

        let network = match &self.criteria.network {
            Some(selector) => {
                debug!(network = %selector, "choosing servers by network");
                let network = self.client.get_network(selector).await?;
                let members: HashSet<&str> = network
                    .servers
                    .iter()
                    .map(|member| member.uuid.as_str())
                    .collect();
                servers.retain(|server| members.contains(server.uuid.as_str()));
                Some(network)
            }
            None => None,
        };

        if let Some(selector) = &self.criteria.server_group {
            debug!(server_group = %selector, "choosing servers by server group");
            let groups = self.client.list_server_groups().await?;
            let wanted = selector.to_lowercase();
            let group = groups
                .iter()
                .find(|group| {
                    group.uuid.to_lowercase() == wanted || group.title.to_lowercase() == wanted
                })
                .ok_or_else(|| {
                    InventoryError::Configuration(format!(
                        "requested server group {selector} does not exist"
                    ))
                })?;
            servers.retain(|server| server.server_group.as_deref() == Some(group.uuid.as_str()));
        }

        debug!(survivors = servers.len(), "filtering finished");
        Ok(FilterOutcome { servers, network })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use cumulus_api::{Label, ServerDetails, ServerGroup, ServerState};
    use cumulus_client::error::{ClientError, Result as ClientResult};

    use super::*;

    fn server(uuid: &str, zone: &str, state: ServerState) -> Server {
        Server {
            uuid: uuid.to_string(),
            hostname: format!("host-{uuid}"),
            title: String::new(),
            plan: String::new(),
            state,
            zone: zone.to_string(),
            created: None,
            tags: Vec::new(),
            labels: Vec::new(),
            server_group: None,
        }
    }

    /// No-lookup client: pure stages must never reach the API.
    struct NoApi;

    #[async_trait]
    impl CloudApi for NoApi {
        async fn authenticate(&self) -> ClientResult<()> {
            unreachable!("pure stages must not call the API")
        }
        async fn list_servers(&self) -> ClientResult<Vec<Server>> {
            unreachable!("pure stages must not call the API")
        }
        async fn get_server(&self, _uuid: &str) -> ClientResult<ServerDetails> {
            unreachable!("pure stages must not call the API")
        }
        async fn get_network(&self, _id_or_name: &str) -> ClientResult<Network> {
            Err(ClientError::InvalidResponse("no network".to_string()))
        }
        async fn list_server_groups(&self) -> ClientResult<Vec<ServerGroup>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn zone_stage_keeps_matching_zones() {
        let servers = vec![
            server("a", "de-fra1", ServerState::Started),
            server("b", "nl-ams1", ServerState::Stopped),
            server("c", "nl-ams1", ServerState::Started),
        ];
        let criteria = FilterCriteria {
            zones: vec!["nl-ams1".to_string()],
            ..FilterCriteria::default()
        };
        let outcome = FilterChain::new(&NoApi, &criteria).run(servers).await.unwrap();
        let uuids: Vec<&str> = outcome.servers.iter().map(|s| s.uuid.as_str()).collect();
        assert_eq!(uuids, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn tag_stage_requires_every_tag() {
        let mut both = server("a", "de-fra1", ServerState::Started);
        both.tags = vec!["a".to_string(), "b".to_string()];
        let mut one = server("b", "de-fra1", ServerState::Started);
        one.tags = vec!["a".to_string()];

        let criteria = FilterCriteria {
            tags: vec!["a".to_string(), "b".to_string()],
            ..FilterCriteria::default()
        };
        let outcome = FilterChain::new(&NoApi, &criteria)
            .run(vec![both, one])
            .await
            .unwrap();
        assert_eq!(outcome.servers.len(), 1);
        assert_eq!(outcome.servers[0].uuid, "a");
    }

    #[tokio::test]
    async fn label_stage_qualifies_on_any_token() {
        let mut labeled = server("a", "de-fra1", ServerState::Started);
        labeled.labels = vec![Label {
            key: "foo".to_string(),
            value: "bar".to_string(),
        }];
        let unlabeled = server("b", "de-fra1", ServerState::Started);

        let criteria = FilterCriteria {
            labels: vec!["foo=bar".to_string(), "unrelated".to_string()],
            ..FilterCriteria::default()
        };
        let outcome = FilterChain::new(&NoApi, &criteria)
            .run(vec![labeled, unlabeled])
            .await
            .unwrap();
        assert_eq!(outcome.servers.len(), 1);
        assert_eq!(outcome.servers[0].uuid, "a");
    }

    #[tokio::test]
    async fn stages_compose_by_intersection() {
        let mut a = server("a", "nl-ams1", ServerState::Started);
        a.tags = vec!["prod".to_string()];
        let mut b = server("b", "nl-ams1", ServerState::Stopped);
        b.tags = vec!["prod".to_string()];
        let c = server("c", "nl-ams1", ServerState::Started);

        let criteria = FilterCriteria {
            zones: vec!["nl-ams1".to_string()],
            states: vec![ServerState::Started],
            tags: vec!["prod".to_string()],
            ..FilterCriteria::default()
        };
        let outcome = FilterChain::new(&NoApi, &criteria)
            .run(vec![a, b, c])
            .await
            .unwrap();
        assert_eq!(outcome.servers.len(), 1);
        assert_eq!(outcome.servers[0].uuid, "a");
    }

    #[tokio::test]
    async fn network_lookup_failure_is_fatal() {
        let criteria = FilterCriteria {
            network: Some("missing".to_string()),
            ..FilterCriteria::default()
        };
        let result = FilterChain::new(&NoApi, &criteria).run(Vec::new()).await;
        assert!(matches!(result, Err(InventoryError::RemoteApi(_))));
    }

    #[tokio::test]
    async fn unknown_server_group_is_a_configuration_error() {
        let criteria = FilterCriteria {
            server_group: Some("missing".to_string()),
            ..FilterCriteria::default()
        };
        let result = FilterChain::new(&NoApi, &criteria).run(Vec::new()).await;
        assert!(matches!(result, Err(InventoryError::Configuration(_))));
    }
}
