//! Inventory run orchestration

use tracing::{debug, info, instrument};

use cumulus_client::CloudApi;

use crate::config::InventoryConfig;
use crate::constructed::{ExpressionEvaluator, apply_constructed};
use crate::error::InventoryError;
use crate::filter::FilterChain;
use crate::inventory::Inventory;
use crate::project::InstanceProjector;

/// Implicit top-level group every emitted host belongs to
pub const TOP_GROUP: &str = "cumulus";

/// Builds the host/group graph for one inventory run
///
/// All collaborators are injected: the cloud API handle and the expression
/// evaluator are parameters, never process globals, so concurrent runs and
/// tests can each bring their own.
pub struct InventoryAssembler<'a> {
    client: &'a dyn CloudApi,
    config: &'a InventoryConfig,
    evaluator: &'a dyn ExpressionEvaluator,
}

impl<'a> InventoryAssembler<'a> {
    #[must_use]
    pub fn new(
        client: &'a dyn CloudApi,
        config: &'a InventoryConfig,
        evaluator: &'a dyn ExpressionEvaluator,
    ) -> Self {
        Self {
            client,
            config,
            evaluator,
        }
    }

    /// Run discovery end to end and return the assembled inventory.
    ///
    /// Aborts with no partial result on authentication failure, invalid
    /// configuration, or a failed run-scoped API call. Per-server problems
    /// only skip the one server.
    ///
    /// # Errors
    /// See [`InventoryError`] for the full taxonomy.
    #[instrument(skip_all)]
    pub async fn run(&self) -> Result<Inventory, InventoryError> {
        self.config.validate()?;

        let credentials = self.config.auth.resolve();
        if credentials.has_token() && !self.client.supports_token_auth() {
            return Err(InventoryError::Configuration(
                "an API token was supplied but this client does not support token authentication"
                    .to_string(),
            ));
        }

        self.client
            .authenticate()
            .await
            .map_err(InventoryError::Authentication)?;

        let servers = self.client.list_servers().await?;
        info!(servers = servers.len(), "fetched server listing");

        let outcome = FilterChain::new(self.client, &self.config.filters)
            .run(servers)
            .await?;

        let mut inventory = Inventory::new();
        inventory.add_group(TOP_GROUP);

        let projector = InstanceProjector::new(
            self.client,
            self.config.connect_with,
            outcome.network.as_ref(),
        );

        for server in &outcome.servers {
            debug!(uuid = %server.uuid, hostname = %server.hostname, "evaluating server");

            let Some(record) = projector.project(server).await? else {
                continue;
            };

            inventory.add_host(&record.hostname, TOP_GROUP);
            for (key, value) in &record.vars {
                inventory.set_variable(&record.hostname, key, value.clone());
            }

            apply_constructed(&mut inventory, &record.hostname, self.config, self.evaluator)?;
        }

        info!(hosts = inventory.len(), "inventory assembled");
        Ok(inventory)
    }
}
