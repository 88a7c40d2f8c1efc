//! Cloud API trait consumed by the inventory core

use async_trait::async_trait;

use cumulus_api::{Network, Server, ServerDetails, ServerGroup};

use crate::error::Result;

/// Read-only view of the cloud API
///
/// The inventory core only ever reads: it lists servers, fetches per-server
/// detail, and resolves networks and server groups. Implementations must not
/// retry internally; callers decide whether a failure is fatal.
#[async_trait]
pub trait CloudApi: Send + Sync {
    /// Verify that the configured credentials are accepted by the API.
    ///
    /// # Errors
    /// Returns [`ClientError::Unauthorized`](crate::ClientError::Unauthorized)
    /// for rejected credentials, or another error for transport failures.
    async fn authenticate(&self) -> Result<()>;

    /// List all servers visible to the account.
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be decoded.
    async fn list_servers(&self) -> Result<Vec<Server>>;

    /// Fetch the full record for one server.
    ///
    /// # Errors
    /// Returns an error if the request fails or the server does not exist.
    async fn get_server(&self, uuid: &str) -> Result<ServerDetails>;

    /// Fetch a network by UUID or name.
    ///
    /// # Errors
    /// Returns an error if the request fails or no such network exists.
    async fn get_network(&self, id_or_name: &str) -> Result<Network>;

    /// List all server groups.
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be decoded.
    async fn list_server_groups(&self) -> Result<Vec<ServerGroup>>;

    /// Whether this client can authenticate with an API token.
    ///
    /// Callers must check this before handing over a token-bearing
    /// configuration; supplying a token to a client without this capability
    /// is a configuration error, not something to silently ignore.
    fn supports_token_auth(&self) -> bool {
        false
    }
}
