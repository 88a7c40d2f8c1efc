//! Error taxonomy for inventory runs

use thiserror::Error;

use cumulus_client::ClientError;

/// Errors that abort an inventory run
///
/// Per-server problems (a failed detail fetch, no address for the chosen
/// policy) are not represented here; they skip the one server and the run
/// continues.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// Credentials were rejected by the API
    #[error("invalid API credentials")]
    Authentication(#[source] ClientError),

    /// User-supplied configuration is unsatisfiable or structurally invalid
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A run-scoped API call failed
    #[error("remote API error: {0}")]
    RemoteApi(#[from] ClientError),
}

/// Why no connection address could be chosen for one server
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The requested address class is not present on any interface
    #[error("no available {kind} addresses for server {uuid} ({hostname})")]
    NoAddress {
        /// Address class, e.g. "public IPv4"
        kind: &'static str,
        uuid: String,
        hostname: String,
    },

    /// private_ipv4 was requested without a resolved network
    #[error("connecting with private IPv4 requires a network")]
    NetworkRequired,
}
