//! cumulus-api: Shared cloud API types
//!
//! Contains the server, network, and server-group records returned by the
//! cloud provider's REST API, plus the response envelopes the HTTP client
//! deserializes. Used across the client, core, and CLI crates.

pub mod group;
pub mod network;
pub mod responses;
pub mod server;

pub use group::ServerGroup;
pub use network::{AddressFamily, Interface, InterfaceType, IpAddress, Network, NetworkServerRef};
pub use responses::{
    NetworkResponse, ServerDetailsResponse, ServerGroupListResponse, ServerListResponse,
};
pub use server::{FirewallState, Label, Server, ServerDetails, ServerState};
