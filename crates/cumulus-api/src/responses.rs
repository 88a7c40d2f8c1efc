//! Response envelopes for the cloud REST API

use serde::{Deserialize, Serialize};

use crate::group::ServerGroup;
use crate::network::Network;
use crate::server::{Server, ServerDetails};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerListResponse {
    pub servers: Vec<Server>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerDetailsResponse {
    pub server: ServerDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkResponse {
    pub network: Network,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerGroupListResponse {
    pub server_groups: Vec<ServerGroup>,
}
