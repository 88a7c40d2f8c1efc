//! Server group records

use serde::{Deserialize, Serialize};

/// Server group resource
///
/// Membership is carried on each server via its `server_group` reference;
/// the `members` list is informational and may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerGroup {
    pub uuid: String,
    pub title: String,
    #[serde(default)]
    pub members: Vec<String>,
}
