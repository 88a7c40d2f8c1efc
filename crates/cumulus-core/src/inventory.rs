//! In-memory host/group/variable graph
//!
//! The output of one inventory run. Hosts and groups are kept in sorted
//! maps so consumers (and test assertions) see a stable order.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::{Map, Value};

/// One emitted host: its variables and group memberships
#[derive(Debug, Default, Clone, Serialize)]
pub struct Host {
    pub vars: Map<String, Value>,
    pub groups: BTreeSet<String>,
}

/// Host/group/variable graph built by the assembler
#[derive(Debug, Default, Clone, Serialize)]
pub struct Inventory {
    groups: BTreeMap<String, BTreeSet<String>>,
    hosts: BTreeMap<String, Host>,
}

impl Inventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group; idempotent.
    pub fn add_group(&mut self, name: &str) {
        self.groups.entry(name.to_string()).or_default();
    }

    /// Register a host under `group`, creating both as needed; idempotent.
    pub fn add_host(&mut self, hostname: &str, group: &str) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(hostname.to_string());
        self.hosts
            .entry(hostname.to_string())
            .or_default()
            .groups
            .insert(group.to_string());
    }

    /// Set a variable on a host, creating the host if it is unknown.
    pub fn set_variable(&mut self, hostname: &str, key: &str, value: Value) {
        self.hosts
            .entry(hostname.to_string())
            .or_default()
            .vars
            .insert(key.to_string(), value);
    }

    #[must_use]
    pub fn get_host(&self, hostname: &str) -> Option<&Host> {
        self.hosts.get(hostname)
    }

    /// Variables of one host, if it was emitted.
    #[must_use]
    pub fn host_vars(&self, hostname: &str) -> Option<&Map<String, Value>> {
        self.hosts.get(hostname).map(|host| &host.vars)
    }

    /// All group names, sorted.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Hostnames in one group, sorted; empty when the group is unknown.
    pub fn hosts_in(&self, group: &str) -> impl Iterator<Item = &str> {
        self.groups
            .get(group)
            .into_iter()
            .flat_map(|members| members.iter().map(String::as_str))
    }

    /// All emitted hosts, sorted by hostname.
    pub fn hosts(&self) -> impl Iterator<Item = (&str, &Host)> {
        self.hosts.iter().map(|(name, host)| (name.as_str(), host))
    }

    /// Number of emitted hosts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}
