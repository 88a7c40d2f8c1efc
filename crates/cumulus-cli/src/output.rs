//! JSON rendering in the dynamic-inventory wire format
//!
//! `list` emits `_meta.hostvars` plus one `{ "hosts": [...] }` object per
//! group; `host` emits a single host's variables, or an empty object for an
//! unknown host, per the dynamic-inventory contract.

use serde_json::{Map, Value, json};

use cumulus_core::Inventory;

/// Render the whole inventory.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn render_inventory(inventory: &Inventory) -> serde_json::Result<String> {
    let mut hostvars = Map::new();
    for (hostname, host) in inventory.hosts() {
        hostvars.insert(hostname.to_string(), Value::Object(host.vars.clone()));
    }

    let mut doc = Map::new();
    doc.insert("_meta".to_string(), json!({ "hostvars": hostvars }));
    for group in inventory.group_names() {
        let hosts: Vec<&str> = inventory.hosts_in(group).collect();
        doc.insert(group.to_string(), json!({ "hosts": hosts }));
    }

    serde_json::to_string_pretty(&Value::Object(doc))
}

/// Render one host's variables.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn render_host(inventory: &Inventory, hostname: &str) -> serde_json::Result<String> {
    let vars = inventory
        .host_vars(hostname)
        .cloned()
        .unwrap_or_default();
    serde_json::to_string_pretty(&Value::Object(vars))
}
