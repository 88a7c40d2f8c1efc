//! Constructed grouping rules
//!
//! Applied to each host after its variables are projected, in a fixed
//! order: composed variables, conditional groups, keyed groups. All three
//! are purely additive; they never remove a host or a variable.
//!
//! Expression evaluation is delegated to an [`ExpressionEvaluator`]
//! supplied by the embedding application; the core never interprets the
//! templating language itself.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::config::{InventoryConfig, KeyedGroup};
use crate::error::InventoryError;
use crate::inventory::Inventory;

/// Error from evaluating one expression
#[derive(Error, Debug)]
#[error("{0}")]
pub struct EvalError(pub String);

/// Evaluates templating expressions against a host's variables
pub trait ExpressionEvaluator {
    /// Evaluate `expr` and return its value.
    ///
    /// # Errors
    /// Returns an error when the expression cannot be parsed or evaluated.
    fn evaluate(&self, expr: &str, vars: &Map<String, Value>) -> Result<Value, EvalError>;

    /// Evaluate `expr` as a boolean condition.
    ///
    /// # Errors
    /// Returns an error when the expression cannot be parsed or evaluated.
    fn test(&self, expr: &str, vars: &Map<String, Value>) -> Result<bool, EvalError>;
}

/// Apply all three hook families to one freshly projected host.
///
/// # Errors
/// Evaluation failures are fatal only in strict mode; otherwise they are
/// logged and the rule is skipped.
pub fn apply_constructed(
    inventory: &mut Inventory,
    hostname: &str,
    config: &InventoryConfig,
    evaluator: &dyn ExpressionEvaluator,
) -> Result<(), InventoryError> {
    // Composed variables may build on one another, so each evaluation sees
    // the variables set by the previous one.
    for (name, expr) in &config.compose {
        let vars = current_vars(inventory, hostname);
        match evaluator.evaluate(expr, &vars) {
            Ok(value) => inventory.set_variable(hostname, name, value),
            Err(error) => {
                fail_or_skip(config.strict, "composed variable", name, &error)?;
            }
        }
    }

    for (group, condition) in &config.groups {
        let vars = current_vars(inventory, hostname);
        match evaluator.test(condition, &vars) {
            Ok(true) => inventory.add_host(hostname, group),
            Ok(false) => {}
            Err(error) => {
                fail_or_skip(config.strict, "conditional group", group, &error)?;
            }
        }
    }

    for rule in &config.keyed_groups {
        let vars = current_vars(inventory, hostname);
        let value = match evaluator.evaluate(&rule.key, &vars) {
            Ok(value) => value,
            Err(error) => {
                fail_or_skip(config.strict, "keyed group", &rule.key, &error)?;
                continue;
            }
        };
        for group in keyed_group_names(rule, &value) {
            inventory.add_host(hostname, &group);
        }
    }

    Ok(())
}

fn current_vars(inventory: &Inventory, hostname: &str) -> Map<String, Value> {
    inventory.host_vars(hostname).cloned().unwrap_or_default()
}

fn fail_or_skip(
    strict: bool,
    what: &str,
    name: &str,
    error: &EvalError,
) -> Result<(), InventoryError> {
    if strict {
        return Err(InventoryError::Configuration(format!(
            "{what} {name}: {error}"
        )));
    }
    debug!(%name, %error, "skipping {what}, expression failed");
    Ok(())
}

/// Group names a keyed-group rule derives from one evaluated value.
///
/// Scalars yield one group, lists one group per scalar element. Null falls
/// back to the rule's default value; nested structures are skipped.
fn keyed_group_names(rule: &KeyedGroup, value: &Value) -> Vec<String> {
    let scalars: Vec<String> = match value {
        Value::Null => rule.default_value.iter().cloned().collect(),
        Value::String(s) => vec![s.clone()],
        Value::Number(n) => vec![n.to_string()],
        Value::Bool(b) => vec![b.to_string()],
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect(),
        Value::Object(_) => {
            debug!(key = %rule.key, "keyed group value is a mapping, skipping");
            Vec::new()
        }
    };

    scalars
        .into_iter()
        .map(|scalar| {
            if rule.prefix.is_empty() {
                sanitize_group_name(&scalar)
            } else {
                sanitize_group_name(&format!("{}{}{}", rule.prefix, rule.separator, scalar))
            }
        })
        .collect()
}

/// Replace everything outside `[A-Za-z0-9_]` so group names stay safe for
/// downstream tooling.
fn sanitize_group_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::config::ConnectWith;

    use super::*;

    /// Variable-lookup evaluator: `evaluate` returns the named variable,
    /// `test` its truthiness. Enough to exercise the hook plumbing.
    struct VarLookup;

    impl ExpressionEvaluator for VarLookup {
        fn evaluate(&self, expr: &str, vars: &Map<String, Value>) -> Result<Value, EvalError> {
            vars.get(expr)
                .cloned()
                .ok_or_else(|| EvalError(format!("undefined variable {expr}")))
        }

        fn test(&self, expr: &str, vars: &Map<String, Value>) -> Result<bool, EvalError> {
            Ok(matches!(self.evaluate(expr, vars)?, Value::Bool(true)))
        }
    }

    fn host_with(vars: &[(&str, Value)]) -> Inventory {
        let mut inventory = Inventory::new();
        inventory.add_host("web1", "all");
        for (key, value) in vars {
            inventory.set_variable("web1", key, value.clone());
        }
        inventory
    }

    fn config() -> InventoryConfig {
        InventoryConfig {
            connect_with: ConnectWith::Hostname,
            ..InventoryConfig::default()
        }
    }

    #[test]
    fn composed_variables_accumulate() {
        let mut inventory = host_with(&[("zone", json!("de-fra1"))]);
        let mut config = config();
        config.compose.insert("copy".to_string(), "zone".to_string());
        // Later rules see earlier results; BTreeMap iterates "copy" < "copy2".
        config.compose.insert("copy2".to_string(), "copy".to_string());

        apply_constructed(&mut inventory, "web1", &config, &VarLookup).unwrap();
        let vars = inventory.host_vars("web1").unwrap();
        assert_eq!(vars["copy"], json!("de-fra1"));
        assert_eq!(vars["copy2"], json!("de-fra1"));
    }

    #[test]
    fn conditional_group_adds_matching_hosts_only() {
        let mut inventory = host_with(&[("is_prod", json!(true)), ("is_db", json!(false))]);
        let mut config = config();
        config.groups.insert("prod".to_string(), "is_prod".to_string());
        config.groups.insert("db".to_string(), "is_db".to_string());

        apply_constructed(&mut inventory, "web1", &config, &VarLookup).unwrap();
        assert_eq!(inventory.hosts_in("prod").collect::<Vec<_>>(), vec!["web1"]);
        assert_eq!(inventory.hosts_in("db").count(), 0);
    }

    #[test]
    fn keyed_group_builds_prefixed_sanitized_names() {
        let mut inventory = host_with(&[("zone", json!("nl-ams1"))]);
        let mut config = config();
        config.keyed_groups.push(KeyedGroup {
            key: "zone".to_string(),
            prefix: "zone".to_string(),
            separator: "_".to_string(),
            default_value: None,
        });

        apply_constructed(&mut inventory, "web1", &config, &VarLookup).unwrap();
        assert_eq!(
            inventory.hosts_in("zone_nl_ams1").collect::<Vec<_>>(),
            vec!["web1"]
        );
    }

    #[test]
    fn keyed_group_expands_list_values() {
        let mut inventory = host_with(&[("tags", json!(["web", "prod"]))]);
        let mut config = config();
        config.keyed_groups.push(KeyedGroup {
            key: "tags".to_string(),
            prefix: "tag".to_string(),
            separator: "_".to_string(),
            default_value: None,
        });

        apply_constructed(&mut inventory, "web1", &config, &VarLookup).unwrap();
        assert_eq!(inventory.hosts_in("tag_web").collect::<Vec<_>>(), vec!["web1"]);
        assert_eq!(inventory.hosts_in("tag_prod").collect::<Vec<_>>(), vec!["web1"]);
    }

    #[test]
    fn null_value_uses_default_or_skips() {
        let mut inventory = host_with(&[("group", json!(null))]);
        let mut config = config();
        config.keyed_groups.push(KeyedGroup {
            key: "group".to_string(),
            prefix: "sg".to_string(),
            separator: "_".to_string(),
            default_value: Some("none".to_string()),
        });

        apply_constructed(&mut inventory, "web1", &config, &VarLookup).unwrap();
        assert_eq!(inventory.hosts_in("sg_none").collect::<Vec<_>>(), vec!["web1"]);
    }

    #[test]
    fn strict_mode_escalates_evaluation_failures() {
        let mut inventory = host_with(&[]);
        let mut config = config();
        config.compose.insert("broken".to_string(), "missing".to_string());

        config.strict = false;
        apply_constructed(&mut inventory, "web1", &config, &VarLookup).unwrap();
        assert!(inventory.host_vars("web1").unwrap().get("broken").is_none());

        config.strict = true;
        let err = apply_constructed(&mut inventory, "web1", &config, &VarLookup).unwrap_err();
        assert!(matches!(err, InventoryError::Configuration(_)));
    }
}
