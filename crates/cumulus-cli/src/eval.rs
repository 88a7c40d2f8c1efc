//! Jinja-style expression evaluation for constructed rules

use minijinja::Environment;
use serde_json::{Map, Value};

use cumulus_core::{EvalError, ExpressionEvaluator};

/// minijinja-backed implementation of the core's evaluator seam
///
/// Expressions are evaluated against the host's variable map as the
/// template context, e.g. `zone == 'nl-ams1'` or `'prod' in tags`.
pub struct TemplateEvaluator {
    env: Environment<'static>,
}

impl TemplateEvaluator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }
}

impl Default for TemplateEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionEvaluator for TemplateEvaluator {
    fn evaluate(&self, expr: &str, vars: &Map<String, Value>) -> Result<Value, EvalError> {
        let compiled = self
            .env
            .compile_expression(expr)
            .map_err(|e| EvalError(e.to_string()))?;
        let result = compiled.eval(vars).map_err(|e| EvalError(e.to_string()))?;
        serde_json::to_value(result).map_err(|e| EvalError(e.to_string()))
    }

    fn test(&self, expr: &str, vars: &Map<String, Value>) -> Result<bool, EvalError> {
        let compiled = self
            .env
            .compile_expression(expr)
            .map_err(|e| EvalError(e.to_string()))?;
        let result = compiled.eval(vars).map_err(|e| EvalError(e.to_string()))?;
        Ok(result.is_true())
    }
}
