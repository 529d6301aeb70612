use serde::Serialize;

use crate::ast::Value;

/// The placeholder Firebird uses for every positional parameter.
pub const PLACEHOLDER: &str = "?";

/// Collects bound values in the order their placeholders are written.
#[derive(Debug, Default)]
pub struct ParamContext {
    /// Collected parameter values in order
    pub params: Vec<Value>,
}

impl ParamContext {
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Add a value and return the placeholder for it.
    pub fn add_param(&mut self, value: Value) -> &'static str {
        self.params.push(value);
        PLACEHOLDER
    }

    /// Append bindings that belong to a raw fragment.
    pub fn extend<I: IntoIterator<Item = Value>>(&mut self, values: I) {
        self.params.extend(values);
    }

    pub fn finish(self, sql: String) -> CompiledStatement {
        CompiledStatement {
            sql,
            params: self.params,
        }
    }
}

/// SQL text plus the values for its `?` placeholders, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledStatement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl std::fmt::Display for CompiledStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sql)
    }
}
