//! Selectable stored procedure invocation.
//!
//! Firebird reads from a procedure like a table: `select * from "NAME" (?, ?)`.

use crate::ast::Value;
use crate::error::{DialectError, DialectResult};
use crate::transpiler::conditions::compile_value;
use crate::transpiler::grammar::Grammar;
use crate::transpiler::params::{CompiledStatement, ParamContext};
use crate::transpiler::quote::wrap_table;

/// Compile the `"NAME" (?, ...)` fragment with one placeholder per argument.
///
/// Raw arguments are spliced in and do not bind. An empty argument list
/// renders as `"NAME" ()`. Subquery arguments get the default modern
/// paging; use [`Grammar::compile_procedure_call`] for an older server.
pub fn compile_procedure_call(name: &str, args: &[Value]) -> DialectResult<CompiledStatement> {
    Grammar::default().compile_procedure_call(name, args)
}

impl Grammar {
    /// [`compile_procedure_call`] with this grammar's paging applied to
    /// subquery arguments.
    pub fn compile_procedure_call(
        &self,
        name: &str,
        args: &[Value],
    ) -> DialectResult<CompiledStatement> {
        let mut params = ParamContext::new();
        let sql = procedure_fragment(self, name, args, &mut params)?;
        Ok(params.finish(sql))
    }
}

pub(crate) fn procedure_fragment(
    grammar: &Grammar,
    name: &str,
    args: &[Value],
    params: &mut ParamContext,
) -> DialectResult<String> {
    if name.trim().is_empty() {
        return Err(DialectError::malformed("procedure name is empty"));
    }
    let mut placeholders = Vec::with_capacity(args.len());
    for arg in args {
        placeholders.push(compile_value(grammar, arg, params)?);
    }
    Ok(format!("{} ({})", wrap_table(name), placeholders.join(", ")))
}
