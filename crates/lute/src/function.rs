//! User-defined function definitions.

use serde::{Deserialize, Serialize};

use crate::ast::{Ident, Stmt};

/// A function as declared in source: name, parameters, and body.
///
/// Definitions are created at parse time and stored in the heap's function
/// arena; the declaration statement only carries the arena handle. A
/// function value is therefore just that handle — there is no per-call or
/// per-definition runtime state, because functions do not capture their
/// definition environment (call frames parent on the caller's scope).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct FunctionDef {
    /// The function name, used for binding, `<fn NAME>` display, and traces.
    pub name: Ident,
    /// Parameter names in declaration order.
    pub params: Vec<Ident>,
    /// The body block's statements.
    pub body: Vec<Stmt>,
}

impl FunctionDef {
    /// Declared parameter count.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}
