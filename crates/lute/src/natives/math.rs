//! Math natives.

use super::NativeFn;
use crate::{
    error::{RunResult, RuntimeError},
    value::Value,
};

/// Shared implementation for the one-argument math natives.
pub(super) fn unary(native: NativeFn, args: &[Value], op: fn(f64) -> f64) -> RunResult<Value> {
    match args[0].as_number() {
        Some(n) => Ok(Value::Number(op(n))),
        None => Err(RuntimeError::native(format!(
            "{}() expects one number argument.",
            native.name()
        ))),
    }
}
