//! The `clock` native.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::{error::RunResult, value::Value};

/// Seconds since the Unix epoch as a number, for coarse script timing.
pub(super) fn clock() -> RunResult<Value> {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    Ok(Value::Number(elapsed.as_secs_f64()))
}
