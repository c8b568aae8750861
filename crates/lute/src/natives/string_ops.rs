//! String helper natives.

use crate::{
    error::{RunResult, RuntimeError},
    intern::Interns,
    value::Value,
};

pub(super) fn starts_with(args: &[Value], interns: &Interns) -> RunResult<Value> {
    let (Some(s), Some(prefix)) = (args[0].as_str(), args[1].as_str()) else {
        return Err(RuntimeError::native("startsWith() expects two string arguments."));
    };
    Ok(Value::Bool(interns.get(s).starts_with(interns.get(prefix))))
}

/// `substring(s, start, end)` with byte indices, end exclusive.
pub(super) fn substring(args: &[Value], interns: &mut Interns) -> RunResult<Value> {
    let (Some(id), Some(start), Some(end)) = (args[0].as_str(), args[1].as_number(), args[2].as_number()) else {
        return Err(RuntimeError::native(
            "substring() expects a string and two numbers (start, end).",
        ));
    };

    let text = interns.get(id);
    if start < 0.0 || end > text.len() as f64 || start > end {
        return Err(RuntimeError::native("Substring bounds are out of range."));
    }
    // Indices truncate toward zero; a slice that splits a multi-byte
    // character is out of range as well.
    let (start, end) = (start as usize, end as usize);
    let Some(slice) = text.get(start..end) else {
        return Err(RuntimeError::native("Substring bounds are out of range."));
    };
    let owned = slice.to_owned();
    Ok(Value::Str(interns.take(owned)))
}
