//! The `println` native.

use crate::{
    error::RunResult,
    heap::Heap,
    intern::Interns,
    io::PrintWriter,
    value::Value,
};

/// Writes each argument separated by a single space, then a newline.
pub(super) fn println(
    args: &[Value],
    heap: &Heap,
    interns: &Interns,
    writer: &mut impl PrintWriter,
) -> RunResult<Value> {
    for (i, value) in args.iter().enumerate() {
        if i > 0 {
            writer.stdout_push(' ');
        }
        writer.stdout_write(&value.repr(heap, interns));
    }
    writer.stdout_push('\n');
    Ok(Value::Nil)
}
