//! Host-provided native functions.
//!
//! Natives are exposed to scripts through the same call protocol as user
//! functions: the interpreter evaluates the callee and arguments, then
//! dispatches here. Each native validates its own arguments; errors it
//! raises carry no source location and render as `Error: <message>`.
//!
//! Each functional area has its own submodule.

mod fs_ops;
mod math;
mod print;
mod string_ops;
mod time;

use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::{
    error::{RunResult, RuntimeError},
    heap::Heap,
    intern::Interns,
    io::PrintWriter,
    value::Value,
};

/// Enumerates every native function.
///
/// The strum derive supplies each variant's script-visible name (`ReadFile`
/// -> `readFile`); registration defines every variant in the global
/// environment under that name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub(crate) enum NativeFn {
    // Time
    Clock,
    // Output. `print` is a statement keyword, so the variadic output
    // native only exists in newline-terminated form.
    Println,
    // File I/O
    ReadFile,
    WriteFile,
    AppendFile,
    FileExists,
    DeleteFile,
    FileSize,
    IsDir,
    IsFile,
    CreateDir,
    // String helpers
    StartsWith,
    Substring,
    // Math
    Sqrt,
    Sin,
    Cos,
    Tan,
    Abs,
}

impl NativeFn {
    /// The name scripts call this native by.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Declared argument count; `None` means variadic.
    pub fn arity(self) -> Option<u8> {
        match self {
            Self::Println => None,
            Self::Clock => Some(0),
            Self::ReadFile
            | Self::FileExists
            | Self::DeleteFile
            | Self::FileSize
            | Self::IsDir
            | Self::IsFile
            | Self::CreateDir
            | Self::Sqrt
            | Self::Sin
            | Self::Cos
            | Self::Tan
            | Self::Abs => Some(1),
            Self::WriteFile | Self::AppendFile | Self::StartsWith => Some(2),
            Self::Substring => Some(3),
        }
    }

    /// Iterates every native for registration in the global environment.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// Invokes this native with already-evaluated arguments.
    ///
    /// Fixed-arity natives share the arity guard here; argument kinds are
    /// validated inside each implementation.
    pub fn call(
        self,
        args: &[Value],
        heap: &Heap,
        interns: &mut Interns,
        print: &mut impl PrintWriter,
    ) -> RunResult<Value> {
        if let Some(arity) = self.arity()
            && args.len() != usize::from(arity)
        {
            return Err(RuntimeError::native(format!(
                "{}() expects {} arguments but got {}.",
                self.name(),
                arity,
                args.len()
            )));
        }

        match self {
            Self::Clock => time::clock(),
            Self::Println => print::println(args, heap, interns, print),
            Self::ReadFile => fs_ops::read_file(args, interns),
            Self::WriteFile => fs_ops::write_file(args, interns),
            Self::AppendFile => fs_ops::append_file(args, interns),
            Self::FileExists => fs_ops::file_exists(args, interns),
            Self::DeleteFile => fs_ops::delete_file(args, interns),
            Self::FileSize => fs_ops::file_size(args, interns),
            Self::IsDir => fs_ops::is_dir(args, interns),
            Self::IsFile => fs_ops::is_file(args, interns),
            Self::CreateDir => fs_ops::create_dir(args, interns),
            Self::StartsWith => string_ops::starts_with(args, interns),
            Self::Substring => string_ops::substring(args, interns),
            Self::Sqrt => math::unary(self, args, f64::sqrt),
            Self::Sin => math::unary(self, args, f64::sin),
            Self::Cos => math::unary(self, args, f64::cos),
            Self::Tan => math::unary(self, args, f64::tan),
            Self::Abs => math::unary(self, args, f64::abs),
        }
    }
}
