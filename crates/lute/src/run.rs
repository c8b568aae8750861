//! Public interface for running Lute code.

use serde::{Deserialize, Serialize};

use crate::{
    ast::Stmt,
    error::{InterpretResult, RuntimeError, SyntaxError},
    heap::{Heap, HeapStats},
    intern::Interns,
    interp::{DEFAULT_MAX_CALL_DEPTH, Interp},
    io::PrintWriter,
    parse::parse,
    scan::scan,
    tracer::{NoopTracer, Tracer},
};

/// A parsed program: the statement forest plus the arenas it refers into.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Program {
    interns: Interns,
    heap: Heap,
    statements: Vec<Stmt>,
    script_name: String,
}

/// Primary interface for running Lute code.
///
/// A `Runner` owns a parsed program and can execute it any number of times;
/// each run starts from fresh globals with the natives re-registered. The
/// intern table is shared across runs and grows monotonically — the
/// process-wide-singleton discipline of the interner, scoped to the runner
/// that owns it.
///
/// # Example
/// ```
/// use lute::{CollectStringPrint, Runner};
///
/// let mut runner = Runner::new("print 1 + 2 * 3;", "demo.lt").unwrap();
/// let mut print = CollectStringPrint::new();
/// runner.run(&mut print).unwrap();
/// assert_eq!(print.output(), "7\n");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runner {
    program: Program,
    max_depth: usize,
}

impl Runner {
    /// Scans and parses `source`, interning names and hoisting function
    /// definitions.
    ///
    /// # Errors
    /// Returns every syntax error found; nothing is executed.
    pub fn new(source: &str, script_name: &str) -> Result<Self, Vec<SyntaxError>> {
        let (tokens, scan_errors) = scan(source);
        if !scan_errors.is_empty() {
            return Err(scan_errors);
        }
        let mut interns = Interns::new();
        let mut heap = Heap::new();
        let statements = parse(&tokens, &mut interns, &mut heap)?;
        Ok(Self {
            program: Program {
                interns,
                heap,
                statements,
                script_name: script_name.to_owned(),
            },
            max_depth: DEFAULT_MAX_CALL_DEPTH,
        })
    }

    /// The script name given at construction, used by drivers in messages.
    #[must_use]
    pub fn script_name(&self) -> &str {
        &self.program.script_name
    }

    /// Overrides the user-function call depth limit (default 255 frames).
    /// Exceeding the limit fails the run with `Stack overflow.`.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Executes the program to completion.
    ///
    /// # Errors
    /// Returns the first (and only) runtime error; all evaluation stops at
    /// that point and no further output is produced.
    pub fn run(&mut self, print: &mut impl PrintWriter) -> Result<(), RuntimeError> {
        self.run_with_tracer(print, NoopTracer)
    }

    /// Executes the program with a custom [`Tracer`] observing calls.
    pub fn run_with_tracer(&mut self, print: &mut impl PrintWriter, tracer: impl Tracer) -> Result<(), RuntimeError> {
        let Program {
            interns,
            heap,
            statements,
            ..
        } = &mut self.program;
        let mut interp = Interp::new(&*heap, interns, print, tracer, self.max_depth);
        interp.interpret(statements)
    }

    /// Executes the program and reduces the outcome to an
    /// [`InterpretResult`], writing any runtime error to stderr.
    ///
    /// A constructed runner has already parsed successfully, so this never
    /// returns [`InterpretResult::CompileError`]; that status comes from
    /// [`Runner::new`] failing.
    pub fn interpret(&mut self, print: &mut impl PrintWriter) -> InterpretResult {
        match self.run(print) {
            Ok(()) => InterpretResult::Ok,
            Err(err) => {
                eprintln!("{err}");
                InterpretResult::RuntimeError
            }
        }
    }

    /// Live object counts for the program's arenas.
    #[must_use]
    pub fn heap_stats(&self) -> HeapStats {
        self.program.heap.stats(&self.program.interns)
    }

    /// Serializes the parsed program to a binary snapshot.
    ///
    /// The snapshot can be stored and later restored with [`Runner::load`],
    /// skipping re-parsing.
    pub fn dump(&self) -> Result<Vec<u8>, postcard::Error> {
        postcard::to_allocvec(self)
    }

    /// Restores a runner from a [`Runner::dump`] snapshot.
    pub fn load(bytes: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::CollectStringPrint;

    fn run_source(source: &str) -> Result<String, RuntimeError> {
        let mut runner = Runner::new(source, "test.lt").expect("source should parse");
        let mut print = CollectStringPrint::new();
        runner.run(&mut print)?;
        Ok(print.into_output())
    }

    #[test]
    fn runs_a_print_statement() {
        assert_eq!(run_source("print 42;").unwrap(), "42\n");
    }

    #[test]
    fn second_run_starts_from_fresh_globals() {
        let mut runner = Runner::new("var count = 1; print count;", "test.lt").unwrap();
        let mut print = CollectStringPrint::new();
        runner.run(&mut print).unwrap();
        runner.run(&mut print).unwrap();
        assert_eq!(print.output(), "1\n1\n");
    }

    #[test]
    fn dump_and_load_round_trip() {
        let runner = Runner::new("fun twice(n) { return n + n; } print twice(4);", "snap.lt").unwrap();
        let bytes = runner.dump().unwrap();
        let mut restored = Runner::load(&bytes).unwrap();
        assert_eq!(restored.script_name(), "snap.lt");
        let mut print = CollectStringPrint::new();
        restored.run(&mut print).unwrap();
        assert_eq!(print.output(), "8\n");
    }

    #[test]
    fn heap_stats_count_functions_and_strings() {
        let runner = Runner::new("fun f() { return 1; } var greeting = \"hi\";", "test.lt").unwrap();
        let stats = runner.heap_stats();
        assert_eq!(stats.functions, 1);
        // "f", "greeting", and "hi" at minimum.
        assert!(stats.interned_strings >= 3);
    }

    #[test]
    fn max_depth_is_configurable() {
        let mut runner = Runner::new("fun loop() { return loop(); } print loop();", "test.lt")
            .unwrap()
            .with_max_depth(16);
        let mut print = CollectStringPrint::new();
        let err = runner.run(&mut print).unwrap_err();
        assert_eq!(err.message(), "Stack overflow.");
    }
}
