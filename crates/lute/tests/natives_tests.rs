//! Native standard-library behavior: math, string helpers, and file I/O.
//!
//! File-system tests run inside a `tempfile` directory so they never touch
//! the real working tree.

use lute::{CollectStringPrint, Runner};
use pretty_assertions::assert_eq;

fn run(source: &str) -> String {
    let mut runner = Runner::new(source, "test.lt").expect("source should parse");
    let mut print = CollectStringPrint::new();
    runner.run(&mut print).expect("script should run cleanly");
    print.into_output()
}

fn run_err(source: &str) -> String {
    let mut runner = Runner::new(source, "test.lt").expect("source should parse");
    let mut print = CollectStringPrint::new();
    runner
        .run(&mut print)
        .expect_err("script should fail at runtime")
        .to_string()
}

// --- Math ---

#[test]
fn math_natives() {
    assert_eq!(run("print sqrt(9);"), "3\n");
    assert_eq!(run("print sqrt(2.25);"), "1.5\n");
    assert_eq!(run("print abs(-4.5);"), "4.5\n");
    assert_eq!(run("print abs(4.5);"), "4.5\n");
    assert_eq!(run("print sin(0);"), "0\n");
    assert_eq!(run("print cos(0);"), "1\n");
    assert_eq!(run("print tan(0);"), "0\n");
}

#[test]
fn math_natives_reject_non_numbers() {
    assert_eq!(run_err("abs(nil);"), "Error: abs() expects one number argument.");
    assert_eq!(run_err("cos(\"pi\");"), "Error: cos() expects one number argument.");
}

// --- String helpers ---

#[test]
fn starts_with() {
    assert_eq!(run("print startsWith(\"foobar\", \"foo\");"), "true\n");
    assert_eq!(run("print startsWith(\"foobar\", \"bar\");"), "false\n");
    assert_eq!(run("print startsWith(\"abc\", \"abcdef\");"), "false\n");
    assert_eq!(run("print startsWith(\"abc\", \"\");"), "true\n");
}

#[test]
fn starts_with_requires_strings() {
    assert_eq!(
        run_err("startsWith(\"a\", 1);"),
        "Error: startsWith() expects two string arguments."
    );
}

#[test]
fn substring() {
    assert_eq!(run("print substring(\"hello\", 1, 3);"), "el\n");
    assert_eq!(run("print substring(\"hello\", 0, 5);"), "hello\n");
    assert_eq!(run("print substring(\"hello\", 2, 2);"), "\n");
}

/// Substring results are interned like every other string, so they compare
/// equal to literals with the same content.
#[test]
fn substring_results_are_interned() {
    assert_eq!(run("print substring(\"hello\", 0, 2) == \"he\";"), "true\n");
}

#[test]
fn substring_bounds_checks() {
    assert_eq!(run_err("substring(\"abc\", 0, 4);"), "Error: Substring bounds are out of range.");
    assert_eq!(run_err("substring(\"abc\", 2, 1);"), "Error: Substring bounds are out of range.");
    assert_eq!(run_err("substring(\"abc\", -1, 2);"), "Error: Substring bounds are out of range.");
}

#[test]
fn substring_argument_kinds() {
    assert_eq!(
        run_err("substring(1, 2, 3);"),
        "Error: substring() expects a string and two numbers (start, end)."
    );
}

// --- File I/O ---

/// Builds a script that runs in `dir` by interpolating the directory path
/// into the source. Temp dir paths never contain quotes.
fn path_literal(dir: &tempfile::TempDir, name: &str) -> String {
    format!("\"{}\"", dir.path().join(name).display())
}

#[test]
fn write_then_read_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = path_literal(&dir, "note.txt");
    let out = run(&format!(
        "writeFile({path}, \"line one\");\nprint readFile({path});"
    ));
    assert_eq!(out, "line one\n");
}

#[test]
fn append_file_extends_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = path_literal(&dir, "log.txt");
    let out = run(&format!(
        "writeFile({path}, \"a\");\nappendFile({path}, \"b\");\nprint readFile({path});"
    ));
    assert_eq!(out, "ab\n");
}

/// `readFile` trims whitespace and stray quotes from its path argument.
#[test]
fn read_file_trims_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("padded.txt");
    std::fs::write(&path, "content").unwrap();
    let out = run(&format!("print readFile(\"  {}  \");", path.display()));
    assert_eq!(out, "content\n");
}

#[test]
fn read_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");
    let err = run_err(&format!("readFile(\"{}\");", missing.display()));
    assert_eq!(err, format!("Error: Could not read file \"{}\".", missing.display()));
}

#[test]
fn file_existence_and_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = path_literal(&dir, "data.bin");
    let out = run(&format!(
        "print fileExists({path});\n\
         writeFile({path}, \"12345\");\n\
         print fileExists({path});\n\
         print fileSize({path});"
    ));
    assert_eq!(out, "false\ntrue\n5\n");
}

#[test]
fn file_size_of_missing_path_is_nil() {
    let dir = tempfile::tempdir().unwrap();
    let path = path_literal(&dir, "nothing.txt");
    assert_eq!(run(&format!("print fileSize({path});")), "nil\n");
}

#[test]
fn delete_file_reports_success() {
    let dir = tempfile::tempdir().unwrap();
    let path = path_literal(&dir, "doomed.txt");
    let out = run(&format!(
        "writeFile({path}, \"x\");\n\
         print deleteFile({path});\n\
         print deleteFile({path});\n\
         print fileExists({path});"
    ));
    assert_eq!(out, "true\nfalse\nfalse\n");
}

#[test]
fn directory_predicates() {
    let dir = tempfile::tempdir().unwrap();
    let sub = path_literal(&dir, "sub");
    let file = path_literal(&dir, "file.txt");
    let out = run(&format!(
        "print createDir({sub});\n\
         print isDir({sub});\n\
         print isFile({sub});\n\
         writeFile({file}, \"\");\n\
         print isFile({file});\n\
         print isDir({file});"
    ));
    assert_eq!(out, "true\ntrue\nfalse\ntrue\nfalse\n");
}

#[test]
fn file_natives_require_string_paths() {
    assert_eq!(run_err("readFile(1);"), "Error: readFile() takes one string argument (path).");
    assert_eq!(
        run_err("writeFile(\"p\", 2);"),
        "Error: writeFile() takes two string arguments (path, content)."
    );
    assert_eq!(run_err("isDir(nil);"), "Error: isDir() takes one string argument (path).");
}
