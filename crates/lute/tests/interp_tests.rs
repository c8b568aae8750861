//! End-to-end interpreter tests: source in, printed output out.
//!
//! Each test runs a small script through the public `Runner` API with a
//! collecting print writer and asserts on exactly what the script printed.

use lute::{CollectStringPrint, Runner};
use pretty_assertions::assert_eq;

/// Runs a script and returns everything it printed. Panics on syntax or
/// runtime errors, so these tests only cover well-behaved programs.
fn run(source: &str) -> String {
    let mut runner = Runner::new(source, "test.lt").expect("source should parse");
    let mut print = CollectStringPrint::new();
    runner.run(&mut print).expect("script should run cleanly");
    print.into_output()
}

#[test]
fn arithmetic_precedence() {
    assert_eq!(run("print 1 + 2 * 3;"), "7\n");
    assert_eq!(run("print (1 + 2) * 3;"), "9\n");
    assert_eq!(run("print 10 - 4 / 2;"), "8\n");
}

#[test]
fn string_concatenation() {
    assert_eq!(run("var a = \"hi\"; print a + \" there\";"), "hi there\n");
    assert_eq!(run("print \"\" + \"x\" + \"\";"), "x\n");
}

#[test]
fn number_formatting_trims_integral_values() {
    assert_eq!(run("print 7;"), "7\n");
    assert_eq!(run("print 2.5;"), "2.5\n");
    assert_eq!(run("print 10 / 4;"), "2.5\n");
    assert_eq!(run("print 10 / 5;"), "2\n");
}

#[test]
fn literals_print_their_canonical_forms() {
    assert_eq!(run("print nil;"), "nil\n");
    assert_eq!(run("print true;"), "true\n");
    assert_eq!(run("print false;"), "false\n");
}

#[test]
fn unary_operators() {
    assert_eq!(run("print -(3);"), "-3\n");
    assert_eq!(run("print !true;"), "false\n");
    assert_eq!(run("print !nil;"), "true\n");
    assert_eq!(run("print !!0;"), "true\n");
}

#[test]
fn comparison_and_equality() {
    assert_eq!(run("print 1 < 2;"), "true\n");
    assert_eq!(run("print 2 <= 2;"), "true\n");
    assert_eq!(run("print 3 > 4;"), "false\n");
    assert_eq!(run("print 1 == 1;"), "true\n");
    assert_eq!(run("print 1 != 1;"), "false\n");
}

/// Equality is variant-aware: values of different kinds never compare
/// equal, and numbers are not coerced to booleans.
#[test]
fn equality_never_crosses_variants() {
    assert_eq!(run("print 1 == \"1\";"), "false\n");
    assert_eq!(run("print nil == false;"), "false\n");
    assert_eq!(run("print true == 1;"), "false\n");
    assert_eq!(run("print 2 == 3;"), "false\n");
}

/// Interning makes equal string content reference-equal, so a literal and
/// a runtime concatenation compare equal.
#[test]
fn interned_strings_compare_equal() {
    assert_eq!(run("print \"ab\" == \"a\" + \"b\";"), "true\n");
    assert_eq!(run("print \"ab\" != \"a\" + \"c\";"), "true\n");
}

#[test]
fn while_loop_counts() {
    assert_eq!(run("var i = 0; while (i < 3) { print i; i = i + 1; }"), "0\n1\n2\n");
}

#[test]
fn if_else_branches() {
    assert_eq!(run("if (1 < 2) print \"yes\"; else print \"no\";"), "yes\n");
    assert_eq!(run("if (1 > 2) print \"yes\"; else print \"no\";"), "no\n");
    assert_eq!(run("if (false) print \"skipped\";"), "");
}

/// `nil` and `false` are the only falsey values; zero and the empty string
/// are truthy.
#[test]
fn truthiness() {
    assert_eq!(run("if (0) print \"zero\";"), "zero\n");
    assert_eq!(run("if (\"\") print \"empty\";"), "empty\n");
    assert_eq!(run("if (nil) print \"a\"; else print \"b\";"), "b\n");
    assert_eq!(run("if (false) print \"a\"; else print \"b\";"), "b\n");
}

/// Logical operators return the deciding operand, not a coerced boolean.
#[test]
fn logical_operators_return_deciding_operand() {
    assert_eq!(run("print nil or \"fallback\";"), "fallback\n");
    assert_eq!(run("print 1 or 2;"), "1\n");
    assert_eq!(run("print nil and 2;"), "nil\n");
    assert_eq!(run("print 1 and 2;"), "2\n");
}

/// `false and f()` never invokes `f`; `true or f()` never invokes `f`.
#[test]
fn logical_operators_short_circuit() {
    let out = run("var called = false;\n\
         fun mark() { called = true; return true; }\n\
         print false and mark();\n\
         print called;\n\
         print true or mark();\n\
         print called;");
    assert_eq!(out, "false\nfalse\ntrue\nfalse\n");
}

#[test]
fn function_declaration_and_call() {
    assert_eq!(run("fun add(a, b) { return a + b; } print add(2, 3);"), "5\n");
    assert_eq!(run("fun greet() { print \"hello\"; } greet();"), "hello\n");
}

#[test]
fn function_without_return_yields_nil() {
    assert_eq!(run("fun quiet() {} print quiet();"), "nil\n");
    assert_eq!(run("fun early() { return; } print early();"), "nil\n");
}

#[test]
fn recursive_fibonacci() {
    assert_eq!(
        run("fun fib(n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); } print fib(10);"),
        "55\n"
    );
}

/// A `return` inside nested blocks, ifs, and whiles exits exactly the
/// enclosing function and delivers its value.
#[test]
fn return_unwinds_nested_control_flow() {
    let out = run("fun find() {\n\
             var i = 0;\n\
             while (true) {\n\
                 if (i == 3) { { return i; } }\n\
                 i = i + 1;\n\
             }\n\
         }\n\
         print find();");
    assert_eq!(out, "3\n");
}

/// A return value propagates out of a loop body without running the
/// statements after the loop.
#[test]
fn return_skips_trailing_statements() {
    let out = run("fun f() {\n\
             while (true) { return \"early\"; }\n\
             print \"unreachable\";\n\
         }\n\
         print f();");
    assert_eq!(out, "early\n");
}

#[test]
fn functions_print_as_fn_name() {
    assert_eq!(run("fun greet() {} print greet;"), "<fn greet>\n");
    assert_eq!(run("print clock;"), "<native fn>\n");
}

#[test]
fn assignment_is_an_expression() {
    assert_eq!(run("var a = 1; print a = 2; print a;"), "2\n2\n");
}

#[test]
fn arguments_evaluate_left_to_right() {
    let out = run("var trace = \"\";\n\
         fun tag(name, value) { trace = trace + name; return value; }\n\
         fun pair(a, b) { return a + b; }\n\
         print pair(tag(\"L\", 1), tag(\"R\", 2));\n\
         print trace;");
    assert_eq!(out, "3\nLR\n");
}

#[test]
fn functions_are_first_class_values() {
    let out = run("fun double(n) { return n + n; }\n\
         var f = double;\n\
         print f(21);");
    assert_eq!(out, "42\n");
}

#[test]
fn println_native_separates_with_spaces() {
    assert_eq!(run("println(\"a\", 1, nil);"), "a 1 nil\n");
    assert_eq!(run("println();"), "\n");
}

#[test]
fn clock_native_returns_a_number() {
    // Indirect check: numbers support arithmetic, so clock() - clock()
    // must run cleanly and print a number.
    let out = run("var t = clock(); print t >= 0;");
    assert_eq!(out, "true\n");
}
