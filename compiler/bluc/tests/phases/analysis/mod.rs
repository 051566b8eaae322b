//! Analysis phase: diagnostics and how they gate evaluation.

use blu_diagnostic::DiagnosticQueue;
use blu_eval::{buffer_handler, InterpreterBuilder};
use blu_ir::{SharedArena, StringInterner};
use bluc::{LoadError, UnitRole};
use pretty_assertions::assert_eq;

use crate::common::{count_code, Project};

#[test]
fn analysis_errors_prevent_evaluation() {
    let project = Project::new();
    project.file("main.blu", "print \"before\";\nprint missing;");
    let run = project.run("main.blu");

    assert!(matches!(run.result, Err(LoadError::Analysis { count: 1, .. })));
    assert!(!run.output.contains("before"));
    assert_eq!(count_code(&run.output, "E2001"), 1);
    assert!(run.output.contains("Identifier 'missing' does not exist"));
    assert!(run.output.contains("main.blu at 2:7"));
}

#[test]
fn child_scope_may_shadow_final() {
    let project = Project::new();
    project.file(
        "main.blu",
        "let final x = 1;\nlet f = fun() { let x = 2; x };\nprint f(), x;",
    );
    assert_eq!(project.run("main.blu").expect_ok(), "21\n");
}

#[test]
fn same_scope_final_redeclaration_reports_once() {
    let project = Project::new();
    project.file("main.blu", "let final x = 1;\nlet x = 2;");
    let (result, output) = project.check("main.blu");
    assert!(result.is_err());
    assert_eq!(count_code(&output, "E2007"), 1);
}

#[test]
fn reassignment_needs_mut() {
    let project = Project::new();
    project.file("immutable.blu", "let x = 1;\nx <- 2;");
    project.file("mutable.blu", "let mut x = 1;\nx <- 2;");

    let (result, output) = project.check("immutable.blu");
    assert!(result.is_err());
    assert_eq!(count_code(&output, "E2005"), 1);

    let (result, output) = project.check("mutable.blu");
    assert!(result.is_ok());
    assert_eq!(output, "");
}

#[test]
fn warnings_do_not_gate_evaluation() {
    let project = Project::new();
    project.file("main.blu", "let main = fun() { print \"ran\"; };");
    let output = project.run("main.blu").expect_ok();
    assert_eq!(count_code(&output, "E2103"), 1);
    assert!(output.starts_with("warning[E2103]: main should be marked as final"));
    assert!(output.ends_with("ran\n"));
}

#[test]
fn export_from_entry_is_rejected() {
    let project = Project::new();
    project.file("main.blu", "let x = 1;\nexport x;");
    let (result, output) = project.check("main.blu");
    assert!(result.is_err());
    assert_eq!(count_code(&output, "E2003"), 1);
}

#[test]
fn exporting_module_checks_clean_as_module() {
    let project = Project::new();
    project.file("lib/math.blu", "let double = fun(n) { n * 2 };\nexport double;");
    let (result, output) = project.check_as("lib/math.blu", UnitRole::Module);
    assert!(result.is_ok());
    assert_eq!(output, "");
}

#[test]
fn analysis_is_unaware_of_runtime_records() {
    // Fine at run time, but the analyser has no environment named `r`.
    let project = Project::new();
    project.file(
        "main.blu",
        "let make = fun() { return {level: 3}; };\nlet r = make();\nr.{ print level; };",
    );
    let (result, output) = project.check("main.blu");
    assert!(result.is_err());
    assert_eq!(count_code(&output, "E2001"), 1);
}

#[test]
fn env_open_brings_object_scope() {
    let project = Project::new();
    project.file(
        "main.blu",
        "let cfg = object { let mut level = 1 };\ncfg.{ level <- level + 10; };\nprint cfg.level;",
    );
    assert_eq!(project.run("main.blu").expect_ok(), "11\n");
}

#[test]
fn reanalysis_does_not_splice_pipes_twice() {
    let source = "let add = fun(a, b) { a + b };\nlet double = fun(x) { x * 2 };\nprint 1 |> add(2) |> double();";
    let interner = StringInterner::new();
    let parsed = blu_parse::parse_source(source, &interner).unwrap();
    let mut arena = parsed.arena;

    let mut first = DiagnosticQueue::new();
    let mut second = DiagnosticQueue::new();
    assert!(!blu_analysis::analyse(&mut arena, parsed.program, &interner, UnitRole::Entry, &mut first));
    let after_first = arena.clone();
    assert!(!blu_analysis::analyse(&mut arena, parsed.program, &interner, UnitRole::Entry, &mut second));
    assert_eq!(arena, after_first);
    assert_eq!(first.flush(), second.flush());

    let output = buffer_handler();
    let mut interpreter = InterpreterBuilder::new(&interner, SharedArena::new(arena))
        .print_handler(output.clone())
        .build();
    interpreter.run(parsed.program).unwrap();
    assert_eq!(output.get_output(), "6\n");
}
