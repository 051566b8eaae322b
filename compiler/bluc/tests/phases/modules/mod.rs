//! Module resolution and caching.

use blu_diagnostic::ErrorCode;
use bluc::{RunStatus, SessionConfig};
use pretty_assertions::assert_eq;

use crate::common::{count_code, Project};

#[test]
fn relative_import_exposes_exports() {
    let project = Project::new();
    project.file(
        "lib/math.blu",
        "let double = fun(x) { x * 2 };\nlet hidden = 1;\nexport double;",
    );
    project.file(
        "main.blu",
        "let math = import lib.math;\nprint math.double(4);\nprint math;",
    );
    assert_eq!(
        project.run("main.blu").expect_ok(),
        "8\n{double: <fun double>}\n"
    );
}

#[test]
fn module_is_evaluated_once_and_shared() {
    let project = Project::new();
    project.file(
        "lib/counter.blu",
        "print \"loading counter\";\nlet state = {n: 0};\nexport state;",
    );
    project.file(
        "lib/user.blu",
        "let counter = import counter;\nlet bump = fun() { counter.state.n <- counter.state.n + 1; };\nexport bump, counter;",
    );
    project.file(
        "main.blu",
        "let user = import lib.user;\nlet a = import lib.counter;\nlet b = import base lib.counter;\nuser.bump();\nuser.bump();\na.extra <- true;\nprint a.state.n, b.extra;",
    );

    let (session, output) = project.session();
    let status = session.run_entry(&project.root().join("main.blu")).unwrap();
    assert_eq!(status, RunStatus::Completed);
    assert_eq!(output.get_output(), "loading counter\n2true\n");
    assert_eq!(session.cache().len(), 2);
}

#[test]
fn std_import_uses_configured_root() {
    let project = Project::new();
    project.file(
        "stdlib/text.blu",
        "let shout = fun(s) { s + \"!\" };\nexport shout;",
    );
    project.file(
        "main.blu",
        "let text = import std text;\nprint text.shout(\"hi\");",
    );
    let config = SessionConfig::default().with_std_dir(project.root().join("stdlib"));
    assert_eq!(project.run_with("main.blu", config).expect_ok(), "hi!\n");
}

#[test]
fn std_root_defaults_to_library_dir() {
    let project = Project::new();
    project.file("library/answer.blu", "let value = 42;\nexport value;");
    project.file("main.blu", "print (import std answer).value;");
    assert_eq!(project.run("main.blu").expect_ok(), "42\n");
}

#[test]
fn missing_module_is_a_runtime_fault() {
    let project = Project::new();
    project.file("main.blu", "let m = import lib.nope;");
    let run = project.run("main.blu");
    let err = run.expect_runtime_error();
    assert_eq!(err.code(), ErrorCode::E6010);
    assert!(err.to_string().ends_with("lib/nope.blu'"), "{err}");
}

#[test]
fn import_cycle_is_reported() {
    let project = Project::new();
    project.file("a.blu", "let b = import b;\nlet x = 1;\nexport x;");
    project.file("b.blu", "let a = import a;\nlet y = 2;\nexport y;");
    project.file("main.blu", "let a = import a;");

    let run = project.run("main.blu");
    assert_eq!(run.expect_runtime_error().code(), ErrorCode::E6011);
    assert_eq!(count_code(&run.output, "E6012"), 1);
}

#[test]
fn importing_the_entry_unit_is_a_cycle() {
    let project = Project::new();
    project.file("helper.blu", "let main = import main;\nlet x = 1;\nexport x;");
    project.file("main.blu", "let h = import helper;");

    let run = project.run("main.blu");
    assert_eq!(run.expect_runtime_error().code(), ErrorCode::E6011);
    assert_eq!(count_code(&run.output, "E6012"), 1);
}

#[test]
fn module_analysis_errors_surface_in_importer() {
    let project = Project::new();
    project.file("broken.blu", "print nothing_here;");
    project.file("main.blu", "print \"before\";\nlet m = import broken;\nprint \"after\";");

    let run = project.run("main.blu");
    let err = run.expect_runtime_error();
    assert_eq!(err.code(), ErrorCode::E6011);
    assert_eq!(
        err.to_string(),
        "Failed to import 'broken': 1 analysis error(s)"
    );
    assert!(run.output.starts_with("before\nerror[E2001]"));
    assert!(!run.output.contains("after"));
}

#[test]
fn module_runtime_fault_is_reported_where_it_happens() {
    let project = Project::new();
    project.file("bad.blu", "let x = [][0];\nexport x;");
    project.file("main.blu", "let m = import bad;");

    let run = project.run("main.blu");
    assert_eq!(run.expect_runtime_error().code(), ErrorCode::E6011);
    let lines: Vec<&str> = run.output.lines().collect();
    assert!(lines[0].starts_with("error[E6005]"));
    assert!(lines[0].contains("bad.blu at 1:"));
    assert!(lines[1].starts_with("error[E6011]: Failed to import 'bad': Index '0' out of range of '0'"));
}

#[test]
fn exported_functions_see_sibling_exports() {
    let project = Project::new();
    project.file(
        "lib.blu",
        "let base = fun() { 1 };\nlet next = fun() { base() + 1 };\nexport base, next;",
    );
    project.file("main.blu", "let lib = import lib;\nprint lib.next();");
    assert_eq!(project.run("main.blu").expect_ok(), "2\n");
}

#[test]
fn unexported_helpers_are_not_visible_to_importers() {
    let project = Project::new();
    project.file(
        "lib.blu",
        "let helper = fun() { 1 };\nlet api = fun() { helper() };\nexport api;",
    );
    project.file("main.blu", "let lib = import lib;\nprint lib.api();");
    let run = project.run("main.blu");
    assert_eq!(run.expect_runtime_error().code(), ErrorCode::E6004);
}

#[test]
fn exit_inside_module_ends_the_program() {
    let project = Project::new();
    project.file("quit.blu", "blu.system.exit(2);");
    project.file("main.blu", "let q = import quit;\nprint \"unreachable\";");
    let run = project.run("main.blu");
    assert_eq!(run.result.unwrap(), RunStatus::Exited(2));
    assert_eq!(run.output, "");
}
