//! Evaluation phase: entry units run end to end.

use blu_diagnostic::ErrorCode;
use bluc::{LoadError, RunStatus, SessionConfig};
use pretty_assertions::assert_eq;

use crate::common::Project;

#[test]
fn main_runs_after_top_level() {
    let project = Project::new();
    project.file(
        "main.blu",
        "let greet = fun(who) { print \"hello \" + who; };\nlet final main = fun() { greet(\"blu\"); };\nprint \"start\";",
    );
    assert_eq!(project.run("main.blu").expect_ok(), "start\nhello blu\n");
}

#[test]
fn pipe_matches_direct_call() {
    let project = Project::new();
    project.file(
        "piped.blu",
        "let f = fun(a, b) { [a, b] };\nprint 2 |> f(1);",
    );
    project.file("direct.blu", "let f = fun(a, b) { [a, b] };\nprint f(1, 2);");
    let piped = project.run("piped.blu").expect_ok();
    assert_eq!(piped, project.run("direct.blu").expect_ok());
    assert_eq!(piped, "[1, 2]\n");
}

#[test]
fn exit_sets_the_status() {
    let project = Project::new();
    project.file("main.blu", "print 1;\nblu.system.exit(4);\nprint 2;");
    let run = project.run("main.blu");
    assert_eq!(run.result.unwrap(), RunStatus::Exited(4));
    assert_eq!(run.output, "1\n");
}

#[test]
fn runtime_fault_report_includes_backtrace() {
    let project = Project::new();
    project.file(
        "main.blu",
        "let inner = fun(x) { x + \"a\" };\nlet outer = fun(y) { inner(y) };\nouter(1);",
    );
    let run = project.run("main.blu");
    assert_eq!(run.expect_runtime_error().code(), ErrorCode::E6003);

    let mut lines = run.output.lines();
    let headline = lines.next().unwrap();
    assert!(headline.starts_with("error[E6003]: Operator '+' cannot be applied to number and string in "));
    assert!(headline.ends_with("main.blu at 1:24"));
    assert!(lines.next().unwrap().starts_with("  = note: in inner(x = 1) at 2:"));
    assert!(lines.next().unwrap().starts_with("  = note: in outer(y = 1) at 3:"));
}

#[test]
fn output_before_a_fault_is_kept() {
    let project = Project::new();
    project.file("main.blu", "print \"partial\";\nlet xs = [1];\nprint xs[4];");
    let run = project.run("main.blu");
    assert_eq!(run.expect_runtime_error().code(), ErrorCode::E6005);
    assert!(run.output.starts_with("partial\nerror[E6005]: Index '4' out of range of '1'"));
}

#[test]
fn syntax_error_is_reported_without_running() {
    let project = Project::new();
    project.file("main.blu", "print 1;\nlet = 2;");
    let run = project.run("main.blu");
    assert!(matches!(run.result, Err(LoadError::Syntax { .. })));
    assert!(run.output.starts_with("error[E1004]: Expected identifier"));
    assert!(!run.output.starts_with("1\n"));
}

#[test]
fn call_depth_comes_from_config() {
    let project = Project::new();
    project.file(
        "main.blu",
        "let rec count = fun(n) { if n == 0 then { 0 } else { count(n - 1) } };\nprint count(40);",
    );
    assert_eq!(project.run("main.blu").expect_ok(), "0\n");

    let shallow = SessionConfig::default().with_max_call_depth(20);
    let run = project.run_with("main.blu", shallow);
    assert_eq!(run.expect_runtime_error().code(), ErrorCode::E6009);
    assert!(run.output.contains("... 4 more frames"));
}

#[test]
fn natives_reach_the_filesystem() {
    let project = Project::new();
    let data = project.file("data.txt", "from disk");
    let source = format!(
        "let path = \"{}\";\nprint blu.io.exists(path), \" \", blu.io.read(path);",
        data.display()
    );
    project.file("main.blu", &source);
    assert_eq!(project.run("main.blu").expect_ok(), "true from disk\n");
}
