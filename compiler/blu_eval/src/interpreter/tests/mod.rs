//! End-to-end evaluation tests: parse, analyse, run, inspect printed output.

#![expect(clippy::unwrap_used, reason = "tests unwrap parse and run results")]

mod control;
mod faults;
mod functions;

use blu_analysis::UnitRole;
use blu_diagnostic::DiagnosticQueue;
use blu_ir::{SharedArena, StringInterner};
use rustc_hash::FxHashMap;

use crate::{buffer_handler, EvalError, InterpreterBuilder, Value, DEFAULT_MAX_CALL_DEPTH};

struct Options {
    role: UnitRole,
    analyse: bool,
    max_call_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            role: UnitRole::Entry,
            analyse: true,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

struct Outcome {
    output: String,
    /// Exports keyed by their text.
    result: Result<FxHashMap<String, Value>, EvalError>,
}

fn evaluate_with(source: &str, options: &Options) -> Outcome {
    let interner = StringInterner::new();
    let parsed = blu_parse::parse_source(source, &interner).unwrap();
    let mut arena = parsed.arena;
    if options.analyse {
        let mut queue = DiagnosticQueue::new();
        let failed = blu_analysis::analyse(
            &mut arena,
            parsed.program,
            &interner,
            options.role,
            &mut queue,
        );
        let rendered: Vec<String> = queue.flush().iter().map(|d| d.render("test.blu")).collect();
        assert!(!failed, "analysis rejected the program: {rendered:#?}");
    }

    let handler = buffer_handler();
    let mut interpreter = InterpreterBuilder::new(&interner, SharedArena::new(arena))
        .print_handler(handler.clone())
        .max_call_depth(options.max_call_depth)
        .build();
    let result: Result<FxHashMap<String, Value>, EvalError> =
        interpreter.run(parsed.program).and_then(|exports| {
            if options.role == UnitRole::Entry {
                interpreter.invoke_main()?;
            }
            Ok(exports
                .into_iter()
                .map(|(name, value)| (interner.lookup(name).to_owned(), value))
                .collect())
        });
    Outcome {
        output: handler.get_output(),
        result,
    }
}

/// Printed output of a program that must succeed.
fn output(source: &str) -> String {
    let outcome = evaluate_with(source, &Options::default());
    if let Err(err) = &outcome.result {
        panic!("evaluation failed: {err}\noutput so far:\n{}", outcome.output);
    }
    outcome.output
}

/// The fault a program that passes analysis raises at run time.
fn fault(source: &str) -> EvalError {
    match evaluate_with(source, &Options::default()).result {
        Ok(_) => panic!("expected a run-time fault"),
        Err(err) => err,
    }
}
