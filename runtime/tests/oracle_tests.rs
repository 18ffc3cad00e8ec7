// File: runtime/tests/oracle_tests.rs
//
// Check oracle driven by a counter design: output `o` starts at 0 and is
// incremented on every cycle.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use thg_runtime::{
    CheckOracle, ConsoleReporter, Diagnostic, Failure, FailureReporter, Literal, MemorySystem,
    NullReporter, OracleContext, SystemUnderTest,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn counter() -> MemorySystem {
    MemorySystem::new().with_signal("o", 0).with_step(|signals| {
        if let Some(Literal::Int(value)) = signals.get_mut("o") {
            *value += 1;
        }
    })
}

/// Reporter keeping every event, shared with the test body.
#[derive(Clone, Default)]
struct RecordingReporter {
    failures: Rc<RefCell<Vec<Failure>>>,
    diagnostics: Rc<RefCell<Vec<Diagnostic>>>,
}

impl FailureReporter for RecordingReporter {
    fn report_failure(&mut self, _context: &OracleContext, failure: &Failure) {
        self.failures.borrow_mut().push(failure.clone());
    }

    fn report_diagnostic(&mut self, _context: &OracleContext, diagnostic: &Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic.clone());
    }
}

fn recording_oracle() -> (CheckOracle<MemorySystem, RecordingReporter>, RecordingReporter) {
    let reporter = RecordingReporter::default();
    let oracle = CheckOracle::with_reporter(counter(), "Root", "Procedure", reporter.clone());
    (oracle, reporter)
}

// ============================================================================
// Sustain windows
// ============================================================================

#[test]
fn test_no_check() {
    init_logger();
    let (mut oracle, reporter) = recording_oracle();
    oracle.advance(10);
    assert!(oracle.failures().is_empty());
    assert!(reporter.failures.borrow().is_empty());
    assert_eq!(oracle.cycle(), 10);
    assert_eq!(oracle.sut().cycles(), 10);
}

#[test]
fn test_single_check() {
    init_logger();
    let (mut oracle, _) = recording_oracle();
    // 1 == 1
    oracle.check("o", 1);
    oracle.advance(1);
    assert!(oracle.failures().is_empty());
    // 2 != 1 but the check is over
    oracle.advance(1);
    assert!(oracle.failures().is_empty());
    assert!(!oracle.is_checked("o"));
}

#[test]
fn test_finite_sustain() {
    init_logger();
    let (mut oracle, reporter) = recording_oracle();
    oracle.register_check("o", Literal::Int(2), 4, 1.0, None);

    // o = 1, 2, 3
    oracle.advance(3);
    assert!(oracle.failures().is_empty());

    // o = 4
    oracle.advance(1);
    assert_eq!(oracle.failures().len(), 1);
    let failure = &oracle.failures()[0];
    assert_eq!(failure.path, "o");
    assert_eq!(failure.cycle, 4);
    assert_eq!(failure.actual, Some(Literal::Int(4)));
    assert_eq!(reporter.failures.borrow().len(), 1);

    // Window over
    oracle.advance(5);
    assert_eq!(oracle.failures().len(), 1);
    assert!(!oracle.is_checked("o"));
}

#[test]
fn test_infinite_sustain() {
    init_logger();
    let (mut oracle, reporter) = recording_oracle();
    oracle.register_check("o", Literal::Int(2), -1, 1.0, None);

    oracle.advance(3);
    assert!(oracle.failures().is_empty());

    // One failure per mismatching cycle
    oracle.advance(5);
    assert_eq!(oracle.failures().len(), 5);

    assert!(oracle.cancel_check("o"));
    oracle.advance(5);
    assert_eq!(oracle.failures().len(), 5);

    let summary = oracle.close();
    assert_eq!(summary.cycles, 13);
    assert_eq!(summary.failures, 5);
    assert_eq!(summary.active_checks, 0);
    assert!(!summary.passed());
    assert!(reporter.diagnostics.borrow().is_empty());
}

#[test]
fn test_sustain_zero_registers_nothing() {
    init_logger();
    let (mut oracle, _) = recording_oracle();
    oracle.register_check("o", Literal::Int(99), 0, 0.0, None);
    oracle.advance(3);
    assert!(oracle.failures().is_empty());
    assert!(oracle.active_checks().is_empty());
}

// ============================================================================
// Reporting
// ============================================================================

#[test]
fn test_console_reports_failure() {
    init_logger();
    let reporter = ConsoleReporter::with_writer(Vec::new());
    let mut oracle = CheckOracle::with_reporter(counter(), "Root", "Procedure", reporter);
    oracle.check("o", 0);
    oracle.advance(1);

    let (_, reporter, failures) = oracle.into_parts();
    assert_eq!(failures.len(), 1);
    let out = String::from_utf8(reporter.into_writer()).unwrap();
    assert!(out.contains("test failed"));
    assert!(out.starts_with("Root/Procedure: "));
}

#[test]
fn test_console_reports_stale_uncheck() {
    init_logger();
    let reporter = ConsoleReporter::with_writer(Vec::new());
    let mut oracle = CheckOracle::with_reporter(counter(), "Root", "Procedure", reporter);
    assert!(!oracle.cancel_check("a"));

    let (_, reporter, failures) = oracle.into_parts();
    assert!(failures.is_empty());
    let out = String::from_utf8(reporter.into_writer()).unwrap();
    assert!(!out.is_empty());
}

#[test]
fn test_console_reports_summary() {
    init_logger();
    let reporter = ConsoleReporter::with_writer(Vec::new());
    let mut oracle = CheckOracle::with_reporter(counter(), "Main", "P1", reporter);
    oracle.advance(2);
    oracle.close();

    let out = String::from_utf8(oracle.reporter().writer().clone()).unwrap();
    assert_eq!(out, "Main/P1: passed (0 failure(s) in 2 cycle(s))\n");
}

#[test]
fn test_cancel_unknown_path_is_idempotent() {
    init_logger();
    let (mut oracle, reporter) = recording_oracle();
    oracle.register_check("o", Literal::Int(1), -1, 0.0, None);

    assert!(!oracle.cancel_check("a"));
    assert!(!oracle.cancel_check("a"));
    assert_eq!(oracle.active_checks().len(), 1);
    assert!(oracle.is_checked("o"));
    assert!(oracle.failures().is_empty());
    assert_eq!(reporter.diagnostics.borrow().len(), 2);
}

#[test]
fn test_unknown_path_reported_each_cycle() {
    init_logger();
    let (mut oracle, reporter) = recording_oracle();
    oracle.register_check("missing", Literal::Int(1), 2, 0.0, None);
    oracle.advance(3);

    assert_eq!(oracle.failures().len(), 2);
    assert!(oracle.failures().iter().all(|f| f.actual.is_none()));
    assert_eq!(
        *reporter.diagnostics.borrow(),
        vec![
            Diagnostic::UnknownPath {
                path: "missing".to_string(),
                cycle: 1
            },
            Diagnostic::UnknownPath {
                path: "missing".to_string(),
                cycle: 2
            },
        ]
    );
}

// ============================================================================
// Comparison rules
// ============================================================================

fn constant(value: Literal) -> MemorySystem {
    MemorySystem::new().with_signal("v", value)
}

fn failures_for(actual: Literal, expected: Literal, tolerance: f64) -> usize {
    let mut oracle = CheckOracle::with_reporter(constant(actual), "Root", "Procedure", NullReporter);
    oracle.register_check("v", expected, 1, tolerance, None);
    oracle.advance(1);
    oracle.failures().len()
}

#[test]
fn test_relative_tolerance() {
    init_logger();
    assert_eq!(failures_for(Literal::Float(2.1001), Literal::Int(2), -0.1), 0);
    assert_eq!(failures_for(Literal::Float(2.1001), Literal::Int(2), -0.02), 1);
}

#[test]
fn test_absolute_tolerance() {
    assert_eq!(failures_for(Literal::Float(2.4), Literal::Float(2.0), 0.5), 0);
    assert_eq!(failures_for(Literal::Float(2.6), Literal::Float(2.0), 0.5), 1);
    // Exact comparison without tolerance
    assert_eq!(failures_for(Literal::Float(2.000001), Literal::Float(2.0), 0.0), 1);
}

#[test]
fn test_special_values() {
    assert_eq!(failures_for(Literal::Float(f64::NAN), Literal::Float(f64::NAN), 0.0), 0);
    assert_eq!(
        failures_for(Literal::Float(f64::INFINITY), Literal::Float(f64::INFINITY), 0.0),
        0
    );
    assert_eq!(
        failures_for(Literal::Float(f64::NEG_INFINITY), Literal::Float(f64::INFINITY), 1e9),
        1
    );
    assert_eq!(failures_for(Literal::Float(f64::NAN), Literal::Int(0), 1.0), 1);
}

#[test]
fn test_non_numeric_ignores_tolerance() {
    assert_eq!(failures_for(Literal::Bool(true), Literal::Bool(true), 0.5), 0);
    assert_eq!(failures_for(Literal::Bool(false), Literal::Bool(true), 0.5), 1);
    assert_eq!(failures_for(Literal::from("'x'"), Literal::from("'x'"), 0.0), 0);
    assert_eq!(failures_for(Literal::Int(1), Literal::Bool(true), 1.0), 1);
}

#[test]
fn test_filter_is_carried_opaque() {
    let mut oracle = CheckOracle::with_reporter(constant(Literal::Int(3)), "Root", "Procedure", NullReporter);
    oracle.register_check("v", Literal::Int(4), 1, 0.0, Some("mask(0xF0)".to_string()));
    oracle.advance(1);
    assert_eq!(oracle.failures()[0].filter.as_deref(), Some("mask(0xF0)"));
}

#[test]
fn test_boxed_system_under_test() {
    let sut: Box<dyn SystemUnderTest> = Box::new(counter());
    let mut oracle = CheckOracle::with_reporter(sut, "Root", "Procedure", NullReporter);
    oracle.advance(2);
    oracle.register_check("o", Literal::Int(3), 1, 0.0, None);
    oracle.advance(1);
    assert!(oracle.failures().is_empty());
    assert_eq!(oracle.sut().read("o"), Some(Literal::Int(3)));
}

#[test]
fn test_failure_serializes_to_json() {
    let mut oracle = CheckOracle::with_reporter(counter(), "Root", "Procedure", NullReporter);
    oracle.register_check("o", Literal::Int(3), 1, 0.5, None);
    oracle.advance(1);

    let json = serde_json::to_value(&oracle.failures()[0]).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "path": "o",
            "cycle": 1,
            "expected": 3,
            "actual": 1,
            "tolerance": 0.5,
            "filter": null
        })
    );
    let summary = serde_json::to_value(oracle.close()).unwrap();
    assert_eq!(summary["failures"], 1);
}

proptest! {
    // Counter output equals the cycle number: an unlimited check on a
    // constant fails on every cycle but the one where they meet
    #[test]
    fn prop_unlimited_sustain_counts_mismatches(expected in 0i64..20, cycles in 1u64..20) {
        let mut oracle = CheckOracle::with_reporter(counter(), "Root", "Procedure", NullReporter);
        oracle.register_check("o", Literal::Int(expected), -1, 0.0, None);
        oracle.advance(cycles);

        let hit = (1..=cycles as i64).contains(&expected) as usize;
        prop_assert_eq!(oracle.failures().len(), cycles as usize - hit);
        prop_assert!(oracle.is_checked("o"));
    }

    #[test]
    fn prop_finite_sustain_expires(sustain in 1i64..10, extra in 0u64..10) {
        let mut oracle = CheckOracle::with_reporter(counter(), "Root", "Procedure", NullReporter);
        oracle.register_check("o", Literal::Int(-1), sustain, 0.0, None);
        oracle.advance(sustain as u64 + extra);

        prop_assert_eq!(oracle.failures().len(), sustain as usize);
        prop_assert!(!oracle.is_checked("o"));
    }
}
