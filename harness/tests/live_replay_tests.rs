// File: harness/tests/live_replay_tests.rs
//
// Recorded scenarios replayed live against an in-memory design:
// `sum = a + b` and `flags` mirrors `mode` as a pair of booleans.

use thg_common::Literal;
use thg_harness::{
    parse_scenario, replay, Harness, HarnessConfig, LiveExecutor, ScenarioHandler, StaticDirectory,
};
use thg_runtime::{CheckOracle, MemorySystem, NullReporter};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn adder() -> MemorySystem {
    MemorySystem::new()
        .with_signal("a", 0)
        .with_signal("b", 0.0)
        .with_signal("sum", 0.0)
        .with_signal("mode", 0)
        .with_signal("flags[0]", false)
        .with_signal("flags[1]", false)
        .with_step(|signals| {
            let a = signals["a"].as_f64().unwrap_or(0.0);
            let b = signals["b"].as_f64().unwrap_or(0.0);
            signals.insert("sum".to_string(), Literal::Float(a + b));

            let mode = signals["mode"].as_f64().unwrap_or(0.0) as i64;
            signals.insert("flags[0]".to_string(), Literal::Bool(mode & 1 != 0));
            signals.insert("flags[1]".to_string(), Literal::Bool(mode & 2 != 0));
        })
}

fn directory() -> StaticDirectory {
    StaticDirectory::new()
        .with_input("Adder::Main/a", "a")
        .with_input("Adder::Main/b", "b")
        .with_sensor("Adder::mode", "mode")
        .with_output("Adder::Main/sum", "sum")
        .with_probe("Adder::Main/flags", "flags")
}

fn executor() -> LiveExecutor<MemorySystem, NullReporter> {
    LiveExecutor::from_oracle(CheckOracle::with_reporter(adder(), "Adder::Main", "P1", NullReporter))
}

#[test]
fn test_live_replay_passes() {
    init_logger();
    let scenario = parse_scenario(
        r##"
name: nominal
directives:
  - directive: comment
    text: "# sum of inputs"
  - directive: set_tol
    path: ""
    real_tol: 0.01
  - directive: set
    path: Adder::Main/a
    value: 2_i32
  - directive: set_or_check
    path: Adder::Main/b
    value: 0.5_f64
  - directive: set_or_check
    path: Adder::mode
    value: 3
  - directive: check
    path: Adder::Main/sum
    value: 2.5
    sustain: 2
  - directive: set_or_check
    path: Adder::Main/flags
    value: (t, T)
  - directive: cycle
    number: 2
"##,
    )
    .unwrap();

    let mut harness = Harness::new(directory(), executor());
    let report = replay(&scenario, &mut harness).unwrap();
    assert_eq!(report.directives, 8);
    assert!(harness.diagnostics().is_empty());

    let mut executor = harness.into_sink();
    assert!(executor.oracle().failures().is_empty());
    let summary = executor.close();
    assert_eq!(summary.cycles, 2);
    assert!(summary.passed());
}

#[test]
fn test_live_replay_records_failures() {
    init_logger();
    let scenario = parse_scenario(
        r##"
name: drift
directives:
  - directive: alias
    alias: s
    path: Adder::Main/sum
  - directive: set
    path: Adder::Main/a
    value: 10
  - directive: check
    path: s
    value: 10
    sustain: forever
    real_tol: 0.01r
  - directive: cycle
    number: 2
  - directive: set
    path: Adder::Main/b
    value: 0.05
  - directive: cycle
  - directive: set
    path: Adder::Main/b
    value: 0.5
  - directive: cycle
    number: 3
  - directive: uncheck
    path: s
  - directive: cycle
    number: 4
"##,
    )
    .unwrap();

    let mut harness = Harness::new(directory(), executor());
    replay(&scenario, &mut harness).unwrap();

    let oracle = harness.into_sink().into_oracle();
    // 10.05 is within 1% of 10, 10.5 is not, for 3 cycles
    assert_eq!(oracle.failures().len(), 3);
    assert!(oracle.failures().iter().all(|f| f.path == "sum"));
    assert_eq!(oracle.failures()[0].cycle, 4);
    assert_eq!(oracle.failures()[0].tolerance, -0.01);
    assert_eq!(oracle.cycle(), 10);
    assert!(!oracle.is_checked("sum"));
}

#[test]
fn test_live_config_default_tolerance() {
    init_logger();
    let config = HarnessConfig::from_yaml("default_tolerance: 0.5\n").unwrap();
    let mut harness = Harness::with_config(directory(), executor(), &config).unwrap();

    let location = Default::default();
    harness.on_set(location, "Adder::Main/b", &"1.25".into()).unwrap();
    harness
        .on_check(location, "Adder::Main/sum", &"1".into(), "", "", "", "")
        .unwrap();
    harness.on_cycle(location, "").unwrap();

    assert!(harness.sink().oracle().failures().is_empty());
}

#[test]
fn test_live_unknown_paths() {
    init_logger();
    let mut harness = Harness::new(directory(), executor());
    let location = Default::default();

    // Placeholder name never exists in the design
    harness.on_check(location, "Adder::Main/zz", &"1".into(), "", "", "", "").unwrap();
    harness.on_cycle(location, "").unwrap();
    harness.on_set_or_check(location, "Adder::Main/zz", &"1".into()).unwrap();

    assert_eq!(harness.diagnostics().len(), 2);
    let failures = harness.sink().oracle().failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path, "<Adder::Main/zz>");
    assert_eq!(failures[0].actual, None);
}
