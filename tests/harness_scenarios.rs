//! End-to-end runs of the harness against hand-written submissions.
//!
//! Every scenario grades some variant of `int add(int, int)`.

use method_oracle::harness::MethodTest;
use method_oracle::{
    Fault, HarnessConfig, Member, MemberTable, ReturnType, RunSummary, Signature, TestResult,
    TypeDescriptor, Value,
};
use std::thread;
use std::time::{Duration, Instant};

fn add_signature(name: &str, arity: usize) -> Signature {
    Signature::new(name, vec![TypeDescriptor::int(); arity], TypeDescriptor::int())
}

fn binary(name: &str, op: fn(i32, i32) -> i32) -> Member {
    Member::new(add_signature(name, 2), move |args| match args {
        [Value::Int(a), Value::Int(b)] => Ok(Value::Int(op(*a, *b))),
        _ => Err(Fault::new("expected two ints")),
    })
}

fn reference() -> Member {
    binary("add", |a, b| a.wrapping_add(b))
}

fn two_three() -> Vec<Vec<Value>> {
    vec![vec![Value::Int(2), Value::Int(3)]]
}

fn run(candidates: MemberTable, config: HarnessConfig) -> Vec<TestResult> {
    let mut test =
        MethodTest::with_config(reference(), &candidates, Some(two_three()), None, None, config)
            .unwrap();
    test.run_all_tests_then_end().unwrap()
}

// ============================================================================
// Basic scenarios
// ============================================================================

#[test]
fn test_identical_implementation_succeeds() {
    let results = run(MemberTable::new().with(reference()), HarnessConfig::standard());
    assert_eq!(results.len(), 2);
    assert_eq!(
        results[0],
        TestResult::HeaderSuccess {
            method: "add".to_string()
        }
    );
    assert_eq!(
        results[1],
        TestResult::TestCaseSuccess {
            method: "add".to_string(),
            arguments: vec![Value::Int(2), Value::Int(3)],
            output: Value::Int(5),
        }
    );
    assert_eq!(results[1].to_string(), "Success! <add(2, 3)> returned <5>.");
}

#[test]
fn test_wrong_output_fails_with_both_values() {
    let results = run(
        MemberTable::new().with(binary("add", |a, b| a - b)),
        HarnessConfig::standard(),
    );
    assert!(results[0].is_success());
    let failure = &results[1];
    assert!(failure.is_test_case_failure());
    assert_eq!(failure.expected(), Some(&Value::Int(5)));
    assert_eq!(failure.actual(), Some(&Value::Int(-1)));
    assert_eq!(
        failure.to_string(),
        "Failure! <add(2, 3)> should output <5> but instead outputs <-1>."
    );
}

#[test]
fn test_infinite_loop_is_reported_after_timeout() {
    let looping = Member::new(add_signature("add", 2), |_| loop {
        thread::sleep(Duration::from_millis(50));
    });
    let start = Instant::now();
    let results = run(
        MemberTable::new().with(looping),
        HarnessConfig::standard().with_timeout(Duration::from_millis(200)),
    );
    assert!(start.elapsed() < Duration::from_secs(2));
    assert_eq!(
        results[1],
        TestResult::InfiniteLoopFailure {
            method: "add".to_string(),
            arguments: vec![Value::Int(2), Value::Int(3)],
            expected: Value::Int(5),
        }
    );
}

#[test]
fn test_misnamed_method_is_not_found() {
    let results = run(
        MemberTable::new().with(binary("plus", |a, b| a + b)),
        HarnessConfig::standard(),
    );
    assert_eq!(
        results,
        vec![TestResult::MethodNotFoundFailure {
            method: "add".to_string()
        }]
    );
}

#[test]
fn test_wrong_arity_is_reported() {
    let three = Member::new(add_signature("add", 3), |_| Ok(Value::Int(0)));
    let results = run(MemberTable::new().with(three), HarnessConfig::standard());
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].to_string(),
        "Failure! <add> should have the parameter types <(int, int)> but instead has <(int, int, int)>."
    );
}

// ============================================================================
// Raised errors and infrastructure
// ============================================================================

#[test]
fn test_candidate_fault_has_no_actual() {
    let failing = Member::new(add_signature("add", 2), |_| Err(Fault::new("overflow")));
    let results = run(MemberTable::new().with(failing), HarnessConfig::standard());
    assert!(results[1].is_test_case_failure());
    assert_eq!(results[1].actual(), None);
    assert!(results[1].to_string().contains("raised an error"));
}

#[test]
fn test_candidate_panic_is_a_failure_not_an_error() {
    let panicking = Member::new(add_signature("add", 2), |args| {
        let index = args.len() + 5;
        Ok(args[index].clone())
    });
    let results = run(MemberTable::new().with(panicking), HarnessConfig::standard());
    assert!(results[1].is_failure());
    assert!(!results[1].is_error());
}

#[test]
fn test_faulty_reference_is_an_error() {
    let broken = Member::new(add_signature("add", 2), |_| Err(Fault::new("reference bug")));
    let mut test = MethodTest::new(
        broken,
        &MemberTable::new().with(reference()),
        Some(two_three()),
        None,
        None,
    )
    .unwrap();
    let results = test.run_all_tests_then_end().unwrap();
    assert!(results[0].is_success());
    assert_eq!(
        results[1],
        TestResult::Error {
            method: "add".to_string()
        }
    );
}

// ============================================================================
// Sequencing
// ============================================================================

#[test]
fn test_results_keep_issue_order() {
    let mut counter = 0;
    let mut test = MethodTest::builder(reference())
        .candidate(binary("add", |a, b| a + b))
        .edge_cases(vec![
            vec![Value::Int(100), Value::Int(0)],
            vec![Value::Int(200), Value::Int(0)],
        ])
        .generator(move || {
            counter += 1;
            vec![Value::Int(counter), Value::Int(0)]
        })
        .generation_rounds(3)
        .build()
        .unwrap();
    let results = test.run_all_tests_then_end().unwrap();
    let firsts: Vec<Value> = results[1..]
        .iter()
        .map(|r| r.arguments().unwrap()[0].clone())
        .collect();
    assert_eq!(
        firsts,
        vec![
            Value::Int(100),
            Value::Int(200),
            Value::Int(1),
            Value::Int(2),
            Value::Int(3)
        ]
    );
}

#[test]
fn test_hung_case_does_not_poison_later_cases() {
    let sometimes_hangs = Member::new(add_signature("add", 2), |args| match args {
        [Value::Int(0), _] => loop {
            thread::sleep(Duration::from_millis(50));
        },
        [Value::Int(a), Value::Int(b)] => Ok(Value::Int(a + b)),
        _ => Err(Fault::new("expected two ints")),
    });
    let mut test = MethodTest::builder(reference())
        .candidate(sometimes_hangs)
        .edge_cases(vec![
            vec![Value::Int(0), Value::Int(1)],
            vec![Value::Int(2), Value::Int(3)],
            vec![Value::Int(4), Value::Int(5)],
        ])
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let results = test.run_all_tests_then_end().unwrap();
    assert!(matches!(results[1], TestResult::InfiniteLoopFailure { .. }));
    assert!(results[2].is_success());
    assert!(results[3].is_success());
}

#[test]
fn test_void_reference_accepts_any_return() {
    let sig = Signature::new("log", vec![TypeDescriptor::string()], ReturnType::Void);
    let reference = Member::new(sig.clone(), |_| Ok(Value::Unit));
    let candidate = Member::new(sig, |_| Ok(Value::Int(42)));
    let mut test = MethodTest::builder(reference)
        .candidate(candidate)
        .edge_case(vec![Value::Str("hello".to_string())])
        .build()
        .unwrap();
    let results = test.run_all_tests_then_end().unwrap();
    assert!(results.iter().all(TestResult::is_success));
}

#[test]
fn test_summary_over_mixed_run() {
    let mut summary = RunSummary::new();
    for candidates in [
        MemberTable::new().with(reference()),
        MemberTable::new().with(binary("add", |a, b| a - b)),
        MemberTable::new(),
    ] {
        for result in run(candidates, HarnessConfig::standard()) {
            summary.record(result);
        }
    }
    assert_eq!(summary.passed, 3);
    assert_eq!(summary.case_failures, 1);
    assert_eq!(summary.header_failures, 1);
    assert_eq!(summary.errors, 0);
    assert!(!summary.all_passed());
}
