//! The test orchestrator: header check, then edge cases, then generated cases.

use super::classify::classify;
use super::executor::TimedExecutor;
use super::header::validate_header;
use super::resolver::resolve;
use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::member::{Member, MemberTable};
use crate::result::TestResult;
use crate::signature::validate_test_case;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Producer of fresh argument tuples, invoked once per generation round.
pub type Generator = Box<dyn FnMut() -> Vec<Value> + Send>;

/// Lifecycle of a [`MethodTest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Built; nothing evaluated yet.
    Constructed,
    /// The header result is known.
    HeaderChecked,
    /// Test cases have been executed.
    Running,
    /// The worker pool is gone. Terminal.
    Ended,
}

/// Compares a candidate method against a reference implementation.
///
/// A `MethodTest` is single-use. It owns a two-worker pool that is released
/// by [`MethodTest::end`]; after that no further test case can run.
pub struct MethodTest {
    reference: Member,
    candidate: Option<Member>,
    edge_cases: Vec<Vec<Value>>,
    generator: Option<Generator>,
    generation_rounds: usize,
    config: HarnessConfig,
    executor: TimedExecutor,
    header: Option<TestResult>,
    phase: Phase,
}

impl MethodTest {
    /// Create a test for `reference` against the members of `candidates`.
    ///
    /// Edge cases are validated against the reference signature here, and the
    /// candidate is resolved once. A generator without a round count runs
    /// zero rounds.
    pub fn new(
        reference: Member,
        candidates: &MemberTable,
        edge_cases: Option<Vec<Vec<Value>>>,
        generator: Option<Generator>,
        generation_rounds: Option<usize>,
    ) -> HarnessResult<Self> {
        Self::with_config(
            reference,
            candidates,
            edge_cases,
            generator,
            generation_rounds,
            HarnessConfig::default(),
        )
    }

    /// Like [`MethodTest::new`] with explicit limits.
    pub fn with_config(
        reference: Member,
        candidates: &MemberTable,
        edge_cases: Option<Vec<Vec<Value>>>,
        generator: Option<Generator>,
        generation_rounds: Option<usize>,
        config: HarnessConfig,
    ) -> HarnessResult<Self> {
        let edge_cases = edge_cases.unwrap_or_default();
        for (index, case) in edge_cases.iter().enumerate() {
            validate_test_case(case, reference.signature()).map_err(|e| {
                HarnessError::InvalidEdgeCase {
                    method: reference.name().to_string(),
                    index,
                    reason: e.to_string(),
                }
            })?;
        }

        let candidate = resolve(candidates, reference.signature()).cloned();
        let executor = TimedExecutor::new(reference.name())?;

        tracing::debug!(
            method = reference.name(),
            edge_cases = edge_cases.len(),
            candidate_found = candidate.is_some(),
            "constructed method test"
        );

        Ok(Self {
            reference,
            candidate,
            edge_cases,
            generator,
            generation_rounds: generation_rounds.unwrap_or(0),
            config,
            executor,
            header: None,
            phase: Phase::Constructed,
        })
    }

    /// Start building a test for `reference`.
    pub fn builder(reference: Member) -> MethodTestBuilder {
        MethodTestBuilder::new().reference(reference)
    }

    /// Name of the method under test.
    pub fn method_name(&self) -> &str {
        self.reference.name()
    }

    /// The resolved candidate, if one was found.
    pub fn candidate(&self) -> Option<&Member> {
        self.candidate.as_ref()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Header result, if it has been evaluated.
    pub fn header_result(&self) -> Option<&TestResult> {
        self.header.as_ref()
    }

    /// Per-invocation timeout.
    pub fn timeout(&self) -> Duration {
        self.config.method_timeout
    }

    /// Check the candidate's header. Evaluated once; later calls return the
    /// cached result.
    pub fn test_method_header(&mut self) -> TestResult {
        if let Some(result) = &self.header {
            return result.clone();
        }

        let result = validate_header(self.candidate.as_ref(), self.reference.signature());
        tracing::info!(method = self.method_name(), result = %result, "header checked");
        if self.phase == Phase::Constructed {
            self.phase = Phase::HeaderChecked;
        }
        self.header = Some(result.clone());
        result
    }

    /// Run every edge case, then every generation round, in order.
    ///
    /// Nothing runs unless the header check succeeded. A generated tuple that
    /// does not fit the reference signature aborts the remaining rounds.
    pub fn run_test_cases(&mut self) -> HarnessResult<Vec<TestResult>> {
        if self.phase == Phase::Ended {
            return Err(HarnessError::Ended(self.method_name().to_string()));
        }
        if !self.test_method_header().is_success() {
            tracing::info!(method = self.method_name(), "header check failed; skipping test cases");
            self.end();
            return Ok(Vec::new());
        }

        let span = tracing::info_span!("run_test_cases", method = %self.reference.name());
        let _enter = span.enter();
        self.phase = Phase::Running;

        let mut results = Vec::with_capacity(self.edge_cases.len() + self.generation_rounds);
        for case in &self.edge_cases {
            results.push(self.run_test_case(case.clone()));
        }

        if let Some(mut generator) = self.generator.take() {
            let outcome = self.run_generated(&mut generator, &mut results);
            self.generator = Some(generator);
            outcome?;
        }

        Ok(results)
    }

    fn run_generated(
        &self,
        generator: &mut Generator,
        results: &mut Vec<TestResult>,
    ) -> HarnessResult<()> {
        for round in 0..self.generation_rounds {
            let case = generator();
            validate_test_case(&case, self.reference.signature()).map_err(|e| {
                HarnessError::InvalidGeneratedCase {
                    method: self.method_name().to_string(),
                    round,
                    reason: e.to_string(),
                }
            })?;
            results.push(self.run_test_case(case));
        }
        Ok(())
    }

    /// Execute a single, already validated, test case.
    fn run_test_case(&self, case: Vec<Value>) -> TestResult {
        let method = self.method_name();

        let reference = match self.reference.ensure_access() {
            Ok(callable) => callable,
            Err(denied) => {
                tracing::error!(method, "reference is not callable: {}", denied);
                return TestResult::Error {
                    method: method.to_string(),
                };
            }
        };
        let candidate = match self.candidate.as_ref().map(Member::ensure_access) {
            Some(Ok(callable)) => callable,
            Some(Err(denied)) => {
                tracing::error!(method, "candidate is not callable: {}", denied);
                return TestResult::Error {
                    method: method.to_string(),
                };
            }
            None => {
                tracing::error!(method, "no candidate to invoke");
                return TestResult::Error {
                    method: method.to_string(),
                };
            }
        };

        let arguments: Arc<[Value]> = case.into();
        let outcome = self.executor.execute(
            &reference,
            &candidate,
            &arguments,
            self.config.method_timeout,
        );
        let result = classify(
            method,
            outcome,
            &arguments,
            self.reference.signature().returns().is_void(),
        );
        tracing::debug!(result = %result, "test case finished");
        result
    }

    /// Shut down the worker pool. Safe to call more than once.
    pub fn end(&mut self) {
        if self.phase != Phase::Ended {
            self.executor.shutdown();
            self.phase = Phase::Ended;
            tracing::debug!(method = self.method_name(), "method test ended");
        }
    }

    /// Check the header, run test cases if it passed, then end.
    ///
    /// The header result comes first, followed by every test case result in
    /// the order the cases were issued.
    pub fn run_all_tests_then_end(&mut self) -> HarnessResult<Vec<TestResult>> {
        if self.phase == Phase::Ended {
            return Err(HarnessError::Ended(self.method_name().to_string()));
        }

        let header = self.test_method_header();
        let cases = if header.is_success() {
            self.run_test_cases()
        } else {
            Ok(Vec::new())
        };
        self.end();

        let cases = cases?;
        let mut results = Vec::with_capacity(cases.len() + 1);
        results.push(header);
        results.extend(cases);
        Ok(results)
    }
}

impl fmt::Debug for MethodTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodTest")
            .field("reference", self.reference.signature())
            .field("candidate", &self.candidate.as_ref().map(Member::signature))
            .field("edge_cases", &self.edge_cases.len())
            .field("generator", &self.generator.is_some())
            .field("generation_rounds", &self.generation_rounds)
            .field("config", &self.config)
            .field("phase", &self.phase)
            .finish()
    }
}

impl Drop for MethodTest {
    fn drop(&mut self) {
        self.end();
    }
}

/// Step-by-step construction of a [`MethodTest`].
#[derive(Default)]
pub struct MethodTestBuilder {
    reference: Option<Member>,
    candidates: MemberTable,
    edge_cases: Vec<Vec<Value>>,
    generator: Option<Generator>,
    generation_rounds: Option<usize>,
    config: HarnessConfig,
}

impl MethodTestBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reference implementation.
    pub fn reference(mut self, reference: Member) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Set the table searched for the candidate.
    pub fn candidates(mut self, candidates: MemberTable) -> Self {
        self.candidates = candidates;
        self
    }

    /// Add one candidate member.
    pub fn candidate(mut self, member: Member) -> Self {
        self.candidates.push(member);
        self
    }

    /// Append one edge case.
    pub fn edge_case(mut self, case: Vec<Value>) -> Self {
        self.edge_cases.push(case);
        self
    }

    /// Append several edge cases.
    pub fn edge_cases<I: IntoIterator<Item = Vec<Value>>>(mut self, cases: I) -> Self {
        self.edge_cases.extend(cases);
        self
    }

    /// Set the generator of random cases.
    pub fn generator<F>(mut self, generator: F) -> Self
    where
        F: FnMut() -> Vec<Value> + Send + 'static,
    {
        self.generator = Some(Box::new(generator));
        self
    }

    /// Number of times the generator is invoked.
    pub fn generation_rounds(mut self, rounds: usize) -> Self {
        self.generation_rounds = Some(rounds);
        self
    }

    /// Replace the execution limits.
    pub fn config(mut self, config: HarnessConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace only the per-invocation timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Validate and construct.
    pub fn build(self) -> HarnessResult<MethodTest> {
        let reference = self.reference.ok_or(HarnessError::MissingReference)?;
        MethodTest::with_config(
            reference,
            &self.candidates,
            Some(self.edge_cases),
            self.generator,
            self.generation_rounds,
            self.config,
        )
    }
}
