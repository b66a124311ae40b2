//! Bounded-time, side-by-side invocation of reference and candidate.
//!
//! Every [`MethodTest`](super::MethodTest) owns one [`TimedExecutor`] backed
//! by a pool of exactly two worker threads. For each test case the reference
//! and the candidate are submitted together and run concurrently; test cases
//! themselves are processed one at a time.
//!
//! A timeout abandons the result but never stops the invocation. A hung
//! candidate keeps its worker busy until it returns on its own, which may be
//! never. Later submissions queue behind it on the remaining worker.

use crate::error::{HarnessError, HarnessResult};
use crate::member::Callable;
use crate::value::Value;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Number of workers per pool: one for the reference, one for the candidate.
pub const POOL_SIZE: usize = 2;

/// What happened to a single invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The method returned normally.
    Returned(Value),
    /// The method's own logic raised a fault or panicked.
    Raised(String),
    /// The invocation machinery failed for reasons outside the method.
    Infrastructure(String),
    /// No outcome arrived within the timeout.
    TimedOut,
}

impl Outcome {
    /// Returns true for [`Outcome::Returned`].
    pub fn is_returned(&self) -> bool {
        matches!(self, Self::Returned(_))
    }
}

/// Outcomes of one reference/candidate pair.
#[derive(Debug, Clone, PartialEq)]
pub enum DualOutcome {
    /// The reference did not return a value. The candidate is not awaited.
    ReferenceFailed(Outcome),
    /// The reference returned `expected`; `candidate` is what the candidate did.
    Completed {
        /// Value produced by the reference.
        expected: Value,
        /// Outcome of the candidate.
        candidate: Outcome,
    },
}

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Fixed-size pool of worker threads fed through a shared channel.
pub struct WorkerPool {
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
    busy: Arc<AtomicUsize>,
}

impl WorkerPool {
    /// Start `size` named workers.
    pub fn new(name: &str, size: usize) -> HarnessResult<Self> {
        let (sender, receiver) = mpsc::channel::<Job>();
        let receiver = Arc::new(Mutex::new(receiver));
        let busy = Arc::new(AtomicUsize::new(0));

        let mut workers = Vec::with_capacity(size);
        for id in 0..size {
            let receiver = Arc::clone(&receiver);
            let busy = Arc::clone(&busy);
            let handle = thread::Builder::new()
                .name(format!("{}-worker-{}", name, id))
                .spawn(move || worker_loop(&receiver, &busy))
                .map_err(|e| HarnessError::PoolStartup(e.to_string()))?;
            workers.push(handle);
        }

        Ok(Self {
            sender: Some(sender),
            workers,
            busy,
        })
    }

    /// Queue `callable(arguments)` and return a handle to its outcome.
    pub fn submit(&self, callable: Callable, arguments: Arc<[Value]>) -> Pending {
        let sender = match &self.sender {
            Some(s) => s,
            None => return Pending::Rejected("worker pool has been shut down".to_string()),
        };

        let (tx, rx) = mpsc::channel();
        let job: Job = Box::new(move || {
            let outcome = invoke(&callable, &arguments);
            // The waiter may have given up already.
            let _ = tx.send(outcome);
        });

        match sender.send(job) {
            Ok(()) => Pending::Queued(rx),
            Err(_) => Pending::Rejected("all workers have exited".to_string()),
        }
    }

    /// Number of workers currently running an invocation.
    pub fn busy_workers(&self) -> usize {
        self.busy.load(Ordering::SeqCst)
    }

    /// Returns true once [`WorkerPool::shutdown`] has been called.
    pub fn is_shut_down(&self) -> bool {
        self.sender.is_none()
    }

    /// Stop accepting work. Idle workers exit; busy workers are abandoned.
    pub fn shutdown(&mut self) {
        if self.sender.take().is_none() {
            return;
        }
        let busy = self.busy_workers();
        if busy > 0 {
            tracing::warn!(busy, "abandoning workers still running invocations");
        }
        // Hung workers cannot be joined, so idle ones are detached as well.
        self.workers.clear();
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(receiver: &Mutex<Receiver<Job>>, busy: &AtomicUsize) {
    loop {
        let job = {
            let guard = receiver.lock().unwrap_or_else(PoisonError::into_inner);
            guard.recv()
        };
        match job {
            Ok(job) => {
                busy.fetch_add(1, Ordering::SeqCst);
                job();
                busy.fetch_sub(1, Ordering::SeqCst);
            }
            Err(_) => break,
        }
    }
}

/// Run a callable, turning returned faults and panics into [`Outcome::Raised`].
fn invoke(callable: &Callable, arguments: &[Value]) -> Outcome {
    match panic::catch_unwind(AssertUnwindSafe(|| callable.call(arguments))) {
        Ok(Ok(value)) => Outcome::Returned(value),
        Ok(Err(fault)) => Outcome::Raised(fault.to_string()),
        Err(payload) => Outcome::Raised(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}

/// Handle to a submitted invocation.
#[derive(Debug)]
pub enum Pending {
    /// Waiting on a worker.
    Queued(Receiver<Outcome>),
    /// The pool refused the job.
    Rejected(String),
}

impl Pending {
    /// Block until the outcome arrives or `timeout` elapses.
    pub fn wait(self, timeout: Duration) -> Outcome {
        match self {
            Self::Queued(rx) => match rx.recv_timeout(timeout) {
                Ok(outcome) => outcome,
                Err(RecvTimeoutError::Timeout) => Outcome::TimedOut,
                Err(RecvTimeoutError::Disconnected) => {
                    Outcome::Infrastructure("worker dropped the invocation".to_string())
                }
            },
            Self::Rejected(reason) => Outcome::Infrastructure(reason),
        }
    }
}

/// Runs reference and candidate side by side under a timeout.
pub struct TimedExecutor {
    pool: WorkerPool,
}

impl TimedExecutor {
    /// Create an executor with its own two-worker pool.
    pub fn new(name: &str) -> HarnessResult<Self> {
        Ok(Self {
            pool: WorkerPool::new(name, POOL_SIZE)?,
        })
    }

    /// Invoke both methods on `arguments` and collect their outcomes.
    ///
    /// The reference is awaited first. If it does not return a value within
    /// `timeout` the candidate is abandoned without being awaited. Otherwise
    /// the candidate is awaited with the same bound.
    pub fn execute(
        &self,
        reference: &Callable,
        candidate: &Callable,
        arguments: &Arc<[Value]>,
        timeout: Duration,
    ) -> DualOutcome {
        // Reference first, so a worker left hung by an earlier candidate
        // delays the candidate rather than the oracle.
        let reference_pending = self.pool.submit(reference.clone(), Arc::clone(arguments));
        let candidate_pending = self.pool.submit(candidate.clone(), Arc::clone(arguments));

        let expected = match reference_pending.wait(timeout) {
            Outcome::Returned(value) => value,
            failed => {
                tracing::error!(outcome = ?failed, "reference invocation failed");
                return DualOutcome::ReferenceFailed(failed);
            }
        };

        let candidate = candidate_pending.wait(timeout);
        match &candidate {
            Outcome::Raised(reason) => tracing::debug!(%reason, "candidate raised"),
            Outcome::Infrastructure(reason) => {
                tracing::error!(%reason, "candidate invocation machinery failed")
            }
            Outcome::TimedOut => {
                tracing::warn!(timeout_ms = timeout.as_millis() as u64, "candidate timed out")
            }
            Outcome::Returned(_) => {}
        }

        DualOutcome::Completed {
            expected,
            candidate,
        }
    }

    /// Number of workers currently running an invocation.
    pub fn busy_workers(&self) -> usize {
        self.pool.busy_workers()
    }

    /// Returns true once the executor has been shut down.
    pub fn is_shut_down(&self) -> bool {
        self.pool.is_shut_down()
    }

    /// Release the worker pool.
    pub fn shutdown(&mut self) {
        self.pool.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::Fault;
    use std::time::Instant;

    fn args(values: &[i32]) -> Arc<[Value]> {
        values.iter().map(|v| Value::Int(*v)).collect()
    }

    fn adder() -> Callable {
        Callable::new(|a| match a {
            [Value::Int(x), Value::Int(y)] => Ok(Value::Int(x + y)),
            _ => Err(Fault::new("expected two ints")),
        })
    }

    fn sleeper(ms: u64) -> Callable {
        Callable::new(move |_| {
            thread::sleep(Duration::from_millis(ms));
            Ok(Value::Int(0))
        })
    }

    #[test]
    fn test_both_return() {
        let executor = TimedExecutor::new("test").unwrap();
        let outcome = executor.execute(&adder(), &adder(), &args(&[2, 3]), Duration::from_secs(1));
        assert_eq!(
            outcome,
            DualOutcome::Completed {
                expected: Value::Int(5),
                candidate: Outcome::Returned(Value::Int(5)),
            }
        );
    }

    #[test]
    fn test_candidate_fault_is_raised() {
        let executor = TimedExecutor::new("test").unwrap();
        let failing = Callable::new(|_| Err(Fault::new("boom")));
        match executor.execute(&adder(), &failing, &args(&[1, 1]), Duration::from_secs(1)) {
            DualOutcome::Completed { candidate, .. } => {
                assert_eq!(candidate, Outcome::Raised("boom".to_string()))
            }
            other => panic!("Expected Completed, got {:?}", other),
        }
    }

    #[test]
    fn test_candidate_panic_is_raised() {
        let executor = TimedExecutor::new("test").unwrap();
        let panicking = Callable::new(|_| panic!("index out of bounds"));
        match executor.execute(&adder(), &panicking, &args(&[1, 1]), Duration::from_secs(1)) {
            DualOutcome::Completed {
                candidate: Outcome::Raised(reason),
                ..
            } => assert!(reason.contains("index out of bounds")),
            other => panic!("Expected Raised, got {:?}", other),
        }
    }

    #[test]
    fn test_candidate_timeout() {
        let executor = TimedExecutor::new("test").unwrap();
        let start = Instant::now();
        let outcome = executor.execute(
            &adder(),
            &sleeper(2_000),
            &args(&[2, 3]),
            Duration::from_millis(100),
        );
        assert!(start.elapsed() < Duration::from_millis(1_500));
        assert_eq!(
            outcome,
            DualOutcome::Completed {
                expected: Value::Int(5),
                candidate: Outcome::TimedOut,
            }
        );
    }

    #[test]
    fn test_reference_fault_skips_candidate() {
        let executor = TimedExecutor::new("test").unwrap();
        let failing = Callable::new(|_| Err(Fault::new("reference bug")));
        let outcome = executor.execute(&failing, &adder(), &args(&[1, 2]), Duration::from_secs(1));
        assert_eq!(
            outcome,
            DualOutcome::ReferenceFailed(Outcome::Raised("reference bug".to_string()))
        );
    }

    #[test]
    fn test_reference_timeout() {
        let executor = TimedExecutor::new("test").unwrap();
        let outcome = executor.execute(
            &sleeper(2_000),
            &adder(),
            &args(&[1, 2]),
            Duration::from_millis(50),
        );
        assert_eq!(outcome, DualOutcome::ReferenceFailed(Outcome::TimedOut));
    }

    #[test]
    fn test_hung_worker_does_not_block_next_case() {
        let executor = TimedExecutor::new("test").unwrap();
        let timeout = Duration::from_millis(200);
        let first = executor.execute(&adder(), &sleeper(5_000), &args(&[1, 1]), timeout);
        assert!(matches!(
            first,
            DualOutcome::Completed {
                candidate: Outcome::TimedOut,
                ..
            }
        ));
        assert_eq!(executor.busy_workers(), 1);

        // One worker is still hung; the other serves reference then candidate.
        let second = executor.execute(&adder(), &adder(), &args(&[2, 2]), timeout);
        assert_eq!(
            second,
            DualOutcome::Completed {
                expected: Value::Int(4),
                candidate: Outcome::Returned(Value::Int(4)),
            }
        );
    }

    #[test]
    fn test_submit_after_shutdown_is_infrastructure() {
        let mut pool = WorkerPool::new("test", POOL_SIZE).unwrap();
        pool.shutdown();
        pool.shutdown();
        assert!(pool.is_shut_down());
        let outcome = pool.submit(adder(), args(&[1, 2])).wait(Duration::from_millis(10));
        assert!(matches!(outcome, Outcome::Infrastructure(_)));
    }

    #[test]
    fn test_panic_message() {
        let boxed: Box<dyn Any + Send> = Box::new("oops");
        assert_eq!(panic_message(boxed.as_ref()), "panicked: oops");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "panicked: owned");
        let boxed: Box<dyn Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(boxed.as_ref()), "panicked");
    }
}
