//! A small methods-and-parameter-passing practice set.
//!
//! Each [`Problem`] carries a reference solution, a list of edge cases and a
//! seeded generator. Two submissions are bundled for demonstration: a correct
//! one and one with a typical mistake per problem.

use crate::config::HarnessConfig;
use crate::error::HarnessResult;
use crate::harness::{Generator, MethodTest};
use crate::member::{Access, Fault, Member, MemberTable};
use crate::signature::{Signature, TypeDescriptor};
use crate::value::Value;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Name of the train problem.
pub const SOLVE_TRAIN_PROBLEM: &str = "solveTrainProblem";
/// Name of the multiple problem.
pub const IS_MULTIPLE: &str = "isMultiple";
/// Name of the hailstone count problem.
pub const COLLATZ_COUNT: &str = "collatzCount";
/// Name of the hailstone comparison problem.
pub const COLLATZ_EQUALS: &str = "collatzEquals";

/// A practice problem: reference solution plus its test inputs.
pub struct Problem {
    /// Reference implementation.
    pub reference: Member,
    /// Fixed inputs checked on every run.
    pub edge_cases: Vec<Vec<Value>>,
    /// Random input source.
    pub make_generator: fn(StdRng) -> Generator,
}

impl Problem {
    /// Name of the method under test.
    pub fn name(&self) -> &str {
        self.reference.name()
    }

    /// Build a [`MethodTest`] of this problem against `submission`.
    pub fn method_test(
        &self,
        submission: &MemberTable,
        rounds: usize,
        seed: u64,
        config: HarnessConfig,
    ) -> HarnessResult<MethodTest> {
        let rng = StdRng::seed_from_u64(seed);
        MethodTest::with_config(
            self.reference.clone(),
            submission,
            Some(self.edge_cases.clone()),
            Some((self.make_generator)(rng)),
            Some(rounds),
            config,
        )
    }
}

/// All problems, in the order they are assigned.
pub fn problems() -> Vec<Problem> {
    vec![
        Problem {
            reference: Member::new(train_signature(SOLVE_TRAIN_PROBLEM), |args| {
                let (east, west, distance) = three_doubles(args)?;
                Ok(Value::Double(solve_train_problem(east, west, distance)))
            })
            .with_access(Access::Private),
            edge_cases: vec![
                doubles(&[0.0, 0.0, 0.0]),
                doubles(&[-100.0, 100.0, 0.3]),
            ],
            make_generator: train_generator,
        },
        Problem {
            reference: Member::new(pair_signature(IS_MULTIPLE, TypeDescriptor::boolean()), |args| {
                let (a, b) = two_ints(args)?;
                is_multiple(a, b).map(Value::Bool)
            })
            .with_access(Access::Private),
            edge_cases: vec![ints(&[10, 5]), ints(&[7, 3]), ints(&[0, 4]), ints(&[-6, 3])],
            make_generator: multiple_generator,
        },
        Problem {
            reference: Member::new(
                Signature::new(COLLATZ_COUNT, vec![TypeDescriptor::int()], TypeDescriptor::int()),
                |args| Ok(Value::Int(collatz_count(one_int(args)?))),
            )
            .with_access(Access::Private),
            edge_cases: vec![ints(&[0]), ints(&[1]), ints(&[27]), ints(&[-5])],
            make_generator: count_generator,
        },
        Problem {
            reference: Member::new(
                pair_signature(COLLATZ_EQUALS, TypeDescriptor::boolean()),
                |args| {
                    let (a, b) = two_ints(args)?;
                    Ok(Value::Bool(collatz_count(a) == collatz_count(b)))
                },
            )
            .with_access(Access::Private),
            edge_cases: vec![ints(&[1, 1]), ints(&[2, 3]), ints(&[5, 32]), ints(&[0, -3])],
            make_generator: equals_generator,
        },
    ]
}

/// A submission that solves every problem.
pub fn sample_submission() -> MemberTable {
    problems()
        .into_iter()
        .map(|p| p.reference.with_access(Access::Private))
        .collect()
}

/// A submission with one typical mistake per problem.
///
/// - `solveTrainProblem` forgets to convert hours to minutes.
/// - `isMultiple` takes `long` parameters.
/// - `collatzCount` loops forever on zero.
/// - `collatzEquals` is misspelled.
pub fn buggy_submission() -> MemberTable {
    MemberTable::new()
        .with(Member::new(train_signature(SOLVE_TRAIN_PROBLEM), |args| {
            let (east, west, distance) = three_doubles(args)?;
            Ok(Value::Double(distance / (east + west)))
        }))
        .with(Member::new(
            Signature::new(
                IS_MULTIPLE,
                vec![TypeDescriptor::long(), TypeDescriptor::long()],
                TypeDescriptor::boolean(),
            ),
            |_| Err(Fault::new("unreachable: wrong header")),
        ))
        .with(Member::new(
            Signature::new(COLLATZ_COUNT, vec![TypeDescriptor::int()], TypeDescriptor::int()),
            |args| {
                let mut input = one_int(args)?;
                if input < 0 {
                    return Ok(Value::Int(-1));
                }
                let mut count = 0;
                while input != 1 {
                    count += 1;
                    input = collatz_increment(input);
                }
                Ok(Value::Int(count))
            },
        ))
        .with(Member::new(
            pair_signature("collatzEqual", TypeDescriptor::boolean()),
            |args| {
                let (a, b) = two_ints(args)?;
                Ok(Value::Bool(collatz_count(a) == collatz_count(b)))
            },
        ))
}

/// Minutes until two trains heading toward each other meet.
pub fn solve_train_problem(east_speed: f64, west_speed: f64, distance: f64) -> f64 {
    let combined_speed = east_speed + west_speed;
    distance / combined_speed * 60.0
}

/// Whether `a` is a multiple of `b`. Fails on a zero divisor.
pub fn is_multiple(a: i32, b: i32) -> Result<bool, Fault> {
    if b == 0 {
        return Err(Fault::new("/ by zero"));
    }
    Ok(a.wrapping_rem(b) == 0)
}

/// Hailstone steps from `input` down to one, or -1 for inputs below one.
pub fn collatz_count(mut input: i32) -> i32 {
    if input < 1 {
        return -1;
    }
    let mut count = 0;
    while input > 1 {
        count += 1;
        input = collatz_increment(input);
    }
    count
}

fn collatz_increment(n: i32) -> i32 {
    if n % 2 == 0 {
        n / 2
    } else {
        n.wrapping_mul(3).wrapping_add(1)
    }
}

fn train_signature(name: &str) -> Signature {
    Signature::new(
        name,
        vec![TypeDescriptor::double(); 3],
        TypeDescriptor::double(),
    )
}

fn pair_signature(name: &str, returns: TypeDescriptor) -> Signature {
    Signature::new(name, vec![TypeDescriptor::int(); 2], returns)
}

fn ints(values: &[i32]) -> Vec<Value> {
    values.iter().map(|v| Value::Int(*v)).collect()
}

fn doubles(values: &[f64]) -> Vec<Value> {
    values.iter().map(|v| Value::Double(*v)).collect()
}

fn arg<T>(args: &[Value], index: usize, get: fn(&Value) -> Option<T>) -> Result<T, Fault> {
    args.get(index)
        .and_then(get)
        .ok_or_else(|| Fault::new(format!("argument {} has the wrong type", index)))
}

fn one_int(args: &[Value]) -> Result<i32, Fault> {
    arg(args, 0, Value::as_int)
}

fn two_ints(args: &[Value]) -> Result<(i32, i32), Fault> {
    Ok((arg(args, 0, Value::as_int)?, arg(args, 1, Value::as_int)?))
}

fn three_doubles(args: &[Value]) -> Result<(f64, f64, f64), Fault> {
    Ok((
        arg(args, 0, Value::as_double)?,
        arg(args, 1, Value::as_double)?,
        arg(args, 2, Value::as_double)?,
    ))
}

fn train_generator(mut rng: StdRng) -> Generator {
    Box::new(move || {
        (0..3)
            .map(|_| Value::Double(rng.gen::<f64>() * f64::from(rng.gen_range(0..100i32))))
            .collect()
    })
}

fn multiple_generator(mut rng: StdRng) -> Generator {
    Box::new(move || ints(&[rng.gen_range(-100..=100), rng.gen_range(1..=20)]))
}

fn count_generator(mut rng: StdRng) -> Generator {
    Box::new(move || ints(&[rng.gen_range(-10..=1000)]))
}

fn equals_generator(mut rng: StdRng) -> Generator {
    Box::new(move || ints(&[rng.gen_range(1..=500), rng.gen_range(1..=500)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::validate_test_case;

    #[test]
    fn test_reference_solutions() {
        assert_eq!(solve_train_problem(30.0, 30.0, 60.0), 60.0);
        assert_eq!(is_multiple(10, 5), Ok(true));
        assert_eq!(is_multiple(7, 3), Ok(false));
        assert!(is_multiple(1, 0).is_err());
        assert_eq!(is_multiple(i32::MIN, -1), Ok(true));
        assert_eq!(collatz_count(1), 0);
        assert_eq!(collatz_count(27), 111);
        assert_eq!(collatz_count(0), -1);
    }

    #[test]
    fn test_generators_fit_signatures() {
        for problem in problems() {
            let mut generator = (problem.make_generator)(StdRng::seed_from_u64(7));
            for _ in 0..20 {
                let case = generator();
                assert!(
                    validate_test_case(&case, problem.reference.signature()).is_ok(),
                    "{} generated {:?}",
                    problem.name(),
                    case
                );
            }
        }
    }

    #[test]
    fn test_generators_are_deterministic() {
        for problem in problems() {
            let mut a = (problem.make_generator)(StdRng::seed_from_u64(42));
            let mut b = (problem.make_generator)(StdRng::seed_from_u64(42));
            assert_eq!(a(), b());
        }
    }

    #[test]
    fn test_edge_cases_fit_signatures() {
        for problem in problems() {
            for case in &problem.edge_cases {
                assert!(validate_test_case(case, problem.reference.signature()).is_ok());
            }
        }
    }

    #[test]
    fn test_sample_submission_passes() {
        let submission = sample_submission();
        for problem in problems() {
            let mut test = problem
                .method_test(&submission, 5, 1, HarnessConfig::standard())
                .unwrap();
            let results = test.run_all_tests_then_end().unwrap();
            assert!(
                results.iter().all(|r| r.is_success()),
                "{}: {:?}",
                problem.name(),
                results
            );
        }
    }
}
