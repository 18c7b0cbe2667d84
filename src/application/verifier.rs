//! Verification harness: build, stringify and compare against an expected shape.
//!
//! Every failure, including errors raised while building or stringifying, is
//! reported as a failed [`CheckOutcome`]. Nothing is propagated to the caller.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument, warn};

use crate::application::fixtures::{sample_org, SAMPLE_CEO, SAMPLE_EXPECTED};
use crate::domain::{build_tree, stringify, DomainError, OrgTree, Person, TreeResult};

/// Number of shuffled runs after the ordered one.
pub const DEFAULT_SHUFFLE_ROUNDS: u32 = 10;

/// Function under test: turns people into a tree.
pub type BuildFn = fn(&[Person]) -> TreeResult<OrgTree>;

/// Result of one check or of a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub success: bool,
    pub message: Option<String>,
    /// Error raised while building or stringifying, if any
    pub error: Option<DomainError>,
}

impl CheckOutcome {
    pub fn passed() -> Self {
        Self {
            success: true,
            message: None,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            error: None,
        }
    }

    fn raised(error: DomainError) -> Self {
        Self {
            success: false,
            message: Some(format!("Exception occurred generating tree: {error}")),
            error: Some(error),
        }
    }
}

/// Checks a build function against a known org and its expected canonical form.
#[derive(Clone)]
pub struct Verifier {
    employees: Vec<Person>,
    expected: String,
    expected_root: String,
    build: BuildFn,
}

impl Verifier {
    pub fn new(
        employees: Vec<Person>,
        expected: impl Into<String>,
        expected_root: impl Into<String>,
    ) -> Self {
        Self {
            employees,
            expected: expected.into(),
            expected_root: expected_root.into(),
            build: build_tree,
        }
    }

    /// Verifier for the built-in sample organization.
    pub fn sample() -> Self {
        Self::new(sample_org(), SAMPLE_EXPECTED, SAMPLE_CEO)
    }

    /// Replace the function under test.
    pub fn with_builder(mut self, build: BuildFn) -> Self {
        self.build = build;
        self
    }

    pub fn employees(&self) -> &[Person] {
        &self.employees
    }

    /// Check one input ordering.
    #[instrument(level = "debug", skip_all, fields(employees = employees.len()))]
    pub fn check(&self, employees: &[Person]) -> CheckOutcome {
        let tree = match (self.build)(employees) {
            Ok(tree) => tree,
            Err(e) => return CheckOutcome::raised(e),
        };

        let Some(root) = tree.root_person() else {
            warn!(people = tree.len(), "built tree has no root");
            return CheckOutcome::failed("The returned tree has no root");
        };
        if root.name() != self.expected_root {
            return CheckOutcome::failed(format!(
                "Incorrect ceo, expected: {}, actual: {}",
                self.expected_root,
                root.name()
            ));
        }

        let actual = match stringify(&tree) {
            Ok(actual) => actual,
            Err(e) => return CheckOutcome::raised(e),
        };
        debug!(%actual, "stringified");

        if actual != self.expected {
            return CheckOutcome::failed(format!(
                "Incorrect tree, expected: {}, actual: {}",
                self.expected, actual
            ));
        }
        CheckOutcome::passed()
    }

    /// Check the declared order, then up to `shuffle_rounds` shuffled orders.
    ///
    /// Stops at the first failure.
    #[instrument(level = "debug", skip(self, rng))]
    pub fn run<R: Rng>(&self, shuffle_rounds: u32, rng: &mut R) -> CheckOutcome {
        let outcome = self.check(&self.employees);
        if !outcome.success {
            warn!(message = ?outcome.message, "ordered check failed");
            return outcome;
        }

        let mut employees = self.employees.clone();
        for round in 1..=shuffle_rounds {
            employees.shuffle(rng);
            let outcome = self.check(&employees);
            if !outcome.success {
                warn!(round, message = ?outcome.message, "shuffled check failed");
                return CheckOutcome {
                    message: outcome
                        .message
                        .map(|m| format!("{m} (shuffled run {round} of {shuffle_rounds})")),
                    ..outcome
                };
            }
        }

        info!(rounds = shuffle_rounds, "all checks passed");
        CheckOutcome::passed()
    }

    /// Like [`Verifier::run`], seeded for reproducible shuffles when `seed` is given.
    pub fn run_seeded(&self, shuffle_rounds: u32, seed: Option<u64>) -> CheckOutcome {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run(shuffle_rounds, &mut rng)
    }
}

/// Build `employees` and compare against `expected` with the default builder.
pub fn run_check(employees: &[Person], expected: &str, expected_root: &str) -> CheckOutcome {
    Verifier::new(Vec::new(), expected, expected_root).check(employees)
}

/// Verify the default builder on the sample organization.
pub fn run_suite(shuffle_rounds: u32, seed: Option<u64>) -> CheckOutcome {
    Verifier::sample().run_seeded(shuffle_rounds, seed)
}
