//! Test case registration and invocation

use crate::error::{HarnessError, HarnessResult};
use crate::reports::{Outcome, TestResult};
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

/// Zero-argument check run by a test case
pub type Check = Box<dyn Fn() -> HarnessResult<()> + Send + Sync>;

/// A named, independently executable check
pub struct TestCase {
    name: String,
    check: Check,
}

impl TestCase {
    /// Create a test case with an explicit name
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn() -> HarnessResult<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Box::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the check once.
    ///
    /// Failures, errors and panics are all captured in the returned result.
    pub fn invoke(&self) -> TestResult {
        let start = Instant::now();
        let caught = panic::catch_unwind(AssertUnwindSafe(|| (self.check)()));
        let duration = start.elapsed();

        let result = match caught {
            Ok(Ok(())) => TestResult::passed(self.name.clone(), duration),
            Ok(Err(HarnessError::Assertion(failure))) => {
                TestResult::failed(self.name.clone(), failure, duration)
            }
            Ok(Err(err)) => TestResult::errored(self.name.clone(), err.to_string(), duration),
            Err(payload) => TestResult::errored(
                self.name.clone(),
                format!("panicked: {}", panic_message(&*payload)),
                duration,
            ),
        };

        match &result.outcome {
            Outcome::Pass => tracing::debug!(test = %self.name, ?duration, "test passed"),
            Outcome::Fail { expected, actual } => tracing::warn!(
                test = %self.name,
                expected = %expected,
                actual = actual.as_deref().unwrap_or("<no instance>"),
                "test failed"
            ),
            Outcome::Error { cause } => {
                tracing::warn!(test = %self.name, cause = %cause, "test errored")
            }
            Outcome::Skipped { .. } => {}
        }

        result
    }
}

impl std::fmt::Debug for TestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCase").field("name", &self.name).finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Build a [`TestCase`] named after the function and the module declaring it.
///
/// `test_case!(greeting_is_constructible)` inside `lib_common::checks` is
/// registered as `lib_common::checks::greeting_is_constructible`.
#[macro_export]
macro_rules! test_case {
    ($check:ident) => {
        $crate::framework::TestCase::new(
            concat!(module_path!(), "::", stringify!($check)),
            $check,
        )
    };
}

/// Explicitly registered test cases, kept in registration order
#[derive(Debug, Default)]
pub struct TestRegistry {
    cases: Vec<TestCase>,
    index: HashMap<String, usize>,
}

impl TestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a test case
    pub fn register(&mut self, case: TestCase) -> HarnessResult<()> {
        if case.name.trim().is_empty() {
            return Err(HarnessError::InvalidTestName(case.name));
        }
        if self.index.contains_key(&case.name) {
            return Err(HarnessError::DuplicateTestCase(case.name));
        }

        tracing::debug!(test = %case.name, "registered test case");
        self.index.insert(case.name.clone(), self.cases.len());
        self.cases.push(case);
        Ok(())
    }

    /// Register a closure under an explicit name
    pub fn register_fn<F>(&mut self, name: impl Into<String>, check: F) -> HarnessResult<()>
    where
        F: Fn() -> HarnessResult<()> + Send + Sync + 'static,
    {
        self.register(TestCase::new(name, check))
    }

    pub fn get(&self, name: &str) -> Option<&TestCase> {
        self.index.get(name).map(|&i| &self.cases[i])
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(|c| c.name.as_str())
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Test cases matching a selector.
    ///
    /// - `a::b::name` selects one case
    /// - `a::b::*` selects the cases declared directly in `a::b`
    /// - `a::b::**` selects every case under `a::b`
    pub fn select(&self, selector: &str) -> Vec<&TestCase> {
        self.cases
            .iter()
            .filter(|case| selector_matches(selector, &case.name))
            .collect()
    }

    /// Invoke one registered test case by name
    pub fn run(&self, name: &str) -> HarnessResult<TestResult> {
        self.get(name)
            .map(TestCase::invoke)
            .ok_or_else(|| HarnessError::UnknownTestCase(name.to_string()))
    }
}

pub(crate) fn selector_matches(selector: &str, name: &str) -> bool {
    if let Some(module) = selector.strip_suffix("::**") {
        name.strip_prefix(module)
            .is_some_and(|rest| rest.starts_with("::"))
    } else if let Some(module) = selector.strip_suffix("::*") {
        name.strip_prefix(module)
            .and_then(|rest| rest.strip_prefix("::"))
            .is_some_and(|leaf| !leaf.is_empty() && !leaf.contains("::"))
    } else {
        selector == name
    }
}
