//! Test harness for running class-identity checks

use crate::assertion::ClassAssertion;
use crate::config::HarnessConfig;
use crate::error::HarnessResult;
use crate::framework::{selector_matches, TestCase, TestRegistry};
use crate::reports::{SuiteReport, TestResult};
use std::time::Instant;
use tracing_subscriber::prelude::*;

/// Install a console subscriber for harness logs.
///
/// `RUST_LOG` takes precedence over the configured level. Calling this more
/// than once is harmless.
pub fn init_tracing(config: &HarnessConfig) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_test_writer())
        .try_init();
}

/// Test harness for class-identity conformance
pub struct TestHarness {
    config: HarnessConfig,
    registry: TestRegistry,
    assertion: ClassAssertion,
}

impl TestHarness {
    /// Create a new test harness with default configuration
    pub fn new() -> Self {
        Self::with_config(HarnessConfig::default())
    }

    /// Create a test harness with custom configuration.
    ///
    /// The configuration is not rejected here; an invalid one is logged and
    /// used as given. Use [`TestHarness::try_with_config`] to refuse it.
    pub fn with_config(config: HarnessConfig) -> Self {
        if let Err(err) = config.validate() {
            tracing::warn!(error = %err, "invalid harness configuration, type names may not qualify");
        }
        let assertion = ClassAssertion::from_config(&config);
        Self {
            config,
            registry: TestRegistry::new(),
            assertion,
        }
    }

    /// Create a test harness from a validated configuration
    pub fn try_with_config(config: HarnessConfig) -> HarnessResult<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Assertion configured with this harness's namespaces, for checks to capture
    pub fn assertion(&self) -> ClassAssertion {
        self.assertion.clone()
    }

    pub fn registry(&self) -> &TestRegistry {
        &self.registry
    }

    /// Register a test case
    pub fn register(&mut self, case: TestCase) -> HarnessResult<()> {
        self.registry.register(case)
    }

    /// Register a check that receives this harness's assertion
    pub fn register_check<F>(&mut self, name: impl Into<String>, check: F) -> HarnessResult<()>
    where
        F: Fn(&ClassAssertion) -> HarnessResult<()> + Send + Sync + 'static,
    {
        let assertion = self.assertion();
        self.registry.register_fn(name, move || check(&assertion))
    }

    fn is_selected(&self, case: &TestCase) -> bool {
        self.config.selectors.is_empty()
            || self
                .config
                .selectors
                .iter()
                .any(|selector| selector_matches(selector, case.name()))
    }

    /// Run the selected test cases and collect a report.
    ///
    /// Every selected case runs unless `fail_fast` is set, in which case the
    /// cases after the first non-passing one are reported as skipped.
    pub fn run(&self) -> SuiteReport {
        let start = Instant::now();
        let mut report = SuiteReport::new(self.config.suite_name.clone());

        let selected: Vec<&TestCase> = self
            .registry
            .cases()
            .iter()
            .filter(|case| self.is_selected(case))
            .collect();

        tracing::info!(
            suite = %self.config.suite_name,
            selected = selected.len(),
            registered = self.registry.len(),
            "starting test suite"
        );

        let mut halted = false;
        for case in selected {
            if halted {
                report.push(TestResult::skipped(case.name(), "fail-fast after earlier failure"));
                continue;
            }

            let result = case.invoke();
            if self.config.fail_fast && !result.is_pass() {
                halted = true;
            }
            report.push(result);
        }

        report.duration = start.elapsed();
        report.finalize();

        tracing::info!(
            suite = %self.config.suite_name,
            passed = report.summary.passed,
            failed = report.summary.failed,
            errored = report.summary.errored,
            skipped = report.summary.skipped,
            "test suite complete"
        );

        report
    }

    /// Run the suite and panic with the text report if anything failed
    pub fn assert_all_pass(&self) {
        let report = self.run();

        if !report.is_success() {
            panic!(
                "Suite '{}' did not pass:\n{}",
                report.suite_name,
                report.to_text()
            );
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HarnessError;
    use crate::reports::{Outcome, TestStatus};

    struct Gadget;

    fn config() -> HarnessConfig {
        HarnessConfig::default()
            .with_suite_name("harness")
            .with_namespace("class_conformance::harness::tests", "org.example")
    }

    fn harness(config: HarnessConfig) -> TestHarness {
        let mut harness = TestHarness::with_config(config);
        harness
            .register_check("suite::gadget", |a| a.assert_class_of(&Gadget, "org.example.Gadget"))
            .unwrap();
        harness
            .register_check("suite::wrong", |a| a.assert_class_of(&Gadget, "org.example.Other"))
            .unwrap();
        harness
            .register_check("other::gadget", |a| a.assert_class_of(&Gadget, "org.example.Gadget"))
            .unwrap();
        harness
    }

    #[test]
    fn test_harness_creation() {
        let harness = TestHarness::new();
        assert!(harness.registry().is_empty());
        assert_eq!(harness.config().suite_name, "conformance");
    }

    #[test]
    fn test_try_with_invalid_config() {
        let config = HarnessConfig {
            separator: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            TestHarness::try_with_config(config.clone()),
            Err(HarnessError::Config(_))
        ));

        // Unchecked construction still builds, using the config as given
        let harness = TestHarness::with_config(config);
        assert!(harness.config().separator.is_empty());
    }

    #[test]
    fn test_run_continues_after_failure() {
        init_tracing(&HarnessConfig::default());
        let report = harness(config()).run();

        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.passed, 2);
        assert_eq!(report.summary.failed, 1);
        assert!(!report.is_success());
        assert_eq!(
            report.result("suite::wrong").map(|r| r.outcome.clone()),
            Some(Outcome::Fail {
                expected: "org.example.Other".into(),
                actual: Some("org.example.Gadget".into()),
            })
        );
    }

    #[test]
    fn test_fail_fast_skips_remaining() {
        let config = HarnessConfig {
            fail_fast: true,
            ..config()
        };
        let report = harness(config).run();

        assert_eq!(report.summary.passed, 1);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.skipped, 1);
        assert_eq!(
            report.result("other::gadget").map(|r| r.status()),
            Some(TestStatus::Skipped)
        );
    }

    #[test]
    fn test_selectors_filter_cases() {
        let report = harness(config().with_selector("other::*")).run();
        assert_eq!(report.summary.total, 1);
        assert!(report.is_success());
    }

    #[test]
    fn test_assert_all_pass_on_passing_suite() {
        harness(config().with_selector("suite::gadget")).assert_all_pass();
    }

    #[test]
    #[should_panic(expected = "did not pass")]
    fn test_assert_all_pass_panics_on_failure() {
        harness(config()).assert_all_pass();
    }
}
