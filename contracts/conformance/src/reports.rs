//! Test outcomes and suite reporting

use crate::error::AssertionFailure;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Test status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestStatus {
    Passed,
    Failed,
    Errored,
    Skipped,
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestStatus::Passed => write!(f, "PASS"),
            TestStatus::Failed => write!(f, "FAIL"),
            TestStatus::Errored => write!(f, "ERROR"),
            TestStatus::Skipped => write!(f, "SKIP"),
        }
    }
}

/// What a single test invocation reports back to its runner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Pass,
    /// The class assertion did not hold; `actual` is `None` for a missing instance
    Fail {
        expected: String,
        actual: Option<String>,
    },
    /// The check could not complete
    Error { cause: String },
    Skipped { reason: String },
}

impl Outcome {
    pub fn status(&self) -> TestStatus {
        match self {
            Outcome::Pass => TestStatus::Passed,
            Outcome::Fail { .. } => TestStatus::Failed,
            Outcome::Error { .. } => TestStatus::Errored,
            Outcome::Skipped { .. } => TestStatus::Skipped,
        }
    }
}

impl From<AssertionFailure> for Outcome {
    fn from(failure: AssertionFailure) -> Self {
        Outcome::Fail {
            expected: failure.expected,
            actual: failure.actual,
        }
    }
}

/// Individual test result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub outcome: Outcome,
    pub duration: Duration,
}

impl TestResult {
    /// Create a passed test result
    pub fn passed(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Pass,
            duration,
        }
    }

    /// Create a failed test result
    pub fn failed(name: impl Into<String>, failure: AssertionFailure, duration: Duration) -> Self {
        Self {
            name: name.into(),
            outcome: failure.into(),
            duration,
        }
    }

    /// Create an errored test result
    pub fn errored(name: impl Into<String>, cause: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Error {
                cause: cause.into(),
            },
            duration,
        }
    }

    /// Create a skipped test result
    pub fn skipped(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Skipped {
                reason: reason.into(),
            },
            duration: Duration::ZERO,
        }
    }

    pub fn status(&self) -> TestStatus {
        self.outcome.status()
    }

    pub fn is_pass(&self) -> bool {
        self.outcome == Outcome::Pass
    }
}

/// Report summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub skipped: usize,
    pub success: bool,
}

/// Results of one harness run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub suite_name: String,
    pub timestamp: DateTime<Utc>,
    pub duration: Duration,
    pub results: Vec<TestResult>,
    pub summary: ReportSummary,
}

impl SuiteReport {
    /// Create a new report
    pub fn new(suite_name: impl Into<String>) -> Self {
        Self {
            suite_name: suite_name.into(),
            timestamp: Utc::now(),
            duration: Duration::ZERO,
            results: Vec::new(),
            summary: ReportSummary::default(),
        }
    }

    /// Record a result
    pub fn push(&mut self, result: TestResult) {
        self.results.push(result);
    }

    /// Compute the summary from recorded results
    pub fn finalize(&mut self) {
        let mut summary = ReportSummary {
            total: self.results.len(),
            ..Default::default()
        };

        for result in &self.results {
            match result.status() {
                TestStatus::Passed => summary.passed += 1,
                TestStatus::Failed => summary.failed += 1,
                TestStatus::Errored => summary.errored += 1,
                TestStatus::Skipped => summary.skipped += 1,
            }
        }

        summary.success = summary.failed == 0 && summary.errored == 0;
        self.summary = summary;
    }

    pub fn is_success(&self) -> bool {
        self.summary.success
    }

    /// Look up a result by test name
    pub fn result(&self, name: &str) -> Option<&TestResult> {
        self.results.iter().find(|r| r.name == name)
    }

    /// Generate a text report
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Suite: {} ({})\n",
            self.suite_name,
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        for result in &self.results {
            output.push_str(&format!(
                "  [{}] {} ({:?})\n",
                result.status(),
                result.name,
                result.duration
            ));

            match &result.outcome {
                Outcome::Fail { expected, actual } => {
                    output.push_str(&format!("      expected: {}\n", expected));
                    output.push_str(&format!(
                        "      actual:   {}\n",
                        actual.as_deref().unwrap_or("<no instance>")
                    ));
                }
                Outcome::Error { cause } => {
                    output.push_str(&format!("      cause: {}\n", cause));
                }
                Outcome::Skipped { reason } => {
                    output.push_str(&format!("      reason: {}\n", reason));
                }
                Outcome::Pass => {}
            }
        }

        output.push_str(&format!(
            "Total: {}  Passed: {}  Failed: {}  Errors: {}  Skipped: {}  ({:?})\n",
            self.summary.total,
            self.summary.passed,
            self.summary.failed,
            self.summary.errored,
            self.summary.skipped,
            self.duration
        ));
        output.push_str(if self.summary.success { "OK\n" } else { "FAILURES!\n" });

        output
    }

    /// Generate JSON report
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passed_result() {
        let result = TestResult::passed("test_name", Duration::from_millis(100));
        assert_eq!(result.status(), TestStatus::Passed);
        assert!(result.is_pass());
    }

    #[test]
    fn test_failed_result_carries_names() {
        let result = TestResult::failed(
            "test_name",
            AssertionFailure::mismatch("a.B", "a.C"),
            Duration::ZERO,
        );
        assert_eq!(
            result.outcome,
            Outcome::Fail {
                expected: "a.B".into(),
                actual: Some("a.C".into())
            }
        );
        assert_eq!(result.status(), TestStatus::Failed);
    }

    #[test]
    fn test_report_finalize() {
        let mut report = SuiteReport::new("test");
        report.push(TestResult::passed("test1", Duration::ZERO));
        report.push(TestResult::failed(
            "test2",
            AssertionFailure::absent("a.B"),
            Duration::ZERO,
        ));
        report.push(TestResult::errored("test3", "boom", Duration::ZERO));
        report.push(TestResult::skipped("test4", "fail fast"));
        report.finalize();

        assert_eq!(report.summary.total, 4);
        assert_eq!(report.summary.passed, 1);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.errored, 1);
        assert_eq!(report.summary.skipped, 1);
        assert!(!report.is_success());
    }

    #[test]
    fn test_skips_alone_are_success() {
        let mut report = SuiteReport::new("test");
        report.push(TestResult::skipped("test1", "filtered"));
        report.finalize();
        assert!(report.is_success());
    }

    #[test]
    fn test_report_to_text() {
        let mut report = SuiteReport::new("lib-common");
        report.push(TestResult::failed(
            "greeting_class",
            AssertionFailure::mismatch("a.Farewell", "a.Greeting"),
            Duration::from_millis(1),
        ));
        report.finalize();

        let text = report.to_text();
        assert!(text.contains("lib-common"));
        assert!(text.contains("[FAIL] greeting_class"));
        assert!(text.contains("expected: a.Farewell"));
        assert!(text.contains("actual:   a.Greeting"));
        assert!(text.contains("FAILURES!"));
    }

    #[test]
    fn test_report_to_json() {
        let mut report = SuiteReport::new("json");
        report.push(TestResult::passed("ok", Duration::ZERO));
        report.finalize();

        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["results"][0]["outcome"]["outcome"], "pass");
        assert_eq!(value["summary"]["success"], true);
    }
}
