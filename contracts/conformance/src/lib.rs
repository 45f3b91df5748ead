//! Class-Identity Conformance Harness
//!
//! Verifies that a constructed value's runtime type carries an expected,
//! fully-qualified type name such as `org.company.lib.common.util.Greeting`.
//!
//! # Pieces
//!
//! - **Subjects**: any `'static` value; [`subject::runtime_type_name`] is the
//!   single point where the compiler's type name is read
//! - **Naming**: [`TypeNamer`] maps Rust paths onto dotted package names
//! - **Assertion**: [`ClassAssertion::assert_class`] compares names exactly
//! - **Registration**: checks are registered by name in a [`TestRegistry`],
//!   either explicitly or through [`test_case!`]
//! - **Outcomes**: each invocation yields PASS, FAIL(expected, actual) or
//!   ERROR(cause); [`TestHarness`] collects them into a [`SuiteReport`]
//!
//! # Example
//!
//! ```rust,ignore
//! use class_conformance::{HarnessConfig, TestHarness};
//!
//! let config = HarnessConfig::default()
//!     .with_namespace("lib_common", "org.company.lib.common");
//! let mut harness = TestHarness::with_config(config);
//! harness.register_check("greeting_class", |a| {
//!     a.assert_class_of(&Greeting::new(), "org.company.lib.common.util.Greeting")
//! })?;
//! harness.assert_all_pass();
//! ```

#![deny(unsafe_code)]

pub mod assertion;
pub mod config;
pub mod error;
pub mod framework;
pub mod harness;
pub mod naming;
pub mod reports;
pub mod subject;

pub use assertion::ClassAssertion;
pub use config::{HarnessConfig, NamespaceMapping};
pub use error::{AssertionFailure, HarnessError, HarnessResult};
pub use framework::{TestCase, TestRegistry};
pub use harness::{init_tracing, TestHarness};
pub use naming::TypeNamer;
pub use reports::{Outcome, ReportSummary, SuiteReport, TestResult, TestStatus};
pub use subject::{construct, runtime_type_name, try_construct, Subject};
