//! Class-identity assertion

use crate::config::HarnessConfig;
use crate::error::{AssertionFailure, HarnessError, HarnessResult};
use crate::naming::TypeNamer;
use crate::subject::Subject;

/// Checks that a value's runtime type carries an expected qualified name.
///
/// Matching is exact string equality on the qualified name. Subtypes,
/// wrappers and structurally identical types never match.
#[derive(Debug, Clone, Default)]
pub struct ClassAssertion {
    namer: TypeNamer,
}

impl ClassAssertion {
    /// Create an assertion over a namer
    pub fn new(namer: TypeNamer) -> Self {
        Self { namer }
    }

    /// Create an assertion from harness configuration.
    ///
    /// The configuration is used as given; see [`ClassAssertion::try_from_config`].
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(TypeNamer::from_config(config))
    }

    /// Create an assertion from a configuration that passes validation
    pub fn try_from_config(config: &HarnessConfig) -> HarnessResult<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    /// The namer used to compute actual type names
    pub fn namer(&self) -> &TypeNamer {
        &self.namer
    }

    /// Assert that `instance` is present and named `expected`
    pub fn assert_class(&self, instance: Option<&dyn Subject>, expected: &str) -> HarnessResult<()> {
        if expected.trim().is_empty() {
            return Err(HarnessError::InvalidExpectation(
                "expected type name cannot be empty".into(),
            ));
        }

        let Some(instance) = instance else {
            tracing::debug!(expected, "class assertion got no instance");
            return Err(AssertionFailure::absent(expected).into());
        };

        let actual = self.namer.type_name_of(instance);
        if actual == expected {
            tracing::debug!(expected, "class assertion passed");
            Ok(())
        } else {
            tracing::debug!(expected, actual = %actual, "class assertion failed");
            Err(AssertionFailure::mismatch(expected, actual).into())
        }
    }

    /// Assert that a present value is named `expected`
    pub fn assert_class_of<T: Subject>(&self, instance: &T, expected: &str) -> HarnessResult<()> {
        self.assert_class(Some(instance as &dyn Subject), expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamespaceMapping;

    #[derive(Default)]
    struct Greeting;

    #[derive(Default)]
    struct FarewellMessage;

    fn assertion() -> ClassAssertion {
        ClassAssertion::new(TypeNamer::new(
            ".",
            &[NamespaceMapping::new(
                "class_conformance::assertion::tests",
                "org.example.util",
            )],
        ))
    }

    fn failure(result: HarnessResult<()>) -> AssertionFailure {
        match result {
            Err(HarnessError::Assertion(failure)) => failure,
            other => panic!("expected assertion failure, got {:?}", other),
        }
    }

    #[test]
    fn test_matching_name_passes() {
        assert!(assertion()
            .assert_class_of(&Greeting, "org.example.util.Greeting")
            .is_ok());
    }

    #[test]
    fn test_mismatch_carries_both_names() {
        let failure = failure(
            assertion().assert_class_of(&Greeting, "org.example.util.FarewellMessage"),
        );
        assert_eq!(failure.expected, "org.example.util.FarewellMessage");
        assert_eq!(failure.actual.as_deref(), Some("org.example.util.Greeting"));
    }

    #[test]
    fn test_absent_instance_fails() {
        let failure = failure(assertion().assert_class(None, "org.example.util.Greeting"));
        assert_eq!(failure.expected, "org.example.util.Greeting");
        assert!(failure.actual.is_none());
    }

    #[test]
    fn test_empty_expectation_is_an_error() {
        let err = assertion().assert_class_of(&Greeting, "  ").unwrap_err();
        assert!(matches!(err, HarnessError::InvalidExpectation(_)));
    }

    #[test]
    fn test_no_structural_matching() {
        // Same shape, different type
        let failure = failure(assertion().assert_class_of(&FarewellMessage, "org.example.util.Greeting"));
        assert_eq!(
            failure.actual.as_deref(),
            Some("org.example.util.FarewellMessage")
        );
    }

    #[test]
    fn test_trait_object_uses_dynamic_type() {
        let boxed: Box<dyn Subject> = Box::new(Greeting);
        assert!(assertion()
            .assert_class(Some(&*boxed), "org.example.util.Greeting")
            .is_ok());
    }

    #[test]
    fn test_try_from_config_rejects_invalid_config() {
        let config = HarnessConfig {
            separator: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            ClassAssertion::try_from_config(&config),
            Err(HarnessError::Config(_))
        ));
    }

    #[test]
    fn test_shared_package_cannot_alias_types() {
        let config = HarnessConfig::default()
            .with_namespace("class_conformance::assertion::tests", "org.example")
            .with_namespace("class_conformance::assertion", "org.example");
        assert!(ClassAssertion::try_from_config(&config).is_err());
    }

    #[test]
    fn test_suffix_does_not_match() {
        assert!(assertion().assert_class_of(&Greeting, "Greeting").is_err());
    }
}
