//! Harness configuration

use crate::error::{HarnessError, HarnessResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Maps a Rust path prefix onto a dotted package name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceMapping {
    /// Rust path prefix, e.g. `lib_common` or `lib_common::util`
    pub rust_prefix: String,

    /// Package the prefix stands for, e.g. `org.company.lib.common`
    pub package: String,
}

impl NamespaceMapping {
    pub fn new(rust_prefix: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            rust_prefix: rust_prefix.into(),
            package: package.into(),
        }
    }
}

/// Configuration for a conformance harness
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Name shown in reports
    pub suite_name: String,

    /// Separator placed between path segments of qualified names
    pub separator: String,

    /// Rust prefix to package rewrites
    pub namespaces: Vec<NamespaceMapping>,

    /// Test selectors; empty runs everything
    pub selectors: Vec<String>,

    /// Stop at the first failed or errored test
    pub fail_fast: bool,

    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            suite_name: "conformance".to_string(),
            separator: ".".to_string(),
            namespaces: Vec::new(),
            selectors: Vec::new(),
            fail_fast: false,
            log_level: "info".to_string(),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing file yields the default configuration.
    pub fn load(path: impl AsRef<Path>) -> HarnessResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no harness config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> HarnessResult<Self> {
        let config: HarnessConfig =
            toml::from_str(contents).map_err(|e| HarnessError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Add a namespace mapping
    pub fn with_namespace(mut self, rust_prefix: impl Into<String>, package: impl Into<String>) -> Self {
        self.namespaces.push(NamespaceMapping::new(rust_prefix, package));
        self
    }

    /// Set the suite name
    pub fn with_suite_name(mut self, name: impl Into<String>) -> Self {
        self.suite_name = name.into();
        self
    }

    /// Add a test selector
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selectors.push(selector.into());
        self
    }

    /// Check the configuration for unusable values
    pub fn validate(&self) -> HarnessResult<()> {
        if self.separator.is_empty() {
            return Err(HarnessError::Config("separator cannot be empty".into()));
        }

        let mut seen = HashSet::new();
        let mut packages = HashSet::new();
        for mapping in &self.namespaces {
            let valid_prefix = !mapping.rust_prefix.is_empty()
                && mapping.rust_prefix.split("::").all(is_identifier);
            if !valid_prefix {
                return Err(HarnessError::Config(format!(
                    "invalid rust_prefix {:?}",
                    mapping.rust_prefix
                )));
            }
            if !mapping.package.split('.').all(is_identifier) {
                return Err(HarnessError::Config(format!(
                    "invalid package {:?} for {}",
                    mapping.package, mapping.rust_prefix
                )));
            }
            if !seen.insert(mapping.rust_prefix.as_str()) {
                return Err(HarnessError::Config(format!(
                    "duplicate rust_prefix {}",
                    mapping.rust_prefix
                )));
            }
            if !packages.insert(mapping.package.as_str()) {
                return Err(HarnessError::Config(format!(
                    "duplicate package {}",
                    mapping.package
                )));
            }
        }

        // A package nested inside another lets two prefixes produce the same name
        for outer in &packages {
            for inner in &packages {
                if inner.len() > outer.len()
                    && inner.starts_with(*outer)
                    && inner[outer.len()..].starts_with('.')
                {
                    return Err(HarnessError::Config(format!(
                        "package {} overlaps package {}",
                        inner, outer
                    )));
                }
            }
        }

        Ok(())
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    }
}
