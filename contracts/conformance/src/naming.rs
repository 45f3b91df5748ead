//! Qualified type names
//!
//! Rust reports type names as `::`-separated paths rooted at the crate name.
//! [`TypeNamer`] rewrites those paths into the dotted, package-rooted form
//! that class-identity expectations are written in.

use crate::config::{HarnessConfig, NamespaceMapping};
use crate::subject::{runtime_type_name, Subject};

#[derive(Debug, Clone)]
struct Rule {
    prefix: Vec<String>,
    package: Vec<String>,
}

/// Turns Rust type paths into qualified names
#[derive(Debug, Clone)]
pub struct TypeNamer {
    separator: String,
    // Sorted longest prefix first
    rules: Vec<Rule>,
}

impl TypeNamer {
    /// A namer with the given separator and namespace mappings
    pub fn new(separator: impl Into<String>, mappings: &[NamespaceMapping]) -> Self {
        let mut rules: Vec<Rule> = mappings
            .iter()
            .map(|m| Rule {
                prefix: m.rust_prefix.split("::").map(str::to_string).collect(),
                package: m
                    .package
                    .split('.')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            })
            .collect();
        rules.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));

        Self {
            separator: separator.into(),
            rules,
        }
    }

    /// A namer built from harness configuration
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(config.separator.clone(), &config.namespaces)
    }

    /// Qualified runtime type name of a value
    pub fn type_name_of(&self, value: &dyn Subject) -> String {
        self.qualify(runtime_type_name(value))
    }

    /// Rewrite every path inside a raw Rust type name
    pub fn qualify(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        let mut segments: Vec<&str> = Vec::new();
        let mut start: Option<usize> = None;
        let mut chars = raw.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if c.is_alphanumeric() || c == '_' {
                if start.is_none() {
                    start = Some(i);
                }
                continue;
            }

            if let Some(s) = start.take() {
                segments.push(&raw[s..i]);
            }

            if c == ':' && !segments.is_empty() && matches!(chars.peek(), Some((_, ':'))) {
                chars.next();
                let continues_path =
                    matches!(chars.peek(), Some((_, n)) if n.is_alphanumeric() || *n == '_');
                if !continues_path {
                    // e.g. `f::{{closure}}`
                    self.flush(&mut segments, &mut out);
                    out.push_str(&self.separator);
                }
                continue;
            }

            self.flush(&mut segments, &mut out);
            out.push(c);
        }

        if let Some(s) = start {
            segments.push(&raw[s..]);
        }
        self.flush(&mut segments, &mut out);

        out
    }

    fn flush(&self, segments: &mut Vec<&str>, out: &mut String) {
        if segments.is_empty() {
            return;
        }

        let rule = self.rules.iter().find(|rule| {
            rule.prefix.len() <= segments.len()
                && rule.prefix.iter().zip(segments.iter()).all(|(p, s)| p == s)
        });

        let translated: Vec<&str> = match rule {
            Some(rule) => rule
                .package
                .iter()
                .map(String::as_str)
                .chain(segments[rule.prefix.len()..].iter().copied())
                .collect(),
            None => segments.clone(),
        };

        out.push_str(&translated.join(self.separator.as_str()));
        segments.clear();
    }
}

impl Default for TypeNamer {
    fn default() -> Self {
        Self::from_config(&HarnessConfig::default())
    }
}
