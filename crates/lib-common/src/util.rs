//! General-purpose utility types

/// A greeting.
///
/// Carries no state; constructing one always succeeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Greeting;

impl Greeting {
    pub fn new() -> Self {
        Self
    }
}
