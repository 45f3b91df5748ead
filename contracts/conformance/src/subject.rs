//! Values under test and their runtime type names

use crate::error::{HarnessError, HarnessResult};
use std::any::Any;
use std::fmt::Display;

/// A value whose runtime type can be named.
///
/// Implemented for every `'static` sized type. Calls through `&dyn Subject`
/// resolve to the concrete type behind the trait object.
pub trait Subject: Any {
    /// Raw Rust path of the concrete type, e.g. `lib_common::util::Greeting`
    fn rust_type_name(&self) -> &'static str;
}

impl<T: Any> Subject for T {
    fn rust_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Runtime type name of a value, as reported by the compiler.
///
/// This is the only place the harness asks the type system for a name.
pub fn runtime_type_name(value: &dyn Subject) -> &'static str {
    Subject::rust_type_name(value)
}

/// Build a fresh default-initialised subject
pub fn construct<T: Default>() -> T {
    T::default()
}

/// Build a subject with a fallible constructor.
///
/// A constructor error becomes [`HarnessError::Construction`], which the
/// invoking test case reports as an error rather than a failure.
pub fn try_construct<T, E, F>(subject: &str, build: F) -> HarnessResult<T>
where
    F: FnOnce() -> Result<T, E>,
    E: Display,
{
    build().map_err(|e| HarnessError::Construction {
        subject: subject.to_string(),
        reason: e.to_string(),
    })
}
