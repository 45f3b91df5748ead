//! Common utilities shared across company libraries.
//!
//! Types in this crate are published under the [`PACKAGE`] namespace, so
//! `lib_common::util::Greeting` is known elsewhere as
//! `org.company.lib.common.util.Greeting`.

pub mod util;

/// Package name this crate's root module is published under
pub const PACKAGE: &str = "org.company.lib.common";

/// Rust path of this crate's root module
pub const RUST_ROOT: &str = module_path!();
