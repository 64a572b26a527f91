//! Testing utilities and helpers
//!
//! - **[`assertions`]**: Assertion macros and functions for codec test suites
//!
//! Macros exported with `#[macro_export]` are available at the crate root.

pub mod assertions;

#[cfg(feature = "foundation")]
pub use assertions::assert_field_error;
