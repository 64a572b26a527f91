//! Common utility functions
//!
//! - **[`json`]**: Helpers for inspecting loosely-typed `serde_json` values

pub mod json;

pub use self::json::{as_integer, kind_name};
