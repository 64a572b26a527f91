//! Shared test helpers for `tempowire-core` integration tests.

#![allow(dead_code)]

use std::sync::Once;

use serde_json::Value;
use tempowire_core::Envelope;

static TRACING: Once = Once::new();

/// Install a test subscriber once per binary so codec logs show up with
/// `--nocapture`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("tempowire_core=trace")
            .with_test_writer()
            .try_init();
    });
}

/// Unwrap a `json!` object literal into an envelope.
pub fn envelope(value: Value) -> Envelope {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture must be a JSON object, got {other}"),
    }
}
