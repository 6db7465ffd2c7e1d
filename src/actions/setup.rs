use crate::config::Config;
use crate::environment::build;
use crate::outln;
use crate::types::{FailureReason, FailureRecord};
use crate::util::set_json_output;
use log::{trace, warn};
use serde_json::Value;

/// Builds every requested environment in order and returns the failures in
/// the order they happened. A failing environment never stops the run.
pub fn setup(config: &Config, paths: &[String]) -> Vec<FailureRecord> {
    outln!("\n🚀 Activating setup sequence.\n");

    let mut failures = Vec::new();
    for (idx, path) in paths.iter().enumerate() {
        outln!("\n🔧 Setting up environment {}/{}", idx + 1, paths.len());
        trace!("Building environment for '{}'", path);

        if let Err(e) = build(path, config, &mut failures) {
            warn!("Unexpected error at {}: {:#}", path, e);
            outln!("⚠️ Unexpected error at {}: {:#}", path, e);
            failures.push(FailureRecord::new(
                path.clone(),
                FailureReason::Unexpected {
                    detail: format!("{:#}", e),
                },
            ));
        }
    }

    failures
}

pub fn summarize(requested: usize, failures: &[FailureRecord]) {
    outln!("\n🏁 Done!");
    if failures.is_empty() {
        outln!("🎉 All environments created successfully!");
    } else {
        outln!("⚠️ Some environments had issues:");
        for failure in failures {
            outln!(" - ❌ {} ➜ {}", failure.path, failure.reason.decorated());
        }
    }

    set_json_output(
        "status",
        &Value::String(
            if failures.is_empty() { "success" } else { "failure" }.to_string(),
        ),
    );
    set_json_output("requested", &Value::from(requested));
    set_json_output(
        "failed",
        &Value::Array(failures.iter().map(FailureRecord::to_json).collect()),
    );
}
