mod builder;
mod classifier;
mod create;
mod delete;
mod environment_struct;
mod install;

pub use builder::*;
pub use classifier::*;
pub use environment_struct::*;

use std::process::Output;

/// Captured stderr of a failed child, or its exit status if it said nothing.
pub(crate) fn process_failure_detail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        output.status.to_string()
    } else {
        stderr.to_string()
    }
}
