use crate::types::FailureReason;
use regex::Regex;
use std::sync::LazyLock;

const REQUIRES_PYTHON: &str = "Requires-Python";
const NO_SATISFYING_VERSION: &str =
    "Could not find a version that satisfies the requirement";
const NO_MATCHING_DISTRIBUTION: &str = "No matching distribution found";
const UNSUPPORTED_WHEEL: &str = "is not a supported wheel on this platform";
const INVALID_REQUIREMENT: &str = "ERROR: Invalid requirement:";
const SYNTAX_ERROR: &str = "SyntaxError";

static NO_SATISFYING_VERSION_PACKAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:😕 )?Could not find a version that satisfies the requirement (\S+)",
    )
    .expect("Invalid package name pattern")
});

static INVALID_REQUIREMENT_QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ERROR: Invalid requirement: '(.+?)'")
        .expect("Invalid requirement pattern")
});

/// Maps pip's stderr to a reason an operator can act on.
///
/// Rules are checked in order and the first one that yields a reason wins,
/// so a general marker earlier in the list shadows a more specific one
/// further down. The two rules that extract a name from the text fall
/// through to the next rule when the extraction fails.
pub fn classify(stderr: &str) -> FailureReason {
    if stderr.contains(REQUIRES_PYTHON) {
        return FailureReason::InterpreterVersion;
    }

    if stderr.contains(NO_SATISFYING_VERSION) {
        if let Some(package) = NO_SATISFYING_VERSION_PACKAGE
            .captures(stderr)
            .and_then(|c| c.get(1))
        {
            return FailureReason::PackageNotFound {
                package: package.as_str().trim().to_string(),
            };
        }
    }

    if stderr.contains(NO_MATCHING_DISTRIBUTION) {
        return FailureReason::NoMatchingDistribution;
    }

    if stderr.contains(UNSUPPORTED_WHEEL) {
        return FailureReason::UnsupportedWheel;
    }

    if stderr.contains(INVALID_REQUIREMENT) {
        if let Some(requirement) = INVALID_REQUIREMENT_QUOTED
            .captures(stderr)
            .and_then(|c| c.get(1))
        {
            return FailureReason::InvalidRequirement {
                requirement: requirement.as_str().to_string(),
            };
        }
    }

    if stderr.contains(SYNTAX_ERROR) {
        return FailureReason::SyntaxError;
    }

    FailureReason::Unknown
}
