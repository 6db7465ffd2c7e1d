use serde_json::{Value, json};
use std::fmt::{self, Display};

/// Why a single environment could not be set up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    MissingManifest { manifest: String },
    EnvironmentCreation { detail: String },
    InterpreterVersion,
    PackageNotFound { package: String },
    NoMatchingDistribution,
    UnsupportedWheel,
    InvalidRequirement { requirement: String },
    SyntaxError,
    Unknown,
    Unexpected { detail: String },
}

impl FailureReason {
    /// Decoration printed in front of the reason. Purely cosmetic.
    pub fn symbol(&self) -> &'static str {
        match self {
            FailureReason::MissingManifest { .. } => "❌",
            FailureReason::EnvironmentCreation { .. } => "🐍",
            FailureReason::InterpreterVersion => "🐍",
            FailureReason::PackageNotFound { .. } => "😕",
            FailureReason::NoMatchingDistribution => "🚫",
            FailureReason::UnsupportedWheel => "⚠️",
            FailureReason::InvalidRequirement { .. } => "❌",
            FailureReason::SyntaxError => "❗",
            FailureReason::Unknown => "❓",
            FailureReason::Unexpected { .. } => "⚠️",
        }
    }

    pub fn decorated(&self) -> String {
        format!("{} {}", self.symbol(), self)
    }
}

impl Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::MissingManifest { manifest } => {
                write!(f, "Missing {}", manifest)
            }
            FailureReason::EnvironmentCreation { detail } => {
                write!(f, "Failed to create virtual environment: {}", detail)
            }
            FailureReason::InterpreterVersion => {
                write!(f, "Package requires a different Python version!")
            }
            FailureReason::PackageNotFound { package } => write!(
                f,
                "Failed to download '{}' (not found or incompatible)",
                package
            ),
            FailureReason::NoMatchingDistribution => write!(
                f,
                "Package not available for this Python version or platform"
            ),
            FailureReason::UnsupportedWheel => {
                write!(f, "Incompatible wheel or architecture")
            }
            FailureReason::InvalidRequirement { requirement } => write!(
                f,
                "Invalid syntax or bad package name: '{}'",
                requirement
            ),
            FailureReason::SyntaxError => {
                write!(f, "Python script error (check for syntax issues)")
            }
            FailureReason::Unknown => write!(f, "Unknown installation error"),
            FailureReason::Unexpected { detail } => write!(f, "{}", detail),
        }
    }
}

/// One environment that failed, in the order it was processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub path: String,
    pub reason: FailureReason,
}

impl FailureRecord {
    pub fn new(path: impl Into<String>, reason: FailureReason) -> Self {
        Self {
            path: path.into(),
            reason,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "path": self.path,
            "reason": self.reason.to_string(),
        })
    }
}
