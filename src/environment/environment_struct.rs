use crate::config::Config;
use crate::util::resolve_path;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Where one requested environment lives on disk.
pub struct Environment {
    /// What the operator typed
    pub request: String,
    /// Absolute location of the request
    pub base: PathBuf,
    pub manifest: PathBuf,
    pub venv: PathBuf,
    pub python: String,
}

impl Environment {
    pub fn from_request(request: &str, config: &Config) -> Result<Self> {
        let base = resolve_path(request)
            .context(format!("failed to resolve path '{}'", request))?;

        Ok(Self {
            request: request.to_string(),
            manifest: base.join(&config.manifest),
            venv: base.join(&config.env_dir),
            base,
            python: config.python.clone(),
        })
    }

    pub fn has_manifest(&self) -> bool {
        self.manifest.exists()
    }

    /// pip inside the virtual environment.
    pub fn installer(&self) -> PathBuf {
        if cfg!(windows) {
            self.venv.join("Scripts").join("pip.exe")
        } else {
            self.venv.join("bin").join("pip")
        }
    }

    pub fn display_path(&self) -> String {
        self.base.display().to_string()
    }
}
