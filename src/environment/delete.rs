use crate::environment::Environment;
use anyhow::{Context, Result};
use log::{debug, trace};

impl Environment {
    /// Removes a previous virtual environment, if there is one. Returns
    /// whether anything was removed.
    pub fn remove_existing(&self) -> Result<bool> {
        let metadata = match std::fs::symlink_metadata(&self.venv) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No existing environment at {}", self.venv.display());
                return Ok(false);
            }
            Err(e) => {
                return Err(e).context(format!(
                    "failed to inspect {}",
                    self.venv.display()
                ));
            }
        };

        trace!("Removing old environment: {}", self.venv.display());
        let removed = if metadata.is_dir() {
            std::fs::remove_dir_all(&self.venv)
        } else {
            std::fs::remove_file(&self.venv)
        };
        removed.context(format!("failed to remove {}", self.venv.display()))?;

        Ok(true)
    }
}
