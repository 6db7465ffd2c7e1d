use crate::environment::Environment;
use crate::util::start_spinner;
use anyhow::{Context, Result};
use log::trace;
use std::process::{Command, Output};

impl Environment {
    /// Runs `pip install -r <manifest>` inside the environment, capturing
    /// both output streams. Only a failure to start pip is an `Err`; pip
    /// exiting unsuccessfully is reported through the returned output.
    pub fn install(&self, spinner: bool) -> Result<Output> {
        let installer = self.installer();
        let mut cmd = Command::new(&installer);
        cmd.arg("install").arg("-r").arg(&self.manifest);
        cmd.current_dir(&self.base);
        trace!("Running {:?}", cmd);

        let progress = start_spinner("📥 Installing packages:", spinner);
        let output = cmd.output();
        progress.finish_and_clear();

        let output = output
            .context(format!("unable to run {}", installer.display()))?;
        trace!(
            "pip stdout for {}:\n{}",
            self.display_path(),
            String::from_utf8_lossy(&output.stdout)
        );
        Ok(output)
    }
}
