use crate::environment::{Environment, process_failure_detail};
use crate::util::start_spinner;
use anyhow::Result;
use log::trace;
use std::process::Command;

impl Environment {
    /// Runs `<python> -m venv <venv>`. Returns the failure detail when the
    /// interpreter could not be started or exited unsuccessfully.
    pub fn create(&self, spinner: bool) -> Result<Option<String>> {
        let mut cmd = Command::new(&self.python);
        cmd.arg("-m").arg("venv").arg(&self.venv);
        trace!("Running {:?}", cmd);

        let progress = start_spinner("📦 Building environment:", spinner);
        let output = cmd.output();
        progress.finish_and_clear();

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                return Ok(Some(format!(
                    "unable to run {}: {}",
                    self.python, e
                )));
            }
        };

        if output.status.success() {
            return Ok(None);
        }
        Ok(Some(process_failure_detail(&output)))
    }
}
