use crate::config::Config;
use crate::environment::{Environment, classify};
use crate::outln;
use crate::types::{FailureReason, FailureRecord};
use anyhow::Result;
use log::{debug, info, trace};

/// Sets up the virtual environment for one requested path.
///
/// Anticipated failures (no manifest, `venv` creation failing, pip failing)
/// are appended to `failures` and the call returns `Ok`. At most one record
/// is appended per call. Anything else, such as being unable to remove the
/// old environment or to start pip at all, is returned as an error for the
/// caller to record.
pub fn build(
    request: &str,
    config: &Config,
    failures: &mut Vec<FailureRecord>,
) -> Result<()> {
    let env = Environment::from_request(request, config)?;
    let path = env.display_path();
    trace!("Resolved '{}' to {}", env.request, path);

    outln!("\n🚧 Preparing environment at: {}", path);

    if !env.has_manifest() {
        outln!("❌ Missing {} at {}", config.manifest, path);
        failures.push(FailureRecord::new(
            path,
            FailureReason::MissingManifest {
                manifest: config.manifest.clone(),
            },
        ));
        return Ok(());
    }

    if env.remove_existing()? {
        outln!("♻️ Removed old virtual environment");
    }

    outln!("🐍 Creating new virtual environment...");
    if let Some(detail) = env.create(config.spinner)? {
        let reason = FailureReason::EnvironmentCreation { detail };
        outln!("❌ {}", reason.decorated());
        failures.push(FailureRecord::new(path, reason));
        return Ok(());
    }
    debug!("Created {}", env.venv.display());

    outln!("📥 Installing packages...");
    let output = env.install(config.spinner)?;
    if output.status.success() {
        info!("Installed {} into {}", config.manifest, env.venv.display());
        outln!("✅ All packages installed successfully!");
        outln!("✨ Environment ready!\n");
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let reason = classify(&stderr);
    outln!("❌ Installation failed for {}", path);
    outln!("{}", reason.decorated());
    outln!("");
    outln!("📄 Code Error output:\n");
    outln!("{}", stderr);
    failures.push(FailureRecord::new(path, reason));

    Ok(())
}
