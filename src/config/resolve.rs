use super::PartialConfig;
use super::cli::Args;
use super::structs::{
    DEFAULT_ENV_DIR, DEFAULT_MANIFEST, DEFAULT_PYTHON, DEFAULT_RETRY_DELAY_MS,
};
use crate::config::Config;
use anyhow::{Context, Result};
use log::trace;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::{env, str::FromStr};

pub fn resolve_config(cli: &Args) -> Result<Config> {
    let (config_files, mut partial_config, mut sources) =
        load_partial(cli.no_config)?;

    // Override with environment variables if set
    if let Ok(log_level) = env::var("ENVWIZARD_LOG_LEVEL") {
        if let Ok(log_level) = log::LevelFilter::from_str(&log_level) {
            partial_config.log_level = Some(log_level);
            sources.insert("log_level".into(), "environment".into());
        } else {
            return Err(anyhow::anyhow!("Invalid log level: {}", log_level));
        }
    }
    for (var, slot, key) in [
        ("ENVWIZARD_PYTHON", &mut partial_config.python, "python"),
        ("ENVWIZARD_MANIFEST", &mut partial_config.manifest, "manifest"),
        ("ENVWIZARD_ENV_DIR", &mut partial_config.env_dir, "env_dir"),
    ] {
        if let Ok(value) = env::var(var) {
            if !value.is_empty() {
                *slot = Some(value);
                sources.insert(key.into(), "environment".into());
            }
        }
    }
    if let Ok(delay) = env::var("ENVWIZARD_RETRY_DELAY_MS") {
        if let Ok(delay) = u64::from_str(&delay) {
            partial_config.retry_delay_ms = Some(delay);
            sources.insert("retry_delay_ms".into(), "environment".into());
        } else {
            return Err(anyhow::anyhow!(
                "Invalid value for ENVWIZARD_RETRY_DELAY_MS: {}",
                delay
            ));
        }
    }
    if let Ok(spinner) = env::var("ENVWIZARD_SPINNER") {
        if let Ok(spinner) = bool::from_str(&spinner) {
            partial_config.spinner = Some(spinner);
            sources.insert("spinner".into(), "environment".into());
        } else {
            return Err(anyhow::anyhow!(
                "Invalid value for ENVWIZARD_SPINNER: {}",
                spinner
            ));
        }
    }

    // Override with CLI args if provided (highest precedence)
    if let Some(log_level) = cli.log_level {
        partial_config.log_level = Some(log_level);
        sources.insert("log_level".into(), "cli".into());
    }
    for (arg, slot, key) in [
        (&cli.python, &mut partial_config.python, "python"),
        (&cli.manifest, &mut partial_config.manifest, "manifest"),
        (&cli.env_dir, &mut partial_config.env_dir, "env_dir"),
    ] {
        if let Some(value) = arg {
            *slot = Some(value.clone());
            sources.insert(key.into(), "cli".into());
        }
    }
    if let Some(delay) = cli.retry_delay_ms {
        partial_config.retry_delay_ms = Some(delay);
        sources.insert("retry_delay_ms".into(), "cli".into());
    }
    if cli.no_spinner {
        partial_config.spinner = Some(false);
        sources.insert("spinner".into(), "cli".into());
    }

    for key in [
        "log_level",
        "python",
        "manifest",
        "env_dir",
        "retry_delay_ms",
        "spinner",
    ] {
        sources
            .entry(key.to_string())
            .or_insert_with(|| "default".into());
    }

    let config = Config {
        log_level: partial_config.log_level.unwrap_or(log::LevelFilter::Info),
        python: partial_config
            .python
            .unwrap_or_else(|| DEFAULT_PYTHON.to_string()),
        manifest: partial_config
            .manifest
            .unwrap_or_else(|| DEFAULT_MANIFEST.to_string()),
        env_dir: partial_config
            .env_dir
            .unwrap_or_else(|| DEFAULT_ENV_DIR.to_string()),
        retry_delay_ms: partial_config
            .retry_delay_ms
            .unwrap_or(DEFAULT_RETRY_DELAY_MS),
        spinner: partial_config.spinner.unwrap_or(true),
        sources,
        config_files,
    };

    validate_config(&config)?;

    trace!("Interpreter: {}", config.python);
    trace!("Manifest: {}, env dir: {}", config.manifest, config.env_dir);

    Ok(config)
}

pub fn load_partial(
    no_config: bool,
) -> Result<(Vec<PathBuf>, PartialConfig, HashMap<String, String>)> {
    let config_paths = if no_config {
        vec![]
    } else {
        find_config_files()?
    };
    let mut sources = HashMap::new();
    if config_paths.is_empty() {
        trace!("No config files found, using default config");
        return Ok((config_paths, PartialConfig::default(), sources));
    }

    let mut merged_config = PartialConfig::default();
    for path in config_paths.iter() {
        let config_str = std::fs::read_to_string(path).context(format!(
            "Failed to read config file {}",
            path.display()
        ))?;

        let config: PartialConfig = toml::from_str(&config_str).context(
            format!("Failed to parse config file {}", path.display()),
        )?;

        merge_configs(
            &mut merged_config,
            &mut sources,
            config,
            path.to_str()
                .context("Failed to convert config path to str")?,
        );
        trace!("Loaded config file: {}", path.display());
    }

    Ok((config_paths, merged_config, sources))
}

/** Returns a vec of all config files found, lowest precedence first */
fn find_config_files() -> Result<Vec<PathBuf>> {
    let home = dirs::home_dir();
    let mut paths_to_check = Vec::new();

    // Any project specific files
    let mut current_dir = std::env::current_dir()?;
    loop {
        paths_to_check.push(current_dir.join(".envwizard.toml"));
        if Some(&current_dir) == home.as_ref() || !current_dir.pop() {
            break;
        }
    }

    // ~/.config/envwizard/config.toml
    if let Some(config_dir) = dirs::config_dir() {
        paths_to_check.push(config_dir.join("envwizard").join("config.toml"));
    }

    // /etc/envwizard.toml
    paths_to_check.push(PathBuf::from("/etc/envwizard.toml"));

    // Finally reverse them so we can process them in order nicely
    paths_to_check.reverse();

    Ok(paths_to_check
        .into_iter()
        .filter(|path| path.is_file())
        .collect())
}

fn merge_configs(
    base: &mut PartialConfig,
    sources: &mut HashMap<String, String>,
    override_config: PartialConfig,
    source: &str,
) {
    if let Some(log_level) = override_config.log_level {
        base.log_level = Some(log_level);
        sources.insert("log_level".into(), source.into());
    }
    if let Some(python) = override_config.python {
        base.python = Some(python);
        sources.insert("python".into(), source.into());
    }
    if let Some(manifest) = override_config.manifest {
        base.manifest = Some(manifest);
        sources.insert("manifest".into(), source.into());
    }
    if let Some(env_dir) = override_config.env_dir {
        base.env_dir = Some(env_dir);
        sources.insert("env_dir".into(), source.into());
    }
    if let Some(retry_delay_ms) = override_config.retry_delay_ms {
        base.retry_delay_ms = Some(retry_delay_ms);
        sources.insert("retry_delay_ms".into(), source.into());
    }
    if let Some(spinner) = override_config.spinner {
        base.spinner = Some(spinner);
        sources.insert("spinner".into(), source.into());
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if config.python.trim().is_empty() {
        return Err(anyhow::anyhow!("Python interpreter must not be empty"));
    }
    validate_relative_name("manifest", &config.manifest)?;
    validate_relative_name("env_dir", &config.env_dir)?;

    Ok(())
}

/* The manifest and environment directory live directly inside each target
 * path, so they must be a single plain file name. */
fn validate_relative_name(key: &str, name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(anyhow::anyhow!("Invalid {}: '{}'", key, name)),
    }
}
