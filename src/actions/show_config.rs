use crate::config::Config;
use crate::outln;
use crate::util::set_json_output;
use log::debug;
use serde_json::Value;

pub fn show_config(config: &Config) {
    for (key, value) in config.entries() {
        if let Some(source) = config.sources.get(key) {
            debug!("{}={} set from {}", key, value, source);
        }
        set_json_output(key, &Value::String(value.clone()));
        outln!("{}={}", key, value);
    }

    let files: Vec<String> = config
        .config_files
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    set_json_output(
        "config_files",
        &Value::Array(files.iter().cloned().map(Value::String).collect()),
    );
    outln!("config_files={}", files.join(","));
}
