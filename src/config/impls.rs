use super::structs::Config;

use serde::Deserialize;
use std::str::FromStr;

impl Config {
    /// Resolved settings as ordered `(key, value)` pairs.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("log_level", self.log_level.to_string()),
            ("python", self.python.clone()),
            ("manifest", self.manifest.clone()),
            ("env_dir", self.env_dir.clone()),
            ("retry_delay_ms", self.retry_delay_ms.to_string()),
            ("spinner", self.spinner.to_string()),
        ]
    }
}

pub(crate) fn deserialize_level_filter<'de, D>(
    deserializer: D,
) -> Result<Option<log::LevelFilter>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    s.map_or(Ok(None), |s| {
        log::LevelFilter::from_str(&s)
            .map(Some)
            .map_err(serde::de::Error::custom)
    })
}
