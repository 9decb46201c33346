use std::env;

use crate::errors::ConfigError;
use crate::parse::TimeParser;

/// Settings shared by the library consumers and the CLI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoreConfig {
    pub log_level: Option<String>,
    pub extra_formats: Vec<String>,
}

impl CoreConfig {
    /// Loads configuration from the process environment (`TIMERANGE_*`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env_with_prefix("TIMERANGE_")
    }

    /// Loads configuration from env vars prefixed with the provided value (e.g. `SOLAR_`).
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        let key = |suffix: &str| format!("{}{}", prefix, suffix);

        let log_level = read_var(&key("LOG"))?;

        let formats_key = key("EXTRA_FORMATS");
        let extra_formats = match read_var(&formats_key)? {
            Some(raw) => split_formats(&formats_key, &raw)?,
            None => Vec::new(),
        };

        Ok(Self {
            log_level,
            extra_formats,
        })
    }

    /// Builds an instant parser that also understands the configured formats.
    pub fn parser(&self) -> TimeParser {
        TimeParser::with_formats(self.extra_formats.iter().cloned())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.log_level.as_deref()
    }
}

fn read_var(key: &str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(source) => Err(ConfigError::NotUnicode {
            key: key.to_string(),
            source,
        }),
    }
}

fn split_formats(key: &str, raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(';')
        .map(str::trim)
        .map(|format| {
            if format.is_empty() {
                Err(ConfigError::InvalidEnvVar {
                    key: key.to_string(),
                    message: "empty format entry".into(),
                })
            } else {
                Ok(format.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_defaults_when_unset() {
        let cfg = CoreConfig::from_env_with_prefix("TRTEST_UNSET_").expect("config should load");
        assert_eq!(cfg, CoreConfig::default());
    }

    #[test]
    fn reads_prefixed_variables() {
        std::env::set_var("TRTEST_READ_LOG", "debug");
        std::env::set_var("TRTEST_READ_EXTRA_FORMATS", "%H:%M %d/%m/%Y; %j/%Y");

        let cfg = CoreConfig::from_env_with_prefix("TRTEST_READ_").expect("config should load");
        assert_eq!(cfg.log_level(), Some("debug"));
        assert_eq!(cfg.extra_formats, vec!["%H:%M %d/%m/%Y", "%j/%Y"]);
        assert!(cfg.parser().parse("06:30 03/05/2014").is_ok());
    }

    #[test]
    fn rejects_empty_format_entries() {
        std::env::set_var("TRTEST_EMPTY_EXTRA_FORMATS", "%Y;;%d");
        let err = CoreConfig::from_env_with_prefix("TRTEST_EMPTY_").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { .. }));
    }
}
