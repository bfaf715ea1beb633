use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Query submitted automatically on startup.
    #[serde(default = "default_query")]
    pub default_query: String,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base log level for the EnvFilter when RUST_LOG is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for the rolling log file; defaults to "logs".
    #[serde(default)]
    pub log_directory: Option<String>,
}

fn default_query() -> String {
    "redux".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_query: default_query(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_directory: None,
        }
    }
}

impl AppConfig {
    /// Load `config.ron` from the working directory or next to the
    /// executable, falling back to defaults when absent or unparsable.
    pub fn load() -> Self {
        let mut candidates = vec![PathBuf::from("config.ron")];

        if let Ok(exe) = std::env::current_exe()
            && let Some(dir) = exe.parent()
        {
            candidates.push(dir.join("config.ron"));
        }

        for path in candidates {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match ron::from_str::<AppConfig>(&content) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse config at {}: {}", path.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.default_query, "redux");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.log_directory, None);
    }

    #[test]
    fn test_parse_partial_config() {
        let config: AppConfig = ron::from_str(r#"(default_query: "rust")"#).unwrap();
        assert_eq!(config.default_query, "rust");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_logging_section() {
        let config: AppConfig = ron::from_str(
            r#"(
            default_query: "react",
            logging: (level: "debug", log_directory: Some("/tmp/hn-logs")),
        )"#,
        )
        .unwrap();
        assert_eq!(config.default_query, "react");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.log_directory.as_deref(), Some("/tmp/hn-logs"));
    }
}
