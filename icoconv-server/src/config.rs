// ABOUTME: Configuration file loading, environment overrides, and validation for the icoconv server
// ABOUTME: Supports TOML config files with XDG Base Directory lookup and layered merging

use crate::constants::{env, server};
use anyhow::{anyhow, Context, Result};
use icoconv_core::constants::{limits, rate_limit};
use icoconv_core::{ConversionOptions, Quota};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub bind: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub workers: Option<usize>,
    #[serde(default)]
    pub max_upload_bytes: Option<usize>,
    #[serde(default, deserialize_with = "validate_public_url")]
    pub public_url: Option<String>,
    #[serde(default)]
    pub trust_forwarded_for: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub secret_key: Option<SecretString>,
    #[serde(default)]
    pub rate_limit: Option<ConfigRateLimit>,
    #[serde(default)]
    pub conversion: Option<ConfigConversion>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct ConfigRateLimit {
    #[serde(default)]
    pub per_minute: Option<u32>,
    #[serde(default)]
    pub per_hour: Option<u32>,
    #[serde(default)]
    pub per_day: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct ConfigConversion {
    #[serde(default)]
    pub clamp_oversized: Option<bool>,
    #[serde(default)]
    pub glow: Option<bool>,
}

/// Fully resolved settings the server runs with.
#[derive(Debug)]
pub struct Settings {
    pub bind: String,
    pub port: u16,
    pub workers: usize,
    pub max_upload_bytes: usize,
    pub public_url: Option<String>,
    pub trust_forwarded_for: bool,
    pub secret_key: Option<SecretString>,
    pub quotas: Vec<Quota>,
    pub conversion: ConversionOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Config::default()
            .into_settings()
            .unwrap_or_else(|_| unreachable!("default config is valid"))
    }
}

impl Settings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl Config {
    /// Load configuration from standard locations, then an explicit file, then the environment
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let paths = Self::get_config_paths();
        let mut config =
            Self::load_from_paths(&paths.iter().map(|p| p.as_path()).collect::<Vec<_>>())?;

        if let Some(path) = explicit {
            config = config.merge(Self::load_from_file(path)?);
        }

        Ok(config.apply_env())
    }

    /// Load configuration from file paths in increasing order of precedence.
    /// Missing files are skipped; files that exist but fail to parse are errors.
    pub fn load_from_paths(paths: &[&Path]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths {
            if !path.exists() {
                continue;
            }
            log::debug!("Loading config from {}", path.display());
            config = config.merge(Self::load_from_file(path)?);
        }

        Ok(config)
    }

    /// Load configuration from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Standard config file paths, lowest precedence first
    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. User config directory fallback
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".config").join("icoconv").join("config.toml"));
        }

        // 2. XDG config home
        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(config_home).join("icoconv").join("config.toml"));
        }

        // 3. Working directory config (highest precedence)
        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(current_dir.join("icoconv.toml"));
        }

        paths.dedup();
        paths
    }

    /// Apply overrides from the process environment
    pub fn apply_env(self) -> Self {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using `lookup` to read variables
    pub fn apply_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(env::PREFIXED_SECRET_KEY)
            .or_else(|| lookup(env::SECRET_KEY))
            .filter(|s| !s.is_empty());
        if let Some(secret) = secret {
            self.secret_key = Some(SecretString::new(secret.into_boxed_str()));
        }

        if let Some(raw) = lookup(env::MAX_UPLOAD_BYTES) {
            match raw.trim().parse::<usize>() {
                Ok(bytes) => self.max_upload_bytes = Some(bytes),
                Err(_) => log::warn!("Ignoring invalid {}={}", env::MAX_UPLOAD_BYTES, raw),
            }
        }

        if let Some(raw) = lookup(env::PORT) {
            match raw.trim().parse::<u16>() {
                Ok(port) => self.port = Some(port),
                Err(_) => log::warn!("Ignoring invalid {}={}", env::PORT, raw),
            }
        }

        self
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge(self, other: Config) -> Config {
        Config {
            bind: other.bind.or(self.bind),
            port: other.port.or(self.port),
            workers: other.workers.or(self.workers),
            max_upload_bytes: other.max_upload_bytes.or(self.max_upload_bytes),
            public_url: other.public_url.or(self.public_url),
            trust_forwarded_for: other.trust_forwarded_for.or(self.trust_forwarded_for),
            secret_key: other.secret_key.or(self.secret_key),
            rate_limit: match (self.rate_limit, other.rate_limit) {
                (Some(base), Some(other)) => Some(base.merge(other)),
                (base, other) => other.or(base),
            },
            conversion: match (self.conversion, other.conversion) {
                (Some(base), Some(other)) => Some(base.merge(other)),
                (base, other) => other.or(base),
            },
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        if self.workers == Some(0) {
            return Err(anyhow!("workers must be at least 1"));
        }
        if self.max_upload_bytes == Some(0) {
            return Err(anyhow!("max_upload_bytes must be greater than 0"));
        }
        if let Some(ref public_url) = self.public_url {
            check_public_url(public_url).map_err(|e| anyhow!(e))?;
        }
        if let Some(ref rate_limit) = self.rate_limit {
            rate_limit
                .validate()
                .context("Invalid rate_limit configuration")?;
        }
        Ok(())
    }

    /// Resolve defaults and produce the settings the server runs with
    pub fn into_settings(self) -> Result<Settings> {
        self.validate()?;

        let limits_cfg = self.rate_limit.unwrap_or_default();
        let quotas = vec![
            Quota::per_minute(limits_cfg.per_minute.unwrap_or(rate_limit::PER_MINUTE)),
            Quota::per_hour(limits_cfg.per_hour.unwrap_or(rate_limit::PER_HOUR)),
            Quota::per_day(limits_cfg.per_day.unwrap_or(rate_limit::PER_DAY)),
        ];

        let conversion_cfg = self.conversion.unwrap_or_default();
        let conversion = ConversionOptions::builder()
            .clamp_oversized(conversion_cfg.clamp_oversized.unwrap_or(true))
            .glow(conversion_cfg.glow.unwrap_or(true))
            .build();

        Ok(Settings {
            bind: self.bind.unwrap_or_else(|| server::DEFAULT_BIND.to_string()),
            port: self.port.unwrap_or(server::DEFAULT_PORT),
            workers: self.workers.unwrap_or(server::DEFAULT_WORKERS),
            max_upload_bytes: self.max_upload_bytes.unwrap_or(limits::MAX_UPLOAD_BYTES),
            public_url: self.public_url.map(|url| url.trim_end_matches('/').to_string()),
            trust_forwarded_for: self.trust_forwarded_for.unwrap_or(false),
            secret_key: self.secret_key,
            quotas,
            conversion,
        })
    }
}

impl ConfigRateLimit {
    pub fn merge(self, other: ConfigRateLimit) -> ConfigRateLimit {
        ConfigRateLimit {
            per_minute: other.per_minute.or(self.per_minute),
            per_hour: other.per_hour.or(self.per_hour),
            per_day: other.per_day.or(self.per_day),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("per_minute", self.per_minute),
            ("per_hour", self.per_hour),
            ("per_day", self.per_day),
        ] {
            if value == Some(0) {
                return Err(anyhow!("{} quota must be at least 1", name));
            }
        }
        Ok(())
    }
}

impl ConfigConversion {
    pub fn merge(self, other: ConfigConversion) -> ConfigConversion {
        ConfigConversion {
            clamp_oversized: other.clamp_oversized.or(self.clamp_oversized),
            glow: other.glow.or(self.glow),
        }
    }
}

// Custom deserializer for public URL validation
fn validate_public_url<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<String> = Option::deserialize(deserializer)?;

    if let Some(ref raw) = value {
        check_public_url(raw).map_err(D::Error::custom)?;
    }

    Ok(value)
}

fn check_public_url(raw: &str) -> std::result::Result<(), String> {
    let url = Url::parse(raw).map_err(|e| format!("Invalid public_url '{}': {}", raw, e))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!(
            "Invalid public_url '{}'. Must use http or https",
            raw
        ));
    }
    Ok(())
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .filter(|s| !s.is_empty())
        .map(|s| SecretString::new(s.into_boxed_str())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.bind, "0.0.0.0");
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.max_upload_bytes, 4_718_592);
        assert_eq!(settings.quotas.len(), 3);
        assert_eq!(settings.quotas[0], Quota::per_minute(15));
        assert!(settings.conversion.glow);
        assert!(settings.secret_key.is_none());
        assert!(!settings.trust_forwarded_for);
    }

    #[test]
    fn test_merge_configs() {
        let base = Config {
            port: Some(3000),
            bind: Some("127.0.0.1".to_string()),
            rate_limit: Some(ConfigRateLimit {
                per_minute: Some(5),
                per_hour: Some(20),
                per_day: None,
            }),
            ..Default::default()
        };

        let override_config = Config {
            port: Some(4000),
            rate_limit: Some(ConfigRateLimit {
                per_minute: Some(10),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = base.merge(override_config);
        assert_eq!(merged.port, Some(4000));
        assert_eq!(merged.bind, Some("127.0.0.1".to_string()));
        let rate_limit = merged.rate_limit.unwrap();
        assert_eq!(rate_limit.per_minute, Some(10));
        assert_eq!(rate_limit.per_hour, Some(20));
        assert_eq!(rate_limit.per_day, None);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SECRET_KEY", "fallback"),
            ("ICOCONV_SECRET_KEY", "preferred"),
            ("ICOCONV_MAX_UPLOAD_BYTES", "1024"),
            ("PORT", "9000"),
        ]
        .into_iter()
        .collect();

        let config = Config::default().apply_env_from(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.port, Some(9000));
        assert_eq!(config.max_upload_bytes, Some(1024));
        assert_eq!(config.secret_key.unwrap().expose_secret(), "preferred");
    }

    #[test]
    fn test_invalid_env_values_ignored() {
        let config = Config {
            port: Some(1234),
            ..Default::default()
        }
        .apply_env_from(|key| match key {
            "PORT" => Some("not-a-port".to_string()),
            "ICOCONV_MAX_UPLOAD_BYTES" => Some("-5".to_string()),
            _ => None,
        });
        assert_eq!(config.port, Some(1234));
        assert_eq!(config.max_upload_bytes, None);
    }

    #[test]
    fn test_zero_values_rejected() {
        let config = Config {
            workers: Some(0),
            ..Default::default()
        };
        assert!(config.into_settings().is_err());

        let config = Config {
            rate_limit: Some(ConfigRateLimit {
                per_hour: Some(0),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(config.into_settings().is_err());
    }

    #[test]
    fn test_public_url_scheme_checked() {
        assert!(toml::from_str::<Config>(r#"public_url = "ftp://ico.example.com""#).is_err());

        let config = Config {
            public_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_public_url_trailing_slash_trimmed() {
        let config: Config = toml::from_str(r#"public_url = "https://ico.example.com/""#).unwrap();
        let settings = config.into_settings().unwrap();
        assert_eq!(
            settings.public_url,
            Some("https://ico.example.com".to_string())
        );
    }
}
