#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use toml_config::TomlConfig;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
pub const DEFAULT_STORAGE_DIR: &str = "./.gaehwa";
pub const DEFAULT_SECURE_DIR: &str = "./.gaehwa/secure";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// 命令列 > 設定檔 > 預設值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend_url: String,
    pub storage_dir: String,
    pub secure_dir: String,
    pub timeout_seconds: u64,
    pub verbose: bool,
    pub json_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            storage_dir: DEFAULT_STORAGE_DIR.to_string(),
            secure_dir: DEFAULT_SECURE_DIR.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            verbose: false,
            json_logs: false,
        }
    }
}

impl Settings {
    pub fn from_toml(file: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            backend_url: file
                .backend_url()
                .map(str::to_string)
                .unwrap_or(defaults.backend_url),
            storage_dir: file
                .storage_dir()
                .map(str::to_string)
                .unwrap_or(defaults.storage_dir),
            secure_dir: file
                .secure_dir()
                .map(str::to_string)
                .unwrap_or(defaults.secure_dir),
            timeout_seconds: file.timeout_seconds().unwrap_or(defaults.timeout_seconds),
            verbose: file.verbose(),
            json_logs: file.json_logs(),
        }
    }

    #[cfg(feature = "cli")]
    pub fn resolve(cli: &cli::CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        let mut settings = Self::from_toml(&file);

        if let Some(url) = &cli.backend_url {
            settings.backend_url = url.clone();
        }
        if let Some(dir) = &cli.storage_dir {
            settings.storage_dir = dir.clone();
        }
        if let Some(dir) = &cli.secure_dir {
            settings.secure_dir = dir.clone();
        }
        if let Some(timeout) = cli.timeout_seconds {
            settings.timeout_seconds = timeout;
        }
        settings.verbose |= cli.verbose;
        settings.json_logs |= cli.json_logs;

        Ok(settings)
    }
}

impl ConfigProvider for Settings {
    fn backend_url(&self) -> &str {
        &self.backend_url
    }

    fn storage_dir(&self) -> &str {
        &self.storage_dir
    }

    fn secure_dir(&self) -> &str {
        &self.secure_dir
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("backend.url", &self.backend_url)?;
        validate_path("storage.dir", &self.storage_dir)?;
        validate_path("storage.secure_dir", &self.secure_dir)?;
        validate_positive_number("backend.timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_file_values_override_defaults() {
        let file = TomlConfig::from_toml_str(
            "[backend]\nurl = \"https://api.gaehwa.app\"\n[storage]\ndir = \"/data\"\n",
        )
        .unwrap();
        let settings = Settings::from_toml(&file);

        assert_eq!(settings.backend_url, "https://api.gaehwa.app");
        assert_eq!(settings.storage_dir, "/data");
        assert_eq!(settings.secure_dir, DEFAULT_SECURE_DIR);
        assert_eq!(settings.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_invalid_settings() {
        let bad_url = Settings {
            backend_url: "<YOUR_BACKEND_HOST>".to_string(),
            ..Settings::default()
        };
        assert!(bad_url.validate().is_err());

        let zero_timeout = Settings {
            timeout_seconds: 0,
            ..Settings::default()
        };
        assert!(zero_timeout.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_flags_override_file() {
        use clap::Parser;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("gaehwa.toml");
        std::fs::write(
            &path,
            "[backend]\nurl = \"http://file:8080\"\ntimeout_seconds = 3\n[logging]\njson = true\n",
        )
        .unwrap();

        let cli = cli::CliConfig::parse_from([
            "gaehwa",
            "--config",
            path.to_str().unwrap(),
            "--backend-url",
            "http://flag:9090",
            "profile",
        ]);
        let settings = Settings::resolve(&cli).unwrap();

        assert_eq!(settings.backend_url, "http://flag:9090");
        assert_eq!(settings.timeout_seconds, 3);
        assert!(settings.json_logs);
    }
}
