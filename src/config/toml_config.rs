use crate::utils::error::{GaehwaError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub backend: Option<BackendConfig>,
    pub storage: Option<StorageConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub dir: Option<String>,
    pub secure_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: Option<bool>,
    pub verbose: Option<bool>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex is valid"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| GaehwaError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| GaehwaError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GAEHWA_BACKEND})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn backend_url(&self) -> Option<&str> {
        self.backend.as_ref().and_then(|b| b.url.as_deref())
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.backend.as_ref().and_then(|b| b.timeout_seconds)
    }

    pub fn storage_dir(&self) -> Option<&str> {
        self.storage.as_ref().and_then(|s| s.dir.as_deref())
    }

    pub fn secure_dir(&self) -> Option<&str> {
        self.storage.as_ref().and_then(|s| s.secure_dir.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[backend]
url = "http://192.168.0.10:8080"
timeout_seconds = 5

[storage]
dir = "/tmp/gaehwa"
secure_dir = "/tmp/gaehwa/secure"

[logging]
json = true
"#,
        )
        .unwrap();

        assert_eq!(config.backend_url(), Some("http://192.168.0.10:8080"));
        assert_eq!(config.timeout_seconds(), Some(5));
        assert_eq!(config.storage_dir(), Some("/tmp/gaehwa"));
        assert_eq!(config.secure_dir(), Some("/tmp/gaehwa/secure"));
        assert!(config.json_logs());
        assert!(!config.verbose());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.backend_url(), None);
        assert!(!config.json_logs());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("GAEHWA_TEST_BACKEND_HOST", "10.0.2.2");
        let config = TomlConfig::from_toml_str(
            "[backend]\nurl = \"http://${GAEHWA_TEST_BACKEND_HOST}:8080\"\n",
        )
        .unwrap();
        assert_eq!(config.backend_url(), Some("http://10.0.2.2:8080"));

        let untouched =
            TomlConfig::from_toml_str("[backend]\nurl = \"${GAEHWA_TEST_UNSET_VAR}\"\n").unwrap();
        assert_eq!(untouched.backend_url(), Some("${GAEHWA_TEST_UNSET_VAR}"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(TomlConfig::from_toml_str("[backend\nurl=").is_err());
    }
}
