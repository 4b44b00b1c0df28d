use thiserror::Error;

#[derive(Error, Debug)]
pub enum GaehwaError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Storage error on key '{key}': {message}")]
    StorageError { key: String, message: String },

    #[error("Authentication failed: {message}")]
    AuthError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Configuration,
    Authentication,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GaehwaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GaehwaError::ApiError(_) => ErrorCategory::Network,
            GaehwaError::IoError(_) | GaehwaError::StorageError { .. } => ErrorCategory::Storage,
            GaehwaError::ConfigError { .. } | GaehwaError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            GaehwaError::AuthError { .. } => ErrorCategory::Authentication,
            GaehwaError::SerializationError(_) | GaehwaError::ValidationError { .. } => {
                ErrorCategory::Data
            }
        }
    }

    /// 儲存失敗只影響持久化，不影響本次執行的狀態
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Storage => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Authentication => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GaehwaError::ApiError(_) => "서버에 연결할 수 없어요.".to_string(),
            GaehwaError::AuthError { .. } => "로그인에 실패했어요.".to_string(),
            GaehwaError::IoError(_) | GaehwaError::StorageError { .. } => {
                "기기 저장소를 사용할 수 없어요.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the backend URL and your network connection",
            ErrorCategory::Storage => "Check that the storage directory exists and is writable",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
            ErrorCategory::Authentication => "Sign in again with a fresh identity token",
            ErrorCategory::Data => "Check the stored data or the server response format",
        }
    }
}

pub type Result<T> = std::result::Result<T, GaehwaError>;
