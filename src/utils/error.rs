use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    ApiResponseError { status: u16, body: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

/// 錯誤分類，對應 CLI 的退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Transport,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) | EtlError::ApiResponseError { .. } => ErrorCategory::Transport,
            EtlError::CsvError(_) | EtlError::IoError(_) | EtlError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            EtlError::YamlError(_)
            | EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EtlError::SerializationError(_) | EtlError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 設定錯誤必須在任何網路請求之前中止
            ErrorCategory::Configuration => ErrorSeverity::Critical,
            ErrorCategory::Transport => ErrorSeverity::Medium,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Processing => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::ApiError(_) => "Check network connectivity and the API base URL",
            EtlError::ApiResponseError { .. } => {
                "Inspect the logged response body; the token may be expired or lack scopes"
            }
            EtlError::CsvError(_) => "Check that the CSV file has a header row and is valid UTF-8",
            EtlError::IoError(_) => "Check that the file exists and is readable",
            EtlError::SerializationError(_) => "The API returned an unexpected JSON shape",
            EtlError::YamlError(_) => "Check that the HubSpot config file is valid YAML",
            EtlError::ConfigError { .. } | EtlError::MissingConfigError { .. } => {
                "Check the portal name and the hubspot.config.yml contents"
            }
            EtlError::InvalidConfigValueError { .. } => "Fix the reported configuration value",
            EtlError::ProcessingError { .. } => "Re-run with --verbose for details",
            EtlError::ValidationError { .. } => {
                "Fix the CSV columns to match the selected field mapping"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::ApiError(e) => format!("HubSpot API call failed: {}", e),
            EtlError::ApiResponseError { status, .. } => {
                format!("HubSpot rejected the request with status {}", status)
            }
            EtlError::CsvError(e) => format!("Could not parse the CSV file: {}", e),
            EtlError::IoError(e) => format!("File access failed: {}", e),
            EtlError::MissingConfigError { field } => format!("Missing configuration: {}", field),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
