use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Catalog request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("Invalid request field '{field}' ({value}): {reason}")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing request field: {field}")]
    MissingFieldError { field: String },

    #[error("Plan not found: {id}")]
    PlanNotFound { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Request,
    Configuration,
    Catalog,
    Network,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlannerError {
    pub fn validation(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        PlannerError::ValidationError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn catalog(message: impl Into<String>) -> Self {
        PlannerError::CatalogError {
            message: message.into(),
        }
    }

    /// 呼叫端輸入錯誤（HTTP 邊界對應 4xx）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PlannerError::ValidationError { .. } | PlannerError::MissingFieldError { .. }
        )
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PlannerError::ValidationError { .. }
            | PlannerError::MissingFieldError { .. }
            | PlannerError::PlanNotFound { .. } => ErrorCategory::Request,
            PlannerError::ConfigValidationError { .. }
            | PlannerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PlannerError::CatalogError { .. }
            | PlannerError::SerializationError(_)
            | PlannerError::CsvError(_) => ErrorCategory::Catalog,
            PlannerError::HttpError(_) => ErrorCategory::Network,
            PlannerError::IoError(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Request => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Catalog => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PlannerError::ValidationError { field, .. } => {
                format!("請修正欄位 '{}' 後重新送出", field)
            }
            PlannerError::MissingFieldError { field } => format!("請提供欄位 '{}'", field),
            PlannerError::PlanNotFound { .. } => "請確認方案 ID 是否存在於目錄中".to_string(),
            PlannerError::HttpError(_) => "請檢查網路連線與目錄 URL 是否可存取".to_string(),
            PlannerError::IoError(_) => "請確認檔案路徑存在且具有讀寫權限".to_string(),
            PlannerError::CatalogError { .. }
            | PlannerError::SerializationError(_)
            | PlannerError::CsvError(_) => "請檢查目錄 JSON 的格式與內容".to_string(),
            _ => "請檢查設定檔內容".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlannerError::ValidationError { field, reason, .. } => {
                format!("輸入錯誤 ({}): {}", field, reason)
            }
            PlannerError::MissingFieldError { field } => format!("缺少必要欄位: {}", field),
            PlannerError::PlanNotFound { id } => format!("找不到方案: {}", id),
            PlannerError::HttpError(_) => "無法下載方案目錄".to_string(),
            PlannerError::CatalogError { message } => format!("方案目錄無效: {}", message),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
