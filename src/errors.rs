use std::fmt;

use crate::utils::url_validator::UrlValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnaplinkError {
    InvalidUrl(String),
    NotFound(String),
    Generation(String),
    StorageUnavailable(String),
    Config(String),
    FileOperation(String),
}

impl SnaplinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            SnaplinkError::InvalidUrl(_) => "E001",
            SnaplinkError::NotFound(_) => "E002",
            SnaplinkError::Generation(_) => "E003",
            SnaplinkError::StorageUnavailable(_) => "E004",
            SnaplinkError::Config(_) => "E005",
            SnaplinkError::FileOperation(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            SnaplinkError::InvalidUrl(_) => "Invalid URL",
            SnaplinkError::NotFound(_) => "Not Found",
            SnaplinkError::Generation(_) => "Generation Error",
            SnaplinkError::StorageUnavailable(_) => "Storage Unavailable",
            SnaplinkError::Config(_) => "Configuration Error",
            SnaplinkError::FileOperation(_) => "File Operation Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            SnaplinkError::InvalidUrl(msg)
            | SnaplinkError::NotFound(msg)
            | SnaplinkError::Generation(msg)
            | SnaplinkError::StorageUnavailable(msg)
            | SnaplinkError::Config(msg)
            | SnaplinkError::FileOperation(msg) => msg,
        }
    }

    /// 调用方的输入有误（重试无意义）
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            SnaplinkError::InvalidUrl(_) | SnaplinkError::NotFound(_)
        )
    }

    /// 格式化为彩色输出（用于终端启动失败提示）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SnaplinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SnaplinkError {}

// 便捷的构造函数
impl SnaplinkError {
    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::InvalidUrl(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::NotFound(msg.into())
    }

    pub fn generation<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Generation(msg.into())
    }

    pub fn storage_unavailable<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::StorageUnavailable(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Config(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::FileOperation(msg.into())
    }
}

impl From<sea_orm::DbErr> for SnaplinkError {
    fn from(err: sea_orm::DbErr) -> Self {
        SnaplinkError::StorageUnavailable(err.to_string())
    }
}

impl From<std::io::Error> for SnaplinkError {
    fn from(err: std::io::Error) -> Self {
        SnaplinkError::FileOperation(err.to_string())
    }
}

impl From<UrlValidationError> for SnaplinkError {
    fn from(err: UrlValidationError) -> Self {
        SnaplinkError::InvalidUrl(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SnaplinkError>;
