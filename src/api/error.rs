// ==========================================
// 月度排班系统 - API层错误类型
// ==========================================
// 职责: 定义调用方可见的错误，转换各层错误为用户提示
// 说明: 用户提示沿用宿主界面的英文文案
// ==========================================

use crate::config::ConfigError;
use crate::domain::DomainError;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 调用前校验
    // ==========================================
    #[error("Add staff before generating a schedule.")]
    NoStaff,

    #[error("Select a target month.")]
    MissingMonth,

    #[error("{0}")]
    InvalidInput(String),

    // ==========================================
    // 排班结果
    // ==========================================
    #[error("{0}")]
    NoOpenShifts(String),

    // ==========================================
    // 数据与配置
    // ==========================================
    #[error("快照导入失败: {0}")]
    ImportError(String),

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::InvalidStaffRecord { .. } | ImportError::InvalidSettings(_) => {
                ApiError::ValidationError(err.to_string())
            }
            ImportError::Other(inner) => ApiError::Other(inner),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
