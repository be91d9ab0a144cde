// ==========================================
// 月度排班系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::config::ConfigError;
use crate::domain::error::DomainError;
use thiserror::Error;

/// 快照导入错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("JSON 解析失败: {0}")]
    JsonParseError(String),

    // ===== 数据质量错误 =====
    #[error("员工记录无效 (第 {index} 条): {source}")]
    InvalidStaffRecord {
        index: usize,
        #[source]
        source: DomainError,
    },

    #[error("规则参数无效: {0}")]
    InvalidSettings(#[from] ConfigError),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::JsonParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
