// ==========================================
// 月度排班系统 - 配置层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    #[error("规则参数无效 ({field}): {message}")]
    InvalidEngineConfig { field: String, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
