// ==========================================
// 月度排班系统 - 配置层
// ==========================================
// 职责: 规则参数、宿主设置、环境变量覆写
// 存储: 宿主快照 settings 节点（本库不落盘）
// ==========================================

pub mod config_manager;
pub mod config_reader;
pub mod engine_config;
pub mod error;
pub mod settings;

// 重导出核心配置
pub use config_manager::{config_keys, ConfigManager};
pub use config_reader::SchedulerConfigReader;
pub use engine_config::EngineConfig;
pub use error::{ConfigError, ConfigResult};
pub use settings::{SchedulerSettings, DEFAULT_NEW_JOINER_LIMIT};
