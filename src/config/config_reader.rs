// ==========================================
// 月度排班系统 - 配置读取 Trait
// ==========================================
// 职责: 定义排班调用方所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::engine_config::EngineConfig;

// ==========================================
// SchedulerConfigReader Trait
// ==========================================
// 实现者: ConfigManager（快照 settings + 环境变量覆写）
pub trait SchedulerConfigReader: Send + Sync {
    /// 规则参数
    fn engine_config(&self) -> EngineConfig;

    /// 新人配额（已规整为正数）
    fn new_joiner_limit(&self) -> u32;

    /// 宿主记录的目标月份 "YYYY-MM"
    ///
    /// # 返回
    /// - None: 宿主尚未选择月份
    fn target_month(&self) -> Option<String>;
}
