// ==========================================
// 月度排班系统 - 核心库
// ==========================================
// 系统定位: 多门店月度排班引擎（贪心单遍，无回溯）
// 输入: 宿主快照（员工、闭店、节假日、设置）
// 输出: 排班表、缺员提示、员工统计、覆盖率
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 规则参数与宿主设置
pub mod config;

// 引擎层 - 排班规则
pub mod engine;

// 导入层 - 宿主快照
pub mod importer;

// API 层 - 调用方接口
pub mod api;

// 应用层 - 命令行入口
pub mod app;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ClosureScope, Location, LocationScope, ShiftKey, ShiftScope};

// 领域实体
pub use domain::{
    Closure, Coverage, Holiday, Preference, ScheduleOutcome, ScheduleResult, ShiftEntry,
    StaffMember, StaffStats, TargetMonth,
};

// 配置
pub use config::{ConfigManager, EngineConfig, SchedulerConfigReader, SchedulerSettings};

// 引擎
pub use engine::{ScheduleInput, ScheduleOrchestrator};

// 导入
pub use importer::{SchedulerSnapshot, SnapshotLoader};

// API
pub use api::{ApiError, ApiResult, ScheduleApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "月度排班系统";
