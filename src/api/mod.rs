// ==========================================
// 月度排班系统 - API 层
// ==========================================
// 职责: 调用前校验、组装引擎输入、映射引擎结果
// ==========================================

pub mod error;
pub mod schedule_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use schedule_api::ScheduleApi;
