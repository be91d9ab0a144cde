// ==========================================
// 月度排班系统 - 领域层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 错误文案沿用宿主界面的英文提示（前端直接展示）
// ==========================================

use thiserror::Error;

/// 领域层错误类型（输入解析/校验）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Unknown location \"{0}\".")]
    UnknownLocation(String),

    #[error("Unknown shift \"{0}\".")]
    UnknownShift(String),

    #[error("Invalid day \"{0}\". Use numbers between 1 and 31.")]
    InvalidDayOff(String),

    #[error("Invalid month input.")]
    InvalidMonth(String),

    #[error("Invalid weekday {0}. Use 0 (Sun) through 6 (Sat).")]
    InvalidWeekday(u32),

    #[error("Staff record \"{0}\" has no name.")]
    MissingStaffName(String),
}
