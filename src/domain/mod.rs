// ==========================================
// 月度排班系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、输入解析
// 红线: 不含排班引擎逻辑，不含 I/O
// ==========================================

pub mod calendar;
pub mod error;
pub mod schedule;
pub mod staff;
pub mod types;

// 重导出核心类型
pub use calendar::{
    format_display_date, Closure, ClosureSet, Holiday, MonthMeta, ShiftEntry, ShiftTemplate,
    TargetMonth, WeekKey,
};
pub use error::DomainError;
pub use schedule::{
    Coverage, LocationSchedule, ScheduleOutcome, ScheduleResult, ShiftBlock, StaffFlag, StaffStats,
};
pub use staff::{parse_days_off, Preference, PreferenceWhen, StaffMember};
pub use types::{
    day_of_week_index, ClosureScope, Location, LocationScope, ShiftKey, ShiftScope, WeekdayClass,
};
