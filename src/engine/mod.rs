// ==========================================
// 月度排班系统 - 引擎层
// ==========================================
// 职责: 实现排班规则引擎
// 红线: 引擎不做 I/O，不报错；所有拒绝必须输出 reason
// ==========================================

pub mod aggregator;
pub mod committer;
pub mod eligibility;
pub mod orchestrator;
pub mod ranker;
pub mod shift_catalog;
pub mod staff_state;

// 重导出核心引擎
pub use aggregator::{build_flags, build_staff_stats, unfilled_warning, CoverageAggregator};
pub use committer::{rolling_window_max, AssignmentCommitter};
pub use eligibility::{EligibilityEvaluator, IneligibleReason};
pub use orchestrator::{ScheduleInput, ScheduleOrchestrator, NO_OPEN_SHIFTS_MESSAGE};
pub use ranker::CandidateRanker;
pub use shift_catalog::{active_dates, count_workable_days, ShiftCatalogBuilder};
pub use staff_state::{DayAssignment, NewJoinerLedger, StaffSchedulingState};
