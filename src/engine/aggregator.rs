// ==========================================
// 月度排班系统 - 覆盖率与统计汇总
// ==========================================
// 职责: 统计班位覆盖、生成缺员提示、汇总员工月度指标
// ==========================================

use crate::config::EngineConfig;
use crate::domain::calendar::{format_display_date, ShiftEntry};
use crate::domain::schedule::{Coverage, StaffFlag, StaffStats};
use crate::engine::staff_state::StaffSchedulingState;

// ==========================================
// CoverageAggregator - 覆盖率计数
// ==========================================
#[derive(Debug, Default)]
pub struct CoverageAggregator {
    filled: u32,
    total: u32,
    warnings: Vec<String>,
}

impl CoverageAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_filled(&mut self) {
        self.total += 1;
        self.filled += 1;
    }

    /// 记录一个未能填补的班位
    ///
    /// # 参数
    /// - `position`: 班位序号（从 0 开始，提示中显示为从 1 开始）
    pub fn record_unfilled(&mut self, entry: &ShiftEntry, position: u32) -> &str {
        self.total += 1;
        self.warnings.push(unfilled_warning(entry, position));
        self.warnings.last().map(String::as_str).unwrap_or_default()
    }

    /// 结束统计
    pub fn finish(self) -> (Coverage, Vec<String>) {
        (Coverage::new(self.filled, self.total), self.warnings)
    }
}

/// 缺员提示文案
pub fn unfilled_warning(entry: &ShiftEntry, position: u32) -> String {
    format!(
        "Unable to fill {} {} on {} (slot {}).",
        entry.location,
        entry.key,
        format_display_date(entry.date),
        position + 1
    )
}

// ==========================================
// 员工统计
// ==========================================

/// 汇总员工月度统计（保持员工录入顺序）
///
/// # 参数
/// - `active_date_count`: 本月有开放班次的日期数
/// - `workable_days`: 本月可工作日数
pub fn build_staff_stats(
    states: &[StaffSchedulingState<'_>],
    active_date_count: usize,
    workable_days: usize,
    config: &EngineConfig,
) -> Vec<StaffStats> {
    states
        .iter()
        .map(|state| StaffStats {
            name: state.staff.name.clone(),
            hours: state.monthly_hours,
            shift_count: state.shift_count(),
            max7_day_hours: state.max7_day_hours,
            off_day_count: active_date_count.saturating_sub(state.worked_dates.len()),
            flags: build_flags(state, workable_days, config),
        })
        .collect()
}

/// 员工月度标记
///
/// - 月工时距有效月上限不足 0.1h: 已达月上限
/// - 月工时低于 可工作日 × 8h 的 30%: 利用率低（可工作日为 0 时恒成立）
pub fn build_flags(
    state: &StaffSchedulingState<'_>,
    workable_days: usize,
    config: &EngineConfig,
) -> Vec<StaffFlag> {
    let mut flags = Vec::new();

    if state.monthly_hours >= state.monthly_cap - config.monthly_cap_tolerance {
        flags.push(StaffFlag::MonthlyLimitReached);
    }

    let budget = config.default_monthly_cap(workable_days);
    let utilization_pct = if workable_days > 0 {
        state.monthly_hours / budget * 100.0
    } else {
        0.0
    };
    if utilization_pct < config.low_utilization_pct {
        flags.push(StaffFlag::LowUtilization);
    }

    flags
}
