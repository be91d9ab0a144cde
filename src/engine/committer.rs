// ==========================================
// 月度排班系统 - 排班提交
// ==========================================
// 职责: 选中员工后一次性更新其全部累计状态
// 红线: 员工状态只在此处修改
// ==========================================

use crate::config::EngineConfig;
use crate::domain::calendar::{ShiftEntry, WeekKey};
use crate::engine::staff_state::{DayAssignment, NewJoinerLedger, StaffSchedulingState};
use chrono::NaiveDate;
use tracing::trace;

// ==========================================
// AssignmentCommitter - 排班提交器
// ==========================================
pub struct AssignmentCommitter {
    rolling_window_days: i64,
}

impl AssignmentCommitter {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            rolling_window_days: config.rolling_window_days,
        }
    }

    /// 提交一条排班
    ///
    /// 更新内容:
    /// 1) 周桶工时 + 月工时
    /// 2) 当日首次上班时记入上班日期
    /// 3) 当日排班记录、总班次、上次门店
    /// 4) 连续上班天数、上次上班日
    /// 5) 滚动窗口最大工时
    /// 6) 新人计数与配额账本
    pub fn commit(
        &self,
        state: &mut StaffSchedulingState<'_>,
        entry: &ShiftEntry,
        ledger: &mut NewJoinerLedger,
    ) {
        *state
            .weekly_hours
            .entry(WeekKey::of(entry.date))
            .or_insert(0.0) += entry.hours;
        state.monthly_hours += entry.hours;

        state.worked_dates.insert(entry.date);
        state
            .day_assignments
            .entry(entry.date)
            .or_default()
            .push(DayAssignment {
                location: entry.location,
                shift: entry.key,
            });
        state.total_assignments += 1;
        state.last_location = Some(entry.location);

        state.streak = next_streak(state.last_worked_day, state.streak, entry.date);
        state.last_worked_day = Some(entry.date);

        state.daily_hours.push((entry.date, entry.hours));
        state.daily_hours.sort_by_key(|(date, _)| *date);
        let window_max = rolling_window_max(&state.daily_hours, self.rolling_window_days);
        if window_max > state.max7_day_hours {
            state.max7_day_hours = window_max;
        }

        if state.staff.is_new_joiner {
            state.new_joiner_assignments += 1;
            ledger.increment(entry);
        }

        trace!(
            staff = %state.staff.name,
            date = %entry.date,
            location = %entry.location,
            shift = %entry.key,
            monthly_hours = state.monthly_hours,
            streak = state.streak,
            "提交排班"
        );
    }
}

/// 连续上班天数
///
/// - 同一天: 不变
/// - 紧接上次上班日: +1
/// - 其他（含首次）: 重置为 1
fn next_streak(last_worked_day: Option<NaiveDate>, streak: u32, date: NaiveDate) -> u32 {
    match last_worked_day {
        Some(last) if last == date => streak,
        Some(last) if date.signed_duration_since(last).num_days() == 1 => streak + 1,
        _ => 1,
    }
}

/// 任意 `window_days` 天窗口内的最大工时
///
/// # 参数
/// - `daily_hours`: (日期, 工时) 按日期升序，同一日期可出现多条
pub fn rolling_window_max(daily_hours: &[(NaiveDate, f64)], window_days: i64) -> f64 {
    let mut max = 0.0_f64;
    let mut sum = 0.0_f64;
    let mut left = 0;

    for (right, (date, hours)) in daily_hours.iter().enumerate() {
        sum += hours;
        while left < right && date.signed_duration_since(daily_hours[left].0).num_days() >= window_days
        {
            sum -= daily_hours[left].1;
            left += 1;
        }
        max = max.max(sum);
    }
    max
}
