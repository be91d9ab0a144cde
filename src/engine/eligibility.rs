// ==========================================
// 月度排班系统 - 排班资格判定
// ==========================================
// 职责: 判定员工能否承接某个具体班次
// 红线: 纯判定，不修改状态；所有拒绝必须输出 reason
// ==========================================

use crate::config::EngineConfig;
use crate::domain::calendar::ShiftEntry;
use crate::domain::types::{LocationScope, ShiftKey};
use crate::engine::staff_state::{NewJoinerLedger, StaffSchedulingState};
use chrono::NaiveDate;
use std::fmt;

// ==========================================
// IneligibleReason - 拒绝原因
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum IneligibleReason {
    LocationNotAllowed,
    PreferredLocationMismatch,
    AvoidedShift,
    DayOff { day_of_month: u32 },
    PreferenceConflict,
    MaxWorkingDaysReached { worked: usize, max: usize },
    DuplicateShift,
    NightAfterLoneMorning,
    MorningAfterNight,
    WeeklyCapExceeded { projected: f64, cap: f64 },
    MonthlyCapExceeded { projected: f64, cap: f64 },
    SeventhConsecutiveDay { streak: u32 },
    NewJoinerQuotaReached { count: u32, limit: u32 },
}

impl fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocationNotAllowed => write!(f, "LOCATION_NOT_ALLOWED"),
            Self::PreferredLocationMismatch => write!(f, "PREFERRED_LOCATION_MISMATCH"),
            Self::AvoidedShift => write!(f, "AVOIDED_SHIFT"),
            Self::DayOff { day_of_month } => write!(f, "DAY_OFF: day={}", day_of_month),
            Self::PreferenceConflict => write!(f, "PREFERENCE_CONFLICT"),
            Self::MaxWorkingDaysReached { worked, max } => {
                write!(f, "MAX_WORKING_DAYS: worked={} >= max={}", worked, max)
            }
            Self::DuplicateShift => write!(f, "DUPLICATE_SHIFT"),
            Self::NightAfterLoneMorning => write!(f, "ADJACENCY: night after lone morning"),
            Self::MorningAfterNight => write!(f, "ADJACENCY: morning after night"),
            Self::WeeklyCapExceeded { projected, cap } => {
                write!(f, "WEEKLY_CAP: projected={:.1} > cap={:.1}", projected, cap)
            }
            Self::MonthlyCapExceeded { projected, cap } => {
                write!(f, "MONTHLY_CAP: projected={:.1} > cap={:.1}", projected, cap)
            }
            Self::SeventhConsecutiveDay { streak } => {
                write!(f, "STREAK_LIMIT: streak={}", streak)
            }
            Self::NewJoinerQuotaReached { count, limit } => {
                write!(f, "NEW_JOINER_QUOTA: count={} >= limit={}", count, limit)
            }
        }
    }
}

// ==========================================
// EligibilityEvaluator - 资格判定器
// ==========================================
pub struct EligibilityEvaluator {
    max_streak_days: u32,
}

impl EligibilityEvaluator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            max_streak_days: config.max_streak_days,
        }
    }

    /// 判定员工能否承接班次
    ///
    /// 判定顺序:
    /// 1) 门店: 不在可用门店 / 偏好门店不符
    /// 2) 回避班次（周末/工作日分别配置）
    /// 3) 不可用: 固定休息日 / 请假偏好
    /// 4) 上班天数已达上限（当日尚未上班时）
    /// 5) 同日同班次重复
    /// 6) 相邻规则: 单独早班后不排晚班；晚班后不排早班
    /// 7) 周上限 / 月上限
    /// 8) 连续上班第 7 天
    /// 9) 新人配额
    pub fn evaluate(
        &self,
        state: &StaffSchedulingState<'_>,
        entry: &ShiftEntry,
        ledger: &NewJoinerLedger,
        new_joiner_limit: u32,
    ) -> Result<(), IneligibleReason> {
        let staff = state.staff;

        // 1. 门店
        if !staff.locations.contains(&entry.location) {
            return Err(IneligibleReason::LocationNotAllowed);
        }
        if let LocationScope::Only(preferred) = staff.preferred_location {
            if preferred != entry.location {
                return Err(IneligibleReason::PreferredLocationMismatch);
            }
        }

        // 2. 回避班次
        if staff.avoided_shifts(entry.is_weekend()).contains(&entry.key) {
            return Err(IneligibleReason::AvoidedShift);
        }

        // 3. 不可用
        let day_of_month = entry.day_of_month();
        if staff.days_off.contains(&day_of_month) {
            return Err(IneligibleReason::DayOff { day_of_month });
        }
        if staff
            .preferences
            .iter()
            .any(|p| p.applies_to(entry.location, entry.key, entry.date, entry.day_of_week))
        {
            return Err(IneligibleReason::PreferenceConflict);
        }

        // 4. 上班天数上限
        let today = state.assignments_on(entry.date);
        if today.is_empty() && state.worked_dates.len() >= state.max_working_days {
            return Err(IneligibleReason::MaxWorkingDaysReached {
                worked: state.worked_dates.len(),
                max: state.max_working_days,
            });
        }

        // 5. 同班次重复
        if state.has_shift_on(entry.date, entry.key) {
            return Err(IneligibleReason::DuplicateShift);
        }

        // 6. 相邻规则
        let has = |shift: ShiftKey| today.iter().any(|a| a.shift == shift);
        let covered_day = has(ShiftKey::Morning) && has(ShiftKey::Afternoon);
        if entry.key == ShiftKey::Night && has(ShiftKey::Morning) && !covered_day {
            return Err(IneligibleReason::NightAfterLoneMorning);
        }
        if entry.key == ShiftKey::Morning && has(ShiftKey::Night) {
            return Err(IneligibleReason::MorningAfterNight);
        }

        // 7. 工时上限
        let weekly_projected = state.weekly_hours_for(entry) + entry.hours;
        if weekly_projected > staff.weekly_cap {
            return Err(IneligibleReason::WeeklyCapExceeded {
                projected: weekly_projected,
                cap: staff.weekly_cap,
            });
        }
        let monthly_projected = state.monthly_hours + entry.hours;
        if monthly_projected > state.monthly_cap {
            return Err(IneligibleReason::MonthlyCapExceeded {
                projected: monthly_projected,
                cap: state.monthly_cap,
            });
        }

        // 8. 连续上班
        if self.would_exceed_streak(state, entry.date) {
            return Err(IneligibleReason::SeventhConsecutiveDay {
                streak: state.streak,
            });
        }

        // 9. 新人配额
        if staff.is_new_joiner {
            let count = ledger.count(entry);
            if count >= new_joiner_limit {
                return Err(IneligibleReason::NewJoinerQuotaReached {
                    count,
                    limit: new_joiner_limit,
                });
            }
        }

        Ok(())
    }

    /// 布尔版本
    pub fn can_work_shift(
        &self,
        state: &StaffSchedulingState<'_>,
        entry: &ShiftEntry,
        ledger: &NewJoinerLedger,
        new_joiner_limit: u32,
    ) -> bool {
        self.evaluate(state, entry, ledger, new_joiner_limit).is_ok()
    }

    /// 排该日是否会形成超过上限的连续上班
    ///
    /// 只有紧接上次上班日（相差 1 天）且连续天数已达上限时才拒绝
    fn would_exceed_streak(&self, state: &StaffSchedulingState<'_>, date: NaiveDate) -> bool {
        match state.last_worked_day {
            None => false,
            Some(last) if last == date => false,
            Some(last) => {
                date.signed_duration_since(last).num_days() == 1
                    && state.streak >= self.max_streak_days
            }
        }
    }
}
