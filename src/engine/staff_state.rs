// ==========================================
// 月度排班系统 - 员工排班状态
// ==========================================
// 职责: 每次运行为每位员工建立独立的累计状态
// 红线: 状态只由 AssignmentCommitter 修改，运行结束即丢弃
// ==========================================

use crate::domain::calendar::{ShiftEntry, WeekKey};
use crate::domain::staff::StaffMember;
use crate::domain::types::{Location, ShiftKey};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// 某日的一条排班记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayAssignment {
    pub location: Location,
    pub shift: ShiftKey,
}

// ==========================================
// StaffSchedulingState - 员工累计状态
// ==========================================
#[derive(Debug, Clone)]
pub struct StaffSchedulingState<'a> {
    pub staff: &'a StaffMember,

    // ===== 工时 =====
    pub weekly_hours: HashMap<WeekKey, f64>,
    pub monthly_hours: f64,
    pub monthly_cap: f64, // min(员工月上限, 默认月上限)

    // ===== 排班历史 =====
    pub day_assignments: BTreeMap<NaiveDate, Vec<DayAssignment>>,
    pub worked_dates: BTreeSet<NaiveDate>,
    pub total_assignments: u32,
    pub last_location: Option<Location>,

    // ===== 连续上班 =====
    pub last_worked_day: Option<NaiveDate>,
    pub streak: u32,

    // ===== 滚动窗口 =====
    pub daily_hours: Vec<(NaiveDate, f64)>, // 按日期升序
    pub max7_day_hours: f64,

    // ===== 限额 =====
    pub max_working_days: usize,
    pub new_joiner_assignments: u32,
}

impl<'a> StaffSchedulingState<'a> {
    /// 从员工档案初始化
    ///
    /// # 参数
    /// - default_monthly_cap: 本月默认月工时上限
    /// - max_working_days: 本月最多上班天数
    pub fn new(staff: &'a StaffMember, default_monthly_cap: f64, max_working_days: usize) -> Self {
        let monthly_cap = staff
            .monthly_cap
            .unwrap_or(f64::INFINITY)
            .min(default_monthly_cap);

        Self {
            staff,
            weekly_hours: HashMap::new(),
            monthly_hours: 0.0,
            monthly_cap,
            day_assignments: BTreeMap::new(),
            worked_dates: BTreeSet::new(),
            total_assignments: 0,
            last_location: None,
            last_worked_day: None,
            streak: 0,
            daily_hours: Vec::new(),
            max7_day_hours: 0.0,
            max_working_days,
            new_joiner_assignments: 0,
        }
    }

    pub fn assignments_on(&self, date: NaiveDate) -> &[DayAssignment] {
        self.day_assignments
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_shift_on(&self, date: NaiveDate, shift: ShiftKey) -> bool {
        self.assignments_on(date).iter().any(|a| a.shift == shift)
    }

    /// 当日在同一门店已排的班次数
    pub fn same_location_count(&self, date: NaiveDate, location: Location) -> usize {
        self.assignments_on(date)
            .iter()
            .filter(|a| a.location == location)
            .count()
    }

    /// 班次所在周桶的已排工时
    pub fn weekly_hours_for(&self, entry: &ShiftEntry) -> f64 {
        self.weekly_hours
            .get(&WeekKey::of(entry.date))
            .copied()
            .unwrap_or(0.0)
    }

    /// 距上次上班的天数
    ///
    /// # 返回
    /// - None: 本月尚未上班（视为无限休息）
    pub fn days_since_last_shift(&self, date: NaiveDate) -> Option<i64> {
        self.last_worked_day
            .map(|last| date.signed_duration_since(last).num_days())
    }

    /// 本月班次总数
    pub fn shift_count(&self) -> usize {
        self.day_assignments.values().map(Vec::len).sum()
    }
}

// ==========================================
// NewJoinerLedger - 新人配额计数
// ==========================================
// 键: (日期, 班次)，跨门店共享
#[derive(Debug, Clone, Default)]
pub struct NewJoinerLedger {
    counts: HashMap<(NaiveDate, ShiftKey), u32>,
}

impl NewJoinerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, entry: &ShiftEntry) -> u32 {
        self.counts
            .get(&entry.new_joiner_key())
            .copied()
            .unwrap_or(0)
    }

    pub fn increment(&mut self, entry: &ShiftEntry) {
        *self.counts.entry(entry.new_joiner_key()).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_monthly_cap_is_min_of_two() {
        let mut staff = StaffMember::new("Ana");
        let state = StaffSchedulingState::new(&staff, 168.0, 21);
        assert_eq!(state.monthly_cap, 168.0);

        staff.monthly_cap = Some(80.0);
        let state = StaffSchedulingState::new(&staff, 168.0, 21);
        assert_eq!(state.monthly_cap, 80.0);

        staff.monthly_cap = Some(500.0);
        let state = StaffSchedulingState::new(&staff, 168.0, 21);
        assert_eq!(state.monthly_cap, 168.0);
    }

    #[test]
    fn test_fresh_state_is_empty() {
        let staff = StaffMember::new("Ben");
        let state = StaffSchedulingState::new(&staff, 160.0, 20);
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();

        assert!(state.assignments_on(date).is_empty());
        assert_eq!(state.days_since_last_shift(date), None);
        assert_eq!(state.shift_count(), 0);
        assert_eq!(state.streak, 0);
        assert_eq!(state.max_working_days, 20);
    }
}
