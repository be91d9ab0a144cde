// ==========================================
// 月度排班系统 - 候选人排序引擎
// ==========================================
// 职责: 在合格候选人中选出一个班位的最优人选
// 输入: 合格候选人索引 + 当前班位已排人员
// 输出: 选中员工索引（无人时为 None）
// ==========================================

use crate::config::EngineConfig;
use crate::domain::calendar::ShiftEntry;
use crate::domain::types::{Location, LocationScope};
use crate::engine::staff_state::StaffSchedulingState;
use std::cmp::Ordering;

// ==========================================
// CandidateRanker - 候选人排序引擎
// ==========================================
pub struct CandidateRanker {
    high_skill_threshold: u8,
}

impl CandidateRanker {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            high_skill_threshold: config.high_skill_threshold,
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 选出班位人选
    ///
    /// 规则:
    /// 1) 技能均衡: 本班位已有高技能员工时，优先从非高技能候选人中选
    /// 2) 按比较链稳定排序，取第一位
    ///
    /// # 参数
    /// - `states`: 全部员工状态
    /// - `eligible`: 合格候选人索引（按员工录入顺序）
    /// - `entry`: 当前班次
    /// - `assigned`: 本班位已选中的员工索引
    pub fn select(
        &self,
        states: &[StaffSchedulingState<'_>],
        eligible: &[usize],
        entry: &ShiftEntry,
        assigned: &[usize],
    ) -> Option<usize> {
        let mut pool = self.balance_skills(states, eligible, assigned);
        // sort_by 为稳定排序，完全相同时保持录入顺序
        pool.sort_by(|&a, &b| self.compare(&states[a], &states[b], entry));
        pool.first().copied()
    }

    /// 技能均衡过滤
    fn balance_skills(
        &self,
        states: &[StaffSchedulingState<'_>],
        eligible: &[usize],
        assigned: &[usize],
    ) -> Vec<usize> {
        let is_high = |idx: usize| states[idx].staff.skill_score >= self.high_skill_threshold;

        if assigned.iter().any(|&idx| is_high(idx)) {
            let lower: Vec<usize> = eligible.iter().copied().filter(|&idx| !is_high(idx)).collect();
            if !lower.is_empty() {
                return lower;
            }
        }
        eligible.to_vec()
    }

    // ==========================================
    // 比较方法
    // ==========================================

    /// 比较两位候选人
    ///
    /// 按 RANKING_CHAIN 顺序逐个比较，遇到第一个非 Equal 结果即返回
    ///
    /// # 返回
    /// Ordering::Less 表示 a 优先于 b
    pub fn compare(
        &self,
        a: &StaffSchedulingState<'_>,
        b: &StaffSchedulingState<'_>,
        entry: &ShiftEntry,
    ) -> Ordering {
        RANKING_CHAIN
            .iter()
            .map(|(_, cmp)| cmp(a, b, entry))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }

    /// 比较链中首个分出先后的比较器名称（用于排查排班原因）
    pub fn deciding_comparator(
        &self,
        a: &StaffSchedulingState<'_>,
        b: &StaffSchedulingState<'_>,
        entry: &ShiftEntry,
    ) -> Option<&'static str> {
        RANKING_CHAIN
            .iter()
            .find(|(_, cmp)| cmp(a, b, entry) != Ordering::Equal)
            .map(|(name, _)| *name)
    }
}

// ==========================================
// 比较链
// ==========================================
// 顺序即优先级，调整顺序会改变排班结果

type Comparator =
    fn(&StaffSchedulingState<'_>, &StaffSchedulingState<'_>, &ShiftEntry) -> Ordering;

const RANKING_CHAIN: [(&str, Comparator); 10] = [
    ("same_location_today", by_same_location_today),
    ("assignments_today", by_assignments_today),
    ("location_flex", by_location_flex),
    ("new_joiner_share", by_new_joiner_share),
    ("days_off_entries", by_days_off_entries),
    ("location_continuity", by_location_continuity),
    ("location_preference", by_location_preference),
    ("monthly_hours", by_monthly_hours),
    ("total_assignments", by_total_assignments),
    ("rest_days", by_rest_days),
];

/// 当日同门店已排班次 (降序)
fn by_same_location_today(
    a: &StaffSchedulingState<'_>,
    b: &StaffSchedulingState<'_>,
    entry: &ShiftEntry,
) -> Ordering {
    let same_a = a.same_location_count(entry.date, entry.location);
    let same_b = b.same_location_count(entry.date, entry.location);
    same_b.cmp(&same_a)
}

/// 当日已排班次 (降序)
fn by_assignments_today(
    a: &StaffSchedulingState<'_>,
    b: &StaffSchedulingState<'_>,
    entry: &ShiftEntry,
) -> Ordering {
    let day_a = a.assignments_on(entry.date).len();
    let day_b = b.assignments_on(entry.date).len();
    day_b.cmp(&day_a)
}

/// 门店灵活度 (升序)
fn by_location_flex(
    a: &StaffSchedulingState<'_>,
    b: &StaffSchedulingState<'_>,
    entry: &ShiftEntry,
) -> Ordering {
    flex_score(a, entry.location).cmp(&flex_score(b, entry.location))
}

/// 同为新人时，新人已排班次 (升序)
fn by_new_joiner_share(
    a: &StaffSchedulingState<'_>,
    b: &StaffSchedulingState<'_>,
    _entry: &ShiftEntry,
) -> Ordering {
    if a.staff.is_new_joiner && b.staff.is_new_joiner {
        a.new_joiner_assignments.cmp(&b.new_joiner_assignments)
    } else {
        Ordering::Equal
    }
}

/// 固定休息日条目数 (降序，条目多者靠前)
fn by_days_off_entries(
    a: &StaffSchedulingState<'_>,
    b: &StaffSchedulingState<'_>,
    _entry: &ShiftEntry,
) -> Ordering {
    b.staff.days_off.len().cmp(&a.staff.days_off.len())
}

/// 门店连续性 (升序)
fn by_location_continuity(
    a: &StaffSchedulingState<'_>,
    b: &StaffSchedulingState<'_>,
    entry: &ShiftEntry,
) -> Ordering {
    continuity_score(a, entry.location).cmp(&continuity_score(b, entry.location))
}

/// 门店偏好 (升序)
fn by_location_preference(
    a: &StaffSchedulingState<'_>,
    b: &StaffSchedulingState<'_>,
    entry: &ShiftEntry,
) -> Ordering {
    preference_score(a, entry.location).cmp(&preference_score(b, entry.location))
}

/// 本月已排工时 (升序)
fn by_monthly_hours(
    a: &StaffSchedulingState<'_>,
    b: &StaffSchedulingState<'_>,
    _entry: &ShiftEntry,
) -> Ordering {
    a.monthly_hours
        .partial_cmp(&b.monthly_hours)
        .unwrap_or(Ordering::Equal)
}

/// 本月已排班次 (升序)
fn by_total_assignments(
    a: &StaffSchedulingState<'_>,
    b: &StaffSchedulingState<'_>,
    _entry: &ShiftEntry,
) -> Ordering {
    a.total_assignments.cmp(&b.total_assignments)
}

/// 距上次上班天数 (降序，本月未上班视为无穷大)
fn by_rest_days(
    a: &StaffSchedulingState<'_>,
    b: &StaffSchedulingState<'_>,
    entry: &ShiftEntry,
) -> Ordering {
    let rest_a = a.days_since_last_shift(entry.date).unwrap_or(i64::MAX);
    let rest_b = b.days_since_last_shift(entry.date).unwrap_or(i64::MAX);
    rest_b.cmp(&rest_a)
}

/// 门店灵活度
///
/// - 指定偏好门店: 与班次门店一致为 0，否则 5
/// - 未配置可用门店: 5
/// - 仅可去班次门店: 0
/// - 其他: 可用门店数
fn flex_score(state: &StaffSchedulingState<'_>, location: Location) -> usize {
    let staff = state.staff;
    if let LocationScope::Only(preferred) = staff.preferred_location {
        return if preferred == location { 0 } else { 5 };
    }
    match staff.locations.as_slice() {
        [] => 5,
        [only] if *only == location => 0,
        all => all.len(),
    }
}

/// 连续性: 上一班同门店 0，未排过 1，换门店 2
fn continuity_score(state: &StaffSchedulingState<'_>, location: Location) -> u8 {
    match state.last_location {
        None => 1,
        Some(last) if last == location => 0,
        Some(_) => 2,
    }
}

/// 偏好: 命中 0，无偏好 1，不符 2
fn preference_score(state: &StaffSchedulingState<'_>, location: Location) -> u8 {
    match state.staff.preferred_location {
        LocationScope::Any => 1,
        LocationScope::Only(preferred) if preferred == location => 0,
        LocationScope::Only(_) => 2,
    }
}
