// ==========================================
// 月度排班系统 - 排班结果模型
// ==========================================
// 职责: 引擎对外唯一契约（渲染/导出层消费）
// 序列化: camelCase，与宿主前端字段一致
// ==========================================

use crate::domain::calendar::MonthMeta;
use crate::domain::types::{Location, ShiftKey};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 单个具体班次的排班结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftBlock {
    pub names: Vec<String>,
    pub required: u32,
}

/// 门店排班表: 日期 → 班次 → 结果
pub type LocationSchedule = BTreeMap<NaiveDate, BTreeMap<ShiftKey, ShiftBlock>>;

// ==========================================
// Coverage - 覆盖率
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    pub filled: u32,
    pub total: u32,
    pub percent: String, // 一位小数，total 为 0 时为 "0.0"
}

impl Coverage {
    pub fn new(filled: u32, total: u32) -> Self {
        let percent = if total == 0 {
            "0.0".to_string()
        } else {
            format!("{:.1}", f64::from(filled) / f64::from(total) * 100.0)
        };
        Self {
            filled,
            total,
            percent,
        }
    }

    pub fn unfilled(&self) -> u32 {
        self.total.saturating_sub(self.filled)
    }
}

// ==========================================
// StaffFlag - 员工月度标记
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffFlag {
    #[serde(rename = "monthly limit reached")]
    MonthlyLimitReached,
    #[serde(rename = "low utilization")]
    LowUtilization,
}

impl fmt::Display for StaffFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaffFlag::MonthlyLimitReached => write!(f, "monthly limit reached"),
            StaffFlag::LowUtilization => write!(f, "low utilization"),
        }
    }
}

/// 员工月度统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffStats {
    pub name: String,
    pub hours: f64,
    pub shift_count: usize,
    pub max7_day_hours: f64,
    pub off_day_count: usize,
    pub flags: Vec<StaffFlag>,
}

// ==========================================
// ScheduleResult - 排班结果包
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResult {
    pub schedule: BTreeMap<Location, LocationSchedule>,
    pub warnings: Vec<String>,
    pub stats: Vec<StaffStats>,
    pub coverage: Coverage,
    pub month_meta: MonthMeta,
    pub default_monthly_cap: f64,
    pub working_dates: Vec<NaiveDate>,
}

impl ScheduleResult {
    /// 查询某个具体班次的排班结果
    pub fn block(&self, location: Location, date: NaiveDate, key: ShiftKey) -> Option<&ShiftBlock> {
        self.schedule.get(&location)?.get(&date)?.get(&key)
    }

    /// 某员工在整月的全部排班（日期, 门店, 班次）
    pub fn assignments_of<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = (NaiveDate, Location, ShiftKey)> + 'a {
        self.schedule.iter().flat_map(move |(location, days)| {
            days.iter().flat_map(move |(date, shifts)| {
                shifts
                    .iter()
                    .filter(move |(_, block)| block.names.iter().any(|n| n == name))
                    .map(move |(key, _)| (*date, *location, *key))
            })
        })
    }
}

/// 一次排班运行的结果
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleOutcome {
    Generated(ScheduleResult),
    /// 目标月份没有任何开放班次
    NothingToSchedule { reason: String },
}
