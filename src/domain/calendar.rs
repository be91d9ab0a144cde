// ==========================================
// 月度排班系统 - 日历领域模型
// ==========================================
// 职责: 目标月份、闭店/节假日、班次模板与具体班次、周桶
// ==========================================

use crate::domain::error::DomainError;
use crate::domain::types::{day_of_week_index, ClosureScope, Location, ShiftKey};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

fn generate_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 界面展示日期（"Tue, Mar 5"）
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

// ==========================================
// TargetMonth - 排班目标月份
// ==========================================
// 构造时已校验，月内日期计算不会失败
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetMonth {
    first_day: NaiveDate,
}

impl TargetMonth {
    /// 按年份 + 从 0 开始的月份索引构造
    pub fn new(year: i32, month_index: u32) -> Result<Self, DomainError> {
        month_index
            .checked_add(1)
            .and_then(|month| NaiveDate::from_ymd_opt(year, month, 1))
            .map(|first_day| Self { first_day })
            .ok_or_else(|| DomainError::InvalidMonth(format!("{}/{}", year, month_index)))
    }

    /// 解析 "YYYY-MM"
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidMonth(value.to_string());
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Self::new(year, month - 1).map_err(|_| invalid())
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month_index(&self) -> u32 {
        self.first_day.month0()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// 月内全部日期（升序）
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.first_day.month();
        self.first_day
            .iter_days()
            .take_while(move |date| date.month() == month)
    }

    pub fn days_in_month(&self) -> usize {
        self.dates().count()
    }

    /// 月份显示名（"March 2024"）
    pub fn label(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }

    pub fn meta(&self) -> MonthMeta {
        MonthMeta {
            year: self.year(),
            month_index: self.month_index(),
            label: self.label(),
        }
    }
}

impl std::fmt::Display for TargetMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.first_day.format("%Y-%m"))
    }
}

/// 月份元数据（结果包输出）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthMeta {
    pub year: i32,
    pub month_index: u32,
    pub label: String,
}

// ==========================================
// WeekKey - 周桶
// ==========================================
// 以月初为锚点、周日为一周起点的周序号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekKey {
    pub year: i32,
    pub month_index: u32,
    pub index: u32,
}

impl WeekKey {
    pub fn of(date: NaiveDate) -> Self {
        let first_day = date - Duration::days(i64::from(date.day0()));
        let offset = day_of_week_index(first_day);
        Self {
            year: date.year(),
            month_index: date.month0(),
            index: (date.day0() + offset) / 7,
        }
    }
}

// ==========================================
// 闭店 / 节假日
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Closure {
    #[serde(default = "generate_record_id")]
    pub id: String,
    pub date: NaiveDate,
    pub location: ClosureScope,
}

impl Closure {
    pub fn new(date: NaiveDate, location: ClosureScope) -> Self {
        Self {
            id: generate_record_id(),
            date,
            location,
        }
    }
}

/// 节假日：只影响默认月工时预算，不取消班次
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    #[serde(default = "generate_record_id")]
    pub id: String,
    pub date: NaiveDate,
}

impl Holiday {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: generate_record_id(),
            date,
        }
    }
}

/// 闭店日期集合（全部门店 / 按门店）
#[derive(Debug, Clone, Default)]
pub struct ClosureSet {
    all: BTreeSet<NaiveDate>,
    by_location: HashMap<Location, BTreeSet<NaiveDate>>,
}

impl ClosureSet {
    pub fn from_closures(closures: &[Closure]) -> Self {
        let mut set = Self::default();
        for closure in closures {
            match closure.location {
                ClosureScope::All => {
                    set.all.insert(closure.date);
                }
                ClosureScope::Only(location) => {
                    set.by_location
                        .entry(location)
                        .or_default()
                        .insert(closure.date);
                }
            }
        }
        set
    }

    pub fn is_closed(&self, location: Location, date: NaiveDate) -> bool {
        self.all.contains(&date)
            || self
                .by_location
                .get(&location)
                .map(|dates| dates.contains(&date))
                .unwrap_or(false)
    }
}

// ==========================================
// 班次模板 / 具体班次
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftTemplate {
    pub key: ShiftKey,
    pub hours: f64,
    pub required: u32,
}

/// 一个具体的 (日期, 门店, 班次) 用工需求
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftEntry {
    pub date: NaiveDate,
    pub location: Location,
    pub key: ShiftKey,
    pub hours: f64,
    pub required: u32,
    pub day_of_week: u32, // 0 = 周日
}

impl ShiftEntry {
    pub fn from_template(
        template: &ShiftTemplate,
        location: Location,
        date: NaiveDate,
        required: u32,
    ) -> Self {
        Self {
            date,
            location,
            key: template.key,
            hours: template.hours,
            required,
            day_of_week: day_of_week_index(date),
        }
    }

    pub fn is_weekend(&self) -> bool {
        self.day_of_week == 0 || self.day_of_week == 6
    }

    /// 新人配额计数键（按日期 + 班次，跨门店共享）
    pub fn new_joiner_key(&self) -> (NaiveDate, ShiftKey) {
        (self.date, self.key)
    }

    pub fn day_of_month(&self) -> u32 {
        self.date.day()
    }
}
