// ==========================================
// 月度排班系统 - 领域类型定义
// ==========================================
// 职责: 门店、班次、作用域等基础枚举
// 序列化格式: 与宿主快照保持一致（"L"/"C"、"morning"、"any"、"all"）
// ==========================================

use crate::domain::error::DomainError;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// ==========================================
// 门店 (Location)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Location {
    L,
    C,
}

impl Location {
    /// 全部门店（未配置可用门店时的默认值）
    pub const ALL: [Location; 2] = [Location::L, Location::C];

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::L => "L",
            Location::C => "C",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "L" => Ok(Location::L),
            "C" => Ok(Location::C),
            other => Err(DomainError::UnknownLocation(other.to_string())),
        }
    }
}

// ==========================================
// 班次 (Shift Key)
// ==========================================
// 顺序: morning < afternoon < night（模板声明顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftKey {
    Morning,
    Afternoon,
    Night,
}

impl ShiftKey {
    pub const ALL: [ShiftKey; 3] = [ShiftKey::Morning, ShiftKey::Afternoon, ShiftKey::Night];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftKey::Morning => "morning",
            ShiftKey::Afternoon => "afternoon",
            ShiftKey::Night => "night",
        }
    }
}

impl fmt::Display for ShiftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "morning" => Ok(ShiftKey::Morning),
            "afternoon" => Ok(ShiftKey::Afternoon),
            "night" => Ok(ShiftKey::Night),
            other => Err(DomainError::UnknownShift(other.to_string())),
        }
    }
}

// ==========================================
// 日类型 (Weekday Class)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekdayClass {
    Weekday,
    Saturday,
    Sunday,
}

impl WeekdayClass {
    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat => WeekdayClass::Saturday,
            Weekday::Sun => WeekdayClass::Sunday,
            _ => WeekdayClass::Weekday,
        }
    }

    pub fn is_weekend(&self) -> bool {
        !matches!(self, WeekdayClass::Weekday)
    }
}

/// 星期索引（0 = 周日 … 6 = 周六）
pub fn day_of_week_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

// ==========================================
// 门店作用域 (Location Scope)
// ==========================================
// 用途: 员工偏好门店、请假偏好的门店范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LocationScope {
    #[default]
    Any,
    Only(Location),
}

impl LocationScope {
    pub fn matches(&self, location: Location) -> bool {
        match self {
            LocationScope::Any => true,
            LocationScope::Only(own) => *own == location,
        }
    }
}

impl TryFrom<String> for LocationScope {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == "any" {
            return Ok(LocationScope::Any);
        }
        Ok(LocationScope::Only(trimmed.parse()?))
    }
}

impl From<LocationScope> for String {
    fn from(value: LocationScope) -> Self {
        match value {
            LocationScope::Any => "any".to_string(),
            LocationScope::Only(location) => location.as_str().to_string(),
        }
    }
}

// ==========================================
// 闭店作用域 (Closure Scope)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ClosureScope {
    All,
    Only(Location),
}

impl TryFrom<String> for ClosureScope {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim() {
            "all" => Ok(ClosureScope::All),
            other => Ok(ClosureScope::Only(other.parse()?)),
        }
    }
}

impl From<ClosureScope> for String {
    fn from(value: ClosureScope) -> Self {
        match value {
            ClosureScope::All => "all".to_string(),
            ClosureScope::Only(location) => location.as_str().to_string(),
        }
    }
}

// ==========================================
// 班次作用域 (Shift Scope)
// ==========================================
// 序列化: 字符串数组，"all" 为哨兵值；空数组视为全部班次
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub enum ShiftScope {
    #[default]
    All,
    Shifts(BTreeSet<ShiftKey>),
}

impl ShiftScope {
    pub fn matches(&self, shift: ShiftKey) -> bool {
        match self {
            ShiftScope::All => true,
            ShiftScope::Shifts(set) => set.contains(&shift),
        }
    }
}

impl TryFrom<Vec<String>> for ShiftScope {
    type Error = DomainError;

    fn try_from(values: Vec<String>) -> Result<Self, Self::Error> {
        if values.is_empty() || values.iter().any(|v| v.trim() == "all") {
            return Ok(ShiftScope::All);
        }
        let shifts = values
            .iter()
            .map(|v| v.parse::<ShiftKey>())
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(ShiftScope::Shifts(shifts))
    }
}

impl From<ShiftScope> for Vec<String> {
    fn from(value: ShiftScope) -> Self {
        match value {
            ShiftScope::All => vec!["all".to_string()],
            ShiftScope::Shifts(set) => set.iter().map(|s| s.as_str().to_string()).collect(),
        }
    }
}
