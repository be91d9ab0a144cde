// ==========================================
// 月度排班系统 - 员工领域模型
// ==========================================
// 职责: 员工档案、请假/不可用偏好、休息日输入解析
// 红线: 运行期间只读，排班累计状态见 engine::staff_state
// ==========================================

use crate::domain::calendar::format_display_date;
use crate::domain::error::DomainError;
use crate::domain::types::{Location, LocationScope, ShiftKey, ShiftScope};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// 默认周工时上限（小时）
pub const DEFAULT_WEEKLY_CAP: f64 = 40.0;

/// 默认技能评分
pub const DEFAULT_SKILL_SCORE: u8 = 3;

/// 技能评分取值范围
pub const SKILL_SCORE_RANGE: (u8, u8) = (1, 5);

/// 星期显示名（0 = 周日）
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn generate_staff_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 宽松读取休息日: 保留 1-31 的整数（含数字字符串），其余条目丢弃
fn deserialize_days_off<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .iter()
        .filter_map(day_of_month_value)
        .collect())
}

fn day_of_month_value(value: &serde_json::Value) -> Option<u32> {
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if number.fract() == 0.0 && (1.0..=31.0).contains(&number) {
        Some(number as u32)
    } else {
        None
    }
}

fn default_weekly_cap() -> f64 {
    DEFAULT_WEEKLY_CAP
}

fn default_skill_score() -> u8 {
    DEFAULT_SKILL_SCORE
}

// ==========================================
// Preference - 不可用偏好
// ==========================================
// 含义: 员工在匹配日期、匹配门店的匹配班次不可排
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(flatten)]
    pub when: PreferenceWhen,

    #[serde(default)]
    pub location: LocationScope,

    #[serde(default)]
    pub shifts: ShiftScope,
}

/// 偏好生效时间：每周固定星期 / 单日
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PreferenceWhen {
    Weekday { weekday: u32 },
    Date { date: NaiveDate },
}

impl Preference {
    pub fn weekday(weekday: u32, location: LocationScope, shifts: ShiftScope) -> Self {
        Self {
            id: None,
            when: PreferenceWhen::Weekday { weekday },
            location,
            shifts,
        }
    }

    pub fn date(date: NaiveDate, location: LocationScope, shifts: ShiftScope) -> Self {
        Self {
            id: None,
            when: PreferenceWhen::Date { date },
            location,
            shifts,
        }
    }

    /// 判断偏好是否命中某个具体班次
    ///
    /// 门店作用域 any 或相等；班次作用域 all 或包含；且星期或日期命中
    pub fn applies_to(
        &self,
        location: Location,
        shift: ShiftKey,
        date: NaiveDate,
        day_of_week: u32,
    ) -> bool {
        if !self.location.matches(location) || !self.shifts.matches(shift) {
            return false;
        }
        match self.when {
            PreferenceWhen::Weekday { weekday } => weekday == day_of_week,
            PreferenceWhen::Date { date: own } => own == date,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        match self.when {
            PreferenceWhen::Weekday { weekday } if weekday > 6 => {
                Err(DomainError::InvalidWeekday(weekday))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shift_text = match &self.shifts {
            ShiftScope::All => "all shifts".to_string(),
            ShiftScope::Shifts(set) => set
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        };
        let location_text = match self.location {
            LocationScope::Any => "any location".to_string(),
            LocationScope::Only(location) => format!("location {}", location),
        };
        match self.when {
            PreferenceWhen::Weekday { weekday } => {
                let label = WEEKDAY_LABELS.get(weekday as usize).copied().unwrap_or("?");
                write!(f, "{} • {} @ {}", label, shift_text, location_text)
            }
            PreferenceWhen::Date { date } => write!(
                f,
                "{} • {} @ {}",
                format_display_date(date),
                shift_text,
                location_text
            ),
        }
    }
}

// ==========================================
// StaffMember - 员工档案
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    #[serde(default = "generate_staff_id")]
    pub id: String,
    pub name: String,

    // ===== 工时上限 =====
    #[serde(default = "default_weekly_cap")]
    pub weekly_cap: f64,
    #[serde(default)]
    pub monthly_cap: Option<f64>, // 为空时仅受默认月上限约束

    #[serde(default)]
    pub is_new_joiner: bool,

    // ===== 门店 =====
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub preferred_location: LocationScope,

    // ===== 班次回避 =====
    #[serde(default)]
    pub avoid_weekday_shifts: BTreeSet<ShiftKey>,
    #[serde(default)]
    pub avoid_weekend_shifts: BTreeSet<ShiftKey>,

    // ===== 不可用 =====
    #[serde(default, deserialize_with = "deserialize_days_off")]
    pub days_off: Vec<u32>, // 每月固定休息日（1-31）
    #[serde(default)]
    pub preferences: Vec<Preference>,

    #[serde(default = "default_skill_score")]
    pub skill_score: u8,
}

impl StaffMember {
    /// 以默认值创建员工（全部门店可排、无偏好）
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_staff_id(),
            name: name.into(),
            weekly_cap: DEFAULT_WEEKLY_CAP,
            monthly_cap: None,
            is_new_joiner: false,
            locations: Location::ALL.to_vec(),
            preferred_location: LocationScope::Any,
            avoid_weekday_shifts: BTreeSet::new(),
            avoid_weekend_shifts: BTreeSet::new(),
            days_off: Vec::new(),
            preferences: Vec::new(),
            skill_score: DEFAULT_SKILL_SCORE,
        }
    }

    /// 规整宿主数据
    ///
    /// - 可用门店为空 → 全部门店
    /// - 休息日过滤到 1-31，去重升序
    /// - 技能评分夹到 [1, 5]
    /// - 周上限非正数 → 默认 40h
    /// - 月上限为负数 → 0（本月不排班）
    pub fn normalize(&mut self) {
        if self.locations.is_empty() {
            self.locations = Location::ALL.to_vec();
        }
        let mut seen = BTreeSet::new();
        self.locations.retain(|loc| seen.insert(*loc));

        let days: BTreeSet<u32> = self
            .days_off
            .iter()
            .copied()
            .filter(|day| (1..=31).contains(day))
            .collect();
        self.days_off = days.into_iter().collect();

        let (min, max) = SKILL_SCORE_RANGE;
        self.skill_score = self.skill_score.clamp(min, max);

        if !(self.weekly_cap.is_finite() && self.weekly_cap > 0.0) {
            self.weekly_cap = DEFAULT_WEEKLY_CAP;
        }
        if let Some(cap) = self.monthly_cap {
            if !cap.is_finite() {
                self.monthly_cap = None;
            } else if cap < 0.0 {
                self.monthly_cap = Some(0.0);
            }
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::MissingStaffName(self.id.clone()));
        }
        for pref in &self.preferences {
            pref.validate()?;
        }
        Ok(())
    }

    /// 对应星期类别的回避班次
    pub fn avoided_shifts(&self, is_weekend: bool) -> &BTreeSet<ShiftKey> {
        if is_weekend {
            &self.avoid_weekend_shifts
        } else {
            &self.avoid_weekday_shifts
        }
    }
}

/// 解析休息日输入（"1, 15, 3" → [1, 3, 15]）
///
/// # 规则
/// - 逗号分隔，忽略空白项
/// - 每项必须是 1-31 的整数，否则整体失败
/// - 去重后升序
pub fn parse_days_off(raw: &str) -> Result<Vec<u32>, DomainError> {
    let mut days = BTreeSet::new();
    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let day: u32 = token
            .parse()
            .map_err(|_| DomainError::InvalidDayOff(token.to_string()))?;
        if !(1..=31).contains(&day) {
            return Err(DomainError::InvalidDayOff(token.to_string()));
        }
        days.insert(day);
    }
    Ok(days.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_days_off() {
        assert_eq!(parse_days_off("").unwrap(), Vec::<u32>::new());
        assert_eq!(parse_days_off(" 15, 1,3 ,15,").unwrap(), vec![1, 3, 15]);

        let err = parse_days_off("1, 32").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid day \"32\". Use numbers between 1 and 31."
        );
        assert!(parse_days_off("2.5").is_err());
    }

    #[test]
    fn test_staff_defaults_from_json() {
        let staff: StaffMember = serde_json::from_str(r#"{"name":"Ana"}"#).unwrap();
        assert!(!staff.id.is_empty());
        assert_eq!(staff.weekly_cap, 40.0);
        assert_eq!(staff.monthly_cap, None);
        assert_eq!(staff.skill_score, 3);
        assert_eq!(staff.preferred_location, LocationScope::Any);
        assert!(staff.locations.is_empty());
    }

    #[test]
    fn test_normalize() {
        let mut staff: StaffMember = serde_json::from_str(
            r#"{"name":"Ben","locations":[],"daysOff":[31,0,5,5,40],"skillScore":9,"weeklyCap":0}"#,
        )
        .unwrap();
        staff.normalize();
        assert_eq!(staff.locations, vec![Location::L, Location::C]);
        assert_eq!(staff.days_off, vec![5, 31]);
        assert_eq!(staff.skill_score, 5);
        assert_eq!(staff.weekly_cap, 40.0);
    }

    #[test]
    fn test_days_off_tolerates_bad_entries() {
        let staff: StaffMember = serde_json::from_str(
            r#"{"name":"Ana","daysOff":[-1, 5, "12", 2.5, "x", null, 32, 1e1]}"#,
        )
        .unwrap();
        assert_eq!(staff.days_off, vec![5, 12, 10]);

        let staff: StaffMember = serde_json::from_str(r#"{"name":"Ben","daysOff":null}"#).unwrap();
        assert!(staff.days_off.is_empty());
    }

    #[test]
    fn test_negative_monthly_cap_clamps_to_zero() {
        let mut staff = StaffMember::new("Ana");
        staff.monthly_cap = Some(-20.0);
        staff.normalize();
        assert_eq!(staff.monthly_cap, Some(0.0));

        staff.monthly_cap = Some(60.0);
        staff.normalize();
        assert_eq!(staff.monthly_cap, Some(60.0));
    }

    #[test]
    fn test_preference_wire_format_and_match() {
        let pref: Preference = serde_json::from_str(
            r#"{"type":"weekday","weekday":0,"location":"any","shifts":["all"]}"#,
        )
        .unwrap();
        let sunday = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        assert!(pref.applies_to(Location::L, ShiftKey::Night, sunday, 0));
        assert!(!pref.applies_to(Location::L, ShiftKey::Night, sunday, 1));

        let date_pref: Preference = serde_json::from_str(
            r#"{"type":"date","date":"2024-03-05","location":"C","shifts":["morning"]}"#,
        )
        .unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert!(date_pref.applies_to(Location::C, ShiftKey::Morning, tuesday, 2));
        assert!(!date_pref.applies_to(Location::L, ShiftKey::Morning, tuesday, 2));
        assert!(!date_pref.applies_to(Location::C, ShiftKey::Afternoon, tuesday, 2));
    }

    #[test]
    fn test_preference_description() {
        let pref = Preference::weekday(0, LocationScope::Any, ShiftScope::All);
        assert_eq!(pref.to_string(), "Sun • all shifts @ any location");

        let shifts: BTreeSet<ShiftKey> = [ShiftKey::Night, ShiftKey::Morning].into_iter().collect();
        let pref = Preference::date(
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            LocationScope::Only(Location::L),
            ShiftScope::Shifts(shifts),
        );
        assert_eq!(pref.to_string(), "Tue, Mar 5 • morning, night @ location L");
    }

    #[test]
    fn test_validate_rejects_bad_weekday_and_blank_name() {
        let mut staff = StaffMember::new("  ");
        assert!(matches!(staff.validate(), Err(DomainError::MissingStaffName(_))));

        staff.name = "Cai".to_string();
        staff
            .preferences
            .push(Preference::weekday(7, LocationScope::Any, ShiftScope::All));
        assert_eq!(staff.validate(), Err(DomainError::InvalidWeekday(7)));
    }
}
