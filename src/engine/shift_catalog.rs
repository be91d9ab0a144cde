// ==========================================
// 月度排班系统 - 班次目录生成
// ==========================================
// 职责: 按门店 + 日类型模板展开整月具体班次，应用闭店过滤
// 输入: 目标月份 + 闭店集合
// 输出: 有序 ShiftEntry 序列（日期升序 → C 先于 L → 模板声明顺序）
// ==========================================

use crate::domain::calendar::{ClosureSet, Holiday, ShiftEntry, ShiftTemplate, TargetMonth};
use crate::domain::types::{Location, ShiftKey, WeekdayClass};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashSet;

// ==========================================
// 班次模板
// ==========================================

/// C 店工作日（周一至周五）
pub const C_WEEKDAY_BLUEPRINT: [ShiftTemplate; 3] = [
    ShiftTemplate { key: ShiftKey::Morning, hours: 4.0, required: 2 },
    ShiftTemplate { key: ShiftKey::Afternoon, hours: 3.0, required: 2 },
    ShiftTemplate { key: ShiftKey::Night, hours: 3.0, required: 1 },
];

/// C 店周六（缩减版，无晚班）
pub const C_SATURDAY_BLUEPRINT: [ShiftTemplate; 2] = [
    ShiftTemplate { key: ShiftKey::Morning, hours: 3.5, required: 2 },
    ShiftTemplate { key: ShiftKey::Afternoon, hours: 3.0, required: 2 },
];

/// L 店默认模板（每天）
pub const L_DEFAULT_BLUEPRINT: [ShiftTemplate; 3] = [
    ShiftTemplate { key: ShiftKey::Morning, hours: 4.0, required: 4 },
    ShiftTemplate { key: ShiftKey::Afternoon, hours: 3.0, required: 3 },
    ShiftTemplate { key: ShiftKey::Night, hours: 3.0, required: 2 },
];

/// L 店周二/周四早班人数
const L_TUE_THU_MORNING_REQUIRED: u32 = 3;

/// L 店周五午班减员
const L_FRIDAY_AFTERNOON_REDUCTION: u32 = 1;

/// L 店周五晚班人数
const L_FRIDAY_NIGHT_REQUIRED: u32 = 1;

// ==========================================
// ShiftCatalogBuilder - 班次目录生成器
// ==========================================
pub struct ShiftCatalogBuilder {
    // 无状态，模板为编译期常量
}

impl ShiftCatalogBuilder {
    pub fn new() -> Self {
        Self {}
    }

    /// 生成整月班次
    ///
    /// 规则:
    /// 1) C 店: 周日无班；周六用缩减模板；其余用工作日模板；闭店整日跳过
    /// 2) L 店: 默认模板；周二/周四早班 3 人；周五午班减 1、晚班 1 人；
    ///    周末无晚班；闭店整日跳过
    ///
    /// # 返回
    /// 空序列表示本月没有开放班次，由调用方提示
    pub fn build(&self, month: TargetMonth, closures: &ClosureSet) -> Vec<ShiftEntry> {
        let mut entries = Vec::new();

        for date in month.dates() {
            if !closures.is_closed(Location::C, date) {
                for template in Self::c_blueprint(date) {
                    entries.push(ShiftEntry::from_template(
                        template,
                        Location::C,
                        date,
                        template.required,
                    ));
                }
            }

            if !closures.is_closed(Location::L, date) {
                for template in L_DEFAULT_BLUEPRINT.iter() {
                    if let Some(required) = Self::l_required(template, date) {
                        entries.push(ShiftEntry::from_template(template, Location::L, date, required));
                    }
                }
            }
        }

        entries
    }

    /// C 店当日模板
    fn c_blueprint(date: NaiveDate) -> &'static [ShiftTemplate] {
        match WeekdayClass::of(date) {
            WeekdayClass::Sunday => &[],
            WeekdayClass::Saturday => &C_SATURDAY_BLUEPRINT,
            WeekdayClass::Weekday => &C_WEEKDAY_BLUEPRINT,
        }
    }

    /// L 店当日某班次的需求人数
    ///
    /// # 返回
    /// - None: 当日不开该班次（周末晚班）
    fn l_required(template: &ShiftTemplate, date: NaiveDate) -> Option<u32> {
        let weekday = date.weekday();
        match (template.key, weekday) {
            (ShiftKey::Night, Weekday::Sat | Weekday::Sun) => None,
            (ShiftKey::Morning, Weekday::Tue | Weekday::Thu) => Some(L_TUE_THU_MORNING_REQUIRED),
            (ShiftKey::Afternoon, Weekday::Fri) => {
                Some(template.required.saturating_sub(L_FRIDAY_AFTERNOON_REDUCTION))
            }
            (ShiftKey::Night, Weekday::Fri) => Some(L_FRIDAY_NIGHT_REQUIRED),
            _ => Some(template.required),
        }
    }
}

impl Default for ShiftCatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 统计本月可工作日（周一至周五且非节假日）
pub fn count_workable_days(month: TargetMonth, holidays: &[Holiday]) -> usize {
    let holiday_set: HashSet<NaiveDate> = holidays.iter().map(|h| h.date).collect();
    month
        .dates()
        .filter(|date| !WeekdayClass::of(*date).is_weekend())
        .filter(|date| !holiday_set.contains(date))
        .count()
}

/// 目录中出现过的日期（去重升序）
pub fn active_dates(entries: &[ShiftEntry]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();
    dates.sort();
    dates.dedup();
    dates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::Closure;
    use crate::domain::types::ClosureScope;

    fn march_2024() -> TargetMonth {
        TargetMonth::new(2024, 2).unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn entries_on(entries: &[ShiftEntry], day: u32, location: Location) -> Vec<&ShiftEntry> {
        entries
            .iter()
            .filter(|e| e.date == date(day) && e.location == location)
            .collect()
    }

    #[test]
    fn test_weekday_and_saturday_blueprints_for_c() {
        let entries = ShiftCatalogBuilder::new().build(march_2024(), &ClosureSet::default());

        // 2024-03-04 周一
        let monday = entries_on(&entries, 4, Location::C);
        assert_eq!(monday.len(), 3);
        assert_eq!(monday[0].required, 2);
        assert_eq!(monday[2].key, ShiftKey::Night);

        // 2024-03-09 周六
        let saturday = entries_on(&entries, 9, Location::C);
        assert_eq!(saturday.len(), 2);
        assert_eq!(saturday[0].hours, 3.5);

        // 2024-03-10 周日
        assert!(entries_on(&entries, 10, Location::C).is_empty());
    }

    #[test]
    fn test_l_overrides() {
        let entries = ShiftCatalogBuilder::new().build(march_2024(), &ClosureSet::default());

        let required = |day: u32| -> Vec<(ShiftKey, u32)> {
            entries_on(&entries, day, Location::L)
                .iter()
                .map(|e| (e.key, e.required))
                .collect()
        };

        // 周一默认
        assert_eq!(
            required(4),
            vec![(ShiftKey::Morning, 4), (ShiftKey::Afternoon, 3), (ShiftKey::Night, 2)]
        );
        // 周二 / 周四早班 3 人
        assert_eq!(required(5)[0], (ShiftKey::Morning, 3));
        assert_eq!(required(7)[0], (ShiftKey::Morning, 3));
        // 周五
        assert_eq!(
            required(8),
            vec![(ShiftKey::Morning, 4), (ShiftKey::Afternoon, 2), (ShiftKey::Night, 1)]
        );
        // 周末无晚班
        assert_eq!(required(9), vec![(ShiftKey::Morning, 4), (ShiftKey::Afternoon, 3)]);
        assert_eq!(required(10), vec![(ShiftKey::Morning, 4), (ShiftKey::Afternoon, 3)]);
    }

    #[test]
    fn test_generation_order() {
        let entries = ShiftCatalogBuilder::new().build(march_2024(), &ClosureSet::default());
        // 3 月 1 日周五: C 三个班次在前，L 三个班次在后
        let first_six: Vec<(Location, ShiftKey)> =
            entries.iter().take(6).map(|e| (e.location, e.key)).collect();
        assert_eq!(
            first_six,
            vec![
                (Location::C, ShiftKey::Morning),
                (Location::C, ShiftKey::Afternoon),
                (Location::C, ShiftKey::Night),
                (Location::L, ShiftKey::Morning),
                (Location::L, ShiftKey::Afternoon),
                (Location::L, ShiftKey::Night),
            ]
        );
        assert!(entries.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_closures_remove_location_day() {
        let closures = ClosureSet::from_closures(&[
            Closure::new(date(4), ClosureScope::Only(Location::C)),
            Closure::new(date(5), ClosureScope::All),
        ]);
        let entries = ShiftCatalogBuilder::new().build(march_2024(), &closures);

        assert!(entries_on(&entries, 4, Location::C).is_empty());
        assert_eq!(entries_on(&entries, 4, Location::L).len(), 3);
        assert!(entries_on(&entries, 5, Location::C).is_empty());
        assert!(entries_on(&entries, 5, Location::L).is_empty());
        assert!(!active_dates(&entries).contains(&date(5)));
    }

    #[test]
    fn test_count_workable_days() {
        // 2024 年 3 月: 21 个工作日
        assert_eq!(count_workable_days(march_2024(), &[]), 21);
        let holidays = vec![Holiday::new(date(4)), Holiday::new(date(9))];
        // 周六节假日不重复扣减
        assert_eq!(count_workable_days(march_2024(), &holidays), 20);
    }
}
