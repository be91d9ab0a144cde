// ==========================================
// 排班引擎集成测试
// ==========================================
// 职责: 以完整名单运行整月排班，验证劳动规则不变量与典型场景
// 场景: 目录生成 → 资格判定 → 排序 → 提交 → 汇总
// ==========================================


use chrono::Datelike;
use shift_scheduler::config::EngineConfig;
use shift_scheduler::domain::types::{ClosureScope, Location, LocationScope, ShiftKey, ShiftScope};
use shift_scheduler::domain::{Closure, Holiday, Preference, WeekKey};
use std::collections::{BTreeSet, HashMap};
use test_helpers::*;

// ==========================================
// 不变量
// ==========================================

#[test]
fn test_weekly_and_monthly_caps_hold() {
    let roster = sample_roster();
    let result = generate(&roster, &[], &[], 1);
    let hours = shift_hours(&[]);

    for member in &roster {
        let list = assignments_with_hours(&result, &member.name, &hours);

        let mut weekly: HashMap<WeekKey, f64> = HashMap::new();
        for (date, _, _, h) in &list {
            *weekly.entry(WeekKey::of(*date)).or_insert(0.0) += h;
        }
        for (week, total) in &weekly {
            assert!(
                *total <= member.weekly_cap,
                "{} week {:?}: {} > {}",
                member.name,
                week,
                total,
                member.weekly_cap
            );
        }

        let monthly: f64 = list.iter().map(|(_, _, _, h)| h).sum();
        let cap = member
            .monthly_cap
            .unwrap_or(f64::INFINITY)
            .min(result.default_monthly_cap);
        assert!(monthly <= cap, "{}: {} > {}", member.name, monthly, cap);
    }
}

#[test]
fn test_no_double_booking_and_working_day_limit() {
    let roster = sample_roster();
    let result = generate(&roster, &[], &[], 1);
    let hours = shift_hours(&[]);
    let max_days = EngineConfig::default().max_working_days(result.working_dates.len());
    assert_eq!(max_days, 21);

    for member in &roster {
        let list = assignments_with_hours(&result, &member.name, &hours);

        let mut seen = BTreeSet::new();
        for (date, _, key, _) in &list {
            assert!(seen.insert((*date, *key)), "{} double booked {} {}", member.name, date, key);
        }

        let days: BTreeSet<_> = list.iter().map(|(d, _, _, _)| *d).collect();
        assert!(days.len() <= max_days, "{} works {} days", member.name, days.len());
    }
}

#[test]
fn test_streak_and_rolling_window() {
    let roster = sample_roster();
    let result = generate(&roster, &[], &[], 1);
    let hours = shift_hours(&[]);

    for (member, stats) in roster.iter().zip(&result.stats) {
        assert_eq!(member.name, stats.name);
        let list = assignments_with_hours(&result, &member.name, &hours);

        assert!(longest_streak(&list) <= 6, "{} streak too long", member.name);
        assert_eq!(stats.max7_day_hours, brute_force_max7(&list), "{}", member.name);
        assert_eq!(stats.shift_count, list.len());
        assert_eq!(stats.hours, list.iter().map(|(_, _, _, h)| h).sum::<f64>());
    }
}

#[test]
fn test_new_joiner_quota_per_slot() {
    let roster = sample_roster();
    let new_joiners: BTreeSet<String> = roster
        .iter()
        .filter(|s| s.is_new_joiner)
        .map(|s| s.name.clone())
        .collect();

    for limit in [1_u32, 2] {
        let result = generate(&roster, &[], &[], limit);

        // 配额按 (日期, 班次) 跨门店统计
        let mut per_slot: HashMap<_, u32> = HashMap::new();
        for (_, days) in &result.schedule {
            for (date, shifts) in days {
                for (key, block) in shifts {
                    let count = block.names.iter().filter(|n| new_joiners.contains(*n)).count();
                    *per_slot.entry((*date, *key)).or_insert(0) += count as u32;
                }
            }
        }
        assert!(per_slot.values().all(|c| *c <= limit), "limit {}", limit);
    }
}

#[test]
fn test_coverage_accounting() {
    let roster = sample_roster();
    let result = generate(&roster, &[], &[], 1);

    let required: u32 = result
        .schedule
        .values()
        .flat_map(|days| days.values())
        .flat_map(|shifts| shifts.values())
        .map(|block| block.required)
        .sum();
    let filled: u32 = result
        .schedule
        .values()
        .flat_map(|days| days.values())
        .flat_map(|shifts| shifts.values())
        .map(|block| block.names.len() as u32)
        .sum();

    assert_eq!(result.coverage.total, required);
    assert_eq!(result.coverage.filled, filled);
    assert_eq!(
        result.coverage.filled + result.warnings.len() as u32,
        result.coverage.total
    );
    assert!(result
        .warnings
        .iter()
        .all(|w| w.starts_with("Unable to fill ") && w.ends_with(").")));
}

#[test]
fn test_generation_is_idempotent() {
    let roster = sample_roster();
    let closures = vec![Closure::new(march(20), ClosureScope::Only(Location::C))];
    let holidays = vec![Holiday::new(march(29))];

    let first = generate(&roster, &closures, &holidays, 1);
    let second = generate(&roster, &closures, &holidays, 1);

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

// ==========================================
// 场景
// ==========================================

#[test]
fn test_single_l_staff_month() {
    let mut ana = staff_at("Ana", &[Location::L]);
    ana.weekly_cap = 40.0;
    let roster = vec![ana];
    let result = generate(&roster, &[], &[], 1);
    let hours = shift_hours(&[]);
    let list = assignments_with_hours(&result, "Ana", &hours);

    assert!(!list.is_empty());
    assert!(list.iter().all(|(_, loc, _, _)| *loc == Location::L));

    // 同一天同一班次至多一次
    let mut seen = BTreeSet::new();
    assert!(list.iter().all(|(d, _, k, _)| seen.insert((*d, *k))));

    let mut weekly: HashMap<WeekKey, f64> = HashMap::new();
    for (date, _, _, h) in &list {
        *weekly.entry(WeekKey::of(*date)).or_insert(0.0) += h;
    }
    assert!(weekly.values().all(|h| *h <= 40.0));
    assert!(longest_streak(&list) <= 6);
    assert_eq!(result.stats[0].max7_day_hours, brute_force_max7(&list));
}

#[test]
fn test_location_closure_leaves_other_location() {
    let roster = sample_roster();
    let closures = vec![Closure::new(march(5), ClosureScope::Only(Location::C))];
    let result = generate(&roster, &closures, &[], 1);

    assert!(!result.schedule[&Location::C].contains_key(&march(5)));
    assert_eq!(result.schedule[&Location::L][&march(5)].len(), 3);
    assert!(result.working_dates.contains(&march(5)));
}

#[test]
fn test_full_closure_removes_date() {
    let roster = sample_roster();
    let closures = vec![Closure::new(march(5), ClosureScope::All)];
    let result = generate(&roster, &closures, &[], 1);

    assert!(!result.schedule[&Location::C].contains_key(&march(5)));
    assert!(!result.schedule[&Location::L].contains_key(&march(5)));
    assert!(!result.working_dates.contains(&march(5)));
    assert_eq!(result.working_dates.len(), 30);
}

#[test]
fn test_two_new_joiners_never_share_a_slot() {
    let mut nia = staff_at("Nia", &[Location::L]);
    nia.is_new_joiner = true;
    let mut oli = staff_at("Oli", &[Location::L]);
    oli.is_new_joiner = true;
    let roster = vec![nia, oli];

    let result = generate(&roster, &[], &[], 1);
    for shifts in result.schedule[&Location::L].values() {
        for block in shifts.values() {
            assert!(block.names.len() <= 1, "{:?}", block.names);
        }
    }
    // 两人都有排班（新人之间均摊）
    assert!(result.stats.iter().all(|s| s.shift_count > 0));
}

#[test]
fn test_sunday_preference_is_respected() {
    let mut hal = staff("Hal");
    hal.preferences.push(Preference::weekday(0, LocationScope::Any, ShiftScope::All));
    let roster = vec![hal, staff("Ana")];

    let result = generate(&roster, &[], &[], 1);
    let sundays: Vec<_> = result
        .assignments_of("Hal")
        .filter(|(date, _, _)| date.weekday() == chrono::Weekday::Sun)
        .collect();
    assert!(sundays.is_empty());
    assert!(result.assignments_of("Hal").count() > 0);
}

#[test]
fn test_days_off_and_avoid_lists() {
    let roster = sample_roster();
    let result = generate(&roster, &[], &[], 1);

    // Gus: 1 号、15 号休息；工作日不上晚班
    assert!(result
        .assignments_of("Gus")
        .all(|(date, _, key)| {
            date.day() != 1
                && date.day() != 15
                && !(key == ShiftKey::Night && date.weekday().num_days_from_sunday() % 6 != 0)
        }));

    // Lou: 周末不上早班
    assert!(result.assignments_of("Lou").all(|(date, _, key)| {
        let weekend = matches!(date.weekday(), chrono::Weekday::Sat | chrono::Weekday::Sun);
        !(weekend && key == ShiftKey::Morning)
    }));

    // Ivy: 3/12 L 早班不可排
    assert!(!result
        .assignments_of("Ivy")
        .any(|(date, loc, key)| date == march(12) && loc == Location::L && key == ShiftKey::Morning));
}

#[test]
fn test_location_rules_in_full_run() {
    let roster = sample_roster();
    let result = generate(&roster, &[], &[], 1);

    assert!(result.assignments_of("Ben").all(|(_, loc, _)| loc == Location::L));
    assert!(result.assignments_of("Cai").all(|(_, loc, _)| loc == Location::C));
    assert!(result.assignments_of("Dee").all(|(_, loc, _)| loc == Location::L));
}

#[test]
fn test_holidays_reduce_default_cap_only() {
    let roster = sample_roster();
    let holidays = vec![Holiday::new(march(4)), Holiday::new(march(5))];

    let with_holidays = generate(&roster, &[], &holidays, 1);
    let without = generate(&roster, &[], &[], 1);

    assert_eq!(without.default_monthly_cap, 168.0);
    assert_eq!(with_holidays.default_monthly_cap, 152.0);
    // 节假日不取消班次
    assert_eq!(with_holidays.working_dates, without.working_dates);
    assert_eq!(with_holidays.coverage.total, without.coverage.total);
}

#[test]
fn test_month_meta_and_stats_order() {
    let roster = sample_roster();
    let result = generate(&roster, &[], &[], 1);

    assert_eq!(result.month_meta.year, 2024);
    assert_eq!(result.month_meta.month_index, 2);
    assert_eq!(result.month_meta.label, "March 2024");
    assert_eq!(result.working_dates.len(), 31);

    let names: Vec<_> = result.stats.iter().map(|s| s.name.as_str()).collect();
    let expected: Vec<_> = roster.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, expected);
}
