// ==========================================
// 月度排班系统 - 引擎规则参数
// ==========================================
// 职责: 劳动规则阈值（技能均衡、连续上班、滚动窗口、统计标记）
// 默认值即线上规则；宿主可在快照 settings.engine 中覆写
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// 引擎规则参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// 高技能阈值（评分 ≥ 该值视为高技能）
    pub high_skill_threshold: u8,

    /// 最长连续上班天数（第 N+1 天禁止排班）
    pub max_streak_days: u32,

    /// 滚动工时窗口（天）
    pub rolling_window_days: i64,

    /// 可上班天数预留：有效日期数 > 该值时，最大上班天数 = 有效日期数 - 该值
    pub working_day_reserve: usize,

    /// 每个工作日的标准工时（默认月上限 = 工作日数 × 该值）
    pub hours_per_workable_day: f64,

    /// "已达月上限" 判定容差（小时）
    pub monthly_cap_tolerance: f64,

    /// "低利用率" 阈值（百分比）
    pub low_utilization_pct: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            high_skill_threshold: 4,
            max_streak_days: 6,
            rolling_window_days: 7,
            working_day_reserve: 10,
            hours_per_workable_day: 8.0,
            monthly_cap_tolerance: 0.1,
            low_utilization_pct: 30.0,
        }
    }
}

impl EngineConfig {
    /// 校验规则参数
    ///
    /// # 规则
    /// - rollingWindowDays ≥ 1
    /// - maxStreakDays ≥ 1
    /// - hoursPerWorkableDay 为正数
    /// - monthlyCapTolerance / lowUtilizationPct 为有限非负数
    pub fn validate(&self) -> ConfigResult<()> {
        if self.rolling_window_days < 1 {
            return Err(invalid("rollingWindowDays", "必须 ≥ 1"));
        }
        if self.max_streak_days < 1 {
            return Err(invalid("maxStreakDays", "必须 ≥ 1"));
        }
        if !(self.hours_per_workable_day.is_finite() && self.hours_per_workable_day > 0.0) {
            return Err(invalid("hoursPerWorkableDay", "必须为正数"));
        }
        if !(self.monthly_cap_tolerance.is_finite() && self.monthly_cap_tolerance >= 0.0) {
            return Err(invalid("monthlyCapTolerance", "必须为非负数"));
        }
        if !(self.low_utilization_pct.is_finite() && self.low_utilization_pct >= 0.0) {
            return Err(invalid("lowUtilizationPct", "必须为非负数"));
        }
        Ok(())
    }

    /// 本月每位员工最多可上班的天数
    pub fn max_working_days(&self, active_date_count: usize) -> usize {
        if active_date_count > self.working_day_reserve {
            active_date_count - self.working_day_reserve
        } else {
            active_date_count
        }
    }

    /// 默认月工时上限
    pub fn default_monthly_cap(&self, workable_days: usize) -> f64 {
        workable_days as f64 * self.hours_per_workable_day
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidEngineConfig {
        field: field.to_string(),
        message: message.to_string(),
    }
}
