// ==========================================
// 月度排班系统 - 配置管理器
// ==========================================
// 职责: 合并宿主设置与环境变量覆写，对外提供只读配置
// 优先级: 环境变量 > 快照 settings > 默认值
// ==========================================

use crate::config::config_reader::SchedulerConfigReader;
use crate::config::engine_config::EngineConfig;
use crate::config::error::{ConfigError, ConfigResult};
use crate::config::settings::SchedulerSettings;
use std::str::FromStr;
use tracing::debug;

// ==========================================
// 配置键（环境变量名）
// ==========================================
pub mod config_keys {
    pub const MONTH: &str = "SHIFT_SCHEDULER_MONTH";
    pub const NEW_JOINER_LIMIT: &str = "SHIFT_SCHEDULER_NEW_JOINER_LIMIT";
    pub const HIGH_SKILL_THRESHOLD: &str = "SHIFT_SCHEDULER_HIGH_SKILL_THRESHOLD";
    pub const MAX_STREAK_DAYS: &str = "SHIFT_SCHEDULER_MAX_STREAK_DAYS";
    pub const WORKING_DAY_RESERVE: &str = "SHIFT_SCHEDULER_WORKING_DAY_RESERVE";
    pub const HOURS_PER_WORKABLE_DAY: &str = "SHIFT_SCHEDULER_HOURS_PER_WORKABLE_DAY";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    settings: SchedulerSettings,
}

impl ConfigManager {
    /// 从宿主设置创建
    ///
    /// # 错误
    /// - InvalidEngineConfig: settings.engine 中的规则参数无效
    pub fn new(settings: SchedulerSettings) -> ConfigResult<Self> {
        settings.engine.validate()?;
        Ok(Self { settings })
    }

    /// 从宿主设置创建，并应用进程环境变量覆写
    pub fn from_env(settings: SchedulerSettings) -> ConfigResult<Self> {
        let mut manager = Self::new(settings)?;
        manager.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(manager)
    }

    /// 应用覆写
    ///
    /// # 参数
    /// - lookup: 配置键 → 覆写值（空白值视为未设置）
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(month) = get(config_keys::MONTH) {
            debug!(month = %month, "覆写目标月份");
            self.settings.month = Some(month);
        }
        if let Some(raw) = get(config_keys::NEW_JOINER_LIMIT) {
            self.settings.new_joiner_limit = parse_value(config_keys::NEW_JOINER_LIMIT, &raw)?;
        }

        let engine = &mut self.settings.engine;
        if let Some(raw) = get(config_keys::HIGH_SKILL_THRESHOLD) {
            engine.high_skill_threshold = parse_value(config_keys::HIGH_SKILL_THRESHOLD, &raw)?;
        }
        if let Some(raw) = get(config_keys::MAX_STREAK_DAYS) {
            engine.max_streak_days = parse_value(config_keys::MAX_STREAK_DAYS, &raw)?;
        }
        if let Some(raw) = get(config_keys::WORKING_DAY_RESERVE) {
            engine.working_day_reserve = parse_value(config_keys::WORKING_DAY_RESERVE, &raw)?;
        }
        if let Some(raw) = get(config_keys::HOURS_PER_WORKABLE_DAY) {
            let hours: f64 = parse_value(config_keys::HOURS_PER_WORKABLE_DAY, &raw)?;
            if !(hours.is_finite() && hours > 0.0) {
                return Err(ConfigError::InvalidValue {
                    key: config_keys::HOURS_PER_WORKABLE_DAY.to_string(),
                    value: raw,
                    message: "必须为正数".to_string(),
                });
            }
            engine.hours_per_workable_day = hours;
        }
        engine.validate()
    }

    pub fn settings(&self) -> &SchedulerSettings {
        &self.settings
    }
}

fn parse_value<T>(key: &str, raw: &str) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
        message: e.to_string(),
    })
}

impl SchedulerConfigReader for ConfigManager {
    fn engine_config(&self) -> EngineConfig {
        self.settings.engine.clone()
    }

    fn new_joiner_limit(&self) -> u32 {
        self.settings.effective_new_joiner_limit()
    }

    fn target_month(&self) -> Option<String> {
        self.settings
            .month
            .as_ref()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}
