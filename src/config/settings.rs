// ==========================================
// 月度排班系统 - 宿主设置
// ==========================================
// 存储: 宿主快照 settings 节点（本库只读）
// ==========================================

use crate::config::engine_config::EngineConfig;
use serde::{Deserialize, Serialize};

/// 新人配额默认值
pub const DEFAULT_NEW_JOINER_LIMIT: i64 = 1;

fn default_new_joiner_limit() -> i64 {
    DEFAULT_NEW_JOINER_LIMIT
}

/// 宿主设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerSettings {
    /// 目标月份 "YYYY-MM"
    #[serde(default)]
    pub month: Option<String>,

    /// 同一 (日期, 班次) 允许的新人数量
    #[serde(default = "default_new_joiner_limit")]
    pub new_joiner_limit: i64,

    /// 规则参数覆写（缺省字段取默认值）
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            month: None,
            new_joiner_limit: DEFAULT_NEW_JOINER_LIMIT,
            engine: EngineConfig::default(),
        }
    }
}

impl SchedulerSettings {
    /// 引擎实际使用的新人配额
    ///
    /// 非正数按 1 处理（0 不代表"禁止新人"）
    pub fn effective_new_joiner_limit(&self) -> u32 {
        if self.new_joiner_limit <= 0 {
            DEFAULT_NEW_JOINER_LIMIT as u32
        } else {
            u32::try_from(self.new_joiner_limit).unwrap_or(u32::MAX)
        }
    }
}
