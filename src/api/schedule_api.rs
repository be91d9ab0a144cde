// ==========================================
// 月度排班系统 - 排班 API
// ==========================================
// 职责: 调用前校验（员工/月份）、组装引擎输入、映射引擎结果
// 红线: 不修改宿主快照
// ==========================================

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, SchedulerConfigReader};
use crate::domain::calendar::TargetMonth;
use crate::domain::schedule::{ScheduleOutcome, ScheduleResult};
use crate::engine::{ScheduleInput, ScheduleOrchestrator};
use crate::importer::SchedulerSnapshot;

// ==========================================
// ScheduleApi - 排班 API
// ==========================================

/// 排班API
///
/// 职责：
/// 1. 校验员工与目标月份
/// 2. 按配置构建排班引擎
/// 3. 将"无开放班次"转换为调用方错误
pub struct ScheduleApi {
    config: Arc<dyn SchedulerConfigReader>,
}

impl ScheduleApi {
    /// 创建新的ScheduleApi实例
    pub fn new(config: Arc<dyn SchedulerConfigReader>) -> Self {
        Self { config }
    }

    /// 以快照 settings 为配置来源创建（应用环境变量覆写）
    pub fn for_snapshot(snapshot: &SchedulerSnapshot) -> ApiResult<Self> {
        let manager = ConfigManager::from_env(snapshot.settings.clone())?;
        Ok(Self::new(Arc::new(manager)))
    }

    /// 生成排班
    ///
    /// # 参数
    /// - snapshot: 宿主快照
    /// - month: 目标月份 "YYYY-MM"；为空时依次取配置、快照 settings 中的月份
    ///
    /// # 返回
    /// - Err(NoStaff): 没有员工
    /// - Err(MissingMonth): 没有可用的目标月份
    /// - Err(InvalidInput): 月份格式错误
    /// - Err(NoOpenShifts): 本月没有开放班次
    pub fn generate_schedule(
        &self,
        snapshot: &SchedulerSnapshot,
        month: Option<&str>,
    ) -> ApiResult<ScheduleResult> {
        if snapshot.staff.is_empty() {
            return Err(ApiError::NoStaff);
        }

        let month_value = month
            .map(str::to_string)
            .or_else(|| self.config.target_month())
            .or_else(|| snapshot.settings.month.clone())
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .ok_or(ApiError::MissingMonth)?;

        let target = TargetMonth::parse(&month_value)?;
        self.generate_for_month(snapshot, target)
    }

    /// 按已解析的月份生成排班
    pub fn generate_for_month(
        &self,
        snapshot: &SchedulerSnapshot,
        month: TargetMonth,
    ) -> ApiResult<ScheduleResult> {
        if snapshot.staff.is_empty() {
            return Err(ApiError::NoStaff);
        }

        let input = ScheduleInput {
            month,
            staff: &snapshot.staff,
            closures: &snapshot.closures,
            holidays: &snapshot.holidays,
            new_joiner_limit: self.config.new_joiner_limit(),
        };
        let orchestrator = ScheduleOrchestrator::new(self.config.engine_config());

        match orchestrator.generate(&input) {
            ScheduleOutcome::Generated(result) => {
                for warning in &result.warnings {
                    warn!(month = %month, "{}", warning);
                }
                info!(
                    month = %month,
                    coverage = %result.coverage.percent,
                    "排班生成完成"
                );
                Ok(result)
            }
            ScheduleOutcome::NothingToSchedule { reason } => {
                warn!(month = %month, reason = %reason, "排班未生成");
                Err(ApiError::NoOpenShifts(reason))
            }
        }
    }
}
