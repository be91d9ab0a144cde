// ==========================================
// 月度排班系统 - 排班总控
// ==========================================
// 职责: 串联班次目录 → 资格判定 → 候选排序 → 提交 → 汇总
// 红线: 单次贪心遍历，无回溯；运行上下文随调用创建、随返回丢弃
// ==========================================

use crate::config::EngineConfig;
use crate::domain::calendar::{Closure, ClosureSet, Holiday, ShiftEntry, TargetMonth};
use crate::domain::schedule::{LocationSchedule, ScheduleOutcome, ScheduleResult, ShiftBlock};
use crate::domain::staff::StaffMember;
use crate::domain::types::Location;
use crate::engine::aggregator::{build_staff_stats, CoverageAggregator};
use crate::engine::committer::AssignmentCommitter;
use crate::engine::eligibility::EligibilityEvaluator;
use crate::engine::ranker::CandidateRanker;
use crate::engine::shift_catalog::{active_dates, count_workable_days, ShiftCatalogBuilder};
use crate::engine::staff_state::{NewJoinerLedger, StaffSchedulingState};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, trace};

/// 目标月份没有开放班次时的提示
pub const NO_OPEN_SHIFTS_MESSAGE: &str = "No open shifts in the selected month.";

/// 一次排班运行的输入（宿主快照的只读视图）
#[derive(Debug, Clone, Copy)]
pub struct ScheduleInput<'a> {
    pub month: TargetMonth,
    pub staff: &'a [StaffMember],
    pub closures: &'a [Closure],
    pub holidays: &'a [Holiday],
    pub new_joiner_limit: u32,
}

// ==========================================
// ScheduleOrchestrator - 排班总控
// ==========================================
pub struct ScheduleOrchestrator {
    config: EngineConfig,
    catalog: ShiftCatalogBuilder,
    eligibility: EligibilityEvaluator,
    ranker: CandidateRanker,
    committer: AssignmentCommitter,
}

impl ScheduleOrchestrator {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            catalog: ShiftCatalogBuilder::new(),
            eligibility: EligibilityEvaluator::new(&config),
            ranker: CandidateRanker::new(&config),
            committer: AssignmentCommitter::new(&config),
            config,
        }
    }

    /// 生成整月排班
    ///
    /// 流程:
    /// 1) 生成班次目录；为空则返回 NothingToSchedule
    /// 2) 计算上班日期、可工作日、默认月上限、最多上班天数
    /// 3) 初始化每位员工的累计状态
    /// 4) 按目录顺序逐个班次、逐个班位: 判定 → 排序 → 提交
    /// 5) 汇总覆盖率与员工统计
    #[instrument(skip(self, input), fields(
        month = %input.month,
        staff_count = input.staff.len(),
        new_joiner_limit = input.new_joiner_limit
    ))]
    pub fn generate(&self, input: &ScheduleInput<'_>) -> ScheduleOutcome {
        // ==========================================
        // 步骤1: 班次目录
        // ==========================================
        let closures = ClosureSet::from_closures(input.closures);
        let entries = self.catalog.build(input.month, &closures);
        if entries.is_empty() {
            info!("本月没有开放班次");
            return ScheduleOutcome::NothingToSchedule {
                reason: NO_OPEN_SHIFTS_MESSAGE.to_string(),
            };
        }

        // ==========================================
        // 步骤2: 月度参数
        // ==========================================
        let working_dates = active_dates(&entries);
        let workable_days = count_workable_days(input.month, input.holidays);
        let default_monthly_cap = self.config.default_monthly_cap(workable_days);
        let max_working_days = self.config.max_working_days(working_dates.len());
        let new_joiner_limit = input.new_joiner_limit.max(1);

        info!(
            entries = entries.len(),
            active_dates = working_dates.len(),
            workable_days,
            default_monthly_cap,
            max_working_days,
            "开始排班"
        );

        // ==========================================
        // 步骤3: 运行上下文
        // ==========================================
        let mut states: Vec<StaffSchedulingState<'_>> = input
            .staff
            .iter()
            .map(|staff| StaffSchedulingState::new(staff, default_monthly_cap, max_working_days))
            .collect();
        let mut ledger = NewJoinerLedger::new();
        let mut coverage = CoverageAggregator::new();
        let mut schedule: BTreeMap<Location, LocationSchedule> = Location::ALL
            .iter()
            .map(|loc| (*loc, LocationSchedule::new()))
            .collect();

        // ==========================================
        // 步骤4: 逐班次填充
        // ==========================================
        for entry in &entries {
            let block = self.fill_entry(entry, &mut states, &mut ledger, &mut coverage, new_joiner_limit);
            schedule
                .entry(entry.location)
                .or_default()
                .entry(entry.date)
                .or_default()
                .insert(entry.key, block);
        }

        // ==========================================
        // 步骤5: 汇总
        // ==========================================
        let stats = build_staff_stats(&states, working_dates.len(), workable_days, &self.config);
        let (coverage, warnings) = coverage.finish();

        info!(
            filled = coverage.filled,
            total = coverage.total,
            percent = %coverage.percent,
            warnings = warnings.len(),
            "排班完成"
        );

        ScheduleOutcome::Generated(ScheduleResult {
            schedule,
            warnings,
            stats,
            coverage,
            month_meta: input.month.meta(),
            default_monthly_cap,
            working_dates,
        })
    }

    /// 填充单个班次的全部班位
    fn fill_entry(
        &self,
        entry: &ShiftEntry,
        states: &mut [StaffSchedulingState<'_>],
        ledger: &mut NewJoinerLedger,
        coverage: &mut CoverageAggregator,
        new_joiner_limit: u32,
    ) -> ShiftBlock {
        let mut block = ShiftBlock {
            names: Vec::new(),
            required: entry.required,
        };
        let mut assigned: Vec<usize> = Vec::new();

        for position in 0..entry.required {
            let eligible = self.eligible_candidates(entry, states, ledger, new_joiner_limit);

            match self.ranker.select(states, &eligible, entry, &assigned) {
                Some(idx) => {
                    self.committer.commit(&mut states[idx], entry, ledger);
                    block.names.push(states[idx].staff.name.clone());
                    assigned.push(idx);
                    coverage.record_filled();
                }
                None => {
                    let warning = coverage.record_unfilled(entry, position);
                    debug!(warning = %warning, "班位无人可排");
                }
            }
        }

        block
    }

    /// 当前班位的合格候选人（保持员工录入顺序）
    fn eligible_candidates(
        &self,
        entry: &ShiftEntry,
        states: &[StaffSchedulingState<'_>],
        ledger: &NewJoinerLedger,
        new_joiner_limit: u32,
    ) -> Vec<usize> {
        states
            .iter()
            .enumerate()
            .filter_map(|(idx, state)| {
                match self.eligibility.evaluate(state, entry, ledger, new_joiner_limit) {
                    Ok(()) => Some(idx),
                    Err(reason) => {
                        trace!(
                            staff = %state.staff.name,
                            date = %entry.date,
                            location = %entry.location,
                            shift = %entry.key,
                            reason = %reason,
                            "不可排"
                        );
                        None
                    }
                }
            })
            .collect()
    }
}

impl Default for ScheduleOrchestrator {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
