// ==========================================
// 月度排班系统 - 应用层
// ==========================================
// 职责: 命令行入口的参数解析、快照路径、执行流程
// ==========================================

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::api::ScheduleApi;
use crate::domain::schedule::ScheduleResult;
use crate::importer::SnapshotLoader;

/// 快照路径环境变量
pub const SNAPSHOT_PATH_ENV: &str = "SHIFT_SCHEDULER_SNAPSHOT_PATH";

/// 快照文件名
pub const SNAPSHOT_FILE_NAME: &str = "schedule_snapshot.json";

/// 命令行参数
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "shift-scheduler", version)]
#[command(about = "读取宿主快照，生成月度排班结果包（JSON）", long_about = None)]
pub struct CliArgs {
    /// 宿主快照文件（缺省时取用户数据目录下的快照）
    #[arg(env = "SHIFT_SCHEDULER_SNAPSHOT_PATH")]
    pub snapshot: Option<PathBuf>,

    /// 目标月份 YYYY-MM（缺省时取配置或快照 settings）
    pub month: Option<String>,
}

impl CliArgs {
    /// 实际使用的快照路径
    pub fn snapshot_path(&self) -> PathBuf {
        self.snapshot
            .clone()
            .unwrap_or_else(get_default_snapshot_path)
    }
}

/// 获取默认快照路径
///
/// 优先级: 用户数据目录 > 当前目录
pub fn get_default_snapshot_path() -> PathBuf {
    let mut path = PathBuf::from(".").join(SNAPSHOT_FILE_NAME);

    if let Some(data_dir) = dirs::data_dir() {
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("shift-scheduler-dev").join(SNAPSHOT_FILE_NAME);
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("shift-scheduler").join(SNAPSHOT_FILE_NAME);
        }
    }

    path
}

/// 执行一次排班: 读取快照 → 生成排班
pub fn run(args: &CliArgs) -> anyhow::Result<ScheduleResult> {
    let path = args.snapshot_path();
    info!(path = %path.display(), "加载快照");
    let snapshot = SnapshotLoader::from_path(&path)
        .with_context(|| format!("无法加载快照: {}", path.display()))?;

    let api = ScheduleApi::for_snapshot(&snapshot)?;
    let result = api.generate_schedule(&snapshot, args.month.as_deref())?;
    Ok(result)
}
