// ==========================================
// 月度排班系统 - 宿主快照导入
// ==========================================
// 职责: 读取宿主保存的 JSON 状态，补默认值并规整
// 格式: { staff, closures, holidays, settings }
// 红线: 只读，不回写宿主存储
// ==========================================

use crate::config::SchedulerSettings;
use crate::domain::calendar::{Closure, Holiday};
use crate::domain::staff::StaffMember;
use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

// ==========================================
// SchedulerSnapshot - 宿主快照
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchedulerSnapshot {
    #[serde(default)]
    pub staff: Vec<StaffMember>,
    #[serde(default)]
    pub closures: Vec<Closure>,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    #[serde(default)]
    pub settings: SchedulerSettings,
}

impl SchedulerSnapshot {
    /// 规整全部员工记录
    pub fn normalize(&mut self) {
        for staff in &mut self.staff {
            staff.normalize();
        }
    }

    /// 校验员工记录与规则参数
    ///
    /// # 返回
    /// 第一条无效记录的序号与原因，或无效的规则参数
    pub fn validate(&self) -> ImportResult<()> {
        self.settings.engine.validate()?;

        for (index, staff) in self.staff.iter().enumerate() {
            staff
                .validate()
                .map_err(|source| ImportError::InvalidStaffRecord { index, source })?;
        }
        Ok(())
    }
}

// ==========================================
// SnapshotLoader - 快照加载器
// ==========================================
pub struct SnapshotLoader;

impl SnapshotLoader {
    /// 从文件加载快照
    ///
    /// # 错误
    /// - FileNotFound: 路径不存在
    /// - FileReadError: 读取失败
    /// - JsonParseError / InvalidStaffRecord: 内容无效
    pub fn from_path<P: AsRef<Path>>(path: P) -> ImportResult<SchedulerSnapshot> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        debug!(path = %path.display(), "读取快照文件");
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// 从 JSON 字符串加载快照
    pub fn from_json_str(raw: &str) -> ImportResult<SchedulerSnapshot> {
        if raw.trim().is_empty() {
            warn!("快照内容为空，使用空快照");
            return Ok(SchedulerSnapshot::default());
        }

        let mut snapshot: SchedulerSnapshot = serde_json::from_str(raw)?;
        snapshot.normalize();
        snapshot.validate()?;

        info!(
            staff = snapshot.staff.len(),
            closures = snapshot.closures.len(),
            holidays = snapshot.holidays.len(),
            "快照加载完成"
        );
        Ok(snapshot)
    }
}
