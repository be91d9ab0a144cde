// ==========================================
// 月度排班系统 - 导入层
// ==========================================
// 职责: 读取宿主快照，生成引擎输入
// 支持: JSON 文件 / 字符串
// ==========================================

pub mod error;
pub mod snapshot_loader;

pub use error::{ImportError, ImportResult};
pub use snapshot_loader::{SchedulerSnapshot, SnapshotLoader};
