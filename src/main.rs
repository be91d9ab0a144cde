// ==========================================
// 月度排班系统 - 命令行入口
// ==========================================
// 用法: shift-scheduler [SNAPSHOT] [MONTH]（--help 查看说明）
// 输出: 排班结果包（JSON）写入 stdout
// ==========================================

use clap::Parser;
use shift_scheduler::app::{run, CliArgs};
use shift_scheduler::logging;

fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", shift_scheduler::APP_NAME, shift_scheduler::VERSION);
    tracing::info!("==================================================");

    let args = CliArgs::parse();
    let result = run(&args)?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
