// apps/cpt_cli/src/main.rs

//! CptLiq 命令行界面
//!
//! 对 CPTU 测深计算土层参数与液化严重性指标（LPI、LPI-ish、LSN）。
//!
//! 输入输出均为 JSON：测深文件对应 `Sounding`，情景表对应
//! `ScenarioTable`（场地 → 各情景 PGA），配置对应 `PipelineConfig`。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "cpt_cli", version, about)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 处理单条测深
    Run(commands::run::RunArgs),
    /// 批量处理测深
    Batch(commands::batch::BatchArgs),
    /// 验证配置与测深
    Validate(commands::validate::ValidateArgs),
}

impl Commands {
    fn execute(self) -> anyhow::Result<()> {
        match self {
            Self::Run(args) => commands::run::execute(args),
            Self::Batch(args) => commands::batch::execute(args),
            Self::Validate(args) => commands::validate::execute(args),
        }
    }
}

/// stdout 只留给结果 JSON
fn init_logging(level: Level) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("初始化日志失败: {}", e))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level)?;
    cli.command.execute()
}
