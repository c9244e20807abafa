// apps/cpt_cli/src/commands/run.rs

//! 单条测深处理命令

use anyhow::{Context, Result};
use clap::Args;
use cpt_physics::{ScenarioTable, Sounding, SoundingPipeline};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use super::{load_config, read_json, write_json};

/// 运行参数
#[derive(Args)]
pub struct RunArgs {
    /// 测深文件 (JSON)
    #[arg(short, long)]
    pub sounding: PathBuf,

    /// 情景表文件 (JSON，场地 → PGA)
    #[arg(long)]
    pub scenarios: PathBuf,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 输出文件，缺省写 stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    let config = load_config(args.config.as_ref())?;
    let sounding: Sounding = read_json(&args.sounding, "测深文件")?;
    let table: ScenarioTable = read_json(&args.scenarios, "情景表")?;

    info!("场地 {}: {} 行, 情景 {} 个", sounding.site(), sounding.len(), config.scenarios.len());

    let report = sounding.validate();
    if report.has_warnings() {
        warn!("{}", report);
    }

    let pipeline = SoundingPipeline::new(config).context("配置无效")?;
    let start = Instant::now();
    let result = pipeline
        .run_with_lookup(&sounding, &table)
        .with_context(|| format!("处理场地 {} 失败", sounding.site()))?;

    for summary in &result.summary.scenarios {
        info!(
            "{}: LPI={:.3}, LPI-ish={:.3}/{:.3}, LSN={:.3}",
            summary.label, summary.lpi, summary.lpi_ish_basic, summary.lpi_ish_cumulative, summary.lsn
        );
    }
    if !result.summary.sbt_report.is_converged() {
        warn!("Ic 求解未收敛行: {}", result.summary.sbt_report.unconverged_rows);
    }
    info!("耗时 {:.2?}", start.elapsed());

    write_json(&serde_json::to_value(&result)?, args.output.as_ref())
}
