// apps/cpt_cli/src/commands/batch.rs

//! 批处理命令

use anyhow::{Context, Result};
use clap::Args;
use cpt_physics::{process_batch, ScenarioTable, Sounding};
use serde_json::json;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use super::{load_config, read_json, write_json};

/// 批处理参数
#[derive(Args)]
pub struct BatchArgs {
    /// 测深文件 (JSON 数组)
    #[arg(short, long)]
    pub soundings: PathBuf,

    /// 情景表文件 (JSON)
    #[arg(long)]
    pub scenarios: PathBuf,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 输出文件，缺省写 stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 只输出汇总，不含逐行结果
    #[arg(long)]
    pub summary_only: bool,
}

/// 执行批处理命令
pub fn execute(args: BatchArgs) -> Result<()> {
    let config = load_config(args.config.as_ref())?;
    let soundings: Vec<Sounding> = read_json(&args.soundings, "测深文件")?;
    let table: ScenarioTable = read_json(&args.scenarios, "情景表")?;
    info!("批处理 {} 条测深, 情景表 {} 个场地", soundings.len(), table.len());

    let start = Instant::now();
    let report = process_batch(&soundings, &table, &config).context("配置无效")?;
    info!("完成 {} 条, 耗时 {:.2?}", report.processed(), start.elapsed());

    if !report.missing_pga.is_empty() {
        warn!("缺少 PGA: {:?}", report.missing_pga);
    }
    if !report.invalid_gwt.is_empty() {
        warn!("地下水位无效: {:?}", report.invalid_gwt);
    }
    if !report.gwt_above_preforo.is_empty() {
        warn!("地下水位浅于预钻孔底: {:?}", report.gwt_above_preforo);
    }
    for (site, err) in &report.failed {
        warn!("{}: {}", site, err);
    }

    let results = if args.summary_only {
        report
            .results
            .iter()
            .map(|r| json!({ "site": r.site, "summary": r.summary }))
            .collect::<Vec<_>>()
    } else {
        report
            .results
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?
    };

    let failed: Vec<_> = report
        .failed
        .iter()
        .map(|(site, err)| json!({ "site": site, "error": err.to_string() }))
        .collect();

    let value = json!({
        "results": results,
        "missing_pga": report.missing_pga,
        "invalid_gwt": report.invalid_gwt,
        "gwt_above_preforo": report.gwt_above_preforo,
        "preforo_missing": report.preforo_missing,
        "failed": failed,
    });

    write_json(&value, args.output.as_ref())
}
