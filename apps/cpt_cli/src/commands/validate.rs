// apps/cpt_cli/src/commands/validate.rs

//! 配置验证命令
//!
//! 验证配置文件，可选地同时验证测深文件。

use anyhow::{bail, Result};
use clap::Args;
use cpt_config::PipelineConfig;
use cpt_physics::Sounding;
use std::path::PathBuf;
use tracing::{error, info, warn};

use super::read_json;

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: PathBuf,

    /// 测深文件 (JSON)
    #[arg(short, long)]
    pub sounding: Option<PathBuf>,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== CptLiq 配置验证 ===");

    let mut errors = 0usize;
    let mut warnings = 0usize;

    match PipelineConfig::from_file(&args.config) {
        Ok(config) => {
            let labels: Vec<&str> = config.scenarios.iter().map(|s| s.label.as_str()).collect();
            info!("配置有效: 情景 {:?}, 地下水位策略 {:?}", labels, config.gwt_policy);
        }
        Err(e) => {
            error!("配置无效: {}", e);
            errors += 1;
        }
    }

    if let Some(path) = &args.sounding {
        let sounding: Sounding = read_json(path, "测深文件")?;
        let report = sounding.validate();
        errors += report.error_count();
        warnings += report.warning_count();
        if report.is_valid() && !report.has_warnings() {
            info!("测深 {} 有效: {} 行", sounding.site(), sounding.len());
        } else if report.is_valid() {
            warn!("{}", report);
        } else {
            error!("{}", report);
        }
    }

    if errors > 0 || (args.strict && warnings > 0) {
        bail!("验证失败: {} 个错误, {} 个警告", errors, warnings);
    }
    info!("验证通过 ({} 个警告)", warnings);
    Ok(())
}
