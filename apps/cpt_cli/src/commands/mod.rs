// apps/cpt_cli/src/commands/mod.rs

//! 子命令

pub mod batch;
pub mod run;
pub mod validate;

use anyhow::{Context, Result};
use cpt_config::PipelineConfig;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;

/// 读取并解析 JSON 文件
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("读取{}失败: {}", what, path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("解析{}失败: {}", what, path.display()))
}

/// 加载配置，未指定时使用默认配置
pub(crate) fn load_config(path: Option<&PathBuf>) -> Result<PipelineConfig> {
    match path {
        Some(path) => {
            info!("加载配置: {}", path.display());
            PipelineConfig::from_file(path)
                .with_context(|| format!("加载配置失败: {}", path.display()))
        }
        None => {
            info!("使用默认配置");
            Ok(PipelineConfig::default())
        }
    }
}

/// 输出 JSON：指定路径时写文件，否则写 stdout
pub(crate) fn write_json(value: &serde_json::Value, output: Option<&PathBuf>) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("写入失败: {}", path.display()))?;
            info!("结果已写入 {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}
