// crates/cpt_config/src/lib.rs

//! CptLiq Config Layer
//!
//! 配置层，提供地震情景、迭代求解器参数与地下水位策略。
//!
//! # 模块概览
//!
//! - [`pipeline_config`]: PipelineConfig 流水线配置（JSON 序列化）
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! cpt_cli        ─> PipelineConfig::from_file
//! cpt_physics    ─> SoundingPipeline::new(PipelineConfig)
//! cpt_config     ─> PipelineConfig, ScenarioConfig (本层)
//! cpt_foundation
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod pipeline_config;

// 重导出核心类型
pub use error::ConfigError;
pub use pipeline_config::{GwtPolicy, IterationConfig, PipelineConfig, ScenarioConfig};
