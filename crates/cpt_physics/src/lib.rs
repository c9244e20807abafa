// crates/cpt_physics/src/lib.rs

//! CPTU 土层参数与液化严重性计算核心
//!
//! 对单条静力触探（CPTU）测深逐行推导土工参数，并计算地震液化指标：
//! - 应力柱 (stress) - 重度、总应力、有效应力、归一化锥尖阻力
//! - 土类指数求解器 (sbt) - 不动点迭代求 n、Qtn、Ic
//! - 相对密实度求解器 (density) - Idriss & Boulanger (2008) 不动点迭代
//! - 土层属性 (properties) - 粘性土 / 无粘性土经验公式库
//! - 液化因子 (liquefaction) - CSR、CRR、安全系数 FS
//! - 液化层厚度 (thickness) - h1/h2 扫描
//! - 严重性指标 (severity) - LPI、LPI-ish、LSN 深度积分
//! - 流水线 (pipeline) - 按依赖顺序执行以上组件，批处理
//!
//! # 计算顺序
//!
//! ```text
//! StressColumn ─┬─> SoilBehaviorTypeSolver ─┐
//!               └─> RelativeDensitySolver ──┴─> LayerProperties
//!                  ─> LiquefactionFactorSolver ─> LayerThickness ─> LPI / LPI-ish / LSN
//! ```
//!
//! # 使用示例
//!
//! ```
//! use cpt_config::PipelineConfig;
//! use cpt_physics::{RawRow, SiteInfo, SiteScenario, Sounding, SoundingPipeline};
//!
//! let sounding = Sounding::new(
//!     SiteInfo::new("S01", Some(1.0), Some(0.5)),
//!     vec![
//!         RawRow::new(0.5, 2.0, 10.0, 2.0),
//!         RawRow::new(1.5, 5.0, 20.0, 5.05),
//!         RawRow::new(2.5, 10.0, 50.0, 10.1),
//!     ],
//! );
//! let scenario = SiteScenario::new()
//!     .with_pga("20may", 0.25)
//!     .with_pga("29may", 0.2);
//!
//! let pipeline = SoundingPipeline::new(PipelineConfig::default()).unwrap();
//! let result = pipeline.run(&sounding, &scenario).unwrap();
//! assert_eq!(result.rows.len(), 3);
//! assert_eq!(result.summary.scenarios.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constants;
pub mod density;
pub mod fields;
pub mod liquefaction;
pub mod pipeline;
pub mod properties;
pub mod sbt;
pub mod scenario;
pub mod severity;
pub mod solver;
pub mod sounding;
pub mod stress;
pub mod thickness;

// 重导出常用类型
pub use density::{DensityProfile, RelativeDensitySolver};
pub use fields::{
    DerivedRow, FieldKey, ScenarioField, ScenarioSummary, SoundingResult, SoundingSummary,
};
pub use liquefaction::{LiquefactionFactorSolver, LiquefactionRow, ScenarioFactors, ScenarioInput};
pub use pipeline::{process_batch, BatchReport, SoundingPipeline};
pub use properties::{LayerProperties, SoilClass};
pub use sbt::{SbtProfile, SoilBehaviorTypeSolver};
pub use scenario::{PreforoStatus, ScenarioLookup, ScenarioTable, SiteScenario};
pub use severity::{liquefaction_potential_index, liquefaction_severity_number, lpi_ish, LsnResult};
pub use solver::{SolverReport, SolverStatus};
pub use sounding::{RawRow, SiteInfo, Sounding};
pub use stress::{StressColumn, StressProfile};
pub use thickness::{scan_basic, scan_cumulative, LayerThickness};

pub use cpt_foundation::{CptError, CptResult, Outcome};
