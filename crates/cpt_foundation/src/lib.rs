// crates/cpt_foundation/src/lib.rs

//! CptLiq Foundation Layer
//!
//! 基础层，提供整个项目共用的基础抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型（按测深粒度的失败）
//! - [`outcome`]: 逐行计算结果标记（数值 / 不适用 / 无解 / 超出方法适用范围）
//! - [`validation`]: 输入验证报告
//! - [`numerics`]: 补偿求和等数值工具
//!
//! # 设计原则
//!
//! 1. **最少依赖**: 仅依赖 serde 和 thiserror
//! 2. **显式标记**: "未计算" 与 "算术无定义" 不共用 0 或 NaN
//! 3. **逐行静默、逐测深报错**: 行级守卫产生 [`Outcome`]，测深级失败产生 [`CptError`]
//!
//! # 示例
//!
//! ```
//! use cpt_foundation::{CptError, CptResult, Outcome};
//!
//! fn ratio(a: f64, b: f64) -> Outcome {
//!     Outcome::from_f64(a / b)
//! }
//!
//! assert_eq!(ratio(1.0, 2.0), Outcome::Value(0.5));
//! assert!(ratio(0.0, 0.0).is_not_applicable());
//!
//! fn check(gwt: f64) -> CptResult<()> {
//!     if gwt <= 0.0 {
//!         return Err(CptError::invalid_groundwater("S01", gwt));
//!     }
//!     Ok(())
//! }
//! assert!(check(-1.0).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod numerics;
pub mod outcome;
pub mod validation;

// 重导出常用类型
pub use error::{CptError, CptResult};
pub use numerics::{cap, KahanSum};
pub use outcome::Outcome;
pub use validation::{ValidationError, ValidationReport, ValidationWarning};

