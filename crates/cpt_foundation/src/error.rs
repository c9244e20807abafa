// crates/cpt_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `CptError` 枚举和 `CptResult` 类型别名。
//!
//! # 错误层次
//!
//! - 逐行守卫（如 Ic 未计算、深度超出方法适用范围）**不是**错误，
//!   由 [`crate::Outcome`] 表达；
//! - 本模块只表达整条测深的失败：缺少外部数据、前置条件不满足、输入无效。
//!   批处理记录这些失败并继续处理其余测深。
//!
//! # 示例
//!
//! ```
//! use cpt_foundation::error::{CptError, CptResult};
//!
//! fn lookup_pga(site: &str) -> CptResult<f64> {
//!     Err(CptError::missing_external_data(site, "PGA"))
//! }
//!
//! assert!(lookup_pga("S01").is_err());
//! ```

use thiserror::Error;

/// 统一结果类型
pub type CptResult<T> = Result<T, CptError>;

/// CptLiq 错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CptError {
    /// 外部数据缺失（如情景表中没有该场地的 PGA）
    #[error("场地 {site} 缺少外部数据: {what}")]
    MissingExternalData {
        /// 场地标识
        site: String,
        /// 缺失的数据项
        what: String,
    },

    /// 地下水位无效（GWT ≤ 0 或缺失）
    #[error("场地 {site} 地下水位无效: GWT={gwt}")]
    InvalidGroundwater {
        /// 场地标识
        site: String,
        /// 记录的地下水位 [m]
        gwt: f64,
    },

    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    /// 深度序列非严格递增
    #[error("深度序列非严格递增: 第{row}行 {depth} m ≤ 前一行 {previous} m")]
    NonIncreasingDepth {
        /// 行号
        row: usize,
        /// 当前深度 [m]
        depth: f64,
        /// 前一行深度 [m]
        previous: f64,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl CptError {
    /// 外部数据缺失
    pub fn missing_external_data(site: impl Into<String>, what: impl Into<String>) -> Self {
        Self::MissingExternalData {
            site: site.into(),
            what: what.into(),
        }
    }

    /// 地下水位无效
    pub fn invalid_groundwater(site: impl Into<String>, gwt: f64) -> Self {
        Self::InvalidGroundwater {
            site: site.into(),
            gwt,
        }
    }

    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 是否为缺少外部数据
    pub fn is_missing_external_data(&self) -> bool {
        matches!(self, Self::MissingExternalData { .. })
    }

    /// 是否为地下水位前置条件失败
    pub fn is_invalid_groundwater(&self) -> bool {
        matches!(self, Self::InvalidGroundwater { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CptError::missing_external_data("S01", "PGA");
        assert!(err.to_string().contains("S01"));
        assert!(err.to_string().contains("PGA"));
    }

    #[test]
    fn test_invalid_groundwater() {
        let err = CptError::invalid_groundwater("S02", 0.0);
        assert!(err.is_invalid_groundwater());
        assert!(!err.is_missing_external_data());
    }

    #[test]
    fn test_non_increasing_depth_display() {
        let err = CptError::NonIncreasingDepth {
            row: 3,
            depth: 1.0,
            previous: 1.2,
        };
        let text = err.to_string();
        assert!(text.contains("第3行"));
        assert!(text.contains("1.2"));
    }
}
