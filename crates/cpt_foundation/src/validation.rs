// crates/cpt_foundation/src/validation.rs

//! 运行时验证工具
//!
//! 提供验证报告和错误/警告类型，用于测深输入数据验证。
//!
//! # 示例
//!
//! ```
//! use cpt_foundation::validation::{ValidationReport, ValidationError};
//!
//! let depth = f64::NAN;
//! let mut report = ValidationReport::new();
//! if !depth.is_finite() {
//!     report.add_error(ValidationError::NonFinite {
//!         field: "depth",
//!         row: 0,
//!         value: depth,
//!     });
//! }
//!
//! assert!(report.has_errors());
//! ```

use std::fmt;

/// 验证报告
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// 错误列表
    pub errors: Vec<ValidationError>,
    /// 警告列表
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// 创建空的验证报告
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加错误
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// 是否有错误
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 是否有警告
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// 错误数量
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// 警告数量
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// 是否通过（无错误）
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "验证报告:")?;
        writeln!(f, "  错误: {} 个", self.error_count())?;
        writeln!(f, "  警告: {} 个", self.warning_count())?;

        if self.has_errors() {
            writeln!(f, "\n错误详情:")?;
            for (i, err) in self.errors.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, err)?;
            }
        }

        if self.has_warnings() {
            writeln!(f, "\n警告详情:")?;
            for (i, warn) in self.warnings.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, warn)?;
            }
        }

        Ok(())
    }
}

/// 验证错误类型
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// 测深为空
    Empty,
    /// 非有限值
    NonFinite {
        /// 字段名称
        field: &'static str,
        /// 行号
        row: usize,
        /// 非有限的数值
        value: f64,
    },
    /// 深度非严格递增
    NonIncreasingDepth {
        /// 行号
        row: usize,
        /// 当前深度
        depth: f64,
        /// 前一行深度
        previous: f64,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "测深不含任何数据行"),
            Self::NonFinite { field, row, value } => {
                write!(f, "第{}行: 字段{}={} (非有限值)", row, field, value)
            }
            Self::NonIncreasingDepth {
                row,
                depth,
                previous,
            } => {
                write!(
                    f,
                    "第{}行: 深度 {} m 不大于前一行 {} m",
                    row, depth, previous
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// 验证警告类型
#[derive(Debug, Clone)]
pub enum ValidationWarning {
    /// 低数值
    LowValue {
        /// 字段名称
        field: &'static str,
        /// 行号
        row: usize,
        /// 实际值
        value: f64,
        /// 阈值
        threshold: f64,
    },
    /// 缺少可选的测深级数据
    MissingOptional {
        /// 字段名称
        field: &'static str,
    },
    /// 自定义警告
    Custom {
        /// 自定义消息
        message: String,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LowValue {
                field,
                row,
                value,
                threshold,
            } => {
                write!(f, "第{}行: 字段{}={} 低于阈值{}", row, field, value, threshold)
            }
            Self::MissingOptional { field } => write!(f, "缺少可选字段 {}", field),
            Self::Custom { message } => write!(f, "{}", message),
        }
    }
}
