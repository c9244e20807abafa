// crates/cpt_foundation/src/outcome.rs

//! 逐行计算结果标记
//!
//! 每个派生字段都是一个 [`Outcome`]：
//!
//! | 变体 | 含义 |
//! |------|------|
//! | `Value(x)` | 有限数值 |
//! | `NotApplicable` | 该行不属于公式的定义域（如粘性土的相对密实度），或算术无定义 |
//! | `NoSolution` | 迭代求解器达到最大迭代次数仍未收敛 |
//! | `OutOfMethodRange` | 超出经验方法的适用范围（如 rd 仅适用于 z < 20 m） |
//!
//! 下游公式消费 `NoSolution` 时自身输出 `NotApplicable`；
//! `OutOfMethodRange` 沿计算链传播，便于区分 "方法不适用" 与 "土类不适用"。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 逐行计算结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// 有限数值
    Value(f64),
    /// 不适用 / 未计算
    #[default]
    NotApplicable,
    /// 迭代无解
    NoSolution,
    /// 超出方法适用范围
    OutOfMethodRange,
}

impl Outcome {
    /// 从 f64 创建，非有限值（NaN、±Inf）视为不适用
    #[inline]
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Self::Value(value)
        } else {
            Self::NotApplicable
        }
    }

    /// 条件成立时求值，否则不适用
    #[inline]
    pub fn when(condition: bool, f: impl FnOnce() -> f64) -> Self {
        if condition {
            Self::from_f64(f())
        } else {
            Self::NotApplicable
        }
    }

    /// 获取数值
    #[inline]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// 转为 f64，非数值变体返回 NaN
    ///
    /// 用于需要 IEEE 比较语义的场合：任何与 NaN 的比较均为 false。
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.value().unwrap_or(f64::NAN)
    }

    /// 是否为数值
    #[inline]
    pub fn is_value(self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// 是否不适用
    #[inline]
    pub fn is_not_applicable(self) -> bool {
        matches!(self, Self::NotApplicable)
    }

    /// 是否无解
    #[inline]
    pub fn is_no_solution(self) -> bool {
        matches!(self, Self::NoSolution)
    }

    /// 是否超出方法范围
    #[inline]
    pub fn is_out_of_method_range(self) -> bool {
        matches!(self, Self::OutOfMethodRange)
    }

    /// 对数值应用公式
    ///
    /// `NoSolution` 被下游消费后变为 `NotApplicable`，`OutOfMethodRange` 保持。
    #[inline]
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Self::Value(v) => Self::from_f64(f(v)),
            other => other.downstream(),
        }
    }

    /// 组合两个结果
    ///
    /// 两者皆为数值时求值；否则 `OutOfMethodRange` 优先，其次 `NotApplicable`。
    #[inline]
    pub fn zip_with(self, other: Self, f: impl FnOnce(f64, f64) -> f64) -> Self {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => Self::from_f64(f(a, b)),
            (a, b) => {
                if a.is_out_of_method_range() || b.is_out_of_method_range() {
                    Self::OutOfMethodRange
                } else {
                    Self::NotApplicable
                }
            }
        }
    }

    /// 被下游公式消费后的标记
    #[inline]
    pub fn downstream(self) -> Self {
        match self {
            Self::NoSolution => Self::NotApplicable,
            other => other,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{}", v),
            Self::NotApplicable => write!(f, "n/a"),
            Self::NoSolution => write!(f, "No Solution"),
            Self::OutOfMethodRange => write!(f, "out of range"),
        }
    }
}
