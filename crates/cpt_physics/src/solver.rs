// crates/cpt_physics/src/solver.rs

//! 不动点求解器的公共结果类型
//!
//! 土类指数求解器和相对密实度求解器的收敛状态只通过 [`SolverReport`]
//! 暴露，猜测向量与残差留在求解器内部。

use serde::{Deserialize, Serialize};

/// 求解器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverStatus {
    /// 收敛
    Converged,
    /// 达到最大迭代次数
    MaxIterationsReached,
}

/// 求解器结果摘要
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverReport {
    /// 求解状态
    pub status: SolverStatus,
    /// 迭代次数
    pub iterations: usize,
    /// 未收敛（标记为无解）的行数
    pub unconverged_rows: usize,
}

impl SolverReport {
    /// 收敛结果
    pub fn converged(iterations: usize) -> Self {
        Self {
            status: SolverStatus::Converged,
            iterations,
            unconverged_rows: 0,
        }
    }

    /// 达到迭代上限
    pub fn max_iterations_reached(iterations: usize, unconverged_rows: usize) -> Self {
        Self {
            status: SolverStatus::MaxIterationsReached,
            iterations,
            unconverged_rows,
        }
    }

    /// 是否成功收敛
    pub fn is_converged(&self) -> bool {
        self.status == SolverStatus::Converged
    }
}

impl Default for SolverReport {
    fn default() -> Self {
        Self::converged(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_constructors() {
        assert!(SolverReport::converged(3).is_converged());
        let r = SolverReport::max_iterations_reached(100, 2);
        assert!(!r.is_converged());
        assert_eq!(r.unconverged_rows, 2);
    }
}
