// crates/cpt_physics/src/sbt.rs

//! 土类指数求解器 (Robertson 2009)
//!
//! 应力指数 n 依赖 Ic，Ic 又依赖以 n 归一化的 Qtn，因此以不动点迭代求解：
//!
//! ```text
//! Cn  = min(1.7, (Pa/σ'v)^n)
//! Qtn = (qt − σv)/Pa · Cn
//! Ic  = sqrt((3.47 − log10 Qtn)² + (log10 Fr + 1.22)²)
//! n'  = min(1, 0.381 Ic + 0.05 σ'v/Pa − 0.15)
//! ```
//!
//! 所有行每轮同时更新。残差取有符号的 `n − n'`，当每个 Ic > 0 的行
//! 残差 ≤ 容差时收敛。达到迭代上限仍未收敛的行标记为
//! [`Outcome::NoSolution`]。

use cpt_config::IterationConfig;
use cpt_foundation::{cap, Outcome};
use serde::{Deserialize, Serialize};

use crate::constants::PA;
use crate::solver::SolverReport;
use crate::stress::StressProfile;

/// Cn 上限
pub const CN_CEILING: f64 = 1.7;

/// 应力指数 n 上限
pub const N_CEILING: f64 = 1.0;

/// 土类指数 Ic
///
/// `Fr ≤ 0` 或 `Qtn ≤ 0` 时返回 0（未计算标记）；NaN 输入沿公式传播。
#[inline]
pub fn behavior_index(qtn: f64, fr: f64) -> f64 {
    if fr <= 0.0 || qtn <= 0.0 {
        0.0
    } else {
        ((3.47 - qtn.log10()).powi(2) + (fr.log10() + 1.22).powi(2)).sqrt()
    }
}

/// 由 Ic 更新应力指数 n
#[inline]
pub fn stress_exponent(ic: f64, sigma_v_eff: f64) -> f64 {
    cap(0.381 * ic + 0.05 * (sigma_v_eff / PA) - 0.15, N_CEILING)
}

/// 单轮迭代的结果
#[derive(Debug, Clone, PartialEq)]
pub struct SbtPass {
    /// 应力归一化系数 Cn
    pub cn: Vec<f64>,
    /// 归一化锥尖阻力 Qtn
    pub qtn: Vec<f64>,
    /// 土类指数 Ic（0 表示未计算）
    pub ic: Vec<f64>,
    /// 更新后的应力指数 n'
    pub n_next: Vec<f64>,
}

/// 土类指数求解结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SbtProfile {
    /// 最终一轮使用的应力指数 n
    pub n: Vec<f64>,
    /// Cn
    pub cn: Vec<f64>,
    /// Qtn（未收敛行保留最后一轮的数值）
    pub qtn: Vec<f64>,
    /// Ic
    pub ic: Vec<Outcome>,
    /// 求解摘要
    pub report: SolverReport,
}

/// 土类指数求解器
#[derive(Debug, Clone, Copy, Default)]
pub struct SoilBehaviorTypeSolver {
    config: IterationConfig,
}

impl SoilBehaviorTypeSolver {
    /// 创建求解器
    pub fn new(config: IterationConfig) -> Self {
        Self { config }
    }

    /// 迭代参数
    pub fn config(&self) -> &IterationConfig {
        &self.config
    }

    /// 以给定的 n 执行一轮计算
    pub fn evaluate_pass(&self, stress: &StressProfile, n: &[f64]) -> SbtPass {
        let len = stress.len();
        let mut pass = SbtPass {
            cn: Vec::with_capacity(len),
            qtn: Vec::with_capacity(len),
            ic: Vec::with_capacity(len),
            n_next: Vec::with_capacity(len),
        };

        for i in 0..len {
            let sigma_eff = stress.sigma_v_eff[i];
            let cn = cap((PA / sigma_eff).powf(n[i]), CN_CEILING);
            let qtn = (stress.net_tip(i) / PA) * cn;
            let ic = behavior_index(qtn, stress.fr[i]);
            pass.cn.push(cn);
            pass.qtn.push(qtn);
            pass.ic.push(ic);
            pass.n_next.push(stress_exponent(ic, sigma_eff));
        }

        pass
    }

    /// 求解 n、Cn、Qtn、Ic
    pub fn solve(&self, stress: &StressProfile) -> SbtProfile {
        let tol = self.config.tolerance;
        let max_iter = self.config.max_iterations.max(1);

        let mut n = vec![1.0; stress.len()];
        let mut iterations = 0;

        loop {
            iterations += 1;
            let pass = self.evaluate_pass(stress, &n);

            // 残差带符号：n − n'
            let unconverged: Vec<usize> = (0..n.len())
                .filter(|&i| pass.ic[i] > 0.0 && n[i] - pass.n_next[i] > tol)
                .collect();

            log::trace!(
                "SBT 迭代 {}: 未收敛行 {}",
                iterations,
                unconverged.len()
            );

            if unconverged.is_empty() || iterations >= max_iter {
                let mut ic: Vec<Outcome> = pass
                    .ic
                    .iter()
                    .map(|&v| if v == 0.0 { Outcome::NotApplicable } else { Outcome::from_f64(v) })
                    .collect();

                let report = if unconverged.is_empty() {
                    log::debug!("SBT 求解器在 {} 轮后收敛", iterations);
                    SolverReport::converged(iterations)
                } else {
                    log::warn!(
                        "SBT 求解器达到迭代上限 {}，{} 行无解",
                        max_iter,
                        unconverged.len()
                    );
                    for &i in &unconverged {
                        ic[i] = Outcome::NoSolution;
                    }
                    SolverReport::max_iterations_reached(iterations, unconverged.len())
                };

                return SbtProfile {
                    n,
                    cn: pass.cn,
                    qtn: pass.qtn,
                    ic,
                    report,
                };
            }

            n = pass.n_next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sounding::{RawRow, SiteInfo, Sounding};
    use crate::stress::StressColumn;

    fn stress_for(rows: Vec<RawRow>) -> StressProfile {
        StressColumn::default()
            .compute(&Sounding::new(SiteInfo::new("T", Some(1.0), None), rows))
            .unwrap()
    }

    #[test]
    fn test_behavior_index_sentinel() {
        assert_eq!(behavior_index(10.0, 0.0), 0.0);
        assert_eq!(behavior_index(-1.0, 1.0), 0.0);
        assert!(behavior_index(f64::NAN, 1.0).is_nan());
        let ic = behavior_index(100.0, 1.0);
        assert!((ic - ((3.47f64 - 2.0).powi(2) + 1.22f64.powi(2)).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_stress_exponent_capped() {
        assert_eq!(stress_exponent(4.0, 100.0), 1.0);
        assert!(stress_exponent(f64::NAN, 100.0).is_nan());
    }

    #[test]
    fn test_converges_on_sand_profile() {
        let stress = stress_for(vec![
            RawRow::new(1.0, 8.0, 40.0, 8.0),
            RawRow::new(2.0, 9.0, 45.0, 9.0),
            RawRow::new(3.0, 10.0, 50.0, 10.0),
        ]);
        let profile = SoilBehaviorTypeSolver::default().solve(&stress);
        assert!(profile.report.is_converged());
        assert!(profile.ic.iter().all(|ic| ic.is_value()));
        assert!(profile.cn.iter().all(|&cn| cn <= CN_CEILING));
    }

    #[test]
    fn test_zero_friction_not_applicable() {
        let stress = stress_for(vec![
            RawRow::new(1.0, 8.0, 0.0, 8.0),
            RawRow::new(2.0, 9.0, 45.0, 9.0),
        ]);
        let profile = SoilBehaviorTypeSolver::default().solve(&stress);
        assert!(profile.ic[0].is_not_applicable());
        assert!(profile.ic[1].is_value());
    }

    #[test]
    fn test_iteration_cap_marks_no_solution() {
        let stress = stress_for(vec![
            RawRow::new(1.0, 8.0, 40.0, 8.0),
            RawRow::new(2.0, 9.0, 45.0, 9.0),
        ]);
        // 砂土首轮 n' ≈ 0.5，残差远大于容差
        let solver = SoilBehaviorTypeSolver::new(IterationConfig::new(1e-12, 1));
        let profile = solver.solve(&stress);
        assert_eq!(profile.report.iterations, 1);
        assert!(!profile.report.is_converged());
        assert!(profile.ic.iter().all(|ic| ic.is_no_solution()));
        assert_eq!(profile.report.unconverged_rows, 2);
        assert!(profile.qtn.iter().all(|q| q.is_finite()));
    }
}
