// crates/cpt_physics/src/density.rs

//! 相对密实度求解器 (Idriss & Boulanger 2008)
//!
//! qc1N 的归一化指数依赖 qc1N 自身，以不动点迭代求解：
//!
//! ```text
//! Cn  = (Pa/σ'v)^(1.338 − 0.249 · qc1^0.264)
//! qc2 = Cn · qc / Pa
//! Dr  = 0.478 · qc1^0.264 − 1.063       (使用更新前的 qc1)
//! ```
//!
//! 初值 qc1 = qc [kPa]。当每个 Dr > 0 的行满足 |qc1 − qc2| ≤ 容差时收敛；
//! 到达迭代上限仍未收敛的 Dr > 0 行标记为 [`Outcome::NoSolution`]。
//! 求解后仅 0 < Ic < 2.6 的行保留 Dr。

use cpt_config::IterationConfig;
use cpt_foundation::Outcome;
use serde::{Deserialize, Serialize};

use crate::constants::{COHESIVE_IC, PA};
use crate::solver::SolverReport;
use crate::stress::StressProfile;

/// 由 qc1N 计算相对密实度
#[inline]
pub fn relative_density(qc1: f64) -> f64 {
    0.478 * qc1.powf(0.264) - 1.063
}

/// 由相对密实度反算 qc1N
#[inline]
pub fn normalized_tip_from_density(dr: f64) -> f64 {
    ((dr + 1.063) / 0.478).powf(1.0 / 0.264)
}

/// 相对密实度求解结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityProfile {
    /// 最终的 qc1N 猜测值
    pub qc1: Vec<f64>,
    /// 最后一轮的归一化系数 Cn
    pub cn2: Vec<f64>,
    /// 相对密实度 Dr（Idriss & Boulanger 2008）
    pub dr: Vec<Outcome>,
    /// 求解摘要
    pub report: SolverReport,
}

/// 相对密实度求解器
#[derive(Debug, Clone, Copy, Default)]
pub struct RelativeDensitySolver {
    config: IterationConfig,
}

impl RelativeDensitySolver {
    /// 创建求解器
    pub fn new(config: IterationConfig) -> Self {
        Self { config }
    }

    /// 迭代参数
    pub fn config(&self) -> &IterationConfig {
        &self.config
    }

    /// 求解 qc1N 与 Dr
    ///
    /// `ic` 用于求解后的土类筛选，长度须与应力柱一致。
    pub fn solve(&self, stress: &StressProfile, ic: &[Outcome]) -> DensityProfile {
        let tol = self.config.tolerance;
        let max_iter = self.config.max_iterations.max(1);
        let len = stress.len();

        let mut qc1 = stress.qc.clone();
        let mut cn2 = vec![f64::NAN; len];
        let mut dr = vec![f64::NAN; len];
        let mut error = vec![f64::NAN; len];
        let mut iterations = 0;

        let mut no_solution = Vec::new();
        loop {
            iterations += 1;
            for i in 0..len {
                let exponent = 1.338 - 0.249 * qc1[i].powf(0.264);
                cn2[i] = (PA / stress.sigma_v_eff[i]).powf(exponent);
                let qc2 = cn2[i] * stress.qc[i] / PA;
                dr[i] = relative_density(qc1[i]);
                error[i] = (qc1[i] - qc2).abs();
                qc1[i] = qc2;
            }

            let unconverged: Vec<usize> = (0..len)
                .filter(|&i| dr[i] > 0.0 && error[i] > tol)
                .collect();

            log::trace!(
                "Dr 迭代 {}: 未收敛行 {}",
                iterations,
                unconverged.len()
            );

            if unconverged.is_empty() {
                break;
            }
            if iterations >= max_iter {
                no_solution = unconverged;
                break;
            }
        }

        let mut dr: Vec<Outcome> = dr.into_iter().map(Outcome::from_f64).collect();

        let report = if no_solution.is_empty() {
            log::debug!("Dr 求解器在 {} 轮后收敛", iterations);
            SolverReport::converged(iterations)
        } else {
            log::warn!(
                "Dr 求解器达到迭代上限 {}，{} 行无解",
                max_iter,
                no_solution.len()
            );
            for &i in &no_solution {
                dr[i] = Outcome::NoSolution;
            }
            SolverReport::max_iterations_reached(iterations, no_solution.len())
        };

        // 仅无粘性土保留 Dr
        for (d, ic) in dr.iter_mut().zip(ic) {
            let granular = matches!(ic, Outcome::Value(v) if *v < COHESIVE_IC);
            if !granular {
                *d = Outcome::NotApplicable;
            }
        }

        DensityProfile {
            qc1,
            cn2,
            dr,
            report,
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
    fn test_density_round_trip() {
        let dr = relative_density(120.0);
        assert!((normalized_tip_from_density(dr) - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_converges_and_masks_cohesive_rows() {
        let stress = stress_for(vec![
            RawRow::new(2.0, 8.0, 40.0, 8.0),
            RawRow::new(3.0, 1.0, 60.0, 1.0),
        ]);
        let ic = vec![Outcome::Value(1.9), Outcome::Value(3.0)];
        let profile = RelativeDensitySolver::default().solve(&stress, &ic);
        assert!(profile.report.is_converged());
        assert!(profile.report.iterations <= 100);
        assert!(profile.dr[0].is_value());
        assert!(profile.dr[1].is_not_applicable());
    }

    #[test]
    fn test_unclassified_rows_not_applicable() {
        let stress = stress_for(vec![RawRow::new(2.0, 8.0, 40.0, 8.0)]);
        for ic in [Outcome::NotApplicable, Outcome::NoSolution] {
            let profile = RelativeDensitySolver::default().solve(&stress, &[ic]);
            assert!(profile.dr[0].is_not_applicable());
        }
    }

    #[test]
    fn test_iteration_cap_marks_no_solution() {
        let stress = stress_for(vec![RawRow::new(2.0, 8.0, 40.0, 8.0)]);
        let solver = RelativeDensitySolver::new(IterationConfig::new(0.01, 1));
        let profile = solver.solve(&stress, &[Outcome::Value(1.9)]);
        // 初值 qc1 = qc [kPa]，首轮残差远大于容差
        assert_eq!(profile.report.iterations, 1);
        assert!(profile.dr[0].is_no_solution());
        assert_eq!(profile.report.unconverged_rows, 1);
    }
}
