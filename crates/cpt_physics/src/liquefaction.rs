// crates/cpt_physics/src/liquefaction.rs

//! 液化因子 (Idriss & Boulanger 2008)
//!
//! 对每个地震情景逐行计算应力折减系数 rd、循环应力比 CSR、
//! 循环阻力比 CRR 与安全系数 FS = CRR/CSR。
//!
//! 仅无粘性土行（0 < Ic < 2.6）参与计算；粘性土与未分类行的
//! Kσ、rd、CSR、FC、qc1Ncs、CRR、FS 均为不适用。

use cpt_foundation::{cap, Outcome};
use serde::{Deserialize, Serialize};

use crate::constants::{FS_ABOVE_WATER_TABLE, METHOD_DEPTH_LIMIT, PA};
use crate::density::{normalized_tip_from_density, DensityProfile};
use crate::properties::SoilClass;
use crate::sbt::SbtProfile;
use crate::stress::StressProfile;

// ============================================================
// 公式
// ============================================================

/// MSF 上限
pub const MSF_CEILING: f64 = 1.8;

/// 震级比例系数 MSF = min(1.8, 6.9 exp(−M/4) − 0.058)
#[inline]
pub fn magnitude_scaling_factor(magnitude: f64) -> f64 {
    cap(6.9 * (-magnitude / 4.0).exp() - 0.058, MSF_CEILING)
}

/// 应力折减系数 rd = exp(α + β M)，仅 z < 20 m
#[inline]
pub fn stress_reduction(depth: f64, magnitude: f64) -> Outcome {
    if depth < METHOD_DEPTH_LIMIT {
        let alpha = -1.012 - 1.126 * (depth / 11.73 + 5.133).sin();
        let beta = 0.106 + 0.118 * (depth / 11.28 + 5.142).sin();
        Outcome::from_f64((alpha + beta * magnitude).exp())
    } else {
        Outcome::OutOfMethodRange
    }
}

/// 上覆应力系数 Cσ = min(0.3, 1/(37.3 − 8.27 qc1N^0.264))
#[inline]
pub fn overburden_coefficient(qc1n: f64) -> f64 {
    cap(1.0 / (37.3 - 8.27 * qc1n.powf(0.264)), 0.3)
}

/// 上覆应力修正 Kσ = min(1.1, 1 − Cσ ln(σ'v/Pa))
#[inline]
pub fn overburden_correction(qc1n: f64, sigma_v_eff: f64) -> f64 {
    cap(1.0 - overburden_coefficient(qc1n) * (sigma_v_eff / PA).ln(), 1.1)
}

/// 细粒含量 FC = clamp(2 · 2.8 · Ic^2.6, 0, 100) [%]
#[inline]
pub fn fines_content(ic: f64) -> f64 {
    let fc = 2.0 * 2.8 * ic.powf(2.6);
    if fc > 100.0 {
        100.0
    } else if fc < 0.0 {
        0.0
    } else {
        fc
    }
}

/// 等效净砂阻力 qc1Ncs = qc1N + Δqc1N
#[inline]
pub fn clean_sand_resistance(qc1n: f64, fc: f64) -> f64 {
    let f = fc + 0.01;
    qc1n + (5.4 + qc1n / 16.0) * (1.63 + 9.7 / f - (15.7 / f).powi(2)).exp()
}

/// 循环阻力比 CRR = exp(q/540 + (q/67)² − (q/80)³ + (q/114)⁴ − 3) / MSF / Kσ
#[inline]
pub fn cyclic_resistance(qc1ncs: f64, msf: f64, k_sigma: f64) -> f64 {
    let q = qc1ncs;
    (q / 540.0 + (q / 67.0).powi(2) - (q / 80.0).powi(3) + (q / 114.0).powi(4) - 3.0).exp()
        / msf
        / k_sigma
}

/// 循环应力比 CSR = 0.65 · PGA · σv/σ'v · rd / MSF / Kσ
#[inline]
pub fn cyclic_stress_ratio(
    pga: f64,
    sigma_v: f64,
    sigma_v_eff: f64,
    rd: f64,
    msf: f64,
    k_sigma: f64,
) -> f64 {
    0.65 * pga * sigma_v / sigma_v_eff * rd / msf / k_sigma
}

// ============================================================
// 情景与结果
// ============================================================

/// 单个地震情景的输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    /// 情景标签
    pub label: String,
    /// 矩震级
    pub magnitude: f64,
    /// 峰值地面加速度 [g]
    pub pga: f64,
}

impl ScenarioInput {
    /// 创建情景输入
    pub fn new(label: impl Into<String>, magnitude: f64, pga: f64) -> Self {
        Self {
            label: label.into(),
            magnitude,
            pga,
        }
    }

    /// 该情景的 MSF
    pub fn msf(&self) -> f64 {
        magnitude_scaling_factor(self.magnitude)
    }
}

/// 单行单情景的液化因子
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFactors {
    /// 应力折减系数 rd
    pub rd: Outcome,
    /// 循环应力比 CSR
    pub csr: Outcome,
    /// 循环阻力比 CRR
    pub crr: Outcome,
    /// 安全系数 FS
    pub fs: Outcome,
}

/// 单行液化因子
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiquefactionRow {
    /// qc1N（由 Dr 反算）
    pub qc1n: Outcome,
    /// Kσ
    pub k_sigma: Outcome,
    /// 细粒含量 FC [%]
    pub fines_content: Outcome,
    /// qc1Ncs
    pub qc1ncs: Outcome,
    /// 各情景的因子，顺序与情景列表一致
    pub scenarios: Vec<ScenarioFactors>,
}

// ============================================================
// LiquefactionFactorSolver
// ============================================================

/// 液化因子计算器
#[derive(Debug, Clone, PartialEq)]
pub struct LiquefactionFactorSolver {
    scenarios: Vec<ScenarioInput>,
    msf: Vec<f64>,
}

impl LiquefactionFactorSolver {
    /// 创建计算器
    pub fn new(scenarios: Vec<ScenarioInput>) -> Self {
        let msf = scenarios.iter().map(ScenarioInput::msf).collect();
        Self { scenarios, msf }
    }

    /// 情景列表
    pub fn scenarios(&self) -> &[ScenarioInput] {
        &self.scenarios
    }

    /// 各情景的 MSF
    pub fn msf(&self) -> &[f64] {
        &self.msf
    }

    /// 计算单行
    pub fn evaluate_row(
        &self,
        stress: &StressProfile,
        ic: Outcome,
        dr: Outcome,
        i: usize,
    ) -> LiquefactionRow {
        let qc1n = dr.map(normalized_tip_from_density);

        let non_applicable = vec![ScenarioFactors::default(); self.scenarios.len()];
        let ic = match ic {
            Outcome::Value(v) if SoilClass::from_ic(ic).is_non_cohesive() => v,
            _ => {
                return LiquefactionRow {
                    qc1n,
                    scenarios: non_applicable,
                    ..LiquefactionRow::default()
                }
            }
        };

        let depth = stress.depth[i];
        let sigma_v = stress.sigma_v[i];
        let sigma_eff = stress.sigma_v_eff[i];
        let q = qc1n.to_f64();

        let k_sigma = overburden_correction(q, sigma_eff);
        let fc = fines_content(ic);
        let qc1ncs = clean_sand_resistance(q, fc);
        let above_gwt = stress.above_water_table(i);

        let scenarios = self
            .scenarios
            .iter()
            .zip(&self.msf)
            .map(|(scenario, &msf)| {
                let rd = stress_reduction(depth, scenario.magnitude);
                let csr = rd.zip_with(Outcome::from_f64(k_sigma), |rd, k_sigma| {
                    cyclic_stress_ratio(scenario.pga, sigma_v, sigma_eff, rd, msf, k_sigma)
                });
                let crr = cyclic_resistance(qc1ncs, msf, k_sigma);
                let fs = if above_gwt {
                    Outcome::Value(FS_ABOVE_WATER_TABLE)
                } else {
                    csr.map(|csr| crr / csr)
                };
                ScenarioFactors {
                    rd,
                    csr,
                    crr: Outcome::from_f64(crr),
                    fs,
                }
            })
            .collect();

        LiquefactionRow {
            qc1n,
            k_sigma: Outcome::from_f64(k_sigma),
            fines_content: Outcome::from_f64(fc),
            qc1ncs: Outcome::from_f64(qc1ncs),
            scenarios,
        }
    }

    /// 计算全部行
    pub fn solve(
        &self,
        stress: &StressProfile,
        sbt: &SbtProfile,
        density: &DensityProfile,
    ) -> Vec<LiquefactionRow> {
        (0..stress.len())
            .map(|i| self.evaluate_row(stress, sbt.ic[i], density.dr[i], i))
            .collect()
    }
}
