// crates/cpt_physics/src/stress.rs

//! 应力柱
//!
//! 由原始测量行推导逐行的重度、竖向总应力、静水孔压、有效应力，
//! 以及摩阻比 Rf、归一化摩阻比 Fr 和归一化锥尖阻力 Qt。
//!
//! 总应力按深度向下累加（前向 Euler，不做相邻行平均）：
//!
//! ```text
//! σv(0) = γ(0) · z(0)
//! σv(i) = (z(i) − z(i−1)) · γ(i) + σv(i−1)
//! ```
//!
//! 工作向量使用 IEEE f64 语义：缺失读数为 NaN 并沿公式链传播，
//! 在组装结果行时统一转为 [`Outcome::NotApplicable`](cpt_foundation::Outcome)。

use cpt_config::GwtPolicy;
use cpt_foundation::{CptError, CptResult};
use serde::{Deserialize, Serialize};

use crate::constants::{GAMMA_W, MPA_TO_KPA, PA};
use crate::sounding::Sounding;

// ============================================================
// Robertson & Cabal (2010) 重度
// ============================================================

/// 预钻孔区段（Rf ≤ 0）的默认重度 [kN/m³]
pub const PREDRILLED_GAMMA: f64 = 18.08;

/// 侧壁摩阻力视为零的阈值 [kPa]
const FS_ZERO_THRESHOLD: f64 = 1e-5;

/// 摩阻比 Rf [%]
#[inline]
pub fn friction_ratio(fs: f64, qt: f64) -> f64 {
    if fs < FS_ZERO_THRESHOLD || qt.is_nan() {
        0.0
    } else {
        fs / qt * 100.0
    }
}

/// 土体重度 γ [kN/m³]（Robertson & Cabal 2010）
#[inline]
pub fn unit_weight(rf: f64, qt: f64) -> f64 {
    if rf <= 0.0 {
        PREDRILLED_GAMMA
    } else {
        GAMMA_W * (0.27 * rf.log10() + 0.36 * (qt / PA).log10() + 1.236)
    }
}

/// 归一化摩阻比 Fr [%]
#[inline]
pub fn normalized_friction_ratio(fs: f64, qt: f64, sigma_v: f64) -> f64 {
    if fs <= 0.0 {
        0.0
    } else {
        fs / (qt - sigma_v) * 100.0
    }
}

/// 读数换算为 kPa，非正读数视为缺失
#[inline]
fn reading_kpa(mpa: f64) -> f64 {
    let kpa = mpa * MPA_TO_KPA;
    if kpa <= 0.0 {
        f64::NAN
    } else {
        kpa
    }
}

// ============================================================
// StressProfile
// ============================================================

/// 应力柱结果（按行的工作向量，单位 kPa）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressProfile {
    /// 深度 z [m]
    pub depth: Vec<f64>,
    /// 锥尖阻力 qc [kPa]，非正读数为 NaN
    pub qc: Vec<f64>,
    /// 修正锥尖阻力 qt [kPa]，非正读数为 NaN
    pub qt: Vec<f64>,
    /// 侧壁摩阻力 fs [kPa]
    pub fs: Vec<f64>,
    /// 摩阻比 Rf [%]
    pub rf: Vec<f64>,
    /// 重度 γ [kN/m³]
    pub gamma: Vec<f64>,
    /// 竖向总应力 σv
    pub sigma_v: Vec<f64>,
    /// 静水孔压 u0
    pub u0: Vec<f64>,
    /// 截断为整数的计算孔压
    pub u_calc: Vec<f64>,
    /// 竖向有效应力 σ'v
    pub sigma_v_eff: Vec<f64>,
    /// 归一化摩阻比 Fr [%]
    pub fr: Vec<f64>,
    /// 归一化锥尖阻力 Qt
    pub qt_norm: Vec<f64>,
    /// 有效地下水位 [m]；无效时为 None
    pub gwt: Option<f64>,
}

impl StressProfile {
    /// 行数
    pub fn len(&self) -> usize {
        self.depth.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    /// 净锥尖阻力 qt − σv
    #[inline]
    pub fn net_tip(&self, i: usize) -> f64 {
        self.qt[i] - self.sigma_v[i]
    }

    /// 该行是否位于地下水位及以上
    ///
    /// 地下水位无效时恒为 false。
    #[inline]
    pub fn above_water_table(&self, i: usize) -> bool {
        self.gwt.map_or(false, |gwt| self.depth[i] <= gwt)
    }
}

// ============================================================
// StressColumn
// ============================================================

/// 应力柱组件
#[derive(Debug, Clone, Copy, Default)]
pub struct StressColumn {
    policy: GwtPolicy,
}

impl StressColumn {
    /// 创建应力柱组件
    pub fn new(policy: GwtPolicy) -> Self {
        Self { policy }
    }

    /// 地下水位策略
    pub fn policy(&self) -> GwtPolicy {
        self.policy
    }

    /// 计算应力柱
    ///
    /// 地下水位缺失或 ≤ 0 时：`Abort` 策略返回
    /// [`CptError::InvalidGroundwater`]；`Continue` 策略保留总应力，
    /// 有效应力、孔压、Fr、Qt 全部为 NaN。
    pub fn compute(&self, sounding: &Sounding) -> CptResult<StressProfile> {
        let rows = &sounding.rows;

        let depth: Vec<f64> = rows.iter().map(|r| r.depth).collect();
        let qc: Vec<f64> = rows.iter().map(|r| reading_kpa(r.qc)).collect();
        let qt: Vec<f64> = rows.iter().map(|r| reading_kpa(r.qt)).collect();
        let fs: Vec<f64> = rows.iter().map(|r| r.fs).collect();

        let rf: Vec<f64> = fs
            .iter()
            .zip(&qt)
            .map(|(&fs, &qt)| friction_ratio(fs, qt))
            .collect();
        let gamma: Vec<f64> = rf
            .iter()
            .zip(&qt)
            .map(|(&rf, &qt)| unit_weight(rf, qt))
            .collect();

        let sigma_v: Vec<f64> = depth
            .iter()
            .zip(&gamma)
            .scan(None, |prev: &mut Option<(f64, f64)>, (&z, &g)| {
                let sigma = match *prev {
                    None => g * z,
                    Some((pz, ps)) => (z - pz) * g + ps,
                };
                *prev = Some((z, sigma));
                Some(sigma)
            })
            .collect();

        let n = rows.len();
        let gwt = sounding.info.valid_gwt();
        let (u0, u_calc, sigma_v_eff, fr) = match gwt {
            Some(gwt) => {
                let mut u0 = vec![0.0; n];
                let mut u_calc = vec![0.0; n];
                let mut sigma_v_eff = sigma_v.clone();
                for i in 0..n {
                    if depth[i] >= gwt {
                        let u = (depth[i] - gwt) * GAMMA_W;
                        u0[i] = u;
                        u_calc[i] = u.trunc();
                        sigma_v_eff[i] = sigma_v[i] - u;
                    }
                }
                let fr = (0..n)
                    .map(|i| normalized_friction_ratio(fs[i], qt[i], sigma_v[i]))
                    .collect();
                (u0, u_calc, sigma_v_eff, fr)
            }
            None => {
                let gwt_value = sounding.info.gwt.unwrap_or(f64::NAN);
                log::warn!(
                    "测深 {} 的地下水位无效 (GWT = {})",
                    sounding.site(),
                    gwt_value
                );
                if self.policy == GwtPolicy::Abort {
                    return Err(CptError::invalid_groundwater(sounding.site(), gwt_value));
                }
                let nan = vec![f64::NAN; n];
                (nan.clone(), nan.clone(), nan.clone(), nan)
            }
        };

        let qt_norm = (0..n)
            .map(|i| (qt[i] - sigma_v[i]) / sigma_v_eff[i])
            .collect();

        Ok(StressProfile {
            depth,
            qc,
            qt,
            fs,
            rf,
            gamma,
            sigma_v,
            u0,
            u_calc,
            sigma_v_eff,
            fr,
            qt_norm,
            gwt,
        })
    }
}
