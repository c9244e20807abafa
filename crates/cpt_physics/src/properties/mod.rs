// crates/cpt_physics/src/properties/mod.rs

//! 土层属性经验公式库
//!
//! 按土类指数 Ic 分支：
//! - `cohesive`: 粘性土（Ic ≥ 2.6）：OCR、不排水强度 cu、压缩模量 M、K0、Vs、k、φ'
//! - `granular`: 无粘性土（0 < Ic < 2.6）：φ'、Dr、状态参数 ψ、Vs、k、M、Qtn,cs
//!
//! Ic 未计算（0）、算术无定义或无解时为 [`SoilClass::Unclassified`]，
//! 所有受 Ic 控制的字段均为 [`Outcome::NotApplicable`]。
//!
//! 公式内部按 IEEE f64 计算，守卫条件逐一保留；结果经
//! [`Outcome::from_f64`] 转换，无定义的算术结果即为不适用。

pub mod cohesive;
pub mod granular;

use cpt_foundation::Outcome;
use serde::{Deserialize, Serialize};

use crate::constants::{COHESIVE_IC, PA};
use crate::sbt::SbtProfile;
use crate::stress::StressProfile;

/// 土类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilClass {
    /// 粘性土（Ic ≥ 2.6）
    Cohesive,
    /// 无粘性土（0 < Ic < 2.6）
    NonCohesive,
    /// 无法分类
    Unclassified,
}

impl SoilClass {
    /// 由 Ic 分类
    pub fn from_ic(ic: Outcome) -> Self {
        match ic {
            Outcome::Value(v) if v >= COHESIVE_IC => Self::Cohesive,
            Outcome::Value(v) if v > 0.0 => Self::NonCohesive,
            _ => Self::Unclassified,
        }
    }

    /// 是否为无粘性土
    pub fn is_non_cohesive(self) -> bool {
        self == Self::NonCohesive
    }
}

/// 单行公式输入（单位 kPa）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowState {
    /// 土类指数
    pub ic: Outcome,
    /// qc [kPa]
    pub qc: f64,
    /// qt [kPa]
    pub qt: f64,
    /// fs [kPa]
    pub fs: f64,
    /// σv
    pub sigma_v: f64,
    /// σ'v
    pub sigma_v_eff: f64,
    /// 静水孔压 u0
    pub u0: f64,
    /// 截断的计算孔压
    pub u_calc: f64,
    /// Qt
    pub qt_norm: f64,
    /// Qtn
    pub qtn: f64,
    /// Fr [%]
    pub fr: f64,
}

impl RowState {
    /// 从应力柱与土类指数结果中取第 i 行
    pub fn from_profiles(stress: &StressProfile, sbt: &SbtProfile, i: usize) -> Self {
        Self {
            ic: sbt.ic[i],
            qc: stress.qc[i],
            qt: stress.qt[i],
            fs: stress.fs[i],
            sigma_v: stress.sigma_v[i],
            sigma_v_eff: stress.sigma_v_eff[i],
            u0: stress.u0[i],
            u_calc: stress.u_calc[i],
            qt_norm: stress.qt_norm[i],
            qtn: sbt.qtn[i],
            fr: stress.fr[i],
        }
    }

    /// 净锥尖阻力 qt − σv
    #[inline]
    pub fn net_tip(&self) -> f64 {
        self.qt - self.sigma_v
    }

    /// 孔压比 Bq = (u − u0)/(qt − σv)
    #[inline]
    pub fn pore_pressure_ratio(&self) -> f64 {
        (self.u_calc - self.u0) / self.net_tip()
    }
}

/// 土层属性（每个字段一个结果标记）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerProperties {
    /// OCR (Robertson 2009)
    pub ocr_robertson: Outcome,
    /// OCR (Kulhawy & Mayne 1990)
    pub ocr_kulhawy: Outcome,
    /// 不排水强度 cu，Nkt 由 Bq 求得 (Mayne & Peuchen 2018)
    pub cu_bq: Outcome,
    /// 不排水强度 cu，Nkt = 14
    pub cu_14: Outcome,
    /// 压缩模量 M (Robertson 2009)
    pub constrained_modulus: Outcome,
    /// K0 = 0.1 (qt − σv)/σ'v (Kulhawy & Mayne 1990)
    pub k0_1: Outcome,
    /// K0 = 0.5 OCR^0.5 (Kulhawy & Mayne 1990)
    pub k0_2: Outcome,
    /// 剪切波速 Vs (Robertson 2009)
    pub vs_robertson: Outcome,
    /// 剪切波速 Vs (Mayne 2006)
    pub vs_mayne: Outcome,
    /// 渗透系数 k [m/s] (Robertson 2010/2015)
    pub permeability: Outcome,
    /// 状态参数 ψ (Robertson 2010)
    pub state_parameter: Outcome,
    /// φ' (Robertson & Campanella 1983)
    pub phi_robertson: Outcome,
    /// φ' (Kulhawy & Mayne 1990)
    pub phi_kulhawy: Outcome,
    /// φ' (Jefferies & Been 2006)
    pub phi_jefferies: Outcome,
    /// φ' (Mayne 2006)
    pub phi_mayne: Outcome,
    /// φ' (Uzielli, Mayne & Cassidy 2013)
    pub phi_uzielli: Outcome,
    /// Dr (Baldi et al. 1986)
    pub dr_baldi: Outcome,
    /// Dr (Kulhawy & Mayne 1990)
    pub dr_kulhawy: Outcome,
    /// Dr (Jamiolkowski et al. 2003)
    pub dr_jamiolkowski: Outcome,
    /// 等效净砂归一化锥尖阻力 Qtn,cs = Kc · Qtn
    pub qtn_cs: Outcome,
}

impl LayerProperties {
    /// 按土类计算全部属性
    pub fn evaluate(row: &RowState) -> (SoilClass, Self) {
        let class = SoilClass::from_ic(row.ic);
        let props = match (class, row.ic) {
            (SoilClass::Cohesive, Outcome::Value(ic)) => cohesive::evaluate(ic, row),
            (SoilClass::NonCohesive, Outcome::Value(ic)) => granular::evaluate(ic, row),
            _ => Self::default(),
        };
        (class, props)
    }
}

// ============================================================
// 两类土共用的公式
// ============================================================

/// Vs 系数 αvs = 10^(0.55 Ic + 1.68) (Robertson 2009)
#[inline]
pub fn vs_coefficient(ic: f64) -> f64 {
    10f64.powf(0.55 * ic + 1.68)
}

/// Vs = (αvs (qt − σv)/Pa)^0.5 (Robertson 2009)
#[inline]
pub fn shear_wave_velocity_robertson(ic: f64, net_tip: f64) -> f64 {
    (vs_coefficient(ic) * net_tip / PA).sqrt()
}

/// Vs = 51.6 ln fs + 18.5 (Mayne 2006)，仅 fs > 0
#[inline]
pub fn shear_wave_velocity_mayne(fs: f64) -> Outcome {
    Outcome::when(fs > 0.0, || 51.6 * fs.ln() + 18.5)
}

/// k = 10^(0.952 − 3.04 Ic) [m/s]
#[inline]
pub fn permeability_low_ic(ic: f64) -> f64 {
    10f64.powf(0.952 - 3.04 * ic)
}

/// M = (qt − σv) · min(Qt, 14) (Robertson 2009)
#[inline]
pub fn constrained_modulus_from_qt(net_tip: f64, qt_norm: f64) -> f64 {
    if qt_norm >= 14.0 {
        net_tip * 14.0
    } else {
        net_tip * qt_norm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_row(ic: f64) -> RowState {
        RowState {
            ic: Outcome::Value(ic),
            qc: 2000.0,
            qt: 2000.0,
            fs: 60.0,
            sigma_v: 90.0,
            sigma_v_eff: 60.0,
            u0: 30.0,
            u_calc: 30.0,
            qt_norm: (2000.0 - 90.0) / 60.0,
            qtn: 25.0,
            fr: 3.1,
        }
    }

    #[test]
    fn test_soil_class() {
        assert_eq!(SoilClass::from_ic(Outcome::Value(2.6)), SoilClass::Cohesive);
        assert_eq!(SoilClass::from_ic(Outcome::Value(2.59)), SoilClass::NonCohesive);
        assert_eq!(SoilClass::from_ic(Outcome::Value(0.0)), SoilClass::Unclassified);
        assert_eq!(SoilClass::from_ic(Outcome::NoSolution), SoilClass::Unclassified);
        assert_eq!(SoilClass::from_ic(Outcome::NotApplicable), SoilClass::Unclassified);
    }

    #[test]
    fn test_unclassified_fields_not_applicable() {
        let mut row = sample_row(2.0);
        row.ic = Outcome::NoSolution;
        let (class, props) = LayerProperties::evaluate(&row);
        assert_eq!(class, SoilClass::Unclassified);
        assert_eq!(props, LayerProperties::default());
    }

    #[test]
    fn test_constrained_modulus_rule() {
        assert_eq!(constrained_modulus_from_qt(100.0, 20.0), 1400.0);
        assert_eq!(constrained_modulus_from_qt(100.0, 5.0), 500.0);
    }

    #[test]
    fn test_mayne_vs_guard() {
        assert!(shear_wave_velocity_mayne(0.0).is_not_applicable());
        assert_eq!(shear_wave_velocity_mayne(1.0), Outcome::Value(18.5));
    }
}
