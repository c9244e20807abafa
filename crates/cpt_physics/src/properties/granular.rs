// crates/cpt_physics/src/properties/granular.rs

//! 无粘性土（0 < Ic < 2.6）属性公式

use cpt_foundation::Outcome;

use super::{
    constrained_modulus_from_qt, permeability_low_ic, shear_wave_velocity_mayne,
    shear_wave_velocity_robertson, vs_coefficient, LayerProperties, RowState,
};
use crate::constants::PA;

// ============================================================
// 有效内摩擦角
// ============================================================

/// φ' = atan((log10(qc/σ'v) + 0.29)/2.68)，仅 qc > 0 (Robertson & Campanella 1983)
#[inline]
pub fn friction_angle_robertson(qc: f64, sigma_v_eff: f64) -> Outcome {
    Outcome::when(qc > 0.0, || {
        (1.0 / 2.68 * ((qc / sigma_v_eff).log10() + 0.29))
            .atan()
            .to_degrees()
    })
}

/// φ' = 17.6 + 11 log10 Qtn (Kulhawy & Mayne 1990)
#[inline]
pub fn friction_angle_kulhawy(qtn: f64) -> f64 {
    17.6 + 11.0 * qtn.log10()
}

/// 临界状态摩擦角 φ'cv [°]
pub const PHI_CV: f64 = 33.0;

/// φ' = φ'cv + 15.84 log10(Kc Qtn) − 26.88 (Jefferies & Been 2006)
#[inline]
pub fn friction_angle_jefferies(kc: f64, qtn: f64) -> f64 {
    PHI_CV + 15.84 * (kc * qtn).log10() - 26.88
}

/// φ' = 25 (qt/σ'v^0.5)^0.1 (Uzielli, Mayne & Cassidy 2013)
#[inline]
pub fn friction_angle_uzielli(qt: f64, sigma_v_eff: f64) -> f64 {
    25.0 * (qt / sigma_v_eff.powf(0.5)).powf(0.1)
}

// ============================================================
// Jefferies & Been (2006) 细粒含量修正系数
// ============================================================

/// Kc
#[inline]
pub fn fines_correction(ic: f64, fr: f64) -> f64 {
    if ic <= 1.64 {
        1.0
    } else if ic > 1.64 && ic < 2.36 && fr < 0.5 {
        1.0
    } else if ic > 1.64 && ic <= 2.5 {
        5.58 * ic.powi(3) - 0.403 * ic.powi(4) - 21.63 * ic.powi(2) + 33.75 * ic - 17.88
    } else {
        6e-7 * ic.powf(16.76)
    }
}

// ============================================================
// 相对密实度
// ============================================================

/// Baldi et al. (1986)：中等压缩性、正常固结、未老化、未胶结的石英砂
const BALDI_C0: f64 = 15.7;
const BALDI_C2: f64 = 2.41;

/// Dr = ln(Qcn/C0)/C2，Qcn = (qc/Pa)/(σ'v/Pa)^0.5 (Baldi et al. 1986)
#[inline]
pub fn density_baldi(qc: f64, sigma_v_eff: f64) -> f64 {
    let qcn = (qc / PA) / (sigma_v_eff / PA).powf(0.5);
    (1.0 / BALDI_C2) * (qcn / BALDI_C0).ln()
}

/// Dr = (Qtn/350)^0.5 (Kulhawy & Mayne 1990，简化式)
#[inline]
pub fn density_kulhawy(qtn: f64) -> f64 {
    (qtn / 350.0).powf(0.5)
}

/// Dr = ln((qt/Pa)/(c0 (σ'v/Pa)^c1))/c2 (Jamiolkowski et al. 2003)
#[inline]
pub fn density_jamiolkowski(qt: f64, sigma_v_eff: f64) -> f64 {
    const C0: f64 = 17.68;
    const C1: f64 = 0.5;
    const C2: f64 = 3.10;
    1.0 / C2 * ((qt / PA) / (C0 * (sigma_v_eff / PA).powf(C1))).ln()
}

/// ψ = 0.56 − 0.33 log10(Kc Qtn) (Robertson 2010)
#[inline]
pub fn state_parameter(kc: f64, qtn: f64) -> f64 {
    0.56 - 0.33 * (kc * qtn).log10()
}

/// M：Ic > 2.2 按 Qt 规则，否则 αM (qt − σv)，αM = 0.0188 · 10^(0.55 Ic + 1.68)
#[inline]
pub fn constrained_modulus(ic: f64, net_tip: f64, qt_norm: f64) -> f64 {
    if ic > 2.2 {
        constrained_modulus_from_qt(net_tip, qt_norm)
    } else {
        0.0188 * vs_coefficient(ic) * net_tip
    }
}

/// 计算无粘性土属性
pub fn evaluate(ic: f64, row: &RowState) -> LayerProperties {
    let kc = fines_correction(ic, row.fr);
    let net = row.net_tip();

    LayerProperties {
        phi_robertson: friction_angle_robertson(row.qc, row.sigma_v_eff),
        phi_kulhawy: Outcome::from_f64(friction_angle_kulhawy(row.qtn)),
        phi_jefferies: Outcome::from_f64(friction_angle_jefferies(kc, row.qtn)),
        phi_uzielli: Outcome::from_f64(friction_angle_uzielli(row.qt, row.sigma_v_eff)),
        dr_baldi: Outcome::from_f64(density_baldi(row.qc, row.sigma_v_eff)),
        dr_kulhawy: Outcome::from_f64(density_kulhawy(row.qtn)),
        dr_jamiolkowski: Outcome::from_f64(density_jamiolkowski(row.qt, row.sigma_v_eff)),
        state_parameter: Outcome::from_f64(state_parameter(kc, row.qtn)),
        vs_robertson: Outcome::from_f64(shear_wave_velocity_robertson(ic, net)),
        vs_mayne: shear_wave_velocity_mayne(row.fs),
        permeability: Outcome::from_f64(permeability_low_ic(ic)),
        constrained_modulus: Outcome::from_f64(constrained_modulus(ic, net, row.qt_norm)),
        qtn_cs: Outcome::from_f64(kc * row.qtn),
        ..LayerProperties::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::tests::sample_row;
    use crate::properties::SoilClass;

    #[test]
    fn test_fines_correction_branches() {
        assert_eq!(fines_correction(1.5, 2.0), 1.0);
        assert_eq!(fines_correction(2.0, 0.4), 1.0);
        let ic: f64 = 2.0;
        let poly = 5.58 * ic.powi(3) - 0.403 * ic.powi(4) - 21.63 * ic.powi(2) + 33.75 * ic - 17.88;
        assert_eq!(fines_correction(2.0, 1.0), poly);
        assert_eq!(fines_correction(2.55, 1.0), 6e-7 * 2.55f64.powf(16.76));
    }

    #[test]
    fn test_robertson_angle_requires_qc() {
        assert!(friction_angle_robertson(f64::NAN, 50.0).is_not_applicable());
        let phi = friction_angle_robertson(5000.0, 50.0).value().unwrap();
        assert!(phi > 30.0 && phi < 45.0);
    }

    #[test]
    fn test_constrained_modulus_switch() {
        let net = 1000.0;
        assert_eq!(constrained_modulus(2.3, net, 10.0), 10_000.0);
        assert_eq!(constrained_modulus(2.0, net, 10.0), 0.0188 * vs_coefficient(2.0) * net);
    }

    #[test]
    fn test_granular_row() {
        let (class, props) = LayerProperties::evaluate(&sample_row(2.0));
        assert_eq!(class, SoilClass::NonCohesive);
        let kc = fines_correction(2.0, 3.1);
        assert_eq!(props.qtn_cs, Outcome::Value(kc * 25.0));
        assert!(props.dr_kulhawy.is_value());
        assert!(props.vs_robertson.is_value());
        assert!(props.cu_bq.is_not_applicable());
        assert!(props.ocr_robertson.is_not_applicable());
        assert!(props.phi_mayne.is_not_applicable());
    }
}
