// crates/cpt_physics/src/properties/cohesive.rs

//! 粘性土（Ic ≥ 2.6）属性公式

use cpt_foundation::Outcome;

use super::{
    constrained_modulus_from_qt, permeability_low_ic, shear_wave_velocity_mayne, vs_coefficient,
    LayerProperties, RowState,
};
use crate::constants::PA;

// ============================================================
// OCR
// ============================================================

/// OCR = 0.25 Qt^1.25 (Robertson 2009)
#[inline]
pub fn ocr_robertson(qt_norm: f64) -> f64 {
    0.25 * qt_norm.powf(1.25)
}

/// Kulhawy & Mayne (1990) 的平均系数 k（常见范围 0.2–0.5）
const OCR_K: f64 = 0.33;

/// OCR = k Qt，仅 Qt < 20 (Kulhawy & Mayne 1990)
#[inline]
pub fn ocr_kulhawy(qt_norm: f64) -> Outcome {
    Outcome::when(qt_norm < 20.0, || OCR_K * qt_norm)
}

// ============================================================
// Mayne & Peuchen (2018) 不排水强度
// ============================================================

/// Nkt = 10.5 − 4.6 ln(Bq + 0.1)
///
/// Bq ≤ −0.1 时取 −0.009999999，对数自变量保持为正。
#[inline]
pub fn cone_factor(bq: f64) -> f64 {
    let bq = if bq <= -0.1 { -0.009999999 } else { bq };
    10.5 - 4.6 * (bq + 0.1).ln()
}

/// 固定圆锥系数 Nkt
pub const FIXED_NKT: f64 = 14.0;

// ============================================================
// Mayne (2006) 有效内摩擦角
// ============================================================

/// φ' = 29.5 Bq^0.121 (0.256 + 0.336 Bq + log10 Qt)，仅 Qt > 0
///
/// Bq ≤ 0 取 0.1，Bq > 1 取 1。
#[inline]
pub fn friction_angle_mayne(bq: f64, qt_norm: f64) -> Outcome {
    let bq = if bq <= 0.0 {
        0.1
    } else if bq > 1.0 {
        1.0
    } else {
        bq
    };
    Outcome::when(qt_norm > 0.0, || {
        29.5 * bq.powf(0.121) * (0.256 + 0.336 * bq + qt_norm.log10())
    })
}

// ============================================================
// Robertson (2015) 渗透系数
// ============================================================

/// k = 10^(0.952 − 3.04 Ic)（Ic < 3.27）或 10^(−4.52 − 1.37 Ic)（3.27 < Ic < 4）
#[inline]
pub fn permeability(ic: f64) -> Outcome {
    if ic < 3.27 {
        Outcome::from_f64(permeability_low_ic(ic))
    } else if ic > 3.27 && ic < 4.0 {
        Outcome::from_f64(10f64.powf(-4.52 - 1.37 * ic))
    } else {
        Outcome::NotApplicable
    }
}

/// 计算粘性土属性
pub fn evaluate(ic: f64, row: &RowState) -> LayerProperties {
    let net = row.net_tip();
    let bq = row.pore_pressure_ratio();
    let ocr_r = ocr_robertson(row.qt_norm);

    let avs = vs_coefficient(ic);
    let vs_robertson = Outcome::when(avs * net > 0.0, || (avs * net / PA).sqrt());

    LayerProperties {
        ocr_robertson: Outcome::from_f64(ocr_r),
        ocr_kulhawy: ocr_kulhawy(row.qt_norm),
        cu_bq: Outcome::from_f64(net / cone_factor(bq)),
        cu_14: Outcome::from_f64(net / FIXED_NKT),
        constrained_modulus: Outcome::from_f64(constrained_modulus_from_qt(net, row.qt_norm)),
        k0_1: Outcome::from_f64(net / row.sigma_v_eff * 0.1),
        k0_2: Outcome::from_f64(0.5 * ocr_r.powf(0.5)),
        vs_robertson,
        vs_mayne: shear_wave_velocity_mayne(row.fs),
        permeability: permeability(ic),
        phi_mayne: friction_angle_mayne(bq, row.qt_norm),
        ..LayerProperties::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::tests::sample_row;

    #[test]
    fn test_cone_factor_clamp() {
        let clamped = cone_factor(-0.5);
        assert_eq!(clamped, 10.5 - 4.6 * f64::ln(-0.009999999 + 0.1));
        assert_eq!(cone_factor(0.0), 10.5 - 4.6 * f64::ln(0.1));
    }

    #[test]
    fn test_mayne_friction_angle_clamps() {
        let low = friction_angle_mayne(-0.3, 10.0);
        let at_floor = friction_angle_mayne(0.1, 10.0);
        assert_eq!(low, at_floor);
        assert_eq!(friction_angle_mayne(5.0, 10.0), friction_angle_mayne(1.0, 10.0));
        assert!(friction_angle_mayne(0.5, 0.0).is_not_applicable());
    }

    #[test]
    fn test_permeability_gap_at_3_27() {
        assert!(permeability(3.0).is_value());
        assert!(permeability(3.27).is_not_applicable());
        assert!(permeability(3.5).is_value());
        assert!(permeability(4.0).is_not_applicable());
    }

    #[test]
    fn test_ocr_kulhawy_guard() {
        assert!(ocr_kulhawy(25.0).is_not_applicable());
        assert_eq!(ocr_kulhawy(10.0), Outcome::Value(0.33 * 10.0));
    }

    #[test]
    fn test_cohesive_row() {
        let (class, props) = LayerProperties::evaluate(&sample_row(3.0));
        assert_eq!(class, crate::properties::SoilClass::Cohesive);
        let net = 2000.0 - 90.0;
        assert_eq!(props.cu_14, Outcome::Value(net / 14.0));
        // Qt ≈ 31.8 ≥ 14
        assert_eq!(props.constrained_modulus, Outcome::Value(net * 14.0));
        assert!(props.ocr_kulhawy.is_not_applicable());
        assert!(props.k0_2.is_value());
        assert!(props.dr_baldi.is_not_applicable());
        assert!(props.phi_robertson.is_not_applicable());
    }
}
