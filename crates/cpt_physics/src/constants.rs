// crates/cpt_physics/src/constants.rs

//! 全流水线共享的物理常数与阈值
//!
//! 各经验公式自身的系数放在对应公式旁，按出处（作者/年份）分组。

/// 大气压 Pa [kPa]
pub const PA: f64 = 101.325;

/// 水的重度 γw [kN/m³]
pub const GAMMA_W: f64 = 9.81;

/// MPa → kPa
pub const MPA_TO_KPA: f64 = 1000.0;

/// 粘性土判别阈值：Ic ≥ 2.6 视为粘性土
pub const COHESIVE_IC: f64 = 2.6;

/// 地下水位以上行的安全系数标记值（不发生液化）
pub const FS_ABOVE_WATER_TABLE: f64 = 9999.0;

/// rd、LPI、LSN 的方法适用深度上限 [m]
pub const METHOD_DEPTH_LIMIT: f64 = 20.0;
