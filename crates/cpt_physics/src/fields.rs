// crates/cpt_physics/src/fields.rs

//! 结果行与字段键
//!
//! [`DerivedRow`] 汇集各组件逐行追加的字段，[`FieldKey`] 为每个字段提供
//! 稳定的 snake_case 名称，表格导出方按键投影列而无需了解结构体布局。
//! 情景相关字段通过 [`ScenarioField`] 与情景标签寻址，列名为
//! `{field}_{label}`（如 `fs_20may`）。

use cpt_foundation::Outcome;
use serde::{Deserialize, Serialize};

use crate::liquefaction::{LiquefactionRow, ScenarioFactors};
use crate::properties::{LayerProperties, SoilClass};
use crate::scenario::PreforoStatus;
use crate::solver::SolverReport;
use crate::thickness::LayerThickness;

// ============================================================
// 字段键
// ============================================================

macro_rules! field_keys {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// 逐行字段键
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum FieldKey {
            $(
                #[doc = $name]
                $variant,
            )+
        }

        impl FieldKey {
            /// 全部字段，按导出顺序
            pub const ALL: &'static [FieldKey] = &[$(FieldKey::$variant),+];

            /// 稳定的列名
            pub fn name(self) -> &'static str {
                match self {
                    $(FieldKey::$variant => $name,)+
                }
            }

            /// 按列名查找
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(FieldKey::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

field_keys! {
    Depth => "depth",
    Rf => "rf",
    Gamma => "gamma",
    SigmaV => "sigma_v",
    U0 => "u0",
    UCalc => "u_calc",
    SigmaVEff => "sigma_v_eff",
    Fr => "fr",
    QtNorm => "qt_norm",
    N => "n",
    Cn => "cn",
    Qtn => "qtn",
    Ic => "ic",
    Qc1 => "qc1",
    Cn2 => "cn2",
    Dr => "dr",
    OcrRobertson => "ocr_robertson",
    OcrKulhawy => "ocr_kulhawy",
    CuBq => "cu_bq",
    Cu14 => "cu_14",
    ConstrainedModulus => "constrained_modulus",
    K01 => "k0_1",
    K02 => "k0_2",
    VsRobertson => "vs_robertson",
    VsMayne => "vs_mayne",
    Permeability => "permeability",
    StateParameter => "state_parameter",
    PhiRobertson => "phi_robertson",
    PhiKulhawy => "phi_kulhawy",
    PhiJefferies => "phi_jefferies",
    PhiMayne => "phi_mayne",
    PhiUzielli => "phi_uzielli",
    DrBaldi => "dr_baldi",
    DrKulhawy => "dr_kulhawy",
    DrJamiolkowski => "dr_jamiolkowski",
    QtnCs => "qtn_cs",
    Qc1n => "qc1n",
    Qc1ncs => "qc1ncs",
    KSigma => "k_sigma",
    FinesContent => "fines_content",
}

/// 情景相关字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioField {
    /// 应力折减系数
    Rd,
    /// 循环应力比
    Csr,
    /// 循环阻力比
    Crr,
    /// 安全系数
    Fs,
}

impl ScenarioField {
    /// 全部情景字段
    pub const ALL: [ScenarioField; 4] = [Self::Rd, Self::Csr, Self::Crr, Self::Fs];

    /// 列名前缀
    pub fn name(self) -> &'static str {
        match self {
            Self::Rd => "rd",
            Self::Csr => "csr",
            Self::Crr => "crr",
            Self::Fs => "fs",
        }
    }

    /// 带情景标签的列名
    pub fn column_name(self, label: &str) -> String {
        format!("{}_{}", self.name(), label)
    }

    /// 从情景因子中取值
    pub fn get(self, factors: &ScenarioFactors) -> Outcome {
        match self {
            Self::Rd => factors.rd,
            Self::Csr => factors.csr,
            Self::Crr => factors.crr,
            Self::Fs => factors.fs,
        }
    }
}

// ============================================================
// DerivedRow
// ============================================================

/// 结果行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRow {
    /// 深度 z [m]
    pub depth: f64,
    /// 摩阻比 Rf [%]
    pub rf: Outcome,
    /// 重度 γ [kN/m³]
    pub gamma: Outcome,
    /// 总应力 σv [kPa]
    pub sigma_v: Outcome,
    /// 静水孔压 u0 [kPa]
    pub u0: Outcome,
    /// 截断的计算孔压 [kPa]
    pub u_calc: Outcome,
    /// 有效应力 σ'v [kPa]
    pub sigma_v_eff: Outcome,
    /// Fr [%]
    pub fr: Outcome,
    /// Qt
    pub qt_norm: Outcome,
    /// 应力指数 n
    pub n: Outcome,
    /// Cn
    pub cn: Outcome,
    /// Qtn
    pub qtn: Outcome,
    /// Ic
    pub ic: Outcome,
    /// 土类
    pub soil_class: SoilClass,
    /// qc1（密实度迭代的归一化锥尖阻力）
    pub qc1: Outcome,
    /// Cn2
    pub cn2: Outcome,
    /// Dr (Idriss & Boulanger 2008)
    pub dr: Outcome,
    /// 土层属性
    pub properties: LayerProperties,
    /// 液化因子
    pub liquefaction: LiquefactionRow,
}

impl DerivedRow {
    /// 按键取值
    pub fn get(&self, key: FieldKey) -> Outcome {
        let p = &self.properties;
        let l = &self.liquefaction;
        match key {
            FieldKey::Depth => Outcome::from_f64(self.depth),
            FieldKey::Rf => self.rf,
            FieldKey::Gamma => self.gamma,
            FieldKey::SigmaV => self.sigma_v,
            FieldKey::U0 => self.u0,
            FieldKey::UCalc => self.u_calc,
            FieldKey::SigmaVEff => self.sigma_v_eff,
            FieldKey::Fr => self.fr,
            FieldKey::QtNorm => self.qt_norm,
            FieldKey::N => self.n,
            FieldKey::Cn => self.cn,
            FieldKey::Qtn => self.qtn,
            FieldKey::Ic => self.ic,
            FieldKey::Qc1 => self.qc1,
            FieldKey::Cn2 => self.cn2,
            FieldKey::Dr => self.dr,
            FieldKey::OcrRobertson => p.ocr_robertson,
            FieldKey::OcrKulhawy => p.ocr_kulhawy,
            FieldKey::CuBq => p.cu_bq,
            FieldKey::Cu14 => p.cu_14,
            FieldKey::ConstrainedModulus => p.constrained_modulus,
            FieldKey::K01 => p.k0_1,
            FieldKey::K02 => p.k0_2,
            FieldKey::VsRobertson => p.vs_robertson,
            FieldKey::VsMayne => p.vs_mayne,
            FieldKey::Permeability => p.permeability,
            FieldKey::StateParameter => p.state_parameter,
            FieldKey::PhiRobertson => p.phi_robertson,
            FieldKey::PhiKulhawy => p.phi_kulhawy,
            FieldKey::PhiJefferies => p.phi_jefferies,
            FieldKey::PhiMayne => p.phi_mayne,
            FieldKey::PhiUzielli => p.phi_uzielli,
            FieldKey::DrBaldi => p.dr_baldi,
            FieldKey::DrKulhawy => p.dr_kulhawy,
            FieldKey::DrJamiolkowski => p.dr_jamiolkowski,
            FieldKey::QtnCs => p.qtn_cs,
            FieldKey::Qc1n => l.qc1n,
            FieldKey::Qc1ncs => l.qc1ncs,
            FieldKey::KSigma => l.k_sigma,
            FieldKey::FinesContent => l.fines_content,
        }
    }

    /// 第 k 个情景的字段
    pub fn scenario(&self, index: usize, field: ScenarioField) -> Outcome {
        self.liquefaction
            .scenarios
            .get(index)
            .map_or(Outcome::NotApplicable, |f| field.get(f))
    }
}

// ============================================================
// 测深级汇总
// ============================================================

/// 单情景汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    /// 情景标签
    pub label: String,
    /// 矩震级
    pub magnitude: f64,
    /// 峰值地面加速度 [g]
    pub pga: f64,
    /// 震级比例系数
    pub msf: f64,
    /// 基本扫描 h1/h2
    pub basic: LayerThickness,
    /// 累计扫描 h1/h2
    pub cumulative: LayerThickness,
    /// LPI
    pub lpi: f64,
    /// LPI-ish（基本 h1）
    pub lpi_ish_basic: f64,
    /// LPI-ish（累计 h1）
    pub lpi_ish_cumulative: f64,
    /// LSN
    pub lsn: f64,
    /// qc1Ncs < 33 的行数
    pub lsn_below_range: usize,
    /// LSN 查表行数
    pub lsn_qualifying_rows: usize,
}

/// 测深级汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundingSummary {
    /// 地下水位 [m]
    pub gwt: Option<f64>,
    /// 预钻孔深度 [m]
    pub preforo: Option<f64>,
    /// 预钻孔检查
    pub preforo_status: PreforoStatus,
    /// 实测是否液化
    pub liquefaction_observed: Option<bool>,
    /// 各情景汇总
    pub scenarios: Vec<ScenarioSummary>,
    /// 土类指数求解摘要
    pub sbt_report: SolverReport,
    /// 相对密实度求解摘要
    pub density_report: SolverReport,
}

impl SoundingSummary {
    /// 按标签查找情景汇总
    pub fn scenario(&self, label: &str) -> Option<&ScenarioSummary> {
        self.scenarios.iter().find(|s| s.label == label)
    }
}

/// 单条测深的完整结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundingResult {
    /// 场地标识
    pub site: String,
    /// 结果行
    pub rows: Vec<DerivedRow>,
    /// 测深级汇总
    pub summary: SoundingSummary,
}

impl SoundingResult {
    /// 投影一列
    pub fn column(&self, key: FieldKey) -> Vec<Outcome> {
        self.rows.iter().map(|r| r.get(key)).collect()
    }

    /// 投影某情景的一列；标签不存在时返回 None
    pub fn scenario_column(&self, label: &str, field: ScenarioField) -> Option<Vec<Outcome>> {
        let index = self.summary.scenarios.iter().position(|s| s.label == label)?;
        Some(self.rows.iter().map(|r| r.scenario(index, field)).collect())
    }

    /// 全部列名，情景列按情景顺序附在逐行字段之后
    pub fn column_names(&self) -> Vec<String> {
        let mut names: Vec<String> = FieldKey::ALL.iter().map(|k| k.name().to_string()).collect();
        for summary in &self.summary.scenarios {
            names.extend(ScenarioField::ALL.iter().map(|f| f.column_name(&summary.label)));
        }
        names
    }
}
