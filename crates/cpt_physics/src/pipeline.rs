// crates/cpt_physics/src/pipeline.rs

//! 测深流水线与批处理
//!
//! [`SoundingPipeline`] 按依赖顺序处理单条测深：
//!
//! 1. 输入验证（深度严格递增、非空）
//! 2. 按配置的情景标签取 PGA
//! 3. 应力柱 → 土类指数 → 相对密实度 → 土层属性 → 液化因子
//! 4. 每个情景：h1/h2 扫描、LPI、LPI-ish (×2)、LSN
//!
//! 单条测深内顺序执行；[`process_batch`] 在测深之间并行，报告保持输入顺序。

use cpt_config::{ConfigError, PipelineConfig};
use cpt_foundation::{CptError, CptResult, Outcome};
use rayon::prelude::*;

use crate::density::{DensityProfile, RelativeDensitySolver};
use crate::fields::{DerivedRow, ScenarioSummary, SoundingResult, SoundingSummary};
use crate::liquefaction::{LiquefactionFactorSolver, LiquefactionRow, ScenarioInput};
use crate::properties::{LayerProperties, RowState};
use crate::sbt::{SbtProfile, SoilBehaviorTypeSolver};
use crate::scenario::{PreforoStatus, ScenarioLookup, SiteScenario};
use crate::severity::{liquefaction_potential_index, liquefaction_severity_number, lpi_ish};
use crate::sounding::Sounding;
use crate::stress::{StressColumn, StressProfile};
use crate::thickness::{scan_basic, scan_cumulative};

// ============================================================
// SoundingPipeline
// ============================================================

/// 单条测深流水线
#[derive(Debug, Clone)]
pub struct SoundingPipeline {
    config: PipelineConfig,
    stress: StressColumn,
    sbt: SoilBehaviorTypeSolver,
    density: RelativeDensitySolver,
}

impl SoundingPipeline {
    /// 由已验证的配置创建流水线
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            stress: StressColumn::new(config.gwt_policy),
            sbt: SoilBehaviorTypeSolver::new(config.sbt),
            density: RelativeDensitySolver::new(config.density),
            config,
        })
    }

    /// 当前配置
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// 按情景标签收集 PGA，缺任一标签即失败
    fn scenario_inputs(&self, site: &str, scenario: &SiteScenario) -> CptResult<Vec<ScenarioInput>> {
        self.config
            .scenarios
            .iter()
            .map(|s| match scenario.pga(&s.label) {
                Some(pga) if pga.is_finite() => Ok(ScenarioInput::new(&s.label, s.magnitude, pga)),
                _ => {
                    log::warn!("场地 {} 缺少情景 {} 的 PGA", site, s.label);
                    Err(CptError::missing_external_data(site, format!("PGA[{}]", s.label)))
                }
            })
            .collect()
    }

    /// 处理单条测深
    pub fn run(&self, sounding: &Sounding, scenario: &SiteScenario) -> CptResult<SoundingResult> {
        sounding.ensure_valid()?;
        let site = sounding.site();
        let inputs = self.scenario_inputs(site, scenario)?;

        let stress = self.stress.compute(sounding)?;
        let sbt = self.sbt.solve(&stress);
        let density = self.density.solve(&stress, &sbt.ic);
        let liquefaction = LiquefactionFactorSolver::new(inputs);
        let factors = liquefaction.solve(&stress, &sbt, &density);

        let scenarios = summarize_scenarios(&liquefaction, &stress.depth, &factors);

        let rows = factors
            .into_iter()
            .enumerate()
            .map(|(i, liq)| assemble_row(&stress, &sbt, &density, liq, i))
            .collect();

        let info = &sounding.info;
        let summary = SoundingSummary {
            gwt: info.gwt,
            preforo: info.preforo,
            preforo_status: PreforoStatus::classify(info.gwt, info.preforo),
            liquefaction_observed: scenario.liquefaction_observed,
            scenarios,
            sbt_report: sbt.report,
            density_report: density.report,
        };

        log::debug!("场地 {} 处理完成: {} 行", site, sounding.len());
        Ok(SoundingResult {
            site: site.to_string(),
            rows,
            summary,
        })
    }

    /// 通过查找接口获取情景后处理
    pub fn run_with_lookup(
        &self,
        sounding: &Sounding,
        lookup: &dyn ScenarioLookup,
    ) -> CptResult<SoundingResult> {
        let scenario = find_scenario(sounding.site(), lookup)?;
        self.run(sounding, &scenario)
    }
}

fn find_scenario(site: &str, lookup: &dyn ScenarioLookup) -> CptResult<SiteScenario> {
    lookup.lookup(site).ok_or_else(|| {
        log::warn!("情景表中没有场地 {}", site);
        CptError::missing_external_data(site, "PGA")
    })
}

fn assemble_row(
    stress: &StressProfile,
    sbt: &SbtProfile,
    density: &DensityProfile,
    liquefaction: LiquefactionRow,
    i: usize,
) -> DerivedRow {
    let (soil_class, properties) = LayerProperties::evaluate(&RowState::from_profiles(stress, sbt, i));
    DerivedRow {
        depth: stress.depth[i],
        rf: Outcome::from_f64(stress.rf[i]),
        gamma: Outcome::from_f64(stress.gamma[i]),
        sigma_v: Outcome::from_f64(stress.sigma_v[i]),
        u0: Outcome::from_f64(stress.u0[i]),
        u_calc: Outcome::from_f64(stress.u_calc[i]),
        sigma_v_eff: Outcome::from_f64(stress.sigma_v_eff[i]),
        fr: Outcome::from_f64(stress.fr[i]),
        qt_norm: Outcome::from_f64(stress.qt_norm[i]),
        n: Outcome::from_f64(sbt.n[i]),
        cn: Outcome::from_f64(sbt.cn[i]),
        qtn: Outcome::from_f64(sbt.qtn[i]),
        ic: sbt.ic[i],
        soil_class,
        qc1: Outcome::from_f64(density.qc1[i]),
        cn2: Outcome::from_f64(density.cn2[i]),
        dr: density.dr[i],
        properties,
        liquefaction,
    }
}

/// 每个情景的厚度扫描与三种严重性指标
fn summarize_scenarios(
    solver: &LiquefactionFactorSolver,
    depth: &[f64],
    rows: &[LiquefactionRow],
) -> Vec<ScenarioSummary> {
    let qc1ncs: Vec<f64> = rows.iter().map(|r| r.qc1ncs.to_f64()).collect();

    solver
        .scenarios()
        .iter()
        .zip(solver.msf())
        .enumerate()
        .map(|(k, (input, &msf))| {
            let fs: Vec<f64> = rows
                .iter()
                .map(|r| r.scenarios.get(k).map_or(f64::NAN, |f| f.fs.to_f64()))
                .collect();

            let basic = scan_basic(depth, &fs);
            let cumulative = scan_cumulative(depth, &fs);
            let lsn = liquefaction_severity_number(depth, &qc1ncs, &fs);

            ScenarioSummary {
                label: input.label.clone(),
                magnitude: input.magnitude,
                pga: input.pga,
                msf,
                basic,
                cumulative,
                lpi: liquefaction_potential_index(depth, &fs),
                lpi_ish_basic: lpi_ish(depth, &fs, basic.h1),
                lpi_ish_cumulative: lpi_ish(depth, &fs, cumulative.h1),
                lsn: lsn.lsn,
                lsn_below_range: lsn.below_range,
                lsn_qualifying_rows: lsn.qualifying_rows,
            }
        })
        .collect()
}

// ============================================================
// 批处理
// ============================================================

/// 批处理报告
///
/// 各列表按输入顺序排列。
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// 成功处理的测深结果
    pub results: Vec<SoundingResult>,
    /// 缺少 PGA 的场地
    pub missing_pga: Vec<String>,
    /// 地下水位无效的场地
    pub invalid_gwt: Vec<String>,
    /// 地下水位浅于预钻孔底的场地
    pub gwt_above_preforo: Vec<String>,
    /// 缺少预钻孔深度的场地
    pub preforo_missing: Vec<String>,
    /// 其他失败
    pub failed: Vec<(String, CptError)>,
}

impl BatchReport {
    /// 成功处理的测深数
    pub fn processed(&self) -> usize {
        self.results.len()
    }

    /// 被跳过的测深数
    pub fn skipped(&self) -> usize {
        self.missing_pga.len() + self.invalid_gwt.len() + self.failed.len()
    }

    /// 按场地查找结果
    pub fn result(&self, site: &str) -> Option<&SoundingResult> {
        self.results.iter().find(|r| r.site == site)
    }
}

struct SiteOutcome {
    site: String,
    preforo: Option<PreforoStatus>,
    result: CptResult<SoundingResult>,
}

/// 批量处理测深
///
/// 预钻孔检查在情景查找成功后记录，与后续计算是否成功无关。
pub fn process_batch(
    soundings: &[Sounding],
    lookup: &dyn ScenarioLookup,
    config: &PipelineConfig,
) -> Result<BatchReport, ConfigError> {
    let pipeline = SoundingPipeline::new(config.clone())?;

    let outcomes: Vec<SiteOutcome> = soundings
        .par_iter()
        .map(|sounding| {
            let site = sounding.site().to_string();
            match find_scenario(&site, lookup) {
                Ok(scenario) => SiteOutcome {
                    preforo: Some(PreforoStatus::classify(sounding.info.gwt, sounding.info.preforo)),
                    result: pipeline.run(sounding, &scenario),
                    site,
                },
                Err(err) => SiteOutcome {
                    site,
                    preforo: None,
                    result: Err(err),
                },
            }
        })
        .collect();

    let mut report = BatchReport::default();
    for outcome in outcomes {
        match outcome.preforo {
            Some(PreforoStatus::GwtAbovePreforo) => report.gwt_above_preforo.push(outcome.site.clone()),
            Some(PreforoStatus::PreforoMissing) => report.preforo_missing.push(outcome.site.clone()),
            _ => {}
        }
        match outcome.result {
            Ok(result) => report.results.push(result),
            Err(err) if err.is_missing_external_data() => report.missing_pga.push(outcome.site),
            Err(err) if err.is_invalid_groundwater() => report.invalid_gwt.push(outcome.site),
            Err(err) => {
                log::warn!("场地 {} 处理失败: {}", outcome.site, err);
                report.failed.push((outcome.site, err));
            }
        }
    }

    log::info!(
        "批处理完成: {} 条成功, {} 条跳过",
        report.processed(),
        report.skipped()
    );
    Ok(report)
}
