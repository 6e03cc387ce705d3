//! Strategy pipeline using Rayon for batch runs.

use std::cmp::Ordering;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{Level, debug, info, span, warn};

use super::error::PipelineError;
use super::types::{PipelineReport, StrategyRecommendation, SymbolInput, rank_score};
use crate::config::Config;
use crate::decay::{adjusted_targets, strategy_theta};
use crate::error::{StrategyError, StrategyFailure};
use crate::exits::ExitManager;
use crate::models::to_f64;
use crate::observability::record_pipeline_run;
use crate::risk::RiskManager;
use crate::selection::StrikeSelector;
use crate::strategies::{ConstructionContext, StrategyCatalog, StrategyKind};

type JobOutcome = Result<StrategyRecommendation, StrategyFailure>;

/// One (symbol, strategy) construction.
#[derive(Debug, Clone, Copy)]
struct Job {
    input: usize,
    kind: StrategyKind,
}

/// Runs construction and analysis for whole symbols.
#[derive(Debug)]
pub struct StrategyPipeline {
    config: Config,
    catalog: StrategyCatalog,
    selector: StrikeSelector,
    risk: RiskManager,
    exits: ExitManager,
}

impl Default for StrategyPipeline {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl StrategyPipeline {
    /// Pipeline with every built-in archetype.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_catalog(config, StrategyCatalog::new())
    }

    /// Pipeline over a custom catalog.
    #[must_use]
    pub fn with_catalog(config: Config, catalog: StrategyCatalog) -> Self {
        let selector = StrikeSelector::new(config.selection.clone(), config.liquidity.clone());
        let risk = RiskManager::new(config.risk.clone(), config.liquidity.min_acceptable_score);
        let exits = ExitManager::new(config.exits.clone());
        Self {
            config,
            catalog,
            selector,
            risk,
            exits,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Configure the global rayon thread pool.
    ///
    /// # Errors
    ///
    /// Returns error if the pool was already built or cannot be created.
    pub fn configure_thread_pool(&self) -> Result<(), PipelineError> {
        if self.config.pipeline.max_threads > 0 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.pipeline.max_threads)
                .build_global()
                .map_err(|e| PipelineError::ThreadPool {
                    message: e.to_string(),
                })?;
        }
        Ok(())
    }

    /// Analyze one symbol.
    #[must_use]
    pub fn analyze(&self, input: &SymbolInput) -> PipelineReport {
        self.analyze_batch(std::slice::from_ref(input))
            .into_iter()
            .next()
            .unwrap_or_else(|| PipelineReport {
                symbol: input.symbol().to_string(),
                recommendations: Vec::new(),
                failures: Vec::new(),
            })
    }

    /// Analyze many symbols, one report per input in input order.
    ///
    /// Every (symbol, strategy) pair is an independent job; batches of at
    /// least `min_parallel_jobs` run on the rayon pool.
    #[must_use]
    pub fn analyze_batch(&self, inputs: &[SymbolInput]) -> Vec<PipelineReport> {
        let start = Instant::now();
        let mut reports: Vec<PipelineReport> = inputs
            .iter()
            .map(|input| PipelineReport {
                symbol: input.symbol().to_string(),
                recommendations: Vec::new(),
                failures: Vec::new(),
            })
            .collect();

        let mut jobs = Vec::new();
        for (index, input) in inputs.iter().enumerate() {
            let candidates = self
                .catalog
                .candidates(&input.analysis, &self.config.strategies.enabled);
            debug!(symbol = %input.symbol(), candidates = candidates.len(), "Selected candidates");

            if let Err(e) = input.chain.validate() {
                warn!(symbol = %input.symbol(), error = %e, "Rejected chain snapshot");
                reports[index].failures.extend(
                    candidates
                        .iter()
                        .map(|&kind| StrategyFailure::new(input.symbol(), kind, &e)),
                );
                continue;
            }
            jobs.extend(candidates.into_iter().map(|kind| Job { input: index, kind }));
        }

        let outcomes: Vec<JobOutcome> = if jobs.len() >= self.config.pipeline.min_parallel_jobs {
            jobs.par_iter().map(|job| self.run_job(inputs, *job)).collect()
        } else {
            jobs.iter().map(|job| self.run_job(inputs, *job)).collect()
        };

        for (job, outcome) in jobs.iter().zip(outcomes) {
            let report = &mut reports[job.input];
            match outcome {
                Ok(recommendation) => report.recommendations.push(recommendation),
                Err(failure) => report.failures.push(failure),
            }
        }

        let limit = self.config.pipeline.max_recommendations;
        for report in &mut reports {
            report
                .recommendations
                .sort_by(|a, b| b.rank_score.partial_cmp(&a.rank_score).unwrap_or(Ordering::Equal));
            if limit > 0 {
                report.recommendations.truncate(limit);
            }
        }

        let recommendations: usize = reports.iter().map(|r| r.recommendations.len()).sum();
        let failures: usize = reports.iter().map(|r| r.failures.len()).sum();
        let elapsed = start.elapsed().as_secs_f64();
        record_pipeline_run(inputs.len(), recommendations, failures, elapsed);
        info!(
            symbols = inputs.len(),
            jobs = jobs.len(),
            recommendations,
            failures,
            elapsed_secs = elapsed,
            "Pipeline run complete"
        );

        reports
    }

    fn run_job(&self, inputs: &[SymbolInput], job: Job) -> JobOutcome {
        let input = &inputs[job.input];
        let span = span!(Level::DEBUG, "pipeline_job", symbol = %input.symbol(), strategy = %job.kind);
        let _guard = span.enter();

        self.recommend(input, job.kind)
            .map_err(|e| StrategyFailure::new(input.symbol(), job.kind, &e))
    }

    /// Construct one strategy for a symbol and attach its analyses.
    ///
    /// # Errors
    ///
    /// Returns the construction error when the archetype cannot be built.
    pub fn recommend(
        &self,
        input: &SymbolInput,
        kind: StrategyKind,
    ) -> Result<StrategyRecommendation, StrategyError> {
        let ctx = ConstructionContext::new(
            &input.chain,
            &input.analysis,
            &self.selector,
            &self.config.strategies,
        )
        .with_far_chain(input.far_chain.as_ref())
        .with_account(input.account.as_ref());

        let result = self.catalog.construct(kind, &ctx)?;

        let holding_days = input.analysis.timeframe.holding_days();
        let theta = strategy_theta(&result.legs, holding_days, to_f64(result.spot_price));
        let targets = adjusted_targets(
            &theta,
            self.exits.params(kind).profit_target_pct,
            holding_days,
        );
        let risk = self.risk.assess_risk(&result);
        let position_size = self
            .risk
            .size_position(&result, &input.analysis, input.account.as_ref());
        let exits = self.exits.generate(kind, &result, Some(&input.analysis));
        let rank_score = rank_score(result.probability_of_profit, theta.theta_score, risk.score);

        Ok(StrategyRecommendation {
            result,
            theta,
            targets,
            risk,
            position_size,
            exits,
            rank_score,
        })
    }
}
