//! Generational driver for route evolution.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::compute::{CostSurface, generate_surface};
use crate::schema::{
    ConfigError, EvolutionHistory, EvolutionPhase, EvolutionProgress, EvolutionResult,
    EvolutionStats, GenerationReport, Route, RouteSearchConfig, StopReason, SurfaceCategory,
};

use super::fitness::{CostWeights, RouteEvaluator};
use super::operators::{RouteOperators, random_walk_route};
use super::population::{Individual, Population};

/// Evolution engine that owns one route search run.
///
/// The constructor builds and evaluates the initial population, leaving the
/// engine `Evolving` (or `Terminated` for a zero generation budget). Each
/// [`EvolutionEngine::step`] runs one generation until the budget is spent.
pub struct EvolutionEngine {
    config: RouteSearchConfig,
    rng: StdRng,
    evaluator: RouteEvaluator,
    operators: RouteOperators,
    population: Population,
    history: EvolutionHistory,
    generation: usize,
    best: Option<Individual>,
    phase: EvolutionPhase,
    evaluations: u64,
    cancelled: Arc<AtomicBool>,
}

impl EvolutionEngine {
    /// Create an engine on a freshly generated random surface.
    pub fn new(config: RouteSearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.random_seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let surface = generate_surface(
            config.grid_rows,
            config.grid_cols,
            &SurfaceCategory::ALL,
            config.category_costs,
            &mut rng,
        )?;

        log::info!(
            "Generated {}x{} surface (seed {})",
            config.grid_rows,
            config.grid_cols,
            seed
        );
        Ok(Self::build(config, Arc::new(surface), rng))
    }

    /// Create an engine on a caller-supplied surface.
    ///
    /// The surface dimensions must match `grid_rows` x `grid_cols`.
    pub fn with_surface(
        config: RouteSearchConfig,
        surface: Arc<CostSurface>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if surface.rows() != config.grid_rows || surface.cols() != config.grid_cols {
            return Err(ConfigError::SurfaceMismatch {
                expected: (config.grid_rows, config.grid_cols),
                actual: (surface.rows(), surface.cols()),
            });
        }
        let rng = StdRng::seed_from_u64(config.random_seed.unwrap_or_else(rand::random));
        Ok(Self::build(config, surface, rng))
    }

    fn build(config: RouteSearchConfig, surface: Arc<CostSurface>, mut rng: StdRng) -> Self {
        let evaluator =
            RouteEvaluator::new(surface, config.goal_cell, CostWeights::from(&config));
        let operators = RouteOperators::from(&config);

        let routes = (0..config.population_size)
            .map(|_| {
                random_walk_route(
                    config.start_cell,
                    config.goal_cell,
                    config.grid_rows,
                    config.grid_cols,
                    config.max_path_length,
                    &mut rng,
                )
            })
            .collect();
        let population = Population::from_routes(routes, &evaluator);

        let phase = if config.max_generations == 0 {
            EvolutionPhase::Terminated
        } else {
            EvolutionPhase::Evolving
        };

        log::info!(
            "Initialized population of {} routes from {} to {}",
            config.population_size,
            config.start_cell,
            config.goal_cell
        );

        Self {
            evaluations: config.population_size as u64,
            config,
            rng,
            evaluator,
            operators,
            population,
            history: EvolutionHistory::default(),
            generation: 0,
            best: None,
            phase,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get cancellation handle.
    ///
    /// Setting it stops [`EvolutionEngine::run_with_callback`] before the next
    /// generation. [`EvolutionEngine::step`] ignores it.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Advance one generation.
    ///
    /// Returns `None` without touching any state once terminated.
    pub fn step(&mut self) -> Option<GenerationReport> {
        if self.is_terminated() {
            return None;
        }

        self.population.rank(&self.evaluator);
        self.evaluations += self.population.len() as u64;

        let leader = &self.population.individuals()[0];
        if leader.cost() < self.best_ever_cost() {
            self.best = Some(leader.clone());
        }

        self.record_history();

        let elite_count = self.config.elite_count();
        self.population = self.population.next_generation(
            elite_count,
            &self.operators,
            &self.evaluator,
            &mut self.rng,
        );
        self.evaluations += (self.population.len() - elite_count.min(self.population.len())) as u64;
        self.generation += 1;

        let report = GenerationReport {
            generation: self.generation,
            best_cost: self.best_ever_cost(),
            best_route_length: self.best.as_ref().map_or(0, |b| b.route().len()),
        };
        log::debug!(
            "Generation {}: best cost {:.2}, route length {}",
            report.generation,
            report.best_cost,
            report.best_route_length
        );

        if self.generation >= self.config.max_generations {
            self.phase = EvolutionPhase::Terminated;
            log::info!(
                "Evolution terminated after {} generations, best cost {:.2}",
                self.generation,
                report.best_cost
            );
        }

        Some(report)
    }

    fn record_history(&mut self) {
        let stats = self.population.statistics(
            self.config.grid_rows,
            self.config.grid_cols,
            self.config.goal_cell,
        );
        self.history.best_cost.push(stats.best_cost);
        self.history.avg_cost.push(stats.avg_cost);
        self.history.cost_std.push(stats.cost_std);
        self.history
            .well_formed_fraction
            .push(stats.well_formed_fraction);
        self.history
            .goal_reached_fraction
            .push(stats.goal_reached_fraction);
    }

    #[inline]
    pub fn current_generation(&self) -> usize {
        self.generation
    }

    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.phase == EvolutionPhase::Terminated
    }

    #[inline]
    pub fn phase(&self) -> EvolutionPhase {
        self.phase
    }

    /// Lowest-cost route seen in any ranked generation.
    pub fn best_ever_route(&self) -> Option<&Route> {
        self.best.as_ref().map(Individual::route)
    }

    /// Cost of [`EvolutionEngine::best_ever_route`], or infinity before the first generation.
    pub fn best_ever_cost(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, Individual::cost)
    }

    pub fn best_ever(&self) -> Option<&Individual> {
        self.best.as_ref()
    }

    /// Owned copy of the current population, ascending by cost.
    pub fn ranked_population_snapshot(&self) -> Vec<Individual> {
        self.population.ranked_snapshot()
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn surface(&self) -> &CostSurface {
        self.evaluator.surface()
    }

    pub fn evaluator(&self) -> &RouteEvaluator {
        &self.evaluator
    }

    pub fn config(&self) -> &RouteSearchConfig {
        &self.config
    }

    pub fn history(&self) -> &EvolutionHistory {
        &self.history
    }

    /// Get current progress.
    pub fn progress(&self) -> EvolutionProgress {
        let stats = self.population.statistics(
            self.config.grid_rows,
            self.config.grid_cols,
            self.config.goal_cell,
        );

        EvolutionProgress {
            generation: self.generation,
            total_generations: self.config.max_generations,
            best_cost: self.best_ever_cost(),
            generation_best: stats.best_cost,
            avg_cost: stats.avg_cost,
            best_route: self.best_ever_route().cloned(),
            history: self.history.clone(),
            phase: self.phase,
        }
    }

    /// Run evolution with progress callback.
    ///
    /// The callback sees the initial population and then every generation.
    pub fn run_with_callback<F>(&mut self, callback: F) -> EvolutionResult
    where
        F: Fn(&EvolutionProgress),
    {
        let start_time = std::time::Instant::now();
        log::info!(
            "Starting evolution: population {}, {} generations",
            self.config.population_size,
            self.config.max_generations
        );
        callback(&self.progress());

        let stop_reason = loop {
            if self.cancelled.load(Ordering::Relaxed) {
                log::info!("Evolution cancelled at generation {}", self.generation);
                break StopReason::Cancelled;
            }
            if self.step().is_none() {
                break StopReason::MaxGenerations;
            }
            callback(&self.progress());
        };

        let elapsed = start_time.elapsed().as_secs_f64();

        // With a zero generation budget nothing was ranked yet.
        let best = self
            .best
            .clone()
            .unwrap_or_else(|| self.population.best().clone());
        let final_stats = self.population.statistics(
            self.config.grid_rows,
            self.config.grid_cols,
            self.config.goal_cell,
        );

        EvolutionResult {
            best_breakdown: self.evaluator.breakdown(best.route()),
            stats: EvolutionStats {
                generations: self.generation,
                total_evaluations: self.evaluations,
                best_cost: best.cost(),
                final_avg_cost: final_stats.avg_cost,
                goal_reached: best.route().reaches(self.config.goal_cell),
                elapsed_seconds: elapsed,
                evaluations_per_second: self.evaluations as f64 / elapsed.max(f64::EPSILON),
                stop_reason,
            },
            history: self.history.clone(),
            best_route: best.into_route(),
        }
    }

    /// Run evolution (blocking).
    pub fn run(&mut self) -> EvolutionResult {
        self.run_with_callback(|_| {})
    }
}
