//! Population bookkeeping: ranking, elitism and generational replacement.

use rand::Rng;
use rayon::prelude::*;

use crate::schema::{Cell, Route};

use super::fitness::RouteEvaluator;
use super::operators::{RouletteWheel, RouteOperators};

/// A route paired with its cost.
///
/// The cost is computed on construction, so an individual never carries a
/// missing or placeholder score.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    route: Route,
    cost: f64,
}

impl Individual {
    /// Evaluate `route` and wrap it.
    pub fn evaluated(route: Route, evaluator: &RouteEvaluator) -> Self {
        let cost = evaluator.evaluate(&route);
        Self { route, cost }
    }

    #[cfg(test)]
    pub(crate) fn with_cost(route: Route, cost: f64) -> Self {
        Self { route, cost }
    }

    #[inline]
    pub fn route(&self) -> &Route {
        &self.route
    }

    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn into_route(self) -> Route {
        self.route
    }
}

/// Summary statistics of one population.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PopulationStats {
    pub best_cost: f64,
    pub avg_cost: f64,
    pub cost_std: f64,
    pub well_formed_fraction: f64,
    pub goal_reached_fraction: f64,
}

/// One generation of individuals.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// # Panics
    /// Panics if `individuals` is empty.
    pub fn new(individuals: Vec<Individual>) -> Self {
        assert!(!individuals.is_empty(), "population must not be empty");
        Self { individuals }
    }

    /// Evaluate routes in parallel and collect them into a population.
    pub fn from_routes(routes: Vec<Route>, evaluator: &RouteEvaluator) -> Self {
        let individuals = routes
            .into_par_iter()
            .map(|route| Individual::evaluated(route, evaluator))
            .collect();
        Self::new(individuals)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Always false; populations are non-empty by construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    #[inline]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Re-evaluate every individual and sort ascending by cost.
    ///
    /// The sort is stable: equal costs keep their relative order.
    pub fn rank(&mut self, evaluator: &RouteEvaluator) {
        self.individuals.par_iter_mut().for_each(|individual| {
            individual.cost = evaluator.evaluate(&individual.route);
        });
        self.individuals.sort_by(|a, b| a.cost.total_cmp(&b.cost));
    }

    /// The first `k` individuals. Meaningful after [`Population::rank`].
    #[inline]
    pub fn elites(&self, k: usize) -> &[Individual] {
        &self.individuals[..k.min(self.individuals.len())]
    }

    /// Lowest-cost individual; the first one wins ties.
    pub fn best(&self) -> &Individual {
        self.individuals[1..]
            .iter()
            .fold(&self.individuals[0], |best, ind| {
                if ind.cost < best.cost { ind } else { best }
            })
    }

    /// Owned copy sorted ascending by stored cost.
    pub fn ranked_snapshot(&self) -> Vec<Individual> {
        let mut snapshot = self.individuals.clone();
        snapshot.sort_by(|a, b| a.cost.total_cmp(&b.cost));
        snapshot
    }

    /// Build the next generation: the `elite_count` leading individuals
    /// unchanged, then mutated crossover offspring of roulette-selected
    /// parents until the population is back to its current size.
    ///
    /// Call after [`Population::rank`] so the leading individuals are the elites.
    pub fn next_generation<R: Rng + ?Sized>(
        &self,
        elite_count: usize,
        operators: &RouteOperators,
        evaluator: &RouteEvaluator,
        rng: &mut R,
    ) -> Population {
        let size = self.len();
        let elites = self.elites(elite_count);
        let wheel = RouletteWheel::new(&self.individuals);

        let mut offspring = Vec::with_capacity(size - elites.len());
        while elites.len() + offspring.len() < size {
            let parent1 = self.individuals[wheel.select(rng)].route();
            let parent2 = self.individuals[wheel.select(rng)].route();
            let (child1, child2) = operators.crossover(parent1, parent2, rng);

            offspring.push(operators.mutate(&child1, rng));
            if elites.len() + offspring.len() < size {
                offspring.push(operators.mutate(&child2, rng));
            }
        }

        let mut individuals = elites.to_vec();
        individuals.par_extend(
            offspring
                .into_par_iter()
                .map(|route| Individual::evaluated(route, evaluator)),
        );
        Population::new(individuals)
    }

    /// Cost and shape statistics for reporting.
    pub fn statistics(&self, rows: usize, cols: usize, goal: Cell) -> PopulationStats {
        let n = self.individuals.len() as f64;
        let avg_cost = self.individuals.iter().map(|i| i.cost).sum::<f64>() / n;
        let variance = self
            .individuals
            .iter()
            .map(|i| (i.cost - avg_cost).powi(2))
            .sum::<f64>()
            / n;
        let well_formed = self
            .individuals
            .iter()
            .filter(|i| i.route.is_well_formed(rows, cols))
            .count();
        let reached = self
            .individuals
            .iter()
            .filter(|i| i.route.reaches(goal))
            .count();

        PopulationStats {
            best_cost: self.best().cost,
            avg_cost,
            cost_std: variance.sqrt(),
            well_formed_fraction: well_formed as f64 / n,
            goal_reached_fraction: reached as f64 / n,
        }
    }
}
