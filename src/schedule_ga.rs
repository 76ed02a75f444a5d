//! High-level broadcast-schedule genetic algorithm engine.
//!
//! The [`ScheduleGa`] builder exposes a strongly-typed interface that wires
//! the modular operators defined in [`crate::ops`] together over a rating
//! table. Users construct the engine through [`ScheduleGa::builder`],
//! customize the operators or accept the mode-matched defaults, and then call
//! [`ScheduleGa::run`] with a random number generator. The [`optimize`]
//! convenience function covers the common one-call case and returns a
//! display-ready [`Lineup`].

use crate::config::{ConfigError, GaConfig, MutationKind, ScheduleMode};
use crate::core::stats::RunStats;
use crate::core::{InitError, Placement, Population, Schedule, TimeSlot};
use crate::ops::{
    CrossoverOperator, MutationOperator, OperatorError, OrderPreservingCrossover,
    ReplacementMutation, SelectionOperator, SwapMutation, TailSwapCrossover, TournamentSelection,
};
use crate::table::{RatingError, RatingTable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::{self, Display, Formatter};

/// Report produced after running [`ScheduleGa::run`].
///
/// The winner is the best schedule of the final population; earlier
/// generations may have held better candidates only when elitism is
/// disabled, since elites survive every replacement.
///
/// # Examples
/// ```
/// use lineup::{GaConfig, RatingTable, ScheduleGa, TimeSlot};
/// use rand::SeedableRng;
///
/// let mut table = RatingTable::new();
/// table.insert("news", vec![0.8, 0.2, 0.1]).unwrap();
/// table.insert("film", vec![0.2, 0.9, 0.3]).unwrap();
/// table.insert("quiz", vec![0.1, 0.4, 0.7]).unwrap();
/// let slots = TimeSlot::hours(18, 3);
/// let ga = ScheduleGa::builder(table, slots)
///     .config(GaConfig::default().with_generations(10).with_population_size(8))
///     .build()
///     .unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let report = ga.run(&mut rng).unwrap();
/// assert_eq!(report.best_schedule.len(), 3);
/// assert!(report.best_fitness > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleGaReport {
    /// Best schedule of the final population.
    pub best_schedule: Schedule,
    /// Summed rating of [`Self::best_schedule`].
    pub best_fitness: f64,
    /// Number of generations executed.
    pub generations: usize,
    /// Per-generation metrics recorded during the run.
    pub stats: RunStats,
}

/// Finished lineup suitable for tabular display.
///
/// # Examples
/// ```
/// use lineup::{Lineup, Placement, TimeSlot};
///
/// let lineup = Lineup {
///     placements: vec![Placement {
///         slot: TimeSlot::new(0).with_label("06:00"),
///         program: "news".to_string(),
///     }],
///     total_rating: 0.8,
/// };
/// assert_eq!(lineup.placements[0].program, "news");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lineup {
    /// One program per scheduled slot, in broadcast order.
    pub placements: Vec<Placement>,
    /// Summed rating of the whole lineup.
    pub total_rating: f64,
}

/// Errors produced by the [`ScheduleGa`] engine or its default operators.
#[derive(Debug)]
pub enum ScheduleGaError {
    /// The rating table holds no programs.
    EmptyProgramSet,
    /// No broadcast slots were provided.
    NoSlots,
    /// Selection operator failed to return parents for reproduction.
    SelectionFailed,
    /// Wrapper around [`ConfigError`].
    Config(ConfigError),
    /// Wrapper around [`OperatorError`].
    Operator(OperatorError),
    /// Wrapper around [`RatingError`].
    Rating(RatingError),
}

impl Display for ScheduleGaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyProgramSet => f.write_str("rating table holds no programs"),
            Self::NoSlots => f.write_str("no broadcast slots were provided"),
            Self::SelectionFailed => f.write_str("selection operator failed to provide parents"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Operator(err) => write!(f, "{err}"),
            Self::Rating(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ScheduleGaError {}

impl From<ConfigError> for ScheduleGaError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<OperatorError> for ScheduleGaError {
    fn from(err: OperatorError) -> Self {
        Self::Operator(err)
    }
}

impl From<RatingError> for ScheduleGaError {
    fn from(err: RatingError) -> Self {
        Self::Rating(err)
    }
}

impl From<InitError> for ScheduleGaError {
    fn from(err: InitError) -> Self {
        match err {
            InitError::EmptyProgramSet => Self::EmptyProgramSet,
            InitError::ZeroSlots => Self::NoSlots,
        }
    }
}

/// Builder returned by [`ScheduleGa::builder`].
pub struct ScheduleGaBuilder {
    table: RatingTable,
    slots: Vec<TimeSlot>,
    config: GaConfig,
    selection: Option<Box<dyn SelectionOperator>>,
    crossover: Option<Box<dyn CrossoverOperator>>,
    mutation: Option<Box<dyn MutationOperator>>,
}

impl ScheduleGaBuilder {
    /// Replaces the whole configuration.
    #[must_use]
    pub fn config(mut self, config: GaConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the selection operator.
    #[must_use]
    pub fn selection(mut self, operator: impl SelectionOperator + 'static) -> Self {
        self.selection = Some(Box::new(operator));
        self
    }

    /// Replaces the crossover operator.
    #[must_use]
    pub fn crossover(mut self, operator: impl CrossoverOperator + 'static) -> Self {
        self.crossover = Some(Box::new(operator));
        self
    }

    /// Replaces the mutation operator.
    #[must_use]
    pub fn mutation(mut self, operator: impl MutationOperator + 'static) -> Self {
        self.mutation = Some(Box::new(operator));
        self
    }

    /// Finalizes the builder into a [`ScheduleGa`] engine.
    ///
    /// All validation happens here, before any generation runs: the
    /// configuration is checked for consistency, the table must hold at
    /// least one program and every program a non-empty rating list, and at
    /// least one slot must be provided. In permutation mode a broadcast
    /// window larger than the program set is clamped with a warning;
    /// trailing slots stay unscheduled rather than padding schedules with
    /// repeats.
    ///
    /// # Errors
    /// Returns the first [`ScheduleGaError`] describing an inconsistent
    /// configuration, an empty table or slot list, a program without
    /// ratings, or a default operator that rejects its parameters.
    pub fn build(self) -> Result<ScheduleGa, ScheduleGaError> {
        self.config.validate()?;
        if self.table.is_empty() {
            return Err(ScheduleGaError::EmptyProgramSet);
        }
        if self.slots.is_empty() {
            return Err(ScheduleGaError::NoSlots);
        }
        for program in self.table.programs() {
            // surfaces empty rating lists before the run starts
            self.table.rating_at(program, 0)?;
        }
        let slot_count = self
            .config
            .mode
            .effective_slot_count(self.slots.len(), self.table.len());
        if slot_count < self.slots.len() {
            tracing::warn!(
                slots = self.slots.len(),
                programs = self.table.len(),
                scheduled = slot_count,
                "program set is smaller than the broadcast window; trailing slots stay unscheduled"
            );
        }
        let selection: Box<dyn SelectionOperator> = match self.selection {
            Some(operator) => operator,
            None => Box::new(TournamentSelection::new(self.config.tournament_size)?),
        };
        let crossover: Box<dyn CrossoverOperator> = match self.crossover {
            Some(operator) => operator,
            None => match self.config.mode {
                ScheduleMode::Permutation => {
                    Box::new(OrderPreservingCrossover::new(self.config.crossover_rate)?)
                }
                ScheduleMode::Repeats => {
                    Box::new(TailSwapCrossover::new(self.config.crossover_rate)?)
                }
            },
        };
        let mutation: Box<dyn MutationOperator> = match self.mutation {
            Some(operator) => operator,
            None => match self.config.mutation_kind {
                MutationKind::Swap => Box::new(SwapMutation::new(self.config.mutation_rate)?),
                MutationKind::Replacement => Box::new(ReplacementMutation::new(
                    self.config.mutation_rate,
                    self.table.programs().to_vec(),
                )?),
            },
        };
        Ok(ScheduleGa {
            table: self.table,
            slots: self.slots,
            config: self.config,
            slot_count,
            selection,
            crossover,
            mutation,
        })
    }
}

/// Genetic algorithm engine that evolves schedules over a [`RatingTable`].
pub struct ScheduleGa {
    table: RatingTable,
    slots: Vec<TimeSlot>,
    config: GaConfig,
    slot_count: usize,
    selection: Box<dyn SelectionOperator>,
    crossover: Box<dyn CrossoverOperator>,
    mutation: Box<dyn MutationOperator>,
}

impl ScheduleGa {
    /// Creates a builder used to configure the engine.
    #[must_use]
    pub fn builder(table: RatingTable, slots: Vec<TimeSlot>) -> ScheduleGaBuilder {
        ScheduleGaBuilder {
            table,
            slots,
            config: GaConfig::default(),
            selection: None,
            crossover: None,
            mutation: None,
        }
    }

    /// Runs the configured number of generations and reports the best
    /// schedule of the final population.
    ///
    /// Each generation copies the elites unchanged, then breeds the rest of
    /// the next population from tournament-selected parents. When the last
    /// breeding step would overshoot the population size, the second child
    /// of the pair is dropped before mutation. Scoring is recomputed from
    /// the table every generation; nothing is cached across replacements.
    ///
    /// # Errors
    /// Propagates any [`ScheduleGaError`] emitted by scoring or the
    /// configured operators.
    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<ScheduleGaReport, ScheduleGaError> {
        let population_size = self.config.population_size;
        let mut population = Population::random(
            self.table.programs(),
            self.slot_count,
            population_size,
            self.config.mode,
            rng,
        )?;
        let mut fitness = self.score_population(&population)?;
        let mut stats = RunStats::new();
        record(&mut stats, &population, &fitness);
        for generation in 0..self.config.generations {
            let mut next = Population::with_capacity(population_size);
            for idx in elite_indices(&fitness, self.config.elitism_size) {
                next.push(population.schedules()[idx].clone());
            }
            while next.len() < population_size {
                let (first, second) = self
                    .selection
                    .select_pair(&fitness, rng)
                    .ok_or(ScheduleGaError::SelectionFailed)?;
                let parent_a = &population.schedules()[first];
                let parent_b = &population.schedules()[second];
                let (child_a, child_b) =
                    self.crossover.crossover_schedules(parent_a, parent_b, rng);
                let child_a = self.mutation.mutate_schedule(&child_a, rng);
                next.push(child_a);
                if next.len() >= population_size {
                    break;
                }
                let child_b = self.mutation.mutate_schedule(&child_b, rng);
                next.push(child_b);
            }
            population = next;
            fitness = self.score_population(&population)?;
            record(&mut stats, &population, &fitness);
            tracing::debug!(
                generation,
                best = stats.best_fitness[stats.generations() - 1],
                "generation complete"
            );
        }
        // population size is validated to at least 2, so index 0 exists
        let mut best = 0;
        for idx in 1..fitness.len() {
            if fitness[idx].total_cmp(&fitness[best]).is_gt() {
                best = idx;
            }
        }
        Ok(ScheduleGaReport {
            best_schedule: population.schedules()[best].clone(),
            best_fitness: fitness[best],
            generations: self.config.generations,
            stats,
        })
    }

    /// Pairs a report's best schedule with the engine's slots.
    ///
    /// In permutation mode with a clamped broadcast window, only the
    /// scheduled slots appear; trailing slots stay unscheduled.
    #[must_use]
    pub fn lineup(&self, report: &ScheduleGaReport) -> Lineup {
        let placements = self
            .slots
            .iter()
            .zip(report.best_schedule.iter())
            .map(|(slot, program)| Placement {
                slot: slot.clone(),
                program: program.clone(),
            })
            .collect();
        Lineup {
            placements,
            total_rating: report.best_fitness,
        }
    }

    fn score_population(&self, population: &Population) -> Result<Vec<f64>, ScheduleGaError> {
        let mut fitness = Vec::with_capacity(population.len());
        for schedule in population.schedules() {
            fitness.push(self.table.score(schedule)?);
        }
        Ok(fitness)
    }
}

/// Runs a whole optimization in one call and returns the winning lineup.
///
/// The RNG is seeded from [`GaConfig::seed`] when present, making the run
/// reproducible; otherwise it is seeded from entropy.
///
/// # Examples
/// ```
/// use lineup::{optimize, GaConfig, RatingTable, TimeSlot};
///
/// let mut table = RatingTable::new();
/// table.insert("news", vec![0.9, 0.1, 0.1]).unwrap();
/// table.insert("film", vec![0.1, 0.9, 0.1]).unwrap();
/// table.insert("quiz", vec![0.1, 0.1, 0.9]).unwrap();
/// let slots = TimeSlot::hours(6, 3);
/// let config = GaConfig::default().with_seed(42);
/// let lineup = optimize(&table, &slots, &config).unwrap();
/// assert_eq!(lineup.placements.len(), 3);
/// assert!(lineup.total_rating > 0.0);
/// ```
///
/// # Errors
/// Propagates any [`ScheduleGaError`] from validation or the run itself.
pub fn optimize(
    table: &RatingTable,
    slots: &[TimeSlot],
    config: &GaConfig,
) -> Result<Lineup, ScheduleGaError> {
    tracing::info!(
        programs = table.len(),
        slots = slots.len(),
        generations = config.generations,
        "starting schedule optimization"
    );
    let ga = ScheduleGa::builder(table.clone(), slots.to_vec())
        .config(config.clone())
        .build()?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let report = ga.run(&mut rng)?;
    tracing::info!(
        generations = report.generations,
        best = report.best_fitness,
        "optimization finished"
    );
    Ok(ga.lineup(&report))
}

fn record(stats: &mut RunStats, population: &Population, fitness: &[f64]) {
    let best = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    stats.best_fitness.push(best);
    stats.mean_fitness.push(mean_of(fitness));
    stats.diversity.push(population.distinct_fraction());
}

#[allow(clippy::cast_precision_loss)]
fn mean_of(fitness: &[f64]) -> f64 {
    if fitness.is_empty() {
        return 0.0;
    }
    fitness.iter().sum::<f64>() / fitness.len() as f64
}

fn elite_indices(fitness: &[f64], count: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..fitness.len()).collect();
    // stable sort keeps population order among equal-fitness elites
    indices.sort_by(|&a, &b| fitness[b].total_cmp(&fitness[a]));
    indices.truncate(count.min(fitness.len()));
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn diagonal_table() -> RatingTable {
        let mut table = RatingTable::new();
        table.insert("a", vec![0.9, 0.1, 0.1]).unwrap();
        table.insert("b", vec![0.1, 0.9, 0.1]).unwrap();
        table.insert("c", vec![0.1, 0.1, 0.9]).unwrap();
        table
    }

    #[test]
    fn elite_indices_sort_descending() {
        let fitness = vec![0.3, 0.9, 0.1, 0.7];
        assert_eq!(elite_indices(&fitness, 2), vec![1, 3]);
        assert_eq!(elite_indices(&fitness, 10), vec![1, 3, 0, 2]);
    }

    #[test]
    fn elite_ties_keep_population_order() {
        let fitness = vec![0.5, 0.5, 0.9, 0.5];
        assert_eq!(elite_indices(&fitness, 3), vec![2, 0, 1]);
    }

    #[test]
    fn builder_rejects_empty_table() {
        // unwrap_err would need Debug on the engine, which its boxed operators rule out
        let err = ScheduleGa::builder(RatingTable::new(), TimeSlot::hours(6, 3))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, ScheduleGaError::EmptyProgramSet));
    }

    #[test]
    fn builder_rejects_missing_slots() {
        let err = ScheduleGa::builder(diagonal_table(), Vec::new())
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, ScheduleGaError::NoSlots));
    }

    #[test]
    fn builder_rejects_inconsistent_config() {
        let err = ScheduleGa::builder(diagonal_table(), TimeSlot::hours(6, 3))
            .config(GaConfig::default().with_population_size(1))
            .build()
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ScheduleGaError::Config(ConfigError::InvalidPopulationSize(1))
        ));
    }

    #[test]
    fn builder_rejects_programs_without_ratings() {
        let mut table = diagonal_table();
        table.insert("silent", vec![]).unwrap();
        let err = ScheduleGa::builder(table, TimeSlot::hours(6, 3))
            .build()
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ScheduleGaError::Rating(RatingError::EmptyRatings { .. })
        ));
    }

    #[test]
    fn run_reports_final_population_best() {
        let ga = ScheduleGa::builder(diagonal_table(), TimeSlot::hours(6, 3))
            .config(
                GaConfig::default()
                    .with_generations(5)
                    .with_population_size(6),
            )
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let report = ga.run(&mut rng).unwrap();
        assert_eq!(report.best_schedule.len(), 3);
        assert_eq!(report.generations, 5);
        assert_eq!(report.stats.generations(), 6);
        let rescored = ga.table.score(&report.best_schedule).unwrap();
        assert_eq!(rescored, report.best_fitness);
    }

    #[test]
    fn elitism_keeps_best_fitness_from_regressing() {
        let ga = ScheduleGa::builder(diagonal_table(), TimeSlot::hours(6, 3))
            .config(
                GaConfig::default()
                    .with_generations(30)
                    .with_population_size(8)
                    .with_elitism_size(2),
            )
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let report = ga.run(&mut rng).unwrap();
        for window in report.stats.best_fitness.windows(2) {
            assert!(window[1] >= window[0]);
        }
    }

    #[test]
    fn custom_selection_operator_is_honored() {
        struct FirstOnly;

        impl SelectionOperator for FirstOnly {
            fn select_index(
                &self,
                fitness_values: &[f64],
                _rng: &mut dyn rand::RngCore,
            ) -> Option<usize> {
                if fitness_values.is_empty() {
                    None
                } else {
                    Some(0)
                }
            }
        }

        let ga = ScheduleGa::builder(diagonal_table(), TimeSlot::hours(6, 3))
            .config(
                GaConfig::default()
                    .with_generations(3)
                    .with_population_size(4),
            )
            .selection(FirstOnly)
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(19);
        let report = ga.run(&mut rng).unwrap();
        assert_eq!(report.stats.generations(), 4);
    }

    #[test]
    fn lineup_pairs_slots_with_programs() {
        let ga = ScheduleGa::builder(diagonal_table(), TimeSlot::hours(6, 3))
            .config(
                GaConfig::default()
                    .with_generations(2)
                    .with_population_size(4),
            )
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(23);
        let report = ga.run(&mut rng).unwrap();
        let lineup = ga.lineup(&report);
        assert_eq!(lineup.placements.len(), 3);
        assert_eq!(lineup.placements[0].slot.label.as_deref(), Some("06:00"));
        assert_eq!(lineup.total_rating, report.best_fitness);
    }
}
