//! Run parameters for the schedule optimizer.
//!
//! [`GaConfig`] gathers every knob of a run in one validated record. The
//! defaults reproduce a small broadcast-day optimization; callers override
//! individual fields through the `with_*` setters and the engine rejects
//! contradictory combinations before any generation runs.

use std::fmt;

/// How candidate schedules treat repeated programs.
///
/// # Examples
/// ```
/// use lineup::ScheduleMode;
/// assert_eq!(ScheduleMode::Permutation.effective_slot_count(10, 6), 6);
/// assert_eq!(ScheduleMode::Repeats.effective_slot_count(10, 6), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScheduleMode {
    /// Every schedule is a permutation of the program set; no program airs
    /// twice.
    Permutation,
    /// Slots are filled independently; a program may air in several slots.
    Repeats,
}

impl ScheduleMode {
    /// Returns the number of slots schedules will actually cover.
    ///
    /// Permutation schedules cannot be longer than the program set, so the
    /// slot count is clamped; repeat schedules always cover every slot.
    #[must_use]
    pub fn effective_slot_count(self, slot_count: usize, program_count: usize) -> usize {
        match self {
            ScheduleMode::Permutation => slot_count.min(program_count),
            ScheduleMode::Repeats => slot_count,
        }
    }
}

/// Which mutation operator the engine applies to offspring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationKind {
    /// Exchange the programs of two distinct slots. Preserves the schedule's
    /// program multiset, so it is valid in every mode.
    Swap,
    /// Overwrite one slot with a program drawn from the full program set.
    /// May introduce repeats, so it requires [`ScheduleMode::Repeats`].
    Replacement,
}

/// Parameters of a single optimization run.
///
/// # Examples
/// ```
/// use lineup::{GaConfig, ScheduleMode};
///
/// let config = GaConfig::default()
///     .with_generations(200)
///     .with_population_size(30)
///     .with_seed(42);
/// assert_eq!(config.generations, 200);
/// assert_eq!(config.mode, ScheduleMode::Permutation);
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of generations to evolve. The loop always runs to completion;
    /// there is no early-stopping criterion.
    pub generations: usize,
    /// Number of schedules kept alive per generation. At least 2.
    pub population_size: usize,
    /// Probability in `[0, 1]` that a selected pair is recombined rather
    /// than copied.
    pub crossover_rate: f64,
    /// Probability in `[0, 1]` that an offspring is mutated.
    pub mutation_rate: f64,
    /// Number of top schedules copied unchanged into the next generation.
    pub elitism_size: usize,
    /// Number of contenders drawn (with replacement) per tournament.
    pub tournament_size: usize,
    /// Whether schedules are permutations or may repeat programs.
    pub mode: ScheduleMode,
    /// Mutation operator applied to offspring.
    pub mutation_kind: MutationKind,
    /// Seed for the run's RNG; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            generations: 100,
            population_size: 50,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            elitism_size: 2,
            tournament_size: 2,
            mode: ScheduleMode::Permutation,
            mutation_kind: MutationKind::Swap,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the number of generations.
    #[must_use]
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the population size.
    #[must_use]
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    /// Sets the crossover rate.
    #[must_use]
    pub fn with_crossover_rate(mut self, crossover_rate: f64) -> Self {
        self.crossover_rate = crossover_rate;
        self
    }

    /// Sets the mutation rate.
    #[must_use]
    pub fn with_mutation_rate(mut self, mutation_rate: f64) -> Self {
        self.mutation_rate = mutation_rate;
        self
    }

    /// Sets the number of elites carried over unchanged.
    #[must_use]
    pub fn with_elitism_size(mut self, elitism_size: usize) -> Self {
        self.elitism_size = elitism_size;
        self
    }

    /// Sets the tournament size.
    #[must_use]
    pub fn with_tournament_size(mut self, tournament_size: usize) -> Self {
        self.tournament_size = tournament_size;
        self
    }

    /// Sets the schedule mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ScheduleMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the mutation operator.
    #[must_use]
    pub fn with_mutation_kind(mut self, mutation_kind: MutationKind) -> Self {
        self.mutation_kind = mutation_kind;
        self
    }

    /// Sets the RNG seed, making the run reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks every field for consistency.
    ///
    /// # Examples
    /// ```
    /// use lineup::{ConfigError, GaConfig};
    /// let err = GaConfig::default().with_crossover_rate(1.5).validate().unwrap_err();
    /// assert!(matches!(err, ConfigError::InvalidCrossoverRate(_)));
    /// ```
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] encountered, checking fields in
    /// declaration order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generations == 0 {
            return Err(ConfigError::InvalidGenerationCount);
        }
        if self.population_size < 2 {
            return Err(ConfigError::InvalidPopulationSize(self.population_size));
        }
        if !rate_is_valid(self.crossover_rate) {
            return Err(ConfigError::InvalidCrossoverRate(self.crossover_rate));
        }
        if !rate_is_valid(self.mutation_rate) {
            return Err(ConfigError::InvalidMutationRate(self.mutation_rate));
        }
        if self.elitism_size > self.population_size {
            return Err(ConfigError::InvalidElitismSize {
                elitism: self.elitism_size,
                population: self.population_size,
            });
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::InvalidTournamentSize);
        }
        if self.mode == ScheduleMode::Permutation
            && self.mutation_kind == MutationKind::Replacement
        {
            return Err(ConfigError::ReplacementRequiresRepeats);
        }
        Ok(())
    }
}

fn rate_is_valid(rate: f64) -> bool {
    rate.is_finite() && (0.0..=1.0).contains(&rate)
}

/// Error returned when a [`GaConfig`] is internally inconsistent.
///
/// # Examples
/// ```
/// use lineup::GaConfig;
/// let err = GaConfig::default().with_population_size(1).validate().unwrap_err();
/// assert!(err.to_string().contains("population"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The run would execute zero generations.
    InvalidGenerationCount,
    /// The population is too small to breed from.
    InvalidPopulationSize(usize),
    /// The crossover rate is not a probability.
    InvalidCrossoverRate(f64),
    /// The mutation rate is not a probability.
    InvalidMutationRate(f64),
    /// More elites were requested than the population holds.
    InvalidElitismSize {
        /// Requested number of elites.
        elitism: usize,
        /// Configured population size.
        population: usize,
    },
    /// Tournaments need at least one contender.
    InvalidTournamentSize,
    /// Replacement mutation can introduce repeats, which permutation mode
    /// forbids.
    ReplacementRequiresRepeats,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidGenerationCount => {
                write!(f, "generation count must be at least 1")
            }
            ConfigError::InvalidPopulationSize(size) => {
                write!(f, "population size must be at least 2 (got {size})")
            }
            ConfigError::InvalidCrossoverRate(rate) => {
                write!(f, "crossover rate must lie in [0, 1] (got {rate})")
            }
            ConfigError::InvalidMutationRate(rate) => {
                write!(f, "mutation rate must lie in [0, 1] (got {rate})")
            }
            ConfigError::InvalidElitismSize {
                elitism,
                population,
            } => write!(
                f,
                "elitism size {elitism} exceeds population size {population}"
            ),
            ConfigError::InvalidTournamentSize => {
                write!(f, "tournament size must be at least 1")
            }
            ConfigError::ReplacementRequiresRepeats => write!(
                f,
                "replacement mutation requires ScheduleMode::Repeats; permutation schedules cannot repeat programs"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        GaConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_generations_are_rejected() {
        let err = GaConfig::default().with_generations(0).validate().unwrap_err();
        assert_eq!(err, ConfigError::InvalidGenerationCount);
    }

    #[test]
    fn population_of_one_is_rejected() {
        let err = GaConfig::default()
            .with_population_size(1)
            .validate()
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidPopulationSize(1));
    }

    #[test]
    fn out_of_range_rates_are_rejected() {
        let err = GaConfig::default()
            .with_crossover_rate(-0.1)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCrossoverRate(_)));
        let err = GaConfig::default()
            .with_mutation_rate(f64::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMutationRate(_)));
    }

    #[test]
    fn boundary_rates_are_accepted() {
        GaConfig::default()
            .with_crossover_rate(0.0)
            .with_mutation_rate(1.0)
            .validate()
            .unwrap();
    }

    #[test]
    fn elitism_may_fill_the_whole_population() {
        GaConfig::default()
            .with_population_size(2)
            .with_elitism_size(2)
            .validate()
            .unwrap();
        let err = GaConfig::default()
            .with_population_size(2)
            .with_elitism_size(3)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidElitismSize { .. }));
    }

    #[test]
    fn replacement_mutation_requires_repeats_mode() {
        let err = GaConfig::default()
            .with_mutation_kind(MutationKind::Replacement)
            .validate()
            .unwrap_err();
        assert_eq!(err, ConfigError::ReplacementRequiresRepeats);
        GaConfig::default()
            .with_mode(ScheduleMode::Repeats)
            .with_mutation_kind(MutationKind::Replacement)
            .validate()
            .unwrap();
    }
}
