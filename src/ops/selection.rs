//! Selection operator abstractions for schedule populations.

use crate::core::Schedule;
use crate::ops::{random_index, OperatorError};
use rand::RngCore;
use std::sync::Arc;

/// Selects parents from a population according to their fitness.
///
/// # Examples
/// ```
/// use lineup::ops::SelectionOperator;
/// use lineup::Schedule;
/// use rand::thread_rng;
///
/// struct BestOnly;
///
/// impl SelectionOperator for BestOnly {
///     fn select_index(&self, fitness_values: &[f64], _rng: &mut dyn rand::RngCore) -> Option<usize> {
///         fitness_values
///             .iter()
///             .enumerate()
///             .max_by(|(_, a), (_, b)| a.total_cmp(b))
///             .map(|(idx, _)| idx)
///     }
/// }
///
/// let operator = BestOnly;
/// let population = vec![
///     Schedule::new(vec!["news".into()]),
///     Schedule::new(vec!["film".into()]),
/// ];
/// let fitness = vec![0.2, 0.9];
/// let mut rng = thread_rng();
/// let schedule = operator.select(&population, &fitness, &mut rng).unwrap();
/// assert_eq!(schedule.programs(), ["film".to_string()]);
/// ```
pub trait SelectionOperator: Send + Sync {
    /// Returns the index of the schedule to use as a parent.
    fn select_index(&self, fitness_values: &[f64], rng: &mut dyn RngCore) -> Option<usize>;

    /// Selects a [`Schedule`] directly from the provided population.
    fn select<'a>(
        &self,
        population: &'a [Schedule],
        fitness_values: &[f64],
        rng: &mut dyn RngCore,
    ) -> Option<&'a Schedule> {
        if population.len() != fitness_values.len() {
            return None;
        }
        let idx = self.select_index(fitness_values, rng)?;
        population.get(idx)
    }

    /// Convenience helper that samples two parents independently; the same
    /// index may be returned twice.
    fn select_pair(&self, fitness_values: &[f64], rng: &mut dyn RngCore) -> Option<(usize, usize)> {
        let first = self.select_index(fitness_values, rng)?;
        let second = self.select_index(fitness_values, rng)?;
        Some((first, second))
    }
}

impl<T: SelectionOperator + ?Sized> SelectionOperator for &T {
    fn select_index(&self, fitness_values: &[f64], rng: &mut dyn RngCore) -> Option<usize> {
        (**self).select_index(fitness_values, rng)
    }
}

impl<T: SelectionOperator + ?Sized> SelectionOperator for &mut T {
    fn select_index(&self, fitness_values: &[f64], rng: &mut dyn RngCore) -> Option<usize> {
        (**self).select_index(fitness_values, rng)
    }
}

impl<T: SelectionOperator + ?Sized> SelectionOperator for Box<T> {
    fn select_index(&self, fitness_values: &[f64], rng: &mut dyn RngCore) -> Option<usize> {
        (**self).select_index(fitness_values, rng)
    }
}

impl<T: SelectionOperator + ?Sized> SelectionOperator for Arc<T> {
    fn select_index(&self, fitness_values: &[f64], rng: &mut dyn RngCore) -> Option<usize> {
        (**self).select_index(fitness_values, rng)
    }
}

/// Tournament selection that maximizes the provided fitness scores.
///
/// Contenders are drawn with replacement; ties keep the earliest drawn
/// contender, so the comparison is strictly greater-than.
///
/// # Examples
/// ```
/// use lineup::ops::{SelectionOperator, TournamentSelection};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let operator = TournamentSelection::new(2).unwrap();
/// let mut rng = StdRng::seed_from_u64(3);
/// let idx = operator.select_index(&[0.1, 0.9, 0.4], &mut rng).unwrap();
/// assert!(idx < 3);
/// ```
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    size: usize,
}

impl TournamentSelection {
    /// Creates a tournament selector of the provided size.
    ///
    /// # Errors
    /// Returns [`OperatorError::InvalidTournamentSize`] when `size` is zero.
    pub fn new(size: usize) -> Result<Self, OperatorError> {
        if size == 0 {
            return Err(OperatorError::InvalidTournamentSize(size));
        }
        Ok(Self { size })
    }
}

impl SelectionOperator for TournamentSelection {
    fn select_index(&self, fitness_values: &[f64], rng: &mut dyn RngCore) -> Option<usize> {
        if fitness_values.is_empty() {
            return None;
        }
        let tournament = self.size.min(fitness_values.len());
        let mut best_idx = None;
        for _ in 0..tournament {
            let idx = random_index(fitness_values.len(), rng);
            best_idx = match best_idx {
                Some(current) => {
                    if fitness_values[idx] > fitness_values[current] {
                        Some(idx)
                    } else {
                        Some(current)
                    }
                }
                None => Some(idx),
            };
        }
        best_idx
    }
}
