//! Mutation operator abstractions for perturbing schedules.

use crate::core::{ProgramId, Schedule};
use crate::ops::{random_index, random_unit, validate_rate, OperatorError};
use rand::RngCore;
use std::sync::Arc;

/// Applies a mutation to a schedule and returns a new candidate.
///
/// # Examples
/// ```
/// use lineup::ops::MutationOperator;
/// use lineup::Schedule;
/// use rand::thread_rng;
///
/// struct Reverse;
///
/// impl MutationOperator for Reverse {
///     fn mutate(&self, parent: &[String], _rng: &mut dyn rand::RngCore) -> Vec<String> {
///         parent.iter().rev().cloned().collect()
///     }
/// }
///
/// let operator = Reverse;
/// let parent = Schedule::new(vec!["news".into(), "film".into()]);
/// let mut rng = thread_rng();
/// let offspring = operator.mutate_schedule(&parent, &mut rng);
/// assert_eq!(offspring.programs(), ["film".to_string(), "news".to_string()]);
/// ```
pub trait MutationOperator: Send + Sync {
    /// Mutates the provided slot-ordered programs.
    fn mutate(&self, parent: &[ProgramId], rng: &mut dyn RngCore) -> Vec<ProgramId>;

    /// Helper that mutates a [`Schedule`] directly.
    fn mutate_schedule(&self, schedule: &Schedule, rng: &mut dyn RngCore) -> Schedule {
        Schedule::new(self.mutate(schedule.programs(), rng))
    }
}

impl<T: MutationOperator + ?Sized> MutationOperator for &T {
    fn mutate(&self, parent: &[ProgramId], rng: &mut dyn RngCore) -> Vec<ProgramId> {
        (**self).mutate(parent, rng)
    }
}

impl<T: MutationOperator + ?Sized> MutationOperator for &mut T {
    fn mutate(&self, parent: &[ProgramId], rng: &mut dyn RngCore) -> Vec<ProgramId> {
        (**self).mutate(parent, rng)
    }
}

impl<T: MutationOperator + ?Sized> MutationOperator for Box<T> {
    fn mutate(&self, parent: &[ProgramId], rng: &mut dyn RngCore) -> Vec<ProgramId> {
        (**self).mutate(parent, rng)
    }
}

impl<T: MutationOperator + ?Sized> MutationOperator for Arc<T> {
    fn mutate(&self, parent: &[ProgramId], rng: &mut dyn RngCore) -> Vec<ProgramId> {
        (**self).mutate(parent, rng)
    }
}

/// Mutation that exchanges the programs of two distinct slots.
///
/// The two slot indices are redrawn until they differ, so a firing swap
/// always moves two assignments. The program multiset is untouched, which
/// keeps permutation schedules valid. Schedules with fewer than two slots
/// pass through unchanged.
#[derive(Debug, Clone)]
pub struct SwapMutation {
    rate: f64,
}

impl SwapMutation {
    /// Creates a swap operator that fires with probability `rate` per
    /// offspring.
    ///
    /// A rate of 0 never mutates and a rate of 1 always does.
    ///
    /// # Errors
    /// Returns [`OperatorError::InvalidRate`] when the rate is outside
    /// `[0, 1]` or not finite.
    pub fn new(rate: f64) -> Result<Self, OperatorError> {
        Ok(Self {
            rate: validate_rate("swap mutation", rate)?,
        })
    }
}

impl MutationOperator for SwapMutation {
    fn mutate(&self, parent: &[ProgramId], rng: &mut dyn RngCore) -> Vec<ProgramId> {
        let mut child = parent.to_vec();
        if child.len() < 2 || random_unit(rng) >= self.rate {
            return child;
        }
        let first = random_index(child.len(), rng);
        let mut second = random_index(child.len(), rng);
        while second == first {
            second = random_index(child.len(), rng);
        }
        child.swap(first, second);
        child
    }
}

/// Mutation that overwrites one slot with a program drawn from a fixed pool.
///
/// The drawn program may already appear elsewhere in the schedule, or even
/// in the mutated slot itself, so this operator is only valid when repeats
/// are allowed. Empty schedules pass through unchanged.
#[derive(Debug, Clone)]
pub struct ReplacementMutation {
    rate: f64,
    pool: Vec<ProgramId>,
}

impl ReplacementMutation {
    /// Creates a replacement operator drawing from `pool` that fires with
    /// probability `rate` per offspring.
    ///
    /// # Errors
    /// Returns [`OperatorError::InvalidRate`] when the rate is outside
    /// `[0, 1]` or not finite, and [`OperatorError::EmptyProgramPool`] when
    /// the pool holds no programs.
    pub fn new(rate: f64, pool: Vec<ProgramId>) -> Result<Self, OperatorError> {
        if pool.is_empty() {
            return Err(OperatorError::EmptyProgramPool);
        }
        Ok(Self {
            rate: validate_rate("replacement mutation", rate)?,
            pool,
        })
    }
}

impl MutationOperator for ReplacementMutation {
    fn mutate(&self, parent: &[ProgramId], rng: &mut dyn RngCore) -> Vec<ProgramId> {
        let mut child = parent.to_vec();
        if child.is_empty() || random_unit(rng) >= self.rate {
            return child;
        }
        let slot = random_index(child.len(), rng);
        child[slot] = self.pool[random_index(self.pool.len(), rng)].clone();
        child
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn programs(names: &[&str]) -> Vec<ProgramId> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn zero_rate_never_mutates() {
        let operator = SwapMutation::new(0.0).unwrap();
        let parent = programs(&["a", "b", "c", "d"]);
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..50 {
            assert_eq!(operator.mutate(&parent, &mut rng), parent);
        }
    }

    #[test]
    fn full_rate_swap_moves_exactly_two_slots() {
        let operator = SwapMutation::new(1.0).unwrap();
        let parent = programs(&["a", "b", "c", "d", "e"]);
        let mut rng = StdRng::seed_from_u64(14);
        for _ in 0..50 {
            let child = operator.mutate(&parent, &mut rng);
            let moved = parent
                .iter()
                .zip(child.iter())
                .filter(|(before, after)| before != after)
                .count();
            assert_eq!(moved, 2);
            let mut sorted_child = child.clone();
            sorted_child.sort();
            let mut sorted_parent = parent.clone();
            sorted_parent.sort();
            assert_eq!(sorted_child, sorted_parent);
        }
    }

    #[test]
    fn single_slot_schedules_pass_through() {
        let operator = SwapMutation::new(1.0).unwrap();
        let parent = programs(&["a"]);
        let mut rng = StdRng::seed_from_u64(15);
        assert_eq!(operator.mutate(&parent, &mut rng), parent);
    }

    #[test]
    fn replacement_draws_from_the_pool() {
        let pool = programs(&["x", "y"]);
        let operator = ReplacementMutation::new(1.0, pool.clone()).unwrap();
        let parent = programs(&["a", "b", "c"]);
        let mut rng = StdRng::seed_from_u64(16);
        for _ in 0..50 {
            let child = operator.mutate(&parent, &mut rng);
            assert_eq!(child.len(), parent.len());
            let replaced: Vec<_> = parent
                .iter()
                .zip(child.iter())
                .filter(|(before, after)| before != after)
                .map(|(_, after)| after.clone())
                .collect();
            assert_eq!(replaced.len(), 1);
            assert!(pool.contains(&replaced[0]));
        }
    }

    #[test]
    fn empty_pool_is_rejected() {
        let err = ReplacementMutation::new(0.5, Vec::new()).unwrap_err();
        assert_eq!(err, OperatorError::EmptyProgramPool);
    }

    #[test]
    fn invalid_rates_are_rejected() {
        assert!(SwapMutation::new(f64::INFINITY).is_err());
        assert!(ReplacementMutation::new(-0.1, programs(&["a"])).is_err());
    }
}
