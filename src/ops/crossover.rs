//! Crossover operator abstractions for recombining schedules.

use crate::core::{ProgramId, Schedule};
use crate::ops::{random_index, random_unit, validate_rate, OperatorError};
use rand::RngCore;
use std::collections::HashSet;
use std::sync::Arc;

/// Produces new schedules by mixing slot assignments from two parents.
///
/// # Examples
/// ```
/// use lineup::ops::CrossoverOperator;
/// use lineup::Schedule;
/// use rand::thread_rng;
///
/// struct Exchange;
///
/// impl CrossoverOperator for Exchange {
///     fn crossover(
///         &self,
///         parent_a: &[String],
///         parent_b: &[String],
///         _rng: &mut dyn rand::RngCore,
///     ) -> (Vec<String>, Vec<String>) {
///         (parent_b.to_vec(), parent_a.to_vec())
///     }
/// }
///
/// let operator = Exchange;
/// let parent_a = Schedule::new(vec!["news".into()]);
/// let parent_b = Schedule::new(vec!["film".into()]);
/// let mut rng = thread_rng();
/// let (child_a, child_b) = operator.crossover_schedules(&parent_a, &parent_b, &mut rng);
/// assert_eq!(child_a.programs(), ["film".to_string()]);
/// assert_eq!(child_b.programs(), ["news".to_string()]);
/// ```
pub trait CrossoverOperator: Send + Sync {
    /// Applies crossover to parent slices and returns their offspring.
    fn crossover(
        &self,
        parent_a: &[ProgramId],
        parent_b: &[ProgramId],
        rng: &mut dyn RngCore,
    ) -> (Vec<ProgramId>, Vec<ProgramId>);

    /// Helper that operates directly on [`Schedule`] values.
    fn crossover_schedules(
        &self,
        parent_a: &Schedule,
        parent_b: &Schedule,
        rng: &mut dyn RngCore,
    ) -> (Schedule, Schedule) {
        let (child_a, child_b) = self.crossover(parent_a.programs(), parent_b.programs(), rng);
        (Schedule::new(child_a), Schedule::new(child_b))
    }
}

impl<T: CrossoverOperator + ?Sized> CrossoverOperator for &T {
    fn crossover(
        &self,
        parent_a: &[ProgramId],
        parent_b: &[ProgramId],
        rng: &mut dyn RngCore,
    ) -> (Vec<ProgramId>, Vec<ProgramId>) {
        (**self).crossover(parent_a, parent_b, rng)
    }
}

impl<T: CrossoverOperator + ?Sized> CrossoverOperator for &mut T {
    fn crossover(
        &self,
        parent_a: &[ProgramId],
        parent_b: &[ProgramId],
        rng: &mut dyn RngCore,
    ) -> (Vec<ProgramId>, Vec<ProgramId>) {
        (**self).crossover(parent_a, parent_b, rng)
    }
}

impl<T: CrossoverOperator + ?Sized> CrossoverOperator for Box<T> {
    fn crossover(
        &self,
        parent_a: &[ProgramId],
        parent_b: &[ProgramId],
        rng: &mut dyn RngCore,
    ) -> (Vec<ProgramId>, Vec<ProgramId>) {
        (**self).crossover(parent_a, parent_b, rng)
    }
}

impl<T: CrossoverOperator + ?Sized> CrossoverOperator for Arc<T> {
    fn crossover(
        &self,
        parent_a: &[ProgramId],
        parent_b: &[ProgramId],
        rng: &mut dyn RngCore,
    ) -> (Vec<ProgramId>, Vec<ProgramId>) {
        (**self).crossover(parent_a, parent_b, rng)
    }
}

/// Single-point crossover that swaps the parents' tails.
///
/// A cut point is drawn from the interior range `[1, len - 2]`, so each
/// child keeps at least one slot from either side. Schedules shorter than
/// three slots have no interior point and pass through unchanged, as do
/// pairs where the rate roll fails or the parents differ in length.
///
/// Both children inherit one slot per position, so in repeat mode the
/// program multiset may change; use [`OrderPreservingCrossover`] when
/// schedules must stay permutations.
#[derive(Debug, Clone)]
pub struct TailSwapCrossover {
    rate: f64,
}

impl TailSwapCrossover {
    /// Creates a tail-swap operator that recombines with probability `rate`.
    ///
    /// A rate of 0 never recombines and a rate of 1 always does.
    ///
    /// # Errors
    /// Returns [`OperatorError::InvalidRate`] when the rate is outside
    /// `[0, 1]` or not finite.
    pub fn new(rate: f64) -> Result<Self, OperatorError> {
        Ok(Self {
            rate: validate_rate("tail-swap crossover", rate)?,
        })
    }
}

impl CrossoverOperator for TailSwapCrossover {
    fn crossover(
        &self,
        parent_a: &[ProgramId],
        parent_b: &[ProgramId],
        rng: &mut dyn RngCore,
    ) -> (Vec<ProgramId>, Vec<ProgramId>) {
        let len = parent_a.len();
        if len != parent_b.len() || len < 3 || random_unit(rng) >= self.rate {
            return (parent_a.to_vec(), parent_b.to_vec());
        }
        let point = 1 + random_index(len - 2, rng);
        let mut child_a = parent_a[..point].to_vec();
        child_a.extend_from_slice(&parent_b[point..]);
        let mut child_b = parent_b[..point].to_vec();
        child_b.extend_from_slice(&parent_a[point..]);
        (child_a, child_b)
    }
}

/// Single-point crossover that preserves each parent's program multiset.
///
/// Each child keeps its own prefix up to the cut point and fills the
/// remaining slots with the other parent's programs in that parent's order,
/// skipping programs the prefix already holds. Assumes both parents draw
/// from one duplicate-free program set, which permutation schedules
/// guarantee. The same pass-through rules as [`TailSwapCrossover`] apply.
#[derive(Debug, Clone)]
pub struct OrderPreservingCrossover {
    rate: f64,
}

impl OrderPreservingCrossover {
    /// Creates an order-preserving operator that recombines with probability
    /// `rate`.
    ///
    /// # Errors
    /// Returns [`OperatorError::InvalidRate`] when the rate is outside
    /// `[0, 1]` or not finite.
    pub fn new(rate: f64) -> Result<Self, OperatorError> {
        Ok(Self {
            rate: validate_rate("order-preserving crossover", rate)?,
        })
    }
}

impl CrossoverOperator for OrderPreservingCrossover {
    fn crossover(
        &self,
        parent_a: &[ProgramId],
        parent_b: &[ProgramId],
        rng: &mut dyn RngCore,
    ) -> (Vec<ProgramId>, Vec<ProgramId>) {
        let len = parent_a.len();
        if len != parent_b.len() || len < 3 || random_unit(rng) >= self.rate {
            return (parent_a.to_vec(), parent_b.to_vec());
        }
        let point = 1 + random_index(len - 2, rng);
        (
            ordered_fill(parent_a, parent_b, point),
            ordered_fill(parent_b, parent_a, point),
        )
    }
}

fn ordered_fill(keeper: &[ProgramId], donor: &[ProgramId], point: usize) -> Vec<ProgramId> {
    let mut child = keeper[..point].to_vec();
    let mut seen: HashSet<&ProgramId> = keeper[..point].iter().collect();
    for program in donor {
        if child.len() == keeper.len() {
            break;
        }
        if seen.insert(program) {
            child.push(program.clone());
        }
    }
    child
}
