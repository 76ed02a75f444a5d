//! Genetic operators for evolving schedules.
//!
//! This module groups the traits that describe how parents are selected,
//! recombined, and perturbed, along with the concrete operators the engine
//! wires in by default. Each sub-module focuses on a particular aspect of
//! the workflow so the implementations can stay lightweight and
//! single-purpose. The traits are object-safe and draw randomness through
//! `&mut dyn RngCore`, so custom operators plug into the engine without
//! generics.

pub mod crossover;
pub mod mutation;
pub mod selection;

pub use crossover::{CrossoverOperator, OrderPreservingCrossover, TailSwapCrossover};
pub use mutation::{MutationOperator, ReplacementMutation, SwapMutation};
pub use selection::{SelectionOperator, TournamentSelection};

use rand::RngCore;
use std::fmt;

#[allow(clippy::cast_precision_loss)]
const RNG_SCALE: f64 = 1.0 / (u64::MAX as f64 + 1.0);

/// Errors produced when an operator is constructed with invalid parameters.
///
/// # Examples
/// ```
/// use lineup::ops::TailSwapCrossover;
/// let err = TailSwapCrossover::new(1.5).unwrap_err();
/// assert!(err.to_string().contains("rate"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum OperatorError {
    /// An application rate was outside `[0, 1]` or not finite.
    InvalidRate {
        /// Name of the operator reporting the error.
        operator: &'static str,
        /// Offending value.
        value: f64,
    },
    /// Tournament selection received a zero tournament size.
    InvalidTournamentSize(usize),
    /// Replacement mutation received no programs to draw from.
    EmptyProgramPool,
}

impl fmt::Display for OperatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRate { operator, value } => {
                write!(f, "{operator} rate must lie in [0, 1] (received {value})")
            }
            Self::InvalidTournamentSize(size) => {
                write!(f, "tournament size must be at least one (received {size})")
            }
            Self::EmptyProgramPool => {
                f.write_str("replacement mutation needs a non-empty program pool")
            }
        }
    }
}

impl std::error::Error for OperatorError {}

pub(crate) fn validate_rate(operator: &'static str, value: f64) -> Result<f64, OperatorError> {
    if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
        return Err(OperatorError::InvalidRate { operator, value });
    }
    Ok(value)
}

pub(crate) fn random_unit(rng: &mut dyn RngCore) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let value = rng.next_u64() as f64;
    value * RNG_SCALE
}

pub(crate) fn random_index(len: usize, rng: &mut dyn RngCore) -> usize {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (rng.next_u64() as usize) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_unit_stays_in_half_open_interval() {
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..1000 {
            let value = random_unit(&mut rng);
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn random_index_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..1000 {
            assert!(random_index(7, &mut rng) < 7);
        }
    }

    #[test]
    fn rate_validation_rejects_non_probabilities() {
        assert!(validate_rate("test", -0.5).is_err());
        assert!(validate_rate("test", 1.5).is_err());
        assert!(validate_rate("test", f64::NAN).is_err());
        assert_eq!(validate_rate("test", 0.0), Ok(0.0));
        assert_eq!(validate_rate("test", 1.0), Ok(1.0));
    }
}
