//! Background execution of optimizations on a Tokio runtime.
//!
//! A full run is CPU-bound and can take long enough to stall an async
//! executor, so [`optimize_in_background`] moves it onto the blocking
//! thread pool and hands back the winning lineup when it completes.

use crate::config::GaConfig;
use crate::core::TimeSlot;
use crate::schedule_ga::{optimize, Lineup, ScheduleGaError};
use crate::table::RatingTable;
use std::fmt::{self, Display, Formatter};

/// Errors produced when an optimization is offloaded to the runtime.
#[derive(Debug)]
pub enum OffloadError {
    /// The blocking task panicked or was cancelled before finishing.
    Task(tokio::task::JoinError),
    /// Wrapper around [`ScheduleGaError`].
    Ga(ScheduleGaError),
}

impl Display for OffloadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task(err) => write!(f, "background optimization task failed: {err}"),
            Self::Ga(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for OffloadError {}

impl From<tokio::task::JoinError> for OffloadError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err)
    }
}

impl From<ScheduleGaError> for OffloadError {
    fn from(err: ScheduleGaError) -> Self {
        Self::Ga(err)
    }
}

/// Runs [`optimize`] on the blocking thread pool of the ambient runtime.
///
/// Inputs are moved into the task, so the caller keeps no borrow across the
/// await point. Seeded configurations stay reproducible; the offload changes
/// where the run executes, not what it computes.
///
/// # Examples
/// ```
/// use lineup::{optimize_in_background, GaConfig, RatingTable, TimeSlot};
///
/// let mut table = RatingTable::new();
/// table.insert("news", vec![0.8, 0.3]).unwrap();
/// table.insert("film", vec![0.2, 0.7]).unwrap();
/// let runtime = tokio::runtime::Builder::new_multi_thread().build().unwrap();
/// let lineup = runtime
///     .block_on(optimize_in_background(
///         table,
///         TimeSlot::hours(20, 2),
///         GaConfig::default().with_seed(9),
///     ))
///     .unwrap();
/// assert_eq!(lineup.placements.len(), 2);
/// ```
///
/// # Errors
/// Returns [`OffloadError::Task`] when the blocking task fails to complete
/// and [`OffloadError::Ga`] when the optimization itself errors.
pub async fn optimize_in_background(
    table: RatingTable,
    slots: Vec<TimeSlot>,
    config: GaConfig,
) -> Result<Lineup, OffloadError> {
    let lineup = tokio::task::spawn_blocking(move || optimize(&table, &slots, &config)).await??;
    Ok(lineup)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_run_matches_direct_run() {
        let mut table = RatingTable::new();
        table.insert("a", vec![0.9, 0.1]).unwrap();
        table.insert("b", vec![0.1, 0.9]).unwrap();
        let slots = TimeSlot::hours(20, 2);
        let config = GaConfig::default()
            .with_generations(10)
            .with_population_size(6)
            .with_seed(5);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .build()
            .unwrap();
        let background = runtime
            .block_on(optimize_in_background(
                table.clone(),
                slots.clone(),
                config.clone(),
            ))
            .unwrap();
        let direct = optimize(&table, &slots, &config).unwrap();
        assert_eq!(background, direct);
    }

    #[test]
    fn background_run_propagates_engine_errors() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .build()
            .unwrap();
        let err = runtime
            .block_on(optimize_in_background(
                RatingTable::new(),
                TimeSlot::hours(6, 3),
                GaConfig::default(),
            ))
            .unwrap_err();
        assert!(matches!(
            err,
            OffloadError::Ga(ScheduleGaError::EmptyProgramSet)
        ));
    }
}
