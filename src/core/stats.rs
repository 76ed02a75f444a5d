//! Time-series metrics captured during an optimization run.
//!
//! These types provide a consistent payload for downstream analysis of how a
//! run progressed. They are intentionally lightweight to keep serialization
//! overhead minimal.

/// Per-generation metrics recorded by the optimizer.
///
/// One entry is pushed per scored population: index `0` describes the random
/// initial population and index `g + 1` describes the population after
/// generation `g`.
///
/// # Examples
/// ```
/// use lineup::RunStats;
/// let stats = RunStats::new();
/// assert_eq!(stats.generations(), 0);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    /// Best summed rating observed in each scored population.
    pub best_fitness: Vec<f64>,
    /// Mean summed rating of each scored population.
    pub mean_fitness: Vec<f64>,
    /// Fraction of pairwise-distinct schedules per scored population.
    pub diversity: Vec<f64>,
}

impl RunStats {
    /// Creates an empty set of run statistics.
    #[must_use]
    pub fn new() -> Self {
        Self {
            best_fitness: Vec::new(),
            mean_fitness: Vec::new(),
            diversity: Vec::new(),
        }
    }

    /// Returns the number of scored populations tracked so far.
    #[must_use]
    pub fn generations(&self) -> usize {
        self.best_fitness.len()
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stats_are_empty() {
        let stats = RunStats::new();
        assert_eq!(stats.generations(), 0);
        assert!(stats.mean_fitness.is_empty());
        assert!(stats.diversity.is_empty());
    }

    #[test]
    fn generations_track_recorded_entries() {
        let mut stats = RunStats::new();
        stats.best_fitness.push(2.7);
        stats.mean_fitness.push(1.4);
        stats.diversity.push(0.9);
        assert_eq!(stats.generations(), 1);
    }
}
