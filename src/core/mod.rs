//! Core scheduling primitives.
//!
//! This module provides the building blocks that the optimizer operates on:
//! program identifiers, broadcast slots, candidate schedules, and the
//! population container. The types are intentionally lightweight and focused
//! on correctness so they can be re-used in tests or in bespoke
//! experimentation.

pub mod stats;

use crate::config::ScheduleMode;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::fmt;

/// Identifier of a program as it appears in the rating table.
///
/// # Examples
/// ```
/// use lineup::ProgramId;
/// let program: ProgramId = "news".to_string();
/// assert_eq!(program, "news");
/// ```
pub type ProgramId = String;

/// A single broadcast slot, optionally carrying a human-readable label.
///
/// # Examples
/// ```
/// use lineup::TimeSlot;
/// let slot = TimeSlot::new(0).with_label("06:00");
/// assert_eq!(slot.label.as_deref(), Some("06:00"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSlot {
    /// Zero-based position of the slot within the broadcast window.
    pub index: usize,
    /// Optional display label, such as `"06:00"`.
    pub label: Option<String>,
}

impl TimeSlot {
    /// Creates an unlabeled slot at the given position.
    ///
    /// # Examples
    /// ```
    /// use lineup::TimeSlot;
    /// let slot = TimeSlot::new(3);
    /// assert_eq!(slot.index, 3);
    /// assert!(slot.label.is_none());
    /// ```
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self { index, label: None }
    }

    /// Attaches a display label to the slot.
    ///
    /// # Examples
    /// ```
    /// use lineup::TimeSlot;
    /// let slot = TimeSlot::new(0).with_label("20:00");
    /// assert_eq!(slot.label.as_deref(), Some("20:00"));
    /// ```
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Builds a run of consecutive hourly slots labeled `"HH:00"`, wrapping
    /// past midnight.
    ///
    /// # Examples
    /// ```
    /// use lineup::TimeSlot;
    /// let slots = TimeSlot::hours(6, 18);
    /// assert_eq!(slots.len(), 18);
    /// assert_eq!(slots[0].label.as_deref(), Some("06:00"));
    /// assert_eq!(slots[17].label.as_deref(), Some("23:00"));
    /// ```
    #[must_use]
    pub fn hours(start_hour: u32, count: usize) -> Vec<Self> {
        (0..count)
            .map(|index| {
                let hour = (start_hour as usize + index) % 24;
                Self::new(index).with_label(format!("{hour:02}:00"))
            })
            .collect()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{label}"),
            None => write!(f, "slot {}", self.index),
        }
    }
}

/// A program assigned to a specific slot in a finished lineup.
///
/// # Examples
/// ```
/// use lineup::{Placement, TimeSlot};
/// let placement = Placement {
///     slot: TimeSlot::new(0).with_label("06:00"),
///     program: "news".to_string(),
/// };
/// assert_eq!(placement.program, "news");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// The slot being filled.
    pub slot: TimeSlot,
    /// The program assigned to it.
    pub program: ProgramId,
}

/// Ordered assignment of one program per slot; the candidate solution the
/// optimizer evolves.
///
/// # Examples
/// ```
/// use lineup::Schedule;
/// let schedule = Schedule::new(vec!["news".into(), "film".into()]);
/// assert_eq!(schedule.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    programs: Vec<ProgramId>,
}

impl Schedule {
    /// Creates a schedule from slot-ordered program identifiers.
    ///
    /// # Examples
    /// ```
    /// use lineup::Schedule;
    /// let schedule = Schedule::new(vec!["news".into()]);
    /// assert_eq!(schedule.programs(), ["news".to_string()]);
    /// ```
    #[must_use]
    pub fn new(programs: Vec<ProgramId>) -> Self {
        Self { programs }
    }

    /// Returns the number of slots the schedule covers.
    ///
    /// # Examples
    /// ```
    /// use lineup::Schedule;
    /// let schedule = Schedule::new(vec!["news".into(), "film".into()]);
    /// assert_eq!(schedule.len(), 2);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Indicates whether the schedule covers zero slots.
    ///
    /// # Examples
    /// ```
    /// use lineup::Schedule;
    /// let schedule = Schedule::new(vec![]);
    /// assert!(schedule.is_empty());
    /// ```
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Returns a shared slice of the slot-ordered programs.
    ///
    /// # Examples
    /// ```
    /// use lineup::Schedule;
    /// let schedule = Schedule::new(vec!["news".into(), "film".into()]);
    /// assert_eq!(schedule.programs()[1], "film");
    /// ```
    #[must_use]
    pub fn programs(&self) -> &[ProgramId] {
        &self.programs
    }

    /// Returns an iterator over the programs in slot order.
    ///
    /// # Examples
    /// ```
    /// use lineup::Schedule;
    /// let schedule = Schedule::new(vec!["news".into(), "film".into()]);
    /// assert_eq!(schedule.iter().count(), 2);
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = &ProgramId> {
        self.programs.iter()
    }

    /// Consumes the schedule, returning the slot-ordered programs.
    ///
    /// # Examples
    /// ```
    /// use lineup::Schedule;
    /// let schedule = Schedule::new(vec!["news".into()]);
    /// assert_eq!(schedule.into_programs(), vec!["news".to_string()]);
    /// ```
    #[must_use]
    pub fn into_programs(self) -> Vec<ProgramId> {
        self.programs
    }
}

/// Collection of [`Schedule`] values evolved by the optimizer.
///
/// Fitness is never stored here; the engine recomputes it from the rating
/// table so that no stale value can survive a generation change.
///
/// # Examples
/// ```
/// use lineup::{Population, ScheduleMode};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let programs = vec!["news".to_string(), "film".to_string(), "sport".to_string()];
/// let mut rng = StdRng::seed_from_u64(7);
/// let population = Population::random(&programs, 3, 10, ScheduleMode::Permutation, &mut rng).unwrap();
/// assert_eq!(population.len(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Population {
    schedules: Vec<Schedule>,
}

impl Population {
    /// Creates a population of random schedules over the given programs.
    ///
    /// In [`ScheduleMode::Permutation`] each schedule is a shuffle of the
    /// program set truncated to the slot count, so no program repeats. When
    /// the slot count exceeds the number of programs, the schedules cover
    /// only the first `programs.len()` slots. In [`ScheduleMode::Repeats`]
    /// each slot is drawn independently, so the schedule always covers every
    /// slot.
    ///
    /// # Examples
    /// ```
    /// use lineup::{Population, ScheduleMode};
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    ///
    /// let programs = vec!["news".to_string(), "film".to_string()];
    /// let mut rng = StdRng::seed_from_u64(11);
    /// let population = Population::random(&programs, 4, 6, ScheduleMode::Repeats, &mut rng).unwrap();
    /// assert!(population.schedules().iter().all(|s| s.len() == 4));
    /// ```
    ///
    /// # Errors
    /// Returns [`InitError`] when `programs` is empty or `slot_count` is
    /// zero.
    pub fn random(
        programs: &[ProgramId],
        slot_count: usize,
        population_size: usize,
        mode: ScheduleMode,
        rng: &mut impl Rng,
    ) -> Result<Self, InitError> {
        if programs.is_empty() {
            return Err(InitError::EmptyProgramSet);
        }
        if slot_count == 0 {
            return Err(InitError::ZeroSlots);
        }
        let mut schedules = Vec::with_capacity(population_size);
        for _ in 0..population_size {
            schedules.push(random_schedule(programs, slot_count, mode, rng));
        }
        Ok(Self { schedules })
    }

    /// Creates an empty population.
    ///
    /// # Examples
    /// ```
    /// use lineup::Population;
    /// let population = Population::empty();
    /// assert!(population.is_empty());
    /// ```
    #[must_use]
    pub fn empty() -> Self {
        Self {
            schedules: Vec::new(),
        }
    }

    /// Creates an empty population with room for `capacity` schedules.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            schedules: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of schedules in the population.
    ///
    /// # Examples
    /// ```
    /// use lineup::Population;
    /// let population = Population::empty();
    /// assert_eq!(population.len(), 0);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    /// Indicates whether the population is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// Adds a schedule to the population.
    ///
    /// # Examples
    /// ```
    /// use lineup::{Population, Schedule};
    /// let mut population = Population::empty();
    /// population.push(Schedule::new(vec!["news".into()]));
    /// assert_eq!(population.len(), 1);
    /// ```
    pub fn push(&mut self, schedule: Schedule) {
        self.schedules.push(schedule);
    }

    /// Returns the underlying schedules.
    ///
    /// # Examples
    /// ```
    /// use lineup::{Population, Schedule};
    /// let mut population = Population::empty();
    /// population.push(Schedule::new(vec!["news".into()]));
    /// assert_eq!(population.schedules().len(), 1);
    /// ```
    #[must_use]
    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    /// Returns the fraction of schedules that are pairwise distinct, a cheap
    /// diversity measure in `[0, 1]`.
    ///
    /// # Examples
    /// ```
    /// use lineup::{Population, Schedule};
    /// let mut population = Population::empty();
    /// population.push(Schedule::new(vec!["news".into()]));
    /// population.push(Schedule::new(vec!["news".into()]));
    /// assert_eq!(population.distinct_fraction(), 0.5);
    /// ```
    #[must_use]
    pub fn distinct_fraction(&self) -> f64 {
        if self.schedules.is_empty() {
            return 0.0;
        }
        let distinct: HashSet<&[ProgramId]> =
            self.schedules.iter().map(Schedule::programs).collect();
        Self::len_as_f64(distinct.len()) / Self::len_as_f64(self.schedules.len())
    }

    fn len_as_f64(len: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        {
            len as f64
        }
    }
}

fn random_schedule(
    programs: &[ProgramId],
    slot_count: usize,
    mode: ScheduleMode,
    rng: &mut impl Rng,
) -> Schedule {
    match mode {
        ScheduleMode::Permutation => {
            let mut deck = programs.to_vec();
            deck.shuffle(rng);
            deck.truncate(slot_count.min(programs.len()));
            Schedule::new(deck)
        }
        ScheduleMode::Repeats => {
            let drawn = (0..slot_count)
                .map(|_| programs[rng.gen_range(0..programs.len())].clone())
                .collect();
            Schedule::new(drawn)
        }
    }
}

/// Error returned when a random population cannot be initialized.
///
/// # Examples
/// ```
/// use lineup::{Population, ScheduleMode};
/// let err = Population::random(&[], 3, 10, ScheduleMode::Permutation, &mut rand::thread_rng())
///     .unwrap_err();
/// assert!(err.to_string().contains("program"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    /// No programs were supplied to draw schedules from.
    EmptyProgramSet,
    /// The requested schedules would cover zero slots.
    ZeroSlots,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::EmptyProgramSet => {
                write!(f, "cannot build schedules from an empty program set")
            }
            InitError::ZeroSlots => write!(f, "cannot build schedules covering zero slots"),
        }
    }
}

impl std::error::Error for InitError {}
