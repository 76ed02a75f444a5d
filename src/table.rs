//! Ratings data and schedule scoring.
//!
//! [`RatingTable`] maps each program to its per-slot audience ratings and is
//! the single source of truth for fitness: the score of a schedule is the sum
//! of the rating each assigned program earns in its slot. Rating lists may be
//! shorter than the broadcast window; lookups wrap around with modulo
//! indexing, so a one-entry list behaves like a flat rating profile.

use crate::core::{ProgramId, Schedule, TimeSlot};
use std::collections::HashMap;
use std::fmt;

/// Convenience alias for fallible scoring.
pub type ScoreResult<T> = Result<T, RatingError>;

/// Audience ratings per program, keyed by program identifier.
///
/// Insertion order is preserved and defines the program order used when
/// drawing random schedules.
///
/// # Examples
/// ```
/// use lineup::{RatingTable, Schedule};
///
/// let mut table = RatingTable::new();
/// table.insert("news", vec![0.5, 0.25]).unwrap();
/// table.insert("film", vec![0.25, 1.0]).unwrap();
/// let schedule = Schedule::new(vec!["news".into(), "film".into()]);
/// assert_eq!(table.score(&schedule).unwrap(), 1.5);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RatingTable {
    programs: Vec<ProgramId>,
    ratings: HashMap<ProgramId, Vec<f64>>,
}

impl RatingTable {
    /// Creates an empty table.
    ///
    /// # Examples
    /// ```
    /// use lineup::RatingTable;
    /// let table = RatingTable::new();
    /// assert!(table.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a program and its slot ratings.
    ///
    /// # Examples
    /// ```
    /// use lineup::RatingTable;
    /// let mut table = RatingTable::new();
    /// table.insert("news", vec![0.5]).unwrap();
    /// assert!(table.insert("news", vec![0.25]).is_err());
    /// ```
    ///
    /// # Errors
    /// Returns [`TableError::DuplicateProgram`] when the program is already
    /// present and [`TableError::NonFiniteRating`] when any rating is NaN or
    /// infinite.
    pub fn insert(
        &mut self,
        program: impl Into<ProgramId>,
        ratings: Vec<f64>,
    ) -> Result<(), TableError> {
        let program = program.into();
        if self.ratings.contains_key(&program) {
            return Err(TableError::DuplicateProgram { program });
        }
        if ratings.iter().any(|rating| !rating.is_finite()) {
            return Err(TableError::NonFiniteRating { program });
        }
        self.programs.push(program.clone());
        self.ratings.insert(program, ratings);
        Ok(())
    }

    /// Returns the programs in insertion order.
    #[must_use]
    pub fn programs(&self) -> &[ProgramId] {
        &self.programs
    }

    /// Returns the rating list of a program, if present.
    #[must_use]
    pub fn ratings(&self, program: &str) -> Option<&[f64]> {
        self.ratings.get(program).map(Vec::as_slice)
    }

    /// Returns the number of programs in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Indicates whether the table holds no programs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Returns the rating a program earns in the given slot.
    ///
    /// Slot indices beyond the rating list wrap around, so slot `i` reads
    /// entry `i % len`.
    ///
    /// # Examples
    /// ```
    /// use lineup::RatingTable;
    /// let mut table = RatingTable::new();
    /// table.insert("news", vec![0.5, 0.25]).unwrap();
    /// assert_eq!(table.rating_at("news", 5).unwrap(), 0.25);
    /// ```
    ///
    /// # Errors
    /// Returns [`RatingError::MissingProgram`] for unknown programs and
    /// [`RatingError::EmptyRatings`] when the program has a zero-length
    /// rating list, which no slot index can resolve against.
    pub fn rating_at(&self, program: &str, slot: usize) -> ScoreResult<f64> {
        let ratings = self
            .ratings
            .get(program)
            .ok_or_else(|| RatingError::MissingProgram {
                program: program.to_string(),
            })?;
        if ratings.is_empty() {
            return Err(RatingError::EmptyRatings {
                program: program.to_string(),
            });
        }
        Ok(ratings[slot % ratings.len()])
    }

    /// Scores a schedule: the sum over slots of each assigned program's
    /// rating in that slot.
    ///
    /// Scoring is pure; calling it twice on the same schedule returns the
    /// same value.
    ///
    /// # Examples
    /// ```
    /// use lineup::{RatingTable, Schedule};
    /// let mut table = RatingTable::new();
    /// table.insert("news", vec![0.5, 0.25]).unwrap();
    /// let schedule = Schedule::new(vec!["news".into(), "news".into()]);
    /// assert_eq!(table.score(&schedule).unwrap(), 0.75);
    /// ```
    ///
    /// # Errors
    /// Propagates the first [`RatingError`] produced by any slot lookup.
    pub fn score(&self, schedule: &Schedule) -> ScoreResult<f64> {
        let mut total = 0.0;
        for (slot, program) in schedule.iter().enumerate() {
            total += self.rating_at(program, slot)?;
        }
        Ok(total)
    }
}

/// Parses comma-separated ratings into a table plus labeled slots.
///
/// The first non-blank line is the header: its first cell names the program
/// column and is ignored, and every following cell becomes a slot label. Each
/// remaining line holds a program name followed by its ratings. A row may
/// carry fewer ratings than the header has slots; scoring wraps around.
///
/// # Examples
/// ```
/// use lineup::parse_ratings;
///
/// let input = "\
/// Program,06:00,07:00
/// news,0.5,0.25
/// film,0.25,1.0
/// ";
/// let (table, slots) = parse_ratings(input).unwrap();
/// assert_eq!(table.len(), 2);
/// assert_eq!(slots[1].label.as_deref(), Some("07:00"));
/// ```
///
/// # Errors
/// Returns a [`TableError`] describing the first malformed line: a missing
/// header, a header without slot columns, a blank program name, a rating
/// cell that does not parse as a number, a duplicated program, or a table
/// without any program rows.
pub fn parse_ratings(input: &str) -> Result<(RatingTable, Vec<TimeSlot>), TableError> {
    let mut lines = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());
    let (_, header) = lines.next().ok_or(TableError::EmptyInput)?;
    let slots: Vec<TimeSlot> = header
        .split(',')
        .skip(1)
        .enumerate()
        .map(|(index, label)| TimeSlot::new(index).with_label(label.trim()))
        .collect();
    if slots.is_empty() {
        return Err(TableError::NoSlots);
    }

    let mut table = RatingTable::new();
    for (line_index, line) in lines {
        let mut cells = line.split(',');
        let program = cells.next().unwrap_or("").trim();
        if program.is_empty() {
            return Err(TableError::BlankProgramName {
                line: line_index + 1,
            });
        }
        let mut ratings = Vec::new();
        for cell in cells {
            let cell = cell.trim();
            let value: f64 = cell.parse().map_err(|_| TableError::InvalidRating {
                program: program.to_string(),
                cell: cell.to_string(),
            })?;
            ratings.push(value);
        }
        if ratings.is_empty() {
            return Err(TableError::MissingRatings {
                program: program.to_string(),
            });
        }
        table.insert(program, ratings)?;
    }
    if table.is_empty() {
        return Err(TableError::NoPrograms);
    }
    Ok((table, slots))
}

/// Error returned when a schedule cannot be scored against a table.
///
/// # Examples
/// ```
/// use lineup::{RatingTable, Schedule};
/// let table = RatingTable::new();
/// let schedule = Schedule::new(vec!["ghost".into()]);
/// let err = table.score(&schedule).unwrap_err();
/// assert!(err.to_string().contains("ghost"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// The schedule references a program the table does not know.
    MissingProgram {
        /// The unknown program identifier.
        program: String,
    },
    /// The program's rating list is empty, so no slot can wrap into it.
    EmptyRatings {
        /// The program with the empty rating list.
        program: String,
    },
}

impl fmt::Display for RatingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingProgram { program } => {
                write!(f, "program {program:?} is not in the rating table")
            }
            Self::EmptyRatings { program } => {
                write!(f, "program {program:?} has an empty rating list")
            }
        }
    }
}

impl std::error::Error for RatingError {}

/// Error returned when ratings data cannot be loaded into a table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    /// The input held no lines at all.
    EmptyInput,
    /// The header row declared no slot columns.
    NoSlots,
    /// The input held a header but no program rows.
    NoPrograms,
    /// A program row started with an empty name.
    BlankProgramName {
        /// One-based line number of the offending row.
        line: usize,
    },
    /// A rating cell did not parse as a number.
    InvalidRating {
        /// The program whose row is malformed.
        program: String,
        /// The cell content that failed to parse.
        cell: String,
    },
    /// A rating value was NaN or infinite.
    NonFiniteRating {
        /// The program whose ratings are malformed.
        program: String,
    },
    /// A program row had no rating cells.
    MissingRatings {
        /// The program without ratings.
        program: String,
    },
    /// The same program appeared twice.
    DuplicateProgram {
        /// The repeated program identifier.
        program: String,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "ratings input is empty"),
            Self::NoSlots => write!(f, "header row declares no slot columns"),
            Self::NoPrograms => write!(f, "ratings input holds no program rows"),
            Self::BlankProgramName { line } => {
                write!(f, "line {line} starts with an empty program name")
            }
            Self::InvalidRating { program, cell } => {
                write!(f, "program {program:?} has unparseable rating cell {cell:?}")
            }
            Self::NonFiniteRating { program } => {
                write!(f, "program {program:?} has a non-finite rating")
            }
            Self::MissingRatings { program } => {
                write!(f, "program {program:?} has no rating cells")
            }
            Self::DuplicateProgram { program } => {
                write!(f, "program {program:?} appears more than once")
            }
        }
    }
}

impl std::error::Error for TableError {}
