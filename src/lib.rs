#![warn(missing_docs)]

/*! Genetic algorithm toolkit for assembling ratings-optimal broadcast schedules.

A [`RatingTable`] maps each program to its expected rating in every time
slot of a broadcast window. The engine evolves a population of candidate
schedules with tournament selection, crossover, and mutation for a fixed
number of generations, then reports the best schedule of the final
population.

```
use lineup::{optimize, parse_ratings, GaConfig};

let csv = "\
program,18:00,19:00,20:00
news,0.8,0.3,0.2
film,0.2,0.9,0.5
quiz,0.3,0.2,0.7";
let (table, slots) = parse_ratings(csv).unwrap();
let config = GaConfig::default().with_seed(42);
let lineup = optimize(&table, &slots, &config).unwrap();
for placement in &lineup.placements {
    println!("{}  {}", placement.slot, placement.program);
}
assert_eq!(lineup.placements.len(), 3);
```

Schedules come in two shapes, chosen by [`ScheduleMode`]: permutations that
broadcast every program at most once, and free assignments that may repeat
programs across the window. The operators live in [`ops`] behind small
traits, so any of them can be swapped out through the [`ScheduleGa`]
builder. Long runs can be moved off an async executor with
[`optimize_in_background`]. Enabling the `serde` feature derives
`Serialize`/`Deserialize` for the value types.
!*/

pub mod config;
pub mod core;
pub mod offload;
pub mod ops;
pub mod schedule_ga;
pub mod table;

pub use crate::config::{ConfigError, GaConfig, MutationKind, ScheduleMode};
pub use crate::core::stats::RunStats;
pub use crate::core::{InitError, Placement, Population, ProgramId, Schedule, TimeSlot};
pub use crate::offload::{optimize_in_background, OffloadError};
pub use crate::schedule_ga::{
    optimize, Lineup, ScheduleGa, ScheduleGaBuilder, ScheduleGaError, ScheduleGaReport,
};
pub use crate::table::{parse_ratings, RatingError, RatingTable, ScoreResult, TableError};
