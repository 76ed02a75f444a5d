use lineup::{
    optimize, GaConfig, MutationKind, RatingTable, Schedule, ScheduleGa, ScheduleMode, TimeSlot,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn diagonal_table() -> RatingTable {
    let mut table = RatingTable::new();
    table.insert("a", vec![0.9, 0.1, 0.1]).expect("fresh table");
    table.insert("b", vec![0.1, 0.9, 0.1]).expect("fresh table");
    table.insert("c", vec![0.1, 0.1, 0.9]).expect("fresh table");
    table
}

#[test]
fn finds_the_diagonal_lineup() {
    let table = diagonal_table();
    let slots = TimeSlot::hours(18, 3);
    let config = GaConfig::default()
        .with_generations(60)
        .with_population_size(24)
        .with_seed(42);
    let lineup = optimize(&table, &slots, &config).expect("valid inputs");
    assert!((lineup.total_rating - 2.7).abs() < 1e-9);
    let programs: Vec<_> = lineup
        .placements
        .iter()
        .map(|p| p.program.as_str())
        .collect();
    assert_eq!(programs, ["a", "b", "c"]);
}

#[test]
fn same_seed_reproduces_the_same_lineup() {
    let table = diagonal_table();
    let slots = TimeSlot::hours(18, 3);
    let config = GaConfig::default()
        .with_generations(20)
        .with_population_size(12)
        .with_seed(7);
    let first = optimize(&table, &slots, &config).expect("valid inputs");
    let second = optimize(&table, &slots, &config).expect("valid inputs");
    assert_eq!(first, second);
}

#[test]
fn winner_matches_its_reported_fitness() {
    let table = diagonal_table();
    let slots = TimeSlot::hours(18, 3);
    let config = GaConfig::default()
        .with_generations(15)
        .with_population_size(10)
        .with_seed(3);
    let lineup = optimize(&table, &slots, &config).expect("valid inputs");
    let winner = Schedule::new(
        lineup
            .placements
            .iter()
            .map(|p| p.program.clone())
            .collect(),
    );
    let rescored = table.score(&winner).expect("known programs");
    assert_eq!(rescored, lineup.total_rating);
}

#[test]
fn run_statistics_stay_consistent() {
    let generations = 25;
    let ga = ScheduleGa::builder(diagonal_table(), TimeSlot::hours(18, 3))
        .config(
            GaConfig::default()
                .with_generations(generations)
                .with_population_size(16),
        )
        .build()
        .expect("valid configuration");
    let mut rng = StdRng::seed_from_u64(13);
    let report = ga.run(&mut rng).expect("run to succeed");
    let stats = &report.stats;
    assert_eq!(stats.generations(), generations + 1);
    assert_eq!(stats.mean_fitness.len(), generations + 1);
    assert_eq!(stats.diversity.len(), generations + 1);
    for index in 0..stats.generations() {
        assert!(stats.mean_fitness[index] <= stats.best_fitness[index] + 1e-9);
        assert!((0.0..=1.0).contains(&stats.diversity[index]));
    }
}

#[test]
fn elitism_makes_best_fitness_monotone() {
    let ga = ScheduleGa::builder(diagonal_table(), TimeSlot::hours(18, 3))
        .config(
            GaConfig::default()
                .with_generations(40)
                .with_population_size(10)
                .with_elitism_size(2),
        )
        .build()
        .expect("valid configuration");
    let mut rng = StdRng::seed_from_u64(29);
    let report = ga.run(&mut rng).expect("run to succeed");
    for window in report.stats.best_fitness.windows(2) {
        assert!(window[1] >= window[0]);
    }
    assert_eq!(
        report.best_fitness,
        *report
            .stats
            .best_fitness
            .last()
            .expect("at least one entry"),
    );
}

#[test]
fn elites_filling_the_population_freeze_it() {
    let ga = ScheduleGa::builder(diagonal_table(), TimeSlot::hours(18, 3))
        .config(
            GaConfig::default()
                .with_generations(30)
                .with_population_size(2)
                .with_elitism_size(2),
        )
        .build()
        .expect("valid configuration");
    let mut rng = StdRng::seed_from_u64(5);
    let report = ga.run(&mut rng).expect("run to succeed");
    let stats = &report.stats;
    for index in 1..stats.generations() {
        assert_eq!(stats.best_fitness[index], stats.best_fitness[0]);
        assert_eq!(stats.mean_fitness[index], stats.mean_fitness[0]);
    }
}

#[test]
fn permutation_mode_truncates_to_the_program_count() {
    let table = diagonal_table();
    let slots = TimeSlot::hours(6, 8);
    let config = GaConfig::default()
        .with_generations(10)
        .with_population_size(8)
        .with_seed(17);
    let lineup = optimize(&table, &slots, &config).expect("valid inputs");
    assert_eq!(lineup.placements.len(), 3);
    assert_eq!(lineup.placements[0].slot.label.as_deref(), Some("06:00"));
    assert_eq!(lineup.placements[2].slot.label.as_deref(), Some("08:00"));
    let mut programs: Vec<_> = lineup
        .placements
        .iter()
        .map(|p| p.program.clone())
        .collect();
    programs.sort();
    programs.dedup();
    assert_eq!(programs.len(), 3);
}

#[test]
fn repeats_mode_covers_windows_larger_than_the_program_set() {
    let mut table = RatingTable::new();
    table.insert("news", vec![0.9, 0.1]).expect("fresh table");
    table.insert("film", vec![0.1, 0.9]).expect("fresh table");
    let slots = TimeSlot::hours(19, 5);
    let config = GaConfig::default()
        .with_generations(80)
        .with_population_size(30)
        .with_mode(ScheduleMode::Repeats)
        .with_mutation_kind(MutationKind::Replacement)
        .with_seed(23);
    let lineup = optimize(&table, &slots, &config).expect("valid inputs");
    assert_eq!(lineup.placements.len(), 5);
    for placement in &lineup.placements {
        assert!(table.programs().contains(&placement.program));
    }
    // the alternating lineup scores 4.5; anything above 3.0 means the
    // search has left the random baseline far behind
    assert!(lineup.total_rating > 3.0);
}
