//! Optimizes a full broadcast evening from inline ratings data.
//!
//! Run with `RUST_LOG=debug` to watch per-generation progress.

use lineup::{optimize, parse_ratings, GaConfig};

const RATINGS_CSV: &str = "\
program,15:00,16:00,17:00,18:00,19:00,20:00,21:00,22:00
cartoons,0.55,0.40,0.25,0.10,0.05,0.05,0.05,0.05
cooking,0.35,0.45,0.30,0.20,0.10,0.05,0.05,0.05
talk-show,0.15,0.30,0.50,0.35,0.20,0.10,0.10,0.10
local-news,0.10,0.15,0.35,0.70,0.40,0.15,0.10,0.05
quiz,0.10,0.15,0.25,0.45,0.60,0.35,0.20,0.10
film,0.05,0.10,0.15,0.30,0.55,0.90,0.70,0.40
documentary,0.05,0.05,0.10,0.20,0.35,0.50,0.55,0.30
late-night,0.05,0.05,0.05,0.10,0.15,0.30,0.50,0.65
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let (table, slots) = parse_ratings(RATINGS_CSV)?;
    let config = GaConfig::default()
        .with_generations(200)
        .with_population_size(60)
        .with_seed(2024);
    let lineup = optimize(&table, &slots, &config)?;

    println!("slot   program      rating");
    for placement in &lineup.placements {
        let rating = table.rating_at(&placement.program, placement.slot.index)?;
        println!("{}  {:<12} {:>5.2}", placement.slot, placement.program, rating);
    }
    println!("total expected rating: {:.2}", lineup.total_rating);
    Ok(())
}
