//! Demo catalog generator
//!
//! Seeds the in-memory index with a small catalog spanning the content
//! categories the strategy table knows about, for local runs and demos.

use chrono::{Duration, Utc};
use rand::Rng;

use super::index::ContentIndex;
use super::models::ContentRecord;
use crate::emotion::VaPoint;
use crate::error::Result;

/// Titles and tags for the demo catalog
const SAMPLE_ITEMS: &[(&str, &str, &[&str], u32)] = &[
    ("v001", "Kitten fails compilation", &["comedy", "pets"], 180),
    ("v002", "Stand-up one-liners", &["comedy"], 120),
    ("v003", "Sunset over a quiet town", &["healing", "travel"], 300),
    ("v004", "Grandmother's hand knitting", &["healing", "lifestyle"], 240),
    ("v005", "Rain sounds in a forest", &["relaxing"], 600),
    ("v006", "Ocean waves for sleep", &["relaxing", "healing"], 1800),
    ("v007", "Classical piano favourites", &["music", "art"], 360),
    ("v008", "Street dance basics", &["music", "sports"], 480),
    ("v009", "Puppy learns to swim", &["pets"], 200),
    ("v010", "Hamster hoarding snacks", &["pets", "comedy"], 150),
    ("v011", "Weeknight home cooking", &["food", "lifestyle"], 300),
    ("v012", "Bento box assembly", &["food", "art"], 420),
    ("v013", "Mountain range flyover", &["travel"], 480),
    ("v014", "Cherry blossom season", &["travel", "art"], 360),
    ("v015", "Quantum physics in five minutes", &["educational", "technology"], 720),
    ("v016", "Training your focus", &["educational", "lifestyle"], 600),
    ("v017", "Morning headlines roundup", &["news"], 240),
    ("v018", "Speedrun world record", &["gaming"], 540),
    ("v019", "Autumn wardrobe ideas", &["fashion", "lifestyle"], 270),
    ("v020", "Hands-on with a folding phone", &["technology"], 420),
];

/// Rough affect each category evokes, used to place demo content in
/// valence/arousal space
fn category_fit(category: &str) -> VaPoint {
    match category {
        "comedy" => VaPoint::new(0.8, 0.6),
        "healing" => VaPoint::new(0.6, -0.5),
        "relaxing" => VaPoint::new(0.4, -0.7),
        "music" => VaPoint::new(0.6, 0.3),
        "pets" => VaPoint::new(0.8, 0.3),
        "food" => VaPoint::new(0.6, 0.0),
        "travel" => VaPoint::new(0.5, 0.1),
        "educational" => VaPoint::new(0.2, 0.2),
        "sports" => VaPoint::new(0.5, 0.7),
        "gaming" => VaPoint::new(0.5, 0.6),
        "news" => VaPoint::new(-0.2, 0.4),
        "fashion" => VaPoint::new(0.5, 0.2),
        "technology" => VaPoint::new(0.3, 0.3),
        "art" => VaPoint::new(0.5, -0.2),
        "lifestyle" => VaPoint::new(0.4, 0.0),
        _ => VaPoint::new(0.0, 0.0),
    }
}

/// Populate an index with the demo catalog
pub fn seed_demo_catalog(index: &ContentIndex) -> Result<usize> {
    let mut rng = rand::thread_rng();
    let now = Utc::now();

    for (id, title, categories, duration) in SAMPLE_ITEMS {
        let primary_fit = category_fit(categories[0]);
        let jitter_v: f64 = rng.gen_range(-0.1..0.1);
        let jitter_a: f64 = rng.gen_range(-0.1..0.1);

        let mut record = ContentRecord::new(
            *id,
            *title,
            categories.iter().map(|c| c.to_string()).collect(),
            *duration,
            rng.gen_range(0.4..0.95),
            rng.gen_range(0.5..0.95),
            VaPoint::new(primary_fit.valence + jitter_v, primary_fit.arousal + jitter_a),
            now - Duration::days(rng.gen_range(1..30)),
        )?;
        record.view_count = rng.gen_range(100..10_000);

        index.upsert(record)?;
    }

    Ok(SAMPLE_ITEMS.len())
}
