//! Scene generator. Every descriptor is picked at random from a small fixed set.
//!
//! The random source and the clock are both passed in, so a seeded `Rng` and a
//! fixed timestamp give a fully deterministic scene.

use chrono::{NaiveDateTime, Timelike};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::status::Status;
use crate::planit::models::{ArViewData, SceneRequest, StreetConditions, StreetScene};

const LIGHTING: [&str; 3] = ["Good", "Fair", "Poor"];
const PEDESTRIAN_DENSITY: [&str; 3] = ["Low", "Medium", "High"];
const SAFETY_RATINGS: [&str; 3] = ["A", "B", "C"];

const GREEN_SPACES: [&str; 3] = ["Park Area", "Tree Line", "Garden Strip"];
const INFRASTRUCTURE: [&str; 3] = ["Traffic Lights", "Pedestrian Crossing", "Bus Stop"];

fn pick<R: Rng + ?Sized>(options: &[&str], rng: &mut R) -> String {
    options.choose(rng).copied().unwrap_or_default().to_string()
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// ISO 8601 local timestamp. The fraction is six digits of microseconds, or
/// left out entirely when there are none.
fn iso_timestamp(now: NaiveDateTime) -> String {
    if now.nanosecond() / 1_000 == 0 {
        now.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Generates a street scene for `request` as of local time `now`.
pub fn generate_scene<R: Rng + ?Sized>(
    request: &SceneRequest,
    rng: &mut R,
    now: NaiveDateTime,
) -> StreetScene {
    let street_conditions = StreetConditions {
        lighting: pick(&LIGHTING, rng),
        pedestrian_count: pick(&PEDESTRIAN_DENSITY, rng),
        current_time: now.format("%I:%M %p").to_string(),
        rain_chance: format!("{}% chance", rng.gen_range(0..=30)),
        temperature: format!("{}°C", rng.gen_range(24..=32)),
    };

    let ar_view_data = ArViewData {
        buildings: vec![
            format!("{} Plaza", request.street),
            "Shopping Center".to_string(),
            "Office Tower".to_string(),
        ],
        green_spaces: to_owned(&GREEN_SPACES),
        infrastructure: to_owned(&INFRASTRUCTURE),
        safety_rating: pick(&SAFETY_RATINGS, rng),
    };

    StreetScene {
        location: format!("{}, {}", request.street, request.city),
        scenario_version: request.version.clone(),
        ar_mode: request.mode.clone(),
        generated_at: iso_timestamp(now),
        street_conditions,
        ar_view_data,
        collaboration_notes: request.notes.clone(),
        status: Status::Success,
    }
}
