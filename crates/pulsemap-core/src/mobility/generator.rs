use chrono::NaiveDateTime;
use pulsemap_records::{PickupRecord, TIMESTAMP_FORMAT};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Pickup locations (latitude, longitude) around central Delhi.
pub const SEED_LOCATIONS: [(f64, f64); 6] = [
    (28.6448, 77.216721),
    (28.6445, 77.2100),
    (28.6480, 77.2295),
    (28.6270, 77.2190),
    (28.6368, 77.2178),
    (28.6420, 77.2333),
];

/// Seeded generator, or one seeded from OS entropy when `seed` is `None`.
pub fn pickup_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// `count` pickups stamped with `now`, each at a uniformly chosen seed location.
pub fn generate_pickups<R: Rng>(count: usize, now: NaiveDateTime, rng: &mut R) -> Vec<PickupRecord> {
    let pickup_time = now.format(TIMESTAMP_FORMAT).to_string();
    (0..count)
        .map(|_| {
            let (latitude, longitude) = SEED_LOCATIONS[rng.gen_range(0..SEED_LOCATIONS.len())];
            PickupRecord {
                pickup_time: pickup_time.clone(),
                latitude,
                longitude,
            }
        })
        .collect()
}
