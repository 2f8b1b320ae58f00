use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Reproducible `[0, 1)` source for the engine's `&mut dyn FnMut() -> f64` parameters.
pub fn seeded_roll(seed: u64) -> impl FnMut() -> f64 {
    let mut rng = StdRng::seed_from_u64(seed);
    move || rng.gen::<f64>()
}

/// Same as [`seeded_roll`] but seeded from OS entropy.
pub fn entropy_roll() -> impl FnMut() -> f64 {
    let mut rng = StdRng::from_entropy();
    move || rng.gen::<f64>()
}
