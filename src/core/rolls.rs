//! Bounded random rolls shared by generation and combat.

use rand::Rng;

/// Inclusive roll in `min..=max`. A range given backwards collapses to `min`.
pub fn roll(rng: &mut impl Rng, min: u32, max: u32) -> u32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Value of a `(base, step)` pair at the given difficulty: `base + step * difficulty`.
pub fn scaled(pair: (u32, u32), difficulty: u32) -> u32 {
    let (base, step) = pair;
    base.saturating_add(step.saturating_mul(difficulty))
}

/// Inclusive roll between two difficulty-scaled bounds.
pub fn scaled_roll(
    rng: &mut impl Rng,
    low: (u32, u32),
    high: (u32, u32),
    difficulty: u32,
) -> u32 {
    roll(rng, scaled(low, difficulty), scaled(high, difficulty))
}

/// Returns true with the given probability.
pub fn chance(rng: &mut impl Rng, probability: f64) -> bool {
    rng.gen::<f64>() < probability
}
