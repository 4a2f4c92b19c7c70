//! Random source values shaped by the difficulty mode.
//!
//! `Normal` draws a uniform real in `[min, max]`. `WholeNumbers` rounds that
//! draw to an integer and clamps it back into the rounded bounds. `Easy`
//! rounds first and then snaps to the nearest member of `{1, 5, 10, 15, ...}`,
//! re-clamping afterwards so snapping can never leave the calibrated range.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

const EASY_STEP: f64 = 5.0;
const EASY_ONE: f64 = 1.0;
/// Whole numbers at or below this collapse to 1 in easy mode
const EASY_ONE_CEILING: f64 = 2.0;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyMode {
    #[default]
    Normal,
    WholeNumbers,
    /// Implies whole numbers
    Easy,
}

impl DifficultyMode {
    pub fn from_flags(whole_numbers: bool, easy: bool) -> Self {
        match (whole_numbers, easy) {
            (_, true) => DifficultyMode::Easy,
            (true, false) => DifficultyMode::WholeNumbers,
            (false, false) => DifficultyMode::Normal,
        }
    }
}

/// Draw a source value in `[min, max]` for the given mode. Requires `min <= max`.
pub fn sample<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64, mode: DifficultyMode) -> f64 {
    debug_assert!(min <= max, "sample range inverted: [{min}, {max}]");

    let raw = if min < max {
        rng.gen_range(min..=max)
    } else {
        min
    };

    match mode {
        DifficultyMode::Normal => raw,
        DifficultyMode::WholeNumbers => round_whole(raw, min, max),
        DifficultyMode::Easy => clamp_easy(to_easy(round_whole(raw, min, max)), min, max),
    }
}

fn round_whole(raw: f64, min: f64, max: f64) -> f64 {
    raw.round().clamp(min.round(), max.round())
}

/// Snap a whole number onto `{1} ∪ {5, 10, 15, ...}`
pub fn to_easy(n: f64) -> f64 {
    if n <= EASY_ONE_CEILING {
        EASY_ONE
    } else {
        ((n / EASY_STEP).round() * EASY_STEP).max(EASY_STEP)
    }
}

pub fn is_easy_value(x: f64) -> bool {
    x == EASY_ONE || (x >= EASY_STEP && x % EASY_STEP == 0.0)
}

/// Bring an easy value back inside `[min, max]` by picking the nearest easy
/// value that is in range. `1` only competes when `min <= 1 <= max`.
pub fn clamp_easy(mapped: f64, min: f64, max: f64) -> f64 {
    if (min..=max).contains(&mapped) {
        return mapped;
    }

    let mut candidates = Vec::with_capacity(3);
    if (min..=max).contains(&EASY_ONE) {
        candidates.push(EASY_ONE);
    }
    let lowest_step = (min.max(EASY_STEP) / EASY_STEP).ceil() * EASY_STEP;
    let highest_step = (max / EASY_STEP).floor() * EASY_STEP;
    if lowest_step <= highest_step {
        candidates.push(lowest_step);
        candidates.push(highest_step);
    }

    candidates
        .into_iter()
        .min_by(|a, b| (a - mapped).abs().total_cmp(&(b - mapped).abs()))
        .unwrap_or_else(|| {
            warn!(min, max, mapped, "range holds no easy value, clamping");
            mapped.clamp(min, max)
        })
}
