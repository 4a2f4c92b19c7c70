use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    catalog::{self, Category, Unit},
    error::QuestionError,
    selection::CategorySelection,
    value_generator::{self, DifficultyMode},
};

/// Absolute tolerance never drops below this, so answers near zero stay gradeable
pub const MIN_TOLERANCE: f64 = 0.1;

/// One posed conversion; built by [`QuestionEngine::generate`] and never mutated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub category: Category,
    pub from: Unit,
    pub to: Unit,
    pub value: f64,
    pub correct_answer: f64,
    /// Absolute margin, already floored at [`MIN_TOLERANCE`]
    pub tolerance: f64,
    pub text: String,
}

impl Question {
    pub fn prompt_text(value: f64, from: Unit, to: Unit) -> String {
        format!(
            "Convert {value:.1} {} ({}) to {} ({})",
            from.name, from.abbreviation, to.name, to.abbreviation
        )
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round() / factor;
    // -0.0 would render as "-0.0" in prompts
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// `|target| * percent / 100`, floored at [`MIN_TOLERANCE`]
pub fn tolerance_for(target: f64, tolerance_percent: f64) -> f64 {
    (target.abs() * tolerance_percent / 100.0).max(MIN_TOLERANCE)
}

/// Builds questions from a category selection using a fixed difficulty mode
#[derive(Debug)]
pub struct QuestionEngine<R: Rng = StdRng> {
    mode: DifficultyMode,
    rng: R,
}

impl QuestionEngine<StdRng> {
    /// Seeded engines replay the same question sequence
    pub fn new(mode: DifficultyMode, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(mode, rng)
    }
}

impl<R: Rng> QuestionEngine<R> {
    pub fn with_rng(mode: DifficultyMode, rng: R) -> Self {
        Self { mode, rng }
    }

    pub fn mode(&self) -> DifficultyMode {
        self.mode
    }

    pub fn generate(&mut self, selection: &CategorySelection) -> Result<Question, QuestionError> {
        let category = selection
            .pick_random(&mut self.rng)
            .ok_or(QuestionError::NoCategories)?;

        let definition = catalog::lookup(category)
            .choose(&mut self.rng)
            .ok_or_else(|| {
                warn!(%category, "category has no conversion definitions");
                QuestionError::NoDefinitions(category)
            })?;

        let value = round_to(
            value_generator::sample(&mut self.rng, definition.min, definition.max, self.mode),
            1,
        );
        let correct_answer = round_to(definition.convert(value), 2);
        let tolerance = tolerance_for(correct_answer, definition.tolerance_percent);

        debug!(
            %category,
            from = definition.from.abbreviation,
            to = definition.to.abbreviation,
            value,
            correct_answer,
            tolerance,
            "generated question"
        );

        Ok(Question {
            category,
            from: definition.from,
            to: definition.to,
            value,
            correct_answer,
            tolerance,
            text: Question::prompt_text(value, definition.from, definition.to),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{KILOMETERS, MILES};
    use assert_matches::assert_matches;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(16.09344, 2), 16.09);
        assert_eq!(round_to(16.095, 1), 16.1);
        assert_eq!(round_to(-17.777, 2), -17.78);
        assert_eq!(round_to(3.0, 1), 3.0);
    }

    #[test]
    fn test_round_to_never_yields_negative_zero() {
        for raw in [-0.04, -0.0, -0.004] {
            let rounded = round_to(raw, 1);
            assert_eq!(rounded, 0.0);
            assert!(rounded.is_sign_positive(), "{raw} -> {rounded}");
        }
        let whole = round_to((-0.4f64).round(), 1);
        assert!(whole.is_sign_positive());
        assert_eq!(
            Question::prompt_text(whole, catalog::CELSIUS, catalog::KELVIN),
            "Convert 0.0 degrees Celsius (°C) to kelvin (K)"
        );
    }

    #[test]
    fn test_ten_miles_is_sixteen_point_oh_nine_km() {
        let value = round_to(10.0, 1);
        let answer = round_to(catalog::Conversion::MilesToKm.apply(value), 2);
        assert_eq!(answer, 16.09);
        assert!((tolerance_for(answer, 2.0) - 0.3218).abs() < 1e-9);
    }

    #[test]
    fn test_tolerance_floor() {
        assert_eq!(tolerance_for(0.0, 2.0), MIN_TOLERANCE);
        assert_eq!(tolerance_for(4.0, 2.0), MIN_TOLERANCE);
        assert_eq!(tolerance_for(-1.5, 1.0), MIN_TOLERANCE);
        assert_eq!(tolerance_for(100.0, 2.0), 2.0);
    }

    #[test]
    fn test_tolerance_uses_magnitude_for_negative_targets() {
        assert_eq!(tolerance_for(-40.0, 2.0), 0.8);
    }

    #[test]
    fn test_prompt_text() {
        assert_eq!(
            Question::prompt_text(10.0, MILES, KILOMETERS),
            "Convert 10.0 miles (mi) to kilometers (km)"
        );
    }

    #[test]
    fn test_generate_with_empty_selection() {
        let mut engine = QuestionEngine::new(DifficultyMode::Normal, Some(1));
        assert_matches!(
            engine.generate(&CategorySelection::default()),
            Err(QuestionError::NoCategories)
        );
    }

    #[test]
    fn test_generate_is_deterministic_for_a_seed() {
        let selection = CategorySelection::all();
        let mut a = QuestionEngine::new(DifficultyMode::Normal, Some(42));
        let mut b = QuestionEngine::new(DifficultyMode::Normal, Some(42));
        for _ in 0..20 {
            assert_eq!(a.generate(&selection).unwrap(), b.generate(&selection).unwrap());
        }
    }

    #[test]
    fn test_generated_question_is_consistent() {
        let selection = CategorySelection::all();
        let mut engine = QuestionEngine::new(DifficultyMode::Normal, Some(7));
        for _ in 0..200 {
            let q = engine.generate(&selection).unwrap();
            assert_eq!(q.value, round_to(q.value, 1));
            assert_eq!(q.correct_answer, round_to(q.correct_answer, 2));
            assert!(q.tolerance >= MIN_TOLERANCE);
            assert!(q.text.contains(q.from.name));
            assert!(q.text.contains(q.to.name));
            assert!(catalog::lookup(q.category)
                .iter()
                .any(|d| d.from == q.from && d.to == q.to));
        }
    }

    #[test]
    fn test_generate_easy_mode_values() {
        let selection = CategorySelection::all();
        let mut engine = QuestionEngine::new(DifficultyMode::Easy, Some(99));
        assert_eq!(engine.mode(), DifficultyMode::Easy);
        for _ in 0..200 {
            let q = engine.generate(&selection).unwrap();
            assert!(value_generator::is_easy_value(q.value), "{}", q.value);
        }
    }
}
