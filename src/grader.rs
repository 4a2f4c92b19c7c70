use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::question::Question;

/// Slack for floating point noise when comparing against the tolerance edge
const EDGE_EPSILON: f64 = 1e-9;

const VERY_CLOSE_BELOW: f64 = 10.0;
const BALLPARK_BELOW: f64 = 50.0;
const INVERTED_BAND: (f64, f64) = (90.0, 110.0);

/// Diagnosis attached to a wrong answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Feedback {
    VeryClose,
    RightBallpark,
    PossiblyInverted,
    CheckConversionFactor,
}

impl Feedback {
    /// Classify a percent error; the inversion band wins over the others
    pub fn classify(percent_error: Option<f64>) -> Self {
        let Some(pct) = percent_error else {
            return Feedback::CheckConversionFactor;
        };

        if (INVERTED_BAND.0..=INVERTED_BAND.1).contains(&pct) {
            Feedback::PossiblyInverted
        } else if pct < VERY_CLOSE_BELOW {
            Feedback::VeryClose
        } else if pct <= BALLPARK_BELOW {
            Feedback::RightBallpark
        } else {
            Feedback::CheckConversionFactor
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Feedback::VeryClose => "Very close! Check your rounding.",
            Feedback::RightBallpark => "Right ballpark. Check the conversion factor.",
            Feedback::PossiblyInverted => {
                "Looks inverted. Did you multiply instead of divide (or vice versa)?"
            }
            Feedback::CheckConversionFactor => "Check the conversion factor.",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Grade {
    pub is_correct: bool,
    pub submitted: f64,
    /// `None` when the correct answer is exactly zero
    pub percent_error: Option<f64>,
    /// Only present for incorrect answers
    pub feedback: Option<Feedback>,
}

pub fn percent_error(submitted: f64, correct: f64) -> Option<f64> {
    if correct == 0.0 {
        None
    } else {
        Some((submitted - correct).abs() / correct.abs() * 100.0)
    }
}

pub fn grade(question: &Question, submitted: f64) -> Grade {
    let distance = (submitted - question.correct_answer).abs();
    let is_correct = distance <= question.tolerance + EDGE_EPSILON;
    let percent_error = percent_error(submitted, question.correct_answer);
    let feedback = (!is_correct).then(|| Feedback::classify(percent_error));

    debug!(
        submitted,
        correct = question.correct_answer,
        tolerance = question.tolerance,
        is_correct,
        ?percent_error,
        "graded answer"
    );

    Grade {
        is_correct,
        submitted,
        percent_error,
        feedback,
    }
}
