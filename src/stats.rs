use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use crate::catalog::Category;

/// Total/correct counters for one bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub total: u32,
    pub correct: u32,
}

impl Tally {
    fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// `None` until something has been recorded
    pub fn percent(&self) -> Option<f64> {
        (self.total > 0).then(|| self.correct as f64 / self.total as f64 * 100.0)
    }
}

/// Running counters for one practice session, overall and per category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    overall: Tally,
    per_category: [Tally; Category::COUNT],
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one graded answer; skipped questions are never recorded
    pub fn record(&mut self, category: Category, correct: bool) {
        self.overall.record(correct);
        self.per_category[category.index()].record(correct);
    }

    pub fn overall(&self) -> Tally {
        self.overall
    }

    pub fn category(&self, category: Category) -> Tally {
        self.per_category[category.index()]
    }

    pub fn summarize(&self) -> SessionReport {
        let categories = Category::ALL
            .into_iter()
            .map(|category| (category, self.category(category)))
            .filter(|(_, tally)| tally.total > 0)
            .map(|(category, tally)| CategoryScore {
                category,
                tally,
                percent: tally.percent().unwrap_or_default(),
            })
            .collect();

        SessionReport {
            overall: self.overall,
            overall_percent: self.overall.percent(),
            categories,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category: Category,
    pub tally: Tally,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub overall: Tally,
    /// `None` when no question was answered
    pub overall_percent: Option<f64>,
    /// Only categories with at least one recorded answer, in menu order
    pub categories: Vec<CategoryScore>,
}

impl SessionReport {
    pub fn has_data(&self) -> bool {
        self.overall_percent.is_some()
    }

    /// Category with the lowest score, if any category was practiced
    pub fn weakest(&self) -> Option<&CategoryScore> {
        self.categories
            .iter()
            .min_by(|a, b| a.percent.total_cmp(&b.percent))
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(overall) = self.overall_percent else {
            return write!(f, "No questions answered - no data.");
        };

        writeln!(
            f,
            "Overall: {}/{} ({:.1}%)",
            self.overall.correct, self.overall.total, overall
        )?;
        let lines = self
            .categories
            .iter()
            .map(|score| {
                format!(
                    "  {}: {}/{} ({:.1}%)",
                    score.category, score.tally.correct, score.tally.total, score.percent
                )
            })
            .join("\n");
        write!(f, "{lines}")
    }
}
