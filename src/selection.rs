use std::{fmt, str::FromStr};

use rand::{seq::SliceRandom, Rng};
use tracing::debug;

use crate::{catalog::Category, error::SelectionError};

const ALL_TOKEN: &str = "all";

/// The set of categories drawn from during a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategorySelection {
    active: [bool; Category::COUNT],
}

impl CategorySelection {
    pub fn all() -> Self {
        Self {
            active: [true; Category::COUNT],
        }
    }

    /// Parse menu input such as `"b"`, `"ac"` or `"all"`.
    ///
    /// Letters `a`..`d` map to categories, repeats are harmless, and any other
    /// character rejects the whole input. Surrounding whitespace is ignored and
    /// matching is case-insensitive.
    pub fn parse(input: &str) -> Result<Self, SelectionError> {
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return Err(SelectionError::Empty);
        }
        if input == ALL_TOKEN {
            return Ok(Self::all());
        }

        let mut selection = Self::default();
        for c in input.chars() {
            let category =
                Category::from_shorthand(c).ok_or(SelectionError::UnknownCategory(c))?;
            selection.activate(category);
        }

        if selection.is_empty() {
            return Err(SelectionError::Empty);
        }

        debug!(selection = %selection, "parsed category selection");
        Ok(selection)
    }

    pub fn activate(&mut self, category: Category) {
        self.active[category.index()] = true;
    }

    pub fn is_active(&self, category: Category) -> bool {
        self.active[category.index()]
    }

    pub fn active(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL
            .into_iter()
            .filter(move |category| self.is_active(*category))
    }

    pub fn len(&self) -> usize {
        self.active.iter().filter(|a| **a).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Uniform draw over the active categories only; `None` when nothing is active
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Category> {
        let active: Vec<Category> = self.active().collect();
        active.choose(rng).copied()
    }
}

impl FromStr for CategorySelection {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Renders back into the menu grammar, so `parse(selection.to_string())` is lossless
impl fmt::Display for CategorySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len() == Category::COUNT {
            return write!(f, "{ALL_TOKEN}");
        }
        for category in self.active() {
            write!(f, "{}", category.shorthand())?;
        }
        Ok(())
    }
}
