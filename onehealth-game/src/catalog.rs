//! Static reference data for mission one: clues, farm locations, the badge
//! catalog and quiz content.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::constants::QUIZ_MIN_CORRECT;
use crate::error::GameError;
use crate::state::{BadgeId, ClueId, LocationId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub id: ClueId,
    pub icon: String,
    pub text: String,
    pub description: String,
}

/// A place on the farm map and the inspectable item it hides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    /// Control id of the clickable item inside the location scene.
    pub item: String,
    pub speaker: String,
    pub dialogue: String,
    pub clue: ClueId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeInfo {
    pub id: BadgeId,
    pub name: String,
    pub icon: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizToken {
    pub label: String,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizContent {
    #[serde(default)]
    pub prompt: String,
    pub tokens: Vec<QuizToken>,
    pub correct_feedback: String,
    pub incorrect_feedback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleContent {
    pub failure_notice: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub clues: Vec<Clue>,
    pub locations: Vec<Location>,
    pub badges: Vec<BadgeInfo>,
    pub quiz: QuizContent,
    pub puzzle: PuzzleContent,
}

impl Catalog {
    /// Parse and validate catalog JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the catalog does not cover
    /// every clue, location and badge exactly once.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check that every id is described exactly once and the quiz is winnable.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidCatalog`] describing the first problem found.
    pub fn validate(&self) -> Result<(), GameError> {
        ensure_exact(
            "clue",
            &ClueId::ALL,
            self.clues.iter().map(|clue| clue.id),
        )?;
        ensure_exact(
            "location",
            &LocationId::ALL,
            self.locations.iter().map(|location| location.id),
        )?;
        ensure_exact(
            "badge",
            &BadgeId::ALL,
            self.badges.iter().map(|badge| badge.id),
        )?;

        let items: BTreeSet<&str> = self.locations.iter().map(|l| l.item.as_str()).collect();
        if items.len() != self.locations.len() {
            return Err(GameError::InvalidCatalog(
                "location items must be unique".to_string(),
            ));
        }

        let correct = self.quiz.tokens.iter().filter(|token| token.correct).count();
        if correct < QUIZ_MIN_CORRECT {
            return Err(GameError::InvalidCatalog(format!(
                "quiz needs at least {QUIZ_MIN_CORRECT} correct tokens, found {correct}"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn clue(&self, id: ClueId) -> Option<&Clue> {
        self.clues.iter().find(|clue| clue.id == id)
    }

    #[must_use]
    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.iter().find(|location| location.id == id)
    }

    /// Find the location whose inspectable item has the given control id.
    #[must_use]
    pub fn location_for_item(&self, item: &str) -> Option<&Location> {
        self.locations.iter().find(|location| location.item == item)
    }

    /// Badges in display order.
    #[must_use]
    pub fn badges(&self) -> &[BadgeInfo] {
        &self.badges
    }
}

fn ensure_exact<T>(
    kind: &str,
    expected: &[T],
    found: impl Iterator<Item = T>,
) -> Result<(), GameError>
where
    T: Ord + Copy + std::fmt::Debug,
{
    let mut seen = BTreeSet::new();
    for id in found {
        if !seen.insert(id) {
            return Err(GameError::InvalidCatalog(format!(
                "{kind} {id:?} listed twice"
            )));
        }
    }
    if let Some(missing) = expected.iter().find(|id| !seen.contains(*id)) {
        return Err(GameError::InvalidCatalog(format!(
            "{kind} {missing:?} missing"
        )));
    }
    Ok(())
}
