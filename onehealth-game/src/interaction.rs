//! Drag-and-drop boards for the quiz and the timeline puzzle.
//!
//! Pointer drags name their target; touch taps only name the token and the
//! board picks the target. Both go through [`DropBoard::place_input`], which
//! funnels into the one [`DropBoard::place`] operation per board.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::catalog::QuizToken;
use crate::constants::{QUIZ_MAX_PLACED, QUIZ_MIN_CORRECT, TIMELINE_SLOT_COUNT};
use crate::state::ClueId;

/// Canonical cause → spread → impact order of the outbreak.
pub const CANONICAL_ORDER: [ClueId; TIMELINE_SLOT_COUNT] =
    [ClueId::Chickens, ClueId::Ventilation, ClueId::Medicine];

pub type TimelineOrder = SmallVec<[ClueId; TIMELINE_SLOT_COUNT]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementInput<T, S> {
    Drag { token: T, target: S },
    Tap { token: T },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementError {
    #[error("token is not on this board")]
    UnknownToken,
    #[error("no free target for a tap")]
    NoFreeTarget,
    #[error("board is showing a graded result")]
    Locked,
}

pub trait DropBoard {
    type Token: Copy;
    type Target: Copy;

    /// Target chosen for a tap, which carries no position.
    fn tap_target(&self, token: Self::Token) -> Option<Self::Target>;

    /// Put `token` on `target`.
    ///
    /// # Errors
    ///
    /// Returns a [`PlacementError`] and leaves the board untouched when the
    /// placement is not allowed.
    fn place(&mut self, token: Self::Token, target: Self::Target) -> Result<(), PlacementError>;

    /// Normalize a drag or a tap into a single [`DropBoard::place`] call.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::NoFreeTarget`] for a tap the board cannot
    /// resolve, or whatever [`DropBoard::place`] rejects.
    fn place_input(
        &mut self,
        input: PlacementInput<Self::Token, Self::Target>,
    ) -> Result<Self::Target, PlacementError> {
        let (token, target) = match input {
            PlacementInput::Drag { token, target } => (token, target),
            PlacementInput::Tap { token } => (
                token,
                self.tap_target(token)
                    .ok_or(PlacementError::NoFreeTarget)?,
            ),
        };
        self.place(token, target)?;
        Ok(target)
    }
}

// ---------------------------------------------------------------------------
// Quiz

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizVerdict {
    Correct,
    Incorrect,
}

/// Index of a token in the quiz pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuizTokenId(pub usize);

/// The single collection area of the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizArea;

/// Grade a submission: at least two correct tokens and no more than four
/// placed in total.
#[must_use]
pub const fn grade_quiz(correct_placed: usize, total_placed: usize) -> QuizVerdict {
    if correct_placed >= QUIZ_MIN_CORRECT && total_placed <= QUIZ_MAX_PLACED {
        QuizVerdict::Correct
    } else {
        QuizVerdict::Incorrect
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizBoard {
    pool: Vec<QuizToken>,
    /// Pool tokens stay draggable, so the same token may appear repeatedly.
    placed: SmallVec<[QuizTokenId; 8]>,
    graded: Option<QuizVerdict>,
}

impl QuizBoard {
    #[must_use]
    pub fn new(pool: Vec<QuizToken>) -> Self {
        Self {
            pool,
            placed: SmallVec::new(),
            graded: None,
        }
    }

    #[must_use]
    pub fn token(&self, id: QuizTokenId) -> Option<&QuizToken> {
        self.pool.get(id.0)
    }

    #[must_use]
    pub fn placed(&self) -> &[QuizTokenId] {
        &self.placed
    }

    #[must_use]
    pub fn correct_placed(&self) -> usize {
        self.placed
            .iter()
            .filter(|id| self.token(**id).is_some_and(|token| token.correct))
            .count()
    }

    #[must_use]
    pub const fn graded(&self) -> Option<QuizVerdict> {
        self.graded
    }

    /// Submit is offered once something is placed and no result is on screen.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.placed.is_empty() && self.graded.is_none()
    }

    /// Grade the area. `None` when submitting is not currently allowed.
    pub fn submit(&mut self) -> Option<QuizVerdict> {
        if !self.can_submit() {
            return None;
        }
        let verdict = grade_quiz(self.correct_placed(), self.placed.len());
        self.graded = Some(verdict);
        Some(verdict)
    }

    pub fn clear(&mut self) {
        self.placed.clear();
        self.graded = None;
    }
}

impl DropBoard for QuizBoard {
    type Token = QuizTokenId;
    type Target = QuizArea;

    fn tap_target(&self, _token: QuizTokenId) -> Option<QuizArea> {
        Some(QuizArea)
    }

    fn place(&mut self, token: QuizTokenId, _target: QuizArea) -> Result<(), PlacementError> {
        if self.graded.is_some() {
            return Err(PlacementError::Locked);
        }
        if self.token(token).is_none() {
            return Err(PlacementError::UnknownToken);
        }
        self.placed.push(token);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Timeline

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineSlot {
    Start,
    Spread,
    Impact,
}

impl TimelineSlot {
    pub const ALL: [Self; TIMELINE_SLOT_COUNT] = [Self::Start, Self::Spread, Self::Impact];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Start => 0,
            Self::Spread => 1,
            Self::Impact => 2,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Spread => "spread",
            Self::Impact => "impact",
        }
    }
}

impl fmt::Display for TimelineSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimelineSlot {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "spread" => Ok(Self::Spread),
            "impact" => Ok(Self::Impact),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleVerdict {
    Solved,
    Wrong,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimelineBoard {
    slots: [Option<ClueId>; TIMELINE_SLOT_COUNT],
}

impl TimelineBoard {
    #[must_use]
    pub const fn slot(&self, slot: TimelineSlot) -> Option<ClueId> {
        self.slots[slot.index()]
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Check is offered only once every slot holds a clue.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.filled_count() == TIMELINE_SLOT_COUNT
    }

    /// Clues in slot order, skipping empty slots.
    #[must_use]
    pub fn order(&self) -> TimelineOrder {
        self.slots.iter().flatten().copied().collect()
    }

    /// Exact positional comparison against [`CANONICAL_ORDER`]. `None` while
    /// a slot is still empty.
    #[must_use]
    pub fn evaluate(&self) -> Option<PuzzleVerdict> {
        if !self.is_complete() {
            return None;
        }
        if self.order().as_slice() == CANONICAL_ORDER.as_slice() {
            Some(PuzzleVerdict::Solved)
        } else {
            Some(PuzzleVerdict::Wrong)
        }
    }

    pub fn clear(&mut self) {
        self.slots = [None; TIMELINE_SLOT_COUNT];
    }
}

impl DropBoard for TimelineBoard {
    type Token = ClueId;
    type Target = TimelineSlot;

    fn tap_target(&self, _token: ClueId) -> Option<TimelineSlot> {
        TimelineSlot::ALL
            .into_iter()
            .find(|slot| self.slot(*slot).is_none())
    }

    /// Dropping onto a filled slot replaces what was there.
    fn place(&mut self, token: ClueId, target: TimelineSlot) -> Result<(), PlacementError> {
        self.slots[target.index()] = Some(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> Vec<QuizToken> {
        let token = |label: &str, correct| QuizToken {
            label: label.to_string(),
            correct,
        };
        vec![
            token("touch", true),
            token("droppings", true),
            token("dust", true),
            token("eggs", false),
            token("water", false),
            token("soap", false),
        ]
    }

    fn place_all(board: &mut QuizBoard, ids: &[usize]) {
        for id in ids {
            board
                .place_input(PlacementInput::Tap {
                    token: QuizTokenId(*id),
                })
                .unwrap();
        }
    }

    #[test]
    fn grading_rule_is_floor_and_cap() {
        assert_eq!(grade_quiz(2, 2), QuizVerdict::Correct);
        assert_eq!(grade_quiz(2, 4), QuizVerdict::Correct);
        assert_eq!(grade_quiz(3, 4), QuizVerdict::Correct);
        assert_eq!(grade_quiz(2, 5), QuizVerdict::Incorrect);
        assert_eq!(grade_quiz(1, 1), QuizVerdict::Incorrect);
        assert_eq!(grade_quiz(0, 0), QuizVerdict::Incorrect);
    }

    #[test]
    fn quiz_board_grades_placed_tokens() {
        let mut board = QuizBoard::new(pool());
        assert!(!board.can_submit());
        assert_eq!(board.submit(), None);

        place_all(&mut board, &[0, 1]);
        assert_eq!(board.submit(), Some(QuizVerdict::Correct));

        let mut board = QuizBoard::new(pool());
        place_all(&mut board, &[0, 1, 3, 4, 5]);
        assert_eq!(board.correct_placed(), 2);
        assert_eq!(board.submit(), Some(QuizVerdict::Incorrect));

        let mut board = QuizBoard::new(pool());
        place_all(&mut board, &[2]);
        assert_eq!(board.submit(), Some(QuizVerdict::Incorrect));
    }

    #[test]
    fn drag_and_tap_land_in_same_area() {
        let mut board = QuizBoard::new(pool());
        board
            .place_input(PlacementInput::Drag {
                token: QuizTokenId(0),
                target: QuizArea,
            })
            .unwrap();
        board
            .place_input(PlacementInput::Tap {
                token: QuizTokenId(0),
            })
            .unwrap();
        assert_eq!(board.placed(), &[QuizTokenId(0), QuizTokenId(0)]);
    }

    #[test]
    fn graded_quiz_locks_until_cleared() {
        let mut board = QuizBoard::new(pool());
        place_all(&mut board, &[0, 1]);
        board.submit();
        assert!(!board.can_submit());
        assert_eq!(board.submit(), None);
        assert_eq!(
            board.place(QuizTokenId(2), QuizArea),
            Err(PlacementError::Locked)
        );
        board.clear();
        assert!(board.placed().is_empty());
        assert_eq!(board.graded(), None);
    }

    #[test]
    fn unknown_quiz_token_rejected() {
        let mut board = QuizBoard::new(pool());
        assert_eq!(
            board.place(QuizTokenId(42), QuizArea),
            Err(PlacementError::UnknownToken)
        );
        assert!(board.placed().is_empty());
    }

    #[test]
    fn taps_fill_slots_in_order_then_stop() {
        let mut board = TimelineBoard::default();
        for clue in [ClueId::Medicine, ClueId::Chickens, ClueId::Ventilation] {
            board.place_input(PlacementInput::Tap { token: clue }).unwrap();
        }
        assert_eq!(board.slot(TimelineSlot::Start), Some(ClueId::Medicine));
        assert_eq!(board.slot(TimelineSlot::Impact), Some(ClueId::Ventilation));
        assert_eq!(
            board.place_input(PlacementInput::Tap {
                token: ClueId::Chickens
            }),
            Err(PlacementError::NoFreeTarget)
        );
    }

    #[test]
    fn drag_replaces_slot_content() {
        let mut board = TimelineBoard::default();
        board
            .place_input(PlacementInput::Drag {
                token: ClueId::Medicine,
                target: TimelineSlot::Spread,
            })
            .unwrap();
        board
            .place_input(PlacementInput::Drag {
                token: ClueId::Ventilation,
                target: TimelineSlot::Spread,
            })
            .unwrap();
        assert_eq!(board.filled_count(), 1);
        assert_eq!(board.slot(TimelineSlot::Spread), Some(ClueId::Ventilation));
        let target = board
            .place_input(PlacementInput::Tap {
                token: ClueId::Chickens,
            })
            .unwrap();
        assert_eq!(target, TimelineSlot::Start);
    }

    #[test]
    fn only_canonical_order_solves() {
        let mut board = TimelineBoard::default();
        assert_eq!(board.evaluate(), None);
        for (slot, clue) in TimelineSlot::ALL.into_iter().zip(CANONICAL_ORDER) {
            board.place(clue, slot).unwrap();
        }
        assert_eq!(board.evaluate(), Some(PuzzleVerdict::Solved));

        board.place(ClueId::Medicine, TimelineSlot::Start).unwrap();
        assert_eq!(board.evaluate(), Some(PuzzleVerdict::Wrong));

        board.clear();
        assert!(board.order().is_empty());
    }

    #[test]
    fn duplicate_clues_never_solve() {
        let mut board = TimelineBoard::default();
        for slot in TimelineSlot::ALL {
            board.place(ClueId::Chickens, slot).unwrap();
        }
        assert!(board.is_complete());
        assert_eq!(board.evaluate(), Some(PuzzleVerdict::Wrong));
    }
}
