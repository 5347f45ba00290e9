use thiserror::Error;

use onehealth_game::constants::{
    CLUE_COUNT, CLUE_POINTS, MISSION_COMPLETION_BONUS, PUZZLE_POINTS, QUIZ_POINTS,
};
use onehealth_game::{BadgeId, GameState};

const COMPLETION_POINTS: u32 = PUZZLE_POINTS + MISSION_COMPLETION_BONUS;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("clue count {count} out of range")]
    ClueCount { count: usize },
    #[error("clue {0} recorded twice")]
    DuplicateClue(String),
    #[error("location {0} recorded twice")]
    DuplicateVisit(String),
    #[error("badge {0} was revoked")]
    BadgeRevoked(BadgeId),
    #[error("total score fell from {before} to {after}")]
    TotalDecreased { before: u32, after: u32 },
    #[error("total score grew by {delta} but mission score is {mission}")]
    TotalMismatch { delta: u32, mission: u32 },
    #[error("total score grew without completing the mission")]
    TotalWithoutCompletion,
    #[error("mission completed without badge {0}")]
    CompletedWithoutBadge(BadgeId),
    #[error("mission score {score} does not add up for {clues} clue(s)")]
    ScoreMismatch { score: u32, clues: usize },
}

/// Check the state after one event against the state before it.
pub fn check_transition(before: &GameState, after: &GameState) -> Result<(), InvariantViolation> {
    check_state(after)?;

    for (badge, earned) in before.badges.iter() {
        if earned && !after.badges.is_earned(badge) {
            return Err(InvariantViolation::BadgeRevoked(badge));
        }
    }

    if after.total_score < before.total_score {
        return Err(InvariantViolation::TotalDecreased {
            before: before.total_score,
            after: after.total_score,
        });
    }
    let delta = after.total_score - before.total_score;
    if delta > 0 {
        if before.mission1.completed || !after.mission1.completed {
            return Err(InvariantViolation::TotalWithoutCompletion);
        }
        if delta != after.mission1.score {
            return Err(InvariantViolation::TotalMismatch {
                delta,
                mission: after.mission1.score,
            });
        }
    }
    Ok(())
}

/// Invariants that hold for any single state.
pub fn check_state(state: &GameState) -> Result<(), InvariantViolation> {
    let mission = &state.mission1;
    let count = mission.clues_collected();
    if count > CLUE_COUNT {
        return Err(InvariantViolation::ClueCount { count });
    }
    for (index, clue) in mission.collected.iter().enumerate() {
        if mission.collected[..index].contains(clue) {
            return Err(InvariantViolation::DuplicateClue(clue.to_string()));
        }
    }
    for (index, location) in mission.visited_locations.iter().enumerate() {
        if mission.visited_locations[..index].contains(location) {
            return Err(InvariantViolation::DuplicateVisit(location.to_string()));
        }
    }

    if mission.completed {
        if let Some(badge) = BadgeId::MISSION_ONE
            .into_iter()
            .find(|badge| !state.badges.is_earned(*badge))
        {
            return Err(InvariantViolation::CompletedWithoutBadge(badge));
        }
    }

    let clue_points = CLUE_POINTS * u32::try_from(count).unwrap_or(u32::MAX);
    let completion = if mission.completed {
        COMPLETION_POINTS
    } else {
        0
    };
    let base = clue_points.saturating_add(completion);
    if mission.score != base && mission.score != base + QUIZ_POINTS {
        return Err(InvariantViolation::ScoreMismatch {
            score: mission.score,
            clues: count,
        });
    }
    Ok(())
}
