//! Score deltas, mission completion and the badge board.
use serde::Serialize;
use smallvec::SmallVec;

use crate::catalog::Catalog;
use crate::constants::{
    BADGE_COUNT, CLUE_POINTS, MISSION_COMPLETION_BONUS, PUZZLE_POINTS, QUIZ_POINTS,
};
use crate::numbers::percent;
use crate::state::{BadgeId, Badges, GameState, MissionProgress};

pub fn award_clue(progress: &mut MissionProgress) -> u32 {
    progress.score = progress.score.saturating_add(CLUE_POINTS);
    progress.score
}

pub fn award_quiz(progress: &mut MissionProgress) -> u32 {
    progress.score = progress.score.saturating_add(QUIZ_POINTS);
    progress.score
}

/// What a successful puzzle check changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub mission_score: u32,
    pub total_score: u32,
    pub newly_earned: SmallVec<[BadgeId; 3]>,
}

/// Close out the current attempt: puzzle points plus the completion bonus,
/// the mission-one badges, and the mission score banked into the total.
///
/// Returns `None` and changes nothing if the attempt is already complete, so
/// the total only ever grows by one mission score per attempt.
pub fn complete_mission(state: &mut GameState) -> Option<Completion> {
    if state.mission1.completed {
        return None;
    }
    let progress = &mut state.mission1;
    progress.score = progress
        .score
        .saturating_add(PUZZLE_POINTS)
        .saturating_add(MISSION_COMPLETION_BONUS);
    progress.completed = true;

    let newly_earned = BadgeId::MISSION_ONE
        .into_iter()
        .filter(|badge| state.badges.earn(*badge))
        .collect();

    state.total_score = state.total_score.saturating_add(state.mission1.score);
    log::info!(
        "mission one complete: score {} total {}",
        state.mission1.score,
        state.total_score
    );
    Some(Completion {
        mission_score: state.mission1.score,
        total_score: state.total_score,
        newly_earned,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeEntry {
    pub id: BadgeId,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub earned: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeBoardView {
    pub entries: Vec<BadgeEntry>,
    pub earned: usize,
    pub total: usize,
    pub progress_pct: f32,
}

impl BadgeBoardView {
    /// Build the board in catalog order. Pure: rebuilding never changes the count.
    #[must_use]
    pub fn build(catalog: &Catalog, badges: &Badges) -> Self {
        let entries: Vec<BadgeEntry> = catalog
            .badges()
            .iter()
            .map(|info| BadgeEntry {
                id: info.id,
                name: info.name.clone(),
                icon: info.icon.clone(),
                description: info.description.clone(),
                earned: badges.is_earned(info.id),
            })
            .collect();
        let earned = badges.earned_count();
        Self {
            entries,
            earned,
            total: BADGE_COUNT,
            progress_pct: percent(earned, BADGE_COUNT),
        }
    }
}
