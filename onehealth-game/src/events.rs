//! Input events from the presentation layer and what dispatching them did.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::interaction::{
    PlacementError, PlacementInput, PuzzleVerdict, QuizArea, QuizTokenId, QuizVerdict,
    TimelineSlot,
};
use crate::navigation::{SceneId, ScreenId};
use crate::state::{ClueId, Language, LocationId};

pub type QuizPlacement = PlacementInput<QuizTokenId, QuizArea>;
pub type TimelinePlacement = PlacementInput<ClueId, TimelineSlot>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum InputEvent {
    StartGame,
    OpenSettings,
    CloseSettings,
    LanguageChanged(Language),
    SoundToggled(bool),
    Ready,
    TellMore,
    GotIt,
    StartMission,
    ViewBadges,
    BackToMissions,
    BackToScreen(ScreenId),
    BackToScene(SceneId),
    StartInvestigation,
    VisitLocation(LocationId),
    InspectLocation(LocationId),
    DialogueDismissed,
    CluePanelDismissed,
    InfoDismissed,
    QuizPlace(QuizPlacement),
    QuizSubmitted,
    OpenPuzzle,
    TimelinePlace(TimelinePlacement),
    PuzzleChecked,
    BackToMap,
}

impl InputEvent {
    /// Short name for logs and reports.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::StartGame => "start_game",
            Self::OpenSettings => "open_settings",
            Self::CloseSettings => "close_settings",
            Self::LanguageChanged(_) => "language_changed",
            Self::SoundToggled(_) => "sound_toggled",
            Self::Ready => "ready",
            Self::TellMore => "tell_more",
            Self::GotIt => "got_it",
            Self::StartMission => "start_mission",
            Self::ViewBadges => "view_badges",
            Self::BackToMissions => "back_to_missions",
            Self::BackToScreen(_) => "back_to_screen",
            Self::BackToScene(_) => "back_to_scene",
            Self::StartInvestigation => "start_investigation",
            Self::VisitLocation(_) => "visit_location",
            Self::InspectLocation(_) => "inspect_location",
            Self::DialogueDismissed => "dialogue_dismissed",
            Self::CluePanelDismissed => "clue_panel_dismissed",
            Self::InfoDismissed => "info_dismissed",
            Self::QuizPlace(_) => "quiz_place",
            Self::QuizSubmitted => "quiz_submitted",
            Self::OpenPuzzle => "open_puzzle",
            Self::TimelinePlace(_) => "timeline_place",
            Self::PuzzleChecked => "puzzle_checked",
            Self::BackToMap => "back_to_map",
        }
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why an input was dropped without touching state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The modal the event dismisses is not open.
    ModalNotOpen,
    /// The clue was already collected in this attempt.
    ClueAlreadyCollected,
    /// The control the event stands for is disabled.
    ControlDisabled,
    /// Hard gate: not every clue has been found yet.
    PuzzleLocked,
    /// The puzzle was already solved in this attempt.
    AlreadyCompleted,
    /// A clue missing from the catalog.
    UnknownClue,
    /// A location missing from the catalog.
    UnknownLocation,
    /// A dialogue or clue panel still covers the scene.
    ModalBusy,
    Placement(PlacementError),
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModalNotOpen => f.write_str("modal not open"),
            Self::ClueAlreadyCollected => f.write_str("clue already collected"),
            Self::ControlDisabled => f.write_str("control disabled"),
            Self::PuzzleLocked => f.write_str("puzzle locked"),
            Self::AlreadyCompleted => f.write_str("mission already completed"),
            Self::UnknownClue => f.write_str("unknown clue"),
            Self::UnknownLocation => f.write_str("unknown location"),
            Self::ModalBusy => f.write_str("a panel is still open"),
            Self::Placement(err) => write!(f, "placement rejected: {err}"),
        }
    }
}

impl From<PlacementError> for IgnoreReason {
    fn from(err: PlacementError) -> Self {
        Self::Placement(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    Ignored(IgnoreReason),
    QuizGraded(QuizVerdict),
    PuzzleChecked(PuzzleVerdict),
}

impl Outcome {
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored(_))
    }
}
