//! The seam between the game core and whatever draws it.
//!
//! The core never touches a document or widget tree; it emits
//! [`RenderRequest`]s and the presentation layer applies them.

use serde::Serialize;

use crate::interaction::{QuizVerdict, TimelineSlot};
use crate::modals::ModalId;
use crate::navigation::{SceneId, ScreenId};
use crate::scoring::BadgeBoardView;
use crate::state::{ClueId, Language, LocationId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollTarget {
    Screen(ScreenId),
    Scene(SceneId),
}

/// Controls whose enabled state the core decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Control {
    #[serde(rename = "check-quiz")]
    CheckQuiz,
    #[serde(rename = "check-solution")]
    CheckSolution,
}

impl Control {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CheckQuiz => crate::constants::CONTROL_CHECK_QUIZ,
            Self::CheckSolution => crate::constants::CONTROL_CHECK_SOLUTION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum RenderRequest {
    ShowScreen(ScreenId),
    ShowScene(SceneId),
    ScrollIntoView(ScrollTarget),
    OpenModal(ModalId),
    CloseModal(ModalId),
    Dialogue {
        speaker: String,
        text: String,
    },
    ClueReveal {
        clue: ClueId,
        icon: String,
        description: String,
    },
    QuizTokenPlaced {
        token: usize,
        label: String,
    },
    QuizFeedback {
        verdict: QuizVerdict,
        text: String,
    },
    QuizFeedbackHidden,
    QuizAreaCleared,
    TimelineSlotFilled {
        slot: TimelineSlot,
        clue: ClueId,
        icon: String,
        text: String,
    },
    TimelineCleared,
    ControlEnabled {
        control: Control,
        enabled: bool,
    },
    CluesFound {
        count: usize,
        puzzle_available: bool,
    },
    Stats {
        total_score: u32,
        badges_earned: usize,
        badges_total: usize,
    },
    MissionList {
        mission1_completed: bool,
    },
    BadgeBoard(BadgeBoardView),
    LocationVisited(LocationId),
    Notice {
        text: String,
    },
    MissionScore(u32),
    LanguageChanged(Language),
}

pub trait Presenter {
    fn render(&mut self, request: RenderRequest);
}

/// Presenter that keeps every request, for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    requests: Vec<RenderRequest>,
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, request: RenderRequest) {
        self.requests.push(request);
    }
}

impl RecordingPresenter {
    #[must_use]
    pub fn requests(&self) -> &[RenderRequest] {
        &self.requests
    }

    #[must_use]
    pub fn contains(&self, request: &RenderRequest) -> bool {
        self.requests.contains(request)
    }

    #[must_use]
    pub fn count(&self, pred: impl Fn(&RenderRequest) -> bool) -> usize {
        self.requests.iter().filter(|req| pred(req)).count()
    }

    #[must_use]
    pub fn last_matching(&self, pred: impl Fn(&RenderRequest) -> bool) -> Option<&RenderRequest> {
        self.requests.iter().rev().find(|req| pred(req))
    }

    /// Drain everything recorded so far.
    pub fn take(&mut self) -> Vec<RenderRequest> {
        std::mem::take(&mut self.requests)
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }
}
