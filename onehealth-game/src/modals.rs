//! Modal panels and the continuations they run on dismissal.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::presenter::{Presenter, RenderRequest};
use crate::state::ClueId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModalId {
    #[serde(rename = "settings-modal")]
    Settings,
    #[serde(rename = "one-health-modal")]
    OneHealth,
    #[serde(rename = "dialogue-modal")]
    Dialogue,
    #[serde(rename = "clue-modal")]
    Clue,
    #[serde(rename = "quiz-modal")]
    Quiz,
    #[serde(rename = "info-modal")]
    Info,
}

impl ModalId {
    pub const ALL: [Self; 6] = [
        Self::Settings,
        Self::OneHealth,
        Self::Dialogue,
        Self::Clue,
        Self::Quiz,
        Self::Info,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Settings => "settings-modal",
            Self::OneHealth => "one-health-modal",
            Self::Dialogue => "dialogue-modal",
            Self::Clue => "clue-modal",
            Self::Quiz => "quiz-modal",
            Self::Info => "info-modal",
        }
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModalId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|id| id.as_str() == s).ok_or(())
    }
}

/// Follow-up queued on a modal and run once the player dismisses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Continuation {
    CollectClue(ClueId),
    OpenQuiz,
    OpenInfo,
    ReturnToMap,
}

impl Continuation {
    /// What happens after the reveal panel for `clue` is closed.
    #[must_use]
    pub const fn after_clue(clue: ClueId) -> Self {
        match clue {
            ClueId::Chickens => Self::OpenQuiz,
            ClueId::Medicine => Self::OpenInfo,
            ClueId::Ventilation => Self::ReturnToMap,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Modals {
    open: Vec<ModalId>,
    continuations: BTreeMap<ModalId, Continuation>,
}

impl Modals {
    #[must_use]
    pub fn is_open(&self, id: ModalId) -> bool {
        self.open.contains(&id)
    }

    /// A dialogue or clue panel is up, covering the scene behind it.
    #[must_use]
    pub fn covers_scene(&self) -> bool {
        self.is_open(ModalId::Dialogue) || self.is_open(ModalId::Clue)
    }

    pub fn open_ids(&self) -> impl Iterator<Item = ModalId> + '_ {
        self.open.iter().copied()
    }

    /// Open `id`. A continuation left over from an earlier showing is replaced.
    pub fn open(
        &mut self,
        id: ModalId,
        next: Option<Continuation>,
        presenter: &mut dyn Presenter,
    ) {
        if !self.is_open(id) {
            self.open.push(id);
        }
        match next {
            Some(next) => {
                self.continuations.insert(id, next);
            }
            None => {
                self.continuations.remove(&id);
            }
        }
        presenter.render(RenderRequest::OpenModal(id));
    }

    /// Close `id` and hand back its continuation. Closing a modal that is not
    /// open does nothing and yields `None`.
    pub fn close(&mut self, id: ModalId, presenter: &mut dyn Presenter) -> Option<Continuation> {
        if !self.is_open(id) {
            return None;
        }
        self.open.retain(|open| *open != id);
        presenter.render(RenderRequest::CloseModal(id));
        self.continuations.remove(&id)
    }

    /// Drop every open modal without running continuations.
    pub fn close_all(&mut self, presenter: &mut dyn Presenter) {
        for id in self.open.drain(..) {
            presenter.render(RenderRequest::CloseModal(id));
        }
        self.continuations.clear();
    }
}
