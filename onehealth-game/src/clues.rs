//! Dialogue → clue reveal → followup chaining for the three farm clues.
use crate::catalog::Catalog;
use crate::events::{IgnoreReason, Outcome};
use crate::modals::{Continuation, ModalId, Modals};
use crate::presenter::{Presenter, RenderRequest};
use crate::scoring::award_clue;
use crate::state::{ClueId, LocationId, MissionProgress};

/// Borrowed view over the pieces of the game the clue flow touches.
pub struct ClueEngine<'a> {
    catalog: &'a Catalog,
    progress: &'a mut MissionProgress,
    modals: &'a mut Modals,
}

impl<'a> ClueEngine<'a> {
    pub fn new(
        catalog: &'a Catalog,
        progress: &'a mut MissionProgress,
        modals: &'a mut Modals,
    ) -> Self {
        Self {
            catalog,
            progress,
            modals,
        }
    }

    /// Show the location's dialogue; dismissing it collects the location's clue.
    /// Refused while a dialogue or clue panel is still up, so a queued followup
    /// is never overwritten.
    pub fn inspect(&mut self, location: LocationId, presenter: &mut dyn Presenter) -> Outcome {
        if self.modals.covers_scene() {
            return Outcome::Ignored(IgnoreReason::ModalBusy);
        }
        let Some(place) = self.catalog.location(location) else {
            return Outcome::Ignored(IgnoreReason::UnknownLocation);
        };
        presenter.render(RenderRequest::Dialogue {
            speaker: place.speaker.clone(),
            text: place.dialogue.clone(),
        });
        self.modals.open(
            ModalId::Dialogue,
            Some(Continuation::CollectClue(place.clue)),
            presenter,
        );
        Outcome::Applied
    }

    /// Collect `clue`: +5, reveal panel, and the clue's followup queued on the
    /// panel. A second collection in the same attempt changes nothing.
    pub fn collect(&mut self, clue: ClueId, presenter: &mut dyn Presenter) -> Outcome {
        let Some(info) = self.catalog.clue(clue) else {
            return Outcome::Ignored(IgnoreReason::UnknownClue);
        };
        if !self.progress.record_clue(clue) {
            return Outcome::Ignored(IgnoreReason::ClueAlreadyCollected);
        }
        let score = award_clue(self.progress);
        log::debug!(
            "clue {clue} collected ({}/3, score {score})",
            self.progress.clues_collected()
        );
        presenter.render(RenderRequest::ClueReveal {
            clue,
            icon: info.icon.clone(),
            description: info.description.clone(),
        });
        self.modals.open(
            ModalId::Clue,
            Some(Continuation::after_clue(clue)),
            presenter,
        );
        self.refresh_counter(presenter);
        Outcome::Applied
    }

    /// Mark `location` visited. Repeat visits keep a single entry.
    pub fn record_visit(&mut self, location: LocationId, presenter: &mut dyn Presenter) {
        if self.progress.record_visit(location) {
            presenter.render(RenderRequest::LocationVisited(location));
        }
    }

    pub fn refresh_counter(&self, presenter: &mut dyn Presenter) {
        presenter.render(RenderRequest::CluesFound {
            count: self.progress.clues_collected(),
            puzzle_available: self.progress.all_clues_found(),
        });
    }
}
