use anyhow::{Context, Result};

use onehealth_game::{
    ClueId, Game, InputEvent, LocationId, Outcome, PlacementInput, QuizArea, QuizTokenId,
    RecordingPresenter, TimelineSlot,
};

use crate::invariants::check_transition;

/// Drives one game headlessly, checking invariants after every step.
pub struct Driver {
    game: Game,
    presenter: RecordingPresenter,
    steps: usize,
    verbose: bool,
}

impl Driver {
    pub fn new(game: Game, verbose: bool) -> Self {
        Self {
            game,
            presenter: RecordingPresenter::default(),
            steps: 0,
            verbose,
        }
    }

    pub const fn game(&self) -> &Game {
        &self.game
    }

    pub const fn presenter(&self) -> &RecordingPresenter {
        &self.presenter
    }

    pub fn clear_requests(&mut self) {
        self.presenter.clear();
    }

    pub const fn steps(&self) -> usize {
        self.steps
    }

    pub fn send(&mut self, event: InputEvent) -> Result<Outcome> {
        let before = self.game.state().clone();
        let outcome = self.game.dispatch(event, &mut self.presenter);
        self.steps += 1;
        if self.verbose {
            println!("     {:>3}. {event} -> {outcome:?}", self.steps);
        }
        check_transition(&before, self.game.state())
            .with_context(|| format!("after step {} ({event})", self.steps))?;
        Ok(outcome)
    }

    pub fn activate(&mut self, control: &str, value: Option<&str>) -> Result<Outcome> {
        let event = onehealth_game::bindings::resolve(control, value)
            .with_context(|| format!("resolving control `{control}`"))?;
        self.send(event)
    }

    pub fn advance(&mut self, elapsed_ms: u64) -> Result<usize> {
        let before = self.game.state().clone();
        let fired = self.game.advance(elapsed_ms, &mut self.presenter);
        check_transition(&before, self.game.state())
            .with_context(|| format!("after advancing {elapsed_ms} ms"))?;
        Ok(fired)
    }

    /// Start the mission and land on the farm map.
    pub fn begin_mission(&mut self) -> Result<()> {
        self.send(InputEvent::StartMission)?;
        self.advance(self.game.config().mission_intro_delay_ms)?;
        self.send(InputEvent::StartInvestigation)?;
        Ok(())
    }

    /// Visit and inspect `location`, dismiss the dialogue and the clue panel.
    pub fn investigate(&mut self, location: LocationId) -> Result<()> {
        self.send(InputEvent::VisitLocation(location))?;
        self.send(InputEvent::InspectLocation(location))?;
        self.send(InputEvent::DialogueDismissed)?;
        self.send(InputEvent::CluePanelDismissed)?;
        Ok(())
    }

    pub fn answer_quiz(&mut self, tokens: &[usize]) -> Result<Outcome> {
        for token in tokens {
            self.send(InputEvent::QuizPlace(PlacementInput::Drag {
                token: QuizTokenId(*token),
                target: QuizArea,
            }))?;
        }
        let outcome = self.send(InputEvent::QuizSubmitted)?;
        self.advance(self.game.config().quiz_feedback_delay_ms)?;
        Ok(outcome)
    }

    /// Collect all three clues, answering the quiz correctly on the way.
    pub fn collect_all_clues(&mut self) -> Result<()> {
        for location in LocationId::ALL {
            self.investigate(location)?;
            match location {
                LocationId::Coop => {
                    self.answer_quiz(&[0, 1])?;
                }
                LocationId::House => {
                    self.send(InputEvent::InfoDismissed)?;
                }
                LocationId::Shed => {}
            }
        }
        Ok(())
    }

    pub fn arrange_timeline(&mut self, order: [ClueId; 3]) -> Result<()> {
        for (slot, clue) in TimelineSlot::ALL.into_iter().zip(order) {
            self.send(InputEvent::TimelinePlace(PlacementInput::Drag {
                token: clue,
                target: slot,
            }))?;
        }
        Ok(())
    }
}
