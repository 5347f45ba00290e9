//! The game object: owns every subsystem and applies input events to them.
use crate::bindings;
use crate::catalog::Catalog;
use crate::clues::ClueEngine;
use crate::config::{GameConfig, PuzzleGate};
use crate::constants::BADGE_COUNT;
use crate::error::GameError;
use crate::events::{IgnoreReason, InputEvent, Outcome, QuizPlacement, TimelinePlacement};
use crate::interaction::{DropBoard, PuzzleVerdict, QuizBoard, QuizVerdict, TimelineBoard};
use crate::modals::{Continuation, ModalId, Modals};
use crate::navigation::{Navigator, SceneId, ScreenId, ScreenRefresh};
use crate::presenter::{Control, Presenter, RenderRequest, ScrollTarget};
use crate::scheduler::{DeferredAction, Scheduler, TaskScope};
use crate::scoring::{BadgeBoardView, award_quiz, complete_mission};
use crate::state::{GameState, Language, LocationId};

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    catalog: Catalog,
    state: GameState,
    navigator: Navigator,
    modals: Modals,
    quiz: QuizBoard,
    timeline: TimelineBoard,
    scheduler: Scheduler,
}

impl Game {
    #[must_use]
    pub fn new(catalog: Catalog, config: GameConfig) -> Self {
        let quiz = QuizBoard::new(catalog.quiz.tokens.clone());
        Self {
            config,
            catalog,
            state: GameState::default(),
            navigator: Navigator::default(),
            modals: Modals::default(),
            quiz,
            timeline: TimelineBoard::default(),
            scheduler: Scheduler::default(),
        }
    }

    /// Game over the built-in catalog and default timings.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded assets fail validation.
    pub fn embedded() -> Result<Self, GameError> {
        let catalog = Catalog::from_json(crate::EMBEDDED_CATALOG)?;
        let config = GameConfig::from_json(crate::EMBEDDED_CONFIG)?;
        Ok(Self::new(catalog, config))
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    #[must_use]
    pub const fn modals(&self) -> &Modals {
        &self.modals
    }

    #[must_use]
    pub const fn quiz(&self) -> &QuizBoard {
        &self.quiz
    }

    #[must_use]
    pub const fn timeline(&self) -> &TimelineBoard {
        &self.timeline
    }

    #[must_use]
    pub const fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Resolve a control activation and dispatch it.
    ///
    /// # Errors
    ///
    /// Returns a [`GameError`] when the control id or its value is not wired
    /// to anything.
    pub fn activate(
        &mut self,
        control: &str,
        value: Option<&str>,
        presenter: &mut dyn Presenter,
    ) -> Result<Outcome, GameError> {
        let event = bindings::resolve(control, value)?;
        Ok(self.dispatch(event, presenter))
    }

    /// Apply one input event. State changes and render requests happen
    /// together or not at all.
    pub fn dispatch(&mut self, event: InputEvent, presenter: &mut dyn Presenter) -> Outcome {
        let outcome = match event {
            InputEvent::StartGame => self.show_screen(ScreenId::Intro, presenter),
            InputEvent::OpenSettings => self.open_modal(ModalId::Settings, presenter),
            InputEvent::CloseSettings => self.close_modal(ModalId::Settings, presenter),
            InputEvent::LanguageChanged(language) => self.set_language(language, presenter),
            InputEvent::SoundToggled(enabled) => {
                self.state.settings.sound_enabled = enabled;
                Outcome::Applied
            }
            InputEvent::Ready | InputEvent::BackToMissions => {
                self.show_screen(ScreenId::Missions, presenter)
            }
            InputEvent::TellMore => self.open_modal(ModalId::OneHealth, presenter),
            InputEvent::GotIt => self.close_modal(ModalId::OneHealth, presenter),
            InputEvent::StartMission => self.start_mission(presenter),
            InputEvent::ViewBadges => self.show_screen(ScreenId::Badges, presenter),
            InputEvent::BackToScreen(id) => self.show_screen(id, presenter),
            InputEvent::BackToScene(id) => self.show_scene(id, presenter),
            InputEvent::StartInvestigation | InputEvent::BackToMap => {
                self.show_scene(SceneId::Map, presenter)
            }
            InputEvent::VisitLocation(location) => self.visit_location(location, presenter),
            InputEvent::InspectLocation(location) => self.clues().inspect(location, presenter),
            InputEvent::DialogueDismissed => self.dismiss(ModalId::Dialogue, presenter),
            InputEvent::CluePanelDismissed => self.dismiss(ModalId::Clue, presenter),
            InputEvent::InfoDismissed => self.close_modal(ModalId::Info, presenter),
            InputEvent::QuizPlace(placement) => self.place_quiz_token(placement, presenter),
            InputEvent::QuizSubmitted => self.submit_quiz(presenter),
            InputEvent::OpenPuzzle => self.show_scene(SceneId::Puzzle, presenter),
            InputEvent::TimelinePlace(placement) => self.place_timeline_clue(placement, presenter),
            InputEvent::PuzzleChecked => self.check_puzzle(presenter),
        };
        match outcome {
            Outcome::Ignored(reason) => log::warn!("ignored {event}: {reason}"),
            _ => log::trace!("{event} -> {outcome:?}"),
        }
        outcome
    }

    /// Move the virtual clock forward, running every task that falls due.
    /// Returns how many tasks ran.
    pub fn advance(&mut self, elapsed_ms: u64, presenter: &mut dyn Presenter) -> usize {
        let until = self.scheduler.now_ms().saturating_add(elapsed_ms);
        let mut fired = 0;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run_task(task.action, presenter);
            fired += 1;
        }
        self.scheduler.settle(until);
        fired
    }

    fn run_task(&mut self, action: DeferredAction, presenter: &mut dyn Presenter) {
        match action {
            DeferredAction::ScrollToScene(id) => {
                presenter.render(RenderRequest::ScrollIntoView(ScrollTarget::Scene(id)));
            }
            DeferredAction::EnterScene(id) => self.enter_scene(id, presenter),
            DeferredAction::DismissQuizFeedback => {
                self.modals.close(ModalId::Quiz, presenter);
                self.enter_scene(SceneId::Map, presenter);
                self.quiz.clear();
                presenter.render(RenderRequest::QuizAreaCleared);
                presenter.render(RenderRequest::ControlEnabled {
                    control: Control::CheckQuiz,
                    enabled: false,
                });
                presenter.render(RenderRequest::QuizFeedbackHidden);
            }
        }
    }

    fn clues(&mut self) -> ClueEngine<'_> {
        ClueEngine::new(&self.catalog, &mut self.state.mission1, &mut self.modals)
    }

    fn show_screen(&mut self, id: ScreenId, presenter: &mut dyn Presenter) -> Outcome {
        match self.navigator.go_to_screen(id, presenter) {
            ScreenRefresh::MissionList => presenter.render(RenderRequest::MissionList {
                mission1_completed: self.state.mission1.completed,
            }),
            ScreenRefresh::BadgeBoard => presenter.render(RenderRequest::BadgeBoard(
                BadgeBoardView::build(&self.catalog, &self.state.badges),
            )),
            ScreenRefresh::None => {}
        }
        Outcome::Applied
    }

    fn show_scene(&mut self, id: SceneId, presenter: &mut dyn Presenter) -> Outcome {
        if id == SceneId::Puzzle
            && self.config.puzzle_gate == PuzzleGate::Hard
            && !self.state.mission1.all_clues_found()
        {
            return Outcome::Ignored(IgnoreReason::PuzzleLocked);
        }
        self.enter_scene(id, presenter);
        Outcome::Applied
    }

    fn enter_scene(&mut self, id: SceneId, presenter: &mut dyn Presenter) {
        self.navigator.go_to_scene(
            id,
            presenter,
            &mut self.scheduler,
            self.config.scene_scroll_delay_ms,
        );
    }

    fn open_modal(&mut self, id: ModalId, presenter: &mut dyn Presenter) -> Outcome {
        self.modals.open(id, None, presenter);
        Outcome::Applied
    }

    fn close_modal(&mut self, id: ModalId, presenter: &mut dyn Presenter) -> Outcome {
        if !self.modals.is_open(id) {
            return Outcome::Ignored(IgnoreReason::ModalNotOpen);
        }
        self.modals.close(id, presenter);
        Outcome::Applied
    }

    /// Close `id` and run whatever was queued on it.
    fn dismiss(&mut self, id: ModalId, presenter: &mut dyn Presenter) -> Outcome {
        if !self.modals.is_open(id) {
            return Outcome::Ignored(IgnoreReason::ModalNotOpen);
        }
        match self.modals.close(id, presenter) {
            Some(Continuation::CollectClue(clue)) => {
                self.clues().collect(clue, presenter);
            }
            Some(Continuation::OpenQuiz) => self.modals.open(ModalId::Quiz, None, presenter),
            Some(Continuation::OpenInfo) => self.modals.open(ModalId::Info, None, presenter),
            Some(Continuation::ReturnToMap) => self.enter_scene(SceneId::Map, presenter),
            None => {}
        }
        Outcome::Applied
    }

    fn set_language(&mut self, language: Language, presenter: &mut dyn Presenter) -> Outcome {
        self.state.language = language;
        presenter.render(RenderRequest::LanguageChanged(language));
        self.refresh_hud(presenter);
        Outcome::Applied
    }

    /// Begin a fresh attempt at mission one. Anything still pending from the
    /// previous attempt is cancelled before the new one starts.
    fn start_mission(&mut self, presenter: &mut dyn Presenter) -> Outcome {
        self.show_screen(ScreenId::Game, presenter);

        let mut cancelled = self.scheduler.cancel_scope(TaskScope::Mission)
            + self.scheduler.cancel_scope(TaskScope::SceneScroll);
        for modal in ModalId::ALL {
            cancelled += self.scheduler.cancel_scope(TaskScope::Modal(modal));
        }
        self.modals.close_all(presenter);
        self.scheduler.schedule(
            self.config.mission_intro_delay_ms,
            TaskScope::Mission,
            DeferredAction::EnterScene(SceneId::Intro),
        );

        self.state.reset_mission();
        self.timeline.clear();
        self.quiz.clear();
        presenter.render(RenderRequest::TimelineCleared);
        presenter.render(RenderRequest::QuizAreaCleared);
        presenter.render(RenderRequest::QuizFeedbackHidden);
        for control in [Control::CheckSolution, Control::CheckQuiz] {
            presenter.render(RenderRequest::ControlEnabled {
                control,
                enabled: false,
            });
        }
        self.refresh_hud(presenter);
        log::info!("mission one started ({cancelled} stale task(s) cancelled)");
        Outcome::Applied
    }

    fn visit_location(&mut self, location: LocationId, presenter: &mut dyn Presenter) -> Outcome {
        if self.modals.covers_scene() {
            return Outcome::Ignored(IgnoreReason::ModalBusy);
        }
        self.enter_scene(SceneId::for_location(location), presenter);
        self.clues().record_visit(location, presenter);
        Outcome::Applied
    }

    fn place_quiz_token(
        &mut self,
        placement: QuizPlacement,
        presenter: &mut dyn Presenter,
    ) -> Outcome {
        if !self.modals.is_open(ModalId::Quiz) {
            return Outcome::Ignored(IgnoreReason::ModalNotOpen);
        }
        let token = match placement {
            QuizPlacement::Drag { token, .. } | QuizPlacement::Tap { token } => token,
        };
        if let Err(err) = self.quiz.place_input(placement) {
            return Outcome::Ignored(err.into());
        }
        if let Some(info) = self.quiz.token(token) {
            presenter.render(RenderRequest::QuizTokenPlaced {
                token: token.0,
                label: info.label.clone(),
            });
        }
        presenter.render(RenderRequest::ControlEnabled {
            control: Control::CheckQuiz,
            enabled: self.quiz.can_submit(),
        });
        Outcome::Applied
    }

    fn submit_quiz(&mut self, presenter: &mut dyn Presenter) -> Outcome {
        let Some(verdict) = self.quiz.submit() else {
            return Outcome::Ignored(IgnoreReason::ControlDisabled);
        };
        let text = match verdict {
            QuizVerdict::Correct => {
                award_quiz(&mut self.state.mission1);
                self.catalog.quiz.correct_feedback.clone()
            }
            QuizVerdict::Incorrect => self.catalog.quiz.incorrect_feedback.clone(),
        };
        log::debug!(
            "quiz graded {verdict:?}: {}/{} correct",
            self.quiz.correct_placed(),
            self.quiz.placed().len()
        );
        presenter.render(RenderRequest::QuizFeedback { verdict, text });
        presenter.render(RenderRequest::ControlEnabled {
            control: Control::CheckQuiz,
            enabled: false,
        });
        self.scheduler.cancel_scope(TaskScope::Modal(ModalId::Quiz));
        self.scheduler.schedule(
            self.config.quiz_feedback_delay_ms,
            TaskScope::Modal(ModalId::Quiz),
            DeferredAction::DismissQuizFeedback,
        );
        Outcome::QuizGraded(verdict)
    }

    fn place_timeline_clue(
        &mut self,
        placement: TimelinePlacement,
        presenter: &mut dyn Presenter,
    ) -> Outcome {
        let clue = match placement {
            TimelinePlacement::Drag { token, .. } | TimelinePlacement::Tap { token } => token,
        };
        let slot = match self.timeline.place_input(placement) {
            Ok(slot) => slot,
            Err(err) => return Outcome::Ignored(err.into()),
        };
        if let Some(info) = self.catalog.clue(clue) {
            presenter.render(RenderRequest::TimelineSlotFilled {
                slot,
                clue,
                icon: info.icon.clone(),
                text: info.text.clone(),
            });
        }
        presenter.render(RenderRequest::ControlEnabled {
            control: Control::CheckSolution,
            enabled: self.timeline.is_complete(),
        });
        Outcome::Applied
    }

    fn check_puzzle(&mut self, presenter: &mut dyn Presenter) -> Outcome {
        if self.state.mission1.completed {
            return Outcome::Ignored(IgnoreReason::AlreadyCompleted);
        }
        let Some(verdict) = self.timeline.evaluate() else {
            return Outcome::Ignored(IgnoreReason::ControlDisabled);
        };
        match verdict {
            PuzzleVerdict::Solved => {
                if let Some(done) = complete_mission(&mut self.state) {
                    self.enter_scene(SceneId::Completion, presenter);
                    presenter.render(RenderRequest::MissionScore(done.mission_score));
                }
            }
            PuzzleVerdict::Wrong => {
                log::debug!("timeline order {:?} rejected", self.timeline.order());
                presenter.render(RenderRequest::Notice {
                    text: self.catalog.puzzle.failure_notice.clone(),
                });
            }
        }
        self.refresh_hud(presenter);
        Outcome::PuzzleChecked(verdict)
    }

    fn refresh_hud(&self, presenter: &mut dyn Presenter) {
        presenter.render(RenderRequest::CluesFound {
            count: self.state.mission1.clues_collected(),
            puzzle_available: self.state.mission1.all_clues_found(),
        });
        presenter.render(RenderRequest::Stats {
            total_score: self.state.total_score,
            badges_earned: self.state.badges.earned_count(),
            badges_total: BADGE_COUNT,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::{PlacementInput, QuizTokenId, TimelineSlot};
    use crate::presenter::RecordingPresenter;
    use crate::state::ClueId;

    fn game() -> (Game, RecordingPresenter) {
        (Game::embedded().unwrap(), RecordingPresenter::default())
    }

    #[test]
    fn fresh_game_sits_on_welcome() {
        let (game, _) = game();
        assert_eq!(game.navigator().current_screen(), ScreenId::Welcome);
        assert_eq!(game.state().total_score, 0);
    }

    #[test]
    fn mission_intro_scene_waits_for_delay() {
        let (mut game, mut presenter) = game();
        game.dispatch(InputEvent::StartMission, &mut presenter);
        assert_eq!(game.navigator().current_screen(), ScreenId::Game);
        assert!(!presenter.contains(&RenderRequest::ShowScene(SceneId::Intro)));
        assert_eq!(game.advance(299, &mut presenter), 0);
        assert_eq!(game.advance(1, &mut presenter), 1);
        assert!(presenter.contains(&RenderRequest::ShowScene(SceneId::Intro)));
        game.advance(100, &mut presenter);
        assert!(presenter.contains(&RenderRequest::ScrollIntoView(ScrollTarget::Scene(
            SceneId::Intro
        ))));
    }

    #[test]
    fn dismiss_without_modal_is_ignored() {
        let (mut game, mut presenter) = game();
        assert_eq!(
            game.dispatch(InputEvent::DialogueDismissed, &mut presenter),
            Outcome::Ignored(IgnoreReason::ModalNotOpen)
        );
        assert_eq!(
            game.dispatch(InputEvent::GotIt, &mut presenter),
            Outcome::Ignored(IgnoreReason::ModalNotOpen)
        );
    }

    #[test]
    fn quiz_placement_needs_open_quiz() {
        let (mut game, mut presenter) = game();
        let tap = InputEvent::QuizPlace(PlacementInput::Tap {
            token: QuizTokenId(0),
        });
        assert!(game.dispatch(tap, &mut presenter).is_ignored());
        assert!(game.quiz().placed().is_empty());
    }

    #[test]
    fn submit_with_nothing_placed_is_rejected() {
        let (mut game, mut presenter) = game();
        assert_eq!(
            game.dispatch(InputEvent::QuizSubmitted, &mut presenter),
            Outcome::Ignored(IgnoreReason::ControlDisabled)
        );
    }

    #[test]
    fn partial_timeline_check_is_rejected() {
        let (mut game, mut presenter) = game();
        game.dispatch(
            InputEvent::TimelinePlace(PlacementInput::Drag {
                token: ClueId::Chickens,
                target: TimelineSlot::Start,
            }),
            &mut presenter,
        );
        assert!(presenter.contains(&RenderRequest::ControlEnabled {
            control: Control::CheckSolution,
            enabled: false,
        }));
        assert_eq!(
            game.dispatch(InputEvent::PuzzleChecked, &mut presenter),
            Outcome::Ignored(IgnoreReason::ControlDisabled)
        );
    }

    #[test]
    fn language_change_reaches_presenter() {
        let (mut game, mut presenter) = game();
        game.activate("settings-language", Some("fr"), &mut presenter)
            .unwrap();
        assert_eq!(game.state().language, Language::Fr);
        assert!(presenter.contains(&RenderRequest::LanguageChanged(Language::Fr)));
        assert!(game.activate("nope", None, &mut presenter).is_err());
    }
}
