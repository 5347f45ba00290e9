use onehealth_game::{
    BadgeId, ClueId, Control, Game, GameConfig, IgnoreReason, InputEvent, LocationId, ModalId,
    Outcome, PlacementInput, PuzzleGate, PuzzleVerdict, QuizArea, QuizTokenId, QuizVerdict,
    RecordingPresenter, RenderRequest, SceneId, ScreenId, TimelineSlot,
};

fn new_game() -> (Game, RecordingPresenter) {
    (Game::embedded().unwrap(), RecordingPresenter::default())
}

fn hard_gate_game() -> (Game, RecordingPresenter) {
    let base = Game::embedded().unwrap();
    let config = GameConfig::default().with_puzzle_gate(PuzzleGate::Hard);
    (
        Game::new(base.catalog().clone(), config),
        RecordingPresenter::default(),
    )
}

fn send(game: &mut Game, presenter: &mut RecordingPresenter, event: InputEvent) -> Outcome {
    game.dispatch(event, presenter)
}

fn start_mission(game: &mut Game, presenter: &mut RecordingPresenter) {
    send(game, presenter, InputEvent::StartMission);
    game.advance(400, presenter);
    send(game, presenter, InputEvent::StartInvestigation);
}

fn place_quiz(game: &mut Game, presenter: &mut RecordingPresenter, tokens: &[usize]) {
    for token in tokens {
        let outcome = send(
            game,
            presenter,
            InputEvent::QuizPlace(PlacementInput::Drag {
                token: QuizTokenId(*token),
                target: QuizArea,
            }),
        );
        assert_eq!(outcome, Outcome::Applied);
    }
}

/// Visit, inspect and work through the clue chain of one location, answering
/// the quiz with `quiz` when the coop opens it.
fn investigate(
    game: &mut Game,
    presenter: &mut RecordingPresenter,
    location: LocationId,
    quiz: &[usize],
) {
    send(game, presenter, InputEvent::VisitLocation(location));
    send(game, presenter, InputEvent::InspectLocation(location));
    send(game, presenter, InputEvent::DialogueDismissed);
    send(game, presenter, InputEvent::CluePanelDismissed);
    match location {
        LocationId::Coop => {
            place_quiz(game, presenter, quiz);
            send(game, presenter, InputEvent::QuizSubmitted);
            game.advance(3_000, presenter);
        }
        LocationId::House => {
            send(game, presenter, InputEvent::InfoDismissed);
        }
        LocationId::Shed => {}
    }
}

fn fill_timeline(game: &mut Game, presenter: &mut RecordingPresenter, order: [ClueId; 3]) {
    for (slot, clue) in TimelineSlot::ALL.into_iter().zip(order) {
        send(
            game,
            presenter,
            InputEvent::TimelinePlace(PlacementInput::Drag {
                token: clue,
                target: slot,
            }),
        );
    }
}

fn collect_everything(game: &mut Game, presenter: &mut RecordingPresenter) {
    for location in LocationId::ALL {
        investigate(game, presenter, location, &[0, 1]);
    }
}

#[test]
fn full_mission_scores_ninety_five() {
    let (mut game, mut presenter) = new_game();
    send(&mut game, &mut presenter, InputEvent::StartGame);
    send(&mut game, &mut presenter, InputEvent::Ready);
    start_mission(&mut game, &mut presenter);
    collect_everything(&mut game, &mut presenter);

    assert_eq!(game.state().mission1.clues_collected(), 3);
    assert_eq!(game.state().mission1.score, 25);
    assert_eq!(game.navigator().current_scene(), SceneId::Map);

    assert_eq!(
        send(&mut game, &mut presenter, InputEvent::OpenPuzzle),
        Outcome::Applied
    );
    fill_timeline(
        &mut game,
        &mut presenter,
        [ClueId::Chickens, ClueId::Ventilation, ClueId::Medicine],
    );
    assert!(presenter.contains(&RenderRequest::ControlEnabled {
        control: Control::CheckSolution,
        enabled: true,
    }));
    assert_eq!(
        send(&mut game, &mut presenter, InputEvent::PuzzleChecked),
        Outcome::PuzzleChecked(PuzzleVerdict::Solved)
    );

    let state = game.state();
    assert!(state.mission1.completed);
    assert_eq!(state.mission1.score, 95);
    assert_eq!(state.total_score, 95);
    for badge in BadgeId::MISSION_ONE {
        assert!(state.badges.is_earned(badge));
    }
    assert_eq!(state.badges.earned_count(), 3);
    assert_eq!(game.navigator().current_scene(), SceneId::Completion);
    assert!(presenter.contains(&RenderRequest::MissionScore(95)));
    assert!(presenter.contains(&RenderRequest::Stats {
        total_score: 95,
        badges_earned: 3,
        badges_total: 9,
    }));

    assert_eq!(
        send(&mut game, &mut presenter, InputEvent::PuzzleChecked),
        Outcome::Ignored(IgnoreReason::AlreadyCompleted)
    );
    assert_eq!(game.state().total_score, 95);

    send(&mut game, &mut presenter, InputEvent::BackToMissions);
    assert!(presenter.contains(&RenderRequest::MissionList {
        mission1_completed: true
    }));
}

#[test]
fn clue_followups_route_by_clue() {
    let (mut game, mut presenter) = new_game();
    start_mission(&mut game, &mut presenter);

    send(&mut game, &mut presenter, InputEvent::InspectLocation(LocationId::Coop));
    send(&mut game, &mut presenter, InputEvent::DialogueDismissed);
    send(&mut game, &mut presenter, InputEvent::CluePanelDismissed);
    assert!(game.modals().is_open(ModalId::Quiz));

    let (mut game, mut presenter) = new_game();
    start_mission(&mut game, &mut presenter);
    send(&mut game, &mut presenter, InputEvent::InspectLocation(LocationId::House));
    send(&mut game, &mut presenter, InputEvent::DialogueDismissed);
    send(&mut game, &mut presenter, InputEvent::CluePanelDismissed);
    assert!(game.modals().is_open(ModalId::Info));

    let (mut game, mut presenter) = new_game();
    start_mission(&mut game, &mut presenter);
    send(&mut game, &mut presenter, InputEvent::VisitLocation(LocationId::Shed));
    assert_eq!(game.navigator().current_scene(), SceneId::Shed);
    send(&mut game, &mut presenter, InputEvent::InspectLocation(LocationId::Shed));
    send(&mut game, &mut presenter, InputEvent::DialogueDismissed);
    send(&mut game, &mut presenter, InputEvent::CluePanelDismissed);
    assert_eq!(game.navigator().current_scene(), SceneId::Map);
    assert_eq!(game.modals().open_ids().count(), 0);
}

#[test]
fn open_clue_panel_keeps_its_followup() {
    let (mut game, mut presenter) = new_game();
    start_mission(&mut game, &mut presenter);
    send(&mut game, &mut presenter, InputEvent::InspectLocation(LocationId::Coop));
    send(&mut game, &mut presenter, InputEvent::DialogueDismissed);
    assert!(game.modals().is_open(ModalId::Clue));

    assert_eq!(
        send(&mut game, &mut presenter, InputEvent::InspectLocation(LocationId::Shed)),
        Outcome::Ignored(IgnoreReason::ModalBusy)
    );
    assert_eq!(
        send(&mut game, &mut presenter, InputEvent::VisitLocation(LocationId::Shed)),
        Outcome::Ignored(IgnoreReason::ModalBusy)
    );
    assert!(!game.modals().is_open(ModalId::Dialogue));
    assert_eq!(game.state().mission1.clues_collected(), 1);

    assert_eq!(
        send(&mut game, &mut presenter, InputEvent::CluePanelDismissed),
        Outcome::Applied
    );
    assert!(game.modals().is_open(ModalId::Quiz));
    place_quiz(&mut game, &mut presenter, &[0, 1]);
    assert_eq!(
        send(&mut game, &mut presenter, InputEvent::QuizSubmitted),
        Outcome::QuizGraded(QuizVerdict::Correct)
    );
    assert_eq!(game.state().mission1.score, 15);
}

#[test]
fn dialogue_blocks_a_second_inspection() {
    let (mut game, mut presenter) = new_game();
    start_mission(&mut game, &mut presenter);
    send(&mut game, &mut presenter, InputEvent::InspectLocation(LocationId::House));
    assert_eq!(
        send(&mut game, &mut presenter, InputEvent::InspectLocation(LocationId::Coop)),
        Outcome::Ignored(IgnoreReason::ModalBusy)
    );
    send(&mut game, &mut presenter, InputEvent::DialogueDismissed);
    assert!(game.state().mission1.has_clue(ClueId::Medicine));
    assert!(!game.state().mission1.has_clue(ClueId::Chickens));
}

#[test]
fn recollecting_a_clue_changes_nothing() {
    let (mut game, mut presenter) = new_game();
    start_mission(&mut game, &mut presenter);
    investigate(&mut game, &mut presenter, LocationId::Shed, &[]);
    let before = game.state().clone();

    send(&mut game, &mut presenter, InputEvent::InspectLocation(LocationId::Shed));
    send(&mut game, &mut presenter, InputEvent::DialogueDismissed);
    assert!(!game.modals().is_open(ModalId::Clue));
    assert_eq!(game.state(), &before);
    assert_eq!(game.state().mission1.clues_collected(), 1);
}

#[test]
fn quiz_grading_cases() {
    let cases: [(&[usize], QuizVerdict, u32); 3] = [
        (&[0, 1], QuizVerdict::Correct, 15),
        (&[0, 1, 3, 4, 5], QuizVerdict::Incorrect, 5),
        (&[2], QuizVerdict::Incorrect, 5),
    ];
    for (tokens, verdict, score) in cases {
        let (mut game, mut presenter) = new_game();
        start_mission(&mut game, &mut presenter);
        send(&mut game, &mut presenter, InputEvent::InspectLocation(LocationId::Coop));
        send(&mut game, &mut presenter, InputEvent::DialogueDismissed);
        send(&mut game, &mut presenter, InputEvent::CluePanelDismissed);
        place_quiz(&mut game, &mut presenter, tokens);
        assert_eq!(
            send(&mut game, &mut presenter, InputEvent::QuizSubmitted),
            Outcome::QuizGraded(verdict)
        );
        assert_eq!(game.state().mission1.score, score);
        assert_eq!(
            send(&mut game, &mut presenter, InputEvent::QuizSubmitted),
            Outcome::Ignored(IgnoreReason::ControlDisabled)
        );

        game.advance(2_999, &mut presenter);
        assert!(game.modals().is_open(ModalId::Quiz));
        game.advance(1, &mut presenter);
        assert!(!game.modals().is_open(ModalId::Quiz));
        assert!(game.quiz().placed().is_empty());
        assert_eq!(game.navigator().current_scene(), SceneId::Map);
        assert!(presenter.contains(&RenderRequest::QuizFeedbackHidden));
    }
}

#[test]
fn only_canonical_timeline_solves() {
    let permutations = [
        [ClueId::Chickens, ClueId::Medicine, ClueId::Ventilation],
        [ClueId::Medicine, ClueId::Chickens, ClueId::Ventilation],
        [ClueId::Medicine, ClueId::Ventilation, ClueId::Chickens],
        [ClueId::Ventilation, ClueId::Chickens, ClueId::Medicine],
        [ClueId::Ventilation, ClueId::Medicine, ClueId::Chickens],
    ];
    for order in permutations {
        let (mut game, mut presenter) = new_game();
        start_mission(&mut game, &mut presenter);
        collect_everything(&mut game, &mut presenter);
        send(&mut game, &mut presenter, InputEvent::OpenPuzzle);
        fill_timeline(&mut game, &mut presenter, order);
        let before = game.state().clone();
        assert_eq!(
            send(&mut game, &mut presenter, InputEvent::PuzzleChecked),
            Outcome::PuzzleChecked(PuzzleVerdict::Wrong)
        );
        assert_eq!(game.state(), &before);
        assert!(presenter.requests().iter().any(|req| matches!(
            req,
            RenderRequest::Notice { text } if text.starts_with("Not quite right")
        )));
        assert_eq!(game.navigator().current_scene(), SceneId::Puzzle);
    }
}

#[test]
fn restart_resets_attempt_and_cancels_pending_dismiss() {
    let (mut game, mut presenter) = new_game();
    start_mission(&mut game, &mut presenter);
    send(&mut game, &mut presenter, InputEvent::VisitLocation(LocationId::Coop));
    send(&mut game, &mut presenter, InputEvent::InspectLocation(LocationId::Coop));
    send(&mut game, &mut presenter, InputEvent::DialogueDismissed);
    send(&mut game, &mut presenter, InputEvent::CluePanelDismissed);
    place_quiz(&mut game, &mut presenter, &[0, 1]);
    send(&mut game, &mut presenter, InputEvent::QuizSubmitted);
    send(
        &mut game,
        &mut presenter,
        InputEvent::TimelinePlace(PlacementInput::Tap {
            token: ClueId::Chickens,
        }),
    );

    send(&mut game, &mut presenter, InputEvent::StartMission);
    let mission = &game.state().mission1;
    assert_eq!(mission.clues_collected(), 0);
    assert!(mission.visited_locations.is_empty());
    assert!(!mission.completed);
    assert_eq!(mission.score, 0);
    assert_eq!(game.timeline().filled_count(), 0);
    assert_eq!(game.modals().open_ids().count(), 0);

    presenter.clear();
    game.advance(5_000, &mut presenter);
    assert!(!presenter.contains(&RenderRequest::QuizFeedbackHidden));
    assert_eq!(game.navigator().current_scene(), SceneId::Intro);
    assert_eq!(game.scheduler().pending_len(), 0);
}

#[test]
fn soft_gate_lets_player_into_puzzle_early() {
    let (mut game, mut presenter) = new_game();
    start_mission(&mut game, &mut presenter);
    assert!(presenter.contains(&RenderRequest::CluesFound {
        count: 0,
        puzzle_available: false,
    }));
    assert_eq!(
        send(&mut game, &mut presenter, InputEvent::OpenPuzzle),
        Outcome::Applied
    );
    assert_eq!(game.navigator().current_scene(), SceneId::Puzzle);
}

#[test]
fn hard_gate_refuses_puzzle_until_all_clues() {
    let (mut game, mut presenter) = hard_gate_game();
    start_mission(&mut game, &mut presenter);
    assert_eq!(
        send(&mut game, &mut presenter, InputEvent::OpenPuzzle),
        Outcome::Ignored(IgnoreReason::PuzzleLocked)
    );
    assert_eq!(
        send(
            &mut game,
            &mut presenter,
            InputEvent::BackToScene(SceneId::Puzzle)
        ),
        Outcome::Ignored(IgnoreReason::PuzzleLocked)
    );
    collect_everything(&mut game, &mut presenter);
    assert_eq!(
        send(&mut game, &mut presenter, InputEvent::OpenPuzzle),
        Outcome::Applied
    );
}

#[test]
fn replay_banks_second_mission_score() {
    let (mut game, mut presenter) = new_game();
    for _ in 0..2 {
        start_mission(&mut game, &mut presenter);
        collect_everything(&mut game, &mut presenter);
        send(&mut game, &mut presenter, InputEvent::OpenPuzzle);
        fill_timeline(
            &mut game,
            &mut presenter,
            [ClueId::Chickens, ClueId::Ventilation, ClueId::Medicine],
        );
        send(&mut game, &mut presenter, InputEvent::PuzzleChecked);
    }
    assert_eq!(game.state().total_score, 190);
    assert_eq!(game.state().badges.earned_count(), 3);
}

#[test]
fn badge_board_refreshes_on_screen_entry() {
    let (mut game, mut presenter) = new_game();
    send(&mut game, &mut presenter, InputEvent::ViewBadges);
    assert_eq!(game.navigator().current_screen(), ScreenId::Badges);
    let board = presenter
        .last_matching(|req| matches!(req, RenderRequest::BadgeBoard(_)))
        .cloned();
    let Some(RenderRequest::BadgeBoard(view)) = board else {
        panic!("badge board not rendered");
    };
    assert_eq!(view.entries.len(), 9);
    assert_eq!(view.earned, 0);
    assert!(view.progress_pct.abs() < f32::EPSILON);
}
