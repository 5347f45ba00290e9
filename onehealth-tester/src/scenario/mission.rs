use anyhow::{Result, ensure};

use onehealth_game::{
    BadgeId, CANONICAL_ORDER, IgnoreReason, InputEvent, LocationId, ModalId, Outcome,
    PlacementInput, PuzzleGate, QuizTokenId, RenderRequest, SceneId,
};

use super::ScenarioCtx;
use crate::driver::Driver;

pub fn full_mission(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let mut driver = ctx.driver();
    driver.activate("start-game", None)?;
    driver.activate("ready-btn", None)?;
    driver.activate("mission-1", None)?;
    driver.advance(ctx.assets.config.mission_intro_delay_ms)?;
    driver.activate("start-investigation", None)?;
    driver.collect_all_clues()?;

    ensure!(
        driver.presenter().contains(&RenderRequest::CluesFound {
            count: 3,
            puzzle_available: true,
        }),
        "puzzle entry should be offered after the third clue"
    );
    driver.activate("solve-puzzle-btn", None)?;
    driver.arrange_timeline(CANONICAL_ORDER)?;
    let outcome = driver.activate("check-solution", None)?;
    ensure!(
        matches!(outcome, Outcome::PuzzleChecked(_)),
        "check returned {outcome:?}"
    );

    let state = driver.game().state();
    ensure!(state.mission1.completed, "mission should be complete");
    ensure!(
        state.mission1.score == 95,
        "mission score {} != 95",
        state.mission1.score
    );
    ensure!(state.total_score == 95);
    for badge in BadgeId::MISSION_ONE {
        ensure!(state.badges.is_earned(badge), "badge {badge} missing");
    }
    ensure!(driver.game().navigator().current_scene() == SceneId::Completion);
    ensure!(driver.presenter().contains(&RenderRequest::MissionScore(95)));

    let again = driver.activate("check-solution", None)?;
    ensure!(
        again == Outcome::Ignored(IgnoreReason::AlreadyCompleted),
        "second check returned {again:?}"
    );
    ensure!(driver.game().state().total_score == 95);

    driver.activate("back-to-missions-final", None)?;
    ensure!(driver.presenter().contains(&RenderRequest::MissionList {
        mission1_completed: true
    }));
    Ok(())
}

fn open_clue(driver: &mut Driver, location: LocationId) -> Result<()> {
    driver.send(InputEvent::InspectLocation(location))?;
    driver.send(InputEvent::DialogueDismissed)?;
    driver.send(InputEvent::CluePanelDismissed)?;
    Ok(())
}

pub fn clue_chaining(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let mut driver = ctx.driver();
    driver.begin_mission()?;

    open_clue(&mut driver, LocationId::Coop)?;
    ensure!(
        driver.game().modals().is_open(ModalId::Quiz),
        "chickens clue should open the quiz"
    );
    driver.answer_quiz(&[0, 1])?;

    open_clue(&mut driver, LocationId::House)?;
    ensure!(
        driver.game().modals().is_open(ModalId::Info),
        "medicine clue should open the info panel"
    );
    driver.send(InputEvent::InfoDismissed)?;

    driver.send(InputEvent::VisitLocation(LocationId::Shed))?;
    open_clue(&mut driver, LocationId::Shed)?;
    ensure!(
        driver.game().navigator().current_scene() == SceneId::Map,
        "ventilation clue should return to the map"
    );

    let before = driver.game().state().clone();
    driver.clear_requests();
    driver.send(InputEvent::InspectLocation(LocationId::Shed))?;
    driver.send(InputEvent::DialogueDismissed)?;
    ensure!(driver.game().state() == &before, "re-collecting changed state");
    ensure!(
        !driver.game().modals().is_open(ModalId::Clue),
        "re-collecting should not reveal the clue again"
    );
    ensure!(
        !driver
            .presenter()
            .requests()
            .iter()
            .any(|req| matches!(req, RenderRequest::ClueReveal { .. })),
        "re-collecting rendered a reveal"
    );
    Ok(())
}

pub fn restart_cancels_timers(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let mut driver = ctx.driver();
    driver.begin_mission()?;
    open_clue(&mut driver, LocationId::Coop)?;
    for token in [0, 1] {
        driver.send(InputEvent::QuizPlace(PlacementInput::Tap {
            token: QuizTokenId(token),
        }))?;
    }
    driver.send(InputEvent::QuizSubmitted)?;
    ensure!(driver.game().scheduler().pending_len() > 0);

    driver.send(InputEvent::StartMission)?;
    let mission = &driver.game().state().mission1;
    ensure!(mission.clues_collected() == 0 && mission.score == 0);
    ensure!(mission.visited_locations.is_empty() && !mission.completed);
    ensure!(driver.game().timeline().filled_count() == 0);

    driver.clear_requests();
    driver.advance(ctx.assets.config.quiz_feedback_delay_ms * 2)?;
    ensure!(
        !driver
            .presenter()
            .contains(&RenderRequest::QuizFeedbackHidden),
        "stale quiz dismissal fired after restart"
    );
    ensure!(driver.game().navigator().current_scene() == SceneId::Intro);
    Ok(())
}

pub fn hard_gate(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let config = ctx.assets.config.clone().with_puzzle_gate(PuzzleGate::Hard);
    let mut driver = Driver::new(ctx.assets.new_game_with(config), ctx.verbose);
    driver.begin_mission()?;

    let outcome = driver.send(InputEvent::OpenPuzzle)?;
    ensure!(
        outcome == Outcome::Ignored(IgnoreReason::PuzzleLocked),
        "puzzle opened early: {outcome:?}"
    );
    ensure!(driver.game().navigator().current_scene() == SceneId::Map);

    driver.collect_all_clues()?;
    let outcome = driver.send(InputEvent::OpenPuzzle)?;
    ensure!(outcome == Outcome::Applied, "puzzle stayed locked: {outcome:?}");
    ensure!(driver.game().navigator().current_scene() == SceneId::Puzzle);
    Ok(())
}
