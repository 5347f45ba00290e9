use anyhow::{Result, ensure};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use onehealth_game::{
    ClueId, GameState, InputEvent, Language, LocationId, PlacementInput, QuizArea, QuizTokenId,
    SceneId, ScreenId, TimelineSlot,
};

use super::ScenarioCtx;

const STEPS: usize = 200;
// One past the quiz pool so unknown tokens get exercised too.
const TOKEN_RANGE: usize = 7;

fn pick<T: Copy>(rng: &mut ChaCha20Rng, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

fn random_event(rng: &mut ChaCha20Rng) -> InputEvent {
    match rng.gen_range(0..25) {
        0 => InputEvent::StartGame,
        1 => InputEvent::OpenSettings,
        2 => InputEvent::CloseSettings,
        3 => InputEvent::LanguageChanged(pick(rng, Language::ALL)),
        4 => InputEvent::SoundToggled(rng.gen_bool(0.5)),
        5 => InputEvent::Ready,
        6 => InputEvent::TellMore,
        7 => InputEvent::GotIt,
        8 => InputEvent::StartMission,
        9 => InputEvent::ViewBadges,
        10 => InputEvent::BackToMissions,
        11 => InputEvent::BackToScreen(pick(rng, &ScreenId::ALL)),
        12 => InputEvent::BackToScene(pick(rng, &SceneId::ALL)),
        13 => InputEvent::StartInvestigation,
        14 => InputEvent::VisitLocation(pick(rng, &LocationId::ALL)),
        15 => InputEvent::InspectLocation(pick(rng, &LocationId::ALL)),
        16 => InputEvent::DialogueDismissed,
        17 => InputEvent::CluePanelDismissed,
        18 => InputEvent::InfoDismissed,
        19 => {
            let token = QuizTokenId(rng.gen_range(0..TOKEN_RANGE));
            if rng.gen_bool(0.5) {
                InputEvent::QuizPlace(PlacementInput::Tap { token })
            } else {
                InputEvent::QuizPlace(PlacementInput::Drag {
                    token,
                    target: QuizArea,
                })
            }
        }
        20 => InputEvent::QuizSubmitted,
        21 => InputEvent::OpenPuzzle,
        22 => {
            let token = pick(rng, &ClueId::ALL);
            if rng.gen_bool(0.5) {
                InputEvent::TimelinePlace(PlacementInput::Tap { token })
            } else {
                InputEvent::TimelinePlace(PlacementInput::Drag {
                    token,
                    target: pick(rng, &TimelineSlot::ALL),
                })
            }
        }
        23 => InputEvent::PuzzleChecked,
        _ => InputEvent::BackToMap,
    }
}

fn play(ctx: &ScenarioCtx<'_>) -> Result<(GameState, usize)> {
    let mut rng = ChaCha20Rng::seed_from_u64(ctx.seed);
    let mut driver = ctx.driver();
    let mut ignored = 0;
    for _ in 0..STEPS {
        if rng.gen_bool(0.15) {
            driver.advance(rng.gen_range(0..4_000))?;
            continue;
        }
        if driver.send(random_event(&mut rng))?.is_ignored() {
            ignored += 1;
        }
    }
    log::debug!(
        "seed {}: {} event(s) sent, {ignored} ignored",
        ctx.seed,
        driver.steps()
    );
    Ok((driver.game().state().clone(), ignored))
}

/// Random input never breaks an invariant, and a seed always replays the same way.
pub fn run(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let (first, ignored) = play(ctx)?;
    let (second, _) = play(ctx)?;
    ensure!(first == second, "seed {} did not replay deterministically", ctx.seed);
    if ctx.verbose {
        println!(
            "     seed {}: {ignored} ignored event(s), score {}, total {}",
            ctx.seed, first.mission1.score, first.total_score
        );
    }
    Ok(())
}
