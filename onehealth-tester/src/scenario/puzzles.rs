use anyhow::{Result, ensure};

use onehealth_game::{
    CANONICAL_ORDER, ClueId, InputEvent, LocationId, Outcome, PuzzleVerdict, QuizVerdict,
};

use super::ScenarioCtx;

const QUIZ_CASES: [(&[usize], QuizVerdict); 4] = [
    (&[0, 1], QuizVerdict::Correct),
    (&[0, 1, 2, 3], QuizVerdict::Correct),
    (&[0, 1, 3, 4, 5], QuizVerdict::Incorrect),
    (&[2], QuizVerdict::Incorrect),
];

pub fn quiz_grading(ctx: &ScenarioCtx<'_>) -> Result<()> {
    for (tokens, expected) in QUIZ_CASES {
        let mut driver = ctx.driver();
        driver.begin_mission()?;
        driver.investigate(LocationId::Coop)?;
        let outcome = driver.answer_quiz(tokens)?;
        ensure!(
            outcome == Outcome::QuizGraded(expected),
            "tokens {tokens:?} graded {outcome:?}, expected {expected:?}"
        );
        let bonus = if expected == QuizVerdict::Correct { 10 } else { 0 };
        ensure!(driver.game().state().mission1.score == 5 + bonus);
        ensure!(
            driver.game().quiz().placed().is_empty(),
            "quiz area should clear after feedback"
        );
    }
    Ok(())
}

fn permutations() -> Vec<[ClueId; 3]> {
    let [a, b, c] = ClueId::ALL;
    vec![
        [a, b, c],
        [a, c, b],
        [b, a, c],
        [b, c, a],
        [c, a, b],
        [c, b, a],
    ]
}

pub fn timeline_permutations(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let mut solved = 0;
    for order in permutations() {
        let mut driver = ctx.driver();
        driver.begin_mission()?;
        driver.collect_all_clues()?;
        driver.send(InputEvent::OpenPuzzle)?;
        driver.arrange_timeline(order)?;
        let before = driver.game().state().clone();
        let outcome = driver.send(InputEvent::PuzzleChecked)?;
        if order == CANONICAL_ORDER {
            ensure!(outcome == Outcome::PuzzleChecked(PuzzleVerdict::Solved));
            ensure!(driver.game().state().total_score == 95);
            solved += 1;
        } else {
            ensure!(
                outcome == Outcome::PuzzleChecked(PuzzleVerdict::Wrong),
                "{order:?} should not solve"
            );
            ensure!(driver.game().state() == &before, "{order:?} mutated state");
        }
    }
    ensure!(solved == 1, "exactly one order should solve, got {solved}");
    Ok(())
}
