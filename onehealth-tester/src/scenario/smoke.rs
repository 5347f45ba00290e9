use anyhow::{Result, ensure};

use onehealth_game::{RenderRequest, ScreenId};

use super::ScenarioCtx;

pub fn run(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let mut driver = ctx.driver();
    ensure!(
        driver.game().navigator().current_screen() == ScreenId::Welcome,
        "game should open on the welcome screen"
    );

    driver.activate("start-game", None)?;
    ensure!(driver.game().navigator().current_screen() == ScreenId::Intro);

    driver.activate("tell-more-btn", None)?;
    driver.activate("got-it-btn", None)?;
    ensure!(
        driver.game().modals().open_ids().count() == 0,
        "explainer should close"
    );

    driver.activate("ready-btn", None)?;
    ensure!(driver.game().navigator().current_screen() == ScreenId::Missions);
    ensure!(
        driver.presenter().contains(&RenderRequest::MissionList {
            mission1_completed: false
        }),
        "missions screen should refresh the mission list"
    );

    driver.activate("view-badges-btn", None)?;
    ensure!(driver.game().navigator().current_screen() == ScreenId::Badges);
    let board = driver
        .presenter()
        .last_matching(|req| matches!(req, RenderRequest::BadgeBoard(_)));
    let Some(RenderRequest::BadgeBoard(view)) = board else {
        anyhow::bail!("badge board not rendered");
    };
    ensure!(view.entries.len() == 9 && view.earned == 0, "badge board should list 9 locked badges");

    driver.activate("back-btn-top", Some("welcome-screen"))?;
    ensure!(driver.game().navigator().current_screen() == ScreenId::Welcome);
    Ok(())
}
