use anyhow::Result;

use crate::assets::TesterAssets;
use crate::driver::Driver;

pub mod mission;
pub mod puzzles;
pub mod random_play;
pub mod smoke;

pub type ScenarioFn = fn(&ScenarioCtx<'_>) -> Result<()>;

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub assets: &'a TesterAssets,
    pub seed: u64,
    pub verbose: bool,
}

impl ScenarioCtx<'_> {
    /// Fresh game on the welcome screen, wrapped for scripted play.
    pub fn driver(&self) -> Driver {
        Driver::new(self.assets.new_game(), self.verbose)
    }
}

#[derive(Clone, Copy)]
pub struct Scenario {
    pub key: &'static str,
    pub description: &'static str,
    run: ScenarioFn,
}

impl Scenario {
    pub fn run(&self, ctx: &ScenarioCtx<'_>) -> Result<()> {
        (self.run)(ctx)
    }
}

const SCENARIOS: [Scenario; 8] = [
    Scenario {
        key: "smoke",
        description: "Welcome → intro → missions → badges screens",
        run: smoke::run,
    },
    Scenario {
        key: "full-mission",
        description: "Complete mission one and score 95",
        run: mission::full_mission,
    },
    Scenario {
        key: "quiz-grading",
        description: "Floor-and-cap quiz grading cases",
        run: puzzles::quiz_grading,
    },
    Scenario {
        key: "timeline-permutations",
        description: "All six timeline orders, only the canonical one solves",
        run: puzzles::timeline_permutations,
    },
    Scenario {
        key: "clue-chaining",
        description: "Per-clue followups and idempotent re-collection",
        run: mission::clue_chaining,
    },
    Scenario {
        key: "restart-cancels-timers",
        description: "Restarting the mission drops the pending quiz dismissal",
        run: mission::restart_cancels_timers,
    },
    Scenario {
        key: "hard-gate",
        description: "Hard puzzle gate refuses entry before all clues",
        run: mission::hard_gate,
    },
    Scenario {
        key: "random-play",
        description: "Seeded random input with invariants checked every step",
        run: random_play::run,
    },
];

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS
        .iter()
        .map(|scenario| (scenario.key, scenario.description))
        .collect()
}

pub fn scenario_keys() -> Vec<&'static str> {
    SCENARIOS.iter().map(|scenario| scenario.key).collect()
}

pub fn get_scenario(key: &str) -> Option<Scenario> {
    SCENARIOS
        .iter()
        .find(|scenario| scenario.key == key)
        .copied()
}
