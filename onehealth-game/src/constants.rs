//! Gameplay constants shared by the mission systems.

/// Points awarded the first time a clue is collected in an attempt.
pub const CLUE_POINTS: u32 = 5;
/// Points awarded for a correctly graded quiz submission.
pub const QUIZ_POINTS: u32 = 10;
/// Points awarded for solving the timeline puzzle.
pub const PUZZLE_POINTS: u32 = 20;
/// Bonus added on top of the puzzle points when the mission completes.
pub const MISSION_COMPLETION_BONUS: u32 = 50;

/// Number of clues hidden in mission one.
pub const CLUE_COUNT: usize = 3;
/// Number of badges in the catalog, reachable or not.
pub const BADGE_COUNT: usize = 9;
/// Number of slots on the timeline board.
pub const TIMELINE_SLOT_COUNT: usize = 3;

/// A quiz submission needs at least this many correct tokens placed.
pub const QUIZ_MIN_CORRECT: usize = 2;
/// A quiz submission may place at most this many tokens in total.
pub const QUIZ_MAX_PLACED: usize = 4;

pub const DEFAULT_SCENE_SCROLL_DELAY_MS: u64 = 100;
pub const DEFAULT_MISSION_INTRO_DELAY_MS: u64 = 300;
pub const DEFAULT_QUIZ_FEEDBACK_DELAY_MS: u64 = 3_000;

/// Control ids whose enabled state the core owns.
pub const CONTROL_CHECK_QUIZ: &str = "check-quiz";
pub const CONTROL_CHECK_SOLUTION: &str = "check-solution";

pub const CATALOG_ASSET: &str = "catalog";
pub const CONFIG_ASSET: &str = "config";
