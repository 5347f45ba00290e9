//! Screen and scene pointers plus the transition side effects.
//!
//! Transitions never fail: every id is typed, and string ids are resolved
//! (and rejected) at the binding layer before they reach this module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::presenter::{Presenter, RenderRequest, ScrollTarget};
use crate::scheduler::{DeferredAction, Scheduler, TaskScope};
use crate::state::LocationId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ScreenId {
    #[default]
    #[serde(rename = "welcome-screen")]
    Welcome,
    #[serde(rename = "intro-screen")]
    Intro,
    #[serde(rename = "missions-screen")]
    Missions,
    #[serde(rename = "badges-screen")]
    Badges,
    #[serde(rename = "game-screen")]
    Game,
}

impl ScreenId {
    pub const ALL: [Self; 5] = [
        Self::Welcome,
        Self::Intro,
        Self::Missions,
        Self::Badges,
        Self::Game,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Welcome => "welcome-screen",
            Self::Intro => "intro-screen",
            Self::Missions => "missions-screen",
            Self::Badges => "badges-screen",
            Self::Game => "game-screen",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|id| id.as_str() == s).ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SceneId {
    #[default]
    #[serde(rename = "scene-intro")]
    Intro,
    #[serde(rename = "scene-map")]
    Map,
    #[serde(rename = "location-coop")]
    Coop,
    #[serde(rename = "location-house")]
    House,
    #[serde(rename = "location-shed")]
    Shed,
    #[serde(rename = "scene-puzzle")]
    Puzzle,
    #[serde(rename = "scene-completion")]
    Completion,
}

impl SceneId {
    pub const ALL: [Self; 7] = [
        Self::Intro,
        Self::Map,
        Self::Coop,
        Self::House,
        Self::Shed,
        Self::Puzzle,
        Self::Completion,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Intro => "scene-intro",
            Self::Map => "scene-map",
            Self::Coop => "location-coop",
            Self::House => "location-house",
            Self::Shed => "location-shed",
            Self::Puzzle => "scene-puzzle",
            Self::Completion => "scene-completion",
        }
    }

    #[must_use]
    pub const fn for_location(location: LocationId) -> Self {
        match location {
            LocationId::Coop => Self::Coop,
            LocationId::House => Self::House,
            LocationId::Shed => Self::Shed,
        }
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SceneId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|id| id.as_str() == s).ok_or(())
    }
}

/// Which screen refresh the caller owes the presentation layer after a
/// screen change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenRefresh {
    None,
    MissionList,
    BadgeBoard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Navigator {
    screen: ScreenId,
    scene: SceneId,
}

impl Navigator {
    #[must_use]
    pub const fn current_screen(&self) -> ScreenId {
        self.screen
    }

    /// Current in-mission scene. Only meaningful while the game screen is active.
    #[must_use]
    pub const fn current_scene(&self) -> SceneId {
        self.scene
    }

    /// Activate `id`, scroll it into view, and report which refresh it needs.
    pub fn go_to_screen(&mut self, id: ScreenId, presenter: &mut dyn Presenter) -> ScreenRefresh {
        log::debug!("screen {} -> {}", self.screen, id);
        self.screen = id;
        presenter.render(RenderRequest::ShowScreen(id));
        presenter.render(RenderRequest::ScrollIntoView(ScrollTarget::Screen(id)));
        match id {
            ScreenId::Missions => ScreenRefresh::MissionList,
            ScreenId::Badges => ScreenRefresh::BadgeBoard,
            ScreenId::Welcome | ScreenId::Intro | ScreenId::Game => ScreenRefresh::None,
        }
    }

    /// Activate `id` and queue its scroll. A scroll still pending for the
    /// previous scene is dropped.
    pub fn go_to_scene(
        &mut self,
        id: SceneId,
        presenter: &mut dyn Presenter,
        scheduler: &mut Scheduler,
        scroll_delay_ms: u64,
    ) {
        log::debug!("scene {} -> {}", self.scene, id);
        self.scene = id;
        presenter.render(RenderRequest::ShowScene(id));
        scheduler.cancel_scope(TaskScope::SceneScroll);
        scheduler.schedule(
            scroll_delay_ms,
            TaskScope::SceneScroll,
            DeferredAction::ScrollToScene(id),
        );
    }
}
