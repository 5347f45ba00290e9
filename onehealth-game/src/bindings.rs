//! Control id → input event table.
//!
//! The presentation layer reports "control X was activated, with optional
//! value V". Resolution happens once per activation through a table built on
//! first use; an id outside the table is a wiring mistake and surfaces as
//! [`GameError::UnknownControl`].

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::constants::{CONTROL_CHECK_QUIZ, CONTROL_CHECK_SOLUTION};
use crate::error::GameError;
use crate::events::InputEvent;
use crate::navigation::{SceneId, ScreenId};
use crate::state::{Language, LocationId};

type Binder = fn(Option<&str>) -> Result<InputEvent, GameError>;

fn required<'a>(control: &'static str, value: Option<&'a str>) -> Result<&'a str, GameError> {
    value
        .filter(|value| !value.is_empty())
        .ok_or(GameError::MissingValue { control })
}

fn language(control: &'static str, value: Option<&str>) -> Result<InputEvent, GameError> {
    let code = required(control, value)?;
    code.parse::<Language>()
        .map(InputEvent::LanguageChanged)
        .map_err(|()| GameError::unknown("language", code))
}

fn table() -> &'static HashMap<&'static str, Binder> {
    static TABLE: OnceLock<HashMap<&'static str, Binder>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let entries: [(&'static str, Binder); 28] = [
            ("start-game", |_| Ok(InputEvent::StartGame)),
            ("settings-btn", |_| Ok(InputEvent::OpenSettings)),
            ("settings-close", |_| Ok(InputEvent::CloseSettings)),
            ("language", |value| language("language", value)),
            ("settings-language", |value| {
                language("settings-language", value)
            }),
            ("sound-toggle", |value| {
                let state = required("sound-toggle", value)?;
                state
                    .parse::<bool>()
                    .map(InputEvent::SoundToggled)
                    .map_err(|_| GameError::unknown("checkbox state", state))
            }),
            ("ready-btn", |_| Ok(InputEvent::Ready)),
            ("tell-more-btn", |_| Ok(InputEvent::TellMore)),
            ("got-it-btn", |_| Ok(InputEvent::GotIt)),
            ("mission-1", |_| Ok(InputEvent::StartMission)),
            ("view-badges-btn", |_| Ok(InputEvent::ViewBadges)),
            ("view-all-badges", |_| Ok(InputEvent::ViewBadges)),
            ("back-to-missions", |_| Ok(InputEvent::BackToMissions)),
            ("back-to-missions-final", |_| Ok(InputEvent::BackToMissions)),
            ("back-btn-top", |value| {
                let id = required("back-btn-top", value)?;
                id.parse::<ScreenId>()
                    .map(InputEvent::BackToScreen)
                    .map_err(|()| GameError::unknown("screen", id))
            }),
            ("back-btn-scene", |value| {
                let id = required("back-btn-scene", value)?;
                id.parse::<SceneId>()
                    .map(InputEvent::BackToScene)
                    .map_err(|()| GameError::unknown("scene", id))
            }),
            ("start-investigation", |_| Ok(InputEvent::StartInvestigation)),
            ("location", |value| {
                let id = required("location", value)?;
                id.parse::<LocationId>()
                    .map(InputEvent::VisitLocation)
                    .map_err(|()| GameError::unknown("location", id))
            }),
            ("clickable-chicken", |_| {
                Ok(InputEvent::InspectLocation(LocationId::Coop))
            }),
            ("clickable-medicine", |_| {
                Ok(InputEvent::InspectLocation(LocationId::House))
            }),
            ("clickable-corner", |_| {
                Ok(InputEvent::InspectLocation(LocationId::Shed))
            }),
            ("back-to-map", |_| Ok(InputEvent::BackToMap)),
            ("solve-puzzle-btn", |_| Ok(InputEvent::OpenPuzzle)),
            (CONTROL_CHECK_SOLUTION, |_| Ok(InputEvent::PuzzleChecked)),
            ("dialogue-close", |_| Ok(InputEvent::DialogueDismissed)),
            ("clue-continue", |_| Ok(InputEvent::CluePanelDismissed)),
            ("info-continue", |_| Ok(InputEvent::InfoDismissed)),
            (CONTROL_CHECK_QUIZ, |_| Ok(InputEvent::QuizSubmitted)),
        ];
        entries.into_iter().collect()
    })
}

/// Resolve an activated control into an input event.
///
/// # Errors
///
/// Returns [`GameError::UnknownControl`] for an id with no binding,
/// [`GameError::MissingValue`] when a valued control arrives without one, and
/// [`GameError::UnknownId`] when the value names nothing.
pub fn resolve(control: &str, value: Option<&str>) -> Result<InputEvent, GameError> {
    let binder = table()
        .get(control)
        .ok_or_else(|| GameError::UnknownControl(control.to_string()))?;
    binder(value)
}

/// Every bound control id, sorted.
#[must_use]
pub fn controls() -> Vec<&'static str> {
    let mut ids: Vec<&'static str> = table().keys().copied().collect();
    ids.sort_unstable();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_controls_resolve() {
        assert_eq!(resolve("start-game", None).unwrap(), InputEvent::StartGame);
        assert_eq!(
            resolve("clickable-corner", None).unwrap(),
            InputEvent::InspectLocation(LocationId::Shed)
        );
        assert_eq!(
            resolve("check-quiz", None).unwrap(),
            InputEvent::QuizSubmitted
        );
        assert_eq!(
            resolve("back-to-missions-final", None).unwrap(),
            InputEvent::BackToMissions
        );
        assert_eq!(controls().len(), 28);
    }

    #[test]
    fn valued_controls_parse_their_value() {
        assert_eq!(
            resolve("back-btn-scene", Some("scene-map")).unwrap(),
            InputEvent::BackToScene(SceneId::Map)
        );
        assert_eq!(
            resolve("back-btn-top", Some("intro-screen")).unwrap(),
            InputEvent::BackToScreen(ScreenId::Intro)
        );
        assert_eq!(
            resolve("location", Some("house")).unwrap(),
            InputEvent::VisitLocation(LocationId::House)
        );
        assert_eq!(
            resolve("settings-language", Some("es")).unwrap(),
            InputEvent::LanguageChanged(Language::Es)
        );
        assert_eq!(
            resolve("sound-toggle", Some("false")).unwrap(),
            InputEvent::SoundToggled(false)
        );
    }

    #[test]
    fn wiring_mistakes_are_errors() {
        assert!(matches!(
            resolve("reset-btn", None),
            Err(GameError::UnknownControl(id)) if id == "reset-btn"
        ));
        assert!(matches!(
            resolve("location", None),
            Err(GameError::MissingValue { control: "location" })
        ));
        assert!(matches!(
            resolve("back-btn-scene", Some("scene-attic")),
            Err(GameError::UnknownId { kind: "scene", .. })
        ));
        assert!(resolve("language", Some("de")).is_err());
        assert!(resolve("sound-toggle", Some("loud")).is_err());
    }
}
