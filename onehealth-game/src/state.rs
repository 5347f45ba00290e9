use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::constants::{BADGE_COUNT, CLUE_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
}

impl Language {
    pub const ALL: &'static [Self] = &[Self::En, Self::Es, Self::Fr];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            "fr" => Ok(Self::Fr),
            _ => Err(()),
        }
    }
}

/// The three facts the player can uncover on the farm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClueId {
    Chickens,
    Medicine,
    Ventilation,
}

impl ClueId {
    pub const ALL: [Self; CLUE_COUNT] = [Self::Chickens, Self::Medicine, Self::Ventilation];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chickens => "chickens",
            Self::Medicine => "medicine",
            Self::Ventilation => "ventilation",
        }
    }
}

impl fmt::Display for ClueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClueId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chickens" => Ok(Self::Chickens),
            "medicine" => Ok(Self::Medicine),
            "ventilation" => Ok(Self::Ventilation),
            _ => Err(()),
        }
    }
}

/// Places on the farm map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationId {
    Coop,
    House,
    Shed,
}

impl LocationId {
    pub const ALL: [Self; 3] = [Self::Coop, Self::House, Self::Shed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coop => "coop",
            Self::House => "house",
            Self::Shed => "shed",
        }
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coop" => Ok(Self::Coop),
            "house" => Ok(Self::House),
            "shed" => Ok(Self::Shed),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BadgeId {
    OutbreakDetective,
    AntibioticGuardian,
    AnimalAlly,
    WaterProtector,
    DiseaseTracker,
    CommunityHero,
    EnvironmentGuardian,
    OneHealthChampion,
    GlobalProtector,
}

impl BadgeId {
    pub const ALL: [Self; BADGE_COUNT] = [
        Self::OutbreakDetective,
        Self::AntibioticGuardian,
        Self::AnimalAlly,
        Self::WaterProtector,
        Self::DiseaseTracker,
        Self::CommunityHero,
        Self::EnvironmentGuardian,
        Self::OneHealthChampion,
        Self::GlobalProtector,
    ];

    /// Badges handed out when mission one is completed.
    pub const MISSION_ONE: [Self; 3] = [
        Self::OutbreakDetective,
        Self::AntibioticGuardian,
        Self::AnimalAlly,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::OutbreakDetective => "outbreakDetective",
            Self::AntibioticGuardian => "antibioticGuardian",
            Self::AnimalAlly => "animalAlly",
            Self::WaterProtector => "waterProtector",
            Self::DiseaseTracker => "diseaseTracker",
            Self::CommunityHero => "communityHero",
            Self::EnvironmentGuardian => "environmentGuardian",
            Self::OneHealthChampion => "oneHealthChampion",
            Self::GlobalProtector => "globalProtector",
        }
    }
}

impl fmt::Display for BadgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for BadgeId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|id| id.key() == s).ok_or(())
    }
}

/// Earned flags for every catalog badge. There is no way to revoke a badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badges(BTreeMap<BadgeId, bool>);

impl Default for Badges {
    fn default() -> Self {
        Self(BadgeId::ALL.into_iter().map(|id| (id, false)).collect())
    }
}

impl Badges {
    /// Mark a badge as earned. Returns `true` when it was not earned before.
    pub fn earn(&mut self, id: BadgeId) -> bool {
        let slot = self.0.entry(id).or_insert(false);
        let newly = !*slot;
        *slot = true;
        newly
    }

    #[must_use]
    pub fn is_earned(&self, id: BadgeId) -> bool {
        self.0.get(&id).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn earned_count(&self) -> usize {
        self.0.values().filter(|earned| **earned).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BadgeId, bool)> + '_ {
        self.0.iter().map(|(id, earned)| (*id, *earned))
    }
}

/// Progress through a single attempt of mission one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MissionProgress {
    /// Clues in the order they were collected; never holds duplicates.
    #[serde(default)]
    pub collected: SmallVec<[ClueId; CLUE_COUNT]>,
    #[serde(default)]
    pub visited_locations: SmallVec<[LocationId; 3]>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub score: u32,
}

impl MissionProgress {
    #[must_use]
    pub fn clues_collected(&self) -> usize {
        self.collected.len()
    }

    #[must_use]
    pub fn has_clue(&self, clue: ClueId) -> bool {
        self.collected.contains(&clue)
    }

    #[must_use]
    pub fn all_clues_found(&self) -> bool {
        self.clues_collected() >= CLUE_COUNT
    }

    /// Record a clue. Returns `false` when it was already collected.
    pub fn record_clue(&mut self, clue: ClueId) -> bool {
        if self.has_clue(clue) {
            return false;
        }
        self.collected.push(clue);
        true
    }

    /// Record a location visit. Returns `false` for a repeat visit.
    pub fn record_visit(&mut self, location: LocationId) -> bool {
        if self.visited_locations.contains(&location) {
            return false;
        }
        self.visited_locations.push(location);
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GameState {
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub total_score: u32,
    #[serde(default)]
    pub mission1: MissionProgress,
    #[serde(default)]
    pub badges: Badges,
    #[serde(default)]
    pub settings: Settings,
}

impl GameState {
    /// Throw away the current attempt. Score and badges from earlier attempts stay.
    pub fn reset_mission(&mut self) {
        self.mission1 = MissionProgress::default();
    }
}
