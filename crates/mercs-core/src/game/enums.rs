use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, FromRepr, IntoStaticStr};

use crate::error::Error;

/// Lifecycle status of a visitor task.
///
/// Serialized as the game's numeric value. The derived ordering follows the
/// lifecycle, so a status never compares lower than the one it came from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    FromRepr,
    IntoStaticStr,
    Display,
)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum TaskStatus {
    #[default]
    #[strum(serialize = "INVALID")]
    Invalid = 0,
    #[strum(serialize = "NEW")]
    NotStarted = 1,
    #[strum(serialize = "ACTIVE")]
    InProgress = 2,
    #[strum(serialize = "COMPLETE")]
    Complete = 3,
    #[strum(serialize = "CLAIMED")]
    Claimed = 4,
}

impl TaskStatus {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }

    /// Whether the task objective has been reached (rewards may or may not be collected yet)
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Complete | Self::Claimed)
    }

    /// Whether moving from `self` to `next` follows the task lifecycle
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        next >= *self
    }
}

impl TryFrom<u8> for TaskStatus {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_repr(value).ok_or(Error::InvalidTaskStatus(value))
    }
}

impl From<TaskStatus> for u8 {
    fn from(status: TaskStatus) -> Self {
        status as u8
    }
}

/// Game scene, as reported by the memory plugin on every scene change.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    FromRepr,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(try_from = "u8", into = "u8")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[repr(u8)]
pub enum SceneMode {
    Invalid = 0,
    Startup = 1,
    Login = 2,
    Hub = 3,
    Gameplay = 4,
    #[strum(serialize = "COLLECTIONMANAGER")]
    CollectionManager = 5,
    #[strum(serialize = "PACKOPENING")]
    PackOpening = 6,
    Tournament = 7,
    Friendly = 8,
    FatalError = 9,
    Draft = 10,
    Credits = 11,
    Reset = 12,
    Adventure = 13,
    TavernBrawl = 14,
    FiresideGathering = 15,
    Bacon = 16,
    GameMode = 17,
    PvpDungeonRun = 18,
    BaconCollection = 19,
    LettuceVillage = 20,
    LettuceBountyBoard = 21,
    LettuceMap = 22,
    LettucePlay = 23,
    LettuceCollection = 24,
    LettuceCoop = 25,
    LettuceFriendly = 26,
    LettuceBountyTeamSelect = 27,
    LettucePackOpening = 28,
}

impl SceneMode {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }

    /// Parse a scene from either its numeric value or its name (e.g. "22" or "LETTUCE_MAP")
    pub fn parse(input: &str) -> Result<Self, Error> {
        let input = input.trim();
        if let Ok(value) = input.parse::<u8>() {
            return Self::from_repr(value).ok_or_else(|| Error::InvalidSceneMode(input.to_string()));
        }
        input
            .parse::<Self>()
            .map_err(|_| Error::InvalidSceneMode(input.to_string()))
    }
}

impl TryFrom<u8> for SceneMode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_repr(value).ok_or_else(|| Error::InvalidSceneMode(value.to_string()))
    }
}

impl From<SceneMode> for u8 {
    fn from(scene: SceneMode) -> Self {
        scene as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_from_u8() {
        assert_eq!(TaskStatus::from_u8(0), Some(TaskStatus::Invalid));
        assert_eq!(TaskStatus::from_u8(3), Some(TaskStatus::Complete));
        assert_eq!(TaskStatus::from_u8(4), Some(TaskStatus::Claimed));
        assert_eq!(TaskStatus::from_u8(5), None);
    }

    #[test]
    fn test_task_status_is_finished() {
        assert!(!TaskStatus::Invalid.is_finished());
        assert!(!TaskStatus::NotStarted.is_finished());
        assert!(!TaskStatus::InProgress.is_finished());
        assert!(TaskStatus::Complete.is_finished());
        assert!(TaskStatus::Claimed.is_finished());
    }

    #[test]
    fn test_task_status_transitions() {
        assert!(TaskStatus::NotStarted.can_transition_to(TaskStatus::InProgress));
        assert!(TaskStatus::InProgress.can_transition_to(TaskStatus::Complete));
        assert!(TaskStatus::Complete.can_transition_to(TaskStatus::Claimed));
        assert!(TaskStatus::Complete.can_transition_to(TaskStatus::Complete));
        assert!(!TaskStatus::Claimed.can_transition_to(TaskStatus::InProgress));
        assert!(!TaskStatus::Complete.can_transition_to(TaskStatus::NotStarted));
    }

    #[test]
    fn test_task_status_serializes_as_number() {
        assert_eq!(serde_json::to_string(&TaskStatus::Claimed).unwrap(), "4");
        let status: TaskStatus = serde_json::from_str("2").unwrap();
        assert_eq!(status, TaskStatus::InProgress);
        assert!(serde_json::from_str::<TaskStatus>("7").is_err());
    }

    #[test]
    fn test_task_status_display() {
        assert_eq!(TaskStatus::NotStarted.to_string(), "NEW");
        assert_eq!(TaskStatus::Claimed.short_name(), "CLAIMED");
    }

    #[test]
    fn test_scene_mode_parse() {
        assert_eq!(SceneMode::parse("22").unwrap(), SceneMode::LettuceMap);
        assert_eq!(SceneMode::parse("LETTUCE_MAP").unwrap(), SceneMode::LettuceMap);
        assert_eq!(SceneMode::parse(" gameplay\n").unwrap(), SceneMode::Gameplay);
        assert_eq!(
            SceneMode::parse("COLLECTIONMANAGER").unwrap(),
            SceneMode::CollectionManager
        );
        assert!(SceneMode::parse("99").is_err());
        assert!(SceneMode::parse("NOT_A_SCENE").is_err());
    }

    #[test]
    fn test_scene_mode_display() {
        assert_eq!(SceneMode::LettuceBountyTeamSelect.to_string(), "LETTUCE_BOUNTY_TEAM_SELECT");
        assert_eq!(SceneMode::Hub.short_name(), "HUB");
    }
}
