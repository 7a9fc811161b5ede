use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::game::VisitorRecord;
use crate::game::visitor::null_as_empty;

/// A mercenary entry of the collection snapshot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Mercenary {
    pub id: i32,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub experience: u32,
    #[serde(default)]
    pub owned: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Mercenaries collection snapshot as read from game memory
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MercenariesCollectionInfo {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mercenaries: Vec<Mercenary>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub visitors: Vec<VisitorRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MercenariesCollectionInfo {
    /// Whether the snapshot carries any mercenaries (an empty list means the game
    /// had not loaded the collection yet)
    pub fn has_mercenaries(&self) -> bool {
        !self.mercenaries.is_empty()
    }

    /// Snapshot with its visitor list replaced
    pub fn with_visitors(self, visitors: Vec<VisitorRecord>) -> Self {
        Self { visitors, ..self }
    }
}
