use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::game::TaskStatus;

/// Progress of a single visitor task, as read from the Mercenaries village
///
/// `task_id` is the unique key. Fields this crate does not interpret are kept
/// in `extra` so a record survives a read/write cycle unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VisitorRecord {
    pub task_id: i32,
    #[serde(default)]
    pub visitor_id: i32,
    #[serde(default)]
    pub task_chain_progress: i32,
    #[serde(default)]
    pub task_progress: i32,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VisitorRecord {
    pub fn new(task_id: i32, status: TaskStatus) -> Self {
        Self {
            task_id,
            status,
            ..Default::default()
        }
    }

    /// Same record with its status replaced
    pub fn with_status(self, status: TaskStatus) -> Self {
        Self { status, ..self }
    }
}

/// Deserialize a list field that the memory plugin may send as `null`
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
