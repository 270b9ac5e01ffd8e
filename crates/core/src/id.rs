//! Identifier for a single submission attempt.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Unique identifier minted once per submission attempt.
///
/// Attempt ids are UUID v7, so they sort by creation time and make log
/// lines from overlapping attempts easy to tell apart.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttemptId(Uuid);

impl AttemptId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AttemptId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for AttemptId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for AttemptId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<AttemptId> for Uuid {
    fn from(id: AttemptId) -> Self {
        id.0
    }
}

impl FromStr for AttemptId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s)
            .map(Self)
            .map_err(|_| CoreError::invalid_id(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique_and_time_ordered() {
        let a = AttemptId::new();
        let b = AttemptId::new();
        assert_ne!(a, b);
        assert!(a < b);
    }

    #[test]
    fn round_trips_through_display_and_from_str() {
        let id = AttemptId::new();
        let parsed: AttemptId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn rejects_garbage() {
        let err = "not-a-uuid".parse::<AttemptId>().unwrap_err();
        assert!(err.to_string().contains("invalid identifier"));
    }

    #[test]
    fn serializes_transparently() {
        let id = AttemptId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
