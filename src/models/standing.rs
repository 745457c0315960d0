//! Ranked queue standings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Ranked queue surfaced in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueKind {
    Solo,
    Flex,
}

impl QueueKind {
    /// Map the service's queue-type string. Unknown queues yield `None`.
    pub fn from_queue_type(queue_type: &str) -> Option<Self> {
        match queue_type {
            "RANKED_SOLO_5x5" => Some(QueueKind::Solo),
            "RANKED_FLEX_SR" => Some(QueueKind::Flex),
            _ => None,
        }
    }

    /// Label used in the rank comparison section.
    pub fn label(&self) -> &'static str {
        match self {
            QueueKind::Solo => "Solo/Duo",
            QueueKind::Flex => "Flex",
        }
    }
}

/// A player's standing in one ranked queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedStanding {
    /// Tier as returned by the service, e.g. `GOLD`
    pub tier: String,

    /// Division within the tier, e.g. `II`
    pub division: String,

    pub league_points: u32,
    pub wins: u32,
    pub losses: u32,
}

/// Standings keyed by queue. A missing queue means unranked there.
///
/// An empty mapping is also what a failed standing lookup produces; the two
/// cases are rendered identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Standings(BTreeMap<QueueKind, RankedStanding>);

impl Standings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, queue: QueueKind, standing: RankedStanding) {
        self.0.insert(queue, standing);
    }

    pub fn get(&self, queue: QueueKind) -> Option<&RankedStanding> {
        self.0.get(&queue)
    }

    pub fn contains(&self, queue: QueueKind) -> bool {
        self.0.contains_key(&queue)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gold() -> RankedStanding {
        RankedStanding {
            tier: "GOLD".to_string(),
            division: "II".to_string(),
            league_points: 45,
            wins: 30,
            losses: 25,
        }
    }

    #[test]
    fn test_queue_kind_from_queue_type() {
        assert_eq!(
            QueueKind::from_queue_type("RANKED_SOLO_5x5"),
            Some(QueueKind::Solo)
        );
        assert_eq!(
            QueueKind::from_queue_type("RANKED_FLEX_SR"),
            Some(QueueKind::Flex)
        );
        assert_eq!(QueueKind::from_queue_type("CHERRY"), None);
        assert_eq!(QueueKind::from_queue_type("ranked_solo_5x5"), None);
    }

    #[test]
    fn test_standings_absent_queue() {
        let mut standings = Standings::new();
        standings.insert(QueueKind::Flex, gold());

        assert!(standings.contains(QueueKind::Flex));
        assert!(!standings.contains(QueueKind::Solo));
        assert!(standings.get(QueueKind::Solo).is_none());
        assert_eq!(standings.len(), 1);
    }

    #[test]
    fn test_standings_serialize_by_queue_name() {
        let mut standings = Standings::new();
        standings.insert(QueueKind::Solo, gold());

        let json = serde_json::to_value(&standings).unwrap();
        assert_eq!(json["solo"]["tier"], "GOLD");
        assert_eq!(json["solo"]["leaguePoints"], 45);
        assert!(json.get("flex").is_none());
    }
}
