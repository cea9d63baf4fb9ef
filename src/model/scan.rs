//! Scan types: what the radar saw, and the request that carries it.

use serde::{Deserialize, Serialize};

/// A point on the plane, relative to the radar at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl Coordinates {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance from the radar.
    pub fn distance(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnemyKind {
    Soldier,
    Mech,
}

/// Enemy composition at a contact point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyInfo {
    #[serde(rename = "type")]
    pub kind: EnemyKind,

    #[serde(rename = "number")]
    pub count: u32,
}

/// One detected contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanEntry {
    pub coordinates: Coordinates,
    pub enemies: EnemyInfo,

    /// Friendly units at the contact. Absent and zero both mean none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allies: Option<u32>,
}

impl ScanEntry {
    pub fn is_mech(&self) -> bool {
        self.enemies.kind == EnemyKind::Mech
    }

    pub fn has_allies(&self) -> bool {
        self.allies.is_some_and(|n| n > 0)
    }
}

pub type Scan = Vec<ScanEntry>;

/// An incoming targeting request, as submitted by a caller.
///
/// Protocols stay as raw tokens here; they become a
/// [`ProtocolSet`](super::ProtocolSet) only through validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarRequest {
    pub protocols: Vec<String>,
    pub scan: Scan,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_shape() {
        let json = r#"{
            "protocols": ["avoid-mech", "closest-enemies"],
            "scan": [
                { "coordinates": { "x": 1, "y": -1 }, "enemies": { "type": "mech", "number": 10 } },
                { "coordinates": { "x": 30.5, "y": 30 }, "enemies": { "type": "soldier", "number": 5 }, "allies": 3 }
            ]
        }"#;

        let request: RadarRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.protocols, vec!["avoid-mech", "closest-enemies"]);
        assert_eq!(request.scan.len(), 2);
        assert!(request.scan[0].is_mech());
        assert_eq!(request.scan[0].allies, None);
        assert_eq!(request.scan[1].coordinates, Coordinates::new(30.5, 30.0));
        assert_eq!(request.scan[1].enemies.count, 5);
        assert!(request.scan[1].has_allies());
    }

    #[test]
    fn rejects_unknown_enemy_type() {
        let json = r#"{ "coordinates": { "x": 1, "y": 1 }, "enemies": { "type": "tank", "number": 1 } }"#;
        assert!(serde_json::from_str::<ScanEntry>(json).is_err());
    }

    #[test]
    fn rejects_negative_counts() {
        let json = r#"{ "coordinates": { "x": 1, "y": 1 }, "enemies": { "type": "mech", "number": -2 } }"#;
        assert!(serde_json::from_str::<ScanEntry>(json).is_err());

        let json = r#"{ "coordinates": { "x": 1, "y": 1 }, "enemies": { "type": "mech", "number": 2 }, "allies": -1 }"#;
        assert!(serde_json::from_str::<ScanEntry>(json).is_err());
    }

    #[test]
    fn zero_allies_is_no_allies() {
        let entry = ScanEntry {
            coordinates: Coordinates::new(0.0, 0.0),
            enemies: EnemyInfo {
                kind: EnemyKind::Soldier,
                count: 1,
            },
            allies: Some(0),
        };
        assert!(!entry.has_allies());
    }

    #[test]
    fn distance_from_origin() {
        assert!((Coordinates::new(3.0, 4.0).distance() - 5.0).abs() < f64::EPSILON);
        assert!((Coordinates::new(-6.0, -8.0).distance() - 10.0).abs() < f64::EPSILON);
    }
}
