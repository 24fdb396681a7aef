//! Warehouse zone geometry.
//!
//! Zones are calibrated regions of the floor (pickup points, shelves,
//! delivery bays, charging stations) identified by name and located by a
//! center plus containment radius. Hosts build candidate lists for the
//! advisor from a catalog of these.

use std::fmt;

use crate::Id;

/// A 2D world position on the warehouse floor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Creates a new position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin position (0, 0).
    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// The role a zone plays in a pickup→shelf→delivery route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ZoneKind {
    Pickup,
    Shelf,
    Delivery,
    Charging,
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneKind::Pickup => write!(f, "pickup"),
            ZoneKind::Shelf => write!(f, "shelf"),
            ZoneKind::Delivery => write!(f, "delivery"),
            ZoneKind::Charging => write!(f, "charging"),
        }
    }
}

/// A calibrated zone: identifier, role, center, and containment radius.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneSpec {
    pub id: Id,
    pub kind: ZoneKind,
    pub position: Position,
    pub radius: f64,
}

impl ZoneSpec {
    /// Creates a zone specification.
    pub fn new(id: &str, kind: ZoneKind, position: Position, radius: f64) -> Self {
        Self {
            id: id.to_owned(),
            kind,
            position,
            radius,
        }
    }

    /// True if a robot at `position` is inside this zone.
    pub fn contains(&self, position: Position) -> bool {
        self.position.distance_to(&position) <= self.radius
    }
}

/// The calibrated zones of one warehouse.
#[derive(Debug, Clone, Default)]
pub struct ZoneCatalog {
    zones: Vec<ZoneSpec>,
}

impl ZoneCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a calibrated zone.
    pub fn add(&mut self, zone: ZoneSpec) {
        self.zones.push(zone);
    }

    /// All zones of one kind, in calibration order.
    ///
    /// This is the candidate list hosts pass to the advisor when a robot
    /// needs its next pickup, shelf, or delivery target.
    pub fn of_kind(&self, kind: ZoneKind) -> Vec<ZoneSpec> {
        self.zones
            .iter()
            .filter(|z| z.kind == kind)
            .cloned()
            .collect()
    }

    /// Looks up a zone by identifier.
    pub fn get(&self, id: &str) -> Option<&ZoneSpec> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// The zone containing the given position, if any.
    pub fn locate(&self, position: Position) -> Option<&ZoneSpec> {
        self.zones.iter().find(|z| z.contains(position))
    }

    /// Number of calibrated zones.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// True if no zones are calibrated.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ZoneCatalog {
        let mut catalog = ZoneCatalog::new();
        catalog.add(ZoneSpec::new(
            "pickup_A",
            ZoneKind::Pickup,
            Position::new(-3.0, 2.0),
            0.6,
        ));
        catalog.add(ZoneSpec::new(
            "pickup_B",
            ZoneKind::Pickup,
            Position::new(-3.0, -2.0),
            0.6,
        ));
        catalog.add(ZoneSpec::new(
            "shelf_1",
            ZoneKind::Shelf,
            Position::new(0.0, 0.0),
            0.5,
        ));
        catalog.add(ZoneSpec::new(
            "delivery_A",
            ZoneKind::Delivery,
            Position::new(3.5, 1.0),
            0.6,
        ));
        catalog
    }

    #[test]
    fn position_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn zone_containment_uses_radius() {
        let shelf = ZoneSpec::new("shelf_1", ZoneKind::Shelf, Position::origin(), 0.5);
        assert!(shelf.contains(Position::new(0.3, 0.0)));
        assert!(!shelf.contains(Position::new(0.6, 0.0)));
    }

    #[test]
    fn of_kind_preserves_calibration_order() {
        let ids: Vec<Id> = catalog()
            .of_kind(ZoneKind::Pickup)
            .into_iter()
            .map(|z| z.id)
            .collect();
        assert_eq!(ids, ["pickup_A", "pickup_B"]);
    }

    #[test]
    fn locate_finds_containing_zone() {
        let catalog = catalog();
        let found = catalog.locate(Position::new(0.2, 0.1));
        assert_eq!(found.map(|z| z.id.as_str()), Some("shelf_1"));
        assert!(catalog.locate(Position::new(2.0, -4.0)).is_none());
    }

    #[test]
    fn get_by_id() {
        let catalog = catalog();
        assert!(catalog.get("delivery_A").is_some());
        assert!(catalog.get("delivery_Z").is_none());
    }
}
