//! Harvesting units and their identities.

use std::fmt;

use super::position::Position;

/// Host-assigned unit identity, stable for the unit's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of our units as seen in the current snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Unit {
    pub id: UnitId,
    pub position: Position,
    /// Resource currently carried.
    pub cargo: u32,
}

impl Unit {
    pub fn new(id: u32, position: Position, cargo: u32) -> Self {
        Unit { id: UnitId(id), position, cargo }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_id_displays_as_number() {
        assert_eq!(UnitId(17).to_string(), "17");
    }

    #[test]
    fn unit_new_wraps_id() {
        let u = Unit::new(3, Position::new(1, 2), 40);
        assert_eq!(u.id, UnitId(3));
        assert_eq!(u.cargo, 40);
    }
}
