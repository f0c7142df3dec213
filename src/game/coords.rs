// src/game/coords.rs
use std::ops::Neg;

use crate::data::ToCell;
use crate::specs::live_feed::RawCoords;

/// Rink position in feet from centre ice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coords {
    pub x: f64,
    pub y: f64,
}

/// Whether to flip positions when teams have swapped ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mirror {
    Off,
    /// Teams change ends every period, so even periods (2, 4, ...) are negated.
    EvenPeriods,
}

impl Coords {
    /// Both components or nothing.
    pub fn from_raw(raw: Option<&RawCoords>) -> Option<Self> {
        let raw = raw?;
        Some(Coords { x: raw.x?, y: raw.y? })
    }
}

impl Neg for Coords {
    type Output = Coords;

    fn neg(self) -> Coords {
        Coords { x: -self.x, y: -self.y }
    }
}

impl ToCell for Coords {
    fn to_cell(&self) -> String {
        format!("({}, {})", self.x.to_cell(), self.y.to_cell())
    }
}

/// An unknown period leaves the position as recorded.
pub fn normalize(raw: Option<&RawCoords>, period: Option<u32>, mirror: Mirror) -> Option<Coords> {
    let c = Coords::from_raw(raw)?;
    match (mirror, period) {
        (Mirror::EvenPeriods, Some(p)) if p % 2 == 0 => Some(-c),
        _ => Some(c),
    }
}
