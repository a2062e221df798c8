use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{DEFAULT_STATION_COLOR, STATION_RADIUS, UNNAMED_STATION_RADIUS};
use crate::geometry;

/// A transit stop: a named, colored point with a circular hit area.
///
/// Stations have no natural key - names may repeat - so identity is the
/// arena handle issued by `TransitNetwork::add_station`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Station {
    pub x: i32,
    pub y: i32,
    #[serde(default = "default_radius")]
    pub radius: i32,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_radius() -> i32 {
    STATION_RADIUS
}

fn default_color() -> String {
    DEFAULT_STATION_COLOR.to_string()
}

impl Station {
    /// Create a user-facing station with the standard hit radius
    #[must_use]
    pub fn new(x: i32, y: i32, name: String, color: String) -> Self {
        Self {
            x,
            y,
            radius: STATION_RADIUS,
            name,
            color,
        }
    }

    /// Create a bare positional placeholder: unnamed, white, smaller radius
    #[must_use]
    pub fn unnamed(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            radius: UNNAMED_STATION_RADIUS,
            name: String::new(),
            color: DEFAULT_STATION_COLOR.to_string(),
        }
    }

    /// Shift the station by `dx` pixels right and `dy` pixels up.
    ///
    /// The vertical delta is inverted relative to screen coordinates
    /// (y grows downward on screen): a positive `dy` moves the station up.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y -= dy;
    }

    /// Whether the point lies inside the station's hit circle.
    ///
    /// The circle boundary counts as a hit.
    #[must_use]
    pub fn contains_point(&self, px: i32, py: i32) -> bool {
        geometry::point_in_circle(px, py, self.x, self.y, self.radius)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
