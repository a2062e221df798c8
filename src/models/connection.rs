use serde::{Deserialize, Serialize};

use crate::constants::{CONNECTION_HIT_MARGIN, INITIAL_CONNECTION_WIDTH};
use crate::geometry;

/// A derived link between two stations.
///
/// Connections carry only their visual attributes; the endpoints live in the
/// network graph that owns the connection. They are never created directly -
/// the merge algorithm in `Lines::add_line` is their only source - and at
/// most one exists per unordered station pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Connection {
    #[serde(default = "default_width")]
    pub width: i32,
    pub color: String,
}

fn default_width() -> i32 {
    INITIAL_CONNECTION_WIDTH
}

impl Connection {
    /// Create a connection for a single line traversal
    #[must_use]
    pub fn new(color: &str) -> Self {
        Self {
            width: INITIAL_CONNECTION_WIDTH,
            color: color.to_string(),
        }
    }

    /// Whether the point is close enough to the segment between `start` and
    /// `end` to count as a hit.
    ///
    /// The point must fall strictly inside the endpoints' bounding box on
    /// both axes (exclusive bounds, so coordinates shared with an endpoint
    /// are rejected), and within `width + 1` pixels of the infinite line
    /// through the endpoints. Coincident endpoints define no line and never
    /// hit.
    #[must_use]
    pub fn is_point_on(&self, start: (i32, i32), end: (i32, i32), px: i32, py: i32) -> bool {
        if !geometry::strictly_within(px, start.0, end.0) {
            return false;
        }
        if !geometry::strictly_within(py, start.1, end.1) {
            return false;
        }

        let distance = geometry::point_to_line_distance(
            (f64::from(start.0), f64::from(start.1)),
            (f64::from(end.0), f64::from(end.1)),
            (f64::from(px), f64::from(py)),
        );

        match distance {
            Some(distance) => distance <= f64::from(self.width + CONNECTION_HIT_MARGIN),
            None => false,
        }
    }
}
