//! Point queries over a network, used by click/hover selection.
//!
//! Stations are tested in display order, so when hit circles overlap the
//! alphabetically earlier name wins. Connections are tested in insertion
//! order; callers that want the station-over-connection priority consult
//! [`find_connection_at`] only after [`find_station_at`] came up empty (see
//! [`crate::selection::Selection::pick`]).

use petgraph::stable_graph::{EdgeIndex, NodeIndex};

use crate::models::{Connections, Stations, TransitNetwork};

/// First station whose hit circle contains the point, in display order
#[must_use]
pub fn find_station_at(network: &TransitNetwork, x: i32, y: i32) -> Option<NodeIndex> {
    network
        .stations()
        .iter()
        .copied()
        .find(|&index| {
            network
                .station(index)
                .is_some_and(|station| station.contains_point(x, y))
        })
}

/// First connection whose stroke contains the point, in insertion order
#[must_use]
pub fn find_connection_at(network: &TransitNetwork, x: i32, y: i32) -> Option<EdgeIndex> {
    for &edge in network.connections() {
        let Some((a, b)) = network.connection_endpoints(edge) else {
            continue;
        };
        let (Some(from), Some(to)) = (network.station(a), network.station(b)) else {
            continue;
        };
        let Some(connection) = network.connection(edge) else {
            continue;
        };
        if connection.is_point_on((from.x, from.y), (to.x, to.y), x, y) {
            return Some(edge);
        }
    }
    None
}
