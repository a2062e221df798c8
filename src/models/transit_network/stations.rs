use petgraph::stable_graph::NodeIndex;

use super::TransitNetwork;
use crate::models::Station;

/// Extension trait for station operations on [`TransitNetwork`]
pub trait Stations {
    /// Insert a station into the arena and return its handle; the station
    /// register is re-sorted by display name
    fn add_station(&mut self, station: Station) -> NodeIndex;

    /// Remove a station.
    ///
    /// Refused (returns `false`, nothing changes) while any connection still
    /// references the station, or when the handle is already dead.
    fn remove_station(&mut self, index: NodeIndex) -> bool;

    /// Get a station by handle
    fn station(&self, index: NodeIndex) -> Option<&Station>;

    /// Get a station by handle, mutably
    fn station_mut(&mut self, index: NodeIndex) -> Option<&mut Station>;

    /// Station handles in display order (sorted by name)
    fn stations(&self) -> &[NodeIndex];

    /// Number of stations
    fn station_count(&self) -> usize;

    /// Move one station by `dx` right / `dy` up; `false` for a dead handle
    fn move_station(&mut self, index: NodeIndex, dx: i32, dy: i32) -> bool;

    /// Move the whole network (every station, and with them every
    /// connection) by `dx` right / `dy` up
    fn move_all(&mut self, dx: i32, dy: i32);
}

impl Stations for TransitNetwork {
    fn add_station(&mut self, station: Station) -> NodeIndex {
        let index = self.graph.add_node(station);
        self.station_order.push(index);
        self.sort_stations();
        index
    }

    fn remove_station(&mut self, index: NodeIndex) -> bool {
        if !self.graph.contains_node(index) {
            return false;
        }
        if self.graph.edges(index).next().is_some() {
            return false;
        }
        self.graph.remove_node(index);
        self.station_order.retain(|&i| i != index);
        true
    }

    fn station(&self, index: NodeIndex) -> Option<&Station> {
        self.graph.node_weight(index)
    }

    fn station_mut(&mut self, index: NodeIndex) -> Option<&mut Station> {
        self.graph.node_weight_mut(index)
    }

    fn stations(&self) -> &[NodeIndex] {
        &self.station_order
    }

    fn station_count(&self) -> usize {
        self.station_order.len()
    }

    fn move_station(&mut self, index: NodeIndex, dx: i32, dy: i32) -> bool {
        match self.graph.node_weight_mut(index) {
            Some(station) => {
                station.move_by(dx, dy);
                true
            }
            None => false,
        }
    }

    fn move_all(&mut self, dx: i32, dy: i32) {
        let order = self.station_order.clone();
        for index in order {
            if let Some(station) = self.graph.node_weight_mut(index) {
                station.move_by(dx, dy);
            }
        }
    }
}
