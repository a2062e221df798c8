//! Click-selection state: at most one picked station or connection.
//!
//! Picking paints the entity with a visual emphasis - a station grows by
//! [`SELECTION_RADIUS_BONUS`], a connection widens by
//! [`SELECTION_WIDTH_BONUS`] - and deselection reverts it. Every radius
//! operation on a picked station therefore compensates for the bonus.

use petgraph::stable_graph::{EdgeIndex, NodeIndex};

use crate::constants::{SELECTION_RADIUS_BONUS, SELECTION_WIDTH_BONUS};
use crate::hit;
use crate::models::{Connections, Stations, TransitNetwork};

/// What a click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Station(NodeIndex),
    Connection(EdgeIndex),
}

/// Selection state of one editor view
#[derive(Debug, Default)]
pub struct Selection {
    current: Option<Pick>,
    /// Network rebuild generation at pick time; a picked connection handle
    /// is only trusted while the generation is unchanged
    picked_at_epoch: u64,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<Pick> {
        self.current
    }

    #[must_use]
    pub fn picked_station(&self) -> Option<NodeIndex> {
        match self.current {
            Some(Pick::Station(index)) => Some(index),
            _ => None,
        }
    }

    #[must_use]
    pub fn picked_connection(&self) -> Option<EdgeIndex> {
        match self.current {
            Some(Pick::Connection(edge)) => Some(edge),
            _ => None,
        }
    }

    /// Resolve a click: drop the previous pick, then try stations first and
    /// connections second, so a connection is never picked underneath a
    /// station's hit circle
    pub fn pick(&mut self, network: &mut TransitNetwork, x: i32, y: i32) -> Option<Pick> {
        self.clear(network);

        if let Some(index) = hit::find_station_at(network, x, y) {
            if let Some(station) = network.station_mut(index) {
                station.radius += SELECTION_RADIUS_BONUS;
            }
            self.current = Some(Pick::Station(index));
        } else if let Some(edge) = hit::find_connection_at(network, x, y) {
            if let Some(connection) = network.connection_mut(edge) {
                connection.width += SELECTION_WIDTH_BONUS;
            }
            self.current = Some(Pick::Connection(edge));
            self.picked_at_epoch = network.rebuild_epoch();
        }

        self.current
    }

    /// Drop the pick and revert its visual emphasis.
    ///
    /// A picked connection outlived by a rebuild is dropped without the
    /// width revert: the rebuild already reset every width, and the handle
    /// may have been reissued to a different connection.
    pub fn clear(&mut self, network: &mut TransitNetwork) {
        match self.current.take() {
            Some(Pick::Station(index)) => {
                if let Some(station) = network.station_mut(index) {
                    station.radius -= SELECTION_RADIUS_BONUS;
                }
            }
            Some(Pick::Connection(edge)) => {
                if self.picked_at_epoch == network.rebuild_epoch() {
                    if let Some(connection) = network.connection_mut(edge) {
                        connection.width -= SELECTION_WIDTH_BONUS;
                    }
                }
            }
            None => {}
        }
    }

    /// Route a move to the picked station, the picked connection, or - with
    /// nothing picked - the whole network
    pub fn move_by(&self, network: &mut TransitNetwork, dx: i32, dy: i32) {
        match self.current {
            Some(Pick::Station(index)) => {
                network.move_station(index, dx, dy);
            }
            Some(Pick::Connection(edge)) => {
                network.move_connection(edge, dx, dy);
            }
            None => network.move_all(dx, dy),
        }
    }

    /// Grow the picked station's radius; `false` with no station picked
    pub fn grow_picked_station(&self, network: &mut TransitNetwork, amount: i32) -> bool {
        let Some(index) = self.picked_station() else {
            return false;
        };
        match network.station_mut(index) {
            Some(station) => {
                station.radius += amount;
                true
            }
            None => false,
        }
    }

    /// Shrink the picked station's radius, refusing once the true radius
    /// (without the selection bonus) would reach zero
    pub fn shrink_picked_station(&self, network: &mut TransitNetwork, amount: i32) -> bool {
        let Some(index) = self.picked_station() else {
            return false;
        };
        match network.station_mut(index) {
            Some(station) => {
                let true_radius = station.radius - SELECTION_RADIUS_BONUS;
                if true_radius - amount > 0 {
                    station.radius -= amount;
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }

    /// Set the picked station's true radius; the stored value carries the
    /// selection bonus until deselection. Callers validate `radius > 0`.
    pub fn set_picked_station_radius(&self, network: &mut TransitNetwork, radius: i32) -> bool {
        let Some(index) = self.picked_station() else {
            return false;
        };
        match network.station_mut(index) {
            Some(station) => {
                station.radius = radius + SELECTION_RADIUS_BONUS;
                true
            }
            None => false,
        }
    }

    /// Remove the picked station from the network.
    ///
    /// Delegates to [`Stations::remove_station`]; on refusal (the station is
    /// still connected) the pick and its emphasis stay in place so the
    /// caller can report the failure.
    pub fn remove_picked_station(&mut self, network: &mut TransitNetwork) -> bool {
        let Some(index) = self.picked_station() else {
            return false;
        };
        if network.remove_station(index) {
            self.current = None;
            true
        } else {
            false
        }
    }
}
