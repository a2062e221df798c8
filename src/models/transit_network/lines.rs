use petgraph::stable_graph::{EdgeIndex, NodeIndex};

use super::TransitNetwork;
use crate::constants::{DIMMED_COLOR, HIGHLIGHT_COLOR, MIXED_COLOR, WIDTH_PER_LINE};
use crate::models::{Connection, TransportLine};

/// Extension trait for line operations on [`TransitNetwork`]: the merge
/// algorithm that derives the connection set, its rebuild-on-removal
/// counterpart, and the highlight override.
pub trait Lines {
    /// Register a line and merge its traversals into the connection set.
    ///
    /// The registry is re-sorted into display order first; then every
    /// consecutive stop pair either widens the existing connection for that
    /// pair (switching it to the mixed color when the modes disagree) or
    /// derives a new one in the line's base color. Returns the line's id.
    fn add_line(&mut self, line: TransportLine) -> u64;

    /// Deregister a line and rebuild the connection set from the remaining
    /// lines.
    ///
    /// Widths and colors are cumulative over all registered lines, so the
    /// removal replays the merge from scratch instead of subtracting - the
    /// connection set then reflects exactly the surviving lines. Returns the
    /// removed line (the edit flow mutates and re-adds it) or `None`,
    /// without any mutation, when the id is not registered.
    fn remove_line(&mut self, id: u64) -> Option<TransportLine>;

    /// Get a registered line by id
    fn line(&self, id: u64) -> Option<&TransportLine>;

    /// Registered lines in display order
    fn lines(&self) -> Vec<&TransportLine>;

    /// Number of registered lines
    fn line_count(&self) -> usize;

    /// Append a stop to a line under construction, resolving the
    /// destination name from the arena; `false` (no append) for a dead
    /// station handle
    fn append_line_stop(&self, line: &mut TransportLine, station: NodeIndex) -> bool;

    /// Replace a line's stop sequence, resolving the new destination name
    /// from the arena (empty when the sequence is empty or its terminus is
    /// dead)
    fn replace_line_stops(&self, line: &mut TransportLine, stops: Vec<NodeIndex>);

    /// Display names of a line's stops, skipping dead handles
    fn line_stop_names(&self, line: &TransportLine) -> Vec<String>;

    /// Lines stopping at the station, in display order
    fn lines_through_station(&self, station: NodeIndex) -> Vec<&TransportLine>;

    /// Lines traveling the connection, in display order
    fn lines_through_connection(&self, edge: EdgeIndex) -> Vec<&TransportLine>;

    /// Paint the line's connections in the highlight color and every other
    /// connection in the dim color; widths are untouched. `false` when the
    /// id is not registered.
    fn highlight_line(&mut self, id: u64) -> bool;

    /// Undo an active highlight by rebuilding the connection set, which
    /// restores the true colors and widths. No-op when nothing is
    /// highlighted.
    fn clear_highlight(&mut self);
}

impl Lines for TransitNetwork {
    fn add_line(&mut self, line: TransportLine) -> u64 {
        let id = line.id;
        self.lines.insert(id, line);
        self.sort_lines();
        self.merge_line(id);
        id
    }

    fn remove_line(&mut self, id: u64) -> Option<TransportLine> {
        let removed = self.lines.shift_remove(&id)?;
        self.rebuild_connections();
        Some(removed)
    }

    fn line(&self, id: u64) -> Option<&TransportLine> {
        self.lines.get(&id)
    }

    fn lines(&self) -> Vec<&TransportLine> {
        self.lines.values().collect()
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn append_line_stop(&self, line: &mut TransportLine, station: NodeIndex) -> bool {
        match self.graph.node_weight(station) {
            Some(weight) => {
                let name = weight.name.clone();
                line.push_stop(station, &name);
                true
            }
            None => false,
        }
    }

    fn replace_line_stops(&self, line: &mut TransportLine, stops: Vec<NodeIndex>) {
        let last_name = stops
            .last()
            .and_then(|&idx| self.graph.node_weight(idx))
            .map(|station| station.name.clone());
        line.replace_stops(stops, last_name.as_deref());
    }

    fn line_stop_names(&self, line: &TransportLine) -> Vec<String> {
        line.stops()
            .iter()
            .filter_map(|&idx| self.graph.node_weight(idx))
            .map(|station| station.name.clone())
            .collect()
    }

    fn lines_through_station(&self, station: NodeIndex) -> Vec<&TransportLine> {
        self.lines
            .values()
            .filter(|line| line.contains_station(station))
            .collect()
    }

    fn lines_through_connection(&self, edge: EdgeIndex) -> Vec<&TransportLine> {
        let Some((a, b)) = self.graph.edge_endpoints(edge) else {
            return Vec::new();
        };
        self.lines
            .values()
            .filter(|line| line.connects(a, b))
            .collect()
    }

    fn highlight_line(&mut self, id: u64) -> bool {
        if !self.lines.contains_key(&id) {
            return false;
        }
        for &edge in &self.connection_order {
            let Some((a, b)) = self.graph.edge_endpoints(edge) else {
                continue;
            };
            let covered = self
                .lines
                .get(&id)
                .is_some_and(|line| line.connects(a, b));
            if let Some(connection) = self.graph.edge_weight_mut(edge) {
                connection.color = if covered {
                    HIGHLIGHT_COLOR.to_string()
                } else {
                    DIMMED_COLOR.to_string()
                };
            }
        }
        self.highlight_active = true;
        true
    }

    fn clear_highlight(&mut self) {
        if self.highlight_active {
            self.rebuild_connections();
            self.highlight_active = false;
        }
    }
}

impl TransitNetwork {
    /// Merge one registered line's traversals into the connection set.
    ///
    /// Consecutive duplicate stops derive nothing (a connection never joins
    /// a station to itself), and pairs touching a dead handle - possible
    /// when a single-stop line outlived its only station - are skipped.
    fn merge_line(&mut self, id: u64) {
        let Some(line) = self.lines.get(&id) else {
            return;
        };
        let base_color = line.mode.base_color();
        let stops = line.stops().to_vec();

        for pair in stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a == b {
                continue;
            }
            if !self.graph.contains_node(a) || !self.graph.contains_node(b) {
                log::warn!("line stop pair references a removed station; skipping");
                continue;
            }
            if let Some(edge) = self.graph.find_edge(a, b) {
                if let Some(connection) = self.graph.edge_weight_mut(edge) {
                    connection.width += WIDTH_PER_LINE;
                    if connection.color != base_color {
                        connection.color = MIXED_COLOR.to_string();
                    }
                }
            } else {
                let edge = self.graph.add_edge(a, b, Connection::new(base_color));
                self.connection_order.push(edge);
            }
        }
    }

    /// Drop every connection and replay the merge for all registered lines
    /// in their current display order
    fn rebuild_connections(&mut self) {
        self.graph.clear_edges();
        self.connection_order.clear();
        self.rebuild_epoch += 1;
        let ids: Vec<u64> = self.lines.keys().copied().collect();
        for id in ids {
            self.merge_line(id);
        }
        log::debug!(
            "rebuilt {} connections from {} lines",
            self.connection_order.len(),
            self.lines.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BUS_COLOR, TRAM_COLOR};
    use crate::models::{Connections, Station, Stations, TransportMode};

    fn named(name: &str, x: i32, y: i32) -> Station {
        Station::new(x, y, name.to_string(), "#FFFFFF".to_string())
    }

    fn build_line(
        network: &TransitNetwork,
        number: &str,
        mode: TransportMode,
        stops: &[NodeIndex],
    ) -> TransportLine {
        let mut line = TransportLine::new(number.to_string(), mode);
        for &stop in stops {
            assert!(network.append_line_stop(&mut line, stop));
        }
        line
    }

    #[test]
    fn test_single_line_derives_connections_in_traversal_order() {
        let mut network = TransitNetwork::new();
        let a = network.add_station(named("A", 0, 0));
        let b = network.add_station(named("B", 100, 0));
        let c = network.add_station(named("C", 200, 0));

        let line = build_line(&network, "145", TransportMode::Bus, &[a, b, c]);
        network.add_line(line);

        assert_eq!(network.connection_count(), 2);
        for &edge in network.connections() {
            let connection = network.connection(edge).expect("connection exists");
            assert_eq!(connection.width, 2);
            assert_eq!(connection.color, BUS_COLOR);
        }
    }

    #[test]
    fn test_shared_pair_widens_and_mixes_color() {
        let mut network = TransitNetwork::new();
        let a = network.add_station(named("A", 0, 0));
        let b = network.add_station(named("B", 100, 0));

        let bus = build_line(&network, "145", TransportMode::Bus, &[a, b]);
        let tram = build_line(&network, "6", TransportMode::Tram, &[a, b]);
        network.add_line(bus);
        let tram_id = network.add_line(tram);

        assert_eq!(network.connection_count(), 1);
        let edge = network.find_connection(a, b).expect("connection exists");
        let connection = network.connection(edge).expect("connection exists");
        assert_eq!(connection.width, 4);
        assert_eq!(connection.color, MIXED_COLOR);

        // Removing the tram line reverts the pair to a plain bus connection
        assert!(network.remove_line(tram_id).is_some());
        let edge = network.find_connection(a, b).expect("connection exists");
        let connection = network.connection(edge).expect("connection exists");
        assert_eq!(connection.width, 2);
        assert_eq!(connection.color, BUS_COLOR);
    }

    #[test]
    fn test_same_mode_overlap_keeps_base_color() {
        let mut network = TransitNetwork::new();
        let a = network.add_station(named("A", 0, 0));
        let b = network.add_station(named("B", 100, 0));

        let first = build_line(&network, "1", TransportMode::Tram, &[a, b]);
        let second = build_line(&network, "2", TransportMode::Tram, &[a, b]);
        network.add_line(first);
        network.add_line(second);

        let edge = network.find_connection(a, b).expect("connection exists");
        let connection = network.connection(edge).expect("connection exists");
        assert_eq!(connection.width, 4);
        assert_eq!(connection.color, TRAM_COLOR);
    }

    #[test]
    fn test_removing_every_line_empties_connections() {
        let mut network = TransitNetwork::new();
        let a = network.add_station(named("A", 0, 0));
        let b = network.add_station(named("B", 100, 0));
        let c = network.add_station(named("C", 200, 0));

        let bus = build_line(&network, "145", TransportMode::Bus, &[a, b, c]);
        let tram = build_line(&network, "6", TransportMode::Tram, &[c, b]);
        let bus_id = network.add_line(bus);
        let tram_id = network.add_line(tram);
        assert_eq!(network.connection_count(), 2);

        network.remove_line(bus_id);
        network.remove_line(tram_id);
        assert_eq!(network.connection_count(), 0);
        assert_eq!(network.line_count(), 0);
    }

    #[test]
    fn test_remove_unknown_line_is_a_no_op() {
        let mut network = TransitNetwork::new();
        let a = network.add_station(named("A", 0, 0));
        let b = network.add_station(named("B", 100, 0));
        let line = build_line(&network, "145", TransportMode::Bus, &[a, b]);
        network.add_line(line);

        let epoch_before = network.rebuild_epoch();
        assert!(network.remove_line(999).is_none());
        assert_eq!(network.line_count(), 1);
        assert_eq!(network.connection_count(), 1);
        assert_eq!(network.rebuild_epoch(), epoch_before);
    }

    #[test]
    fn test_consecutive_duplicate_stop_derives_no_self_loop() {
        let mut network = TransitNetwork::new();
        let a = network.add_station(named("A", 0, 0));
        let b = network.add_station(named("B", 100, 0));

        let line = build_line(&network, "145", TransportMode::Bus, &[a, a, b]);
        network.add_line(line);

        assert_eq!(network.connection_count(), 1);
        let edge = network.find_connection(a, b).expect("connection exists");
        assert_eq!(network.connection(edge).expect("connection exists").width, 2);
    }

    #[test]
    fn test_line_revisiting_a_pair_widens_its_own_connection() {
        let mut network = TransitNetwork::new();
        let a = network.add_station(named("A", 0, 0));
        let b = network.add_station(named("B", 100, 0));

        // A -> B -> A travels the same pair twice
        let line = build_line(&network, "145", TransportMode::Bus, &[a, b, a]);
        network.add_line(line);

        assert_eq!(network.connection_count(), 1);
        let edge = network.find_connection(a, b).expect("connection exists");
        let connection = network.connection(edge).expect("connection exists");
        assert_eq!(connection.width, 4);
        assert_eq!(connection.color, BUS_COLOR);
    }

    #[test]
    fn test_lines_view_is_sorted_numerically_then_lexicographically() {
        let mut network = TransitNetwork::new();
        let a = network.add_station(named("A", 0, 0));
        let b = network.add_station(named("B", 100, 0));

        for number in ["12", "2", "100", "0P", "0L"] {
            let line = build_line(&network, number, TransportMode::Bus, &[a, b]);
            network.add_line(line);
        }

        let numbers: Vec<&str> = network.lines().iter().map(|l| l.number.as_str()).collect();
        // "0L" and "0P" fall back to lexicographic comparison and sort ahead
        // of the purely numeric numbers 2 < 12 < 100
        assert_eq!(numbers, ["0L", "0P", "2", "12", "100"]);
    }

    #[test]
    fn test_equal_numbers_order_by_destination() {
        let mut network = TransitNetwork::new();
        let a = network.add_station(named("Airport", 0, 0));
        let h = network.add_station(named("Harbor", 100, 0));
        let m = network.add_station(named("Midtown", 200, 0));

        let outbound = build_line(&network, "145", TransportMode::Bus, &[m, h]);
        let inbound = build_line(&network, "145", TransportMode::Bus, &[m, a]);
        network.add_line(outbound);
        network.add_line(inbound);

        let destinations: Vec<&str> = network
            .lines()
            .iter()
            .map(|l| l.destination())
            .collect();
        assert_eq!(destinations, ["Airport", "Harbor"]);
    }

    #[test]
    fn test_append_and_replace_resolve_destination() {
        let mut network = TransitNetwork::new();
        let a = network.add_station(named("Airport", 0, 0));
        let h = network.add_station(named("Harbor", 100, 0));

        let mut line = TransportLine::new("145".to_string(), TransportMode::Bus);
        assert!(network.append_line_stop(&mut line, a));
        assert_eq!(line.destination(), "Airport");

        network.replace_line_stops(&mut line, vec![a, h]);
        assert_eq!(line.destination(), "Harbor");

        network.replace_line_stops(&mut line, Vec::new());
        assert_eq!(line.destination(), "");
    }

    #[test]
    fn test_append_to_dead_station_is_refused() {
        let mut network = TransitNetwork::new();
        let a = network.add_station(named("A", 0, 0));
        assert!(network.remove_station(a));

        let mut line = TransportLine::new("145".to_string(), TransportMode::Bus);
        assert!(!network.append_line_stop(&mut line, a));
        assert_eq!(line.stop_count(), 0);
    }

    #[test]
    fn test_lines_through_station_and_connection() {
        let mut network = TransitNetwork::new();
        let a = network.add_station(named("A", 0, 0));
        let b = network.add_station(named("B", 100, 0));
        let c = network.add_station(named("C", 200, 0));

        let bus = build_line(&network, "145", TransportMode::Bus, &[a, b]);
        let tram = build_line(&network, "6", TransportMode::Tram, &[a, b, c]);
        network.add_line(bus);
        network.add_line(tram);

        assert_eq!(network.lines_through_station(c).len(), 1);
        assert_eq!(network.lines_through_station(a).len(), 2);

        let edge = network.find_connection(b, c).expect("connection exists");
        let through: Vec<&str> = network
            .lines_through_connection(edge)
            .iter()
            .map(|l| l.number.as_str())
            .collect();
        assert_eq!(through, ["6"]);
    }

    #[test]
    fn test_highlight_and_clear_restore_true_colors() {
        let mut network = TransitNetwork::new();
        let a = network.add_station(named("A", 0, 0));
        let b = network.add_station(named("B", 100, 0));
        let c = network.add_station(named("C", 200, 0));

        let bus = build_line(&network, "145", TransportMode::Bus, &[a, b]);
        let tram = build_line(&network, "6", TransportMode::Tram, &[b, c]);
        let bus_id = network.add_line(bus);
        network.add_line(tram);

        assert!(network.highlight_line(bus_id));
        let ab = network.find_connection(a, b).expect("connection exists");
        let bc = network.find_connection(b, c).expect("connection exists");
        assert_eq!(
            network.connection(ab).expect("connection exists").color,
            HIGHLIGHT_COLOR
        );
        assert_eq!(
            network.connection(bc).expect("connection exists").color,
            DIMMED_COLOR
        );

        network.clear_highlight();
        let ab = network.find_connection(a, b).expect("connection exists");
        let bc = network.find_connection(b, c).expect("connection exists");
        assert_eq!(
            network.connection(ab).expect("connection exists").color,
            BUS_COLOR
        );
        assert_eq!(
            network.connection(bc).expect("connection exists").color,
            TRAM_COLOR
        );
    }

    #[test]
    fn test_highlight_unknown_line_changes_nothing() {
        let mut network = TransitNetwork::new();
        let a = network.add_station(named("A", 0, 0));
        let b = network.add_station(named("B", 100, 0));
        let line = build_line(&network, "145", TransportMode::Bus, &[a, b]);
        network.add_line(line);

        assert!(!network.highlight_line(999));
        let edge = network.find_connection(a, b).expect("connection exists");
        assert_eq!(
            network.connection(edge).expect("connection exists").color,
            BUS_COLOR
        );
    }

    #[test]
    fn test_clear_highlight_without_highlight_keeps_handles() {
        let mut network = TransitNetwork::new();
        let a = network.add_station(named("A", 0, 0));
        let b = network.add_station(named("B", 100, 0));
        let line = build_line(&network, "145", TransportMode::Bus, &[a, b]);
        network.add_line(line);

        let epoch_before = network.rebuild_epoch();
        network.clear_highlight();
        assert_eq!(network.rebuild_epoch(), epoch_before);
    }

    #[test]
    fn test_edit_flow_keeps_line_identity() {
        let mut network = TransitNetwork::new();
        let a = network.add_station(named("A", 0, 0));
        let b = network.add_station(named("B", 100, 0));
        let c = network.add_station(named("C", 200, 0));

        let line = build_line(&network, "145", TransportMode::Bus, &[a, b]);
        let id = network.add_line(line);

        let mut edited = network.remove_line(id).expect("line was registered");
        edited.number = "146".to_string();
        edited.mode = TransportMode::Tram;
        network.replace_line_stops(&mut edited, vec![a, c]);
        let new_id = network.add_line(edited);

        assert_eq!(new_id, id);
        assert_eq!(network.line_count(), 1);
        assert!(network.find_connection(a, b).is_none());
        let edge = network.find_connection(a, c).expect("connection exists");
        assert_eq!(
            network.connection(edge).expect("connection exists").color,
            TRAM_COLOR
        );
    }
}
