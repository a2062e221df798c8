use petgraph::stable_graph::{EdgeIndex, NodeIndex};

use super::TransitNetwork;
use crate::models::Connection;

/// Extension trait for connection lookups and movement on
/// [`TransitNetwork`].
///
/// Connections are derived data; this trait only reads and repositions them.
/// Creation and removal belong to the merge algorithm in [`super::Lines`].
pub trait Connections {
    /// Get a connection by handle
    fn connection(&self, edge: EdgeIndex) -> Option<&Connection>;

    /// Get a connection by handle, mutably
    fn connection_mut(&mut self, edge: EdgeIndex) -> Option<&mut Connection>;

    /// The stations a connection joins
    fn connection_endpoints(&self, edge: EdgeIndex) -> Option<(NodeIndex, NodeIndex)>;

    /// Connection handles in insertion order
    fn connections(&self) -> &[EdgeIndex];

    /// Number of connections
    fn connection_count(&self) -> usize;

    /// Find the connection joining the unordered station pair, if any
    fn find_connection(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex>;

    /// Move a connection by moving both of its endpoint stations.
    ///
    /// Every other connection sharing either endpoint moves with it.
    fn move_connection(&mut self, edge: EdgeIndex, dx: i32, dy: i32) -> bool;

    /// Human-readable "{from} -> {to}" label for list displays
    fn connection_summary(&self, edge: EdgeIndex) -> Option<String>;
}

impl Connections for TransitNetwork {
    fn connection(&self, edge: EdgeIndex) -> Option<&Connection> {
        self.graph.edge_weight(edge)
    }

    fn connection_mut(&mut self, edge: EdgeIndex) -> Option<&mut Connection> {
        self.graph.edge_weight_mut(edge)
    }

    fn connection_endpoints(&self, edge: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(edge)
    }

    fn connections(&self) -> &[EdgeIndex] {
        &self.connection_order
    }

    fn connection_count(&self) -> usize {
        self.connection_order.len()
    }

    fn find_connection(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        if !self.graph.contains_node(a) || !self.graph.contains_node(b) {
            return None;
        }
        self.graph.find_edge(a, b)
    }

    fn move_connection(&mut self, edge: EdgeIndex, dx: i32, dy: i32) -> bool {
        let Some((a, b)) = self.graph.edge_endpoints(edge) else {
            return false;
        };
        if let Some(station) = self.graph.node_weight_mut(a) {
            station.move_by(dx, dy);
        }
        if let Some(station) = self.graph.node_weight_mut(b) {
            station.move_by(dx, dy);
        }
        true
    }

    fn connection_summary(&self, edge: EdgeIndex) -> Option<String> {
        let (a, b) = self.graph.edge_endpoints(edge)?;
        let from = self.graph.node_weight(a)?;
        let to = self.graph.node_weight(b)?;
        Some(format!("{from} -> {to}"))
    }
}
