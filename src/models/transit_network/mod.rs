use indexmap::IndexMap;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableUnGraph};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Connection, Station, TransportLine};

mod connections;
mod lines;
mod stations;

pub use connections::Connections;
pub use lines::Lines;
pub use stations::Stations;

/// The network aggregator: station arena, derived connection set, and line
/// registry.
///
/// Stations and connections live as node and edge weights of a stable
/// undirected graph, so the handles handed out at creation stay valid across
/// unrelated removals and across serialization. Two order registers sit next
/// to the graph: stations sorted by display name (re-sorted on every insert)
/// and connections in insertion order. Lines are keyed by their id and kept
/// in display order.
///
/// Connections are owned exclusively by the merge algorithm in [`Lines`]:
/// nothing else creates or removes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitNetwork {
    graph: StableUnGraph<Station, Connection>,
    #[serde(with = "node_index_vec_serde")]
    station_order: Vec<NodeIndex>,
    #[serde(with = "edge_index_vec_serde")]
    connection_order: Vec<EdgeIndex>,
    lines: IndexMap<u64, TransportLine>,
    /// Whether a highlight override is currently painted onto the
    /// connections. Transient: a loaded snapshot starts unhighlighted.
    #[serde(skip)]
    highlight_active: bool,
    /// Bumped on every full rebuild; lets callers holding connection handles
    /// detect that those handles may have been reissued.
    #[serde(skip)]
    rebuild_epoch: u64,
}

impl TransitNetwork {
    /// Create an empty network
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: StableUnGraph::default(),
            station_order: Vec::new(),
            connection_order: Vec::new(),
            lines: IndexMap::new(),
            highlight_active: false,
            rebuild_epoch: 0,
        }
    }

    /// Rebuild generation of the connection set; changes whenever existing
    /// connection handles may have been invalidated or reissued
    #[must_use]
    pub fn rebuild_epoch(&self) -> u64 {
        self.rebuild_epoch
    }

    /// Re-sort the station register by display name (stable, so equal names
    /// keep their insertion order)
    fn sort_stations(&mut self) {
        let graph = &self.graph;
        self.station_order.sort_by(|a, b| {
            let name_a = graph.node_weight(*a).map_or("", |s| s.name.as_str());
            let name_b = graph.node_weight(*b).map_or("", |s| s.name.as_str());
            name_a.cmp(name_b)
        });
    }

    /// Re-sort the line registry into display order
    fn sort_lines(&mut self) {
        self.lines
            .sort_by(|_, a, _, b| a.cmp_display_order(b));
    }
}

impl Default for TransitNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransitNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let station_names: Vec<&str> = self
            .station_order
            .iter()
            .filter_map(|&idx| self.graph.node_weight(idx))
            .map(|station| station.name.as_str())
            .collect();

        let connection_names: Vec<String> = self
            .connection_order
            .iter()
            .filter_map(|&edge| self.connection_summary(edge))
            .collect();

        write!(
            f,
            "Stations: {}\nConnections: {}",
            station_names.join(", "),
            connection_names.join(", ")
        )
    }
}

mod node_index_vec_serde {
    use petgraph::stable_graph::NodeIndex;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(indices: &[NodeIndex], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(indices.len()))?;
        for index in indices {
            let index_u32 = u32::try_from(index.index()).unwrap_or(u32::MAX);
            seq.serialize_element(&index_u32)?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<NodeIndex>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<u32>::deserialize(deserializer)?;
        Ok(raw.into_iter().map(|i| NodeIndex::new(i as usize)).collect())
    }
}

mod edge_index_vec_serde {
    use petgraph::stable_graph::EdgeIndex;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(indices: &[EdgeIndex], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(indices.len()))?;
        for index in indices {
            let index_u32 = u32::try_from(index.index()).unwrap_or(u32::MAX);
            seq.serialize_element(&index_u32)?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<EdgeIndex>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<u32>::deserialize(deserializer)?;
        Ok(raw.into_iter().map(|i| EdgeIndex::new(i as usize)).collect())
    }
}
