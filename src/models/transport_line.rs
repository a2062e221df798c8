use petgraph::stable_graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::constants::{BUS_COLOR, TRAM_COLOR};

/// The two supported transport modes.
///
/// Exactly two members: every line is a bus or a tram line, and the color
/// policy never needs an "unknown" branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportMode {
    Bus,
    Tram,
}

impl TransportMode {
    /// Connection color for a pair served by this mode alone
    #[must_use]
    pub fn base_color(self) -> &'static str {
        match self {
            Self::Bus => BUS_COLOR,
            Self::Tram => TRAM_COLOR,
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "Bus"),
            Self::Tram => write!(f, "Tram"),
        }
    }
}

/// One route in one direction: an ordered stop sequence over the station
/// arena.
///
/// The line number is a string on purpose ("145", but also "0L"/"0P").
/// `destination` is a snapshot of the last stop's name, taken when that stop
/// was appended - renaming the station later does not rewrite it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransportLine {
    #[serde(default = "crate::models::id::generate_id_default")]
    pub id: u64,
    pub number: String,
    pub mode: TransportMode,
    #[serde(with = "node_index_vec_serde")]
    stops: Vec<NodeIndex>,
    destination: String,
}

impl TransportLine {
    /// Create an empty line with no stops and an empty destination
    #[must_use]
    pub fn new(number: String, mode: TransportMode) -> Self {
        Self {
            id: crate::models::id::generate_id(),
            number,
            mode,
            stops: Vec::new(),
            destination: String::new(),
        }
    }

    /// Append a stop; the line now terminates at `station_name`
    pub fn push_stop(&mut self, station: NodeIndex, station_name: &str) {
        self.stops.push(station);
        self.destination = station_name.to_string();
    }

    /// Replace the whole stop sequence.
    ///
    /// The destination becomes `last_station_name`, or empty when the new
    /// sequence has no resolvable terminus.
    pub fn replace_stops(&mut self, stops: Vec<NodeIndex>, last_station_name: Option<&str>) {
        self.stops = stops;
        self.destination = last_station_name.unwrap_or_default().to_string();
    }

    /// Whether the line stops at the station (handle identity)
    #[must_use]
    pub fn contains_station(&self, station: NodeIndex) -> bool {
        self.stops.contains(&station)
    }

    /// Whether the line travels directly between the two stations, i.e.
    /// whether they appear as a consecutive pair (in either order) anywhere
    /// in the stop sequence.
    #[must_use]
    pub fn connects(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.stops
            .windows(2)
            .any(|pair| (pair[0] == a && pair[1] == b) || (pair[0] == b && pair[1] == a))
    }

    #[must_use]
    pub fn stops(&self) -> &[NodeIndex] {
        &self.stops
    }

    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Display ordering: line numbers compare numerically when both parse as
    /// integers and lexicographically otherwise, with the destination
    /// breaking ties.
    #[must_use]
    pub fn cmp_display_order(&self, other: &Self) -> Ordering {
        let by_number = match (self.number.parse::<i64>(), other.number.parse::<i64>()) {
            (Ok(a), Ok(b)) => a.cmp(&b),
            _ => self.number.cmp(&other.number),
        };
        by_number.then_with(|| self.destination.cmp(&other.destination))
    }
}

impl fmt::Display for TransportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.number, self.destination, self.mode)
    }
}

mod node_index_vec_serde {
    use petgraph::stable_graph::NodeIndex;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(stops: &[NodeIndex], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(stops.len()))?;
        for stop in stops {
            let index_u32 = u32::try_from(stop.index()).unwrap_or(u32::MAX);
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
