mod connection;
pub mod id;
mod project;
mod station;
mod transit_network;
mod transport_line;

pub use connection::Connection;
pub use project::{Project, ProjectMetadata};
pub use station::Station;
pub use transit_network::{Connections, Lines, Stations, TransitNetwork};
pub use transport_line::{TransportLine, TransportMode};
