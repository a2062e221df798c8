/// Connection color while only bus lines travel a station pair
pub const BUS_COLOR: &str = "#FFC800";

/// Connection color while only tram lines travel a station pair
pub const TRAM_COLOR: &str = "#0099FF";

/// Connection color once both transport modes share a station pair
pub const MIXED_COLOR: &str = "#00FF00";

/// Color applied to a highlighted line's connections
pub const HIGHLIGHT_COLOR: &str = "#FF0000";

/// Color applied to every other connection while a line is highlighted
pub const DIMMED_COLOR: &str = "#808080";

/// Fill color of a station created without an explicit color
pub const DEFAULT_STATION_COLOR: &str = "#FFFFFF";

/// Hit radius of a user-created station (pixels)
pub const STATION_RADIUS: i32 = 10;

/// Hit radius of a bare positional station placeholder (pixels)
pub const UNNAMED_STATION_RADIUS: i32 = 5;

/// Stroke width of a freshly derived connection
pub const INITIAL_CONNECTION_WIDTH: i32 = 2;

/// Width added for every further line traversing an existing connection
pub const WIDTH_PER_LINE: i32 = 2;

/// Extra tolerance around a connection's stroke accepted by hit testing
pub const CONNECTION_HIT_MARGIN: i32 = 1;

/// Radius added to a station while it is picked, removed on deselection
pub const SELECTION_RADIUS_BONUS: i32 = 5;

/// Width added to a connection while it is picked, removed on deselection
pub const SELECTION_WIDTH_BONUS: i32 = 3;
