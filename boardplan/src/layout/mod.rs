//! Zone-based component placement.
//!
//! Components are classified into functional blocks, each block is mapped
//! to a board zone, and each zone is packed row by row. The resulting
//! placements are emitted as `move_component` commands.

pub mod commands;
pub mod footprints;
pub mod packer;
pub mod zone_policy;
pub mod zones;

pub use commands::{to_commands, CommandOutcome, MoveParameters, PlacementCommand};
pub use footprints::{ComponentSize, FootprintSizeTable};
pub use packer::{pack, ComponentPlacement, GridPacker, Layer, PackOutcome, ZoneOverflow};
pub use zone_policy::{ZonePolicy, DEFAULT_ZONE_ASSIGNMENTS};
pub use zones::{zone_bounds, zone_bounds_by_name, BoardGeometry, BoardZone, ZoneBounds};
