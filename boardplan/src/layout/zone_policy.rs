use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::analyzer::block_classifier::BlockType;
use crate::layout::zones::BoardZone;

/// Default block placement. Power sits away from the analog corner, timing
/// shares the MCU cell, and connectors, protection and indicators go to the
/// board perimeter.
pub const DEFAULT_ZONE_ASSIGNMENTS: [(BlockType, BoardZone); 13] = [
    (BlockType::PowerSupply, BoardZone::BottomLeft),
    (BlockType::Mcu, BoardZone::Center),
    (BlockType::Fpga, BoardZone::Center),
    (BlockType::Memory, BoardZone::CenterRight),
    (BlockType::Interface, BoardZone::RightEdge),
    (BlockType::Analog, BoardZone::TopLeft),
    (BlockType::Protection, BoardZone::LeftEdge),
    (BlockType::Timing, BoardZone::Center),
    (BlockType::Connector, BoardZone::BottomEdge),
    (BlockType::LedDisplay, BoardZone::TopEdge),
    (BlockType::Sensor, BoardZone::TopRight),
    (BlockType::Passive, BoardZone::Center),
    (BlockType::Other, BoardZone::Center),
];

/// Block type to board zone lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonePolicy {
    assignments: HashMap<BlockType, BoardZone>,
}

impl Default for ZonePolicy {
    fn default() -> Self {
        Self {
            assignments: DEFAULT_ZONE_ASSIGNMENTS.iter().copied().collect(),
        }
    }
}

impl ZonePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the zone for one block type.
    pub fn with_assignment(mut self, block: BlockType, zone: BoardZone) -> Self {
        self.assignments.insert(block, zone);
        self
    }

    /// Zone for a block. Unassigned blocks go to the center.
    pub fn zone_for(&self, block: BlockType) -> BoardZone {
        self.assignments
            .get(&block)
            .copied()
            .unwrap_or(BoardZone::Center)
    }
}
