//! Placement command emission for the external batch executor.

use serde::{Deserialize, Serialize};

use crate::layout::packer::{ComponentPlacement, Layer};

pub const MOVE_COMPONENT: &str = "move_component";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveParameters {
    pub designator: String,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub layer: Layer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementCommand {
    pub command: String,
    pub parameters: MoveParameters,
    pub priority: u32,
    pub block: String,
}

impl From<&ComponentPlacement> for PlacementCommand {
    fn from(placement: &ComponentPlacement) -> Self {
        Self {
            command: MOVE_COMPONENT.to_string(),
            parameters: MoveParameters {
                designator: placement.designator.clone(),
                x: placement.x,
                y: placement.y,
                rotation: placement.rotation,
                layer: placement.layer,
            },
            priority: placement.priority,
            block: placement.block_name.clone(),
        }
    }
}

/// One `move_component` command per placement, in placement order.
pub fn to_commands(placements: &[ComponentPlacement]) -> Vec<PlacementCommand> {
    placements.iter().map(PlacementCommand::from).collect()
}

/// Result object reported back by the executor that applies commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl CommandOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
