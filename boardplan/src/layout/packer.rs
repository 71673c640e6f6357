//! Row-wise grid packer.
//!
//! Components are grouped by functional block and each group is packed into
//! the bounding box of its zone. Packing starts at the top-left corner of the
//! zone (inset by the component spacing), runs left to right and wraps
//! downward into new rows. Placement coordinates are the center of each
//! component's estimated outline, rounded to 0.01 mm.
//!
//! When a row would end below the zone, packing restarts at the top of the
//! zone without resetting x. Placements in such overflowed rows may overlap
//! earlier ones; every restart is reported as a [`ZoneOverflow`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analyzer::block_classifier::{classify_record, BlockType};
use crate::layout::footprints::FootprintSizeTable;
use crate::layout::zone_policy::ZonePolicy;
use crate::layout::zones::{BoardGeometry, BoardZone};
use crate::parser::schema::ComponentRecord;

pub const DEFAULT_BOARD_WIDTH_MM: f64 = 100.0;
pub const DEFAULT_BOARD_HEIGHT_MM: f64 = 80.0;
pub const DEFAULT_MARGIN_MM: f64 = 5.0;
pub const DEFAULT_COMPONENT_SPACING_MM: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layer {
    Top,
    Bottom,
}

impl Layer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Top => "Top",
            Layer::Bottom => "Bottom",
        }
    }
}

/// A component position produced by one packing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentPlacement {
    pub designator: String,
    /// Center x in mm
    pub x: f64,
    /// Center y in mm
    pub y: f64,
    /// Degrees
    pub rotation: f64,
    pub layer: Layer,
    #[serde(rename = "block")]
    pub block_name: String,
    pub priority: u32,
}

/// A packing restart at the top of a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneOverflow {
    pub zone: BoardZone,
    pub block: BlockType,
    /// First component placed after the restart
    pub designator: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackOutcome {
    pub placements: Vec<ComponentPlacement>,
    pub overflows: Vec<ZoneOverflow>,
}

/// Round to 0.01 mm from the exact decimal value, ties to even.
fn round_mm(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

#[derive(Debug, Clone)]
pub struct GridPacker {
    geometry: BoardGeometry,
    spacing: f64,
    policy: ZonePolicy,
    sizes: FootprintSizeTable,
}

impl Default for GridPacker {
    fn default() -> Self {
        Self::new(BoardGeometry::new(
            DEFAULT_BOARD_WIDTH_MM,
            DEFAULT_BOARD_HEIGHT_MM,
            DEFAULT_MARGIN_MM,
        ))
    }
}

impl GridPacker {
    pub fn new(geometry: BoardGeometry) -> Self {
        Self {
            geometry,
            spacing: DEFAULT_COMPONENT_SPACING_MM,
            policy: ZonePolicy::default(),
            sizes: FootprintSizeTable::default(),
        }
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_policy(mut self, policy: ZonePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_sizes(mut self, sizes: FootprintSizeTable) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn geometry(&self) -> BoardGeometry {
        self.geometry
    }

    /// Place every component. Output order is block declaration order, then
    /// input order within a block.
    pub fn pack(&self, components: &[ComponentRecord]) -> Vec<ComponentPlacement> {
        self.pack_with_report(components).placements
    }

    pub fn pack_with_report(&self, components: &[ComponentRecord]) -> PackOutcome {
        let mut groups: BTreeMap<BlockType, Vec<&ComponentRecord>> = BTreeMap::new();
        for comp in components {
            groups.entry(classify_record(comp)).or_default().push(comp);
        }

        let mut outcome = PackOutcome {
            placements: Vec::with_capacity(components.len()),
            overflows: Vec::new(),
        };
        let mut priority = 0u32;

        for (block, comps) in &groups {
            let zone = self.policy.zone_for(*block);
            let bounds = self.geometry.zone_bounds(zone);

            let mut current_x = bounds.x_min + self.spacing;
            let mut current_y = bounds.y_max - self.spacing;
            let mut max_row_height = 0.0_f64;

            for comp in comps {
                let size = self.sizes.estimate(&comp.designator, &comp.footprint);

                if current_x + size.width > bounds.x_max - self.spacing {
                    current_x = bounds.x_min + self.spacing;
                    current_y -= max_row_height + self.spacing;
                    max_row_height = 0.0;
                }

                if current_y - size.height < bounds.y_min {
                    current_y = bounds.y_max - self.spacing;
                    outcome.overflows.push(ZoneOverflow {
                        zone,
                        block: *block,
                        designator: comp.designator.clone(),
                    });
                }

                outcome.placements.push(ComponentPlacement {
                    designator: comp.designator.clone(),
                    x: round_mm(current_x + size.width / 2.0),
                    y: round_mm(current_y - size.height / 2.0),
                    rotation: 0.0,
                    layer: Layer::Top,
                    block_name: block.as_str().to_string(),
                    priority,
                });

                current_x += size.width + self.spacing;
                max_row_height = max_row_height.max(size.height);
                priority += 1;
            }
        }

        outcome
    }
}

/// Pack with the default margin, spacing, zone policy and size table.
pub fn pack(components: &[ComponentRecord], board_width: f64, board_height: f64) -> Vec<ComponentPlacement> {
    GridPacker::new(BoardGeometry::new(board_width, board_height, DEFAULT_MARGIN_MM)).pack(components)
}
