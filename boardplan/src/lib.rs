//! BoardPlan - component placement and design rule inference for PCB layouts
//!
//! This library turns a schematic/PCB export (components and nets) into a
//! zone-based component placement, a set of design rules with net classes,
//! and a list of `move_component` commands for an external executor.
//!
//! # Quick Start
//!
//! ```no_run
//! use boardplan::{BoardPlanCore, PlannerConfig};
//!
//! let json = std::fs::read_to_string("design.json").unwrap();
//! let export = BoardPlanCore::load_export(&json).unwrap();
//! let core = BoardPlanCore::new(PlannerConfig::default()).unwrap();
//!
//! let plan = core.plan_layout(&export);
//! for placement in &plan.placements {
//!     println!("{} -> ({}, {})", placement.designator, placement.x, placement.y);
//! }
//! ```
//!
//! # Features
//!
//! - **Classification**: functional blocks for components, semantic classes for nets
//! - **Placement**: zone partitioning and row-wise grid packing
//! - **Design rules**: clearance, width, via and differential pair rules with a script export
//! - **Analysis**: component summary, design type, critical parts and a quick review

pub mod analyzer;
pub mod constraints;
pub mod core;
pub mod layout;
pub mod parser;

// Re-export main types
pub use analyzer::block_classifier::{classify_component, BlockType};
pub use analyzer::net_classifier::{classify_net, classify_nets, ClassifiedNets, NetClassType};
pub use analyzer::signals::{analyze_signals, SignalAnalysis};
pub use constraints::generator::{ConstraintGenerator, ConstraintSet, ConstraintSummary};
pub use constraints::rules::{DesignRule, NetClass, RuleType};
pub use core::{
    BoardPlanCore, BoardPlanError, BoardSize, DesignAnalysis, LayoutOptions, LayoutPlan, PlacementSummary,
    PlannerConfig,
};
pub use layout::commands::{to_commands, CommandOutcome, PlacementCommand};
pub use layout::packer::{pack, ComponentPlacement, GridPacker, ZoneOverflow};
pub use layout::zones::{zone_bounds, BoardZone, ZoneBounds};
pub use parser::schema::{ComponentRecord, DesignExport, NetRecord};

/// Decode a design export (convenience wrapper).
pub fn load_export(json: &str) -> Result<DesignExport, BoardPlanError> {
    BoardPlanCore::load_export(json)
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        BoardPlanCore, BoardPlanError, ComponentPlacement, ComponentRecord, DesignExport, DesignRule, LayoutOptions,
        LayoutPlan, NetRecord, PlannerConfig,
    };
}
