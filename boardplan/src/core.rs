//! Core planning API shared by the CLI and library users.
//! No file, network or process I/O.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analyzer::net_classifier::classify_net_records;
use crate::analyzer::review::{review_design, DesignReview};
use crate::analyzer::signals::{analyze_net_records, SignalAnalysis};
use crate::analyzer::summary::{
    identify_critical_components, infer_design_type, summarize_components, ComponentSummary,
    CriticalComponent, DesignType,
};
use crate::constraints::defaults::RuleDefaults;
use crate::constraints::generator::{ConstraintGenerator, ConstraintSet};
use crate::constraints::rules::DesignRule;
use crate::layout::commands::{to_commands, PlacementCommand};
use crate::layout::footprints::FootprintSizeTable;
use crate::layout::packer::{
    ComponentPlacement, GridPacker, ZoneOverflow, DEFAULT_BOARD_HEIGHT_MM, DEFAULT_BOARD_WIDTH_MM,
    DEFAULT_COMPONENT_SPACING_MM, DEFAULT_MARGIN_MM,
};
use crate::layout::zone_policy::ZonePolicy;
use crate::layout::zones::BoardGeometry;
use crate::parser::schema::{DesignExport, NetRecord};

#[derive(Debug, thiserror::Error)]
pub enum BoardPlanError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid board: {0}")]
    InvalidBoard(String),
}

fn default_board_width() -> f64 {
    DEFAULT_BOARD_WIDTH_MM
}

fn default_board_height() -> f64 {
    DEFAULT_BOARD_HEIGHT_MM
}

fn default_margin() -> f64 {
    DEFAULT_MARGIN_MM
}

fn default_spacing() -> f64 {
    DEFAULT_COMPONENT_SPACING_MM
}

/// Board and packing options for a layout run, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    #[serde(default = "default_board_width")]
    pub board_width_mm: f64,
    #[serde(default = "default_board_height")]
    pub board_height_mm: f64,
    #[serde(default = "default_margin")]
    pub margin_mm: f64,
    #[serde(default = "default_spacing")]
    pub component_spacing_mm: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            board_width_mm: default_board_width(),
            board_height_mm: default_board_height(),
            margin_mm: default_margin(),
            component_spacing_mm: default_spacing(),
        }
    }
}

impl LayoutOptions {
    /// Reject non-finite or negative dimensions. A board with no usable area
    /// inside the margin is accepted.
    pub fn validate(&self) -> Result<(), BoardPlanError> {
        let fields = [
            ("board width", self.board_width_mm),
            ("board height", self.board_height_mm),
            ("margin", self.margin_mm),
            ("component spacing", self.component_spacing_mm),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(BoardPlanError::InvalidBoard(format!("{} must be finite, got {}", name, value)));
            }
            if value < 0.0 {
                return Err(BoardPlanError::InvalidBoard(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn geometry(&self) -> BoardGeometry {
        BoardGeometry::new(self.board_width_mm, self.board_height_mm, self.margin_mm)
    }
}

/// Planner configuration loaded from JSON. Every key is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub layout: LayoutOptions,
    #[serde(default)]
    pub rules: RuleDefaults,
}

impl PlannerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, BoardPlanError> {
        let config: PlannerConfig = serde_json::from_str(json)?;
        config.layout.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

/// Placement document: board size, placements and the rules that apply to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub board: BoardSize,
    pub placements: Vec<ComponentPlacement>,
    pub constraints: Vec<DesignRule>,
    /// Zones that ran out of room; placements after a restart may overlap
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overflows: Vec<ZoneOverflow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementSummary {
    pub total_components: usize,
    pub by_block: BTreeMap<String, usize>,
    pub board_size: BoardSize,
    pub constraints_count: usize,
}

impl LayoutPlan {
    pub fn summary(&self) -> PlacementSummary {
        let mut by_block = BTreeMap::new();
        for placement in &self.placements {
            *by_block.entry(placement.block_name.clone()).or_insert(0) += 1;
        }
        PlacementSummary {
            total_components: self.placements.len(),
            by_block,
            board_size: self.board,
            constraints_count: self.constraints.len(),
        }
    }

    pub fn commands(&self) -> Vec<PlacementCommand> {
        to_commands(&self.placements)
    }

    pub fn to_json(&self) -> Result<String, BoardPlanError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, BoardPlanError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Design overview produced alongside layout planning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignAnalysis {
    pub component_summary: ComponentSummary,
    pub design_type: DesignType,
    pub critical_components: Vec<CriticalComponent>,
    pub signals: SignalAnalysis,
    pub review: DesignReview,
}

/// Planning API used by the CLI.
#[derive(Debug, Clone)]
pub struct BoardPlanCore {
    config: PlannerConfig,
    policy: ZonePolicy,
    sizes: FootprintSizeTable,
}

impl Default for BoardPlanCore {
    fn default() -> Self {
        Self {
            config: PlannerConfig::default(),
            policy: ZonePolicy::default(),
            sizes: FootprintSizeTable::default(),
        }
    }
}

impl BoardPlanCore {
    pub fn new(config: PlannerConfig) -> Result<Self, BoardPlanError> {
        config.layout.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn with_policy(mut self, policy: ZonePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_sizes(mut self, sizes: FootprintSizeTable) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Decode a design export (`{components, nets}`).
    pub fn load_export(json: &str) -> Result<DesignExport, BoardPlanError> {
        DesignExport::from_json_str(json).map_err(|e| BoardPlanError::Parse(e.to_string()))
    }

    pub fn packer(&self) -> GridPacker {
        GridPacker::new(self.config.layout.geometry())
            .with_spacing(self.config.layout.component_spacing_mm)
            .with_policy(self.policy.clone())
            .with_sizes(self.sizes.clone())
    }

    pub fn generator(&self) -> ConstraintGenerator {
        ConstraintGenerator::new(self.config.rules)
    }

    /// Place every component and attach the rules inferred from the nets.
    pub fn plan_layout(&self, export: &DesignExport) -> LayoutPlan {
        let layout = &self.config.layout;
        tracing::debug!(
            "Packing {} components on {}x{} mm board",
            export.components.len(),
            layout.board_width_mm,
            layout.board_height_mm
        );

        let outcome = self.packer().pack_with_report(&export.components);
        for overflow in &outcome.overflows {
            tracing::warn!(
                "Zone {} is full for block {}; placement restarts at the zone top from {}",
                overflow.zone,
                overflow.block,
                overflow.designator
            );
        }

        let constraints = self.generate_constraints(&export.nets).rules;

        LayoutPlan {
            board: BoardSize {
                width_mm: layout.board_width_mm,
                height_mm: layout.board_height_mm,
            },
            placements: outcome.placements,
            constraints,
            overflows: outcome.overflows,
        }
    }

    pub fn generate_constraints(&self, nets: &[NetRecord]) -> ConstraintSet {
        let classified = classify_net_records(nets);
        tracing::debug!(
            "Classified {} nets into {} net classes",
            classified.total_nets(),
            classified.iter().count()
        );

        let set = self.generator().generate(&classified);
        tracing::debug!("Generated {} rules", set.rules.len());
        set
    }

    pub fn commands(&self, export: &DesignExport) -> Vec<PlacementCommand> {
        let commands = self.plan_layout(export).commands();
        tracing::debug!("Emitted {} placement commands", commands.len());
        commands
    }

    pub fn analyze(&self, export: &DesignExport) -> DesignAnalysis {
        let components = &export.components;
        tracing::debug!(
            "Analyzing {} components and {} nets",
            components.len(),
            export.nets.len()
        );

        let signals = analyze_net_records(&export.nets);
        if signals.has_differential_pairs() {
            tracing::debug!("Found differential pairs: {}", signals.differential_pairs.join(", "));
        }

        DesignAnalysis {
            component_summary: summarize_components(components),
            design_type: infer_design_type(components),
            critical_components: identify_critical_components(components),
            signals,
            review: review_design(components),
        }
    }
}
