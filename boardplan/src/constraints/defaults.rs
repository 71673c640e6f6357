use serde::{Deserialize, Serialize};

use crate::analyzer::net_classifier::NetClassType;
use crate::constraints::rules::{properties, Properties};

/// Numeric rule defaults, all in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleDefaults {
    #[serde(default = "default_clearance")]
    pub clearance: f64,
    #[serde(default = "default_track_width")]
    pub track_width: f64,
    #[serde(default = "default_max_track_width")]
    pub max_track_width: f64,
    #[serde(default = "default_power_track_width")]
    pub power_track_width: f64,
    #[serde(default = "default_ground_track_width")]
    pub ground_track_width: f64,
    #[serde(default = "default_highspeed_clearance")]
    pub highspeed_clearance: f64,
    #[serde(default = "default_via_hole")]
    pub via_hole: f64,
    #[serde(default = "default_via_diameter")]
    pub via_diameter: f64,
    #[serde(default = "default_diff_pair_gap")]
    pub diff_pair_gap: f64,
    #[serde(default = "default_diff_pair_width")]
    pub diff_pair_width: f64,
}

fn default_clearance() -> f64 {
    0.2
}

fn default_track_width() -> f64 {
    0.25
}

fn default_max_track_width() -> f64 {
    2.0
}

fn default_power_track_width() -> f64 {
    0.5
}

fn default_ground_track_width() -> f64 {
    0.5
}

fn default_highspeed_clearance() -> f64 {
    0.3
}

fn default_via_hole() -> f64 {
    0.3
}

fn default_via_diameter() -> f64 {
    0.6
}

fn default_diff_pair_gap() -> f64 {
    0.15
}

fn default_diff_pair_width() -> f64 {
    0.2
}

impl Default for RuleDefaults {
    fn default() -> Self {
        Self {
            clearance: default_clearance(),
            track_width: default_track_width(),
            max_track_width: default_max_track_width(),
            power_track_width: default_power_track_width(),
            ground_track_width: default_ground_track_width(),
            highspeed_clearance: default_highspeed_clearance(),
            via_hole: default_via_hole(),
            via_diameter: default_via_diameter(),
            diff_pair_gap: default_diff_pair_gap(),
            diff_pair_width: default_diff_pair_width(),
        }
    }
}

/// Display colors for the net classes, as used by the CAD tool's net class panel.
pub fn class_color(class: NetClassType) -> Option<&'static str> {
    match class {
        NetClassType::Power => Some("#FF0000"),
        NetClassType::Ground => Some("#000000"),
        NetClassType::HighSpeed => Some("#0000FF"),
        NetClassType::Differential => Some("#FF00FF"),
        NetClassType::Clock => Some("#FFFF00"),
        NetClassType::Analog => Some("#00FF00"),
        NetClassType::Reset | NetClassType::Default => None,
    }
}

/// Routing properties attached to a generated net class.
pub fn class_properties(class: NetClassType, defaults: &RuleDefaults) -> Properties {
    let color = class_color(class).unwrap_or_default();
    match class {
        NetClassType::Power => properties([
            ("track_width", defaults.power_track_width.into()),
            ("clearance", defaults.clearance.into()),
            ("color", color.into()),
        ]),
        NetClassType::Ground => properties([
            ("track_width", defaults.ground_track_width.into()),
            ("clearance", defaults.clearance.into()),
            ("color", color.into()),
        ]),
        NetClassType::HighSpeed => properties([
            ("track_width", defaults.diff_pair_width.into()),
            ("clearance", defaults.highspeed_clearance.into()),
            ("length_matching", true.into()),
            ("color", color.into()),
        ]),
        NetClassType::Differential => properties([
            ("track_width", defaults.diff_pair_width.into()),
            ("clearance", defaults.highspeed_clearance.into()),
            ("differential_pair", true.into()),
            ("pair_gap", defaults.diff_pair_gap.into()),
            ("color", color.into()),
        ]),
        NetClassType::Clock => properties([
            ("track_width", defaults.track_width.into()),
            ("clearance", defaults.highspeed_clearance.into()),
            ("short_trace", true.into()),
            ("color", color.into()),
        ]),
        NetClassType::Analog => properties([
            ("track_width", defaults.track_width.into()),
            ("clearance", defaults.highspeed_clearance.into()),
            ("guard_ring", true.into()),
            ("color", color.into()),
        ]),
        NetClassType::Reset | NetClassType::Default => {
            properties([("track_width", defaults.track_width.into())])
        }
    }
}
