//! Net Classification Module
//!
//! Classifies nets by name into semantic net classes. Matching is
//! case-insensitive and runs an ordered rule chain: power, ground, clock,
//! high-speed, differential suffix, reset, analog, then default. A net named
//! `USB_DP` is therefore high-speed, never differential.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::parser::schema::NetRecord;

/// Semantic net classes. Declaration order is the order net classes are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NetClassType {
    Power,
    Ground,
    HighSpeed,
    Differential,
    Analog,
    Clock,
    Reset,
    Default,
}

impl NetClassType {
    pub const ALL: [NetClassType; 8] = [
        NetClassType::Power,
        NetClassType::Ground,
        NetClassType::HighSpeed,
        NetClassType::Differential,
        NetClassType::Analog,
        NetClassType::Clock,
        NetClassType::Reset,
        NetClassType::Default,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NetClassType::Power => "Power",
            NetClassType::Ground => "Ground",
            NetClassType::HighSpeed => "HighSpeed",
            NetClassType::Differential => "Differential",
            NetClassType::Analog => "Analog",
            NetClassType::Clock => "Clock",
            NetClassType::Reset => "Reset",
            NetClassType::Default => "Default",
        }
    }
}

impl std::fmt::Display for NetClassType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Power net patterns
const POWER_PATTERNS: &[&str] = &["VCC", "VDD", "3V3", "5V", "12V", "VBAT", "+V", "VIN", "VOUT"];

/// Ground net patterns
const GROUND_PATTERNS: &[&str] = &["GND", "VSS", "GROUND", "AGND", "DGND", "PGND"];

/// Clock signal patterns
const CLOCK_PATTERNS: &[&str] = &["CLK", "CLOCK", "XTAL"];

/// High-speed signal patterns
const HIGH_SPEED_PATTERNS: &[&str] = &["USB", "ETH", "HDMI", "PCIE", "LVDS", "MIPI"];

/// Differential pair suffixes
const DIFFERENTIAL_SUFFIXES: &[&str] = &["_P", "_N", "+", "-"];

/// Reset signal patterns
const RESET_PATTERNS: &[&str] = &["RST", "RESET", "NRST"];

/// Analog signal patterns
const ANALOG_PATTERNS: &[&str] = &["AIN", "AOUT", "VREF", "SENSE", "ANALOG"];

/// How a net rule inspects the uppercased name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetMatch {
    Contains(&'static [&'static str]),
    EndsWith(&'static [&'static str]),
}

impl NetMatch {
    pub fn matches(&self, name_upper: &str) -> bool {
        match self {
            NetMatch::Contains(patterns) => patterns.iter().any(|p| name_upper.contains(p)),
            NetMatch::EndsWith(suffixes) => suffixes.iter().any(|s| name_upper.ends_with(s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetRule {
    pub class: NetClassType,
    pub matcher: NetMatch,
}

static NET_RULES: &[NetRule] = &[
    NetRule { class: NetClassType::Power, matcher: NetMatch::Contains(POWER_PATTERNS) },
    NetRule { class: NetClassType::Ground, matcher: NetMatch::Contains(GROUND_PATTERNS) },
    NetRule { class: NetClassType::Clock, matcher: NetMatch::Contains(CLOCK_PATTERNS) },
    NetRule { class: NetClassType::HighSpeed, matcher: NetMatch::Contains(HIGH_SPEED_PATTERNS) },
    NetRule { class: NetClassType::Differential, matcher: NetMatch::EndsWith(DIFFERENTIAL_SUFFIXES) },
    NetRule { class: NetClassType::Reset, matcher: NetMatch::Contains(RESET_PATTERNS) },
    NetRule { class: NetClassType::Analog, matcher: NetMatch::Contains(ANALOG_PATTERNS) },
];

/// The net rule chain in evaluation order. `Default` is the implicit fallback.
pub fn net_rules() -> &'static [NetRule] {
    NET_RULES
}

/// Classify a single net by name
pub fn classify_net(net_name: &str) -> NetClassType {
    let name_upper = net_name.to_uppercase();

    NET_RULES
        .iter()
        .find(|rule| rule.matcher.matches(&name_upper))
        .map(|rule| rule.class)
        .unwrap_or(NetClassType::Default)
}

/// Net names grouped by class, iterated in `NetClassType` declaration order.
/// Each class keeps its nets in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedNets {
    classes: BTreeMap<NetClassType, Vec<String>>,
}

impl ClassifiedNets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class: NetClassType, net_name: impl Into<String>) {
        self.classes.entry(class).or_default().push(net_name.into());
    }

    /// Nets in a class; empty when the class has no members.
    pub fn nets(&self, class: NetClassType) -> &[String] {
        self.classes.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_members(&self, class: NetClassType) -> bool {
        !self.nets(class).is_empty()
    }

    /// Non-empty classes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (NetClassType, &[String])> {
        self.classes
            .iter()
            .filter(|(_, nets)| !nets.is_empty())
            .map(|(class, nets)| (*class, nets.as_slice()))
    }

    pub fn total_nets(&self) -> usize {
        self.classes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_nets() == 0
    }
}

/// Classify every named net. Nets with an empty name are skipped.
pub fn classify_nets<'a, I>(net_names: I) -> ClassifiedNets
where
    I: IntoIterator<Item = &'a str>,
{
    let mut classified = ClassifiedNets::new();
    for name in net_names {
        if name.is_empty() {
            continue;
        }
        classified.insert(classify_net(name), name);
    }
    classified
}

pub fn classify_net_records(nets: &[NetRecord]) -> ClassifiedNets {
    classify_nets(nets.iter().map(NetRecord::display_name))
}
