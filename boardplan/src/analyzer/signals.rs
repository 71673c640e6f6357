//! Signal overview
//!
//! Buckets nets into power, ground, high-speed and analog groups and finds
//! differential pairs. This is a coarser view than the net classifier: clock
//! nets count as high-speed, and pairs are named by their base net so a layout
//! tool can route the two halves together.

use serde::{Deserialize, Serialize};

use crate::parser::schema::NetRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Power,
    Ground,
    HighSpeed,
    Analog,
}

/// Ordered buckets; the first bucket with a matching pattern wins.
const SIGNAL_BUCKETS: &[(SignalKind, &[&str])] = &[
    (SignalKind::Power, &["VCC", "VDD", "3V3", "5V", "12V", "VBAT", "+V"]),
    (SignalKind::Ground, &["GND", "VSS", "GROUND", "AGND", "DGND"]),
    (SignalKind::HighSpeed, &["CLK", "CLOCK", "USB", "ETH", "HDMI", "PCIE"]),
    (SignalKind::Analog, &["AIN", "AOUT", "VREF", "SENSE"]),
];

/// Positive-half suffixes, matched case-sensitively.
const POSITIVE_SUFFIXES: &[&str] = &["_P", "+"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalAnalysis {
    pub power_nets: Vec<String>,
    pub ground_nets: Vec<String>,
    pub high_speed_nets: Vec<String>,
    pub analog_nets: Vec<String>,
    /// Base names of differential pairs, one per positive net
    pub differential_pairs: Vec<String>,
}

impl SignalAnalysis {
    pub fn nets(&self, kind: SignalKind) -> &[String] {
        match kind {
            SignalKind::Power => &self.power_nets,
            SignalKind::Ground => &self.ground_nets,
            SignalKind::HighSpeed => &self.high_speed_nets,
            SignalKind::Analog => &self.analog_nets,
        }
    }

    fn nets_mut(&mut self, kind: SignalKind) -> &mut Vec<String> {
        match kind {
            SignalKind::Power => &mut self.power_nets,
            SignalKind::Ground => &mut self.ground_nets,
            SignalKind::HighSpeed => &mut self.high_speed_nets,
            SignalKind::Analog => &mut self.analog_nets,
        }
    }

    pub fn has_differential_pairs(&self) -> bool {
        !self.differential_pairs.is_empty()
    }
}

pub fn signal_kind(net_name: &str) -> Option<SignalKind> {
    let upper = net_name.to_uppercase();
    SIGNAL_BUCKETS
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|p| upper.contains(p)))
        .map(|(kind, _)| *kind)
}

/// Base name of a differential pair when `net_name` is its positive half
/// (`USB_D_P` gives `USB_D`, `TX+` gives `TX`).
pub fn differential_base(net_name: &str) -> Option<&str> {
    POSITIVE_SUFFIXES
        .iter()
        .find_map(|suffix| net_name.strip_suffix(suffix))
        .filter(|base| !base.is_empty())
}

pub fn analyze_signals<'a, I>(net_names: I) -> SignalAnalysis
where
    I: IntoIterator<Item = &'a str>,
{
    let mut analysis = SignalAnalysis::default();
    for name in net_names {
        if let Some(kind) = signal_kind(name) {
            analysis.nets_mut(kind).push(name.to_string());
        }
        if let Some(base) = differential_base(name) {
            analysis.differential_pairs.push(base.to_string());
        }
    }
    analysis
}

pub fn analyze_net_records(nets: &[NetRecord]) -> SignalAnalysis {
    analyze_signals(nets.iter().map(NetRecord::display_name))
}
