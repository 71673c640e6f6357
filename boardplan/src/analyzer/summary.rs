//! Design overview: component counts, design-type inference and the
//! components that need special care during layout.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::parser::schema::ComponentRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSummary {
    pub total: usize,
    pub by_prefix: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
}

/// Designator prefix: every alphabetic character, uppercased ("U1A" gives "UA").
pub fn designator_prefix(designator: &str) -> String {
    designator
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_uppercase)
        .collect()
}

fn prefix_type_name(prefix: &str) -> String {
    let name = match prefix {
        "R" => "Resistors",
        "C" => "Capacitors",
        "L" => "Inductors",
        "U" => "ICs",
        "Q" => "Transistors",
        "D" => "Diodes",
        "J" => "Connectors",
        "Y" => "Crystals",
        "F" => "Fuses",
        "FB" => "Ferrite Beads",
        other => return format!("Other ({})", other),
    };
    name.to_string()
}

pub fn summarize_components(components: &[ComponentRecord]) -> ComponentSummary {
    let mut summary = ComponentSummary {
        total: components.len(),
        ..ComponentSummary::default()
    };

    for comp in components {
        *summary
            .by_prefix
            .entry(designator_prefix(&comp.designator))
            .or_insert(0) += 1;
    }

    for (prefix, count) in &summary.by_prefix {
        *summary.by_type.entry(prefix_type_name(prefix)).or_insert(0) += count;
    }

    summary
}

/// Broad design category inferred from part names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DesignType {
    #[serde(rename = "Microcontroller Board")]
    MicrocontrollerBoard,
    #[serde(rename = "FPGA Board")]
    FpgaBoard,
    #[serde(rename = "Power Supply")]
    PowerSupply,
    #[serde(rename = "RF/Wireless Module")]
    RfModule,
    #[serde(rename = "Analog Circuit")]
    AnalogCircuit,
    #[serde(rename = "Mixed Signal Board")]
    MixedSignal,
}

impl DesignType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DesignType::MicrocontrollerBoard => "Microcontroller Board",
            DesignType::FpgaBoard => "FPGA Board",
            DesignType::PowerSupply => "Power Supply",
            DesignType::RfModule => "RF/Wireless Module",
            DesignType::AnalogCircuit => "Analog Circuit",
            DesignType::MixedSignal => "Mixed Signal Board",
        }
    }
}

impl std::fmt::Display for DesignType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const DESIGN_TYPE_INDICATORS: &[(&[&str], DesignType)] = &[
    (&["STM32", "ATMEGA", "PIC", "ESP32", "NRF"], DesignType::MicrocontrollerBoard),
    (&["FPGA", "CPLD", "SPARTAN", "CYCLONE"], DesignType::FpgaBoard),
    (&["LM2596", "LM7805", "MP1584", "TPS5430"], DesignType::PowerSupply),
    (&["RF", "ANTENNA", "BALUN", "LNA"], DesignType::RfModule),
    (&["OPAMP", "OPA", "LM358", "TL072"], DesignType::AnalogCircuit),
];

pub fn infer_design_type(components: &[ComponentRecord]) -> DesignType {
    let haystack = components
        .iter()
        .map(|c| format!("{} {} {}", c.designator, c.value, c.description))
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase();

    DESIGN_TYPE_INDICATORS
        .iter()
        .find(|(indicators, _)| indicators.iter().any(|i| haystack.contains(i)))
        .map(|(_, design_type)| *design_type)
        .unwrap_or(DesignType::MixedSignal)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalComponent {
    pub designator: String,
    pub criticality: Criticality,
    pub reason: String,
}

pub fn identify_critical_components(components: &[ComponentRecord]) -> Vec<CriticalComponent> {
    components
        .iter()
        .filter_map(|comp| {
            let designator = comp.designator.to_uppercase();
            let value = comp.value.to_uppercase();

            let (criticality, reason) = if designator.starts_with('U') {
                (Criticality::High, "Main IC - requires proper decoupling and routing")
            } else if designator.starts_with('Y') {
                (Criticality::High, "Crystal - place close to IC, short traces, ground plane")
            } else if designator.starts_with('L') && (value.contains("UH") || value.contains("MH")) {
                (Criticality::Medium, "Inductor - consider EMI, keep sensitive circuits away")
            } else if designator.starts_with('J') {
                (Criticality::Medium, "Connector - must be on board edge, consider mechanical")
            } else {
                return None;
            };

            Some(CriticalComponent {
                designator: comp.designator.clone(),
                criticality,
                reason: reason.to_string(),
            })
        })
        .collect()
}
