//! Functional Block Classifier
//!
//! Maps a component record onto one functional block type using its
//! reference designator prefix, value and description. The decision is an
//! ordered chain of rules evaluated top to bottom; the first rule whose
//! predicate holds decides the block.

use serde::{Deserialize, Serialize};

use crate::parser::schema::ComponentRecord;

/// Functional block categories. Declaration order fixes placement priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BlockType {
    #[serde(rename = "power")]
    PowerSupply,
    #[serde(rename = "mcu")]
    Mcu,
    #[serde(rename = "fpga")]
    Fpga,
    #[serde(rename = "memory")]
    Memory,
    #[serde(rename = "interface")]
    Interface,
    #[serde(rename = "analog")]
    Analog,
    #[serde(rename = "protection")]
    Protection,
    #[serde(rename = "timing")]
    Timing,
    #[serde(rename = "connector")]
    Connector,
    #[serde(rename = "display")]
    LedDisplay,
    #[serde(rename = "sensor")]
    Sensor,
    #[serde(rename = "passive")]
    Passive,
    #[serde(rename = "other")]
    Other,
}

impl BlockType {
    /// Every block type in declaration order.
    pub const ALL: [BlockType; 13] = [
        BlockType::PowerSupply,
        BlockType::Mcu,
        BlockType::Fpga,
        BlockType::Memory,
        BlockType::Interface,
        BlockType::Analog,
        BlockType::Protection,
        BlockType::Timing,
        BlockType::Connector,
        BlockType::LedDisplay,
        BlockType::Sensor,
        BlockType::Passive,
        BlockType::Other,
    ];

    /// Short block name carried by placements and commands.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::PowerSupply => "power",
            BlockType::Mcu => "mcu",
            BlockType::Fpga => "fpga",
            BlockType::Memory => "memory",
            BlockType::Interface => "interface",
            BlockType::Analog => "analog",
            BlockType::Protection => "protection",
            BlockType::Timing => "timing",
            BlockType::Connector => "connector",
            BlockType::LedDisplay => "display",
            BlockType::Sensor => "sensor",
            BlockType::Passive => "passive",
            BlockType::Other => "other",
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const MCU_KEYWORDS: &[&str] = &["STM32", "ATMEGA", "PIC", "ESP", "NRF", "MSP"];
const FPGA_KEYWORDS: &[&str] = &["FPGA", "CPLD", "SPARTAN", "CYCLONE"];
const MEMORY_KEYWORDS: &[&str] = &["FLASH", "EEPROM", "SRAM", "SDRAM"];
const POWER_KEYWORDS: &[&str] = &["LDO", "REGULATOR", "BUCK", "BOOST", "DC-DC"];
const INTERFACE_KEYWORDS: &[&str] = &["USB", "UART", "RS485", "CAN", "ETH"];
const ANALOG_KEYWORDS: &[&str] = &["OPAMP", "ADC", "DAC", "COMPARATOR"];
const PROTECTION_KEYWORDS: &[&str] = &["ESD", "TVS", "PROTECTION"];
const INDUCTANCE_UNITS: &[&str] = &["UH", "MH"];

/// Uppercased view of a component record. All rule predicates match on this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentKey {
    pub designator: String,
    pub value: String,
    pub description: String,
    pub footprint: String,
}

impl ComponentKey {
    pub fn new(designator: &str, value: &str, description: &str, footprint: &str) -> Self {
        Self {
            designator: designator.to_uppercase(),
            value: value.to_uppercase(),
            description: description.to_uppercase(),
            footprint: footprint.to_uppercase(),
        }
    }

    fn prefixed(&self, prefixes: &[&str]) -> bool {
        prefixes.iter().any(|p| self.designator.starts_with(p))
    }

    fn described_as(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.description.contains(k))
    }
}

impl From<&ComponentRecord> for ComponentKey {
    fn from(record: &ComponentRecord) -> Self {
        ComponentKey::new(
            &record.designator,
            &record.value,
            &record.description,
            &record.footprint,
        )
    }
}

/// One link of the classification chain.
#[derive(Clone, Copy)]
pub struct BlockRule {
    pub name: &'static str,
    pub applies: fn(&ComponentKey) -> bool,
    pub block: BlockType,
}

impl std::fmt::Debug for BlockRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockRule")
            .field("name", &self.name)
            .field("block", &self.block)
            .finish()
    }
}

// IC sub-types are checked MCU, FPGA, memory, power, interface, analog,
// protection before the generic IC fallback.
static BLOCK_RULES: &[BlockRule] = &[
    BlockRule {
        name: "ic_mcu",
        applies: |k| k.prefixed(&["U"]) && k.described_as(MCU_KEYWORDS),
        block: BlockType::Mcu,
    },
    BlockRule {
        name: "ic_fpga",
        applies: |k| k.prefixed(&["U"]) && k.described_as(FPGA_KEYWORDS),
        block: BlockType::Fpga,
    },
    BlockRule {
        name: "ic_memory",
        applies: |k| k.prefixed(&["U"]) && k.described_as(MEMORY_KEYWORDS),
        block: BlockType::Memory,
    },
    BlockRule {
        name: "ic_power",
        applies: |k| k.prefixed(&["U"]) && k.described_as(POWER_KEYWORDS),
        block: BlockType::PowerSupply,
    },
    BlockRule {
        name: "ic_interface",
        applies: |k| k.prefixed(&["U"]) && k.described_as(INTERFACE_KEYWORDS),
        block: BlockType::Interface,
    },
    BlockRule {
        name: "ic_analog",
        applies: |k| k.prefixed(&["U"]) && k.described_as(ANALOG_KEYWORDS),
        block: BlockType::Analog,
    },
    BlockRule {
        name: "ic_protection",
        applies: |k| k.prefixed(&["U"]) && k.described_as(PROTECTION_KEYWORDS),
        block: BlockType::Protection,
    },
    BlockRule {
        name: "ic_generic",
        applies: |k| k.prefixed(&["U"]),
        block: BlockType::Other,
    },
    BlockRule {
        name: "connector",
        applies: |k| k.prefixed(&["J", "P"]),
        block: BlockType::Connector,
    },
    BlockRule {
        name: "crystal",
        applies: |k| k.prefixed(&["Y", "X"]),
        block: BlockType::Timing,
    },
    BlockRule {
        name: "diode_led",
        applies: |k| k.prefixed(&["D"]) && k.description.contains("LED"),
        block: BlockType::LedDisplay,
    },
    BlockRule {
        name: "diode",
        applies: |k| k.prefixed(&["D"]),
        block: BlockType::Protection,
    },
    BlockRule {
        name: "inductor_power",
        applies: |k| k.prefixed(&["L"]) && INDUCTANCE_UNITS.iter().any(|u| k.value.contains(u)),
        block: BlockType::PowerSupply,
    },
    BlockRule {
        name: "inductor",
        applies: |k| k.prefixed(&["L"]),
        block: BlockType::Analog,
    },
    BlockRule {
        name: "passive",
        applies: |k| k.prefixed(&["R", "C"]),
        block: BlockType::Passive,
    },
    BlockRule {
        name: "transistor",
        applies: |k| k.prefixed(&["Q"]),
        block: BlockType::Analog,
    },
    BlockRule {
        name: "fuse",
        applies: |k| k.prefixed(&["F"]),
        block: BlockType::Protection,
    },
];

/// The classification chain in evaluation order.
pub fn block_rules() -> &'static [BlockRule] {
    BLOCK_RULES
}

/// Name of the first rule that fires, or `None` when the fallback applies.
pub fn matching_rule(key: &ComponentKey) -> Option<&'static BlockRule> {
    BLOCK_RULES.iter().find(|rule| (rule.applies)(key))
}

/// Classify a component into a functional block. Case-insensitive; never fails.
pub fn classify_component(
    designator: &str,
    value: &str,
    description: &str,
    footprint: &str,
) -> BlockType {
    let key = ComponentKey::new(designator, value, description, footprint);
    matching_rule(&key)
        .map(|rule| rule.block)
        .unwrap_or(BlockType::Other)
}

pub fn classify_record(record: &ComponentRecord) -> BlockType {
    classify_component(
        &record.designator,
        &record.value,
        &record.description,
        &record.footprint,
    )
}
