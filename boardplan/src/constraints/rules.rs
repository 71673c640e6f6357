use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Design rule kinds understood by the CAD tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    Clearance,
    Width,
    Via,
    DifferentialPair,
    LengthMatch,
    NetClass,
    ComponentClearance,
    PlaneClearance,
    SolderMask,
}

impl RuleType {
    pub const ALL: [RuleType; 9] = [
        RuleType::Clearance,
        RuleType::Width,
        RuleType::Via,
        RuleType::DifferentialPair,
        RuleType::LengthMatch,
        RuleType::NetClass,
        RuleType::ComponentClearance,
        RuleType::PlaneClearance,
        RuleType::SolderMask,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::Clearance => "clearance",
            RuleType::Width => "width",
            RuleType::Via => "via",
            RuleType::DifferentialPair => "differential_pair",
            RuleType::LengthMatch => "length_match",
            RuleType::NetClass => "net_class",
            RuleType::ComponentClearance => "component_clearance",
            RuleType::PlaneClearance => "plane_clearance",
            RuleType::SolderMask => "solder_mask",
        }
    }
}

impl std::fmt::Display for RuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule or net class property: millimeters, a flag, or descriptive text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl PropertyValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Flag(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Flag(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

pub type Properties = BTreeMap<String, PropertyValue>;

/// Build a property map from `(key, value)` pairs.
pub fn properties<const N: usize>(entries: [(&str, PropertyValue); N]) -> Properties {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

fn default_true() -> bool {
    true
}

fn default_priority() -> i32 {
    1
}

fn default_scope() -> String {
    "All".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRule {
    pub name: String,
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_priority")]
    pub priority: i32,
    /// Object selector, e.g. `All` or `InNetClass('Power')`
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default)]
    pub properties: Properties,
}

impl DesignRule {
    pub fn new(name: impl Into<String>, rule_type: RuleType) -> Self {
        Self {
            name: name.into(),
            rule_type,
            enabled: true,
            priority: default_priority(),
            scope: default_scope(),
            properties: Properties::new(),
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.properties.get(key).and_then(PropertyValue::as_f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetClass {
    pub name: String,
    pub nets: Vec<String>,
    #[serde(default)]
    pub properties: Properties,
}
