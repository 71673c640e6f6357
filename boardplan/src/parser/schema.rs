use serde::{Deserialize, Deserializer, Serialize};

/// One component as exported from the schematic. Never mutated by the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRecord {
    #[serde(default, deserialize_with = "string_or_null")]
    pub designator: String, // U1, C12
    #[serde(default, deserialize_with = "string_or_null")]
    pub value: String, // 10k, 4.7uH, STM32F4
    #[serde(default, deserialize_with = "string_or_null")]
    pub footprint: String, // 0402, QFN-32
    #[serde(default, deserialize_with = "string_or_null")]
    pub description: String,
}

impl ComponentRecord {
    pub fn new(designator: impl Into<String>) -> Self {
        Self {
            designator: designator.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_footprint(mut self, footprint: impl Into<String>) -> Self {
        self.footprint = footprint.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A net entry. Exports name the field either `name` or `net_name`, and some
/// emit bare strings instead of objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawNet")]
pub struct NetRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub net_name: String,
}

impl NetRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            net_name: String::new(),
        }
    }

    /// `name`, falling back to `net_name` when `name` is empty.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.net_name
        } else {
            &self.name
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNet {
    Bare(String),
    Record {
        #[serde(default, deserialize_with = "string_or_null")]
        name: String,
        #[serde(default, deserialize_with = "string_or_null")]
        net_name: String,
    },
}

impl From<RawNet> for NetRecord {
    fn from(raw: RawNet) -> Self {
        match raw {
            RawNet::Bare(name) => NetRecord::new(name),
            RawNet::Record { name, net_name } => NetRecord { name, net_name },
        }
    }
}

/// The decoded schematic/PCB export consumed by the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignExport {
    #[serde(default)]
    pub components: Vec<ComponentRecord>,
    #[serde(default, alias = "wires")]
    pub nets: Vec<NetRecord>,
}

impl DesignExport {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Net names in export order; empty names are kept so callers can decide.
    pub fn net_names(&self) -> impl Iterator<Item = &str> {
        self.nets.iter().map(NetRecord::display_name)
    }
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
