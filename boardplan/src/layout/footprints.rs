//! Component body size estimates used for packing.
//!
//! Sizes are conservative outlines in millimeters. A footprint table keyed by
//! package substrings is tried first, in order; when no package matches, a
//! designator-prefix table supplies the size.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentSize {
    pub width: f64,
    pub height: f64,
}

impl ComponentSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Package substrings and the outline they imply. First match wins.
const FOOTPRINT_SIZES: &[(&[&str], ComponentSize)] = &[
    (&["0402"], ComponentSize::new(1.0, 0.5)),
    (&["0603"], ComponentSize::new(1.6, 0.8)),
    (&["0805"], ComponentSize::new(2.0, 1.25)),
    (&["1206"], ComponentSize::new(3.2, 1.6)),
    (&["SOT23", "SOT-23"], ComponentSize::new(3.0, 1.5)),
    (&["SOIC", "SOP"], ComponentSize::new(5.0, 4.0)),
    (&["QFP", "TQFP"], ComponentSize::new(12.0, 12.0)),
    (&["QFN"], ComponentSize::new(5.0, 5.0)),
    (&["BGA"], ComponentSize::new(15.0, 15.0)),
    (&["DIP"], ComponentSize::new(20.0, 8.0)),
];

/// Designator prefixes and their default outline.
const DESIGNATOR_SIZES: &[(&[&str], ComponentSize)] = &[
    (&["U"], ComponentSize::new(8.0, 8.0)),
    (&["J"], ComponentSize::new(15.0, 5.0)),
    (&["Y"], ComponentSize::new(5.0, 2.0)),
    (&["R", "C"], ComponentSize::new(2.0, 1.0)),
    (&["L"], ComponentSize::new(4.0, 4.0)),
];

pub const DEFAULT_COMPONENT_SIZE: ComponentSize = ComponentSize::new(3.0, 3.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeEntry {
    pub patterns: Vec<String>,
    pub size: ComponentSize,
}

/// Ordered size lookup tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintSizeTable {
    pub footprints: Vec<SizeEntry>,
    pub designators: Vec<SizeEntry>,
    pub fallback: ComponentSize,
}

fn to_entries(table: &[(&[&str], ComponentSize)]) -> Vec<SizeEntry> {
    table
        .iter()
        .map(|(patterns, size)| SizeEntry {
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            size: *size,
        })
        .collect()
}

impl Default for FootprintSizeTable {
    fn default() -> Self {
        Self {
            footprints: to_entries(FOOTPRINT_SIZES),
            designators: to_entries(DESIGNATOR_SIZES),
            fallback: DEFAULT_COMPONENT_SIZE,
        }
    }
}

impl FootprintSizeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a package pattern ahead of the built-in ones.
    pub fn with_footprint(mut self, pattern: &str, size: ComponentSize) -> Self {
        self.footprints.insert(
            0,
            SizeEntry {
                patterns: vec![pattern.to_uppercase()],
                size,
            },
        );
        self
    }

    pub fn lookup_footprint(&self, footprint: &str) -> Option<ComponentSize> {
        let footprint = footprint.to_uppercase();
        self.footprints
            .iter()
            .find(|entry| entry.patterns.iter().any(|p| footprint.contains(&p.to_uppercase())))
            .map(|entry| entry.size)
    }

    pub fn lookup_designator(&self, designator: &str) -> ComponentSize {
        let designator = designator.to_uppercase();
        self.designators
            .iter()
            .find(|entry| entry.patterns.iter().any(|p| designator.starts_with(&p.to_uppercase())))
            .map(|entry| entry.size)
            .unwrap_or(self.fallback)
    }

    /// Estimated outline for a component. Always succeeds.
    pub fn estimate(&self, designator: &str, footprint: &str) -> ComponentSize {
        self.lookup_footprint(footprint)
            .unwrap_or_else(|| self.lookup_designator(designator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footprint_sizes() {
        let table = FootprintSizeTable::default();
        assert_eq!(table.estimate("C1", "C_0402_1005Metric"), ComponentSize::new(1.0, 0.5));
        assert_eq!(table.estimate("R1", "0805"), ComponentSize::new(2.0, 1.25));
        assert_eq!(table.estimate("Q1", "SOT-23"), ComponentSize::new(3.0, 1.5));
        assert_eq!(table.estimate("U1", "SOIC-8"), ComponentSize::new(5.0, 4.0));
        assert_eq!(table.estimate("U1", "QFP"), ComponentSize::new(12.0, 12.0));
        assert_eq!(table.estimate("U1", "LQFP-48"), ComponentSize::new(12.0, 12.0));
        assert_eq!(table.estimate("U2", "qfn-32"), ComponentSize::new(5.0, 5.0));
        assert_eq!(table.estimate("U3", "BGA-256"), ComponentSize::new(15.0, 15.0));
        assert_eq!(table.estimate("U4", "DIP-8"), ComponentSize::new(20.0, 8.0));
    }

    #[test]
    fn test_designator_fallback() {
        let table = FootprintSizeTable::default();
        assert_eq!(table.estimate("U1", ""), ComponentSize::new(8.0, 8.0));
        assert_eq!(table.estimate("J1", "Conn_Custom"), ComponentSize::new(15.0, 5.0));
        assert_eq!(table.estimate("Y1", ""), ComponentSize::new(5.0, 2.0));
        assert_eq!(table.estimate("r5", ""), ComponentSize::new(2.0, 1.0));
        assert_eq!(table.estimate("L1", ""), ComponentSize::new(4.0, 4.0));
        assert_eq!(table.estimate("SW1", ""), DEFAULT_COMPONENT_SIZE);
        assert_eq!(table.estimate("", ""), DEFAULT_COMPONENT_SIZE);
    }

    #[test]
    fn test_custom_footprint_takes_precedence() {
        let table = FootprintSizeTable::default().with_footprint("0402", ComponentSize::new(1.2, 0.7));
        assert_eq!(table.estimate("C1", "0402"), ComponentSize::new(1.2, 0.7));
    }

    #[test]
    fn test_lowercase_patterns_from_json() {
        let table: FootprintSizeTable = serde_json::from_str(
            r#"{
                "footprints": [{"patterns": ["sot-223"], "size": {"width": 6.5, "height": 3.5}}],
                "designators": [{"patterns": ["sw"], "size": {"width": 6.0, "height": 6.0}}],
                "fallback": {"width": 3.0, "height": 3.0}
            }"#,
        )
        .unwrap();

        assert_eq!(table.estimate("U1", "SOT-223"), ComponentSize::new(6.5, 3.5));
        assert_eq!(table.estimate("SW1", ""), ComponentSize::new(6.0, 6.0));
        assert_eq!(table.estimate("sw2", "Button"), ComponentSize::new(6.0, 6.0));
        assert_eq!(table.estimate("R1", "0402"), ComponentSize::new(3.0, 3.0));
    }
}
