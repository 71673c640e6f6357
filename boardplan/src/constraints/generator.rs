//! Design rule inference from classified nets.
//!
//! Three baseline rules are always emitted. Width rules for power and ground,
//! a high-speed clearance rule and a differential pair rule are added only
//! when the matching net class has members.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analyzer::net_classifier::{classify_net_records, ClassifiedNets, NetClassType};
use crate::constraints::defaults::{class_properties, RuleDefaults};
use crate::constraints::rules::{properties, DesignRule, NetClass, RuleType};
use crate::constraints::script::render_rules_script;
use crate::parser::schema::NetRecord;

const BASELINE_PRIORITY: i32 = 1;
const NET_CLASS_PRIORITY: i32 = 2;

fn in_net_class(class: NetClassType) -> String {
    format!("InNetClass('{}')", class.as_str())
}

/// Generated rules and net classes for one design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSet {
    pub net_classes: Vec<NetClass>,
    pub rules: Vec<DesignRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSummary {
    pub net_classes: usize,
    pub rules: usize,
    /// Every rule type, including those with no rules
    pub rules_by_type: BTreeMap<RuleType, usize>,
}

impl ConstraintSet {
    pub fn summary(&self) -> ConstraintSummary {
        let rules_by_type = RuleType::ALL
            .iter()
            .map(|rt| (*rt, self.rules.iter().filter(|r| r.rule_type == *rt).count()))
            .collect();
        ConstraintSummary {
            net_classes: self.net_classes.len(),
            rules: self.rules.len(),
            rules_by_type,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Script rendering of the clearance and width rules.
    pub fn to_script(&self) -> String {
        render_rules_script(&self.rules)
    }

    pub fn rule(&self, name: &str) -> Option<&DesignRule> {
        self.rules.iter().find(|r| r.name == name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConstraintGenerator {
    defaults: RuleDefaults,
}

impl ConstraintGenerator {
    pub fn new(defaults: RuleDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &RuleDefaults {
        &self.defaults
    }

    pub fn analyze_nets(&self, nets: &[NetRecord]) -> ClassifiedNets {
        classify_net_records(nets)
    }

    /// One net class per non-empty class, in `NetClassType` order.
    pub fn generate_net_classes(&self, classified: &ClassifiedNets) -> Vec<NetClass> {
        classified
            .iter()
            .map(|(class, nets)| NetClass {
                name: class.as_str().to_string(),
                nets: nets.to_vec(),
                properties: class_properties(class, &self.defaults),
            })
            .collect()
    }

    pub fn generate_rules(&self, classified: &ClassifiedNets) -> Vec<DesignRule> {
        let d = &self.defaults;
        let mut rules = vec![
            DesignRule::new("Clearance_Default", RuleType::Clearance)
                .with_priority(BASELINE_PRIORITY)
                .with_properties(properties([
                    ("min_clearance_mm", d.clearance.into()),
                    ("description", "Default clearance between all objects".into()),
                ])),
            DesignRule::new("Width_Default", RuleType::Width)
                .with_priority(BASELINE_PRIORITY)
                .with_properties(properties([
                    ("min_width_mm", d.track_width.into()),
                    ("preferred_width_mm", d.track_width.into()),
                    ("max_width_mm", d.max_track_width.into()),
                    ("description", "Default track width".into()),
                ])),
            DesignRule::new("Via_Default", RuleType::Via)
                .with_priority(BASELINE_PRIORITY)
                .with_properties(properties([
                    ("hole_size_mm", d.via_hole.into()),
                    ("via_diameter_mm", d.via_diameter.into()),
                    ("description", "Default via size".into()),
                ])),
        ];

        if classified.has_members(NetClassType::Power) {
            rules.push(
                DesignRule::new("Width_Power", RuleType::Width)
                    .with_priority(NET_CLASS_PRIORITY)
                    .with_scope(in_net_class(NetClassType::Power))
                    .with_properties(properties([
                        ("min_width_mm", d.power_track_width.into()),
                        ("preferred_width_mm", d.power_track_width.into()),
                        ("description", "Power net track width - wider for current capacity".into()),
                    ])),
            );
        }

        if classified.has_members(NetClassType::Ground) {
            rules.push(
                DesignRule::new("Width_Ground", RuleType::Width)
                    .with_priority(NET_CLASS_PRIORITY)
                    .with_scope(in_net_class(NetClassType::Ground))
                    .with_properties(properties([
                        ("min_width_mm", d.ground_track_width.into()),
                        ("preferred_width_mm", d.ground_track_width.into()),
                        ("description", "Ground net track width".into()),
                    ])),
            );
        }

        if classified.has_members(NetClassType::HighSpeed) {
            rules.push(
                DesignRule::new("Clearance_HighSpeed", RuleType::Clearance)
                    .with_priority(NET_CLASS_PRIORITY)
                    .with_scope(in_net_class(NetClassType::HighSpeed))
                    .with_properties(properties([
                        ("min_clearance_mm", d.highspeed_clearance.into()),
                        ("description", "High-speed signal clearance for signal integrity".into()),
                    ])),
            );
        }

        if classified.has_members(NetClassType::Differential) {
            rules.push(
                DesignRule::new("DiffPair_Rule", RuleType::DifferentialPair)
                    .with_priority(NET_CLASS_PRIORITY)
                    .with_scope(in_net_class(NetClassType::Differential))
                    .with_properties(properties([
                        ("track_width_mm", d.diff_pair_width.into()),
                        ("gap_mm", d.diff_pair_gap.into()),
                        ("coupled_length", true.into()),
                        ("description", "Differential pair routing rules".into()),
                    ])),
            );
        }

        rules
    }

    pub fn generate(&self, classified: &ClassifiedNets) -> ConstraintSet {
        ConstraintSet {
            net_classes: self.generate_net_classes(classified),
            rules: self.generate_rules(classified),
        }
    }
}

/// Rules with the default rule values.
pub fn generate_rules(classified: &ClassifiedNets) -> Vec<DesignRule> {
    ConstraintGenerator::default().generate_rules(classified)
}

/// Net classes with the default rule values.
pub fn generate_net_classes(classified: &ClassifiedNets) -> Vec<NetClass> {
    ConstraintGenerator::default().generate_net_classes(classified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::net_classifier::classify_nets;

    fn rule_names(rules: &[DesignRule]) -> Vec<&str> {
        rules.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_baseline_rules_on_empty_input() {
        let rules = generate_rules(&ClassifiedNets::new());
        assert_eq!(rule_names(&rules), vec!["Clearance_Default", "Width_Default", "Via_Default"]);
        assert!(rules.iter().all(|r| r.priority == 1 && r.scope == "All" && r.enabled));
        assert_eq!(rules[0].number("min_clearance_mm"), Some(0.2));
        assert_eq!(rules[1].number("max_width_mm"), Some(2.0));
        assert_eq!(rules[2].number("via_diameter_mm"), Some(0.6));
    }

    #[test]
    fn test_conditional_rules() {
        let classified = classify_nets(["VCC_3V3", "GND", "USB_DP", "CLK_OUT"]);
        let rules = generate_rules(&classified);

        assert_eq!(
            rule_names(&rules),
            vec![
                "Clearance_Default",
                "Width_Default",
                "Via_Default",
                "Width_Power",
                "Width_Ground",
                "Clearance_HighSpeed",
            ]
        );
        assert_eq!(rules[3].scope, "InNetClass('Power')");
        assert_eq!(rules[3].priority, 2);
        assert_eq!(rules[3].number("min_width_mm"), Some(0.5));
        assert_eq!(rules[5].number("min_clearance_mm"), Some(0.3));
    }

    #[test]
    fn test_diff_pair_rule() {
        let rules = generate_rules(&classify_nets(["DATA_P", "DATA_N"]));
        let diff = rules.iter().find(|r| r.rule_type == RuleType::DifferentialPair).unwrap();
        assert_eq!(diff.name, "DiffPair_Rule");
        assert_eq!(diff.scope, "InNetClass('Differential')");
        assert_eq!(diff.number("track_width_mm"), Some(0.2));
        assert_eq!(diff.number("gap_mm"), Some(0.15));
    }

    #[test]
    fn test_net_classes_skip_empty_classes() {
        let classes = generate_net_classes(&classify_nets(["GND", "VCC", "SDA", "AGND"]));
        let names: Vec<_> = classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Power", "Ground", "Default"]);
        assert_eq!(classes[1].nets, vec!["GND".to_string(), "AGND".to_string()]);
        assert_eq!(classes[2].properties.len(), 1);
    }

    #[test]
    fn test_custom_defaults() {
        let generator = ConstraintGenerator::new(RuleDefaults {
            clearance: 0.15,
            ..RuleDefaults::default()
        });
        let set = generator.generate(&ClassifiedNets::new());
        assert_eq!(set.rules[0].number("min_clearance_mm"), Some(0.15));
        assert!(set.net_classes.is_empty());
    }

    #[test]
    fn test_summary_lists_every_rule_type() {
        let generator = ConstraintGenerator::default();
        let nets = vec![NetRecord::new("VCC"), NetRecord::new("USB_D_P")];
        let set = generator.generate(&generator.analyze_nets(&nets));
        let summary = set.summary();

        assert_eq!(summary.net_classes, 2);
        assert_eq!(summary.rules, 5);
        assert_eq!(summary.rules_by_type.len(), RuleType::ALL.len());
        assert_eq!(summary.rules_by_type[&RuleType::Clearance], 2);
        assert_eq!(summary.rules_by_type[&RuleType::Width], 2);
        assert_eq!(summary.rules_by_type[&RuleType::SolderMask], 0);
    }

    #[test]
    fn test_constraint_set_json() {
        let set = ConstraintGenerator::default().generate(&classify_nets(["VCC", "GND"]));
        let json = set.to_json().unwrap();
        let parsed: ConstraintSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, set);
        assert!(set.rule("Width_Ground").is_some());
    }
}
