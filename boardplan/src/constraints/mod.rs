//! Design rule and net class generation.

pub mod defaults;
pub mod generator;
pub mod rules;
pub mod script;

pub use defaults::{class_color, class_properties, RuleDefaults};
pub use generator::{generate_net_classes, generate_rules, ConstraintGenerator, ConstraintSet, ConstraintSummary};
pub use rules::{properties, DesignRule, NetClass, Properties, PropertyValue, RuleType};
pub use script::{mm_to_mils, render_rules_script, MILS_PER_MM};
