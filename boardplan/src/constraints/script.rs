//! DesignScript rendering of generated rules for the CAD tool's script host.
//!
//! Only clearance and width rules have a script form. Millimeter values are
//! converted to mils and printed with two decimals.

use crate::constraints::rules::{DesignRule, RuleType};

pub const MILS_PER_MM: f64 = 39.3701;

const FALLBACK_CLEARANCE_MM: f64 = 0.2;
const FALLBACK_WIDTH_MM: f64 = 0.25;

const HEADER: &[&str] = &[
    "{ Auto-generated design rules script }",
    "{ Generated by boardplan }",
    "",
    "Procedure CreateDesignRules;",
    "Var",
    "    Board : IPCB_Board;",
    "    Rule : IPCB_Rule;",
    "Begin",
    "    Board := PCBServer.GetCurrentPCBBoard;",
    "    If Board = Nil Then Exit;",
    "",
    "    PCBServer.PreProcess;",
    "",
];

const FOOTER: &[&str] = &[
    "    PCBServer.PostProcess;",
    "    Board.GraphicallyInvalidate;",
    "    ShowMessage('Design rules created successfully.');",
    "End;",
];

pub fn mm_to_mils(mm: f64) -> f64 {
    mm * MILS_PER_MM
}

fn mils(mm: f64) -> String {
    format!("{:.2}", mm_to_mils(mm))
}

fn render_rule(rule: &DesignRule, lines: &mut Vec<String>) {
    match rule.rule_type {
        RuleType::Clearance => {
            let clearance = rule.number("min_clearance_mm").unwrap_or(FALLBACK_CLEARANCE_MM);
            lines.push(format!("    {{ {} }}", rule.name));
            lines.push("    Rule := PCBServer.PCBRuleFactory(eRule_Clearance);".to_string());
            lines.push(format!("    Rule.Name := '{}';", rule.name));
            lines.push(format!("    Rule.MinimumGap := MilsToCoord({});", mils(clearance)));
            lines.push("    Board.AddPCBObject(Rule);".to_string());
            lines.push(String::new());
        }
        RuleType::Width => {
            let min_width = rule.number("min_width_mm").unwrap_or(FALLBACK_WIDTH_MM);
            let preferred = rule.number("preferred_width_mm").unwrap_or(FALLBACK_WIDTH_MM);
            lines.push(format!("    {{ {} }}", rule.name));
            lines.push("    Rule := PCBServer.PCBRuleFactory(eRule_Width);".to_string());
            lines.push(format!("    Rule.Name := '{}';", rule.name));
            lines.push(format!("    Rule.MinWidth := MilsToCoord({});", mils(min_width)));
            lines.push(format!("    Rule.PreferedWidth := MilsToCoord({});", mils(preferred)));
            lines.push("    Board.AddPCBObject(Rule);".to_string());
            lines.push(String::new());
        }
        _ => {}
    }
}

/// Render a `CreateDesignRules` procedure adding every clearance and width rule.
pub fn render_rules_script(rules: &[DesignRule]) -> String {
    let mut lines: Vec<String> = HEADER.iter().map(|l| l.to_string()).collect();
    for rule in rules {
        render_rule(rule, &mut lines);
    }
    lines.extend(FOOTER.iter().map(|l| l.to_string()));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::rules::properties;

    #[test]
    fn test_mil_conversion() {
        assert_eq!(mils(0.2), "7.87");
        assert_eq!(mils(0.25), "9.84");
        assert_eq!(mils(0.5), "19.69");
        assert_eq!(mils(0.3), "11.81");
    }

    #[test]
    fn test_clearance_and_width_rendering() {
        let rules = vec![
            DesignRule::new("Clearance_Default", RuleType::Clearance)
                .with_properties(properties([("min_clearance_mm", 0.2_f64.into())])),
            DesignRule::new("Width_Power", RuleType::Width).with_properties(properties([
                ("min_width_mm", 0.5_f64.into()),
                ("preferred_width_mm", 0.5_f64.into()),
            ])),
        ];
        let script = render_rules_script(&rules);

        assert!(script.starts_with("{ Auto-generated design rules script }"));
        assert!(script.contains("    { Clearance_Default }"));
        assert!(script.contains("Rule.MinimumGap := MilsToCoord(7.87);"));
        assert!(script.contains("Rule.Name := 'Width_Power';"));
        assert!(script.contains("Rule.MinWidth := MilsToCoord(19.69);"));
        assert!(script.contains("Rule.PreferedWidth := MilsToCoord(19.69);"));
        assert!(script.ends_with("End;"));
    }

    #[test]
    fn test_other_rule_types_skipped() {
        let rules = vec![DesignRule::new("Via_Default", RuleType::Via)];
        let script = render_rules_script(&rules);
        assert!(!script.contains("Via_Default"));
        assert!(script.contains("PCBServer.PreProcess;"));
        assert!(script.contains("PCBServer.PostProcess;"));
    }

    #[test]
    fn test_missing_properties_use_fallbacks() {
        let rules = vec![DesignRule::new("Width_Bare", RuleType::Width)];
        let script = render_rules_script(&rules);
        assert!(script.contains("Rule.MinWidth := MilsToCoord(9.84);"));
    }
}
