//! Quick heuristic design review run alongside layout planning.

use serde::{Deserialize, Serialize};

use crate::parser::schema::ComponentRecord;

/// Capacitors expected per IC before decoupling is considered adequate.
const CAPS_PER_IC: usize = 2;
const SCORE_PENALTY_PER_ISSUE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewSeverity {
    Warning,
    Suggestion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewIssue {
    #[serde(rename = "type")]
    pub severity: ReviewSeverity,
    pub category: String,
    pub message: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignReview {
    pub issues: Vec<ReviewIssue>,
    pub score: u32,
}

pub fn review_design(components: &[ComponentRecord]) -> DesignReview {
    let mut issues = Vec::new();

    // Designator prefixes are matched as written
    let starts_with = |c: &ComponentRecord, prefix: char| c.designator.starts_with(prefix);

    let ics = components.iter().filter(|c| starts_with(c, 'U')).count();
    let caps = components.iter().filter(|c| starts_with(c, 'C')).count();

    if ics > 0 && caps < ics * CAPS_PER_IC {
        issues.push(ReviewIssue {
            severity: ReviewSeverity::Warning,
            category: "decoupling".to_string(),
            message: format!(
                "Potential missing decoupling capacitors. Found {} ICs but only {} capacitors.",
                ics, caps
            ),
            recommendation: "Add 100nF decoupling capacitor near each IC power pin".to_string(),
        });
    }

    let has_connector = components.iter().any(|c| starts_with(c, 'J'));
    let has_esd = components
        .iter()
        .any(|c| c.description.to_uppercase().contains("ESD"));

    if has_connector && !has_esd {
        issues.push(ReviewIssue {
            severity: ReviewSeverity::Suggestion,
            category: "protection".to_string(),
            message: "No ESD protection components detected".to_string(),
            recommendation: "Consider adding TVS diodes on external interfaces".to_string(),
        });
    }

    let penalty = SCORE_PENALTY_PER_ISSUE.saturating_mul(issues.len() as u32);
    DesignReview {
        score: 100u32.saturating_sub(penalty),
        issues,
    }
}
