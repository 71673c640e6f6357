pub mod block_classifier;
pub mod net_classifier;
pub mod review;
pub mod signals;
pub mod summary;

// Re-export for convenience
pub use block_classifier::{block_rules, classify_component, classify_record, BlockRule, BlockType, ComponentKey};
pub use net_classifier::{classify_net, classify_net_records, classify_nets, net_rules, ClassifiedNets, NetClassType};
pub use review::{review_design, DesignReview, ReviewIssue, ReviewSeverity};
pub use signals::{analyze_net_records, analyze_signals, differential_base, signal_kind, SignalAnalysis, SignalKind};
pub use summary::{
    identify_critical_components, infer_design_type, summarize_components, ComponentSummary, CriticalComponent,
    Criticality, DesignType,
};
