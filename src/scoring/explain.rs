//! Qualitative explanations derived from normalized signals

use super::models::{Dimension, SignalLevel, UsageCompatibility};
use super::normalize::NormalizedProfile;
use super::weights::WeightTable;
use crate::intent::UsageSet;

/// Labels explaining a score
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Explanation {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub warnings: Vec<String>,
}

/// Derive strengths, weaknesses and warnings for the selected usages.
///
/// A dimension counts for a usage only when the usage gives it weight.
/// - strength: signal is high for at least one selected usage
/// - weakness: signal is low for a selected usage scoring below `weakness_below`
/// - warning: as weakness, with the usage scoring below `warning_below`
///
/// Labels follow dimension order and appear at most once.
pub fn explain(
    profile: &NormalizedProfile,
    compatibility: &UsageCompatibility,
    usages: &UsageSet,
    weights: &WeightTable,
    weakness_below: u8,
    warning_below: u8,
) -> Explanation {
    let mut explanation = Explanation::default();

    for (dimension, signal) in profile.iter() {
        let relevant: Vec<u8> = usages
            .iter()
            .filter(|usage| weights.is_relevant(*usage, dimension))
            .map(|usage| compatibility.get(usage))
            .collect();
        if relevant.is_empty() {
            continue;
        }

        match signal.level() {
            SignalLevel::High => push_label(&mut explanation.strengths, dimension.strength_label()),
            SignalLevel::Low => {
                if relevant.iter().any(|score| *score < weakness_below) {
                    push_label(&mut explanation.weaknesses, dimension.weakness_label());
                }
                if relevant.iter().any(|score| *score < warning_below) {
                    push_label(&mut explanation.warnings, dimension.weakness_label());
                }
            }
            SignalLevel::Mid => {}
        }
    }

    explanation
}

fn push_label(labels: &mut Vec<String>, label: &str) {
    if !labels.iter().any(|existing| existing == label) {
        labels.push(label.to_string());
    }
}
