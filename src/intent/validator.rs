//! Step-wise validation of intent answers

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::models::{Intent, PartialIntent, UsageSet, UsageTag};
use super::wizard::WizardStep;
use super::IntentError;

/// Raw value submitted for a step, as ids coming from the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StepValue {
    Category(String),
    Budget(String),
    Usages(Vec<String>),
    Specs(String),
}

impl StepValue {
    fn kind(&self) -> &'static str {
        match self {
            StepValue::Category(_) => "category",
            StepValue::Budget(_) => "budget",
            StepValue::Usages(_) => "usages",
            StepValue::Specs(_) => "specs",
        }
    }
}

/// Validate `candidate` for `step` against the answers collected so far.
///
/// Returns the accumulated answers with the candidate applied. `current` is
/// never modified, so a rejected candidate leaves the caller's state intact.
pub fn validate_step(
    step: WizardStep,
    current: &PartialIntent,
    candidate: &StepValue,
) -> Result<PartialIntent, IntentError> {
    let mut next = current.clone();

    match (step, candidate) {
        (WizardStep::Category, StepValue::Category(id)) => {
            next.category = Some(id.parse()?);
        }
        (WizardStep::Budget, StepValue::Budget(id)) => {
            if next.category.is_none() {
                return Err(missing_prerequisite(step, "category"));
            }
            next.budget_range = Some(id.parse()?);
        }
        (WizardStep::Usage, StepValue::Usages(ids)) => {
            if next.budget_range.is_none() {
                return Err(missing_prerequisite(step, "budgetRange"));
            }
            let tags: BTreeSet<UsageTag> = ids
                .iter()
                .map(|id| id.parse::<UsageTag>())
                .collect::<Result<_, _>>()?;
            next.usages = tags;
            if next.usages.is_empty() {
                return Err(IntentError::Validation {
                    step,
                    reason: "select at least one usage".to_string(),
                });
            }
        }
        // Free text is optional and never blocks completion
        (WizardStep::Specs, StepValue::Specs(text)) => {
            next.free_text_specs = text.clone();
        }
        (WizardStep::Completed, _) => {
            return Err(IntentError::InvalidTransition {
                from: step,
                action: "submit a value",
            });
        }
        (_, other) => {
            return Err(IntentError::Validation {
                step,
                reason: format!("unexpected {} value", other.kind()),
            });
        }
    }

    Ok(next)
}

/// Turn accumulated answers into an immutable [`Intent`].
pub fn finalize(partial: PartialIntent) -> Result<Intent, IntentError> {
    let missing = partial.missing_fields();
    if !missing.is_empty() {
        return Err(IntentError::Incomplete { missing });
    }

    match (
        partial.category,
        partial.budget_range,
        UsageSet::new(partial.usages),
    ) {
        (Some(category), Some(budget), Some(usages)) => Ok(Intent::from_parts(
            category,
            budget,
            usages,
            partial.free_text_specs,
        )),
        _ => Err(IntentError::Incomplete { missing }),
    }
}

fn missing_prerequisite(step: WizardStep, field: &str) -> IntentError {
    IntentError::Validation {
        step,
        reason: format!("{} must be answered first", field),
    }
}
