//! Intent capture state machine
//!
//! Each state carries only the answers that are confirmed at that point, so a
//! `Completed` state always holds a fully valid [`Intent`]. Transitions take
//! `&self` and return a new [`IntentCapture`]; a rejected transition leaves the
//! original value untouched and the caller can retry.
//!
//! One instance serves one buyer session and is not meant to be shared.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};
use uuid::Uuid;

use super::models::{BudgetBand, Category, Intent, PartialIntent, UsageSet, UsageTag};
use super::validator::{finalize, validate_step, StepValue};
use super::IntentError;
use crate::metrics::METRICS;

/// Position in the four-step flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Category,
    Budget,
    Usage,
    Specs,
    Completed,
}

impl WizardStep {
    /// 1-based step number; `Completed` is 5
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Category => 1,
            WizardStep::Budget => 2,
            WizardStep::Usage => 3,
            WizardStep::Specs => 4,
            WizardStep::Completed => 5,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WizardStep::Category => "step 1 (category)",
            WizardStep::Budget => "step 2 (budget)",
            WizardStep::Usage => "step 3 (usage)",
            WizardStep::Specs => "step 4 (specs)",
            WizardStep::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Confirmed answers per state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardState {
    Step1Category,
    Step2Budget {
        category: Category,
    },
    Step3Usage {
        category: Category,
        budget: BudgetBand,
    },
    Step4Specs {
        category: Category,
        budget: BudgetBand,
        usages: UsageSet,
    },
    Completed(Intent),
}

impl WizardState {
    pub fn step(&self) -> WizardStep {
        match self {
            WizardState::Step1Category => WizardStep::Category,
            WizardState::Step2Budget { .. } => WizardStep::Budget,
            WizardState::Step3Usage { .. } => WizardStep::Usage,
            WizardState::Step4Specs { .. } => WizardStep::Specs,
            WizardState::Completed(_) => WizardStep::Completed,
        }
    }
}

/// One buyer's in-progress intent collection
#[derive(Debug, Clone)]
pub struct IntentCapture {
    session_id: Uuid,
    started_at: DateTime<Utc>,
    state: WizardState,
    /// Every answer given so far, including ones for steps ahead of `state`
    /// after backward navigation
    answers: PartialIntent,
}

impl IntentCapture {
    /// Start a new session at step 1
    pub fn new() -> Self {
        let capture = Self {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            state: WizardState::Step1Category,
            answers: PartialIntent::new(),
        };
        debug!("Started intent capture session {}", capture.session_id);
        capture
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> WizardStep {
        self.state.step()
    }

    pub fn step_number(&self) -> u8 {
        self.step().number()
    }

    /// Fraction of the four steps reached, for progress bars
    pub fn progress(&self) -> f32 {
        (f32::from(self.step_number()) / 4.0).min(1.0)
    }

    pub fn answers(&self) -> &PartialIntent {
        &self.answers
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.state, WizardState::Completed(_))
    }

    /// The finalized intent, once the flow is completed
    pub fn intent(&self) -> Option<&Intent> {
        match &self.state {
            WizardState::Completed(intent) => Some(intent),
            _ => None,
        }
    }

    /// Step 1 → step 2
    pub fn select_category(&self, id: &str) -> Result<Self, IntentError> {
        self.expect_step(WizardStep::Category, "select a category")?;
        let answers = validate_step(
            WizardStep::Category,
            &self.answers,
            &StepValue::Category(id.to_string()),
        )?;
        let category = answers.category.ok_or(IntentError::Incomplete {
            missing: vec!["category"],
        })?;

        Ok(self.transition(WizardState::Step2Budget { category }, answers))
    }

    /// Step 2 → step 3
    pub fn select_budget(&self, id: &str) -> Result<Self, IntentError> {
        let category = match &self.state {
            WizardState::Step2Budget { category } => *category,
            _ => return Err(self.invalid("select a budget")),
        };
        let answers = validate_step(
            WizardStep::Budget,
            &self.answers,
            &StepValue::Budget(id.to_string()),
        )?;
        let budget = answers.budget_range.ok_or(IntentError::Incomplete {
            missing: vec!["budgetRange"],
        })?;

        Ok(self.transition(WizardState::Step3Usage { category, budget }, answers))
    }

    /// Flip membership of a usage tag while on step 3.
    ///
    /// Toggling the same tag twice restores the previous selection.
    pub fn toggle_usage(&self, id: &str) -> Result<Self, IntentError> {
        self.expect_step(WizardStep::Usage, "toggle a usage")?;
        let tag: UsageTag = id.parse()?;

        let mut next = self.clone();
        let selected = next.answers.toggle_usage(tag);
        debug!(
            "Session {}: usage {} {}",
            self.session_id,
            tag,
            if selected { "selected" } else { "deselected" }
        );
        Ok(next)
    }

    /// Step 3 → step 4, blocked while no usage is selected
    pub fn confirm_usages(&self) -> Result<Self, IntentError> {
        let (category, budget) = match &self.state {
            WizardState::Step3Usage { category, budget } => (*category, *budget),
            _ => return Err(self.invalid("confirm usages")),
        };
        let ids = self
            .answers
            .usages
            .iter()
            .map(|tag| tag.as_str().to_string())
            .collect();
        let answers = validate_step(WizardStep::Usage, &self.answers, &StepValue::Usages(ids))?;
        let usages = UsageSet::new(answers.usages.clone()).ok_or(IntentError::Incomplete {
            missing: vec!["usages"],
        })?;

        Ok(self.transition(
            WizardState::Step4Specs {
                category,
                budget,
                usages,
            },
            answers,
        ))
    }

    /// Record free-text specifications on step 4; empty text is fine
    pub fn set_specs(&self, text: &str) -> Result<Self, IntentError> {
        self.expect_step(WizardStep::Specs, "set specifications")?;
        let answers = validate_step(
            WizardStep::Specs,
            &self.answers,
            &StepValue::Specs(text.to_string()),
        )?;

        let mut next = self.clone();
        next.answers = answers;
        Ok(next)
    }

    /// Step 4 → completed
    pub fn complete(&self) -> Result<Self, IntentError> {
        self.expect_step(WizardStep::Specs, "complete")?;
        let intent = finalize(self.answers.clone())?;

        METRICS.intents_completed.inc();
        info!(
            "Session {} completed intent: category={}, budget={}, usages={}",
            self.session_id,
            intent.category(),
            intent.budget_range(),
            intent.usages().len()
        );

        Ok(self.transition(WizardState::Completed(intent), self.answers.clone()))
    }

    /// Go back one step, keeping every answer already given
    pub fn back(&self) -> Result<Self, IntentError> {
        let previous = match &self.state {
            WizardState::Step2Budget { .. } => WizardState::Step1Category,
            WizardState::Step3Usage { category, .. } => WizardState::Step2Budget {
                category: *category,
            },
            WizardState::Step4Specs {
                category, budget, ..
            } => WizardState::Step3Usage {
                category: *category,
                budget: *budget,
            },
            WizardState::Step1Category | WizardState::Completed(_) => {
                return Err(self.invalid("go back"))
            }
        };

        Ok(self.transition(previous, self.answers.clone()))
    }

    /// Advance using the answer already recorded for the current step.
    ///
    /// Lets a buyer who went back move forward again without re-entering
    /// anything.
    pub fn next(&self) -> Result<Self, IntentError> {
        let step = self.step();
        let no_answer = || IntentError::Validation {
            step,
            reason: "no answer recorded for this step".to_string(),
        };

        match step {
            WizardStep::Category => {
                let category = self.answers.category.ok_or_else(no_answer)?;
                self.select_category(category.as_str())
            }
            WizardStep::Budget => {
                let budget = self.answers.budget_range.ok_or_else(no_answer)?;
                self.select_budget(budget.id())
            }
            WizardStep::Usage => self.confirm_usages(),
            WizardStep::Specs => self.complete(),
            WizardStep::Completed => Err(self.invalid("advance")),
        }
    }

    /// Submit a raw step value and move forward where the step allows it.
    ///
    /// Step 3 replaces the whole selection and confirms it; step 4 records
    /// the text and completes.
    pub fn advance(&self, value: StepValue) -> Result<Self, IntentError> {
        match (self.step(), value) {
            (WizardStep::Category, StepValue::Category(id)) => self.select_category(&id),
            (WizardStep::Budget, StepValue::Budget(id)) => self.select_budget(&id),
            (WizardStep::Usage, StepValue::Usages(ids)) => {
                let answers =
                    validate_step(WizardStep::Usage, &self.answers, &StepValue::Usages(ids))?;
                let mut next = self.clone();
                next.answers = answers;
                next.confirm_usages()
            }
            (WizardStep::Specs, StepValue::Specs(text)) => self.set_specs(&text)?.complete(),
            (WizardStep::Completed, _) => Err(self.invalid("advance")),
            (step, value) => {
                // Reuse the validator's mismatch message
                validate_step(step, &self.answers, &value)?;
                Err(self.invalid("advance"))
            }
        }
    }

    fn transition(&self, state: WizardState, answers: PartialIntent) -> Self {
        debug!(
            "Session {}: {} -> {}",
            self.session_id,
            self.state.step(),
            state.step()
        );
        Self {
            session_id: self.session_id,
            started_at: self.started_at,
            state,
            answers,
        }
    }

    fn expect_step(&self, expected: WizardStep, action: &'static str) -> Result<(), IntentError> {
        if self.step() == expected {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> IntentError {
        IntentError::InvalidTransition {
            from: self.step(),
            action,
        }
    }
}

impl Default for IntentCapture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_usage_step() -> IntentCapture {
        IntentCapture::new()
            .select_category("notebook")
            .unwrap()
            .select_budget("1500-3000")
            .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let capture = IntentCapture::new();
        assert_eq!(capture.step(), WizardStep::Category);
        assert_eq!(capture.step_number(), 1);
        assert!(capture.intent().is_none());
    }

    #[test]
    fn test_full_flow_completes() {
        let capture = at_usage_step()
            .toggle_usage("gaming_heavy")
            .unwrap()
            .confirm_usages()
            .unwrap()
            .set_specs("RTX 4060")
            .unwrap()
            .complete()
            .unwrap();

        let intent = capture.intent().unwrap();
        assert_eq!(intent.category(), Category::Notebook);
        assert_eq!(intent.budget_range(), BudgetBand::From1500To3000);
        assert!(intent.usages().contains(UsageTag::GamingHeavy));
        assert_eq!(intent.free_text_specs(), "RTX 4060");
        assert_eq!(capture.progress(), 1.0);
    }

    #[test]
    fn test_confirm_blocked_without_usages() {
        let capture = at_usage_step();
        let err = capture.confirm_usages().unwrap_err();
        assert!(matches!(err, IntentError::Validation { step: WizardStep::Usage, .. }));
        assert_eq!(capture.step(), WizardStep::Usage);
    }

    #[test]
    fn test_toggle_twice_restores_selection() {
        let capture = at_usage_step().toggle_usage("office").unwrap();
        let before = capture.answers().usages.clone();

        let after = capture
            .toggle_usage("programming")
            .unwrap()
            .toggle_usage("programming")
            .unwrap();
        assert_eq!(after.answers().usages, before);
    }

    #[test]
    fn test_toggle_unknown_tag() {
        let err = at_usage_step().toggle_usage("mining").unwrap_err();
        assert_eq!(err, IntentError::UnknownUsageTag("mining".to_string()));
    }

    #[test]
    fn test_back_preserves_answers() {
        let at_specs = at_usage_step()
            .toggle_usage("office")
            .unwrap()
            .confirm_usages()
            .unwrap();

        let back_to_budget = at_specs.back().unwrap().back().unwrap();
        assert_eq!(back_to_budget.step(), WizardStep::Budget);
        assert!(back_to_budget.answers().usages.contains(&UsageTag::Office));

        let again = back_to_budget.select_budget("3000-5000").unwrap();
        assert_eq!(again.step(), WizardStep::Usage);
        assert!(again.answers().usages.contains(&UsageTag::Office));
        assert!(again.confirm_usages().is_ok());
    }

    #[test]
    fn test_next_reuses_remembered_answers() {
        let at_specs = at_usage_step()
            .toggle_usage("video_editing")
            .unwrap()
            .confirm_usages()
            .unwrap();
        let rewound = at_specs.back().unwrap().back().unwrap().back().unwrap();
        assert_eq!(rewound.step(), WizardStep::Category);

        let forward = rewound.next().unwrap().next().unwrap().next().unwrap();
        assert_eq!(forward.step(), WizardStep::Specs);
    }

    #[test]
    fn test_back_from_first_step_is_rejected() {
        let err = IntentCapture::new().back().unwrap_err();
        assert!(matches!(err, IntentError::InvalidTransition { .. }));
    }

    #[test]
    fn test_completed_is_terminal() {
        let done = at_usage_step()
            .toggle_usage("office")
            .unwrap()
            .confirm_usages()
            .unwrap()
            .complete()
            .unwrap();

        assert!(done.back().is_err());
        assert!(done.next().is_err());
        assert!(done.select_category("desktop").is_err());
        assert!(done.advance(StepValue::Specs(String::new())).is_err());
    }

    #[test]
    fn test_out_of_order_selection_is_rejected() {
        let err = IntentCapture::new().select_budget("0-1500").unwrap_err();
        assert_eq!(
            err,
            IntentError::InvalidTransition {
                from: WizardStep::Category,
                action: "select a budget",
            }
        );
    }

    #[test]
    fn test_advance_with_raw_values() {
        let done = IntentCapture::new()
            .advance(StepValue::Category("desktop".to_string()))
            .unwrap()
            .advance(StepValue::Budget("8000+".to_string()))
            .unwrap()
            .advance(StepValue::Usages(vec![
                "gaming-heavy".to_string(),
                "video_editing".to_string(),
            ]))
            .unwrap()
            .advance(StepValue::Specs(String::new()))
            .unwrap();

        let intent = done.intent().unwrap();
        assert_eq!(intent.category(), Category::Desktop);
        assert_eq!(intent.usages().len(), 2);
    }

    #[test]
    fn test_failed_transition_leaves_state_unchanged() {
        let capture = IntentCapture::new();
        assert!(capture.select_category("tablet").is_err());
        assert_eq!(capture.step(), WizardStep::Category);
        assert_eq!(capture.answers(), &PartialIntent::new());
    }
}
