//! Buyer intent capture
//!
//! A four-step collection flow that accumulates a validated [`Intent`]:
//! - Step 1: product category
//! - Step 2: budget band
//! - Step 3: one or more usage tags
//! - Step 4: optional free-text specifications

pub mod models;
pub mod validator;
pub mod wizard;

pub use models::{BudgetBand, Category, Intent, PartialIntent, UsageSet, UsageTag};
pub use validator::{finalize, validate_step, StepValue};
pub use wizard::{IntentCapture, WizardState, WizardStep};

use thiserror::Error;

/// Intent capture errors.
///
/// Every variant is recoverable: the caller retries with corrected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntentError {
    #[error("Validation failed at {step}: {reason}")]
    Validation { step: WizardStep, reason: String },

    #[error("Intent incomplete, missing: {}", missing.join(", "))]
    Incomplete { missing: Vec<&'static str> },

    #[error("Unknown usage tag: {0}")]
    UnknownUsageTag(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown budget band: {0}")]
    UnknownBudgetBand(String),

    #[error("Cannot {action} from {from}")]
    InvalidTransition { from: WizardStep, action: &'static str },
}
