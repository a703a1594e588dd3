//! Checks applied to raw user input before any state change.
//!
//! Split input is checked in a fixed order and the first failure wins:
//! amount blank, amount not numeric, amount not positive, no participants,
//! payer blank, payer unknown.

use crate::core::currency::{parse_amount, AmountParseError};
use crate::core::participant::{ParticipantName, ParticipantRegistry, RegistryRejection};
use rust_decimal::Decimal;
use thiserror::Error;

/// A rejected user input. The display string is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Participant name cannot be empty.")]
    EmptyParticipantName,
    #[error("Participant '{0}' is already in the group.")]
    DuplicateParticipant(ParticipantName),
    #[error("Please enter an amount.")]
    AmountBlank,
    #[error("Please enter a valid amount.")]
    AmountNotNumeric(String),
    #[error("Amount must be greater than zero.")]
    AmountNotPositive(Decimal),
    #[error("Add participants before adding expenses.")]
    NoParticipants,
    #[error("Please enter who paid.")]
    PayerBlank,
    #[error("Please select a valid payer from the participants.")]
    UnknownPayer(String),
}

impl From<RegistryRejection> for ValidationError {
    fn from(rejection: RegistryRejection) -> Self {
        match rejection {
            RegistryRejection::Blank => Self::EmptyParticipantName,
            RegistryRejection::Duplicate(name) => Self::DuplicateParticipant(name),
        }
    }
}

impl From<AmountParseError> for ValidationError {
    fn from(err: AmountParseError) -> Self {
        match err {
            AmountParseError::Blank => Self::AmountBlank,
            AmountParseError::NotNumeric(text) => Self::AmountNotNumeric(text),
        }
    }
}

/// Split input that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSplit {
    pub amount: Decimal,
    pub payer: ParticipantName,
}

/// Check a participant name without registering it.
pub fn validate_participant_name(raw: &str) -> Result<&str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyParticipantName);
    }
    Ok(trimmed)
}

/// Run the split gate over raw amount and payer text.
pub fn validate_split(
    amount_text: &str,
    payer_text: &str,
    participants: &ParticipantRegistry,
) -> Result<ValidatedSplit, ValidationError> {
    let amount = parse_amount(amount_text)?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::AmountNotPositive(amount));
    }

    if participants.is_empty() {
        return Err(ValidationError::NoParticipants);
    }

    let payer_text = payer_text.trim();
    if payer_text.is_empty() {
        return Err(ValidationError::PayerBlank);
    }
    let payer = ParticipantName::new(payer_text);
    if !participants.contains(&payer) {
        return Err(ValidationError::UnknownPayer(payer_text.to_string()));
    }

    Ok(ValidatedSplit { amount, payer })
}
