use crate::core::balance::{Balance, BalanceSheet};
use crate::core::participant::ParticipantName;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the payer's own share is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitPolicy {
    /// The payer is credited the full amount and owes nothing for this
    /// expense. Non-payers each owe `amount / N`.
    #[default]
    PayerExempt,
    /// Everyone, payer included, owes `amount / N`; the payer is still
    /// credited the full amount.
    EqualShare,
}

impl std::str::FromStr for SplitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payer_exempt" | "payer-exempt" => Ok(Self::PayerExempt),
            "equal_share" | "equal-share" => Ok(Self::EqualShare),
            other => Err(format!(
                "unknown split policy '{}', expected payer_exempt or equal_share",
                other
            )),
        }
    }
}

impl std::fmt::Display for SplitPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PayerExempt => write!(f, "payer_exempt"),
            Self::EqualShare => write!(f, "equal_share"),
        }
    }
}

/// Precondition failures of the calculator.
///
/// Callers validate input first, so these only surface when the calculator
/// is driven directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("cannot split an expense across zero participants")]
    NoParticipants,
    #[error("expense amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("payer '{0}' is not a participant")]
    PayerNotParticipant(ParticipantName),
    #[error("amount {0} overflows the balance arithmetic")]
    Overflow(Decimal),
}

/// Even-split balance calculator.
pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Per-head share of `amount` across `count` participants.
    pub fn share(amount: Decimal, count: usize) -> Result<Decimal, SplitError> {
        if count == 0 {
            return Err(SplitError::NoParticipants);
        }
        amount
            .checked_div(Decimal::from(count))
            .ok_or(SplitError::Overflow(amount))
    }

    /// Fold one expense into the balances.
    ///
    /// # Algorithm
    ///
    /// 1. `share = amount / participants.len()`, counting duplicates and
    ///    the payer.
    /// 2. For each distinct participant, in list order:
    ///    the payer gains `amount` on `paid`; non-payers gain `share` on
    ///    `owes`; under [`SplitPolicy::EqualShare`] the payer also gains
    ///    `share` on `owes`.
    /// 3. The sheet is rebuilt from `participants` alone. Rows in `prior`
    ///    for names no longer listed are dropped.
    /// 4. The column totals of the new sheet must stay within `Decimal`
    ///    range, otherwise the split is refused.
    ///
    /// Pure: `prior` is not modified.
    pub fn compute_split(
        participants: &[ParticipantName],
        prior: &BalanceSheet,
        amount: Decimal,
        payer: &ParticipantName,
        policy: SplitPolicy,
    ) -> Result<BalanceSheet, SplitError> {
        if amount <= Decimal::ZERO {
            return Err(SplitError::NonPositiveAmount(amount));
        }
        let share = Self::share(amount, participants.len())?;
        if !participants.contains(payer) {
            return Err(SplitError::PayerNotParticipant(payer.clone()));
        }

        let mut next = BalanceSheet::new();
        for participant in participants {
            if next.get(participant).is_some() {
                continue;
            }
            let is_payer = participant == payer;
            let paid_delta = if is_payer { amount } else { Decimal::ZERO };
            let owes_delta = match (is_payer, policy) {
                (true, SplitPolicy::PayerExempt) => Decimal::ZERO,
                _ => share,
            };

            let before = prior.balance_or_zero(participant);
            let paid = before
                .paid
                .checked_add(paid_delta)
                .ok_or(SplitError::Overflow(amount))?;
            let owes = before
                .owes
                .checked_add(owes_delta)
                .ok_or(SplitError::Overflow(amount))?;
            next.set(participant.clone(), Balance::new(paid, owes));
        }
        if next.checked_totals().is_none() {
            return Err(SplitError::Overflow(amount));
        }

        debug!(
            "split {} paid by {} across {} participants ({} each, {})",
            amount,
            payer,
            participants.len(),
            share,
            policy
        );
        Ok(next)
    }
}
