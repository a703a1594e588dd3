use crate::config::SplitterConfig;
use crate::core::balance::BalanceSheet;
use crate::core::expense::{ExpenseLog, ExpenseRecord};
use crate::core::participant::{ParticipantName, ParticipantRegistry};
use crate::session::validation::{validate_participant_name, validate_split, ValidationError};
use crate::split::calculator::{BalanceCalculator, SplitError, SplitPolicy};
use crate::split::summary::SessionSummary;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// A discrete user action. Inputs are carried as raw text, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    AddParticipant {
        name: String,
    },
    DeleteParticipant {
        name: String,
    },
    SplitExpense {
        #[serde(deserialize_with = "amount_text")]
        amount: String,
        payer: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        memo: Option<String>,
    },
    ClearExpenses,
}

impl Action {
    pub fn add(name: impl Into<String>) -> Self {
        Self::AddParticipant { name: name.into() }
    }

    pub fn delete(name: impl Into<String>) -> Self {
        Self::DeleteParticipant { name: name.into() }
    }

    pub fn split(amount: impl Into<String>, payer: impl Into<String>) -> Self {
        Self::SplitExpense {
            amount: amount.into(),
            payer: payer.into(),
            memo: None,
        }
    }

    pub fn split_with_memo(
        amount: impl Into<String>,
        payer: impl Into<String>,
        memo: impl Into<String>,
    ) -> Self {
        Self::SplitExpense {
            amount: amount.into(),
            payer: payer.into(),
            memo: Some(memo.into()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddParticipant { .. } => "add_participant",
            Self::DeleteParticipant { .. } => "delete_participant",
            Self::SplitExpense { .. } => "split_expense",
            Self::ClearExpenses => "clear_expenses",
        }
    }
}

/// Scripts may write the amount as a JSON number or a string.
fn amount_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AmountText {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match AmountText::deserialize(deserializer)? {
        AmountText::Text(s) => s,
        AmountText::Number(n) => n.to_string(),
    })
}

/// Why an action was declined. The state is untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Split(#[from] SplitError),
}

/// Immutable snapshot of a session.
///
/// Every handler takes `&self` and returns a fresh snapshot, so a rejected
/// action can never leave a half-applied state behind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    participants: ParticipantRegistry,
    balances: BalanceSheet,
    journal: ExpenseLog,
}

impl SessionState {
    pub fn new(config: &SplitterConfig) -> Self {
        Self {
            participants: config.new_registry(),
            balances: BalanceSheet::new(),
            journal: ExpenseLog::new(),
        }
    }

    pub fn participants(&self) -> &ParticipantRegistry {
        &self.participants
    }

    pub fn balances(&self) -> &BalanceSheet {
        &self.balances
    }

    pub fn journal(&self) -> &ExpenseLog {
        &self.journal
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_balances(&self.balances, &self.journal)
    }

    /// Dispatch an action to its handler.
    pub fn apply(&self, action: &Action, policy: SplitPolicy) -> Result<SessionState, ActionError> {
        match action {
            Action::AddParticipant { name } => self.add_participant(name),
            Action::DeleteParticipant { name } => self.delete_participant(name),
            Action::SplitExpense {
                amount,
                payer,
                memo,
            } => self.split_expense(amount, payer, memo.as_deref(), policy),
            Action::ClearExpenses => Ok(self.clear_expenses()),
        }
    }

    /// Register a participant. Existing balances are not touched; the new
    /// participant has no balance row until the next split.
    pub fn add_participant(&self, raw_name: &str) -> Result<SessionState, ActionError> {
        let mut next = self.clone();
        next.participants
            .add(raw_name)
            .map_err(ValidationError::from)?;
        Ok(next)
    }

    /// Remove every occurrence of a name and drop its balance row.
    ///
    /// Amounts the departed participant absorbed are not redistributed.
    pub fn delete_participant(&self, raw_name: &str) -> Result<SessionState, ActionError> {
        let name = ParticipantName::new(validate_participant_name(raw_name)?);
        let mut next = self.clone();
        next.participants.remove_all(&name);
        next.balances.remove(&name);
        Ok(next)
    }

    /// Validate raw split input and fold the expense into the balances.
    pub fn split_expense(
        &self,
        amount_text: &str,
        payer_text: &str,
        memo: Option<&str>,
        policy: SplitPolicy,
    ) -> Result<SessionState, ActionError> {
        let split = validate_split(amount_text, payer_text, &self.participants)?;
        let participants = self.participants.as_slice();

        let balances = BalanceCalculator::compute_split(
            participants,
            &self.balances,
            split.amount,
            &split.payer,
            policy,
        )?;
        let share = BalanceCalculator::share(split.amount, participants.len())?;

        let mut record =
            ExpenseRecord::new(split.amount, split.payer, participants.len(), share);
        if let Some(memo) = memo {
            record = record.with_memo(memo);
        }

        let mut next = self.clone();
        next.balances = balances;
        next.journal.push(record);
        Ok(next)
    }

    /// Empty the balances and the journal. Participants are kept.
    pub fn clear_expenses(&self) -> SessionState {
        let mut next = self.clone();
        next.balances.clear();
        next.journal.clear();
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::balance::Balance;
    use rust_decimal_macros::dec;

    fn trio() -> SessionState {
        SessionState::default()
            .add_participant("Alice")
            .and_then(|s| s.add_participant("Bob"))
            .and_then(|s| s.add_participant("Carol"))
            .unwrap()
    }

    #[test]
    fn test_add_blank_rejected() {
        let state = SessionState::default();
        assert_eq!(
            state.add_participant("  "),
            Err(ActionError::Validation(ValidationError::EmptyParticipantName))
        );
    }

    #[test]
    fn test_add_does_not_create_balance() {
        let state = trio();
        assert_eq!(state.participants().len(), 3);
        assert!(state.balances().is_empty());
    }

    #[test]
    fn test_split_records_journal() {
        let state = trio()
            .split_expense("90", "Bob", Some("groceries"), SplitPolicy::PayerExempt)
            .unwrap();

        assert_eq!(state.journal().len(), 1);
        let record = &state.journal().records()[0];
        assert_eq!(record.share(), dec!(30));
        assert_eq!(record.participant_count(), 3);
        assert_eq!(record.memo(), Some("groceries"));
    }

    #[test]
    fn test_rejected_split_leaves_snapshot_intact() {
        let before = trio()
            .split_expense("90", "Bob", None, SplitPolicy::PayerExempt)
            .unwrap();
        let result = before.split_expense("abc", "Bob", None, SplitPolicy::PayerExempt);
        assert!(result.is_err());
        assert_eq!(before.balances().len(), 3);
        assert_eq!(before.journal().len(), 1);
    }

    #[test]
    fn test_delete_drops_only_that_row() {
        let state = trio()
            .split_expense("90", "Bob", None, SplitPolicy::PayerExempt)
            .unwrap();
        let after = state.delete_participant("Alice").unwrap();

        assert!(after.balances().get(&"Alice".into()).is_none());
        assert_eq!(
            after.balances().get(&"Bob".into()),
            Some(&Balance::new(dec!(90), dec!(0)))
        );
        assert_eq!(
            after.balances().get(&"Carol".into()),
            Some(&Balance::new(dec!(0), dec!(30)))
        );
        // history is kept
        assert_eq!(after.journal().len(), 1);
    }

    #[test]
    fn test_delete_blank_rejected() {
        assert!(trio().delete_participant("").is_err());
    }

    #[test]
    fn test_clear_keeps_participants() {
        let state = trio()
            .split_expense("90", "Bob", None, SplitPolicy::PayerExempt)
            .unwrap()
            .clear_expenses();
        assert!(state.balances().is_empty());
        assert!(state.journal().is_empty());
        assert_eq!(state.participants().len(), 3);
    }

    #[test]
    fn test_apply_dispatches() {
        let state = trio()
            .apply(&Action::split("30", "Alice"), SplitPolicy::PayerExempt)
            .unwrap();
        assert_eq!(
            state.balances().get(&"Alice".into()),
            Some(&Balance::new(dec!(30), dec!(0)))
        );
    }

    #[test]
    fn test_action_json_shape() {
        let action: Action =
            serde_json::from_str(r#"{ "action": "split_expense", "amount": 90, "payer": "Bob" }"#)
                .unwrap();
        assert_eq!(action, Action::split("90", "Bob"));

        let action: Action = serde_json::from_str(r#"{ "action": "clear_expenses" }"#).unwrap();
        assert_eq!(action, Action::ClearExpenses);

        let json = serde_json::to_value(Action::add("Alice")).unwrap();
        assert_eq!(json["action"], "add_participant");
        assert_eq!(json["name"], "Alice");
    }
}
