use crate::core::participant::ParticipantName;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A split that was accepted into the session.
///
/// Records are kept for display only. Balances are accumulated directly on
/// the sheet, so editing or dropping a record never changes who owes what.
///
/// # Examples
///
/// ```
/// use expense_splitter::core::expense::ExpenseRecord;
/// use expense_splitter::core::participant::ParticipantName;
/// use rust_decimal_macros::dec;
///
/// let record = ExpenseRecord::new(dec!(90), ParticipantName::new("Bob"), 3, dec!(30))
///     .with_memo("dinner");
///
/// assert_eq!(record.share(), dec!(30));
/// assert_eq!(record.memo(), Some("dinner"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    id: Uuid,
    amount: Decimal,
    payer: ParticipantName,
    /// Divisor used for the split, duplicates included.
    participant_count: usize,
    share: Decimal,
    recorded_at: DateTime<Utc>,
    memo: Option<String>,
}

impl ExpenseRecord {
    pub fn new(
        amount: Decimal,
        payer: ParticipantName,
        participant_count: usize,
        share: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            payer,
            participant_count,
            share,
            recorded_at: Utc::now(),
            memo: None,
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        let memo = memo.into();
        if !memo.trim().is_empty() {
            self.memo = Some(memo.trim().to_string());
        }
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn payer(&self) -> &ParticipantName {
        &self.payer
    }

    pub fn participant_count(&self) -> usize {
        self.participant_count
    }

    pub fn share(&self) -> Decimal {
        self.share
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }
}

/// Append-only journal of accepted splits, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseLog {
    records: Vec<ExpenseRecord>,
}

impl ExpenseLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ExpenseRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Sum of every recorded amount, saturating at `Decimal::MAX`.
    ///
    /// Records outlive deleted participants, so this can exceed what any
    /// single balance sheet holds.
    pub fn total_spent(&self) -> Decimal {
        self.records
            .iter()
            .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.amount))
    }

    /// Records paid by `payer`.
    pub fn paid_by<'a>(
        &'a self,
        payer: &'a ParticipantName,
    ) -> impl Iterator<Item = &'a ExpenseRecord> + 'a {
        self.records.iter().filter(move |r| &r.payer == payer)
    }
}
