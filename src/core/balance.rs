use crate::core::participant::ParticipantName;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What one participant has fronted and what they are responsible for.
///
/// Both fields only ever grow within a session; the only way back to zero
/// is clearing the whole sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Total amount this participant paid on behalf of the group.
    pub paid: Decimal,
    /// Total amount this participant is responsible for.
    pub owes: Decimal,
}

impl Balance {
    pub fn new(paid: Decimal, owes: Decimal) -> Self {
        Self { paid, owes }
    }

    /// Positive when the group owes this participant money.
    pub fn net(&self) -> Decimal {
        self.paid - self.owes
    }
}

/// A single row of the balance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub name: ParticipantName,
    #[serde(flatten)]
    pub balance: Balance,
}

/// Ordered per-participant balances.
///
/// The sheet is rebuilt from the participant list on every split, so its
/// order follows the registry. It is empty until the first split.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceSheet {
    entries: Vec<BalanceEntry>,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row, or overwrite the existing row for the same name.
    pub fn set(&mut self, name: ParticipantName, balance: Balance) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.balance = balance,
            None => self.entries.push(BalanceEntry { name, balance }),
        }
    }

    pub fn get(&self, name: &ParticipantName) -> Option<&Balance> {
        self.entries
            .iter()
            .find(|e| &e.name == name)
            .map(|e| &e.balance)
    }

    /// Balance for `name`, or zero on both fields if absent.
    pub fn balance_or_zero(&self, name: &ParticipantName) -> Balance {
        self.get(name).copied().unwrap_or_default()
    }

    /// Drop the row for `name`. Returns the removed balance, if any.
    pub fn remove(&mut self, name: &ParticipantName) -> Option<Balance> {
        let idx = self.entries.iter().position(|e| &e.name == name)?;
        Some(self.entries.remove(idx).balance)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[BalanceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of the `paid` column, saturating at `Decimal::MAX`.
    pub fn total_paid(&self) -> Decimal {
        self.entries
            .iter()
            .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.balance.paid))
    }

    /// Sum of the `owes` column, saturating at `Decimal::MAX`.
    pub fn total_owed(&self) -> Decimal {
        self.entries
            .iter()
            .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.balance.owes))
    }

    /// Both column totals, or `None` if either overflows.
    pub fn checked_totals(&self) -> Option<(Decimal, Decimal)> {
        self.entries
            .iter()
            .try_fold((Decimal::ZERO, Decimal::ZERO), |(paid, owes), e| {
                Some((
                    paid.checked_add(e.balance.paid)?,
                    owes.checked_add(e.balance.owes)?,
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_sheet() {
        let sheet = BalanceSheet::new();
        assert!(sheet.is_empty());
        assert_eq!(
            sheet.balance_or_zero(&ParticipantName::new("Alice")),
            Balance::default()
        );
    }

    #[test]
    fn test_set_overwrites_in_place() {
        let mut sheet = BalanceSheet::new();
        sheet.set("Alice".into(), Balance::new(dec!(0), dec!(30)));
        sheet.set("Bob".into(), Balance::new(dec!(90), dec!(0)));
        sheet.set("Alice".into(), Balance::new(dec!(30), dec!(40)));

        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.entries()[0].name.as_str(), "Alice");
        assert_eq!(sheet.entries()[0].balance, Balance::new(dec!(30), dec!(40)));
    }

    #[test]
    fn test_remove_only_named_row() {
        let mut sheet = BalanceSheet::new();
        sheet.set("Alice".into(), Balance::new(dec!(0), dec!(30)));
        sheet.set("Bob".into(), Balance::new(dec!(90), dec!(0)));

        let removed = sheet.remove(&"Alice".into());
        assert_eq!(removed, Some(Balance::new(dec!(0), dec!(30))));
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.get(&"Bob".into()), Some(&Balance::new(dec!(90), dec!(0))));
        assert_eq!(sheet.remove(&"Alice".into()), None);
    }

    #[test]
    fn test_totals_and_net() {
        let mut sheet = BalanceSheet::new();
        sheet.set("Alice".into(), Balance::new(dec!(0), dec!(30)));
        sheet.set("Bob".into(), Balance::new(dec!(90), dec!(0)));
        sheet.set("Carol".into(), Balance::new(dec!(0), dec!(30)));

        assert_eq!(sheet.total_paid(), dec!(90));
        assert_eq!(sheet.total_owed(), dec!(60));
        assert_eq!(sheet.balance_or_zero(&"Bob".into()).net(), dec!(90));
        assert_eq!(sheet.balance_or_zero(&"Alice".into()).net(), dec!(-30));
        assert_eq!(sheet.checked_totals(), Some((dec!(90), dec!(60))));
    }

    #[test]
    fn test_totals_past_decimal_range() {
        let mut sheet = BalanceSheet::new();
        sheet.set("Alice".into(), Balance::new(Decimal::MAX, dec!(0)));
        sheet.set("Bob".into(), Balance::new(Decimal::MAX, dec!(0)));

        assert_eq!(sheet.checked_totals(), None);
        assert_eq!(sheet.total_paid(), Decimal::MAX);
        assert_eq!(sheet.total_owed(), Decimal::ZERO);
    }
}
