//! Plain-text rendering of session lists.

use crate::config::SplitterConfig;
use crate::core::balance::{BalanceEntry, BalanceSheet};
use crate::core::expense::{ExpenseLog, ExpenseRecord};
use crate::core::participant::ParticipantRegistry;

/// `"{name} paid {sym}{paid} and owes {sym}{owes}."`
pub fn balance_line(entry: &BalanceEntry, config: &SplitterConfig) -> String {
    let sym = &config.currency_symbol;
    let places = config.decimal_places;
    format!(
        "{} paid {} and owes {}.",
        entry.name,
        sym.format(entry.balance.paid, places),
        sym.format(entry.balance.owes, places)
    )
}

pub fn balance_lines(sheet: &BalanceSheet, config: &SplitterConfig) -> Vec<String> {
    sheet
        .entries()
        .iter()
        .map(|entry| balance_line(entry, config))
        .collect()
}

/// Numbered participant list, one line per entry (duplicates shown).
pub fn participant_lines(participants: &ParticipantRegistry) -> Vec<String> {
    participants
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}. {}", i + 1, name))
        .collect()
}

pub fn expense_line(index: usize, record: &ExpenseRecord, config: &SplitterConfig) -> String {
    let sym = &config.currency_symbol;
    let places = config.decimal_places;
    let mut line = format!(
        "#{} {} paid {}, split {} ways ({} each) at {}",
        index + 1,
        record.payer(),
        sym.format(record.amount(), places),
        record.participant_count(),
        sym.format(record.share(), places),
        record.recorded_at().format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(memo) = record.memo() {
        line.push_str(&format!(" [{}]", memo));
    }
    line
}

pub fn history_lines(journal: &ExpenseLog, config: &SplitterConfig) -> Vec<String> {
    journal
        .records()
        .iter()
        .enumerate()
        .map(|(i, record)| expense_line(i, record, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::balance::Balance;
    use crate::core::currency::CurrencySymbol;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balance_line_default_symbol() {
        let entry = BalanceEntry {
            name: "Alice".into(),
            balance: Balance::new(dec!(30), dec!(40)),
        };
        assert_eq!(
            balance_line(&entry, &SplitterConfig::default()),
            "Alice paid ₹30.00 and owes ₹40.00."
        );
    }

    #[test]
    fn test_balance_line_custom_symbol_and_places() {
        let config = SplitterConfig {
            currency_symbol: CurrencySymbol::new("$"),
            decimal_places: 3,
            ..Default::default()
        };
        let entry = BalanceEntry {
            name: "Bob".into(),
            balance: Balance::new(Decimal::ZERO, dec!(100) / dec!(3)),
        };
        assert_eq!(balance_line(&entry, &config), "Bob paid $0.000 and owes $33.333.");
    }

    #[test]
    fn test_participant_lines_numbered() {
        let reg: ParticipantRegistry = ["Alice", "Bob"].into_iter().collect();
        assert_eq!(participant_lines(&reg), vec!["1. Alice", "2. Bob"]);
    }

    #[test]
    fn test_history_line_includes_memo() {
        let mut log = ExpenseLog::new();
        log.push(ExpenseRecord::new(dec!(90), "Bob".into(), 3, dec!(30)).with_memo("dinner"));
        let lines = history_lines(&log, &SplitterConfig::default());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("#1 Bob paid ₹90.00, split 3 ways (₹30.00 each) at "));
        assert!(lines[0].ends_with(" [dinner]"));
    }
}
