use crate::core::balance::BalanceSheet;
use crate::core::expense::ExpenseLog;
use crate::core::participant::ParticipantName;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a participant is ahead, behind, or even.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionStatus {
    /// Paid more than they owe.
    Creditor,
    /// Owes more than they paid.
    Debtor,
    Settled,
}

impl std::fmt::Display for PositionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Creditor => write!(f, "CREDITOR"),
            Self::Debtor => write!(f, "DEBTOR"),
            Self::Settled => write!(f, "SETTLED"),
        }
    }
}

/// One participant's standing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetPosition {
    pub name: ParticipantName,
    pub paid: Decimal,
    pub owes: Decimal,
    /// `paid - owes`.
    pub net: Decimal,
}

impl NetPosition {
    pub fn status(&self) -> PositionStatus {
        if self.net > Decimal::ZERO {
            PositionStatus::Creditor
        } else if self.net < Decimal::ZERO {
            PositionStatus::Debtor
        } else {
            PositionStatus::Settled
        }
    }
}

/// Aggregate view over a session's balances.
///
/// This reports standings only. It does not propose transfers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Positions in balance-sheet order.
    pub positions: Vec<NetPosition>,
    /// Total fronted by all current participants.
    pub total_paid: Decimal,
    /// Total all current participants are responsible for.
    pub total_owed: Decimal,
    /// Number of splits recorded since the last clear.
    pub expense_count: usize,
}

impl SessionSummary {
    pub fn from_balances(balances: &BalanceSheet, journal: &ExpenseLog) -> Self {
        let positions = balances
            .entries()
            .iter()
            .map(|entry| NetPosition {
                name: entry.name.clone(),
                paid: entry.balance.paid,
                owes: entry.balance.owes,
                net: entry.balance.net(),
            })
            .collect();

        SessionSummary {
            positions,
            total_paid: balances.total_paid(),
            total_owed: balances.total_owed(),
            expense_count: journal.len(),
        }
    }

    pub fn position(&self, name: &ParticipantName) -> Option<&NetPosition> {
        self.positions.iter().find(|p| &p.name == name)
    }

    pub fn creditors(&self) -> impl Iterator<Item = &NetPosition> {
        self.positions
            .iter()
            .filter(|p| p.status() == PositionStatus::Creditor)
    }

    pub fn debtors(&self) -> impl Iterator<Item = &NetPosition> {
        self.positions
            .iter()
            .filter(|p| p.status() == PositionStatus::Debtor)
    }

    /// Fraction of the fronted money that others are responsible for.
    ///
    /// Under the payer-exempt policy with a stable group of `N` this is
    /// `(N - 1) / N`.
    pub fn coverage_ratio(&self) -> f64 {
        if self.total_paid == Decimal::ZERO {
            return 0.0;
        }
        match self.total_owed.checked_div(self.total_paid) {
            Some(ratio) => to_f64(ratio),
            // quotient beyond Decimal range
            None => to_f64(self.total_owed) / to_f64(self.total_paid),
        }
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_string().parse::<f64>().unwrap_or(0.0)
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Session Summary ===")?;
        writeln!(f, "Expenses:      {}", self.expense_count)?;
        writeln!(f, "Total Paid:    {}", self.total_paid.round_dp(2))?;
        writeln!(f, "Total Owed:    {}", self.total_owed.round_dp(2))?;
        writeln!(f, "Coverage:      {:.1}%", self.coverage_ratio() * 100.0)?;

        writeln!(f, "\nPositions:")?;
        for p in &self.positions {
            writeln!(f, "  {:<15} {:>12} [{}]", p.name, p.net.round_dp(2), p.status())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::balance::Balance;
    use crate::core::expense::ExpenseRecord;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn sample() -> (BalanceSheet, ExpenseLog) {
        let mut sheet = BalanceSheet::new();
        sheet.set("Alice".into(), Balance::new(dec!(30), dec!(40)));
        sheet.set("Bob".into(), Balance::new(dec!(90), dec!(10)));
        sheet.set("Carol".into(), Balance::new(dec!(0), dec!(40)));

        let mut log = ExpenseLog::new();
        log.push(ExpenseRecord::new(dec!(90), "Bob".into(), 3, dec!(30)));
        log.push(ExpenseRecord::new(dec!(30), "Alice".into(), 3, dec!(10)));
        (sheet, log)
    }

    #[test]
    fn test_summary_positions() {
        let (sheet, log) = sample();
        let summary = SessionSummary::from_balances(&sheet, &log);

        assert_eq!(summary.expense_count, 2);
        assert_eq!(summary.total_paid, dec!(120));
        assert_eq!(summary.total_owed, dec!(90));

        let bob = summary.position(&"Bob".into()).unwrap();
        assert_eq!(bob.net, dec!(80));
        assert_eq!(bob.status(), PositionStatus::Creditor);

        let alice = summary.position(&"Alice".into()).unwrap();
        assert_eq!(alice.net, dec!(-10));
        assert_eq!(alice.status(), PositionStatus::Debtor);

        assert_eq!(summary.creditors().count(), 1);
        assert_eq!(summary.debtors().count(), 2);
    }

    #[test]
    fn test_coverage_ratio_payer_exempt() {
        let (sheet, log) = sample();
        let summary = SessionSummary::from_balances(&sheet, &log);
        assert_relative_eq!(summary.coverage_ratio(), 0.75, epsilon = 1e-9);
    }

    #[test]
    fn test_coverage_ratio_beyond_decimal_range() {
        let mut sheet = BalanceSheet::new();
        sheet.set("Bob".into(), Balance::new(Decimal::new(1, 28), Decimal::MAX / dec!(2)));
        let summary = SessionSummary::from_balances(&sheet, &ExpenseLog::new());

        let ratio = summary.coverage_ratio();
        assert!(ratio.is_finite());
        assert_relative_eq!(ratio, 3.961408125713217e56, max_relative = 1e-9);
        assert!(summary.to_string().contains("Coverage:"));
    }

    #[test]
    fn test_empty_summary() {
        let summary = SessionSummary::from_balances(&BalanceSheet::new(), &ExpenseLog::new());
        assert!(summary.positions.is_empty());
        assert_eq!(summary.coverage_ratio(), 0.0);
    }

    #[test]
    fn test_settled_status() {
        let p = NetPosition {
            name: "Alice".into(),
            paid: dec!(10),
            owes: dec!(10),
            net: Decimal::ZERO,
        };
        assert_eq!(p.status(), PositionStatus::Settled);
    }

    #[test]
    fn test_display_mentions_each_participant() {
        let (sheet, log) = sample();
        let text = SessionSummary::from_balances(&sheet, &log).to_string();
        assert!(text.contains("Alice"));
        assert!(text.contains("CREDITOR"));
    }
}
