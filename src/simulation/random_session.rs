//! Random action scripts for benchmarking and demos.
//!
//! A generated script registers every participant first, then records
//! splits with random payers and amounts. Every generated action is valid,
//! so replaying a script produces no rejections.

use crate::session::script::ActionScript;
use crate::session::state::Action;
use rand::Rng;
use rust_decimal::Decimal;

/// Shape of a generated session.
#[derive(Debug, Clone)]
pub struct ScriptConfig {
    pub participant_count: usize,
    pub split_count: usize,
    /// Smallest amount, in whole currency units.
    pub min_amount: u64,
    /// Largest amount, in whole currency units.
    pub max_amount: u64,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            participant_count: 4,
            split_count: 10,
            min_amount: 1,
            max_amount: 5_000,
        }
    }
}

pub fn participant_name(index: usize) -> String {
    format!("P{:03}", index)
}

/// Generate a random but always-valid action script.
pub fn generate_random_script(config: &ScriptConfig) -> ActionScript {
    let mut rng = rand::thread_rng();
    let mut actions = Vec::with_capacity(config.participant_count + config.split_count);

    for i in 0..config.participant_count {
        actions.push(Action::add(participant_name(i)));
    }

    if config.participant_count == 0 {
        return actions.into_iter().collect();
    }

    let min_cents = config.min_amount.max(1) * 100;
    let max_cents = config.max_amount.max(config.min_amount.max(1)) * 100;
    for _ in 0..config.split_count {
        let payer = rng.gen_range(0..config.participant_count);
        let cents = rng.gen_range(min_cents..=max_cents);
        let amount = Decimal::new(cents as i64, 2);
        actions.push(Action::split(amount.to_string(), participant_name(payer)));
    }

    actions.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::script::replay;
    use crate::session::store::SessionStore;

    #[test]
    fn test_script_shape() {
        let config = ScriptConfig {
            participant_count: 5,
            split_count: 12,
            ..Default::default()
        };
        let script = generate_random_script(&config);
        assert_eq!(script.len(), 17);
        assert_eq!(script.actions[0], Action::add("P000"));
    }

    #[test]
    fn test_generated_script_replays_cleanly() {
        let config = ScriptConfig {
            participant_count: 6,
            split_count: 40,
            ..Default::default()
        };
        let script = generate_random_script(&config);
        let mut store = SessionStore::default();
        let report = replay(&mut store, &script);

        assert!(report.is_clean());
        assert_eq!(report.applied, 46);
        assert_eq!(store.state().balances().len(), 6);
        assert_eq!(store.state().journal().len(), 40);
    }

    #[test]
    fn test_no_participants_means_no_splits() {
        let config = ScriptConfig {
            participant_count: 0,
            split_count: 10,
            ..Default::default()
        };
        assert!(generate_random_script(&config).is_empty());
    }
}
