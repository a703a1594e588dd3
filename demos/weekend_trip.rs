//! A weekend trip split three ways.
//!
//! Walks through adding people, recording expenses, a rejected entry,
//! someone leaving early, and the final summary.

use expense_splitter::config::SplitterConfig;
use expense_splitter::render;
use expense_splitter::session::state::Action;
use expense_splitter::session::store::SessionStore;

fn show(store: &SessionStore) {
    for line in render::balance_lines(store.state().balances(), store.config()) {
        println!("  {}", line);
    }
    println!();
}

fn main() {
    println!("━━━ Weekend Trip ━━━\n");

    let mut store = SessionStore::new(SplitterConfig::default());
    for name in ["Alice", "Bob", "Carol"] {
        if let Err(alert) = store.add_participant(name) {
            eprintln!("{}", alert);
        }
    }

    println!("Bob pays 90 for the cabin:");
    if let Err(alert) = store.dispatch(&Action::split_with_memo("90", "Bob", "cabin")) {
        eprintln!("{}", alert);
    }
    show(&store);

    println!("Alice pays 30 for groceries:");
    if let Err(alert) = store.dispatch(&Action::split_with_memo("30", "Alice", "groceries")) {
        eprintln!("{}", alert);
    }
    show(&store);

    println!("Someone types the payer wrong:");
    if let Err(alert) = store.split_expense("45", "Dave") {
        println!("  [{}]\n", alert);
    }

    println!("Carol leaves early:");
    if let Err(alert) = store.delete_participant("Carol") {
        eprintln!("{}", alert);
    }
    show(&store);

    println!("History:");
    for line in render::history_lines(store.state().journal(), store.config()) {
        println!("  {}", line);
    }
    println!();

    print!("{}", store.state().summary());
}
