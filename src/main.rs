//! expense-splitter CLI
//!
//! Track a group's shared expenses from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Interactive session on stdin
//! expense-splitter session
//!
//! # Replay a JSON action script and print the balances
//! expense-splitter replay --input trip.json
//!
//! # Same, as JSON
//! expense-splitter replay --input trip.json --format json
//!
//! # Generate a random action script
//! expense-splitter generate --participants 5 --splits 20
//! ```

use expense_splitter::config::SplitterConfig;
use expense_splitter::core::currency::CurrencySymbol;
use expense_splitter::render;
use expense_splitter::session::script::{replay, ActionScript};
use expense_splitter::session::state::{Action, SessionState};
use expense_splitter::session::store::SessionStore;
use expense_splitter::simulation::random_session::{generate_random_script, ScriptConfig};
use expense_splitter::split::calculator::SplitPolicy;
use expense_splitter::split::summary::SessionSummary;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process;

fn print_usage() {
    eprintln!(
        r#"expense-splitter: even-split shared expense tracker

USAGE:
    expense-splitter <COMMAND> [OPTIONS]

COMMANDS:
    session     Start an interactive session on stdin
    replay      Replay a JSON action script
    generate    Generate a random action script
    help        Show this message

OPTIONS (session, replay):
    --config <FILE>     JSON config file
    --currency <SYM>    Currency symbol (default: ₹)
    --policy <POLICY>   payer_exempt (default) or equal_share

OPTIONS (replay):
    --input <FILE>      Path to JSON action script
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --participants <N>  Number of participants (default: 4)
    --splits <N>        Number of splits (default: 10)
    --output <FILE>     Write to file instead of stdout

SESSION COMMANDS:
    add <name>                      Add a participant
    delete <name>                   Remove a participant and their balance
    split <amount> <payer> [-- memo] Split an expense evenly
    clear                           Clear all balances
    participants | balances | summary | history
    help | quit

EXAMPLES:
    expense-splitter session --currency '$'
    expense-splitter replay --input trip.json --format json
    expense-splitter generate --participants 3 --splits 8 --output trip.json"#
    );
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

/// Options shared by `session` and `replay`.
#[derive(Default)]
struct CommonOptions {
    config_path: Option<String>,
    currency: Option<String>,
    policy: Option<SplitPolicy>,
}

impl CommonOptions {
    /// Consume a shared option at `args[*i]`. Returns false if it isn't one.
    fn take(&mut self, args: &[String], i: &mut usize) -> bool {
        let flag = args[*i].as_str();
        if !matches!(flag, "--config" | "--currency" | "--policy") {
            return false;
        }
        *i += 1;
        let value = args
            .get(*i)
            .cloned()
            .unwrap_or_else(|| fail(format!("{} requires a value", flag)));
        match flag {
            "--config" => self.config_path = Some(value),
            "--currency" => self.currency = Some(value),
            _ => self.policy = Some(value.parse().unwrap_or_else(|e: String| fail(e))),
        }
        true
    }

    fn resolve(&self) -> SplitterConfig {
        let mut config = match &self.config_path {
            Some(path) => {
                SplitterConfig::load(path).unwrap_or_else(|e| fail(format!("Error: {}", e)))
            }
            None => SplitterConfig::default(),
        };
        if let Some(symbol) = &self.currency {
            config.currency_symbol = CurrencySymbol::new(symbol.as_str());
        }
        if let Some(policy) = self.policy {
            config.split_policy = policy;
        }
        config
            .validate()
            .unwrap_or_else(|e| fail(format!("Error: {}", e)));
        config
    }
}

#[derive(serde::Serialize)]
struct ReplayOutput<'a> {
    applied: usize,
    rejected: &'a [expense_splitter::session::script::RejectedAction],
    balances: Vec<String>,
    summary: SessionSummary,
    state: &'a SessionState,
}

fn print_lines(lines: &[String], empty: &str) {
    if lines.is_empty() {
        println!("{}", empty);
    }
    for line in lines {
        println!("{}", line);
    }
}

fn cmd_replay(args: &[String]) {
    let mut common = CommonOptions::default();
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        if common.take(args, &mut i) {
            i += 1;
            continue;
        }
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(
                    args.get(i)
                        .cloned()
                        .unwrap_or_else(|| fail("--input requires a file path")),
                );
            }
            "--format" => {
                i += 1;
                format = args
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| fail("--format requires 'text' or 'json'"));
            }
            other => fail(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| fail("Error: --input <FILE> is required"));
    let config = common.resolve();
    let script = ActionScript::load(&path).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("Expected format:");
        fail(
            r#"{
  "actions": [
    { "action": "add_participant", "name": "Alice" },
    { "action": "split_expense", "amount": "90", "payer": "Alice" }
  ]
}"#,
        )
    });

    let mut store = SessionStore::new(config);
    let report = replay(&mut store, &script);
    let balances = render::balance_lines(store.state().balances(), store.config());

    if format == "json" {
        let output = ReplayOutput {
            applied: report.applied,
            rejected: &report.rejected,
            balances,
            summary: store.state().summary(),
            state: store.state(),
        };
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(format!("Error serializing output: {}", e)),
        }
    } else {
        for rejected in &report.rejected {
            eprintln!("action #{}: {}", rejected.index, rejected.alert);
        }
        println!("Applied {} of {} actions.\n", report.applied, script.len());
        print_lines(&balances, "No balances yet.");
        println!();
        print!("{}", store.state().summary());
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = ScriptConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--participants" => {
                i += 1;
                config.participant_count = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| fail("--participants requires a number"));
            }
            "--splits" => {
                i += 1;
                config.split_count = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| fail("--splits requires a number"));
            }
            "--output" => {
                i += 1;
                output_path = Some(
                    args.get(i)
                        .cloned()
                        .unwrap_or_else(|| fail("--output requires a file path")),
                );
            }
            other => fail(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    let script = generate_random_script(&config);
    let json = script
        .to_json_pretty()
        .unwrap_or_else(|e| fail(format!("Error: {}", e)));

    if let Some(path) = output_path {
        fs::write(&path, &json)
            .unwrap_or_else(|e| fail(format!("Error writing to '{}': {}", path, e)));
        eprintln!(
            "Generated {} actions for {} participants → {}",
            script.len(),
            config.participant_count,
            path
        );
    } else {
        println!("{}", json);
    }
}

/// Read-only views available in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Participants,
    Balances,
    Summary,
    History,
}

/// One parsed session line.
#[derive(Debug, Clone, PartialEq)]
enum SessionCommand {
    Blank,
    Quit,
    Help,
    Show(View),
    Apply(Action),
    Unknown(String),
}

/// Parse one session line. Argument checking is left to the store.
fn parse_session_line(line: &str) -> SessionCommand {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" => SessionCommand::Blank,
        "quit" | "exit" => SessionCommand::Quit,
        "help" => SessionCommand::Help,
        "participants" | "list" => SessionCommand::Show(View::Participants),
        "balances" => SessionCommand::Show(View::Balances),
        "summary" => SessionCommand::Show(View::Summary),
        "history" => SessionCommand::Show(View::History),
        "add" => SessionCommand::Apply(Action::add(rest)),
        "delete" => SessionCommand::Apply(Action::delete(rest)),
        "clear" => SessionCommand::Apply(Action::ClearExpenses),
        "split" => {
            let (args, memo) = match rest.split_once("--") {
                Some((args, memo)) => (args.trim(), Some(memo.trim())),
                None => (rest, None),
            };
            let (amount, payer) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
            SessionCommand::Apply(match memo {
                Some(memo) => Action::split_with_memo(amount, payer.trim(), memo),
                None => Action::split(amount, payer.trim()),
            })
        }
        other => SessionCommand::Unknown(other.to_string()),
    }
}

fn show(store: &SessionStore, view: View) {
    let state = store.state();
    match view {
        View::Participants => print_lines(
            &render::participant_lines(state.participants()),
            "No participants.",
        ),
        View::Balances => print_lines(
            &render::balance_lines(state.balances(), store.config()),
            "No balances yet.",
        ),
        View::Summary => print!("{}", state.summary()),
        View::History => print_lines(
            &render::history_lines(state.journal(), store.config()),
            "No expenses recorded.",
        ),
    }
}

/// Run one session line against the store. Returns `false` when the
/// session should end.
fn handle_line(store: &mut SessionStore, line: &str) -> bool {
    let action = match parse_session_line(line) {
        SessionCommand::Blank => return true,
        SessionCommand::Quit => return false,
        SessionCommand::Help => {
            print_usage();
            return true;
        }
        SessionCommand::Show(view) => {
            show(store, view);
            return true;
        }
        SessionCommand::Unknown(command) => {
            eprintln!("Unknown command: {} (type 'help')", command);
            return true;
        }
        SessionCommand::Apply(action) => action,
    };

    if let Err(alert) = store.dispatch(&action) {
        eprintln!("{}", alert);
        return true;
    }
    match action {
        Action::AddParticipant { .. } => show(store, View::Participants),
        _ => show(store, View::Balances),
    }
    true
}

fn cmd_session(args: &[String]) {
    let mut common = CommonOptions::default();
    let mut i = 0;
    while i < args.len() {
        if !common.take(args, &mut i) {
            fail(format!("Unknown option: {}", args[i]));
        }
        i += 1;
    }

    let mut store = SessionStore::new(common.resolve());
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("Expense splitter. Type 'help' for commands.");
    loop {
        print!("> ");
        let _ = stdout.flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                if !handle_line(&mut store, &line) {
                    break;
                }
            }
            Err(e) => fail(format!("Error reading input: {}", e)),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "session" => cmd_session(rest),
        "replay" => cmd_replay(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
