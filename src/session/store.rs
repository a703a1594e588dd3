use crate::config::SplitterConfig;
use crate::session::state::{Action, ActionError, SessionState};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

/// User-facing notice for a declined action: a title and a one-line message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

impl From<&ActionError> for Alert {
    fn from(err: &ActionError) -> Self {
        Alert::error(err.to_string())
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Owner of the current session snapshot.
///
/// Actions run one at a time to completion. On success the new snapshot
/// replaces the old one; on failure the old one stays and an [`Alert`] is
/// returned.
#[derive(Debug, Clone)]
pub struct SessionStore {
    config: SplitterConfig,
    state: SessionState,
}

impl SessionStore {
    pub fn new(config: SplitterConfig) -> Self {
        let state = SessionState::new(&config);
        Self { config, state }
    }

    pub fn config(&self) -> &SplitterConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn dispatch(&mut self, action: &Action) -> Result<&SessionState, Alert> {
        match self.state.apply(action, self.config.split_policy) {
            Ok(next) => {
                info!("{} accepted", action.kind());
                debug!(
                    "{} participants, {} balance rows, {} expenses",
                    next.participants().len(),
                    next.balances().len(),
                    next.journal().len()
                );
                self.state = next;
                Ok(&self.state)
            }
            Err(err) => {
                info!("{} rejected: {:?}", action.kind(), err);
                Err(Alert::from(&err))
            }
        }
    }

    pub fn add_participant(&mut self, name: &str) -> Result<&SessionState, Alert> {
        self.dispatch(&Action::add(name))
    }

    pub fn delete_participant(&mut self, name: &str) -> Result<&SessionState, Alert> {
        self.dispatch(&Action::delete(name))
    }

    pub fn split_expense(&mut self, amount: &str, payer: &str) -> Result<&SessionState, Alert> {
        self.dispatch(&Action::split(amount, payer))
    }

    pub fn clear_expenses(&mut self) -> &SessionState {
        self.state = self.state.clear_expenses();
        info!("clear_expenses accepted");
        &self.state
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SplitterConfig::default())
    }
}
