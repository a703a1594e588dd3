use crate::session::state::Action;
use crate::session::store::{Alert, SessionStore};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An ordered list of actions, as stored on disk.
///
/// ```json
/// {
///   "actions": [
///     { "action": "add_participant", "name": "Alice" },
///     { "action": "split_expense", "amount": "90", "payer": "Alice" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionScript {
    pub actions: Vec<Action>,
}

impl ActionScript {
    pub fn from_json_str(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String, ScriptError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl FromIterator<Action> for ActionScript {
    fn from_iter<T: IntoIterator<Item = Action>>(iter: T) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}

/// An action the store declined during replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedAction {
    /// Zero-based position in the script.
    pub index: usize,
    pub action: Action,
    pub alert: Alert,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayReport {
    pub applied: usize,
    pub rejected: Vec<RejectedAction>,
}

impl ReplayReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Dispatch every action in order. Rejections are collected and replay
/// carries on with the next action.
pub fn replay(store: &mut SessionStore, script: &ActionScript) -> ReplayReport {
    let mut report = ReplayReport::default();
    for (index, action) in script.actions.iter().enumerate() {
        match store.dispatch(action) {
            Ok(_) => report.applied += 1,
            Err(alert) => {
                warn!("action #{} ({}) rejected: {}", index, action.kind(), alert.message);
                report.rejected.push(RejectedAction {
                    index,
                    action: action.clone(),
                    alert,
                });
            }
        }
    }
    report
}
