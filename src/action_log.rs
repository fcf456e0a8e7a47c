use crate::cell::CellId;
use crate::sandbox::Tool;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;

/// Action phase - whether the action is starting or finishing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionPhase {
    Start,
    Finish,
}

/// User actions that interact with the sandbox
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Switch the paint tool
    SelectTool { tool: Tool },
    /// Apply a tool to a cell
    Paint { x: i32, y: i32, tool: Tool },
    /// Run the search between the placed endpoints
    FindPath {
        start: Option<CellId>,
        end: Option<CellId>,
    },
    /// Remove visited/path marks
    ClearMarks,
    /// Replace the grid with a fresh one
    Reset,
    /// Copy the ASCII grid to the clipboard
    CopyGrid,
}

/// Logged action with timestamp and phase
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub action: Action,
    pub phase: ActionPhase,
    /// Free-form result, e.g. path length for a search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Session action logger
pub struct ActionLog {
    start_time: Instant,
    actions: Vec<LoggedAction>,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            start_time: Instant::now(),
            actions: Vec::new(),
        }
    }

    /// Log an action with current timestamp and phase
    pub fn log(&mut self, action: Action, phase: ActionPhase, note: Option<String>) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;

        self.actions.push(LoggedAction {
            timestamp_ms,
            action,
            phase,
            note,
        });
    }

    pub fn log_start(&mut self, action: Action) {
        self.log(action, ActionPhase::Start, None);
    }

    pub fn log_finish(&mut self, action: Action) {
        self.log(action, ActionPhase::Finish, None);
    }

    /// Log the finish of an action together with its outcome
    pub fn log_finish_with(&mut self, action: Action, note: impl Into<String>) {
        self.log(action, ActionPhase::Finish, Some(note.into()));
    }

    pub fn actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.actions)
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, self.to_json()?)?;
        info!("Saved {} logged actions to {}", self.actions.len(), path);
        Ok(())
    }

    /// Durations of finished actions in milliseconds, paired with their start
    pub fn durations(&self) -> Vec<(Action, u64)> {
        let mut start_times: HashMap<String, u64> = HashMap::new();
        let mut durations = Vec::new();

        for logged in &self.actions {
            let key = format!("{:?}", logged.action);
            match logged.phase {
                ActionPhase::Start => {
                    start_times.insert(key, logged.timestamp_ms);
                }
                ActionPhase::Finish => {
                    if let Some(start_ms) = start_times.remove(&key) {
                        durations.push((logged.action.clone(), logged.timestamp_ms - start_ms));
                    }
                }
            }
        }

        durations
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut paints: HashMap<Tool, usize> = HashMap::new();
        let mut searches = 0;
        let mut clears = 0;
        let mut resets = 0;

        // Only count finish events to get actual completed action counts
        for logged in &self.actions {
            if logged.phase != ActionPhase::Finish {
                continue;
            }
            match &logged.action {
                Action::Paint { tool, .. } => *paints.entry(*tool).or_default() += 1,
                Action::FindPath { .. } => searches += 1,
                Action::ClearMarks => clears += 1,
                Action::Reset => resets += 1,
                _ => {}
            }
        }

        let duration = self.actions.last().map(|a| a.timestamp_ms).unwrap_or(0);
        let slowest_search = self
            .durations()
            .into_iter()
            .filter(|(action, _)| matches!(action, Action::FindPath { .. }))
            .map(|(_, ms)| ms)
            .max()
            .unwrap_or(0);
        let painted = Tool::ALL
            .iter()
            .map(|t| format!("{} {}", paints.get(t).copied().unwrap_or(0), t.name()))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Paints: {}\n\
             Searches: {}, clears: {}, resets: {}\n\
             Slowest search: {}ms",
            duration,
            self.actions.len(),
            painted,
            searches,
            clears,
            resets,
            slowest_search
        )
    }
}
