use crate::catalog;
use crate::status::RunningStatus;

/// Management verb sent to the external manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Switch,
}

impl Action {
    pub fn verb(self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Switch => "switch",
        }
    }
}

/// A user selection as held by a shell. Nothing in here is persisted; the
/// shell passes it in on every action.
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    pub scheduler: &'a str,
    pub mode: Option<&'a str>,
    /// Manually entered flag text, already trimmed. Non-empty text always
    /// wins over the selected mode's flags.
    pub override_args: &'a str,
}

/// Resolve the flag text to send. Manual entry wins regardless of the mode
/// selection; an empty textbox falls back to the selected mode's flags.
/// Shells auto-fill the textbox when a mode is picked, but scripted input
/// can bypass that, so the fallback is a real path.
pub fn effective_args(sel: &Selection) -> String {
    let manual = sel.override_args.trim();
    if !manual.is_empty() {
        return manual.to_string();
    }
    match sel.mode {
        Some(mode) => catalog::mode_lookup(sel.scheduler, mode)
            .map(|m| m.flags.to_string())
            .unwrap_or_default(),
        None => String::new(),
    }
}

/// Start when nothing is running; switch in every other case, including a
/// failed status query and a switch onto the scheduler that is already
/// running. The running id is not consulted.
pub fn select_action(status: &RunningStatus) -> Action {
    match status {
        RunningStatus::Disabled => Action::Start,
        RunningStatus::Running(_) | RunningStatus::Unknown => Action::Switch,
    }
}

/// The full argument vector, manager binary first. The effective flag text
/// travels as one element; it is never split into tokens here or anywhere
/// downstream.
pub fn resolve(tool: &str, sel: &Selection, status: &RunningStatus) -> Vec<String> {
    let action = select_action(status);
    let mut argv = vec![
        tool.to_string(),
        action.verb().to_string(),
        "--sched".to_string(),
        sel.scheduler.to_string(),
    ];
    let args = effective_args(sel);
    if !args.is_empty() {
        argv.push("--args".to_string());
        argv.push(args);
    }
    argv
}
