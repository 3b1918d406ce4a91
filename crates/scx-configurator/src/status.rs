use std::fmt;

/// What `scxctl get` prints when no scheduler is loaded.
pub const DISABLED_SENTINEL: &str = "no scx scheduler running";

/// Classification of the most recent status query. The shell holds the
/// current value and feeds it back into the resolver on every action; it is
/// refreshed after each query and after each management command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunningStatus {
    /// No scx scheduler is running.
    Disabled,
    /// The named scheduler is running. The id is whatever the manager
    /// reported; it is never checked against the catalog.
    Running(String),
    /// Empty output or a failed query. Displayed distinctly from Disabled,
    /// but lands in the same action branch as Running.
    Unknown,
}

pub fn classify(raw: &str) -> RunningStatus {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return RunningStatus::Unknown;
    }
    if trimmed.eq_ignore_ascii_case(DISABLED_SENTINEL) {
        return RunningStatus::Disabled;
    }
    RunningStatus::Running(trimmed.to_string())
}

impl fmt::Display for RunningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunningStatus::Disabled => write!(f, "disabled"),
            RunningStatus::Running(id) => write!(f, "running: {id}"),
            RunningStatus::Unknown => write!(f, "unknown (empty scxctl output)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_disabled_in_any_case() {
        assert_eq!(classify("no scx scheduler running"), RunningStatus::Disabled);
        assert_eq!(classify("No SCX Scheduler Running"), RunningStatus::Disabled);
        assert_eq!(
            classify("  no scx scheduler running\n"),
            RunningStatus::Disabled
        );
    }

    #[test]
    fn non_empty_output_is_the_running_id() {
        assert_eq!(classify("bpfland"), RunningStatus::Running("bpfland".into()));
        assert_eq!(classify("  flash\n"), RunningStatus::Running("flash".into()));
    }

    #[test]
    fn empty_output_is_unknown() {
        assert_eq!(classify(""), RunningStatus::Unknown);
        assert_eq!(classify("   \n"), RunningStatus::Unknown);
    }
}
