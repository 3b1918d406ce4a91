use std::process::{Command, Output, Stdio};

use tracing::debug;

use crate::command::{self, Selection};
use crate::error::{Error, Result};
use crate::listing;
use crate::status::{self, RunningStatus};

pub const DEFAULT_TOOL: &str = "scxctl";

/// Handle on the external scheduler manager binary. Every method is a
/// short-lived blocking subprocess call; callers are expected to run one at
/// a time.
#[derive(Debug, Clone)]
pub struct ScxCtl {
    tool: String,
}

impl ScxCtl {
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    fn run(&self, action: &str, args: &[&str]) -> Result<Output> {
        debug!(tool = %self.tool, action, ?args, "invoking scheduler manager");
        let output = Command::new(&self.tool)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::ToolNotFound {
                        tool: self.tool.clone(),
                    }
                } else {
                    Error::msg(format!("failed to spawn {}: {e}", self.tool))
                }
            })?;
        if !output.status.success() {
            let diagnostic = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!(action, status = %output.status, "manager exited with error");
            return Err(Error::ToolFailed {
                action: action.to_string(),
                diagnostic,
            });
        }
        Ok(output)
    }

    /// `<tool> list`: the schedulers available for selection, in the order
    /// the manager reports them. Zero parseable entries is a hard failure;
    /// there is nothing the user could select.
    pub fn list(&self) -> Result<Vec<String>> {
        let output = self.run("list", &["list"])?;
        let schedulers = listing::extract_schedulers(&String::from_utf8_lossy(&output.stdout));
        if schedulers.is_empty() {
            return Err(Error::NoSchedulers);
        }
        Ok(schedulers)
    }

    /// `<tool> get`: the current running status. A manager error on this
    /// path becomes `StatusQuery` so shells can render it distinctly; the
    /// session status stays `Unknown` in that case, which resolves to
    /// `switch`. A missing binary is still reported as `ToolNotFound`.
    pub fn get(&self) -> Result<RunningStatus> {
        let output = match self.run("get", &["get"]) {
            Ok(output) => output,
            Err(Error::ToolFailed { diagnostic, .. }) => {
                return Err(Error::StatusQuery { diagnostic });
            }
            Err(e) => return Err(e),
        };
        Ok(status::classify(&String::from_utf8_lossy(&output.stdout)))
    }

    /// Resolve the selection against the current status and execute the
    /// resulting start/switch command. Returns the argument vector that ran
    /// so shells can echo it. Callers re-query status afterwards.
    pub fn apply(&self, sel: &Selection, current: &RunningStatus) -> Result<Vec<String>> {
        let argv = command::resolve(&self.tool, sel, current);
        let rest: Vec<&str> = argv[1..].iter().map(String::as_str).collect();
        self.run(&argv[1], &rest)?;
        Ok(argv)
    }

    /// `<tool> stop`. Idempotent from this side; stopping twice just
    /// reissues the command.
    pub fn stop(&self) -> Result<()> {
        self.run("stop", &["stop"]).map(|_| ())
    }
}

impl Default for ScxCtl {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL)
    }
}
