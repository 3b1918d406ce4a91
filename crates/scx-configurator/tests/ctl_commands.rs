#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use scx_configurator::Error;
use scx_configurator::command::Selection;
use scx_configurator::ctl::ScxCtl;
use scx_configurator::status::RunningStatus;

fn fake_tool(dir: &Path, body: &str) -> String {
    let path = dir.join("scxctl");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn missing_binary_is_tool_not_found() {
    let ctl = ScxCtl::new("/nonexistent/scxctl-test-binary");
    match ctl.get() {
        Err(Error::ToolNotFound { tool }) => assert!(tool.contains("scxctl-test-binary")),
        other => panic!("unexpected result: {other:?}"),
    }
    match ctl.list() {
        Err(Error::ToolNotFound { .. }) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn get_classifies_a_running_scheduler() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(dir.path(), r#"[ "$1" = "get" ] && echo "bpfland""#);
    let ctl = ScxCtl::new(tool);
    assert_eq!(ctl.get().unwrap(), RunningStatus::Running("bpfland".into()));
}

#[test]
fn get_honors_the_disabled_sentinel_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(dir.path(), r#"echo "No SCX Scheduler Running""#);
    let ctl = ScxCtl::new(tool);
    assert_eq!(ctl.get().unwrap(), RunningStatus::Disabled);
}

#[test]
fn get_with_empty_output_is_unknown() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(dir.path(), "exit 0");
    let ctl = ScxCtl::new(tool);
    assert_eq!(ctl.get().unwrap(), RunningStatus::Unknown);
}

#[test]
fn failed_get_is_a_status_query_error() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(dir.path(), r#"echo "dbus unreachable" >&2; exit 3"#);
    let ctl = ScxCtl::new(tool);
    match ctl.get() {
        Err(Error::StatusQuery { diagnostic }) => assert_eq!(diagnostic, "dbus unreachable"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn list_extracts_ids_from_tool_output() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(
        dir.path(),
        r#"echo 'supported schedulers: ["bpfland", "flash", "rusty"]'"#,
    );
    let ctl = ScxCtl::new(tool);
    assert_eq!(ctl.list().unwrap(), ["bpfland", "flash", "rusty"]);
}

#[test]
fn list_without_a_parseable_region_is_a_hard_failure() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(dir.path(), r#"echo "scxctl 1.0.0""#);
    let ctl = ScxCtl::new(tool);
    match ctl.list() {
        Err(Error::NoSchedulers) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn apply_runs_the_resolved_vector() {
    let dir = tempfile::tempdir().unwrap();
    // Record the arguments so the test can check what actually ran.
    let log = dir.path().join("invocation.log");
    let tool = fake_tool(dir.path(), &format!(r#"echo "$@" > {}"#, log.display()));
    let ctl = ScxCtl::new(tool);

    let sel = Selection {
        scheduler: "bpfland",
        mode: Some("Server"),
        override_args: "",
    };
    let argv = ctl.apply(&sel, &RunningStatus::Disabled).unwrap();
    assert_eq!(argv[1..], ["start", "--sched", "bpfland", "--args", "-p"]);

    let recorded = fs::read_to_string(&log).unwrap();
    assert_eq!(recorded.trim(), "start --sched bpfland --args -p");
}

#[test]
fn failed_apply_carries_the_tool_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(dir.path(), r#"echo "sched not supported" >&2; exit 1"#);
    let ctl = ScxCtl::new(tool);

    let sel = Selection {
        scheduler: "bpfland",
        mode: None,
        override_args: "",
    };
    match ctl.apply(&sel, &RunningStatus::Disabled) {
        Err(Error::ToolFailed { action, diagnostic }) => {
            assert_eq!(action, "start");
            assert_eq!(diagnostic, "sched not supported");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn stop_maps_exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(dir.path(), "exit 0");
    let ctl = ScxCtl::new(tool);
    ctl.stop().unwrap();

    let tool = fake_tool(dir.path(), r#"echo "nothing to stop" >&2; exit 1"#);
    let ctl = ScxCtl::new(tool);
    match ctl.stop() {
        Err(Error::ToolFailed { action, diagnostic }) => {
            assert_eq!(action, "stop");
            assert_eq!(diagnostic, "nothing to stop");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
