use scx_configurator::command::{self, Action, Selection};
use scx_configurator::status::RunningStatus;

#[test]
fn disabled_status_starts_with_mode_flags() {
    let sel = Selection {
        scheduler: "bpfland",
        mode: Some("Server"),
        override_args: "",
    };
    let argv = command::resolve("scxctl", &sel, &RunningStatus::Disabled);
    assert_eq!(argv, ["scxctl", "start", "--sched", "bpfland", "--args", "-p"]);
}

#[test]
fn typed_override_beats_the_selected_mode() {
    let sel = Selection {
        scheduler: "bpfland",
        mode: Some("Server"),
        override_args: "-m performance",
    };
    let argv = command::resolve("scxctl", &sel, &RunningStatus::Running("flash".into()));
    assert_eq!(
        argv,
        [
            "scxctl",
            "switch",
            "--sched",
            "bpfland",
            "--args",
            "-m performance"
        ]
    );
}

#[test]
fn no_mode_no_override_sends_a_bare_command() {
    let sel = Selection {
        scheduler: "rustland",
        mode: None,
        override_args: "",
    };
    let argv = command::resolve("scxctl", &sel, &RunningStatus::Disabled);
    assert_eq!(argv, ["scxctl", "start", "--sched", "rustland"]);
}

#[test]
fn failed_status_query_resolves_to_switch() {
    let sel = Selection {
        scheduler: "flash",
        mode: Some("Gaming"),
        override_args: "",
    };
    let argv = command::resolve("scxctl", &sel, &RunningStatus::Unknown);
    assert_eq!(
        argv,
        ["scxctl", "switch", "--sched", "flash", "--args", "-m all"]
    );
}

#[test]
fn running_id_outside_the_catalog_is_still_a_switch() {
    // The resolver never validates the running id against the catalog.
    let sel = Selection {
        scheduler: "bpfland",
        mode: None,
        override_args: "",
    };
    let argv = command::resolve(
        "scxctl",
        &sel,
        &RunningStatus::Running("some-future-sched".into()),
    );
    assert_eq!(argv, ["scxctl", "switch", "--sched", "bpfland"]);
}

#[test]
fn switching_onto_the_running_scheduler_is_not_special_cased() {
    let sel = Selection {
        scheduler: "flash",
        mode: None,
        override_args: "",
    };
    let status = RunningStatus::Running("flash".into());
    assert_eq!(command::select_action(&status), Action::Switch);
    let argv = command::resolve("scxctl", &sel, &status);
    assert_eq!(argv, ["scxctl", "switch", "--sched", "flash"]);
}

#[test]
fn multi_token_flag_text_stays_one_element() {
    let sel = Selection {
        scheduler: "flash",
        mode: Some("Power Save"),
        override_args: "",
    };
    let argv = command::resolve("scxctl", &sel, &RunningStatus::Disabled);
    assert_eq!(argv.len(), 6);
    assert_eq!(argv[4], "--args");
    assert_eq!(argv[5], "-m powersave -I 10000 -t 10000 -s 10000 -S 1000");
}

#[test]
fn tool_name_is_forwarded_as_given() {
    let sel = Selection {
        scheduler: "bpfland",
        mode: None,
        override_args: "",
    };
    let argv = command::resolve("/usr/local/bin/scxctl", &sel, &RunningStatus::Disabled);
    assert_eq!(argv[0], "/usr/local/bin/scxctl");
}
