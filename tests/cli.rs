//! End-to-end tests for the `boardcfg` commands.

mod common;

use common::{assert_success, run_boardcfg, stdout_of};
use std::fs;

const JTAG_TEMPLATE: &str = r#"
board-config:
  field_1:
    name: board-name
    optional: False
    default: pluto
    help: "Board name"
  field_2:
    name: allow-jtag
    optional: False
    default: False
    options: ["True", "False"]
    requires: "True:jtag-cable-id"
    help: "Allow JTAG"
  field_3:
    name: jtag-cable-id
    optional: allow-jtag
    help: "Cable id"
network-config:
  field_1:
    name: dutip
    optional: False
    help: "DUT IP"
"#;

const MULTI: &str = "\
bench-a:
  board-config:
  - board-name: boardA
  network-config:
  - dutip: 10.0.0.1
bench-b:
  board-config:
  - board-name: boardB
  network-config:
  - dutip: 10.0.0.2
";

#[test]
fn boards_filter_lists_matching_profiles() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let output = run_boardcfg(temp.path(), &["boards", "--filter", "zcu102"], None);
    assert_success(&output);
    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "{stdout}");
    assert!(lines.iter().all(|line| line.contains("zcu102")), "{stdout}");
}

#[test]
fn interactive_run_writes_answers_and_skips_declined_sections() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let template = temp.path().join("template.yaml");
    let out = temp.path().join("out").join("bench.yaml");
    fs::write(&template, JTAG_TEMPLATE).expect("write template");

    let output = run_boardcfg(
        temp.path(),
        &[
            "interactive",
            "--template",
            template.to_str().expect("utf8 path"),
            "--out",
            out.to_str().expect("utf8 path"),
        ],
        Some("y\n\nTrue\nCABLE-1\nn\n"),
    );
    assert_success(&output);
    assert_eq!(
        fs::read_to_string(&out).expect("read output"),
        "board-config:\n- board-name: pluto\n- allow-jtag: True\n- jtag-cable-id: CABLE-1\n"
    );
}

#[test]
fn interactive_run_aborted_by_closed_input_writes_nothing() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let template = temp.path().join("template.yaml");
    let out = temp.path().join("bench.yaml");
    fs::write(&template, JTAG_TEMPLATE).expect("write template");

    let output = run_boardcfg(
        temp.path(),
        &[
            "interactive",
            "--template",
            template.to_str().expect("utf8 path"),
            "--out",
            out.to_str().expect("utf8 path"),
        ],
        Some("y\n"),
    );
    assert!(!output.status.success());
    assert!(!out.exists());
}

#[test]
fn generate_from_records_builds_multi_device_document() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let template = temp.path().join("template.yaml");
    let records = temp.path().join("records.yaml");
    let out = temp.path().join("bench.yaml");
    fs::write(&template, JTAG_TEMPLATE).expect("write template");
    fs::write(
        &records,
        "bench-a:\n  board-name: boardA\n  allow-jtag: \"True\"\n  jtag-cable-id: C1\nbench-b:\n  board-name: boardB\n  dutip: 10.0.0.2\n",
    )
    .expect("write records");

    let output = run_boardcfg(
        temp.path(),
        &[
            "generate",
            "--template",
            template.to_str().expect("utf8 path"),
            "--records",
            records.to_str().expect("utf8 path"),
            "--out",
            out.to_str().expect("utf8 path"),
        ],
        None,
    );
    assert_success(&output);

    let listing = run_boardcfg(
        temp.path(),
        &[
            "field",
            "--config",
            out.to_str().expect("utf8 path"),
            "--section",
            "board-config",
            "--field",
            "board-name",
        ],
        None,
    );
    assert_success(&listing);
    assert_eq!(stdout_of(&listing), "boardA, boardB\n");

    let text = fs::read_to_string(&out).expect("read output");
    assert!(text.contains("- allow-jtag: True\n"), "{text}");
    assert!(text.contains("- dutip: 10.0.0.2\n"), "{text}");
}

#[test]
fn field_update_reports_change_and_persists() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let config = temp.path().join("bench.yaml");
    fs::write(&config, MULTI).expect("write config");
    let config_arg = config.to_str().expect("utf8 path");

    let update = run_boardcfg(
        temp.path(),
        &[
            "field", "--config", config_arg, "--section", "network-config", "--field", "dutip",
            "--value", "10.0.0.9", "--board-name", "boardB",
        ],
        None,
    );
    assert_success(&update);
    assert_eq!(
        stdout_of(&update),
        "Field dutip in network-config updated from 10.0.0.2 to 10.0.0.9\n"
    );

    let read = run_boardcfg(
        temp.path(),
        &[
            "field", "--config", config_arg, "--section", "network-config", "--field", "dutip",
            "--board-name", "boardB",
        ],
        None,
    );
    assert_success(&read);
    assert_eq!(stdout_of(&read), "10.0.0.9\n");
}

#[test]
fn ambiguous_lookup_fails_and_names_boards() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let config = temp.path().join("bench.yaml");
    fs::write(&config, MULTI).expect("write config");

    let output = run_boardcfg(
        temp.path(),
        &[
            "field",
            "--config",
            config.to_str().expect("utf8 path"),
            "--section",
            "network-config",
            "--field",
            "dutip",
            "--value",
            "1.2.3.4",
        ],
        None,
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("boardA") && stderr.contains("boardB"), "{stderr}");
    assert_eq!(fs::read_to_string(&config).expect("read back"), MULTI);
}

#[test]
fn generate_filter_keeps_matching_records_only() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let template = temp.path().join("template.yaml");
    let records = temp.path().join("records.yaml");
    let out = temp.path().join("bench.yaml");
    fs::write(&template, JTAG_TEMPLATE).expect("write template");
    fs::write(
        &records,
        "bench-a:\n  status: active\n  board-name: boardA\nbench-b:\n  status: offline\n  board-name: boardB\nbench-c:\n  status: active\n  board-name: boardC\n",
    )
    .expect("write records");

    let output = run_boardcfg(
        temp.path(),
        &[
            "generate",
            "--template",
            template.to_str().expect("utf8 path"),
            "--records",
            records.to_str().expect("utf8 path"),
            "--filter",
            "status=active",
            "--out",
            out.to_str().expect("utf8 path"),
        ],
        None,
    );
    assert_success(&output);

    let text = fs::read_to_string(&out).expect("read output");
    assert!(text.contains("bench-a:") && text.contains("bench-c:"), "{text}");
    assert!(!text.contains("bench-b"), "{text}");
}

#[test]
fn generate_filter_matching_nothing_fails_without_writing() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let template = temp.path().join("template.yaml");
    let records = temp.path().join("records.yaml");
    let out = temp.path().join("bench.yaml");
    fs::write(&template, JTAG_TEMPLATE).expect("write template");
    fs::write(&records, "bench-a:\n  status: offline\n  board-name: boardA\n")
        .expect("write records");

    let output = run_boardcfg(
        temp.path(),
        &[
            "generate",
            "--template",
            template.to_str().expect("utf8 path"),
            "--records",
            records.to_str().expect("utf8 path"),
            "--filter",
            "status=active",
            "--out",
            out.to_str().expect("utf8 path"),
        ],
        None,
    );
    assert!(!output.status.success());
    assert!(!out.exists());
}
