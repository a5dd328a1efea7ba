use super::*;
use crate::error::{ConfigGenError, GenResult};
use std::fs;

const MULTI: &str = "\
bench-a:
  board-config:
  - board-name: boardA
  - allow-jtag: False
  uart-config:
  - address: /dev/serial/by-id/usb-A
bench-b:
  board-config:
  - board-name: boardB
  network-config:
  - dutip: 10.0.0.2
";

const SINGLE: &str = "\
board-config:
- board-name: pluto
- allow-jtag: False
network-config:
- dutip: 192.168.2.1
- dutip: 10.0.0.9
";

struct FixedTranslator;

impl DevicePathTranslator for FixedTranslator {
    fn resolve(&self, stable_path: &str) -> GenResult<String> {
        assert_eq!(stable_path, "/dev/serial/by-id/usb-A");
        Ok("/dev/ttyUSB3".to_string())
    }
}

fn write_fixture(text: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let temp = tempfile::tempdir().expect("create temp dir");
    let path = temp.path().join("config.yaml");
    fs::write(&path, text).expect("write fixture");
    (temp, path)
}

fn request<'a>(section: &'a str, field: &'a str) -> FieldRequest<'a> {
    FieldRequest {
        section,
        field,
        value: None,
        board_name: None,
    }
}

#[test]
fn board_name_lookup_without_name_lists_boards() {
    let (_temp, path) = write_fixture(MULTI);
    let outcome = apply_field_request(&path, &request("board-config", "board-name"), &FixedTranslator)
        .expect("list boards");
    assert_eq!(outcome.message(), "boardA, boardB");
}

#[test]
fn other_lookups_without_name_are_ambiguous() {
    let (_temp, path) = write_fixture(MULTI);
    let err = apply_field_request(&path, &request("network-config", "dutip"), &FixedTranslator)
        .expect_err("ambiguous");
    assert!(matches!(
        err.downcast_ref::<ConfigGenError>(),
        Some(ConfigGenError::AmbiguousDevice { names }) if names == &["boardA", "boardB"]
    ));
}

#[test]
fn uart_address_is_translated_on_read() {
    let (_temp, path) = write_fixture(MULTI);
    let lookup = FieldRequest {
        board_name: Some("boardA"),
        ..request("uart-config", "address")
    };
    let outcome = apply_field_request(&path, &lookup, &FixedTranslator).expect("read address");
    assert_eq!(outcome, FieldOutcome::Value(Value::from("/dev/ttyUSB3")));
}

#[test]
fn update_rewrites_first_match_and_reports_change() {
    let (_temp, path) = write_fixture(SINGLE);
    let update = FieldRequest {
        value: Some("10.0.0.5"),
        ..request("network-config", "dutip")
    };
    let outcome = apply_field_request(&path, &update, &FixedTranslator).expect("update");
    assert_eq!(
        outcome.message(),
        "Field dutip in network-config updated from 192.168.2.1 to 10.0.0.5"
    );
    let text = fs::read_to_string(&path).expect("read back");
    assert!(text.contains("- dutip: 10.0.0.5\n"), "{text}");
    assert!(text.contains("- dutip: 10.0.0.9\n"), "{text}");
}

#[test]
fn boolean_updates_are_coerced_and_rendered_capitalized() {
    let (_temp, path) = write_fixture(SINGLE);
    let update = FieldRequest {
        value: Some("true"),
        ..request("board-config", "allow-jtag")
    };
    let outcome = apply_field_request(&path, &update, &FixedTranslator).expect("update");
    assert_eq!(
        outcome.message(),
        "Field allow-jtag in board-config updated from False to True"
    );
    let text = fs::read_to_string(&path).expect("read back");
    assert!(text.contains("- allow-jtag: True\n"), "{text}");
}

#[test]
fn missing_field_leaves_file_untouched() {
    let (_temp, path) = write_fixture(MULTI);
    let update = FieldRequest {
        value: Some("x"),
        board_name: Some("boardB"),
        ..request("network-config", "dutusername")
    };
    let err = apply_field_request(&path, &update, &FixedTranslator).expect_err("missing field");
    assert!(matches!(
        err.downcast_ref::<ConfigGenError>(),
        Some(ConfigGenError::FieldNotFound { .. })
    ));
    assert_eq!(fs::read_to_string(&path).expect("read back"), MULTI);
}
