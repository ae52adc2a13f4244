use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn columns_lists_mapping_as_table() {
    Command::cargo_bin("report-mapper")
        .expect("binary exists")
        .args(["columns"])
        .assert()
        .success()
        .stdout(contains("order_internal_id"))
        .stdout(contains("VISITORSEX"));
}

#[test]
fn columns_json_round_trips_entries() {
    let assert = Command::cargo_bin("report-mapper")
        .expect("binary exists")
        .args(["columns", "--format", "json"])
        .assert()
        .success();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid json");
    let entries = value.as_array().expect("array of entries");
    assert_eq!(entries.len(), 50);
    assert_eq!(entries[0]["output"], "Order");
    assert_eq!(entries[0]["source"]["kind"], "single_column");
    assert_eq!(entries[10]["source"]["kind"], "none");
    assert_eq!(
        entries[41]["source"]["sources"][1],
        "How staff members were working on the tills?"
    );
}

#[test]
fn columns_yaml_is_emitted() {
    Command::cargo_bin("report-mapper")
        .expect("binary exists")
        .args(["columns", "--format", "yaml"])
        .assert()
        .success()
        .stdout(contains("output: Order"));
}
