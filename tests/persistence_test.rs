#![cfg(feature = "storage-rocksdb")]

use assert_cmd::cargo_bin;
use std::io::Write;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    // 1. First run: register everyone and place an order.
    let mut journal1 = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        journal1,
        r#"{{"op":"register_admin","caller":"washkart.near","admin_id":"millefolium.testnet"}}"#
    )
    .unwrap();
    writeln!(
        journal1,
        r#"{{"op":"register_customer","caller":"envoy.testnet","profile":{{"name":"envoy","full_address":"369, wall street","phone":"9999999999"}}}}"#
    )
    .unwrap();
    writeln!(
        journal1,
        r#"{{"op":"create_order","caller":"envoy.testnet","id":"order-0001","description":"simple order","weight_in_grams":2000,"attached":3}}"#
    )
    .unwrap();

    let mut cmd1 = Command::new(cargo_bin!("washkart"));
    cmd1.arg(journal1.path()).arg("--db-path").arg(&db_path);

    let output1 = cmd1.output().expect("Failed to execute command");
    assert!(output1.status.success());
    let stdout1 = String::from_utf8_lossy(&output1.stdout);
    assert!(stdout1.contains("order-0001,envoy.testnet,confirmed,2000,3,none"));

    // 2. Second run: the admin and order recovered from disk, so the
    // transition applies without re-registering anything.
    let mut journal2 = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        journal2,
        r#"{{"op":"update_order_status","caller":"millefolium.testnet","order_id":"order-0001","status":"in-progress"}}"#
    )
    .unwrap();

    let mut cmd2 = Command::new(cargo_bin!("washkart"));
    cmd2.arg(journal2.path()).arg("--db-path").arg(&db_path);

    let output2 = cmd2.output().expect("Failed to execute command");
    assert!(output2.status.success());
    let stdout2 = String::from_utf8_lossy(&output2.stdout);
    assert!(stdout2.contains("order-0001,envoy.testnet,in-progress,2000,3,none"));
}
