#![cfg(feature = "storage-rocksdb")]

use assert_cmd::cargo_bin;
use std::io::Write;
use std::process::Command;
use tempfile::tempdir;

fn run(commands: &str, db_path: &std::path::Path) -> String {
    let mut csv = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv, "op, table, items, amount, method").unwrap();
    write!(csv, "{commands}").unwrap();

    let output = Command::new(cargo_bin!("floorbook"))
        .arg(csv.path())
        .arg("--tables")
        .arg("tests/fixtures/tables.csv")
        .arg("--menu")
        .arg("tests/fixtures/menu.csv")
        .arg("--db-path")
        .arg(db_path)
        .arg("--revenue")
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    // 1. First run: seat AC-2 and take a partial payment
    let stdout1 = run("open, 2, 1:2\nbill, 2\npay, 2, , 100, card\n", &db_path);
    assert!(stdout1.contains("2,AC-2,bill_pending,"));
    assert!(stdout1.contains(",120,100,20"));
    assert!(stdout1.contains("revenue,0"));

    // 2. Second run: the open tab survived the restart and can be settled
    let stdout2 = run("pay, 2, , 20, cash\n", &db_path);
    assert!(stdout2.contains("2,AC-2,available,,0,0,0"));
    assert!(stdout2.contains("revenue,120"));
}
