//! Exit codes and output of the `delver-sorter` binary

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::process::Command;

fn delver_sorter() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_delver-sorter"));
    cmd.env("RUST_LOG", "info").env_remove("DELVER_OWNED_LIST");
    cmd
}

fn create_collection(dir: &Path) -> PathBuf {
    let path = dir.join("collection.sqlite");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE lists (_id INTEGER PRIMARY KEY, name TEXT, category INTEGER);
         CREATE TABLE data_names (_id INTEGER PRIMARY KEY, name TEXT, cmana INTEGER, color TEXT, mana TEXT);
         CREATE TABLE data_cards (_id INTEGER PRIMARY KEY, name INTEGER);
         CREATE TABLE cards (_id INTEGER PRIMARY KEY, list INTEGER, card INTEGER, quantity INTEGER);
         INSERT INTO lists VALUES (1, 'Owned', 1), (2, 'Wishlist', 1);
         INSERT INTO data_names VALUES
             (1, 'Counterspell', 2, 'U', '{U}{U}'),
             (2, 'Opt', 1, 'U', '{U}'),
             (3, 'Brainstorm', 1, 'U', '{U}');
         INSERT INTO data_cards VALUES (1, 1), (2, 2), (3, 3);
         INSERT INTO cards VALUES (1, 1, 1, 2), (2, 2, 2, 1), (3, 1, 3, 1);",
    )
    .unwrap();
    path
}

#[test]
fn test_missing_database_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.sqlite");
    let output = dir.path().join("out.html");

    let result = delver_sorter()
        .arg(&missing)
        .arg("--output")
        .arg(&output)
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("ERROR"), "stderr: {}", stderr);
    assert!(stderr.contains("does not exist"), "stderr: {}", stderr);
    assert!(stderr.contains("missing.sqlite"), "stderr: {}", stderr);
    assert!(!output.exists());
}

#[test]
fn test_report_written_with_success_exit() {
    let dir = tempfile::tempdir().unwrap();
    let db = create_collection(dir.path());
    let output = dir.path().join("report.csv");

    let result = delver_sorter()
        .arg(&db)
        .args(["--format", "csv", "--output"])
        .arg(&output)
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Trimming unchanged cards"), "stderr: {}", stderr);

    let csv = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        csv,
        "card_name,cmc,mana_cost,color,owned,incoming\n\
         Brainstorm,1,{U},U,1,\n\
         Opt,1,{U},U,,1\n\
         Counterspell,2,{U}{U},U,2,\n"
    );
}
