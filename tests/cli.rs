use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ledger(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ledger").unwrap();
    cmd.env("LEDGER_CLI_DATA_DIR", data_dir)
        .env("LEDGER_USER", "alice")
        .env_remove("RUST_LOG");
    cmd
}

fn add(data_dir: &Path, args: &[&str]) {
    ledger(data_dir).arg("add").args(args).assert().success();
}

fn stored_rows(data_dir: &Path, user: &str) -> Vec<String> {
    let path = data_dir.join("users").join(user).join("transactions.csv");
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .skip(1)
        .map(str::to_string)
        .collect()
}

#[test]
fn add_then_list() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), &["expense", "20", "Food", "-d", "pizza", "--date", "2025-03-09"]);
    add(temp.path(), &["income", "900", "Salary", "--date", "2025-03-01"]);

    ledger(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("pizza"))
        .stdout(predicate::str::contains("Salary"))
        .stdout(predicate::str::contains("2 transaction(s)"));

    assert_eq!(
        stored_rows(temp.path(), "alice"),
        vec![
            "20,Food,pizza,2025-03-09,expense",
            "900,Salary,,2025-03-01,income"
        ]
    );
}

#[test]
fn list_filters_and_sorts() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), &["expense", "20", "Food", "--date", "2025-03-09"]);
    add(temp.path(), &["expense", "1200", "Rent", "--date", "2025-03-01"]);
    add(temp.path(), &["expense", "15", "food", "--date", "2025-02-20"]);

    ledger(temp.path())
        .args(["list", "--category", "FOOD", "--from", "2025-03-01", "--to", "2025-03-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 transaction(s)"))
        .stdout(predicate::str::contains("Rent").not());

    ledger(temp.path())
        .args(["list", "--from", "2025-13-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("date"));
}

#[test]
fn invalid_input_writes_nothing() {
    let temp = TempDir::new().unwrap();

    ledger(temp.path())
        .args(["add", "expense", "-5", "Food"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("amount"));

    ledger(temp.path())
        .args(["add", "expense", "5", "F00d"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("category"));

    assert!(!temp.path().join("users").join("alice").join("transactions.csv").exists());
}

#[test]
fn delete_requires_force() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), &["expense", "1", "Food", "--date", "2025-01-01"]);
    add(temp.path(), &["expense", "2", "Rent", "--date", "2025-01-02"]);
    add(temp.path(), &["expense", "3", "Travel", "--date", "2025-01-03"]);

    ledger(temp.path())
        .args(["delete", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));
    assert_eq!(stored_rows(temp.path(), "alice").len(), 3);

    ledger(temp.path())
        .args(["delete", "2", "--force"])
        .assert()
        .success();
    assert_eq!(
        stored_rows(temp.path(), "alice"),
        vec!["1,Food,,2025-01-01,expense", "3,Travel,,2025-01-03,expense"]
    );

    ledger(temp.path())
        .args(["delete", "5", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid transaction ID 5"));
}

#[test]
fn edit_changes_only_given_fields() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), &["expense", "50", "Food", "-d", "lunch", "--date", "2025-01-01"]);

    ledger(temp.path())
        .args(["edit", "1", "--amount", "75"])
        .assert()
        .success();

    assert_eq!(
        stored_rows(temp.path(), "alice"),
        vec!["75,Food,lunch,2025-01-01,expense"]
    );

    ledger(temp.path())
        .args(["history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UPDATE"))
        .stdout(predicate::str::contains("amount: 50 -> 75"));
}

#[test]
fn edit_without_ledger_is_refused() {
    let temp = TempDir::new().unwrap();

    ledger(temp.path())
        .args(["edit", "1", "--amount", "75"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No transactions found for user 'alice'"));
}

#[test]
fn import_and_export() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("bank.csv");
    fs::write(
        &source,
        "date,type,amount,category,description\n\
         2025-01-05,expense,20,Food,pizza\n\
         2025-01-06,expense,-5,Food,refund\n\
         2025-01-31,income,1000,Salary,january\n",
    )
    .unwrap();

    ledger(temp.path())
        .arg("import")
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported: 2"))
        .stdout(predicate::str::contains("Skipped:  1"))
        .stdout(predicate::str::contains("line 3 (amount)"));

    let out_dir = temp.path().join("out");
    fs::create_dir(&out_dir).unwrap();
    ledger(temp.path())
        .arg("export")
        .arg(&out_dir)
        .args(["--category", "food"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(out_dir.join("alice_transactions.csv")).unwrap(),
        "amount,category,description,date,type\n20,Food,pizza,2025-01-05,expense\n"
    );
}

#[test]
fn reports() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), &["income", "1000", "Salary", "--date", "2025-03-01"]);
    add(temp.path(), &["expense", "20", "Food", "--date", "2025-03-02"]);
    add(temp.path(), &["expense", "20", "food", "--date", "2025-03-09"]);

    ledger(temp.path())
        .args(["report", "monthly", "--month", "3", "--year", "2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monthly Summary for 3/2025"))
        .stdout(predicate::str::contains("$960"));

    ledger(temp.path())
        .args(["report", "monthly", "--month", "march", "--year", "2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid month/year"));

    ledger(temp.path())
        .args(["report", "recurring"])
        .assert()
        .success()
        .stdout(predicate::str::contains("occurred 2 times"));

    ledger(temp.path())
        .args(["report", "health"])
        .assert()
        .success()
        .stdout(predicate::str::contains("healthy"));

    ledger(temp.path())
        .args(["report", "category", "Travel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions"));
}

#[test]
fn user_is_required() {
    let temp = TempDir::new().unwrap();

    ledger(temp.path())
        .env_remove("LEDGER_USER")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user selected"));

    ledger(temp.path())
        .env_remove("LEDGER_USER")
        .args(["config", "--default-user", "bob"])
        .assert()
        .success();

    ledger(temp.path())
        .env_remove("LEDGER_USER")
        .args(["add", "expense", "5", "Food"])
        .assert()
        .success();
    assert_eq!(stored_rows(temp.path(), "bob").len(), 1);
}

#[test]
fn users_are_isolated() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), &["expense", "5", "Food"]);

    ledger(temp.path())
        .args(["--user", "carol", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));
}
