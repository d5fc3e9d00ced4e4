#![allow(clippy::unwrap_used)]

use std::path::Path;
use std::process::{Command, Output};

fn sl_cli(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sl-cli"))
        .current_dir(data_dir)
        .env("LEDGER_DATA_DIR", data_dir)
        .env_remove("LEDGER_LOG_JSON")
        .args(args)
        .output()
        .unwrap()
}

/// The ID printed after `prefix` on stdout.
fn created_id(output: &Output, prefix: &str) -> String {
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let rest = stdout
        .lines()
        .find_map(|line| line.strip_prefix(prefix))
        .unwrap_or_else(|| panic!("no `{prefix}` line in {stdout:?}"));
    rest.split(':').next().unwrap().trim().to_owned()
}

#[test]
fn add_commands_print_new_ids() {
    let dir = tempfile::tempdir().unwrap();

    let output = sl_cli(
        dir.path(),
        &["order", "add", "-c", "Asha", "-d", "2026-11-02", "-p", "100=2"],
    );
    let order_id = created_id(&output, "Created order ");
    assert_eq!(order_id.len(), 36);

    // The printed ID is accepted back as an order reference.
    let output = sl_cli(
        dir.path(),
        &["income", "add", "-c", "Asha", "-a", "50", "-o", &order_id],
    );
    let income_id = created_id(&output, "Recorded income ");
    assert_ne!(income_id, order_id);

    let output = sl_cli(dir.path(), &["expense", "add", "-i", "Gas refill", "-a", "950"]);
    created_id(&output, "Recorded expense ");

    let output = sl_cli(
        dir.path(),
        &["material", "add", "-n", "Ajwain", "-u", "kg", "-p", "300"],
    );
    created_id(&output, "Added material ");

    let output = sl_cli(dir.path(), &["order", "list"]);
    assert!(String::from_utf8_lossy(&output.stdout).contains(&order_id));
}

#[test]
fn corrupt_materials_file_survives_add() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("materials.json");
    std::fs::write(&path, "[{\"name\": 7}]").unwrap();

    let output = sl_cli(
        dir.path(),
        &["material", "add", "-n", "Ajwain", "-u", "kg", "-p", "300"],
    );
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[{\"name\": 7}]");
}
