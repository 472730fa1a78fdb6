//! End-to-end tests driving the `payrec` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn payrec() -> Command {
    Command::cargo_bin("payrec").unwrap()
}

const OCR_TEXT: &str = "\
Acme Business Services
Invoice #: INV-2024-0042
Invoice Date: 03/15/2024
Total Due: $2,322.27
";

const INVOICES_JSON: &str = r#"[
  {"id":"inv-1","invoice_number":"INV-2024-0042","vendor_name":"Acme Business Services","total_amount":"2322.27","currency":"USD"},
  {"id":"inv-2","invoice_number":"GLX-77","vendor_name":"Globex Industrial","total_amount":"540.00","currency":"USD"}
]"#;

#[test]
fn test_extract_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("scan.txt");
    fs::write(&input, OCR_TEXT).unwrap();

    payrec()
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("INV-2024-0042"))
        .stdout(predicate::str::contains("Acme Business Services"))
        .stdout(predicate::str::contains("2322.27"));
}

#[test]
fn test_extract_missing_input_fails() {
    payrec()
        .arg("extract")
        .arg("/nonexistent/scan.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_extract_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("scan.txt");
    let output = dir.path().join("invoices.json");
    fs::write(&input, OCR_TEXT).unwrap();

    payrec()
        .arg("extract")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("INV-2024-0042"));
    assert!(written.contains(r#""id":"inv-1""#));
}

#[test]
fn test_reconcile_json_report_with_aliased_csv_headers() {
    let dir = TempDir::new().unwrap();
    let invoices = dir.path().join("invoices.json");
    let register = dir.path().join("register.csv");
    let report = dir.path().join("report.json");
    fs::write(&invoices, INVOICES_JSON).unwrap();
    fs::write(
        &register,
        "Vendor,Amount,Due\n\
         Acme Business Services Ltd,\"2,322.27\",04/14/2024\n\
         GLOBEX INDUSTRIAL,540.00,05/01/2024\n",
    )
    .unwrap();

    payrec()
        .arg("reconcile")
        .arg(&invoices)
        .arg("--register")
        .arg(&register)
        .arg("--output")
        .arg(&report)
        .assert()
        .success()
        .stderr(predicate::str::contains("2 matched"));

    let written = fs::read_to_string(&report).unwrap();
    assert!(written.contains("generated_at"));
    assert!(written.contains(r#""match_status":"matched""#));
    // Blank CSV ids are backfilled positionally.
    assert!(written.contains(r#""record_id":"reg-1""#));
    assert!(written.contains(r#""record_id":"reg-2""#));
}

#[test]
fn test_reconcile_csv_report_to_stdout() {
    let dir = TempDir::new().unwrap();
    let invoices = dir.path().join("invoices.json");
    let register = dir.path().join("register.csv");
    fs::write(&invoices, INVOICES_JSON).unwrap();
    fs::write(
        &register,
        "vendor_name,expected_amount\nAcme Business Services,1000.00\n",
    )
    .unwrap();

    payrec()
        .arg("reconcile")
        .arg(&invoices)
        .arg("--register")
        .arg(&register)
        .arg("--format")
        .arg("csv")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "invoice_id,record_id,match_status,discrepancy,flag_reason,confidence_score",
        ))
        .stdout(predicate::str::contains("mismatch"))
        .stdout(predicate::str::contains("missing"));
}

#[test]
fn test_reconcile_empty_batch_fails() {
    let dir = TempDir::new().unwrap();
    let invoices = dir.path().join("invoices.json");
    let register = dir.path().join("register.csv");
    fs::write(&invoices, "[]").unwrap();
    fs::write(&register, "vendor_name,expected_amount\nAcme,1.00\n").unwrap();

    payrec()
        .arg("reconcile")
        .arg(&invoices)
        .arg("--register")
        .arg(&register)
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty"));
}

#[test]
fn test_reconcile_register_without_vendor_column_fails() {
    let dir = TempDir::new().unwrap();
    let invoices = dir.path().join("invoices.json");
    let register = dir.path().join("register.csv");
    fs::write(&invoices, INVOICES_JSON).unwrap();
    fs::write(&register, "payee,expected_amount\nAcme,1.00\n").unwrap();

    payrec()
        .arg("reconcile")
        .arg(&invoices)
        .arg("--register")
        .arg(&register)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no vendor column"));
}
