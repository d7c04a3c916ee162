use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db, log_at, qt, setup_test_db, temp_out};

fn seed(db_path: &str) {
    init_db(db_path);
    log_at(db_path, "2024-03-04", "08:00", "normal", "infra: setup");
    log_at(db_path, "2024-03-04", "12:00", "break", "lunch");
    log_at(db_path, "2024-03-04", "12:10", "normal", "infra: review");
    log_at(db_path, "2024-03-04", "16:00", "quit", "done");
}

#[test]
fn csv_export_contains_the_inserted_break() {
    let db_path = setup_test_db("export_csv_break");
    let out = temp_out("export_csv_break", "csv");
    seed(&db_path);

    qt().args([
        "--db", &db_path, "export", "--format", "csv", "--file", &out, "--range", "2024-03",
    ])
    .write_stdin("1\n")
    .assert()
    .success()
    .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next().unwrap(),
        "id,date,time,mode,project,location,message,minutes,inserted"
    );
    // Break and quit rows are not exported by default.
    assert!(content.contains("2024-03-04,08:00,normal,infra,office,setup,240,false"));
    assert!(content.contains("2024-03-04,12:30,normal,infra,office,review,230,false"));
    assert!(!content.contains(",quit,"));

    // The stored day is untouched.
    qt().args(["--db", &db_path, "list", "--period", "2024-03-04"])
        .assert()
        .success()
        .stdout(contains("12:10"));
}

#[test]
fn json_export_with_all_modes() {
    let db_path = setup_test_db("export_json_all");
    let out = temp_out("export_json_all", "json");
    seed(&db_path);

    qt().args([
        "--db", &db_path, "export", "--format", "json", "--file", &out, "--all",
    ])
    .write_stdin("1\n")
    .assert()
    .success();

    let rows: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[1]["mode"], "break");
    assert_eq!(rows[1]["inserted"], true);
    assert_eq!(rows[1]["minutes"], 20);
    assert_eq!(rows[4]["mode"], "quit");
    assert_eq!(rows[4]["time"], "16:20");
}

#[test]
fn relative_paths_are_refused() {
    let db_path = setup_test_db("export_relative");
    init_db(&db_path);

    qt().args(["--db", &db_path, "export", "--file", "out.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn existing_file_is_kept_without_confirmation() {
    let db_path = setup_test_db("export_existing");
    let out = temp_out("export_existing", "csv");
    seed(&db_path);
    fs::write(&out, "keep me").unwrap();

    qt().args(["--db", &db_path, "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("Export error: overwrite of"));

    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");
}
