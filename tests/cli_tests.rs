use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db, log_at, qt, setup_test_db};

/// One long day without breaks and one short day.
fn seed(db_path: &str) {
    init_db(db_path);
    log_at(db_path, "2024-03-04", "08:00", "normal", "infra: setup");
    log_at(db_path, "2024-03-04", "11:00", "normal", "second");
    log_at(db_path, "2024-03-04", "15:00", "quit", "done");
    log_at(db_path, "2024-03-05", "09:00", "normal", "web: page");
    log_at(db_path, "2024-03-05", "12:00", "quit", "done");
}

#[test]
fn init_creates_the_database() {
    let db_path = setup_test_db("cli_init");

    qt().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn log_inherits_the_project_of_the_previous_entry() {
    let db_path = setup_test_db("cli_log_project");
    seed(&db_path);

    qt().args(["--db", &db_path, "list", "--period", "2024-03-04"])
        .assert()
        .success()
        .stdout(contains("infra: setup"))
        .stdout(contains("infra: second"))
        .stdout(contains("worked 07:00 of 08:00"));
}

#[test]
fn break_entries_get_default_labels() {
    let db_path = setup_test_db("cli_break_labels");
    init_db(&db_path);
    qt().args([
        "--db",
        &db_path,
        "log",
        "coffee",
        "--mode",
        "break",
        "--date",
        "2024-03-04",
        "--at",
        "10:00",
    ])
    .assert()
    .success()
    .stdout(contains("[break] break: coffee"));
}

#[test]
fn invalid_mode_is_rejected() {
    let db_path = setup_test_db("cli_bad_mode");
    init_db(&db_path);

    qt().args(["--db", &db_path, "log", "x", "--mode", "lunch"])
        .assert()
        .failure()
        .stderr(contains("Invalid mode"));
}

#[test]
fn list_period_covers_a_month() {
    let db_path = setup_test_db("cli_list_month");
    seed(&db_path);

    qt().args(["--db", &db_path, "list", "--period", "2024-03"])
        .assert()
        .success()
        .stdout(contains("04.03"))
        .stdout(contains("05.03"))
        .stdout(contains("web: page"));
}

#[test]
fn search_matches_word_prefixes() {
    let db_path = setup_test_db("cli_search");
    seed(&db_path);

    qt().args(["--db", &db_path, "search", "INF", "--days", "*"])
        .assert()
        .success()
        .stdout(contains("infra: setup"))
        .stdout(contains("web: page").not());
}

#[test]
fn projects_are_listed_with_their_time() {
    let db_path = setup_test_db("cli_projects");
    seed(&db_path);

    qt().args(["--db", &db_path, "projects"])
        .assert()
        .success()
        .stdout(contains("PROJECT"))
        .stdout(contains("infra"))
        .stdout(contains("07:00"));
}

#[test]
fn edit_changes_time_and_message() {
    let db_path = setup_test_db("cli_edit");
    seed(&db_path);

    qt().args([
        "--db",
        &db_path,
        "edit",
        "2",
        "--time",
        "11:30",
        "--message",
        "review",
    ])
    .assert()
    .success()
    .stdout(contains("11:30"));

    qt().args(["--db", &db_path, "list", "--period", "2024-03-04"])
        .assert()
        .success()
        .stdout(contains("infra: review"));
}

#[test]
fn edit_of_unknown_entry_fails() {
    let db_path = setup_test_db("cli_edit_unknown");
    init_db(&db_path);

    qt().args(["--db", &db_path, "edit", "99", "--message", "x"])
        .assert()
        .failure()
        .stderr(contains("Entry #99 not found"));
}

#[test]
fn del_asks_for_confirmation() {
    let db_path = setup_test_db("cli_del");
    seed(&db_path);

    qt().args(["--db", &db_path, "del", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    qt().args(["--db", &db_path, "del", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("Entry #1 has been deleted"));

    qt().args(["--db", &db_path, "list", "--period", "2024-03-04"])
        .assert()
        .success()
        .stdout(contains("setup").not());
}

#[test]
fn undo_removes_the_latest_entry_of_today() {
    let db_path = setup_test_db("cli_undo");
    init_db(&db_path);

    qt().args(["--db", &db_path, "log", "today: something"])
        .assert()
        .success();

    qt().args(["--db", &db_path, "undo"])
        .assert()
        .success()
        .stdout(contains("Removed").and(contains("today: something")));

    qt().args(["--db", &db_path, "undo"])
        .assert()
        .success()
        .stdout(contains("All entries of today have been removed"));
}

#[test]
fn total_reports_months_and_grand_total() {
    let db_path = setup_test_db("cli_total");
    seed(&db_path);

    qt().args(["--db", &db_path, "total"])
        .assert()
        .success()
        .stdout(contains("[03.2024] Of the mandatory time"))
        .stdout(contains("as of now"))
        .stdout(contains("The delta will amount to zero at"));
}

#[test]
fn breaks_prompt_and_apply() {
    let db_path = setup_test_db("cli_breaks");
    seed(&db_path);

    qt().args(["--db", &db_path, "breaks", "--range", "2024-03", "--apply"])
        .write_stdin("2\n")
        .assert()
        .success()
        .stdout(contains("Missing mandatory break time on 2024-03-04"))
        .stdout(contains("AFTER the selected entry"))
        .stdout(contains("no break required"))
        .stdout(contains("1 day(s) updated"));

    // Stored now: no prompt, the day is compliant.
    qt().args(["--db", &db_path, "breaks", "--range", "2024-03"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(contains("of break recorded"))
        .stdout(contains("Missing mandatory").not());

    qt().args(["--db", &db_path, "list", "--period", "2024-03-04"])
        .assert()
        .success()
        .stdout(contains("15:30"));
}

#[test]
fn cancelled_break_choice_changes_nothing() {
    let db_path = setup_test_db("cli_breaks_cancel");
    seed(&db_path);

    qt().args(["--db", &db_path, "breaks", "--range", "2024-03-04", "--apply"])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(contains("skipped"));

    qt().args(["--db", &db_path, "list", "--period", "2024-03-04"])
        .assert()
        .success()
        .stdout(contains("15:30").not());
}

#[test]
fn audit_print_shows_operations() {
    let db_path = setup_test_db("cli_audit");
    seed(&db_path);

    qt().args(["--db", &db_path, "audit", "--print"])
        .assert()
        .success()
        .stdout(contains("Internal log"))
        .stdout(contains("migration_applied"))
        .stdout(contains("infra: setup"));
}

#[test]
fn db_info_and_check() {
    let db_path = setup_test_db("cli_db");
    seed(&db_path);

    qt().args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Total entries:"))
        .stdout(contains("Integrity check passed"));
}

#[test]
fn config_print_shows_policy_keys() {
    let db_path = setup_test_db("cli_config");

    qt().args(["--db", &db_path, "--test", "config", "--print"])
        .assert()
        .success()
        .stdout(contains("daily_target"))
        .stdout(contains("break_min_span"));
}

#[test]
fn oversized_day_window_is_rejected() {
    let db_path = setup_test_db("cli_days_overflow");
    init_db(&db_path);

    qt().args(["--db", &db_path, "list", "--days", "100000000"])
        .assert()
        .failure()
        .stderr(contains("Invalid range"));

    qt().args(["--db", &db_path, "search", "x", "--days", "9223372036854775807"])
        .assert()
        .failure()
        .stderr(contains("Invalid range"));
}
