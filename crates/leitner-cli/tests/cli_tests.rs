//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `leitner` running in `dir`, with no user config or env override in play.
fn leitner(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("leitner").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("LEITNER_DATA_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn add(dir: &TempDir, question: &str, answer: &str, category: Option<&str>) {
    let mut cmd = leitner(dir);
    cmd.args(["add", "--question", question, "--answer", answer]);
    if let Some(category) = category {
        cmd.args(["--category", category]);
    }
    cmd.assert().success();
}

fn stored_cards(dir: &TempDir) -> Vec<serde_json::Value> {
    let content = std::fs::read_to_string(dir.path().join("leitner_cards.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    leitner(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Leitner-box flashcard trainer"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    leitner(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("leitner"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    leitner(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created leitner.toml"));
    assert!(dir.path().join("leitner.toml").exists());

    leitner(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn add_writes_card_and_category() {
    let dir = TempDir::new().unwrap();

    leitner(&dir)
        .args(["add", "--question", "list files", "--answer", "ls", "--category", "linux"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'list files' to box 0 (linux)"));

    let cards = stored_cards(&dir);
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["question"], "list files");
    assert_eq!(cards[0]["answer"], "ls");
    assert_eq!(cards[0]["box"], 0);
    assert_eq!(cards[0]["category"], "linux");
    assert!(cards[0]["last_revision"].is_string());

    let categories = std::fs::read_to_string(dir.path().join("categories.json")).unwrap();
    assert!(categories.contains("linux"));
}

#[test]
fn add_rejects_empty_answer() {
    let dir = TempDir::new().unwrap();
    leitner(&dir)
        .args(["add", "--question", "list files", "--answer", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("answer"));
    assert!(!dir.path().join("leitner_cards.json").exists());
}

#[test]
fn add_rejects_reserved_category() {
    let dir = TempDir::new().unwrap();
    leitner(&dir)
        .args(["add", "--question", "q", "--answer", "a", "--category", "All"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reserved"));
}

#[test]
fn show_prints_card() {
    let dir = TempDir::new().unwrap();
    add(&dir, "list files", "ls", Some("linux"));

    leitner(&dir)
        .args(["show", "list files"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Answer:   ls"))
        .stdout(predicate::str::contains("Category: linux"))
        .stdout(predicate::str::contains("next review in"));
}

#[test]
fn show_unknown_card_fails() {
    let dir = TempDir::new().unwrap();
    leitner(&dir)
        .args(["show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no card with question 'nope'"));
}

#[test]
fn edit_merges_fields() {
    let dir = TempDir::new().unwrap();
    add(&dir, "list files", "ls", Some("linux"));

    leitner(&dir)
        .args(["edit", "list files", "--answer", "ls -la", "--category", "shell"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated 1 card(s)"));

    let cards = stored_cards(&dir);
    assert_eq!(cards[0]["question"], "list files");
    assert_eq!(cards[0]["answer"], "ls -la");
    assert_eq!(cards[0]["category"], "shell");
}

#[test]
fn edit_without_fields_fails() {
    let dir = TempDir::new().unwrap();
    add(&dir, "list files", "ls", None);
    leitner(&dir)
        .args(["edit", "list files"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to change"));
}

#[test]
fn delete_removes_every_duplicate() {
    let dir = TempDir::new().unwrap();
    add(&dir, "dup", "a", None);
    add(&dir, "dup", "b", None);
    add(&dir, "keep", "c", None);

    leitner(&dir)
        .args(["delete", "dup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 card(s)"));

    let cards = stored_cards(&dir);
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["question"], "keep");
}

#[test]
fn move_checks_range() {
    let dir = TempDir::new().unwrap();
    add(&dir, "list files", "ls", None);

    leitner(&dir)
        .args(["move", "list files", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
    assert_eq!(stored_cards(&dir)[0]["box"], 0);

    leitner(&dir)
        .args(["move", "list files", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved 1 card(s) to box 3"));
    assert_eq!(stored_cards(&dir)[0]["box"], 3);
}

#[test]
fn list_filters_by_box_category_and_keyword() {
    let dir = TempDir::new().unwrap();
    add(&dir, "list files", "ls", Some("linux"));
    add(&dir, "show log", "git log", Some("git"));
    add(&dir, "show status", "git status", Some("git"));

    leitner(&dir)
        .args(["list", "--category", "git"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show log"))
        .stdout(predicate::str::contains("show status"))
        .stdout(predicate::str::contains("list files").not())
        .stdout(predicate::str::contains("2 card(s)"));

    leitner(&dir)
        .args(["list", "--search", "STATUS"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show status"))
        .stdout(predicate::str::contains("1 card(s)"));

    leitner(&dir)
        .args(["list", "--box", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No cards."));
}

#[test]
fn list_combines_box_and_keyword() {
    let dir = TempDir::new().unwrap();
    add(&dir, "show log", "git log", Some("git"));
    add(&dir, "show status", "git status", Some("git"));
    leitner(&dir).args(["move", "show status", "2"]).assert().success();

    leitner(&dir)
        .args(["list", "--box", "2", "--search", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show status"))
        .stdout(predicate::str::contains("show log").not())
        .stdout(predicate::str::contains("1 card(s)"));
}

#[test]
fn unknown_category_filter_is_rejected() {
    let dir = TempDir::new().unwrap();
    add(&dir, "list files", "ls", Some("linux"));

    leitner(&dir)
        .args(["list", "--category", "docker"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category 'docker'"))
        .stderr(predicate::str::contains("All, linux"));

    leitner(&dir)
        .args(["status", "--category", "docker"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category 'docker'"));
}

#[test]
fn categories_are_listed_in_registration_order() {
    let dir = TempDir::new().unwrap();

    leitner(&dir)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("No categories"));

    leitner(&dir)
        .args(["add-category", "linux"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added category 'linux'"));
    leitner(&dir)
        .args(["add-category", "linux"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    add(&dir, "show log", "git log", Some("git"));

    leitner(&dir)
        .arg("categories")
        .assert()
        .success()
        .stdout("linux\ngit\n");
}

#[test]
fn status_reports_every_box() {
    let dir = TempDir::new().unwrap();
    add(&dir, "list files", "ls", Some("linux"));

    leitner(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Box 0: next review in"))
        .stdout(predicate::str::contains("Box 4: no cards to review"));
}

#[test]
fn review_reads_answers_from_stdin() {
    let dir = TempDir::new().unwrap();
    add(&dir, "list files", "ls", Some("linux"));
    add(&dir, "print dir", "pwd", Some("linux"));

    leitner(&dir)
        .args(["review", "--box", "0", "--category", "linux"])
        .write_stdin("ls\ncd\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Results: 1/2 correct"))
        .stdout(predicate::str::contains("✘ print dir (expected: pwd)"));

    let cards = stored_cards(&dir);
    assert_eq!(cards[0]["box"], 1);
    assert_eq!(cards[1]["box"], 0);
}

#[test]
fn review_stops_at_end_of_input() {
    let dir = TempDir::new().unwrap();
    add(&dir, "list files", "ls", None);
    add(&dir, "print dir", "pwd", None);
    let before = stored_cards(&dir);

    leitner(&dir)
        .args(["review", "--box", "0"])
        .write_stdin("ls\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Results: 1/1 correct"));

    let after = stored_cards(&dir);
    assert_eq!(after[0]["box"], 1);
    assert_eq!(after[1], before[1]);
}

#[test]
fn data_dir_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("decks");
    std::fs::write(dir.path().join("leitner.toml"), "data_dir = \"elsewhere\"\n").unwrap();

    leitner(&dir)
        .arg("--data-dir")
        .arg(&data)
        .args(["add", "--question", "q", "--answer", "a"])
        .assert()
        .success();

    assert!(data.join("leitner_cards.json").exists());
    assert!(!dir.path().join("elsewhere").exists());
}

#[test]
fn config_file_sets_data_dir() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("leitner.toml"),
        "data_dir = \"decks\"\ncards_file = \"cards.json\"\n",
    )
    .unwrap();

    add(&dir, "q", "a", None);
    assert!(dir.path().join("decks").join("cards.json").exists());
}

#[test]
fn env_var_overrides_config_data_dir() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("from-env");

    leitner(&dir)
        .env("LEITNER_DATA_DIR", &data)
        .args(["add", "--question", "q", "--answer", "a"])
        .assert()
        .success();

    assert!(data.join("leitner_cards.json").exists());
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    leitner(&dir)
        .args(["--config", "nope.toml", "categories"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn corrupt_cards_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("leitner_cards.json"), "{ not json").unwrap();

    leitner(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No cards."))
        .stderr(predicate::str::contains("starting with an empty collection"));
}

#[test]
fn legacy_records_load() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("leitner_cards.json"),
        r#"[{"question": "list files", "command": "ls", "box": 2,
             "last_revision": "2024-05-01T09:30:00.123456", "category": "linux"}]"#,
    )
    .unwrap();

    leitner(&dir)
        .args(["list", "--box", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list files"))
        .stdout(predicate::str::contains("1 card(s)"));

    leitner(&dir)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("linux"));
}
