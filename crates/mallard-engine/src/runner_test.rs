use super::*;
use crate::MigrationDb;
use std::fs;

fn count(migrator: &Migrator, sql: &str) -> i64 {
    migrator
        .db()
        .conn()
        .query_row(sql, [], |row| row.get::<_, i64>(0))
        .unwrap()
}

fn migrator_with(files: &[(&str, &str)]) -> (tempfile::TempDir, Migrator) {
    let dir = tempfile::tempdir().unwrap();
    for (file, sql) in files {
        fs::write(dir.path().join(file), sql).unwrap();
    }
    let db = MigrationDb::open_memory().unwrap();
    let store = ScriptStore::new(dir.path());
    (dir, Migrator::new(db, store))
}

// ── apply ──────────────────────────────────────────────────────────────

#[test]
fn apply_executes_body_and_records_in_one_transaction() {
    let (_dir, migrator) = migrator_with(&[("0001_a.up.sql", "CREATE TABLE a (id INT);")]);
    let script = migrator.store().find("0001_a", Direction::Up).unwrap();

    migrator.apply(&script, 1).unwrap();

    assert_eq!(count(&migrator, "SELECT COUNT(*) FROM a"), 0);
    assert_eq!(
        count(
            &migrator,
            "SELECT COUNT(*) FROM mallard.migrations \
             WHERE name = '0001_a' AND direction = 'up' AND batch = 1"
        ),
        1
    );
}

#[test]
fn apply_failure_leaves_no_ledger_row() {
    let (_dir, migrator) = migrator_with(&[("0001_a.up.sql", "THIS IS NOT SQL;")]);
    let script = migrator.store().find("0001_a", Direction::Up).unwrap();

    let err = migrator.apply(&script, 1).unwrap_err();
    match err {
        EngineError::ExecutionFailure { name, .. } => assert_eq!(name, "0001_a"),
        other => panic!("expected ExecutionFailure, got {other}"),
    }

    assert_eq!(
        count(&migrator, "SELECT COUNT(*) FROM mallard.migrations"),
        0
    );
}

#[test]
fn apply_rejects_empty_script_before_touching_the_database() {
    let (_dir, migrator) = migrator_with(&[("0001_a.up.sql", "  \n")]);
    let script = migrator.store().find("0001_a", Direction::Up).unwrap();

    let err = migrator.apply(&script, 1).unwrap_err();
    assert!(matches!(err, EngineError::EmptyScript { .. }));
    assert_eq!(
        count(&migrator, "SELECT COUNT(*) FROM mallard.migrations"),
        0
    );
}

// ── run_all ────────────────────────────────────────────────────────────

#[test]
fn run_all_applies_in_sequence_order_with_one_batch() {
    let (_dir, migrator) = migrator_with(&[
        ("0003_c.up.sql", "CREATE TABLE c (id INT);"),
        ("0001_a.up.sql", "CREATE TABLE a (id INT);"),
        ("0002_b.up.sql", "CREATE TABLE b (id INT);"),
    ]);

    let summary = migrator.run_all(Direction::Up).unwrap();

    assert_eq!(summary.batch, 1);
    assert_eq!(
        summary.applied,
        vec![
            MigrationName::new("0001_a"),
            MigrationName::new("0002_b"),
            MigrationName::new("0003_c"),
        ]
    );
    assert_eq!(
        count(
            &migrator,
            "SELECT COUNT(DISTINCT batch) FROM mallard.migrations"
        ),
        1
    );
}

#[test]
fn run_all_twice_is_idempotent() {
    let (_dir, migrator) = migrator_with(&[
        ("0001_a.up.sql", "CREATE TABLE a (id INT);"),
        ("0002_b.up.sql", "CREATE TABLE b (id INT);"),
    ]);

    let first = migrator.run_all(Direction::Up).unwrap();
    assert_eq!(first.applied.len(), 2);

    // Second invocation executes zero bodies and reports both as skipped.
    // Non-idempotent DDL would fail here if the bodies re-ran.
    let second = migrator.run_all(Direction::Up).unwrap();
    assert!(second.applied.is_empty());
    assert_eq!(second.skipped.len(), 2);
    assert_eq!(
        count(&migrator, "SELECT COUNT(*) FROM mallard.migrations"),
        2
    );
}

#[test]
fn run_all_assigns_next_batch_to_later_invocation() {
    let (dir, migrator) = migrator_with(&[("0001_a.up.sql", "CREATE TABLE a (id INT);")]);
    migrator.run_all(Direction::Up).unwrap();

    fs::write(
        dir.path().join("0002_b.up.sql"),
        "CREATE TABLE b (id INT);",
    )
    .unwrap();
    let second = migrator.run_all(Direction::Up).unwrap();

    assert_eq!(second.batch, 2);
    assert_eq!(second.applied, vec![MigrationName::new("0002_b")]);
    assert_eq!(
        count(
            &migrator,
            "SELECT COUNT(*) FROM mallard.migrations WHERE batch = 2"
        ),
        1
    );
}

#[test]
fn run_all_fails_fast_and_keeps_earlier_rows() {
    let (_dir, migrator) = migrator_with(&[
        ("0001_a.up.sql", "CREATE TABLE a (id INT);"),
        ("0002_b.up.sql", "NOT VALID SQL;"),
        ("0003_c.up.sql", "CREATE TABLE c (id INT);"),
    ]);

    let err = migrator.run_all(Direction::Up).unwrap_err();
    match err {
        EngineError::ExecutionFailure { name, .. } => assert_eq!(name, "0002_b"),
        other => panic!("expected ExecutionFailure, got {other}"),
    }

    // 0001 applied and kept; 0002 rolled back; 0003 never attempted.
    assert_eq!(
        count(
            &migrator,
            "SELECT COUNT(*) FROM mallard.migrations WHERE name = '0001_a'"
        ),
        1
    );
    assert_eq!(
        count(
            &migrator,
            "SELECT COUNT(*) FROM mallard.migrations WHERE name <> '0001_a'"
        ),
        0
    );
    assert_eq!(
        count(
            &migrator,
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = 'c'"
        ),
        0
    );
}

#[test]
fn run_all_down_walks_in_reverse_with_sentinel_batch() {
    let (_dir, migrator) = migrator_with(&[
        ("0001_a.up.sql", "CREATE TABLE a (id INT);"),
        ("0001_a.down.sql", "DROP TABLE a;"),
        ("0002_b.up.sql", "CREATE TABLE b (id INT);"),
        ("0002_b.down.sql", "DROP TABLE b;"),
    ]);
    migrator.run_all(Direction::Up).unwrap();

    let summary = migrator.run_all(Direction::Down).unwrap();

    assert_eq!(summary.batch, crate::DOWN_SENTINEL_BATCH);
    assert_eq!(
        summary.applied,
        vec![MigrationName::new("0002_b"), MigrationName::new("0001_a")]
    );
    assert_eq!(
        count(
            &migrator,
            "SELECT COUNT(*) FROM mallard.migrations WHERE direction = 'down' AND batch = 0"
        ),
        2
    );

    // Skip guard: a second bare down run executes nothing.
    let second = migrator.run_all(Direction::Down).unwrap();
    assert!(second.applied.is_empty());
    assert_eq!(second.skipped.len(), 2);
}

// ── run_one ────────────────────────────────────────────────────────────

#[test]
fn run_one_applies_named_script_with_fresh_batch() {
    let (_dir, migrator) = migrator_with(&[
        ("0001_a.up.sql", "CREATE TABLE a (id INT);"),
        ("0002_b.up.sql", "CREATE TABLE b (id INT);"),
    ]);

    let summary = migrator.run_one(Direction::Up, "0002_b", false).unwrap();

    assert_eq!(summary.applied, vec![MigrationName::new("0002_b")]);
    assert_eq!(
        count(
            &migrator,
            "SELECT COUNT(*) FROM mallard.migrations WHERE name = '0001_a'"
        ),
        0,
        "run_one must not touch other scripts"
    );
}

#[test]
fn run_one_skips_already_applied_by_default() {
    let (_dir, migrator) = migrator_with(&[("0001_a.up.sql", "CREATE TABLE a (id INT);")]);
    migrator.run_one(Direction::Up, "0001_a", false).unwrap();

    let second = migrator.run_one(Direction::Up, "0001_a", false).unwrap();
    assert!(second.applied.is_empty());
    assert_eq!(second.skipped, vec![MigrationName::new("0001_a")]);
    assert_eq!(
        count(&migrator, "SELECT COUNT(*) FROM mallard.migrations"),
        1
    );
}

#[test]
fn run_one_force_reapplies() {
    let (_dir, migrator) = migrator_with(&[(
        "0001_a.up.sql",
        "CREATE TABLE IF NOT EXISTS a (id INT);",
    )]);
    migrator.run_one(Direction::Up, "0001_a", false).unwrap();

    let forced = migrator.run_one(Direction::Up, "0001_a", true).unwrap();
    assert_eq!(forced.applied, vec![MigrationName::new("0001_a")]);
    assert_eq!(
        count(
            &migrator,
            "SELECT COUNT(*) FROM mallard.migrations WHERE name = '0001_a'"
        ),
        2
    );
}

#[test]
fn run_one_unknown_name_is_script_not_found() {
    let (_dir, migrator) = migrator_with(&[]);
    let err = migrator
        .run_one(Direction::Up, "0009_ghost", false)
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Script(mallard_core::CoreError::ScriptNotFound { .. })
    ));
    assert_eq!(
        count(&migrator, "SELECT COUNT(*) FROM mallard.migrations"),
        0
    );
}
