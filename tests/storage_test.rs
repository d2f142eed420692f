//! Store tests against a real file-backed database
//!
//! Run with: cargo test --test storage_test

mod common;

use common::TestDatabase;
use poseshenie::storage::db::{self, RegisterOutcome};
use poseshenie::storage::get_connection;
use pretty_assertions::assert_eq;

#[test]
fn test_pool_connections_share_one_database() {
    let db = TestDatabase::new();

    {
        let conn = get_connection(&db.pool).unwrap();
        assert_eq!(
            db::register_student(&conn, 10, "Петров Пётр Петрович", "Юг").unwrap(),
            RegisterOutcome::Registered
        );
    }

    let conn = get_connection(&db.pool).unwrap();
    let student = db::get_student(&conn, 10).unwrap().expect("student should exist");
    assert_eq!(student.full_name, "Петров Пётр Петрович");
    assert_eq!(student.flow, "Юг");
    assert_eq!(student.visits, 0);
    assert!(!student.registered_at.is_empty());
}

#[test]
fn test_duplicate_registration_keeps_first_row() {
    let db = TestDatabase::new();
    let conn = get_connection(&db.pool).unwrap();

    db::register_student(&conn, 10, "Петров Пётр Петрович", "Юг").unwrap();
    assert_eq!(
        db::register_student(&conn, 10, "Другой Человек Совсем", "Север").unwrap(),
        RegisterOutcome::AlreadyExists
    );

    let all = db::get_all_students(&conn).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].flow, "Юг");
}

#[test]
fn test_concurrent_increments_are_not_lost() {
    let db = TestDatabase::new();
    {
        let conn = get_connection(&db.pool).unwrap();
        db::register_student(&conn, 7, "Сидоров Сидор Сидорович", "Запад").unwrap();
    }

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let pool = db.pool.clone();
            std::thread::spawn(move || {
                for _ in 0..5 {
                    let conn = get_connection(&pool).unwrap();
                    db::increment_visits(&conn, 7).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let conn = get_connection(&db.pool).unwrap();
    assert_eq!(db::get_student(&conn, 7).unwrap().unwrap().visits, 20);
}

#[test]
fn test_reopening_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.db");
    let path = path.to_str().unwrap();

    {
        let pool = poseshenie::storage::create_pool(path).unwrap();
        let conn = get_connection(&pool).unwrap();
        db::register_student(&conn, 3, "Кузнецов Кузьма Кузьмич", "Восток").unwrap();
        db::increment_visits(&conn, 3).unwrap();
    }

    let pool = poseshenie::storage::create_pool(path).unwrap();
    let conn = get_connection(&pool).unwrap();
    assert_eq!(db::get_student(&conn, 3).unwrap().unwrap().visits, 1);
}
