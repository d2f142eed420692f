use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{ffi, params, Connection, OptionalExtension, Row};

use crate::core::error::AppResult;
use crate::storage::migrations::run_migrations;

/// Зарегистрированный студент.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// Telegram ID студента
    pub telegram_id: i64,
    /// ФИО: фамилия, имя, отчество через пробел
    pub full_name: String,
    /// Поток
    pub flow: String,
    /// Количество отмеченных посещений
    pub visits: u32,
    /// Время регистрации (SQLite CURRENT_TIMESTAMP)
    pub registered_at: String,
}

impl Student {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            telegram_id: row.get("tg_id")?,
            full_name: row.get("full_name")?,
            flow: row.get("flow")?,
            visits: row.get("visits")?,
            registered_at: row.get("registered_at")?,
        })
    }
}

/// Outcome of an insert into the students table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered,
    /// A row for this Telegram ID already exists
    AlreadyExists,
}

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

const STUDENT_COLUMNS: &str = "tg_id, full_name, flow, visits, registered_at";

/// Create a new database connection pool
///
/// Initializes a pool with up to 10 connections and applies schema migrations.
///
/// # Example
///
/// ```no_run
/// use poseshenie::storage::db;
///
/// let pool = db::create_pool("students.db")?;
/// # Ok::<(), poseshenie::core::AppError>(())
/// ```
pub fn create_pool(database_path: &str) -> AppResult<DbPool> {
    let manager = SqliteConnectionManager::file(database_path)
        .with_init(|conn| conn.execute_batch("PRAGMA busy_timeout = 5000;"));
    let pool = Pool::builder().max_size(10).build(manager)?;

    let mut conn = pool.get()?;
    run_migrations(&mut conn)?;

    log::info!("Database ready at {}", database_path);
    Ok(pool)
}

/// Get a connection from the pool
///
/// The connection is returned to the pool when dropped.
pub fn get_connection(pool: &DbPool) -> AppResult<DbConnection> {
    Ok(pool.get()?)
}

/// Регистрирует нового студента.
///
/// Уникальность Telegram ID обеспечивается ограничением UNIQUE в таблице,
/// поэтому повторная регистрация возвращает `AlreadyExists`, а не ошибку.
pub fn register_student(conn: &Connection, telegram_id: i64, full_name: &str, flow: &str) -> AppResult<RegisterOutcome> {
    let result = conn.execute(
        "INSERT INTO students (tg_id, full_name, flow) VALUES (?1, ?2, ?3)",
        params![telegram_id, full_name, flow],
    );

    match result {
        Ok(_) => Ok(RegisterOutcome::Registered),
        Err(rusqlite::Error::SqliteFailure(err, _)) if err.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE => {
            log::info!("Student {} is already registered", telegram_id);
            Ok(RegisterOutcome::AlreadyExists)
        }
        Err(e) => Err(e.into()),
    }
}

/// Возвращает студента по Telegram ID.
pub fn get_student(conn: &Connection, telegram_id: i64) -> AppResult<Option<Student>> {
    let student = conn
        .query_row(
            &format!("SELECT {} FROM students WHERE tg_id = ?1", STUDENT_COLUMNS),
            [telegram_id],
            Student::from_row,
        )
        .optional()?;
    Ok(student)
}

/// Возвращает всех студентов в порядке регистрации.
pub fn get_all_students(conn: &Connection) -> AppResult<Vec<Student>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM students ORDER BY id", STUDENT_COLUMNS))?;
    let rows = stmt.query_map([], Student::from_row)?;

    let mut students = Vec::new();
    for row in rows {
        students.push(row?);
    }
    Ok(students)
}

/// Увеличивает счётчик посещений на 1 и возвращает обновлённую запись.
///
/// Update and read happen in one statement, so concurrent marks never lose an
/// increment. Returns `None` when no such student exists.
pub fn increment_visits(conn: &Connection, telegram_id: i64) -> AppResult<Option<Student>> {
    let student = conn
        .query_row(
            &format!(
                "UPDATE students SET visits = visits + 1 WHERE tg_id = ?1 RETURNING {}",
                STUDENT_COLUMNS
            ),
            [telegram_id],
            Student::from_row,
        )
        .optional()?;
    Ok(student)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn setup() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();
        conn
    }

    #[test]
    fn test_register_and_lookup() {
        let conn = setup();
        let outcome = register_student(&conn, 100, "Иванов Иван Иванович", "Север").unwrap();
        assert_eq!(outcome, RegisterOutcome::Registered);

        let student = get_student(&conn, 100).unwrap().unwrap();
        assert_eq!(student.telegram_id, 100);
        assert_eq!(student.full_name, "Иванов Иван Иванович");
        assert_eq!(student.flow, "Север");
        assert_eq!(student.visits, 0);
        assert!(!student.registered_at.is_empty());
    }

    #[test]
    fn test_lookup_missing_is_none() {
        let conn = setup();
        assert!(get_student(&conn, 1).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_registration_keeps_single_row() {
        let conn = setup();
        register_student(&conn, 7, "Петров Пётр Петрович", "Юг").unwrap();
        let second = register_student(&conn, 7, "Другой Человек Совсем", "Запад").unwrap();
        assert_eq!(second, RegisterOutcome::AlreadyExists);

        let all = get_all_students(&conn).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].full_name, "Петров Пётр Петрович");
        assert_eq!(all[0].flow, "Юг");
    }

    #[test]
    fn test_non_unique_constraint_failure_is_an_error() {
        let conn = setup();
        conn.execute_batch(
            "CREATE TRIGGER reject_flow BEFORE INSERT ON students
             WHEN NEW.flow = 'Луна'
             BEGIN SELECT RAISE(ABORT, 'unknown flow'); END;",
        )
        .unwrap();

        assert!(register_student(&conn, 8, "А Б В", "Луна").is_err());
        assert!(get_student(&conn, 8).unwrap().is_none());
    }

    #[test]
    fn test_increment_is_monotonic() {
        let conn = setup();
        register_student(&conn, 5, "А Б В", "Восток").unwrap();
        for n in 1..=12u32 {
            let student = increment_visits(&conn, 5).unwrap().unwrap();
            assert_eq!(student.visits, n);
        }
        assert_eq!(get_student(&conn, 5).unwrap().unwrap().visits, 12);
    }

    #[test]
    fn test_increment_unknown_student() {
        let conn = setup();
        assert!(increment_visits(&conn, 404).unwrap().is_none());
        assert!(get_all_students(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_list_all_in_registration_order() {
        let conn = setup();
        register_student(&conn, 3, "В В В", "Юг").unwrap();
        register_student(&conn, 1, "А А А", "Север").unwrap();
        register_student(&conn, 2, "Б Б Б", "Запад").unwrap();

        let ids: Vec<i64> = get_all_students(&conn).unwrap().iter().map(|s| s.telegram_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
