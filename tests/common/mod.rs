use expense_tracker::database::{Db, init_db};
use expense_tracker::models::Expense;
use expense_tracker::repository::extract_expense_from_row;
use libsql::Value;
use tempfile::{TempDir, tempdir};

/// Creates an isolated expenses database in a temporary directory. The
/// returned TempDir must stay alive for the duration of the test.
pub async fn setup_test_db() -> (Db, TempDir) {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let data_path = temp_dir
        .path()
        .to_str()
        .expect("Failed to convert path to string")
        .to_string();

    let db = init_db(&data_path)
        .await
        .unwrap_or_else(|e| panic!("Failed to initialize expenses database at {}: {}", data_path, e));

    (db, temp_dir)
}

/// Inserts an expense row with an explicit date, bypassing the repository's
/// clock, so ordering tests are deterministic. Returns the assigned id.
pub async fn insert_expense_at(
    db: &Db,
    date: &str,
    category: &str,
    amount: f64,
    comment: Option<&str>,
) -> i64 {
    let comment_value = match comment {
        Some(text) => Value::Text(text.to_string()),
        None => Value::Null,
    };

    let conn = db.write().await;
    conn.execute(
        "INSERT INTO expenses (date, category, amount, comment) VALUES (?, ?, ?, ?)",
        (date, category, amount, comment_value),
    )
    .await
    .unwrap_or_else(|e| panic!("Failed to insert test expense '{}': {}", category, e));

    conn.last_insert_rowid()
}

/// Reads one expense straight from the table, bypassing the repository, for
/// verifying persisted state.
pub async fn get_expense_from_db(db: &Db, id: i64) -> Option<Expense> {
    let conn = db.read().await;
    let mut rows = conn
        .query(
            "SELECT id, date, category, amount, comment FROM expenses WHERE id = ?",
            [id],
        )
        .await
        .expect("Failed to query expense row");

    match rows.next().await.expect("Failed to read expense row") {
        Some(row) => Some(extract_expense_from_row(row).expect("Failed to extract expense")),
        None => None,
    }
}

/// Fixed-width test date with a distinct microsecond component, matching the
/// repository's timestamp format.
pub fn test_date(micros: u32) -> String {
    format!("2023-11-14T22:13:20.{:06}Z", micros)
}
