use anyhow::Result;
use libsql::{Row, Value, params_from_iter};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::database::Db;
use crate::models::{CategorySummary, Expense, UpdateExpensePayload};

const SELECT_EXPENSE: &str = "SELECT id, date, category, amount, comment FROM expenses";

const SUMMARY_QUERY: &str = r#"
SELECT category,
       SUM(amount) AS amount,
       COUNT(*) AS count,
       AVG(amount) AS average_bill
FROM expenses
GROUP BY category
ORDER BY amount DESC
"#;

/// Creation instants use a fixed-width UTC timestamp so lexicographic order
/// on the date column matches chronological order.
fn current_timestamp() -> Result<String> {
    let format = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z"
    );
    Ok(OffsetDateTime::now_utc().format(&format)?)
}

pub fn extract_expense_from_row(row: Row) -> Result<Expense> {
    let id: i64 = row.get(0)?;
    let date: String = row.get(1)?;
    let category: String = row.get(2)?;
    let amount: f64 = row.get(3)?;
    let comment = match row.get_value(4)? {
        Value::Text(text) => Some(text),
        _ => None,
    };

    Ok(Expense {
        id,
        date,
        category,
        amount,
        comment,
    })
}

fn extract_summary_from_row(row: Row) -> Result<CategorySummary> {
    let category: String = row.get(0)?;
    let amount: f64 = row.get(1)?;
    let count: i64 = row.get(2)?;
    let average_bill: f64 = row.get(3)?;

    Ok(CategorySummary {
        category,
        amount,
        count,
        average_bill,
    })
}

/// Inserts one row stamped with the current instant and returns the full
/// entity including the store-assigned id.
pub async fn create_expense(
    db: &Db,
    category: &str,
    amount: f64,
    comment: Option<&str>,
) -> Result<Expense> {
    let date = current_timestamp()?;
    let comment_value = match comment {
        Some(text) => Value::Text(text.to_string()),
        None => Value::Null,
    };

    let conn = db.write().await;
    conn.execute(
        "INSERT INTO expenses (date, category, amount, comment) VALUES (?, ?, ?, ?)",
        (date.as_str(), category, amount, comment_value),
    )
    .await?;
    let id = conn.last_insert_rowid();

    Ok(Expense {
        id,
        date,
        category: category.to_string(),
        amount,
        comment: comment.map(str::to_string),
    })
}

/// Most recent first; the id tiebreak keeps equal-timestamp rows in a fixed
/// order so offset pagination never duplicates or drops a row.
pub async fn get_sorted_expenses(
    db: &Db,
    category: Option<&str>,
    limit: u32,
    skip: u32,
) -> Result<Vec<Expense>> {
    let mut sql = String::from(SELECT_EXPENSE);
    let mut params: Vec<Value> = Vec::new();

    if let Some(category) = category {
        sql.push_str(" WHERE category = ?");
        params.push(Value::Text(category.to_string()));
    }

    sql.push_str(" ORDER BY date DESC, id DESC LIMIT ? OFFSET ?");
    params.push(Value::Integer(limit as i64));
    params.push(Value::Integer(skip as i64));

    let conn = db.read().await;
    let mut rows = conn.query(&sql, params_from_iter(params)).await?;

    let mut expenses = Vec::new();
    while let Some(row) = rows.next().await? {
        expenses.push(extract_expense_from_row(row)?);
    }

    Ok(expenses)
}

pub async fn get_summary(db: &Db) -> Result<Vec<CategorySummary>> {
    let conn = db.read().await;
    let mut rows = conn.query(SUMMARY_QUERY, ()).await?;

    let mut summaries = Vec::new();
    while let Some(row) = rows.next().await? {
        summaries.push(extract_summary_from_row(row)?);
    }

    Ok(summaries)
}

pub async fn get_expense_by_id(db: &Db, id: i64) -> Result<Option<Expense>> {
    let conn = db.read().await;
    let mut rows = conn
        .query(&format!("{} WHERE id = ?", SELECT_EXPENSE), [id])
        .await?;

    match rows.next().await? {
        Some(row) => Ok(Some(extract_expense_from_row(row)?)),
        None => Ok(None),
    }
}

/// Filters a partial-update payload down to the fixed allowed column set,
/// preserving field order. An explicit null comment becomes a NULL bind.
pub fn update_fields(payload: &UpdateExpensePayload) -> Vec<(&'static str, Value)> {
    let mut fields = Vec::new();

    if let Some(category) = &payload.category {
        fields.push(("category", Value::Text(category.clone())));
    }
    if let Some(amount) = payload.amount {
        fields.push(("amount", Value::Real(amount)));
    }
    if let Some(comment) = &payload.comment {
        let value = match comment {
            Some(text) => Value::Text(text.clone()),
            None => Value::Null,
        };
        fields.push(("comment", value));
    }

    fields
}

/// Applies the supplied fields in one transaction and returns the updated
/// row, so a concurrent delete cannot make a successful write read back as
/// absent. `id` and `date` are never part of the SET list. An empty field
/// list sends nothing to the store; callers reject that case up front.
pub async fn update_expense(
    db: &Db,
    id: i64,
    fields: Vec<(&'static str, Value)>,
) -> Result<Option<Expense>> {
    if fields.is_empty() {
        return Ok(None);
    }

    // Column names come from the fixed allowed set; values are always bound.
    let assignments: Vec<String> = fields
        .iter()
        .map(|(column, _)| format!("{} = ?", column))
        .collect();
    let sql = format!("UPDATE expenses SET {} WHERE id = ?", assignments.join(", "));

    let mut params: Vec<Value> = fields.into_iter().map(|(_, value)| value).collect();
    params.push(Value::Integer(id));

    let conn = db.write().await;
    let tx = conn.transaction().await?;

    let changed = tx.execute(&sql, params_from_iter(params)).await?;
    if changed == 0 {
        tx.rollback().await?;
        return Ok(None);
    }

    let mut rows = tx
        .query(&format!("{} WHERE id = ?", SELECT_EXPENSE), [id])
        .await?;
    let expense = match rows.next().await? {
        Some(row) => extract_expense_from_row(row)?,
        None => {
            tx.rollback().await?;
            return Ok(None);
        }
    };

    tx.commit().await?;
    Ok(Some(expense))
}

/// Returns the number of rows removed (0 or 1); 0 means the id was absent.
pub async fn delete_expense(db: &Db, id: i64) -> Result<u64> {
    let conn = db.write().await;
    let deleted = conn
        .execute("DELETE FROM expenses WHERE id = ?", [id])
        .await?;

    Ok(deleted)
}
