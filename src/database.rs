use anyhow::Result;
use libsql::{Builder, Connection};
use std::{path::Path, sync::Arc};
use tokio::sync::RwLock;

const CREATE_EXPENSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS expenses (
    id        INTEGER     PRIMARY KEY AUTOINCREMENT,
    date      TEXT        NOT NULL,
    category  VARCHAR(15) NOT NULL,
    amount    REAL        NOT NULL,
    comment   VARCHAR(50)
);
"#;

pub type Db = Arc<RwLock<Connection>>;

/// Expense store (expenses.db); the schema bootstrap is idempotent and must
/// run before the repository is first used.
pub async fn init_db(data_dir: &str) -> Result<Db> {
    tokio::fs::create_dir_all(data_dir).await?;
    let path = Path::new(data_dir).join("expenses.db");
    let db = Builder::new_local(path).build().await?;
    let conn = db.connect()?;

    conn.execute(CREATE_EXPENSES_TABLE, ()).await?;
    Ok(Arc::new(RwLock::new(conn)))
}
