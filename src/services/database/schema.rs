use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_documents_table(conn)?;
    create_documents_index(conn)?;
    Ok(())
}

fn create_documents_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS documents (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            collection TEXT NOT NULL,
            owner TEXT NOT NULL,
            body TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create documents table")?;

    Ok(())
}

fn create_documents_index(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_documents_collection_owner
         ON documents(collection, owner)",
        [],
    )
    .context("Failed to create documents index")?;

    Ok(())
}
