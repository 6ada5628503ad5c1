// Database service module
// SQLite connection wrapper and document schema management

mod connection;
mod schema;

pub use connection::Database;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_new_database_in_memory() {
        let result = Database::new(":memory:");
        assert!(result.is_ok(), "Should create in-memory database");
    }

    #[test]
    fn test_new_database_with_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_str().unwrap();

        let result = Database::new(db_path_str);
        assert!(result.is_ok(), "Should create file-based database");
        assert!(Path::new(db_path_str).exists(), "Database file should exist");
    }

    #[test]
    fn test_initialize_schema_is_idempotent() {
        let db = Database::new(":memory:").unwrap();
        assert!(db.initialize_schema().is_ok());
        assert!(db.initialize_schema().is_ok(), "Second run should be a no-op");
    }

    #[test]
    fn test_documents_table_exists() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();

        let count: i64 = db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='documents'",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(count, 1, "Documents table should exist");
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let db = Database::new(":memory:").unwrap();

        let enabled: i64 = db
            .connection()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();

        assert_eq!(enabled, 1, "Foreign keys should be enabled");
    }

    #[test]
    fn test_documents_columns_match_store_rows() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db.initialize_schema().unwrap();

        let mut stmt = db
            .connection()
            .prepare("SELECT name FROM pragma_table_info('documents') ORDER BY cid")
            .unwrap();
        let columns: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            columns,
            ["id", "collection", "owner", "body", "created_at", "updated_at"]
        );
    }
}
