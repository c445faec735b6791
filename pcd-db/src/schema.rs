//! SQL schema definitions for the in-memory SQLite database.
//!
//! The schema is applied as a single batch when the database is initialized.

/// Returns the full SQL schema as a single batch string.
///
/// This creates the following tables:
///
/// - `cluster_labels` - Keyword label per cluster per clustering run. The
///   primary key `(n_clusters, cluster_id)` guarantees at most one label per
///   cluster, so the view joins can never duplicate a patent count row.
/// - `patent_counts` - Patent count per (firm, cluster, clustering run).
///
/// Per-view results (firm breakdown, cluster breakdown, firms per cluster)
/// are derived on-the-fly via SQL joins against these base tables.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS cluster_labels (
        n_clusters INTEGER NOT NULL,
        cluster_id INTEGER NOT NULL,
        words TEXT NOT NULL,
        PRIMARY KEY (n_clusters, cluster_id)
    );
    CREATE INDEX IF NOT EXISTS idx_labels_words ON cluster_labels(n_clusters, words);

    CREATE TABLE IF NOT EXISTS patent_counts (
        firm TEXT NOT NULL,
        cluster_id INTEGER NOT NULL,
        n_patents INTEGER NOT NULL,
        n_clusters INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_counts_granularity ON patent_counts(n_clusters);
    CREATE INDEX IF NOT EXISTS idx_counts_cluster ON patent_counts(n_clusters, cluster_id);
    CREATE INDEX IF NOT EXISTS idx_counts_firm ON patent_counts(n_clusters, firm);
    "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn schema_is_valid_sql() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema())
            .expect("Schema SQL should be valid");
    }

    #[test]
    fn schema_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();

        for table in ["cluster_labels", "patent_counts"] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "Table {} should exist", table);
        }
    }

    #[test]
    fn schema_rejects_duplicate_label_key() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute(
            "INSERT INTO cluster_labels (n_clusters, cluster_id, words) VALUES (5, 1, 'a')",
            [],
        )
        .unwrap();
        let dup = conn.execute(
            "INSERT INTO cluster_labels (n_clusters, cluster_id, words) VALUES (5, 1, 'b')",
            [],
        );
        assert!(dup.is_err(), "Second label for the same cluster must fail");
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute_batch(create_schema())
            .expect("Applying the schema twice should succeed");
    }
}
