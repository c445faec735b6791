//! CSV data loading functions for populating the in-memory SQLite database.
//!
//! Both files carry a header row. Columns are located by header name, so
//! their order is free and extra columns are ignored; a missing required
//! column is a [`LoadError::MissingColumn`].
//!
//! # CSV Formats
//!
//! - **Patent counts**: `firm,cluster_id,n_patents,n_clusters`
//! - **Cluster labels**: `cluster_id,words,n_clusters`

use crate::Database;
use rusqlite::{params, ErrorCode};
use thiserror::Error;

const PATENT_COUNTS: &str = "patent_counts";
const CLUSTER_LABELS: &str = "cluster_labels";

/// Reasons a CSV table cannot be loaded. All of them are fatal for the app.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{table}: input is empty (expected a header row)")]
    Empty { table: &'static str },

    #[error("{table}: required column `{column}` not found in header")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    #[error("{table}: line {line}: column `{column}` has non-integer value {value:?}")]
    InvalidInteger {
        table: &'static str,
        column: &'static str,
        line: u64,
        value: String,
    },

    #[error("{table}: line {line}: duplicate label for cluster {cluster_id} in run {n_clusters}")]
    DuplicateLabel {
        table: &'static str,
        line: u64,
        cluster_id: i64,
        n_clusters: i64,
    },
}

/// Header positions of the required columns of one table.
struct Columns<const N: usize> {
    index: [usize; N],
}

impl<const N: usize> Columns<N> {
    fn locate(
        table: &'static str,
        headers: &csv::StringRecord,
        names: [&'static str; N],
    ) -> Result<Self, LoadError> {
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(LoadError::Empty { table });
        }
        let mut index = [0usize; N];
        for (slot, name) in index.iter_mut().zip(names) {
            *slot = headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(LoadError::MissingColumn { table, column: name })?;
        }
        Ok(Self { index })
    }

    fn text<'r>(&self, record: &'r csv::StringRecord, i: usize) -> &'r str {
        record.get(self.index[i]).unwrap_or("").trim()
    }
}

fn parse_int(
    table: &'static str,
    column: &'static str,
    line: u64,
    value: &str,
) -> Result<i64, LoadError> {
    value.parse().map_err(|_| LoadError::InvalidInteger {
        table,
        column,
        line,
        value: value.to_string(),
    })
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

impl Database {
    /// Load per-firm patent counts from a CSV string.
    ///
    /// Expected header (any order): `firm,cluster_id,n_patents,n_clusters`.
    /// Returns the number of rows inserted.
    ///
    /// # Example CSV
    /// ```text
    /// firm,cluster_id,n_patents,n_clusters
    /// Acme Corp,1,3,5
    /// ```
    pub fn load_patent_counts(&self, csv_data: &str) -> anyhow::Result<usize> {
        let conn = self.conn.borrow();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv_data.as_bytes());

        let names = ["firm", "cluster_id", "n_patents", "n_clusters"];
        let cols = Columns::locate(PATENT_COUNTS, rdr.headers()?, names)?;

        let tx = conn.unchecked_transaction()?;
        let mut count = 0usize;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO patent_counts (firm, cluster_id, n_patents, n_clusters)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for result in rdr.records() {
                let r = result?;
                let line = line_of(&r);
                let firm = cols.text(&r, 0);
                let cluster_id = parse_int(PATENT_COUNTS, names[1], line, cols.text(&r, 1))?;
                let n_patents = parse_int(PATENT_COUNTS, names[2], line, cols.text(&r, 2))?;
                let n_clusters = parse_int(PATENT_COUNTS, names[3], line, cols.text(&r, 3))?;

                stmt.execute(params![firm, cluster_id, n_patents, n_clusters])?;
                count += 1;
            }
        }
        tx.commit()?;
        log::info!("[PCD Debug] loader: Loaded {} patent count rows", count);
        Ok(count)
    }

    /// Load cluster keyword labels from a CSV string.
    ///
    /// Expected header (any order): `cluster_id,words,n_clusters`. A second
    /// label for the same `(cluster_id, n_clusters)` aborts the load with
    /// [`LoadError::DuplicateLabel`]. Returns the number of rows inserted.
    ///
    /// # Example CSV
    /// ```text
    /// cluster_id,words,n_clusters
    /// 1,"battery, cell",5
    /// ```
    pub fn load_cluster_labels(&self, csv_data: &str) -> anyhow::Result<usize> {
        let conn = self.conn.borrow();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv_data.as_bytes());

        let names = ["cluster_id", "words", "n_clusters"];
        let cols = Columns::locate(CLUSTER_LABELS, rdr.headers()?, names)?;

        let tx = conn.unchecked_transaction()?;
        let mut count = 0usize;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO cluster_labels (n_clusters, cluster_id, words)
                 VALUES (?1, ?2, ?3)",
            )?;
            for result in rdr.records() {
                let r = result?;
                let line = line_of(&r);
                let cluster_id = parse_int(CLUSTER_LABELS, names[0], line, cols.text(&r, 0))?;
                let words = cols.text(&r, 1);
                let n_clusters = parse_int(CLUSTER_LABELS, names[2], line, cols.text(&r, 2))?;

                match stmt.execute(params![n_clusters, cluster_id, words]) {
                    Ok(_) => count += 1,
                    Err(rusqlite::Error::SqliteFailure(e, _))
                        if e.code == ErrorCode::ConstraintViolation =>
                    {
                        return Err(LoadError::DuplicateLabel {
                            table: CLUSTER_LABELS,
                            line,
                            cluster_id,
                            n_clusters,
                        }
                        .into());
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
        tx.commit()?;
        log::info!("[PCD Debug] loader: Loaded {} cluster labels", count);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::LoadError;
    use crate::Database;

    fn load_error(result: anyhow::Result<usize>) -> LoadError {
        result
            .expect_err("load should fail")
            .downcast::<LoadError>()
            .expect("error should be a LoadError")
    }

    #[test]
    fn load_patent_counts_from_csv() {
        let db = Database::new().unwrap();
        let csv = "\
firm,cluster_id,n_patents,n_clusters
Acme Corp,1,3,5
Acme Corp,2,7,5
Globex,1,4,10
";
        assert_eq!(db.load_patent_counts(csv).unwrap(), 3);

        let conn = db.conn.borrow();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM patent_counts", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 3);

        let n: i64 = conn
            .query_row(
                "SELECT n_patents FROM patent_counts WHERE firm = 'Acme Corp' AND cluster_id = 2",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(n, 7);
    }

    #[test]
    fn load_patent_counts_locates_columns_by_header() {
        let db = Database::new().unwrap();
        let csv = "\
n_clusters,extra,n_patents,firm,cluster_id
5,x,3,Acme Corp,1
";
        db.load_patent_counts(csv).unwrap();

        let conn = db.conn.borrow();
        let (firm, cluster_id, n_patents, n_clusters): (String, i64, i64, i64) = conn
            .query_row(
                "SELECT firm, cluster_id, n_patents, n_clusters FROM patent_counts",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .unwrap();
        assert_eq!(firm, "Acme Corp");
        assert_eq!((cluster_id, n_patents, n_clusters), (1, 3, 5));
    }

    #[test]
    fn load_cluster_labels_keeps_quoted_commas() {
        let db = Database::new().unwrap();
        let csv = "\
cluster_id,words,n_clusters
1,\"battery, cell\",5
2,\"engine, motor\",5
";
        assert_eq!(db.load_cluster_labels(csv).unwrap(), 2);

        let conn = db.conn.borrow();
        let words: String = conn
            .query_row(
                "SELECT words FROM cluster_labels WHERE cluster_id = 1",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(words, "battery, cell");
    }

    #[test]
    fn load_rejects_missing_column() {
        let db = Database::new().unwrap();
        let err = load_error(db.load_patent_counts("firm,cluster_id,n_clusters\nAcme,1,5\n"));
        assert!(matches!(
            err,
            LoadError::MissingColumn {
                column: "n_patents",
                ..
            }
        ));
    }

    #[test]
    fn load_rejects_empty_input() {
        let db = Database::new().unwrap();
        let err = load_error(db.load_cluster_labels(""));
        assert!(matches!(err, LoadError::Empty { .. }));
    }

    #[test]
    fn load_rejects_non_integer_count() {
        let db = Database::new().unwrap();
        let csv = "\
firm,cluster_id,n_patents,n_clusters
Acme Corp,1,three,5
";
        let err = load_error(db.load_patent_counts(csv));
        match err {
            LoadError::InvalidInteger {
                column, line, value, ..
            } => {
                assert_eq!(column, "n_patents");
                assert_eq!(line, 2);
                assert_eq!(value, "three");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_rejects_duplicate_label() {
        let db = Database::new().unwrap();
        let csv = "\
cluster_id,words,n_clusters
1,battery,5
1,engine,5
";
        let err = load_error(db.load_cluster_labels(csv));
        assert!(matches!(
            err,
            LoadError::DuplicateLabel {
                cluster_id: 1,
                n_clusters: 5,
                ..
            }
        ));
    }

    #[test]
    fn failed_load_leaves_table_empty() {
        let db = Database::new().unwrap();
        let csv = "\
firm,cluster_id,n_patents,n_clusters
Acme Corp,1,3,5
Acme Corp,2,x,5
";
        assert!(db.load_patent_counts(csv).is_err());

        let conn = db.conn.borrow();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM patent_counts", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0, "Partial load should be rolled back");
    }

    #[test]
    fn same_cluster_id_in_different_runs_is_allowed() {
        let db = Database::new().unwrap();
        let csv = "\
cluster_id,words,n_clusters
1,battery,5
1,engine,10
";
        assert_eq!(db.load_cluster_labels(csv).unwrap(), 2);
    }
}
