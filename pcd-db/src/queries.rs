//! Typed query methods for the three dashboard views and their selectors.
//!
//! Every view query is scoped to one clustering run (`n_clusters`): both
//! tables are restricted to that granularity before anything is joined.
//! Joins are inner joins on `cluster_id`; patent count rows without a label
//! are dropped here and reported once at load time by
//! [`Database::integrity_report`].

use crate::models::{ClusterFirmCount, ClusterFirmTotal, FirmClusterCount, IntegrityReport};
use crate::Database;
use rusqlite::params;

impl Database {
    // ───────────────────── View Queries ─────────────────────

    /// Clusters of one firm within a clustering run (firm view).
    ///
    /// Filters `patent_counts` to the firm, joins the labels on `cluster_id`
    /// and orders by patent count ascending (ties by `cluster_id`). An
    /// unknown firm yields an empty result.
    pub fn query_firm_clusters(
        &self,
        n_clusters: i64,
        firm: &str,
    ) -> anyhow::Result<Vec<FirmClusterCount>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT p.cluster_id, l.words, p.n_patents
             FROM patent_counts p
             INNER JOIN cluster_labels l
                ON l.cluster_id = p.cluster_id AND l.n_clusters = p.n_clusters
             WHERE p.n_clusters = ?1 AND p.firm = ?2
             ORDER BY p.n_patents ASC, p.cluster_id ASC",
        )?;
        let rows = stmt
            .query_map(params![n_clusters, firm], |row| {
                Ok(FirmClusterCount {
                    cluster_id: row.get(0)?,
                    words: row.get(1)?,
                    n_patents: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[PCD Debug] query: query_firm_clusters({}, {:?}) returned {} records",
            n_clusters,
            firm,
            rows.len()
        );
        Ok(rows)
    }

    /// Firms holding patents in the cluster labelled `words` (cluster view).
    ///
    /// Filters `cluster_labels` to the label, joins the per-firm counts on
    /// `cluster_id` and orders by patent count ascending (ties by firm).
    pub fn query_cluster_firms(
        &self,
        n_clusters: i64,
        words: &str,
    ) -> anyhow::Result<Vec<ClusterFirmCount>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT p.firm, l.cluster_id, l.words, p.n_patents
             FROM cluster_labels l
             INNER JOIN patent_counts p
                ON p.cluster_id = l.cluster_id AND p.n_clusters = l.n_clusters
             WHERE l.n_clusters = ?1 AND l.words = ?2
             ORDER BY p.n_patents ASC, p.firm ASC",
        )?;
        let rows = stmt
            .query_map(params![n_clusters, words], |row| {
                Ok(ClusterFirmCount {
                    firm: row.get(0)?,
                    cluster_id: row.get(1)?,
                    words: row.get(2)?,
                    n_patents: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[PCD Debug] query: query_cluster_firms({}, {:?}) returned {} records",
            n_clusters,
            words,
            rows.len()
        );
        Ok(rows)
    }

    /// Distinct firm count per cluster (overview).
    ///
    /// Groups `patent_counts` by `cluster_id`, counts distinct firms, joins
    /// the labels and keeps the first `limit` clusters in ascending
    /// `cluster_id` order. The truncation happens before any ordering by
    /// firm count.
    pub fn query_cluster_firm_counts(
        &self,
        n_clusters: i64,
        limit: usize,
    ) -> anyhow::Result<Vec<ClusterFirmTotal>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT g.cluster_id, l.words, g.n_firms
             FROM (
                SELECT cluster_id, COUNT(DISTINCT firm) AS n_firms
                FROM patent_counts
                WHERE n_clusters = ?1
                GROUP BY cluster_id
             ) g
             INNER JOIN cluster_labels l
                ON l.cluster_id = g.cluster_id AND l.n_clusters = ?1
             ORDER BY g.cluster_id ASC
             LIMIT ?2",
        )?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map(params![n_clusters, limit], |row| {
                Ok(ClusterFirmTotal {
                    cluster_id: row.get(0)?,
                    words: row.get(1)?,
                    n_firms: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[PCD Debug] query: query_cluster_firm_counts({}, {}) returned {} records",
            n_clusters,
            limit,
            rows.len()
        );
        Ok(rows)
    }

    // ───────────────────── Selector Queries ─────────────────────

    /// Clustering runs present in the patent counts, ascending.
    pub fn query_granularities(&self) -> anyhow::Result<Vec<i64>> {
        let conn = self.conn.borrow();
        let mut stmt =
            conn.prepare("SELECT DISTINCT n_clusters FROM patent_counts ORDER BY n_clusters")?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;
        log::info!(
            "[PCD Debug] query: query_granularities returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Firms with at least one patent count row in the run, alphabetical.
    pub fn query_firms(&self, n_clusters: i64) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT firm FROM patent_counts
             WHERE n_clusters = ?1
             ORDER BY firm",
        )?;
        let rows = stmt
            .query_map(params![n_clusters], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        log::info!(
            "[PCD Debug] query: query_firms({}) returned {} records",
            n_clusters,
            rows.len()
        );
        Ok(rows)
    }

    /// Distinct cluster labels of the run, in order of their lowest `cluster_id`.
    ///
    /// Two clusters of one run may share the same words; the cluster view
    /// filters by label text, so such a label is listed once and its view
    /// covers every cluster carrying it.
    pub fn query_cluster_words(&self, n_clusters: i64) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT words FROM cluster_labels
             WHERE n_clusters = ?1
             GROUP BY words
             ORDER BY MIN(cluster_id)",
        )?;
        let rows = stmt
            .query_map(params![n_clusters], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        log::info!(
            "[PCD Debug] query: query_cluster_words({}) returned {} records",
            n_clusters,
            rows.len()
        );
        Ok(rows)
    }

    /// Count rows of both tables and the patent count rows without a label.
    pub fn integrity_report(&self) -> anyhow::Result<IntegrityReport> {
        let conn = self.conn.borrow();
        let report = conn.query_row(
            "SELECT
                (SELECT COUNT(*) FROM patent_counts),
                (SELECT COUNT(*) FROM cluster_labels),
                (SELECT COUNT(*) FROM patent_counts p
                 WHERE NOT EXISTS (
                    SELECT 1 FROM cluster_labels l
                    WHERE l.cluster_id = p.cluster_id AND l.n_clusters = p.n_clusters
                 ))",
            [],
            |row| {
                Ok(IntegrityReport {
                    patent_rows: row.get(0)?,
                    label_rows: row.get(1)?,
                    orphan_rows: row.get(2)?,
                })
            },
        )?;
        if report.is_consistent() {
            log::info!(
                "[PCD Debug] query: integrity_report: {} patent rows, {} labels, all matched",
                report.patent_rows,
                report.label_rows
            );
        } else {
            log::warn!(
                "[PCD Debug] query: integrity_report: {} of {} patent rows have no cluster label and will not be charted",
                report.orphan_rows,
                report.patent_rows
            );
        }
        Ok(report)
    }
}
