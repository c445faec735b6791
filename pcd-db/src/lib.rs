//! In-memory SQLite database layer for firm patent counts and cluster labels.
//!
//! This crate loads the two CSV tables of the dashboard into an in-memory
//! SQLite database and exposes typed query methods for consumption by the
//! Dioxus/D3.js dashboard compiled to WASM.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper for interior mutability in single-threaded WASM
//! - In-memory SQLite via `rusqlite`
//! - CSV data loaded via `include_str!` at compile time in the consuming crate
//! - Typed query methods returning serializable structs for JSON export to D3.js
//!
//! The database is written exactly once, at startup. After the two `load_*`
//! calls every consumer only reads from it, so clones can be handed to every
//! view without coordination.
//!
//! # Usage
//!
//! ```rust
//! use pcd_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_cluster_labels("cluster_id,words,n_clusters\n1,\"battery, cell\",5\n").unwrap();
//! db.load_patent_counts("firm,cluster_id,n_patents,n_clusters\nAcme Corp,1,3,5\n").unwrap();
//!
//! let rows = db.query_firm_clusters(5, "Acme Corp").unwrap();
//! assert_eq!(rows[0].words, "battery, cell");
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//!
//! - `patent_counts` - `firm, cluster_id, n_patents, n_clusters`
//! - `cluster_labels` - `cluster_id, words, n_clusters`

pub mod schema;
mod loader;
mod queries;
pub mod models;

pub use loader::LoadError;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database holding the dashboard's two tables.
///
/// This struct is cheaply cloneable (via `Rc`) and suitable for sharing
/// across Dioxus components in a single-threaded WASM environment.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` methods
    /// to populate it with CSV data.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: &str = "cluster_id,words,n_clusters\n1,\"battery, cell\",5\n";

    #[test]
    fn database_creates_successfully() {
        let db = Database::new();
        assert!(db.is_ok(), "Database should create without errors");
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        db.load_cluster_labels(LABELS).unwrap();
        let labels = db2.query_cluster_words(5).unwrap();
        assert_eq!(labels.len(), 1, "Clone should see same data via shared Rc");
    }

    #[test]
    fn database_starts_empty() {
        let db = Database::new().unwrap();
        assert!(db.query_granularities().unwrap().is_empty());
        assert!(db.query_cluster_words(5).unwrap().is_empty());
    }
}
