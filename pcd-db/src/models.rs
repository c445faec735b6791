//! Query result model structs for the patent cluster views.
//!
//! All structs derive `Serialize` so they can be passed to D3.js as JSON
//! from the Dioxus WASM frontend.

use serde::Serialize;

/// One cluster of a firm's portfolio (firm view).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FirmClusterCount {
    pub cluster_id: i64,
    /// Keyword label of the cluster.
    pub words: String,
    /// Patents of the selected firm in this cluster.
    pub n_patents: i64,
}

/// One firm holding patents in a cluster (cluster view).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClusterFirmCount {
    pub firm: String,
    pub cluster_id: i64,
    pub words: String,
    /// Patents of this firm in the selected cluster.
    pub n_patents: i64,
}

/// Number of distinct firms present in a cluster (overview).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClusterFirmTotal {
    pub cluster_id: i64,
    pub words: String,
    pub n_firms: i64,
}

/// Row counts gathered after load.
///
/// `orphan_rows` counts patent count rows whose `(cluster_id, n_clusters)`
/// has no label; those rows never reach a chart.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct IntegrityReport {
    pub patent_rows: i64,
    pub label_rows: i64,
    pub orphan_rows: i64,
}

impl IntegrityReport {
    pub fn is_consistent(&self) -> bool {
        self.orphan_rows == 0
    }
}
