//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use pcd_data::router::{Page, PageMode, Selection};
use pcd_db::Database;
use dioxus::prelude::*;

/// Why the dashboard stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The CSV snapshot could not be loaded.
    Load(String),
    /// A view could not be built from the loaded snapshot.
    View(String),
}

impl AppError {
    pub fn message(&self) -> &str {
        match self {
            AppError::Load(msg) | AppError::View(msg) => msg,
        }
    }

    /// Advice for the reader. Only load failures point at the data files.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            AppError::Load(_) => Some(
                "Check that patent_counts.csv and cluster_labels.csv are present and well formed, then rebuild.",
            ),
            AppError::View(_) => None,
        }
    }
}

/// Shared application state for the dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Database snapshot (None until loaded)
    pub db: Signal<Option<Database>>,
    /// Whether the app is still loading
    pub loading: Signal<bool>,
    /// Fatal error; once set the dashboard stops rendering views
    pub error: Signal<Option<AppError>>,
    /// Clustering runs available in the data
    pub granularities: Signal<Vec<i64>>,
    /// Currently selected clustering run
    pub granularity: Signal<i64>,
    /// Currently selected page
    pub mode: Signal<PageMode>,
    /// Firms of the selected run
    pub firms: Signal<Vec<String>>,
    /// Currently selected firm (firm page)
    pub selected_firm: Signal<String>,
    /// Distinct cluster labels of the selected run
    pub cluster_words: Signal<Vec<String>>,
    /// Currently selected cluster label (cluster page)
    pub selected_cluster: Signal<String>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            db: Signal::new(None),
            loading: Signal::new(true),
            error: Signal::new(None),
            granularities: Signal::new(Vec::new()),
            granularity: Signal::new(0),
            mode: Signal::new(PageMode::default()),
            firms: Signal::new(Vec::new()),
            selected_firm: Signal::new(String::new()),
            cluster_words: Signal::new(Vec::new()),
            selected_cluster: Signal::new(String::new()),
        }
    }

    /// Snapshot of the sidebar as a router selection.
    pub fn selection(&self) -> Selection {
        Selection {
            granularity: (self.granularity)(),
            page: Page::from_mode(
                (self.mode)(),
                &self.selected_firm.read(),
                &self.selected_cluster.read(),
            ),
        }
    }

    /// Refill the firm and cluster dropdowns for the selected run.
    ///
    /// A previous firm or label is kept when it still exists in the new run,
    /// otherwise the first entry is selected. Signals are peeked so calling
    /// this from an effect does not subscribe the effect to them.
    pub fn refresh_key_options(&mut self) {
        let db = match &*self.db.peek() {
            Some(db) => db.clone(),
            None => return,
        };
        let granularity = *self.granularity.peek();

        match db.query_firms(granularity) {
            Ok(firms) => {
                let current = self.selected_firm.peek().clone();
                if !firms.contains(&current) {
                    self.selected_firm
                        .set(firms.first().cloned().unwrap_or_default());
                }
                self.firms.set(firms);
            }
            Err(e) => log::warn!("Failed to list firms for run {}: {}", granularity, e),
        }

        match db.query_cluster_words(granularity) {
            Ok(words) => {
                let current = self.selected_cluster.peek().clone();
                if !words.contains(&current) {
                    self.selected_cluster
                        .set(words.first().cloned().unwrap_or_default());
                }
                self.cluster_words.set(words);
            }
            Err(e) => log::warn!("Failed to list clusters for run {}: {}", granularity, e),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn only_load_errors_mention_the_data_files() {
        let load = AppError::Load("Failed to load patent counts: no data rows".to_string());
        assert!(load.hint().unwrap().contains("patent_counts.csv"));
        assert_eq!(load.message(), "Failed to load patent counts: no data rows");

        let view = AppError::View("no such column: n_firms".to_string());
        assert_eq!(view.hint(), None);
        assert_eq!(view.message(), "no such column: n_firms");
    }
}
