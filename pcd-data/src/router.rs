//! Page routing: turns the sidebar selection into one rendered view.
//!
//! Every interaction produces a fresh [`Selection`] and a full re-render;
//! nothing is carried over from the previous page. The granularity is
//! applied first, then the page mode picks one of the three views.

use crate::chart::{
    build_bar_chart, AxisLabels, BarChart, CategoryColumn, ChartRequest, ValueColumn,
};
use pcd_db::Database;

/// Number of clusters the overview keeps, in ascending `cluster_id` order.
pub const OVERVIEW_CLUSTER_LIMIT: usize = 50;

/// The three mutually exclusive pages offered by the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageMode {
    #[default]
    Overview,
    FirmSelection,
    ClusterSelection,
}

impl PageMode {
    /// Sidebar order.
    pub const ALL: [PageMode; 3] = [
        PageMode::Overview,
        PageMode::FirmSelection,
        PageMode::ClusterSelection,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PageMode::Overview => "See all Clusters",
            PageMode::FirmSelection => "Firm Selection",
            PageMode::ClusterSelection => "Cluster Selection",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.label() == label)
    }
}

/// A page together with its user-chosen key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Overview,
    /// Firm name.
    Firm(String),
    /// Cluster label text.
    Cluster(String),
}

impl Page {
    pub fn mode(&self) -> PageMode {
        match self {
            Page::Overview => PageMode::Overview,
            Page::Firm(_) => PageMode::FirmSelection,
            Page::Cluster(_) => PageMode::ClusterSelection,
        }
    }

    /// Assemble a page from the mode selector and the two key dropdowns.
    /// Only the key belonging to `mode` is used.
    pub fn from_mode(mode: PageMode, firm: &str, cluster: &str) -> Self {
        match mode {
            PageMode::Overview => Page::Overview,
            PageMode::FirmSelection => Page::Firm(firm.to_string()),
            PageMode::ClusterSelection => Page::Cluster(cluster.to_string()),
        }
    }
}

/// Full sidebar state for one interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Clustering run (`n_clusters`) every table is restricted to.
    pub granularity: i64,
    pub page: Page,
}

/// What the main panel shows for one selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    pub title: String,
    pub subheader: String,
    /// Shown after the subheader in a larger font (the cluster page's label).
    pub emphasis: Option<String>,
    pub chart: BarChart,
}

/// Dispatch `selection` to its view.
pub fn route(db: &Database, selection: &Selection) -> anyhow::Result<RenderedView> {
    log::info!(
        "[PCD Debug] router: granularity={} mode={:?}",
        selection.granularity,
        selection.page.mode()
    );
    let view = match &selection.page {
        Page::Overview => overview(db, selection.granularity)?,
        Page::Firm(firm) => firm_view(db, selection.granularity, firm)?,
        Page::Cluster(words) => cluster_view(db, selection.granularity, words)?,
    };
    if view.chart.is_empty() {
        log::info!("[PCD Debug] router: selection matched no rows, rendering empty chart");
    }
    Ok(view)
}

/// Distinct firms per cluster for the first [`OVERVIEW_CLUSTER_LIMIT`] clusters.
pub fn overview(db: &Database, granularity: i64) -> anyhow::Result<RenderedView> {
    let rows = db.query_cluster_firm_counts(granularity, OVERVIEW_CLUSTER_LIMIT)?;
    // the page header already says what the chart shows
    let chart = build_bar_chart(
        &rows,
        &ChartRequest {
            value: ValueColumn::FirmCount,
            category: CategoryColumn::ClusterWords,
            title: String::new(),
            labels: AxisLabels::new("Number of Firms", "Cluster"),
        },
    )?;
    Ok(RenderedView {
        title: "Cluster Firm Count Analysis".to_string(),
        subheader: "Number of firms within each cluster".to_string(),
        emphasis: None,
        chart,
    })
}

/// Patent count of one firm in each cluster.
pub fn firm_view(db: &Database, granularity: i64, firm: &str) -> anyhow::Result<RenderedView> {
    let rows = db.query_firm_clusters(granularity, firm)?;
    let heading = format!("Number of patents for {} in each cluster", firm);
    let chart = build_bar_chart(
        &rows,
        &ChartRequest {
            value: ValueColumn::PatentCount,
            category: CategoryColumn::ClusterWords,
            title: heading.clone(),
            labels: AxisLabels::new("Number of Patents", "Cluster Words"),
        },
    )?;
    Ok(RenderedView {
        title: "Clusters in Firms".to_string(),
        subheader: heading,
        emphasis: None,
        chart,
    })
}

/// Patent count of each firm in the cluster labelled `words`.
pub fn cluster_view(db: &Database, granularity: i64, words: &str) -> anyhow::Result<RenderedView> {
    let rows = db.query_cluster_firms(granularity, words)?;
    let chart = build_bar_chart(
        &rows,
        &ChartRequest {
            value: ValueColumn::PatentCount,
            category: CategoryColumn::Firm,
            title: "Number of patents in cluster".to_string(),
            labels: AxisLabels::new("Number of Patents", "Firms"),
        },
    )?;
    Ok(RenderedView {
        title: "Firms in clusters".to_string(),
        subheader: "Number of patents for each firm in cluster whose top 10 words are:"
            .to_string(),
        emphasis: Some(words.to_string()),
        chart,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::BASE_HEIGHT;

    fn sample_db() -> Database {
        let db = Database::new().unwrap();
        db.load_cluster_labels(
            "\
cluster_id,words,n_clusters
1,\"battery, cell\",5
2,\"engine, motor\",5
1,\"lithium, anode\",10
",
        )
        .unwrap();
        db.load_patent_counts(
            "\
firm,cluster_id,n_patents,n_clusters
Acme Corp,2,7,5
Acme Corp,1,3,5
Globex,1,9,5
Acme Corp,1,11,10
",
        )
        .unwrap();
        db
    }

    fn bars(view: &RenderedView) -> Vec<(&str, i64)> {
        view.chart
            .bars
            .iter()
            .map(|b| (b.category.as_str(), b.value))
            .collect()
    }

    #[test]
    fn mode_labels_round_trip() {
        for mode in PageMode::ALL {
            assert_eq!(PageMode::from_label(mode.label()), Some(mode));
        }
        assert_eq!(PageMode::from_label("Nope"), None);
        assert_eq!(PageMode::default(), PageMode::Overview);
    }

    #[test]
    fn page_from_mode_uses_matching_key() {
        assert_eq!(
            Page::from_mode(PageMode::FirmSelection, "Acme Corp", "battery, cell"),
            Page::Firm("Acme Corp".to_string())
        );
        assert_eq!(
            Page::from_mode(PageMode::ClusterSelection, "Acme Corp", "battery, cell"),
            Page::Cluster("battery, cell".to_string())
        );
        assert_eq!(
            Page::from_mode(PageMode::Overview, "Acme Corp", "battery, cell"),
            Page::Overview
        );
    }

    #[test]
    fn firm_page_scenario() {
        let db = sample_db();
        let view = route(
            &db,
            &Selection {
                granularity: 5,
                page: Page::Firm("Acme Corp".to_string()),
            },
        )
        .unwrap();
        assert_eq!(bars(&view), vec![("battery, cell", 3), ("engine, motor", 7)]);
        assert_eq!(view.chart.height, 250 + 35 * 2);
        assert_eq!(view.title, "Clusters in Firms");
        assert_eq!(
            view.subheader,
            "Number of patents for Acme Corp in each cluster"
        );
        assert_eq!(view.chart.title, view.subheader);
        assert_eq!(view.chart.x_label, "Number of Patents");
        assert_eq!(view.chart.y_label, "Cluster Words");
        assert_eq!(view.emphasis, None);
    }

    #[test]
    fn unknown_firm_renders_empty_chart() {
        let db = sample_db();
        let view = route(
            &db,
            &Selection {
                granularity: 5,
                page: Page::Firm("Nobody Inc".to_string()),
            },
        )
        .unwrap();
        assert!(view.chart.is_empty());
        assert_eq!(view.chart.height, BASE_HEIGHT);
    }

    #[test]
    fn cluster_page_charts_firms() {
        let db = sample_db();
        let view = route(
            &db,
            &Selection {
                granularity: 5,
                page: Page::Cluster("battery, cell".to_string()),
            },
        )
        .unwrap();
        assert_eq!(bars(&view), vec![("Acme Corp", 3), ("Globex", 9)]);
        assert_eq!(view.title, "Firms in clusters");
        assert_eq!(
            view.subheader,
            "Number of patents for each firm in cluster whose top 10 words are:"
        );
        assert_eq!(view.emphasis.as_deref(), Some("battery, cell"));
        assert_eq!(view.chart.title, "Number of patents in cluster");
        assert_eq!(view.chart.x_label, "Number of Patents");
        assert_eq!(view.chart.y_label, "Firms");
        assert_eq!(view.chart.category_column, "firm");
    }

    #[test]
    fn overview_counts_firms() {
        let db = sample_db();
        let view = route(
            &db,
            &Selection {
                granularity: 5,
                page: Page::Overview,
            },
        )
        .unwrap();
        assert_eq!(bars(&view), vec![("engine, motor", 1), ("battery, cell", 2)]);
        assert_eq!(view.chart.value_column, "n_firms");
        assert_eq!(view.title, "Cluster Firm Count Analysis");
        assert_eq!(view.subheader, "Number of firms within each cluster");
        assert!(view.chart.title.is_empty());
        assert_eq!(view.chart.x_label, "Number of Firms");
        assert_eq!(view.chart.y_label, "Cluster");
    }

    #[test]
    fn overview_with_sixty_clusters_renders_fifty_bars() {
        let db = Database::new().unwrap();
        let mut labels = String::from("cluster_id,words,n_clusters\n");
        let mut counts = String::from("firm,cluster_id,n_patents,n_clusters\n");
        for id in 0..60 {
            labels.push_str(&format!("{id},words {id},60\n"));
            counts.push_str(&format!("Acme Corp,{id},1,60\n"));
        }
        db.load_cluster_labels(&labels).unwrap();
        db.load_patent_counts(&counts).unwrap();

        let view = overview(&db, 60).unwrap();
        assert_eq!(view.chart.bars.len(), 50);
        assert_eq!(view.chart.height, 250 + 35 * 50);
    }

    #[test]
    fn granularity_isolates_runs() {
        let db = sample_db();
        let view = firm_view(&db, 10, "Acme Corp").unwrap();
        assert_eq!(bars(&view), vec![("lithium, anode", 11)]);

        let view = cluster_view(&db, 10, "battery, cell").unwrap();
        assert!(view.chart.is_empty());
    }
}
