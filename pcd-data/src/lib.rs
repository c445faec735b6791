//! Chart building and page routing for the patent cluster dashboard.
//!
//! This crate turns query results from `pcd-db` into chart specifications
//! the D3.js side can draw, and decides which view a sidebar selection maps
//! to. Nothing here touches the DOM, so it is fully testable natively.

pub mod chart;
pub mod router;

pub use chart::{build_bar_chart, BarChart, ChartError, ChartRequest};
pub use router::{route, Page, PageMode, RenderedView, Selection};
