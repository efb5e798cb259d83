pub mod dashboard;
pub mod metric;
pub mod metrics;
pub mod query;

pub use dashboard::DashboardView;
pub use metric::MetricView;
pub use metrics::MetricListView;
pub use query::QueryView;
