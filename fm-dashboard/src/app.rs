//! Route table and menu for the dashboard.

use crate::views::{DashboardView, MetricListView, MetricView, QueryView};
use fm_webui::{register_views, History, Notifier, Router};

pub const START_FRAGMENT: &str = "path=dashboard";

/// Register every view and the header menu.
pub fn install<H: History, N: Notifier>(router: &mut Router<H, N>) {
    register_views!(router, {
        "dashboard" => DashboardView,
        "metrics" => MetricListView,
        "metric" => MetricView,
        "query" => QueryView,
    });

    router.add_menu_item("Dashboard", START_FRAGMENT);
    router.add_menu_item("Metrics", "path=metrics");
    router.add_menu_item("Query", "path=query");
}
