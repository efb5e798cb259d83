//! Declarative helpers for wiring routes.

/// Register `Default`-constructible view types under route names.
///
/// # Example
/// ```ignore
/// use fm_webui::register_views;
///
/// register_views!(router, {
///     "dashboard" => DashboardView,
///     "metrics" => MetricListView,
/// });
///
/// // Equivalent to:
/// // router.add_route("dashboard", DashboardView::default);
/// // router.add_route("metrics", MetricListView::default);
/// ```
#[macro_export]
macro_rules! register_views {
    ($router:expr, { $($path:expr => $view:ty),* $(,)? }) => {{
        $(
            $router.add_route($path, <$view as ::std::default::Default>::default);
        )*
    }};
}
