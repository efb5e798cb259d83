//! Fragment routing with a single active view.
//!
//! `Router` owns the route table, the header bar, the viewport and the one
//! view currently mounted in it. Navigation always tears the old view down
//! before the next one is rendered.

use crate::dom::{Anchor, Container, Document, HeaderBar, MountPoint};
use crate::error::{Result, RouteNotFoundSnafu};
use crate::history::{History, HistoryState, MemoryHistory, PopStateEvent};
use crate::loader;
use crate::notify::{AlertQueue, Notifier};
use crate::query::QueryMap;
use crate::view::{View, ViewFactory};
use snafu::OptionExt;
use std::collections::HashMap;
use tokio::sync::mpsc;

/// A router mapping URL fragments to views.
///
/// # Example
/// ```ignore
/// use fm_webui::{AlertQueue, Document, MemoryHistory, Router};
///
/// let mut document = Document::new();
/// let mut router = Router::new(&mut document, MemoryHistory::new(), AlertQueue::new());
/// router.add_route("dashboard", DashboardView::default);
/// router.add_menu_item("Dashboard", "path=dashboard");
///
/// router.navigate("path=dashboard", true);
/// assert_eq!(router.history().location(), "#path=dashboard");
/// ```
pub struct Router<H: History = MemoryHistory, N: Notifier = AlertQueue> {
    routes: HashMap<String, ViewFactory>,
    current_view: Option<Box<dyn View>>,
    header_bar: HeaderBar,
    viewport: Container,
    history: H,
    notifier: N,
    pop_states: Option<mpsc::UnboundedReceiver<PopStateEvent>>,
}

impl<H: History, N: Notifier> Router<H, N> {
    /// Create a router and attach its mount points to `document`.
    pub fn new(document: &mut Document, history: H, notifier: N) -> Self {
        let mut router = Self {
            routes: HashMap::new(),
            current_view: None,
            header_bar: HeaderBar::default(),
            viewport: Container::viewport(),
            history,
            notifier,
            pop_states: None,
        };
        router.initialize(document);
        router
    }

    fn initialize(&mut self, document: &mut Document) {
        document.append_child(MountPoint::HeaderBar);
        document.append_child(MountPoint::Viewport);
        self.pop_states = Some(self.history.subscribe());
        tracing::info!(
            headbar = self.header_bar.class_name(),
            viewport = self.viewport.class_name(),
            "router initialized"
        );
    }

    /// Register a view factory under a route name. A later registration for
    /// the same name replaces the earlier one.
    pub fn add_route<F, V>(&mut self, path: impl Into<String>, factory: F)
    where
        F: Fn() -> V + 'static,
        V: View,
    {
        let path = path.into();
        let factory: ViewFactory = Box::new(move || Box::new(factory()) as Box<dyn View>);
        if self.routes.insert(path.clone(), factory).is_some() {
            tracing::debug!(%path, "route factory replaced");
        }
    }

    /// Append a link to the header bar that navigates to `fragment`.
    pub fn add_menu_item(&mut self, label: impl Into<String>, fragment: &str) {
        self.header_bar.append_link(Anchor::new(label, fragment));
    }

    /// Activate the menu link at `index`.
    ///
    /// Returns true when a link was hit; the click is then consumed and the
    /// link is never followed as a plain location change.
    pub fn click_menu_item(&mut self, index: usize) -> bool {
        let Some(anchor) = self.header_bar.link(index) else {
            return false;
        };
        let fragment = anchor.fragment().to_owned();
        self.navigate(&fragment, true);
        true
    }

    /// Navigate to `raw_fragment`.
    ///
    /// An unknown route raises an alert and leaves the view, the viewport and
    /// the history untouched. With `push_history` false the history is not
    /// touched either; this is how back/forward entries are replayed.
    /// A leading `#` is ignored, so `#path=a` and `path=a` are the same entry.
    pub fn navigate(&mut self, raw_fragment: &str, push_history: bool) {
        let raw_fragment = raw_fragment.strip_prefix('#').unwrap_or(raw_fragment);
        let query = QueryMap::parse(raw_fragment);
        let factory = match lookup(&self.routes, &query) {
            Ok(factory) => factory,
            Err(err) => {
                tracing::warn!(fragment = raw_fragment, %err, "navigation aborted");
                self.notifier.alert(&err.to_string());
                return;
            }
        };

        if push_history {
            let state = HistoryState::new(raw_fragment);
            self.history
                .push_state(state.to_value(), &format!("#{raw_fragment}"));
        }

        if let Some(mut previous) = self.current_view.take() {
            previous.destroy(&mut self.viewport);
        }

        loader::display_loader(&mut self.viewport);

        let view = self.current_view.insert(factory());
        view.render(&mut self.viewport, &query);

        tracing::debug!(
            fragment = raw_fragment,
            push_history,
            entries = self.history.len(),
            "navigated"
        );
    }

    /// Replay a back/forward entry. Events without a router payload are ignored.
    pub fn handle_pop_state(&mut self, event: &PopStateEvent) {
        match event.history_state() {
            Some(state) => self.navigate(&state.url, false),
            None => tracing::debug!("ignoring popstate without url"),
        }
    }

    /// Drain queued pop-state events through the replay handler. Returns the
    /// number of events handled.
    pub fn process_history(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.next_pop_state() {
            self.handle_pop_state(&event);
            handled += 1;
        }
        handled
    }

    fn next_pop_state(&mut self) -> Option<PopStateEvent> {
        self.pop_states.as_mut()?.try_recv().ok()
    }

    /// Step back in history and replay the entry. Returns false at the start.
    pub fn go_back(&mut self) -> bool {
        let moved = self.history.back();
        self.process_history();
        moved
    }

    /// Step forward in history and replay the entry. Returns false at the end.
    pub fn go_forward(&mut self) -> bool {
        let moved = self.history.forward();
        self.process_history();
        moved
    }

    pub fn has_route(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn has_current_view(&self) -> bool {
        self.current_view.is_some()
    }

    pub fn header_bar(&self) -> &HeaderBar {
        &self.header_bar
    }

    pub fn viewport(&self) -> &Container {
        &self.viewport
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }
}

fn lookup<'a>(routes: &'a HashMap<String, ViewFactory>, query: &QueryMap) -> Result<&'a ViewFactory> {
    query
        .path()
        .and_then(|path| routes.get(path))
        .context(RouteNotFoundSnafu {
            path: query.path().map(str::to_owned),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Records its lifecycle calls and echoes the query into the container.
    struct SpyView {
        name: &'static str,
        log: Log,
    }

    impl View for SpyView {
        fn render(&mut self, container: &mut Container, query: &QueryMap) {
            if loader::is_loading(container) {
                self.log.borrow_mut().push(format!("{}:loader", self.name));
            }
            self.log.borrow_mut().push(format!("{}:render", self.name));
            container.clear();
            container.set_title(self.name);
            container.push_line(format!("query {query}"));
        }

        fn destroy(&mut self, container: &mut Container) {
            self.log.borrow_mut().push(format!("{}:destroy", self.name));
            container.clear();
        }
    }

    fn spy(name: &'static str, log: &Log) -> impl Fn() -> SpyView + 'static {
        let log = log.clone();
        move || SpyView {
            name,
            log: log.clone(),
        }
    }

    fn setup() -> (Router, Log) {
        let log = Log::default();
        let mut document = Document::new();
        let mut router = Router::new(&mut document, MemoryHistory::new(), AlertQueue::new());
        router.add_route("dashboard", spy("dashboard", &log));
        router.add_route("metrics", spy("metrics", &log));
        (router, log)
    }

    fn entries(log: &Log) -> Vec<String> {
        log.borrow().clone()
    }

    #[test]
    fn test_initialize_attaches_mount_points() {
        let mut document = Document::new();
        let router: Router = Router::new(&mut document, MemoryHistory::new(), AlertQueue::new());
        assert_eq!(document.body(), [MountPoint::HeaderBar, MountPoint::Viewport]);
        assert!(!router.has_current_view());
        assert!(router.viewport().is_empty());
        assert_eq!(router.history().len(), 1);
    }

    #[test]
    fn test_navigate_renders_with_query() {
        let (mut router, log) = setup();
        router.navigate("path=metrics&filter=cpu", true);

        assert!(router.has_current_view());
        assert_eq!(router.viewport().title(), Some("metrics"));
        assert_eq!(router.viewport().text(), "query filter=cpu&path=metrics");
        assert_eq!(entries(&log), ["metrics:loader", "metrics:render"]);
    }

    #[test]
    fn test_destroy_before_render() {
        let (mut router, log) = setup();
        router.navigate("path=dashboard", true);
        router.navigate("path=metrics", true);
        router.navigate("path=metrics&filter=mem", true);

        assert_eq!(
            entries(&log),
            [
                "dashboard:loader",
                "dashboard:render",
                "dashboard:destroy",
                "metrics:loader",
                "metrics:render",
                "metrics:destroy",
                "metrics:loader",
                "metrics:render",
            ]
        );
    }

    #[test]
    fn test_unknown_route_is_noop() {
        let (mut router, log) = setup();
        router.navigate("path=dashboard", true);
        let viewport = router.viewport().clone();
        let history_len = router.history().len();

        router.navigate("path=nope", true);

        assert_eq!(router.viewport(), &viewport);
        assert_eq!(router.history().len(), history_len);
        assert_eq!(router.history().location(), "#path=dashboard");
        assert!(router.has_current_view());
        assert_eq!(entries(&log), ["dashboard:loader", "dashboard:render"]);
        assert_eq!(router.notifier().len(), 1);
        assert_eq!(router.notifier().current(), Some("no route found for: nope"));
    }

    #[test]
    fn test_missing_path_reports_undefined() {
        let (mut router, _log) = setup();
        router.navigate("filter=cpu", true);

        assert!(!router.has_current_view());
        assert_eq!(router.history().len(), 1);
        assert_eq!(router.notifier().current(), Some("no route found for: undefined"));
    }

    #[test]
    fn test_router_usable_after_failure() {
        let (mut router, _log) = setup();
        router.navigate("path=nope", true);
        router.notifier_mut().dismiss();

        router.navigate("path=dashboard", true);
        assert_eq!(router.viewport().title(), Some("dashboard"));
        assert!(!router.notifier().is_blocking());
    }

    #[test]
    fn test_history_push_discipline() {
        let (mut router, _log) = setup();

        router.navigate("path=dashboard", true);
        assert_eq!(router.history().len(), 2);
        assert_eq!(
            router.history().current().state,
            Some(json!({ "url": "path=dashboard" }))
        );
        assert_eq!(router.history().location(), "#path=dashboard");

        router.navigate("path=metrics", false);
        assert_eq!(router.history().len(), 2);
        assert_eq!(router.history().location(), "#path=dashboard");
        assert_eq!(router.viewport().title(), Some("metrics"));
    }

    #[test]
    fn test_leading_hash_is_not_pushed_twice() {
        let (mut router, _log) = setup();
        router.navigate("#path=dashboard", true);

        assert_eq!(router.viewport().title(), Some("dashboard"));
        assert_eq!(router.history().location(), "#path=dashboard");
        assert_eq!(
            router.history().current().state,
            Some(json!({ "url": "path=dashboard" }))
        );
    }

    #[test]
    fn test_pop_state_replay_matches_direct_navigation() {
        let (mut direct, _) = setup();
        direct.navigate("path=dashboard", true);

        let (mut replayed, log) = setup();
        replayed.navigate("path=metrics", true);
        let history_len = replayed.history().len();

        replayed.handle_pop_state(&PopStateEvent::new(Some(json!({ "url": "path=dashboard" }))));

        assert_eq!(replayed.viewport(), direct.viewport());
        assert_eq!(replayed.history().len(), history_len);
        assert_eq!(
            entries(&log),
            [
                "metrics:loader",
                "metrics:render",
                "metrics:destroy",
                "dashboard:loader",
                "dashboard:render",
            ]
        );
    }

    #[test]
    fn test_pop_state_without_url_is_ignored() {
        let (mut router, log) = setup();
        router.navigate("path=dashboard", true);

        router.handle_pop_state(&PopStateEvent::new(None));
        router.handle_pop_state(&PopStateEvent::new(Some(json!({ "scroll": 3 }))));

        assert_eq!(entries(&log), ["dashboard:loader", "dashboard:render"]);
        assert!(!router.notifier().is_blocking());
    }

    #[test]
    fn test_back_and_forward_replay_entries() {
        let (mut router, _log) = setup();
        router.navigate("path=dashboard", true);
        router.navigate("path=metrics", true);
        assert_eq!(router.history().len(), 3);

        assert!(router.go_back());
        assert_eq!(router.viewport().title(), Some("dashboard"));
        assert_eq!(router.history().len(), 3);

        assert!(router.go_forward());
        assert_eq!(router.viewport().title(), Some("metrics"));
        assert_eq!(router.history().len(), 3);

        // Back to the initial entry: no payload, the view stays.
        assert!(router.go_back());
        assert!(router.go_back());
        assert_eq!(router.viewport().title(), Some("dashboard"));
        assert!(!router.go_back());
    }

    #[test]
    fn test_process_history_drains_queue() {
        let (mut router, log) = setup();
        router.navigate("path=dashboard", true);
        router.navigate("path=metrics", true);

        router.history_mut().back();
        router.history_mut().forward();
        assert_eq!(router.process_history(), 2);
        assert_eq!(router.process_history(), 0);
        assert_eq!(router.viewport().title(), Some("metrics"));
        assert_eq!(log.borrow().iter().filter(|e| e.ends_with(":render")).count(), 4);
    }

    #[test]
    fn test_menu_click_matches_direct_navigation() {
        let (mut direct, _) = setup();
        direct.navigate("path=dashboard", true);

        let (mut clicked, _) = setup();
        clicked.add_menu_item("Metrics", "path=metrics");
        clicked.add_menu_item("Dashboard", "path=dashboard");
        assert_eq!(clicked.header_bar().links().len(), 2);
        assert_eq!(clicked.header_bar().links()[1].href(), "#path=dashboard");

        assert!(clicked.click_menu_item(1));
        assert_eq!(clicked.viewport(), direct.viewport());
        assert_eq!(clicked.history().entries(), direct.history().entries());

        assert!(!clicked.click_menu_item(7));
    }

    #[test]
    fn test_add_route_overwrites() {
        let log = Log::default();
        let mut document = Document::new();
        let mut router: Router = Router::new(&mut document, MemoryHistory::new(), AlertQueue::new());
        router.add_route("x", spy("a", &log));
        router.add_route("x", spy("b", &log));
        assert_eq!(router.route_count(), 1);

        router.navigate("path=x", true);
        assert_eq!(entries(&log), ["b:loader", "b:render"]);
        assert!(router.has_route("x"));
        assert!(!router.has_route("path=x"));
    }
}
