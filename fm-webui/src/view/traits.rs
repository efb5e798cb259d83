use crate::dom::Container;
use crate::query::QueryMap;

/// A page the router can mount into the viewport.
///
/// The router calls `render` exactly once after constructing the view, and
/// `destroy` exactly once before dropping it. The container is only lent for
/// the duration of each call.
pub trait View: 'static {
    /// Write this view's content into the container.
    fn render(&mut self, container: &mut Container, query: &QueryMap);

    /// Tear down whatever `render` put into the container.
    fn destroy(&mut self, container: &mut Container) {
        container.clear();
    }
}

/// Builds a fresh view for every navigation to its route.
pub type ViewFactory = Box<dyn Fn() -> Box<dyn View>>;
