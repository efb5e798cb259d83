use crate::model;
use fm_webui::{Container, QueryMap, View};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Metric catalog, optionally narrowed with `filter=<substring>`.
#[derive(Default)]
pub struct MetricListView {
    shown: usize,
}

impl View for MetricListView {
    fn render(&mut self, container: &mut Container, query: &QueryMap) {
        let filter = query.get("filter").unwrap_or_default();

        container.clear();
        container.set_title(if filter.is_empty() {
            "Metrics".to_string()
        } else {
            format!("Metrics matching '{filter}'")
        });

        self.shown = 0;
        for metric in model::filtered(filter) {
            container.push_line(Line::from(vec![
                Span::styled(format!(" {:<16}", metric.key), Style::default().fg(Color::Cyan)),
                Span::raw(metric.description),
            ]));
            container.push_line(Line::styled(
                format!("   #path=metric&name={}", metric.key),
                Style::default().fg(Color::DarkGray),
            ));
            self.shown += 1;
        }

        if self.shown == 0 {
            container.push_line(Line::styled(" No metrics found", Style::default().fg(Color::Yellow)));
        }
    }

    fn destroy(&mut self, container: &mut Container) {
        tracing::debug!(shown = self.shown, "metric list destroyed");
        container.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter() {
        let mut view = MetricListView::default();
        let mut container = Container::viewport();
        view.render(&mut container, &QueryMap::parse("path=metrics&filter=http"));

        assert_eq!(view.shown, 2);
        assert_eq!(container.title(), Some("Metrics matching 'http'"));
        assert!(container.text().contains("#path=metric&name=http.errors"));
        assert!(!container.text().contains("cpu.load"));

        view.destroy(&mut container);
        assert!(container.is_empty());
    }

    #[test]
    fn test_no_match() {
        let mut view = MetricListView::default();
        let mut container = Container::viewport();
        view.render(&mut container, &QueryMap::parse("path=metrics&filter=zzz"));
        assert_eq!(container.text(), " No metrics found");
    }
}
